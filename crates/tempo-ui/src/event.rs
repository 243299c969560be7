/// System time notifications routed to clock widgets.
///
/// Mirrors the three broadcasts a clock face listens to on a desktop or
/// mobile host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockEvent {
    /// Wall time was set (manually or by network sync).
    ///
    /// Some hosts attach the active zone identifier.
    TimeChanged { time_zone: Option<String> },
    /// The host's zone changed. `time_zone` is the new IANA identifier if known.
    TimezoneChanged { time_zone: Option<String> },
    /// The wall-clock minute advanced.
    TimeTick,
}

/// Payload-free discriminant of [`ClockEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockEventKind {
    TimeChanged,
    TimezoneChanged,
    TimeTick,
}

impl ClockEvent {
    #[inline]
    pub fn kind(&self) -> ClockEventKind {
        match self {
            ClockEvent::TimeChanged { .. } => ClockEventKind::TimeChanged,
            ClockEvent::TimezoneChanged { .. } => ClockEventKind::TimezoneChanged,
            ClockEvent::TimeTick => ClockEventKind::TimeTick,
        }
    }

    /// Zone identifier carried by the event, if any.
    #[inline]
    pub fn time_zone(&self) -> Option<&str> {
        match self {
            ClockEvent::TimeChanged { time_zone } | ClockEvent::TimezoneChanged { time_zone } => {
                time_zone.as_deref()
            }
            ClockEvent::TimeTick => None,
        }
    }

    /// `TimezoneChanged` carrying `id`.
    pub fn zone_changed(id: impl Into<String>) -> Self {
        ClockEvent::TimezoneChanged { time_zone: Some(id.into()) }
    }
}
