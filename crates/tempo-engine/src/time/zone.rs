use chrono::{DateTime, Local, Offset, Utc};
use chrono_tz::Tz;

use super::TimeSample;

/// The zone a clock face reads its time in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ClockZone {
    /// The host's local zone, as resolved by the OS at sampling time.
    #[default]
    Local,
    /// A fixed IANA zone.
    Named(Tz),
}

impl ClockZone {
    /// Resolves an IANA identifier such as `"Europe/Paris"`.
    ///
    /// Returns `None` for identifiers missing from the zone database.
    pub fn parse(id: &str) -> Option<Self> {
        id.trim().parse::<Tz>().ok().map(ClockZone::Named)
    }

    /// Like [`parse`](Self::parse) but unknown identifiers fall back to UTC.
    pub fn from_id_or_utc(id: &str) -> Self {
        Self::parse(id).unwrap_or_else(|| {
            log::warn!("unknown time zone {id:?}; falling back to UTC");
            ClockZone::Named(Tz::UTC)
        })
    }

    /// Identifier of the zone (`"local"` for the host zone).
    pub fn name(&self) -> &str {
        match self {
            ClockZone::Local => "local",
            ClockZone::Named(tz) => tz.name(),
        }
    }

    /// Reads hour/minute/second of `instant` in this zone.
    pub fn sample(&self, instant: DateTime<Utc>) -> TimeSample {
        match self {
            ClockZone::Local => TimeSample::from_time(&instant.with_timezone(&Local)),
            ClockZone::Named(tz) => TimeSample::from_time(&instant.with_timezone(tz)),
        }
    }

    /// Offset from UTC at `instant`, in seconds east.
    pub fn utc_offset_seconds(&self, instant: DateTime<Utc>) -> i32 {
        match self {
            ClockZone::Local => instant.with_timezone(&Local).offset().fix().local_minus_utc(),
            ClockZone::Named(tz) => instant.with_timezone(tz).offset().fix().local_minus_utc(),
        }
    }
}
