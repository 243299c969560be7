use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use parking_lot::RwLock;
use tempo_engine::time::{ClockZone, TimeSample, WallClock};

use super::HandAngles;
use crate::event::ClockEvent;

/// State shared between the widget, its ticker and its event listener.
///
/// Angles are `f32` bit patterns in atomics. A reader may see the hour of one
/// sample and the second of the next; the next tick repairs it.
pub(crate) struct ClockState {
    hour: AtomicU32,
    minute: AtomicU32,
    second: AtomicU32,
    dirty: AtomicBool,
    zone: RwLock<ClockZone>,
    wall_clock: Arc<dyn WallClock>,
}

impl ClockState {
    pub(crate) fn new(wall_clock: Arc<dyn WallClock>, zone: ClockZone) -> Self {
        Self {
            hour: AtomicU32::new(0),
            minute: AtomicU32::new(0),
            second: AtomicU32::new(0),
            dirty: AtomicBool::new(true),
            zone: RwLock::new(zone),
            wall_clock,
        }
    }

    /// Samples the wall clock in the active zone and stores the new angles.
    pub(crate) fn on_time_changed(&self) -> TimeSample {
        let zone = *self.zone.read();
        let sample = zone.sample(self.wall_clock.now());
        let angles = HandAngles::from_sample(sample);
        self.hour.store(angles.hour.to_bits(), Ordering::Relaxed);
        self.minute.store(angles.minute.to_bits(), Ordering::Relaxed);
        self.second.store(angles.second.to_bits(), Ordering::Relaxed);
        self.mark_dirty();
        log::trace!(
            "sampled {:02}:{:02}:{:02} ({})",
            sample.hour, sample.minute, sample.second, zone.name()
        );
        sample
    }

    /// Applies a host notification: switch zone if it names one, then resample.
    pub(crate) fn on_event(&self, event: &ClockEvent) {
        if let Some(id) = event.time_zone() {
            self.set_zone(ClockZone::from_id_or_utc(id));
        }
        self.on_time_changed();
    }

    pub(crate) fn set_zone(&self, zone: ClockZone) {
        let mut current = self.zone.write();
        if *current != zone {
            log::debug!("clock zone {} -> {}", current.name(), zone.name());
            *current = zone;
        }
    }

    pub(crate) fn zone(&self) -> ClockZone {
        *self.zone.read()
    }

    pub(crate) fn angles(&self) -> HandAngles {
        HandAngles {
            hour: f32::from_bits(self.hour.load(Ordering::Relaxed)),
            minute: f32::from_bits(self.minute.load(Ordering::Relaxed)),
            second: f32::from_bits(self.second.load(Ordering::Relaxed)),
        }
    }

    #[inline]
    pub(crate) fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    #[inline]
    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Clears the dirty flag, returning whether it was set.
    #[inline]
    pub(crate) fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::AcqRel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempo_engine::time::FixedWallClock;

    fn state_at(h: u32, m: u32, s: u32) -> ClockState {
        let clock = FixedWallClock::new(Utc.with_ymd_and_hms(2024, 1, 15, h, m, s).unwrap());
        ClockState::new(Arc::new(clock), ClockZone::from_id_or_utc("UTC"))
    }

    #[test]
    fn sampling_stores_angles_and_dirties() {
        let state = state_at(3, 0, 0);
        state.take_dirty();
        state.on_time_changed();
        assert_eq!(state.angles().hour, 0.25);
        assert!(state.take_dirty());
        assert!(!state.take_dirty());
    }

    #[test]
    fn same_instant_same_angles() {
        let state = state_at(11, 59, 59);
        state.on_time_changed();
        let a = state.angles();
        state.on_time_changed();
        assert_eq!(state.angles(), a);
    }

    #[test]
    fn zone_event_switches_zone() {
        let state = state_at(0, 0, 0);
        state.on_event(&ClockEvent::zone_changed("Asia/Tokyo"));
        assert_eq!(state.zone().name(), "Asia/Tokyo");
        assert_eq!(state.angles().hour, 0.75);
    }

    #[test]
    fn event_without_zone_keeps_zone() {
        let state = state_at(0, 0, 0);
        state.set_zone(ClockZone::from_id_or_utc("Asia/Tokyo"));
        state.on_event(&ClockEvent::TimeChanged { time_zone: None });
        assert_eq!(state.zone().name(), "Asia/Tokyo");
    }
}
