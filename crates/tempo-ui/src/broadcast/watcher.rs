use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use crossbeam_channel::{RecvTimeoutError, Sender};
use tempo_engine::time::{ClockZone, WallClock};

use super::hub::ClockEventHub;
use crate::event::ClockEvent;

/// Polling configuration for [`SystemClockWatcher`].
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// How often the wall clock is read.
    pub poll_interval: Duration,
    /// Minimum disagreement between wall and monotonic elapsed time that
    /// counts as the clock being set.
    pub jump_threshold: Duration,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
            jump_threshold: Duration::from_secs(2),
        }
    }
}

impl WatcherConfig {
    pub fn poll_interval(mut self, v: Duration) -> Self { self.poll_interval = v; self }
    pub fn jump_threshold(mut self, v: Duration) -> Self { self.jump_threshold = v; self }
}

/// Derives clock notifications from the host's clocks.
///
/// A background thread polls the wall clock and broadcasts on its hub:
/// - `TimeTick` when the local minute changes
/// - `TimeChanged` when wall time moves differently from monotonic time
/// - `TimezoneChanged` when the local UTC offset changes
///
/// The thread stops on [`shutdown`](Self::shutdown) or drop.
pub struct SystemClockWatcher {
    hub: Arc<ClockEventHub>,
    stop: Option<Sender<()>>,
    join: Option<JoinHandle<()>>,
}

impl SystemClockWatcher {
    /// Starts watching `wall_clock` in the host's local zone.
    pub fn spawn(config: WatcherConfig, wall_clock: Arc<dyn WallClock>) -> std::io::Result<Self> {
        let hub = Arc::new(ClockEventHub::new());
        let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(1);
        let poll = config.poll_interval.max(Duration::from_millis(10));
        let thread_hub = hub.clone();

        let join = thread::Builder::new()
            .name("tempo-clock-watcher".to_string())
            .spawn(move || {
                let mut detector = ChangeDetector::new(config.jump_threshold);
                loop {
                    let wall = wall_clock.now();
                    let offset = ClockZone::Local.utc_offset_seconds(wall);
                    for event in detector.observe(wall, Instant::now(), offset) {
                        thread_hub.broadcast(&event);
                    }
                    match stop_rx.recv_timeout(poll) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })?;

        log::debug!("clock watcher started ({poll:?} poll)");
        Ok(Self { hub, stop: Some(stop_tx), join: Some(join) })
    }

    /// The hub events are broadcast on. Hand it to hosts as their event source.
    pub fn hub(&self) -> Arc<ClockEventHub> {
        self.hub.clone()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.join.is_some()
    }

    /// Stops the polling thread and waits for it. Idempotent.
    pub fn shutdown(&mut self) {
        drop(self.stop.take());
        if let Some(join) = self.join.take() {
            if join.join().is_err() {
                log::error!("clock watcher thread panicked");
            } else {
                log::debug!("clock watcher stopped");
            }
        }
    }
}

impl Drop for SystemClockWatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// ── change detection ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct Observation {
    wall: DateTime<Utc>,
    mono: Instant,
    offset: i32,
    local_minute: i64,
}

/// Turns successive clock readings into notifications.
#[derive(Debug)]
pub(crate) struct ChangeDetector {
    threshold: Duration,
    last: Option<Observation>,
}

impl ChangeDetector {
    pub(crate) fn new(threshold: Duration) -> Self {
        Self { threshold, last: None }
    }

    /// Records one reading and returns the events it implies.
    ///
    /// The first reading only establishes a baseline. A clock jump suppresses
    /// the minute tick for the same reading, since listeners resample anyway.
    pub(crate) fn observe(&mut self, wall: DateTime<Utc>, mono: Instant, offset: i32) -> Vec<ClockEvent> {
        let local_minute = (wall.timestamp() + i64::from(offset)).div_euclid(60);
        let now = Observation { wall, mono, offset, local_minute };
        let Some(prev) = self.last.replace(now) else {
            return Vec::new();
        };

        let mut events = Vec::new();

        if prev.offset != now.offset {
            log::debug!("local UTC offset changed {}s -> {}s", prev.offset, now.offset);
            events.push(ClockEvent::TimezoneChanged { time_zone: None });
        }

        let mono_ms = now.mono.saturating_duration_since(prev.mono).as_millis() as i64;
        let wall_ms = (now.wall - prev.wall).num_milliseconds();
        let skew_ms = (wall_ms - mono_ms).unsigned_abs();
        if skew_ms > self.threshold.as_millis() as u64 {
            log::debug!("wall clock jumped by {}ms", wall_ms - mono_ms);
            events.push(ClockEvent::TimeChanged { time_zone: None });
        } else if now.local_minute != prev.local_minute {
            events.push(ClockEvent::TimeTick);
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};
    use tempo_engine::time::FixedWallClock;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 30).unwrap()
    }

    // ── ChangeDetector ────────────────────────────────────────────────────

    #[test]
    fn first_reading_is_silent() {
        let mut d = ChangeDetector::new(Duration::from_secs(2));
        assert!(d.observe(t0(), Instant::now(), 0).is_empty());
    }

    #[test]
    fn steady_time_within_minute_is_silent() {
        let mut d = ChangeDetector::new(Duration::from_secs(2));
        let mono = Instant::now();
        d.observe(t0(), mono, 0);
        let events = d.observe(t0() + TimeDelta::seconds(1), mono + Duration::from_secs(1), 0);
        assert!(events.is_empty());
    }

    #[test]
    fn minute_rollover_ticks() {
        let mut d = ChangeDetector::new(Duration::from_secs(2));
        let mono = Instant::now();
        d.observe(t0(), mono, 0);
        let events = d.observe(t0() + TimeDelta::seconds(30), mono + Duration::from_secs(30), 0);
        assert_eq!(events, vec![ClockEvent::TimeTick]);
    }

    #[test]
    fn wall_jump_reports_time_changed_without_tick() {
        let mut d = ChangeDetector::new(Duration::from_secs(2));
        let mono = Instant::now();
        d.observe(t0(), mono, 0);
        let events = d.observe(t0() + TimeDelta::hours(1), mono + Duration::from_secs(1), 0);
        assert_eq!(events, vec![ClockEvent::TimeChanged { time_zone: None }]);
    }

    #[test]
    fn backwards_jump_is_detected() {
        let mut d = ChangeDetector::new(Duration::from_secs(2));
        let mono = Instant::now();
        d.observe(t0(), mono, 0);
        let events = d.observe(t0() - TimeDelta::seconds(10), mono + Duration::from_secs(1), 0);
        assert_eq!(events, vec![ClockEvent::TimeChanged { time_zone: None }]);
    }

    #[test]
    fn offset_change_reports_zone_change() {
        let mut d = ChangeDetector::new(Duration::from_secs(2));
        let mono = Instant::now();
        d.observe(t0(), mono, 0);
        let events = d.observe(t0() + TimeDelta::seconds(1), mono + Duration::from_secs(1), 3600);
        // The local minute moved by an hour too, so a tick follows.
        assert_eq!(
            events,
            vec![ClockEvent::TimezoneChanged { time_zone: None }, ClockEvent::TimeTick]
        );
    }

    // ── SystemClockWatcher ────────────────────────────────────────────────

    #[test]
    fn watcher_shuts_down_cleanly() {
        let clock = Arc::new(FixedWallClock::new(t0()));
        let mut watcher = SystemClockWatcher::spawn(
            WatcherConfig::default().poll_interval(Duration::from_millis(10)),
            clock,
        )
        .unwrap();
        assert!(watcher.is_running());
        watcher.shutdown();
        assert!(!watcher.is_running());
        watcher.shutdown();
    }

    #[test]
    fn watcher_broadcasts_jumps() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use crate::broadcast::ClockEventSource;

        let clock = Arc::new(FixedWallClock::new(t0()));
        let watcher = SystemClockWatcher::spawn(
            WatcherConfig::default().poll_interval(Duration::from_millis(10)),
            clock.clone(),
        )
        .unwrap();

        let changed = Arc::new(AtomicUsize::new(0));
        let c = changed.clone();
        watcher.hub().start_listening(Arc::new(move |e: &ClockEvent| {
            if matches!(e, ClockEvent::TimeChanged { .. }) {
                c.fetch_add(1, Ordering::SeqCst);
            }
        }));

        // Let the baseline reading happen, then set the clock far ahead.
        thread::sleep(Duration::from_millis(50));
        clock.advance(TimeDelta::hours(3));

        let deadline = Instant::now() + Duration::from_secs(5);
        while changed.load(Ordering::SeqCst) == 0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }
        assert!(changed.load(Ordering::SeqCst) >= 1);
    }
}
