use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TrySendError};
use tempo_engine::time::Scheduler;

use crate::broadcast::ClockEventSource;

// ── Invalidate ────────────────────────────────────────────────────────────

/// Redraw request handle.
///
/// Widgets call [`invalidate`](Invalidate::invalidate) from any thread; the
/// host decides when to actually repaint.
pub trait Invalidate: Send + Sync {
    fn invalidate(&self);
}

// ── RedrawSignal ──────────────────────────────────────────────────────────

/// Coalescing redraw request the host thread can block on.
///
/// Any number of invalidations between two waits collapse into one wake.
#[derive(Debug, Clone)]
pub struct RedrawSignal {
    tx: Sender<()>,
    rx: Receiver<()>,
}

impl RedrawSignal {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::bounded(1);
        Self { tx, rx }
    }

    /// Blocks until a redraw is requested or `timeout` passes.
    ///
    /// Returns `true` if a request was consumed.
    pub fn wait(&self, timeout: Duration) -> bool {
        self.rx.recv_timeout(timeout).is_ok()
    }

    /// Consumes a pending request without blocking.
    pub fn try_take(&self) -> bool {
        self.rx.try_recv().is_ok()
    }
}

impl Default for RedrawSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl Invalidate for RedrawSignal {
    fn invalidate(&self) {
        // Full means a redraw is already pending.
        if let Err(TrySendError::Disconnected(())) = self.tx.try_send(()) {
            log::debug!("redraw requested after host went away");
        }
    }
}

// ── RedrawCounter ─────────────────────────────────────────────────────────

/// Counts redraw requests. Handy for hosts that poll, and for tests.
#[derive(Debug, Default)]
pub struct RedrawCounter {
    count: AtomicUsize,
}

impl RedrawCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }
}

impl Invalidate for RedrawCounter {
    fn invalidate(&self) {
        self.count.fetch_add(1, Ordering::AcqRel);
    }
}

// ── HostCtx ───────────────────────────────────────────────────────────────

/// Services a host lends to widgets on attach.
#[derive(Clone)]
pub struct HostCtx {
    pub scheduler: Arc<dyn Scheduler>,
    pub events: Arc<dyn ClockEventSource>,
    pub redraw: Arc<dyn Invalidate>,
}

impl HostCtx {
    pub fn new(
        scheduler: Arc<dyn Scheduler>,
        events: Arc<dyn ClockEventSource>,
        redraw: Arc<dyn Invalidate>,
    ) -> Self {
        Self { scheduler, events, redraw }
    }
}

impl std::fmt::Debug for HostCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostCtx").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_coalesces_requests() {
        let signal = RedrawSignal::new();
        signal.invalidate();
        signal.invalidate();
        signal.invalidate();
        assert!(signal.try_take());
        assert!(!signal.try_take());
    }

    #[test]
    fn signal_wakes_waiter_from_other_thread() {
        let signal = RedrawSignal::new();
        let remote = signal.clone();
        let t = std::thread::spawn(move || remote.invalidate());
        assert!(signal.wait(Duration::from_secs(5)));
        t.join().unwrap();
    }

    #[test]
    fn wait_times_out_without_request() {
        let signal = RedrawSignal::new();
        assert!(!signal.wait(Duration::from_millis(10)));
    }

    #[test]
    fn counter_counts() {
        let counter = RedrawCounter::new();
        counter.invalidate();
        counter.invalidate();
        assert_eq!(counter.count(), 2);
    }
}
