use std::sync::Arc;

use parking_lot::Mutex;

use crate::event::ClockEvent;

/// Callback invoked for every delivered event.
///
/// May run on any thread; keep it short.
pub type ClockListener = Arc<dyn Fn(&ClockEvent) + Send + Sync>;

/// Registration token returned by [`ClockEventSource::start_listening`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A source of system time notifications.
pub trait ClockEventSource: Send + Sync {
    /// Registers `listener` for time-changed, timezone-changed and tick events.
    fn start_listening(&self, listener: ClockListener) -> ListenerId;

    /// Removes a listener. Unknown ids are ignored.
    fn stop_listening(&self, id: ListenerId);
}

#[derive(Default)]
struct HubInner {
    next_id: u64,
    listeners: Vec<(ListenerId, ClockListener)>,
}

/// In-process broadcaster.
///
/// Delivery happens on the caller of [`broadcast`](Self::broadcast), outside
/// the hub's lock, so listeners may register or unregister while handling an
/// event. Such changes take effect from the next broadcast.
#[derive(Default)]
pub struct ClockEventHub {
    inner: Mutex<HubInner>,
}

impl ClockEventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers `event` to every registered listener. Returns how many ran.
    pub fn broadcast(&self, event: &ClockEvent) -> usize {
        let listeners: Vec<ClockListener> = {
            let inner = self.inner.lock();
            inner.listeners.iter().map(|(_, l)| l.clone()).collect()
        };

        log::trace!("broadcasting {:?} to {} listener(s)", event.kind(), listeners.len());
        for listener in &listeners {
            listener(event);
        }
        listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }
}

impl ClockEventSource for ClockEventHub {
    fn start_listening(&self, listener: ClockListener) -> ListenerId {
        let mut inner = self.inner.lock();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        inner.listeners.push((id, listener));
        id
    }

    fn stop_listening(&self, id: ListenerId) {
        let mut inner = self.inner.lock();
        let before = inner.listeners.len();
        inner.listeners.retain(|(lid, _)| *lid != id);
        if inner.listeners.len() == before {
            log::debug!("stop_listening: {id:?} was not registered");
        }
    }
}

impl std::fmt::Debug for ClockEventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClockEventHub").field("listeners", &self.listener_count()).finish()
    }
}
