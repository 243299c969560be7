//! Publish/subscribe of system time notifications.
//!
//! Widgets depend on the [`ClockEventSource`] trait only. Hosts provide
//! either a [`ClockEventHub`] they feed themselves, or a
//! [`SystemClockWatcher`] that derives events from the OS clock.

mod hub;
mod watcher;

pub use hub::{ClockEventHub, ClockEventSource, ClockListener, ListenerId};
pub use watcher::{SystemClockWatcher, WatcherConfig};
