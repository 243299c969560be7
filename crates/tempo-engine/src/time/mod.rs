//! Time subsystem.
//!
//! Provides the wall-clock and scheduling seams the clock widget depends on,
//! without coupling to a runtime:
//! - [`WallClock`]: source of "now" (system or fixed for tests)
//! - [`ClockZone`]: converts instants into local hour/minute/second
//! - [`Scheduler`]: cancellable periodic tasks (OS thread or manual)

mod manual;
mod sample;
mod scheduler;
mod wall_clock;
mod zone;

pub use manual::ManualScheduler;
pub use sample::TimeSample;
pub use scheduler::{Scheduler, Task, TaskHandle, ThreadScheduler};
pub use wall_clock::{FixedWallClock, SystemWallClock, WallClock};
pub use zone::ClockZone;
