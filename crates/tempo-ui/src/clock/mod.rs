//! Clock face building blocks.
//!
//! - [`HandAngles`]: hand positions derived from a time sample
//! - [`ClockConfig`]: refresh cadence and default zone
//! - [`ClockAssets`]: the dial and hand images
//!
//! The shared state the ticker thread writes into is crate-private; the
//! widget itself lives in [`crate::widgets::analog_clock`].

mod angles;
mod assets;
mod config;
pub(crate) mod state;

pub use angles::HandAngles;
pub use assets::ClockAssets;
pub use config::ClockConfig;
