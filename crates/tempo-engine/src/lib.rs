//! Tempo engine crate.
//!
//! This crate owns the host-side pieces the clock widget runs on: geometry,
//! the recorded draw stream, image decoding, software rasterization, wall
//! clocks and time zones, and the schedulers that drive periodic work.

pub mod coords;
pub mod images;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod time;
