//! Paint types.
//!
//! Only solid colors exist: the clock is drawn from images, and a color is
//! needed for the background the rasterizer clears to.

mod color;

pub use color::Color;
