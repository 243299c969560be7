//! Software rendering.
//!
//! The rasterizer consumes a recorded `scene::DrawList` and paints it onto a
//! CPU pixmap. Geometry is in logical pixels (top-left origin, +Y down);
//! one logical pixel maps to one target pixel unless the caller scales.

mod raster;

pub use raster::{encode_png, save_png, Rasterizer};
pub use resvg::tiny_skia::Pixmap;
