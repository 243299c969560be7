//! Coordinate and geometry types shared across the renderer and UI.
//!
//! Canonical CPU space:
//! - Logical pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! Positive rotation angles turn clockwise on screen because +Y points down.

mod rect;
mod transform;
mod vec2;

pub use rect::Rect;
pub use transform::Affine2;
pub use vec2::Vec2;
