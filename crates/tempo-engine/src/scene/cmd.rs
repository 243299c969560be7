use crate::coords::Rect;
use crate::images::ImageId;
use crate::scene::DrawList;

/// Renderer-agnostic draw command stream.
///
/// Extending the scene:
/// - add a payload struct here
/// - add a new variant
/// - add a push helper on `DrawList`
/// - teach `render::Rasterizer` to draw it
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Image(ImageCmd),
}

/// Image draw payload: `image` stretched into `bounds` (pre-transform space).
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCmd {
    pub image: ImageId,
    pub bounds: Rect,
}

impl ImageCmd {
    #[inline]
    pub fn new(image: ImageId, bounds: Rect) -> Self {
        Self { image, bounds }
    }
}

impl DrawList {
    /// Records an image draw command under the current transform.
    #[inline]
    pub fn push_image(&mut self, image: ImageId, bounds: Rect) {
        self.push(DrawCmd::Image(ImageCmd::new(image, bounds)));
    }
}
