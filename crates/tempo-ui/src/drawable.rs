use std::cell::Cell;

use tempo_engine::coords::{Rect, Vec2};
use tempo_engine::images::{ImageId, ImageLoadError, ImageStore};

use crate::painter::Painter;

/// An image plus the bounds it is drawn into.
///
/// Bounds live in a `Cell` so they can be refreshed during `paint`, which
/// only has `&self`.
#[derive(Debug, Clone)]
pub struct Drawable {
    image: ImageId,
    intrinsic: Vec2,
    bounds: Cell<Rect>,
}

impl Drawable {
    /// Wraps `image` whose natural size is `intrinsic`. Bounds start at the
    /// origin with the intrinsic size.
    pub fn new(image: ImageId, intrinsic: Vec2) -> Self {
        Self {
            image,
            intrinsic,
            bounds: Cell::new(Rect::from_origin_size(Vec2::zero(), intrinsic)),
        }
    }

    /// Looks up the intrinsic size of `image` in `store`.
    pub fn from_store(store: &ImageStore, image: ImageId) -> Result<Self, ImageLoadError> {
        let intrinsic = store
            .intrinsic_size(image)
            .ok_or_else(|| ImageLoadError(format!("{image:?} is not in the image store")))?;
        Ok(Self::new(image, intrinsic))
    }

    #[inline]
    pub fn image(&self) -> ImageId {
        self.image
    }

    #[inline]
    pub fn intrinsic_size(&self) -> Vec2 {
        self.intrinsic
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds.get()
    }

    #[inline]
    pub fn set_bounds(&self, bounds: Rect) {
        self.bounds.set(bounds);
    }

    /// Places the drawable at its intrinsic size, centered on `center`.
    pub fn center_on(&self, center: Vec2) {
        self.set_bounds(Rect::centered_at(center, self.intrinsic));
    }

    /// Records the image into its current bounds.
    pub fn draw(&self, painter: &mut Painter) {
        painter.draw_image(self.image, self.bounds.get());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempo_engine::scene::DrawList;

    #[test]
    fn center_on_uses_intrinsic_size() {
        let d = Drawable::new(ImageId::from_raw(0), Vec2::new(10.0, 40.0));
        d.center_on(Vec2::new(50.0, 50.0));
        assert_eq!(d.bounds(), Rect::new(45.0, 30.0, 10.0, 40.0));
    }

    #[test]
    fn draw_records_current_bounds() {
        let d = Drawable::new(ImageId::from_raw(3), Vec2::new(8.0, 8.0));
        d.set_bounds(Rect::new(1.0, 2.0, 8.0, 8.0));
        let mut list = DrawList::new();
        d.draw(&mut Painter::new(&mut list));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn from_store_rejects_unknown_image() {
        let store = ImageStore::new();
        assert!(Drawable::from_store(&store, ImageId::from_raw(0)).is_err());
    }
}
