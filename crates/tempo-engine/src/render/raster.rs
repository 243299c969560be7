use std::path::Path;

use anyhow::{Context, Result};
use resvg::tiny_skia::{self, FilterQuality, Pixmap, PixmapPaint, Transform};

use crate::coords::{Affine2, Vec2};
use crate::images::ImageStore;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// Paints draw lists onto CPU pixmaps.
///
/// Supported:
/// - `DrawCmd::Image`, stretched into its bounds and mapped through the
///   item transform with bicubic filtering
///
/// Commands referencing unknown images are skipped (one-time warning).
pub struct Rasterizer {
    quality: FilterQuality,
    warned_missing: bool,
}

impl Rasterizer {
    pub fn new() -> Self {
        Self { quality: FilterQuality::Bicubic, warned_missing: false }
    }

    /// Nearest-neighbour sampling; mostly useful for pixel-exact tests.
    pub fn nearest(mut self) -> Self {
        self.quality = FilterQuality::Nearest;
        self
    }

    /// Allocates a `width`×`height` pixmap and renders into it.
    pub fn render_new(
        &mut self,
        width: u32,
        height: u32,
        draw_list: &DrawList,
        images: &ImageStore,
        clear: Color,
    ) -> Result<Pixmap> {
        let mut target = Pixmap::new(width, height)
            .with_context(|| format!("cannot allocate {width}x{height} render target"))?;
        self.render(&mut target, draw_list, images, clear);
        Ok(target)
    }

    /// Clears `target` to `clear` and paints every item of `draw_list`.
    pub fn render(
        &mut self,
        target: &mut Pixmap,
        draw_list: &DrawList,
        images: &ImageStore,
        clear: Color,
    ) {
        let [r, g, b, a] = clear.to_straight_u8();
        target.fill(tiny_skia::Color::from_rgba8(r, g, b, a));

        let paint = PixmapPaint { quality: self.quality, ..PixmapPaint::default() };

        for item in draw_list.items() {
            let DrawCmd::Image(cmd) = &item.cmd;
            if cmd.bounds.is_empty() || !cmd.bounds.is_finite() {
                continue;
            }
            let Some(src) = images.pixmap(cmd.image) else {
                if !self.warned_missing {
                    log::warn!("Rasterizer: draw command references unknown {:?}; skipped", cmd.image);
                    self.warned_missing = true;
                }
                continue;
            };

            let src_size = Vec2::new(src.width() as f32, src.height() as f32);
            let m = item.transform * Affine2::fit(src_size, cmd.bounds);
            target.draw_pixmap(0, 0, src.as_ref(), &paint, to_skia(m), None);
        }
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn to_skia(m: Affine2) -> Transform {
    Transform::from_row(m.a, m.b, m.c, m.d, m.tx, m.ty)
}

/// Encodes `pixmap` as PNG (straight alpha).
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>> {
    let mut rgba = image::RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in rgba.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }

    let mut out = std::io::Cursor::new(Vec::new());
    rgba.write_to(&mut out, image::ImageFormat::Png)
        .context("png encoding failed")?;
    Ok(out.into_inner())
}

/// Encodes `pixmap` as PNG and writes it to `path`.
pub fn save_png(pixmap: &Pixmap, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode_png(pixmap)?;
    std::fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::images::ImageId;

    const RED_SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20">
        <rect width="20" height="20" fill="#ff0000"/>
    </svg>"##;

    fn store_with_red() -> (ImageStore, ImageId) {
        let mut store = ImageStore::new().with_svg_raster_scale(1.0);
        let id = store.load(RED_SQUARE.as_bytes()).unwrap();
        (store, id)
    }

    fn is_red(p: &Pixmap, x: u32, y: u32) -> bool {
        let px = p.pixel(x, y).unwrap();
        px.red() > 200 && px.green() < 50 && px.alpha() > 200
    }

    fn is_clear(p: &Pixmap, x: u32, y: u32) -> bool {
        p.pixel(x, y).unwrap().alpha() == 0
    }

    #[test]
    fn image_is_stretched_into_bounds() {
        let (store, id) = store_with_red();
        let mut list = DrawList::new();
        list.push_image(id, Rect::new(0.0, 0.0, 10.0, 10.0));

        let out = Rasterizer::new().nearest()
            .render_new(20, 20, &list, &store, Color::transparent())
            .unwrap();

        assert!(is_red(&out, 5, 5));
        assert!(is_clear(&out, 15, 15));
    }

    #[test]
    fn item_transform_moves_image() {
        let (store, id) = store_with_red();
        let mut list = DrawList::new();
        list.set_transform(Affine2::translation(10.0, 10.0));
        list.push_image(id, Rect::new(0.0, 0.0, 10.0, 10.0));

        let out = Rasterizer::new().nearest()
            .render_new(20, 20, &list, &store, Color::transparent())
            .unwrap();

        assert!(is_clear(&out, 5, 5));
        assert!(is_red(&out, 15, 15));
    }

    #[test]
    fn clear_color_fills_background() {
        let (store, _) = store_with_red();
        let out = Rasterizer::new()
            .render_new(4, 4, &DrawList::new(), &store, Color::from_srgb_u8(0, 255, 0, 255))
            .unwrap();
        let px = out.pixel(2, 2).unwrap();
        assert_eq!((px.red(), px.green(), px.blue(), px.alpha()), (0, 255, 0, 255));
    }

    #[test]
    fn unknown_image_is_skipped() {
        let (store, _) = store_with_red();
        let mut list = DrawList::new();
        list.push_image(ImageId::from_raw(99), Rect::new(0.0, 0.0, 4.0, 4.0));
        let out = Rasterizer::new()
            .render_new(4, 4, &list, &store, Color::transparent())
            .unwrap();
        assert!(is_clear(&out, 1, 1));
    }

    #[test]
    fn png_encoding_has_signature() {
        let pixmap = Pixmap::new(2, 2).unwrap();
        let bytes = encode_png(&pixmap).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
