use std::fmt;
use std::path::Path;

use resvg::tiny_skia::{ColorU8, Pixmap, Transform};
use resvg::usvg;

use crate::coords::Vec2;

/// Error returned by the [`ImageStore`] loaders.
#[derive(Debug, Clone)]
pub struct ImageLoadError(pub String);

impl fmt::Display for ImageLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "image load error: {}", self.0)
    }
}

impl std::error::Error for ImageLoadError {}

/// Opaque handle to an image loaded into an [`ImageStore`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ImageId(u32);

impl ImageId {
    /// Builds a handle from a raw index.
    ///
    /// Only meaningful for the store that produced the index; mostly useful
    /// for draw-list fixtures that never reach a renderer.
    #[inline]
    pub const fn from_raw(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

struct StoredImage {
    pixmap: Pixmap,
    /// Natural size in logical pixels. Differs from the pixmap size for
    /// vector images rasterized above 1x.
    intrinsic: Vec2,
}

/// Owns decoded images.
///
/// Images are immutable after loading and live as long as the store. The
/// store is owned by the host and lent to the rasterizer each frame.
pub struct ImageStore {
    images: Vec<StoredImage>,
    svg_raster_scale: f32,
}

impl ImageStore {
    pub fn new() -> Self {
        Self { images: Vec::new(), svg_raster_scale: 2.0 }
    }

    /// Sets the oversampling factor used when rasterizing SVG documents.
    ///
    /// Higher values keep vector art sharp when drawn above its natural size.
    pub fn with_svg_raster_scale(mut self, scale: f32) -> Self {
        self.svg_raster_scale = scale.clamp(0.25, 16.0);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Decodes `bytes`, sniffing SVG documents from their leading markup.
    pub fn load(&mut self, bytes: &[u8]) -> Result<ImageId, ImageLoadError> {
        if looks_like_svg(bytes) {
            self.load_svg(bytes)
        } else {
            self.load_raster(bytes)
        }
    }

    /// Reads and decodes an image file.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<ImageId, ImageLoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| ImageLoadError(format!("{}: {e}", path.display())))?;
        let id = self.load(&bytes)?;
        log::debug!("loaded image {} as {id:?}", path.display());
        Ok(id)
    }

    /// Decodes a raster image (PNG, JPEG, BMP, ...).
    pub fn load_raster(&mut self, bytes: &[u8]) -> Result<ImageId, ImageLoadError> {
        let rgba = image::load_from_memory(bytes)
            .map_err(|e| ImageLoadError(e.to_string()))?
            .to_rgba8();
        let (w, h) = rgba.dimensions();
        let mut pixmap = Pixmap::new(w, h)
            .ok_or_else(|| ImageLoadError(format!("unsupported image size {w}x{h}")))?;

        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(rgba.pixels()) {
            let [r, g, b, a] = src.0;
            *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
        }

        Ok(self.insert(pixmap, Vec2::new(w as f32, h as f32)))
    }

    /// Parses and rasterizes an SVG document.
    ///
    /// The intrinsic size is the document's `width`/`height`; the stored
    /// pixmap is oversampled by the store's SVG raster scale.
    pub fn load_svg(&mut self, bytes: &[u8]) -> Result<ImageId, ImageLoadError> {
        let tree = usvg::Tree::from_data(bytes, &usvg::Options::default())
            .map_err(|e| ImageLoadError(e.to_string()))?;

        let size = tree.size();
        let intrinsic = Vec2::new(size.width(), size.height());
        let scale = self.svg_raster_scale;
        let w = (intrinsic.x * scale).ceil() as u32;
        let h = (intrinsic.y * scale).ceil() as u32;

        let mut pixmap = Pixmap::new(w, h)
            .ok_or_else(|| ImageLoadError(format!("unsupported svg size {w}x{h}")))?;
        resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

        Ok(self.insert(pixmap, intrinsic))
    }

    /// Natural size of `id` in logical pixels.
    pub fn intrinsic_size(&self, id: ImageId) -> Option<Vec2> {
        self.images.get(id.index()).map(|img| img.intrinsic)
    }

    /// Decoded pixels of `id`.
    pub(crate) fn pixmap(&self, id: ImageId) -> Option<&Pixmap> {
        self.images.get(id.index()).map(|img| &img.pixmap)
    }

    fn insert(&mut self, pixmap: Pixmap, intrinsic: Vec2) -> ImageId {
        let id = ImageId(self.images.len() as u32);
        self.images.push(StoredImage { pixmap, intrinsic });
        id
    }
}

impl Default for ImageStore {
    fn default() -> Self {
        Self::new()
    }
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(512)]);
    let text = head.trim_start_matches('\u{feff}').trim_start();
    text.starts_with("<svg") || text.starts_with("<?xml") || text.starts_with("<!--")
}
