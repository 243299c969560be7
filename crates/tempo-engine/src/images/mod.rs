//! Image decoding and storage.
//!
//! Images are decoded once into premultiplied RGBA pixmaps and referenced by
//! [`ImageId`] from draw commands. Raster formats go through the `image`
//! crate; SVG documents are parsed with `usvg` and rasterized with `resvg`.

mod store;

pub use store::{ImageId, ImageLoadError, ImageStore};
