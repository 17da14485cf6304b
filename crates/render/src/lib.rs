//! Painting and encoding for laid-out box trees.
//!
//! - [`decode`]: source bytes to premultiplied pixmaps
//! - [`raster`]: [`Rasterizer`] paints a `LayoutTree` with `tiny-skia`
//! - [`pixels`]: the straight-alpha [`PixelBuffer`] handed to encoders
//! - [`encode`]: [`PixelBuffer`] to bytes in one of the [`ImageFormat`]s

pub mod decode;
pub mod encode;
mod error;
pub mod pixels;
pub mod raster;

pub use decode::{DecodedImage, DecodedImages, decode_image};
pub use encode::{EncodeOptions, ImageFormat, encode};
pub use error::RenderError;
pub use pixels::PixelBuffer;
pub use raster::Rasterizer;
