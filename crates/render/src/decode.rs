//! Image source decoding.

use crate::error::RenderError;
use pictor_types::Size;
use std::collections::HashMap;
use std::sync::Arc;
use tiny_skia::{ColorU8, IntSize, Pixmap};

/// A decoded image, premultiplied for painting.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub pixmap: Pixmap,
}

impl DecodedImage {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Intrinsic size in CSS pixels.
    pub fn size(&self) -> Size {
        Size::new(self.width() as f32, self.height() as f32)
    }
}

/// Decoded images of one render, keyed by `src`.
pub type DecodedImages = HashMap<String, Arc<DecodedImage>>;

/// Decodes any format the `image` crate recognises by its magic bytes.
pub fn decode_image(src: &str, bytes: &[u8]) -> Result<DecodedImage, RenderError> {
    let decode_error = |message: String| RenderError::Decode {
        src: src.to_string(),
        message,
    };

    let rgba = image::load_from_memory(bytes)
        .map_err(|e| decode_error(e.to_string()))?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    let size = IntSize::from_wh(width, height)
        .ok_or_else(|| decode_error(format!("empty image {}x{}", width, height)))?;

    let mut data = rgba.into_raw();
    for px in data.chunks_exact_mut(4) {
        let c = ColorU8::from_rgba(px[0], px[1], px[2], px[3]).premultiply();
        px.copy_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    let pixmap = Pixmap::from_vec(data, size)
        .ok_or_else(|| decode_error("pixel data does not match its size".into()))?;

    log::trace!("Decoded '{}' at {}x{}", src, width, height);
    Ok(DecodedImage { pixmap })
}
