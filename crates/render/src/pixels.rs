use crate::error::RenderError;
use pictor_types::Color;
use tiny_skia::Pixmap;

/// A `width × height` image in straight (non-premultiplied) RGBA8, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, RenderError> {
        let expected = Self::byte_len(width, height);
        if data.len() != expected {
            return Err(RenderError::InvalidBuffer(format!(
                "{}x{} needs {} bytes, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        Ok(Self { width, height, data })
    }

    /// Converts a premultiplied pixmap into straight alpha.
    pub fn from_pixmap(pixmap: &Pixmap) -> Self {
        let mut data = Vec::with_capacity(pixmap.data().len());
        for pixel in pixmap.pixels() {
            let c = pixel.demultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        Self {
            width: pixmap.width(),
            height: pixmap.height(),
            data,
        }
    }

    /// Number of bytes an RGBA8 buffer of this size occupies.
    pub fn byte_len(width: u32, height: u32) -> usize {
        width as usize * height as usize * 4
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }

    pub fn has_transparency(&self) -> bool {
        self.data.chunks_exact(4).any(|p| p[3] != 255)
    }

    /// Composites every pixel over an opaque `background`, returning RGB8.
    pub fn flatten_rgb(&self, background: Color) -> Vec<u8> {
        let bg = [background.r, background.g, background.b];
        let mut out = Vec::with_capacity(self.width as usize * self.height as usize * 3);
        for p in self.data.chunks_exact(4) {
            let a = p[3] as u32;
            for c in 0..3 {
                let v = (p[c] as u32 * a + bg[c] as u32 * (255 - a) + 127) / 255;
                out.push(v as u8);
            }
        }
        out
    }

    pub fn to_rgba_image(&self) -> Result<image::RgbaImage, RenderError> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| RenderError::InvalidBuffer("pixel data does not match its size".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_length() {
        assert!(PixelBuffer::new(2, 2, vec![0; 15]).is_err());
        assert_eq!(PixelBuffer::new(2, 2, vec![0; 16]).unwrap().data().len(), 16);
    }

    #[test]
    fn demultiplies_pixmap() {
        let mut pixmap = Pixmap::new(1, 1).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(200, 100, 0, 128));
        let buffer = PixelBuffer::from_pixmap(&pixmap);
        let [r, g, b, a] = buffer.pixel(0, 0).unwrap();
        assert_eq!(a, 128);
        assert!(r.abs_diff(200) <= 2 && g.abs_diff(100) <= 2 && b == 0);
        assert_eq!(buffer.pixel(1, 0), None);
    }

    #[test]
    fn flattens_onto_background() {
        let buffer = PixelBuffer::new(2, 1, vec![0, 0, 0, 0, 10, 20, 30, 255]).unwrap();
        assert!(buffer.has_transparency());
        assert_eq!(buffer.flatten_rgb(Color::WHITE), vec![255, 255, 255, 10, 20, 30]);
    }
}
