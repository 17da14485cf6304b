//! Encoding pixel buffers into image file formats.

use crate::error::RenderError;
use crate::pixels::PixelBuffer;
use image::codecs::avif::AvifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, RgbImage};
use pictor_types::Color;
use std::fmt;
use std::io::Cursor;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
    Gif,
    WebP,
    Pnm,
    Tiff,
    Tga,
    Dds,
    Bmp,
    Ico,
    Hdr,
    OpenExr,
    Farbfeld,
    Avif,
    Qoi,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 15] = [
        ImageFormat::Png,
        ImageFormat::Jpeg,
        ImageFormat::Gif,
        ImageFormat::WebP,
        ImageFormat::Pnm,
        ImageFormat::Tiff,
        ImageFormat::Tga,
        ImageFormat::Dds,
        ImageFormat::Bmp,
        ImageFormat::Ico,
        ImageFormat::Hdr,
        ImageFormat::OpenExr,
        ImageFormat::Farbfeld,
        ImageFormat::Avif,
        ImageFormat::Qoi,
    ];

    /// Case-insensitive lookup by file extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let format = match ext.to_ascii_lowercase().as_str() {
            "png" => ImageFormat::Png,
            "jpg" | "jpeg" => ImageFormat::Jpeg,
            "gif" => ImageFormat::Gif,
            "webp" => ImageFormat::WebP,
            "pnm" | "ppm" | "pgm" | "pbm" | "pam" => ImageFormat::Pnm,
            "tif" | "tiff" => ImageFormat::Tiff,
            "tga" => ImageFormat::Tga,
            "dds" => ImageFormat::Dds,
            "bmp" => ImageFormat::Bmp,
            "ico" => ImageFormat::Ico,
            "hdr" => ImageFormat::Hdr,
            "exr" => ImageFormat::OpenExr,
            "ff" | "farbfeld" => ImageFormat::Farbfeld,
            "avif" => ImageFormat::Avif,
            "qoi" => ImageFormat::Qoi,
            _ => return None,
        };
        Some(format)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Canonical file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Gif => "gif",
            ImageFormat::WebP => "webp",
            ImageFormat::Pnm => "ppm",
            ImageFormat::Tiff => "tiff",
            ImageFormat::Tga => "tga",
            ImageFormat::Dds => "dds",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Ico => "ico",
            ImageFormat::Hdr => "hdr",
            ImageFormat::OpenExr => "exr",
            ImageFormat::Farbfeld => "ff",
            ImageFormat::Avif => "avif",
            ImageFormat::Qoi => "qoi",
        }
    }

    /// Whether the encoded file keeps an alpha channel.
    pub fn supports_alpha(&self) -> bool {
        !matches!(self, ImageFormat::Jpeg | ImageFormat::Pnm | ImageFormat::Hdr)
    }

    fn codec(&self) -> image::ImageFormat {
        match self {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Gif => image::ImageFormat::Gif,
            ImageFormat::WebP => image::ImageFormat::WebP,
            ImageFormat::Pnm => image::ImageFormat::Pnm,
            ImageFormat::Tiff => image::ImageFormat::Tiff,
            ImageFormat::Tga => image::ImageFormat::Tga,
            ImageFormat::Dds => image::ImageFormat::Dds,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
            ImageFormat::Ico => image::ImageFormat::Ico,
            ImageFormat::Hdr => image::ImageFormat::Hdr,
            ImageFormat::OpenExr => image::ImageFormat::OpenExr,
            ImageFormat::Farbfeld => image::ImageFormat::Farbfeld,
            ImageFormat::Avif => image::ImageFormat::Avif,
            ImageFormat::Qoi => image::ImageFormat::Qoi,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Parameters for lossy and alpha-less formats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodeOptions {
    /// JPEG quality, 1-100. Default 90.
    pub jpeg_quality: u8,
    /// AVIF quality, 1-100. Default 80.
    pub avif_quality: u8,
    /// AVIF encoder speed, 1 (slowest) to 10. Default 8.
    pub avif_speed: u8,
    /// Color that transparent pixels are composited over for formats without
    /// alpha. Default white.
    pub flatten_background: Color,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: 90,
            avif_quality: 80,
            avif_speed: 8,
            flatten_background: Color::WHITE,
        }
    }
}

/// Encodes `pixels` as `format`. Errors leave nothing behind: the bytes are
/// only returned once the codec has finished.
pub fn encode(
    pixels: &PixelBuffer,
    format: ImageFormat,
    options: &EncodeOptions,
) -> Result<Vec<u8>, RenderError> {
    let encode_error = |e: image::ImageError| RenderError::Encode {
        format: format.to_string(),
        message: e.to_string(),
    };

    if format == ImageFormat::Dds {
        return Err(RenderError::UnsupportedFormat(format.to_string()));
    }

    let mut out = Cursor::new(Vec::new());
    match format {
        ImageFormat::Jpeg => {
            let rgb = flattened(pixels, options)?;
            let quality = options.jpeg_quality.clamp(1, 100);
            let encoder = JpegEncoder::new_with_quality(&mut out, quality);
            rgb.write_with_encoder(encoder).map_err(encode_error)?;
        }
        ImageFormat::WebP => {
            let encoder = WebPEncoder::new_lossless(&mut out);
            pixels.to_rgba_image()?.write_with_encoder(encoder).map_err(encode_error)?;
        }
        ImageFormat::Avif => {
            let encoder = AvifEncoder::new_with_speed_quality(
                &mut out,
                options.avif_speed.clamp(1, 10),
                options.avif_quality.clamp(1, 100),
            );
            pixels.to_rgba_image()?.write_with_encoder(encoder).map_err(encode_error)?;
        }
        ImageFormat::Pnm => {
            DynamicImage::ImageRgb8(flattened(pixels, options)?)
                .write_to(&mut out, format.codec())
                .map_err(encode_error)?;
        }
        ImageFormat::Hdr => {
            let rgb = DynamicImage::ImageRgb8(flattened(pixels, options)?);
            DynamicImage::ImageRgb32F(rgb.to_rgb32f())
                .write_to(&mut out, format.codec())
                .map_err(encode_error)?;
        }
        ImageFormat::OpenExr => {
            let rgba = DynamicImage::ImageRgba8(pixels.to_rgba_image()?);
            DynamicImage::ImageRgba32F(rgba.to_rgba32f())
                .write_to(&mut out, format.codec())
                .map_err(encode_error)?;
        }
        ImageFormat::Farbfeld => {
            let rgba = DynamicImage::ImageRgba8(pixels.to_rgba_image()?);
            DynamicImage::ImageRgba16(rgba.to_rgba16())
                .write_to(&mut out, format.codec())
                .map_err(encode_error)?;
        }
        _ => {
            DynamicImage::ImageRgba8(pixels.to_rgba_image()?)
                .write_to(&mut out, format.codec())
                .map_err(encode_error)?;
        }
    }

    let bytes = out.into_inner();
    log::debug!(
        "Encoded {}x{} as {} ({} bytes)",
        pixels.width(),
        pixels.height(),
        format,
        bytes.len()
    );
    Ok(bytes)
}

fn flattened(pixels: &PixelBuffer, options: &EncodeOptions) -> Result<RgbImage, RenderError> {
    if pixels.has_transparency() {
        log::debug!("Flattening transparent pixels onto {:?}", options.flatten_background);
    }
    RgbImage::from_raw(
        pixels.width(),
        pixels.height(),
        pixels.flatten_rgb(options.flatten_background),
    )
    .ok_or_else(|| RenderError::InvalidBuffer("pixel data does not match its size".into()))
}
