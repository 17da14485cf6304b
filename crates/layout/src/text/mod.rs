//! Text shaping, line breaking and measurement.
//!
//! Text is prepared once per node ([`prepare_text`]: whitespace handling and
//! `text-transform`), shaped with a single face, then broken into lines. The
//! flex solver calls [`TextLayouter::measure`] while sizing leaves; the final
//! pass calls [`TextLayouter::layout`] with the resolved content width.

pub mod shaper;
pub mod wrapper;

pub use shaper::{GlyphInstance, ShapedRun, shape_text};
pub use wrapper::{LineLayout, align_lines, break_lines};

use crate::cache::{FontCacheKey, MeasureCacheKey, ShapingCacheKey, TextCache};
use crate::config::LayoutConfig;
use crate::fonts::{FontData, FontSnapshot};
use crate::output::{PositionedGlyph, TextBlock, TextLine};
use crate::style::{ComputedStyle, TextModel};
use pictor_style::TextTransform;
use pictor_traits::FontError;
use pictor_types::Size;
use std::sync::Arc;

const TAB_WIDTH: usize = 8;

/// Applies `white-space` and `text-transform` to raw node text.
pub fn prepare_text(text: &str, style: &TextModel) -> String {
    let spaced = if style.white_space.collapses() {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    } else {
        text.replace("\r\n", "\n").replace('\t', &" ".repeat(TAB_WIDTH))
    };
    apply_transform(&spaced, style.text_transform)
}

fn apply_transform(text: &str, transform: TextTransform) -> String {
    match transform {
        TextTransform::None => text.to_string(),
        TextTransform::Uppercase => text.to_uppercase(),
        TextTransform::Lowercase => text.to_lowercase(),
        TextTransform::Capitalize => {
            let mut out = String::with_capacity(text.len());
            let mut word_start = true;
            for c in text.chars() {
                if word_start && c.is_alphabetic() {
                    out.extend(c.to_uppercase());
                } else {
                    out.push(c);
                }
                word_start = c.is_whitespace();
            }
            out
        }
    }
}

/// Shapes and measures text for one render against a font snapshot.
pub struct TextLayouter {
    fonts: FontSnapshot,
    cache: TextCache,
}

impl TextLayouter {
    pub fn new(fonts: FontSnapshot, config: &LayoutConfig) -> Self {
        Self {
            fonts,
            cache: TextCache::with_capacity(config.cache_capacity),
        }
    }

    pub fn fonts(&self) -> &FontSnapshot {
        &self.fonts
    }

    fn font_for(&mut self, text: &TextModel) -> Result<FontData, FontError> {
        let key = FontCacheKey {
            family: text.font_family.clone(),
            weight: text.font_weight,
            style: text.font_style,
        };
        if let Some(font) = self.cache.fonts.get(&key) {
            return Ok(font.clone());
        }
        let font = self
            .fonts
            .select(&text.font_family, text.font_weight, text.font_style)?;
        log::trace!("Font for '{}' {}: {}", text.font_family, text.font_weight, font.id);
        self.cache.fonts.insert(key, font.clone());
        Ok(font)
    }

    /// Shapes prepared text. Empty text yields `None`, but still requires a
    /// loaded font.
    pub fn shape(
        &mut self,
        text: &str,
        style: &ComputedStyle,
    ) -> Result<Option<Arc<ShapedRun>>, FontError> {
        if self.fonts.is_empty() {
            return Err(FontError::NoFontLoaded);
        }
        if text.is_empty() {
            return Ok(None);
        }
        let key = ShapingCacheKey {
            text: text.to_string(),
            style_hash: style.hash_value(),
        };
        if let Some(run) = self.cache.shaping.get(&key) {
            return Ok(Some(run.clone()));
        }

        let font = self.font_for(&style.text)?;
        let run = shape_text(text, &font, style.text.font_size, style.text.letter_spacing)
            .ok_or_else(|| FontError::InvalidData(format!("{} cannot be shaped", font.id)))?;
        let run = Arc::new(run);
        self.cache.prune();
        self.cache.shaping.insert(key, run.clone());
        Ok(Some(run))
    }

    /// Size of the wrapped text box. `max_width == None` measures at
    /// max-content. The width is rounded up to whole pixels so that laying
    /// the text out again at the measured width reproduces the same lines.
    pub fn measure(
        &mut self,
        text: &str,
        style: &ComputedStyle,
        max_width: Option<f32>,
    ) -> Result<Size, FontError> {
        let width_bucket = MeasureCacheKey::bucket(max_width);
        let key = MeasureCacheKey {
            text: text.to_string(),
            style_hash: style.hash_value(),
            width_bucket,
        };
        if let Some(size) = self.cache.measurements.get(&key) {
            return Ok(*size);
        }

        let size = match self.shape(text, style)? {
            None => Size::zero(),
            Some(run) => {
                let limit = width_bucket.map(MeasureCacheKey::bucket_width);
                let lines = break_lines(&run, text, limit, style.text.white_space.wraps());
                let width = lines.iter().map(|line| line.width).fold(0.0, f32::max);
                Size::new(
                    width.ceil(),
                    lines.len() as f32 * style.text.line_height_px(),
                )
            }
        };
        self.cache.prune();
        self.cache.measurements.insert(key, size);
        Ok(size)
    }

    /// Lays text out for painting inside a content box `available_width`
    /// pixels wide. Glyph positions are relative to the content box.
    pub fn layout(
        &mut self,
        text: &str,
        style: &ComputedStyle,
        available_width: f32,
    ) -> Result<Option<TextBlock>, FontError> {
        let Some(run) = self.shape(text, style)? else {
            return Ok(None);
        };

        let mut lines = break_lines(
            &run,
            text,
            Some(available_width),
            style.text.white_space.wraps(),
        );
        align_lines(&mut lines, &run, text, available_width, style.text.text_align);

        let line_height = style.text.line_height_px();
        let half_leading = (line_height - (run.ascender + run.descender)) / 2.0;
        let baseline_offset = half_leading + run.ascender;

        let text_lines = lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let top = i as f32 * line_height;
                let baseline = top + baseline_offset;
                let mut pen = line.x;
                let mut glyphs = Vec::with_capacity(line.end_glyph - line.start_glyph);
                for index in line.start_glyph..line.end_glyph {
                    let glyph = &run.glyphs[index];
                    if wrapper::is_space(&run, text, index) {
                        pen += glyph.x_advance + line.space_extra;
                        continue;
                    }
                    glyphs.push(PositionedGlyph {
                        id: glyph.index,
                        x: pen + glyph.x_offset,
                        y: baseline - glyph.y_offset,
                    });
                    pen += glyph.x_advance;
                }
                TextLine {
                    x: line.x,
                    y: top,
                    width: line.width,
                    height: line_height,
                    baseline,
                    glyphs,
                }
            })
            .collect();

        Ok(Some(TextBlock {
            font: run.font.clone(),
            font_size: run.font_size,
            ascender: run.ascender,
            descender: run.descender,
            lines: text_lines,
        }))
    }
}
