use crate::fonts::FontData;
use rustybuzz::{Feature, UnicodeBuffer};
use std::cell::RefCell;
use std::sync::OnceLock;
use ttf_parser::Tag;

// Reuse buffer to avoid allocations in the tight loop
thread_local! {
    static SCRATCH_BUFFER: RefCell<Option<UnicodeBuffer>> =
        RefCell::new(Some(UnicodeBuffer::new()));
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlyphInstance {
    pub index: u16,
    pub x_offset: f32,
    pub y_offset: f32,
    pub x_advance: f32,
    /// Byte offset of the source cluster in the shaped text.
    pub cluster: u32,
}

/// The glyphs of one text node, shaped with a single font at one size.
#[derive(Debug, Clone)]
pub struct ShapedRun {
    pub glyphs: Vec<GlyphInstance>,
    pub width: f32,
    pub font: FontData,
    pub font_size: f32,
    /// Distance from the baseline to the top of the em box, in pixels.
    pub ascender: f32,
    /// Distance from the baseline to the bottom, in pixels (positive).
    pub descender: f32,
}

fn features() -> &'static [Feature] {
    static FEATURES: OnceLock<Vec<Feature>> = OnceLock::new();
    FEATURES.get_or_init(|| {
        vec![
            Feature::new(Tag::from_bytes(b"liga"), 1, ..),
            Feature::new(Tag::from_bytes(b"kern"), 1, ..),
        ]
    })
}

/// Shapes `text` with kerning and standard ligatures. `letter_spacing` is
/// added after the last glyph of every cluster.
///
/// Returns `None` when the font data cannot be opened for shaping.
pub fn shape_text(
    text: &str,
    font: &FontData,
    font_size: f32,
    letter_spacing: f32,
) -> Option<ShapedRun> {
    // Stack allocation of Face, safe because the font data outlives it
    let face = font.as_face()?;

    let scale = font.metrics.scale(font_size);
    let ascender = font.metrics.ascender as f32 * scale;
    let descender = -(font.metrics.descender as f32) * scale;

    let mut buffer =
        SCRATCH_BUFFER.with(|b| b.borrow_mut().take().unwrap_or_else(UnicodeBuffer::new));
    buffer.push_str(text);
    buffer.guess_segment_properties();

    let glyph_buffer = rustybuzz::shape(&face, features(), buffer);

    let infos = glyph_buffer.glyph_infos();
    let positions = glyph_buffer.glyph_positions();

    let mut glyphs = Vec::with_capacity(infos.len());
    let mut total_width = 0.0;

    for (i, (info, pos)) in infos.iter().zip(positions.iter()).enumerate() {
        let ends_cluster = infos.get(i + 1).is_none_or(|next| next.cluster != info.cluster);
        let mut x_advance = pos.x_advance as f32 * scale;
        if ends_cluster {
            x_advance += letter_spacing;
        }
        glyphs.push(GlyphInstance {
            index: info.glyph_id as u16,
            x_offset: pos.x_offset as f32 * scale,
            y_offset: pos.y_offset as f32 * scale,
            x_advance,
            cluster: info.cluster,
        });
        total_width += x_advance;
    }

    let recycled_buffer = glyph_buffer.clear();
    SCRATCH_BUFFER.with(|b| *b.borrow_mut() = Some(recycled_buffer));

    Some(ShapedRun {
        glyphs,
        width: total_width,
        font: font.clone(),
        font_size,
        ascender,
        descender,
    })
}
