//! Glyph outlines as `tiny-skia` paths.

use pictor_types::FontId;
use std::collections::HashMap;
use tiny_skia::{Path, PathBuilder, Transform};

/// Collects `ttf-parser` outline commands into a path in font units (y-up).
struct OutlineBuilder {
    builder: PathBuilder,
}

impl ttf_parser::OutlineBuilder for OutlineBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

/// Outline of `glyph_id`, or `None` for glyphs without contours (spaces).
pub fn glyph_path(face: &ttf_parser::Face<'_>, glyph_id: u16) -> Option<Path> {
    let mut builder = OutlineBuilder {
        builder: PathBuilder::new(),
    };
    face.outline_glyph(ttf_parser::GlyphId(glyph_id), &mut builder)?;
    builder.builder.finish()
}

/// Maps font units to device pixels with the origin at `(x, y)` on the
/// baseline, flipping y. `skew` slants the glyph for synthetic oblique.
pub fn glyph_transform(scale: f32, skew: f32, x: f32, y: f32) -> Transform {
    Transform::from_row(scale, 0.0, skew * scale, -scale, x, y)
}

/// Outlines built during one paint, shared by every run in the same face.
#[derive(Default)]
pub struct GlyphCache {
    paths: HashMap<(FontId, u16), Option<Path>>,
}

impl GlyphCache {
    pub fn get(
        &mut self,
        font: FontId,
        face: &ttf_parser::Face<'_>,
        glyph_id: u16,
    ) -> Option<&Path> {
        self.paths
            .entry((font, glyph_id))
            .or_insert_with(|| glyph_path(face, glyph_id))
            .as_ref()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_flips_y_and_translates() {
        let t = glyph_transform(0.5, 0.0, 10.0, 20.0);
        assert_eq!((t.sx, t.sy, t.kx), (0.5, -0.5, 0.0));
        assert_eq!((t.tx, t.ty), (10.0, 20.0));

        let slanted = glyph_transform(2.0, 0.25, 0.0, 0.0);
        assert!((slanted.kx - 0.5).abs() < 1e-6);
    }
}
