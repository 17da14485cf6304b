use super::shaper::ShapedRun;
use pictor_style::TextAlign;

/// Slack allowed when deciding whether a word still fits.
const FIT_EPSILON: f32 = 0.01;

/// A line as a range of glyphs in the shaped run.
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayout {
    pub start_glyph: usize,
    pub end_glyph: usize,
    /// Advance width without trailing spaces.
    pub width: f32,
    /// Horizontal offset applied by alignment.
    pub x: f32,
    /// Extra advance given to each inner space by justification.
    pub space_extra: f32,
    /// `true` when the line was ended by an explicit newline.
    pub hard_break: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GlyphClass {
    Space,
    Newline,
    Word,
}

fn classify(text: &str, cluster: u32) -> GlyphClass {
    match text.get(cluster as usize..).and_then(|s| s.chars().next()) {
        Some('\n') => GlyphClass::Newline,
        Some(c) if c.is_whitespace() => GlyphClass::Space,
        _ => GlyphClass::Word,
    }
}

/// Breaks a shaped run into lines at spaces and newlines.
///
/// With `max_width == None` (or `wrap == false`) lines only end at explicit
/// newlines. A word wider than the line is kept whole on its own line.
pub fn break_lines(
    run: &ShapedRun,
    text: &str,
    max_width: Option<f32>,
    wrap: bool,
) -> Vec<LineLayout> {
    let limit = match max_width {
        Some(w) if wrap => w + FIT_EPSILON,
        _ => f32::INFINITY,
    };

    let glyphs = &run.glyphs;
    let mut lines = Vec::new();
    let mut line_start = 0;
    let mut line_width = 0.0;
    let mut content_width = 0.0;
    let mut has_word = false;

    let mut i = 0;
    while i < glyphs.len() {
        match classify(text, glyphs[i].cluster) {
            GlyphClass::Newline => {
                lines.push(new_line(line_start, i, content_width, true));
                line_start = i + 1;
                line_width = 0.0;
                content_width = 0.0;
                has_word = false;
                i += 1;
            }
            GlyphClass::Space => {
                // Spaces hang at the end of a line and never cause a break.
                line_width += glyphs[i].x_advance;
                i += 1;
            }
            GlyphClass::Word => {
                let mut end = i;
                let mut word_width = 0.0;
                while end < glyphs.len()
                    && classify(text, glyphs[end].cluster) == GlyphClass::Word
                {
                    word_width += glyphs[end].x_advance;
                    end += 1;
                }

                if has_word && line_width + word_width > limit {
                    lines.push(new_line(line_start, i, content_width, false));
                    line_start = i;
                    line_width = 0.0;
                }

                line_width += word_width;
                content_width = line_width;
                has_word = true;
                i = end;
            }
        }
    }

    if line_start < glyphs.len() || lines.is_empty() {
        lines.push(new_line(line_start, glyphs.len(), content_width, false));
    }
    lines
}

fn new_line(start_glyph: usize, end_glyph: usize, width: f32, hard_break: bool) -> LineLayout {
    LineLayout {
        start_glyph,
        end_glyph,
        width,
        x: 0.0,
        space_extra: 0.0,
        hard_break,
    }
}

/// Positions lines inside `available_width`.
///
/// Justified text spreads the free space over the inner spaces of every
/// line except the last one and lines ended by a newline.
pub fn align_lines(
    lines: &mut [LineLayout],
    run: &ShapedRun,
    text: &str,
    available_width: f32,
    align: TextAlign,
) {
    let line_count = lines.len();
    for (index, line) in lines.iter_mut().enumerate() {
        let free_space = (available_width - line.width).max(0.0);
        match align {
            TextAlign::Left => {}
            TextAlign::Center => line.x = free_space / 2.0,
            TextAlign::Right => line.x = free_space,
            TextAlign::Justify => {
                let is_last = index + 1 == line_count || line.hard_break;
                if is_last || free_space <= 0.0 {
                    continue;
                }
                let spaces = inner_spaces(line, run, text);
                if spaces > 0 {
                    line.space_extra = free_space / spaces as f32;
                    line.width = available_width;
                }
            }
        }
    }
}

/// Counts spaces between the first and last word of a line.
fn inner_spaces(line: &LineLayout, run: &ShapedRun, text: &str) -> usize {
    let glyphs = &run.glyphs[line.start_glyph..line.end_glyph];
    let Some(last_word) = glyphs
        .iter()
        .rposition(|g| classify(text, g.cluster) == GlyphClass::Word)
    else {
        return 0;
    };
    let first_word = glyphs
        .iter()
        .position(|g| classify(text, g.cluster) == GlyphClass::Word)
        .unwrap_or(last_word);
    glyphs[first_word..last_word]
        .iter()
        .filter(|g| classify(text, g.cluster) == GlyphClass::Space)
        .count()
}

/// Whether the glyph at `index` comes from whitespace.
pub(crate) fn is_space(run: &ShapedRun, text: &str, index: usize) -> bool {
    run.glyphs
        .get(index)
        .is_some_and(|g| classify(text, g.cluster) == GlyphClass::Space)
}
