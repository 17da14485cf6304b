use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use crate::dimension::Dimension;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    #[default]
    #[serde(alias = "start")]
    Left,
    #[serde(alias = "end")]
    Right,
    Center,
    Justify,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    LineThrough,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
    Capitalize,
}

/// Whitespace handling for text content.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WhiteSpace {
    /// Collapse whitespace runs, wrap at the available width.
    #[default]
    Normal,
    /// Collapse whitespace runs, never wrap.
    #[serde(rename = "nowrap")]
    NoWrap,
    /// Preserve spaces and newlines, wrap at the available width.
    PreWrap,
    /// Preserve spaces and newlines, never wrap.
    Pre,
}

impl WhiteSpace {
    pub fn collapses(&self) -> bool {
        matches!(self, WhiteSpace::Normal | WhiteSpace::NoWrap)
    }

    pub fn wraps(&self) -> bool {
        matches!(self, WhiteSpace::Normal | WhiteSpace::PreWrap)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LineHeight {
    /// `1.2 × font-size`.
    #[default]
    Normal,
    /// Unitless multiple of the font size.
    Multiple(f32),
    Length(Dimension),
}

impl Hash for LineHeight {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            LineHeight::Normal => 0u8.hash(state),
            LineHeight::Multiple(m) => {
                1u8.hash(state);
                m.to_bits().hash(state);
            }
            LineHeight::Length(d) => {
                2u8.hash(state);
                d.hash(state);
            }
        }
    }
}

impl Eq for LineHeight {}
