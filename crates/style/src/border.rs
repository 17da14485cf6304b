use crate::dimension::Dimension;
use pictor_types::Color;
use serde::{Deserialize, Serialize};

/// Line style of a border.
///
/// Every visible style is painted as a solid stroke.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BorderStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Double,
    None,
}

/// Result of parsing the `border` shorthand (`2px solid #00ff00`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Border {
    pub width: Option<Dimension>,
    pub style: Option<BorderStyle>,
    pub color: Option<Color>,
}
