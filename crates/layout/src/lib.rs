//! Style resolution, text shaping and flexbox layout.
//!
//! [`style_tree`] resolves every node's [`ComputedStyle`]; the
//! [`LayoutEngine`] then sizes and positions the styled tree with `taffy`
//! and lays out text with `rustybuzz`, producing a [`LayoutTree`] of
//! absolute boxes ready for painting.

use pictor_traits::FontError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Flex layout failed: {0}")]
    Taffy(String),
    #[error(transparent)]
    Font(#[from] FontError),
    #[error("Image '{0}' was not decoded before layout")]
    MissingImage(String),
}

pub mod algorithms;
pub mod cache;
pub mod config;
pub mod engine;
pub mod fonts;
pub mod output;
pub mod style;
pub mod text;
pub mod tree;

#[cfg(test)]
mod test_utils;

pub use self::config::LayoutConfig;
pub use self::engine::{IntrinsicSizes, LayoutEngine, LayoutViewport};
pub use self::fonts::{FontContext, FontData, FontLoadOptions, FontSnapshot};
pub use self::output::{BoxContent, LayoutBox, LayoutTree, PositionedGlyph, TextBlock, TextLine};
pub use self::style::{ComputedStyle, ResolveContext};
pub use self::tree::{StyledContent, StyledNode, StyledTree, style_tree};
