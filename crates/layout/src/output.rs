//! The positioned box tree handed to the rasterizer.

use crate::fonts::FontData;
use crate::style::ComputedStyle;
use pictor_types::{Edges, NodePath, Rect};
use std::sync::Arc;

/// A glyph positioned relative to its text node's content box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedGlyph {
    pub id: u16,
    pub x: f32,
    /// Baseline position of the glyph origin.
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub baseline: f32,
    pub glyphs: Vec<PositionedGlyph>,
}

/// The laid-out lines of one text node, all in one face and size.
#[derive(Debug, Clone)]
pub struct TextBlock {
    pub font: FontData,
    pub font_size: f32,
    pub ascender: f32,
    pub descender: f32,
    pub lines: Vec<TextLine>,
}

#[derive(Debug, Clone)]
pub enum BoxContent {
    Container { children: Vec<LayoutBox> },
    /// `None` for text that is empty after whitespace processing.
    Text { block: Option<TextBlock> },
    Image { src: String },
}

/// A node's border box in absolute device pixels.
#[derive(Debug, Clone)]
pub struct LayoutBox {
    pub path: NodePath,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub border: Edges,
    pub padding: Edges,
    pub style: Arc<ComputedStyle>,
    pub content: BoxContent,
}

impl LayoutBox {
    pub fn border_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn padding_rect(&self) -> Rect {
        self.border_rect().inset(&self.border)
    }

    pub fn content_rect(&self) -> Rect {
        self.padding_rect().inset(&self.padding)
    }

    pub fn children(&self) -> &[LayoutBox] {
        match &self.content {
            BoxContent::Container { children } => children,
            _ => &[],
        }
    }

    /// Number of boxes in this subtree.
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(LayoutBox::count).sum::<usize>()
    }

    /// Finds the box of the node at `path` (e.g. `root/1/0`).
    pub fn find(&self, path: &str) -> Option<&LayoutBox> {
        if self.path.as_str() == path {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(path))
    }
}

/// Result of layout: the root box and the canvas it is painted on.
#[derive(Debug, Clone)]
pub struct LayoutTree {
    /// `None` when the root itself is `display: none`.
    pub root: Option<LayoutBox>,
    pub width: u32,
    pub height: u32,
}
