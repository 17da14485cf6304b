//! The sparse, unresolved style record attached to a node.

use crate::border::BorderStyle;
use crate::dimension::{Dimension, SideValues};
use crate::flex::{AlignContent, AlignItems, AlignSelf, FlexDirection, FlexWrap, JustifyContent};
use crate::font::{FontStyle, FontWeight};
use crate::text::{LineHeight, TextAlign, TextDecoration, TextTransform, WhiteSpace};
use crate::visual::{Display, ObjectFit, Overflow, Position};
use pictor_types::Color;

/// Every property is optional; `None` means "not declared at this layer".
#[derive(Default, Clone, PartialEq, Debug)]
pub struct ElementStyle {
    // Box generation & positioning
    pub display: Option<Display>,
    pub position: Option<Position>,
    pub inset: SideValues,

    // Sizing
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub min_width: Option<Dimension>,
    pub min_height: Option<Dimension>,
    pub max_width: Option<Dimension>,
    pub max_height: Option<Dimension>,
    pub aspect_ratio: Option<f32>,

    // Box model
    pub margin: SideValues,
    pub padding: SideValues,
    pub border_width: SideValues,
    pub border_style: Option<BorderStyle>,
    pub border_color: Option<Color>,
    pub border_radius: Option<Dimension>,
    pub background_color: Option<Color>,

    // Flexbox container
    pub flex_direction: Option<FlexDirection>,
    pub flex_wrap: Option<FlexWrap>,
    pub justify_content: Option<JustifyContent>,
    pub align_items: Option<AlignItems>,
    pub align_content: Option<AlignContent>,
    pub row_gap: Option<Dimension>,
    pub column_gap: Option<Dimension>,

    // Flexbox item
    pub flex_grow: Option<f32>,
    pub flex_shrink: Option<f32>,
    pub flex_basis: Option<Dimension>,
    pub align_self: Option<AlignSelf>,

    // Font & text
    pub color: Option<Color>,
    pub font_family: Option<String>,
    pub font_size: Option<Dimension>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub line_height: Option<LineHeight>,
    pub letter_spacing: Option<Dimension>,
    pub text_align: Option<TextAlign>,
    pub text_decoration: Option<TextDecoration>,
    pub text_transform: Option<TextTransform>,
    pub white_space: Option<WhiteSpace>,

    // Visual
    pub opacity: Option<f32>,
    pub overflow: Option<Overflow>,
    pub object_fit: Option<ObjectFit>,
}

macro_rules! overlay {
    ($base:ident, $top:ident; $($field:ident),* $(,)?) => {
        $( if $top.$field.is_some() { $base.$field = $top.$field.clone(); } )*
    };
}

impl ElementStyle {
    /// Overlays every property declared in `top` onto `self`.
    pub fn merge(&mut self, top: &ElementStyle) {
        let base = self;
        overlay!(base, top;
            display, position, width, height, min_width, min_height, max_width, max_height,
            aspect_ratio, border_style, border_color, border_radius, background_color,
            flex_direction, flex_wrap, justify_content, align_items, align_content,
            row_gap, column_gap, flex_grow, flex_shrink, flex_basis, align_self,
            color, font_family, font_size, font_weight, font_style, line_height,
            letter_spacing, text_align, text_decoration, text_transform, white_space,
            opacity, overflow, object_fit,
        );
        base.inset.merge(&top.inset);
        base.margin.merge(&top.margin);
        base.padding.merge(&top.padding);
        base.border_width.merge(&top.border_width);
    }

    pub fn merged(mut self, top: &ElementStyle) -> Self {
        self.merge(top);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == ElementStyle::default()
    }
}
