//! Resolved styles.
//!
//! [`resolve_node_style`] stacks a node's style layers (preset, utility
//! classes, explicit style) over the inherited values of its parent and
//! resolves every length to device pixels. Percentages stay percentages; the
//! flex solver resolves them against the containing block.

use pictor_node::NodeMeta;
use pictor_style::{
    AlignContent, AlignItems, AlignSelf, BorderStyle, Dimension, Display, ElementStyle,
    FlexDirection, FlexWrap, FontStyle, JustifyContent, LineHeight, ObjectFit, Overflow, Position,
    SideValues, StyleDiagnostic, TextAlign, TextDecoration, TextTransform, WhiteSpace,
    parse_utility_classes,
};
use pictor_types::{Color, Edges, NodePath};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

fn hash_f32<H: Hasher>(v: &f32, state: &mut H) {
    v.to_bits().hash(state);
}

/// A length in device pixels, or a percentage (0-100) of the containing block.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Length {
    #[default]
    Auto,
    Px(f32),
    Percent(f32),
}

impl Eq for Length {}

impl Hash for Length {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Length::Auto => 0u8.hash(state),
            Length::Px(v) => {
                1u8.hash(state);
                hash_f32(v, state);
            }
            Length::Percent(v) => {
                2u8.hash(state);
                hash_f32(v, state);
            }
        }
    }
}

impl Length {
    pub const ZERO: Length = Length::Px(0.0);

    pub fn is_auto(&self) -> bool {
        matches!(self, Length::Auto)
    }

    /// Resolves against `basis`; `auto` resolves to `None`.
    pub fn resolve(&self, basis: f32) -> Option<f32> {
        match *self {
            Length::Auto => None,
            Length::Px(v) => Some(v),
            Length::Percent(p) => Some(basis * p / 100.0),
        }
    }
}

/// Per-side lengths in CSS order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sides {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl Sides {
    pub fn all(value: Length) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }
}

/// `line-height` after resolution. Factors are inherited as factors so a
/// child with a different font size gets its own line height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineSpacing {
    Factor(f32),
    Fixed(f32),
}

impl LineSpacing {
    pub fn resolve(&self, font_size: f32) -> f32 {
        match *self {
            LineSpacing::Factor(f) => f * font_size,
            LineSpacing::Fixed(px) => px,
        }
    }
}

impl Default for LineSpacing {
    fn default() -> Self {
        LineSpacing::Factor(1.2)
    }
}

impl Eq for LineSpacing {}

impl Hash for LineSpacing {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            LineSpacing::Factor(v) => {
                0u8.hash(state);
                hash_f32(v, state);
            }
            LineSpacing::Fixed(v) => {
                1u8.hash(state);
                hash_f32(v, state);
            }
        }
    }
}

// Grouped Style Structures

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoxModel {
    pub width: Length,
    pub height: Length,
    pub min_width: Length,
    pub min_height: Length,
    pub max_width: Length,
    pub max_height: Length,
    pub aspect_ratio: Option<f32>,
    pub margin: Sides,
    pub padding: Sides,
}

impl Eq for BoxModel {}

impl Hash for BoxModel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.width.hash(state);
        self.height.hash(state);
        self.min_width.hash(state);
        self.min_height.hash(state);
        self.max_width.hash(state);
        self.max_height.hash(state);
        self.aspect_ratio.map(f32::to_bits).hash(state);
        self.margin.hash(state);
        self.padding.hash(state);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BorderModel {
    /// Widths in device pixels; zero when the style is `none`.
    pub width: Edges,
    pub style: BorderStyle,
    pub color: Color,
    pub radius: Length,
}

impl Default for BorderModel {
    fn default() -> Self {
        Self {
            width: Edges::default(),
            style: BorderStyle::Solid,
            color: Color::BLACK,
            radius: Length::ZERO,
        }
    }
}

impl Eq for BorderModel {}

impl Hash for BorderModel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_f32(&self.width.top, state);
        hash_f32(&self.width.right, state);
        hash_f32(&self.width.bottom, state);
        hash_f32(&self.width.left, state);
        self.style.hash(state);
        self.color.hash(state);
        self.radius.hash(state);
    }
}

impl BorderModel {
    pub fn is_visible(&self) -> bool {
        self.style != BorderStyle::None
            && !self.color.is_transparent()
            && (self.width.top > 0.0
                || self.width.right > 0.0
                || self.width.bottom > 0.0
                || self.width.left > 0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextModel {
    pub font_family: Arc<str>,
    /// Device pixels.
    pub font_size: f32,
    pub font_weight: u16,
    pub font_style: FontStyle,
    pub line_height: LineSpacing,
    /// Extra advance per cluster in device pixels.
    pub letter_spacing: f32,
    pub text_align: TextAlign,
    pub text_decoration: TextDecoration,
    pub text_transform: TextTransform,
    pub white_space: WhiteSpace,
    pub color: Color,
}

impl Default for TextModel {
    fn default() -> Self {
        Self {
            font_family: Arc::from("sans-serif"),
            font_size: 16.0,
            font_weight: 400,
            font_style: FontStyle::Normal,
            line_height: LineSpacing::default(),
            letter_spacing: 0.0,
            text_align: TextAlign::Left,
            text_decoration: TextDecoration::None,
            text_transform: TextTransform::None,
            white_space: WhiteSpace::Normal,
            color: Color::BLACK,
        }
    }
}

impl Eq for TextModel {}

impl Hash for TextModel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.font_family.hash(state);
        hash_f32(&self.font_size, state);
        self.font_weight.hash(state);
        self.font_style.hash(state);
        self.line_height.hash(state);
        hash_f32(&self.letter_spacing, state);
        self.text_align.hash(state);
        self.text_decoration.hash(state);
        self.text_transform.hash(state);
        self.white_space.hash(state);
        self.color.hash(state);
    }
}

impl TextModel {
    /// Line height in device pixels.
    pub fn line_height_px(&self) -> f32 {
        self.line_height.resolve(self.font_size)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlexModel {
    pub direction: FlexDirection,
    pub wrap: FlexWrap,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    pub align_content: AlignContent,
    pub row_gap: Length,
    pub column_gap: Length,
    // Item properties
    pub grow: f32,
    pub shrink: f32,
    pub basis: Length,
    pub align_self: AlignSelf,
}

impl Default for FlexModel {
    fn default() -> Self {
        Self {
            direction: FlexDirection::default(),
            wrap: FlexWrap::default(),
            justify_content: JustifyContent::default(),
            align_items: AlignItems::default(),
            align_content: AlignContent::default(),
            row_gap: Length::ZERO,
            column_gap: Length::ZERO,
            grow: 0.0,
            shrink: 1.0,
            basis: Length::Auto,
            align_self: AlignSelf::default(),
        }
    }
}

impl Eq for FlexModel {}

impl Hash for FlexModel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.direction.hash(state);
        self.wrap.hash(state);
        self.justify_content.hash(state);
        self.align_items.hash(state);
        self.align_content.hash(state);
        self.row_gap.hash(state);
        self.column_gap.hash(state);
        hash_f32(&self.grow, state);
        hash_f32(&self.shrink, state);
        self.basis.hash(state);
        self.align_self.hash(state);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisualModel {
    pub display: Display,
    pub background_color: Option<Color>,
    pub opacity: f32,
    pub overflow: Overflow,
    pub object_fit: ObjectFit,
}

impl Default for VisualModel {
    fn default() -> Self {
        Self {
            display: Display::Flex,
            background_color: None,
            opacity: 1.0,
            overflow: Overflow::Visible,
            object_fit: ObjectFit::Fill,
        }
    }
}

impl Eq for VisualModel {}

impl Hash for VisualModel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.display.hash(state);
        self.background_color.hash(state);
        hash_f32(&self.opacity, state);
        self.overflow.hash(state);
        self.object_fit.hash(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionModel {
    pub position: Position,
    pub inset: Sides,
}

impl Default for PositionModel {
    fn default() -> Self {
        Self {
            position: Position::Relative,
            inset: Sides::all(Length::Auto),
        }
    }
}

/// Holds the raw styling data. Separated from `ComputedStyle` to enforce safe hashing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputedStyleData {
    pub box_model: BoxModel,
    pub border: BorderModel,
    pub text: TextModel,
    pub flex: FlexModel,
    pub visual: VisualModel,
    pub position: PositionModel,
}

impl Hash for ComputedStyleData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.box_model.hash(state);
        self.border.hash(state);
        self.text.hash(state);
        self.flex.hash(state);
        self.visual.hash(state);
        self.position.hash(state);
    }
}

/// A wrapper around style data that computes its hash once on construction.
#[derive(Debug, Clone)]
pub struct ComputedStyle {
    pub inner: ComputedStyleData,
    cached_hash: u64,
}

impl ComputedStyle {
    pub fn new(data: ComputedStyleData) -> Self {
        let mut s = DefaultHasher::new();
        data.hash(&mut s);
        Self {
            inner: data,
            cached_hash: s.finish(),
        }
    }

    /// The pre-computed hash, used as a cache key component.
    pub fn hash_value(&self) -> u64 {
        self.cached_hash
    }
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self::new(ComputedStyleData::default())
    }
}

impl std::ops::Deref for ComputedStyle {
    type Target = ComputedStyleData;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Eq for ComputedStyle {}

impl PartialEq for ComputedStyle {
    fn eq(&self, other: &Self) -> bool {
        if self.cached_hash != other.cached_hash {
            return false;
        }
        self.inner == other.inner
    }
}

impl Hash for ComputedStyle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cached_hash.hash(state);
    }
}

/// Inputs that relative units resolve against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolveContext {
    /// Definite viewport width in device pixels.
    pub viewport_width: Option<f32>,
    pub viewport_height: Option<f32>,
    /// The `rem` base in CSS pixels.
    pub root_font_size: f32,
    pub device_pixel_ratio: f32,
}

impl Default for ResolveContext {
    fn default() -> Self {
        Self {
            viewport_width: None,
            viewport_height: None,
            root_font_size: 16.0,
            device_pixel_ratio: 1.0,
        }
    }
}

impl ResolveContext {
    /// The style the root node inherits from.
    pub fn root_style(&self) -> Arc<ComputedStyle> {
        let mut data = ComputedStyleData::default();
        data.text.font_size = self.root_font_size * self.device_pixel_ratio;
        Arc::new(ComputedStyle::new(data))
    }

    fn viewport_length(&self, extent: Option<f32>, v: f32) -> Length {
        match extent {
            Some(extent) => Length::Px(v / 100.0 * extent),
            None => Length::Auto,
        }
    }
}

struct Resolver<'a> {
    ctx: &'a ResolveContext,
    /// This node's font size in device pixels, the `em` base.
    font_size: f32,
}

impl Resolver<'_> {
    fn length(&self, d: Dimension) -> Length {
        let ctx = self.ctx;
        match d {
            Dimension::Px(v) => Length::Px(v * ctx.device_pixel_ratio),
            Dimension::Percent(v) => Length::Percent(v),
            Dimension::Em(v) => Length::Px(v * self.font_size),
            Dimension::Rem(v) => Length::Px(v * ctx.root_font_size * ctx.device_pixel_ratio),
            Dimension::Vw(v) => ctx.viewport_length(ctx.viewport_width, v),
            Dimension::Vh(v) => ctx.viewport_length(ctx.viewport_height, v),
            Dimension::Auto => Length::Auto,
        }
    }

    fn length_or(&self, d: Option<Dimension>, fallback: Length) -> Length {
        d.map_or(fallback, |d| self.length(d))
    }

    /// Lengths that cannot be percentages of a box (`letter-spacing`,
    /// `border-width`) resolve percentages against the font size.
    fn absolute(&self, d: Dimension) -> f32 {
        self.length(d).resolve(self.font_size).unwrap_or(0.0)
    }

    fn sides(&self, sides: &SideValues, fallback: Length) -> Sides {
        Sides {
            top: self.length_or(sides.top, fallback),
            right: self.length_or(sides.right, fallback),
            bottom: self.length_or(sides.bottom, fallback),
            left: self.length_or(sides.left, fallback),
        }
    }
}

fn resolve_font_size(d: Dimension, parent: f32, ctx: &ResolveContext) -> f32 {
    let size = match d {
        Dimension::Px(v) => v * ctx.device_pixel_ratio,
        Dimension::Percent(v) => parent * v / 100.0,
        Dimension::Em(v) => parent * v,
        Dimension::Rem(v) => v * ctx.root_font_size * ctx.device_pixel_ratio,
        Dimension::Vw(v) => ctx.viewport_width.map_or(parent, |w| v / 100.0 * w),
        Dimension::Vh(v) => ctx.viewport_height.map_or(parent, |h| v / 100.0 * h),
        Dimension::Auto => parent,
    };
    if size.is_finite() && size >= 0.0 { size } else { parent }
}

/// Computes the style of a node from its merged declarations and its
/// parent's computed style.
///
/// Inheritable properties (`color`, `font-*`, `line-height`,
/// `letter-spacing`, `text-*`, `white-space`) fall back to the parent; all
/// others fall back to their initial values.
pub fn compute_style(
    merged: &ElementStyle,
    parent: &ComputedStyle,
    ctx: &ResolveContext,
) -> Arc<ComputedStyle> {
    let font_size = merged
        .font_size
        .map_or(parent.text.font_size, |d| resolve_font_size(d, parent.text.font_size, ctx));
    let r = Resolver { ctx, font_size };

    let line_height = match merged.line_height {
        None => parent.text.line_height,
        Some(LineHeight::Normal) => LineSpacing::default(),
        Some(LineHeight::Multiple(m)) => LineSpacing::Factor(m),
        Some(LineHeight::Length(d)) => match r.length(d) {
            Length::Px(px) => LineSpacing::Fixed(px),
            Length::Percent(p) => LineSpacing::Fixed(font_size * p / 100.0),
            Length::Auto => LineSpacing::default(),
        },
    };

    let text = TextModel {
        font_family: merged
            .font_family
            .as_deref()
            .map(Arc::from)
            .unwrap_or_else(|| parent.text.font_family.clone()),
        font_size,
        font_weight: merged
            .font_weight
            .map_or(parent.text.font_weight, |w| w.numeric_value()),
        font_style: merged.font_style.unwrap_or(parent.text.font_style),
        line_height,
        letter_spacing: merged
            .letter_spacing
            .map_or(parent.text.letter_spacing, |d| r.absolute(d)),
        text_align: merged.text_align.unwrap_or(parent.text.text_align),
        text_decoration: merged.text_decoration.unwrap_or(parent.text.text_decoration),
        text_transform: merged.text_transform.unwrap_or(parent.text.text_transform),
        white_space: merged.white_space.unwrap_or(parent.text.white_space),
        color: merged.color.unwrap_or(parent.text.color),
    };

    let border_style = merged.border_style.unwrap_or(BorderStyle::Solid);
    let border_width = |d: Option<Dimension>| match border_style {
        BorderStyle::None => 0.0,
        _ => d.map_or(0.0, |d| r.absolute(d).max(0.0)),
    };
    let border = BorderModel {
        width: Edges {
            top: border_width(merged.border_width.top),
            right: border_width(merged.border_width.right),
            bottom: border_width(merged.border_width.bottom),
            left: border_width(merged.border_width.left),
        },
        style: border_style,
        color: merged.border_color.unwrap_or(text.color),
        radius: r.length_or(merged.border_radius, Length::ZERO),
    };

    let box_model = BoxModel {
        width: r.length_or(merged.width, Length::Auto),
        height: r.length_or(merged.height, Length::Auto),
        min_width: r.length_or(merged.min_width, Length::Auto),
        min_height: r.length_or(merged.min_height, Length::Auto),
        max_width: r.length_or(merged.max_width, Length::Auto),
        max_height: r.length_or(merged.max_height, Length::Auto),
        aspect_ratio: merged.aspect_ratio.filter(|ratio| ratio.is_finite() && *ratio > 0.0),
        margin: r.sides(&merged.margin, Length::ZERO),
        padding: r.sides(&merged.padding, Length::ZERO),
    };

    let defaults = FlexModel::default();
    let flex = FlexModel {
        direction: merged.flex_direction.unwrap_or(defaults.direction),
        wrap: merged.flex_wrap.unwrap_or(defaults.wrap),
        justify_content: merged.justify_content.unwrap_or(defaults.justify_content),
        align_items: merged.align_items.unwrap_or(defaults.align_items),
        align_content: merged.align_content.unwrap_or(defaults.align_content),
        row_gap: r.length_or(merged.row_gap, defaults.row_gap),
        column_gap: r.length_or(merged.column_gap, defaults.column_gap),
        grow: merged.flex_grow.unwrap_or(defaults.grow),
        shrink: merged.flex_shrink.unwrap_or(defaults.shrink),
        basis: r.length_or(merged.flex_basis, defaults.basis),
        align_self: merged.align_self.unwrap_or(defaults.align_self),
    };

    let visual = VisualModel {
        display: merged.display.unwrap_or(Display::Flex),
        background_color: merged.background_color.filter(|c| !c.is_transparent()),
        opacity: merged.opacity.map_or(1.0, |o| o.clamp(0.0, 1.0)),
        overflow: merged.overflow.unwrap_or(Overflow::Visible),
        object_fit: merged.object_fit.unwrap_or(ObjectFit::Fill),
    };

    let position = PositionModel {
        position: merged.position.unwrap_or(Position::Relative),
        inset: r.sides(&merged.inset, Length::Auto),
    };

    Arc::new(ComputedStyle::new(ComputedStyleData {
        box_model,
        border,
        text,
        flex,
        visual,
        position,
    }))
}

/// Merges a node's style layers and computes its style.
///
/// Layers apply lowest to highest: `preset`, then the `tw` utility classes,
/// then the explicit `style`. Malformed declarations are dropped and
/// reported as diagnostics against `path`.
pub fn resolve_node_style(
    meta: &NodeMeta,
    path: &NodePath,
    parent: &ComputedStyle,
    ctx: &ResolveContext,
) -> (Arc<ComputedStyle>, Vec<StyleDiagnostic>) {
    let mut diagnostics = Vec::new();
    let mut merged = ElementStyle::default();

    if let Some(preset) = &meta.preset {
        let parsed = preset.parse();
        diagnostics.extend(parsed.errors.iter().map(|e| StyleDiagnostic::from_error(path, e)));
        merged.merge(&parsed.style);
    }
    if let Some(tw) = &meta.tw {
        merged.merge(&parse_utility_classes(tw));
    }
    if let Some(style) = &meta.style {
        let parsed = style.parse();
        diagnostics.extend(parsed.errors.iter().map(|e| StyleDiagnostic::from_error(path, e)));
        merged.merge(&parsed.style);
    }

    for diagnostic in &diagnostics {
        log::warn!("Ignoring style declaration: {}", diagnostic);
    }

    (compute_style(&merged, parent, ctx), diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pictor_node::StyleValue;

    fn meta(preset: Option<&str>, tw: Option<&str>, style: Option<&str>) -> NodeMeta {
        NodeMeta {
            preset: preset.map(|s| StyleValue::Css(s.to_string())),
            tw: tw.map(str::to_string),
            style: style.map(|s| StyleValue::Css(s.to_string())),
        }
    }

    fn resolve(
        meta: &NodeMeta,
        ctx: &ResolveContext,
    ) -> (Arc<ComputedStyle>, Vec<StyleDiagnostic>) {
        resolve_node_style(meta, &NodePath::root(), &ctx.root_style(), ctx)
    }

    #[test]
    fn explicit_beats_utility_beats_preset() {
        let _ = env_logger::builder().is_test(true).try_init();
        let ctx = ResolveContext::default();
        let red = Color::rgb(255, 0, 0);
        let green = Color::rgb(0, 255, 0);

        let all = meta(Some("color: blue"), Some("text-[#00ff00]"), Some("color: red"));
        assert_eq!(resolve(&all, &ctx).0.text.color, red);

        let no_explicit = meta(Some("color: blue"), Some("text-[#00ff00]"), None);
        assert_eq!(resolve(&no_explicit, &ctx).0.text.color, green);

        let preset_only = meta(Some("color: blue"), None, None);
        assert_eq!(resolve(&preset_only, &ctx).0.text.color, Color::rgb(0, 0, 255));
    }

    #[test]
    fn inherits_text_properties_but_not_box_properties() {
        let _ = env_logger::builder().is_test(true).try_init();
        let ctx = ResolveContext::default();
        let (parent, _) = resolve(
            &meta(
                None,
                None,
                Some("color: red; background-color: blue; padding: 4px; font-size: 20px"),
            ),
            &ctx,
        );
        let child_path = NodePath::root().child(0);
        let (child, _) = resolve_node_style(&NodeMeta::default(), &child_path, &parent, &ctx);

        assert_eq!(child.text.color, Color::rgb(255, 0, 0));
        assert_eq!(child.text.font_size, 20.0);
        assert_eq!(child.visual.background_color, None);
        assert_eq!(child.box_model.padding.left, Length::ZERO);
    }

    #[test]
    fn relative_units_and_device_pixel_ratio() {
        let _ = env_logger::builder().is_test(true).try_init();
        let ctx = ResolveContext {
            viewport_width: Some(400.0),
            viewport_height: None,
            root_font_size: 10.0,
            device_pixel_ratio: 2.0,
        };
        let (style, diagnostics) = resolve(
            &meta(
                None,
                None,
                Some("font-size: 1.5em; width: 2em; height: 3rem; margin: 10vw 5vh; padding: 3px"),
            ),
            &ctx,
        );
        assert!(diagnostics.is_empty());
        // Root font size is 10 CSS px = 20 device px; 1.5em of that is 30.
        assert_eq!(style.text.font_size, 30.0);
        assert_eq!(style.box_model.width, Length::Px(60.0));
        assert_eq!(style.box_model.height, Length::Px(60.0));
        assert_eq!(style.box_model.margin.top, Length::Px(40.0));
        assert_eq!(style.box_model.margin.left, Length::Auto);
        assert_eq!(style.box_model.padding.top, Length::Px(6.0));
    }

    #[test]
    fn malformed_values_become_diagnostics_and_fall_back() {
        let _ = env_logger::builder().is_test(true).try_init();
        let ctx = ResolveContext::default();
        let (style, diagnostics) = resolve(
            &meta(
                None,
                Some("hover:bg-red-500 not-a-class"),
                Some("font-size: -4px; width: 120px"),
            ),
            &ctx,
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].property, "font-size");
        assert_eq!(diagnostics[0].path.as_str(), "root");
        assert_eq!(style.text.font_size, 16.0);
        assert_eq!(style.box_model.width, Length::Px(120.0));
        assert_eq!(style.visual.background_color, None);
    }

    #[test]
    fn unitless_line_height_scales_with_child_font_size() {
        let _ = env_logger::builder().is_test(true).try_init();
        let ctx = ResolveContext::default();
        let (parent, _) = resolve(&meta(None, None, Some("line-height: 2; font-size: 10px")), &ctx);
        let (child, _) = resolve_node_style(
            &meta(None, None, Some("font-size: 20px")),
            &NodePath::root().child(0),
            &parent,
            &ctx,
        );
        assert_eq!(parent.text.line_height_px(), 20.0);
        assert_eq!(child.text.line_height_px(), 40.0);
        assert_eq!(ComputedStyle::default().text.line_height_px(), 16.0 * 1.2);
    }

    #[test]
    fn border_shorthand_and_current_color() {
        let _ = env_logger::builder().is_test(true).try_init();
        let ctx = ResolveContext::default();
        let bordered = meta(None, None, Some("color: #00ff00; border: 2px solid"));
        let (style, _) = resolve(&bordered, &ctx);
        assert_eq!(style.border.width, Edges::all(2.0));
        assert_eq!(style.border.color, Color::rgb(0, 255, 0));
        assert!(style.border.is_visible());

        let (hidden, _) = resolve(&meta(None, None, Some("border: 2px none red")), &ctx);
        assert_eq!(hidden.border.width, Edges::all(0.0));
    }

    #[test]
    fn identical_inputs_hash_identically() {
        let ctx = ResolveContext::default();
        let a = resolve(&meta(None, Some("p-4 text-lg"), None), &ctx).0;
        let b = resolve(&meta(None, Some("p-4 text-lg"), None), &ctx).0;
        assert_eq!(a, b);
        assert_eq!(a.hash_value(), b.hash_value());
    }
}
