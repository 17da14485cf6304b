//! Utility-class shorthand (`"flex items-center p-4 bg-blue-500"`).
//!
//! Each token maps to one or more property assignments. Tokens the table does
//! not know, and tokens carrying a variant prefix such as `md:` or `hover:`,
//! are skipped.

use crate::dimension::{Dimension, SideValues};
use crate::element::ElementStyle;
use crate::flex::{AlignContent, AlignItems, AlignSelf, FlexDirection, FlexWrap, JustifyContent};
use crate::font::{FontStyle, FontWeight};
use crate::palette::palette_color;
use crate::parsers::{parse_color, parse_dimension, parse_f32, run_parser};
use crate::text::{LineHeight, TextAlign, TextDecoration, TextTransform, WhiteSpace};
use crate::visual::{Display, ObjectFit, Overflow, Position};
use pictor_types::Color;

/// Parses a whitespace-separated utility string into a style layer.
pub fn parse_utility_classes(classes: &str) -> ElementStyle {
    let mut style = ElementStyle::default();
    for token in classes.split_whitespace() {
        if has_variant(token) {
            log::debug!("Skipping utility '{}' with variant prefix", token);
            continue;
        }
        let token = token.trim_start_matches('!');
        if !apply_utility(&mut style, token) {
            log::debug!("Unknown utility class '{}'", token);
        }
    }
    style
}

fn has_variant(token: &str) -> bool {
    let head = token.split('[').next().unwrap_or(token);
    head.contains(':')
}

/// Content of a `[...]` arbitrary value, with `_` standing for a space.
fn arbitrary(value: &str) -> Option<String> {
    value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .map(|v| v.replace('_', " "))
}

/// The spacing scale: `4` is 16px, `px` is 1px, `[13px]` is taken literally.
fn spacing(value: &str) -> Option<Dimension> {
    if value == "px" {
        return Some(Dimension::Px(1.0));
    }
    if let Some(raw) = arbitrary(value) {
        return run_parser(parse_dimension, &raw).ok();
    }
    let steps = run_parser(parse_f32, value).ok()?;
    (steps >= 0.0).then_some(Dimension::Px(steps * 4.0))
}

fn fraction(value: &str) -> Option<Dimension> {
    let (num, den) = value.split_once('/')?;
    let num: f32 = num.parse().ok()?;
    let den: f32 = den.parse().ok()?;
    (den > 0.0).then_some(Dimension::Percent(num / den * 100.0))
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

fn size(value: &str, axis: Axis) -> Option<Dimension> {
    match value {
        "full" => Some(Dimension::Percent(100.0)),
        "auto" | "min" | "max" | "fit" | "none" => Some(Dimension::Auto),
        "screen" => Some(match axis {
            Axis::Horizontal => Dimension::Vw(100.0),
            Axis::Vertical => Dimension::Vh(100.0),
        }),
        _ => fraction(value).or_else(|| spacing(value)),
    }
}

fn max_width_scale(value: &str) -> Option<Dimension> {
    let px = match value {
        "xs" => 320.0,
        "sm" => 384.0,
        "md" => 448.0,
        "lg" => 512.0,
        "xl" => 576.0,
        "2xl" => 672.0,
        "3xl" => 768.0,
        "4xl" => 896.0,
        "5xl" => 1024.0,
        "6xl" => 1152.0,
        "7xl" => 1280.0,
        _ => return None,
    };
    Some(Dimension::Px(px))
}

/// Palette color with an optional `/NN` opacity modifier.
fn color(value: &str) -> Option<Color> {
    let (name, alpha) = match value.rsplit_once('/') {
        Some((name, pct)) if !name.starts_with('[') || name.ends_with(']') => {
            (name, Some(pct.parse::<f32>().ok()? / 100.0))
        }
        _ => (value, None),
    };
    let base = match arbitrary(name) {
        Some(raw) => run_parser(parse_color, &raw).ok()?,
        None => palette_color(name)?,
    };
    Some(match alpha {
        Some(a) => base.with_alpha(base.a * a),
        None => base,
    })
}

/// Font size and matching line height for the `text-*` scale.
fn text_size(value: &str) -> Option<(Dimension, LineHeight)> {
    let (size, leading) = match value {
        "xs" => (12.0, LineHeight::Length(Dimension::Px(16.0))),
        "sm" => (14.0, LineHeight::Length(Dimension::Px(20.0))),
        "base" => (16.0, LineHeight::Length(Dimension::Px(24.0))),
        "lg" => (18.0, LineHeight::Length(Dimension::Px(28.0))),
        "xl" => (20.0, LineHeight::Length(Dimension::Px(28.0))),
        "2xl" => (24.0, LineHeight::Length(Dimension::Px(32.0))),
        "3xl" => (30.0, LineHeight::Length(Dimension::Px(36.0))),
        "4xl" => (36.0, LineHeight::Length(Dimension::Px(40.0))),
        "5xl" => (48.0, LineHeight::Multiple(1.0)),
        "6xl" => (60.0, LineHeight::Multiple(1.0)),
        "7xl" => (72.0, LineHeight::Multiple(1.0)),
        "8xl" => (96.0, LineHeight::Multiple(1.0)),
        "9xl" => (128.0, LineHeight::Multiple(1.0)),
        _ => return None,
    };
    Some((Dimension::Px(size), leading))
}

fn radius(value: &str) -> Option<Dimension> {
    let px = match value {
        "" => 4.0,
        "none" => 0.0,
        "sm" => 2.0,
        "md" => 6.0,
        "lg" => 8.0,
        "xl" => 12.0,
        "2xl" => 16.0,
        "3xl" => 24.0,
        "full" => 9999.0,
        other => return arbitrary(other).and_then(|raw| run_parser(parse_dimension, &raw).ok()),
    };
    Some(Dimension::Px(px))
}

fn font_weight(value: &str) -> Option<FontWeight> {
    Some(match value {
        "thin" => FontWeight::Thin,
        "extralight" => FontWeight::ExtraLight,
        "light" => FontWeight::Light,
        "normal" => FontWeight::Regular,
        "medium" => FontWeight::Medium,
        "semibold" => FontWeight::SemiBold,
        "bold" => FontWeight::Bold,
        "extrabold" => FontWeight::ExtraBold,
        "black" => FontWeight::Black,
        _ => return None,
    })
}

fn leading(value: &str) -> Option<LineHeight> {
    Some(match value {
        "none" => LineHeight::Multiple(1.0),
        "tight" => LineHeight::Multiple(1.25),
        "snug" => LineHeight::Multiple(1.375),
        "normal" => LineHeight::Multiple(1.5),
        "relaxed" => LineHeight::Multiple(1.625),
        "loose" => LineHeight::Multiple(2.0),
        other => LineHeight::Length(spacing(other)?),
    })
}

fn tracking(value: &str) -> Option<Dimension> {
    Some(Dimension::Em(match value {
        "tighter" => -0.05,
        "tight" => -0.025,
        "normal" => 0.0,
        "wide" => 0.025,
        "wider" => 0.05,
        "widest" => 0.1,
        other => return arbitrary(other).and_then(|raw| run_parser(parse_dimension, &raw).ok()),
    }))
}

fn border_width(value: &str) -> Option<Dimension> {
    match value {
        "" => Some(Dimension::Px(1.0)),
        other => match other.parse::<f32>() {
            Ok(w) if w >= 0.0 => Some(Dimension::Px(w)),
            _ => arbitrary(other).and_then(|raw| run_parser(parse_dimension, &raw).ok()),
        },
    }
}

/// Sets the edges selected by a spacing suffix (`""`, `x`, `t`, ...).
fn edges(sides: &mut SideValues, selector: &str, value: Dimension) -> bool {
    match selector {
        "" => *sides = SideValues::all(value),
        "x" => sides.merge(&SideValues::x(value)),
        "y" => sides.merge(&SideValues::y(value)),
        "t" => sides.top = Some(value),
        "r" => sides.right = Some(value),
        "b" => sides.bottom = Some(value),
        "l" => sides.left = Some(value),
        _ => return false,
    }
    true
}

/// Applies one utility token. Returns `false` if the token is unknown.
fn apply_utility(style: &mut ElementStyle, token: &str) -> bool {
    if apply_keyword(style, token) {
        return true;
    }

    let (negative, token) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token),
    };
    let sign = |d: Dimension| if negative { d.negate() } else { d };

    let Some((prefix, value)) = split_prefix(token) else {
        return false;
    };

    match prefix {
        "p" | "px" | "py" | "pt" | "pr" | "pb" | "pl" if !negative => {
            spacing(value).is_some_and(|d| edges(&mut style.padding, &prefix[1..], d))
        }
        "m" | "mx" | "my" | "mt" | "mr" | "mb" | "ml" => {
            let dim = if value == "auto" {
                Some(Dimension::Auto)
            } else {
                spacing(value).map(sign)
            };
            dim.is_some_and(|d| edges(&mut style.margin, &prefix[1..], d))
        }
        "gap" => {
            set(&mut style.row_gap, spacing(value)) && set(&mut style.column_gap, spacing(value))
        }
        "gap-x" => set(&mut style.column_gap, spacing(value)),
        "gap-y" => set(&mut style.row_gap, spacing(value)),
        "w" => set(&mut style.width, size(value, Axis::Horizontal)),
        "h" => set(&mut style.height, size(value, Axis::Vertical)),
        "size" => {
            set(&mut style.width, size(value, Axis::Horizontal))
                && set(&mut style.height, size(value, Axis::Vertical))
        }
        "min-w" => set(&mut style.min_width, size(value, Axis::Horizontal)),
        "min-h" => set(&mut style.min_height, size(value, Axis::Vertical)),
        "max-w" => set(
            &mut style.max_width,
            max_width_scale(value).or_else(|| size(value, Axis::Horizontal)),
        ),
        "max-h" => set(&mut style.max_height, size(value, Axis::Vertical)),
        "basis" => set(&mut style.flex_basis, size(value, Axis::Horizontal)),
        "grow" => set(&mut style.flex_grow, value.parse().ok()),
        "shrink" => set(&mut style.flex_shrink, value.parse().ok()),
        "inset" => spacing_or_size(value).map(sign).is_some_and(|d| {
            style.inset = SideValues::all(d);
            true
        }),
        "inset-x" => spacing_or_size(value).map(sign).is_some_and(|d| {
            style.inset.merge(&SideValues::x(d));
            true
        }),
        "inset-y" => spacing_or_size(value).map(sign).is_some_and(|d| {
            style.inset.merge(&SideValues::y(d));
            true
        }),
        "top" => set(&mut style.inset.top, spacing_or_size(value).map(sign)),
        "right" => set(&mut style.inset.right, spacing_or_size(value).map(sign)),
        "bottom" => set(&mut style.inset.bottom, spacing_or_size(value).map(sign)),
        "left" => set(&mut style.inset.left, spacing_or_size(value).map(sign)),
        "text" => {
            if let Some((size, leading)) = text_size(value) {
                style.font_size = Some(size);
                style.line_height = Some(leading);
                true
            } else if let Some(c) = color(value) {
                style.color = Some(c);
                true
            } else {
                arbitrary(value)
                    .and_then(|raw| run_parser(parse_dimension, &raw).ok())
                    .is_some_and(|d| {
                        style.font_size = Some(d);
                        true
                    })
            }
        }
        "bg" => set(&mut style.background_color, color(value)),
        "border" => {
            if let Some(c) = color(value) {
                style.border_color = Some(c);
                true
            } else {
                border_width(value).is_some_and(|w| {
                    style.border_width = SideValues::all(w);
                    true
                })
            }
        }
        "border-t" | "border-r" | "border-b" | "border-l" | "border-x" | "border-y" => {
            border_width(value).is_some_and(|w| edges(&mut style.border_width, &prefix[7..], w))
        }
        "rounded" => set(&mut style.border_radius, radius(value)),
        "opacity" => set(
            &mut style.opacity,
            value.parse::<f32>().ok().map(|v| (v / 100.0).clamp(0.0, 1.0)),
        ),
        "font" => {
            if let Some(weight) = font_weight(value) {
                style.font_weight = Some(weight);
                true
            } else {
                arbitrary(value).is_some_and(|family| {
                    style.font_family = Some(family);
                    true
                })
            }
        }
        "leading" => set(&mut style.line_height, leading(value)),
        "tracking" => set(&mut style.letter_spacing, tracking(value).map(sign)),
        "aspect" => set(
            &mut style.aspect_ratio,
            match value {
                "square" => Some(1.0),
                "video" => Some(16.0 / 9.0),
                other => arbitrary(other).and_then(|raw| {
                    let (w, h) = raw.split_once('/')?;
                    let (w, h): (f32, f32) = (w.trim().parse().ok()?, h.trim().parse().ok()?);
                    (h > 0.0).then_some(w / h)
                }),
            },
        ),
        _ => false,
    }
}

fn spacing_or_size(value: &str) -> Option<Dimension> {
    size(value, Axis::Horizontal)
}

fn set<T>(slot: &mut Option<T>, value: Option<T>) -> bool {
    match value {
        Some(v) => {
            *slot = Some(v);
            true
        }
        None => false,
    }
}

const PREFIXES: &[&str] = &[
    "border-t", "border-r", "border-b", "border-l", "border-x", "border-y", "min-w", "min-h",
    "max-w", "max-h", "inset-x", "inset-y", "gap-x", "gap-y", "tracking", "leading", "rounded",
    "opacity", "border", "bottom", "aspect", "shrink", "basis", "inset", "right", "size", "grow",
    "font", "text", "left", "top", "gap", "bg", "px", "py", "pt", "pr", "pb", "pl", "mx", "my",
    "mt", "mr", "mb", "ml", "p", "m", "w", "h",
];

/// Prefixes that are complete utilities on their own, with their implied value.
const BARE: &[(&str, &str)] = &[
    ("rounded", ""),
    ("border", ""),
    ("border-t", ""),
    ("border-r", ""),
    ("border-b", ""),
    ("border-l", ""),
    ("border-x", ""),
    ("border-y", ""),
    ("grow", "1"),
    ("shrink", "1"),
];

/// Splits `px-4` into (`px`, `4`).
fn split_prefix(token: &str) -> Option<(&str, &str)> {
    if let Some(&(prefix, value)) = BARE.iter().find(|(prefix, _)| *prefix == token) {
        return Some((prefix, value));
    }
    PREFIXES.iter().find_map(|prefix| {
        token
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('-'))
            .map(|rest| (*prefix, rest))
    })
}

/// Value-less utilities.
fn apply_keyword(style: &mut ElementStyle, token: &str) -> bool {
    match token {
        "flex" => style.display = Some(Display::Flex),
        "hidden" => style.display = Some(Display::None),
        "flex-row" => style.flex_direction = Some(FlexDirection::Row),
        "flex-row-reverse" => style.flex_direction = Some(FlexDirection::RowReverse),
        "flex-col" => style.flex_direction = Some(FlexDirection::Column),
        "flex-col-reverse" => style.flex_direction = Some(FlexDirection::ColumnReverse),
        "flex-wrap" => style.flex_wrap = Some(FlexWrap::Wrap),
        "flex-wrap-reverse" => style.flex_wrap = Some(FlexWrap::WrapReverse),
        "flex-nowrap" => style.flex_wrap = Some(FlexWrap::NoWrap),
        "flex-1" => flex(style, 1.0, 1.0, Dimension::Percent(0.0)),
        "flex-auto" => flex(style, 1.0, 1.0, Dimension::Auto),
        "flex-initial" => flex(style, 0.0, 1.0, Dimension::Auto),
        "flex-none" => flex(style, 0.0, 0.0, Dimension::Auto),
        "justify-start" => style.justify_content = Some(JustifyContent::FlexStart),
        "justify-end" => style.justify_content = Some(JustifyContent::FlexEnd),
        "justify-center" => style.justify_content = Some(JustifyContent::Center),
        "justify-between" => style.justify_content = Some(JustifyContent::SpaceBetween),
        "justify-around" => style.justify_content = Some(JustifyContent::SpaceAround),
        "justify-evenly" => style.justify_content = Some(JustifyContent::SpaceEvenly),
        "items-start" => style.align_items = Some(AlignItems::FlexStart),
        "items-end" => style.align_items = Some(AlignItems::FlexEnd),
        "items-center" => style.align_items = Some(AlignItems::Center),
        "items-baseline" => style.align_items = Some(AlignItems::Baseline),
        "items-stretch" => style.align_items = Some(AlignItems::Stretch),
        "self-auto" => style.align_self = Some(AlignSelf::Auto),
        "self-start" => style.align_self = Some(AlignSelf::FlexStart),
        "self-end" => style.align_self = Some(AlignSelf::FlexEnd),
        "self-center" => style.align_self = Some(AlignSelf::Center),
        "self-stretch" => style.align_self = Some(AlignSelf::Stretch),
        "self-baseline" => style.align_self = Some(AlignSelf::Baseline),
        "content-start" => style.align_content = Some(AlignContent::FlexStart),
        "content-end" => style.align_content = Some(AlignContent::FlexEnd),
        "content-center" => style.align_content = Some(AlignContent::Center),
        "content-between" => style.align_content = Some(AlignContent::SpaceBetween),
        "content-around" => style.align_content = Some(AlignContent::SpaceAround),
        "content-evenly" => style.align_content = Some(AlignContent::SpaceEvenly),
        "content-stretch" => style.align_content = Some(AlignContent::Stretch),
        "absolute" => style.position = Some(Position::Absolute),
        "relative" | "static" => style.position = Some(Position::Relative),
        "overflow-hidden" | "overflow-clip" => style.overflow = Some(Overflow::Hidden),
        "overflow-visible" => style.overflow = Some(Overflow::Visible),
        "object-fill" => style.object_fit = Some(ObjectFit::Fill),
        "object-contain" => style.object_fit = Some(ObjectFit::Contain),
        "object-cover" => style.object_fit = Some(ObjectFit::Cover),
        "object-none" => style.object_fit = Some(ObjectFit::None),
        "object-scale-down" => style.object_fit = Some(ObjectFit::ScaleDown),
        "text-left" | "text-start" => style.text_align = Some(TextAlign::Left),
        "text-center" => style.text_align = Some(TextAlign::Center),
        "text-right" | "text-end" => style.text_align = Some(TextAlign::Right),
        "text-justify" => style.text_align = Some(TextAlign::Justify),
        "italic" => style.font_style = Some(FontStyle::Italic),
        "not-italic" => style.font_style = Some(FontStyle::Normal),
        "underline" => style.text_decoration = Some(TextDecoration::Underline),
        "line-through" => style.text_decoration = Some(TextDecoration::LineThrough),
        "no-underline" => style.text_decoration = Some(TextDecoration::None),
        "uppercase" => style.text_transform = Some(TextTransform::Uppercase),
        "lowercase" => style.text_transform = Some(TextTransform::Lowercase),
        "capitalize" => style.text_transform = Some(TextTransform::Capitalize),
        "normal-case" => style.text_transform = Some(TextTransform::None),
        "whitespace-normal" => style.white_space = Some(WhiteSpace::Normal),
        "whitespace-nowrap" => style.white_space = Some(WhiteSpace::NoWrap),
        "whitespace-pre" => style.white_space = Some(WhiteSpace::Pre),
        "whitespace-pre-wrap" => style.white_space = Some(WhiteSpace::PreWrap),
        "truncate" => style.white_space = Some(WhiteSpace::NoWrap),
        _ => return false,
    }
    true
}

fn flex(style: &mut ElementStyle, grow: f32, shrink: f32, basis: Dimension) {
    style.flex_grow = Some(grow);
    style.flex_shrink = Some(shrink);
    style.flex_basis = Some(basis);
}
