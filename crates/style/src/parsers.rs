//! Low-level nom parser functions for CSS-like style values.
//!
//! This module provides composable parser functions for parsing style values
//! like dimensions, colors, and borders, plus the property dispatcher that
//! applies a single `name: value` declaration to an [`ElementStyle`].

use crate::border::{Border, BorderStyle};
use crate::dimension::{Dimension, SideValues};
use crate::element::ElementStyle;
use crate::font::FontWeight;
use crate::palette::css_named_color;
use crate::text::LineHeight;
use nom::branch::alt;
use nom::bytes::complete::{tag, tag_no_case};
use nom::character::complete::{alpha1, char, digit1, hex_digit1, one_of, space0, space1};
use nom::combinator::{map, map_opt, map_res, opt, recognize, value};
use nom::multi::separated_list1;
use nom::sequence::{delimited, preceded};
use nom::{IResult, Parser};
use pictor_types::Color;
use serde::de::DeserializeOwned;
use serde::de::IntoDeserializer;
use serde::de::value::{Error as ValueError, StrDeserializer};
use thiserror::Error;

/// Errors that can occur during style parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },

    #[error("Negative value not allowed for '{property}': {value}")]
    Negative { property: String, value: String },

    #[error("Float parse error: {0}")]
    FloatParse(String),

    #[error("Unknown property '{0}'")]
    UnknownProperty(String),
}

type ParseError<'a> = nom::error::Error<&'a str>;

// --- Helper Parsers ---

fn ws<'a, O, F>(inner: F) -> impl Parser<&'a str, Output = O, Error = ParseError<'a>>
where
    F: Parser<&'a str, Output = O, Error = ParseError<'a>>,
{
    delimited(space0, inner, space0)
}

pub fn parse_f32(input: &str) -> IResult<&str, f32> {
    map_res(
        recognize((
            opt(one_of("+-")),
            alt((
                recognize((digit1, opt((char('.'), digit1)))),
                recognize((char('.'), digit1)),
            )),
        )),
        |s: &str| s.parse::<f32>(),
    )
    .parse(input)
}

// --- Unit & Dimension Parsers ---

type UnitFn = fn(f32) -> Dimension;

fn parse_unit(input: &str) -> IResult<&str, UnitFn> {
    alt((
        value(Dimension::Px as UnitFn, tag_no_case("px")),
        value(Dimension::Percent as UnitFn, tag("%")),
        value(Dimension::Rem as UnitFn, tag_no_case("rem")),
        value(Dimension::Em as UnitFn, tag_no_case("em")),
        value(Dimension::Vw as UnitFn, tag_no_case("vw")),
        value(Dimension::Vh as UnitFn, tag_no_case("vh")),
        value((|v: f32| Dimension::Px(v * 96.0 / 72.0)) as UnitFn, tag_no_case("pt")),
    ))
    .parse(input)
}

/// Parses a dimension value: a number with an optional unit, or `auto`.
///
/// A bare number is interpreted as pixels.
pub fn parse_dimension(input: &str) -> IResult<&str, Dimension> {
    alt((
        value(Dimension::Auto, tag_no_case("auto")),
        map((parse_f32, opt(parse_unit)), |(v, unit)| {
            unit.map_or(Dimension::Px(v), |u| u(v))
        }),
    ))
    .parse(input)
}

/// Parses 1 to 4 whitespace-separated dimensions into edges.
pub fn parse_shorthand_sides(input: &str) -> Result<SideValues, StyleParseError> {
    let parts = run_parser(separated_list1(space1, parse_dimension), input)?;
    SideValues::from_shorthand(&parts).ok_or_else(|| {
        StyleParseError::Parse(format!(
            "Invalid number of values for edge shorthand: got {}, expected 1 to 4.",
            parts.len()
        ))
    })
}

// --- Color & Border Parsers ---

fn hex_color(input: &str) -> IResult<&str, Color> {
    map_res(recognize(preceded(char('#'), hex_digit1)), Color::from_hex).parse(input)
}

fn color_channel(input: &str) -> IResult<&str, u8> {
    map((parse_f32, opt(char('%'))), |(v, pct)| {
        let v = if pct.is_some() { v * 2.55 } else { v };
        v.round().clamp(0.0, 255.0) as u8
    })
    .parse(input)
}

fn alpha_channel(input: &str) -> IResult<&str, f32> {
    map((parse_f32, opt(char('%'))), |(v, pct)| {
        let v = if pct.is_some() { v / 100.0 } else { v };
        v.clamp(0.0, 1.0)
    })
    .parse(input)
}

fn channel_separator(input: &str) -> IResult<&str, char> {
    alt((ws(char(',')), value(' ', space1))).parse(input)
}

fn rgb_function(input: &str) -> IResult<&str, Color> {
    map(
        (
            alt((tag_no_case("rgba"), tag_no_case("rgb"))),
            ws(char('(')),
            color_channel,
            channel_separator,
            color_channel,
            channel_separator,
            color_channel,
            opt(preceded(alt((ws(char(',')), ws(char('/')))), alpha_channel)),
            ws(char(')')),
        ),
        |(_, _, r, _, g, _, b, a, _)| Color::rgba(r, g, b, a.unwrap_or(1.0)),
    )
    .parse(input)
}

fn named_color(input: &str) -> IResult<&str, Color> {
    map_opt(alpha1, css_named_color).parse(input)
}

/// Parses a color: `#rgb[a]`, `#rrggbb[aa]`, `rgb()`/`rgba()`, or a CSS name.
pub fn parse_color(input: &str) -> IResult<&str, Color> {
    alt((hex_color, rgb_function, named_color)).parse(input)
}

/// Parses a border style keyword.
pub fn parse_border_style(input: &str) -> IResult<&str, BorderStyle> {
    alt((
        value(BorderStyle::Solid, tag_no_case("solid")),
        value(BorderStyle::Dashed, tag_no_case("dashed")),
        value(BorderStyle::Dotted, tag_no_case("dotted")),
        value(BorderStyle::Double, tag_no_case("double")),
        value(BorderStyle::None, tag_no_case("none")),
        value(BorderStyle::None, tag_no_case("hidden")),
    ))
    .parse(input)
}

#[derive(Clone)]
enum BorderPart {
    Width(Dimension),
    Style(BorderStyle),
    Color(Color),
}

fn border_part(input: &str) -> IResult<&str, BorderPart> {
    alt((
        map(parse_border_style, BorderPart::Style),
        map(parse_dimension, BorderPart::Width),
        map(parse_color, BorderPart::Color),
    ))
    .parse(input)
}

/// Parses a CSS border shorthand (e.g., "2px solid #00ff00"), parts in any order.
pub fn parse_border(input: &str) -> IResult<&str, Border> {
    map(separated_list1(space1, border_part), |parts| {
        let mut border = Border::default();
        for part in parts {
            match part {
                BorderPart::Width(w) => border.width = Some(w),
                BorderPart::Style(s) => border.style = Some(s),
                BorderPart::Color(c) => border.color = Some(c),
            }
        }
        border
    })
    .parse(input)
}

fn parse_ratio(input: &str) -> IResult<&str, f32> {
    map_opt(
        (parse_f32, opt(preceded(ws(char('/')), parse_f32))),
        |(w, h)| match h {
            Some(h) if h > 0.0 => Some(w / h),
            Some(_) => None,
            None => Some(w),
        },
    )
    .parse(input)
}

/// Helper to run a nom parser and convert its result to a `Result<T, StyleParseError>`.
pub fn run_parser<'a, T, P>(mut parser: P, input: &'a str) -> Result<T, StyleParseError>
where
    P: Parser<&'a str, Output = T, Error = ParseError<'a>>,
{
    match parser.parse(input.trim()) {
        Ok(("", result)) => Ok(result),
        Ok((rem, _)) => Err(StyleParseError::Parse(format!(
            "Parser did not consume all input. Remainder: '{}'",
            rem
        ))),
        Err(e) => Err(StyleParseError::Parse(e.to_string())),
    }
}

// --- High-level Parse Functions ---

/// Parses a kebab-case keyword into one of the style enums.
pub fn parse_keyword<T: DeserializeOwned>(
    property: &str,
    value: &str,
) -> Result<T, StyleParseError> {
    let normalized = value.trim().to_ascii_lowercase();
    let deserializer: StrDeserializer<'_, ValueError> = normalized.as_str().into_deserializer();
    T::deserialize(deserializer).map_err(|_| invalid(property, value))
}

fn invalid(property: &str, value: &str) -> StyleParseError {
    StyleParseError::InvalidValue {
        property: property.to_string(),
        value: value.to_string(),
    }
}

fn parse_number(property: &str, value: &str) -> Result<f32, StyleParseError> {
    let number = run_parser(parse_f32, value).map_err(|_| {
        StyleParseError::FloatParse(format!("Invalid {} value: {}", property, value))
    })?;
    Ok(number)
}

fn non_negative_number(property: &str, value: &str) -> Result<f32, StyleParseError> {
    let number = parse_number(property, value)?;
    if number < 0.0 {
        return Err(negative(property, value));
    }
    Ok(number)
}

fn negative(property: &str, value: &str) -> StyleParseError {
    StyleParseError::Negative {
        property: property.to_string(),
        value: value.to_string(),
    }
}

fn dimension(value: &str) -> Result<Dimension, StyleParseError> {
    run_parser(parse_dimension, value)
}

fn non_negative_dimension(property: &str, value: &str) -> Result<Dimension, StyleParseError> {
    let parsed = dimension(value)?;
    if parsed.is_negative() {
        return Err(negative(property, value));
    }
    Ok(parsed)
}

/// Like [`non_negative_dimension`] but treats `none` as no limit.
fn max_dimension(property: &str, value: &str) -> Result<Dimension, StyleParseError> {
    if value.trim().eq_ignore_ascii_case("none") {
        return Ok(Dimension::Auto);
    }
    non_negative_dimension(property, value)
}

fn non_negative_sides(property: &str, value: &str) -> Result<SideValues, StyleParseError> {
    let sides = parse_shorthand_sides(value)?;
    if sides.any(|d| d.is_negative() || d.is_auto()) {
        return Err(invalid(property, value));
    }
    Ok(sides)
}

/// Parses a color value (see [`parse_color`]).
pub fn parse_color_value(value: &str) -> Result<Color, StyleParseError> {
    run_parser(parse_color, value)
}

pub fn parse_line_height(value: &str) -> Result<LineHeight, StyleParseError> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("normal") {
        return Ok(LineHeight::Normal);
    }
    let parsed = if let Ok(multiple) = run_parser(parse_f32, trimmed) {
        LineHeight::Multiple(multiple)
    } else {
        LineHeight::Length(dimension(trimmed)?)
    };
    match parsed {
        LineHeight::Multiple(m) if m < 0.0 => Err(negative("line-height", value)),
        LineHeight::Length(d) if d.is_negative() || d.is_auto() => {
            Err(invalid("line-height", value))
        }
        other => Ok(other),
    }
}

/// Expands the `flex` shorthand into grow, shrink and basis.
pub fn parse_flex_shorthand(value: &str) -> Result<(f32, f32, Dimension), StyleParseError> {
    let trimmed = value.trim().to_ascii_lowercase();
    match trimmed.as_str() {
        "none" => return Ok((0.0, 0.0, Dimension::Auto)),
        "auto" => return Ok((1.0, 1.0, Dimension::Auto)),
        "initial" => return Ok((0.0, 1.0, Dimension::Auto)),
        _ => {}
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    let result = match tokens.as_slice() {
        [grow] => match run_parser(parse_f32, grow) {
            Ok(g) => (g, 1.0, Dimension::Percent(0.0)),
            Err(_) => (1.0, 1.0, dimension(grow)?),
        },
        [grow, second] => {
            let g = parse_number("flex-grow", grow)?;
            match run_parser(parse_f32, second) {
                Ok(s) => (g, s, Dimension::Percent(0.0)),
                Err(_) => (g, 1.0, dimension(second)?),
            }
        }
        [grow, shrink, basis] => (
            parse_number("flex-grow", grow)?,
            parse_number("flex-shrink", shrink)?,
            dimension(basis)?,
        ),
        _ => return Err(invalid("flex", value)),
    };

    if result.0 < 0.0 || result.1 < 0.0 || result.2.is_negative() {
        return Err(negative("flex", value));
    }
    Ok(result)
}

fn parse_opacity(value: &str) -> Result<f32, StyleParseError> {
    let (v, pct) = run_parser((parse_f32, opt(char('%'))), value)?;
    let v = if pct.is_some() { v / 100.0 } else { v };
    Ok(v.clamp(0.0, 1.0))
}

/// Turns `backgroundColor` / `background_color` into `background-color`.
pub fn normalize_property_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.trim().chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else if c == '_' {
            out.push('-');
        } else {
            out.push(c);
        }
    }
    out
}

// --- High-level Style Application Functions ---

/// Applies a single parsed style property to an `ElementStyle` struct.
/// This is the central dispatcher for applying individual CSS-like properties.
///
/// `attr_name` may be kebab-case or camelCase.
pub fn apply_style_property(
    style: &mut ElementStyle,
    attr_name: &str,
    value: &str,
) -> Result<(), StyleParseError> {
    let name = normalize_property_name(attr_name);
    let prop = name.as_str();

    match prop {
        "display" => style.display = Some(parse_keyword(prop, value)?),
        "position" => style.position = Some(parse_keyword(prop, value)?),
        "inset" => style.inset.merge(&parse_shorthand_sides(value)?),
        "top" => style.inset.top = Some(dimension(value)?),
        "right" => style.inset.right = Some(dimension(value)?),
        "bottom" => style.inset.bottom = Some(dimension(value)?),
        "left" => style.inset.left = Some(dimension(value)?),

        "width" => style.width = Some(non_negative_dimension(prop, value)?),
        "height" => style.height = Some(non_negative_dimension(prop, value)?),
        "min-width" => style.min_width = Some(non_negative_dimension(prop, value)?),
        "min-height" => style.min_height = Some(non_negative_dimension(prop, value)?),
        "max-width" => style.max_width = Some(max_dimension(prop, value)?),
        "max-height" => style.max_height = Some(max_dimension(prop, value)?),
        "aspect-ratio" => {
            if value.trim().eq_ignore_ascii_case("auto") {
                style.aspect_ratio = None;
            } else {
                let ratio = run_parser(parse_ratio, value)?;
                if ratio <= 0.0 {
                    return Err(invalid(prop, value));
                }
                style.aspect_ratio = Some(ratio);
            }
        }

        "margin" => style.margin.merge(&parse_shorthand_sides(value)?),
        "margin-top" => style.margin.top = Some(dimension(value)?),
        "margin-right" => style.margin.right = Some(dimension(value)?),
        "margin-bottom" => style.margin.bottom = Some(dimension(value)?),
        "margin-left" => style.margin.left = Some(dimension(value)?),
        "padding" => style.padding.merge(&non_negative_sides(prop, value)?),
        "padding-top" => style.padding.top = Some(non_negative_dimension(prop, value)?),
        "padding-right" => style.padding.right = Some(non_negative_dimension(prop, value)?),
        "padding-bottom" => style.padding.bottom = Some(non_negative_dimension(prop, value)?),
        "padding-left" => style.padding.left = Some(non_negative_dimension(prop, value)?),

        "border" => {
            let border = run_parser(parse_border, value)?;
            if border.width.is_some_and(|w| w.is_negative()) {
                return Err(negative(prop, value));
            }
            let width = border.width.unwrap_or(Dimension::Px(1.0));
            style.border_width = SideValues::all(width);
            style.border_style = Some(border.style.unwrap_or_default());
            if let Some(color) = border.color {
                style.border_color = Some(color);
            }
        }
        "border-width" => style.border_width.merge(&non_negative_sides(prop, value)?),
        "border-top-width" => style.border_width.top = Some(non_negative_dimension(prop, value)?),
        "border-right-width" => {
            style.border_width.right = Some(non_negative_dimension(prop, value)?)
        }
        "border-bottom-width" => {
            style.border_width.bottom = Some(non_negative_dimension(prop, value)?)
        }
        "border-left-width" => style.border_width.left = Some(non_negative_dimension(prop, value)?),
        "border-style" => style.border_style = Some(run_parser(parse_border_style, value)?),
        "border-color" => style.border_color = Some(parse_color_value(value)?),
        "border-radius" => style.border_radius = Some(non_negative_dimension(prop, value)?),
        "background-color" | "background" => {
            style.background_color = Some(parse_color_value(value)?)
        }

        "flex-direction" => style.flex_direction = Some(parse_keyword(prop, value)?),
        "flex-wrap" => style.flex_wrap = Some(parse_keyword(prop, value)?),
        "justify-content" => style.justify_content = Some(parse_keyword(prop, value)?),
        "align-items" => style.align_items = Some(parse_keyword(prop, value)?),
        "align-content" => style.align_content = Some(parse_keyword(prop, value)?),
        "align-self" => style.align_self = Some(parse_keyword(prop, value)?),
        "gap" => {
            let gaps = run_parser(separated_list1(space1, parse_dimension), value)?;
            let (row, column) = match gaps.as_slice() {
                [both] => (*both, *both),
                [row, column] => (*row, *column),
                _ => return Err(invalid(prop, value)),
            };
            if row.is_negative() || column.is_negative() {
                return Err(negative(prop, value));
            }
            style.row_gap = Some(row);
            style.column_gap = Some(column);
        }
        "row-gap" => style.row_gap = Some(non_negative_dimension(prop, value)?),
        "column-gap" => style.column_gap = Some(non_negative_dimension(prop, value)?),
        "flex" => {
            let (grow, shrink, basis) = parse_flex_shorthand(value)?;
            style.flex_grow = Some(grow);
            style.flex_shrink = Some(shrink);
            style.flex_basis = Some(basis);
        }
        "flex-grow" => style.flex_grow = Some(non_negative_number(prop, value)?),
        "flex-shrink" => style.flex_shrink = Some(non_negative_number(prop, value)?),
        "flex-basis" => style.flex_basis = Some(non_negative_dimension(prop, value)?),

        "color" => style.color = Some(parse_color_value(value)?),
        "font-family" => {
            let family = value.trim();
            if family.is_empty() {
                return Err(invalid(prop, value));
            }
            style.font_family = Some(family.to_string());
        }
        "font-size" => {
            let size = non_negative_dimension(prop, value)?;
            if size.is_auto() {
                return Err(invalid(prop, value));
            }
            style.font_size = Some(size);
        }
        "font-weight" => {
            style.font_weight =
                Some(FontWeight::parse(value).map_err(|_| invalid(prop, value))?)
        }
        "font-style" => style.font_style = Some(parse_keyword(prop, value)?),
        "line-height" => style.line_height = Some(parse_line_height(value)?),
        "letter-spacing" => {
            style.letter_spacing = Some(if value.trim().eq_ignore_ascii_case("normal") {
                Dimension::ZERO
            } else {
                dimension(value)?
            })
        }
        "text-align" => style.text_align = Some(parse_keyword(prop, value)?),
        "text-decoration" | "text-decoration-line" => {
            let line = value.split_whitespace().next().unwrap_or_default();
            style.text_decoration = Some(parse_keyword(prop, line)?)
        }
        "text-transform" => style.text_transform = Some(parse_keyword(prop, value)?),
        "white-space" => style.white_space = Some(parse_keyword(prop, value)?),

        "opacity" => style.opacity = Some(parse_opacity(value)?),
        "overflow" | "overflow-x" | "overflow-y" => {
            style.overflow = Some(parse_keyword(prop, value)?)
        }
        "object-fit" => style.object_fit = Some(parse_keyword(prop, value)?),

        _ => return Err(StyleParseError::UnknownProperty(name)),
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flex::{FlexWrap, JustifyContent};
    use crate::text::WhiteSpace;

    #[test]
    fn test_parse_dimension() {
        assert_eq!(run_parser(parse_dimension, "12px").unwrap(), Dimension::Px(12.0));
        assert_eq!(run_parser(parse_dimension, "12").unwrap(), Dimension::Px(12.0));
        assert_eq!(run_parser(parse_dimension, "50%").unwrap(), Dimension::Percent(50.0));
        assert_eq!(run_parser(parse_dimension, "1.5em").unwrap(), Dimension::Em(1.5));
        assert_eq!(run_parser(parse_dimension, "2rem").unwrap(), Dimension::Rem(2.0));
        assert_eq!(run_parser(parse_dimension, "10vw").unwrap(), Dimension::Vw(10.0));
        assert_eq!(run_parser(parse_dimension, "-4px").unwrap(), Dimension::Px(-4.0));
        assert_eq!(run_parser(parse_dimension, "auto").unwrap(), Dimension::Auto);
        assert!(run_parser(parse_dimension, "50p").is_err());
        assert!(run_parser(parse_dimension, "abc").is_err());
    }

    #[test]
    fn test_parse_shorthand_sides() {
        let sides = parse_shorthand_sides("10px 20px").unwrap();
        assert_eq!(sides.top, Some(Dimension::Px(10.0)));
        assert_eq!(sides.left, Some(Dimension::Px(20.0)));

        let four = parse_shorthand_sides("1 2 3 4").unwrap();
        assert_eq!(four.bottom, Some(Dimension::Px(3.0)));
        assert_eq!(four.left, Some(Dimension::Px(4.0)));

        assert!(parse_shorthand_sides("1 2 3 4 5").is_err());
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color_value("#FF0000").unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(parse_color_value("#f00").unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(parse_color_value("rgb(0, 128, 255)").unwrap(), Color::rgb(0, 128, 255));
        assert_eq!(parse_color_value("rgb(0 128 255 / 50%)").unwrap().a, 0.5);
        assert_eq!(parse_color_value("rgba(10,20,30,0.25)").unwrap().a, 0.25);
        assert_eq!(parse_color_value("RebeccaPurple").unwrap(), Color::rgb(102, 51, 153));
        assert!(parse_color_value("transparent").unwrap().is_transparent());
        assert!(parse_color_value("not-a-color").is_err());
    }

    #[test]
    fn test_parse_border() {
        let border = run_parser(parse_border, "2px solid #00ff00").unwrap();
        assert_eq!(border.width, Some(Dimension::Px(2.0)));
        assert_eq!(border.style, Some(BorderStyle::Solid));
        assert_eq!(border.color, Some(Color::rgb(0, 255, 0)));

        let reordered = run_parser(parse_border, "red dashed 3px").unwrap();
        assert_eq!(reordered.width, Some(Dimension::Px(3.0)));
        assert_eq!(reordered.color, Some(Color::rgb(255, 0, 0)));
    }

    #[test]
    fn test_keywords_through_serde() {
        let justify: JustifyContent = parse_keyword("justify-content", "space-between").unwrap();
        assert_eq!(justify, JustifyContent::SpaceBetween);
        let start: JustifyContent = parse_keyword("justify-content", "start").unwrap();
        assert_eq!(start, JustifyContent::FlexStart);
        let wrap: FlexWrap = parse_keyword("flex-wrap", "nowrap").unwrap();
        assert_eq!(wrap, FlexWrap::NoWrap);
        let ws: WhiteSpace = parse_keyword("white-space", "pre-wrap").unwrap();
        assert_eq!(ws, WhiteSpace::PreWrap);
        assert!(parse_keyword::<JustifyContent>("justify-content", "middle").is_err());
    }

    #[test]
    fn test_flex_shorthand() {
        assert_eq!(parse_flex_shorthand("1").unwrap(), (1.0, 1.0, Dimension::Percent(0.0)));
        assert_eq!(parse_flex_shorthand("2 0 100px").unwrap(), (2.0, 0.0, Dimension::Px(100.0)));
        assert_eq!(parse_flex_shorthand("none").unwrap(), (0.0, 0.0, Dimension::Auto));
        assert!(parse_flex_shorthand("-1").is_err());
    }

    #[test]
    fn test_apply_rejects_negative_sizes() {
        let mut style = ElementStyle::default();
        assert!(matches!(
            apply_style_property(&mut style, "fontSize", "-3px"),
            Err(StyleParseError::Negative { .. })
        ));
        assert!(apply_style_property(&mut style, "width", "-10").is_err());
        assert!(apply_style_property(&mut style, "padding", "4px -1px").is_err());
        assert!(style.is_empty());

        apply_style_property(&mut style, "marginLeft", "-10px").unwrap();
        assert_eq!(style.margin.left, Some(Dimension::Px(-10.0)));
    }

    #[test]
    fn test_line_height_forms() {
        assert_eq!(parse_line_height("1.5").unwrap(), LineHeight::Multiple(1.5));
        assert_eq!(parse_line_height("24px").unwrap(), LineHeight::Length(Dimension::Px(24.0)));
        assert_eq!(parse_line_height("normal").unwrap(), LineHeight::Normal);
    }

    #[test]
    fn test_property_name_normalization() {
        assert_eq!(normalize_property_name("backgroundColor"), "background-color");
        assert_eq!(normalize_property_name("border_top_width"), "border-top-width");
        assert_eq!(normalize_property_name("justify-content"), "justify-content");
    }
}
