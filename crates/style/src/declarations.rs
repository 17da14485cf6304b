//! Turns a raw style map (`{"fontSize": 24, "padding": "4px 8px"}`) into an
//! [`ElementStyle`], collecting per-property failures instead of aborting.

use crate::element::ElementStyle;
use crate::parsers::{StyleParseError, apply_style_property};
use pictor_types::{Color, NodePath};
use serde_json::{Map, Value};
use std::fmt;

/// The style object as it appears on the wire, in declaration order.
pub type StyleMap = Map<String, Value>;

/// A declaration that could not be applied.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyError {
    pub property: String,
    pub error: StyleParseError,
}

/// A non-fatal style problem attached to the node that declared it.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDiagnostic {
    pub path: NodePath,
    pub property: String,
    pub message: String,
}

impl StyleDiagnostic {
    pub fn from_error(path: &NodePath, error: &PropertyError) -> Self {
        Self {
            path: path.clone(),
            property: error.property.clone(),
            message: error.error.to_string(),
        }
    }
}

impl fmt::Display for StyleDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.path, self.property, self.message)
    }
}

/// The parsed form of one style layer.
#[derive(Debug, Clone, Default)]
pub struct StyleDeclarations {
    pub style: ElementStyle,
    pub errors: Vec<PropertyError>,
}

impl StyleDeclarations {
    /// Applies every entry of `map` in order. Later entries win.
    ///
    /// Unknown property names are logged and skipped; malformed values are
    /// recorded in `errors` and leave the property unset.
    pub fn from_map(map: &StyleMap) -> Self {
        let mut parsed = Self::default();
        for (name, raw) in map {
            let Some(value) = value_to_css(raw) else {
                continue;
            };
            match value.and_then(|v| apply_style_property(&mut parsed.style, name, &v)) {
                Ok(()) => {}
                Err(StyleParseError::UnknownProperty(prop)) => {
                    log::debug!("Ignoring unsupported style property '{}'", prop);
                }
                Err(error) => parsed.errors.push(PropertyError {
                    property: name.clone(),
                    error,
                }),
            }
        }
        parsed
    }

    /// Parses an inline `key: value; ...` declaration block.
    pub fn from_css(css: &str) -> Self {
        let map: StyleMap = css
            .split(';')
            .filter_map(|declaration| declaration.split_once(':'))
            .map(|(key, value)| (key.trim().to_string(), Value::String(value.trim().to_string())))
            .collect();
        Self::from_map(&map)
    }
}

/// Renders a JSON style value as CSS text. `None` means "unset".
fn value_to_css(raw: &Value) -> Option<Result<String, StyleParseError>> {
    match raw {
        Value::Null => None,
        Value::String(s) => Some(Ok(s.clone())),
        Value::Number(n) => Some(Ok(n.to_string())),
        Value::Array(items) => {
            let parts: Result<Vec<String>, StyleParseError> = items
                .iter()
                .filter_map(value_to_css)
                .collect();
            Some(parts.map(|p| p.join(" ")))
        }
        Value::Object(_) => Some(
            serde_json::from_value::<Color>(raw.clone())
                .map(|c| format!("rgba({}, {}, {}, {})", c.r, c.g, c.b, c.a))
                .map_err(|e| StyleParseError::Parse(e.to_string())),
        ),
        Value::Bool(b) => Some(Err(StyleParseError::Parse(format!(
            "Boolean '{}' is not a style value",
            b
        )))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::Dimension;
    use crate::flex::JustifyContent;
    use serde_json::json;

    fn map(value: Value) -> StyleMap {
        match value {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn numbers_are_pixels_and_keys_may_be_camel_case() {
        let parsed = StyleDeclarations::from_map(&map(json!({
            "width": 120,
            "fontSize": "1.5rem",
            "justifyContent": "center",
            "padding": [4, 8],
        })));
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.style.width, Some(Dimension::Px(120.0)));
        assert_eq!(parsed.style.font_size, Some(Dimension::Rem(1.5)));
        assert_eq!(parsed.style.justify_content, Some(JustifyContent::Center));
        assert_eq!(parsed.style.padding.left, Some(Dimension::Px(8.0)));
    }

    #[test]
    fn bad_values_become_errors_without_aborting() {
        let parsed = StyleDeclarations::from_map(&map(json!({
            "fontSize": -4,
            "color": "#123456",
            "boxShadow": "0 0 4px black",
            "width": true,
        })));
        let failed: Vec<&str> = parsed.errors.iter().map(|e| e.property.as_str()).collect();
        assert_eq!(failed, vec!["fontSize", "width"]);
        assert_eq!(parsed.style.font_size, None);
        assert_eq!(parsed.style.color, Some(Color::rgb(0x12, 0x34, 0x56)));
    }

    #[test]
    fn declaration_order_decides_conflicts() {
        let parsed = StyleDeclarations::from_map(&map(json!({
            "padding": 10,
            "paddingLeft": 2,
        })));
        assert_eq!(parsed.style.padding.left, Some(Dimension::Px(2.0)));
        assert_eq!(parsed.style.padding.right, Some(Dimension::Px(10.0)));
    }

    #[test]
    fn inline_css() {
        let parsed = StyleDeclarations::from_css("color: red; background-color: #00f;");
        assert_eq!(parsed.style.color, Some(Color::rgb(255, 0, 0)));
        assert_eq!(parsed.style.background_color, Some(Color::rgb(0, 0, 255)));
    }
}
