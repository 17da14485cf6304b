//! The document tree handed to the renderer.
//!
//! On the wire a node is a JSON object tagged by `type`:
//!
//! ```json
//! { "type": "container", "tw": "flex p-4", "children": [
//!     { "type": "text", "text": "Hello", "style": { "fontSize": 32 } },
//!     { "type": "image", "src": "logo.png", "width": 64, "height": 64 }
//! ] }
//! ```
//!
//! Fields the renderer does not use (`key`, `props`, ...) are ignored.

mod error;

pub use error::NodeError;

use pictor_style::{StyleDeclarations, StyleMap};
use pictor_types::NodePath;
use serde::{Deserialize, Serialize};

/// A style layer: either a property map or an inline CSS string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Map(StyleMap),
    Css(String),
}

impl StyleValue {
    pub fn parse(&self) -> StyleDeclarations {
        match self {
            StyleValue::Map(map) => StyleDeclarations::from_map(map),
            StyleValue::Css(css) => StyleDeclarations::from_css(css),
        }
    }
}

impl From<StyleMap> for StyleValue {
    fn from(map: StyleMap) -> Self {
        StyleValue::Map(map)
    }
}

/// Style inputs shared by every node kind.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeMeta {
    /// Base layer, overridden by `tw` and `style`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<StyleValue>,
    /// Explicit declarations; the highest-precedence layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleValue>,
    /// Utility-class string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tw: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Container {
        #[serde(flatten)]
        meta: NodeMeta,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        children: Option<Vec<Node>>,
    },
    Text {
        #[serde(flatten)]
        meta: NodeMeta,
        #[serde(default)]
        text: String,
    },
    Image {
        #[serde(flatten)]
        meta: NodeMeta,
        src: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<f32>,
    },
}

impl Node {
    pub fn container(children: Vec<Node>) -> Self {
        Node::Container {
            meta: NodeMeta::default(),
            children: Some(children),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text {
            meta: NodeMeta::default(),
            text: text.into(),
        }
    }

    pub fn image(src: impl Into<String>) -> Self {
        Node::Image {
            meta: NodeMeta::default(),
            src: src.into(),
            width: None,
            height: None,
        }
    }

    /// Parses the JSON wire format.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn meta(&self) -> &NodeMeta {
        match self {
            Node::Container { meta, .. }
            | Node::Text { meta, .. }
            | Node::Image { meta, .. } => meta,
        }
    }

    pub fn meta_mut(&mut self) -> &mut NodeMeta {
        match self {
            Node::Container { meta, .. }
            | Node::Text { meta, .. }
            | Node::Image { meta, .. } => meta,
        }
    }

    /// Children of a container; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Container { children: Some(children), .. } => children,
            _ => &[],
        }
    }

    pub fn with_style(mut self, style: StyleMap) -> Self {
        self.meta_mut().style = Some(StyleValue::Map(style));
        self
    }

    pub fn with_preset(mut self, preset: StyleMap) -> Self {
        self.meta_mut().preset = Some(StyleValue::Map(preset));
        self
    }

    pub fn with_tw(mut self, tw: impl Into<String>) -> Self {
        self.meta_mut().tw = Some(tw.into());
        self
    }

    /// Sets the explicit size of an image node. No effect on other kinds.
    pub fn with_size(mut self, w: Option<f32>, h: Option<f32>) -> Self {
        if let Node::Image { width, height, .. } = &mut self {
            *width = w;
            *height = h;
        }
        self
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Node::Container { .. } => "container",
            Node::Text { .. } => "text",
            Node::Image { .. } => "image",
        }
    }

    /// Total number of nodes in this subtree.
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(Node::count).sum::<usize>()
    }

    pub fn contains_text(&self) -> bool {
        match self {
            Node::Text { .. } => true,
            _ => self.children().iter().any(Node::contains_text),
        }
    }

    /// Rejects structurally invalid input before any layout work happens.
    pub fn validate(&self) -> Result<(), NodeError> {
        self.validate_at(&NodePath::root())
    }

    fn validate_at(&self, path: &NodePath) -> Result<(), NodeError> {
        match self {
            Node::Container { children, .. } => {
                for (index, child) in children.iter().flatten().enumerate() {
                    child.validate_at(&path.child(index))?;
                }
            }
            Node::Text { .. } => {}
            Node::Image { src, width, height, .. } => {
                if src.trim().is_empty() {
                    return Err(NodeError::EmptySource { path: path.clone() });
                }
                for (field, value) in [("width", width), ("height", height)] {
                    match value {
                        Some(v) if !v.is_finite() || *v < 0.0 => {
                            return Err(NodeError::InvalidDimension {
                                path: path.clone(),
                                field,
                                value: *v,
                            });
                        }
                        _ => {}
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_wire_format_and_ignores_unknown_fields() {
        let node = Node::from_json(
            r#"{
                "type": "container",
                "key": null,
                "props": {},
                "tw": "flex",
                "children": [
                    { "type": "text", "text": "hi", "children": null, "style": { "color": "red" } },
                    { "type": "image", "src": "a.png", "width": 10, "height": 12.5 }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(node.meta().tw.as_deref(), Some("flex"));
        assert_eq!(node.children().len(), 2);
        assert_eq!(node.count(), 3);
        match &node.children()[1] {
            Node::Image { src, width, height, .. } => {
                assert_eq!(src, "a.png");
                assert_eq!((*width, *height), (Some(10.0), Some(12.5)));
            }
            other => panic!("expected image, got {}", other.kind()),
        }
        assert!(node.contains_text());
    }

    #[test]
    fn null_children_means_empty() {
        let node = Node::from_json(r#"{ "type": "container", "children": null }"#).unwrap();
        assert!(node.children().is_empty());
    }

    #[test]
    fn style_may_be_inline_css() {
        let json = r#"{ "type": "text", "text": "x", "style": "color: blue" }"#;
        let node = Node::from_json(json).unwrap();
        let parsed = node.meta().style.as_ref().unwrap().parse();
        assert!(parsed.errors.is_empty());
        assert!(parsed.style.color.is_some());
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!(Node::from_json(r#"{ "type": "video", "src": "x" }"#).is_err());
    }

    #[test]
    fn validation_reports_node_path() {
        let tree = Node::container(vec![
            Node::text("ok"),
            Node::container(vec![Node::image("x.png").with_size(Some(-1.0), None)]),
        ]);
        let err = tree.validate().unwrap_err();
        assert_eq!(
            err,
            NodeError::InvalidDimension {
                path: NodePath::root().child(1).child(0),
                field: "width",
                value: -1.0
            }
        );
        assert!(err.to_string().contains("root/1/0"));
    }

    #[test]
    fn builders_round_trip_through_json() {
        let style = match json!({ "width": 10 }) {
            serde_json::Value::Object(m) => m,
            _ => unreachable!(),
        };
        let node = Node::text("hello").with_style(style).with_tw("text-center");
        let back = Node::from_json(&node.to_json().unwrap()).unwrap();
        assert_eq!(back, node);
    }
}
