//! The styled tree: every visible node paired with its computed style.

use crate::style::{ComputedStyle, ResolveContext, resolve_node_style};
use crate::text::prepare_text;
use pictor_node::Node;
use pictor_style::{Display, StyleDiagnostic};
use pictor_types::NodePath;
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum StyledContent {
    Container(Vec<StyledNode>),
    /// Text after whitespace processing and `text-transform`.
    Text(String),
    /// `width`/`height` are already in device pixels.
    Image {
        src: String,
        width: Option<f32>,
        height: Option<f32>,
    },
}

#[derive(Debug, Clone)]
pub struct StyledNode {
    pub path: NodePath,
    pub style: Arc<ComputedStyle>,
    pub content: StyledContent,
}

impl StyledNode {
    /// Distinct image sources in this subtree, in sorted order.
    pub fn image_sources(&self) -> BTreeSet<&str> {
        let mut sources = BTreeSet::new();
        self.collect_sources(&mut sources);
        sources
    }

    fn collect_sources<'a>(&'a self, sources: &mut BTreeSet<&'a str>) {
        match &self.content {
            StyledContent::Container(children) => {
                for child in children {
                    child.collect_sources(sources);
                }
            }
            StyledContent::Image { src, .. } => {
                sources.insert(src.as_str());
            }
            StyledContent::Text(_) => {}
        }
    }

    pub fn children(&self) -> &[StyledNode] {
        match &self.content {
            StyledContent::Container(children) => children,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StyledTree {
    /// `None` when the root is `display: none`.
    pub root: Option<StyledNode>,
    pub diagnostics: Vec<StyleDiagnostic>,
}

/// Resolves the style of every node, top-down. Subtrees under
/// `display: none` are dropped without resolving their descendants.
pub fn style_tree(root: &Node, ctx: &ResolveContext) -> StyledTree {
    let mut diagnostics = Vec::new();
    let root_style = ctx.root_style();
    let root = style_node(root, NodePath::root(), &root_style, ctx, &mut diagnostics);
    StyledTree { root, diagnostics }
}

fn style_node(
    node: &Node,
    path: NodePath,
    parent: &ComputedStyle,
    ctx: &ResolveContext,
    diagnostics: &mut Vec<StyleDiagnostic>,
) -> Option<StyledNode> {
    let (style, node_diagnostics) = resolve_node_style(node.meta(), &path, parent, ctx);
    diagnostics.extend(node_diagnostics);

    if style.visual.display == Display::None {
        log::trace!("Skipping hidden subtree at {}", path);
        return None;
    }

    let content = match node {
        Node::Container { .. } => StyledContent::Container(
            node.children()
                .iter()
                .enumerate()
                .filter_map(|(i, child)| style_node(child, path.child(i), &style, ctx, diagnostics))
                .collect(),
        ),
        Node::Text { text, .. } => StyledContent::Text(prepare_text(text, &style.text)),
        Node::Image { src, width, height, .. } => StyledContent::Image {
            src: src.clone(),
            width: width.map(|w| w * ctx.device_pixel_ratio),
            height: height.map(|h| h * ctx.device_pixel_ratio),
        },
    };

    Some(StyledNode { path, style, content })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pictor_node::StyleValue;

    fn css(node: Node, style: &str) -> Node {
        let mut node = node;
        node.meta_mut().style = Some(StyleValue::Css(style.to_string()));
        node
    }

    #[test]
    fn hidden_subtrees_are_dropped() {
        let _ = env_logger::builder().is_test(true).try_init();
        let tree = Node::container(vec![
            Node::text("shown"),
            css(Node::container(vec![Node::text("hidden")]), "display: none"),
            Node::image("a.png"),
        ]);
        let styled = style_tree(&tree, &ResolveContext::default());
        let root = styled.root.unwrap();
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.children()[1].path.as_str(), "root/2");
    }

    #[test]
    fn collects_diagnostics_and_sources() {
        let _ = env_logger::builder().is_test(true).try_init();
        let tree = Node::container(vec![
            css(Node::image("b.png"), "width: -3px"),
            Node::image("a.png"),
            Node::image("b.png"),
        ]);
        let styled = style_tree(&tree, &ResolveContext::default());
        assert_eq!(styled.diagnostics.len(), 1);
        assert_eq!(styled.diagnostics[0].path.as_str(), "root/0");

        let root = styled.root.unwrap();
        let sources: Vec<&str> = root.image_sources().into_iter().collect();
        assert_eq!(sources, vec!["a.png", "b.png"]);
    }

    #[test]
    fn image_fields_scale_with_device_pixel_ratio() {
        let ctx = ResolveContext {
            device_pixel_ratio: 2.0,
            ..Default::default()
        };
        let image = Node::image("a.png").with_size(Some(10.0), Some(20.0));
        let styled = style_tree(&image, &ctx).root.unwrap();
        match styled.content {
            StyledContent::Image { width, height, .. } => {
                assert_eq!(width, Some(20.0));
                assert_eq!(height, Some(40.0));
            }
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn hidden_root_yields_empty_tree() {
        let root = css(Node::text("x"), "display: none");
        assert!(style_tree(&root, &ResolveContext::default()).root.is_none());
    }
}
