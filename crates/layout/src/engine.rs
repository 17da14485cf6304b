//! Flexbox layout of the styled tree.
//!
//! The styled tree is mirrored into a `taffy` tree. Text and image leaves
//! carry a [`MeasureContext`] that the solver queries through the measure
//! callback before distributing free space; text is measured with the
//! [`TextLayouter`]. After solving, the taffy layout is read back into
//! absolute [`LayoutBox`]es and text is laid out at its final width.

use crate::algorithms::computed_style_to_taffy;
use crate::config::LayoutConfig;
use crate::fonts::FontSnapshot;
use crate::output::{BoxContent, LayoutBox, LayoutTree};
use crate::style::ComputedStyle;
use crate::text::TextLayouter;
use crate::tree::{StyledContent, StyledNode, StyledTree};
use crate::LayoutError;
use pictor_traits::FontError;
use pictor_types::{Edges, Size};
use std::collections::HashMap;
use std::sync::Arc;
use taffy::prelude::{AvailableSpace, NodeId, TaffyTree};

/// Intrinsic pixel size of each decoded image, keyed by `src`.
pub type IntrinsicSizes = HashMap<String, Size>;

/// The canvas constraints for one layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutViewport {
    /// Canvas width in device pixels; `None` sizes the canvas to the content.
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Scale applied to image intrinsic sizes.
    pub device_pixel_ratio: f32,
    /// Upper bound for content-sized canvas dimensions.
    pub max_canvas_size: u32,
}

impl Default for LayoutViewport {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            device_pixel_ratio: 1.0,
            max_canvas_size: 16384,
        }
    }
}

/// What a leaf needs to report its content size.
#[derive(Debug, Clone)]
pub enum MeasureContext {
    Text {
        text: String,
        style: Arc<ComputedStyle>,
    },
    Image {
        width: Option<f32>,
        height: Option<f32>,
        intrinsic: Size,
    },
}

impl MeasureContext {
    fn measure_image(
        width: Option<f32>,
        height: Option<f32>,
        intrinsic: Size,
        known: taffy::geometry::Size<Option<f32>>,
    ) -> taffy::geometry::Size<f32> {
        let ratio = match (width, height) {
            (Some(w), Some(h)) if h > 0.0 => w / h,
            _ if intrinsic.height > 0.0 => intrinsic.width / intrinsic.height,
            _ => 0.0,
        };
        let from_ratio_w = |h: f32| if ratio > 0.0 { h * ratio } else { intrinsic.width };
        let from_ratio_h = |w: f32| if ratio > 0.0 { w / ratio } else { intrinsic.height };

        let (w, h) = match (width, height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, from_ratio_h(w)),
            (None, Some(h)) => (from_ratio_w(h), h),
            (None, None) => (intrinsic.width, intrinsic.height),
        };
        let (w, h) = match (known.width, known.height) {
            (Some(kw), Some(kh)) => (kw, kh),
            (Some(kw), None) => (kw, from_ratio_h(kw)),
            (None, Some(kh)) => (from_ratio_w(kh), kh),
            (None, None) => (w, h),
        };
        taffy::geometry::Size {
            width: w,
            height: h,
        }
    }
}

pub struct LayoutEngine {
    text: TextLayouter,
}

impl LayoutEngine {
    pub fn new(fonts: FontSnapshot, config: &LayoutConfig) -> Self {
        Self {
            text: TextLayouter::new(fonts, config),
        }
    }

    pub fn text_layouter(&mut self) -> &mut TextLayouter {
        &mut self.text
    }

    /// Lays out a styled tree on the viewport.
    ///
    /// Images must already be decoded: every `src` in the tree needs an
    /// entry in `images`.
    pub fn layout(
        &mut self,
        tree: &StyledTree,
        images: &IntrinsicSizes,
        viewport: &LayoutViewport,
    ) -> Result<LayoutTree, LayoutError> {
        let Some(root) = &tree.root else {
            return Ok(LayoutTree {
                root: None,
                width: clamp_canvas(viewport.width.map_or(1.0, |w| w as f32), viewport),
                height: clamp_canvas(viewport.height.map_or(1.0, |h| h as f32), viewport),
            });
        };

        let mut taffy: TaffyTree<MeasureContext> = TaffyTree::new();
        let root_id = build_node(&mut taffy, root, images, viewport.device_pixel_ratio)?;

        let mut root_style = computed_style_to_taffy(&root.style);
        fill_viewport(&mut root_style, &root.style, viewport);
        taffy.set_style(root_id, root_style).map_err(taffy_error)?;

        let available = taffy::geometry::Size {
            width: viewport
                .width
                .map_or(AvailableSpace::MaxContent, |w| AvailableSpace::Definite(w as f32)),
            height: viewport
                .height
                .map_or(AvailableSpace::MaxContent, |h| AvailableSpace::Definite(h as f32)),
        };

        let mut font_error: Option<FontError> = None;
        let text = &mut self.text;
        taffy
            .compute_layout_with_measure(
                root_id,
                available,
                |known, available, _id, context, _style| {
                    if let (Some(width), Some(height)) = (known.width, known.height) {
                        return taffy::geometry::Size { width, height };
                    }
                    match context {
                        Some(MeasureContext::Text { text: content, style }) => {
                            let limit = known.width.or(match available.width {
                                AvailableSpace::Definite(w) => Some(w),
                                AvailableSpace::MinContent => Some(0.0),
                                AvailableSpace::MaxContent => None,
                            });
                            match text.measure(content, style, limit) {
                                Ok(size) => taffy::geometry::Size {
                                    width: known.width.unwrap_or(size.width),
                                    height: known.height.unwrap_or(size.height),
                                },
                                Err(e) => {
                                    font_error.get_or_insert(e);
                                    taffy::geometry::Size::ZERO
                                }
                            }
                        }
                        Some(MeasureContext::Image { width, height, intrinsic }) => {
                            MeasureContext::measure_image(*width, *height, *intrinsic, known)
                        }
                        None => taffy::geometry::Size::ZERO,
                    }
                },
            )
            .map_err(taffy_error)?;
        if let Some(e) = font_error {
            return Err(e.into());
        }

        let root_layout = *taffy.layout(root_id).map_err(taffy_error)?;
        let origin_x = finite(root_layout.margin.left);
        let origin_y = finite(root_layout.margin.top);

        let canvas_width = match viewport.width {
            Some(w) => clamp_canvas(w as f32, viewport),
            None => clamp_canvas(
                (finite(root_layout.size.width) + origin_x + finite(root_layout.margin.right))
                    .ceil(),
                viewport,
            ),
        };
        let canvas_height = match viewport.height {
            Some(h) => clamp_canvas(h as f32, viewport),
            None => clamp_canvas(
                (finite(root_layout.size.height) + origin_y + finite(root_layout.margin.bottom))
                    .ceil(),
                viewport,
            ),
        };

        let root_box = self.read_box(&taffy, root, root_id, origin_x, origin_y)?;
        log::debug!(
            "Laid out {} boxes on a {}x{} canvas",
            root_box.count(),
            canvas_width,
            canvas_height
        );

        Ok(LayoutTree {
            root: Some(root_box),
            width: canvas_width,
            height: canvas_height,
        })
    }

    fn read_box(
        &mut self,
        taffy: &TaffyTree<MeasureContext>,
        node: &StyledNode,
        id: NodeId,
        x: f32,
        y: f32,
    ) -> Result<LayoutBox, LayoutError> {
        let layout = taffy.layout(id).map_err(taffy_error)?;
        let border = edges(&layout.border);
        let padding = edges(&layout.padding);
        let width = finite(layout.size.width);
        let height = finite(layout.size.height);

        let content = match &node.content {
            StyledContent::Container(children) => {
                let child_ids = taffy.children(id).map_err(taffy_error)?;
                let mut boxes = Vec::with_capacity(children.len());
                for (child, child_id) in children.iter().zip(child_ids) {
                    let child_layout = taffy.layout(child_id).map_err(taffy_error)?;
                    let cx = x + finite(child_layout.location.x);
                    let cy = y + finite(child_layout.location.y);
                    boxes.push(self.read_box(taffy, child, child_id, cx, cy)?);
                }
                BoxContent::Container { children: boxes }
            }
            StyledContent::Text(text) => {
                let content_width = (width - border.horizontal() - padding.horizontal()).max(0.0);
                BoxContent::Text {
                    block: self.text.layout(text, &node.style, content_width)?,
                }
            }
            StyledContent::Image { src, .. } => BoxContent::Image { src: src.clone() },
        };

        log::trace!("{} at ({}, {}) size {}x{}", node.path, x, y, width, height);
        Ok(LayoutBox {
            path: node.path.clone(),
            x,
            y,
            width,
            height,
            border,
            padding,
            style: node.style.clone(),
            content,
        })
    }
}

fn build_node(
    taffy: &mut TaffyTree<MeasureContext>,
    node: &StyledNode,
    images: &IntrinsicSizes,
    device_pixel_ratio: f32,
) -> Result<NodeId, LayoutError> {
    let style = computed_style_to_taffy(&node.style);
    let id = match &node.content {
        StyledContent::Container(children) => {
            let ids = children
                .iter()
                .map(|child| build_node(taffy, child, images, device_pixel_ratio))
                .collect::<Result<Vec<_>, _>>()?;
            taffy.new_with_children(style, &ids)
        }
        StyledContent::Text(text) => taffy.new_leaf_with_context(
            style,
            MeasureContext::Text {
                text: text.clone(),
                style: node.style.clone(),
            },
        ),
        StyledContent::Image { src, width, height } => {
            let intrinsic = images
                .get(src)
                .ok_or_else(|| LayoutError::MissingImage(src.clone()))?;
            taffy.new_leaf_with_context(
                style,
                MeasureContext::Image {
                    width: *width,
                    height: *height,
                    intrinsic: Size::new(
                        intrinsic.width * device_pixel_ratio,
                        intrinsic.height * device_pixel_ratio,
                    ),
                },
            )
        }
    };
    id.map_err(taffy_error)
}

/// A definite viewport dimension makes an auto-sized root fill it, minus the
/// root's margins.
fn fill_viewport(
    taffy_style: &mut taffy::style::Style,
    style: &ComputedStyle,
    viewport: &LayoutViewport,
) {
    let margin = &style.box_model.margin;
    if let Some(w) = viewport.width
        && style.box_model.width.is_auto()
    {
        let w = w as f32;
        let fill =
            w - margin.left.resolve(w).unwrap_or(0.0) - margin.right.resolve(w).unwrap_or(0.0);
        taffy_style.size.width = taffy::style::Dimension::length(fill.max(0.0));
    }
    if let Some(h) = viewport.height
        && style.box_model.height.is_auto()
    {
        // Vertical percentage margins resolve against the width, as in CSS.
        let basis = viewport.width.map_or(h as f32, |w| w as f32);
        let h = h as f32;
        let fill = h
            - margin.top.resolve(basis).unwrap_or(0.0)
            - margin.bottom.resolve(basis).unwrap_or(0.0);
        taffy_style.size.height = taffy::style::Dimension::length(fill.max(0.0));
    }
}

fn clamp_canvas(extent: f32, viewport: &LayoutViewport) -> u32 {
    let max = viewport.max_canvas_size.max(1);
    if !extent.is_finite() {
        return 1;
    }
    (extent.max(1.0) as u32).min(max)
}

fn finite(v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        log::debug!("Non-finite layout value {}; using 0", v);
        0.0
    }
}

fn edges(rect: &taffy::geometry::Rect<f32>) -> Edges {
    Edges {
        top: finite(rect.top),
        right: finite(rect.right),
        bottom: finite(rect.bottom),
        left: finite(rect.left),
    }
}

fn taffy_error(e: taffy::TaffyError) -> LayoutError {
    LayoutError::Taffy(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::FontContext;
    use crate::style::ResolveContext;
    use crate::test_utils::{REGULAR_FONT, font_bytes};
    use crate::tree::style_tree;
    use pictor_node::{Node, StyleValue};

    fn css(node: Node, style: &str) -> Node {
        let mut node = node;
        node.meta_mut().style = Some(StyleValue::Css(style.to_string()));
        node
    }

    fn run(
        root: &Node,
        viewport: LayoutViewport,
        fonts: &FontContext,
    ) -> Result<LayoutTree, LayoutError> {
        let ctx = ResolveContext {
            viewport_width: viewport.width.map(|w| w as f32),
            viewport_height: viewport.height.map(|h| h as f32),
            ..Default::default()
        };
        let styled = style_tree(root, &ctx);
        let mut images = IntrinsicSizes::new();
        images.insert("logo.png".to_string(), Size::new(40.0, 20.0));
        let mut engine = LayoutEngine::new(fonts.snapshot()?, &LayoutConfig::default());
        engine.layout(&styled, &images, &viewport)
    }

    fn fixed(width: u32, height: u32) -> LayoutViewport {
        LayoutViewport {
            width: Some(width),
            height: Some(height),
            ..Default::default()
        }
    }

    #[test]
    fn centers_fixed_child() {
        let _ = env_logger::builder().is_test(true).try_init();
        let root = css(
            Node::container(vec![css(Node::container(vec![]), "width: 50px; height: 30px")]),
            "justify-content: center; align-items: center",
        );
        let tree = run(&root, fixed(200, 100), &FontContext::new()).unwrap();
        let root_box = tree.root.unwrap();
        assert_eq!((root_box.width, root_box.height), (200.0, 100.0));

        let child = root_box.find("root/0").unwrap();
        assert_eq!(child.x, (200.0 - 50.0) / 2.0);
        assert_eq!(child.y, (100.0 - 30.0) / 2.0);
        assert_eq!((tree.width, tree.height), (200, 100));
    }

    #[test]
    fn percentage_width_of_definite_parent() {
        let _ = env_logger::builder().is_test(true).try_init();
        let root = css(
            Node::container(vec![css(Node::container(vec![]), "width: 50%; height: 10px")]),
            "width: 200px; height: 100px",
        );
        let tree = run(&root, LayoutViewport::default(), &FontContext::new()).unwrap();
        let child = tree.root.as_ref().unwrap().find("root/0").unwrap();
        assert_eq!(child.width, 100.0);
        assert_eq!((tree.width, tree.height), (200, 100));
    }

    #[test]
    fn auto_viewport_fits_text() {
        let _ = env_logger::builder().is_test(true).try_init();
        let fonts = FontContext::new();
        fonts.load_font(font_bytes(REGULAR_FONT)).unwrap();
        let root = css(Node::text("Hello, world"), "padding: 4px");
        let tree = run(&root, LayoutViewport::default(), &fonts).unwrap();

        assert!(tree.width > 8 && tree.width < 1000);
        // 19.2px line box plus 8px padding, before and after rounding.
        assert!((27..=28).contains(&tree.height));
        let root_box = tree.root.unwrap();
        match &root_box.content {
            BoxContent::Text { block: Some(block) } => assert_eq!(block.lines.len(), 1),
            other => panic!("expected laid-out text, got {:?}", other),
        }
    }

    #[test]
    fn text_without_fonts_fails() {
        let _ = env_logger::builder().is_test(true).try_init();
        let err = run(&Node::text("Hello"), fixed(100, 100), &FontContext::new()).unwrap_err();
        assert!(matches!(err, LayoutError::Font(FontError::NoFontLoaded)));
        assert_eq!(err.to_string(), "no font loaded");
    }

    #[test]
    fn image_keeps_aspect_ratio_from_one_dimension() {
        let _ = env_logger::builder().is_test(true).try_init();
        let root = css(
            Node::container(vec![Node::image("logo.png").with_size(Some(80.0), None)]),
            "align-items: flex-start",
        );
        let tree = run(&root, fixed(300, 300), &FontContext::new()).unwrap();
        let image = tree.root.as_ref().unwrap().find("root/0").unwrap();
        assert_eq!((image.width, image.height), (80.0, 40.0));

        let missing = Node::image("nope.png");
        let err = run(&missing, fixed(10, 10), &FontContext::new()).unwrap_err();
        assert!(matches!(err, LayoutError::MissingImage(src) if src == "nope.png"));
    }

    #[test]
    fn root_margin_is_part_of_auto_canvas() {
        let _ = env_logger::builder().is_test(true).try_init();
        let root = css(Node::container(vec![]), "width: 10px; height: 10px; margin: 5px");
        let tree = run(&root, LayoutViewport::default(), &FontContext::new()).unwrap();
        assert_eq!((tree.width, tree.height), (20, 20));
        let root_box = tree.root.unwrap();
        assert_eq!((root_box.x, root_box.y), (5.0, 5.0));
    }

    #[test]
    fn empty_content_still_gets_a_pixel() {
        let empty = Node::container(vec![]);
        let tree = run(&empty, LayoutViewport::default(), &FontContext::new()).unwrap();
        assert_eq!((tree.width, tree.height), (1, 1));
    }
}
