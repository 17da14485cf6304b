//! Painting a [`LayoutTree`] onto a `tiny-skia` pixmap.
//!
//! Boxes are painted in pre-order: background, border, content (text or
//! image), then children. `border-radius` rounds everything painted for a
//! box; `overflow: hidden` narrows the clip mask handed to the children and
//! `opacity` below one paints the subtree into a layer that is composited
//! afterwards. A layer only covers its subtree's bounds, so nested layers stay
//! small on large canvases. Coordinates are already device pixels.

mod fit;
mod glyph;

pub use fit::object_fit_rect;
pub use glyph::{GlyphCache, glyph_path, glyph_transform};

use crate::decode::DecodedImages;
use crate::error::RenderError;
use crate::pixels::PixelBuffer;
use pictor_layout::{BoxContent, LayoutBox, LayoutTree, TextBlock};
use pictor_style::{FontStyle, Overflow, TextDecoration};
use pictor_types::{Color, Rect};
use tiny_skia::{
    FillRule, FilterQuality, Mask, Paint, Path, PathBuilder, Pattern, Pixmap, PixmapPaint,
    SpreadMode, Transform,
};

/// Cubic approximation constant for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

/// Horizontal slant used when an italic is requested but only an upright
/// face is loaded.
const SYNTHETIC_OBLIQUE: f32 = 0.2;

/// Top-left corner of a paint surface in canvas pixels. The canvas sits at
/// zero; opacity layers are offset to their subtree's bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Origin {
    x: i32,
    y: i32,
}

impl Origin {
    /// Maps canvas coordinates onto the surface.
    fn transform(self) -> Transform {
        Transform::from_translate(-(self.x as f32), -(self.y as f32))
    }

    /// Canvas area covered by `pixmap` placed at this origin.
    fn area(self, pixmap: &Pixmap) -> Rect {
        Rect::new(
            self.x as f32,
            self.y as f32,
            pixmap.width() as f32,
            pixmap.height() as f32,
        )
    }
}

pub struct Rasterizer<'a> {
    images: &'a DecodedImages,
    glyphs: GlyphCache,
}

impl<'a> Rasterizer<'a> {
    pub fn new(images: &'a DecodedImages) -> Self {
        Self {
            images,
            glyphs: GlyphCache::default(),
        }
    }

    /// Paints the tree on a canvas of `tree.width × tree.height`, cleared to
    /// `background` (transparent when `None`).
    pub fn paint(
        &mut self,
        tree: &LayoutTree,
        background: Option<Color>,
    ) -> Result<PixelBuffer, RenderError> {
        let mut pixmap = new_pixmap(tree.width, tree.height)?;
        if let Some(color) = background {
            pixmap.fill(skia_color(color));
        }
        if let Some(root) = &tree.root {
            self.paint_box(&mut pixmap, Origin::default(), root, None)?;
        }
        log::debug!(
            "Painted {}x{} canvas ({} glyph outlines)",
            tree.width,
            tree.height,
            self.glyphs.len()
        );
        Ok(PixelBuffer::from_pixmap(&pixmap))
    }

    fn paint_box(
        &mut self,
        pixmap: &mut Pixmap,
        origin: Origin,
        node: &LayoutBox,
        clip: Option<&Mask>,
    ) -> Result<(), RenderError> {
        let opacity = node.style.visual.opacity;
        if opacity <= 0.0 {
            log::trace!("Skipping transparent subtree at {}", node.path);
            return Ok(());
        }
        if opacity >= 1.0 {
            return self.paint_contents(pixmap, origin, node, clip);
        }

        let covered = outset(subtree_bounds(node), 1.0);
        let Some(bounds) = intersection(covered, origin.area(pixmap)) else {
            log::trace!("Layer at {} lies outside its surface", node.path);
            return Ok(());
        };
        let layer_origin = Origin {
            x: bounds.x.floor() as i32,
            y: bounds.y.floor() as i32,
        };
        let width = (bounds.right().ceil() as i32 - layer_origin.x).max(1) as u32;
        let height = (bounds.bottom().ceil() as i32 - layer_origin.y).max(1) as u32;

        let mut layer = new_pixmap(width, height)?;
        let layer_clip = clip
            .map(|mask| crop_mask(mask, origin, layer_origin, width, height))
            .transpose()?;
        self.paint_contents(&mut layer, layer_origin, node, layer_clip.as_ref())?;
        log::trace!(
            "Compositing {}x{} layer at {} with opacity {}",
            width,
            height,
            node.path,
            opacity
        );

        let paint = PixmapPaint {
            opacity,
            ..PixmapPaint::default()
        };
        pixmap.draw_pixmap(
            layer_origin.x - origin.x,
            layer_origin.y - origin.y,
            layer.as_ref(),
            &paint,
            Transform::identity(),
            None,
        );
        Ok(())
    }

    fn paint_contents(
        &mut self,
        pixmap: &mut Pixmap,
        origin: Origin,
        node: &LayoutBox,
        clip: Option<&Mask>,
    ) -> Result<(), RenderError> {
        let style = &node.style;
        let border_box = node.border_rect();
        let radius = corner_radius(node);

        if let Some(color) = style.visual.background_color.filter(|c| !c.is_transparent())
            && let Some(path) = rounded_rect_path(border_box, radius)
        {
            pixmap.fill_path(&path, &solid(color), FillRule::Winding, origin.transform(), clip);
        }

        if style.border.is_visible() {
            let inner_radius = (radius - max_edge(node)).max(0.0);
            let mut pb = PathBuilder::new();
            push_rounded_rect(&mut pb, border_box, radius);
            push_rounded_rect(&mut pb, node.padding_rect(), inner_radius);
            if let Some(ring) = pb.finish() {
                pixmap.fill_path(
                    &ring,
                    &solid(style.border.color),
                    FillRule::EvenOdd,
                    origin.transform(),
                    clip,
                );
            }
        }

        match &node.content {
            BoxContent::Text { block: Some(block) } => {
                self.paint_text(pixmap, origin, node, block, clip)
            }
            BoxContent::Image { src } => {
                self.paint_image(pixmap, origin, node, src, radius, clip)?
            }
            BoxContent::Text { block: None } | BoxContent::Container { .. } => {}
        }

        let children = node.children();
        if children.is_empty() {
            return Ok(());
        }
        let child_clip = if style.visual.overflow == Overflow::Hidden {
            let inner_radius = (radius - max_edge(node)).max(0.0);
            Some(intersect_clip(
                pixmap,
                origin,
                clip,
                node.padding_rect(),
                inner_radius,
            )?)
        } else {
            None
        };
        let child_clip = child_clip.as_ref().or(clip);
        for child in children {
            self.paint_box(pixmap, origin, child, child_clip)?;
        }
        Ok(())
    }

    fn paint_text(
        &mut self,
        pixmap: &mut Pixmap,
        origin: Origin,
        node: &LayoutBox,
        block: &TextBlock,
        clip: Option<&Mask>,
    ) {
        let text = &node.style.text;
        if text.color.is_transparent() {
            return;
        }
        let Some(face) = block.font.outline_face() else {
            log::warn!("Font {} has no outlines; skipping text at {}", block.font.id, node.path);
            return;
        };

        let content = node.content_rect();
        let metrics = &block.font.metrics;
        let scale = metrics.scale(block.font_size);
        let synthetic =
            text.font_style != FontStyle::Normal && block.font.style == FontStyle::Normal;
        let skew = if synthetic {
            SYNTHETIC_OBLIQUE
        } else {
            0.0
        };
        let paint = solid(text.color);

        for line in &block.lines {
            for glyph in &line.glyphs {
                if let Some(path) = self.glyphs.get(block.font.id, &face, glyph.id) {
                    let transform = origin.transform().pre_concat(glyph_transform(
                        scale,
                        skew,
                        content.x + glyph.x,
                        content.y + glyph.y,
                    ));
                    pixmap.fill_path(path, &paint, FillRule::Winding, transform, clip);
                }
            }

            let (position, thickness) = match text.text_decoration {
                TextDecoration::None => continue,
                TextDecoration::Underline => {
                    (metrics.underline_position, metrics.underline_thickness)
                }
                TextDecoration::LineThrough => {
                    (metrics.strikeout_position, metrics.strikeout_thickness)
                }
            };
            let thickness = (thickness as f32 * scale).max(1.0);
            let center = content.y + line.baseline - position as f32 * scale;
            let rect = tiny_skia::Rect::from_xywh(
                content.x + line.x,
                center - thickness / 2.0,
                line.width,
                thickness,
            );
            if let Some(rect) = rect {
                pixmap.fill_rect(rect, &paint, origin.transform(), clip);
            }
        }
    }

    fn paint_image(
        &self,
        pixmap: &mut Pixmap,
        origin: Origin,
        node: &LayoutBox,
        src: &str,
        radius: f32,
        clip: Option<&Mask>,
    ) -> Result<(), RenderError> {
        let image = self.images.get(src).ok_or_else(|| RenderError::Decode {
            src: src.to_string(),
            message: "image was not decoded before painting".into(),
        })?;
        let content = node.content_rect();
        if content.is_empty() {
            return Ok(());
        }

        let (iw, ih) = (image.width() as f32, image.height() as f32);
        let dest = object_fit_rect(node.style.visual.object_fit, content, iw, ih);
        let Some(visible) = intersection(dest, content).and_then(to_skia_rect) else {
            return Ok(());
        };

        let transform =
            Transform::from_row(dest.width / iw, 0.0, 0.0, dest.height / ih, dest.x, dest.y);
        let paint = Paint {
            shader: Pattern::new(
                image.pixmap.as_ref(),
                SpreadMode::Pad,
                FilterQuality::Bilinear,
                1.0,
                transform,
            ),
            anti_alias: true,
            ..Paint::default()
        };

        if radius > 0.0 {
            let rounded = intersect_clip(pixmap, origin, clip, node.border_rect(), radius)?;
            pixmap.fill_rect(visible, &paint, origin.transform(), Some(&rounded));
        } else {
            pixmap.fill_rect(visible, &paint, origin.transform(), clip);
        }
        Ok(())
    }
}

fn new_pixmap(width: u32, height: u32) -> Result<Pixmap, RenderError> {
    Pixmap::new(width, height).ok_or(RenderError::CanvasAllocation { width, height })
}

fn skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.alpha_u8())
}

fn solid(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(color));
    paint.anti_alias = true;
    paint
}

/// Resolved `border-radius`, clamped so opposite corners never overlap.
fn corner_radius(node: &LayoutBox) -> f32 {
    let shortest = node.width.min(node.height);
    node.style
        .border
        .radius
        .resolve(shortest)
        .unwrap_or(0.0)
        .clamp(0.0, shortest / 2.0)
}

fn max_edge(node: &LayoutBox) -> f32 {
    let b = &node.border;
    b.top.max(b.right).max(b.bottom).max(b.left)
}

fn to_skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height)
}

fn outset(rect: Rect, by: f32) -> Rect {
    Rect::new(rect.x - by, rect.y - by, rect.width + 2.0 * by, rect.height + 2.0 * by)
}

fn union(a: Rect, b: Rect) -> Rect {
    let x = a.x.min(b.x);
    let y = a.y.min(b.y);
    Rect::new(x, y, a.right().max(b.right()) - x, a.bottom().max(b.bottom()) - y)
}

/// Canvas area a subtree may paint into.
fn subtree_bounds(node: &LayoutBox) -> Rect {
    let mut bounds = node.border_rect();
    if let BoxContent::Text { block: Some(block) } = &node.content {
        let content = node.content_rect();
        // Glyph ink and synthetic obliques can overhang the line box.
        let overhang = block.font_size / 2.0;
        for line in &block.lines {
            let ink = Rect::new(content.x + line.x, content.y + line.y, line.width, line.height);
            bounds = union(bounds, outset(ink, overhang));
        }
    }
    node.children()
        .iter()
        .fold(bounds, |bounds, child| union(bounds, subtree_bounds(child)))
}

/// Copies the part of `parent` (a mask for a surface at `parent_origin`)
/// that a `width × height` surface at `origin` overlaps.
fn crop_mask(
    parent: &Mask,
    parent_origin: Origin,
    origin: Origin,
    width: u32,
    height: u32,
) -> Result<Mask, RenderError> {
    let mut mask = Mask::new(width, height).ok_or(RenderError::CanvasAllocation { width, height })?;
    let off_x = i64::from(origin.x) - i64::from(parent_origin.x);
    let off_y = i64::from(origin.y) - i64::from(parent_origin.y);
    let (parent_w, parent_h) = (i64::from(parent.width()), i64::from(parent.height()));
    let w = i64::from(width);

    let x0 = off_x.max(0);
    let x1 = (off_x + w).min(parent_w);
    if x1 <= x0 {
        return Ok(mask);
    }
    for y in 0..i64::from(height) {
        let sy = off_y + y;
        if sy < 0 || sy >= parent_h {
            continue;
        }
        let src = (sy * parent_w + x0) as usize..(sy * parent_w + x1) as usize;
        let dst = (y * w + x0 - off_x) as usize..(y * w + x1 - off_x) as usize;
        mask.data_mut()[dst].copy_from_slice(&parent.data()[src]);
    }
    Ok(mask)
}

fn intersection(a: Rect, b: Rect) -> Option<Rect> {
    let x = a.x.max(b.x);
    let y = a.y.max(b.y);
    let right = a.right().min(b.right());
    let bottom = a.bottom().min(b.bottom());
    (right > x && bottom > y).then(|| Rect::new(x, y, right - x, bottom - y))
}

fn push_rounded_rect(pb: &mut PathBuilder, rect: Rect, radius: f32) {
    let r = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
    let (left, top, right, bottom) = (rect.x, rect.y, rect.right(), rect.bottom());
    if r <= 0.0 {
        if let Some(rect) = to_skia_rect(rect) {
            pb.push_rect(rect);
        }
        return;
    }
    let k = r * KAPPA;
    pb.move_to(left + r, top);
    pb.line_to(right - r, top);
    pb.cubic_to(right - r + k, top, right, top + r - k, right, top + r);
    pb.line_to(right, bottom - r);
    pb.cubic_to(right, bottom - r + k, right - r + k, bottom, right - r, bottom);
    pb.line_to(left + r, bottom);
    pb.cubic_to(left + r - k, bottom, left, bottom - r + k, left, bottom - r);
    pb.line_to(left, top + r);
    pb.cubic_to(left, top + r - k, left + r - k, top, left + r, top);
    pb.close();
}

fn rounded_rect_path(rect: Rect, radius: f32) -> Option<Path> {
    if rect.is_empty() {
        return None;
    }
    let mut pb = PathBuilder::new();
    push_rounded_rect(&mut pb, rect, radius);
    pb.finish()
}

/// The current clip narrowed to a (rounded) rectangle.
fn intersect_clip(
    pixmap: &Pixmap,
    origin: Origin,
    clip: Option<&Mask>,
    rect: Rect,
    radius: f32,
) -> Result<Mask, RenderError> {
    let (width, height) = (pixmap.width(), pixmap.height());
    let mut mask = match clip {
        Some(parent) => parent.clone(),
        None => {
            let mut full =
                Mask::new(width, height).ok_or(RenderError::CanvasAllocation { width, height })?;
            full.data_mut().fill(255);
            full
        }
    };
    match rounded_rect_path(rect, radius) {
        Some(path) => mask.intersect_path(&path, FillRule::Winding, true, origin.transform()),
        // Nothing survives an empty clip rectangle.
        None => mask.data_mut().fill(0),
    }
    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{DecodedImage, DecodedImages};
    use pictor_layout::{
        FontContext, IntrinsicSizes, LayoutConfig, LayoutEngine, LayoutViewport, ResolveContext,
        style_tree,
    };
    use pictor_node::{Node, StyleValue};
    use std::sync::Arc;

    fn css(node: Node, style: &str) -> Node {
        let mut node = node;
        node.meta_mut().style = Some(StyleValue::Css(style.to_string()));
        node
    }

    fn font_context() -> FontContext {
        let fonts = FontContext::new();
        let bytes = ["../../assets/fonts/DejaVuSans.ttf", "assets/fonts/DejaVuSans.ttf"]
            .iter()
            .find_map(|p| std::fs::read(p).ok())
            .expect("DejaVuSans.ttf fixture");
        fonts.load_font(bytes).unwrap();
        fonts
    }

    fn render_with(root: &Node, width: u32, height: u32, images: &DecodedImages) -> PixelBuffer {
        let ctx = ResolveContext {
            viewport_width: Some(width as f32),
            viewport_height: Some(height as f32),
            ..Default::default()
        };
        let styled = style_tree(root, &ctx);
        let sizes: IntrinsicSizes = images.iter().map(|(k, v)| (k.clone(), v.size())).collect();
        let viewport = LayoutViewport {
            width: Some(width),
            height: Some(height),
            ..Default::default()
        };
        let fonts = font_context().snapshot().unwrap();
        let mut engine = LayoutEngine::new(fonts, &LayoutConfig::default());
        let tree = engine.layout(&styled, &sizes, &viewport).unwrap();
        Rasterizer::new(images).paint(&tree, None).unwrap()
    }

    fn render(root: &Node, width: u32, height: u32) -> PixelBuffer {
        render_with(root, width, height, &DecodedImages::new())
    }

    #[test]
    fn background_fills_border_box() {
        let _ = env_logger::builder().is_test(true).try_init();
        let root = css(
            Node::container(vec![css(
                Node::container(vec![]),
                "width: 10px; height: 10px; background-color: #ff0000",
            )]),
            "align-items: flex-start",
        );
        let pixels = render(&root, 20, 20);
        assert_eq!(pixels.pixel(5, 5), Some([255, 0, 0, 255]));
        assert_eq!(pixels.pixel(15, 15), Some([0, 0, 0, 0]));
    }

    #[test]
    fn border_ring_surrounds_background() {
        let _ = env_logger::builder().is_test(true).try_init();
        let root = css(
            Node::container(vec![]),
            "background-color: #00ff00; border: 4px solid #0000ff",
        );
        let pixels = render(&root, 20, 20);
        assert_eq!(pixels.pixel(1, 10), Some([0, 0, 255, 255]));
        assert_eq!(pixels.pixel(10, 10), Some([0, 255, 0, 255]));
    }

    #[test]
    fn radius_rounds_corners() {
        let _ = env_logger::builder().is_test(true).try_init();
        let root = css(Node::container(vec![]), "background-color: #000000; border-radius: 10px");
        let pixels = render(&root, 20, 20);
        assert_eq!(pixels.pixel(0, 0).map(|p| p[3]), Some(0));
        assert_eq!(pixels.pixel(10, 10), Some([0, 0, 0, 255]));
    }

    #[test]
    fn opacity_composites_layer() {
        let _ = env_logger::builder().is_test(true).try_init();
        let root = css(Node::container(vec![]), "background-color: #ffffff; opacity: 0.5");
        let alpha = render(&root, 4, 4).pixel(2, 2).unwrap()[3];
        assert!(alpha.abs_diff(128) <= 1, "alpha {}", alpha);

        let hidden = css(Node::container(vec![]), "background-color: #ffffff; opacity: 0");
        assert!(!render(&hidden, 4, 4).data().iter().any(|b| *b != 0));
    }

    #[test]
    fn opacity_layer_lands_at_subtree_position() {
        let _ = env_logger::builder().is_test(true).try_init();
        let faded = css(
            Node::container(vec![]),
            "width: 10px; height: 10px; background-color: #ffffff; opacity: 0.5",
        );
        let root = css(Node::container(vec![faded]), "padding: 10px; align-items: flex-start");
        let pixels = render(&root, 40, 40);

        let alpha = pixels.pixel(15, 15).unwrap()[3];
        assert!(alpha.abs_diff(128) <= 1, "alpha {}", alpha);
        assert_eq!(pixels.pixel(5, 5).map(|p| p[3]), Some(0));
        assert_eq!(pixels.pixel(25, 25).map(|p| p[3]), Some(0));
    }

    #[test]
    fn opacity_layer_keeps_parent_clip() {
        let _ = env_logger::builder().is_test(true).try_init();
        let child = css(
            Node::container(vec![]),
            "width: 30px; height: 30px; flex-shrink: 0; background-color: #ff0000; opacity: 0.5",
        );
        let clipped = css(
            Node::container(vec![child]),
            "width: 10px; height: 10px; overflow: hidden",
        );
        let root = css(Node::container(vec![clipped]), "align-items: flex-start");
        let pixels = render(&root, 40, 40);

        let alpha = pixels.pixel(5, 5).unwrap()[3];
        assert!(alpha.abs_diff(128) <= 1, "alpha {}", alpha);
        assert_eq!(pixels.pixel(20, 5).map(|p| p[3]), Some(0));
    }

    #[test]
    fn crop_mask_copies_overlap_only() {
        let mut parent = Mask::new(4, 4).unwrap();
        parent.data_mut()[4 + 2] = 255;
        let at = |x, y| Origin { x, y };

        let cropped = crop_mask(&parent, at(0, 0), at(1, 1), 2, 2).unwrap();
        assert_eq!(cropped.data(), &[0, 255, 0, 0]);

        let outside = crop_mask(&parent, at(-2, 0), at(2, 0), 2, 2).unwrap();
        assert_eq!(outside.data(), &[0, 0, 0, 0]);
        let shifted = crop_mask(&parent, at(-2, 0), at(-1, 0), 2, 2).unwrap();
        assert_eq!(shifted.data(), &[0, 0, 0, 255]);
    }

    #[test]
    fn overflow_hidden_clips_children() {
        let _ = env_logger::builder().is_test(true).try_init();
        let child = css(
            Node::container(vec![]),
            "width: 30px; height: 30px; flex-shrink: 0; background-color: #ff0000",
        );
        let clipped = css(
            Node::container(vec![child.clone()]),
            "width: 10px; height: 10px; overflow: hidden",
        );
        let visible = css(Node::container(vec![child]), "width: 10px; height: 10px");
        let wrap = |inner| css(Node::container(vec![inner]), "align-items: flex-start");

        assert_eq!(render(&wrap(clipped), 40, 40).pixel(20, 5).map(|p| p[3]), Some(0));
        assert_eq!(render(&wrap(visible), 40, 40).pixel(20, 5), Some([255, 0, 0, 255]));
    }

    #[test]
    fn image_fills_its_box() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut pixmap = Pixmap::new(2, 2).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(0, 0, 255, 255));
        let mut images = DecodedImages::new();
        images.insert("blue.png".into(), Arc::new(DecodedImage { pixmap }));

        let root = css(
            Node::container(vec![Node::image("blue.png").with_size(Some(8.0), Some(8.0))]),
            "align-items: flex-start",
        );
        let pixels = render_with(&root, 16, 16, &images);
        assert_eq!(pixels.pixel(4, 4), Some([0, 0, 255, 255]));
        assert_eq!(pixels.pixel(12, 12).map(|p| p[3]), Some(0));
    }

    #[test]
    fn text_paints_glyphs_in_its_color() {
        let _ = env_logger::builder().is_test(true).try_init();
        let root = css(Node::text("Hello"), "color: #000000; font-size: 24px");
        let pixels = render(&root, 100, 40);
        let inked = pixels.data().chunks_exact(4).filter(|p| p[3] > 200).count();
        assert!(inked > 20, "only {} inked pixels", inked);
        assert!(pixels.data().chunks_exact(4).all(|p| p[0] == 0 && p[1] == 0 && p[2] == 0));
    }

    #[test]
    fn underline_spans_the_line() {
        let _ = env_logger::builder().is_test(true).try_init();
        let underlined = css(Node::text("ii"), "color: #000000; text-decoration: underline");
        let ink = |p: &PixelBuffer| p.data().chunks_exact(4).filter(|p| p[3] > 0).count();
        let base = css(Node::text("ii"), "color: #000000");
        assert!(ink(&render(&underlined, 40, 30)) > ink(&render(&base, 40, 30)));
    }
}
