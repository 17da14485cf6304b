//! The render pipeline: validate, resolve styles, decode images, lay out,
//! paint, encode.

use crate::context::GlobalContext;
use crate::error::PipelineError;
use crate::options::{RenderOptions, RenderOutput, Viewport};
use pictor_layout::{
    IntrinsicSizes, LayoutEngine, LayoutTree, LayoutViewport, ResolveContext, StyledNode,
    style_tree,
};
use pictor_node::Node;
use pictor_render::{
    DecodedImages, ImageFormat, PixelBuffer, Rasterizer, decode_image, encode,
};
use pictor_style::StyleDiagnostic;
use pictor_traits::resolve_source;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Instant;

/// A laid-out tree with the images it paints.
struct Prepared {
    tree: LayoutTree,
    images: DecodedImages,
    diagnostics: Vec<StyleDiagnostic>,
}

fn check_cancelled(options: &RenderOptions<'_>) -> Result<(), PipelineError> {
    match &options.cancel {
        Some(flag) if flag.load(Ordering::Relaxed) => Err(PipelineError::Cancelled),
        _ => Ok(()),
    }
}

fn check_viewport(viewport: &Viewport, max_canvas_size: u32) -> Result<(), PipelineError> {
    if !viewport.device_pixel_ratio.is_finite() || viewport.device_pixel_ratio <= 0.0 {
        return Err(PipelineError::Config(format!(
            "device pixel ratio must be positive, got {}",
            viewport.device_pixel_ratio
        )));
    }
    if !viewport.font_size.is_finite() || viewport.font_size <= 0.0 {
        return Err(PipelineError::Config(format!(
            "font size must be positive, got {}",
            viewport.font_size
        )));
    }
    for dim in [viewport.width, viewport.height].into_iter().flatten() {
        if dim > max_canvas_size {
            return Err(PipelineError::Config(format!(
                "viewport dimension {} exceeds the maximum canvas size {}",
                dim, max_canvas_size
            )));
        }
    }
    Ok(())
}

/// Loads and decodes every distinct image source once.
fn decode_sources(
    global: &GlobalContext,
    root: &StyledNode,
) -> Result<DecodedImages, PipelineError> {
    let mut images = DecodedImages::new();
    for src in root.image_sources() {
        let bytes = resolve_source(global.resources(), src)?;
        let image = decode_image(src, &bytes)?;
        images.insert(src.to_string(), Arc::new(image));
    }
    Ok(images)
}

fn prepare(options: &RenderOptions<'_>) -> Result<Prepared, PipelineError> {
    let global = options.global;
    let viewport = options.viewport;
    let started = Instant::now();

    check_cancelled(options)?;
    check_viewport(&viewport, global.config().max_canvas_size)?;
    options.node.validate()?;

    let ctx = ResolveContext {
        viewport_width: viewport.width.map(|w| w as f32),
        viewport_height: viewport.height.map(|h| h as f32),
        root_font_size: viewport.font_size,
        device_pixel_ratio: viewport.device_pixel_ratio,
    };
    let styled = style_tree(options.node, &ctx);
    log::debug!(
        "Resolved styles for {} nodes in {:?} ({} diagnostics)",
        options.node.count(),
        started.elapsed(),
        styled.diagnostics.len()
    );

    check_cancelled(options)?;
    let images = match &styled.root {
        Some(root) => decode_sources(global, root)?,
        None => DecodedImages::new(),
    };
    let sizes: IntrinsicSizes = images
        .iter()
        .map(|(src, image)| (src.clone(), image.size()))
        .collect();

    check_cancelled(options)?;
    let layout_started = Instant::now();
    let mut engine = LayoutEngine::new(global.fonts().snapshot()?, &global.config().layout);
    let layout_viewport = LayoutViewport {
        width: viewport.width,
        height: viewport.height,
        device_pixel_ratio: viewport.device_pixel_ratio,
        max_canvas_size: global.config().max_canvas_size,
    };
    let tree = engine.layout(&styled, &sizes, &layout_viewport)?;
    log::debug!(
        "Layout produced a {}x{} canvas in {:?}",
        tree.width,
        tree.height,
        layout_started.elapsed()
    );

    Ok(Prepared {
        tree,
        images,
        diagnostics: styled.diagnostics,
    })
}

fn paint(options: &RenderOptions<'_>, prepared: &Prepared) -> Result<PixelBuffer, PipelineError> {
    check_cancelled(options)?;
    let started = Instant::now();
    let pixels = Rasterizer::new(&prepared.images).paint(&prepared.tree, options.background)?;
    log::debug!("Rasterized in {:?}", started.elapsed());
    Ok(pixels)
}

/// Renders and encodes according to `options`.
pub fn render_with(options: RenderOptions<'_>) -> Result<RenderOutput, PipelineError> {
    let prepared = prepare(&options)?;
    let pixels = paint(&options, &prepared)?;
    check_cancelled(&options)?;
    let bytes = encode(&pixels, options.format, &options.encode_options())?;
    Ok(RenderOutput {
        bytes,
        width: pixels.width(),
        height: pixels.height(),
        format: options.format,
        diagnostics: prepared.diagnostics,
    })
}

/// Renders `node` and encodes it as `format` with the context's defaults.
pub fn render(
    global: &GlobalContext,
    node: &Node,
    viewport: Viewport,
    format: ImageFormat,
) -> Result<Vec<u8>, PipelineError> {
    let options = RenderOptions::builder(global, node)
        .viewport(viewport)
        .format(format)
        .build();
    Ok(render_with(options)?.bytes)
}

/// Renders to straight RGBA pixels without encoding.
pub fn render_pixels(options: &RenderOptions<'_>) -> Result<PixelBuffer, PipelineError> {
    let prepared = prepare(options)?;
    paint(options, &prepared)
}

/// Parses a wire-format JSON tree and renders it.
pub fn render_json(
    global: &GlobalContext,
    json: &str,
    viewport: Viewport,
    format: ImageFormat,
) -> Result<Vec<u8>, PipelineError> {
    let node = Node::from_json(json)?;
    render(global, &node, viewport, format)
}

/// Size in bytes of the encoded image [`render_to_buffer`] would write.
pub fn calculate_buffer_size(
    global: &GlobalContext,
    node: &Node,
    viewport: Viewport,
    format: ImageFormat,
) -> Result<usize, PipelineError> {
    Ok(render(global, node, viewport, format)?.len())
}

/// Renders into a caller-provided buffer, returning the number of bytes
/// written. A buffer that is too small is left untouched.
pub fn render_to_buffer(
    global: &GlobalContext,
    node: &Node,
    viewport: Viewport,
    format: ImageFormat,
    buffer: &mut [u8],
) -> Result<usize, PipelineError> {
    let bytes = render(global, node, viewport, format)?;
    let available = buffer.len();
    let target = buffer
        .get_mut(..bytes.len())
        .ok_or(PipelineError::BufferTooSmall {
            needed: bytes.len(),
            available,
        })?;
    target.copy_from_slice(&bytes);
    Ok(bytes.len())
}

/// Renders to a file. Without an explicit `format` it is inferred from the
/// path's extension.
pub fn render_to_file(
    global: &GlobalContext,
    node: &Node,
    viewport: Viewport,
    format: Option<ImageFormat>,
    path: impl AsRef<Path>,
) -> Result<RenderOutput, PipelineError> {
    let path = path.as_ref();
    let format = match format {
        Some(format) => format,
        None => ImageFormat::from_path(path).ok_or_else(|| {
            PipelineError::Config(format!(
                "cannot infer an image format from '{}'",
                path.display()
            ))
        })?,
    };
    let options = RenderOptions::builder(global, node)
        .viewport(viewport)
        .format(format)
        .build();
    let output = render_with(options)?;
    std::fs::write(path, &output.bytes)?;
    log::info!("Wrote {} ({} bytes)", path.display(), output.bytes.len());
    Ok(output)
}

/// One entry of a [`render_batch`].
#[cfg(feature = "parallel")]
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub node: Node,
    pub viewport: Viewport,
    pub format: ImageFormat,
}

/// Renders many trees concurrently on the rayon pool, sharing `global`.
/// Results are in job order.
#[cfg(feature = "parallel")]
pub fn render_batch(
    global: &GlobalContext,
    jobs: &[BatchJob],
) -> Vec<Result<Vec<u8>, PipelineError>> {
    use rayon::prelude::*;

    log::debug!("Rendering a batch of {} jobs", jobs.len());
    jobs.par_iter()
        .map(|job| render(global, &job.node, job.viewport, job.format))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;

    #[test]
    fn cancelled_before_start() {
        let _ = env_logger::builder().is_test(true).try_init();
        let global = GlobalContext::new();
        let node = Node::container(vec![]);
        let flag = Arc::new(AtomicBool::new(true));
        let options = RenderOptions::builder(&global, &node)
            .viewport(Viewport::new(4, 4))
            .cancel(flag)
            .build();
        assert!(matches!(render_with(options), Err(PipelineError::Cancelled)));
    }

    #[test]
    fn rejects_bad_viewport() {
        let global = GlobalContext::new();
        let node = Node::container(vec![]);
        let zero_dpr = Viewport::new(4, 4).with_device_pixel_ratio(0.0);
        assert!(matches!(
            render(&global, &node, zero_dpr, ImageFormat::Png),
            Err(PipelineError::Config(_))
        ));
        let huge = Viewport::new(100_000, 4);
        assert!(matches!(
            render(&global, &node, huge, ImageFormat::Png),
            Err(PipelineError::Config(_))
        ));
    }

    #[test]
    fn remote_images_are_refused() {
        let global = GlobalContext::new();
        let node = Node::image("https://example.com/a.png");
        let err = render(&global, &node, Viewport::new(4, 4), ImageFormat::Png).unwrap_err();
        assert!(matches!(err, PipelineError::Resource(_)), "{}", err);
    }

    #[test]
    fn zero_viewport_is_clamped_to_one_pixel() {
        let global = GlobalContext::new();
        let node = Node::container(vec![]);
        let options = RenderOptions::builder(&global, &node)
            .viewport(Viewport::new(0, 0))
            .build();
        let pixels = render_pixels(&options).unwrap();
        assert_eq!((pixels.width(), pixels.height()), (1, 1));
    }
}
