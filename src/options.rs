use crate::context::GlobalContext;
use pictor_node::Node;
use pictor_render::{EncodeOptions, ImageFormat};
use pictor_style::StyleDiagnostic;
use pictor_types::Color;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// Output canvas description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Image width in device pixels; `None` sizes the image to its content.
    pub width: Option<u32>,
    /// Image height in device pixels; `None` sizes the image to its content.
    pub height: Option<u32>,
    /// Base for `rem` and the root font size. Default 16.
    pub font_size: f32,
    /// Multiplier from CSS pixels to device pixels. Default 1.
    pub device_pixel_ratio: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            font_size: 16.0,
            device_pixel_ratio: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// A viewport sized to its content in both directions.
    pub fn auto() -> Self {
        Self::default()
    }

    /// Wire form: any negative dimension means "auto".
    pub fn from_sentinel(width: i64, height: i64) -> Self {
        let dim = |v: i64| u32::try_from(v).ok();
        Self {
            width: dim(width),
            height: dim(height),
            ..Self::default()
        }
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_device_pixel_ratio(mut self, ratio: f32) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }
}

/// Everything one render needs.
#[derive(Debug, Clone)]
pub struct RenderOptions<'a> {
    pub global: &'a GlobalContext,
    pub node: &'a Node,
    pub viewport: Viewport,
    pub format: ImageFormat,
    /// Overrides the context's default encoder settings.
    pub encode: Option<EncodeOptions>,
    /// Canvas color behind the root; transparent when `None`.
    pub background: Option<Color>,
    /// Set to `true` from another thread to stop the render between stages.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl<'a> RenderOptions<'a> {
    pub fn builder(global: &'a GlobalContext, node: &'a Node) -> RenderOptionsBuilder<'a> {
        RenderOptionsBuilder::new(global, node)
    }

    pub(crate) fn encode_options(&self) -> EncodeOptions {
        self.encode.unwrap_or(self.global.config().encode)
    }
}

pub struct RenderOptionsBuilder<'a> {
    options: RenderOptions<'a>,
}

impl<'a> RenderOptionsBuilder<'a> {
    pub fn new(global: &'a GlobalContext, node: &'a Node) -> Self {
        Self {
            options: RenderOptions {
                global,
                node,
                viewport: Viewport::default(),
                format: ImageFormat::default(),
                encode: None,
                background: None,
                cancel: None,
            },
        }
    }

    pub fn viewport(mut self, viewport: Viewport) -> Self {
        self.options.viewport = viewport;
        self
    }

    pub fn format(mut self, format: ImageFormat) -> Self {
        self.options.format = format;
        self
    }

    pub fn encode_options(mut self, encode: EncodeOptions) -> Self {
        self.options.encode = Some(encode);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.options.background = Some(color);
        self
    }

    pub fn cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.options.cancel = Some(flag);
        self
    }

    pub fn build(self) -> RenderOptions<'a> {
        self.options
    }
}

/// An encoded image and what the render learned on the way.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    /// Style values that were ignored.
    pub diagnostics: Vec<StyleDiagnostic>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_dimensions_mean_auto() {
        let viewport = Viewport::from_sentinel(-1, 300);
        assert_eq!(viewport.width, None);
        assert_eq!(viewport.height, Some(300));
        assert_eq!(viewport.font_size, 16.0);
    }

    #[test]
    fn builder_defaults() {
        let global = GlobalContext::new();
        let node = Node::container(vec![]);
        let options = RenderOptions::builder(&global, &node)
            .format(ImageFormat::Jpeg)
            .build();
        assert_eq!(options.format, ImageFormat::Jpeg);
        assert_eq!(options.viewport, Viewport::auto());
        assert_eq!(options.encode_options().jpeg_quality, 90);
        assert!(options.cancel.is_none());
    }
}
