use pictor_layout::{FontContext, FontLoadOptions, LayoutConfig};
use pictor_render::EncodeOptions;
use pictor_traits::{FontError, InMemoryResourceProvider, ResourceProvider};
use pictor_types::FontId;
use std::sync::Arc;

/// Limits and defaults shared by every render on a [`GlobalContext`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Largest canvas width or height in pixels. Default 16384.
    pub max_canvas_size: u32,
    /// Encoder settings used when a render does not bring its own.
    pub encode: EncodeOptions,
    pub layout: LayoutConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_canvas_size: 16384,
            encode: EncodeOptions::default(),
            layout: LayoutConfig::default(),
        }
    }
}

/// Long-lived state shared by renders: loaded fonts, the image source
/// provider and configuration.
///
/// Cloning is cheap and clones share fonts, so a context can be handed to
/// several threads; renders only ever read a snapshot of the fonts.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    fonts: FontContext,
    resources: Arc<dyn ResourceProvider>,
    config: RenderConfig,
}

impl Default for GlobalContext {
    fn default() -> Self {
        Self {
            fonts: FontContext::new(),
            resources: Arc::new(InMemoryResourceProvider::new()),
            config: RenderConfig::default(),
        }
    }
}

impl GlobalContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resources(mut self, resources: Arc<dyn ResourceProvider>) -> Self {
        self.resources = resources;
        self
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Parses and registers every face in a font file or collection.
    pub fn load_font(&self, bytes: impl Into<Vec<u8>>) -> Result<Vec<FontId>, FontError> {
        self.fonts.load_font(bytes)
    }

    /// Like [`load_font`](Self::load_font), overriding the family, weight or
    /// style read from the file.
    pub fn load_font_with(
        &self,
        bytes: impl Into<Vec<u8>>,
        options: &FontLoadOptions,
    ) -> Result<Vec<FontId>, FontError> {
        self.fonts.load_font_with(bytes, options)
    }

    pub fn fonts(&self) -> &FontContext {
        &self.fonts
    }

    pub fn resources(&self) -> &dyn ResourceProvider {
        self.resources.as_ref()
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }
}
