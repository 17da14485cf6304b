#![allow(dead_code)]

pub mod fixtures;
pub mod image_assertions;

use pictor::{GlobalContext, ImageFormat, Node, PipelineError, Viewport, render};
use serde_json::Value;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub const REGULAR_FONT: &str = "assets/fonts/DejaVuSans.ttf";
pub const BOLD_FONT: &str = "assets/fonts/DejaVuSans-Bold.ttf";

/// A context with the bundled DejaVu Sans faces loaded.
pub fn context_with_fonts() -> Result<GlobalContext, Box<dyn std::error::Error>> {
    let global = GlobalContext::new();
    global.load_font(std::fs::read(REGULAR_FONT)?)?;
    global.load_font(std::fs::read(BOLD_FONT)?)?;
    Ok(global)
}

pub fn node(tree: Value) -> Result<Node, PipelineError> {
    Ok(Node::from_json(&tree.to_string())?)
}

/// Renders a JSON tree to PNG and decodes it back to RGBA.
pub fn render_rgba(
    global: &GlobalContext,
    tree: Value,
    viewport: Viewport,
) -> Result<image::RgbaImage, Box<dyn std::error::Error>> {
    let bytes = render(global, &node(tree)?, viewport, ImageFormat::Png)?;
    decode_png(&bytes)
}

pub fn decode_png(bytes: &[u8]) -> Result<image::RgbaImage, Box<dyn std::error::Error>> {
    Ok(image::load_from_memory_with_format(bytes, image::ImageFormat::Png)?.to_rgba8())
}
