use pictor_layout::LayoutError;
use pictor_node::NodeError;
use pictor_render::RenderError;
use pictor_traits::{FontError, ResourceError};
use thiserror::Error;

/// Everything that can stop a render.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid node JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    Input(#[from] NodeError),

    #[error("Font error: {0}")]
    Font(#[from] FontError),

    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Buffer too small: {needed} bytes needed, {available} available")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("Render was cancelled")]
    Cancelled,

    #[error("Invalid configuration: {0}")]
    Config(String),
}
