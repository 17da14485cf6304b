//! Render declarative `container`/`text`/`image` trees with CSS-like styles
//! to PNG, JPEG, WebP and other raster formats.
//!
//! ```no_run
//! use pictor::{GlobalContext, ImageFormat, Node, Viewport, render};
//!
//! let global = GlobalContext::new();
//! global.load_font(std::fs::read("assets/fonts/DejaVuSans.ttf")?)?;
//!
//! let tree = Node::from_json(r#"{"type": "text", "text": "Hello", "style": {"fontSize": 32}}"#)?;
//! let png = render(&global, &tree, Viewport::new(400, 100), ImageFormat::Png)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod context;
pub mod error;
pub mod options;
pub mod pipeline;

pub use context::{GlobalContext, RenderConfig};
pub use error::PipelineError;
pub use options::{RenderOptions, RenderOptionsBuilder, RenderOutput, Viewport};
pub use pipeline::{
    calculate_buffer_size, render, render_json, render_pixels, render_to_buffer, render_to_file,
    render_with,
};
#[cfg(feature = "parallel")]
pub use pipeline::{BatchJob, render_batch};

pub use pictor_layout::{FontContext, FontLoadOptions, LayoutConfig};
pub use pictor_node::{Node, NodeError, NodeMeta, StyleValue};
pub use pictor_render::{EncodeOptions, ImageFormat, PixelBuffer, RenderError};
pub use pictor_resource::{FilesystemResourceProvider, InMemoryResourceProvider};
pub use pictor_style::{FontStyle, FontWeight, StyleDiagnostic};
pub use pictor_traits::{FontError, ResourceError, ResourceProvider};
pub use pictor_types::{Color, FontId};
