use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Failed to decode image '{src}': {message}")]
    Decode { src: String, message: String },

    #[error("Failed to encode {format}: {message}")]
    Encode { format: String, message: String },

    #[error("No encoder available for {0}")]
    UnsupportedFormat(String),

    #[error("Cannot allocate a {width}x{height} canvas")]
    CanvasAllocation { width: u32, height: u32 },

    #[error("Invalid pixel buffer: {0}")]
    InvalidBuffer(String),
}
