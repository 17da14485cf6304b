use thiserror::Error;

/// Errors raised while loading or selecting fonts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FontError {
    /// Text had to be shaped but the font context holds no faces.
    #[error("no font loaded")]
    NoFontLoaded,

    #[error("Invalid font data: {0}")]
    InvalidData(String),

    #[error("Font registry lock poisoned")]
    LockPoisoned,

    #[error("Font {0} is not registered")]
    UnknownFont(String),
}
