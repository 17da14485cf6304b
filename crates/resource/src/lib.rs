//! Resource providers for image sources.
//!
//! - [`FilesystemResourceProvider`]: keys are paths under an asset directory
//! - [`InMemoryResourceProvider`]: re-exported from `pictor-traits`

mod filesystem;

pub use filesystem::FilesystemResourceProvider;
pub use pictor_traits::InMemoryResourceProvider;
