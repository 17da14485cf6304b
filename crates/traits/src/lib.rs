pub mod data_uri;
pub mod font;
pub mod resource;

pub use data_uri::{DataUri, parse_data_uri};
pub use font::FontError;
pub use resource::{
    InMemoryResourceProvider, ResourceError, ResourceProvider, SharedResourceData, resolve_source,
};
