//! Where image sources come from.
//!
//! A node's `src` is resolved in this order: `data:` URIs are decoded in
//! place, remote URLs are refused, and anything else is a key handed to the
//! configured [`ResourceProvider`].

use crate::data_uri::parse_data_uri;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error type for resource loading operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to load resource '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Invalid resource format: {0}")]
    InvalidFormat(String),

    #[error("Unsupported resource source '{0}': only data URIs and local resources can be loaded")]
    Unsupported(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ResourceError {
    fn from(err: std::io::Error) -> Self {
        ResourceError::Io(err.to_string())
    }
}

/// Shared resource data type (reference-counted bytes).
pub type SharedResourceData = Arc<Vec<u8>>;

/// Loads raw bytes for a resource key.
///
/// Implementations must be shareable across render threads.
pub trait ResourceProvider: Send + Sync + Debug {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError>;

    fn exists(&self, path: &str) -> bool;

    /// Base path for relative keys, if the provider has one.
    fn base_path(&self) -> Option<&str> {
        None
    }

    /// Human-readable provider name for log messages.
    fn name(&self) -> &'static str;
}

/// Resolves an image `src` to bytes.
pub fn resolve_source(
    provider: &dyn ResourceProvider,
    src: &str,
) -> Result<SharedResourceData, ResourceError> {
    let trimmed = src.trim();
    if trimmed.get(..5).is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:")) {
        return parse_data_uri(trimmed).map(|uri| Arc::new(uri.data));
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Err(ResourceError::Unsupported(trimmed.to_string()));
    }
    log::trace!("Loading '{}' from {}", trimmed, provider.name());
    provider.load(trimmed)
}

/// Resources held in memory, keyed by name.
#[derive(Debug, Default)]
pub struct InMemoryResourceProvider {
    resources: RwLock<HashMap<String, SharedResourceData>>,
}

impl InMemoryResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `data` under `path`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::LoadFailed` if the internal lock is poisoned.
    pub fn add(&self, path: impl Into<String>, data: Vec<u8>) -> Result<(), ResourceError> {
        self.add_shared(path, Arc::new(data))
    }

    pub fn add_shared(
        &self,
        path: impl Into<String>,
        data: SharedResourceData,
    ) -> Result<(), ResourceError> {
        let key = path.into();
        let mut resources = self.resources.write().map_err(|_| poisoned(&key))?;
        resources.insert(key, data);
        Ok(())
    }

    pub fn remove(&self, path: &str) -> Option<SharedResourceData> {
        self.resources.write().ok()?.remove(path)
    }

    /// Number of stored resources; 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.resources.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned(path: &str) -> ResourceError {
    ResourceError::LoadFailed {
        path: path.to_string(),
        message: "resource store lock poisoned".to_string(),
    }
}

impl ResourceProvider for InMemoryResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let resources = self.resources.read().map_err(|_| poisoned(path))?;
        resources
            .get(path)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(path.to_string()))
    }

    fn exists(&self, path: &str) -> bool {
        self.resources
            .read()
            .map(|r| r.contains_key(path))
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "InMemoryResourceProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_add_load_replace_remove() {
        let provider = InMemoryResourceProvider::new();
        provider.add("logo.png", b"first".to_vec()).unwrap();
        provider.add("logo.png", b"second".to_vec()).unwrap();

        assert_eq!(provider.len(), 1);
        assert_eq!(&*provider.load("logo.png").unwrap(), b"second");
        assert!(provider.remove("logo.png").is_some());
        assert!(provider.is_empty());
        assert!(matches!(provider.load("logo.png"), Err(ResourceError::NotFound(_))));
    }

    #[test]
    fn resolve_prefers_data_uris_and_refuses_remote() {
        let provider = InMemoryResourceProvider::new();
        provider.add("local", vec![7]).unwrap();

        let uri = "data:application/octet-stream;base64,AQID";
        let inline = resolve_source(&provider, uri).unwrap();
        assert_eq!(&*inline, &[1, 2, 3]);
        assert_eq!(&*resolve_source(&provider, " local ").unwrap(), &[7]);
        assert!(matches!(
            resolve_source(&provider, "https://example.com/a.png"),
            Err(ResourceError::Unsupported(_))
        ));
    }
}
