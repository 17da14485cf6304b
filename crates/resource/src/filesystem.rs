//! Loads image sources from an asset directory.
//!
//! Keys are relative paths. Absolute paths and keys that would leave the asset
//! directory (`../secret.png`) are refused.

use pictor_traits::{ResourceError, ResourceProvider, SharedResourceData};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

#[derive(Debug)]
pub struct FilesystemResourceProvider {
    root: PathBuf,
    /// `None` when the root does not exist (yet); only lexical checks apply then.
    canonical_root: Option<PathBuf>,
}

impl FilesystemResourceProvider {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        let canonical_root = root.canonicalize().ok();
        Self { root, canonical_root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a key to a path inside the root, or `None` if it escapes.
    fn resolve(&self, key: &str) -> Option<PathBuf> {
        let relative = Path::new(key);
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return None;
        }

        let candidate = self.root.join(relative);
        match (candidate.canonicalize(), &self.canonical_root) {
            // Symlinks may still point outside the root.
            (Ok(real), Some(root)) => real.starts_with(root).then_some(real),
            _ => Some(candidate),
        }
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let full_path = self.resolve(path).ok_or_else(|| {
            log::warn!("Refusing resource path outside asset root: {}", path);
            ResourceError::NotFound(format!("{} (outside asset root)", path))
        })?;

        std::fs::read(&full_path).map(Arc::new).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ResourceError::NotFound(path.to_string()),
            _ => ResourceError::LoadFailed {
                path: path.to_string(),
                message: e.to_string(),
            },
        })
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_some_and(|p| p.is_file())
    }

    fn base_path(&self) -> Option<&str> {
        self.root.to_str()
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_nested_files() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("img")).unwrap();
        fs::write(dir.path().join("img/dot.png"), b"png-bytes").unwrap();

        let provider = FilesystemResourceProvider::new(dir.path());
        assert!(provider.exists("img/dot.png"));
        assert_eq!(&*provider.load("img/dot.png").unwrap(), b"png-bytes");
        assert!(!provider.exists("img"));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let provider = FilesystemResourceProvider::new(dir.path());
        assert!(matches!(provider.load("nope.png"), Err(ResourceError::NotFound(_))));
    }

    #[test]
    fn refuses_paths_outside_root() {
        let dir = tempdir().unwrap();
        let inner = dir.path().join("assets");
        fs::create_dir(&inner).unwrap();
        fs::write(dir.path().join("secret.txt"), b"x").unwrap();

        let provider = FilesystemResourceProvider::new(&inner);
        assert!(provider.load("../secret.txt").is_err());
        assert!(!provider.exists("./../secret.txt"));
        let absolute = dir.path().join("secret.txt");
        assert!(provider.load(absolute.to_str().unwrap()).is_err());
    }
}
