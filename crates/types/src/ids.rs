//! Newtype wrappers for identifiers shared across the pipeline.

use std::fmt;
use std::sync::Arc;

/// Handle for a font face published in a font context.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct FontId(pub u32);

impl fmt::Display for FontId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font#{}", self.0)
    }
}

/// Location of a node inside the input tree, e.g. `root/2/0`.
///
/// Used to attach validation errors and style diagnostics to the node that
/// produced them.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct NodePath(Arc<str>);

impl NodePath {
    pub fn root() -> Self {
        Self("root".into())
    }

    /// Path of the `index`-th child of this node.
    pub fn child(&self, index: usize) -> Self {
        Self(format!("{}/{}", self.0, index).into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NodePath {
    fn default() -> Self {
        Self::root()
    }
}

impl AsRef<str> for NodePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_paths_nest() {
        let path = NodePath::root().child(2).child(0);
        assert_eq!(path.as_str(), "root/2/0");
        assert_eq!(path.to_string(), "root/2/0");
    }
}
