use pictor_types::NodePath;
use thiserror::Error;

/// Input errors detected before layout.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NodeError {
    #[error("Invalid {field} {value} on node {path}: must be a finite, non-negative number")]
    InvalidDimension {
        path: NodePath,
        field: &'static str,
        value: f32,
    },

    #[error("Image node {path} has an empty src")]
    EmptySource { path: NodePath },
}
