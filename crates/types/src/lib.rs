pub mod color;
pub mod geometry;
pub mod ids;

pub use color::Color;
pub use geometry::{Edges, Rect, Size};
pub use ids::{FontId, NodePath};
