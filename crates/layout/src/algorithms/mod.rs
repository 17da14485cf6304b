pub mod flex;

pub use flex::computed_style_to_taffy;
