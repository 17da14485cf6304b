pub mod font;
pub mod text;
pub mod flex;
pub mod dimension;
pub mod border;
pub mod visual;
pub mod element;
pub mod parsers;
pub mod declarations;
pub mod palette;
pub mod utility;

pub use font::{FontStyle, FontWeight};
pub use text::{LineHeight, TextAlign, TextDecoration, TextTransform, WhiteSpace};
pub use flex::{AlignContent, AlignItems, AlignSelf, FlexDirection, FlexWrap, JustifyContent};
pub use dimension::{Dimension, SideValues};
pub use border::{Border, BorderStyle};
pub use visual::{Display, ObjectFit, Overflow, Position};
pub use element::ElementStyle;
pub use parsers::StyleParseError;
pub use declarations::{PropertyError, StyleDeclarations, StyleDiagnostic, StyleMap};
pub use utility::parse_utility_classes;
