//! Defines primitives for size, position, and spacing.
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A CSS length before resolution.
///
/// Relative units (`em`, `rem`, `vw`, `vh`) are resolved to pixels by the
/// style resolver. Percentages survive resolution and are handed to layout,
/// which knows the containing block.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Px(f32),
    Percent(f32),
    Em(f32),
    Rem(f32),
    Vw(f32),
    Vh(f32),
    #[default]
    Auto,
}

impl Hash for Dimension {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Dimension::Px(v) => {
                0u8.hash(state);
                v.to_bits().hash(state);
            }
            Dimension::Percent(v) => {
                1u8.hash(state);
                v.to_bits().hash(state);
            }
            Dimension::Em(v) => {
                2u8.hash(state);
                v.to_bits().hash(state);
            }
            Dimension::Rem(v) => {
                3u8.hash(state);
                v.to_bits().hash(state);
            }
            Dimension::Vw(v) => {
                4u8.hash(state);
                v.to_bits().hash(state);
            }
            Dimension::Vh(v) => {
                5u8.hash(state);
                v.to_bits().hash(state);
            }
            Dimension::Auto => {
                6u8.hash(state);
            }
        }
    }
}

impl Eq for Dimension {}

impl Dimension {
    pub const ZERO: Dimension = Dimension::Px(0.0);

    pub fn is_auto(&self) -> bool {
        matches!(self, Dimension::Auto)
    }

    /// The numeric part, if any.
    pub fn value(&self) -> Option<f32> {
        match *self {
            Dimension::Px(v)
            | Dimension::Percent(v)
            | Dimension::Em(v)
            | Dimension::Rem(v)
            | Dimension::Vw(v)
            | Dimension::Vh(v) => Some(v),
            Dimension::Auto => None,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.value().is_some_and(|v| v < 0.0)
    }

    pub fn negate(self) -> Dimension {
        match self {
            Dimension::Px(v) => Dimension::Px(-v),
            Dimension::Percent(v) => Dimension::Percent(-v),
            Dimension::Em(v) => Dimension::Em(-v),
            Dimension::Rem(v) => Dimension::Rem(-v),
            Dimension::Vw(v) => Dimension::Vw(-v),
            Dimension::Vh(v) => Dimension::Vh(-v),
            Dimension::Auto => Dimension::Auto,
        }
    }
}

/// Per-edge values of a box property, each independently optional so that
/// layered declarations (`padding` then `padding-left`) merge edge by edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SideValues {
    pub top: Option<Dimension>,
    pub right: Option<Dimension>,
    pub bottom: Option<Dimension>,
    pub left: Option<Dimension>,
}

impl SideValues {
    pub fn all(value: Dimension) -> Self {
        Self {
            top: Some(value),
            right: Some(value),
            bottom: Some(value),
            left: Some(value),
        }
    }

    pub fn x(value: Dimension) -> Self {
        Self {
            right: Some(value),
            left: Some(value),
            ..Default::default()
        }
    }

    pub fn y(value: Dimension) -> Self {
        Self {
            top: Some(value),
            bottom: Some(value),
            ..Default::default()
        }
    }

    /// Builds edges from a CSS shorthand list of 1 to 4 values.
    pub fn from_shorthand(values: &[Dimension]) -> Option<Self> {
        let (top, right, bottom, left) = match *values {
            [a] => (a, a, a, a),
            [a, b] => (a, b, a, b),
            [a, b, c] => (a, b, c, b),
            [a, b, c, d] => (a, b, c, d),
            _ => return None,
        };
        Some(Self {
            top: Some(top),
            right: Some(right),
            bottom: Some(bottom),
            left: Some(left),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.right.is_none() && self.bottom.is_none() && self.left.is_none()
    }

    /// Overlays the edges that `other` sets.
    pub fn merge(&mut self, other: &SideValues) {
        if other.top.is_some() { self.top = other.top; }
        if other.right.is_some() { self.right = other.right; }
        if other.bottom.is_some() { self.bottom = other.bottom; }
        if other.left.is_some() { self.left = other.left; }
    }

    pub fn any(&self, mut predicate: impl FnMut(&Dimension) -> bool) -> bool {
        [self.top, self.right, self.bottom, self.left]
            .iter()
            .flatten()
            .any(|d| predicate(d))
    }
}
