//! Defines enums for CSS Flexbox layout properties.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FlexDirection {
    #[default]
    Row,
    RowReverse,
    Column,
    ColumnReverse,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FlexWrap {
    #[default]
    #[serde(rename = "nowrap")]
    NoWrap,
    Wrap,
    WrapReverse,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum JustifyContent {
    #[default]
    #[serde(alias = "start", alias = "normal")]
    FlexStart,
    #[serde(alias = "end")]
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AlignItems {
    #[default]
    #[serde(alias = "normal")]
    Stretch,
    #[serde(alias = "start")]
    FlexStart,
    #[serde(alias = "end")]
    FlexEnd,
    Center,
    Baseline,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AlignSelf {
    #[default]
    Auto,
    Stretch,
    #[serde(alias = "start")]
    FlexStart,
    #[serde(alias = "end")]
    FlexEnd,
    Center,
    Baseline,
}

/// Distribution of wrapped flex lines along the cross axis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AlignContent {
    #[default]
    #[serde(alias = "normal")]
    Stretch,
    #[serde(alias = "start")]
    FlexStart,
    #[serde(alias = "end")]
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}
