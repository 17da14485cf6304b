use crate::style::{ComputedStyle, Length, Sides};
use pictor_style::{AlignContent, AlignItems, AlignSelf, FlexDirection, FlexWrap, JustifyContent};
use pictor_style::{Overflow, Position};
use pictor_types::Edges;
use taffy::style::{LengthPercentage, LengthPercentageAuto};

pub fn computed_style_to_taffy(style: &ComputedStyle) -> taffy::style::Style {
    let overflow = match style.visual.overflow {
        Overflow::Visible => taffy::style::Overflow::Visible,
        Overflow::Hidden => taffy::style::Overflow::Hidden,
    };
    taffy::style::Style {
        display: taffy::style::Display::Flex,
        box_sizing: taffy::style::BoxSizing::BorderBox,
        overflow: taffy::geometry::Point { x: overflow, y: overflow },
        position: match style.position.position {
            Position::Relative => taffy::style::Position::Relative,
            Position::Absolute => taffy::style::Position::Absolute,
        },
        inset: to_taffy_inset(&style.position.inset),
        size: taffy::geometry::Size {
            width: to_taffy_dimension(style.box_model.width),
            height: to_taffy_dimension(style.box_model.height),
        },
        min_size: taffy::geometry::Size {
            width: to_taffy_dimension(style.box_model.min_width),
            height: to_taffy_dimension(style.box_model.min_height),
        },
        max_size: taffy::geometry::Size {
            width: to_taffy_dimension(style.box_model.max_width),
            height: to_taffy_dimension(style.box_model.max_height),
        },
        aspect_ratio: style.box_model.aspect_ratio,
        margin: to_taffy_margin(&style.box_model.margin),
        padding: to_taffy_padding(&style.box_model.padding),
        border: to_taffy_border(&style.border.width),
        align_items: to_taffy_align_items(style.flex.align_items),
        align_self: to_taffy_align_self(style.flex.align_self),
        align_content: to_taffy_align_content(style.flex.align_content),
        justify_content: to_taffy_justify_content(style.flex.justify_content),
        gap: taffy::geometry::Size {
            width: to_taffy_length_percentage(style.flex.column_gap),
            height: to_taffy_length_percentage(style.flex.row_gap),
        },
        flex_direction: to_taffy_flex_direction(style.flex.direction),
        flex_wrap: to_taffy_flex_wrap(style.flex.wrap),
        flex_grow: style.flex.grow,
        flex_shrink: style.flex.shrink,
        flex_basis: to_taffy_dimension(style.flex.basis),
        ..Default::default()
    }
}

pub fn to_taffy_dimension(d: Length) -> taffy::style::Dimension {
    match d {
        Length::Px(v) => taffy::style::Dimension::length(v),
        Length::Percent(v) => taffy::style::Dimension::percent(v / 100.0),
        Length::Auto => taffy::style::Dimension::auto(),
    }
}

/// Padding and gaps have no `auto`; it behaves as zero.
pub fn to_taffy_length_percentage(d: Length) -> LengthPercentage {
    match d {
        Length::Px(v) => LengthPercentage::length(v),
        Length::Percent(v) => LengthPercentage::percent(v / 100.0),
        Length::Auto => LengthPercentage::length(0.0),
    }
}

pub fn to_taffy_length_percentage_auto(d: Length) -> LengthPercentageAuto {
    match d {
        Length::Px(v) => LengthPercentageAuto::length(v),
        Length::Percent(v) => LengthPercentageAuto::percent(v / 100.0),
        Length::Auto => LengthPercentageAuto::auto(),
    }
}

pub fn to_taffy_margin(m: &Sides) -> taffy::geometry::Rect<LengthPercentageAuto> {
    taffy::geometry::Rect {
        left: to_taffy_length_percentage_auto(m.left),
        right: to_taffy_length_percentage_auto(m.right),
        top: to_taffy_length_percentage_auto(m.top),
        bottom: to_taffy_length_percentage_auto(m.bottom),
    }
}

pub fn to_taffy_inset(m: &Sides) -> taffy::geometry::Rect<LengthPercentageAuto> {
    to_taffy_margin(m)
}

pub fn to_taffy_padding(m: &Sides) -> taffy::geometry::Rect<LengthPercentage> {
    taffy::geometry::Rect {
        left: to_taffy_length_percentage(m.left),
        right: to_taffy_length_percentage(m.right),
        top: to_taffy_length_percentage(m.top),
        bottom: to_taffy_length_percentage(m.bottom),
    }
}

pub fn to_taffy_border(b: &Edges) -> taffy::geometry::Rect<LengthPercentage> {
    taffy::geometry::Rect {
        left: LengthPercentage::length(b.left),
        right: LengthPercentage::length(b.right),
        top: LengthPercentage::length(b.top),
        bottom: LengthPercentage::length(b.bottom),
    }
}

pub fn to_taffy_align_items(a: AlignItems) -> Option<taffy::style::AlignItems> {
    match a {
        AlignItems::Stretch => Some(taffy::style::AlignItems::Stretch),
        AlignItems::FlexStart => Some(taffy::style::AlignItems::FlexStart),
        AlignItems::FlexEnd => Some(taffy::style::AlignItems::FlexEnd),
        AlignItems::Center => Some(taffy::style::AlignItems::Center),
        AlignItems::Baseline => Some(taffy::style::AlignItems::Baseline),
    }
}

pub fn to_taffy_align_self(a: AlignSelf) -> Option<taffy::style::AlignSelf> {
    match a {
        AlignSelf::Auto => None,
        AlignSelf::Stretch => Some(taffy::style::AlignSelf::Stretch),
        AlignSelf::FlexStart => Some(taffy::style::AlignSelf::FlexStart),
        AlignSelf::FlexEnd => Some(taffy::style::AlignSelf::FlexEnd),
        AlignSelf::Center => Some(taffy::style::AlignSelf::Center),
        AlignSelf::Baseline => Some(taffy::style::AlignSelf::Baseline),
    }
}

pub fn to_taffy_align_content(a: AlignContent) -> Option<taffy::style::AlignContent> {
    match a {
        AlignContent::Stretch => Some(taffy::style::AlignContent::Stretch),
        AlignContent::FlexStart => Some(taffy::style::AlignContent::FlexStart),
        AlignContent::FlexEnd => Some(taffy::style::AlignContent::FlexEnd),
        AlignContent::Center => Some(taffy::style::AlignContent::Center),
        AlignContent::SpaceBetween => Some(taffy::style::AlignContent::SpaceBetween),
        AlignContent::SpaceAround => Some(taffy::style::AlignContent::SpaceAround),
        AlignContent::SpaceEvenly => Some(taffy::style::AlignContent::SpaceEvenly),
    }
}

pub fn to_taffy_justify_content(j: JustifyContent) -> Option<taffy::style::JustifyContent> {
    match j {
        JustifyContent::FlexStart => Some(taffy::style::JustifyContent::FlexStart),
        JustifyContent::FlexEnd => Some(taffy::style::JustifyContent::FlexEnd),
        JustifyContent::Center => Some(taffy::style::JustifyContent::Center),
        JustifyContent::SpaceBetween => Some(taffy::style::JustifyContent::SpaceBetween),
        JustifyContent::SpaceAround => Some(taffy::style::JustifyContent::SpaceAround),
        JustifyContent::SpaceEvenly => Some(taffy::style::JustifyContent::SpaceEvenly),
    }
}

pub fn to_taffy_flex_direction(f: FlexDirection) -> taffy::style::FlexDirection {
    match f {
        FlexDirection::Row => taffy::style::FlexDirection::Row,
        FlexDirection::RowReverse => taffy::style::FlexDirection::RowReverse,
        FlexDirection::Column => taffy::style::FlexDirection::Column,
        FlexDirection::ColumnReverse => taffy::style::FlexDirection::ColumnReverse,
    }
}

pub fn to_taffy_flex_wrap(f: FlexWrap) -> taffy::style::FlexWrap {
    match f {
        FlexWrap::NoWrap => taffy::style::FlexWrap::NoWrap,
        FlexWrap::Wrap => taffy::style::FlexWrap::Wrap,
        FlexWrap::WrapReverse => taffy::style::FlexWrap::WrapReverse,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::ComputedStyleData;

    #[test]
    fn percentages_become_fractions() {
        let mut data = ComputedStyleData::default();
        data.box_model.width = Length::Percent(50.0);
        data.box_model.padding = Sides::all(Length::Auto);
        data.position.position = Position::Absolute;
        let taffy_style = computed_style_to_taffy(&ComputedStyle::new(data));

        assert_eq!(taffy_style.size.width, taffy::style::Dimension::percent(0.5));
        assert_eq!(taffy_style.padding.left, LengthPercentage::length(0.0));
        assert_eq!(taffy_style.position, taffy::style::Position::Absolute);
        assert_eq!(taffy_style.flex_shrink, 1.0);
    }
}
