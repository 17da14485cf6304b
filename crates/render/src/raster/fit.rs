use pictor_style::ObjectFit;
use pictor_types::Rect;

/// Where an image of `width × height` lands inside `container`, centered.
/// The result may overflow the container (`cover`, `none`).
pub fn object_fit_rect(fit: ObjectFit, container: Rect, width: f32, height: f32) -> Rect {
    if width <= 0.0 || height <= 0.0 {
        return container;
    }
    let contain_scale = (container.width / width).min(container.height / height);
    let (w, h) = match fit {
        ObjectFit::Fill => return container,
        ObjectFit::Contain => (width * contain_scale, height * contain_scale),
        ObjectFit::Cover => {
            let scale = (container.width / width).max(container.height / height);
            (width * scale, height * scale)
        }
        ObjectFit::None => (width, height),
        ObjectFit::ScaleDown => {
            let scale = contain_scale.min(1.0);
            (width * scale, height * scale)
        }
    };
    Rect::new(
        container.x + (container.width - w) / 2.0,
        container.y + (container.height - h) / 2.0,
        w,
        h,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOX: Rect = Rect { x: 0.0, y: 0.0, width: 100.0, height: 50.0 };

    #[test]
    fn fill_stretches() {
        assert_eq!(object_fit_rect(ObjectFit::Fill, BOX, 10.0, 10.0), BOX);
    }

    #[test]
    fn contain_and_cover_keep_ratio() {
        assert_eq!(
            object_fit_rect(ObjectFit::Contain, BOX, 20.0, 20.0),
            Rect::new(25.0, 0.0, 50.0, 50.0)
        );
        assert_eq!(
            object_fit_rect(ObjectFit::Cover, BOX, 20.0, 20.0),
            Rect::new(0.0, -25.0, 100.0, 100.0)
        );
    }

    #[test]
    fn scale_down_never_enlarges() {
        assert_eq!(
            object_fit_rect(ObjectFit::ScaleDown, BOX, 10.0, 10.0),
            Rect::new(45.0, 20.0, 10.0, 10.0)
        );
        assert_eq!(
            object_fit_rect(ObjectFit::ScaleDown, BOX, 200.0, 100.0),
            object_fit_rect(ObjectFit::Contain, BOX, 200.0, 100.0)
        );
        assert_eq!(
            object_fit_rect(ObjectFit::None, BOX, 10.0, 10.0),
            Rect::new(45.0, 20.0, 10.0, 10.0)
        );
    }
}
