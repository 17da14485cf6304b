/// Asserts the RGBA value of one pixel.
#[macro_export]
macro_rules! assert_pixel {
    ($img:expr, $x:expr, $y:expr, $rgba:expr) => {{
        let actual = $img.get_pixel($x, $y).0;
        assert_eq!(
            actual, $rgba,
            "pixel ({}, {}) is {:?}, expected {:?}",
            $x, $y, actual, $rgba
        );
    }};
}

/// Asserts every channel of one pixel is within `tolerance` of `expected`.
#[macro_export]
macro_rules! assert_pixel_near {
    ($img:expr, $x:expr, $y:expr, $rgba:expr, $tolerance:expr) => {{
        let actual = $img.get_pixel($x, $y).0;
        let expected: [u8; 4] = $rgba;
        for c in 0..4 {
            assert!(
                actual[c].abs_diff(expected[c]) <= $tolerance,
                "pixel ({}, {}) is {:?}, expected {:?} ± {}",
                $x, $y, actual, expected, $tolerance
            );
        }
    }};
}

/// Horizontal extent `[first, last]` of pixels in row `y` matching `rgba`.
pub fn row_span(img: &image::RgbaImage, y: u32, rgba: [u8; 4]) -> Option<(u32, u32)> {
    let xs: Vec<u32> = (0..img.width()).filter(|&x| img.get_pixel(x, y).0 == rgba).collect();
    Some((*xs.first()?, *xs.last()?))
}
