use serde_json::{Value, json};

pub fn container(style: Value, children: Vec<Value>) -> Value {
    json!({ "type": "container", "style": style, "children": children })
}

pub fn text(content: &str, style: Value) -> Value {
    json!({ "type": "text", "text": content, "style": style })
}

/// A fixed-size box filled with `color`.
pub fn swatch(width: f32, height: f32, color: &str) -> Value {
    json!({
        "type": "container",
        "style": { "width": width, "height": height, "backgroundColor": color }
    })
}

/// A 2x2 PNG of one color, as a `data:` URI.
pub fn png_data_uri(rgba: [u8; 4]) -> String {
    use std::io::Cursor;

    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba(rgba));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("in-memory PNG encoding");
    let encoded = base64_encode(&out.into_inner());
    format!("data:image/png;base64,{}", encoded)
}

fn base64_encode(bytes: &[u8]) -> String {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.encode(bytes)
}
