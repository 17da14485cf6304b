mod common;

use common::fixtures::*;
use common::{TestResult, context_with_fonts, decode_png, node, render_rgba};
use pictor::{
    Color, GlobalContext, ImageFormat, InMemoryResourceProvider, PipelineError, RenderOptions,
    Viewport, render, render_json, render_with,
};
use serde_json::json;
use std::sync::Arc;

fn card() -> serde_json::Value {
    container(
        json!({
            "flexDirection": "column",
            "padding": 12,
            "gap": 6,
            "backgroundColor": "#f8fafc",
            "borderRadius": 8,
            "border": "2px solid #334155"
        }),
        vec![
            text(
                "Quarterly report",
                json!({ "fontSize": 22, "fontWeight": "bold", "color": "#0f172a" }),
            ),
            text("Revenue grew in every region.", json!({ "fontSize": 14, "color": "#475569" })),
        ],
    )
}

#[test]
fn test_rendering_is_deterministic() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();
    let global = context_with_fonts()?;
    let tree = node(card())?;
    let first = render(&global, &tree, Viewport::new(320, 120), ImageFormat::Png)?;
    let second = render(&global, &tree, Viewport::new(320, 120), ImageFormat::Png)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_render_json_wire_format() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();
    let global = GlobalContext::new();
    let json = r##"{
        "type": "container",
        "key": "root",
        "props": { "ignored": true },
        "style": { "width": 6, "height": 6, "backgroundColor": "#00ff00" },
        "children": null
    }"##;
    let png = render_json(&global, json, Viewport::auto(), ImageFormat::Png)?;
    let img = decode_png(&png)?;
    assert_eq!(img.dimensions(), (6, 6));
    assert_pixel!(img, 3, 3, [0, 255, 0, 255]);

    let video = r#"{"type": "video"}"#;
    let err = render_json(&global, video, Viewport::auto(), ImageFormat::Png).unwrap_err();
    assert!(matches!(err, PipelineError::Json(_)));
    Ok(())
}

#[test]
fn test_invalid_image_dimensions_are_rejected() -> TestResult {
    let global = GlobalContext::new();
    let tree = node(container(
        json!({}),
        vec![json!({ "type": "image", "src": "a.png", "width": -5 })],
    ))?;
    let err = render(&global, &tree, Viewport::new(10, 10), ImageFormat::Png).unwrap_err();
    assert!(matches!(err, PipelineError::Input(_)));
    assert!(err.to_string().contains("root/0"), "{}", err);
    Ok(())
}

#[test]
fn test_images_from_provider_and_data_uri() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();
    let provider = InMemoryResourceProvider::new();
    let red = image::RgbaImage::from_pixel(4, 4, image::Rgba([255, 0, 0, 255]));
    let mut red_png = std::io::Cursor::new(Vec::new());
    red.write_to(&mut red_png, image::ImageFormat::Png)?;
    provider.add("red.png", red_png.into_inner())?;
    let global = GlobalContext::new().with_resources(Arc::new(provider));

    let tree = container(
        json!({ "alignItems": "flex-start" }),
        vec![
            json!({ "type": "image", "src": "red.png", "width": 10, "height": 10 }),
            json!({
                "type": "image",
                "src": png_data_uri([0, 0, 255, 255]),
                "width": 10,
                "height": 10
            }),
        ],
    );
    let img = render_rgba(&global, tree, Viewport::auto())?;
    assert_eq!(img.dimensions(), (20, 10));
    assert_pixel!(img, 5, 5, [255, 0, 0, 255]);
    assert_pixel!(img, 15, 5, [0, 0, 255, 255]);
    Ok(())
}

#[test]
fn test_missing_and_remote_images_fail() -> TestResult {
    let global = GlobalContext::new();
    for src in ["nowhere.png", "https://example.com/logo.png"] {
        let tree = node(json!({ "type": "image", "src": src }))?;
        let err = render(&global, &tree, Viewport::new(10, 10), ImageFormat::Png).unwrap_err();
        assert!(matches!(err, PipelineError::Resource(_)), "{}: {}", src, err);
    }
    Ok(())
}

#[test]
fn test_diagnostics_and_background() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();
    let global = GlobalContext::new();
    let tree = node(json!({
        "type": "container",
        "style": { "width": "wide", "opacity": 1 },
        "children": []
    }))?;
    let output = render_with(
        RenderOptions::builder(&global, &tree)
            .viewport(Viewport::new(4, 4))
            .background(Color::rgb(10, 20, 30))
            .build(),
    )?;
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.diagnostics[0].property, "width");
    assert_eq!((output.width, output.height), (4, 4));
    assert_pixel!(decode_png(&output.bytes)?, 0, 0, [10, 20, 30, 255]);
    Ok(())
}

#[test]
fn test_shared_context_across_threads() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();
    let global = context_with_fonts()?;
    let tree = node(card())?;
    let expected = render(&global, &tree, Viewport::new(320, 120), ImageFormat::Png)?;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let global = global.clone();
            let tree = tree.clone();
            std::thread::spawn(move || {
                render(&global, &tree, Viewport::new(320, 120), ImageFormat::Png)
            })
        })
        .collect();
    for handle in handles {
        let bytes = handle.join().map_err(|_| "render thread panicked")??;
        assert_eq!(bytes, expected);
    }
    Ok(())
}

#[cfg(feature = "parallel")]
#[test]
fn test_render_batch_keeps_job_order() -> TestResult {
    use pictor::{BatchJob, Node, render_batch};

    let _ = env_logger::builder().is_test(true).try_init();
    let global = GlobalContext::new();
    let jobs: Vec<BatchJob> = (1..=3)
        .map(|size| BatchJob {
            node: Node::container(vec![]),
            viewport: Viewport::new(size, size),
            format: ImageFormat::Png,
        })
        .collect();
    let results = render_batch(&global, &jobs);
    for (size, result) in (1..=3).zip(results) {
        assert_eq!(decode_png(&result?)?.dimensions(), (size, size));
    }
    Ok(())
}
