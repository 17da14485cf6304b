//! End-to-end render benchmarks
//!
//! Measures the full pipeline with varying:
//! - Row counts (1, 10, 50)
//! - Output formats (PNG, JPEG, WebP)
//! - Batch sizes with the `parallel` feature
//!
//! Run benchmarks: `cargo bench --bench render_throughput`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use pictor::{GlobalContext, ImageFormat, Node, Viewport, render};
use serde_json::{Value, json};

fn context() -> GlobalContext {
    let global = GlobalContext::new();
    let font = std::fs::read("assets/fonts/DejaVuSans.ttf").expect("Failed to read font");
    global.load_font(font).expect("Failed to load font");
    global
}

/// A list of styled rows, each a colored dot and a line of text.
fn table(rows: usize) -> Node {
    let children: Vec<Value> = (0..rows)
        .map(|i| {
            json!({
                "type": "container",
                "style": { "flexDirection": "row", "alignItems": "center", "gap": 8 },
                "children": [
                    { "type": "container", "style": {
                        "width": 12, "height": 12, "borderRadius": 6,
                        "backgroundColor": if i % 2 == 0 { "#16a34a" } else { "#dc2626" }
                    }},
                    { "type": "text", "text": format!("Row {} of the report", i),
                      "style": { "fontSize": 14, "color": "#111827" } }
                ]
            })
        })
        .collect();
    let tree = json!({
        "type": "container",
        "style": {
            "flexDirection": "column",
            "padding": 16,
            "gap": 4,
            "backgroundColor": "#ffffff"
        },
        "children": children
    });
    Node::from_json(&tree.to_string()).expect("Failed to parse tree")
}

fn benchmark_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("rows");
    let global = context();

    for rows in [1, 10, 50] {
        let tree = table(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::new("png", rows), &tree, |b, tree| {
            b.iter(|| {
                render(&global, tree, Viewport::new(400, 1200), ImageFormat::Png)
                    .expect("Failed to render")
            })
        });
    }

    group.finish();
}

fn benchmark_formats(c: &mut Criterion) {
    let mut group = c.benchmark_group("format");
    let global = context();
    let tree = table(10);

    for format in [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::WebP] {
        group.bench_with_input(BenchmarkId::from_parameter(format), &format, |b, &format| {
            b.iter(|| {
                render(&global, &tree, Viewport::new(400, 300), format).expect("Failed to render")
            })
        });
    }

    group.finish();
}

#[cfg(feature = "parallel")]
fn benchmark_batch(c: &mut Criterion) {
    use pictor::{BatchJob, render_batch};

    let mut group = c.benchmark_group("batch");
    let global = context();

    for size in [4, 16] {
        let jobs: Vec<BatchJob> = (0..size)
            .map(|_| BatchJob {
                node: table(10),
                viewport: Viewport::new(400, 300),
                format: ImageFormat::Png,
            })
            .collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("jobs", size), &jobs, |b, jobs| {
            b.iter(|| render_batch(&global, jobs))
        });
    }

    group.finish();
}

#[cfg(not(feature = "parallel"))]
fn benchmark_batch(_c: &mut Criterion) {}

criterion_group!(benches, benchmark_rows, benchmark_formats, benchmark_batch);
criterion_main!(benches);
