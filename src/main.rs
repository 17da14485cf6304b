use clap::{Parser, Subcommand};
use pictor::{
    EncodeOptions, FilesystemResourceProvider, GlobalContext, ImageFormat, Node, PipelineError,
    RenderConfig, RenderOutput, Viewport, render_to_file,
};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(version, about = "Render JSON node trees to images")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a node tree file to an image
    Render(RenderArgs),
}

#[derive(clap::Args, Debug)]
struct RenderArgs {
    /// Path to the node tree JSON
    input: PathBuf,

    /// Output image path
    #[arg(short, long)]
    output: PathBuf,

    /// Image width in pixels, or `auto`
    #[arg(long, default_value = "auto", value_parser = parse_dimension)]
    width: Dimension,

    /// Image height in pixels, or `auto`
    #[arg(long, default_value = "auto", value_parser = parse_dimension)]
    height: Dimension,

    /// Root font size in pixels
    #[arg(long, default_value_t = 16.0)]
    font_size: f32,

    /// Device pixel ratio
    #[arg(long, default_value_t = 1.0)]
    dpr: f32,

    /// Output format; inferred from the output extension when omitted
    #[arg(long, value_parser = parse_format)]
    format: Option<ImageFormat>,

    /// Font files to load (repeatable)
    #[arg(long = "font")]
    fonts: Vec<PathBuf>,

    /// Directory image sources are resolved against
    #[arg(long)]
    assets: Option<PathBuf>,

    /// JPEG/AVIF quality (1-100)
    #[arg(long)]
    quality: Option<u8>,
}

/// A pixel count, or `None` for `auto`.
#[derive(Debug, Clone, Copy)]
struct Dimension(Option<u32>);

fn parse_dimension(value: &str) -> Result<Dimension, String> {
    if value.eq_ignore_ascii_case("auto") {
        return Ok(Dimension(None));
    }
    value
        .parse::<u32>()
        .map(|px| Dimension(Some(px)))
        .map_err(|e| format!("expected a pixel count or 'auto': {}", e))
}

fn parse_format(value: &str) -> Result<ImageFormat, String> {
    ImageFormat::from_extension(value).ok_or_else(|| format!("unknown image format '{}'", value))
}

fn run(args: RenderArgs) -> Result<RenderOutput, PipelineError> {
    let mut encode = EncodeOptions::default();
    if let Some(quality) = args.quality {
        encode.jpeg_quality = quality;
        encode.avif_quality = quality;
    }

    let mut global = GlobalContext::new().with_config(RenderConfig {
        encode,
        ..RenderConfig::default()
    });
    if let Some(assets) = &args.assets {
        global = global.with_resources(Arc::new(FilesystemResourceProvider::new(assets)));
    }
    for path in &args.fonts {
        let ids = global.load_font(fs::read(path)?)?;
        log::info!("Loaded {} face(s) from {}", ids.len(), path.display());
    }

    let node = Node::from_json(&fs::read_to_string(&args.input)?)?;
    let viewport = Viewport {
        width: args.width.0,
        height: args.height.0,
        font_size: args.font_size,
        device_pixel_ratio: args.dpr,
    };
    let output = render_to_file(&global, &node, viewport, args.format, &args.output)?;
    for diagnostic in &output.diagnostics {
        log::warn!("{}", diagnostic);
    }
    Ok(output)
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Render(args) => {
            let output_path = args.output.clone();
            match run(args) {
                Ok(output) => println!(
                    "Wrote {}x{} {} to {}",
                    output.width,
                    output.height,
                    output.format,
                    output_path.display()
                ),
                Err(e) => {
                    eprintln!("error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_tree_file_with_inferred_format() {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tree.json");
        fs::write(
            &input,
            r##"{"type": "container", "style": {"backgroundColor": "#ff0000"}}"##,
        )
        .unwrap();
        let output = dir.path().join("out.png");

        let cli = Cli::parse_from([
            "pictor",
            "render",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--width",
            "6",
            "--height",
            "auto",
        ]);
        let Command::Render(args) = cli.command;
        let rendered = run(args).unwrap();

        assert_eq!(rendered.format, ImageFormat::Png);
        assert_eq!((rendered.width, rendered.height), (6, 1));
        assert_eq!(fs::read(&output).unwrap(), rendered.bytes);
    }

    #[test]
    fn unknown_extension_needs_a_format() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tree.json");
        fs::write(&input, r#"{"type": "container"}"#).unwrap();
        let output = dir.path().join("out.unknown");

        let cli = Cli::parse_from([
            "pictor",
            "render",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ]);
        let Command::Render(args) = cli.command;
        assert!(matches!(run(args), Err(PipelineError::Config(_))));
        assert!(!output.exists());
    }
}
