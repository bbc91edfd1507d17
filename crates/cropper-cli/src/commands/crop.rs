use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use cropper_core::geometry::Size;
use cropper_core::pointer::PointerEvent;
use cropper_core::viewport::ViewportSpec;
use tracing::info;

use crate::commands::{load_config, open_cropper, parse_pair, parse_size, parse_viewport};
use crate::summary::print_cropper_summary;

#[derive(Args)]
pub struct CropArgs {
    /// Input image
    pub file: PathBuf,

    /// Output JPEG (auto-generated if not provided)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Container size the widget is laid out in
    #[arg(long, default_value = "400x400", value_parser = parse_size)]
    pub container: Size,

    /// Cropper config file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Crop box as WIDTH,HEIGHT (e.g. 80%,80% or 320px,240px)
    #[arg(long, value_parser = parse_viewport)]
    pub viewport: Option<ViewportSpec>,

    /// Drag the zoom slider dot by this many pixels (negative zooms out)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub slider: f64,

    /// Drag the image by DX,DY pixels after zooming
    #[arg(long, value_parser = parse_pair, allow_hyphen_values = true)]
    pub pan: Option<(f64, f64)>,
}

pub fn run(args: &CropArgs) -> Result<()> {
    let config = load_config(args.config.as_deref(), args.viewport.as_ref())?;
    let mut cropper = open_cropper(&args.file, args.container, &config)?;

    if args.slider != 0.0 {
        cropper.handle_slider_event(PointerEvent::Down)?;
        cropper.handle_slider_event(PointerEvent::Move {
            dx: args.slider,
            dy: 0.0,
        })?;
        cropper.handle_slider_event(PointerEvent::Up)?;
    }
    if let Some((dx, dy)) = args.pan {
        cropper.handle_canvas_event(PointerEvent::Down)?;
        cropper.handle_canvas_event(PointerEvent::Move { dx, dy })?;
        cropper.handle_canvas_event(PointerEvent::Up)?;
    }
    let frame = cropper.on_animation_frame();
    info!(?frame, "Gesture applied");

    print_cropper_summary(&args.file, &cropper);

    let encoded = cropper.result()?;
    let output_path = args.output.clone().unwrap_or_else(|| {
        crop_output_path(&args.file, encoded.width, encoded.height, encoded.format.extension())
    });
    std::fs::write(&output_path, &encoded.bytes)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    println!(
        "Saved {}x{} {} to {}",
        encoded.width,
        encoded.height,
        encoded.format,
        output_path.display()
    );
    Ok(())
}

fn crop_output_path(source: &Path, w: u32, h: u32, ext: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let parent = source.parent().unwrap_or(Path::new("."));
    parent.join(format!("{stem}_crop{w}x{h}.{ext}"))
}
