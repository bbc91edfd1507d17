use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use cropper_core::geometry::Size;

use crate::commands::{load_config, open_cropper, parse_size, parse_viewport};
use crate::summary::print_cropper_summary;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image
    pub file: PathBuf,

    /// Container size the widget is laid out in
    #[arg(long, default_value = "400x400", value_parser = parse_size)]
    pub container: Size,

    /// Cropper config file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Crop box as WIDTH,HEIGHT (e.g. 80%,80% or 320px,240px)
    #[arg(long, value_parser = parse_viewport)]
    pub viewport: Option<cropper_core::viewport::ViewportSpec>,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let config = load_config(args.config.as_deref(), args.viewport.as_ref())?;
    let cropper = open_cropper(&args.file, args.container, &config)?;
    print_cropper_summary(&args.file, &cropper);
    Ok(())
}
