pub mod config;
pub mod crop;
pub mod info;

use std::path::Path;

use anyhow::{Context, Result};
use cropper_core::config::CropperConfig;
use cropper_core::cropper::Cropper;
use cropper_core::geometry::Size;
use cropper_core::loader::{DefaultLoader, ImageSource};
use cropper_core::surface::RasterSurface;
use cropper_core::viewport::{ViewportDimension, ViewportSpec};

/// Parse `WIDTHxHEIGHT`, e.g. `400x300`.
pub fn parse_size(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let w: f64 = w.trim().parse().map_err(|_| format!("bad width in {s:?}"))?;
    let h: f64 = h.trim().parse().map_err(|_| format!("bad height in {s:?}"))?;
    if !(w > 0.0 && h > 0.0) {
        return Err(format!("container must be positive, got {s:?}"));
    }
    Ok(Size::new(w, h))
}

/// Parse `DX,DY`.
pub fn parse_pair(s: &str) -> Result<(f64, f64), String> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected DX,DY, got {s:?}"))?;
    let a = a.trim().parse().map_err(|_| format!("bad value in {s:?}"))?;
    let b = b.trim().parse().map_err(|_| format!("bad value in {s:?}"))?;
    Ok((a, b))
}

/// Parse `W,H` where each side is `80%`, `320px` or a bare number.
pub fn parse_viewport(s: &str) -> Result<ViewportSpec, String> {
    let (w, h) = s
        .split_once(',')
        .ok_or_else(|| format!("expected WIDTH,HEIGHT, got {s:?}"))?;
    let dim = |v: &str| {
        let v = v.trim();
        v.parse::<f64>()
            .map(ViewportDimension::Number)
            .unwrap_or_else(|_| ViewportDimension::Text(v.to_owned()))
    };
    Ok(ViewportSpec {
        width: dim(w),
        height: dim(h),
    })
}

pub fn load_config(path: Option<&Path>, viewport: Option<&ViewportSpec>) -> Result<CropperConfig> {
    let mut config = match path {
        Some(p) => CropperConfig::from_file(p)
            .with_context(|| format!("Failed to load config {}", p.display()))?,
        None => CropperConfig::default(),
    };
    if let Some(vp) = viewport {
        config.viewport = vp.clone();
    }
    Ok(config)
}

/// Build a cropper in memory and load `file` into it.
pub fn open_cropper(file: &Path, container: Size, config: &CropperConfig) -> Result<Cropper<RasterSurface>> {
    let mut cropper = Cropper::new(
        container,
        config,
        RasterSurface::default(),
        RasterSurface::default(),
    )?;
    pollster::block_on(cropper.init(&DefaultLoader, ImageSource::path(file)))
        .with_context(|| format!("Failed to open {}", file.display()))?;
    Ok(cropper)
}
