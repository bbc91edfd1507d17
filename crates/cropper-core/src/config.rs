use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_DOT_DIAMETER, DEFAULT_JPEG_QUALITY, DEFAULT_SLIDER_HEIGHT, DEFAULT_UPPER_SCALE_BOUND,
};
use crate::error::{CropperError, Result};
use crate::geometry::Size;
use crate::surface::EncodeFormat;
use crate::viewport::{CropViewport, ViewportSpec};

/// User-facing cropper configuration, as read from TOML.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CropperConfig {
    /// Extra class name for the crop box element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_class: Option<String>,
    #[serde(default)]
    pub viewport: ViewportSpec,
    #[serde(default)]
    pub slider: SliderConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SliderConfig {
    /// Track length in pixels. Defaults to the container width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_width: Option<f64>,
    #[serde(default = "default_slider_height")]
    pub height: f64,
    #[serde(default = "default_dot_diameter")]
    pub dot_diameter: f64,
    /// Largest zoom factor the slider can reach.
    #[serde(default = "default_upper_bound")]
    pub upper_bound: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dot_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_class: Option<String>,
}

fn default_slider_height() -> f64 {
    DEFAULT_SLIDER_HEIGHT
}
fn default_dot_diameter() -> f64 {
    DEFAULT_DOT_DIAMETER
}
fn default_upper_bound() -> f64 {
    DEFAULT_UPPER_SCALE_BOUND
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            track_width: None,
            height: DEFAULT_SLIDER_HEIGHT,
            dot_diameter: DEFAULT_DOT_DIAMETER,
            upper_bound: DEFAULT_UPPER_SCALE_BOUND,
            dot_class: None,
            line_class: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// JPEG quality of `result()`, 1..=100.
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl CropperConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| CropperError::Configuration(format!("invalid config: {e}")))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CropperError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CropperError::Configuration(format!("cannot serialize config: {e}")))
    }

    /// Check every field against a concrete container and freeze the result.
    pub fn validate(&self, container: Size) -> Result<CropperOptions> {
        let viewport = self.viewport.resolve(container)?;

        let track_width = self.slider.track_width.unwrap_or(container.width);
        if !(track_width.is_finite() && track_width > 0.0) {
            return Err(CropperError::Configuration(format!(
                "slider track width must be positive, got {track_width}"
            )));
        }
        let dot = self.slider.dot_diameter;
        if !(dot.is_finite() && dot >= 0.0 && dot < track_width) {
            return Err(CropperError::Configuration(format!(
                "slider dot diameter {dot} must fit on a {track_width}px track"
            )));
        }
        let upper = self.slider.upper_bound;
        if !(upper.is_finite() && upper > 0.0) {
            return Err(CropperError::Configuration(format!(
                "upper scale bound must be positive, got {upper}"
            )));
        }
        let quality = self.output.jpeg_quality;
        if !(1..=100).contains(&quality) {
            return Err(CropperError::Configuration(format!(
                "jpeg quality must be in 1..=100, got {quality}"
            )));
        }

        Ok(CropperOptions {
            viewport,
            custom_class: self.custom_class.clone(),
            slider: SliderOptions {
                track_width,
                height: self.slider.height,
                dot_diameter: dot,
                upper_bound: upper,
                dot_class: self.slider.dot_class.clone(),
                line_class: self.slider.line_class.clone(),
            },
            output_format: EncodeFormat::Jpeg { quality },
        })
    }
}

/// Validated, immutable options a cropper is built from.
#[derive(Clone, Debug, PartialEq)]
pub struct CropperOptions {
    pub viewport: CropViewport,
    pub custom_class: Option<String>,
    pub slider: SliderOptions,
    pub output_format: EncodeFormat,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SliderOptions {
    pub track_width: f64,
    pub height: f64,
    pub dot_diameter: f64,
    pub upper_bound: f64,
    pub dot_class: Option<String>,
    pub line_class: Option<String>,
}

impl SliderOptions {
    /// Default slider on a track of the given width.
    pub fn with_track_width(track_width: f64) -> Self {
        Self {
            track_width,
            height: DEFAULT_SLIDER_HEIGHT,
            dot_diameter: DEFAULT_DOT_DIAMETER,
            upper_bound: DEFAULT_UPPER_SCALE_BOUND,
            dot_class: None,
            line_class: None,
        }
    }
}
