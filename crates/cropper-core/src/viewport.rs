//! Crop viewport configuration: percentages of the container, pixel strings
//! or raw numbers, resolved once into a fixed pixel box.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::consts::DEFAULT_VIEWPORT_PERCENT;
use crate::error::{CropperError, Result};
use crate::geometry::{PixelSize, Size};

/// One axis of a viewport spec, as written in configuration.
///
/// Strings carry a unit suffix (`"80%"`, `"320px"`); bare numbers are pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ViewportDimension {
    Number(f64),
    Text(String),
}

/// Unit a [`ViewportDimension`] was written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportUnit {
    Percent,
    Pixels,
    Number,
}

impl fmt::Display for ViewportUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent => write!(f, "percent"),
            Self::Pixels => write!(f, "pixels"),
            Self::Number => write!(f, "number"),
        }
    }
}

impl ViewportDimension {
    pub fn percent(value: f64) -> Self {
        Self::Text(format!("{value}%"))
    }

    pub fn pixels(value: f64) -> Self {
        Self::Text(format!("{value}px"))
    }

    /// Detected unit, or `None` for strings carrying neither `%` nor `px`.
    pub fn unit(&self) -> Option<ViewportUnit> {
        match self {
            Self::Number(_) => Some(ViewportUnit::Number),
            Self::Text(s) if s.contains('%') => Some(ViewportUnit::Percent),
            Self::Text(s) if s.to_ascii_lowercase().contains("px") => Some(ViewportUnit::Pixels),
            Self::Text(_) => None,
        }
    }

    /// Numeric magnitude in this dimension's own unit.
    fn magnitude(&self, unit: ViewportUnit) -> Result<f64> {
        let parsed = match (self, unit) {
            (Self::Number(n), ViewportUnit::Number) => Some(*n),
            (Self::Text(s), ViewportUnit::Percent) => s
                .find('%')
                .and_then(|end| s[..end].trim().parse::<f64>().ok()),
            (Self::Text(s), ViewportUnit::Pixels) => s
                .to_ascii_lowercase()
                .find("px")
                .and_then(|end| s[..end].trim().parse::<f64>().ok()),
            _ => None,
        };
        parsed.ok_or_else(|| {
            CropperError::Configuration(format!("cannot read {self} as a {unit} value"))
        })
    }
}

impl fmt::Display for ViewportDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

/// Crop viewport as configured, before it is resolved against a container.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportSpec {
    pub width: ViewportDimension,
    pub height: ViewportDimension,
}

impl Default for ViewportSpec {
    fn default() -> Self {
        Self::percent(DEFAULT_VIEWPORT_PERCENT, DEFAULT_VIEWPORT_PERCENT)
    }
}

impl ViewportSpec {
    pub fn percent(width: f64, height: f64) -> Self {
        Self {
            width: ViewportDimension::percent(width),
            height: ViewportDimension::percent(height),
        }
    }

    pub fn pixels(width: f64, height: f64) -> Self {
        Self {
            width: ViewportDimension::pixels(width),
            height: ViewportDimension::pixels(height),
        }
    }

    pub fn numbers(width: f64, height: f64) -> Self {
        Self {
            width: ViewportDimension::Number(width),
            height: ViewportDimension::Number(height),
        }
    }

    /// Resolve into a fixed pixel box for a container of the given size.
    ///
    /// Both axes must share a unit; percent is tried first, then pixels,
    /// then plain numbers.
    pub fn resolve(&self, container: Size) -> Result<CropViewport> {
        let unit = match (self.width.unit(), self.height.unit()) {
            (Some(w), Some(h)) if w == h => w,
            _ => {
                return Err(CropperError::Configuration(format!(
                    "invalid viewport dimensions supplied: width {} and height {} must use the same unit (%, px or number)",
                    self.width, self.height
                )))
            }
        };

        let w = self.width.magnitude(unit)?;
        let h = self.height.magnitude(unit)?;
        let size = match unit {
            ViewportUnit::Percent => Size::new(container.width / 100.0 * w, container.height / 100.0 * h),
            ViewportUnit::Pixels | ViewportUnit::Number => Size::new(w, h),
        };

        if !(size.width.is_finite() && size.height.is_finite()) || size.is_empty() {
            return Err(CropperError::Configuration(format!(
                "viewport must be positive, got {}x{}",
                size.width, size.height
            )));
        }
        if size.width > container.width || size.height > container.height {
            warn!(
                viewport = ?size,
                container = ?container,
                "Crop viewport is larger than its container"
            );
        }

        Ok(CropViewport { size })
    }
}

/// The resolved, immutable crop box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropViewport {
    pub size: Size,
}

impl CropViewport {
    pub fn width(&self) -> f64 {
        self.size.width
    }

    pub fn height(&self) -> f64 {
        self.size.height
    }

    /// Dimensions of the extracted crop buffer.
    pub fn pixel_size(&self) -> PixelSize {
        self.size.to_pixels()
    }
}
