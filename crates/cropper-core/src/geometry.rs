//! Plain coordinate types shared by the engine, the slider and the surfaces.

/// Width/height pair in (possibly fractional) CSS-like pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn scaled(&self, factor: f64) -> Size {
        Size::new(self.width * factor, self.height * factor)
    }

    /// Per-axis maximum of two sizes.
    pub fn max(&self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Whole-pixel size of a raster holding this size.
    pub fn to_pixels(&self) -> PixelSize {
        PixelSize::new(to_px(self.width), to_px(self.height))
    }
}

/// Integer raster dimensions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Translation of the rendered image relative to the container's top-left corner.
///
/// The pan range keeps both components non-positive: the image is shifted
/// left/up underneath the fixed crop box, never right/down of it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Offset {
    pub left: f64,
    pub top: f64,
}

impl Offset {
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Offset {
        Offset::new(self.left + dx, self.top + dy)
    }
}

/// Rectangle in surface pixel coordinates. The origin may be negative or lie
/// past the surface edge; surfaces treat uncovered pixels as transparent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_size(size: PixelSize) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Intersection with `[0, bounds)`, or `None` when they do not overlap.
    pub fn clipped_to(&self, bounds: PixelSize) -> Option<Region> {
        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = (self.x + self.width as i64).min(bounds.width as i64);
        let y1 = (self.y + self.height as i64).min(bounds.height as i64);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Region::new(x0, y0, (x1 - x0) as u32, (y1 - y0) as u32))
    }
}

/// Round a non-negative pixel measure to whole pixels.
pub fn to_px(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

/// Clamp `value` into `[lo, hi]`; `hi` wins when the range is inverted.
pub fn clamp_between(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}
