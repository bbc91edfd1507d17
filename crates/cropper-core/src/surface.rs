//! Render surface collaborator and its in-memory RGBA implementation.

use std::fmt;
use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{ImageFormat, Pixel, Rgb, RgbImage, Rgba, RgbaImage};

use crate::error::{CropperError, Result};
use crate::geometry::{PixelSize, Region};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Output encoding of a surface snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodeFormat {
    /// Lossy; alpha is composited onto black.
    Jpeg { quality: u8 },
    Png,
}

impl EncodeFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg { .. } => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg { .. } => "jpg",
            Self::Png => "png",
        }
    }
}

impl fmt::Display for EncodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jpeg { quality } => write!(f, "JPEG (q={quality})"),
            Self::Png => write!(f, "PNG"),
        }
    }
}

/// Opaque encoded image artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    pub format: EncodeFormat,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

/// 2D drawing surface the engine renders into.
///
/// Coordinates may fall outside the surface; drawing there is a no-op and
/// reading there yields transparent pixels.
pub trait RenderSurface {
    fn size(&self) -> PixelSize;

    /// Resize the surface. Like a canvas, resizing discards the contents.
    fn resize(&mut self, size: PixelSize);

    fn clear(&mut self, region: Region);

    /// Draw `bitmap` scaled to fill `dest`, source-over.
    fn draw_image(&mut self, bitmap: &RgbaImage, dest: Region);

    fn read_pixels(&self, region: Region) -> RgbaImage;

    /// Replace pixels starting at `(x, y)`, no blending.
    fn write_pixels(&mut self, pixels: &RgbaImage, x: i64, y: i64);

    fn to_encoded_image(&self, format: EncodeFormat) -> Result<EncodedImage>;
}

/// Surface backed by an [`RgbaImage`] held in memory.
#[derive(Clone, Debug)]
pub struct RasterSurface {
    pixels: RgbaImage,
}

impl Default for RasterSurface {
    fn default() -> Self {
        Self::new(PixelSize::default())
    }
}

impl RasterSurface {
    pub fn new(size: PixelSize) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(size.width, size.height, TRANSPARENT),
        }
    }

    /// Current contents.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl RenderSurface for RasterSurface {
    fn size(&self) -> PixelSize {
        let (width, height) = self.pixels.dimensions();
        PixelSize::new(width, height)
    }

    fn resize(&mut self, size: PixelSize) {
        self.pixels = RgbaImage::from_pixel(size.width, size.height, TRANSPARENT);
    }

    fn clear(&mut self, region: Region) {
        let Some(r) = region.clipped_to(self.size()) else {
            return;
        };
        for y in r.y as u32..r.y as u32 + r.height {
            for x in r.x as u32..r.x as u32 + r.width {
                self.pixels.put_pixel(x, y, TRANSPARENT);
            }
        }
    }

    fn draw_image(&mut self, bitmap: &RgbaImage, dest: Region) {
        if dest.width == 0 || dest.height == 0 || bitmap.width() == 0 || bitmap.height() == 0 {
            return;
        }
        if bitmap.dimensions() == (dest.width, dest.height) {
            composite_over(&mut self.pixels, bitmap, dest.x, dest.y);
        } else {
            let scaled = imageops::resize(bitmap, dest.width, dest.height, FilterType::Triangle);
            composite_over(&mut self.pixels, &scaled, dest.x, dest.y);
        }
    }

    fn read_pixels(&self, region: Region) -> RgbaImage {
        let mut out = RgbaImage::from_pixel(region.width, region.height, TRANSPARENT);
        if let Some(r) = region.clipped_to(self.size()) {
            let covered =
                imageops::crop_imm(&self.pixels, r.x as u32, r.y as u32, r.width, r.height).to_image();
            imageops::replace(&mut out, &covered, r.x - region.x, r.y - region.y);
        }
        out
    }

    fn write_pixels(&mut self, pixels: &RgbaImage, x: i64, y: i64) {
        imageops::replace(&mut self.pixels, pixels, x, y);
    }

    fn to_encoded_image(&self, format: EncodeFormat) -> Result<EncodedImage> {
        let (width, height) = self.pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(CropperError::InvalidDimensions { width, height });
        }

        let mut bytes = Vec::new();
        match format {
            EncodeFormat::Jpeg { quality } => {
                let rgb = composite_on_black(&self.pixels);
                JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100)).encode_image(&rgb)?;
            }
            EncodeFormat::Png => {
                self.pixels
                    .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
            }
        }

        Ok(EncodedImage {
            format,
            width,
            height,
            bytes,
        })
    }
}

/// Source-over `top` onto `bottom` at `(x, y)`. Opaque pixels are copied
/// verbatim so unscaled draws reproduce the bitmap exactly.
fn composite_over(bottom: &mut RgbaImage, top: &RgbaImage, x: i64, y: i64) {
    let (bw, bh) = bottom.dimensions();
    let Some(r) = Region::new(x, y, top.width(), top.height()).clipped_to(PixelSize::new(bw, bh)) else {
        return;
    };
    for dy in r.y..r.y + r.height as i64 {
        for dx in r.x..r.x + r.width as i64 {
            let src = *top.get_pixel((dx - x) as u32, (dy - y) as u32);
            match src.0[3] {
                0 => {}
                255 => bottom.put_pixel(dx as u32, dy as u32, src),
                _ => bottom.get_pixel_mut(dx as u32, dy as u32).blend(&src),
            }
        }
    }
}

/// Flatten RGBA onto an opaque black background.
fn composite_on_black(rgba: &RgbaImage) -> RgbImage {
    let (w, h) = rgba.dimensions();
    let mut out = RgbImage::new(w, h);
    for (x, y, px) in rgba.enumerate_pixels() {
        let [r, g, b, a] = px.0;
        let blend = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
        out.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }
    out
}
