#![allow(dead_code)]

use std::future::Future;

use cropper_core::error::{CropperError, Result};
use cropper_core::geometry::Size;
use cropper_core::loader::{DecodedImage, ImageLoader, ImageSource};
use image::{Rgba, RgbaImage};

/// Image whose pixel at (x, y) is `[x % 256, y % 256, (x / 256 + y / 256) % 256, 255]`,
/// so any sampled pixel tells where it came from.
pub fn coordinate_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x / 256 + y / 256) % 256) as u8, 255])
    })
}

pub fn container(w: f64, h: f64) -> Size {
    Size::new(w, h)
}

/// Loader serving a bitmap already held in memory.
pub struct MemoryLoader {
    pub bitmap: RgbaImage,
}

impl MemoryLoader {
    pub fn new(bitmap: RgbaImage) -> Self {
        Self { bitmap }
    }

    pub fn coordinates(width: u32, height: u32) -> Self {
        Self::new(coordinate_image(width, height))
    }
}

impl ImageLoader for MemoryLoader {
    fn load(&self, _source: &ImageSource) -> impl Future<Output = Result<DecodedImage>> + Send {
        let bitmap = self.bitmap.clone();
        async move { DecodedImage::from_bitmap(bitmap) }
    }
}

/// Loader that always fails, like an unreachable URL.
pub struct FailingLoader;

impl ImageLoader for FailingLoader {
    fn load(&self, source: &ImageSource) -> impl Future<Output = Result<DecodedImage>> + Send {
        let id = source.id();
        async move {
            Err(CropperError::Load {
                source_id: id,
                reason: "connection refused".into(),
            })
        }
    }
}

pub fn memory_source() -> ImageSource {
    ImageSource::bytes("memory", Vec::new())
}
