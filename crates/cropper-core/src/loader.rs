//! Image load collaborator: fetch the source, decode it to an RGBA bitmap.

use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;
use tracing::debug;

use crate::error::{CropperError, Result};
use crate::geometry::Size;

/// Where the image comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum ImageSource {
    Path(PathBuf),
    /// Already-fetched encoded bytes, labelled for diagnostics.
    Bytes { label: String, data: Arc<[u8]> },
}

impl ImageSource {
    pub fn path(path: impl AsRef<Path>) -> Self {
        Self::Path(path.as_ref().to_path_buf())
    }

    pub fn bytes(label: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        Self::Bytes {
            label: label.into(),
            data: data.into(),
        }
    }

    /// Human-readable identifier used in errors and logs.
    pub fn id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Bytes { label, data } => write!(f, "{label} ({} bytes)", data.len()),
        }
    }
}

/// Result of a successful decode.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub bitmap: RgbaImage,
}

impl DecodedImage {
    pub fn from_bitmap(bitmap: RgbaImage) -> Result<Self> {
        let (width, height) = bitmap.dimensions();
        if width == 0 || height == 0 {
            return Err(CropperError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height, bitmap })
    }
}

/// The image a cropper works on, once loaded.
#[derive(Clone, Debug)]
pub struct ImageRecord {
    pub source: ImageSource,
    pub width: u32,
    pub height: u32,
    pub bitmap: RgbaImage,
}

impl ImageRecord {
    pub fn new(source: ImageSource, decoded: DecodedImage) -> Self {
        Self {
            source,
            width: decoded.width,
            height: decoded.height,
            bitmap: decoded.bitmap,
        }
    }

    /// Natural size in pixels.
    pub fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }
}

/// Asynchronous "fetch and decode" capability.
pub trait ImageLoader {
    fn load(&self, source: &ImageSource) -> impl Future<Output = Result<DecodedImage>> + Send;
}

/// Reads files from disk (or takes in-memory bytes) and decodes them with
/// the `image` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultLoader;

impl ImageLoader for DefaultLoader {
    fn load(&self, source: &ImageSource) -> impl Future<Output = Result<DecodedImage>> + Send {
        let source = source.clone();
        async move {
            let decoded = match &source {
                ImageSource::Path(path) => {
                    let data = std::fs::read(path).map_err(|e| CropperError::load(source.id(), e))?;
                    decode_image(&source, &data)?
                }
                ImageSource::Bytes { data, .. } => decode_image(&source, data)?,
            };
            debug!(source = %source, width = decoded.width, height = decoded.height, "Image decoded");
            Ok(decoded)
        }
    }
}

/// Decode encoded image bytes (any format the `image` crate recognises).
pub fn decode_image(source: &ImageSource, data: &[u8]) -> Result<DecodedImage> {
    let img = image::load_from_memory(data).map_err(|e| CropperError::load(source.id(), e))?;
    DecodedImage::from_bitmap(img.to_rgba8()).map_err(|e| CropperError::load(source.id(), e))
}
