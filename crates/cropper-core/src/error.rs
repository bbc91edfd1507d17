use thiserror::Error;

#[derive(Error, Debug)]
pub enum CropperError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to load image {source_id}: {reason}")]
    Load { source_id: String, reason: String },

    #[error("Illegal state: {0}")]
    IllegalState(&'static str),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),
}

impl CropperError {
    pub(crate) fn load(source_id: impl Into<String>, reason: impl ToString) -> Self {
        Self::Load {
            source_id: source_id.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CropperError>;
