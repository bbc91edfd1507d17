use std::path::PathBuf;

use cropper_core::config::CropperConfig;
use cropper_core::cropper::Cropper;
use cropper_core::geometry::Size;
use cropper_core::surface::{EncodedImage, RasterSurface};

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Build a cropper for the container and load the image into it.
    Open {
        path: PathBuf,
        container: Size,
        config: CropperConfig,
    },

    /// Write an encoded crop to disk.
    SaveCrop { path: PathBuf, encoded: EncodedImage },

    /// Read a TOML cropper configuration.
    ImportConfig { path: PathBuf },
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    Opened {
        path: PathBuf,
        cropper: Box<Cropper<RasterSurface>>,
    },
    CropSaved {
        path: PathBuf,
    },
    ConfigImported {
        config: CropperConfig,
    },
    Error {
        message: String,
    },
}
