use std::path::PathBuf;

use cropper_core::geometry::{Offset, Size};

/// Size of the widget's image container, in points.
pub const CONTAINER_SIZE: Size = Size {
    width: 400.0,
    height: 400.0,
};

const MAX_LOG_MESSAGES: usize = 50;

#[derive(Default)]
pub struct UIState {
    pub file_path: Option<PathBuf>,
    pub loading: bool,
    pub log_messages: Vec<String>,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
        if self.log_messages.len() > MAX_LOG_MESSAGES {
            self.log_messages.remove(0);
        }
    }
}

/// What is currently painted: mirrors the cropper's committed visual state.
#[derive(Default)]
pub struct CanvasState {
    pub texture: Option<egui::TextureHandle>,
    /// Surface revision the texture was uploaded from.
    pub texture_revision: u64,
    pub offset: Offset,
    pub dot_position: f64,
}
