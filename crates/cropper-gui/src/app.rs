use std::path::PathBuf;
use std::sync::mpsc;

use cropper_core::config::CropperConfig;
use cropper_core::cropper::Cropper;
use cropper_core::surface::RasterSurface;

use crate::convert::surface_to_color_image;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::state::{CanvasState, UIState, CONTAINER_SIZE};
use crate::worker;

pub struct CropperApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    result_rx: mpsc::Receiver<WorkerResult>,
    pub cropper: Option<Cropper<RasterSurface>>,
    pub config: CropperConfig,
    pub ui_state: UIState,
    pub canvas: CanvasState,
}

impl CropperApp {
    pub fn new(ctx: &egui::Context, initial: Option<PathBuf>) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(result_tx, ctx.clone());

        let mut app = Self {
            cmd_tx,
            result_rx,
            cropper: None,
            config: CropperConfig::default(),
            ui_state: UIState::default(),
            canvas: CanvasState::default(),
        };
        if let Some(path) = initial {
            app.open(path);
        }
        app
    }

    pub fn open(&mut self, path: PathBuf) {
        self.ui_state.loading = true;
        self.ui_state.add_log(format!("Opening {}", path.display()));
        let _ = self.cmd_tx.send(WorkerCommand::Open {
            path,
            container: CONTAINER_SIZE,
            config: self.config.clone(),
        });
    }

    /// Route a fallible interaction result to the log instead of dropping it.
    pub fn report<T>(&mut self, result: cropper_core::error::Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("{e}");
                self.ui_state.add_log(format!("Error: {e}"));
                None
            }
        }
    }

    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::Opened { path, cropper } => {
                    let cropper = *cropper;
                    let engine = cropper.engine();
                    if let Some(image) = engine.image() {
                        self.ui_state.add_log(format!(
                            "Loaded {} ({}x{}), scale {:.3}",
                            path.display(),
                            image.width,
                            image.height,
                            engine.scale()
                        ));
                    }
                    self.canvas = CanvasState {
                        texture: None,
                        texture_revision: 0,
                        offset: engine.presented(),
                        dot_position: cropper.slider().position(),
                    };
                    self.cropper = Some(cropper);
                    self.ui_state.file_path = Some(path);
                    self.ui_state.loading = false;
                    self.update_texture(ctx);
                }
                WorkerResult::CropSaved { path } => {
                    self.ui_state
                        .add_log(format!("Saved crop to {}", path.display()));
                }
                WorkerResult::ConfigImported { config } => {
                    self.config = config;
                    self.ui_state.add_log("Config imported".into());
                    if let Some(path) = self.ui_state.file_path.clone() {
                        self.open(path);
                    }
                }
                WorkerResult::Error { message } => {
                    self.ui_state.loading = false;
                    self.ui_state.add_log(format!("Error: {message}"));
                }
            }
        }
    }

    /// Commit the cropper's pending visual changes, once per frame.
    fn flush_frame(&mut self, ctx: &egui::Context) {
        let Some(cropper) = self.cropper.as_mut() else {
            return;
        };
        let update = cropper.on_animation_frame();
        if let Some(offset) = update.canvas_offset {
            self.canvas.offset = offset;
        }
        if let Some(position) = update.dot_position {
            self.canvas.dot_position = position;
        }
        self.update_texture(ctx);
        if !update.is_empty() {
            ctx.request_repaint();
        }
    }

    /// Re-upload the rendered surface when the engine has redrawn it.
    fn update_texture(&mut self, ctx: &egui::Context) {
        let Some(cropper) = self.cropper.as_ref() else {
            return;
        };
        let engine = cropper.engine();
        let revision = engine.surface_revision();
        if self.canvas.texture.is_some() && self.canvas.texture_revision == revision {
            return;
        }
        let image = surface_to_color_image(engine.surface());
        self.canvas.texture =
            Some(ctx.load_texture("cropper-surface", image, egui::TextureOptions::LINEAR));
        self.canvas.texture_revision = revision;
    }
}

impl eframe::App for CropperApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);
        panels::toolbar::show(ctx, self);
        panels::status::show(ctx, self);
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::canvas::show(ui, self);
            ui.add_space(12.0);
            panels::slider::show(ui, self);
            ui.add_space(8.0);
            if ui
                .add_enabled(self.cropper.is_some(), egui::Button::new("Save crop"))
                .clicked()
            {
                panels::toolbar::save_crop(self);
            }
        });
        self.flush_frame(ctx);
    }
}
