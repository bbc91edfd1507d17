use std::path::Path;
use std::sync::mpsc;

use anyhow::Context;

use cropper_core::config::CropperConfig;
use cropper_core::cropper::Cropper;
use cropper_core::geometry::Size;
use cropper_core::loader::{DefaultLoader, ImageSource};
use cropper_core::surface::{EncodedImage, RasterSurface};

use crate::messages::{WorkerCommand, WorkerResult};

/// Spawn the worker thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("cropper-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })
        .expect("Failed to spawn worker thread");

    cmd_tx
}

fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn send_error(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Error { message: msg.into() });
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::Open {
                path,
                container,
                config,
            } => match open(&path, container, &config) {
                Ok(cropper) => send(
                    &tx,
                    &ctx,
                    WorkerResult::Opened {
                        path,
                        cropper: Box::new(cropper),
                    },
                ),
                Err(e) => send_error(&tx, &ctx, format!("Failed to open {}: {e}", path.display())),
            },
            WorkerCommand::SaveCrop { path, encoded } => match save(&path, &encoded) {
                Ok(()) => send(&tx, &ctx, WorkerResult::CropSaved { path }),
                Err(e) => send_error(&tx, &ctx, format!("Failed to save {}: {e}", path.display())),
            },
            WorkerCommand::ImportConfig { path } => match import_config(&path) {
                Ok(config) => send(&tx, &ctx, WorkerResult::ConfigImported { config }),
                Err(e) => send_error(&tx, &ctx, format!("{e:#}")),
            },
        }
    }
}

fn open(
    path: &Path,
    container: Size,
    config: &CropperConfig,
) -> cropper_core::error::Result<Cropper<RasterSurface>> {
    let mut cropper = Cropper::new(
        container,
        config,
        RasterSurface::default(),
        RasterSurface::default(),
    )?;
    pollster::block_on(cropper.init(&DefaultLoader, ImageSource::path(path)))?;
    Ok(cropper)
}

fn save(path: &Path, encoded: &EncodedImage) -> std::io::Result<()> {
    std::fs::write(path, &encoded.bytes)
}

fn import_config(path: &Path) -> anyhow::Result<CropperConfig> {
    let config = CropperConfig::from_file(path)
        .with_context(|| format!("Failed to import config {}", path.display()))?;
    // Reject configs whose viewport cannot resolve against the canvas container.
    config
        .validate(crate::state::CONTAINER_SIZE)
        .context("Imported config is invalid")?;
    Ok(config)
}
