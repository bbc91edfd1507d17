mod app;
mod convert;
mod messages;
mod panels;
mod state;
mod worker;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let initial = std::env::args_os().nth(1).map(std::path::PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 620.0])
            .with_min_inner_size([480.0, 560.0])
            .with_title("Cropper"),
        ..Default::default()
    };

    eframe::run_native(
        "Cropper",
        options,
        Box::new(move |cc| Ok(Box::new(app::CropperApp::new(&cc.egui_ctx, initial)))),
    )
}
