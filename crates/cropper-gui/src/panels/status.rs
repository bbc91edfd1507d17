use crate::app::CropperApp;

pub fn show(ctx: &egui::Context, app: &mut CropperApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 3.0 + spacing * 2.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for msg in &app.ui_state.log_messages {
                    ui.label(msg);
                }
            });

        ui.horizontal(|ui| {
            if app.ui_state.loading {
                ui.spinner();
                ui.label("Loading...");
                return;
            }
            let Some(cropper) = app.cropper.as_ref() else {
                ui.label("No image");
                return;
            };
            let engine = cropper.engine();
            if let Some(image) = engine.image() {
                ui.label(format!("{}x{}", image.width, image.height));
                ui.separator();
            }
            let viewport = engine.viewport().pixel_size();
            ui.label(format!("Crop: {}x{}", viewport.width, viewport.height));
            ui.separator();
            ui.label(format!("Scale: {:.3}", engine.scale()));
            ui.separator();
            let pan = engine.pan();
            ui.label(format!("Pan: {:.0}, {:.0}", pan.left, pan.top));
        });

        ui.add_space(2.0);
    });
}
