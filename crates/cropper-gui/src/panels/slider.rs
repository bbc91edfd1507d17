use cropper_core::pointer::PointerEvent;

use crate::app::CropperApp;

const TRACK_COLOR: egui::Color32 = egui::Color32::from_gray(120);
const DOT_COLOR: egui::Color32 = egui::Color32::from_rgb(230, 230, 230);

pub fn show(ui: &mut egui::Ui, app: &mut CropperApp) {
    let Some(cropper) = app.cropper.as_mut() else {
        return;
    };
    let options = cropper.options().slider.clone();

    let size = egui::vec2(options.track_width as f32, options.height as f32);
    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    let painter = ui.painter_at(rect.expand(2.0));

    let y = rect.center().y;
    painter.line_segment(
        [egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)],
        egui::Stroke::new(2.0, TRACK_COLOR),
    );

    // The dot's left edge sits at the committed position along the track.
    let radius = (options.dot_diameter / 2.0) as f32;
    let center = egui::pos2(rect.left() + app.canvas.dot_position as f32 + radius, y);
    let dot_rect = egui::Rect::from_center_size(center, egui::vec2(radius * 2.0, radius * 2.0));
    let dot = ui.interact(dot_rect, ui.id().with("scale_dot"), egui::Sense::drag());

    let mut events = Vec::new();
    if dot.drag_started_by(egui::PointerButton::Primary) {
        events.push(PointerEvent::Down);
    }
    if dot.dragged_by(egui::PointerButton::Primary) {
        let dx = dot.drag_delta().x;
        if dx != 0.0 {
            events.push(PointerEvent::Move { dx: dx as f64, dy: 0.0 });
        }
    }
    if dot.drag_stopped() {
        events.push(PointerEvent::Up);
    }

    let mut routed = Ok(None);
    for event in events {
        routed = cropper.handle_slider_event(event);
        if routed.is_err() {
            break;
        }
    }
    if let Some(Some(change)) = app.report(routed) {
        tracing::debug!(value = change.value, "Scale changed");
    }

    let fill = if dot.dragged() || dot.hovered() {
        egui::Color32::WHITE
    } else {
        DOT_COLOR
    };
    painter.circle_filled(center, radius, fill);
}
