use cropper_core::pointer::PointerEvent;

use crate::app::CropperApp;
use crate::state::CONTAINER_SIZE;

pub fn show(ui: &mut egui::Ui, app: &mut CropperApp) {
    let size = egui::vec2(CONTAINER_SIZE.width as f32, CONTAINER_SIZE.height as f32);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, egui::Color32::from_gray(30));

    let Some(cropper) = app.cropper.as_mut() else {
        show_placeholder(&painter, rect);
        return;
    };

    let events = pointer_events(ui, &response, rect, cropper.engine().is_dragging());
    let mut routed = Ok(());
    for event in events {
        routed = cropper.handle_canvas_event(event);
        if routed.is_err() {
            break;
        }
    }
    let viewport = cropper.engine().viewport();
    app.report(routed);

    if let Some(texture) = &app.canvas.texture {
        let offset = app.canvas.offset;
        let img_rect = egui::Rect::from_min_size(
            rect.min + egui::vec2(offset.left as f32, offset.top as f32),
            texture.size_vec2(),
        );
        painter.image(
            texture.id(),
            img_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }

    let crop_screen = egui::Rect::from_min_size(
        rect.min,
        egui::vec2(viewport.width() as f32, viewport.height() as f32),
    );
    draw_dim_regions(&painter, rect, crop_screen);
    draw_crop_border(&painter, crop_screen);
}

/// Translate egui's drag state into the widget's pointer events.
fn pointer_events(
    ui: &egui::Ui,
    response: &egui::Response,
    rect: egui::Rect,
    dragging: bool,
) -> Vec<PointerEvent> {
    let mut events = Vec::new();
    if response.drag_started_by(egui::PointerButton::Primary) {
        events.push(PointerEvent::Down);
    }
    if response.dragged_by(egui::PointerButton::Primary) {
        let delta = response.drag_delta();
        if delta != egui::Vec2::ZERO {
            events.push(PointerEvent::Move {
                dx: delta.x as f64,
                dy: delta.y as f64,
            });
        }
    }
    if response.drag_stopped() {
        events.push(PointerEvent::Up);
    }
    // Leaving the container ends the drag even while the button is held.
    let outside = ui
        .input(|i| i.pointer.hover_pos())
        .is_none_or(|pos| !rect.contains(pos));
    if (dragging || !events.is_empty()) && outside {
        events.push(PointerEvent::Leave);
    }
    events
}

fn draw_dim_regions(painter: &egui::Painter, rect: egui::Rect, crop_screen: egui::Rect) {
    let dim_color = egui::Color32::from_black_alpha(140);

    // Right of the crop box, full height
    painter.rect_filled(
        egui::Rect::from_min_max(egui::pos2(crop_screen.right(), rect.top()), rect.right_bottom()),
        0.0,
        dim_color,
    );
    // Below the crop box
    painter.rect_filled(
        egui::Rect::from_min_max(
            egui::pos2(rect.left(), crop_screen.bottom()),
            egui::pos2(crop_screen.right(), rect.bottom()),
        ),
        0.0,
        dim_color,
    );
}

fn draw_crop_border(painter: &egui::Painter, crop_screen: egui::Rect) {
    painter.rect_stroke(
        crop_screen,
        0.0,
        egui::Stroke::new(1.5, egui::Color32::from_rgb(255, 255, 0)),
        egui::epaint::StrokeKind::Inside,
    );
}

fn show_placeholder(painter: &egui::Painter, rect: egui::Rect) {
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "Open an image to begin",
        egui::FontId::proportional(16.0),
        egui::Color32::from_gray(100),
    );
}
