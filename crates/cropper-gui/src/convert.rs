use cropper_core::surface::RasterSurface;

/// Convert the engine's rendered surface to an egui ColorImage.
pub fn surface_to_color_image(surface: &RasterSurface) -> egui::ColorImage {
    let pixels = surface.pixels();
    let (w, h) = pixels.dimensions();
    egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], pixels.as_raw())
}
