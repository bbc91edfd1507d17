mod common;

use approx::assert_abs_diff_eq;
use image::ImageFormat;
use pollster::block_on;

use common::{coordinate_image, memory_source, FailingLoader, MemoryLoader};
use cropper_core::config::CropperConfig;
use cropper_core::container::{ContainerRef, StaticLayout};
use cropper_core::cropper::Cropper;
use cropper_core::error::CropperError;
use cropper_core::geometry::{Offset, PixelSize, Size};
use cropper_core::loader::{DefaultLoader, ImageSource};
use cropper_core::pointer::PointerEvent;
use cropper_core::surface::RasterSurface;

fn new_cropper(config: &CropperConfig) -> Cropper<RasterSurface> {
    Cropper::new(
        Size::new(400.0, 400.0),
        config,
        RasterSurface::default(),
        RasterSurface::default(),
    )
    .unwrap()
}

fn loaded() -> Cropper<RasterSurface> {
    let mut c = new_cropper(&CropperConfig::default());
    block_on(c.init(&MemoryLoader::coordinates(1000, 500), memory_source())).unwrap();
    c
}

#[test]
fn test_init_calibrates_slider() {
    let c = loaded();
    let slider = c.slider();
    assert_abs_diff_eq!(slider.bounds().unwrap().lower, 0.32, epsilon = 1e-12);
    assert_abs_diff_eq!(slider.step(), 2.68 / 400.0, epsilon = 1e-12);
    assert_abs_diff_eq!(slider.value(), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(slider.position(), 0.68 / slider.step(), epsilon = 1e-6);
    assert_eq!(c.engine().scale(), 1.0);
}

#[test]
fn test_first_frame_places_dot() {
    let mut c = loaded();
    let update = c.on_animation_frame();
    assert_eq!(update.canvas_offset, None);
    assert_abs_diff_eq!(update.dot_position.unwrap(), c.slider().position());
    assert!(c.on_animation_frame().is_empty());
}

#[test]
fn test_slider_drag_rescales_engine() {
    let mut c = loaded();
    c.handle_slider_event(PointerEvent::Down).unwrap();
    let change = c
        .handle_slider_event(PointerEvent::Move { dx: 60.0, dy: 12.0 })
        .unwrap()
        .unwrap();
    assert_abs_diff_eq!(c.engine().scale(), change.value);
    assert_abs_diff_eq!(change.value, 1.0 + 60.0 * c.slider().step(), epsilon = 1e-9);

    c.handle_slider_event(PointerEvent::Up).unwrap();
    assert!(c
        .handle_slider_event(PointerEvent::Move { dx: 60.0, dy: 0.0 })
        .unwrap()
        .is_none());
    assert_abs_diff_eq!(c.engine().scale(), change.value);
}

#[test]
fn test_slider_drag_to_minimum_recentres_pan() {
    let mut c = loaded();
    c.handle_slider_event(PointerEvent::Down).unwrap();
    c.handle_slider_event(PointerEvent::Move { dx: -1000.0, dy: 0.0 }).unwrap();
    assert_abs_diff_eq!(c.engine().scale(), 0.32, epsilon = 1e-12);
    // 320x160 fits inside the container on both axes.
    assert_eq!(c.engine().pan(), Offset::new(0.0, 0.0));
}

#[test]
fn test_canvas_events_pan_and_leave_ends_drag() {
    let mut c = loaded();
    c.handle_canvas_event(PointerEvent::Down).unwrap();
    c.handle_canvas_event(PointerEvent::Move { dx: -40.0, dy: 10.0 }).unwrap();
    assert_eq!(c.engine().pan(), Offset::new(-340.0, -40.0));

    c.handle_canvas_event(PointerEvent::Leave).unwrap();
    c.handle_canvas_event(PointerEvent::Move { dx: -40.0, dy: 10.0 }).unwrap();
    assert_eq!(c.engine().pan(), Offset::new(-340.0, -40.0));

    let update = c.on_animation_frame();
    assert_eq!(update.canvas_offset, Some(Offset::new(-340.0, -40.0)));
}

#[test]
fn test_canvas_and_slider_sessions_are_independent() {
    let mut c = loaded();
    c.handle_canvas_event(PointerEvent::Down).unwrap();
    assert!(c
        .handle_slider_event(PointerEvent::Move { dx: 10.0, dy: 0.0 })
        .unwrap()
        .is_none());
    assert!(c.engine().is_dragging());
    assert!(!c.slider().is_dragging());
}

#[test]
fn test_interaction_before_init_is_illegal() {
    let mut c = new_cropper(&CropperConfig::default());
    c.handle_canvas_event(PointerEvent::Down).unwrap();
    let err = c
        .handle_canvas_event(PointerEvent::Move { dx: 1.0, dy: 1.0 })
        .unwrap_err();
    assert!(matches!(err, CropperError::IllegalState(_)));
    assert!(matches!(c.result(), Err(CropperError::IllegalState(_))));
}

#[test]
fn test_init_failure_is_load_error() {
    let mut c = new_cropper(&CropperConfig::default());
    let err = block_on(c.init(&FailingLoader, memory_source())).unwrap_err();
    assert!(matches!(err, CropperError::Load { .. }));
}

#[test]
fn test_init_with_empty_scale_range_leaves_cropper_unloaded() {
    // 100x50 under a 320x320 box needs 3.2x, above the 3.0 ceiling.
    let mut c = new_cropper(&CropperConfig::default());
    let err = block_on(c.init(&MemoryLoader::coordinates(100, 50), memory_source())).unwrap_err();
    assert!(matches!(err, CropperError::Configuration(_)), "got: {err}");
    assert!(!c.engine().is_loaded());
    assert!(c.slider().bounds().is_none());
    assert!(matches!(c.result(), Err(CropperError::IllegalState(_))));

    block_on(c.init(&MemoryLoader::coordinates(1000, 500), memory_source())).unwrap();
    assert!(c.engine().is_loaded());
    assert_abs_diff_eq!(c.slider().bounds().unwrap().lower, 0.32, epsilon = 1e-12);
    assert_eq!(c.result().unwrap().width, 320);
}

#[test]
fn test_second_init_is_illegal_and_keeps_calibration() {
    let mut c = loaded();
    let bounds = c.slider().bounds();
    let err = block_on(c.init(&MemoryLoader::coordinates(300, 200), memory_source())).unwrap_err();
    assert!(matches!(err, CropperError::IllegalState(_)));
    assert_eq!(c.slider().bounds(), bounds);
    assert_eq!(c.engine().image().unwrap().width, 1000);
}

#[test]
fn test_slider_extremes_keep_engine_scale_in_range() {
    let mut c = loaded();
    let bounds = c.slider().bounds().unwrap();
    c.handle_slider_event(PointerEvent::Down).unwrap();
    for dx in [5000.0, -5000.0, 137.0, -12.5] {
        let change = c
            .handle_slider_event(PointerEvent::Move { dx, dy: 0.0 })
            .unwrap()
            .unwrap();
        let scale = c.engine().scale();
        assert!(scale >= bounds.lower && scale <= bounds.upper, "scale {scale}");
        assert_abs_diff_eq!(scale, change.value);
        assert_abs_diff_eq!(scale, c.slider().value());
    }
}

#[test]
fn test_small_image_starts_at_lower_bound() {
    // 300x200 under a 320x320 box needs at least 320/300 to cover it.
    let mut c = new_cropper(&CropperConfig::default());
    block_on(c.init(&MemoryLoader::coordinates(300, 200), memory_source())).unwrap();
    let lower = 320.0 / 300.0;
    assert_abs_diff_eq!(c.slider().value(), lower, epsilon = 1e-9);
    assert_abs_diff_eq!(c.engine().scale(), lower, epsilon = 1e-9);
}

#[test]
fn test_result_after_interaction() {
    let mut c = loaded();
    c.handle_slider_event(PointerEvent::Down).unwrap();
    c.handle_slider_event(PointerEvent::Move { dx: 25.0, dy: 0.0 }).unwrap();
    c.handle_slider_event(PointerEvent::Up).unwrap();
    c.handle_canvas_event(PointerEvent::Down).unwrap();
    c.handle_canvas_event(PointerEvent::Move { dx: -75.0, dy: -30.0 }).unwrap();
    c.handle_canvas_event(PointerEvent::Up).unwrap();

    let out = c.result().unwrap();
    assert_eq!((out.width, out.height), (320, 320));
    let decoded = image::load_from_memory_with_format(&out.bytes, ImageFormat::Jpeg).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (320, 320));
}

#[test]
fn test_custom_viewport_and_track() {
    let config = CropperConfig::from_toml_str(
        "[viewport]\nwidth = \"200px\"\nheight = \"100px\"\n[slider]\ntrack_width = 250.0\n",
    )
    .unwrap();
    let mut c = new_cropper(&config);
    block_on(c.init(&MemoryLoader::coordinates(800, 600), memory_source())).unwrap();
    assert_abs_diff_eq!(c.slider().bounds().unwrap().lower, 0.25, epsilon = 1e-12);
    assert_abs_diff_eq!(c.slider().step(), 2.75 / 250.0, epsilon = 1e-12);
    assert_eq!(c.engine().viewport().pixel_size(), PixelSize::new(200, 100));
}

#[test]
fn test_selector_container_and_file_loader() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("photo.png");
    coordinate_image(640, 480).save(&path).unwrap();

    let layout = StaticLayout::new().with_element("#cropper", Size::new(400.0, 300.0));
    let mut c = Cropper::for_container(
        &ContainerRef::from("#cropper"),
        &layout,
        &CropperConfig::default(),
        RasterSurface::default(),
        RasterSurface::default(),
    )
    .unwrap();
    block_on(c.init(&DefaultLoader, ImageSource::path(&path))).unwrap();

    let image = c.engine().image().unwrap();
    assert_eq!((image.width, image.height), (640, 480));
    assert_eq!(c.engine().pan(), Offset::new(-120.0, -90.0));
    assert_eq!(c.result().unwrap().width, 320);
}

#[test]
fn test_file_loader_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = ImageSource::path(dir.path().join("missing.png"));
    let err = block_on(cropper_core::loader::ImageLoader::load(&DefaultLoader, &source)).unwrap_err();
    assert!(matches!(err, CropperError::Load { .. }), "got: {err}");
    assert!(err.to_string().contains("missing.png"));
}

#[test]
fn test_file_loader_rejects_garbage_bytes() {
    let source = ImageSource::bytes("garbage", b"definitely not an image".to_vec());
    let err = block_on(cropper_core::loader::ImageLoader::load(&DefaultLoader, &source)).unwrap_err();
    assert!(matches!(err, CropperError::Load { .. }));
}
