use std::sync::{Arc, Mutex};

use approx::assert_abs_diff_eq;

use cropper_core::config::SliderOptions;
use cropper_core::error::CropperError;
use cropper_core::slider::{ScaleBounds, ScaleChanged, ScaleController};

const TRACK: f64 = 400.0;

/// Slider for the 1000x500 image under a 320x320 crop box.
fn configured() -> ScaleController {
    let mut s = ScaleController::new(SliderOptions::with_track_width(TRACK));
    s.configure(1000, 500, 320.0, 320.0).unwrap();
    s
}

// ---------------------------------------------------------------------------
// Bounds and step
// ---------------------------------------------------------------------------

#[test]
fn test_scenario_bounds() {
    let s = configured();
    let bounds = s.bounds().unwrap();
    assert_abs_diff_eq!(bounds.lower, 0.32, epsilon = 1e-12);
    assert_abs_diff_eq!(bounds.upper, 3.0);
    assert_abs_diff_eq!(s.step(), (3.0 - 0.32) / TRACK, epsilon = 1e-12);
}

#[test]
fn test_portrait_uses_height() {
    let bounds = ScaleBounds::for_image(500.0, 1000.0, 320.0, 240.0, 3.0).unwrap();
    assert_abs_diff_eq!(bounds.lower, 0.24, epsilon = 1e-12);

    // Square images fall through to the height branch as well.
    let bounds = ScaleBounds::for_image(800.0, 800.0, 320.0, 200.0, 3.0).unwrap();
    assert_abs_diff_eq!(bounds.lower, 0.25, epsilon = 1e-12);
}

#[test]
fn test_empty_range_is_rejected() {
    let mut s = ScaleController::new(SliderOptions::with_track_width(TRACK));
    let err = s.configure(100, 50, 320.0, 320.0).unwrap_err();
    assert!(matches!(err, CropperError::Configuration(_)), "got: {err}");
    assert!(s.configure(0, 50, 320.0, 320.0).is_err());
}

#[test]
fn test_unconfigured_slider_is_illegal_state() {
    let mut s = ScaleController::new(SliderOptions::with_track_width(TRACK));
    assert_eq!(s.step(), 0.0);
    assert!(matches!(s.set_position(10.0), Err(CropperError::IllegalState(_))));
    s.begin_drag();
    assert!(matches!(s.on_drag_move(5.0), Err(CropperError::IllegalState(_))));
}

// ---------------------------------------------------------------------------
// Position <-> value mapping
// ---------------------------------------------------------------------------

#[test]
fn test_initial_value_is_native_scale() {
    let mut s = configured();
    assert_abs_diff_eq!(s.value(), 1.0);

    let x = s.place_at_value().unwrap();
    assert_abs_diff_eq!(x, 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(s.position(), (1.0 - 0.32) / s.step(), epsilon = 1e-9);
}

#[test]
fn test_set_position_round_trip() {
    let mut s = configured();
    let lower = s.bounds().unwrap().lower;
    for x in [0.0, 1.0, 37.5, 100.0, 250.0, 379.0] {
        let value = s.set_position(x).unwrap();
        assert_abs_diff_eq!(s.position(), x);
        assert_abs_diff_eq!(value, x * s.step() + lower, epsilon = 1e-12);
        assert_abs_diff_eq!(s.position_for(value).unwrap(), x, epsilon = 1e-9);
    }
}

#[test]
fn test_value_is_monotonic_in_position() {
    let mut s = configured();
    let mut previous = f64::NEG_INFINITY;
    let mut x = -50.0;
    while x <= TRACK + 50.0 {
        let value = s.set_position(x).unwrap();
        assert!(value >= previous, "value dropped at x={x}: {value} < {previous}");
        previous = value;
        x += 7.25;
    }
}

#[test]
fn test_track_end_maps_to_upper_bound() {
    let s = configured();
    assert_abs_diff_eq!(s.value_at(TRACK).unwrap(), 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(s.value_at(0.0).unwrap(), 0.32, epsilon = 1e-12);
}

#[test]
fn test_position_clamped_to_track() {
    let mut s = configured();
    s.set_position(-20.0).unwrap();
    assert_eq!(s.position(), 0.0);
    s.set_position(TRACK).unwrap();
    assert_abs_diff_eq!(s.position(), TRACK - 20.0);
    assert_abs_diff_eq!(s.max_position(), TRACK - 20.0);
}

// ---------------------------------------------------------------------------
// Dragging
// ---------------------------------------------------------------------------

#[test]
fn test_move_without_drag_is_ignored() {
    let mut s = configured();
    s.place_at_value().unwrap();
    let before = s.position();
    assert_eq!(s.on_drag_move(30.0).unwrap(), None);
    assert_eq!(s.position(), before);
}

#[test]
fn test_drag_emits_typed_event() {
    let mut s = configured();
    s.place_at_value().unwrap();
    let seen: Arc<Mutex<Vec<ScaleChanged>>> = Arc::default();
    let sink = Arc::clone(&seen);
    s.set_listener(move |e| sink.lock().unwrap().push(e));

    s.begin_drag();
    let event = s.on_drag_move(40.0).unwrap().unwrap();
    let expected = s.value_at(s.position()).unwrap();
    assert_abs_diff_eq!(event.value, expected);
    assert_abs_diff_eq!(s.value(), expected);
    assert!(event.value > 1.0);

    s.end_drag();
    assert_eq!(s.on_drag_move(40.0).unwrap(), None);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0], event);
}

#[test]
fn test_drag_to_far_end_stays_in_bounds() {
    let mut s = configured();
    s.place_at_value().unwrap();
    s.begin_drag();
    let event = s.on_drag_move(10_000.0).unwrap().unwrap();
    let bounds = s.bounds().unwrap();
    assert_abs_diff_eq!(s.position(), s.max_position());
    assert!(bounds.contains(event.value));
    assert_abs_diff_eq!(event.value, 3.0 - 20.0 * s.step(), epsilon = 1e-12);

    let event = s.on_drag_move(-10_000.0).unwrap().unwrap();
    assert_eq!(s.position(), 0.0);
    assert_abs_diff_eq!(event.value, bounds.lower, epsilon = 1e-12);
}

#[test]
fn test_dot_updates_coalesce_per_frame() {
    let mut s = configured();
    s.place_at_value().unwrap();
    assert!(s.on_animation_frame().is_some());
    assert!(s.on_animation_frame().is_none());

    s.begin_drag();
    for _ in 0..5 {
        s.on_drag_move(3.0).unwrap();
    }
    let painted = s.on_animation_frame().unwrap();
    assert_abs_diff_eq!(painted, s.position());
    assert!(s.on_animation_frame().is_none());
}

#[test]
fn test_initial_value_clamped_into_range() {
    // 400px image under a 480px box: the image must be enlarged to cover it.
    let mut s = ScaleController::new(SliderOptions::with_track_width(TRACK));
    let bounds = s.configure(400, 300, 480.0, 360.0).unwrap();
    assert_abs_diff_eq!(bounds.lower, 1.2, epsilon = 1e-12);
    assert_abs_diff_eq!(s.value(), 1.2, epsilon = 1e-12);
    s.place_at_value().unwrap();
    assert_abs_diff_eq!(s.position(), 0.0, epsilon = 1e-9);
}
