use approx::assert_abs_diff_eq;

use cropper_core::error::CropperError;
use cropper_core::geometry::Size;
use cropper_core::viewport::{ViewportDimension, ViewportSpec};

#[test]
fn test_percent_of_container() {
    let vp = ViewportSpec::percent(80.0, 80.0)
        .resolve(Size::new(400.0, 400.0))
        .unwrap();
    assert_abs_diff_eq!(vp.width(), 320.0);
    assert_abs_diff_eq!(vp.height(), 320.0);
    assert_eq!(vp.pixel_size().width, 320);
}

#[test]
fn test_default_is_eighty_percent() {
    let vp = ViewportSpec::default().resolve(Size::new(500.0, 250.0)).unwrap();
    assert_abs_diff_eq!(vp.width(), 400.0);
    assert_abs_diff_eq!(vp.height(), 200.0);
}

#[test]
fn test_percent_and_pixels_agree() {
    let containers = [(400.0, 400.0), (640.0, 480.0), (333.0, 127.0), (1920.0, 1080.0)];
    let percents = [10.0, 33.3, 50.0, 80.0, 100.0];

    for &(cw, ch) in &containers {
        let container = Size::new(cw, ch);
        for &p in &percents {
            let by_percent = ViewportSpec::percent(p, p).resolve(container).unwrap();
            let by_pixels = ViewportSpec::pixels(cw * p / 100.0, ch * p / 100.0)
                .resolve(container)
                .unwrap();
            assert_abs_diff_eq!(by_percent.width(), by_pixels.width(), epsilon = 1e-6);
            assert_abs_diff_eq!(by_percent.height(), by_pixels.height(), epsilon = 1e-6);
        }
    }
}

#[test]
fn test_numbers_are_pixels() {
    let vp = ViewportSpec::numbers(250.0, 120.0)
        .resolve(Size::new(400.0, 400.0))
        .unwrap();
    assert_abs_diff_eq!(vp.width(), 250.0);
    assert_abs_diff_eq!(vp.height(), 120.0);
}

#[test]
fn test_pixel_suffix_with_whitespace() {
    let spec = ViewportSpec {
        width: ViewportDimension::Text(" 300 px".into()),
        height: ViewportDimension::Text("200px".into()),
    };
    let vp = spec.resolve(Size::new(400.0, 400.0)).unwrap();
    assert_abs_diff_eq!(vp.width(), 300.0);
    assert_abs_diff_eq!(vp.height(), 200.0);
}

#[test]
fn test_mixed_units_rejected() {
    let spec = ViewportSpec {
        width: ViewportDimension::Text("80%".into()),
        height: ViewportDimension::Text("320px".into()),
    };
    let err = spec.resolve(Size::new(400.0, 400.0)).unwrap_err();
    assert!(matches!(err, CropperError::Configuration(_)), "got: {err}");

    let spec = ViewportSpec {
        width: ViewportDimension::Number(300.0),
        height: ViewportDimension::Text("80%".into()),
    };
    assert!(spec.resolve(Size::new(400.0, 400.0)).is_err());
}

#[test]
fn test_unitless_string_rejected() {
    let spec = ViewportSpec {
        width: ViewportDimension::Text("320".into()),
        height: ViewportDimension::Text("320".into()),
    };
    assert!(matches!(
        spec.resolve(Size::new(400.0, 400.0)),
        Err(CropperError::Configuration(_))
    ));
}

#[test]
fn test_non_positive_rejected() {
    let container = Size::new(400.0, 400.0);
    assert!(ViewportSpec::percent(0.0, 50.0).resolve(container).is_err());
    assert!(ViewportSpec::numbers(-10.0, 50.0).resolve(container).is_err());
    assert!(ViewportSpec::numbers(f64::NAN, 50.0).resolve(container).is_err());
}

#[test]
fn test_spec_from_toml_accepts_strings_and_numbers() {
    #[derive(serde::Deserialize)]
    struct Wrapper {
        viewport: ViewportSpec,
    }

    let w: Wrapper = toml::from_str("[viewport]\nwidth = \"75%\"\nheight = \"60%\"\n").unwrap();
    assert_eq!(w.viewport, ViewportSpec::percent(75.0, 60.0));

    let w: Wrapper = toml::from_str("[viewport]\nwidth = 300\nheight = 200.5\n").unwrap();
    assert_eq!(w.viewport, ViewportSpec::numbers(300.0, 200.5));
}
