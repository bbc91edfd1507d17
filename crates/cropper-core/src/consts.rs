/// Scale applied to a freshly loaded image (native size).
pub const INITIAL_SCALE: f64 = 1.0;

/// Ceiling of the zoom range, as a multiple of native size.
pub const DEFAULT_UPPER_SCALE_BOUND: f64 = 3.0;

/// Default crop viewport size as a percentage of the container, per axis.
pub const DEFAULT_VIEWPORT_PERCENT: f64 = 80.0;

/// Diameter of the slider dot in pixels. The dot can travel
/// `track_width - diameter` pixels along the track.
pub const DEFAULT_DOT_DIAMETER: f64 = 20.0;

/// Height of the slider track in pixels.
pub const DEFAULT_SLIDER_HEIGHT: f64 = 40.0;

/// JPEG quality of the crop result (matches the usual `image/jpeg` canvas default of 0.92).
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// Tolerance for scale comparisons.
pub const SCALE_EPSILON: f64 = 1e-9;
