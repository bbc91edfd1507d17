//! Scale controller: maps a dot dragged along a fixed-length track onto a
//! bounded zoom factor.

use tracing::{debug, warn};

use crate::config::SliderOptions;
use crate::consts::{INITIAL_SCALE, SCALE_EPSILON};
use crate::error::{CropperError, Result};
use crate::geometry::clamp_between;
use crate::pointer::DragSession;
use crate::schedule::FrameScheduler;

/// Zoom range the slider maps onto.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBounds {
    /// Smallest scale at which the image's longer side still covers the crop box.
    pub lower: f64,
    pub upper: f64,
}

impl ScaleBounds {
    /// Bounds for an image of `image_w x image_h` under a crop box of
    /// `viewport_w x viewport_h`.
    pub fn for_image(
        image_w: f64,
        image_h: f64,
        viewport_w: f64,
        viewport_h: f64,
        upper: f64,
    ) -> Result<Self> {
        if !(image_w > 0.0 && image_h > 0.0) {
            return Err(CropperError::Configuration(format!(
                "image dimensions must be positive, got {image_w}x{image_h}"
            )));
        }
        let (max_dim, min_dim) = if image_w > image_h {
            (image_w, viewport_w)
        } else {
            (image_h, viewport_h)
        };
        let lower = min_dim / max_dim;
        if !(lower.is_finite() && lower > 0.0 && lower < upper) {
            return Err(CropperError::Configuration(format!(
                "scale range is empty: lower bound {lower:.4} is not below upper bound {upper}"
            )));
        }
        Ok(Self { lower, upper })
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower - SCALE_EPSILON && value <= self.upper + SCALE_EPSILON
    }

    pub fn clamp(&self, value: f64) -> f64 {
        clamp_between(value, self.lower, self.upper)
    }
}

/// Emitted whenever a drag moves the dot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleChanged {
    pub value: f64,
}

pub type ScaleListener = Box<dyn FnMut(ScaleChanged) + Send>;

#[derive(Clone, Copy, Debug)]
struct Calibration {
    bounds: ScaleBounds,
    step: f64,
}

pub struct ScaleController {
    options: SliderOptions,
    calibration: Option<Calibration>,
    value: f64,
    position: f64,
    drag: DragSession,
    frame: FrameScheduler,
    listener: Option<ScaleListener>,
}

impl ScaleController {
    pub fn new(options: SliderOptions) -> Self {
        Self {
            options,
            calibration: None,
            value: INITIAL_SCALE,
            position: 0.0,
            drag: DragSession::default(),
            frame: FrameScheduler::default(),
            listener: None,
        }
    }

    pub fn options(&self) -> &SliderOptions {
        &self.options
    }

    /// Register the listener notified on every drag-driven change.
    pub fn set_listener(&mut self, listener: impl FnMut(ScaleChanged) + Send + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Compute the zoom range for an image under a crop box and the
    /// per-pixel step of the track.
    ///
    /// The current value is pulled into the new range if it falls outside.
    pub fn configure(
        &mut self,
        image_width: u32,
        image_height: u32,
        viewport_width: f64,
        viewport_height: f64,
    ) -> Result<ScaleBounds> {
        let bounds = ScaleBounds::for_image(
            image_width as f64,
            image_height as f64,
            viewport_width,
            viewport_height,
            self.options.upper_bound,
        )?;
        let step = (bounds.upper - bounds.lower) / self.options.track_width;
        self.calibration = Some(Calibration { bounds, step });

        if !bounds.contains(self.value) {
            let clamped = bounds.clamp(self.value);
            warn!(
                value = self.value,
                clamped,
                lower = bounds.lower,
                upper = bounds.upper,
                "Scale outside slider range, clamping"
            );
            self.value = clamped;
        }
        debug!(lower = bounds.lower, upper = bounds.upper, step, "Slider configured");
        Ok(bounds)
    }

    pub fn bounds(&self) -> Option<ScaleBounds> {
        self.calibration.map(|c| c.bounds)
    }

    /// Scale change per pixel of dot travel; zero until configured.
    pub fn step(&self) -> f64 {
        self.calibration.map_or(0.0, |c| c.step)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// Furthest the dot can travel along the track.
    pub fn max_position(&self) -> f64 {
        self.options.track_width - self.options.dot_diameter
    }

    /// Scale corresponding to a track coordinate, without clamping.
    pub fn value_at(&self, position: f64) -> Result<f64> {
        let c = self.calibrated()?;
        Ok(c.bounds.lower + position * c.step)
    }

    /// Track coordinate corresponding to a scale, without clamping.
    pub fn position_for(&self, value: f64) -> Result<f64> {
        let c = self.calibrated()?;
        Ok((value - c.bounds.lower) / c.step)
    }

    /// Place the dot so it represents the current value.
    pub fn place_at_value(&mut self) -> Result<f64> {
        let position = self.position_for(self.value)?;
        self.set_position(position)
    }

    /// Move the dot directly and re-derive the value. Does not notify.
    pub fn set_position(&mut self, x: f64) -> Result<f64> {
        let position = self.clamp_position(x);
        self.value = self.value_at(position)?;
        self.position = position;
        self.frame.request();
        Ok(self.value)
    }

    pub fn begin_drag(&mut self) {
        self.drag.begin();
    }

    pub fn end_drag(&mut self) {
        self.drag.end();
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    /// Advance the dot by `dx` while a drag is active and announce the new
    /// value. Returns `None` when no drag is in progress.
    pub fn on_drag_move(&mut self, dx: f64) -> Result<Option<ScaleChanged>> {
        if !self.drag.is_active() {
            return Ok(None);
        }
        let position = self.clamp_position(self.position + dx);
        self.value = self.value_at(position)?;
        self.position = position;
        self.frame.request();

        let event = ScaleChanged { value: self.value };
        if let Some(listener) = self.listener.as_mut() {
            listener(event);
        }
        Ok(Some(event))
    }

    /// Dot position to paint, if it moved since the last frame.
    pub fn on_animation_frame(&mut self) -> Option<f64> {
        self.frame.take().then_some(self.position)
    }

    fn clamp_position(&self, x: f64) -> f64 {
        clamp_between(x, 0.0, self.max_position())
    }

    fn calibrated(&self) -> Result<Calibration> {
        self.calibration
            .ok_or(CropperError::IllegalState("slider used before configure"))
    }
}
