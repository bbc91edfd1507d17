//! Crop engine: owns the image, its display scale and the pan offset beneath
//! the fixed crop box, and reads the cropped region back out.

use image::RgbaImage;
use tracing::{debug, info};

use crate::consts::INITIAL_SCALE;
use crate::error::{CropperError, Result};
use crate::geometry::{clamp_between, Offset, Region, Size};
use crate::loader::{DecodedImage, ImageLoader, ImageRecord, ImageSource};
use crate::pointer::DragSession;
use crate::schedule::FrameScheduler;
use crate::surface::{EncodeFormat, EncodedImage, RenderSurface};
use crate::viewport::{CropViewport, ViewportSpec};

pub struct CropEngine<S: RenderSurface> {
    container: Size,
    viewport: CropViewport,
    output_format: EncodeFormat,
    image: Option<ImageRecord>,
    scale: f64,
    /// Current pan state, updated on every move.
    pan: Offset,
    /// Translate last handed to the binding.
    presented: Offset,
    drag: DragSession,
    frame: FrameScheduler,
    /// Visible surface the image is rendered into.
    surface: S,
    /// Off-screen surface the crop is assembled in.
    scratch: S,
    revision: u64,
}

impl<S: RenderSurface> CropEngine<S> {
    pub fn new(
        container: Size,
        viewport: CropViewport,
        output_format: EncodeFormat,
        surface: S,
        scratch: S,
    ) -> Self {
        Self {
            container,
            viewport,
            output_format,
            image: None,
            scale: INITIAL_SCALE,
            pan: Offset::default(),
            presented: Offset::default(),
            drag: DragSession::default(),
            frame: FrameScheduler::default(),
            surface,
            scratch,
            revision: 0,
        }
    }

    /// Build an engine, resolving the viewport spec against the container.
    pub fn with_viewport_spec(
        container: Size,
        spec: &ViewportSpec,
        output_format: EncodeFormat,
        surface: S,
        scratch: S,
    ) -> Result<Self> {
        let viewport = spec.resolve(container)?;
        Ok(Self::new(container, viewport, output_format, surface, scratch))
    }

    /// Load the image and perform the initial placement and render.
    pub async fn initialize<L: ImageLoader>(&mut self, loader: &L, source: ImageSource) -> Result<()> {
        if self.image.is_some() {
            return Err(CropperError::IllegalState("image already loaded"));
        }
        let decoded = loader.load(&source).await?;
        self.load_decoded(source, decoded)
    }

    /// Synchronous half of [`CropEngine::initialize`], for callers that
    /// decoded the image themselves.
    pub fn load_decoded(&mut self, source: ImageSource, decoded: DecodedImage) -> Result<()> {
        if self.image.is_some() {
            return Err(CropperError::IllegalState("image already loaded"));
        }
        let record = ImageRecord::new(source, decoded);
        let surface_size = record.size().max(self.container);
        info!(
            source = %record.source,
            width = record.width,
            height = record.height,
            "Image loaded"
        );
        self.image = Some(record);

        self.surface.resize(surface_size.to_pixels());
        self.render()?;

        let centred = Offset::new(
            self.container.width / 2.0 - surface_size.width / 2.0,
            self.container.height / 2.0 - surface_size.height / 2.0,
        );
        self.pan = self.clamp_pan(centred)?;
        self.presented = self.pan;
        Ok(())
    }

    /// Apply a new display scale: resize the surface to the scaled image,
    /// redraw, and pull the pan offset back into range.
    pub fn set_scale(&mut self, factor: f64) -> Result<()> {
        self.loaded()?;
        if !(factor.is_finite() && factor > 0.0) {
            return Err(CropperError::Configuration(format!(
                "scale must be finite and positive, got {factor}"
            )));
        }
        self.scale = factor;
        let scaled = self.scaled_image_size()?;
        self.surface.resize(scaled.to_pixels());
        self.render()?;

        let clamped = self.clamp_pan(self.pan)?;
        if clamped != self.pan {
            debug!(from = ?self.pan, to = ?clamped, "Pan re-clamped after scale change");
            self.pan = clamped;
        }
        self.frame.request();
        debug!(scale = factor, width = scaled.width, height = scaled.height, "Scale applied");
        Ok(())
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

    /// Pan by a pointer delta while a drag is active. Each axis is clamped
    /// independently; the visual update is deferred to the next frame.
    pub fn on_drag_move(&mut self, dx: f64, dy: f64) -> Result<()> {
        self.loaded()?;
        if !self.drag.is_active() {
            return Ok(());
        }
        self.pan = self.clamp_pan(self.pan.translated(dx, dy))?;
        self.frame.request();
        Ok(())
    }

    /// Commit the pending visual update, returning the translate to apply.
    pub fn on_animation_frame(&mut self) -> Option<Offset> {
        if !self.frame.take() {
            return None;
        }
        self.presented = self.pan;
        Some(self.presented)
    }

    /// Read back the viewport-sized region of the rendered image currently
    /// under the crop box.
    pub fn extract_crop(&mut self) -> Result<RgbaImage> {
        self.loaded()?;
        if self.pan.left > 0.0 || self.pan.top > 0.0 {
            return Err(CropperError::IllegalState(
                "pan offset moved the image past the crop box origin",
            ));
        }

        let out = self.viewport.pixel_size();
        if out.width == 0 || out.height == 0 {
            return Err(CropperError::InvalidDimensions {
                width: out.width,
                height: out.height,
            });
        }
        let origin_x = (-self.pan.left).round() as i64;
        let origin_y = (-self.pan.top).round() as i64;

        self.scratch.resize(out);
        self.scratch.clear(Region::from_size(out));
        let pixels = self
            .surface
            .read_pixels(Region::new(origin_x, origin_y, out.width, out.height));
        self.scratch.write_pixels(&pixels, 0, 0);
        Ok(self.scratch.read_pixels(Region::from_size(out)))
    }

    /// The crop, encoded in the configured output format.
    pub fn result(&mut self) -> Result<EncodedImage> {
        self.extract_crop()?;
        let encoded = self.scratch.to_encoded_image(self.output_format)?;
        info!(
            format = %encoded.format,
            mime = encoded.format.mime_type(),
            width = encoded.width,
            height = encoded.height,
            bytes = encoded.bytes.len(),
            "Crop encoded"
        );
        Ok(encoded)
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn viewport(&self) -> CropViewport {
        self.viewport
    }

    pub fn image(&self) -> Option<&ImageRecord> {
        self.image.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn pan(&self) -> Offset {
        self.pan
    }

    pub fn presented(&self) -> Offset {
        self.presented
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Bumped every time the surface is redrawn.
    pub fn surface_revision(&self) -> u64 {
        self.revision
    }

    pub fn scaled_image_size(&self) -> Result<Size> {
        Ok(self.loaded()?.size().scaled(self.scale))
    }

    /// Allowed pan range as `(min, max)` offsets at the current scale.
    pub fn pan_range(&self) -> Result<(Offset, Offset)> {
        let scaled = self.scaled_image_size()?;
        let min = Offset::new(
            (self.container.width - scaled.width).min(0.0),
            (self.container.height - scaled.height).min(0.0),
        );
        Ok((min, Offset::default()))
    }

    fn clamp_pan(&self, offset: Offset) -> Result<Offset> {
        let (min, max) = self.pan_range()?;
        Ok(Offset::new(
            clamp_between(offset.left, min.left, max.left),
            clamp_between(offset.top, min.top, max.top),
        ))
    }

    fn render(&mut self) -> Result<()> {
        let dest = Region::from_size(self.scaled_image_size()?.to_pixels());
        let image = self
            .image
            .as_ref()
            .ok_or(CropperError::IllegalState("render before image load"))?;
        self.surface.clear(dest);
        self.surface.draw_image(&image.bitmap, dest);
        self.revision += 1;
        Ok(())
    }

    fn loaded(&self) -> Result<&ImageRecord> {
        self.image
            .as_ref()
            .ok_or(CropperError::IllegalState("image not loaded yet"))
    }
}
