//! The assembled widget: one crop engine driven by one scale controller.

use tracing::debug;

use crate::config::{CropperConfig, CropperOptions};
use crate::consts::SCALE_EPSILON;
use crate::container::{ContainerRef, ElementLookup};
use crate::engine::CropEngine;
use crate::error::{CropperError, Result};
use crate::geometry::{Offset, Size};
use crate::loader::{ImageLoader, ImageSource};
use crate::pointer::PointerEvent;
use crate::slider::{ScaleChanged, ScaleController};
use crate::surface::{EncodedImage, RenderSurface};

/// Visual changes to apply on an animation frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameUpdate {
    /// New translate for the image surface.
    pub canvas_offset: Option<Offset>,
    /// New dot coordinate along the slider track.
    pub dot_position: Option<f64>,
}

impl FrameUpdate {
    pub fn is_empty(&self) -> bool {
        self.canvas_offset.is_none() && self.dot_position.is_none()
    }
}

pub struct Cropper<S: RenderSurface> {
    options: CropperOptions,
    engine: CropEngine<S>,
    slider: ScaleController,
}

impl<S: RenderSurface> Cropper<S> {
    /// Build a cropper for a container of known size. Fails on invalid
    /// configuration; the image is loaded separately with [`Cropper::init`].
    pub fn new(container: Size, config: &CropperConfig, surface: S, scratch: S) -> Result<Self> {
        let options = config.validate(container)?;
        let engine = CropEngine::new(
            container,
            options.viewport,
            options.output_format,
            surface,
            scratch,
        );
        let slider = ScaleController::new(options.slider.clone());
        debug!(
            container = ?container,
            viewport = ?options.viewport.size,
            "Cropper created"
        );
        Ok(Self {
            options,
            engine,
            slider,
        })
    }

    /// Like [`Cropper::new`], resolving the container through a lookup first.
    pub fn for_container(
        container: &ContainerRef,
        lookup: &impl ElementLookup,
        config: &CropperConfig,
        surface: S,
        scratch: S,
    ) -> Result<Self> {
        let size = container.resolve(lookup)?;
        Self::new(size, config, surface, scratch)
    }

    /// Load the image, calibrate the slider against it and place the dot
    /// at the starting scale. Must complete before any interaction.
    ///
    /// A failed `init` leaves the cropper unloaded and may be retried.
    pub async fn init<L: ImageLoader>(&mut self, loader: &L, source: ImageSource) -> Result<()> {
        if self.engine.is_loaded() {
            return Err(CropperError::IllegalState("image already loaded"));
        }
        let decoded = loader.load(&source).await?;
        let viewport = self.engine.viewport();
        self.slider.configure(
            decoded.width,
            decoded.height,
            viewport.width(),
            viewport.height(),
        )?;
        self.engine.load_decoded(source, decoded)?;
        self.slider.place_at_value()?;

        let value = self.slider.value();
        if (value - self.engine.scale()).abs() > SCALE_EPSILON {
            self.engine.set_scale(value)?;
        }
        Ok(())
    }

    /// Route a pointer event received on the image container.
    pub fn handle_canvas_event(&mut self, event: PointerEvent) -> Result<()> {
        match event {
            PointerEvent::Down => self.engine.begin_drag(),
            PointerEvent::Up | PointerEvent::Leave => self.engine.end_drag(),
            PointerEvent::Move { dx, dy } => self.engine.on_drag_move(dx, dy)?,
        }
        Ok(())
    }

    /// Route a pointer event received on the slider dot (down) or anywhere
    /// in the document (up, leave, move).
    pub fn handle_slider_event(&mut self, event: PointerEvent) -> Result<Option<ScaleChanged>> {
        match event {
            PointerEvent::Down => self.slider.begin_drag(),
            PointerEvent::Up | PointerEvent::Leave => self.slider.end_drag(),
            PointerEvent::Move { dx, .. } => {
                let changed = self.slider.on_drag_move(dx)?;
                if let Some(change) = changed {
                    self.apply_scale(change)?;
                }
                return Ok(changed);
            }
        }
        Ok(None)
    }

    /// Feed a slider change into the engine, keeping it inside the slider's range.
    fn apply_scale(&mut self, change: ScaleChanged) -> Result<()> {
        let bounds = self
            .slider
            .bounds()
            .ok_or(CropperError::IllegalState("slider used before configure"))?;
        if !bounds.contains(change.value) {
            return Err(CropperError::Configuration(format!(
                "scale {} outside slider range [{}, {}]",
                change.value, bounds.lower, bounds.upper
            )));
        }
        self.engine.set_scale(change.value)
    }

    /// Flush the visual updates scheduled since the previous frame.
    pub fn on_animation_frame(&mut self) -> FrameUpdate {
        FrameUpdate {
            canvas_offset: self.engine.on_animation_frame(),
            dot_position: self.slider.on_animation_frame(),
        }
    }

    pub fn result(&mut self) -> Result<EncodedImage> {
        self.engine.result()
    }

    pub fn options(&self) -> &CropperOptions {
        &self.options
    }

    pub fn engine(&self) -> &CropEngine<S> {
        &self.engine
    }

    pub fn slider(&self) -> &ScaleController {
        &self.slider
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;

    use image::RgbaImage;

    use super::*;
    use crate::loader::DecodedImage;
    use crate::surface::RasterSurface;

    struct BlankLoader(u32, u32);

    impl ImageLoader for BlankLoader {
        fn load(&self, _source: &ImageSource) -> impl Future<Output = Result<DecodedImage>> + Send {
            let bitmap = RgbaImage::new(self.0, self.1);
            async move { DecodedImage::from_bitmap(bitmap) }
        }
    }

    fn loaded() -> Cropper<RasterSurface> {
        let mut c = Cropper::new(
            Size::new(400.0, 400.0),
            &CropperConfig::default(),
            RasterSurface::default(),
            RasterSurface::default(),
        )
        .unwrap();
        let source = ImageSource::bytes("blank", Vec::new());
        pollster::block_on(c.init(&BlankLoader(1000, 500), source)).unwrap();
        c
    }

    #[test]
    fn out_of_range_scale_is_rejected() {
        let mut c = loaded();
        for value in [0.05, 3.5] {
            let err = c.apply_scale(ScaleChanged { value }).unwrap_err();
            assert!(matches!(err, CropperError::Configuration(_)));
        }
        assert_eq!(c.engine().scale(), 1.0);
        assert_eq!(c.slider().value(), 1.0);
    }

    #[test]
    fn in_range_scale_reaches_engine() {
        let mut c = loaded();
        c.apply_scale(ScaleChanged { value: 0.32 }).unwrap();
        assert_eq!(c.engine().scale(), 0.32);
    }
}
