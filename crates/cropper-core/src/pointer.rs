/// Pointer input delivered by the binding's event source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down,
    Up,
    /// Pointer left the interactive surface; ends any drag.
    Leave,
    /// Movement since the previous event, in pixels.
    Move { dx: f64, dy: f64 },
}

/// Drag session bookkeeping shared by the canvas and the slider dot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DragSession {
    active: bool,
}

impl DragSession {
    pub fn begin(&mut self) {
        self.active = true;
    }

    pub fn end(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
