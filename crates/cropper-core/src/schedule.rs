/// Coalesces visual updates to at most one per animation frame.
///
/// State changes happen immediately; only the visual commit is deferred until
/// the binding calls [`FrameScheduler::take`] on its next frame tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameScheduler {
    pending: bool,
}

impl FrameScheduler {
    /// Ask for a visual update. Returns `true` if this call scheduled a new
    /// frame, `false` if one was already pending.
    pub fn request(&mut self) -> bool {
        !std::mem::replace(&mut self.pending, true)
    }

    /// Consume the pending update, if any.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}
