use crate::{foundation::error::BubblelineResult, scene::builder::Scene, transition::frame::Frame};

/// Destination a [`crate::Stage`] paints into.
///
/// A detached target has nowhere to draw; stages skip every render while it stays detached.
pub trait PaintTarget {
    fn is_attached(&self) -> bool;

    /// Replace the current drawing with `scene` under the overrides and ghosts of `frame`.
    fn paint(&mut self, scene: &Scene, frame: &Frame) -> BubblelineResult<()>;
}
