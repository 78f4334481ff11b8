//! Host capabilities a swipeable cell needs from its container

/// The surface hosting a swipeable cell.
///
/// The cell never owns its container. Everything it needs from the host
/// list goes through this trait: placing the panel view behind the content
/// and moving the content surface.
pub trait CellHost {
    /// Insert the panel view behind the cell content, pinned to the trailing
    /// edge. Called again after a cancelled settle; must be idempotent.
    fn attach_panel(&mut self);

    /// Remove the panel view from the hierarchy
    fn detach_panel(&mut self);

    /// Move the content surface to a horizontal `offset` (never positive)
    fn set_offset(&mut self, offset: f32);
}
