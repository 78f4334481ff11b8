//! In-memory cell host for headless runs.

use serde::Serialize;
use swipekit_widgets::CellHost;

/// Records what the cell asked of its host.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HeadlessHost {
    pub offset: f32,
    pub panel_attached: bool,
    pub attach_count: u32,
    pub detach_count: u32,
}

impl CellHost for HeadlessHost {
    fn attach_panel(&mut self) {
        self.panel_attached = true;
        self.attach_count += 1;
    }

    fn detach_panel(&mut self) {
        self.panel_attached = false;
        self.detach_count += 1;
    }

    fn set_offset(&mut self, offset: f32) {
        tracing::trace!(offset, "host offset");
        self.offset = offset;
    }
}
