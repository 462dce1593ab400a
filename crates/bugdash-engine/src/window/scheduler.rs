use winit::window::Window;

use crate::core::FrameScheduler;

/// Schedules the next tick on the window's next redraw.
///
/// With a FIFO swapchain redraws are paced by the display refresh, so ticks
/// follow it too.
pub struct RedrawScheduler<'w> {
    window: &'w Window,
}

impl<'w> RedrawScheduler<'w> {
    pub fn new(window: &'w Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for RedrawScheduler<'_> {
    fn request_frame(&mut self) {
        self.window.request_redraw();
    }
}
