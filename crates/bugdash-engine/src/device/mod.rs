//! GPU device and surface management.
//!
//! Creates the wgpu device bound to the game window, keeps the swapchain
//! configured, and hands out one frame at a time to the presenter.

mod gpu;
mod surface;

pub use gpu::{Gpu, GpuFrame, SurfaceErrorAction};
