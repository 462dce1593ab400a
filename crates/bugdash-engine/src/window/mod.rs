//! Window host.
//!
//! Owns the `winit` event loop and the game window, wires them to the GPU
//! layer, and drives a [`GameLoop`](crate::core::GameLoop) from redraw events.

mod runtime;
mod scheduler;

pub use runtime::{Runtime, RuntimeEvent};
pub use scheduler::RedrawScheduler;
