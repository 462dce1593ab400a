//! Bugdash engine crate.
//!
//! A frame-timed loop for small 2D arcade games: asset gating before the
//! first frame, a strict update-then-render cycle per display frame, and a
//! winit + wgpu host that presents a CPU-drawn surface.

pub mod assets;
pub mod config;
pub mod core;
pub mod device;
pub mod entity;
pub mod level;
pub mod logging;
pub mod mode;
pub mod paint;
pub mod present;
pub mod render;
pub mod time;
pub mod window;
