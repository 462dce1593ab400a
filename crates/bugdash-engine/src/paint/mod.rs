//! Color model shared by the render surface, text drawing and the presenter.
//!
//! Pixels are straight-alpha sRGB bytes. The surface is composited on the CPU
//! and uploaded as-is into an `Rgba8UnormSrgb` texture.

mod color;

pub use color::Rgba8;
