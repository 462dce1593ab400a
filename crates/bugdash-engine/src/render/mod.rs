//! CPU render surface.
//!
//! The playfield is composited into a fixed-size RGBA buffer. Entity and
//! start-screen code draw into it through a `DrawCtx`; the `present` module
//! uploads the finished buffer to the window once per frame.
//!
//! Convention:
//! - integer device pixels, top-left origin, +Y down
//! - everything outside the surface is clipped silently

mod ctx;
mod image;
mod surface;
mod text;

pub use ctx::DrawCtx;
pub use image::Image;
pub use surface::RenderSurface;
pub use text::{Font, FontLoadError, TextAlign, TextStyle};
