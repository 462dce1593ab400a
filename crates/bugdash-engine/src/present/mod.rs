//! Presentation of the CPU render surface.
//!
//! Game code draws into a `RenderSurface`; the presenter uploads it to a GPU
//! texture once per frame and stretches it over the window.

mod presenter;

pub use presenter::Presenter;
