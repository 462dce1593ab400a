use std::sync::Arc;

use crate::assets::{AssetError, ResourceProvider};

use super::{Font, Image, RenderSurface, TextStyle};

/// Everything a render call may touch: the surface and the loaded assets.
///
/// Handed to every entity, the level and the start screen in turn; nothing
/// else can draw during a tick.
pub struct DrawCtx<'a> {
    surface: &'a mut RenderSurface,
    assets: &'a dyn ResourceProvider,
}

impl<'a> DrawCtx<'a> {
    #[inline]
    pub fn new(surface: &'a mut RenderSurface, assets: &'a dyn ResourceProvider) -> Self {
        Self { surface, assets }
    }

    #[inline]
    pub fn surface(&mut self) -> &mut RenderSurface {
        &mut *self.surface
    }

    #[inline]
    pub fn assets(&self) -> &'a dyn ResourceProvider {
        self.assets
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    /// Resolves an image, failing with the missing identifier.
    pub fn image(&self, id: &str) -> Result<Arc<Image>, AssetError> {
        self.assets.get(id)
    }

    /// Draws the asset `id` with its top-left corner at `(x, y)`.
    pub fn draw_asset(&mut self, id: &str, x: i32, y: i32) -> Result<(), AssetError> {
        let image = self.assets.get(id)?;
        self.surface.draw_image(&image, x, y);
        Ok(())
    }

    pub fn draw_text(&mut self, font: &Font, text: &str, x: f32, baseline: f32, style: &TextStyle) {
        self.surface.draw_text(font, text, x, baseline, style);
    }
}
