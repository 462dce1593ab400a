use crate::assets::{AssetManifest, ResourceProvider};
use crate::entity::EntityRegistry;
use crate::level::TileGrid;
use crate::mode::Mode;
use crate::render::DrawCtx;

/// Control directive returned by loop operations.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Game contract implemented by the layer above the engine.
///
/// The game owns its entities, its mode gate and its start-screen content;
/// the loop decides when each hook runs.
pub trait Game {
    /// Every asset the game will draw. Declared once, before loading starts.
    fn manifest(&self) -> AssetManifest;

    /// Current mode. Read once before the update phase and once before the
    /// render phase of every tick.
    fn mode(&self) -> Mode;

    /// Reset hook, run once when assets are ready, before any other setup.
    fn reset(&mut self) {}

    /// One-time setup that needs loaded assets. An error aborts startup.
    fn on_assets_ready(&mut self, assets: &dyn ResourceProvider) -> anyhow::Result<()> {
        let _ = assets;
        Ok(())
    }

    /// Level background drawn first in gameplay mode.
    fn level(&self) -> &TileGrid;

    /// Lends the entities to the loop for one phase.
    fn entities(&mut self) -> EntityRegistry<'_>;

    /// Collision pass, run after every entity has updated.
    fn check_collisions(&mut self) {}

    /// Start presentation, drawn instead of the level when not in gameplay.
    fn render_start_screen(&mut self, ctx: &mut DrawCtx<'_>) -> anyhow::Result<()>;
}
