//! Entity capabilities and the per-phase registry view.
//!
//! Two roles, two traits:
//! - [`AutonomousEntity`]: continuous, time-scaled motion; updated with `dt`
//! - [`ControlledEntity`]: discrete per-tick step logic; updated without `dt`
//!
//! The game owns its entities. For each phase it lends them to the loop as an
//! [`EntityRegistry`], which only iterates.

mod registry;

pub use registry::{EntityGroup, EntityRegistry};

use crate::render::DrawCtx;
use crate::time::DeltaTime;

/// Entity that moves on its own, scaled by elapsed time.
pub trait AutonomousEntity {
    /// Advances the entity by `dt`. Stationary entities keep the default.
    fn update(&mut self, dt: DeltaTime) -> anyhow::Result<()> {
        let _ = dt;
        Ok(())
    }

    fn render(&self, ctx: &mut DrawCtx<'_>) -> anyhow::Result<()>;
}

/// The single entity steered by the player.
pub trait ControlledEntity {
    /// Applies this tick's step logic.
    fn update(&mut self) -> anyhow::Result<()>;

    fn render(&self, ctx: &mut DrawCtx<'_>) -> anyhow::Result<()>;
}

impl<T: AutonomousEntity + ?Sized> AutonomousEntity for Box<T> {
    fn update(&mut self, dt: DeltaTime) -> anyhow::Result<()> {
        (**self).update(dt)
    }

    fn render(&self, ctx: &mut DrawCtx<'_>) -> anyhow::Result<()> {
        (**self).render(ctx)
    }
}
