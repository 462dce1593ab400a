use std::collections::HashSet;
use std::fmt;

use crate::assets::AssetError;
use crate::mode::Mode;
use crate::render::DrawCtx;
use crate::time::DeltaTime;

use super::{EngineError, Game};

/// Which render branch ran for a tick. Exactly one runs per tick.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RenderBranch {
    Gameplay,
    StartScreen,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
enum Phase {
    Update,
    Render,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Update => "update",
            Phase::Render => "render",
        })
    }
}

/// Per-entity failures already reported.
///
/// The first failure of an entity in a phase is logged at `warn`; repeats of
/// it go to `debug`, so an entity failing every frame does not flood the log.
#[derive(Debug, Default)]
pub(crate) struct FailureLog {
    seen: HashSet<(Phase, &'static str, usize)>,
}

impl FailureLog {
    pub(crate) fn clear(&mut self) {
        self.seen.clear();
    }

    /// Keeps one entity's failure from aborting the phase.
    ///
    /// Asset resolution failures are the exception: they mean the manifest
    /// and the game disagree, which no later frame can fix.
    fn isolate(
        &mut self,
        result: anyhow::Result<()>,
        phase: Phase,
        group: &'static str,
        index: usize,
    ) -> Result<(), EngineError> {
        let Err(err) = result else { return Ok(()) };

        if let Some(asset) = err.chain().find_map(|e| e.downcast_ref::<AssetError>()) {
            return Err(EngineError::Asset(asset.clone()));
        }

        if self.seen.insert((phase, group, index)) {
            log::warn!("{phase} failed for {group}[{index}]: {err:#}");
        } else {
            log::debug!("{phase} failed again for {group}[{index}]: {err:#}");
        }
        Ok(())
    }

    #[cfg(test)]
    fn reported(&self) -> usize {
        self.seen.len()
    }
}

/// Update phase. Skipped entirely outside gameplay.
///
/// Autonomous entities update in group declaration order, then member order;
/// the controlled entity follows, then the collision pass.
pub(crate) fn update<G: Game + ?Sized>(
    game: &mut G,
    dt: DeltaTime,
    failures: &mut FailureLog,
) -> Result<(), EngineError> {
    if !game.mode().is_gameplay() {
        return Ok(());
    }

    {
        let mut registry = game.entities();

        for group in registry.groups_mut() {
            let name = group.name;
            for (index, entity) in group.members.iter_mut().enumerate() {
                failures.isolate(entity.update(dt), Phase::Update, name, index)?;
            }
        }

        if let Some(controlled) = registry.controlled_mut() {
            failures.isolate(controlled.update(), Phase::Update, "controlled", 0)?;
        }
    }

    game.check_collisions();
    Ok(())
}

/// Render phase: level, groups in order, controlled entity on top; or the
/// start screen alone.
pub(crate) fn render<G: Game + ?Sized>(
    game: &mut G,
    ctx: &mut DrawCtx<'_>,
    failures: &mut FailureLog,
) -> Result<RenderBranch, EngineError> {
    match game.mode() {
        Mode::Gameplay => {
            game.level().render(ctx)?;

            let registry = game.entities();
            for group in registry.groups() {
                for (index, entity) in group.members.iter().enumerate() {
                    failures.isolate(entity.render(ctx), Phase::Render, group.name, index)?;
                }
            }
            if let Some(controlled) = registry.controlled_ref() {
                failures.isolate(controlled.render(ctx), Phase::Render, "controlled", 0)?;
            }

            Ok(RenderBranch::Gameplay)
        }
        Mode::StartScreen => {
            failures.isolate(game.render_start_screen(ctx), Phase::Render, "start screen", 0)?;
            Ok(RenderBranch::StartScreen)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetId;

    #[test]
    fn repeated_failure_is_reported_once() {
        let mut failures = FailureLog::default();

        for _ in 0..60 {
            let result = failures.isolate(Err(anyhow::anyhow!("stuck")), Phase::Update, "enemies", 2);
            assert!(result.is_ok());
        }
        assert_eq!(failures.reported(), 1);

        failures.isolate(Err(anyhow::anyhow!("stuck")), Phase::Render, "enemies", 2).unwrap();
        failures.isolate(Err(anyhow::anyhow!("stuck")), Phase::Update, "enemies", 3).unwrap();
        assert_eq!(failures.reported(), 3);

        failures.clear();
        assert_eq!(failures.reported(), 0);
    }

    #[test]
    fn success_is_not_recorded() {
        let mut failures = FailureLog::default();
        failures.isolate(Ok(()), Phase::Update, "rocks", 0).unwrap();
        assert_eq!(failures.reported(), 0);
    }

    #[test]
    fn asset_error_in_chain_is_fatal() {
        let mut failures = FailureLog::default();
        let err = anyhow::Error::new(AssetError::NotLoaded(AssetId::new("ghost.png")))
            .context("drawing enemy");

        match failures.isolate(Err(err), Phase::Render, "enemies", 0) {
            Err(EngineError::Asset(AssetError::NotLoaded(id))) => assert_eq!(id.as_str(), "ghost.png"),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(failures.reported(), 0);
    }
}
