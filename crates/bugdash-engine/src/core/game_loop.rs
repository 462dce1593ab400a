use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::assets::{AssetError, ResourceProvider};
use crate::config::LoopConfig;
use crate::render::{DrawCtx, RenderSurface};
use crate::time::{FrameClock, FrameTime, MonotonicTime, TimeSource};

use super::phases::{self, FailureLog, RenderBranch};
use super::{EngineError, FrameScheduler, Game, LoopControl};

/// Lifecycle of a [`GameLoop`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    Uninitialized,
    WaitingForAssets,
    Running,
    /// Halted by [`LoopHandle::stop`] or by a fatal error. Terminal.
    Stopped,
}

impl fmt::Display for LoopState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LoopState::Uninitialized => "uninitialized",
            LoopState::WaitingForAssets => "waiting for assets",
            LoopState::Running => "running",
            LoopState::Stopped => "stopped",
        })
    }
}

/// Liveness flag of a loop. Cloneable; any clone can stop the loop.
///
/// Checked at the top of every tick: once stopped, the loop does no more work
/// and no longer reschedules itself.
#[derive(Debug, Clone)]
pub struct LoopHandle {
    alive: Arc<AtomicBool>,
}

impl LoopHandle {
    fn new() -> Self {
        Self { alive: Arc::new(AtomicBool::new(true)) }
    }

    pub fn stop(&self) {
        self.alive.store(false, Ordering::Release);
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }
}

/// Game loop controller.
///
/// Sequences asset loading, one-time setup and the per-tick
/// update-then-render cycle for one game. It never schedules itself: each
/// completed tick asks the host's [`FrameScheduler`] for the next frame, and
/// the host calls [`tick`](Self::tick) when that frame comes.
pub struct GameLoop<G> {
    game: G,
    config: LoopConfig,
    state: LoopState,
    surface: RenderSurface,
    assets: Option<Arc<dyn ResourceProvider>>,
    clock: Option<FrameClock>,
    time: Box<dyn TimeSource>,
    handle: LoopHandle,
    last_frame: Option<FrameTime>,
    last_branch: Option<RenderBranch>,
    failures: FailureLog,
}

impl<G: Game> GameLoop<G> {
    pub fn new(game: G, config: LoopConfig) -> Self {
        Self::with_time_source(game, config, MonotonicTime)
    }

    /// Loop reading "now" from `time` instead of the system clock.
    pub fn with_time_source(game: G, config: LoopConfig, time: impl TimeSource + 'static) -> Self {
        let surface = RenderSurface::new(config.surface_width, config.surface_height);
        Self {
            game,
            config,
            state: LoopState::Uninitialized,
            surface,
            assets: None,
            clock: None,
            time: Box::new(time),
            handle: LoopHandle::new(),
            last_frame: None,
            last_branch: None,
            failures: FailureLog::default(),
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    /// The surface as left by the most recent render phase.
    pub fn surface(&self) -> &RenderSurface {
        &self.surface
    }

    pub fn last_frame(&self) -> Option<FrameTime> {
        self.last_frame
    }

    pub fn last_branch(&self) -> Option<RenderBranch> {
        self.last_branch
    }

    /// Declares the game's manifest and starts loading it.
    ///
    /// `notify` runs once with the load outcome, possibly on a loader thread;
    /// the host must hand that outcome back to [`assets_ready`](Self::assets_ready)
    /// on the loop's own thread.
    pub fn initialize<F>(&mut self, assets: Arc<dyn ResourceProvider>, notify: F) -> Result<(), EngineError>
    where
        F: FnOnce(Result<(), AssetError>) + Send + 'static,
    {
        self.expect_state("initialize", LoopState::Uninitialized)?;

        let manifest = self.game.manifest();
        log::info!("declaring {} assets", manifest.len());

        // Set before loading: readiness may be reported synchronously.
        self.state = LoopState::WaitingForAssets;
        self.assets = Some(Arc::clone(&assets));
        self.failures.clear();

        assets.load(&manifest);
        assets.on_ready(Box::new(notify));
        Ok(())
    }

    /// Completes startup once loading has settled, then runs the first tick.
    ///
    /// A failed load or a failed game setup stops the loop.
    pub fn assets_ready(
        &mut self,
        outcome: Result<(), AssetError>,
        scheduler: &mut dyn FrameScheduler,
    ) -> Result<LoopControl, EngineError> {
        self.expect_state("assets_ready", LoopState::WaitingForAssets)?;

        if let Err(e) = outcome {
            self.state = LoopState::Stopped;
            return Err(EngineError::Asset(e));
        }

        let assets = self.assets.clone().ok_or(EngineError::InvalidState {
            operation: "assets_ready",
            state: self.state,
        })?;

        self.game.reset();

        if let Err(e) = self.game.on_assets_ready(&*assets) {
            self.state = LoopState::Stopped;
            return Err(EngineError::Setup(e));
        }

        let mut clock = FrameClock::new(self.time.now());
        if let Some(max) = self.config.max_frame_delta {
            clock = clock.with_max_delta(max);
        }
        self.clock = Some(clock);
        self.state = LoopState::Running;
        log::info!(
            "loop running on a {}x{} surface",
            self.surface.width(),
            self.surface.height()
        );

        self.tick(scheduler)
    }

    /// Runs one frame: update phase, render phase, then reschedule.
    pub fn tick(&mut self, scheduler: &mut dyn FrameScheduler) -> Result<LoopControl, EngineError> {
        if !self.handle.is_alive() {
            if self.state != LoopState::Stopped {
                log::info!("stop requested; loop halted");
                self.state = LoopState::Stopped;
            }
            return Ok(LoopControl::Exit);
        }

        self.expect_state("tick", LoopState::Running)?;

        if let Err(e) = self.run_frame() {
            self.state = LoopState::Stopped;
            return Err(e);
        }

        scheduler.request_frame();
        Ok(LoopControl::Continue)
    }

    fn run_frame(&mut self) -> Result<(), EngineError> {
        let now = self.time.now();
        let (Some(clock), Some(assets)) = (self.clock.as_mut(), self.assets.as_ref()) else {
            return Err(EngineError::InvalidState { operation: "tick", state: self.state });
        };

        let frame = clock.tick(now);

        phases::update(&mut self.game, frame.dt, &mut self.failures)?;

        if let Some(color) = self.config.clear_color {
            self.surface.clear(color);
        }
        let mut ctx = DrawCtx::new(&mut self.surface, &**assets);
        let branch = phases::render(&mut self.game, &mut ctx, &mut self.failures)?;

        log::trace!(
            "frame {} dt={:.4}s branch={branch:?}",
            frame.frame_index,
            frame.dt.as_secs()
        );

        self.last_frame = Some(frame);
        self.last_branch = Some(branch);
        Ok(())
    }

    fn expect_state(&self, operation: &'static str, expected: LoopState) -> Result<(), EngineError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(EngineError::InvalidState { operation, state: self.state })
        }
    }
}
