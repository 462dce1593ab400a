use std::sync::Arc;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy};
use winit::window::{Window, WindowId};

use crate::assets::{AssetError, ResourceProvider};
use crate::config::EngineConfig;
use crate::core::{Game, GameLoop, LoopControl, LoopState};
use crate::device::{Gpu, SurfaceErrorAction};
use crate::present::Presenter;

use super::RedrawScheduler;

/// Events delivered to the event loop from other threads.
#[derive(Debug)]
pub enum RuntimeEvent {
    /// Asset loading settled; carries the load outcome.
    AssetsReady(Result<(), AssetError>),
}

/// Entry point for the windowed host.
pub struct Runtime;

impl Runtime {
    /// Opens the game window and runs `game` until the window closes or the
    /// loop stops.
    ///
    /// A fatal engine error stops the loop, closes the window and is returned
    /// once the event loop has exited.
    pub fn run<G>(config: EngineConfig, assets: Arc<dyn ResourceProvider>, game: G) -> Result<()>
    where
        G: Game + 'static,
    {
        let event_loop = EventLoop::<RuntimeEvent>::with_user_event()
            .build()
            .context("failed to create winit EventLoop")?;
        let proxy = event_loop.create_proxy();

        let mut state = HostState::new(config, assets, proxy, game);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    presenter: Presenter,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct HostState<G>
where
    G: Game + 'static,
{
    config: EngineConfig,
    game_loop: GameLoop<G>,
    assets: Arc<dyn ResourceProvider>,
    proxy: EventLoopProxy<RuntimeEvent>,

    window: Option<WindowEntry>,
    /// Outcome that arrived while no window existed.
    pending: Option<Result<(), AssetError>>,
    fatal: Option<anyhow::Error>,
    exit_requested: bool,
}

impl<G> HostState<G>
where
    G: Game + 'static,
{
    fn new(
        config: EngineConfig,
        assets: Arc<dyn ResourceProvider>,
        proxy: EventLoopProxy<RuntimeEvent>,
        game: G,
    ) -> Self {
        let game_loop = GameLoop::new(game, config.loop_config.clone());
        Self {
            config,
            game_loop,
            assets,
            proxy,
            window: None,
            pending: None,
            fatal: None,
            exit_requested: false,
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowId> {
        let size = LogicalSize::new(
            f64::from(self.config.loop_config.surface_width),
            f64::from(self.config.loop_config.surface_height),
        );
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let id = window.id();
        let gpu = &self.config.gpu;

        let entry = WindowEntryTryBuilder {
            presenter: Presenter::new(gpu.blit_filter),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu)),
        }
        .try_build()
        .context("GPU initialization failed for window")?;

        self.window = Some(entry);
        Ok(id)
    }

    fn start_loading(&mut self) -> Result<()> {
        let proxy = self.proxy.clone();
        self.game_loop
            .initialize(Arc::clone(&self.assets), move |outcome| {
                if proxy.send_event(RuntimeEvent::AssetsReady(outcome)).is_err() {
                    log::warn!("asset outcome dropped: event loop already closed");
                }
            })
            .context("failed to start asset loading")
    }

    fn on_assets_ready(&mut self, event_loop: &ActiveEventLoop, outcome: Result<(), AssetError>) {
        let (game_loop, window) = (&mut self.game_loop, &self.window);
        let Some(entry) = window else {
            self.pending = Some(outcome);
            return;
        };

        let result = entry.with_window(|w| {
            let mut scheduler = RedrawScheduler::new(w);
            game_loop.assets_ready(outcome, &mut scheduler)
        });

        self.settle(event_loop, result.context("game startup failed"));
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (game_loop, window) = (&mut self.game_loop, &mut self.window);
        let Some(entry) = window else {
            return;
        };

        let result = entry.with_mut(|fields| -> Result<LoopControl> {
            // Present the previous tick before starting the next one.
            if game_loop.last_frame().is_some() {
                match fields.gpu.begin_frame() {
                    Ok(mut frame) => {
                        fields.presenter.present(fields.gpu, &mut frame, game_loop.surface());
                        fields.gpu.submit(frame);
                    }
                    Err(err) => {
                        let reason = err.to_string();
                        match fields.gpu.handle_surface_error(err) {
                            SurfaceErrorAction::Fatal => anyhow::bail!("surface error: {reason}"),
                            action => log::debug!("surface error ({reason}): {action:?}"),
                        }
                    }
                }
            }

            if game_loop.state() != LoopState::Running {
                return Ok(LoopControl::Continue);
            }

            let mut scheduler = RedrawScheduler::new(fields.window);
            game_loop.tick(&mut scheduler).context("game loop failed")
        });

        self.settle(event_loop, result);
    }

    fn settle(&mut self, event_loop: &ActiveEventLoop, result: Result<LoopControl>) {
        match result {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => {
                log::info!("game loop exited");
                self.request_exit(event_loop);
            }
            Err(err) => {
                log::error!("{err:#}");
                self.fatal = Some(err);
                self.request_exit(event_loop);
            }
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.game_loop.handle().stop();
        self.exit_requested = true;
        event_loop.exit();
    }
}

impl<G> ApplicationHandler<RuntimeEvent> for HostState<G>
where
    G: Game + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            log::error!("failed to create game window: {e:#}");
            self.fatal = Some(e);
            self.request_exit(event_loop);
            return;
        }

        if self.game_loop.state() == LoopState::Uninitialized {
            if let Err(e) = self.start_loading() {
                self.settle(event_loop, Err(e));
                return;
            }
        }

        if let Some(outcome) = self.pending.take() {
            self.on_assets_ready(event_loop, outcome);
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: RuntimeEvent) {
        if self.exit_requested {
            return;
        }

        match event {
            RuntimeEvent::AssetsReady(outcome) => {
                match &outcome {
                    Ok(()) => log::info!("assets ready"),
                    Err(e) => log::error!("asset loading failed: {e}"),
                }
                self.on_assets_ready(event_loop, outcome);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Frames are requested by the game loop itself.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("window closed");
                self.window = None;
                self.request_exit(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.window.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.window.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}
