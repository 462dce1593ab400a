use std::time::{Duration, Instant};

use bugdash_engine::assets::{AssetManifest, ResourceProvider};
use bugdash_engine::core::Game;
use bugdash_engine::entity::EntityRegistry;
use bugdash_engine::level::TileGrid;
use bugdash_engine::mode::{Mode, ModeGate};
use bugdash_engine::render::{DrawCtx, Font};
use bugdash_engine::time::{MonotonicTime, TimeSource};

use crate::entities::{Enemy, Pickup, PickupKind, Player, Step};
use crate::sprites::{self, CELL, COLS};
use crate::start_screen::StartScreen;

/// Updates between two player steps.
const PLAYER_PACE: u32 = 30;

/// Path walked while no input handling exists: up the board with two sidesteps.
fn demo_route() -> Vec<Step> {
    use Step::*;
    vec![Up, Up, Left, Up, Up, Right, Up, Up, Up]
}

/// Bug Dash: cross the grass to the water without touching a bug.
pub struct BugDash {
    gate: ModeGate,
    level: TileGrid,

    rocks: Vec<Pickup>,
    hearts: Vec<Pickup>,
    gems: Vec<Pickup>,
    enemies: Vec<Enemy>,
    player: Player,

    start: StartScreen,
    /// How long the start screen stays up before play begins on its own.
    attract: Option<Duration>,
    shown_since: Option<Instant>,
    time: Box<dyn TimeSource>,
}

impl BugDash {
    pub fn new(font: Option<Font>, attract: Option<Duration>) -> Self {
        let start = StartScreen::new(font);
        Self {
            gate: ModeGate::new(Mode::StartScreen),
            level: TileGrid::from_rows(sprites::row_images(), COLS, CELL),
            rocks: Vec::new(),
            hearts: Vec::new(),
            gems: Vec::new(),
            enemies: Vec::new(),
            player: Player::new(start.selected_character()),
            start,
            attract,
            shown_since: None,
            time: Box::new(MonotonicTime),
        }
    }

    /// Reads the attract timer from `time` instead of the system clock.
    #[cfg(test)]
    pub fn with_time_source(mut self, time: impl TimeSource + 'static) -> Self {
        self.time = Box::new(time);
        self
    }

    fn populate(&mut self) {
        let board_width = (COLS as u32 * CELL.width) as f32;

        self.rocks = vec![Pickup::new(PickupKind::Rock, 1, 5), Pickup::new(PickupKind::Rock, 5, 2)];
        self.hearts = vec![Pickup::new(PickupKind::Heart, 3, 3)];
        self.gems = vec![Pickup::new(PickupKind::Gem, 2, 1), Pickup::new(PickupKind::Gem, 4, 6)];
        self.enemies = vec![
            Enemy::new(1, 0.0, 120.0),
            Enemy::new(2, board_width, -180.0),
            Enemy::new(3, 300.0, 90.0),
            Enemy::new(4, 500.0, -140.0),
            Enemy::new(5, 0.0, 220.0),
            Enemy::new(6, 200.0, -100.0),
        ];
        self.player = Player::new(self.start.selected_character()).with_route(demo_route(), PLAYER_PACE);
    }
}

impl Game for BugDash {
    fn manifest(&self) -> AssetManifest {
        sprites::manifest()
    }

    fn mode(&self) -> Mode {
        self.gate.get()
    }

    fn reset(&mut self) {
        self.populate();
        self.gate.set(Mode::StartScreen);
        self.shown_since = None;
    }

    fn on_assets_ready(&mut self, assets: &dyn ResourceProvider) -> anyhow::Result<()> {
        let tile = assets.get(sprites::GRASS)?;
        anyhow::ensure!(
            tile.width() >= CELL.width,
            "grass tile is {}px wide; the board needs {}px cells",
            tile.width(),
            CELL.width
        );
        log::info!(
            "board ready: {} enemies, {} pickups, player at {:?}",
            self.enemies.len(),
            self.rocks.len() + self.hearts.len() + self.gems.len(),
            self.player.cell()
        );
        Ok(())
    }

    fn level(&self) -> &TileGrid {
        &self.level
    }

    fn entities(&mut self) -> EntityRegistry<'_> {
        EntityRegistry::new()
            .group("rocks", &mut self.rocks)
            .group("hearts", &mut self.hearts)
            .group("gems", &mut self.gems)
            .group("enemies", &mut self.enemies)
            .controlled(&mut self.player)
    }

    fn render_start_screen(&mut self, ctx: &mut DrawCtx<'_>) -> anyhow::Result<()> {
        self.start.render(ctx)?;

        let now = self.time.now();
        let since = *self.shown_since.get_or_insert(now);
        if let Some(attract) = self.attract
            && now.saturating_duration_since(since) >= attract
        {
            self.player.set_sprite(self.start.selected_character());
            self.shown_since = None;
            self.gate.set(Mode::Gameplay);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bugdash_engine::assets::Resources;
    use bugdash_engine::config::LoopConfig;
    use bugdash_engine::core::{GameLoop, LoopState, ManualScheduler, RenderBranch};
    use bugdash_engine::paint::Rgba8;
    use bugdash_engine::render::Image;
    use bugdash_engine::time::ManualTime;
    use std::sync::{Arc, mpsc};

    fn assets() -> Arc<Resources> {
        Arc::new(Resources::preloaded(sprites::manifest().iter().map(|id| {
            let (w, h) = if id.as_str() == sprites::GRASS { (101, 171) } else { (4, 4) };
            (id.clone(), Image::filled(w, h, Rgba8::rgb(10, 20, 30)))
        })))
    }

    fn started(attract: Option<Duration>) -> (GameLoop<BugDash>, ManualTime, ManualScheduler) {
        let time = ManualTime::new(Instant::now());
        let game = BugDash::new(None, attract).with_time_source(time.clone());
        let mut game_loop = GameLoop::with_time_source(game, LoopConfig::default(), time.clone());
        let mut sched = ManualScheduler::new();

        let (tx, rx) = mpsc::channel();
        game_loop
            .initialize(assets(), move |outcome| {
                let _ = tx.send(outcome);
            })
            .unwrap();
        let outcome = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        game_loop.assets_ready(outcome, &mut sched).unwrap();

        (game_loop, time, sched)
    }

    #[test]
    fn opens_on_start_screen() {
        let (game_loop, _, sched) = started(None);
        assert_eq!(game_loop.state(), LoopState::Running);
        assert_eq!(game_loop.last_branch(), Some(RenderBranch::StartScreen));
        assert_eq!(game_loop.game().enemies.len(), 6);
        assert!(sched.is_pending());
    }

    #[test]
    fn attract_delay_hands_over_to_gameplay() {
        let (mut game_loop, time, mut sched) = started(Some(Duration::from_secs(2)));

        time.advance(Duration::from_secs(1));
        game_loop.tick(&mut sched).unwrap();
        assert_eq!(game_loop.game().mode(), Mode::StartScreen);

        time.advance(Duration::from_secs(1));
        game_loop.tick(&mut sched).unwrap();
        assert_eq!(game_loop.game().mode(), Mode::Gameplay);
        assert_eq!(game_loop.last_branch(), Some(RenderBranch::StartScreen));

        let before = game_loop.game().enemies[0].x();
        time.advance(Duration::from_millis(100));
        game_loop.tick(&mut sched).unwrap();

        assert_eq!(game_loop.last_branch(), Some(RenderBranch::Gameplay));
        let moved = game_loop.game().enemies[0].x() - before;
        assert!((moved - 12.0).abs() < 1e-3, "moved {moved}");
    }

    #[test]
    fn enemies_hold_still_on_start_screen() {
        let (mut game_loop, time, mut sched) = started(None);
        let before: Vec<f32> = game_loop.game().enemies.iter().map(Enemy::x).collect();

        time.advance(Duration::from_secs(3));
        game_loop.tick(&mut sched).unwrap();

        let after: Vec<f32> = game_loop.game().enemies.iter().map(Enemy::x).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn external_gate_switch_starts_play() {
        let (mut game_loop, time, mut sched) = started(None);
        game_loop.game().gate.set(Mode::Gameplay);

        time.advance(Duration::from_millis(16));
        game_loop.tick(&mut sched).unwrap();

        assert_eq!(game_loop.last_branch(), Some(RenderBranch::Gameplay));
        // Grass starts on row 1; the tile color shows through at its top face.
        assert_eq!(game_loop.surface().pixel(50, 83 + 10), Some(Rgba8::rgb(10, 20, 30)));
    }

    #[test]
    fn undersized_tiles_abort_startup() {
        let time = ManualTime::new(Instant::now());
        let game = BugDash::new(None, None).with_time_source(time.clone());
        let mut game_loop = GameLoop::with_time_source(game, LoopConfig::default(), time);
        let small = Arc::new(Resources::preloaded(
            sprites::manifest()
                .iter()
                .map(|id| (id.clone(), Image::filled(4, 4, Rgba8::BLACK))),
        ));

        let (tx, rx) = mpsc::channel();
        game_loop
            .initialize(small, move |outcome| {
                let _ = tx.send(outcome);
            })
            .unwrap();
        let outcome = rx.recv_timeout(Duration::from_secs(5)).unwrap();

        let err = game_loop.assets_ready(outcome, &mut ManualScheduler::new()).unwrap_err();
        assert!(err.to_string().contains("grass tile"));
        assert_eq!(game_loop.state(), LoopState::Stopped);
    }
}
