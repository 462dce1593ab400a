//! Board entities.

use bugdash_engine::entity::{AutonomousEntity, ControlledEntity};
use bugdash_engine::render::DrawCtx;
use bugdash_engine::time::DeltaTime;

use crate::sprites::{self, CELL, COLS, ROWS};

/// Bug crawling along one row, wrapping around the board edges.
#[derive(Debug, Clone)]
pub struct Enemy {
    row: usize,
    x: f32,
    /// Pixels per second; negative moves left.
    speed: f32,
}

impl Enemy {
    pub fn new(row: usize, x: f32, speed: f32) -> Self {
        Self { row, x, speed }
    }

    #[cfg(test)]
    pub fn x(&self) -> f32 {
        self.x
    }

    fn sprite(&self) -> &'static str {
        if self.speed < 0.0 { sprites::BUG_REVERSED } else { sprites::BUG }
    }
}

impl AutonomousEntity for Enemy {
    fn update(&mut self, dt: DeltaTime) -> anyhow::Result<()> {
        let width = (COLS as u32 * CELL.width) as f32;
        let sprite = CELL.width as f32;

        self.x += dt.scale(self.speed);
        if self.speed > 0.0 && self.x > width {
            self.x = -sprite;
        } else if self.speed < 0.0 && self.x < -sprite {
            self.x = width;
        }
        Ok(())
    }

    fn render(&self, ctx: &mut DrawCtx<'_>) -> anyhow::Result<()> {
        let (_, y) = sprites::sprite_origin(self.row, 0);
        ctx.draw_asset(self.sprite(), self.x.round() as i32, y)?;
        Ok(())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PickupKind {
    Rock,
    Heart,
    Gem,
}

impl PickupKind {
    fn sprite(self) -> &'static str {
        match self {
            PickupKind::Rock => sprites::ROCK,
            PickupKind::Heart => sprites::HEART,
            PickupKind::Gem => sprites::GEM,
        }
    }
}

/// Stationary item on a board cell.
#[derive(Debug, Clone)]
pub struct Pickup {
    kind: PickupKind,
    row: usize,
    col: usize,
}

impl Pickup {
    pub fn new(kind: PickupKind, row: usize, col: usize) -> Self {
        Self { kind, row, col }
    }
}

impl AutonomousEntity for Pickup {
    fn render(&self, ctx: &mut DrawCtx<'_>) -> anyhow::Result<()> {
        let (x, y) = sprites::sprite_origin(self.row, self.col);
        ctx.draw_asset(self.kind.sprite(), x, y)?;
        Ok(())
    }
}

/// One grid step.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Step {
    Up,
    Down,
    Left,
    Right,
}

/// The player's character. Moves one cell per step.
///
/// Steps come from a looping route, one every `pace` updates.
#[derive(Debug, Clone)]
pub struct Player {
    sprite: &'static str,
    row: usize,
    col: usize,
    route: Vec<Step>,
    next: usize,
    pace: u32,
    idle: u32,
    crossings: u32,
}

impl Player {
    pub const START: (usize, usize) = (ROWS - 1, COLS / 2);

    pub fn new(sprite: &'static str) -> Self {
        let (row, col) = Self::START;
        Self { sprite, row, col, route: Vec::new(), next: 0, pace: 1, idle: 0, crossings: 0 }
    }

    pub fn with_route(mut self, route: Vec<Step>, pace: u32) -> Self {
        self.route = route;
        self.pace = pace.max(1);
        self
    }

    pub fn cell(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn set_sprite(&mut self, sprite: &'static str) {
        self.sprite = sprite;
    }

    pub fn reset(&mut self) {
        (self.row, self.col) = Self::START;
        self.next = 0;
        self.idle = 0;
    }

    fn take_step(&mut self) -> Option<Step> {
        if self.route.is_empty() {
            return None;
        }
        self.idle += 1;
        if self.idle < self.pace {
            return None;
        }
        self.idle = 0;
        let step = self.route[self.next];
        self.next = (self.next + 1) % self.route.len();
        Some(step)
    }
}

impl ControlledEntity for Player {
    fn update(&mut self) -> anyhow::Result<()> {
        let Some(step) = self.take_step() else {
            return Ok(());
        };

        match step {
            Step::Up => self.row = self.row.saturating_sub(1),
            Step::Down => self.row = (self.row + 1).min(ROWS - 1),
            Step::Left => self.col = self.col.saturating_sub(1),
            Step::Right => self.col = (self.col + 1).min(COLS - 1),
        }

        if self.row == 0 {
            self.crossings += 1;
            log::info!("player reached the water ({} crossings)", self.crossings);
            self.reset();
        }
        Ok(())
    }

    fn render(&self, ctx: &mut DrawCtx<'_>) -> anyhow::Result<()> {
        let (x, y) = sprites::sprite_origin(self.row, self.col);
        ctx.draw_asset(self.sprite, x, y)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enemy_moves_by_speed_times_dt() {
        let mut bug = Enemy::new(2, 0.0, 200.0);
        bug.update(DeltaTime::from_secs(0.5)).unwrap();
        assert_eq!(bug.x(), 100.0);

        bug.update(DeltaTime::ZERO).unwrap();
        assert_eq!(bug.x(), 100.0);
    }

    #[test]
    fn enemy_wraps_around_board() {
        let mut right = Enemy::new(1, 800.0, 100.0);
        right.update(DeltaTime::from_secs(0.2)).unwrap();
        assert_eq!(right.x(), -101.0);

        let mut left = Enemy::new(1, -100.0, -100.0);
        left.update(DeltaTime::from_secs(0.1)).unwrap();
        assert_eq!(left.x(), 808.0);
    }

    #[test]
    fn reversed_sprite_when_moving_left() {
        assert_eq!(Enemy::new(1, 0.0, -50.0).sprite(), sprites::BUG_REVERSED);
        assert_eq!(Enemy::new(1, 0.0, 50.0).sprite(), sprites::BUG);
    }

    fn walk(player: &mut Player, updates: usize) {
        for _ in 0..updates {
            player.update().unwrap();
        }
    }

    #[test]
    fn player_steps_are_clamped_to_board() {
        let route = vec![Step::Down, Step::Right, Step::Right, Step::Right, Step::Right, Step::Right];
        let mut player = Player::new(sprites::CHARACTERS[0]).with_route(route, 1);

        walk(&mut player, 1);
        assert_eq!(player.cell(), Player::START);

        walk(&mut player, 5);
        assert_eq!(player.cell(), (ROWS - 1, COLS - 1));
    }

    #[test]
    fn steps_follow_pace() {
        let mut player = Player::new(sprites::CHARACTERS[0]).with_route(vec![Step::Left], 3);
        walk(&mut player, 2);
        assert_eq!(player.cell(), Player::START);
        walk(&mut player, 1);
        assert_eq!(player.cell(), (ROWS - 1, COLS / 2 - 1));
    }

    #[test]
    fn no_route_means_no_movement() {
        let mut player = Player::new(sprites::CHARACTERS[2]);
        walk(&mut player, 10);
        assert_eq!(player.cell(), Player::START);
    }

    #[test]
    fn reaching_water_counts_and_restarts() {
        let mut player = Player::new(sprites::CHARACTERS[1]).with_route(vec![Step::Up], 1);
        walk(&mut player, ROWS - 1);
        assert_eq!(player.crossings, 1);
        assert_eq!(player.cell(), Player::START);
    }
}
