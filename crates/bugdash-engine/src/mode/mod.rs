//! Gameplay / start-screen switch.
//!
//! The surrounding game owns and writes the gate; the loop only reads it,
//! once for the update phase and again for the render phase of each tick.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Which branch the loop drives.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum Mode {
    /// Entities update and the level is drawn.
    Gameplay,
    /// Only the start presentation is drawn; nothing updates.
    #[default]
    StartScreen,
}

impl Mode {
    #[inline]
    pub fn is_gameplay(self) -> bool {
        self == Mode::Gameplay
    }
}

/// Shared, cloneable mode flag.
///
/// Backed by an atomic with release/acquire ordering, so a write made on any
/// thread before a phase starts is visible to that phase's read.
#[derive(Debug, Clone, Default)]
pub struct ModeGate {
    gameplay: Arc<AtomicBool>,
}

impl ModeGate {
    pub fn new(initial: Mode) -> Self {
        Self {
            gameplay: Arc::new(AtomicBool::new(initial.is_gameplay())),
        }
    }

    #[inline]
    pub fn get(&self) -> Mode {
        if self.gameplay.load(Ordering::Acquire) {
            Mode::Gameplay
        } else {
            Mode::StartScreen
        }
    }

    /// Sets the mode, returning the previous one.
    pub fn set(&self, mode: Mode) -> Mode {
        let was = self.gameplay.swap(mode.is_gameplay(), Ordering::AcqRel);
        let previous = if was { Mode::Gameplay } else { Mode::StartScreen };
        if previous != mode {
            log::info!("mode: {previous:?} -> {mode:?}");
        }
        previous
    }
}
