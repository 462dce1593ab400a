//! Game loop core.
//!
//! Defines the contract between the loop and the surrounding game (`Game`),
//! the controller that sequences initialization and ticks (`GameLoop`), and
//! the frame scheduling seam the host plugs into (`FrameScheduler`).

mod error;
mod game;
mod game_loop;
mod phases;
mod scheduler;

pub use error::EngineError;
pub use game::{Game, LoopControl};
pub use game_loop::{GameLoop, LoopHandle, LoopState};
pub use phases::RenderBranch;
pub use scheduler::{FrameScheduler, ManualScheduler};
