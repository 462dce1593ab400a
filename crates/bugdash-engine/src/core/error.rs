use std::fmt;

use crate::assets::AssetError;

use super::LoopState;

/// Unrecoverable loop failure.
#[derive(Debug)]
pub enum EngineError {
    /// Asset loading failed, or an identifier could not be resolved mid-frame.
    Asset(AssetError),
    /// The game's load-dependent setup failed.
    Setup(anyhow::Error),
    /// An operation was called in a state that does not allow it.
    InvalidState {
        operation: &'static str,
        state: LoopState,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asset(e) => write!(f, "asset failure: {e}"),
            Self::Setup(e) => write!(f, "game setup failed: {e:#}"),
            Self::InvalidState { operation, state } => {
                write!(f, "`{operation}` is not allowed while the loop is {state}")
            }
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Asset(e) => Some(e),
            Self::Setup(e) => Some(&**e),
            Self::InvalidState { .. } => None,
        }
    }
}

impl From<AssetError> for EngineError {
    fn from(e: AssetError) -> Self {
        Self::Asset(e)
    }
}
