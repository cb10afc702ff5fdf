//! Slot orchestration errors

use rf_reel::ReelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Reel error: {0}")]
    Reel(#[from] ReelError),

    #[error("Cannot split {tiles} tiles into {reels} reels")]
    InvalidLayout { tiles: usize, reels: usize },

    #[error("Expected {expected} distances, got {got}")]
    DistanceCount { expected: usize, got: usize },

    #[error("Slots are already rolling")]
    AlreadyRolling,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

impl From<serde_json::Error> for SlotError {
    fn from(e: serde_json::Error) -> Self {
        SlotError::Config(e.to_string())
    }
}

impl From<serde_yml::Error> for SlotError {
    fn from(e: serde_yml::Error) -> Self {
        SlotError::Config(e.to_string())
    }
}

pub type SlotResult<T> = Result<T, SlotError>;
