//! Error types for reels

use thiserror::Error;

/// Reel error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReelError {
    #[error("Reel {0} has no tiles")]
    NoTiles(usize),

    #[error("Tile index {index} out of range (reel has {len} tiles)")]
    TileOutOfRange { index: usize, len: usize },
}

/// Result type alias
pub type ReelResult<T> = Result<T, ReelError>;
