//! Error types for the tween primitives

use thiserror::Error;

/// Failure to resolve an easing curve by name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EasingParseError {
    #[error("Unknown easing curve: {0}")]
    Unknown(String),
}
