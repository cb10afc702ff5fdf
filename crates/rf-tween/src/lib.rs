//! # rf-tween — Timed animation primitive
//!
//! Interpolates a scalar over a duration with an easing curve and reports
//! `Start`, `Update(value)`, `Repeat(n)` and `Complete` notifications.
//!
//! ## Architecture
//!
//! ```text
//! FrameClock ──dt──▶ Tween::advance(dt, sink)
//!                        │
//!                        ├── Easing::evaluate(progress)
//!                        └── sink(TweenEvent)  ──▶ owner (reel phase, highlight, ...)
//! ```
//!
//! Tweens do not schedule each other. Sequencing is left to the owner, which
//! starts the next tween when it observes `Complete`.

pub mod clock;
pub mod easing;
pub mod error;
pub mod tween;

pub use clock::{DEFAULT_FRAME_MS, FrameClock};
pub use easing::Easing;
pub use error::EasingParseError;
pub use tween::{Tween, TweenEvent, TweenState};
