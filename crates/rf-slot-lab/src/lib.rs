//! # rf-slot-lab — Slot orchestration for rf-reel
//!
//! Rolls a row of reels together, predicts where they land and plays the
//! spin loop of a simple matching game on top.
//!
//! ## Architecture
//!
//! ```text
//! GameSession
//!     │   spin(): distances (fixed opening spin, then seeded RNG)
//!     │   update(dt): highlight tweens
//!     v
//! Slots ──▶ Reel × N ──▶ ChannelListener ──▶ Vec<SlotsEvent>
//!     │
//!     └── SlotsConfig (reel config + horizontal layout)
//! ```
//!
//! `reel-sim` runs a session headless from a [`SimConfig`].

pub mod config;
pub mod error;
pub mod session;
pub mod slots;

pub use config::{SimConfig, SlotsConfig};
pub use error::{SlotError, SlotResult};
pub use session::{FIRST_SPIN, GameSession, MATCH_ROW, Prediction, SessionEvent};
pub use slots::{Slots, SlotsEvent, TilesMap, row_of};
