//! # rf-reel — Reel animation state machine
//!
//! Drives the visual reel of a slot display: a vertical loop of tiles that
//! rolls through pre-roll, roll and post-roll phases, wraps cyclically, culls
//! tiles near the mask seam and reports lifecycle events.
//!
//! ## Architecture
//!
//! ```text
//! Reel::roll(distance)
//!     │
//!     ├── PhasePlan (Preroll1 → Preroll2 → Roll → Postroll1 → Postroll2)
//!     │       └── Tween per phase (rf-tween)
//!     │
//!     └── Reel::update(dt) per frame
//!             ├── position = start + y_period * dti
//!             ├── wrap into [-y_period, max_y)
//!             ├── visibility pass
//!             └── ReelListener ◀── start / preroll / roll / postroll / finish
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use rf_reel::{EventLog, MaskShape, Reel, ReelConfig, Tile};
//!
//! let tiles = ["A", "K", "Q", "J", "P"].into_iter().map(Tile::create).collect();
//! let mask = MaskShape::rect(-100.0, -75.0, 200.0, 450.0);
//! let mut reel = Reel::new(0, tiles, Some(mask), ReelConfig::bouncy(150.0)).unwrap();
//!
//! let log = EventLog::new();
//! reel.subscribe(log.clone());
//!
//! reel.roll(3.0);
//! while reel.update(16.0) {}
//! assert!(reel.flags().finished);
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod mask;
pub mod phase;
pub mod reel;
pub mod state;
pub mod tile;

pub use config::ReelConfig;
pub use error::{ReelError, ReelResult};
pub use event::{ChannelListener, EventLog, ReelEvent, ReelEventKind, ReelListener};
pub use mask::{Mask, MaskHandle, MaskShape};
pub use phase::{Phase, PhasePlan, PhaseStep};
pub use reel::Reel;
pub use state::{ReelFlags, ReelState};
pub use tile::{PREMIUM_SYMBOL, Tile, TileKind, TileVisual};
