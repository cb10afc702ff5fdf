//! Multi-reel orchestration
//!
//! ```text
//!                 roll_by([d0, d1, ..])
//!                          │
//!        ┌─────────┬───────┴─┬─────────┐
//!        ▼         ▼         ▼         ▼
//!     Reel 0    Reel 1    Reel 2  ..  Reel n        (shared ChannelListener)
//!        └─────────┴────┬────┴─────────┘
//!                       ▼
//!             update() drains events ──▶ Vec<SlotsEvent>
//! ```

use crossbeam_channel::Receiver;
use rf_reel::{ChannelListener, MaskShape, Reel, ReelEvent, ReelEventKind, Tile, TileKind};
use serde::{Deserialize, Serialize};

use crate::config::{SimConfig, SlotsConfig};
use crate::error::{SlotError, SlotResult};

/// Tile kinds of every reel, ordered top to bottom
pub type TilesMap = Vec<Vec<TileKind>>;

/// Orchestrator notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotsEvent {
    /// All reels were told to roll
    Start,
    /// Where the tiles will rest once every reel finishes
    PredictedResult(TilesMap),
    /// Phase notification of a single reel
    Reel(ReelEvent),
    /// A reel came to rest
    ReelFinished(usize),
    /// Every reel came to rest
    Finish,
}

/// A row of reels rolled together
pub struct Slots {
    config: SlotsConfig,
    reels: Vec<Reel>,
    events: Receiver<ReelEvent>,
    finished: Vec<bool>,
    rolling: bool,
}

impl Slots {
    /// Split `tiles` into `reel_count` contiguous reels of equal length
    pub fn from_tiles(tiles: Vec<Tile>, reel_count: usize, config: SlotsConfig) -> SlotResult<Self> {
        let count = tiles.len();
        if reel_count == 0 || count == 0 || count % reel_count != 0 {
            return Err(SlotError::InvalidLayout {
                tiles: count,
                reels: reel_count,
            });
        }
        let per_reel = count / reel_count;

        let (listener, events) = ChannelListener::channel();
        let (x, y, w, h) = config.mask_rect();

        let mut reels = Vec::with_capacity(reel_count);
        let mut tiles = tiles.into_iter();
        for index in 0..reel_count {
            let chunk: Vec<Tile> = tiles.by_ref().take(per_reel).collect();
            let mask = MaskShape::rect(x, y, w, h);
            let mut reel = Reel::new(index, chunk, Some(mask), config.reel.clone())?;
            reel.subscribe(listener.clone());
            reels.push(reel);
        }

        log::debug!("slots: {} reels of {} tiles", reel_count, per_reel);

        Ok(Self {
            config,
            reels,
            events,
            finished: vec![true; reel_count],
            rolling: false,
        })
    }

    pub fn from_config(config: &SimConfig) -> SlotResult<Self> {
        Self::from_tiles(config.tiles(), config.reel_count, config.slots.clone())
    }

    /// Roll reel `i` by `distances[i]` tiles
    ///
    /// Returns `Start`, the predicted result and the reels' own start events.
    /// Nothing is rolled when the call is rejected, including when any reel
    /// is still busy with a roll started through [`Slots::reel_mut`].
    pub fn roll_by(&mut self, distances: &[f64]) -> SlotResult<Vec<SlotsEvent>> {
        if self.rolling || self.reels.iter().any(Reel::is_rolling) {
            log::warn!("slots: roll requested while rolling");
            return Err(SlotError::AlreadyRolling);
        }
        if distances.len() != self.reels.len() {
            return Err(SlotError::DistanceCount {
                expected: self.reels.len(),
                got: distances.len(),
            });
        }

        let mut out = vec![
            SlotsEvent::Start,
            SlotsEvent::PredictedResult(self.predicted_tiles_map(distances)),
        ];

        for (reel, &distance) in self.reels.iter_mut().zip(distances) {
            reel.roll(distance);
        }
        self.finished.fill(false);
        self.rolling = true;

        self.drain(&mut out);
        Ok(out)
    }

    /// Advance every reel by `dt_ms`
    pub fn update(&mut self, dt_ms: f64) -> Vec<SlotsEvent> {
        for reel in &mut self.reels {
            reel.update(dt_ms);
        }
        let mut out = Vec::new();
        self.drain(&mut out);
        out
    }

    fn drain(&mut self, out: &mut Vec<SlotsEvent>) {
        for event in self.events.try_iter() {
            if event.kind == ReelEventKind::Finish {
                if let Some(done) = self.finished.get_mut(event.reel_index) {
                    *done = true;
                }
                out.push(SlotsEvent::ReelFinished(event.reel_index));
            } else {
                out.push(SlotsEvent::Reel(event));
            }
        }

        if self.rolling && self.finished.iter().all(|&done| done) {
            self.rolling = false;
            log::debug!("slots: all reels finished");
            out.push(SlotsEvent::Finish);
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // RESULT MAP
    // ═══════════════════════════════════════════════════════════════════════════

    /// Current tile kinds per reel, by ascending position
    pub fn tiles_map(&self) -> TilesMap {
        self.reels
            .iter()
            .map(|reel| kinds_by_position(reel, &reel.positions()))
            .collect()
    }

    /// Tile kinds per reel after rolling `distances`, without rolling
    pub fn predicted_tiles_map(&self, distances: &[f64]) -> TilesMap {
        self.reels
            .iter()
            .zip(distances)
            .map(|(reel, &d)| kinds_by_position(reel, &reel.predicted_positions(d)))
            .collect()
    }

    /// The `r`-th tile kind of every reel
    pub fn row(&self, r: usize) -> Option<Vec<TileKind>> {
        row_of(&self.tiles_map(), r)
    }

    /// Tile index at row `r` of every reel
    pub fn row_indices(&self, r: usize) -> Option<Vec<usize>> {
        self.reels
            .iter()
            .map(|reel| order_by_position(&reel.positions()).get(r).copied())
            .collect()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn config(&self) -> &SlotsConfig {
        &self.config
    }

    #[inline]
    pub fn reels(&self) -> &[Reel] {
        &self.reels
    }

    pub fn reel(&self, index: usize) -> Option<&Reel> {
        self.reels.get(index)
    }

    pub fn reel_mut(&mut self, index: usize) -> Option<&mut Reel> {
        self.reels.get_mut(index)
    }

    #[inline]
    pub fn reel_count(&self) -> usize {
        self.reels.len()
    }

    /// Horizontal center of each reel
    pub fn reel_offsets(&self) -> Vec<f64> {
        let n = self.reels.len();
        (0..n).map(|i| self.config.reel_x(i, n)).collect()
    }

    #[inline]
    pub fn is_rolling(&self) -> bool {
        self.rolling
    }
}

impl std::fmt::Debug for Slots {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slots")
            .field("reels", &self.reels.len())
            .field("rolling", &self.rolling)
            .field("finished", &self.finished)
            .finish()
    }
}

/// Entry `r` of every reel in a map
pub fn row_of(map: &TilesMap, r: usize) -> Option<Vec<TileKind>> {
    map.iter().map(|kinds| kinds.get(r).cloned()).collect()
}

fn order_by_position(positions: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..positions.len()).collect();
    order.sort_by(|&a, &b| positions[a].total_cmp(&positions[b]));
    order
}

fn kinds_by_position(reel: &Reel, positions: &[f64]) -> Vec<TileKind> {
    order_by_position(positions)
        .into_iter()
        .map(|i| reel.tiles()[i].kind.clone())
        .collect()
}
