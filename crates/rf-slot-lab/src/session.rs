//! Game session
//!
//! Drives [`Slots`] the way a player-facing game does: one spin at a time,
//! random distances after a fixed opening spin, and a blinking highlight
//! when the match row lands on a single symbol.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rf_reel::{ReelEvent, TileKind};
use rf_tween::{Easing, Tween, TweenEvent};
use serde::{Deserialize, Serialize};

use crate::error::SlotResult;
use crate::slots::{Slots, SlotsEvent, TilesMap, row_of};

/// Distances of the opening spin
pub const FIRST_SPIN: [f64; 5] = [1.0, 1.0, 2.0, 4.0, 3.0];
/// Row evaluated for a match
pub const MATCH_ROW: usize = 1;
/// Random spins roll `MIN_DISTANCE + U[0,1) * DISTANCE_RANGE` tiles
pub const MIN_DISTANCE: f64 = 1.0;
pub const DISTANCE_RANGE: f64 = 19.0;

const HIGHLIGHT_ALPHA: f64 = 0.5;
const HIGHLIGHT_MS: f64 = 300.0;
const HIGHLIGHT_REPEAT: u32 = 3;

/// Match row as it will land
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub row: Vec<TileKind>,
    pub winning: bool,
}

impl Prediction {
    pub fn from_map(map: &TilesMap) -> Self {
        let row = row_of(map, MATCH_ROW).unwrap_or_default();
        let winning = all_same(&row);
        Self { row, winning }
    }
}

/// Session notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum SessionEvent {
    SpinStarted { spin: u64, distances: Vec<f64> },
    Predicted(Prediction),
    Reel(ReelEvent),
    ReelFinished { reel_index: usize },
    /// Every reel stopped; `row` is the landed match row
    Finished { spin: u64, row: Vec<TileKind> },
    /// The match row landed on a single symbol
    Match { kind: TileKind, reels: usize },
}

#[derive(Debug)]
struct Highlight {
    reel: usize,
    tile: usize,
    tween: Tween,
}

/// Spin loop over a row of reels
#[derive(Debug)]
pub struct GameSession<R = ChaCha8Rng> {
    slots: Slots,
    rng: R,
    spins: u64,
    armed: bool,
    highlights: Vec<Highlight>,
    prediction: Option<Prediction>,
}

impl GameSession<ChaCha8Rng> {
    /// Session with a reproducible distance sequence
    pub fn seeded(slots: Slots, seed: u64) -> Self {
        Self::new(slots, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameSession<R> {
    pub fn new(slots: Slots, rng: R) -> Self {
        Self {
            slots,
            rng,
            spins: 0,
            armed: true,
            highlights: Vec::new(),
            prediction: None,
        }
    }

    /// Roll every reel once
    ///
    /// Ignored (empty result) until the previous spin has finished.
    pub fn spin(&mut self) -> SlotResult<Vec<SessionEvent>> {
        if !self.armed {
            log::debug!("spin ignored, reels still rolling");
            return Ok(Vec::new());
        }

        self.stop_highlights();
        let distances = self.next_distances();
        let events = self.slots.roll_by(&distances)?;

        self.armed = false;
        self.spins += 1;
        log::debug!("spin {}: distances {:?}", self.spins, distances);

        let mut out = Vec::with_capacity(events.len());
        out.push(SessionEvent::SpinStarted {
            spin: self.spins,
            distances,
        });
        for event in events {
            self.handle(event, &mut out);
        }
        Ok(out)
    }

    /// Advance reels and highlights by `dt_ms`
    pub fn update(&mut self, dt_ms: f64) -> Vec<SessionEvent> {
        self.advance_highlights(dt_ms);

        let mut out = Vec::new();
        for event in self.slots.update(dt_ms) {
            self.handle(event, &mut out);
        }
        out
    }

    fn handle(&mut self, event: SlotsEvent, out: &mut Vec<SessionEvent>) {
        match event {
            SlotsEvent::Start => {}
            SlotsEvent::PredictedResult(map) => {
                let prediction = Prediction::from_map(&map);
                log::info!("predicted spin result = {}", join(&prediction.row));
                if prediction.winning {
                    log::info!("spin will be winning: {}", join(&prediction.row));
                }
                self.prediction = Some(prediction.clone());
                out.push(SessionEvent::Predicted(prediction));
            }
            SlotsEvent::Reel(event) => out.push(SessionEvent::Reel(event)),
            SlotsEvent::ReelFinished(reel_index) => {
                out.push(SessionEvent::ReelFinished { reel_index });
            }
            SlotsEvent::Finish => {
                let row = self.slots.row(MATCH_ROW).unwrap_or_default();
                out.push(SessionEvent::Finished {
                    spin: self.spins,
                    row: row.clone(),
                });
                if let Some(event) = self.show_match(&row) {
                    out.push(event);
                }
                self.armed = true;
            }
        }
    }

    fn next_distances(&mut self) -> Vec<f64> {
        let n = self.slots.reel_count();
        if self.spins == 0 {
            return (0..n)
                .map(|i| FIRST_SPIN.get(i).copied().unwrap_or(MIN_DISTANCE))
                .collect();
        }
        (0..n)
            .map(|_| MIN_DISTANCE + self.rng.random::<f64>() * DISTANCE_RANGE)
            .collect()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // HIGHLIGHT
    // ═══════════════════════════════════════════════════════════════════════════

    fn show_match(&mut self, row: &[TileKind]) -> Option<SessionEvent> {
        if !all_same(row) {
            return None;
        }
        let indices = self.slots.row_indices(MATCH_ROW)?;
        let kind = row.first()?.clone();
        log::info!("match: {} x{}", kind, row.len());

        for (reel, tile) in indices.into_iter().enumerate() {
            let mut tween = Tween::new(1.0, HIGHLIGHT_ALPHA, HIGHLIGHT_MS)
                .easing(Easing::ElasticInOut)
                .repeat(HIGHLIGHT_REPEAT)
                .yoyo(true);
            tween.start(|_| {});
            self.highlights.push(Highlight { reel, tile, tween });
        }

        Some(SessionEvent::Match {
            kind,
            reels: row.len(),
        })
    }

    fn advance_highlights(&mut self, dt_ms: f64) {
        for h in &mut self.highlights {
            let mut alpha = None;
            h.tween.advance(dt_ms, |e| {
                if let TweenEvent::Update(v) = e {
                    alpha = Some(v);
                }
            });
            let Some(alpha) = alpha else {
                continue;
            };
            if let Some(tile) = self.slots.reel_mut(h.reel).and_then(|r| r.tile_mut(h.tile)) {
                tile.set_alpha(alpha);
            }
        }
        self.highlights.retain(|h| !h.tween.state().is_done());
    }

    fn stop_highlights(&mut self) {
        for mut h in self.highlights.drain(..) {
            h.tween.stop();
            if let Some(tile) = self.slots.reel_mut(h.reel).and_then(|r| r.tile_mut(h.tile)) {
                tile.set_alpha(1.0);
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// True when the next [`GameSession::spin`] will be accepted
    #[inline]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    #[inline]
    pub fn is_highlighting(&self) -> bool {
        !self.highlights.is_empty()
    }

    /// Spins started so far
    #[inline]
    pub fn spins(&self) -> u64 {
        self.spins
    }

    /// Prediction of the latest spin
    pub fn prediction(&self) -> Option<&Prediction> {
        self.prediction.as_ref()
    }

    #[inline]
    pub fn slots(&self) -> &Slots {
        &self.slots
    }

    pub fn into_slots(self) -> Slots {
        self.slots
    }
}

fn all_same(row: &[TileKind]) -> bool {
    match row.split_first() {
        Some((first, rest)) => rest.iter().all(|k| k == first),
        None => false,
    }
}

fn join(row: &[TileKind]) -> String {
    row.iter().map(TileKind::as_str).collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SimConfig, SlotsConfig};
    use rf_reel::{ReelConfig, Tile};

    fn run_to_finish<R: Rng>(session: &mut GameSession<R>) -> Vec<SessionEvent> {
        let mut all = Vec::new();
        for _ in 0..100_000 {
            all.extend(session.update(16.0));
            if session.is_armed() {
                break;
            }
        }
        all
    }

    /// Two reels whose row 1 after the first spin (1 tile each) is `K, K`
    fn matching_session() -> GameSession {
        let tiles = ["A", "Q", "K", "J", "10", "K"]
            .iter()
            .map(|s| Tile::create(*s))
            .collect();
        let config = SlotsConfig {
            reel: ReelConfig::default(),
            ..SlotsConfig::default()
        };
        let slots = Slots::from_tiles(tiles, 2, config).unwrap();
        GameSession::seeded(slots, 7)
    }

    #[test]
    fn test_first_spin_distances() {
        let slots = Slots::from_config(&SimConfig::default()).unwrap();
        let mut session = GameSession::seeded(slots, 1);
        let events = session.spin().unwrap();
        assert_eq!(
            events[0],
            SessionEvent::SpinStarted {
                spin: 1,
                distances: FIRST_SPIN.to_vec()
            }
        );
        assert!(matches!(events[1], SessionEvent::Predicted(_)));
    }

    #[test]
    fn test_first_spin_padded_to_reel_count() {
        let mut session = matching_session();
        let events = session.spin().unwrap();
        assert_eq!(
            events[0],
            SessionEvent::SpinStarted {
                spin: 1,
                distances: vec![1.0, 1.0]
            }
        );
    }

    #[test]
    fn test_random_distances_in_range() {
        let slots = Slots::from_config(&SimConfig::default()).unwrap();
        let mut session = GameSession::seeded(slots, 42);
        for _ in 0..4 {
            let events = session.spin().unwrap();
            let SessionEvent::SpinStarted { distances, .. } = &events[0] else {
                panic!("spin did not start");
            };
            assert!(distances.iter().all(|d| (1.0..20.0).contains(d)));
            run_to_finish(&mut session);
        }
    }

    #[test]
    fn test_seeded_sequences_repeat() {
        let distances = |seed| {
            let slots = Slots::from_config(&SimConfig::default()).unwrap();
            let mut session = GameSession::seeded(slots, seed);
            session.spin().unwrap();
            run_to_finish(&mut session);
            session.spin().unwrap().remove(0)
        };
        assert_eq!(distances(9), distances(9));
    }

    #[test]
    fn test_spin_ignored_while_rolling() {
        let mut session = matching_session();
        session.spin().unwrap();
        assert!(!session.is_armed());
        assert!(session.spin().unwrap().is_empty());
        assert_eq!(session.spins(), 1);

        run_to_finish(&mut session);
        assert!(session.is_armed());
    }

    #[test]
    fn test_match_starts_highlight() {
        let mut session = matching_session();
        let spin = session.spin().unwrap();
        let prediction = session.prediction().unwrap().clone();
        assert!(prediction.winning);
        assert!(spin.contains(&SessionEvent::Predicted(prediction)));

        let events = run_to_finish(&mut session);
        let k = TileKind::new("K");
        assert!(events.contains(&SessionEvent::Finished {
            spin: 1,
            row: vec![k.clone(), k.clone()]
        }));
        assert!(events.contains(&SessionEvent::Match { kind: k, reels: 2 }));
        assert!(session.is_highlighting());

        session.update(150.0);
        let dimmed = session.slots().row_indices(MATCH_ROW).unwrap();
        let tile = session.slots().reel(0).unwrap().tile(dimmed[0]).unwrap();
        assert!(tile.alpha() < 1.0);

        // Four 300ms iterations, ending back at full alpha
        for _ in 0..20 {
            session.update(100.0);
        }
        assert!(!session.is_highlighting());
        let tile = session.slots().reel(0).unwrap().tile(dimmed[0]).unwrap();
        assert_eq!(tile.alpha(), 1.0);
    }

    #[test]
    fn test_spin_resets_highlight() {
        let mut session = matching_session();
        session.spin().unwrap();
        run_to_finish(&mut session);
        session.update(150.0);
        assert!(session.is_highlighting());

        session.spin().unwrap();
        assert!(!session.is_highlighting());
        let slots = session.slots();
        assert!(slots
            .reels()
            .iter()
            .all(|r| r.tiles().iter().all(|t| t.alpha() == 1.0)));
    }

    #[test]
    fn test_no_match_without_equal_row() {
        let row = vec![TileKind::new("A"), TileKind::new("K")];
        assert!(!all_same(&row));
        assert!(!all_same(&[]));
        assert!(all_same(&[TileKind::new("P")]));
    }
}
