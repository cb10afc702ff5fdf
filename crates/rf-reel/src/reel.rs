//! Reel — cyclic tile strip with a phased roll animation
//!
//! Tiles sit on slots `y_period` apart. Positions are kept inside
//! `[-y_period, max_y)` by wrapping, so the strip behaves like a circular
//! buffer mapped onto a line. Each animation tick moves every tile by the
//! active phase's offset relative to the snapshot taken when that phase
//! started, wraps it, and then runs a single visibility pass.

use rf_tween::{Tween, TweenEvent};
use std::collections::VecDeque;
use std::fmt;

use crate::config::ReelConfig;
use crate::error::{ReelError, ReelResult};
use crate::event::{ReelEvent, ReelEventKind, ReelListener};
use crate::mask::{Mask, MaskShape};
use crate::phase::{Phase, PhasePlan};
use crate::state::{ReelFlags, ReelState};
use crate::tile::Tile;

/// The phase currently driving tile positions
#[derive(Debug, Clone)]
struct ActivePhase {
    phase: Phase,
    tween: Tween,
}

/// A vertical loop of tiles
pub struct Reel {
    index: usize,
    config: ReelConfig,
    tiles: Vec<Tile>,
    max_y_position: f64,
    mask: Option<Mask>,

    start_positions: Vec<f64>,
    roll_origin: Vec<f64>,
    distance: f64,
    state: ReelState,
    plan: Option<PhasePlan>,
    active: Option<ActivePhase>,
    roll_count: u64,
    pending: VecDeque<f64>,

    listeners: Vec<Box<dyn ReelListener>>,
}

impl Reel {
    /// Assemble a reel from its tiles
    ///
    /// Tile `f` is placed at `f * y_period`, then the strip is wrapped and
    /// culled once so it starts in a consistent state.
    pub fn new(
        index: usize,
        tiles: Vec<Tile>,
        mask: Option<MaskShape>,
        config: ReelConfig,
    ) -> ReelResult<Self> {
        if tiles.is_empty() {
            return Err(ReelError::NoTiles(index));
        }

        let config = config.sanitized();
        let mut tiles = tiles;
        for (f, tile) in tiles.iter_mut().enumerate() {
            tile.position = f as f64 * config.y_period;
            if let Some(visual) = tile.visual.as_mut() {
                visual.scale = config.tile_scale;
            }
        }

        let max_y_position = config.y_period * (tiles.len() - 1) as f64;

        let mut reel = Self {
            index,
            config,
            tiles,
            max_y_position,
            mask: None,
            start_positions: Vec::new(),
            roll_origin: Vec::new(),
            distance: 0.0,
            state: ReelState::Idle,
            plan: None,
            active: None,
            roll_count: 0,
            pending: VecDeque::new(),
            listeners: Vec::new(),
        };

        reel.add_mask(mask);
        reel.rearrange();
        reel.visibility_check();
        reel.set_start_positions();

        Ok(reel)
    }

    fn add_mask(&mut self, shape: Option<MaskShape>) {
        let Some(shape) = shape else {
            log::warn!("reel {}: mask shape not found, rolling unmasked", self.index);
            return;
        };
        self.mask = Some(Mask {
            shape,
            clipping: !self.config.show_mask,
        });
    }

    /// Register a listener; listeners are called in registration order
    pub fn subscribe(&mut self, listener: impl ReelListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&mut self, kind: ReelEventKind) {
        let event = ReelEvent {
            reel_index: self.index,
            kind,
        };
        // Listeners get `&Reel`, so they are moved out for the duration
        let mut listeners = std::mem::take(&mut self.listeners);
        for listener in listeners.iter_mut() {
            listener.on_reel_event(event, self);
        }
        self.listeners = listeners;
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ROLL
    // ═══════════════════════════════════════════════════════════════════════════

    /// Start a roll of `distance_tiles` slots
    ///
    /// Negative and non-finite distances roll zero tiles. The roll starts
    /// synchronously (`start` and the first phase event are emitted before
    /// this returns) and advances with [`Reel::update`].
    ///
    /// A roll requested while another is in flight is queued and starts right
    /// after the current one emits `finish`, so every call gets its own
    /// `start`/`finish` pair.
    pub fn roll(&mut self, distance_tiles: f64) {
        if self.state.is_in_flight() {
            log::warn!(
                "reel {}: roll requested while {:?}, queued behind {} pending",
                self.index,
                self.state,
                self.pending.len()
            );
            self.pending.push_back(distance_tiles);
            return;
        }
        self.start_roll(distance_tiles);
    }

    fn start_roll(&mut self, distance_tiles: f64) {
        let distance_tiles = self.effective_distance(distance_tiles);
        let plan = PhasePlan::new(distance_tiles, &self.config);
        self.distance = distance_tiles * self.config.y_period;
        self.roll_origin = self.positions();

        let first = plan.first();
        log::debug!(
            "reel {}: roll {:.3} tiles, {} phases, {:.1}ms",
            self.index,
            distance_tiles,
            plan.len(),
            plan.total_duration_ms()
        );
        self.plan = Some(plan);
        self.roll_count += 1;

        self.enter_phase(first, true);
    }

    /// Distance actually rolled: negative, non-finite and overflowing
    /// distances roll zero tiles
    fn effective_distance(&self, distance_tiles: f64) -> f64 {
        if !distance_tiles.is_finite() || distance_tiles <= 0.0 {
            return 0.0;
        }
        let distance = distance_tiles * self.config.y_period;
        if !distance.is_finite() || !(distance / self.config.speed).is_finite() {
            log::warn!(
                "reel {}: roll of {} tiles overflows, rolling 0",
                self.index,
                distance_tiles
            );
            return 0.0;
        }
        distance_tiles
    }

    fn enter_phase(&mut self, phase: Phase, roll_start: bool) {
        let Some(step) = self.plan.as_ref().and_then(|p| p.step(phase)).copied() else {
            return;
        };

        let mut tween = Tween::new(0.0, step.target_dti, step.duration_ms).easing(step.easing);
        tween.start(|_| {});

        self.set_start_positions();
        self.state = phase.state();
        self.active = Some(ActivePhase { phase, tween });
        log::trace!(
            "reel {}: {} -> dti {:.3} over {:.1}ms",
            self.index,
            phase.name(),
            step.target_dti,
            step.duration_ms
        );

        if roll_start {
            self.emit(ReelEventKind::Start);
        }
        if let Some(kind) = phase.event() {
            self.emit(kind);
        }
    }

    /// Advance the active phase by `dt_ms`
    ///
    /// A phase that completes inside the tick hands the leftover time to the
    /// next one, or to a queued roll. Returns true while a roll is in flight.
    pub fn update(&mut self, dt_ms: f64) -> bool {
        let mut remaining = dt_ms;

        loop {
            let Some(active) = self.active.as_mut() else {
                return false;
            };

            let mut dti = None;
            let mut completed = false;
            remaining = active.tween.advance(remaining, |event| match event {
                TweenEvent::Update(value) => dti = Some(value),
                TweenEvent::Complete => completed = true,
                TweenEvent::Start | TweenEvent::Repeat(_) => {}
            });
            let phase = active.phase;

            if let Some(dti) = dti {
                self.apply_offset(dti);
            }
            if !completed {
                return true;
            }

            match self.plan.as_ref().and_then(|p| p.next_phase(phase)) {
                Some(next) => self.enter_phase(next, false),
                None => {
                    self.finish();
                    if self.active.is_none() {
                        return false;
                    }
                }
            }
        }
    }

    fn finish(&mut self) {
        self.active = None;
        self.plan = None;
        self.settle();
        self.state = ReelState::Finished;
        log::debug!("reel {}: finished", self.index);
        self.emit(ReelEventKind::Finish);

        if let Some(distance_tiles) = self.pending.pop_front() {
            self.start_roll(distance_tiles);
        }
    }

    /// Land exactly on `origin + distance`
    ///
    /// Pre/post segments cancel out only up to rounding; near the wrap seam
    /// that rounding would otherwise flip a tile to the other end of the strip.
    fn settle(&mut self) {
        for i in 0..self.tiles.len() {
            self.tiles[i].position = self.landing_position(self.roll_origin[i], self.distance);
        }
        self.visibility_check();
    }

    fn apply_offset(&mut self, dti: f64) {
        let offset = self.config.y_period * dti;
        for i in 0..self.tiles.len() {
            self.tiles[i].position = self.landing_position(self.start_positions[i], offset);
        }
        self.visibility_check();
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // POSITIONS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Snapshot current positions as the base for the active phase
    pub fn set_start_positions(&mut self) {
        self.start_positions.clear();
        self.start_positions
            .extend(self.tiles.iter().map(|tile| tile.position));
    }

    /// Wrap a position into `[-y_period, max_y)`
    ///
    /// Closed form, so arbitrarily distant positions wrap in constant time.
    /// In-range positions are returned unchanged.
    pub fn wrap_position(&self, position: f64) -> f64 {
        let y = self.config.y_period;
        let max = self.max_y_position;
        if !position.is_finite() || (position >= -y && position < max) {
            return position;
        }
        let span = max + y;
        let wrapped = (position + y).rem_euclid(span) - y;
        // rem_euclid may round up to exactly `span`
        if wrapped >= max { -y } else { wrapped }
    }

    /// Wrap one tile back into range
    pub fn rearrange_tile(&mut self, index: usize) -> ReelResult<()> {
        let len = self.tiles.len();
        let position = self
            .tiles
            .get(index)
            .map(|t| t.position)
            .ok_or(ReelError::TileOutOfRange { index, len })?;
        self.tiles[index].position = self.wrap_position(position);
        Ok(())
    }

    /// Wrap every tile back into range
    pub fn rearrange(&mut self) {
        for i in 0..self.tiles.len() {
            let position = self.tiles[i].position;
            self.tiles[i].position = self.wrap_position(position);
        }
    }

    /// Would a tile at `position` be drawn?
    ///
    /// Hidden inside `[-y_period, -cull_top)` at the top and
    /// `(max_y - cull_bottom_periods * y_period, max_y]` at the bottom.
    pub fn is_visible_at(&self, position: f64) -> bool {
        let y = self.config.y_period;
        let max = self.max_y_position;
        let top_band = position >= -y && position < -self.config.cull_top;
        let bottom_band = position <= max && position > max - self.config.cull_bottom_periods * y;
        !(top_band || bottom_band)
    }

    /// Update every tile's culling flag
    pub fn visibility_check(&mut self) {
        for i in 0..self.tiles.len() {
            let visible = self.is_visible_at(self.tiles[i].position);
            self.tiles[i].visible = visible;
        }
    }

    /// Tile indices in draw order (ascending priority, stable)
    pub fn draw_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.tiles.len()).collect();
        order.sort_by_key(|&i| self.tiles[i].display_priority);
        order
    }

    /// Where each tile rests after a roll of `distance_tiles` from now
    ///
    /// Pre-roll and post-roll segments cancel out, so only the main distance
    /// moves the strip.
    pub fn predicted_positions(&self, distance_tiles: f64) -> Vec<f64> {
        let offset = self.effective_distance(distance_tiles) * self.config.y_period;
        self.tiles
            .iter()
            .map(|tile| self.landing_position(tile.position, offset))
            .collect()
    }

    /// `wrap(origin + offset)`, reducing the offset first so a huge offset
    /// does not swallow the origin
    #[inline]
    fn landing_position(&self, origin: f64, offset: f64) -> f64 {
        let span = self.max_y_position + self.config.y_period;
        let offset = if offset.abs() < span {
            offset
        } else {
            offset.rem_euclid(span)
        };
        self.wrap_position(origin + offset)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Effective (sanitized) configuration
    #[inline]
    pub fn config(&self) -> &ReelConfig {
        &self.config
    }

    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Mutable tile access for transient visual properties (alpha)
    pub fn tile_mut(&mut self, index: usize) -> Option<&mut Tile> {
        self.tiles.get_mut(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn positions(&self) -> Vec<f64> {
        self.tiles.iter().map(|t| t.position).collect()
    }

    #[inline]
    pub fn start_positions(&self) -> &[f64] {
        &self.start_positions
    }

    /// Distance of the current (or last) roll, in layout units
    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    #[inline]
    pub fn y_period(&self) -> f64 {
        self.config.y_period
    }

    #[inline]
    pub fn max_y_position(&self) -> f64 {
        self.max_y_position
    }

    #[inline]
    pub fn mask(&self) -> Option<&Mask> {
        self.mask.as_ref()
    }

    #[inline]
    pub fn state(&self) -> ReelState {
        self.state
    }

    #[inline]
    pub fn flags(&self) -> ReelFlags {
        self.state.flags()
    }

    #[inline]
    pub fn is_rolling(&self) -> bool {
        self.state.is_in_flight()
    }

    /// Phase currently driving positions
    pub fn phase(&self) -> Option<Phase> {
        self.active.as_ref().map(|a| a.phase)
    }

    /// Plan of the roll in flight
    pub fn plan(&self) -> Option<&PhasePlan> {
        self.plan.as_ref()
    }

    /// Number of rolls started
    #[inline]
    pub fn roll_count(&self) -> u64 {
        self.roll_count
    }

    /// Rolls queued behind the one in flight
    #[inline]
    pub fn pending_rolls(&self) -> usize {
        self.pending.len()
    }
}

impl fmt::Debug for Reel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reel")
            .field("index", &self.index)
            .field("tiles", &self.tiles.len())
            .field("max_y_position", &self.max_y_position)
            .field("state", &self.state)
            .field("phase", &self.phase())
            .field("distance", &self.distance)
            .field("pending", &self.pending.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
