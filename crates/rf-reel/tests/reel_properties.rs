//! Reel Property Tests
//!
//! Verifies the reel contract end to end:
//! - Wrap invariant under continuous rolling
//! - Visibility culling boundaries
//! - Phase count and event ordering
//! - Custom easing fork
//! - Snapshot idempotence
//! - Constant-time wrap for distant positions, queued rolls

use approx::assert_relative_eq;
use rf_reel::{
    ChannelListener, EventLog, MaskShape, Phase, Reel, ReelConfig, ReelEventKind, Tile,
};
use rf_tween::{Easing, FrameClock};

const Y_PERIOD: f64 = 150.0;

fn reel_with(symbols: &[&str], config: ReelConfig) -> Reel {
    let tiles = symbols.iter().map(|s| Tile::create(*s)).collect();
    let mask = MaskShape::rect(-100.0, -75.0, 200.0, 3.0 * Y_PERIOD);
    Reel::new(0, tiles, Some(mask), config).unwrap()
}

fn five(config: ReelConfig) -> Reel {
    reel_with(&["A", "K", "Q", "J", "P"], config)
}

fn in_range(reel: &Reel) -> bool {
    let y = reel.y_period();
    let max = reel.max_y_position();
    reel.tiles()
        .iter()
        .all(|t| t.position >= -y && t.position < max)
}

// ═══════════════════════════════════════════════════════════════════════════════
// WRAP / VISIBILITY
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_wrap_invariant_every_frame() {
    let mut reel = five(ReelConfig::bouncy(Y_PERIOD));
    let mut clock = FrameClock::new();

    for distance in [3.0, 0.5, 7.25, 19.0] {
        reel.roll(distance);
        assert!(in_range(&reel));
        while reel.update(clock.tick()) {
            assert!(in_range(&reel), "out of range at frame {}", clock.frame());
        }
        assert!(in_range(&reel));
    }
}

#[test]
fn test_wrap_edges_and_whole_spans() {
    let reel = five(ReelConfig::default());
    let max = reel.max_y_position();
    let span = max + Y_PERIOD;

    // Just past each bound
    assert_eq!(reel.wrap_position(max), -Y_PERIOD);
    assert_eq!(reel.wrap_position(max + 0.5), -Y_PERIOD + 0.5);
    assert_eq!(reel.wrap_position(-Y_PERIOD - 0.5), max - 0.5);
    assert_eq!(reel.wrap_position(max - 0.5), max - 0.5);
    assert_eq!(reel.wrap_position(-Y_PERIOD), -Y_PERIOD);

    // Whole spans away from an in-range origin land back on it
    for origin in [-150.0, -37.5, 0.0, 210.0, 599.0] {
        for k in [-1000.0, -7.0, -1.0, 1.0, 3.0, 1000.0] {
            let wrapped = reel.wrap_position(origin + k * span);
            assert_relative_eq!(wrapped, origin, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_wrap_huge_positions() {
    let reel = five(ReelConfig::default());
    for position in [1.0e20, -1.0e20, 1.0e12, -1.0e12, 1.0e300, -1.0e300] {
        let wrapped = reel.wrap_position(position);
        assert!(
            wrapped >= -Y_PERIOD && wrapped < reel.max_y_position(),
            "{position} wrapped to {wrapped}"
        );
    }
    // 1e12 is a whole number of 750-unit spans plus 250
    assert_relative_eq!(reel.wrap_position(1.0e12), 250.0, epsilon = 1e-3);
    assert!(reel.wrap_position(f64::NAN).is_nan());
}

#[test]
fn test_huge_rolls_finish() {
    for distance in [1.0e10, 1.0e17] {
        let mut reel = five(ReelConfig::bouncy(Y_PERIOD));
        let log = EventLog::new();
        reel.subscribe(log.clone());
        let predicted = reel.predicted_positions(distance);

        reel.roll(distance);
        reel.update(1.0e6);
        assert!(in_range(&reel));
        while reel.update(1.0e300) {}

        assert_eq!(log.count(ReelEventKind::Finish), 1);
        assert!(in_range(&reel));
        assert_eq!(reel.positions(), predicted);
    }
}

#[test]
fn test_overflowing_roll_is_zero() {
    let mut reel = five(ReelConfig::default());
    let before = reel.positions();
    reel.roll(f64::MAX);
    assert_eq!(reel.distance(), 0.0);
    assert!(!reel.update(0.0));
    assert_eq!(reel.positions(), before);
}

#[test]
fn test_visibility_matches_positions() {
    let mut reel = five(ReelConfig::default());
    reel.roll(2.3);
    while reel.update(7.0) {
        for tile in reel.tiles() {
            assert_eq!(tile.visible, reel.is_visible_at(tile.position));
        }
    }
}

#[test]
fn test_visibility_dead_zone_edges() {
    let reel = five(ReelConfig::default());
    let bottom_edge = reel.max_y_position() - 1.5 * Y_PERIOD;

    assert!(reel.is_visible_at(-100.0), "-100 is outside [-150, -100)");
    assert!(!reel.is_visible_at(-Y_PERIOD), "-y_period is inside the top band");
    assert!(reel.is_visible_at(bottom_edge), "band is open at max - 1.5y");
    assert!(!reel.is_visible_at(reel.max_y_position()));
    assert!(reel.is_visible_at(reel.max_y_position() + 1.0));
}

// ═══════════════════════════════════════════════════════════════════════════════
// PHASES / EVENTS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_single_phase_without_anticipation() {
    let mut reel = five(ReelConfig::default());
    let log = EventLog::new();
    reel.subscribe(log.clone());

    reel.roll(2.0);
    assert_eq!(reel.plan().unwrap().len(), 1);

    let mut phases = vec![reel.phase()];
    while reel.update(16.0) {
        phases.push(reel.phase());
    }
    assert!(phases.iter().all(|p| *p == Some(Phase::Roll)));
    assert_eq!(
        log.kinds(),
        vec![ReelEventKind::Start, ReelEventKind::Roll, ReelEventKind::Finish]
    );
}

#[test]
fn test_event_order_with_anticipation() {
    let config = ReelConfig {
        pre_roll_tiles: 0.33,
        post_roll_tiles: 0.33,
        ..ReelConfig::default()
    };
    let mut reel = five(config);
    let log = EventLog::new();
    reel.subscribe(log.clone());

    reel.roll(3.0);
    let mut clock = FrameClock::new();
    while reel.update(clock.tick()) {}

    assert_eq!(
        log.kinds(),
        vec![
            ReelEventKind::Start,
            ReelEventKind::Preroll,
            ReelEventKind::Roll,
            ReelEventKind::Postroll,
            ReelEventKind::Finish,
        ]
    );
    assert_eq!(log.count(ReelEventKind::Start), 1);
    assert_eq!(log.count(ReelEventKind::Finish), 1);

    // Further ticks do nothing
    assert!(!reel.update(100.0));
    assert_eq!(log.events().len(), 5);
}

#[test]
fn test_custom_easing_never_prerolls() {
    for easing in [Easing::BounceInOut, Easing::QuadraticInOut, Easing::Linear] {
        let config = ReelConfig::bouncy(Y_PERIOD).with_roll_easing(easing);
        let mut reel = five(config);
        let log = EventLog::new();
        reel.subscribe(log.clone());

        reel.roll(4.0);
        while reel.update(16.0) {}

        assert_eq!(log.count(ReelEventKind::Preroll), 0, "{easing:?}");
        assert_eq!(log.count(ReelEventKind::Postroll), 0, "{easing:?}");
        assert_eq!(
            log.kinds(),
            vec![ReelEventKind::Start, ReelEventKind::Roll, ReelEventKind::Finish]
        );
    }
}

#[test]
fn test_total_duration_matches_plan() {
    let mut reel = five(ReelConfig::bouncy(Y_PERIOD));
    reel.roll(3.0);
    let total = reel.plan().unwrap().total_duration_ms();

    let mut elapsed = 0.0;
    while reel.update(1.0) {
        elapsed += 1.0;
    }
    // Finishes on the tick that crosses the total
    assert!(elapsed < total && elapsed + 1.0 >= total);
}

#[test]
fn test_every_roll_finishes() {
    let mut reel = five(ReelConfig::bouncy(Y_PERIOD));
    let log = EventLog::new();
    reel.subscribe(log.clone());

    let distances = [0.0, -2.0, 1.0, 0.01, 12.5];
    for distance in distances {
        reel.roll(distance);
        while reel.update(16.0) {}
    }
    assert_eq!(log.count(ReelEventKind::Start), distances.len());
    assert_eq!(log.count(ReelEventKind::Finish), distances.len());
}

#[test]
fn test_every_call_gets_a_finish() {
    let mut reel = five(ReelConfig::bouncy(Y_PERIOD));
    let log = EventLog::new();
    reel.subscribe(log.clone());

    reel.roll(3.0);
    reel.update(50.0);
    reel.roll(2.0);
    reel.roll(0.0);
    assert_eq!(reel.pending_rolls(), 2);

    let mut clock = FrameClock::new();
    while reel.update(clock.tick()) {}
    assert_eq!(log.count(ReelEventKind::Start), 3);
    assert_eq!(log.count(ReelEventKind::Finish), 3);
    assert_eq!(reel.pending_rolls(), 0);

    // 3 + 2 + 0 tiles: one full turn of the five-tile strip
    assert_eq!(reel.positions(), vec![0.0, 150.0, 300.0, 450.0, -150.0]);
}

#[test]
fn test_channel_listener() {
    let mut reel = five(ReelConfig::default());
    let (listener, rx) = ChannelListener::channel();
    reel.subscribe(listener);

    reel.roll(1.0);
    while reel.update(16.0) {}

    let kinds: Vec<_> = rx.try_iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![ReelEventKind::Start, ReelEventKind::Roll, ReelEventKind::Finish]
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// POSITION ARITHMETIC / SNAPSHOTS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_one_tile_linear_roll() {
    let mut reel = five(ReelConfig::default());
    assert_eq!(reel.max_y_position(), 600.0);
    let before = reel.positions();

    reel.roll(1.0);
    while reel.update(10.0) {}

    let after = reel.positions();
    for (b, a) in before.iter().zip(&after) {
        let moved = reel.wrap_position(b + Y_PERIOD);
        assert_relative_eq!(*a, moved);
    }
    // The tile laid out at 600 (wrapped to -150) lands on 0
    assert_eq!(after[4], 0.0);
}

#[test]
fn test_snapshot_idempotent() {
    let mut reel = five(ReelConfig::default());
    reel.roll(1.7);
    reel.update(20.0);

    reel.set_start_positions();
    let first = reel.start_positions().to_vec();
    reel.set_start_positions();
    assert_eq!(reel.start_positions(), first.as_slice());
}

#[test]
fn test_phase_snapshots_are_relative() {
    // The recoil starts where the anticipation ended
    let mut reel = five(ReelConfig::bouncy(Y_PERIOD));
    let initial = reel.positions();
    reel.roll(1.0);

    while reel.phase() == Some(Phase::Preroll1) {
        reel.update(1.0);
    }
    assert_eq!(reel.phase(), Some(Phase::Preroll2));
    let anticipation_end: Vec<f64> = initial
        .iter()
        .map(|p| reel.wrap_position(p - 0.33 * Y_PERIOD))
        .collect();
    for (snap, expected) in reel.start_positions().iter().zip(anticipation_end) {
        assert_relative_eq!(*snap, expected, epsilon = 1e-9);
    }
}
