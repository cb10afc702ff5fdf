//! Roll phase sequencing
//!
//! A roll is a chain of up to five segments over one scalar, the tile-index
//! delta (`dti`). Each segment starts only after the previous one completes.
//!
//! ```text
//! Preroll1 ──▶ Preroll2 ──▶ Roll ──▶ Postroll1 ──▶ Postroll2 ──▶ finish
//! (-pre)       (+pre)       (+d)     (+post)       (-post)
//! ```
//!
//! With a custom roll easing only `Roll` runs.

use rf_tween::Easing;
use serde::{Deserialize, Serialize};

use crate::config::ReelConfig;
use crate::event::ReelEventKind;
use crate::state::ReelState;

/// Anticipation/overshoot duration factor (ms per unit of `y * tiles / speed`)
const ANTICIPATION_FACTOR: f64 = 8.0;

/// One segment of a roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Phase {
    /// Anticipation: back up by the pre-roll distance
    Preroll1 = 0,
    /// Recoil: return to the starting slot
    Preroll2 = 1,
    /// Main roll
    Roll = 2,
    /// Overshoot past the target
    Postroll1 = 3,
    /// Settle back onto the target
    Postroll2 = 4,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Preroll1 => "preroll1",
            Phase::Preroll2 => "preroll2",
            Phase::Roll => "roll",
            Phase::Postroll1 => "postroll1",
            Phase::Postroll2 => "postroll2",
        }
    }

    /// Reel state while this phase is active
    pub fn state(&self) -> ReelState {
        match self {
            Phase::Preroll1 | Phase::Preroll2 => ReelState::Prerolling,
            Phase::Roll => ReelState::Rolling,
            Phase::Postroll1 | Phase::Postroll2 => ReelState::Postrolling,
        }
    }

    /// Event announced when this phase starts
    pub fn event(&self) -> Option<ReelEventKind> {
        match self {
            Phase::Preroll1 => Some(ReelEventKind::Preroll),
            Phase::Roll => Some(ReelEventKind::Roll),
            Phase::Postroll1 => Some(ReelEventKind::Postroll),
            Phase::Preroll2 | Phase::Postroll2 => None,
        }
    }
}

/// Animation parameters of one phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseStep {
    pub phase: Phase,
    /// `dti` reached at the end of the phase (animated from 0)
    pub target_dti: f64,
    pub duration_ms: f64,
    pub easing: Easing,
}

/// Ordered phases of one roll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhasePlan {
    steps: Vec<PhaseStep>,
}

impl PhasePlan {
    /// Build the plan for a roll of `distance_tiles` (already clamped)
    pub fn new(distance_tiles: f64, config: &ReelConfig) -> Self {
        let y = config.y_period;
        let speed = config.speed;
        let pre = config.pre_roll_tiles;
        let post = config.post_roll_tiles;
        let custom = config.roll_easing;

        let mut steps = Vec::with_capacity(5);

        if custom.is_none() && pre > 0.0 {
            let pre_time = y * pre / speed * ANTICIPATION_FACTOR;
            steps.push(PhaseStep {
                phase: Phase::Preroll1,
                target_dti: -pre,
                duration_ms: pre_time,
                easing: Easing::QuadraticOut,
            });
            steps.push(PhaseStep {
                phase: Phase::Preroll2,
                target_dti: pre,
                duration_ms: pre_time / 4.0,
                easing: Easing::QuadraticIn,
            });
        }

        steps.push(PhaseStep {
            phase: Phase::Roll,
            target_dti: distance_tiles,
            duration_ms: distance_tiles * y / speed,
            easing: custom.unwrap_or(Easing::Linear),
        });

        if custom.is_none() && post > 0.0 {
            let post_time = y * post / speed * ANTICIPATION_FACTOR;
            steps.push(PhaseStep {
                phase: Phase::Postroll1,
                target_dti: post,
                duration_ms: post_time / 2.0,
                easing: Easing::QuadraticOut,
            });
            steps.push(PhaseStep {
                phase: Phase::Postroll2,
                target_dti: -post,
                duration_ms: post_time,
                easing: Easing::QuadraticIn,
            });
        }

        Self { steps }
    }

    /// Phase the roll begins with
    pub fn first(&self) -> Phase {
        // Roll is always present
        self.steps.first().map_or(Phase::Roll, |s| s.phase)
    }

    /// Transition table: the phase after `current`, `None` when the roll ends
    pub fn next_phase(&self, current: Phase) -> Option<Phase> {
        let at = self.steps.iter().position(|s| s.phase == current)?;
        self.steps.get(at + 1).map(|s| s.phase)
    }

    /// Parameters of a phase in this plan
    pub fn step(&self, phase: Phase) -> Option<&PhaseStep> {
        self.steps.iter().find(|s| s.phase == phase)
    }

    pub fn steps(&self) -> &[PhaseStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of all phase durations (ms)
    pub fn total_duration_ms(&self) -> f64 {
        self.steps.iter().map(|s| s.duration_ms).sum()
    }

    /// Net `dti` once every phase has run
    pub fn net_dti(&self) -> f64 {
        self.steps.iter().map(|s| s.target_dti).sum()
    }
}
