//! Tween
//!
//! A single timed interpolation of one scalar value. The owner drives it with
//! [`Tween::advance`] once per frame and receives notifications through a sink
//! closure, in the order they happen inside that frame.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;

// ═══════════════════════════════════════════════════════════════════════════════
// EVENTS / STATE
// ═══════════════════════════════════════════════════════════════════════════════

/// Notification emitted by a tween
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TweenEvent {
    /// Tween started running
    Start,
    /// New interpolated value
    Update(f64),
    /// An iteration ended and the next one begins (1-based repeat count)
    Repeat(u32),
    /// Final iteration ended
    Complete,
}

/// Lifecycle of a tween
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum TweenState {
    /// Built, not started
    #[default]
    Idle = 0,
    /// Advancing
    Running = 1,
    /// Reached its end value (after all repeats)
    Completed = 2,
    /// Stopped before completion
    Stopped = 3,
}

impl TweenState {
    /// Check if the tween still consumes time
    #[inline]
    pub fn is_running(&self) -> bool {
        *self == TweenState::Running
    }

    /// Check if the tween has ended, either way
    #[inline]
    pub fn is_done(&self) -> bool {
        matches!(self, TweenState::Completed | TweenState::Stopped)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TWEEN
// ═══════════════════════════════════════════════════════════════════════════════

/// Timed scalar animation
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    duration_ms: f64,
    easing: Easing,
    repeat: u32,
    yoyo: bool,

    state: TweenState,
    elapsed_ms: f64,
    iteration: u32,
    reversed: bool,
    value: f64,
}

impl Tween {
    /// Create a linear tween from `from` to `to` over `duration_ms`
    pub fn new(from: f64, to: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            duration_ms,
            easing: Easing::Linear,
            repeat: 0,
            yoyo: false,
            state: TweenState::Idle,
            elapsed_ms: 0.0,
            iteration: 0,
            reversed: false,
            value: from,
        }
    }

    /// Set easing curve
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Run `count` extra iterations after the first
    pub fn repeat(mut self, count: u32) -> Self {
        self.repeat = count;
        self
    }

    /// Alternate direction on every repeat
    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    /// Start running, emitting [`TweenEvent::Start`]
    ///
    /// Restarts from the beginning if the tween already ran.
    pub fn start(&mut self, mut sink: impl FnMut(TweenEvent)) {
        self.state = TweenState::Running;
        self.elapsed_ms = 0.0;
        self.iteration = 0;
        self.reversed = false;
        self.value = self.from;
        sink(TweenEvent::Start);
    }

    /// Stop without completing. Returns true if the tween was running.
    pub fn stop(&mut self) -> bool {
        if self.state.is_running() {
            self.state = TweenState::Stopped;
            true
        } else {
            false
        }
    }

    /// Advance by `dt_ms`, emitting updates and lifecycle events
    ///
    /// Returns the time not consumed by this tween: the remainder past its
    /// completion, or all of `dt_ms` if it was not running.
    pub fn advance(&mut self, dt_ms: f64, mut sink: impl FnMut(TweenEvent)) -> f64 {
        if !self.state.is_running() {
            return dt_ms;
        }

        let mut remaining = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };

        loop {
            let left = (self.duration_ms - self.elapsed_ms).max(0.0);

            if remaining < left {
                self.elapsed_ms += remaining;
                self.value = self.value_at(self.elapsed_ms / self.duration_ms);
                sink(TweenEvent::Update(self.value));
                return 0.0;
            }

            // Iteration boundary
            remaining -= left;
            self.elapsed_ms = self.duration_ms.max(0.0);
            self.value = self.end_value();
            sink(TweenEvent::Update(self.value));

            if self.iteration < self.repeat {
                self.iteration += 1;
                if self.yoyo {
                    self.reversed = !self.reversed;
                }
                self.elapsed_ms = 0.0;
                sink(TweenEvent::Repeat(self.iteration));
                if remaining <= 0.0 {
                    return 0.0;
                }
                continue;
            }

            self.state = TweenState::Completed;
            sink(TweenEvent::Complete);
            return remaining;
        }
    }

    #[inline]
    fn value_at(&self, progress: f64) -> f64 {
        if self.reversed {
            self.easing.interpolate(self.to, self.from, progress)
        } else {
            self.easing.interpolate(self.from, self.to, progress)
        }
    }

    #[inline]
    fn end_value(&self) -> f64 {
        if self.reversed { self.from } else { self.to }
    }

    /// Current interpolated value
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Current state
    #[inline]
    pub fn state(&self) -> TweenState {
        self.state
    }

    /// Duration of one iteration (ms)
    #[inline]
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Easing curve
    #[inline]
    pub fn curve(&self) -> Easing {
        self.easing
    }

    /// Target value of the first iteration
    #[inline]
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Progress through the current iteration (0.0 - 1.0)
    pub fn progress(&self) -> f64 {
        if self.duration_ms <= 0.0 {
            return if self.state == TweenState::Completed { 1.0 } else { 0.0 };
        }
        (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
