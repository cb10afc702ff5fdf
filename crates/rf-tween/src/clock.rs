//! Frame clock
//!
//! Fixed-step animation clock. Every active animation is advanced once per
//! frame with the same delta, so all tweens observe the same time base.

use serde::{Deserialize, Serialize};

/// Default frame length (60 fps)
pub const DEFAULT_FRAME_MS: f64 = 1000.0 / 60.0;

/// Fixed-step frame clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameClock {
    frame_ms: f64,
    elapsed_ms: f64,
    frame: u64,
}

impl FrameClock {
    /// 60 fps clock
    pub fn new() -> Self {
        Self::fixed(DEFAULT_FRAME_MS)
    }

    /// Clock with a specific frame length
    ///
    /// Non-positive or non-finite lengths fall back to [`DEFAULT_FRAME_MS`].
    pub fn fixed(frame_ms: f64) -> Self {
        let frame_ms = if frame_ms.is_finite() && frame_ms > 0.0 {
            frame_ms
        } else {
            log::warn!("invalid frame length {frame_ms}, using {DEFAULT_FRAME_MS:.3}ms");
            DEFAULT_FRAME_MS
        };
        Self {
            frame_ms,
            elapsed_ms: 0.0,
            frame: 0,
        }
    }

    /// Advance one frame and return its delta (ms)
    #[inline]
    pub fn tick(&mut self) -> f64 {
        self.frame += 1;
        self.elapsed_ms += self.frame_ms;
        self.frame_ms
    }

    /// Frame length (ms)
    #[inline]
    pub fn frame_ms(&self) -> f64 {
        self.frame_ms
    }

    /// Total time advanced (ms)
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Frames ticked so far
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Reset to frame zero
    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
        self.frame = 0;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tick_accumulates() {
        let mut clock = FrameClock::fixed(10.0);
        for _ in 0..5 {
            assert_eq!(clock.tick(), 10.0);
        }
        assert_eq!(clock.frame(), 5);
        assert_relative_eq!(clock.elapsed_ms(), 50.0);

        clock.reset();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.elapsed_ms(), 0.0);
    }

    #[test]
    fn test_invalid_frame_length() {
        assert_eq!(FrameClock::fixed(0.0).frame_ms(), DEFAULT_FRAME_MS);
        assert_eq!(FrameClock::fixed(f64::NAN).frame_ms(), DEFAULT_FRAME_MS);
        assert_eq!(FrameClock::default().frame_ms(), DEFAULT_FRAME_MS);
    }
}
