//! Easing Curves
//!
//! Progress curves for timed animations. Names follow the usual
//! `Family.Direction` convention (`Quadratic.Out`, `Elastic.InOut`, ...).

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::EasingParseError;

/// Easing curve applied to a tween's normalized progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant rate
    #[default]
    Linear,
    /// Slow start (t²)
    QuadraticIn,
    /// Slow end
    QuadraticOut,
    /// Slow start and end
    QuadraticInOut,
    /// Slow start (t³)
    CubicIn,
    /// Slow end, cubic
    CubicOut,
    /// Slow start and end, cubic
    CubicInOut,
    /// Half cosine S-curve
    SineInOut,
    /// Spring-like oscillation at both ends
    ElasticInOut,
    /// Bounces against the end value
    BounceOut,
    /// Bounces against both ends
    BounceInOut,
    /// Overshoots the end value, then settles
    BackOut,
}

impl Easing {
    /// Every supported curve, in declaration order
    pub const ALL: [Easing; 12] = [
        Easing::Linear,
        Easing::QuadraticIn,
        Easing::QuadraticOut,
        Easing::QuadraticInOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
        Easing::SineInOut,
        Easing::ElasticInOut,
        Easing::BounceOut,
        Easing::BounceInOut,
        Easing::BackOut,
    ];

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "Linear",
            Easing::QuadraticIn => "Quadratic.In",
            Easing::QuadraticOut => "Quadratic.Out",
            Easing::QuadraticInOut => "Quadratic.InOut",
            Easing::CubicIn => "Cubic.In",
            Easing::CubicOut => "Cubic.Out",
            Easing::CubicInOut => "Cubic.InOut",
            Easing::SineInOut => "Sine.InOut",
            Easing::ElasticInOut => "Elastic.InOut",
            Easing::BounceOut => "Bounce.Out",
            Easing::BounceInOut => "Bounce.InOut",
            Easing::BackOut => "Back.Out",
        }
    }

    /// Evaluate curve at position t (0.0 - 1.0)
    ///
    /// Input is clamped. Output starts at 0.0 and ends at 1.0; elastic and
    /// back curves leave that range in between.
    #[inline]
    pub fn evaluate(&self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        match self {
            Easing::Linear => t,

            Easing::QuadraticIn => t * t,
            Easing::QuadraticOut => t * (2.0 - t),
            Easing::QuadraticInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }

            Easing::CubicIn => t * t * t,
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }

            // y = (1 - cos(πt)) / 2
            Easing::SineInOut => 0.5 * (1.0 - (PI * t).cos()),

            Easing::ElasticInOut => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let k = t * 2.0;
                if k < 1.0 {
                    -0.5 * 2f64.powf(10.0 * (k - 1.0)) * ((k - 1.1) * 5.0 * PI).sin()
                } else {
                    0.5 * 2f64.powf(-10.0 * (k - 1.0)) * ((k - 1.1) * 5.0 * PI).sin() + 1.0
                }
            }

            Easing::BounceOut => bounce_out(t),
            Easing::BounceInOut => {
                if t < 0.5 {
                    (1.0 - bounce_out(1.0 - 2.0 * t)) * 0.5
                } else {
                    bounce_out(2.0 * t - 1.0) * 0.5 + 0.5
                }
            }

            Easing::BackOut => {
                const S: f64 = 1.70158;
                let k = t - 1.0;
                k * k * ((S + 1.0) * k + S) + 1.0
            }
        }
    }

    /// Interpolate between `from` and `to` at progress t
    #[inline]
    pub fn interpolate(&self, from: f64, to: f64, t: f64) -> f64 {
        from + (to - from) * self.evaluate(t)
    }
}

#[inline]
fn bounce_out(t: f64) -> f64 {
    const N: f64 = 7.5625;
    const D: f64 = 2.75;

    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Easing {
    type Err = EasingParseError;

    /// Accepts `Quadratic.Out`, `quadratic_out`, `QuadraticOut`, `quad-out`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '.' | '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        let easing = match key.as_str() {
            "linear" | "linearnone" => Easing::Linear,
            "quadraticin" | "quadin" => Easing::QuadraticIn,
            "quadraticout" | "quadout" => Easing::QuadraticOut,
            "quadraticinout" | "quadinout" => Easing::QuadraticInOut,
            "cubicin" => Easing::CubicIn,
            "cubicout" => Easing::CubicOut,
            "cubicinout" => Easing::CubicInOut,
            "sineinout" => Easing::SineInOut,
            "elasticinout" => Easing::ElasticInOut,
            "bounceout" => Easing::BounceOut,
            "bounceinout" => Easing::BounceInOut,
            "backout" => Easing::BackOut,
            _ => return Err(EasingParseError::Unknown(s.to_string())),
        };
        Ok(easing)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
