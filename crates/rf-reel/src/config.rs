//! Reel configuration

use rf_tween::Easing;
use serde::{Deserialize, Serialize};

/// Default spacing between adjacent tile slots (layout units)
pub const DEFAULT_Y_PERIOD: f64 = 150.0;
/// Default tile scale
pub const DEFAULT_TILE_SCALE: f64 = 1.0;
/// Default roll speed (layout units per ms)
pub const DEFAULT_SPEED: f64 = 2.0;
/// Default top culling threshold: tiles above `-DEFAULT_CULL_TOP` are hidden
pub const DEFAULT_CULL_TOP: f64 = 100.0;
/// Default depth of the bottom culling band, in tile periods
pub const DEFAULT_CULL_BOTTOM_PERIODS: f64 = 1.5;

/// Reel configuration
///
/// Every field has a default, so partial YAML/JSON documents deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReelConfig {
    /// Spacing between adjacent tile slots
    pub y_period: f64,

    /// Scale applied to every tile visual
    pub tile_scale: f64,

    /// Roll speed (layout units per ms)
    pub speed: f64,

    /// Custom easing for the main roll.
    /// When set, pre-roll and post-roll segments are skipped entirely.
    pub roll_easing: Option<Easing>,

    /// Anticipation distance (fractional tiles)
    pub pre_roll_tiles: f64,

    /// Overshoot distance (fractional tiles)
    pub post_roll_tiles: f64,

    /// Draw the mask shape instead of clipping with it
    pub show_mask: bool,

    /// Tiles between `-y_period` and `-cull_top` are hidden
    pub cull_top: f64,

    /// Tiles deeper than `max_y - cull_bottom_periods * y_period` are hidden
    pub cull_bottom_periods: f64,
}

impl Default for ReelConfig {
    fn default() -> Self {
        Self {
            y_period: DEFAULT_Y_PERIOD,
            tile_scale: DEFAULT_TILE_SCALE,
            speed: DEFAULT_SPEED,
            roll_easing: None,
            pre_roll_tiles: 0.0,
            post_roll_tiles: 0.0,
            show_mask: false,
            cull_top: DEFAULT_CULL_TOP,
            cull_bottom_periods: DEFAULT_CULL_BOTTOM_PERIODS,
        }
    }
}

impl ReelConfig {
    /// Anticipation + overshoot preset used by the demo grid
    pub fn bouncy(y_period: f64) -> Self {
        Self {
            y_period,
            pre_roll_tiles: 0.33,
            post_roll_tiles: 0.33,
            ..Self::default()
        }
    }

    /// Set custom roll easing
    pub fn with_roll_easing(mut self, easing: Easing) -> Self {
        self.roll_easing = Some(easing);
        self
    }

    /// Replace unusable values with defaults
    ///
    /// Zero or negative periods and speeds would make durations infinite or
    /// wrap-around diverge, so they fall back rather than fail.
    pub fn sanitized(&self) -> Self {
        let positive_or = |v: f64, default: f64| {
            if v.is_finite() && v > 0.0 { v } else { default }
        };
        let non_negative = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };

        let sanitized = Self {
            y_period: positive_or(self.y_period, DEFAULT_Y_PERIOD),
            tile_scale: if self.tile_scale.is_finite() && self.tile_scale >= 0.0 {
                self.tile_scale
            } else {
                DEFAULT_TILE_SCALE
            },
            speed: positive_or(self.speed, DEFAULT_SPEED),
            roll_easing: self.roll_easing,
            pre_roll_tiles: non_negative(self.pre_roll_tiles),
            post_roll_tiles: non_negative(self.post_roll_tiles),
            show_mask: self.show_mask,
            cull_top: if self.cull_top.is_finite() { self.cull_top } else { DEFAULT_CULL_TOP },
            cull_bottom_periods: if self.cull_bottom_periods.is_finite() {
                self.cull_bottom_periods
            } else {
                DEFAULT_CULL_BOTTOM_PERIODS
            },
        };

        if sanitized != *self {
            log::debug!("reel config sanitized: {:?} -> {:?}", self, sanitized);
        }
        sanitized
    }

    /// Whether the roll uses the custom-easing topology (no pre/post segments)
    #[inline]
    pub fn has_custom_easing(&self) -> bool {
        self.roll_easing.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReelConfig::default();
        assert_eq!(config.y_period, 150.0);
        assert_eq!(config.tile_scale, 1.0);
        assert_eq!(config.speed, 2.0);
        assert_eq!(config.roll_easing, None);
        assert_eq!(config.pre_roll_tiles, 0.0);
        assert_eq!(config.post_roll_tiles, 0.0);
        assert!(!config.show_mask);
        assert!(!config.has_custom_easing());
    }

    #[test]
    fn test_sanitize_falls_back() {
        let config = ReelConfig {
            y_period: 0.0,
            tile_scale: -1.0,
            speed: -5.0,
            pre_roll_tiles: -0.5,
            post_roll_tiles: f64::NAN,
            ..ReelConfig::default()
        }
        .sanitized();

        assert_eq!(config.y_period, DEFAULT_Y_PERIOD);
        assert_eq!(config.tile_scale, DEFAULT_TILE_SCALE);
        assert_eq!(config.speed, DEFAULT_SPEED);
        assert_eq!(config.pre_roll_tiles, 0.0);
        assert_eq!(config.post_roll_tiles, 0.0);
    }

    #[test]
    fn test_sanitize_keeps_valid() {
        let config = ReelConfig::bouncy(180.0).with_roll_easing(Easing::BounceInOut);
        assert_eq!(config.sanitized(), config);

        // Zero scale is legal (hidden tiles)
        let zero_scale = ReelConfig { tile_scale: 0.0, ..ReelConfig::default() };
        assert_eq!(zero_scale.sanitized().tile_scale, 0.0);
    }

    #[test]
    fn test_partial_json() {
        let config: ReelConfig =
            serde_json::from_str(r#"{"y_period": 180, "roll_easing": "bounce_in_out"}"#).unwrap();
        assert_eq!(config.y_period, 180.0);
        assert_eq!(config.speed, DEFAULT_SPEED);
        assert_eq!(config.roll_easing, Some(Easing::BounceInOut));
    }
}
