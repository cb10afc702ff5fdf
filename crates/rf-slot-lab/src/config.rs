//! Slot and simulator configuration
//!
//! [`SimConfig`] is what `reel-sim` reads from disk. The format follows the
//! file extension: `.yaml`/`.yml` or `.json`.

use rf_reel::{ReelConfig, Tile};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{SlotError, SlotResult};

/// Horizontal distance between reel centers
pub const DEFAULT_X_PERIOD: f64 = 200.0;
/// Inset of each reel mask from its cell
pub const DEFAULT_MARGIN: f64 = 2.0;
/// Rows shown through the mask
pub const DEFAULT_VISIBLE_ROWS: usize = 3;
/// Reels in the built-in layout
pub const DEFAULT_REEL_COUNT: usize = 5;
/// Slot height of the built-in layout
pub const DEFAULT_SLOTS_Y_PERIOD: f64 = 180.0;
/// Anticipation and overshoot of the built-in layout (tiles)
pub const DEFAULT_BOUNCE_TILES: f64 = 0.33;

/// Built-in symbol strip, split into five reels of five
pub const DEFAULT_STRIP: [&str; 25] = [
    "P", "P", "10", "J", "A", //
    "A", "10", "K", "K", "K", //
    "K", "J", "Q", "P", "Q", //
    "10", "K", "J", "10", "P", //
    "J", "A", "P", "K", "J",
];

/// Layout of a row of reels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotsConfig {
    /// Shared by every reel
    #[serde(flatten)]
    pub reel: ReelConfig,
    pub x_period: f64,
    pub margin: f64,
    pub visible_rows: usize,
}

impl Default for SlotsConfig {
    fn default() -> Self {
        Self {
            reel: ReelConfig {
                pre_roll_tiles: DEFAULT_BOUNCE_TILES,
                post_roll_tiles: DEFAULT_BOUNCE_TILES,
                ..ReelConfig::bouncy(DEFAULT_SLOTS_Y_PERIOD)
            },
            x_period: DEFAULT_X_PERIOD,
            margin: DEFAULT_MARGIN,
            visible_rows: DEFAULT_VISIBLE_ROWS,
        }
    }
}

impl SlotsConfig {
    /// Horizontal center of reel `index` out of `count`
    pub fn reel_x(&self, index: usize, count: usize) -> f64 {
        let center = count.saturating_sub(1) as f64 / 2.0;
        (index as f64 - center) * self.x_period
    }

    /// Mask rectangle `(x, y, width, height)` in reel-local coordinates
    ///
    /// Tiles are anchored at their centers and row 0 sits at `y = 0`.
    pub fn mask_rect(&self) -> (f64, f64, f64, f64) {
        let y = self.reel.y_period;
        (
            -self.x_period / 2.0 + self.margin,
            -y / 2.0 + self.margin,
            self.x_period - 2.0 * self.margin,
            self.visible_rows as f64 * y - 2.0 * self.margin,
        )
    }
}

/// Reel simulator input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub reel_count: usize,
    /// Symbol strip, split into `reel_count` contiguous reels
    pub symbols: Vec<String>,
    pub slots: SlotsConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            reel_count: DEFAULT_REEL_COUNT,
            symbols: DEFAULT_STRIP.iter().map(|s| s.to_string()).collect(),
            slots: SlotsConfig::default(),
        }
    }
}

impl SimConfig {
    /// Load from a YAML or JSON file
    pub fn load(path: impl AsRef<Path>) -> SlotResult<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let content = std::fs::read_to_string(path)?;
        let config: Self = match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml(&content)?,
            "json" => Self::from_json(&content)?,
            other => return Err(SlotError::UnsupportedFormat(other.to_string())),
        };
        log::debug!(
            "loaded sim config from {}: {} symbols on {} reels",
            path.display(),
            config.symbols.len(),
            config.reel_count
        );
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> SlotResult<Self> {
        Ok(serde_yml::from_str(content)?)
    }

    pub fn from_json(content: &str) -> SlotResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_yaml(&self) -> SlotResult<String> {
        Ok(serde_yml::to_string(self)?)
    }

    /// Fresh tiles for the symbol strip
    pub fn tiles(&self) -> Vec<Tile> {
        self.symbols.iter().map(|s| Tile::create(s.as_str())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_layout() {
        let config = SimConfig::default();
        assert_eq!(config.reel_count, 5);
        assert_eq!(config.symbols.len(), 25);
        assert_eq!(config.slots.reel.y_period, 180.0);
        assert_eq!(config.slots.reel.pre_roll_tiles, 0.33);
        assert_eq!(config.slots.reel.post_roll_tiles, 0.33);
        assert_eq!(config.slots.x_period, 200.0);
    }

    #[test]
    fn test_reel_x_centered() {
        let config = SlotsConfig::default();
        assert_eq!(config.reel_x(0, 5), -400.0);
        assert_eq!(config.reel_x(2, 5), 0.0);
        assert_eq!(config.reel_x(4, 5), 400.0);
        assert_eq!(config.reel_x(0, 1), 0.0);
    }

    #[test]
    fn test_mask_rect() {
        let config = SlotsConfig::default();
        assert_eq!(config.mask_rect(), (-98.0, -88.0, 196.0, 536.0));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "reel_count: 3\nslots:\n  y_period: 120\n  speed: 4\n";
        let config = SimConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.reel_count, 3);
        assert_eq!(config.slots.reel.y_period, 120.0);
        assert_eq!(config.slots.reel.speed, 4.0);
        assert_eq!(config.slots.x_period, DEFAULT_X_PERIOD);
        assert_eq!(config.symbols.len(), 25);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = SimConfig::default();
        let yaml = config.to_yaml().unwrap();
        assert_eq!(SimConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("sim.json");
        let mut file = std::fs::File::create(&json_path).unwrap();
        write!(file, r#"{{"reel_count": 2, "symbols": ["A", "K", "Q", "J"]}}"#).unwrap();
        let config = SimConfig::load(&json_path).unwrap();
        assert_eq!(config.reel_count, 2);
        assert_eq!(config.tiles().len(), 4);

        let yaml_path = dir.path().join("sim.YML");
        std::fs::write(&yaml_path, "reel_count: 1\nsymbols: [P]\n").unwrap();
        assert_eq!(SimConfig::load(&yaml_path).unwrap().reel_count, 1);

        let toml_path = dir.path().join("sim.toml");
        std::fs::write(&toml_path, "reel_count = 1").unwrap();
        assert!(matches!(
            SimConfig::load(&toml_path),
            Err(SlotError::UnsupportedFormat(ext)) if ext == "toml"
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            SimConfig::load("/nonexistent/sim.yaml"),
            Err(SlotError::Io(_))
        ));
    }
}
