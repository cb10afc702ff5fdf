//! Tiles and their visual handles

use serde::{Deserialize, Serialize};
use std::fmt;

/// Symbol label of the premium tile
pub const PREMIUM_SYMBOL: &str = "P";

/// Draw priority of regular tiles
pub const REGULAR_PRIORITY: i32 = 100;

/// Draw priority of premium tiles
pub const PREMIUM_PRIORITY: i32 = 200;

/// Symbol category of a tile (e.g. "P", "A", "K", "10")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileKind(String);

impl TileKind {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Is this the distinguished premium symbol?
    #[inline]
    pub fn is_premium(&self) -> bool {
        self.0 == PREMIUM_SYMBOL
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TileKind {
    fn from(symbol: &str) -> Self {
        Self::new(symbol)
    }
}

/// Host-side visual representation of a tile
///
/// The reel never reads it during animation math; it only carries the
/// properties a renderer needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileVisual {
    /// Texture/frame identifier
    pub frame: String,
    /// Uniform scale
    pub scale: f64,
    /// Opacity (0.0 - 1.0)
    pub alpha: f64,
    /// Anchor point, normalized
    pub anchor: (f64, f64),
}

impl TileVisual {
    /// Centered, fully opaque visual for a frame
    pub fn from_frame(frame: impl Into<String>) -> Self {
        Self {
            frame: frame.into(),
            scale: 1.0,
            alpha: 1.0,
            anchor: (0.5, 0.5),
        }
    }
}

/// A positioned, typed unit on a reel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Symbol category
    pub kind: TileKind,
    /// Higher draws on top
    pub display_priority: i32,
    /// Offset along the roll axis
    pub position: f64,
    /// Culling flag
    pub visible: bool,
    /// Visual handle, if the symbol has a frame
    pub visual: Option<TileVisual>,
}

impl Tile {
    /// Create a tile for a symbol
    ///
    /// An empty symbol yields a tile without a visual handle.
    pub fn create(symbol: impl Into<String>) -> Self {
        let kind = TileKind::new(symbol);
        let display_priority = if kind.is_premium() {
            PREMIUM_PRIORITY
        } else {
            REGULAR_PRIORITY
        };
        let visual = if kind.as_str().is_empty() {
            None
        } else {
            Some(TileVisual::from_frame(kind.as_str()))
        };

        Self {
            kind,
            display_priority,
            position: 0.0,
            visible: true,
            visual,
        }
    }

    /// Current opacity (1.0 without a visual)
    pub fn alpha(&self) -> f64 {
        self.visual.as_ref().map_or(1.0, |v| v.alpha)
    }

    /// Set opacity; no-op without a visual
    pub fn set_alpha(&mut self, alpha: f64) {
        if let Some(visual) = self.visual.as_mut() {
            visual.alpha = alpha.clamp(0.0, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority() {
        assert_eq!(Tile::create("P").display_priority, PREMIUM_PRIORITY);
        assert_eq!(Tile::create("K").display_priority, REGULAR_PRIORITY);
        assert_eq!(Tile::create("10").display_priority, REGULAR_PRIORITY);
        // Label match is exact
        assert_eq!(Tile::create("p").display_priority, REGULAR_PRIORITY);
    }

    #[test]
    fn test_visual_handle() {
        let tile = Tile::create("A");
        let visual = tile.visual.as_ref().unwrap();
        assert_eq!(visual.frame, "A");
        assert_eq!(visual.anchor, (0.5, 0.5));
        assert_eq!(tile.alpha(), 1.0);

        let empty = Tile::create("");
        assert!(empty.visual.is_none());
        assert_eq!(empty.alpha(), 1.0);
    }

    #[test]
    fn test_alpha() {
        let mut tile = Tile::create("Q");
        tile.set_alpha(0.5);
        assert_eq!(tile.alpha(), 0.5);
        tile.set_alpha(3.0);
        assert_eq!(tile.alpha(), 1.0);
    }

    #[test]
    fn test_kind_display() {
        let kind: TileKind = "J".into();
        assert_eq!(kind.to_string(), "J");
        assert!(!kind.is_premium());
        assert!(TileKind::new(PREMIUM_SYMBOL).is_premium());
    }
}
