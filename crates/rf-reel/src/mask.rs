//! Clipping masks

use serde::{Deserialize, Serialize};

/// Opaque identifier of a shape already built by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaskHandle(pub u64);

/// Clipping boundary supplied at reel construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskShape {
    /// Closed polygon in reel-local coordinates
    Polygon(Vec<(f64, f64)>),
    /// Host-built shape
    Shape(MaskHandle),
}

impl MaskShape {
    /// Axis-aligned rectangle polygon
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        MaskShape::Polygon(vec![
            (x, y),
            (x + width, y),
            (x + width, y + height),
            (x, y + height),
        ])
    }

    /// Bounding box `(min_x, min_y, max_x, max_y)` of a polygon
    ///
    /// `None` for host shapes and empty polygons.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let MaskShape::Polygon(points) = self else {
            return None;
        };
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(
            (first.0, first.1, first.0, first.1),
            |(min_x, min_y, max_x, max_y), &(x, y)| {
                (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
            },
        ))
    }
}

/// Mask attached to a reel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mask {
    pub shape: MaskShape,
    /// False when the shape is only drawn for inspection (`show_mask`)
    pub clipping: bool,
}
