//! 2-D axis-aligned bounding box for the extent of a tile or a crop window.

use serde::{Deserialize, Serialize};

// =============================================================================
// BoundingBox
// =============================================================================

/// Immutable 2-D axis-aligned rectangle.
///
/// The four coordinates are taken in the fixed order `(x0, x1, y0, y1)`:
/// leftmost, rightmost, topmost, bottommost. Nothing is enforced by
/// construction — callers are expected to supply `x0 <= x1` and `y0 <= y1`,
/// and [`width`](Self::width)/[`height`](Self::height) go negative when they
/// do not.
///
/// Coordinates are `f64` because tile placements in manifests are
/// sub-pixel-precise global positions. When a `BoundingBox` is used as a crop
/// window for [`Tilespec::read_region`](crate::Tilespec::read_region), the
/// coordinates are instead interpreted as pixel offsets into the decoded
/// image.
///
/// Serializes as the four-number array `[x0, x1, y0, y1]`, the `bbox` shape
/// used by tilespec manifests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
}

impl From<[f64; 4]> for BoundingBox {
    fn from(coords: [f64; 4]) -> Self {
        Self::new(coords[0], coords[1], coords[2], coords[3])
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(bbox: BoundingBox) -> Self {
        [bbox.x0, bbox.x1, bbox.y0, bbox.y1]
    }
}

impl BoundingBox {
    /// Create a bounding box from `(x0, x1, y0, y1)`.
    pub fn new(x0: f64, x1: f64, y0: f64, y1: f64) -> Self {
        Self { x0, x1, y0, y1 }
    }

    /// Leftmost coordinate.
    pub fn x0(&self) -> f64 {
        self.x0
    }

    /// Rightmost coordinate.
    pub fn x1(&self) -> f64 {
        self.x1
    }

    /// Topmost coordinate.
    pub fn y0(&self) -> f64 {
        self.y0
    }

    /// Bottommost coordinate.
    pub fn y1(&self) -> f64 {
        self.y1
    }

    /// Horizontal extent, `x1 - x0`.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Vertical extent, `y1 - y0`.
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

// =============================================================================
// Tests
// =============================================================================
