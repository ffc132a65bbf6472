//! The data model (§3): pieces as they travel from request to response.

use serde::{Deserialize, Serialize};

use crate::geom::Polygon;

/// An input piece: a polygon and how many identical copies are wanted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Piece {
    pub id: String,
    pub polygon: Polygon,
    pub quantity: u32,
}

/// One precomputed rotation of an expanded piece: the rotated+normalized
/// polygon and its area.
#[derive(Clone, Debug)]
pub struct Orientation {
    pub angle: f64,
    pub polygon: Polygon,
    pub area: f64,
}

/// A single copy of an input piece, normalized, with every allowed rotation
/// precomputed at true size (§3, "Oriented Piece"); margin clearance is
/// applied later, per placement, not to this outline.
#[derive(Clone, Debug)]
pub struct ExpandedPiece {
    pub id: String,
    pub original_id: String,
    pub copy_number: u32,
    pub orientations: Vec<Orientation>,
}

impl ExpandedPiece {
    /// Area of the piece's canonical (first) orientation, used only for
    /// the largest-first sort (§4.3, step 5); all orientations of one
    /// piece have the same area since rotation preserves area.
    pub fn area(&self) -> f64 {
        self.orientations.first().map(|o| o.area).unwrap_or(0.0)
    }
}

/// A piece that was placed into a bin: its final absolute polygon and the
/// pose that produced it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlacedPiece {
    pub id: String,
    pub original_id: String,
    pub copy_number: u32,
    pub points: Vec<crate::geom::Point>,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub area: f64,
}

impl PlacedPiece {
    pub fn polygon(&self) -> Polygon {
        Polygon::from_valid(self.points.clone())
    }
}

/// A piece that could not be placed in the bin it was attempted against.
/// Carries the same identifying metadata as a `PlacedPiece` but no pose.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UnplacedPiece {
    pub id: String,
    pub original_id: String,
    pub copy_number: u32,
    pub points: Vec<crate::geom::Point>,
    pub area: f64,
}
