//! Basic 2D types and tolerances shared by the geometry kernel.
//!
//! - `GeomCfg`: centralizes the numeric tolerances used for equality and
//!   containment checks throughout the kernel.
//! - `Point`: a plain `(x, y)` pair; serializes as `{x, y}` to match the
//!   request/response schema (§6).
//! - `Polygon`: an ordered, simple ring of points. The closing edge from the
//!   last point back to the first is implicit.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Numeric tolerances used across the kernel (§4.6, §4.8: tolerance is 1e-6).
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    pub eps: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self { eps: 1e-6 }
    }
}

/// A point in the plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    #[inline]
    pub fn from_vector(v: Vector2<f64>) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// A simple, non-self-intersecting closed ring of at least 3 points.
///
/// Invariant maintained by constructors: no two consecutive vertices are
/// duplicates (within `GeomCfg::default().eps`). Orientation is not
/// normalized by the type itself; callers that need a canonical
/// counterclockwise ring call [`crate::geom::ops::ensure_ccw`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<Point>,
}

impl Polygon {
    /// Builds a polygon from points, dropping consecutive duplicates.
    ///
    /// Returns `None` if fewer than 3 distinct points remain.
    pub fn new(points: Vec<Point>) -> Option<Self> {
        let eps = GeomCfg::default().eps;
        let mut deduped: Vec<Point> = Vec::with_capacity(points.len());
        for p in points {
            if let Some(last) = deduped.last() {
                if (last.x - p.x).abs() < eps && (last.y - p.y).abs() < eps {
                    continue;
                }
            }
            deduped.push(p);
        }
        while deduped.len() > 2 {
            let first = deduped[0];
            let last = *deduped.last().unwrap();
            if (first.x - last.x).abs() < eps && (first.y - last.y).abs() < eps {
                deduped.pop();
            } else {
                break;
            }
        }
        if deduped.len() < 3 {
            return None;
        }
        Some(Self { points: deduped })
    }

    /// Builds a polygon without validation; used internally once a caller
    /// already knows the invariant holds (e.g. the output of a kernel op
    /// applied to an already-valid polygon).
    pub(crate) fn from_valid(points: Vec<Point>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Edge `(points[i], points[(i+1) % n])` for every `i`, including the
    /// implicit closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

/// The four counterclockwise corners of an axis-aligned rectangle.
pub fn rectangle(origin: Point, width: f64, height: f64) -> Polygon {
    Polygon::from_valid(vec![
        origin,
        Point::new(origin.x + width, origin.y),
        Point::new(origin.x + width, origin.y + height),
        Point::new(origin.x, origin.y + height),
    ])
}
