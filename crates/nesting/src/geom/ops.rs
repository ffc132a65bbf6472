//! Pure polygon operations: area, centroid, bounding box, rigid motions.
//!
//! Every function here is total: degenerate input (empty polygon, zero
//! area) yields a safe default rather than a panic (§4.1).

use nalgebra::{Matrix2, Vector2};

use super::types::{Point, Polygon};

/// Axis-aligned bounding box `(min_x, min_y, max_x, max_y)`.
pub fn bbox(poly: &Polygon) -> (f64, f64, f64, f64) {
    if poly.is_empty() {
        return (0.0, 0.0, 0.0, 0.0);
    }
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for p in &poly.points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    (min_x, min_y, max_x, max_y)
}

/// Signed area via the shoelace formula. Positive ⇒ counterclockwise,
/// negative ⇒ clockwise, zero ⇒ degenerate.
pub fn signed_area(poly: &Polygon) -> f64 {
    let n = poly.points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for (a, b) in poly.edges() {
        sum += a.x * b.y - b.x * a.y;
    }
    sum / 2.0
}

/// Unsigned area.
#[inline]
pub fn area(poly: &Polygon) -> f64 {
    signed_area(poly).abs()
}

/// Area-weighted centroid. Falls back to the vertex average for a
/// degenerate (zero-area) polygon.
pub fn centroid(poly: &Polygon) -> Point {
    let a = signed_area(poly);
    if poly.is_empty() {
        return Point::new(0.0, 0.0);
    }
    if a.abs() < 1e-12 {
        let n = poly.points.len() as f64;
        let sum = poly
            .points
            .iter()
            .fold(Vector2::zeros(), |acc, p| acc + p.to_vector());
        return Point::from_vector(sum / n);
    }
    let mut cx = 0.0;
    let mut cy = 0.0;
    for (p, q) in poly.edges() {
        let cross = p.x * q.y - q.x * p.y;
        cx += (p.x + q.x) * cross;
        cy += (p.y + q.y) * cross;
    }
    let factor = 1.0 / (6.0 * a);
    Point::new(cx * factor, cy * factor)
}

/// Translates every vertex by `(dx, dy)`.
pub fn translate(poly: &Polygon, dx: f64, dy: f64) -> Polygon {
    Polygon::from_valid(
        poly.points
            .iter()
            .map(|p| Point::new(p.x + dx, p.y + dy))
            .collect(),
    )
}

/// Rotates by `angle_deg` degrees around `origin` (default: the polygon's
/// own centroid via [`rotate_about_centroid`]).
pub fn rotate(poly: &Polygon, angle_deg: f64, origin: Point) -> Polygon {
    if poly.is_empty() {
        return poly.clone();
    }
    let theta = angle_deg.to_radians();
    let (sin, cos) = theta.sin_cos();
    let m = Matrix2::new(cos, -sin, sin, cos);
    let o = origin.to_vector();
    let points = poly
        .points
        .iter()
        .map(|p| Point::from_vector(m * (p.to_vector() - o) + o))
        .collect();
    Polygon::from_valid(points)
}

/// Rotates around the polygon's own centroid.
#[inline]
pub fn rotate_about_centroid(poly: &Polygon, angle_deg: f64) -> Polygon {
    rotate(poly, angle_deg, centroid(poly))
}

/// Translates so the bounding-box minimum corner sits at `(0, 0)`.
///
/// Idempotent: `normalize(normalize(p)) == normalize(p)` (§8).
pub fn normalize(poly: &Polygon) -> Polygon {
    let (min_x, min_y, _, _) = bbox(poly);
    translate(poly, -min_x, -min_y)
}

/// Ensures counterclockwise orientation, reversing the vertex order if the
/// polygon is currently clockwise. A degenerate (zero-area) polygon is
/// returned unchanged.
pub fn ensure_ccw(poly: &Polygon) -> Polygon {
    if signed_area(poly) < 0.0 {
        let mut points = poly.points.clone();
        points.reverse();
        Polygon::from_valid(points)
    } else {
        poly.clone()
    }
}
