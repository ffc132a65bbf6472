//! Point-in-polygon and polygon–polygon intersection (§4.1).
//!
//! Intersection uses the Separating Axis Theorem: a bounding-box fast
//! reject, then projection onto every edge normal of both polygons. Exact
//! for convex polygons; for concave polygons this can report "not
//! overlapping" for some genuinely overlapping inputs (accepted limitation,
//! see DESIGN.md). Touching-but-not-overlapping (shared edge or vertex
//! only) is treated as non-overlap; intervals are compared with open
//! interiors via `eps`.

use super::ops::bbox;
use super::types::{GeomCfg, Point, Polygon};

/// Ray-cast even-odd point-in-polygon test.
pub fn point_in_polygon(point: Point, poly: &Polygon) -> bool {
    let n = poly.points.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    for (a, b) in poly.edges() {
        let crosses_y = (a.y > point.y) != (b.y > point.y);
        if crosses_y {
            let x_at_y = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < x_at_y {
                inside = !inside;
            }
        }
    }
    inside
}

fn edge_normals(poly: &Polygon) -> Vec<(f64, f64)> {
    poly.edges()
        .map(|(a, b)| {
            let dx = b.x - a.x;
            let dy = b.y - a.y;
            let len = (dx * dx + dy * dy).sqrt();
            if len < 1e-12 {
                (0.0, 0.0)
            } else {
                (-dy / len, dx / len)
            }
        })
        .filter(|(nx, ny)| *nx != 0.0 || *ny != 0.0)
        .collect()
}

fn project(poly: &Polygon, axis: (f64, f64)) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for p in &poly.points {
        let d = p.x * axis.0 + p.y * axis.1;
        min = min.min(d);
        max = max.max(d);
    }
    (min, max)
}

fn bboxes_overlap(a: &Polygon, b: &Polygon, eps: f64) -> bool {
    let (amin_x, amin_y, amax_x, amax_y) = bbox(a);
    let (bmin_x, bmin_y, bmax_x, bmax_y) = bbox(b);
    amin_x < bmax_x - eps
        && bmin_x < amax_x - eps
        && amin_y < bmax_y - eps
        && bmin_y < amax_y - eps
}

/// Tests whether two polygons' interiors overlap (SAT).
pub fn polygons_intersect(a: &Polygon, b: &Polygon) -> bool {
    polygons_intersect_eps(a, b, GeomCfg::default().eps)
}

/// Same as [`polygons_intersect`] with an explicit tolerance for the
/// touching-boundary treatment.
pub fn polygons_intersect_eps(a: &Polygon, b: &Polygon, eps: f64) -> bool {
    if a.len() < 3 || b.len() < 3 {
        return false;
    }
    if !bboxes_overlap(a, b, eps) {
        return false;
    }
    let mut axes = edge_normals(a);
    axes.extend(edge_normals(b));
    for axis in axes {
        let (amin, amax) = project(a, axis);
        let (bmin, bmax) = project(b, axis);
        // Open-interval separation: touching-only (interval boundaries
        // coincide within eps) does not count as separated.
        if amax <= bmin + eps || bmax <= amin + eps {
            return false;
        }
    }
    true
}
