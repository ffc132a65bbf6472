//! Mitered polygon offset (buffering), used to add inter-piece margin
//! (§4.1, §4.3).
//!
//! Each vertex is pushed out along the angle bisector of its two incident
//! edge normals, scaled so both adjacent edges end up exactly `d` away from
//! their originals (standard mitered-join offset). Near-parallel adjacent
//! edges (bisector denominator close to zero) fall back to a non-mitered
//! average join so the offset vertex never explodes to infinity.

use super::ops::ensure_ccw;
use super::types::Point;
use super::types::Polygon;

const MITER_EPS: f64 = 1e-6;

fn outward_normal(a: Point, b: Point) -> (f64, f64) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len < 1e-12 {
        (0.0, 0.0)
    } else {
        (dy / len, -dx / len)
    }
}

/// Offsets a simple polygon outward (`d > 0`) or inward (`d < 0`) by `d`.
pub fn offset(poly: &Polygon, d: f64) -> Polygon {
    if poly.len() < 3 || d == 0.0 {
        return poly.clone();
    }
    let ccw = ensure_ccw(poly);
    let n = ccw.len();
    let normals: Vec<(f64, f64)> = ccw.edges().map(|(a, b)| outward_normal(a, b)).collect();

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let prev = normals[(i + n - 1) % n];
        let curr = normals[i];
        let v = ccw.points[i];
        let dot = prev.0 * curr.0 + prev.1 * curr.1;
        let denom = 1.0 + dot;
        let (ox, oy) = if denom.abs() < MITER_EPS {
            ((prev.0 + curr.0) * d * 0.5, (prev.1 + curr.1) * d * 0.5)
        } else {
            (d * (prev.0 + curr.0) / denom, d * (prev.1 + curr.1) / denom)
        };
        out.push(Point::new(v.x + ox, v.y + oy));
    }
    Polygon::from_valid(out)
}
