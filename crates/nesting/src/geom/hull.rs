//! Convex hull via Graham scan (§4.1).
//!
//! Anchor is the lowest, then leftmost, point. Remaining points are sorted
//! by polar angle around the anchor; a left-turning stack sweep (cross
//! product sign) then peels off points that would make a right turn or go
//! straight. Output is counterclockwise, without a closing duplicate.

use super::types::Point;

#[inline]
fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Computes the convex hull of a point set. Returns an empty vec if fewer
/// than 3 distinct points are given (total function, §4.1).
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    if points.len() < 3 {
        return Vec::new();
    }

    let anchor_idx = points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            (a.y, a.x)
                .partial_cmp(&(b.y, b.x))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
        .unwrap();
    let anchor = points[anchor_idx];

    let mut rest: Vec<Point> = points
        .iter()
        .copied()
        .enumerate()
        .filter(|(i, _)| *i != anchor_idx)
        .map(|(_, p)| p)
        .collect();

    rest.sort_by(|a, b| {
        let angle_a = (a.y - anchor.y).atan2(a.x - anchor.x);
        let angle_b = (b.y - anchor.y).atan2(b.x - anchor.x);
        match angle_a.partial_cmp(&angle_b).unwrap_or(std::cmp::Ordering::Equal) {
            std::cmp::Ordering::Equal => {
                let da = (a.x - anchor.x).powi(2) + (a.y - anchor.y).powi(2);
                let db = (b.x - anchor.x).powi(2) + (b.y - anchor.y).powi(2);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            }
            o => o,
        }
    });

    let mut stack: Vec<Point> = vec![anchor];
    for p in rest {
        while stack.len() >= 2 && cross(stack[stack.len() - 2], stack[stack.len() - 1], p) <= 0.0 {
            stack.pop();
        }
        stack.push(p);
    }

    if stack.len() < 3 {
        return Vec::new();
    }
    stack
}
