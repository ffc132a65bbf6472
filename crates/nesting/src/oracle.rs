//! The placement oracle (L1): "where can this oriented piece go?" (§4.2)
//!
//! Pure function of (container, already-placed polygons, candidate polygon,
//! strategy) → legal translation or `None`. Candidates are anchored to the
//! container corner and to the bounding boxes of already-placed pieces,
//! plus a coarse grid sweep over the remaining region: an approximation of
//! the no-fit polygon (§4.2, GLOSSARY) cheap enough to evaluate per
//! orientation per piece.

use crate::geom::{bbox, polygons_intersect_eps, translate, Polygon};

/// Oracle-level strategy tag (§4.2). The packer's top-level `Strategy` adds
/// `Genetic`, which is not meaningful at this layer: the genetic search
/// always drives the oracle with `BottomLeft` internally (§4.3b).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OracleStrategy {
    BottomLeft,
    BestFit,
}

const GRID_UNIT: f64 = 20.0;
const DEDUP_EPS: f64 = 1e-6;

/// Enumerates candidate anchor points (§4.2, points 1–3) for a piece with
/// normalized bounding box `(piece_width, piece_height)` inside a container
/// `bin_width x bin_height`, given the bounding boxes of already-placed
/// pieces.
fn candidate_anchors(
    bin_width: f64,
    bin_height: f64,
    piece_width: f64,
    piece_height: f64,
    placed_bboxes: &[(f64, f64, f64, f64)],
) -> Vec<(f64, f64)> {
    let mut anchors = vec![(0.0, 0.0)];

    for &(px_min, py_min, px_max, py_max) in placed_bboxes {
        anchors.push((px_max, py_min));
        anchors.push((px_max, 0.0));
        anchors.push((px_min, py_max));
        anchors.push((0.0, py_max));
    }

    let step_x = (piece_width / 4.0).max(GRID_UNIT);
    let step_y = (piece_height / 4.0).max(GRID_UNIT);
    if step_x > 0.0 && step_y > 0.0 {
        let mut y = 0.0;
        while y <= bin_height {
            let mut x = 0.0;
            while x <= bin_width {
                anchors.push((x, y));
                x += step_x;
            }
            y += step_y;
        }
    }

    anchors.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    });
    anchors.dedup_by(|a, b| (a.0 - b.0).abs() < DEDUP_EPS && (a.1 - b.1).abs() < DEDUP_EPS);
    anchors
}

/// Checks whether translating `candidate` (already normalized to the
/// origin) by `(ax, ay)` fits inside the container and avoids every
/// polygon in `placed`.
fn is_legal(
    candidate: &Polygon,
    ax: f64,
    ay: f64,
    bin_width: f64,
    bin_height: f64,
    placed: &[Polygon],
    eps: f64,
) -> Option<Polygon> {
    let moved = translate(candidate, ax, ay);
    let (min_x, min_y, max_x, max_y) = bbox(&moved);
    if min_x < -eps || min_y < -eps || max_x > bin_width + eps || max_y > bin_height + eps {
        return None;
    }
    for other in placed {
        if polygons_intersect_eps(&moved, other, eps) {
            return None;
        }
    }
    Some(moved)
}

/// Finds the best legal translation for `candidate` inside
/// `bin_width x bin_height` given the already-placed absolute polygons, or
/// `None` if no candidate anchor yields a legal placement.
pub fn place(
    candidate: &Polygon,
    bin_width: f64,
    bin_height: f64,
    placed: &[Polygon],
    strategy: OracleStrategy,
) -> Option<(f64, f64)> {
    let eps = 1e-6;
    let (_, _, pw, ph) = bbox(candidate);
    let placed_bboxes: Vec<_> = placed.iter().map(bbox).collect();
    let anchors = candidate_anchors(bin_width, bin_height, pw, ph, &placed_bboxes);

    let mut best: Option<(f64, f64)> = None;
    for (ax, ay) in anchors {
        if is_legal(candidate, ax, ay, bin_width, bin_height, placed, eps).is_none() {
            continue;
        }
        let better = match best {
            None => true,
            Some((bx, by)) => match strategy {
                // Minimize y first, then x (§4.2). `best_fit` currently
                // behaves identically to `bottom_left`; the contract
                // permits a later richer scorer.
                OracleStrategy::BottomLeft | OracleStrategy::BestFit => {
                    (ay, ax) < (by, bx)
                }
            },
        };
        if better {
            best = Some((ax, ay));
        }
    }
    best
}
