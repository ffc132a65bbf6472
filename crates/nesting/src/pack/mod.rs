//! The single-bin packer (L2): orders pieces, picks a rotation per piece,
//! and drives the placement oracle (§4.3).

pub mod ga;

use std::cmp::Ordering;

use crate::geom::{area, normalize, offset, rotate_about_centroid, translate, Polygon};
use crate::oracle::{self, OracleStrategy};
use crate::options::{NestOptions, Strategy};
use crate::piece::{ExpandedPiece, Orientation, Piece, PlacedPiece, UnplacedPiece};

/// Output of a single-bin pack attempt (§4.3, "Output").
#[derive(Clone, Debug, Default)]
pub struct PackResult {
    pub placed: Vec<PlacedPiece>,
    pub unplaced: Vec<UnplacedPiece>,
}

fn allowed_angles(opts: &NestOptions) -> Vec<f64> {
    if !opts.allow_rotation {
        return vec![0.0];
    }
    if opts.rotation_angles.is_empty() {
        return vec![0.0, 90.0, 180.0, 270.0];
    }
    opts.rotation_angles.iter().map(|&a| a as f64).collect()
}

fn build_orientations(poly: &Polygon, angles: &[f64]) -> Vec<Orientation> {
    angles
        .iter()
        .map(|&angle| {
            let rotated = normalize(&rotate_about_centroid(poly, angle));
            let a = area(&rotated);
            Orientation {
                angle,
                polygon: rotated,
                area: a,
            }
        })
        .collect()
}

/// Normalizes and expands `pieces` into one [`ExpandedPiece`] per
/// requested copy (§4.3, steps 1, 3, 4). Margin (step 2) is not baked
/// into each piece's own outline here: growing every piece by the full
/// margin before packing would, for a piece as tall as the bin, push it
/// out of containment before it's ever placed (§8 scenario 6 requires
/// same-size pieces to still fit). Instead each placed piece's margin
/// clearance is applied once, after placement, to the collision copy the
/// oracle checks future candidates against (see `pack_greedy`); the piece
/// itself, and the bin it must fit inside, stay at their true size.
pub fn expand_pieces(pieces: &[Piece], opts: &NestOptions) -> Vec<ExpandedPiece> {
    let angles = allowed_angles(opts);
    let mut out = Vec::new();
    for piece in pieces {
        let normalized = normalize(&piece.polygon);
        let orientations = build_orientations(&normalized, &angles);
        for copy in 1..=piece.quantity {
            out.push(ExpandedPiece {
                id: format!("{}_{copy}", piece.id),
                original_id: piece.id.clone(),
                copy_number: copy,
                orientations: orientations.clone(),
            });
        }
    }
    out
}

/// Sorts largest-area-first (§4.3, step 5: decreasing-area heuristic).
pub fn sort_by_area_desc(mut pieces: Vec<ExpandedPiece>) -> Vec<ExpandedPiece> {
    pieces.sort_by(|a, b| {
        b.area()
            .partial_cmp(&a.area())
            .unwrap_or(Ordering::Equal)
    });
    pieces
}

/// Buffers a freshly placed piece's absolute polygon by `margin` so later
/// legality checks keep new candidates at least `margin` away from it.
/// `offset` works on the polygon's own coordinate frame, so no
/// renormalization is needed: the buffered copy sits exactly around the
/// piece where it was placed.
fn collision_copy(final_poly: &Polygon, margin: f64) -> Polygon {
    if margin > 0.0 {
        offset(final_poly, margin)
    } else {
        final_poly.clone()
    }
}

/// Greedy bottom-left-fill (§4.3a): for each piece in `pieces`' given
/// order, tries every orientation, scores each legal placement, and keeps
/// the lowest-scoring one. Deterministic given `pieces`' order.
pub fn pack_greedy(
    pieces: &[ExpandedPiece],
    bin_width: f64,
    bin_height: f64,
    oracle_strategy: OracleStrategy,
    margin: f64,
) -> PackResult {
    let mut collision_polys: Vec<Polygon> = Vec::new();
    let mut result = PackResult::default();

    for piece in pieces {
        let mut best: Option<(f64, f64, &Orientation, f64)> = None;
        for orientation in &piece.orientations {
            if let Some((x, y)) = oracle::place(
                &orientation.polygon,
                bin_width,
                bin_height,
                &collision_polys,
                oracle_strategy,
            ) {
                let score = match oracle_strategy {
                    OracleStrategy::BottomLeft => y + 0.1 * x,
                    OracleStrategy::BestFit => x + 0.1 * y,
                };
                let keep = match &best {
                    None => true,
                    Some((_, _, _, best_score)) => score < *best_score,
                };
                if keep {
                    best = Some((x, y, orientation, score));
                }
            }
        }

        match best {
            Some((x, y, orientation, _)) => {
                let final_poly = translate(&orientation.polygon, x, y);
                collision_polys.push(collision_copy(&final_poly, margin));
                result.placed.push(PlacedPiece {
                    id: piece.id.clone(),
                    original_id: piece.original_id.clone(),
                    copy_number: piece.copy_number,
                    points: final_poly.points,
                    x,
                    y,
                    rotation: orientation.angle,
                    area: orientation.area,
                });
            }
            None => {
                let fallback = piece.orientations.first();
                result.unplaced.push(UnplacedPiece {
                    id: piece.id.clone(),
                    original_id: piece.original_id.clone(),
                    copy_number: piece.copy_number,
                    points: fallback.map(|o| o.polygon.points.clone()).unwrap_or_default(),
                    area: fallback.map(|o| o.area).unwrap_or(0.0),
                });
            }
        }
    }

    result
}

/// Greedy placement using a single fixed orientation per piece (no
/// per-orientation scan). Used by the genetic algorithm (§4.3b) to
/// evaluate an individual whose orientation choice is already fixed.
pub(crate) fn pack_fixed_orientation(
    ordered: &[(&ExpandedPiece, usize)],
    bin_width: f64,
    bin_height: f64,
    margin: f64,
) -> PackResult {
    let mut collision_polys: Vec<Polygon> = Vec::new();
    let mut result = PackResult::default();

    for (piece, orientation_idx) in ordered {
        let orientation = &piece.orientations[(*orientation_idx).min(piece.orientations.len() - 1)];
        match oracle::place(
            &orientation.polygon,
            bin_width,
            bin_height,
            &collision_polys,
            OracleStrategy::BottomLeft,
        ) {
            Some((x, y)) => {
                let final_poly = translate(&orientation.polygon, x, y);
                collision_polys.push(collision_copy(&final_poly, margin));
                result.placed.push(PlacedPiece {
                    id: piece.id.clone(),
                    original_id: piece.original_id.clone(),
                    copy_number: piece.copy_number,
                    points: final_poly.points,
                    x,
                    y,
                    rotation: orientation.angle,
                    area: orientation.area,
                });
            }
            None => {
                result.unplaced.push(UnplacedPiece {
                    id: piece.id.clone(),
                    original_id: piece.original_id.clone(),
                    copy_number: piece.copy_number,
                    points: orientation.polygon.points.clone(),
                    area: orientation.area,
                });
            }
        }
    }

    result
}

/// The L2 entry point (§4.3): prepares `pieces`, then dispatches to the
/// greedy or genetic strategy.
pub fn pack(pieces: &[Piece], bin_width: f64, bin_height: f64, opts: &NestOptions) -> PackResult {
    let expanded = sort_by_area_desc(expand_pieces(pieces, opts));
    match opts.strategy {
        Strategy::BottomLeft => {
            pack_greedy(&expanded, bin_width, bin_height, OracleStrategy::BottomLeft, opts.margin)
        }
        Strategy::BestFit => {
            pack_greedy(&expanded, bin_width, bin_height, OracleStrategy::BestFit, opts.margin)
        }
        Strategy::Genetic => ga::pack_genetic(&expanded, bin_width, bin_height, opts.seed, opts.margin),
    }
}

#[cfg(test)]
mod tests;
