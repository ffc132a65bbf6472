//! The multi-bin scheduler (L3, §4.4): repeatedly packs a fresh bin from
//! whatever remains, stopping when a bin places nothing or `max_bins` is
//! reached.

use std::time::Instant;

use crate::options::NestOptions;
use crate::pack;
use crate::piece::{Piece, PlacedPiece, UnplacedPiece};

/// One bin's worth of placement (§4.4, "Output").
#[derive(Clone, Debug)]
pub struct BinResult {
    pub bin_id: u32,
    pub bin_width: f64,
    pub bin_height: f64,
    pub placed: Vec<PlacedPiece>,
    pub unplaced: Vec<UnplacedPiece>,
    pub material_efficiency: f64,
    pub execution_time_secs: f64,
}

impl BinResult {
    pub fn total_pieces(&self) -> usize {
        self.placed.len()
    }
}

/// Aggregate statistics across every bin a schedule produced (§4.4).
#[derive(Clone, Debug, Default)]
pub struct Summary {
    pub total_bins: usize,
    pub total_pieces_placed: usize,
    pub total_pieces_unplaced: usize,
    pub average_efficiency: f64,
    pub total_execution_time_secs: f64,
    pub bin_efficiencies: Vec<f64>,
}

/// The full multi-bin schedule (§4.4).
#[derive(Clone, Debug, Default)]
pub struct ScheduleResult {
    pub bins: Vec<BinResult>,
    pub summary: Summary,
}

fn efficiency(placed: &[PlacedPiece], bin_area: f64) -> f64 {
    if bin_area <= 0.0 {
        return 0.0;
    }
    let used: f64 = placed.iter().map(|p| p.area).sum();
    100.0 * used / bin_area
}

/// Converts leftover original-piece quantities straight into `UnplacedPiece`
/// records, for the case where leftovers never get a packing attempt
/// (the `max_bins` cap). Uses each piece's raw polygon with no margin or
/// rotation applied, since no bin attempt assigned it a pose.
fn pieces_to_unplaced(pieces: &[Piece]) -> Vec<UnplacedPiece> {
    let mut out = Vec::new();
    for piece in pieces {
        for copy in 1..=piece.quantity {
            out.push(UnplacedPiece {
                id: format!("{}_{copy}", piece.id),
                original_id: piece.id.clone(),
                copy_number: copy,
                points: piece.polygon.points.clone(),
                area: crate::geom::area(&piece.polygon),
            });
        }
    }
    out
}

/// Regroups an L2 pack's leftover copies back into whole `Piece`s the next
/// bin attempt can re-expand from scratch (§4.4, step 2, mirrors the
/// reference scheduler's piece-group reconstruction). Each piece's
/// geometry is looked up from the original request list, not from the
/// (already rotation-adjusted) unplaced polygon, so the next bin
/// re-derives orientation fresh.
fn regroup_remaining(original_pieces: &[Piece], unplaced: &[UnplacedPiece]) -> Vec<Piece> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: std::collections::HashMap<String, u32> = std::collections::HashMap::new();
    for u in unplaced {
        if !counts.contains_key(&u.original_id) {
            order.push(u.original_id.clone());
        }
        *counts.entry(u.original_id.clone()).or_insert(0) += 1;
    }
    order
        .into_iter()
        .filter_map(|id| {
            let quantity = *counts.get(&id)?;
            original_pieces
                .iter()
                .find(|p| p.id == id)
                .map(|p| Piece {
                    id: p.id.clone(),
                    polygon: p.polygon.clone(),
                    quantity,
                })
        })
        .collect()
}

/// Records pieces that could not be placed anywhere. If a bin already
/// exists, they join its `unplaced` list (mirroring the reference
/// scheduler's spill-to-last-bin behavior); if none exists yet, a
/// placeholder bin with no placed pieces is created to carry them, since
/// the response schema has nowhere else to report an unplaced piece and
/// the conservation invariant (§8) requires every expanded piece to be
/// accounted for somewhere.
fn record_unplaceable(
    bins: &mut Vec<BinResult>,
    next_bin_id: u32,
    bin_width: f64,
    bin_height: f64,
    unplaced: Vec<UnplacedPiece>,
    execution_time_secs: f64,
) {
    if unplaced.is_empty() {
        return;
    }
    match bins.last_mut() {
        Some(last) => last.unplaced.extend(unplaced),
        None => bins.push(BinResult {
            bin_id: next_bin_id,
            bin_width,
            bin_height,
            placed: Vec::new(),
            unplaced,
            material_efficiency: 0.0,
            execution_time_secs,
        }),
    }
}

fn summarize(bins: &[BinResult]) -> Summary {
    if bins.is_empty() {
        return Summary::default();
    }
    let total_pieces_placed = bins.iter().map(|b| b.total_pieces()).sum();
    let total_pieces_unplaced = bins.iter().map(|b| b.unplaced.len()).sum();
    let total_execution_time_secs = bins.iter().map(|b| b.execution_time_secs).sum();
    let average_efficiency =
        bins.iter().map(|b| b.material_efficiency).sum::<f64>() / bins.len() as f64;
    Summary {
        total_bins: bins.len(),
        total_pieces_placed,
        total_pieces_unplaced,
        average_efficiency,
        total_execution_time_secs,
        bin_efficiencies: bins.iter().map(|b| b.material_efficiency).collect(),
    }
}

/// Runs the multi-bin schedule (§4.4): packs bin 1 from `pieces`, then
/// keeps opening fresh bins from whatever the previous bin left unplaced
/// until either nothing remains, a bin places nothing, or `max_bins` is
/// reached.
pub fn run(pieces: &[Piece], bin_width: f64, bin_height: f64, opts: &NestOptions) -> ScheduleResult {
    let bin_area = bin_width * bin_height;
    let mut remaining = pieces.to_vec();
    let mut bins: Vec<BinResult> = Vec::new();
    let mut bin_id: u32 = 1;

    loop {
        if remaining.is_empty() {
            break;
        }
        if let Some(max_bins) = opts.max_bins {
            if bin_id > max_bins {
                record_unplaceable(&mut bins, bin_id, bin_width, bin_height, pieces_to_unplaced(&remaining), 0.0);
                break;
            }
        }

        let start = Instant::now();
        let result = pack::pack(&remaining, bin_width, bin_height, opts);
        let elapsed = start.elapsed().as_secs_f64();

        if result.placed.is_empty() {
            record_unplaceable(&mut bins, bin_id, bin_width, bin_height, result.unplaced, elapsed);
            break;
        }

        let eff = efficiency(&result.placed, bin_area);
        bins.push(BinResult {
            bin_id,
            bin_width,
            bin_height,
            placed: result.placed,
            unplaced: Vec::new(),
            material_efficiency: eff,
            execution_time_secs: elapsed,
        });

        remaining = regroup_remaining(pieces, &result.unplaced);
        bin_id += 1;
    }

    let summary = summarize(&bins);
    ScheduleResult { bins, summary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;
    use crate::options::Strategy;

    fn square_piece(id: &str, side: f64, quantity: u32) -> Piece {
        Piece {
            id: id.to_string(),
            polygon: crate::geom::Polygon::new(vec![
                Point::new(0.0, 0.0),
                Point::new(side, 0.0),
                Point::new(side, side),
                Point::new(0.0, side),
            ])
            .unwrap(),
            quantity,
        }
    }

    #[test]
    fn single_bin_fits_everything() {
        let pieces = vec![square_piece("a", 5.0, 2)];
        let opts = NestOptions::default();
        let result = run(&pieces, 20.0, 20.0, &opts);
        assert_eq!(result.bins.len(), 1);
        assert_eq!(result.summary.total_pieces_placed, 2);
        assert_eq!(result.summary.total_pieces_unplaced, 0);
    }

    #[test]
    fn spillover_opens_a_second_bin() {
        // 10x10 squares, quantity 5, bin 20x10: two fit per bin without
        // rotation, so three bins are needed (2 + 2 + 1).
        let pieces = vec![square_piece("a", 10.0, 5)];
        let opts = NestOptions {
            allow_rotation: false,
            ..Default::default()
        };
        let result = run(&pieces, 20.0, 10.0, &opts);
        assert_eq!(result.bins.len(), 3);
        assert_eq!(result.bins[0].total_pieces(), 2);
        assert_eq!(result.bins[1].total_pieces(), 2);
        assert_eq!(result.bins[2].total_pieces(), 1);
        assert_eq!(result.summary.total_pieces_placed, 5);
    }

    #[test]
    fn max_bins_caps_the_loop_and_reports_leftovers_unplaced() {
        let pieces = vec![square_piece("a", 10.0, 5)];
        let opts = NestOptions {
            allow_rotation: false,
            max_bins: Some(1),
            ..Default::default()
        };
        let result = run(&pieces, 20.0, 10.0, &opts);
        assert_eq!(result.bins.len(), 1);
        assert_eq!(result.bins[0].total_pieces(), 2);
        assert_eq!(result.bins[0].unplaced.len(), 3);
        assert_eq!(result.summary.total_pieces_unplaced, 3);
    }

    #[test]
    fn globally_unplaceable_piece_is_reported_not_dropped() {
        let pieces = vec![square_piece("huge", 100.0, 1)];
        let opts = NestOptions::default();
        let result = run(&pieces, 10.0, 10.0, &opts);
        assert_eq!(result.bins.len(), 1);
        assert_eq!(result.bins[0].total_pieces(), 0);
        assert_eq!(result.bins[0].unplaced.len(), 1);
        assert_eq!(result.summary.total_pieces_unplaced, 1);
    }

    #[test]
    fn genetic_strategy_schedules_the_same_way_as_greedy() {
        let pieces = vec![square_piece("a", 10.0, 2)];
        let opts = NestOptions {
            strategy: Strategy::Genetic,
            allow_rotation: false,
            seed: 99,
            ..Default::default()
        };
        let result = run(&pieces, 20.0, 10.0, &opts);
        assert_eq!(result.bins.len(), 1);
        assert_eq!(result.summary.total_pieces_placed, 2);
    }
}
