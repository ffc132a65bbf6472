//! Genetic-algorithm search over piece order and orientation (§4.3b).
//!
//! An individual is a permutation of piece indices (`order`) plus one
//! chosen orientation index per piece, addressed by piece index rather
//! than by permutation position, so crossover only has to recombine the
//! permutation; orientation choices travel with their piece. Fitness is
//! the material efficiency of the greedy placement produced by running
//! that order/orientation choice through [`super::pack_fixed_orientation`].
//!
//! The whole run is driven by a single seeded `StdRng`; no other source of
//! randomness is consulted, so a fixed seed reproduces a fixed output
//! (§5, §8 determinism).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{pack_fixed_orientation, PackResult};
use crate::piece::ExpandedPiece;

const GENERATIONS: usize = 100;
const MUTATION_RATE: f64 = 0.1;
const TOURNAMENT_SIZE: usize = 3;

#[derive(Clone, Debug)]
struct Individual {
    order: Vec<usize>,
    orientation_idx: Vec<usize>,
    fitness: f64,
}

fn population_size(n: usize) -> usize {
    (2 * n).clamp(1, 50)
}

fn swap_two(order: &mut [usize], rng: &mut StdRng) {
    if order.len() < 2 {
        return;
    }
    let i = rng.gen_range(0..order.len());
    let j = rng.gen_range(0..order.len());
    order.swap(i, j);
}

fn rerandomize_orientation(ind: &mut Individual, pieces: &[ExpandedPiece], rng: &mut StdRng) {
    if pieces.is_empty() {
        return;
    }
    let idx = rng.gen_range(0..pieces.len());
    let count = pieces[idx].orientations.len().max(1);
    ind.orientation_idx[idx] = rng.gen_range(0..count);
}

/// Mutates `ind` with probability [`MUTATION_RATE`], choosing uniformly
/// among swap-positions, rerandomize-one-orientation, or both (§4.3b).
fn mutate(ind: &Individual, pieces: &[ExpandedPiece], rng: &mut StdRng) -> Individual {
    let mut out = ind.clone();
    if rng.gen::<f64>() < MUTATION_RATE {
        match rng.gen_range(0..3u8) {
            0 => swap_two(&mut out.order, rng),
            1 => rerandomize_orientation(&mut out, pieces, rng),
            _ => {
                swap_two(&mut out.order, rng);
                rerandomize_orientation(&mut out, pieces, rng);
            }
        }
    }
    out.fitness = f64::MIN;
    out
}

/// One-point crossover on the permutation, deduplicated against the donor
/// preserving first occurrence, so the result is always a valid
/// permutation (§4.3b).
fn one_point_merge(head: &[usize], donor: &[usize]) -> Vec<usize> {
    let mut out = head.to_vec();
    for &gene in donor {
        if !out.contains(&gene) {
            out.push(gene);
        }
    }
    out
}

fn crossover(p1: &Individual, p2: &Individual, rng: &mut StdRng) -> (Individual, Individual) {
    let n = p1.order.len();
    if n < 2 {
        return (p1.clone(), p2.clone());
    }
    let cut = rng.gen_range(1..n);
    let c1_order = one_point_merge(&p1.order[..cut], &p2.order);
    let c2_order = one_point_merge(&p2.order[..cut], &p1.order);
    (
        Individual {
            order: c1_order,
            orientation_idx: p1.orientation_idx.clone(),
            fitness: f64::MIN,
        },
        Individual {
            order: c2_order,
            orientation_idx: p2.orientation_idx.clone(),
            fitness: f64::MIN,
        },
    )
}

fn tournament_select<'a>(population: &'a [Individual], rng: &mut StdRng) -> &'a Individual {
    let mut best = &population[rng.gen_range(0..population.len())];
    for _ in 1..TOURNAMENT_SIZE {
        let candidate = &population[rng.gen_range(0..population.len())];
        if candidate.fitness > best.fitness {
            best = candidate;
        }
    }
    best
}

fn evaluate(
    ind: &Individual,
    pieces: &[ExpandedPiece],
    bin_width: f64,
    bin_height: f64,
    bin_area: f64,
    margin: f64,
) -> (f64, PackResult) {
    let ordered: Vec<(&ExpandedPiece, usize)> = ind
        .order
        .iter()
        .map(|&i| (&pieces[i], ind.orientation_idx[i]))
        .collect();
    let result = pack_fixed_orientation(&ordered, bin_width, bin_height, margin);
    let placed_area: f64 = result.placed.iter().map(|p| p.area).sum();
    let fitness = if bin_area <= 0.0 { 0.0 } else { 100.0 * placed_area / bin_area };
    (fitness, result)
}

/// Runs the genetic search and returns the best individual's placement
/// (§4.3b). `pieces` is expected pre-sorted largest-first, same as the
/// greedy path, so the base individual's identity order already carries
/// the decrease-first heuristic.
pub fn pack_genetic(
    pieces: &[ExpandedPiece],
    bin_width: f64,
    bin_height: f64,
    seed: u64,
    margin: f64,
) -> PackResult {
    let n = pieces.len();
    if n == 0 {
        return PackResult::default();
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let pop_size = population_size(n);
    let bin_area = bin_width * bin_height;

    let base = Individual {
        order: (0..n).collect(),
        orientation_idx: vec![0; n],
        fitness: f64::MIN,
    };
    let mut population = vec![base.clone()];
    while population.len() < pop_size {
        population.push(mutate(&base, pieces, &mut rng));
    }

    let mut best_result = PackResult::default();
    let mut best_fitness = f64::MIN;
    for ind in &mut population {
        let (fitness, result) = evaluate(ind, pieces, bin_width, bin_height, bin_area, margin);
        ind.fitness = fitness;
        if fitness > best_fitness {
            best_fitness = fitness;
            best_result = result;
        }
    }

    for _generation in 0..GENERATIONS {
        let mut next_gen = Vec::with_capacity(pop_size);
        while next_gen.len() < pop_size {
            let p1 = tournament_select(&population, &mut rng);
            let p2 = tournament_select(&population, &mut rng);
            let (c1, c2) = crossover(p1, p2, &mut rng);
            next_gen.push(mutate(&c1, pieces, &mut rng));
            if next_gen.len() < pop_size {
                next_gen.push(mutate(&c2, pieces, &mut rng));
            }
        }
        for ind in &mut next_gen {
            let (fitness, result) = evaluate(ind, pieces, bin_width, bin_height, bin_area, margin);
            ind.fitness = fitness;
            if fitness > best_fitness {
                best_fitness = fitness;
                best_result = result;
            }
        }
        population = next_gen;
    }

    best_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;
    use crate::options::NestOptions;
    use crate::pack::expand_pieces;
    use crate::piece::Piece;

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
    fn genetic_search_is_deterministic_for_a_fixed_seed() {
        let pieces = vec![square_piece("sq", 10.0, 4)];
        let opts = NestOptions {
            strategy: crate::options::Strategy::Genetic,
            seed: 42,
            ..Default::default()
        };
        let expanded = super::super::sort_by_area_desc(expand_pieces(&pieces, &opts));
        let a = pack_genetic(&expanded, 25.0, 25.0, 42, 0.0);
        let b = pack_genetic(&expanded, 25.0, 25.0, 42, 0.0);
        assert_eq!(a.placed.len(), b.placed.len());
        for (pa, pb) in a.placed.iter().zip(b.placed.iter()) {
            assert_eq!(pa.id, pb.id);
            assert!((pa.x - pb.x).abs() < 1e-9);
            assert!((pa.y - pb.y).abs() < 1e-9);
        }
    }

    #[test]
    fn genetic_search_places_pieces_that_fit() {
        let pieces = vec![square_piece("sq", 10.0, 2)];
        let opts = NestOptions {
            strategy: crate::options::Strategy::Genetic,
            seed: 7,
            ..Default::default()
        };
        let expanded = super::super::sort_by_area_desc(expand_pieces(&pieces, &opts));
        let result = pack_genetic(&expanded, 20.0, 10.0, 7, 0.0);
        assert_eq!(result.placed.len(), 2);
        assert!(result.unplaced.is_empty());
    }
}
