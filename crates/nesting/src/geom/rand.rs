//! Deterministic random polygon sampling, used by property tests.
//!
//! Mirrors the radial-jitter-then-hull approach: sample `n` angles around a
//! circle with bounded jitter, turn the resulting points into a convex
//! polygon via [`crate::geom::hull::convex_hull`]. A `(seed, index)` replay
//! token is mixed into a single `StdRng` so draws are reproducible and
//! independently indexable.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::hull::convex_hull;
use super::types::Point;
use super::types::Polygon;

/// Replay token: `(seed, index)` mixed via a SplitMix64-style step into a
/// single `StdRng` seed, so distinct indices under the same seed draw
/// independent but reproducible polygons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    fn to_std_rng(self) -> StdRng {
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draws a random convex polygon with `n` vertices (`n >= 3`) and the given
/// base radius, via radial jitter + convex hull. Returns `None` if the hull
/// degenerates (should not happen for `n >= 3` and reasonable jitter).
pub fn draw_convex_polygon(n: usize, base_radius: f64, tok: ReplayToken) -> Option<Polygon> {
    let n = n.max(3);
    let mut rng = tok.to_std_rng();
    let delta = 2.0 * std::f64::consts::PI / (n as f64);
    let phase = rng.gen::<f64>() * 2.0 * std::f64::consts::PI;
    let points: Vec<Point> = (0..n)
        .map(|k| {
            let angle_jitter = (rng.gen::<f64>() * 2.0 - 1.0) * 0.3 * delta;
            let radial_jitter = 1.0 + (rng.gen::<f64>() * 2.0 - 1.0) * 0.25;
            let angle = phase + (k as f64) * delta + angle_jitter;
            let r = base_radius.max(1e-9) * radial_jitter;
            let v = Vector2::new(angle.cos() * r, angle.sin() * r);
            Point::from_vector(v)
        })
        .collect();
    let hull = convex_hull(&points);
    if hull.len() < 3 {
        None
    } else {
        Some(Polygon::from_valid(hull))
    }
}
