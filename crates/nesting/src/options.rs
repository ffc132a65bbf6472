//! The options structure threaded from the request handler (L4) down
//! through the scheduler (L3) and packer (L2), the "dynamic configuration
//! object" replaced by an explicit, exhaustively-enumerated struct (§9).

use serde::{Deserialize, Serialize};

/// The packer's top-level strategy tag. `Genetic` is an L2/L3 concept only;
/// the oracle itself only knows `BottomLeft`/`BestFit`
/// ([`crate::oracle::OracleStrategy`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    BottomLeft,
    BestFit,
    Genetic,
}

/// Default RNG seed used when a request does not supply one (§6). Kept
/// fixed so unseeded requests remain deterministic, matching §8's
/// determinism property.
pub const DEFAULT_SEED: u64 = 0x4e45_5354_494e_4721; // "NESTING!" in ASCII hex, arbitrary but stable

pub const DEFAULT_ROTATION_ANGLES: [i32; 4] = [0, 90, 180, 270];

/// Every field the request schema (§6) recognizes, validated and
/// normalized once at L4.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NestOptions {
    pub strategy: Strategy,
    pub allow_rotation: bool,
    pub rotation_angles: Vec<i32>,
    pub margin: f64,
    pub max_bins: Option<u32>,
    pub seed: u64,
}

impl Default for NestOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::BottomLeft,
            allow_rotation: true,
            rotation_angles: DEFAULT_ROTATION_ANGLES.to_vec(),
            margin: 0.0,
            max_bins: None,
            seed: DEFAULT_SEED,
        }
    }
}
