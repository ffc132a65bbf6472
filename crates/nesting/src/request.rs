//! The request handler (L4, §4.5, §6): validates a wire-level request,
//! converts it to internal types, runs the scheduler, and assembles the
//! wire-level response.

use serde::{Deserialize, Serialize};

use crate::error::{NestingError, Result};
use crate::geom::Point;
use crate::options::{NestOptions, Strategy, DEFAULT_ROTATION_ANGLES, DEFAULT_SEED};
use crate::piece::Piece;
use crate::schedule::{self, BinResult, Summary};

/// A point as the wire format allows it: either `{x, y}` or `[x, y]` (§6).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawPoint {
    Coords([f64; 2]),
    Object { x: f64, y: f64 },
}

impl RawPoint {
    fn into_point(self) -> Point {
        match self {
            RawPoint::Coords([x, y]) => Point::new(x, y),
            RawPoint::Object { x, y } => Point::new(x, y),
        }
    }
}

fn default_quantity() -> u32 {
    1
}

/// One entry of the request's `pieces` array (§6).
#[derive(Debug, Clone, Deserialize)]
pub struct PieceRequest {
    pub id: String,
    pub points: Vec<RawPoint>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_allow_rotation() -> bool {
    true
}

/// The `/nest` request body (§6). Field names match the documented schema,
/// including the two historical aliases (`algorithm` for `strategy`,
/// `rotation_step` as an alternative to `rotation_angles`).
#[derive(Debug, Clone, Deserialize)]
pub struct NestRequest {
    pub pieces: Vec<PieceRequest>,
    pub bin_width: f64,
    pub bin_height: f64,
    #[serde(alias = "algorithm")]
    pub strategy: Option<String>,
    #[serde(default = "default_allow_rotation")]
    pub allow_rotation: bool,
    #[serde(default)]
    pub rotation_angles: Option<Vec<i32>>,
    #[serde(default)]
    pub rotation_step: Option<i32>,
    #[serde(default)]
    pub margin: f64,
    #[serde(default)]
    pub max_bins: Option<u32>,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn parse_strategy(raw: Option<&str>) -> Result<Strategy> {
    match raw.unwrap_or("bottom_left") {
        "bottom_left" => Ok(Strategy::BottomLeft),
        "best_fit" => Ok(Strategy::BestFit),
        "genetic" | "genetic_algorithm" => Ok(Strategy::Genetic),
        other => Err(NestingError::invalid(format!("unrecognized strategy '{other}'"))),
    }
}

fn resolve_rotation_angles(req: &NestRequest) -> Result<Vec<i32>> {
    if let Some(angles) = &req.rotation_angles {
        for &a in angles {
            if !(0..360).contains(&a) {
                return Err(NestingError::invalid(format!(
                    "rotation angle {a} out of range [0, 360)"
                )));
            }
        }
        return Ok(angles.clone());
    }
    if let Some(step) = req.rotation_step {
        if step <= 0 || step >= 360 {
            return Err(NestingError::invalid(format!(
                "rotation_step {step} out of range (0, 360)"
            )));
        }
        let mut angles = Vec::new();
        let mut a = 0;
        while a < 360 {
            angles.push(a);
            a += step;
        }
        return Ok(angles);
    }
    Ok(DEFAULT_ROTATION_ANGLES.to_vec())
}

fn convert_piece(raw: &PieceRequest) -> Result<Piece> {
    if raw.points.len() < 3 {
        return Err(NestingError::invalid(format!(
            "piece '{}' has fewer than 3 points",
            raw.id
        )));
    }
    if raw.quantity < 1 {
        return Err(NestingError::invalid(format!(
            "piece '{}' has non-positive quantity",
            raw.id
        )));
    }
    let points: Vec<Point> = raw.points.iter().cloned().map(RawPoint::into_point).collect();
    let polygon = crate::geom::Polygon::new(points).ok_or_else(|| {
        NestingError::invalid(format!("piece '{}' is degenerate after deduplication", raw.id))
    })?;
    Ok(Piece {
        id: raw.id.clone(),
        polygon,
        quantity: raw.quantity,
    })
}

/// Validates `req` and converts it into the internal `(pieces, bin_width,
/// bin_height, options)` tuple L3 expects (§4.5). Shared by the HTTP
/// transport and the CLI harness so both layers enforce identical rules.
pub fn validate(req: &NestRequest) -> Result<(Vec<Piece>, f64, f64, NestOptions)> {
    if req.bin_width <= 0.0 || req.bin_height <= 0.0 {
        return Err(NestingError::invalid("bin dimensions must be positive"));
    }
    if req.pieces.is_empty() {
        return Err(NestingError::invalid("request has no pieces"));
    }

    let strategy = parse_strategy(req.strategy.as_deref())?;
    let rotation_angles = resolve_rotation_angles(req)?;
    if req.margin < 0.0 {
        return Err(NestingError::invalid("margin must be non-negative"));
    }

    let pieces = req
        .pieces
        .iter()
        .map(convert_piece)
        .collect::<Result<Vec<_>>>()?;

    let opts = NestOptions {
        strategy,
        allow_rotation: req.allow_rotation,
        rotation_angles,
        margin: req.margin,
        max_bins: req.max_bins,
        seed: req.seed.unwrap_or(DEFAULT_SEED),
    };

    Ok((pieces, req.bin_width, req.bin_height, opts))
}

/// A placed piece as it appears in the response (§6).
#[derive(Debug, Clone, Serialize)]
pub struct PlacedPieceResponse {
    pub id: String,
    pub original_id: String,
    pub points: Vec<Point>,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub area: f64,
}

/// An unplaced piece as it appears in the response (§6).
#[derive(Debug, Clone, Serialize)]
pub struct UnplacedPieceResponse {
    pub id: String,
    pub original_id: String,
    pub points: Vec<Point>,
    pub area: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BinResponse {
    pub bin_id: u32,
    pub bin_width: f64,
    pub bin_height: f64,
    pub placed_pieces: Vec<PlacedPieceResponse>,
    pub unplaced_pieces: Vec<UnplacedPieceResponse>,
    pub material_efficiency: f64,
    pub execution_time: f64,
    pub total_pieces: usize,
}

impl From<BinResult> for BinResponse {
    fn from(bin: BinResult) -> Self {
        Self {
            bin_id: bin.bin_id,
            bin_width: bin.bin_width,
            bin_height: bin.bin_height,
            total_pieces: bin.total_pieces(),
            material_efficiency: bin.material_efficiency,
            execution_time: bin.execution_time_secs,
            placed_pieces: bin
                .placed
                .into_iter()
                .map(|p| PlacedPieceResponse {
                    id: p.id,
                    original_id: p.original_id,
                    points: p.points,
                    x: p.x,
                    y: p.y,
                    rotation: p.rotation,
                    area: p.area,
                })
                .collect(),
            unplaced_pieces: bin
                .unplaced
                .into_iter()
                .map(|p| UnplacedPieceResponse {
                    id: p.id,
                    original_id: p.original_id,
                    points: p.points,
                    area: p.area,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryResponse {
    pub total_bins: usize,
    pub total_pieces_placed: usize,
    pub total_pieces_unplaced: usize,
    pub average_efficiency: f64,
    pub total_execution_time: f64,
    pub bin_efficiencies: Vec<f64>,
}

impl From<Summary> for SummaryResponse {
    fn from(s: Summary) -> Self {
        Self {
            total_bins: s.total_bins,
            total_pieces_placed: s.total_pieces_placed,
            total_pieces_unplaced: s.total_pieces_unplaced,
            average_efficiency: s.average_efficiency,
            total_execution_time: s.total_execution_time_secs,
            bin_efficiencies: s.bin_efficiencies,
        }
    }
}

/// The `/nest` response body (§6). `success` is `true` whenever the request
/// was well-formed, even if no piece fit anywhere (§7, "unsatisfiable
/// request" is not an error).
#[derive(Debug, Clone, Serialize)]
pub struct NestResponse {
    pub success: bool,
    pub bins: Vec<BinResponse>,
    pub summary: SummaryResponse,
    pub message: String,
}

/// The full L4 entry point: validate, schedule, assemble (§4.5).
pub fn handle(req: &NestRequest) -> Result<NestResponse> {
    let (pieces, bin_width, bin_height, opts) = validate(req)?;
    let result = schedule::run(&pieces, bin_width, bin_height, &opts);

    let message = if result.bins.is_empty() {
        "no piece could be placed in the given bin".to_string()
    } else if result.summary.total_pieces_unplaced > 0 {
        "placement completed with some pieces left unplaced".to_string()
    } else {
        "all pieces placed".to_string()
    };

    Ok(NestResponse {
        success: true,
        bins: result.bins.into_iter().map(BinResponse::from).collect(),
        summary: SummaryResponse::from(result.summary),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_piece_request(id: &str, side: f64, quantity: u32) -> PieceRequest {
        PieceRequest {
            id: id.to_string(),
            points: vec![
                RawPoint::Coords([0.0, 0.0]),
                RawPoint::Coords([side, 0.0]),
                RawPoint::Coords([side, side]),
                RawPoint::Coords([0.0, side]),
            ],
            quantity,
        }
    }

    #[test]
    fn rejects_a_piece_with_too_few_points() {
        let req = NestRequest {
            pieces: vec![PieceRequest {
                id: "bad".to_string(),
                points: vec![RawPoint::Coords([0.0, 0.0]), RawPoint::Coords([1.0, 1.0])],
                quantity: 1,
            }],
            bin_width: 10.0,
            bin_height: 10.0,
            strategy: None,
            allow_rotation: true,
            rotation_angles: None,
            rotation_step: None,
            margin: 0.0,
            max_bins: None,
            seed: None,
        };
        let err = validate(&req).unwrap_err();
        assert!(err.is_client_error());
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn rejects_non_positive_bin_dimensions() {
        let req = NestRequest {
            pieces: vec![square_piece_request("a", 5.0, 1)],
            bin_width: 0.0,
            bin_height: 10.0,
            strategy: None,
            allow_rotation: true,
            rotation_angles: None,
            rotation_step: None,
            margin: 0.0,
            max_bins: None,
            seed: None,
        };
        assert!(validate(&req).unwrap_err().is_client_error());
    }

    #[test]
    fn accepts_the_algorithm_alias_for_strategy() {
        let mut req = NestRequest {
            pieces: vec![square_piece_request("a", 5.0, 1)],
            bin_width: 10.0,
            bin_height: 10.0,
            strategy: Some("genetic_algorithm".to_string()),
            allow_rotation: true,
            rotation_angles: None,
            rotation_step: None,
            margin: 0.0,
            max_bins: None,
            seed: Some(1),
        };
        let (_, _, _, opts) = validate(&req).unwrap();
        assert_eq!(opts.strategy, Strategy::Genetic);

        req.strategy = Some("not_a_strategy".to_string());
        assert!(validate(&req).unwrap_err().is_client_error());
    }

    #[test]
    fn rotation_step_expands_into_rotation_angles() {
        let req = NestRequest {
            pieces: vec![square_piece_request("a", 5.0, 1)],
            bin_width: 10.0,
            bin_height: 10.0,
            strategy: None,
            allow_rotation: true,
            rotation_angles: None,
            rotation_step: Some(90),
            margin: 0.0,
            max_bins: None,
            seed: None,
        };
        let (_, _, _, opts) = validate(&req).unwrap();
        assert_eq!(opts.rotation_angles, vec![0, 90, 180, 270]);
    }

    #[test]
    fn end_to_end_single_rectangle_matches_scenario_one() {
        let req = NestRequest {
            pieces: vec![square_piece_request("rect", 10.0, 1)],
            bin_width: 20.0,
            bin_height: 20.0,
            strategy: Some("bottom_left".to_string()),
            allow_rotation: true,
            rotation_angles: None,
            rotation_step: None,
            margin: 0.0,
            max_bins: None,
            seed: None,
        };
        let response = handle(&req).unwrap();
        assert!(response.success);
        assert_eq!(response.bins.len(), 1);
        assert_eq!(response.bins[0].placed_pieces.len(), 1);
        let placed = &response.bins[0].placed_pieces[0];
        assert_eq!((placed.x, placed.y), (0.0, 0.0));
        assert!((response.bins[0].material_efficiency - 25.0).abs() < 1e-6);
    }

    #[test]
    fn unsatisfiable_request_is_still_success() {
        let req = NestRequest {
            pieces: vec![square_piece_request("huge", 100.0, 1)],
            bin_width: 50.0,
            bin_height: 50.0,
            strategy: None,
            allow_rotation: true,
            rotation_angles: None,
            rotation_step: None,
            margin: 0.0,
            max_bins: None,
            seed: None,
        };
        let response = handle(&req).unwrap();
        assert!(response.success);
        assert_eq!(response.bins.len(), 1);
        assert_eq!(response.bins[0].placed_pieces.len(), 0);
        assert_eq!(response.summary.total_pieces_unplaced, 1);
    }
}
