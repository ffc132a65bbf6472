//! Demo harness for the nesting core (§4.7, §6): loads a piece list, runs
//! it through the same L4 validation routine the HTTP transport uses, then
//! invokes L3 directly, bypassing L4's response assembly and L5 entirely,
//! since this binary is a library consumer rather than a transport client.
//! Exit code 0 on success (including the "nothing fit" non-error outcome),
//! nonzero on a validation or internal-anomaly failure.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nesting::request::{NestRequest, PieceRequest, RawPoint};
use nesting::schedule::{self, ScheduleResult};
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "nesting-cli")]
#[command(about = "Demo harness for the 2D irregular-shape nesting core")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

/// Flags mirroring the `/nest` request options (§6), layered on top of
/// whatever a `--input` file or the built-in demo fixture already sets.
#[derive(clap::Args, Default)]
struct PackOpts {
    /// Path to a JSON file matching the `/nest` request schema. Without
    /// this, a small built-in demo fixture is used.
    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long)]
    bin_width: Option<f64>,
    #[arg(long)]
    bin_height: Option<f64>,
    /// `bottom_left` | `best_fit` | `genetic` | `genetic_algorithm`.
    #[arg(long)]
    strategy: Option<String>,
    #[arg(long)]
    allow_rotation: Option<bool>,
    /// Comma-separated rotation angles, e.g. `0,90,180,270`.
    #[arg(long, value_delimiter = ',')]
    rotation_angles: Option<Vec<i32>>,
    #[arg(long)]
    margin: Option<f64>,
    #[arg(long)]
    max_bins: Option<u32>,
    #[arg(long)]
    seed: Option<u64>,

    /// Print the full summary as JSON instead of a human-readable report.
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Action {
    /// Pack a request and print a summary.
    Pack(PackOpts),
    /// Validate a request file without packing it.
    Validate {
        #[arg(long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Pack(opts) => pack(opts),
        Action::Validate { input } => validate(input),
    }
}

/// Three staggered rectangles on a 40x30 bin, small enough to print, large
/// enough to exercise spillover across a couple of orientations.
fn demo_request() -> NestRequest {
    let rect = |w: f64, h: f64| {
        vec![
            RawPoint::Coords([0.0, 0.0]),
            RawPoint::Coords([w, 0.0]),
            RawPoint::Coords([w, h]),
            RawPoint::Coords([0.0, h]),
        ]
    };
    NestRequest {
        pieces: vec![
            PieceRequest {
                id: "plate_a".to_string(),
                points: rect(10.0, 10.0),
                quantity: 4,
            },
            PieceRequest {
                id: "plate_b".to_string(),
                points: rect(15.0, 5.0),
                quantity: 2,
            },
        ],
        bin_width: 40.0,
        bin_height: 30.0,
        strategy: Some("bottom_left".to_string()),
        allow_rotation: true,
        rotation_angles: None,
        rotation_step: None,
        margin: 0.0,
        max_bins: None,
        seed: None,
    }
}

fn load_request(input: &Option<PathBuf>) -> Result<NestRequest> {
    match input {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
        }
        None => Ok(demo_request()),
    }
}

/// Overlays any flags the caller actually passed onto the loaded request.
fn apply_overrides(mut req: NestRequest, opts: &PackOpts) -> NestRequest {
    if let Some(w) = opts.bin_width {
        req.bin_width = w;
    }
    if let Some(h) = opts.bin_height {
        req.bin_height = h;
    }
    if opts.strategy.is_some() {
        req.strategy = opts.strategy.clone();
    }
    if let Some(allow) = opts.allow_rotation {
        req.allow_rotation = allow;
    }
    if opts.rotation_angles.is_some() {
        req.rotation_angles = opts.rotation_angles.clone();
    }
    if let Some(margin) = opts.margin {
        req.margin = margin;
    }
    if opts.max_bins.is_some() {
        req.max_bins = opts.max_bins;
    }
    if opts.seed.is_some() {
        req.seed = opts.seed;
    }
    req
}

fn print_summary(result: &ScheduleResult) {
    if result.bins.is_empty() {
        println!("no piece could be placed in the given bin");
    }
    for bin in &result.bins {
        println!(
            "bin {}: {}/{} placed, {} unplaced, {:.1}% efficient ({:.3}s)",
            bin.bin_id,
            bin.placed.len(),
            bin.total_pieces(),
            bin.unplaced.len(),
            bin.material_efficiency,
            bin.execution_time_secs,
        );
    }
    println!(
        "total: {} bins, {} placed, {} unplaced, {:.1}% average efficiency",
        result.summary.total_bins,
        result.summary.total_pieces_placed,
        result.summary.total_pieces_unplaced,
        result.summary.average_efficiency,
    );
}

fn pack(opts: PackOpts) -> Result<()> {
    let input_desc = opts
        .input
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<built-in demo fixture>".to_string());
    let req = apply_overrides(load_request(&opts.input)?, &opts);
    tracing::info!(input = %input_desc, pieces = req.pieces.len(), "pack");

    let (pieces, bin_width, bin_height, nest_opts) = match nesting::request::validate(&req) {
        Ok(v) => v,
        Err(err) => {
            tracing::error!(error = %err, "request rejected");
            anyhow::bail!(err);
        }
    };

    let result = schedule::run(&pieces, bin_width, bin_height, &nest_opts);

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&schedule_result_json(&result))?);
        return Ok(());
    }

    print_summary(&result);
    Ok(())
}

/// A small serializable view of a [`ScheduleResult`] for `--json` output.
/// Kept local to the CLI rather than added to the core's public surface,
/// since the core's own wire type lives at L4 (`NestResponse`) and this
/// binary deliberately bypasses L4 to call L3 directly.
fn schedule_result_json(result: &ScheduleResult) -> serde_json::Value {
    serde_json::json!({
        "bins": result.bins.iter().map(|b| serde_json::json!({
            "bin_id": b.bin_id,
            "bin_width": b.bin_width,
            "bin_height": b.bin_height,
            "placed_pieces": b.placed,
            "unplaced_pieces": b.unplaced,
            "material_efficiency": b.material_efficiency,
            "execution_time": b.execution_time_secs,
            "total_pieces": b.total_pieces(),
        })).collect::<Vec<_>>(),
        "summary": {
            "total_bins": result.summary.total_bins,
            "total_pieces_placed": result.summary.total_pieces_placed,
            "total_pieces_unplaced": result.summary.total_pieces_unplaced,
            "average_efficiency": result.summary.average_efficiency,
            "total_execution_time": result.summary.total_execution_time_secs,
            "bin_efficiencies": result.summary.bin_efficiencies,
        },
    })
}

fn validate(input: PathBuf) -> Result<()> {
    let req = load_request(&Some(input))?;
    match nesting::request::validate(&req) {
        Ok((pieces, bin_width, bin_height, opts)) => {
            println!(
                "ok: {} pieces, bin {}x{}, strategy {:?}, rotation {}",
                pieces.len(),
                bin_width,
                bin_height,
                opts.strategy,
                opts.allow_rotation,
            );
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "request is invalid");
            anyhow::bail!(err);
        }
    }
}
