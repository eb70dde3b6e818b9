//! Holdplanner -- best dice to hold for a single re-roll.
//!
//! Reads a hand from `--hand` or rolls random hands, then prints the hold
//! with the highest expected upper-section score. Logging goes to stderr and
//! is controlled by `RUST_LOG`.

use std::io::{self, BufWriter, Write};
use std::process;

use clap::Parser;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use holdplanner::dice::{format_faces, parse_faces, Face};
use holdplanner::{Hand, PlanError, Planner, PlannerConfig, StrategyResult};

/// Computes the hold that maximizes expected score after one re-roll.
#[derive(Debug, Parser)]
#[command(name = "holdplanner", version, about)]
struct Cli {
    /// Hand to plan, e.g. "1,1,1,5,6". Rolls random hands when omitted.
    #[arg(long, value_name = "FACES")]
    hand: Option<String>,

    /// Sides on each die.
    #[arg(long, default_value_t = 6)]
    sides: u32,

    /// Dice per rolled hand (ignored with --hand).
    #[arg(long, default_value_t = 5)]
    dice: usize,

    /// Number of random hands to roll (ignored with --hand).
    #[arg(long, default_value_t = 1)]
    rounds: usize,

    /// Worker threads for the hold search.
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Random seed, 0 for entropy.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Also list the N best holds.
    #[arg(long, value_name = "N")]
    top: Option<usize>,

    /// Print one JSON object per hand instead of text.
    #[arg(long)]
    json: bool,

    /// Disable the expected-value cache.
    #[arg(long)]
    no_cache: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One planned hand as emitted by `--json`.
#[derive(Serialize)]
struct PlanRecord<'a> {
    hand: &'a [Face],
    hold: &'a [Face],
    expected_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    ranked: Option<&'a [StrategyResult]>,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let faces = match &cli.hand {
        Some(s) => Some(parse_faces(s).map_err(PlanError::from)?),
        None => None,
    };
    let config = PlannerConfig {
        num_sides: cli.sides,
        num_dice: faces.as_ref().map_or(cli.dice, Vec::len),
        threads: cli.threads,
        seed: cli.seed,
        cache: !cli.no_cache,
        ..PlannerConfig::default()
    };
    let mut planner = Planner::new(config)?;

    let output = Output {
        json: cli.json,
        top: cli.top,
    };
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match faces {
        Some(faces) => {
            let hand = planner.hand_from(faces)?;
            report(&planner, &hand, &output, &mut out)?;
        }
        None => {
            for _ in 0..cli.rounds {
                let hand = planner.roll_hand()?;
                report(&planner, &hand, &output, &mut out)?;
            }
        }
    }

    out.flush()?;
    debug!(stats = ?planner.cache_stats(), "expected value cache");
    Ok(())
}

/// Rendering options shared by every reported hand.
struct Output {
    json: bool,
    top: Option<usize>,
}

fn report<W: Write>(
    planner: &Planner,
    hand: &Hand,
    output: &Output,
    out: &mut W,
) -> Result<(), CliError> {
    let best = planner.plan(hand)?;
    let ranked = match output.top {
        Some(n) => {
            let mut all = planner.rank(hand)?;
            all.truncate(n);
            Some(all)
        }
        None => None,
    };

    if output.json {
        let record = PlanRecord {
            hand: hand.faces(),
            hold: &best.hold,
            expected_score: best.expected_score,
            ranked: ranked.as_deref(),
        };
        serde_json::to_writer(&mut *out, &record)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "You rolled: {}", hand)?;
    writeln!(
        out,
        "Best strategy for hand {} is to hold {} with expected score {:.4}",
        hand,
        format_faces(&best.hold),
        best.expected_score
    )?;
    if let Some(ranked) = ranked {
        for (i, entry) in ranked.iter().enumerate() {
            writeln!(
                out,
                "  {}. hold {} -> {:.4}",
                i + 1,
                format_faces(&entry.hold),
                entry.expected_score
            )?;
        }
    }
    Ok(())
}
