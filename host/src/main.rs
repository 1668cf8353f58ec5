//! Replay host: re-simulates recorded matches and compares peers.
//!
//! Usage:
//!   cargo run -p artillery-host -- replay replay.json [--every 60] [--json]
//!   cargo run -p artillery-host -- diff left.json right.json [--every 60]
//!   cat replay.json | cargo run -p artillery-host -- replay -

use std::io::Read;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use artillery_core::view::terrain_profile_f64;
use artillery_core::{
    first_divergence, run_replay, state_hash, Outcome, Replay, ReplayOutcome, StateView, Terrain,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

const DEFAULT_CHECKPOINT_EVERY: u64 = 60;

#[derive(Parser)]
#[command(name = "artillery-host")]
#[command(about = "Re-simulate recorded artillery matches and check peers for desync")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay one match and print its checkpoints
    Replay {
        /// Replay JSON file, or `-` for stdin
        file: String,
        /// Ticks between checkpoints
        #[arg(long, default_value_t = DEFAULT_CHECKPOINT_EVERY)]
        every: u64,
        /// Print the final state as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Replay two recordings and report the first tick they disagree
    Diff {
        left: String,
        right: String,
        #[arg(long, default_value_t = DEFAULT_CHECKPOINT_EVERY)]
        every: u64,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FinalDump {
    state: StateView,
    terrain: Vec<f64>,
    transcript_hash: String,
    seed_commit: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let result = match args.command {
        Command::Replay { file, every, json } => cmd_replay(&file, every, json),
        Command::Diff { left, right, every } => cmd_diff(&left, &right, every),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn load_replay(path: &str) -> Result<Replay> {
    let json = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read replay from stdin")?;
        buf
    } else {
        std::fs::read_to_string(Path::new(path))
            .with_context(|| format!("failed to read {path}"))?
    };
    serde_json::from_str(&json).with_context(|| format!("failed to parse replay JSON from {path}"))
}

fn simulate_file(path: &str, every: u64) -> Result<(Replay, ReplayOutcome)> {
    let replay = load_replay(path)?;
    let start = Instant::now();
    let outcome = run_replay(&replay, every).with_context(|| format!("failed to replay {path}"))?;
    info!(
        file = path,
        ticks = replay.transcript.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "replayed"
    );
    Ok((replay, outcome))
}

fn cmd_replay(path: &str, every: u64, json: bool) -> Result<ExitCode> {
    let (replay, outcome) = simulate_file(path, every)?;
    let state = &outcome.final_state;

    if json {
        let terrain = Terrain::from_profile(&replay.config.terrain)?;
        let dump = FinalDump {
            state: StateView::from_state(state),
            terrain: terrain_profile_f64(&terrain),
            transcript_hash: hex::encode(outcome.transcript_hash),
            seed_commit: hex::encode(outcome.seed_commit),
        };
        println!("{}", serde_json::to_string_pretty(&dump)?);
        return Ok(ExitCode::SUCCESS);
    }

    for cp in &outcome.checkpoints {
        println!("  tick {:>6}  0x{:08x}", cp.tick, cp.checksum);
    }
    println!();
    println!("=== REPLAY RESULT ===");
    println!("  Seed:            0x{:08x}", replay.config.seed);
    println!("  Ticks:           {}", state.tick);
    match state.outcome() {
        Outcome::InProgress => println!("  Outcome:         in progress"),
        Outcome::Winner(id) => println!("  Outcome:         player {id} wins"),
        Outcome::Draw => println!("  Outcome:         draw"),
    }
    if let Some(tick) = outcome.decided_at {
        println!("  Decided at:      {tick}");
    }
    println!(
        "  Health:          P0={} P1={}",
        state.players[0].health, state.players[1].health
    );
    println!("  State hash:      {}", hex::encode(state_hash(state)));
    println!("  Transcript hash: {}", hex::encode(outcome.transcript_hash));
    println!("  Seed commit:     {}", hex::encode(outcome.seed_commit));
    Ok(ExitCode::SUCCESS)
}

fn cmd_diff(left: &str, right: &str, every: u64) -> Result<ExitCode> {
    let (left_replay, a) = simulate_file(left, every)?;
    let (right_replay, b) = simulate_file(right, every)?;

    if left_replay.config != right_replay.config {
        warn!("match configs differ; divergence from tick 0 is expected");
    }

    match first_divergence(&a.checkpoints, &b.checkpoints) {
        None => {
            println!(
                "in sync through tick {} (0x{:08x})",
                a.final_state.tick,
                a.checkpoints.last().map_or(0, |cp| cp.checksum)
            );
            Ok(ExitCode::SUCCESS)
        }
        Some(d) => {
            let show = |c: Option<u32>| c.map_or_else(|| "missing".to_string(), |c| format!("0x{c:08x}"));
            println!("DESYNC at tick {}", d.tick);
            println!("  {left}: {}", show(d.left));
            println!("  {right}: {}", show(d.right));
            if every > 1 {
                let narrowed = narrow(&left_replay, &right_replay, d.tick.saturating_sub(every))?;
                println!("  first differing tick: {narrowed}");
            }
            Ok(ExitCode::from(2))
        }
    }
}

/// Re-run both sides with a checkpoint every tick to pin down the exact tick.
fn narrow(left: &Replay, right: &Replay, from: u64) -> Result<u64> {
    let a = run_replay(left, 1)?;
    let b = run_replay(right, 1)?;
    let tail = |o: &ReplayOutcome| -> Vec<_> { o.checkpoints.iter().copied().filter(|cp| cp.tick >= from).collect() };
    match first_divergence(&tail(&a), &tail(&b)) {
        Some(d) => Ok(d.tick),
        None => bail!("per-tick replay found no divergence after tick {from}"),
    }
}
