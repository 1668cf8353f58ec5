//! Generates replay JSON files for the host.
//!
//! Usage:
//!   cargo run -p artillery-core --example gen-transcript -- [idle|duel|short] > replay.json

use artillery_core::*;

const MATCH_TICKS: usize = 3000;

fn main() {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "idle".to_string());

    let config = default_config(42);

    let transcript: Vec<[Input; 2]> = match mode.as_str() {
        "idle" => vec![[NULL_INPUT; 2]; MATCH_TICKS],
        "duel" => {
            // Each side walks its power up a little, then fires whenever it
            // is its turn. Inputs for the waiting side are ignored.
            let mut transcript = Vec::with_capacity(MATCH_TICKS);
            for tick in 0..MATCH_TICKS {
                let p0 = Input {
                    angle_delta: 0,
                    power_delta: if tick % 40 < 4 { 1 } else { 0 },
                    fire: tick % 40 == 5,
                };
                let p1 = Input {
                    angle_delta: if tick % 40 < 2 { 1 } else { 0 },
                    power_delta: 0,
                    fire: tick % 40 == 5,
                };
                transcript.push([p0, p1]);
            }
            transcript
        }
        "short" => vec![[NULL_INPUT; 2]; 100],
        _ => {
            eprintln!("Unknown mode: {}. Use 'idle', 'duel', or 'short'", mode);
            std::process::exit(1);
        }
    };

    let replay = Replay { config, transcript };

    // Verify by running the sim
    let outcome = match run_replay(&replay, 100) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("replay failed: {err}");
            std::process::exit(1);
        }
    };
    let state = &outcome.final_state;

    eprintln!("=== Sim result ({} mode) ===", mode);
    eprintln!("Final tick: {}", state.tick);
    eprintln!("Outcome: {:?} (decided at {:?})", state.outcome(), outcome.decided_at);
    eprintln!(
        "Health: P0={}, P1={}",
        state.players[0].health, state.players[1].health
    );
    eprintln!("Checksum: 0x{:08x}", checksum(state));

    match serde_json::to_string(&replay) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("serialize failed: {err}");
            std::process::exit(1);
        }
    }
}
