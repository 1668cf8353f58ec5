use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::constants::WIND_LIMIT;
use crate::error::ReplayError;
use crate::fixed::FixedPoint;
use crate::hash::{checksum, hash_seed, hash_transcript};
use crate::init::create_initial_state;
use crate::step::simulate_mut;
use crate::terrain::Terrain;
use crate::trig::TrigTable;
use crate::types::*;

/// A recorded match: everything needed to rebuild every tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Replay {
    pub config: MatchConfig,
    /// One entry per tick. Each entry is [player0_input, player1_input].
    pub transcript: Vec<[Input; 2]>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub tick: Tick,
    pub checksum: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReplayOutcome {
    pub final_state: GameState,
    /// Tick 0, every `checkpoint_every` ticks, and the final tick.
    pub checkpoints: Vec<Checkpoint>,
    /// First tick at which one player was left standing (or neither).
    pub decided_at: Option<Tick>,
    pub transcript_hash: [u8; 32],
    pub seed_commit: [u8; 32],
}

/// Rebuild the match from its config and apply every recorded tick.
pub fn run_replay(replay: &Replay, checkpoint_every: u64) -> Result<ReplayOutcome, ReplayError> {
    if checkpoint_every == 0 {
        return Err(ReplayError::ZeroCheckpointInterval);
    }
    let max_wind = replay.config.rules.max_wind;
    if max_wind < FixedPoint::ZERO || max_wind > WIND_LIMIT {
        return Err(ReplayError::WindLimit { max_wind });
    }

    let terrain = Terrain::from_profile(&replay.config.terrain)?;
    let arena = Arena::new(&terrain, TrigTable::shared(), replay.config.rules);
    let mut state = create_initial_state(&replay.config, &terrain);

    let mut checkpoints = vec![Checkpoint { tick: state.tick, checksum: checksum(&state) }];
    let mut decided_at = None;

    for tick_inputs in &replay.transcript {
        simulate_mut(&arena, &mut state, tick_inputs);

        if decided_at.is_none() && state.outcome() != Outcome::InProgress {
            decided_at = Some(state.tick);
        }
        if state.tick % checkpoint_every == 0 {
            let cp = Checkpoint { tick: state.tick, checksum: checksum(&state) };
            trace!(tick = cp.tick, checksum = cp.checksum, "checkpoint");
            checkpoints.push(cp);
        }
    }

    if checkpoints.last().map(|cp| cp.tick) != Some(state.tick) {
        checkpoints.push(Checkpoint { tick: state.tick, checksum: checksum(&state) });
    }

    Ok(ReplayOutcome {
        final_state: state,
        checkpoints,
        decided_at,
        transcript_hash: hash_transcript(&replay.transcript),
        seed_commit: hash_seed(replay.config.seed),
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Divergence {
    pub tick: Tick,
    pub left: Option<u32>,
    pub right: Option<u32>,
}

/// First checkpoint where two peers disagree. Checkpoints are compared by
/// tick; a tick only one side recorded counts as a divergence.
pub fn first_divergence(left: &[Checkpoint], right: &[Checkpoint]) -> Option<Divergence> {
    let (mut i, mut j) = (0, 0);
    while i < left.len() || j < right.len() {
        match (left.get(i), right.get(j)) {
            (Some(l), Some(r)) if l.tick == r.tick => {
                if l.checksum != r.checksum {
                    return Some(Divergence { tick: l.tick, left: Some(l.checksum), right: Some(r.checksum) });
                }
                i += 1;
                j += 1;
            }
            (Some(l), Some(r)) if l.tick < r.tick => {
                return Some(Divergence { tick: l.tick, left: Some(l.checksum), right: None });
            }
            (Some(_), Some(r)) => {
                return Some(Divergence { tick: r.tick, left: None, right: Some(r.checksum) });
            }
            (Some(l), None) => {
                return Some(Divergence { tick: l.tick, left: Some(l.checksum), right: None });
            }
            (None, Some(r)) => {
                return Some(Divergence { tick: r.tick, left: None, right: Some(r.checksum) });
            }
            (None, None) => break,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::default_config;

    fn duel(ticks: usize) -> Replay {
        let mut transcript = vec![[NULL_INPUT; 2]; ticks];
        for (t, inputs) in transcript.iter_mut().enumerate() {
            // Both players hammer fire; only the active one's counts.
            let fire = t % 7 == 0;
            inputs[0] = Input { angle_delta: 0, power_delta: 1, fire };
            inputs[1] = Input { angle_delta: -1, power_delta: 0, fire };
        }
        Replay { config: default_config(42), transcript }
    }

    #[test]
    fn replay_is_reproducible() {
        let replay = duel(600);
        let a = run_replay(&replay, 50).unwrap();
        let b = run_replay(&replay, 50).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.final_state.tick, 600);
        assert_eq!(a.checkpoints.first().unwrap().tick, 0);
        assert_eq!(a.checkpoints.last().unwrap().tick, 600);
        assert_eq!(a.checkpoints.len(), 13);
        assert_eq!(first_divergence(&a.checkpoints, &b.checkpoints), None);
    }

    #[test]
    fn final_checkpoint_added_off_interval() {
        let out = run_replay(&duel(105), 50).unwrap();
        let ticks: Vec<Tick> = out.checkpoints.iter().map(|c| c.tick).collect();
        assert_eq!(ticks, vec![0, 50, 100, 105]);
    }

    #[test]
    fn zero_interval_rejected() {
        assert_eq!(run_replay(&duel(10), 0), Err(ReplayError::ZeroCheckpointInterval));
    }

    #[test]
    fn bad_terrain_rejected() {
        let mut replay = duel(10);
        replay.config.terrain.hills[0].half_width = -1;
        assert!(matches!(run_replay(&replay, 10), Err(ReplayError::Terrain(_))));
    }

    #[test]
    fn out_of_range_wind_limit_rejected() {
        let mut replay = duel(10);
        replay.config.rules.variable_wind = true;
        for max_wind in [-FixedPoint::ONE, WIND_LIMIT + FixedPoint::from_raw(1), FixedPoint::from_raw(i64::MAX)] {
            replay.config.rules.max_wind = max_wind;
            assert_eq!(run_replay(&replay, 5), Err(ReplayError::WindLimit { max_wind }));
        }
        replay.config.rules.max_wind = WIND_LIMIT;
        assert!(run_replay(&replay, 5).is_ok());
    }

    #[test]
    fn divergent_input_detected() {
        let left = duel(400);
        let mut right = left.clone();
        right.transcript[0][0].power_delta = 0;
        let a = run_replay(&left, 10).unwrap();
        let b = run_replay(&right, 10).unwrap();
        let d = first_divergence(&a.checkpoints, &b.checkpoints).expect("should diverge");
        assert_eq!(d.tick, 10);
        assert_ne!(a.transcript_hash, b.transcript_hash);
        assert_eq!(a.seed_commit, b.seed_commit);
    }

    #[test]
    fn divergence_on_missing_checkpoint() {
        let a = [Checkpoint { tick: 0, checksum: 1 }, Checkpoint { tick: 10, checksum: 2 }];
        let b = [Checkpoint { tick: 0, checksum: 1 }];
        assert_eq!(
            first_divergence(&a, &b),
            Some(Divergence { tick: 10, left: Some(2), right: None })
        );
        assert_eq!(first_divergence(&a[..1], &b), None);
    }

    #[test]
    fn replay_json_roundtrip() {
        let replay = duel(20);
        let json = serde_json::to_string(&replay).unwrap();
        let back: Replay = serde_json::from_str(&json).unwrap();
        assert_eq!(back, replay);
    }
}
