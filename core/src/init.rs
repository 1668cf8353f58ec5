use crate::constants::*;
use crate::fixed::FixedPoint;
use crate::terrain::{Terrain, TerrainProfile};
use crate::types::*;

/// Both cannons start at the same angle; player 1's shots are mirrored so
/// they face each other.
fn spawn(x: i32, terrain: &Terrain) -> Player {
    let x = FixedPoint::from_int(x);
    Player::new(x, terrain.height_at(x), DEFAULT_ANGLE, DEFAULT_POWER)
}

/// Create the initial game state from a match config. Player 0 opens.
pub fn create_initial_state(config: &MatchConfig, terrain: &Terrain) -> GameState {
    GameState {
        tick: 0,
        current_turn: 0,
        wind: config.wind,
        players: [spawn(PLAYER_0_SPAWN_X, terrain), spawn(PLAYER_1_SPAWN_X, terrain)],
        projectile: None,
        rng_state: config.seed,
    }
}

/// Default match config: calm wind, default terrain, fixed-wind rules.
pub fn default_config(seed: Seed) -> MatchConfig {
    MatchConfig {
        seed,
        wind: FixedPoint::ZERO,
        terrain: TerrainProfile::default(),
        rules: Rules::default(),
    }
}
