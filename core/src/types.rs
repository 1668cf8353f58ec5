use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_WIND, MAX_HEALTH};
use crate::fixed::FixedPoint;
use crate::terrain::{Terrain, TerrainProfile};
use crate::trig::TrigTable;

pub type PlayerId = usize;
pub type Tick = u64;
pub type Seed = u32;

// ── Input ───────────────────────────────────────────────────

/// One player's intent for one tick. Deltas are step counts, scaled by
/// `ANGLE_SPEED` / `POWER_SPEED` when applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Input {
    pub angle_delta: i8,
    pub power_delta: i8,
    pub fire: bool,
}

pub const NULL_INPUT: Input = Input {
    angle_delta: 0,
    power_delta: 0,
    fire: false,
};

// ── Player ──────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub x: FixedPoint,
    pub y: FixedPoint,
    /// Radians in [0, pi]. Player 1 mirrors the horizontal launch component.
    pub angle: FixedPoint,
    /// [0, 100]
    pub power: FixedPoint,
    pub health: i32,
    pub alive: bool,
}

impl Player {
    pub fn new(x: FixedPoint, y: FixedPoint, angle: FixedPoint, power: FixedPoint) -> Self {
        Player {
            x,
            y,
            angle,
            power,
            health: MAX_HEALTH,
            alive: true,
        }
    }
}

// ── Projectile ──────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Projectile {
    pub x: FixedPoint,
    pub y: FixedPoint,
    pub vx: FixedPoint,
    pub vy: FixedPoint,
}

// ── Game State ──────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    pub tick: Tick,
    /// Active player, 0 or 1.
    pub current_turn: u8,
    pub wind: FixedPoint,
    pub players: [Player; 2],
    /// Present only while a shot is in flight.
    pub projectile: Option<Projectile>,
    /// Source for non-position randomness (wind shifts). Never reseeded from
    /// the system.
    pub rng_state: Seed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Winner(PlayerId),
    Draw,
}

impl GameState {
    #[inline]
    pub fn active_player(&self) -> PlayerId {
        (self.current_turn & 1) as PlayerId
    }

    #[inline]
    pub fn in_flight(&self) -> bool {
        self.projectile.is_some()
    }

    pub fn outcome(&self) -> Outcome {
        match (self.players[0].alive, self.players[1].alive) {
            (true, true) => Outcome::InProgress,
            (true, false) => Outcome::Winner(0),
            (false, true) => Outcome::Winner(1),
            (false, false) => Outcome::Draw,
        }
    }
}

// ── Rules ───────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    /// Redraw wind from `rng_state` every time the turn passes.
    pub variable_wind: bool,
    pub max_wind: FixedPoint,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            variable_wind: false,
            max_wind: DEFAULT_MAX_WIND,
        }
    }
}

// ── Arena ───────────────────────────────────────────────────

/// Read-only collaborators of a tick: the match terrain, the trig tables and
/// the match rules. Shared freely between independent simulations.
#[derive(Clone, Copy, Debug)]
pub struct Arena<'a> {
    pub terrain: &'a Terrain,
    pub trig: &'a TrigTable,
    pub rules: Rules,
}

impl<'a> Arena<'a> {
    pub fn new(terrain: &'a Terrain, trig: &'a TrigTable, rules: Rules) -> Self {
        Arena { terrain, trig, rules }
    }
}

// ── Config ──────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub seed: Seed,
    /// Starting wind.
    pub wind: FixedPoint,
    pub terrain: TerrainProfile,
    #[serde(default)]
    pub rules: Rules,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        let p = Player::new(FixedPoint::ZERO, FixedPoint::ZERO, FixedPoint::ZERO, FixedPoint::ZERO);
        GameState {
            tick: 0,
            current_turn: 1,
            wind: FixedPoint::ZERO,
            players: [p, p],
            projectile: None,
            rng_state: 0,
        }
    }

    #[test]
    fn outcome_follows_alive_flags() {
        let mut s = state();
        assert_eq!(s.outcome(), Outcome::InProgress);
        assert_eq!(s.active_player(), 1);
        assert!(!s.in_flight());

        s.players[0].alive = false;
        assert_eq!(s.outcome(), Outcome::Winner(1));
        s.players[1].alive = false;
        assert_eq!(s.outcome(), Outcome::Draw);
        s.players[0].alive = true;
        assert_eq!(s.outcome(), Outcome::Winner(0));
    }
}
