//! Float projection of a state for renderers and JSON dumps.
//! One-way: nothing here is ever converted back into a `FixedPoint`.

use serde::Serialize;

use crate::hash::checksum;
use crate::terrain::Terrain;
use crate::types::{GameState, Outcome, Player, Projectile};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub x: f64,
    pub y: f64,
    pub angle: f64,
    pub power: f64,
    pub health: i32,
    pub alive: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectileView {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateView {
    pub tick: u64,
    pub current_turn: u8,
    pub wind: f64,
    pub players: [PlayerView; 2],
    pub projectile: Option<ProjectileView>,
    pub outcome: Outcome,
    pub checksum: u32,
}

impl From<&Player> for PlayerView {
    fn from(p: &Player) -> Self {
        PlayerView {
            x: p.x.to_f64(),
            y: p.y.to_f64(),
            angle: p.angle.to_f64(),
            power: p.power.to_f64(),
            health: p.health,
            alive: p.alive,
        }
    }
}

impl From<&Projectile> for ProjectileView {
    fn from(pj: &Projectile) -> Self {
        ProjectileView {
            x: pj.x.to_f64(),
            y: pj.y.to_f64(),
            vx: pj.vx.to_f64(),
            vy: pj.vy.to_f64(),
        }
    }
}

impl StateView {
    pub fn from_state(s: &GameState) -> Self {
        StateView {
            tick: s.tick,
            current_turn: s.current_turn,
            wind: s.wind.to_f64(),
            players: [PlayerView::from(&s.players[0]), PlayerView::from(&s.players[1])],
            projectile: s.projectile.as_ref().map(ProjectileView::from),
            outcome: s.outcome(),
            checksum: checksum(s),
        }
    }
}

/// Terrain heights as floats, one per column.
pub fn terrain_profile_f64(terrain: &Terrain) -> Vec<f64> {
    terrain.heights().iter().map(|h| h.to_f64()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::{create_initial_state, default_config};

    #[test]
    fn view_projects_values() {
        let terrain = Terrain::generate();
        let s = create_initial_state(&default_config(1), &terrain);
        let v = StateView::from_state(&s);
        assert_eq!(v.players[0].x, 100.0);
        assert_eq!(v.players[0].y, 100.0);
        assert_eq!(v.players[1].power, 50.0);
        assert!(v.projectile.is_none());
        assert_eq!(v.checksum, checksum(&s));

        let json = serde_json::to_value(&v).unwrap();
        assert!(json.get("currentTurn").is_some());
        assert_eq!(terrain_profile_f64(&terrain).len(), terrain.width());
    }
}
