use tracing::debug;

use crate::physics::*;
use crate::types::*;

/// Core deterministic transition function, in place.
///
/// Sub-step order:
///  1. Pick the active player's input (the other input is ignored)
///  2. Aiming: adjust angle/power, fire if requested (no shot in flight only)
///  3. Integrate the shot, including one fired this tick
///  4. Collision checks: terrain, players, side bounds, ceiling
///  5. On hit: clear the shot, pass the turn, maybe redraw wind
///  6. Advance tick
pub fn simulate_mut(arena: &Arena<'_>, state: &mut GameState, inputs: &[Input; 2]) {
    // 1. Active player
    let active = state.active_player();
    let input = inputs[active];

    // 2. Aiming + firing
    if state.projectile.is_none() {
        let aimed = apply_aim(&state.players[active], &input);
        state.players[active] = aimed;
        if input.fire {
            let shot = launch(&aimed, active, arena.trig);
            debug!(
                tick = state.tick,
                player = active,
                vx = shot.vx.raw(),
                vy = shot.vy.raw(),
                "shot fired"
            );
            state.projectile = Some(shot);
        }
    }

    // 3. Integrate
    if let Some(proj) = state.projectile {
        let moved = integrate(&proj, state.wind);

        // 4. Collisions
        let impact = resolve_impact(&moved, &mut state.players, arena.terrain);

        // 5. Resolve turn
        if impact.hit() {
            state.projectile = None;
            state.current_turn ^= 1;
            if arena.rules.variable_wind {
                let (wind, next) = roll_wind(state.rng_state, arena.rules.max_wind);
                state.wind = wind;
                state.rng_state = next;
                debug!(tick = state.tick, wind = %wind, "wind shifted");
            }
            debug!(
                tick = state.tick,
                terrain = impact.terrain,
                hit_p0 = impact.players[0],
                hit_p1 = impact.players[1],
                out_of_bounds = impact.out_of_bounds,
                ceiling = impact.ceiling,
                next_turn = state.current_turn,
                "shot resolved"
            );
        } else {
            state.projectile = Some(moved);
        }
    }

    // 6. Advance tick
    state.tick += 1;
}

/// Convenience wrapper that returns a new state.
pub fn simulate(arena: &Arena<'_>, prev: &GameState, inputs: &[Input; 2]) -> GameState {
    let mut s = *prev;
    simulate_mut(arena, &mut s, inputs);
    s
}
