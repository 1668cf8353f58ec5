use crate::constants::*;
use crate::fixed::{FixedPoint, FRAC};
use crate::prng::prng_int_range;
use crate::terrain::Terrain;
use crate::trig::TrigTable;
use crate::types::*;

/// Nudge angle and power by the input's step counts, clamped to their ranges.
pub fn apply_aim(p: &Player, input: &Input) -> Player {
    let angle = p.angle + FixedPoint::from_int(input.angle_delta as i32) * ANGLE_SPEED;
    let power = p.power + FixedPoint::from_int(input.power_delta as i32) * POWER_SPEED;
    Player {
        angle: angle.clamp(MIN_ANGLE, MAX_ANGLE),
        power: power.clamp(MIN_POWER, MAX_POWER),
        ..*p
    }
}

/// Launch a shell from `p`. Player 1 faces left, so its horizontal component
/// is mirrored and equal angles fire toward each other.
pub fn launch(p: &Player, id: PlayerId, trig: &TrigTable) -> Projectile {
    let speed = p.power * SPEED_FACTOR;
    let mut vx = speed * trig.cos(p.angle);
    let vy = speed * trig.sin(p.angle);
    if id == 1 {
        vx = -vx;
    }
    Projectile {
        x: p.x,
        y: p.y + SPAWN_OFFSET_Y,
        vx,
        vy,
    }
}

/// Semi-implicit Euler: velocity first, then position.
pub fn integrate(proj: &Projectile, wind: FixedPoint) -> Projectile {
    let vy = proj.vy - GRAVITY;
    let vx = proj.vx + wind * WIND_FACTOR;
    Projectile {
        x: proj.x + vx,
        y: proj.y + vy,
        vx,
        vy,
    }
}

#[inline]
fn in_hit_box(proj: &Projectile, p: &Player) -> bool {
    (proj.x - p.x).abs() < HIT_BOX_HALF_WIDTH && (proj.y - p.y).abs() < HIT_BOX_HALF_HEIGHT
}

/// Which terminating conditions fired for one post-integration position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Impact {
    pub terrain: bool,
    pub players: [bool; 2],
    pub out_of_bounds: bool,
    pub ceiling: bool,
}

impl Impact {
    pub fn hit(&self) -> bool {
        self.terrain || self.players[0] || self.players[1] || self.out_of_bounds || self.ceiling
    }
}

/// Evaluate every termination check against the same position, in order:
/// terrain, player hit-boxes, horizontal bounds, ceiling. Damage is applied to
/// every living player inside the box even when another check also fired.
pub fn resolve_impact(proj: &Projectile, players: &mut [Player; 2], terrain: &Terrain) -> Impact {
    let mut impact = Impact::default();

    // (a) below ground
    if proj.y < terrain.height_at(proj.x) {
        impact.terrain = true;
    }

    // (b) player hit-boxes
    for (i, p) in players.iter_mut().enumerate() {
        if !p.alive || !in_hit_box(proj, p) {
            continue;
        }
        impact.players[i] = true;
        p.health -= HIT_DAMAGE;
        if p.health <= 0 {
            p.alive = false;
        }
    }

    // (c) left/right edges
    if proj.x < FixedPoint::ZERO || proj.x > FIELD_RIGHT {
        impact.out_of_bounds = true;
    }

    // (d) runaway climb
    if proj.y > CEILING {
        impact.ceiling = true;
    }

    impact
}

/// Draw a new wind in [-max_wind, max_wind], quantized to 1/WIND_STEPS_PER_UNIT.
pub fn roll_wind(rng_state: u32, max_wind: FixedPoint) -> (FixedPoint, u32) {
    let steps = (max_wind.raw().unsigned_abs() as i128 * WIND_STEPS_PER_UNIT as i128) >> FRAC;
    let steps = steps.clamp(0, i32::MAX as i128) as i32;
    let (k, next) = prng_int_range(rng_state, -steps, steps);
    let wind = FixedPoint::from_int(k) / FixedPoint::from_int(WIND_STEPS_PER_UNIT);
    (wind, next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_at(x: i32, y: i32) -> Player {
        Player::new(FixedPoint::from_int(x), FixedPoint::from_int(y), DEFAULT_ANGLE, DEFAULT_POWER)
    }

    fn flat(height: i32) -> Terrain {
        Terrain::from_heights(&vec![FixedPoint::from_int(height); FIELD_WIDTH]).unwrap()
    }

    #[test]
    fn aim_clamps_angle_and_power() {
        let mut p = player_at(100, 100);
        p.angle = MAX_ANGLE;
        p.power = MAX_POWER;
        let up = Input { angle_delta: 5, power_delta: 5, fire: false };
        let r = apply_aim(&p, &up);
        assert_eq!(r.angle, MAX_ANGLE);
        assert_eq!(r.power, MAX_POWER);

        p.angle = MIN_ANGLE;
        p.power = MIN_POWER;
        let down = Input { angle_delta: -5, power_delta: -5, fire: false };
        let r = apply_aim(&p, &down);
        assert_eq!(r.angle, MIN_ANGLE);
        assert_eq!(r.power, MIN_POWER);
    }

    #[test]
    fn aim_steps_by_speed() {
        let p = player_at(100, 100);
        let r = apply_aim(&p, &Input { angle_delta: 1, power_delta: -2, fire: false });
        assert_eq!(r.angle, DEFAULT_ANGLE + ANGLE_SPEED);
        assert_eq!(r.power, DEFAULT_POWER - POWER_SPEED - POWER_SPEED);
    }

    #[test]
    fn launch_mirrors_for_player_one() {
        let trig = TrigTable::build();
        let p = player_at(400, 100);
        let a = launch(&p, 0, &trig);
        let b = launch(&p, 1, &trig);
        assert!(a.vx > FixedPoint::ZERO);
        assert_eq!(b.vx, -a.vx);
        assert_eq!(a.vy, b.vy);
        assert_eq!(a.y, p.y + SPAWN_OFFSET_Y);
        assert_eq!(a.x, p.x);
    }

    #[test]
    fn integrate_updates_velocity_before_position() {
        let proj = Projectile {
            x: FixedPoint::from_int(10),
            y: FixedPoint::from_int(10),
            vx: FixedPoint::ONE,
            vy: FixedPoint::ZERO,
        };
        let r = integrate(&proj, FixedPoint::ZERO);
        assert_eq!(r.vy, -GRAVITY);
        assert_eq!(r.y, FixedPoint::from_int(10) - GRAVITY);
        assert_eq!(r.x, FixedPoint::from_int(11));

        let windy = integrate(&proj, FixedPoint::from_int(2));
        assert_eq!(windy.vx, FixedPoint::ONE + FixedPoint::from_int(2) * WIND_FACTOR);
    }

    #[test]
    fn terrain_impact() {
        let terrain = flat(100);
        let mut players = [player_at(100, 100), player_at(700, 100)];
        let proj = Projectile {
            x: FixedPoint::from_int(400),
            y: FixedPoint::from_int(99),
            vx: FixedPoint::ZERO,
            vy: FixedPoint::ZERO,
        };
        let impact = resolve_impact(&proj, &mut players, &terrain);
        assert!(impact.terrain);
        assert!(impact.hit());
        assert_eq!(players[0].health, MAX_HEALTH);
    }

    #[test]
    fn rectangular_hit_box_not_radius() {
        let terrain = flat(0);
        let mut players = [player_at(100, 100), player_at(700, 100)];
        // Corner of the box: 9.5 on both axes is ~13.4 away, outside a radius of 10
        let corner = FixedPoint::from_int(9) + FixedPoint::HALF;
        let proj = Projectile {
            x: FixedPoint::from_int(700) - corner,
            y: FixedPoint::from_int(100) + corner,
            vx: FixedPoint::ZERO,
            vy: FixedPoint::ZERO,
        };
        let impact = resolve_impact(&proj, &mut players, &terrain);
        assert_eq!(impact.players, [false, true]);
        assert_eq!(players[1].health, MAX_HEALTH - HIT_DAMAGE);
        assert!(players[1].alive);

        // Exactly on the edge is outside
        let edge = Projectile { x: FixedPoint::from_int(710), ..proj };
        let mut fresh = [player_at(100, 100), player_at(700, 100)];
        assert!(!resolve_impact(&edge, &mut fresh, &terrain).hit());
    }

    #[test]
    fn lethal_hit_marks_dead() {
        let terrain = flat(0);
        let mut players = [player_at(100, 100), player_at(700, 100)];
        players[1].health = HIT_DAMAGE;
        let proj = Projectile {
            x: FixedPoint::from_int(700),
            y: FixedPoint::from_int(100),
            vx: FixedPoint::ZERO,
            vy: FixedPoint::ZERO,
        };
        resolve_impact(&proj, &mut players, &terrain);
        assert_eq!(players[1].health, 0);
        assert!(!players[1].alive);

        // Dead players are ignored by later shots
        let impact = resolve_impact(&proj, &mut players, &terrain);
        assert!(!impact.hit());
        assert_eq!(players[1].health, 0);
    }

    #[test]
    fn simultaneous_conditions_all_apply() {
        let terrain = flat(0);
        let mut players = [player_at(2, 50), player_at(700, 100)];
        // Left of the field, inside player 0's box
        let proj = Projectile {
            x: FixedPoint::from_int(-3),
            y: FixedPoint::from_int(50),
            vx: FixedPoint::ZERO,
            vy: FixedPoint::ZERO,
        };
        let impact = resolve_impact(&proj, &mut players, &terrain);
        assert!(impact.out_of_bounds);
        assert!(impact.players[0]);
        assert_eq!(players[0].health, MAX_HEALTH - HIT_DAMAGE);
    }

    #[test]
    fn ceiling_and_right_edge() {
        let terrain = flat(0);
        let mut players = [player_at(100, 100), player_at(700, 100)];
        let high = Projectile {
            x: FixedPoint::from_int(400),
            y: CEILING + FixedPoint::ONE,
            vx: FixedPoint::ZERO,
            vy: FixedPoint::ZERO,
        };
        let impact = resolve_impact(&high, &mut players, &terrain);
        assert!(impact.ceiling && !impact.out_of_bounds);

        let right = Projectile { x: FIELD_RIGHT + FixedPoint::ONE, y: FixedPoint::from_int(300), ..high };
        let impact = resolve_impact(&right, &mut players, &terrain);
        assert!(impact.out_of_bounds && !impact.ceiling);

        // x == FIELD_RIGHT is still inside the field
        let on_edge = Projectile { x: FIELD_RIGHT, ..right };
        assert!(!resolve_impact(&on_edge, &mut players, &terrain).out_of_bounds);
    }

    #[test]
    fn wind_roll_in_range() {
        let mut state = 42u32;
        for _ in 0..500 {
            let (wind, next) = roll_wind(state, DEFAULT_MAX_WIND);
            assert!(wind.abs() <= DEFAULT_MAX_WIND);
            assert_ne!(next, state);
            state = next;
        }
        let (calm, _) = roll_wind(7, FixedPoint::ZERO);
        assert_eq!(calm, FixedPoint::ZERO);
    }

    #[test]
    fn wind_roll_survives_extreme_limits() {
        let huge = FixedPoint::from_raw(1_000_000_000_000_000_000);
        let mut state = 1u32;
        for _ in 0..200 {
            let (wind, next) = roll_wind(state, huge);
            assert!(wind.abs() <= huge);
            state = next;
        }
        for limit in [FixedPoint::from_raw(i64::MIN), FixedPoint::from_raw(i64::MAX), -DEFAULT_MAX_WIND] {
            let (wind, _) = roll_wind(9, limit);
            assert!(wind.abs() <= limit.abs() || limit.raw() == i64::MIN);
        }
        // Negative limits behave like their magnitude
        assert_eq!(roll_wind(3, -DEFAULT_MAX_WIND), roll_wind(3, DEFAULT_MAX_WIND));
    }
}
