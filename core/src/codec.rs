//! Fixed-length little-endian encoding of `GameState`.
//!
//! Layout (128 bytes):
//!   tick u64 | turn u8 | wind i64
//!   2 × [x i64 | y i64 | angle i64 | power i64 | health i32 | alive u8]
//!   projectile tag u8 | x i64 | y i64 | vx i64 | vy i64   (zeros when absent)
//!   rng_state u32
//!
//! The same field walk feeds the state hash, so encoding and hashing can never
//! disagree on order.

use crate::error::DecodeError;
use crate::fixed::FixedPoint;
use crate::types::*;

pub const ENCODED_PLAYER_LEN: usize = 4 * 8 + 4 + 1;
pub const ENCODED_STATE_LEN: usize = 8 + 1 + 8 + 2 * ENCODED_PLAYER_LEN + 1 + 4 * 8 + 4;

/// Walk the deterministic fields of `s` in canonical order.
pub(crate) fn write_state(s: &GameState, out: &mut impl FnMut(&[u8])) {
    out(&s.tick.to_le_bytes());
    out(&[s.current_turn]);
    out(&s.wind.raw().to_le_bytes());
    for p in &s.players {
        out(&p.x.raw().to_le_bytes());
        out(&p.y.raw().to_le_bytes());
        out(&p.angle.raw().to_le_bytes());
        out(&p.power.raw().to_le_bytes());
        out(&p.health.to_le_bytes());
        out(&[p.alive as u8]);
    }
    match &s.projectile {
        Some(pj) => {
            out(&[1]);
            out(&pj.x.raw().to_le_bytes());
            out(&pj.y.raw().to_le_bytes());
            out(&pj.vx.raw().to_le_bytes());
            out(&pj.vy.raw().to_le_bytes());
        }
        None => {
            out(&[0]);
            out(&[0u8; 32]);
        }
    }
    out(&s.rng_state.to_le_bytes());
}

pub fn encode_state(s: &GameState) -> Vec<u8> {
    let mut b = Vec::with_capacity(ENCODED_STATE_LEN);
    write_state(s, &mut |bytes: &[u8]| b.extend_from_slice(bytes));
    b
}

struct Reader<'a> {
    b: &'a [u8],
    off: usize,
}

impl<'a> Reader<'a> {
    fn take<const K: usize>(&mut self) -> [u8; K] {
        let mut out = [0u8; K];
        out.copy_from_slice(&self.b[self.off..self.off + K]);
        self.off += K;
        out
    }

    fn u8(&mut self) -> u8 {
        self.take::<1>()[0]
    }

    fn flag(&mut self) -> Result<bool, DecodeError> {
        let offset = self.off;
        match self.u8() {
            0 => Ok(false),
            1 => Ok(true),
            found => Err(DecodeError::InvalidFlag { offset, found }),
        }
    }

    fn i32(&mut self) -> i32 {
        i32::from_le_bytes(self.take())
    }

    fn u32(&mut self) -> u32 {
        u32::from_le_bytes(self.take())
    }

    fn u64(&mut self) -> u64 {
        u64::from_le_bytes(self.take())
    }

    fn fp(&mut self) -> FixedPoint {
        FixedPoint::from_raw(i64::from_le_bytes(self.take()))
    }
}

/// Decode a state produced by `encode_state`.
pub fn decode_state(b: &[u8]) -> Result<GameState, DecodeError> {
    if b.len() != ENCODED_STATE_LEN {
        return Err(DecodeError::LengthMismatch { expected: ENCODED_STATE_LEN, actual: b.len() });
    }
    let mut r = Reader { b, off: 0 };

    let tick = r.u64();
    let current_turn = r.u8();
    if current_turn > 1 {
        return Err(DecodeError::InvalidTurn { found: current_turn });
    }
    let wind = r.fp();

    let mut players = [Player::new(FixedPoint::ZERO, FixedPoint::ZERO, FixedPoint::ZERO, FixedPoint::ZERO); 2];
    for p in &mut players {
        p.x = r.fp();
        p.y = r.fp();
        p.angle = r.fp();
        p.power = r.fp();
        p.health = r.i32();
        p.alive = r.flag()?;
    }

    let present = r.flag()?;
    let x = r.fp();
    let y = r.fp();
    let vx = r.fp();
    let vy = r.fp();
    let projectile = present.then_some(Projectile { x, y, vx, vy });

    let rng_state = r.u32();

    Ok(GameState {
        tick,
        current_turn,
        wind,
        players,
        projectile,
        rng_state,
    })
}
