//! Sine/cosine lookup tables.
//!
//! The tables are filled once from the host's reference `f64` trigonometry and
//! rounded to Q32.32. That build step is the only transcendental computation
//! in the crate; every lookup afterwards is integer indexing.

use std::sync::OnceLock;

use crate::constants::TRIG_TABLE_SIZE;
use crate::fixed::{FixedPoint, FRAC};

const N: usize = TRIG_TABLE_SIZE;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrigTable {
    sin: [FixedPoint; N],
    cos: [FixedPoint; N],
}

static SHARED: OnceLock<TrigTable> = OnceLock::new();

impl TrigTable {
    /// Fill both tables. SIN[i] = round(sin(i * 2pi / N) * 2^32)
    pub fn build() -> Self {
        let scale = (1u64 << FRAC) as f64;
        let mut sin = [FixedPoint::ZERO; N];
        let mut cos = [FixedPoint::ZERO; N];
        for i in 0..N {
            let theta = i as f64 * core::f64::consts::TAU / N as f64;
            sin[i] = FixedPoint::from_raw((theta.sin() * scale).round() as i64);
            cos[i] = FixedPoint::from_raw((theta.cos() * scale).round() as i64);
        }
        TrigTable { sin, cos }
    }

    /// Process-wide table, built on first use and never mutated.
    pub fn shared() -> &'static TrigTable {
        SHARED.get_or_init(TrigTable::build)
    }

    /// Bucket for an arbitrary angle: normalize into [0, 2pi), then
    /// floor(raw * N / TWO_PI.raw) mod N.
    #[inline]
    pub fn index(angle: FixedPoint) -> usize {
        let two_pi = FixedPoint::TWO_PI.raw();
        let norm = angle.raw().rem_euclid(two_pi);
        let idx = (norm as i128 * N as i128) / two_pi as i128;
        (idx as usize) % N
    }

    #[inline]
    pub fn sin(&self, angle: FixedPoint) -> FixedPoint {
        self.sin[Self::index(angle)]
    }

    #[inline]
    pub fn cos(&self, angle: FixedPoint) -> FixedPoint {
        self.cos[Self::index(angle)]
    }

    /// Angular width of one table bucket.
    pub const fn bucket() -> FixedPoint {
        FixedPoint::from_raw(FixedPoint::TWO_PI.raw() / N as i64)
    }
}
