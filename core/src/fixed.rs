//! Q32.32 fixed-point numbers.
//! All simulation arithmetic goes through this type so that the same inputs
//! produce the same bits on every machine. No floating point is used here
//! except in `to_f64`, which is a one-way projection for display.

use core::fmt;
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

pub const FRAC: u32 = 32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixedPoint(i64);

impl FixedPoint {
    pub const ZERO: FixedPoint = FixedPoint(0);
    pub const ONE: FixedPoint = FixedPoint(1 << FRAC); // 4294967296
    pub const HALF: FixedPoint = FixedPoint(1 << (FRAC - 1));
    pub const PI: FixedPoint = FixedPoint(13_493_037_705); // round(pi * 2^32)
    pub const TWO_PI: FixedPoint = FixedPoint(26_986_075_409);
    pub const HALF_PI: FixedPoint = FixedPoint(6_746_518_852);
    pub const QUARTER_PI: FixedPoint = FixedPoint(3_373_259_426);

    #[inline(always)]
    pub const fn from_raw(raw: i64) -> Self {
        FixedPoint(raw)
    }

    #[inline(always)]
    pub const fn raw(self) -> i64 {
        self.0
    }

    #[inline(always)]
    pub const fn from_int(v: i32) -> Self {
        FixedPoint((v as i64) << FRAC)
    }

    /// Integer part, rounded toward negative infinity.
    #[inline(always)]
    pub const fn to_int(self) -> i64 {
        self.0 >> FRAC
    }

    #[inline(always)]
    pub const fn add(self, rhs: Self) -> Self {
        FixedPoint(self.0.wrapping_add(rhs.0))
    }

    #[inline(always)]
    pub const fn sub(self, rhs: Self) -> Self {
        FixedPoint(self.0.wrapping_sub(rhs.0))
    }

    /// (a * b) >> FRAC, computed in i128.
    #[inline(always)]
    pub const fn mul(self, rhs: Self) -> Self {
        FixedPoint(((self.0 as i128 * rhs.0 as i128) >> FRAC) as i64)
    }

    /// (a << FRAC) / b, computed in i128. Truncates toward zero.
    /// Panics when `rhs` is zero; callers only divide by non-zero constants.
    #[inline(always)]
    pub const fn div(self, rhs: Self) -> Self {
        FixedPoint((((self.0 as i128) << FRAC) / rhs.0 as i128) as i64)
    }

    #[inline(always)]
    pub const fn neg(self) -> Self {
        FixedPoint(self.0.wrapping_neg())
    }

    #[inline(always)]
    pub const fn abs(self) -> Self {
        FixedPoint(self.0.wrapping_abs())
    }

    #[inline(always)]
    pub fn min(self, other: Self) -> Self {
        if other.0 < self.0 { other } else { self }
    }

    #[inline(always)]
    pub fn max(self, other: Self) -> Self {
        if other.0 > self.0 { other } else { self }
    }

    /// max(lo, min(hi, self))
    #[inline(always)]
    pub fn clamp(self, lo: Self, hi: Self) -> Self {
        lo.max(hi.min(self))
    }

    #[inline(always)]
    pub fn less_than(self, other: Self) -> bool {
        self.0 < other.0
    }

    #[inline(always)]
    pub fn greater_than(self, other: Self) -> bool {
        self.0 > other.0
    }

    /// Display-only projection. Never feed the result back into the simulation.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / (1u64 << FRAC) as f64
    }
}

impl Add for FixedPoint {
    type Output = FixedPoint;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        FixedPoint::add(self, rhs)
    }
}

impl Sub for FixedPoint {
    type Output = FixedPoint;
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        FixedPoint::sub(self, rhs)
    }
}

impl Mul for FixedPoint {
    type Output = FixedPoint;
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        FixedPoint::mul(self, rhs)
    }
}

impl Div for FixedPoint {
    type Output = FixedPoint;
    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        FixedPoint::div(self, rhs)
    }
}

impl Neg for FixedPoint {
    type Output = FixedPoint;
    #[inline(always)]
    fn neg(self) -> Self {
        FixedPoint::neg(self)
    }
}

impl AddAssign for FixedPoint {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        *self = FixedPoint::add(*self, rhs);
    }
}

impl SubAssign for FixedPoint {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Self) {
        *self = FixedPoint::sub(*self, rhs);
    }
}

impl From<i32> for FixedPoint {
    fn from(v: i32) -> Self {
        FixedPoint::from_int(v)
    }
}

/// Prints the integer part and the raw fractional bits, e.g. `12+0x80000000/2^32`.
impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frac = (self.0 as u64) & 0xFFFF_FFFF;
        write!(f, "{}+0x{:08x}/2^32", self.to_int(), frac)
    }
}
