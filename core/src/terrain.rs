use serde::{Deserialize, Serialize};

use crate::constants::{FIELD_WIDTH, TERRAIN_BASE};
use crate::error::TerrainError;
use crate::fixed::FixedPoint;

/// A parabolic bump: peak * (1 - (dx / half_width)^2) inside the span.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hill {
    pub center: i32,
    pub peak: FixedPoint,
    pub half_width: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainProfile {
    pub base: FixedPoint,
    pub hills: Vec<Hill>,
}

impl Default for TerrainProfile {
    /// Flat base with a central ridge and two shoulders. Both spawn columns
    /// (100 and 700) sit on the flat base.
    fn default() -> Self {
        TerrainProfile {
            base: TERRAIN_BASE,
            hills: vec![
                Hill { center: 400, peak: FixedPoint::from_int(150), half_width: 200 },
                Hill { center: 250, peak: FixedPoint::from_int(40), half_width: 60 },
                Hill { center: 550, peak: FixedPoint::from_int(40), half_width: 60 },
            ],
        }
    }
}

/// Height field, one column per horizontal pixel. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Terrain {
    heights: [FixedPoint; FIELD_WIDTH],
}

impl Terrain {
    pub fn generate() -> Self {
        Self::fill(&TerrainProfile::default())
    }

    pub fn from_profile(profile: &TerrainProfile) -> Result<Self, TerrainError> {
        for (index, hill) in profile.hills.iter().enumerate() {
            if hill.half_width <= 0 {
                return Err(TerrainError::InvalidHill { index, half_width: hill.half_width });
            }
        }
        Ok(Self::fill(profile))
    }

    fn fill(profile: &TerrainProfile) -> Self {
        let mut heights = [profile.base; FIELD_WIDTH];
        for (x, h) in heights.iter_mut().enumerate() {
            for hill in &profile.hills {
                let dx = x as i64 - hill.center as i64;
                if hill.half_width <= 0 || dx.abs() >= hill.half_width as i64 {
                    continue;
                }
                // |dx| < half_width, so it fits an i32
                let d = FixedPoint::from_int(dx as i32) / FixedPoint::from_int(hill.half_width);
                *h += hill.peak - hill.peak * d * d;
            }
            if *h < FixedPoint::ZERO {
                *h = FixedPoint::ZERO;
            }
        }
        Terrain { heights }
    }

    /// Load an externally produced height field.
    pub fn from_heights(src: &[FixedPoint]) -> Result<Self, TerrainError> {
        if src.len() != FIELD_WIDTH {
            return Err(TerrainError::WrongLength { expected: FIELD_WIDTH, actual: src.len() });
        }
        if let Some(index) = src.iter().position(|h| *h < FixedPoint::ZERO) {
            return Err(TerrainError::NegativeHeight { index });
        }
        let mut heights = [FixedPoint::ZERO; FIELD_WIDTH];
        heights.copy_from_slice(src);
        Ok(Terrain { heights })
    }

    /// Height of the column containing `x`; zero outside [0, FIELD_WIDTH).
    #[inline]
    pub fn height_at(&self, x: FixedPoint) -> FixedPoint {
        let col = x.to_int();
        if col < 0 || col >= FIELD_WIDTH as i64 {
            return FixedPoint::ZERO;
        }
        self.heights[col as usize]
    }

    pub fn width(&self) -> usize {
        FIELD_WIDTH
    }

    pub fn heights(&self) -> &[FixedPoint] {
        &self.heights
    }
}
