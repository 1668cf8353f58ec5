use core::fmt;

use crate::constants::WIND_LIMIT;
use crate::fixed::FixedPoint;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TerrainError {
    WrongLength { expected: usize, actual: usize },
    NegativeHeight { index: usize },
    InvalidHill { index: usize, half_width: i32 },
}

impl fmt::Display for TerrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength { expected, actual } => {
                write!(f, "terrain length mismatch: expected {expected} columns, got {actual}")
            }
            Self::NegativeHeight { index } => write!(f, "negative terrain height at column {index}"),
            Self::InvalidHill { index, half_width } => {
                write!(f, "hill {index} has non-positive half width {half_width}")
            }
        }
    }
}

impl std::error::Error for TerrainError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeError {
    LengthMismatch { expected: usize, actual: usize },
    InvalidTurn { found: u8 },
    InvalidFlag { offset: usize, found: u8 },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { expected, actual } => {
                write!(f, "state length mismatch: expected {expected} bytes, got {actual}")
            }
            Self::InvalidTurn { found } => write!(f, "invalid turn marker: {found}"),
            Self::InvalidFlag { offset, found } => {
                write!(f, "invalid flag byte 0x{found:02x} at offset {offset}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplayError {
    Terrain(TerrainError),
    ZeroCheckpointInterval,
    WindLimit { max_wind: FixedPoint },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terrain(err) => write!(f, "bad terrain profile: {err}"),
            Self::ZeroCheckpointInterval => write!(f, "checkpoint interval must be at least 1"),
            Self::WindLimit { max_wind } => {
                write!(f, "max wind {:.3} outside [0, {}]", max_wind.to_f64(), WIND_LIMIT.to_int())
            }
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Terrain(err) => Some(err),
            Self::ZeroCheckpointInterval | Self::WindLimit { .. } => None,
        }
    }
}

impl From<TerrainError> for ReplayError {
    fn from(err: TerrainError) -> Self {
        Self::Terrain(err)
    }
}
