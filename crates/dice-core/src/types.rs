//! Fundamental value types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_FACE, MIN_FACE};
use crate::error::DiceError;

/// One face of a six-sided die. Always in 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DieFace(u8);

impl DieFace {
    pub const ONE: DieFace = DieFace(1);
    pub const TWO: DieFace = DieFace(2);
    pub const THREE: DieFace = DieFace(3);
    pub const FOUR: DieFace = DieFace(4);
    pub const FIVE: DieFace = DieFace(5);
    pub const SIX: DieFace = DieFace(6);

    /// Every face in ascending order.
    pub const ALL: [DieFace; 6] = [
        DieFace::ONE,
        DieFace::TWO,
        DieFace::THREE,
        DieFace::FOUR,
        DieFace::FIVE,
        DieFace::SIX,
    ];

    pub fn new(value: u8) -> Result<Self, DiceError> {
        if (MIN_FACE..=MAX_FACE).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DiceError::InvalidFace(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_odd(self) -> bool {
        self.0 % 2 == 1
    }
}

impl Default for DieFace {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u8> for DieFace {
    type Error = DiceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DieFace> for u8 {
    fn from(face: DieFace) -> Self {
        face.0
    }
}

impl fmt::Display for DieFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
