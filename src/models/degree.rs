//! Movable-do scale degrees
//!
//! The seven diatonic degrees of tonic sol-fa, in their fixed cyclic order
//! d r m f s l t. All degree arithmetic wraps modulo 7.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::SolfaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScaleDegree {
    #[serde(rename = "d")]
    Do,
    #[serde(rename = "r")]
    Re,
    #[serde(rename = "m")]
    Mi,
    #[serde(rename = "f")]
    Fa,
    #[serde(rename = "s")]
    Sol,
    #[serde(rename = "l")]
    La,
    #[serde(rename = "t")]
    Ti,
}

impl ScaleDegree {
    /// Fixed degree order used by every index computation
    pub const ORDER: [ScaleDegree; 7] = [
        ScaleDegree::Do,
        ScaleDegree::Re,
        ScaleDegree::Mi,
        ScaleDegree::Fa,
        ScaleDegree::Sol,
        ScaleDegree::La,
        ScaleDegree::Ti,
    ];

    /// Position of this degree in [`ScaleDegree::ORDER`] (0-6)
    pub fn index(self) -> usize {
        match self {
            ScaleDegree::Do => 0,
            ScaleDegree::Re => 1,
            ScaleDegree::Mi => 2,
            ScaleDegree::Fa => 3,
            ScaleDegree::Sol => 4,
            ScaleDegree::La => 5,
            ScaleDegree::Ti => 6,
        }
    }

    /// Degree at an arbitrary (possibly negative or > 6) index, wrapping mod 7
    pub fn from_index(index: i64) -> Self {
        Self::ORDER[index.rem_euclid(7) as usize]
    }

    /// Move by `steps` scale degrees. Never fails.
    pub fn step(self, steps: i64) -> Self {
        Self::from_index(self.index() as i64 + steps)
    }

    /// Ascending diatonic distance from `from` to `self` (0-6)
    pub fn steps_from(self, from: ScaleDegree) -> usize {
        (self.index() + 7 - from.index()) % 7
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScaleDegree::Do => "d",
            ScaleDegree::Re => "r",
            ScaleDegree::Mi => "m",
            ScaleDegree::Fa => "f",
            ScaleDegree::Sol => "s",
            ScaleDegree::La => "l",
            ScaleDegree::Ti => "t",
        }
    }

    /// Full syllable name, as shown in playback and tooltips
    pub fn syllable(&self) -> &'static str {
        match self {
            ScaleDegree::Do => "do",
            ScaleDegree::Re => "re",
            ScaleDegree::Mi => "mi",
            ScaleDegree::Fa => "fa",
            ScaleDegree::Sol => "sol",
            ScaleDegree::La => "la",
            ScaleDegree::Ti => "ti",
        }
    }
}

impl fmt::Display for ScaleDegree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ScaleDegree {
    type Err = SolfaError;

    /// Accepts the sol-fa letters, the digits 1-7 used on the note keyboard,
    /// and the letter-name aliases `c` (do) and `b` (ti) of the C-major
    /// reference.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "d" | "do" | "1" | "c" => Ok(ScaleDegree::Do),
            "r" | "re" | "2" => Ok(ScaleDegree::Re),
            "m" | "mi" | "3" => Ok(ScaleDegree::Mi),
            "f" | "fa" | "4" => Ok(ScaleDegree::Fa),
            "s" | "sol" | "so" | "5" => Ok(ScaleDegree::Sol),
            "l" | "la" | "6" => Ok(ScaleDegree::La),
            "t" | "ti" | "7" | "b" => Ok(ScaleDegree::Ti),
            _ => Err(SolfaError::InvalidDegree(s.to_string())),
        }
    }
}
