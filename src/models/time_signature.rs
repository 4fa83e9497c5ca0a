//! Time signatures and position <-> (measure, beat) conversion
//!
//! Positions are global beat indices; the numerator of the signature is the
//! number of beats per measure.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::SolfaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimeSignature {
    #[default]
    FourFour,
    TwoFour,
    ThreeFour,
    SixEight,
}

impl TimeSignature {
    pub const ALL: [TimeSignature; 4] = [
        TimeSignature::TwoFour,
        TimeSignature::ThreeFour,
        TimeSignature::FourFour,
        TimeSignature::SixEight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSignature::TwoFour => "2/4",
            TimeSignature::ThreeFour => "3/4",
            TimeSignature::FourFour => "4/4",
            TimeSignature::SixEight => "6/8",
        }
    }

    /// Numerator of the signature
    pub fn beats_per_measure(&self) -> u32 {
        match self {
            TimeSignature::TwoFour => 2,
            TimeSignature::ThreeFour => 3,
            TimeSignature::FourFour => 4,
            TimeSignature::SixEight => 6,
        }
    }

    /// Denominator of the signature
    pub fn beat_unit(&self) -> u32 {
        match self {
            TimeSignature::SixEight => 8,
            _ => 4,
        }
    }

    pub fn measure_of(&self, position: u32) -> u32 {
        position / self.beats_per_measure()
    }

    pub fn beat_of(&self, position: u32) -> u32 {
        position % self.beats_per_measure()
    }

    /// First position of a measure, clamped to `u32::MAX` past the last
    /// representable one
    pub fn measure_start(&self, measure: u32) -> u32 {
        measure.saturating_mul(self.beats_per_measure())
    }

    /// Half-open position range `[start, end)` covering measures
    /// `start_measure..=end_measure`, widened to `u64` so the end of the
    /// last measure is representable
    pub fn measure_span(&self, start_measure: u32, end_measure: u32) -> (u64, u64) {
        let bpm = u64::from(self.beats_per_measure());
        (u64::from(start_measure) * bpm, (u64::from(end_measure) + 1) * bpm)
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TimeSignature {
    type Err = SolfaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        TimeSignature::ALL
            .iter()
            .copied()
            .find(|ts| ts.as_str() == compact)
            .ok_or_else(|| SolfaError::UnknownTimeSignature(s.to_string()))
    }
}

impl TryFrom<String> for TimeSignature {
    type Error = SolfaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeSignature> for String {
    fn from(ts: TimeSignature) -> Self {
        ts.as_str().to_string()
    }
}
