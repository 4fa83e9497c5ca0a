//! Error types for the sol-fa editor core
//!
//! Note-level misses (empty slots, unaltered degrees) are ordinary `None`
//! results. These errors cover the closed static tables and string parsing,
//! where a miss means the caller asked for something that does not exist.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolfaError {
    #[error("unknown key signature: '{0}'")]
    UnknownKeySignature(String),

    #[error("unknown time signature: '{0}' (expected one of 2/4, 3/4, 4/4, 6/8)")]
    UnknownTimeSignature(String),

    #[error("invalid scale degree: '{0}' (expected one of d, r, m, f, s, l, t)")]
    InvalidDegree(String),

    #[error("invalid note duration: '{0}'")]
    InvalidDuration(String),

    #[error("invalid subdivision: '{0}'")]
    InvalidSubdivision(String),

    #[error("invalid accidental: '{0}'")]
    InvalidAccidental(String),

    #[error("invalid dynamic: '{0}'")]
    InvalidDynamic(String),

    #[error("sub-position {0} out of range (must be 0-3)")]
    InvalidSubPosition(u8),

    #[error("invalid voice part: '{0}' (expected S, A, T or B)")]
    InvalidVoicePart(String),

    #[error("invalid chord quality: '{0}'")]
    InvalidChordQuality(String),

    #[error("invalid aux track key: '{0}'")]
    InvalidTrackKey(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SolfaError>;
