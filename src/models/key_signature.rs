//! Key signatures
//!
//! A key signature names a tonic degree, a mode, and the degrees it alters
//! relative to the unaltered C-major reference. Letter names map to fixed-do
//! degrees for the alteration table (C=d, D=r, E=m, F=f, G=s, A=l, B=t), so
//! G major alters `f` (F sharp) and F major alters `t` (B flat).

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::degree::ScaleDegree;
use super::note::{Accidental, Note};
use crate::errors::SolfaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Major,
    Minor,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::Minor => "minor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySignature {
    pub tonic: ScaleDegree,
    pub mode: Mode,
    /// Only degrees that are actually altered appear here
    #[serde(default)]
    pub accidentals: BTreeMap<ScaleDegree, Accidental>,
}

/// Names of the built-in signatures, in selector order
pub const KEY_SIGNATURE_NAMES: [&str; 13] = [
    "C major", "G major", "D major", "A major", "E major", "B major", "F# major",
    "F major", "Bb major", "Eb major", "Ab major", "Db major", "Gb major",
];

fn signature(tonic: ScaleDegree, altered: &[ScaleDegree], accidental: Accidental) -> KeySignature {
    KeySignature {
        tonic,
        mode: Mode::Major,
        accidentals: altered.iter().map(|d| (*d, accidental)).collect(),
    }
}

lazy_static! {
    static ref KEY_SIGNATURES: Vec<(&'static str, KeySignature)> = {
        use ScaleDegree::*;
        // Order of sharps: F C G D A E; order of flats: B E A D G C
        let sharps = [Fa, Do, Sol, Re, La, Mi];
        let flats = [Ti, Mi, La, Re, Sol, Do];
        vec![
            ("C major", signature(Do, &[], Accidental::Sharp)),
            ("G major", signature(Sol, &sharps[..1], Accidental::Sharp)),
            ("D major", signature(Re, &sharps[..2], Accidental::Sharp)),
            ("A major", signature(La, &sharps[..3], Accidental::Sharp)),
            ("E major", signature(Mi, &sharps[..4], Accidental::Sharp)),
            ("B major", signature(Ti, &sharps[..5], Accidental::Sharp)),
            ("F# major", signature(Fa, &sharps[..6], Accidental::Sharp)),
            ("F major", signature(Fa, &flats[..1], Accidental::Flat)),
            ("Bb major", signature(Ti, &flats[..2], Accidental::Flat)),
            ("Eb major", signature(Mi, &flats[..3], Accidental::Flat)),
            ("Ab major", signature(La, &flats[..4], Accidental::Flat)),
            ("Db major", signature(Re, &flats[..5], Accidental::Flat)),
            ("Gb major", signature(Sol, &flats[..6], Accidental::Flat)),
        ]
    };
}

impl Default for KeySignature {
    fn default() -> Self {
        KeySignature {
            tonic: ScaleDegree::Do,
            mode: Mode::Major,
            accidentals: BTreeMap::new(),
        }
    }
}

impl KeySignature {
    /// Look up a built-in signature by name ("G major", "Bb major", ...)
    pub fn named(name: &str) -> Result<KeySignature, SolfaError> {
        KEY_SIGNATURES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name.trim()))
            .map(|(_, ks)| ks.clone())
            .ok_or_else(|| SolfaError::UnknownKeySignature(name.to_string()))
    }

    /// All built-in signatures with their names
    pub fn all_named() -> impl Iterator<Item = (&'static str, &'static KeySignature)> {
        KEY_SIGNATURES.iter().map(|(n, ks)| (*n, ks))
    }

    /// Name of the matching built-in signature.
    ///
    /// F and F# (and the other flat/sharp pairs) share a tonic degree, so an
    /// exact match on the alterations wins; otherwise the first signature with
    /// the same tonic and mode is used.
    pub fn display_name(&self) -> &'static str {
        KEY_SIGNATURES
            .iter()
            .find(|(_, ks)| ks == self)
            .or_else(|| {
                KEY_SIGNATURES
                    .iter()
                    .find(|(_, ks)| ks.tonic == self.tonic && ks.mode == self.mode)
            })
            .map(|(n, _)| *n)
            .unwrap_or("Custom")
    }

    /// Accidental this signature applies to `degree`, if it alters it
    pub fn accidental_for(&self, degree: ScaleDegree) -> Option<Accidental> {
        self.accidentals.get(&degree).copied()
    }

    /// Return `note` with the signature's accidental for its degree.
    /// Unaltered degrees come back unchanged.
    pub fn apply_accidentals(&self, note: &Note) -> Note {
        match self.accidental_for(note.degree) {
            Some(accidental) => note.clone().with_accidental(Some(accidental)),
            None => note.clone(),
        }
    }

    /// Relative minor (tonic +5 steps) or relative major (tonic +2 steps).
    ///
    /// The accidental map is carried over unchanged.
    pub fn relative_key(&self) -> KeySignature {
        let (steps, mode) = match self.mode {
            Mode::Major => (5, Mode::Minor),
            Mode::Minor => (2, Mode::Major),
        };
        KeySignature {
            tonic: self.tonic.step(steps),
            mode,
            accidentals: self.accidentals.clone(),
        }
    }

    /// The seven degrees of the scale, starting at the tonic
    pub fn scale_degrees(&self) -> [ScaleDegree; 7] {
        let mut degrees = [self.tonic; 7];
        for (i, slot) in degrees.iter_mut().enumerate() {
            *slot = self.tonic.step(i as i64);
        }
        degrees
    }
}

impl fmt::Display for KeySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for KeySignature {
    type Err = SolfaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeySignature::named(s)
    }
}
