//! Note entity and its attribute enumerations
//!
//! A Note sits at a global beat `position` plus a `sub_position` slot (0-3)
//! within that beat. Notes are immutable by convention: edits produce new
//! values (see the `with_*` builders), and batch transforms replace matched
//! notes in place by id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::degree::ScaleDegree;
use crate::errors::SolfaError;

/// Highest sub-beat slot index
pub const MAX_SUB_POSITION: u8 = 3;

/// Stable note identity, used for selection matching instead of structural equality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub Uuid);

impl NoteId {
    pub fn new() -> Self {
        NoteId(Uuid::new_v4())
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accidental {
    Sharp,
    Flat,
    Natural,
}

impl Accidental {
    pub fn as_str(&self) -> &'static str {
        match self {
            Accidental::Sharp => "sharp",
            Accidental::Flat => "flat",
            Accidental::Natural => "natural",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Accidental::Sharp => "♯",
            Accidental::Flat => "♭",
            Accidental::Natural => "♮",
        }
    }

    /// Semitone offset applied to the natural degree
    pub fn semitone_offset(&self) -> i32 {
        match self {
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
            Accidental::Natural => 0,
        }
    }
}

impl FromStr for Accidental {
    type Err = SolfaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sharp" | "#" | "♯" => Ok(Accidental::Sharp),
            "flat" | "b" | "♭" => Ok(Accidental::Flat),
            "natural" | "n" | "♮" => Ok(Accidental::Natural),
            _ => Err(SolfaError::InvalidAccidental(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteDuration {
    #[default]
    Beat,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
}

impl NoteDuration {
    pub const ALL: [NoteDuration; 5] = [
        NoteDuration::Beat,
        NoteDuration::Half,
        NoteDuration::Quarter,
        NoteDuration::Eighth,
        NoteDuration::Sixteenth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NoteDuration::Beat => "beat",
            NoteDuration::Half => "half",
            NoteDuration::Quarter => "quarter",
            NoteDuration::Eighth => "eighth",
            NoteDuration::Sixteenth => "sixteenth",
        }
    }
}

impl FromStr for NoteDuration {
    type Err = SolfaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NoteDuration::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| SolfaError::InvalidDuration(s.to_string()))
    }
}

/// Rhythmic dot modifier, serialized as the dot string itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Subdivision {
    #[default]
    #[serde(rename = "")]
    None,
    #[serde(rename = ".")]
    Dot,
    #[serde(rename = "..")]
    DoubleDot,
    #[serde(rename = "...")]
    TripleDot,
}

impl Subdivision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subdivision::None => "",
            Subdivision::Dot => ".",
            Subdivision::DoubleDot => "..",
            Subdivision::TripleDot => "...",
        }
    }

    /// Number of dots
    pub fn dots(&self) -> u32 {
        match self {
            Subdivision::None => 0,
            Subdivision::Dot => 1,
            Subdivision::DoubleDot => 2,
            Subdivision::TripleDot => 3,
        }
    }
}

impl FromStr for Subdivision {
    type Err = SolfaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Subdivision::None),
            "." => Ok(Subdivision::Dot),
            ".." => Ok(Subdivision::DoubleDot),
            "..." => Ok(Subdivision::TripleDot),
            _ => Err(SolfaError::InvalidSubdivision(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dynamic {
    Ppp,
    Pp,
    P,
    Mp,
    Mf,
    F,
    Ff,
    Fff,
    Sfz,
    Fp,
}

impl Dynamic {
    pub const ALL: [Dynamic; 10] = [
        Dynamic::Ppp,
        Dynamic::Pp,
        Dynamic::P,
        Dynamic::Mp,
        Dynamic::Mf,
        Dynamic::F,
        Dynamic::Ff,
        Dynamic::Fff,
        Dynamic::Sfz,
        Dynamic::Fp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dynamic::Ppp => "ppp",
            Dynamic::Pp => "pp",
            Dynamic::P => "p",
            Dynamic::Mp => "mp",
            Dynamic::Mf => "mf",
            Dynamic::F => "f",
            Dynamic::Ff => "ff",
            Dynamic::Fff => "fff",
            Dynamic::Sfz => "sfz",
            Dynamic::Fp => "fp",
        }
    }
}

impl FromStr for Dynamic {
    type Err = SolfaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dynamic::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| SolfaError::InvalidDynamic(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Articulation {
    Staccato,
    Legato,
    Accent,
    Tenuto,
    Marcato,
}

/// Octave register marker
///
/// High and low are mutually exclusive by construction. Registers beyond one
/// octave are only produced by auto-harmonization, which clamps to this range.
#[repr(i8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, serde_repr::Serialize_repr, serde_repr::Deserialize_repr)]
pub enum Octave {
    DoubleLow = -2,
    Low = -1,
    #[default]
    Normal = 0,
    High = 1,
    DoubleHigh = 2,
}

impl Octave {
    pub const MIN: i32 = -2;
    pub const MAX: i32 = 2;

    /// Register value, clamped to [-2, 2]
    pub fn from_register(register: i32) -> Self {
        match register.clamp(Self::MIN, Self::MAX) {
            -2 => Octave::DoubleLow,
            -1 => Octave::Low,
            0 => Octave::Normal,
            1 => Octave::High,
            _ => Octave::DoubleHigh,
        }
    }

    pub fn register(self) -> i32 {
        self as i8 as i32
    }

    pub fn from_markers(is_high: bool, is_low: bool) -> Self {
        match (is_high, is_low) {
            (true, false) => Octave::High,
            (false, true) => Octave::Low,
            _ => Octave::Normal,
        }
    }

    /// Shift by `delta` octaves, saturating at the register bounds
    pub fn shifted(self, delta: i32) -> Self {
        Self::from_register(self.register() + delta)
    }
}

/// The four choir voices, each owning one note track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VoicePart {
    S,
    A,
    T,
    B,
}

impl VoicePart {
    pub const ALL: [VoicePart; 4] = [VoicePart::S, VoicePart::A, VoicePart::T, VoicePart::B];

    pub fn label(&self) -> &'static str {
        match self {
            VoicePart::S => "Soprano",
            VoicePart::A => "Alto",
            VoicePart::T => "Tenor",
            VoicePart::B => "Bass",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VoicePart::S => "S",
            VoicePart::A => "A",
            VoicePart::T => "T",
            VoicePart::B => "B",
        }
    }
}

impl fmt::Display for VoicePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VoicePart {
    type Err = SolfaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "S" | "SOPRANO" => Ok(VoicePart::S),
            "A" | "ALTO" => Ok(VoicePart::A),
            "T" | "TENOR" => Ok(VoicePart::T),
            "B" | "BASS" => Ok(VoicePart::B),
            _ => Err(SolfaError::InvalidVoicePart(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub id: NoteId,

    /// Scale degree (serialized as `type`, the sol-fa letter)
    #[serde(rename = "type")]
    pub degree: ScaleDegree,

    pub duration: NoteDuration,

    #[serde(default)]
    pub subdivision: Subdivision,

    #[serde(default)]
    pub octave: Octave,

    /// Global beat index across all measures
    pub position: u32,

    /// Sub-beat slot (0-3)
    #[serde(default)]
    pub sub_position: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accidental: Option<Accidental>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic: Option<Dynamic>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub articulation: Option<Articulation>,
}

impl Note {
    /// Create a plain one-beat note at a slot, with a fresh id
    pub fn new(degree: ScaleDegree, position: u32, sub_position: u8) -> Self {
        Self {
            id: NoteId::new(),
            degree,
            duration: NoteDuration::Beat,
            subdivision: Subdivision::None,
            octave: Octave::Normal,
            position,
            sub_position,
            accidental: None,
            dynamic: None,
            articulation: None,
        }
    }

    pub fn with_duration(mut self, duration: NoteDuration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_subdivision(mut self, subdivision: Subdivision) -> Self {
        self.subdivision = subdivision;
        self
    }

    pub fn with_octave(mut self, octave: Octave) -> Self {
        self.octave = octave;
        self
    }

    pub fn with_accidental(mut self, accidental: Option<Accidental>) -> Self {
        self.accidental = accidental;
        self
    }

    pub fn with_dynamic(mut self, dynamic: Option<Dynamic>) -> Self {
        self.dynamic = dynamic;
        self
    }

    pub fn with_articulation(mut self, articulation: Option<Articulation>) -> Self {
        self.articulation = articulation;
        self
    }

    /// Same content under a new identity (used when notes are duplicated)
    pub fn with_fresh_id(mut self) -> Self {
        self.id = NoteId::new();
        self
    }

    pub fn is_high_octave(&self) -> bool {
        self.octave > Octave::Normal
    }

    pub fn is_low_octave(&self) -> bool {
        self.octave < Octave::Normal
    }

    /// Slot key used for ordering within a track
    pub fn slot(&self) -> (u32, u8) {
        (self.position, self.sub_position)
    }

    pub fn is_at(&self, position: u32, sub_position: u8) -> bool {
        self.position == position && self.sub_position == sub_position
    }

    /// Compare everything except identity
    pub fn same_content(&self, other: &Note) -> bool {
        Note { id: other.id, ..self.clone() } == *other
    }
}

/// Validate a sub-beat slot index
pub fn validate_sub_position(sub_position: u8) -> Result<u8, SolfaError> {
    if sub_position > MAX_SUB_POSITION {
        return Err(SolfaError::InvalidSubPosition(sub_position));
    }
    Ok(sub_position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_octave_markers_are_exclusive() {
        let high = Note::new(ScaleDegree::Do, 0, 0).with_octave(Octave::High);
        assert!(high.is_high_octave());
        assert!(!high.is_low_octave());

        let low = Note::new(ScaleDegree::Do, 0, 0).with_octave(Octave::from_markers(false, true));
        assert!(low.is_low_octave());
        assert!(!low.is_high_octave());

        // Both flags set collapses to the normal register
        assert_eq!(Octave::from_markers(true, true), Octave::Normal);
    }

    #[test]
    fn test_octave_clamps() {
        assert_eq!(Octave::from_register(-5), Octave::DoubleLow);
        assert_eq!(Octave::from_register(9), Octave::DoubleHigh);
        assert_eq!(Octave::High.shifted(-2), Octave::Low);
        assert_eq!(Octave::DoubleLow.shifted(-1), Octave::DoubleLow);
    }

    #[test]
    fn test_octave_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Octave::Low).unwrap(), "-1");
        let parsed: Octave = serde_json::from_str("2").unwrap();
        assert_eq!(parsed, Octave::DoubleHigh);
    }

    #[test]
    fn test_subdivision_strings() {
        assert_eq!("..".parse::<Subdivision>().unwrap(), Subdivision::DoubleDot);
        assert_eq!(Subdivision::TripleDot.as_str(), "...");
        assert_eq!(serde_json::to_string(&Subdivision::None).unwrap(), "\"\"");
        assert!("....".parse::<Subdivision>().is_err());
    }

    #[test]
    fn test_note_json_shape() {
        let note = Note::new(ScaleDegree::Sol, 4, 1).with_accidental(Some(Accidental::Sharp));
        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(value["type"], "s");
        assert_eq!(value["duration"], "beat");
        assert_eq!(value["sub_position"], 1);
        assert_eq!(value["accidental"], "sharp");
        assert!(value.get("dynamic").is_none());
    }

    #[test]
    fn test_note_deserializes_without_id() {
        let note: Note = serde_json::from_str(
            r#"{"type":"m","duration":"half","position":3,"sub_position":2}"#,
        )
        .unwrap();
        assert_eq!(note.degree, ScaleDegree::Mi);
        assert_eq!(note.duration, NoteDuration::Half);
        assert_eq!(note.subdivision, Subdivision::None);
        assert_eq!(note.slot(), (3, 2));
    }

    #[test]
    fn test_same_content_ignores_id() {
        let a = Note::new(ScaleDegree::Re, 1, 0);
        let b = a.clone().with_fresh_id();
        assert_ne!(a, b);
        assert!(a.same_content(&b));
        assert!(!a.same_content(&b.with_duration(NoteDuration::Half)));
    }

    #[test]
    fn test_validate_sub_position() {
        assert_eq!(validate_sub_position(3), Ok(3));
        assert_eq!(validate_sub_position(4), Err(SolfaError::InvalidSubPosition(4)));
    }

    #[test]
    fn test_voice_part_parse() {
        assert_eq!("alto".parse::<VoicePart>().unwrap(), VoicePart::A);
        assert_eq!("B".parse::<VoicePart>().unwrap(), VoicePart::B);
        assert!("X".parse::<VoicePart>().is_err());
    }

    #[test]
    fn test_dynamic_and_duration_parse() {
        assert_eq!("mf".parse::<Dynamic>().unwrap(), Dynamic::Mf);
        assert!("mff".parse::<Dynamic>().is_err());
        assert_eq!("eighth".parse::<NoteDuration>().unwrap(), NoteDuration::Eighth);
        assert!("whole".parse::<NoteDuration>().is_err());
    }
}
