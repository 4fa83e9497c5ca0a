//! Chord qualities, progression entries and SATB chord-note derivation
//!
//! Chord tones are counted in scale-degree steps above the root, not in
//! semitones: a "major" chord on any root is root + 2 + 4 steps.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::SolfaError;
use crate::models::{ScaleDegree, VoicePart};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    Dominant7,
    Major7,
    Minor7,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 7] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Diminished,
        ChordQuality::Augmented,
        ChordQuality::Dominant7,
        ChordQuality::Major7,
        ChordQuality::Minor7,
    ];

    /// Scale-degree offsets of the chord tones above the root
    pub fn intervals(&self) -> &'static [usize] {
        match self {
            ChordQuality::Major => &[0, 2, 4],
            ChordQuality::Minor => &[0, 1, 4],
            ChordQuality::Diminished => &[0, 1, 3],
            ChordQuality::Augmented => &[0, 2, 5],
            ChordQuality::Dominant7 => &[0, 2, 4, 6],
            ChordQuality::Major7 => &[0, 2, 4, 5],
            ChordQuality::Minor7 => &[0, 1, 4, 6],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChordQuality::Major => "major",
            ChordQuality::Minor => "minor",
            ChordQuality::Diminished => "diminished",
            ChordQuality::Augmented => "augmented",
            ChordQuality::Dominant7 => "dominant7",
            ChordQuality::Major7 => "major7",
            ChordQuality::Minor7 => "minor7",
        }
    }

    /// Suffix used when printing a chord symbol on the Chord track
    pub fn suffix(&self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Diminished => "°",
            ChordQuality::Augmented => "+",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Major7 => "maj7",
            ChordQuality::Minor7 => "m7",
        }
    }

    pub fn is_seventh(&self) -> bool {
        self.intervals().len() == 4
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChordQuality {
    type Err = SolfaError;

    /// Accepts the long names and the short chord-palette values
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" | "maj" => Ok(ChordQuality::Major),
            "minor" | "min" | "m" => Ok(ChordQuality::Minor),
            "diminished" | "dim" => Ok(ChordQuality::Diminished),
            "augmented" | "aug" => Ok(ChordQuality::Augmented),
            "dominant7" | "7" => Ok(ChordQuality::Dominant7),
            "major7" | "maj7" => Ok(ChordQuality::Major7),
            "minor7" | "m7" => Ok(ChordQuality::Minor7),
            _ => Err(SolfaError::InvalidChordQuality(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modulation {
    pub from: ScaleDegree,
    pub to: ScaleDegree,
}

impl Modulation {
    /// Scale-degree steps from the old tonic to the new one
    pub fn steps(&self) -> usize {
        self.to.steps_from(self.from)
    }
}

/// One entry of the running chord progression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordProgression {
    #[serde(rename = "type")]
    pub quality: ChordQuality,
    pub root: ScaleDegree,
    #[serde(default)]
    pub inversion: u8,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub secondary_dominant: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modulation: Option<Modulation>,
}

impl ChordProgression {
    pub fn new(quality: ChordQuality, root: ScaleDegree) -> Self {
        Self {
            quality,
            root,
            inversion: 0,
            secondary_dominant: false,
            modulation: None,
        }
    }

    /// All chord tones, root first
    pub fn degrees(&self) -> Vec<ScaleDegree> {
        self.quality
            .intervals()
            .iter()
            .map(|i| self.root.step(*i as i64))
            .collect()
    }

    pub fn contains(&self, degree: ScaleDegree) -> bool {
        self.degrees().contains(&degree)
    }

    /// Same harmony (quality and root), ignoring inversion and annotations
    pub fn same_harmony(&self, other: &ChordProgression) -> bool {
        self.quality == other.quality && self.root == other.root
    }
}

/// One chord tone per voice, serialized as `{ "S": "d", "A": "m", ... }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordVoicing {
    #[serde(rename = "S")]
    pub soprano: ScaleDegree,
    #[serde(rename = "A")]
    pub alto: ScaleDegree,
    #[serde(rename = "T")]
    pub tenor: ScaleDegree,
    #[serde(rename = "B")]
    pub bass: ScaleDegree,
}

impl ChordVoicing {
    pub fn get(&self, part: VoicePart) -> ScaleDegree {
        match part {
            VoicePart::S => self.soprano,
            VoicePart::A => self.alto,
            VoicePart::T => self.tenor,
            VoicePart::B => self.bass,
        }
    }
}

/// Distribute a chord's tones over the four voices.
///
/// S, A, T take the first three chord tones; B takes the fourth (seventh
/// chords) or doubles the root (triads).
pub fn chord_notes(chord: &ChordProgression) -> ChordVoicing {
    let notes = chord.degrees();
    ChordVoicing {
        soprano: notes[0],
        alto: notes[1],
        tenor: notes[2],
        bass: notes.get(3).copied().unwrap_or(notes[0]),
    }
}

/// Stacked-third triads on each degree of the key, tonic first.
///
/// The quality tables count scale-degree steps, so stacking diatonic thirds
/// is always the `major` table; the key decides how the chord actually sounds.
pub fn diatonic_triads(tonic: ScaleDegree) -> Vec<ChordProgression> {
    (0..7)
        .map(|step| ChordProgression::new(ChordQuality::Major, tonic.step(step)))
        .collect()
}

/// The stock progressions offered by the chord palette
pub fn common_progressions() -> Vec<Vec<ChordProgression>> {
    use ChordQuality::*;
    use ScaleDegree::*;
    let chord = ChordProgression::new;
    vec![
        // I - IV - V - I
        vec![chord(Major, Do), chord(Major, Fa), chord(Major, Sol), chord(Major, Do)],
        // I - vi - IV - V
        vec![chord(Major, Do), chord(Minor, La), chord(Major, Fa), chord(Major, Sol)],
        // ii - V - I
        vec![chord(Minor, Re), chord(Major, Sol), chord(Major, Do)],
    ]
}

/// Move a progression into a new key.
///
/// Every root shifts by the degree distance between the two tonics, and each
/// entry records the modulation it went through.
pub fn apply_modulation(progression: &[ChordProgression], modulation: Modulation) -> Vec<ChordProgression> {
    let steps = modulation.steps() as i64;
    progression
        .iter()
        .map(|chord| ChordProgression {
            root: chord.root.step(steps),
            modulation: Some(modulation),
            ..chord.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ScaleDegree::*;

    #[test]
    fn test_c_major_triad_doubles_root_in_bass() {
        let voicing = chord_notes(&ChordProgression::new(ChordQuality::Major, Do));
        assert_eq!(
            voicing,
            ChordVoicing { soprano: Do, alto: Mi, tenor: Sol, bass: Do }
        );
    }

    #[test]
    fn test_seventh_chord_puts_seventh_in_bass() {
        let voicing = chord_notes(&ChordProgression::new(ChordQuality::Dominant7, Sol));
        assert_eq!(voicing.soprano, Sol);
        assert_eq!(voicing.alto, Ti);
        assert_eq!(voicing.tenor, Re);
        assert_eq!(voicing.bass, Fa);
    }

    #[test]
    fn test_chord_notes_wrap_past_ti() {
        let voicing = chord_notes(&ChordProgression::new(ChordQuality::Minor, La));
        assert_eq!(voicing.get(VoicePart::A), Ti);
        assert_eq!(voicing.get(VoicePart::T), Mi);
        assert_eq!(voicing.get(VoicePart::B), La);
    }

    #[test]
    fn test_interval_table() {
        assert_eq!(ChordQuality::Major.intervals(), &[0, 2, 4]);
        assert_eq!(ChordQuality::Dominant7.intervals(), &[0, 2, 4, 6]);
        assert_eq!(ChordQuality::ALL.iter().filter(|q| q.is_seventh()).count(), 3);
    }

    #[test]
    fn test_quality_parse_palette_values() {
        assert_eq!("maj7".parse::<ChordQuality>().unwrap(), ChordQuality::Major7);
        assert_eq!("7".parse::<ChordQuality>().unwrap(), ChordQuality::Dominant7);
        assert_eq!("minor".parse::<ChordQuality>().unwrap(), ChordQuality::Minor);
        assert!("sus4".parse::<ChordQuality>().is_err());
    }

    #[test]
    fn test_diatonic_triads_of_g() {
        let triads = diatonic_triads(Sol);
        assert_eq!(triads.len(), 7);
        assert_eq!(triads[0], ChordProgression::new(ChordQuality::Major, Sol));
        assert_eq!(triads[4].root, Re);
        assert_eq!(triads[6].root, Fa);
        assert_eq!(triads[6].degrees(), vec![Fa, La, Do]);
    }

    #[test]
    fn test_apply_modulation_shifts_roots() {
        let progression = &common_progressions()[0];
        let modulated = apply_modulation(progression, Modulation { from: Do, to: Sol });
        let roots: Vec<_> = modulated.iter().map(|c| c.root).collect();
        assert_eq!(roots, vec![Sol, Do, Re, Sol]);
        assert!(modulated.iter().all(|c| c.modulation.is_some()));
        assert!(modulated.iter().zip(progression).all(|(a, b)| a.quality == b.quality));
    }

    #[test]
    fn test_progression_json_shape() {
        let chord = ChordProgression::new(ChordQuality::Minor7, Re);
        let value = serde_json::to_value(&chord).unwrap();
        assert_eq!(value["type"], "minor7");
        assert_eq!(value["root"], "r");
        assert!(value.get("secondary_dominant").is_none());

        let parsed: ChordProgression =
            serde_json::from_str(r#"{"type":"major","root":"s","inversion":1,"secondary_dominant":true}"#).unwrap();
        assert!(parsed.secondary_dominant);
        assert_eq!(parsed.inversion, 1);
    }
}
