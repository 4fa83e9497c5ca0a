//! Key membership tests
//!
//! The interval of a note above the tonic is measured in scale degrees
//! (0-6). Two readings of "is this note in the key" exist:
//!
//! - [`MembershipStrategy::SemitoneTable`] compares that degree interval
//!   against the semitone interval set of the mode ({0,2,4,5,7,9,11} for
//!   major, {0,2,3,5,7,8,10} for minor). This is the editor's historical
//!   behaviour and the default, so saved expectations keep holding.
//! - [`MembershipStrategy::DiatonicDegree`] treats every degree interval of a
//!   seven-note scale as a member, which is what the plain sol-fa degrees
//!   (without accidentals) always are.

use serde::{Deserialize, Serialize};

use crate::models::{KeySignature, Mode, Note};

pub const MAJOR_SEMITONES: [usize; 7] = [0, 2, 4, 5, 7, 9, 11];
pub const MINOR_SEMITONES: [usize; 7] = [0, 2, 3, 5, 7, 8, 10];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MembershipStrategy {
    #[default]
    SemitoneTable,
    DiatonicDegree,
}

/// Degree interval of `note` above the key's tonic
pub fn interval_above_tonic(note: &Note, key: &KeySignature) -> usize {
    note.degree.steps_from(key.tonic)
}

/// Membership using the default strategy
pub fn is_note_in_key(note: &Note, key: &KeySignature) -> bool {
    is_note_in_key_with(note, key, MembershipStrategy::default())
}

pub fn is_note_in_key_with(note: &Note, key: &KeySignature, strategy: MembershipStrategy) -> bool {
    let interval = interval_above_tonic(note, key);
    match strategy {
        MembershipStrategy::SemitoneTable => {
            let table = match key.mode {
                Mode::Major => &MAJOR_SEMITONES,
                Mode::Minor => &MINOR_SEMITONES,
            };
            table.contains(&interval)
        }
        MembershipStrategy::DiatonicDegree => interval < 7,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScaleDegree;

    fn note(degree: ScaleDegree) -> Note {
        Note::new(degree, 0, 0)
    }

    #[test]
    fn test_semitone_table_in_c_major() {
        let c = KeySignature::default();
        // Degree intervals 0, 2, 4 and 5 appear in the major semitone set; 1, 3 and 6 do not
        let members: Vec<ScaleDegree> = ScaleDegree::ORDER
            .into_iter()
            .filter(|d| is_note_in_key(&note(*d), &c))
            .collect();
        assert_eq!(members, vec![ScaleDegree::Do, ScaleDegree::Mi, ScaleDegree::Sol, ScaleDegree::La]);
    }

    #[test]
    fn test_semitone_table_in_minor() {
        let a_minor = KeySignature::default().relative_key();
        // Intervals above la: la=0, ti=1, do=2, re=3, mi=4, fa=5, sol=6
        let members: Vec<ScaleDegree> = ScaleDegree::ORDER
            .into_iter()
            .filter(|d| is_note_in_key_with(&note(*d), &a_minor, MembershipStrategy::SemitoneTable))
            .collect();
        assert_eq!(members, vec![ScaleDegree::Do, ScaleDegree::Re, ScaleDegree::Fa, ScaleDegree::La]);
    }

    #[test]
    fn test_diatonic_degree_accepts_every_degree() {
        let g = KeySignature::named("G major").unwrap();
        for degree in ScaleDegree::ORDER {
            assert!(is_note_in_key_with(&note(degree), &g, MembershipStrategy::DiatonicDegree));
        }
    }

    #[test]
    fn test_interval_above_tonic() {
        let g = KeySignature::named("G major").unwrap();
        assert_eq!(interval_above_tonic(&note(ScaleDegree::Do), &g), 3);
        assert_eq!(interval_above_tonic(&note(ScaleDegree::Sol), &g), 0);
    }
}
