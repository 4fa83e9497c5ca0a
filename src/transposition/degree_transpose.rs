/// Degree-based transposition for movable-do sol-fa
///
/// Transposition here moves by whole scale degrees, not semitones: one step
/// up from `m` is `f`, one step up from `t` wraps to `d`. Accidentals ride
/// along untouched; octave registers are not adjusted on wrap.

use crate::models::{Note, ScaleDegree};

/// Index of a degree in the fixed order [d, r, m, f, s, l, t]
pub fn degree_index(degree: ScaleDegree) -> usize {
    degree.index()
}

/// Move `degree` by `steps` scale degrees, wrapping modulo 7
pub fn transpose_degree(degree: ScaleDegree, steps: i64) -> ScaleDegree {
    degree.step(steps)
}

/// Ascending diatonic interval from `from` to `to` (0-6)
pub fn degree_interval(from: ScaleDegree, to: ScaleDegree) -> usize {
    to.steps_from(from)
}

/// Copy of `note` with its degree moved by `steps`
pub fn transpose_note(note: &Note, steps: i64) -> Note {
    Note {
        degree: transpose_degree(note.degree, steps),
        ..note.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transpose_up_and_wrap() {
        assert_eq!(transpose_degree(ScaleDegree::Do, 1), ScaleDegree::Re);
        assert_eq!(transpose_degree(ScaleDegree::Ti, 1), ScaleDegree::Do);
        assert_eq!(transpose_degree(ScaleDegree::Sol, 4), ScaleDegree::Re);
    }

    #[test]
    fn test_transpose_down_and_wrap() {
        assert_eq!(transpose_degree(ScaleDegree::Do, -1), ScaleDegree::Ti);
        assert_eq!(transpose_degree(ScaleDegree::Mi, -9), ScaleDegree::Do);
    }

    #[test]
    fn test_transpose_is_group_action() {
        // transpose(transpose(x, a), b) == transpose(x, a + b) for all x, a, b
        for degree in ScaleDegree::ORDER {
            for a in -15..=15 {
                for b in -15..=15 {
                    assert_eq!(
                        transpose_degree(transpose_degree(degree, a), b),
                        transpose_degree(degree, a + b),
                        "degree={} a={} b={}",
                        degree,
                        a,
                        b
                    );
                }
            }
        }
    }

    #[test]
    fn test_transpose_by_seven_is_identity() {
        for degree in ScaleDegree::ORDER {
            assert_eq!(transpose_degree(degree, 7), degree);
            assert_eq!(transpose_degree(degree, -14), degree);
        }
    }

    #[test]
    fn test_degree_interval() {
        assert_eq!(degree_interval(ScaleDegree::Do, ScaleDegree::Sol), 4);
        assert_eq!(degree_interval(ScaleDegree::Sol, ScaleDegree::Do), 3);
        assert_eq!(degree_index(ScaleDegree::Ti), 6);
    }

    #[test]
    fn test_transpose_note_keeps_identity_and_slot() {
        let note = Note::new(ScaleDegree::La, 6, 2);
        let moved = transpose_note(&note, 2);
        assert_eq!(moved.degree, ScaleDegree::Do);
        assert_eq!(moved.id, note.id);
        assert_eq!(moved.slot(), (6, 2));
    }
}
