//! Automatic SATB harmonization of a soprano note

use log::debug;
use serde::Serialize;

use super::chords::{chord_notes, ChordProgression, ChordQuality};
use super::suggest::{ChordSuggester, DiatonicSuggester, SuggestionContext};
use super::voice_leading::{RuleSet, VoiceLeadingReport};
use crate::models::{KeySignature, Note, NoteId, VoicePart};

/// Register of each lower voice relative to the soprano, in octaves
pub const HARMONY_OCTAVE_OFFSETS: [(VoicePart, i32); 3] =
    [(VoicePart::A, -1), (VoicePart::T, -1), (VoicePart::B, -2)];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Harmonization {
    pub chord: ChordProgression,
    /// Set when the rooted-on-melody chord failed and a suggestion replaced it
    pub substituted: bool,
    pub report: VoiceLeadingReport,
    /// Derived alto, tenor and bass notes, in that order
    pub notes: Vec<(VoicePart, Note)>,
}

pub struct Harmonizer {
    rules: RuleSet,
    suggester: Box<dyn ChordSuggester>,
}

impl Harmonizer {
    pub fn new(rules: RuleSet, suggester: Box<dyn ChordSuggester>) -> Self {
        Self { rules, suggester }
    }

    /// Standard rules with diatonic suggestions when `strict`, otherwise the
    /// permissive rules, under which no substitution ever happens
    pub fn from_strictness(strict: bool) -> Self {
        Self::new(
            RuleSet::strict(strict),
            Box::new(DiatonicSuggester::new(RuleSet::strict(strict))),
        )
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Pick a chord for `soprano` and derive the three lower voices.
    ///
    /// The first guess is a major chord rooted on the soprano degree. When it
    /// follows `previous` badly, the first suggestion for what comes after
    /// `previous` is used instead (if there is one).
    pub fn harmonize(
        &self,
        soprano: &Note,
        previous: Option<&ChordProgression>,
        key: &KeySignature,
    ) -> Harmonization {
        let hypothesis = ChordProgression::new(ChordQuality::Major, soprano.degree);
        let mut chord = hypothesis.clone();
        let mut substituted = false;
        let mut report = VoiceLeadingReport {
            valid: true,
            issues: Vec::new(),
        };

        if let Some(prev) = previous {
            report = self.rules.check(prev, &hypothesis);
            if !report.valid {
                let context = SuggestionContext {
                    melody: Some(soprano.degree),
                    previous_chords: vec![prev.clone()],
                    ..SuggestionContext::new(key.tonic)
                };
                if let Some(first) = self.suggester.suggest(prev, &context).into_iter().next() {
                    debug!(
                        "harmonize: {}{} -> {}{} ({})",
                        hypothesis.root,
                        hypothesis.quality.suffix(),
                        first.root,
                        first.quality.suffix(),
                        report.issues.join(", ")
                    );
                    report = self.rules.check(prev, &first);
                    chord = first;
                    substituted = true;
                }
            }
        }

        Harmonization {
            notes: derive_voices(soprano, &chord, key),
            chord,
            substituted,
            report,
        }
    }
}

impl Default for Harmonizer {
    fn default() -> Self {
        Self::from_strictness(true)
    }
}

/// Alto, tenor and bass notes for `chord` under `soprano`.
///
/// Each copies the soprano's slot, rhythm and expression, takes its chord
/// tone and the key's accidental for that tone, and sits below the soprano
/// by the voice's octave offset.
pub fn derive_voices(soprano: &Note, chord: &ChordProgression, key: &KeySignature) -> Vec<(VoicePart, Note)> {
    let voicing = chord_notes(chord);
    HARMONY_OCTAVE_OFFSETS
        .iter()
        .map(|(part, offset)| {
            let degree = voicing.get(*part);
            let note = Note {
                id: NoteId::new(),
                degree,
                octave: soprano.octave.shifted(*offset),
                accidental: key.accidental_for(degree),
                ..soprano.clone()
            };
            (*part, note)
        })
        .collect()
}
