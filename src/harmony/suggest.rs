//! Next-chord suggestions

use serde::{Deserialize, Serialize};

use super::chords::{diatonic_triads, ChordProgression};
use super::voice_leading::{RuleSet, VoicedChord};
use crate::models::ScaleDegree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tension {
    High,
    Medium,
    Low,
}

impl Tension {
    /// Harmonic function of a chord built `step` degrees above the tonic
    pub fn of_step(step: usize) -> Tension {
        match step % 7 {
            4 | 6 => Tension::High,
            1 | 3 => Tension::Medium,
            _ => Tension::Low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionContext {
    pub key: ScaleDegree,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub melody: Option<ScaleDegree>,
    #[serde(default)]
    pub previous_chords: Vec<ChordProgression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_tension: Option<Tension>,
}

impl SuggestionContext {
    pub fn new(key: ScaleDegree) -> Self {
        Self {
            key,
            melody: None,
            previous_chords: Vec::new(),
            desired_tension: None,
        }
    }
}

/// Produces ordered alternatives for `current`, best first
pub trait ChordSuggester {
    fn suggest(&self, current: &ChordProgression, context: &SuggestionContext) -> Vec<ChordProgression>;
}

/// Never suggests anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSuggestions;

impl ChordSuggester for NoSuggestions {
    fn suggest(&self, _current: &ChordProgression, _context: &SuggestionContext) -> Vec<ChordProgression> {
        Vec::new()
    }
}

/// Ranks the diatonic triads of the context key.
///
/// Candidates must contain the melody degree when one is given. They are
/// ordered by voice-leading issues against `current`, then by total voice
/// motion, then by distance from the desired tension, then by scale step.
#[derive(Debug, Default)]
pub struct DiatonicSuggester {
    rules: RuleSet,
}

impl DiatonicSuggester {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }
}

impl ChordSuggester for DiatonicSuggester {
    fn suggest(&self, current: &ChordProgression, context: &SuggestionContext) -> Vec<ChordProgression> {
        let from = VoicedChord::realize(current);
        let mut ranked: Vec<((usize, u32, u8, usize), ChordProgression)> = diatonic_triads(context.key)
            .into_iter()
            .enumerate()
            .filter(|(_, chord)| context.melody.map_or(true, |m| chord.contains(m)))
            .map(|(step, chord)| {
                let issues = self.rules.check(current, &chord).issues.len();
                let motion = from.total_motion(&VoicedChord::realize(&chord));
                let tension = match context.desired_tension {
                    Some(wanted) if wanted != Tension::of_step(step) => 1,
                    _ => 0,
                };
                ((issues, motion, tension, step), chord)
            })
            .collect();
        ranked.sort_by_key(|(score, _)| *score);
        ranked.into_iter().map(|(_, chord)| chord).collect()
    }
}

/// Suggestions from [`DiatonicSuggester`] with the standard rules
pub fn suggest_next_chord(current: &ChordProgression, context: &SuggestionContext) -> Vec<ChordProgression> {
    DiatonicSuggester::default().suggest(current, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harmony::chords::ChordQuality;
    use ScaleDegree::*;

    #[test]
    fn test_no_suggestions() {
        let current = ChordProgression::new(ChordQuality::Major, Do);
        assert!(NoSuggestions.suggest(&current, &SuggestionContext::new(Do)).is_empty());
    }

    #[test]
    fn test_all_triads_without_melody() {
        let current = ChordProgression::new(ChordQuality::Major, Do);
        let suggestions = suggest_next_chord(&current, &SuggestionContext::new(Do));
        assert_eq!(suggestions.len(), 7);
        // Staying put breaks nothing and moves nothing
        assert_eq!(suggestions[0], current);
    }

    #[test]
    fn test_melody_filters_candidates() {
        let current = ChordProgression::new(ChordQuality::Major, Do);
        let context = SuggestionContext {
            melody: Some(Re),
            ..SuggestionContext::new(Do)
        };
        let suggestions = suggest_next_chord(&current, &context);
        let roots: Vec<_> = suggestions.iter().map(|c| c.root).collect();
        assert_eq!(suggestions.len(), 3);
        for root in [Re, Sol, Ti] {
            assert!(roots.contains(&root));
        }
        assert!(suggestions.iter().all(|c| c.contains(Re)));
    }

    #[test]
    fn test_suggestions_follow_key() {
        let current = ChordProgression::new(ChordQuality::Major, Sol);
        let suggestions = suggest_next_chord(&current, &SuggestionContext::new(Sol));
        assert_eq!(suggestions.len(), 7);
        assert!(suggestions.iter().any(|c| c.degrees() == vec![Fa, La, Do]));
    }

    #[test]
    fn test_tension_of_step() {
        assert_eq!(Tension::of_step(4), Tension::High);
        assert_eq!(Tension::of_step(3), Tension::Medium);
        assert_eq!(Tension::of_step(0), Tension::Low);
        assert_eq!(Tension::of_step(5), Tension::Low);
    }
}
