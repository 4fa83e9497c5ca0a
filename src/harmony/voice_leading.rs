//! Voice-leading checks between two consecutive chords
//!
//! Each chord is realized through [`chord_notes`] and placed in a fixed
//! register per voice, counted in diatonic steps (S at 0, A and T one octave
//! down, B two octaves down). Rules compare the two realizations.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::chords::{chord_notes, ChordProgression};
use crate::models::VoicePart;

/// Octave offset per voice, in octaves below the soprano register
const VOICE_REGISTER: [(VoicePart, i32); 4] = [
    (VoicePart::S, 0),
    (VoicePart::A, -1),
    (VoicePart::T, -1),
    (VoicePart::B, -2),
];

/// Diatonic-step pitch of each voice, ordered S, A, T, B
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoicedChord {
    pub steps: [i32; 4],
}

impl VoicedChord {
    pub fn realize(chord: &ChordProgression) -> Self {
        let voicing = chord_notes(chord);
        let mut steps = [0; 4];
        for (slot, (part, octave)) in VOICE_REGISTER.iter().enumerate() {
            steps[slot] = voicing.get(*part).index() as i32 + 7 * octave;
        }
        Self { steps }
    }

    fn interval_class(&self, upper: usize, lower: usize) -> i32 {
        (self.steps[upper] - self.steps[lower]).rem_euclid(7)
    }

    fn motion(&self, next: &VoicedChord, voice: usize) -> i32 {
        (next.steps[voice] - self.steps[voice]).signum()
    }

    /// Sum of absolute step movement across all four voices
    pub fn total_motion(&self, next: &VoicedChord) -> u32 {
        self.steps
            .iter()
            .zip(next.steps.iter())
            .map(|(a, b)| (b - a).unsigned_abs())
            .sum()
    }
}

/// A single voice-leading rule
pub trait VoiceLeadingRule {
    fn name(&self) -> &'static str;
    fn message(&self) -> &'static str;
    /// True when moving from `prev` to `next` breaks this rule
    fn violated(&self, prev: &VoicedChord, next: &VoicedChord) -> bool;
}

/// True when some pair of voices holds `class` in both chords and moves in
/// the same direction
fn parallel_interval(prev: &VoicedChord, next: &VoicedChord, class: i32) -> bool {
    for upper in 0..4 {
        for lower in (upper + 1)..4 {
            let up = prev.motion(next, upper);
            let down = prev.motion(next, lower);
            if up != 0
                && up == down
                && prev.interval_class(upper, lower) == class
                && next.interval_class(upper, lower) == class
            {
                return true;
            }
        }
    }
    false
}

pub struct ParallelFifths;

impl VoiceLeadingRule for ParallelFifths {
    fn name(&self) -> &'static str {
        "parallelFifths"
    }

    fn message(&self) -> &'static str {
        "Avoid parallel fifths"
    }

    fn violated(&self, prev: &VoicedChord, next: &VoicedChord) -> bool {
        parallel_interval(prev, next, 4)
    }
}

pub struct ParallelOctaves;

impl VoiceLeadingRule for ParallelOctaves {
    fn name(&self) -> &'static str {
        "parallelOctaves"
    }

    fn message(&self) -> &'static str {
        "Avoid parallel octaves"
    }

    fn violated(&self, prev: &VoicedChord, next: &VoicedChord) -> bool {
        parallel_interval(prev, next, 0)
    }
}

/// Adjacent upper voices (S-A, A-T) must stay within an octave
pub struct VoiceSpacing;

impl VoiceLeadingRule for VoiceSpacing {
    fn name(&self) -> &'static str {
        "voiceSpacing"
    }

    fn message(&self) -> &'static str {
        "Maintain proper voice spacing"
    }

    fn violated(&self, _prev: &VoicedChord, next: &VoicedChord) -> bool {
        (0..2).any(|i| (next.steps[i] - next.steps[i + 1]).abs() > 7)
    }
}

/// Keeps a rule's name and message but never reports a violation
pub struct Unchecked {
    name: &'static str,
    message: &'static str,
}

impl VoiceLeadingRule for Unchecked {
    fn name(&self) -> &'static str {
        self.name
    }

    fn message(&self) -> &'static str {
        self.message
    }

    fn violated(&self, _prev: &VoicedChord, _next: &VoicedChord) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceLeadingReport {
    pub valid: bool,
    pub issues: Vec<String>,
}

/// Ordered list of rules run by [`RuleSet::check`]
pub struct RuleSet {
    rules: Vec<Box<dyn VoiceLeadingRule>>,
}

impl RuleSet {
    pub fn new(rules: Vec<Box<dyn VoiceLeadingRule>>) -> Self {
        Self { rules }
    }

    /// Parallel fifths, parallel octaves and voice spacing, all enforced
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(ParallelFifths),
            Box::new(ParallelOctaves),
            Box::new(VoiceSpacing),
        ])
    }

    /// The standard rule names with every check passing
    pub fn permissive() -> Self {
        let rules = Self::standard()
            .rules
            .iter()
            .map(|rule| {
                Box::new(Unchecked {
                    name: rule.name(),
                    message: rule.message(),
                }) as Box<dyn VoiceLeadingRule>
            })
            .collect();
        Self::new(rules)
    }

    pub fn strict(strict: bool) -> Self {
        if strict {
            Self::standard()
        } else {
            Self::permissive()
        }
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn check(&self, prev: &ChordProgression, next: &ChordProgression) -> VoiceLeadingReport {
        let from = VoicedChord::realize(prev);
        let to = VoicedChord::realize(next);
        let issues: Vec<String> = self
            .rules
            .iter()
            .filter(|rule| rule.violated(&from, &to))
            .map(|rule| rule.message().to_string())
            .collect();
        VoiceLeadingReport {
            valid: issues.is_empty(),
            issues,
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet").field("rules", &self.rule_names()).finish()
    }
}

/// Check `prev -> next` against the standard rules
pub fn check_voice_leading(prev: &ChordProgression, next: &ChordProgression) -> VoiceLeadingReport {
    RuleSet::standard().check(prev, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harmony::chords::ChordQuality;
    use crate::models::ScaleDegree::*;

    fn major(root: crate::models::ScaleDegree) -> ChordProgression {
        ChordProgression::new(ChordQuality::Major, root)
    }

    #[test]
    fn test_repeated_chord_is_clean() {
        let report = check_voice_leading(&major(Do), &major(Do));
        assert!(report.valid);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_realize_c_major() {
        // d=0, m=2-7, s=4-7, d=0-14
        assert_eq!(VoicedChord::realize(&major(Do)).steps, [0, -5, -3, -14]);
    }

    #[test]
    fn test_step_motion_moves_doubled_root_in_octaves() {
        // I -> ii: soprano and bass both carry the root up a step
        let report = check_voice_leading(&major(Do), &ChordProgression::new(ChordQuality::Minor, Re));
        assert!(!report.valid);
        assert!(report.issues.contains(&"Avoid parallel octaves".to_string()));
    }

    #[test]
    fn test_parallel_fifths_between_root_and_fifth() {
        // Tenor and bass hold a fifth (s over d, then l over r) and both rise
        let report = check_voice_leading(&major(Do), &ChordProgression::new(ChordQuality::Minor, Re));
        assert!(report.issues.contains(&"Avoid parallel fifths".to_string()));
    }

    #[test]
    fn test_wide_spacing_when_tones_wrap() {
        // Root t: alto (d) wraps to the bottom of its octave, 13 steps under soprano
        let next = ChordProgression::new(ChordQuality::Diminished, Ti);
        let report = check_voice_leading(&major(Do), &next);
        assert!(report.issues.contains(&"Maintain proper voice spacing".to_string()));
    }

    #[test]
    fn test_permissive_always_passes() {
        let rules = RuleSet::permissive();
        assert_eq!(rules.rule_names(), vec!["parallelFifths", "parallelOctaves", "voiceSpacing"]);
        for chord in crate::harmony::chords::diatonic_triads(Do) {
            assert!(rules.check(&major(Do), &chord).valid);
        }
    }

    #[test]
    fn test_total_motion() {
        let from = VoicedChord::realize(&major(Do));
        let to = VoicedChord::realize(&major(Fa));
        // S 0->3, A -5->-2, T -3->-7, B -14->-11
        assert_eq!(from.total_motion(&to), 13);
    }
}
