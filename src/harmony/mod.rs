//! Chord derivation, voice-leading checks, suggestions and harmonization

pub mod chords;
pub mod harmonize;
pub mod suggest;
pub mod voice_leading;

pub use chords::{
    apply_modulation, chord_notes, common_progressions, diatonic_triads, ChordProgression, ChordQuality,
    ChordVoicing, Modulation,
};
pub use harmonize::{derive_voices, Harmonization, Harmonizer};
pub use suggest::{suggest_next_chord, ChordSuggester, DiatonicSuggester, NoSuggestions, SuggestionContext, Tension};
pub use voice_leading::{check_voice_leading, RuleSet, VoiceLeadingReport, VoiceLeadingRule};
