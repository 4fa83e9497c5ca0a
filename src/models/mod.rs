//! Models module for the sol-fa editor
//!
//! Scale degrees, notes, voice tracks, signatures and the composition
//! document that the editing session works on.

pub mod composition;
pub mod degree;
pub mod key_signature;
pub mod note;
pub mod time_signature;
pub mod tool;
pub mod track;

// Re-export commonly used types
pub use composition::{
    box_key, parse_track_key, segment_key, AuxTrackKind, AuxTracks, ChordSymbol, Composition, DynamicMarking,
    LyricEntry, Marker, Measure,
};
pub use degree::ScaleDegree;
pub use key_signature::{KeySignature, Mode, KEY_SIGNATURE_NAMES};
pub use note::{
    validate_sub_position, Accidental, Articulation, Dynamic, Note, NoteDuration, NoteId, Octave, Subdivision,
    VoicePart, MAX_SUB_POSITION,
};
pub use time_signature::TimeSignature;
pub use tool::{RepeatCoda, TempoMarking, Tool};
pub use track::{Track, VoiceTracks};
