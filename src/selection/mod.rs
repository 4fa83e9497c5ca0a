//! Selection rectangle and range queries over the voice tracks

pub mod batch;
pub mod clipboard;

use serde::{Deserialize, Serialize};

use crate::models::{Note, TimeSignature, VoicePart, VoiceTracks};

pub use clipboard::{copy_to_clipboard, paste_from_clipboard, Clipboard};

/// Measure/beat rectangle chosen in the grid
///
/// `start <= end` on both axes is expected but not enforced; see
/// [`Selection::is_well_formed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub start_measure: u32,
    pub end_measure: u32,
    pub start_beat: u32,
    pub end_beat: u32,
    /// Parts highlighted in the grid. Range operations act on all four parts.
    #[serde(default)]
    pub selected_parts: Vec<VoicePart>,
}

impl Selection {
    /// Every beat of measures `start..=end`
    pub fn measures(start_measure: u32, end_measure: u32, ts: TimeSignature) -> Self {
        Self {
            start_measure,
            end_measure,
            start_beat: 0,
            end_beat: ts.beats_per_measure().saturating_sub(1),
            selected_parts: VoicePart::ALL.to_vec(),
        }
    }

    /// Everything in the first `measure_count` measures
    pub fn all(measure_count: u32, ts: TimeSignature) -> Self {
        Self::measures(0, measure_count.saturating_sub(1), ts)
    }

    pub fn is_well_formed(&self) -> bool {
        self.start_measure <= self.end_measure && self.start_beat <= self.end_beat
    }

    /// First global beat position covered by the measure range
    pub fn start_position(&self, ts: TimeSignature) -> u32 {
        ts.measure_start(self.start_measure)
    }

    /// True when the note's measure and beat both fall inside the rectangle.
    ///
    /// Only the beat is compared, never the sub-position.
    pub fn contains(&self, note: &Note, ts: TimeSignature) -> bool {
        let measure = ts.measure_of(note.position);
        let beat = ts.beat_of(note.position);
        measure >= self.start_measure
            && measure <= self.end_measure
            && beat >= self.start_beat
            && beat <= self.end_beat
    }
}

/// Notes of each part whose position lies in
/// `[start_measure * bpm, (end_measure + 1) * bpm)`
pub fn notes_in_range(tracks: &VoiceTracks, start_measure: u32, end_measure: u32, ts: TimeSignature) -> VoiceTracks {
    let (from, to) = ts.measure_span(start_measure, end_measure);
    tracks.map_tracks(|_, track| {
        track.filter(|note| {
            let position = u64::from(note.position);
            position >= from && position < to
        })
    })
}

/// See [`Selection::contains`]
pub fn is_note_in_selection(note: &Note, selection: &Selection, ts: TimeSignature) -> bool {
    selection.contains(note, ts)
}

/// Tracks with every note inside the selection rectangle removed
pub fn delete_selection(tracks: &VoiceTracks, selection: &Selection, ts: TimeSignature) -> VoiceTracks {
    tracks.map_tracks(|_, track| track.filter(|note| !selection.contains(note, ts)))
}
