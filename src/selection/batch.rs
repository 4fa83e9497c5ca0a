//! Transforms applied to every note in a selection's measure range
//!
//! Matching is by part and [`NoteId`]: the range is computed once, then each
//! note whose id is in its own part's slice of the range is rewritten. Ids
//! are expected to be unique within a part. Notes outside the range come
//! back as-is.

use std::collections::HashSet;

use super::{notes_in_range, Selection};
use crate::models::{Note, NoteDuration, NoteId, TimeSignature, VoicePart, VoiceTracks};
use crate::transposition::transpose_note;

fn selected_ids(tracks: &VoiceTracks, selection: &Selection, ts: TimeSignature) -> HashSet<(VoicePart, NoteId)> {
    notes_in_range(tracks, selection.start_measure, selection.end_measure, ts)
        .iter()
        .flat_map(|(part, track)| track.iter().map(move |n| (part, n.id)))
        .collect()
}

fn map_selected(
    tracks: &VoiceTracks,
    selection: &Selection,
    ts: TimeSignature,
    f: impl Fn(&Note) -> Note,
) -> VoiceTracks {
    let ids = selected_ids(tracks, selection, ts);
    tracks.map_tracks(|part, track| {
        track.map(|note| if ids.contains(&(part, note.id)) { f(note) } else { note.clone() })
    })
}

/// Move every selected note by `steps` scale degrees (not semitones)
pub fn transpose(tracks: &VoiceTracks, selection: &Selection, steps: i64, ts: TimeSignature) -> VoiceTracks {
    map_selected(tracks, selection, ts, |note| transpose_note(note, steps))
}

/// Replace the duration of every selected note
pub fn change_duration(
    tracks: &VoiceTracks,
    selection: &Selection,
    duration: NoteDuration,
    ts: TimeSignature,
) -> VoiceTracks {
    map_selected(tracks, selection, ts, |note| note.clone().with_duration(duration))
}
