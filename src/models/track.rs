//! Per-voice note tracks
//!
//! A [`Track`] keeps its notes ordered by `(position, sub_position)`. The
//! sort is stable, so notes sharing a slot keep their insertion order.
//! Tracks never deduplicate; slot uniqueness is the session's job.

use serde::{Deserialize, Serialize};

use super::note::{Note, NoteId, VoicePart};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Track {
    notes: Vec<Note>,
}

impl Track {
    pub fn new() -> Self {
        Self { notes: Vec::new() }
    }

    /// Build a track from notes in the given order, without sorting.
    /// Paste produces tracks like this.
    pub fn from_unsorted(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }

    /// Insert `note` and re-sort the whole track by slot
    pub fn add_note(&self, note: Note) -> Track {
        let mut notes = self.notes.clone();
        notes.push(note);
        notes.sort_by_key(Note::slot);
        Track { notes }
    }

    /// Drop every note at exactly `(position, sub_position)`
    pub fn remove_note(&self, position: u32, sub_position: u8) -> Track {
        self.filter(|n| !n.is_at(position, sub_position))
    }

    pub fn find_note_at(&self, position: u32, sub_position: u8) -> Option<&Note> {
        self.notes.iter().find(|n| n.is_at(position, sub_position))
    }

    pub fn find_by_id(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn filter(&self, keep: impl Fn(&Note) -> bool) -> Track {
        Track {
            notes: self.notes.iter().filter(|n| keep(n)).cloned().collect(),
        }
    }

    /// Replace every note in place, preserving order
    pub fn map(&self, f: impl Fn(&Note) -> Note) -> Track {
        Track {
            notes: self.notes.iter().map(f).collect(),
        }
    }

    /// Append notes at the end without re-sorting
    pub fn appended(&self, extra: impl IntoIterator<Item = Note>) -> Track {
        let mut notes = self.notes.clone();
        notes.extend(extra);
        Track { notes }
    }

    /// True when the notes are in non-decreasing slot order
    pub fn is_sorted(&self) -> bool {
        self.notes.windows(2).all(|w| w[0].slot() <= w[1].slot())
    }
}

impl<'a> IntoIterator for &'a Track {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}

/// The four SATB tracks, serialized as `{ "S": [...], "A": [...], ... }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoiceTracks {
    #[serde(rename = "S", default)]
    pub soprano: Track,
    #[serde(rename = "A", default)]
    pub alto: Track,
    #[serde(rename = "T", default)]
    pub tenor: Track,
    #[serde(rename = "B", default)]
    pub bass: Track,
}

impl VoiceTracks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, part: VoicePart) -> &Track {
        match part {
            VoicePart::S => &self.soprano,
            VoicePart::A => &self.alto,
            VoicePart::T => &self.tenor,
            VoicePart::B => &self.bass,
        }
    }

    pub fn get_mut(&mut self, part: VoicePart) -> &mut Track {
        match part {
            VoicePart::S => &mut self.soprano,
            VoicePart::A => &mut self.alto,
            VoicePart::T => &mut self.tenor,
            VoicePart::B => &mut self.bass,
        }
    }

    /// Copy with one track replaced
    pub fn with_track(&self, part: VoicePart, track: Track) -> VoiceTracks {
        let mut next = self.clone();
        *next.get_mut(part) = track;
        next
    }

    /// Build a new set of tracks by transforming each voice
    pub fn map_tracks(&self, f: impl Fn(VoicePart, &Track) -> Track) -> VoiceTracks {
        VoiceTracks {
            soprano: f(VoicePart::S, &self.soprano),
            alto: f(VoicePart::A, &self.alto),
            tenor: f(VoicePart::T, &self.tenor),
            bass: f(VoicePart::B, &self.bass),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (VoicePart, &Track)> {
        VoicePart::ALL.into_iter().map(move |p| (p, self.get(p)))
    }

    pub fn total_notes(&self) -> usize {
        self.iter().map(|(_, t)| t.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_notes() == 0
    }
}
