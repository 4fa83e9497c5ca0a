use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::models::{Marker, VoiceTracks};

/// State captured by one history entry
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tracks: VoiceTracks,
    #[serde(default)]
    pub markers: Vec<Marker>,
}

impl Snapshot {
    pub fn new(tracks: VoiceTracks, markers: Vec<Marker>) -> Self {
        Self { tracks, markers }
    }
}

/// Linear snapshot history with a pointer at the active entry
///
/// Committing after an undo drops every entry past the pointer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct History {
    /// Committed snapshots, oldest first
    pub entries: VecDeque<Snapshot>,
    /// Active entry (`None` while empty)
    pub index: Option<usize>,
    /// Maximum number of entries kept; the oldest is dropped beyond it
    max_size: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(100)
    }
}

impl History {
    /// Create an empty history keeping at most `max_size` entries (minimum 1)
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            index: None,
            max_size: max_size.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Snapshot at the pointer
    pub fn current(&self) -> Option<&Snapshot> {
        self.index.and_then(|i| self.entries.get(i))
    }

    /// Truncate past the pointer, append, and point at the new entry
    pub fn commit(&mut self, snapshot: Snapshot) {
        let keep = self.index.map_or(0, |i| i + 1);
        self.entries.truncate(keep);
        self.entries.push_back(snapshot);

        // Enforce max size; a deserialized history may carry 0
        while self.entries.len() > self.max_size.max(1) {
            self.entries.pop_front();
        }
        self.index = Some(self.entries.len() - 1);
    }

    /// Step back one entry; `None` at the first entry
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        let index = self.index.map(|i| i - 1);
        self.index = index;
        debug!("history: undo to {:?} of {}", index, self.entries.len());
        self.current()
    }

    /// Step forward one entry; `None` at the last entry
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            return None;
        }
        let index = self.index.map(|i| i + 1);
        self.index = index;
        debug!("history: redo to {:?} of {}", index, self.entries.len());
        self.current()
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.index, Some(i) if i > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.index, Some(i) if i + 1 < self.entries.len())
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index = None;
    }

    /// Get the number of available undo steps
    pub fn undo_count(&self) -> usize {
        self.index.unwrap_or(0)
    }

    /// Get the number of available redo steps
    pub fn redo_count(&self) -> usize {
        self.index.map_or(0, |i| self.entries.len() - i - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Marker, Note, ScaleDegree, Track, VoicePart};

    fn snapshot(n: u32) -> Snapshot {
        let track = (0..n).fold(Track::new(), |t, i| t.add_note(Note::new(ScaleDegree::Do, i, 0)));
        Snapshot::new(VoiceTracks::new().with_track(VoicePart::S, track), vec![Marker::new(n)])
    }

    fn history_of(len: u32) -> History {
        let mut history = History::new(100);
        for n in 0..len {
            history.commit(snapshot(n));
        }
        history
    }

    #[test]
    fn test_empty_history() {
        let mut history = History::default();
        assert!(history.is_empty());
        assert_eq!(history.index, None);
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert!(history.current().is_none());
    }

    #[test]
    fn test_commit_points_at_newest() {
        let history = history_of(3);
        assert_eq!(history.len(), 3);
        assert_eq!(history.index, Some(2));
        assert_eq!(history.current().unwrap().markers[0].position, 2);
    }

    #[test]
    fn test_commit_after_undo_truncates() {
        let mut history = history_of(5);
        history.undo();
        history.undo();
        assert_eq!(history.index, Some(2));

        history.commit(snapshot(9));
        assert_eq!(history.len(), 4);
        assert_eq!(history.index, Some(3));
        assert!(!history.can_redo());
        assert_eq!(history.current().unwrap().tracks.get(VoicePart::S).len(), 9);
    }

    #[test]
    fn test_undo_at_first_entry_is_noop() {
        let mut history = history_of(2);
        assert!(history.undo().is_some());
        let before = history.clone();
        assert!(history.undo().is_none());
        assert_eq!(history, before);
    }

    #[test]
    fn test_redo_at_last_entry_is_noop() {
        let mut history = history_of(3);
        let before = history.clone();
        assert!(history.redo().is_none());
        assert_eq!(history, before);
    }

    #[test]
    fn test_undo_redo_walk() {
        let mut history = history_of(3);
        assert_eq!(history.undo().unwrap().markers[0].position, 1);
        assert_eq!(history.undo().unwrap().markers[0].position, 0);
        assert_eq!(history.redo().unwrap().markers[0].position, 1);
        assert_eq!(history.undo_count(), 1);
        assert_eq!(history.redo_count(), 1);
    }

    #[test]
    fn test_max_size_drops_oldest() {
        let mut history = History::new(3);
        for n in 0..5 {
            history.commit(snapshot(n));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.index, Some(2));
        assert_eq!(history.entries[0].markers[0].position, 2);
    }

    #[test]
    fn test_zero_max_size_from_json_keeps_one_entry() {
        let mut history: History = serde_json::from_str(r#"{"max_size":0}"#).unwrap();
        assert_eq!(history.max_size(), 0);
        history.commit(snapshot(1));
        history.commit(snapshot(2));
        assert_eq!(history.len(), 1);
        assert_eq!(history.index, Some(0));
        assert_eq!(history.current().unwrap().markers[0].position, 2);
    }
}
