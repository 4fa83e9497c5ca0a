use serde::{Deserialize, Serialize};

use super::{notes_in_range, Selection};
use crate::models::{TimeSignature, VoiceTracks};

/// Copied notes, per part, with the position the copy started at
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Clipboard {
    pub notes: VoiceTracks,
    pub start_position: u32,
}

impl Clipboard {
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Position shift that lands the copy at the start of `target_measure`
    pub fn offset_to(&self, target_measure: u32, ts: TimeSignature) -> i64 {
        ts.measure_start(target_measure) as i64 - self.start_position as i64
    }
}

pub fn copy_to_clipboard(tracks: &VoiceTracks, selection: &Selection, ts: TimeSignature) -> Clipboard {
    Clipboard {
        notes: notes_in_range(tracks, selection.start_measure, selection.end_measure, ts),
        start_position: selection.start_position(ts),
    }
}

/// Append the clipboard's notes, shifted to `target_measure`, to each part.
///
/// The result is neither re-sorted nor deduplicated. Pasted notes get fresh
/// ids so they never alias the notes they were copied from.
pub fn paste_from_clipboard(
    tracks: &VoiceTracks,
    clipboard: &Clipboard,
    target_measure: u32,
    ts: TimeSignature,
) -> VoiceTracks {
    let offset = clipboard.offset_to(target_measure, ts);
    tracks.map_tracks(|part, track| {
        let shifted = clipboard.notes.get(part).iter().map(|note| {
            let mut pasted = note.clone().with_fresh_id();
            pasted.position = (note.position as i64 + offset).clamp(0, i64::from(u32::MAX)) as u32;
            pasted
        });
        track.appended(shifted)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Note, ScaleDegree, Track, VoicePart};

    fn tracks() -> VoiceTracks {
        let soprano = Track::new()
            .add_note(Note::new(ScaleDegree::Do, 4, 0))
            .add_note(Note::new(ScaleDegree::Mi, 5, 1))
            .add_note(Note::new(ScaleDegree::Sol, 9, 0));
        let alto = Track::new().add_note(Note::new(ScaleDegree::La, 6, 0));
        VoiceTracks::new()
            .with_track(VoicePart::S, soprano)
            .with_track(VoicePart::A, alto)
    }

    #[test]
    fn test_copy_records_start_position() {
        let ts = TimeSignature::FourFour;
        let clipboard = copy_to_clipboard(&tracks(), &Selection::measures(1, 1, ts), ts);
        assert_eq!(clipboard.start_position, 4);
        assert_eq!(clipboard.notes.get(VoicePart::S).len(), 2);
        assert_eq!(clipboard.notes.get(VoicePart::A).len(), 1);
    }

    #[test]
    fn test_paste_shifts_and_appends() {
        let ts = TimeSignature::FourFour;
        let original = tracks();
        let clipboard = copy_to_clipboard(&original, &Selection::measures(1, 1, ts), ts);
        let pasted = paste_from_clipboard(&original, &clipboard, 0, ts);

        let positions: Vec<(u32, u8)> = pasted.get(VoicePart::S).iter().map(|n| n.slot()).collect();
        // Appended after the existing notes, not merged into order
        assert_eq!(positions, vec![(4, 0), (5, 1), (9, 0), (0, 0), (1, 1)]);
        assert!(!pasted.get(VoicePart::S).is_sorted());
        assert_eq!(pasted.get(VoicePart::A).iter().last().map(|n| n.position), Some(2));
    }

    #[test]
    fn test_paste_back_in_place_reproduces_selection() {
        let ts = TimeSignature::FourFour;
        let original = tracks();
        let selection = Selection::measures(1, 1, ts);
        let clipboard = copy_to_clipboard(&original, &selection, ts);
        let pasted = paste_from_clipboard(&VoiceTracks::new(), &clipboard, selection.start_measure, ts);

        for part in VoicePart::ALL {
            let copied = clipboard.notes.get(part);
            let landed = pasted.get(part);
            assert_eq!(copied.len(), landed.len());
            for (a, b) in copied.iter().zip(landed.iter()) {
                assert!(a.same_content(b));
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_paste_earlier_measure() {
        let ts = TimeSignature::FourFour;
        let clipboard = copy_to_clipboard(&tracks(), &Selection::measures(2, 2, ts), ts);
        assert_eq!(clipboard.offset_to(0, ts), -8);
        let pasted = paste_from_clipboard(&VoiceTracks::new(), &clipboard, 0, ts);
        assert_eq!(pasted.get(VoicePart::S).notes()[0].position, 1);
    }

    #[test]
    fn test_copy_through_last_measure() {
        let ts = TimeSignature::FourFour;
        let clipboard = copy_to_clipboard(&tracks(), &Selection::measures(0, 1 << 30, ts), ts);
        assert_eq!(clipboard.start_position, 0);
        assert_eq!(clipboard.notes.get(VoicePart::S).len(), 3);

        let pasted = paste_from_clipboard(&VoiceTracks::new(), &clipboard, u32::MAX, ts);
        assert!(pasted.get(VoicePart::S).iter().all(|n| n.position == u32::MAX));
    }
}
