// Range editing through keyboard shortcuts: copy, paste, transpose, delete, undo/redo

use solfa_editor_wasm::models::{Note, NoteDuration, ScaleDegree, TimeSignature, VoicePart};
use solfa_editor_wasm::selection::Selection;
use solfa_editor_wasm::shortcuts::ShortcutAction;
use solfa_editor_wasm::{EditorConfig, EditorSession};

/// Soprano d r in measure 0 and m in measure 1, without harmonization
fn session_with_melody() -> EditorSession {
    let config = EditorConfig {
        auto_harmonize: false,
        ..EditorConfig::default()
    };
    let mut session = EditorSession::new(config).unwrap();
    for (degree, position) in [(ScaleDegree::Do, 0), (ScaleDegree::Re, 1), (ScaleDegree::Mi, 4)] {
        session.add_note(VoicePart::S, Note::new(degree, position, 0)).unwrap();
    }
    session
}

fn soprano_from(session: &EditorSession, from: u32) -> Vec<(u32, ScaleDegree)> {
    let mut notes: Vec<(u32, ScaleDegree)> = session
        .track(VoicePart::S)
        .iter()
        .filter(|n| n.position >= from)
        .map(|n| (n.position, n.degree))
        .collect();
    notes.sort();
    notes
}

#[test]
fn test_copy_paste_transpose_undo_redo_delete() {
    let ts = TimeSignature::FourFour;
    let mut session = session_with_melody();
    assert_eq!(session.history().len(), 4);

    assert_eq!(session.handle_key("c", true), Some(ShortcutAction::Copy));
    assert_eq!(session.history().len(), 4, "copy must not touch history");

    session.set_selection(Selection::measures(2, 2, ts));
    session.handle_key("v", true);
    assert_eq!(soprano_from(&session, 8), vec![(8, ScaleDegree::Do), (9, ScaleDegree::Re)]);

    assert_eq!(session.handle_key("ArrowUp", true), Some(ShortcutAction::TransposeUp));
    assert_eq!(soprano_from(&session, 8), vec![(8, ScaleDegree::Re), (9, ScaleDegree::Mi)]);
    assert_eq!(soprano_from(&session, 0)[0], (0, ScaleDegree::Do), "outside the selection is untouched");
    assert_eq!(session.history().len(), 6);

    session.handle_key("Z", true);
    assert_eq!(soprano_from(&session, 8), vec![(8, ScaleDegree::Do), (9, ScaleDegree::Re)]);
    session.handle_key("y", true);
    assert_eq!(soprano_from(&session, 8), vec![(8, ScaleDegree::Re), (9, ScaleDegree::Mi)]);

    session.handle_key("Delete", false);
    assert!(soprano_from(&session, 8).is_empty());
    assert_eq!(session.track(VoicePart::S).len(), 3);
    assert_eq!(session.history().len(), 7);
}

#[test]
fn test_paste_without_copy_is_a_no_op() {
    let mut session = session_with_melody();
    assert_eq!(session.handle_key("v", true), Some(ShortcutAction::Paste));
    assert_eq!(session.track(VoicePart::S).len(), 3);
    assert_eq!(session.history().len(), 4);
}

#[test]
fn test_edit_after_undo_drops_redo_branch() {
    let mut session = session_with_melody();
    session.handle_key("z", true);
    session.handle_key("z", true);
    assert!(session.can_redo());

    session.add_note(VoicePart::A, Note::new(ScaleDegree::Sol, 2, 0)).unwrap();
    assert!(!session.can_redo());
    assert_eq!(session.track(VoicePart::S).len(), 1);
    assert_eq!(session.track(VoicePart::A).len(), 1);
}

#[test]
fn test_navigation_keys_change_nothing() {
    let mut session = session_with_melody();
    let before = session.tracks().clone();
    for key in ["ArrowLeft", "ArrowRight", "ArrowUp", "ArrowDown"] {
        assert!(session.handle_key(key, false).is_some());
    }
    assert_eq!(session.handle_key("a", true), Some(ShortcutAction::SelectAll));
    assert_eq!(session.tracks(), &before);
    assert_eq!(session.handle_key("q", true), None);
}

#[test]
fn test_batch_duration_change_only_hits_selection() {
    let ts = TimeSignature::FourFour;
    let mut session = session_with_melody();
    session.set_selection(Selection::measures(1, 1, ts));
    session.change_selection_duration(NoteDuration::Half);

    let durations: Vec<NoteDuration> = session.track(VoicePart::S).iter().map(|n| n.duration).collect();
    assert_eq!(durations, vec![NoteDuration::Beat, NoteDuration::Beat, NoteDuration::Half]);
    assert!(session.undo());
    assert!(session.track(VoicePart::S).iter().all(|n| n.duration == NoteDuration::Beat));
}

#[test]
fn test_select_all_then_delete_clears_every_measure() {
    let mut session = session_with_melody();
    session.select_all();
    session.delete_selection();
    assert!(session.tracks().is_empty());
    assert!(session.undo());
    assert_eq!(session.track(VoicePart::S).len(), 3);
}
