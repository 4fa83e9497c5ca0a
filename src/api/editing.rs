//! Stateless editing functions over serialized tracks
//!
//! For callers that keep their own document state: each function takes
//! `VoiceTracks` (and friends) as `JsValue`, returns the edited copy, and
//! never touches a session.

use serde::Deserialize;
use wasm_bindgen::prelude::*;

use super::helpers::{deserialize, deserialize_optional, parse_arg, serialize, validation_error};
use crate::models::{Note, NoteDuration, TimeSignature, Track, VoiceTracks};
use crate::selection::{self, batch, Clipboard, Selection};
use crate::shortcuts::{self, shortcut_for, ShortcutAction, ShortcutState};
use crate::undo::History;

/// Inputs for [`handle_shortcut`], as sent from the UI
#[derive(Deserialize)]
struct ShortcutInput {
    tracks: VoiceTracks,
    selection: Selection,
    #[serde(default)]
    clipboard: Option<Clipboard>,
    #[serde(default)]
    history: History,
}

#[wasm_bindgen(js_name = addNoteToTrack)]
pub fn add_note_to_track(track: JsValue, note: JsValue) -> Result<JsValue, JsValue> {
    let track: Track = deserialize(track, "addNoteToTrack: invalid track")?;
    let note: Note = deserialize(note, "addNoteToTrack: invalid note")?;
    serialize(&track.add_note(note), "addNoteToTrack")
}

#[wasm_bindgen(js_name = removeNoteFromTrack)]
pub fn remove_note_from_track(track: JsValue, position: u32, sub_position: u8) -> Result<JsValue, JsValue> {
    let track: Track = deserialize(track, "removeNoteFromTrack: invalid track")?;
    serialize(&track.remove_note(position, sub_position), "removeNoteFromTrack")
}

#[wasm_bindgen(js_name = notesInRange)]
pub fn notes_in_range(tracks: JsValue, start_measure: u32, end_measure: u32, ts: &str) -> Result<JsValue, JsValue> {
    let tracks: VoiceTracks = deserialize(tracks, "notesInRange: invalid tracks")?;
    let ts: TimeSignature = parse_arg(ts)?;
    serialize(
        &selection::notes_in_range(&tracks, start_measure, end_measure, ts),
        "notesInRange",
    )
}

#[wasm_bindgen(js_name = copyToClipboard)]
pub fn copy_to_clipboard(tracks: JsValue, selection: JsValue, ts: &str) -> Result<JsValue, JsValue> {
    let tracks: VoiceTracks = deserialize(tracks, "copyToClipboard: invalid tracks")?;
    let selection: Selection = deserialize(selection, "copyToClipboard: invalid selection")?;
    let ts: TimeSignature = parse_arg(ts)?;
    serialize(&selection::copy_to_clipboard(&tracks, &selection, ts), "copyToClipboard")
}

#[wasm_bindgen(js_name = pasteFromClipboard)]
pub fn paste_from_clipboard(
    tracks: JsValue,
    clipboard: JsValue,
    target_measure: u32,
    ts: &str,
) -> Result<JsValue, JsValue> {
    let tracks: VoiceTracks = deserialize(tracks, "pasteFromClipboard: invalid tracks")?;
    let clipboard: Clipboard = deserialize(clipboard, "pasteFromClipboard: invalid clipboard")?;
    let ts: TimeSignature = parse_arg(ts)?;
    serialize(
        &selection::paste_from_clipboard(&tracks, &clipboard, target_measure, ts),
        "pasteFromClipboard",
    )
}

#[wasm_bindgen(js_name = deleteSelection)]
pub fn delete_selection(tracks: JsValue, selection: JsValue, ts: &str) -> Result<JsValue, JsValue> {
    let tracks: VoiceTracks = deserialize(tracks, "deleteSelection: invalid tracks")?;
    let selection: Selection = deserialize(selection, "deleteSelection: invalid selection")?;
    let ts: TimeSignature = parse_arg(ts)?;
    serialize(&selection::delete_selection(&tracks, &selection, ts), "deleteSelection")
}

/// Notes are matched by id within each part, so ids must be unique per part
#[wasm_bindgen(js_name = transposeSelection)]
pub fn transpose_selection(tracks: JsValue, selection: JsValue, steps: i32, ts: &str) -> Result<JsValue, JsValue> {
    let tracks: VoiceTracks = deserialize(tracks, "transposeSelection: invalid tracks")?;
    let selection: Selection = deserialize(selection, "transposeSelection: invalid selection")?;
    let ts: TimeSignature = parse_arg(ts)?;
    serialize(&batch::transpose(&tracks, &selection, steps as i64, ts), "transposeSelection")
}

/// Same id rules as [`transpose_selection`]
#[wasm_bindgen(js_name = changeDuration)]
pub fn change_duration(tracks: JsValue, selection: JsValue, duration: &str, ts: &str) -> Result<JsValue, JsValue> {
    let tracks: VoiceTracks = deserialize(tracks, "changeDuration: invalid tracks")?;
    let selection: Selection = deserialize(selection, "changeDuration: invalid selection")?;
    let duration: NoteDuration = parse_arg(duration)?;
    let ts: TimeSignature = parse_arg(ts)?;
    serialize(&batch::change_duration(&tracks, &selection, duration, ts), "changeDuration")
}

/// Action name bound to a key press, or `undefined`
#[wasm_bindgen(js_name = shortcutAction)]
pub fn shortcut_action(key: &str, ctrl: bool) -> Option<String> {
    shortcut_for(key, ctrl).map(|action| action.as_str().to_string())
}

/// Run a shortcut against `{ tracks, selection, clipboard?, history? }`.
///
/// Returns the `ShortcutEffect`; committing paste/delete/transpose results
/// to history is up to the caller.
#[wasm_bindgen(js_name = handleShortcut)]
pub fn handle_shortcut(action: &str, state: JsValue, ts: &str) -> Result<JsValue, JsValue> {
    let action: ShortcutAction = action.parse().map_err(|e: String| validation_error(e))?;
    let input: ShortcutInput = deserialize(state, "handleShortcut: invalid state")?;
    let ts: TimeSignature = parse_arg(ts)?;
    let state = ShortcutState {
        tracks: &input.tracks,
        selection: &input.selection,
        clipboard: input.clipboard.as_ref(),
        history: &input.history,
    };
    serialize(&shortcuts::handle_shortcut(action, &state, ts), "handleShortcut")
}

/// Whether `selection` is a usable rectangle; `null` counts as no selection
#[wasm_bindgen(js_name = isSelectionValid)]
pub fn is_selection_valid(selection: JsValue) -> Result<bool, JsValue> {
    let selection: Option<Selection> = deserialize_optional(selection, "isSelectionValid: invalid selection")?;
    Ok(selection.is_some_and(|s| s.is_well_formed()))
}
