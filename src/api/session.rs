//! `SolfaEditor`: the editing session as a JavaScript class
//!
//! The instance is the single source of truth for the document. The UI
//! calls mutators, then re-reads whatever the `onChange` events name.

use wasm_bindgen::prelude::*;

use super::helpers::{deserialize, deserialize_optional, parse_arg, serialize, solfa_error};
use crate::config::EditorConfig;
use crate::harmony::ChordQuality;
use crate::models::{
    AuxTrackKind, Dynamic, Note, NoteDuration, ScaleDegree, TimeSignature, Tool, VoicePart,
};
use crate::selection::Selection;
use crate::session::{EditorEvent, EditorSession, NoteEntry};
use crate::{wasm_info, wasm_log, wasm_warn};

#[wasm_bindgen]
pub struct SolfaEditor {
    session: EditorSession,
}

#[wasm_bindgen]
impl SolfaEditor {
    /// `config` may be `undefined` for the defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<SolfaEditor, JsValue> {
        let config: EditorConfig = deserialize_optional(config, "SolfaEditor: invalid config")?.unwrap_or_default();
        let session = EditorSession::new(config).map_err(solfa_error)?;
        wasm_info!("SolfaEditor created ({} measures)", session.composition().measure_count);
        Ok(SolfaEditor { session })
    }

    /// Register `callback(event)`; returns an id for `offChange`
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&mut self, callback: js_sys::Function) -> u32 {
        let id = self.session.subscribe(move |event: &EditorEvent| {
            let Ok(value) = serde_wasm_bindgen::to_value(event) else {
                return;
            };
            if let Err(err) = callback.call1(&JsValue::NULL, &value) {
                wasm_warn!("onChange listener threw: {:?}", err);
            }
        });
        id as u32
    }

    #[wasm_bindgen(js_name = offChange)]
    pub fn off_change(&mut self, id: u32) -> bool {
        self.session.unsubscribe(id as usize)
    }

    // ----- reads -----

    pub fn composition(&self) -> Result<JsValue, JsValue> {
        serialize(self.session.composition(), "composition")
    }

    pub fn tracks(&self) -> Result<JsValue, JsValue> {
        serialize(self.session.tracks(), "tracks")
    }

    pub fn measures(&self) -> Result<JsValue, JsValue> {
        serialize(&self.session.measures(), "measures")
    }

    pub fn progression(&self) -> Result<JsValue, JsValue> {
        serialize(&self.session.progression(), "progression")
    }

    pub fn selection(&self) -> Result<JsValue, JsValue> {
        serialize(self.session.selection(), "selection")
    }

    pub fn clipboard(&self) -> Result<JsValue, JsValue> {
        serialize(&self.session.clipboard(), "clipboard")
    }

    pub fn schedule(&self) -> Result<JsValue, JsValue> {
        serialize(&self.session.schedule(), "schedule")
    }

    #[wasm_bindgen(js_name = isInKey)]
    pub fn is_in_key(&self, note: JsValue) -> Result<bool, JsValue> {
        let note: Note = deserialize(note, "isInKey: invalid note")?;
        Ok(self.session.is_in_key(&note))
    }

    // ----- notes -----

    /// Returns the note as stored, with key accidentals applied
    #[wasm_bindgen(js_name = addNote)]
    pub fn add_note(&mut self, part: &str, note: JsValue) -> Result<JsValue, JsValue> {
        let part: VoicePart = parse_arg(part)?;
        let note: Note = deserialize(note, "addNote: invalid note")?;
        let stored = self.session.add_note(part, note).map_err(solfa_error)?;
        wasm_log!("addNote {} {} @ {}", part, stored.degree, stored.position);
        serialize(&stored, "addNote")
    }

    #[wasm_bindgen(js_name = removeNote)]
    pub fn remove_note(&mut self, part: &str, position: u32, sub_position: u8) -> Result<bool, JsValue> {
        let part: VoicePart = parse_arg(part)?;
        Ok(self.session.remove_note(part, position, sub_position))
    }

    #[wasm_bindgen(js_name = clearVoice)]
    pub fn clear_voice(&mut self, part: &str) -> Result<(), JsValue> {
        let part: VoicePart = parse_arg(part)?;
        self.session.clear_voice(part);
        Ok(())
    }

    #[wasm_bindgen(js_name = clearAll)]
    pub fn clear_all(&mut self) {
        self.session.clear_all();
    }

    // ----- tools -----

    /// `tool` is a serialized `Tool`, or `null` to deselect
    #[wasm_bindgen(js_name = setTool)]
    pub fn set_tool(&mut self, tool: JsValue) -> Result<(), JsValue> {
        let tool: Option<Tool> = deserialize_optional(tool, "setTool: invalid tool")?;
        self.session.set_tool(tool);
        Ok(())
    }

    #[wasm_bindgen(js_name = setEntry)]
    pub fn set_entry(&mut self, entry: JsValue) -> Result<(), JsValue> {
        let entry: NoteEntry = deserialize(entry, "setEntry: invalid entry")?;
        self.session.set_entry(entry);
        Ok(())
    }

    #[wasm_bindgen(js_name = applyTool)]
    pub fn apply_tool(&mut self, part: &str, position: u32, sub_position: u8) -> Result<bool, JsValue> {
        let part: VoicePart = parse_arg(part)?;
        self.session
            .apply_selected_tool(part, position, sub_position)
            .map_err(solfa_error)
    }

    // ----- markers, dynamics, aux tracks -----

    #[wasm_bindgen(js_name = addMarker)]
    pub fn add_marker(&mut self, position: u32) -> String {
        self.session.add_marker(position)
    }

    #[wasm_bindgen(js_name = updateMarker)]
    pub fn update_marker(&mut self, id: &str, text: &str) -> bool {
        self.session.update_marker(id, text)
    }

    #[wasm_bindgen(js_name = removeMarker)]
    pub fn remove_marker(&mut self, id: &str) -> bool {
        self.session.remove_marker(id)
    }

    /// `part` may be omitted for a dynamic that applies to every voice
    #[wasm_bindgen(js_name = addDynamic)]
    pub fn add_dynamic(&mut self, position: u32, dynamic: &str, part: Option<String>) -> Result<String, JsValue> {
        let dynamic: Dynamic = parse_arg(dynamic)?;
        let part = part.as_deref().map(parse_arg::<VoicePart>).transpose()?;
        Ok(self.session.add_dynamic(position, dynamic, part))
    }

    #[wasm_bindgen(js_name = removeDynamic)]
    pub fn remove_dynamic(&mut self, id: &str) -> bool {
        self.session.remove_dynamic(id)
    }

    #[wasm_bindgen(js_name = setChordSymbol)]
    pub fn set_chord_symbol(&mut self, measure: u32, segment: u32, root: &str, quality: &str) -> Result<(), JsValue> {
        let root: ScaleDegree = parse_arg(root)?;
        let quality: ChordQuality = parse_arg(quality)?;
        self.session.set_chord_symbol(measure, segment, root, quality);
        Ok(())
    }

    #[wasm_bindgen(js_name = setLyric)]
    pub fn set_lyric(&mut self, measure: u32, segment: u32, box_idx: u32, text: &str) {
        self.session.set_lyric(measure, segment, box_idx, text);
    }

    #[wasm_bindgen(js_name = setSegmentMarker)]
    pub fn set_segment_marker(&mut self, measure: u32, segment: u32, text: &str) {
        self.session.set_segment_marker(measure, segment, text);
    }

    /// `kind` is `"Chord"`, `"Lyrics"` or `"Markers"`
    #[wasm_bindgen(js_name = removeAux)]
    pub fn remove_aux(&mut self, kind: JsValue, key: &str) -> Result<bool, JsValue> {
        let kind: AuxTrackKind = deserialize(kind, "removeAux: invalid track kind")?;
        Ok(self.session.remove_aux(kind, key))
    }

    #[wasm_bindgen(js_name = clearAux)]
    pub fn clear_aux(&mut self, kind: JsValue) -> Result<(), JsValue> {
        let kind: AuxTrackKind = deserialize(kind, "clearAux: invalid track kind")?;
        self.session.clear_aux(kind);
        Ok(())
    }

    // ----- composition metadata -----

    #[wasm_bindgen(js_name = setName)]
    pub fn set_name(&mut self, name: &str) {
        self.session.set_name(name);
    }

    #[wasm_bindgen(js_name = setKeySignature)]
    pub fn set_key_signature(&mut self, name: &str) -> Result<(), JsValue> {
        self.session.set_key_signature_named(name).map_err(solfa_error)
    }

    #[wasm_bindgen(js_name = setTimeSignature)]
    pub fn set_time_signature(&mut self, name: &str) -> Result<(), JsValue> {
        let ts: TimeSignature = parse_arg(name)?;
        self.session.set_time_signature(ts);
        Ok(())
    }

    #[wasm_bindgen(js_name = setTempo)]
    pub fn set_tempo(&mut self, tempo: u32) -> Result<(), JsValue> {
        self.session.set_tempo(tempo).map_err(solfa_error)
    }

    #[wasm_bindgen(js_name = addMeasure)]
    pub fn add_measure(&mut self) -> u32 {
        self.session.add_measure()
    }

    #[wasm_bindgen(js_name = removeMeasure)]
    pub fn remove_measure(&mut self) -> bool {
        self.session.remove_measure()
    }

    // ----- selection and range edits -----

    #[wasm_bindgen(js_name = setSelection)]
    pub fn set_selection(&mut self, selection: JsValue) -> Result<(), JsValue> {
        let selection: Selection = deserialize(selection, "setSelection: invalid selection")?;
        self.session.set_selection(selection);
        Ok(())
    }

    #[wasm_bindgen(js_name = selectAll)]
    pub fn select_all(&mut self) {
        self.session.select_all();
    }

    pub fn copy(&mut self) {
        self.session.copy();
    }

    pub fn paste(&mut self) -> bool {
        self.session.paste()
    }

    #[wasm_bindgen(js_name = deleteSelection)]
    pub fn delete_selection(&mut self) {
        self.session.delete_selection();
    }

    #[wasm_bindgen(js_name = transposeSelection)]
    pub fn transpose_selection(&mut self, steps: i32) {
        self.session.transpose_selection(steps as i64);
    }

    #[wasm_bindgen(js_name = changeSelectionDuration)]
    pub fn change_selection_duration(&mut self, duration: &str) -> Result<(), JsValue> {
        let duration: NoteDuration = parse_arg(duration)?;
        self.session.change_selection_duration(duration);
        Ok(())
    }

    // ----- history and keyboard -----

    pub fn undo(&mut self) -> bool {
        self.session.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.session.redo()
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.session.can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.session.can_redo()
    }

    /// Returns the action name the key triggered, if any
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, key: &str, ctrl: bool) -> Option<String> {
        self.session.handle_key(key, ctrl).map(|action| action.as_str().to_string())
    }
}
