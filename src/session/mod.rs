//! Editing session
//!
//! `EditorSession` owns the composition being edited together with its
//! history, clipboard, selection and chord progression. Every mutating
//! method finishes its edit (tracks and history together) before listeners
//! are notified, so observers never see a half-applied change.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::{EditorConfig, MAX_TEMPO, MIN_TEMPO};
use crate::errors::{Result, SolfaError};
use crate::harmony::{ChordProgression, ChordQuality, Harmonizer};
use crate::models::{
    validate_sub_position, AuxTrackKind, ChordSymbol, Composition, Dynamic, DynamicMarking, KeySignature, Marker,
    Measure, Note, NoteDuration, Octave, ScaleDegree, Subdivision, TimeSignature, Tool, Track, VoicePart, VoiceTracks,
};
use crate::playback::{self, PlaybackEvent};
use crate::selection::{self, batch, Clipboard, Selection};
use crate::shortcuts::{self, shortcut_for, ShortcutAction, ShortcutEffect, ShortcutState};
use crate::transposition::is_note_in_key_with;
use crate::undo::{History, Snapshot};

/// Change notifications sent to subscribers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EditorEvent {
    TracksChanged,
    MarkersChanged,
    DynamicsChanged,
    AuxTracksChanged,
    SelectionChanged,
    ClipboardChanged,
    /// Name, signatures, tempo or measure count changed
    CompositionChanged,
    HistoryMoved { index: usize },
    Harmonized { chord: ChordProgression, substituted: bool },
}

pub type ListenerId = usize;
type Listener = Box<dyn FnMut(&EditorEvent)>;

/// Rhythm and register used for notes entered with a [`Tool::Note`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NoteEntry {
    pub duration: NoteDuration,
    #[serde(default)]
    pub subdivision: Subdivision,
    #[serde(default)]
    pub octave: Octave,
}

pub struct EditorSession {
    config: EditorConfig,
    composition: Composition,
    progression: Vec<ChordProgression>,
    history: History,
    clipboard: Option<Clipboard>,
    selection: Selection,
    tool: Option<Tool>,
    entry: NoteEntry,
    chord_quality: ChordQuality,
    harmonizer: Harmonizer,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: ListenerId,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::from_parts(EditorConfig::default(), TimeSignature::default(), KeySignature::default())
    }
}

impl EditorSession {
    /// Create a session from a validated config
    pub fn new(config: EditorConfig) -> Result<Self> {
        config.validate()?;
        let ts = config.resolved_time_signature()?;
        let key = config.resolved_key_signature()?;
        Ok(Self::from_parts(config, ts, key))
    }

    fn from_parts(config: EditorConfig, ts: TimeSignature, key: KeySignature) -> Self {
        let mut composition = Composition::new("Untitled");
        composition.time_signature = ts;
        composition.key_signature = key;
        composition.tempo = config.tempo;
        composition.measure_count = config.measure_count;

        // The empty document is the first entry so the first edit can be undone
        let mut history = History::new(config.history_limit);
        history.commit(Snapshot::default());

        Self {
            harmonizer: Harmonizer::from_strictness(config.strict_voice_leading),
            selection: Selection::measures(0, 0, ts),
            config,
            composition,
            progression: Vec::new(),
            history,
            clipboard: None,
            tool: None,
            entry: NoteEntry::default(),
            chord_quality: ChordQuality::Major,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    // ----- observers -----

    pub fn subscribe(&mut self, listener: impl FnMut(&EditorEvent) + 'static) -> ListenerId {
        let id = self.next_listener;
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn emit(&mut self, event: EditorEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    // ----- accessors -----

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn tracks(&self) -> &VoiceTracks {
        &self.composition.tracks
    }

    pub fn track(&self, part: VoicePart) -> &Track {
        self.composition.tracks.get(part)
    }

    pub fn markers(&self) -> &[Marker] {
        &self.composition.markers
    }

    pub fn dynamics(&self) -> &[DynamicMarking] {
        &self.composition.dynamics
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn clipboard(&self) -> Option<&Clipboard> {
        self.clipboard.as_ref()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn progression(&self) -> &[ChordProgression] {
        &self.progression
    }

    pub fn time_signature(&self) -> TimeSignature {
        self.composition.time_signature
    }

    pub fn key_signature(&self) -> &KeySignature {
        &self.composition.key_signature
    }

    pub fn tool(&self) -> Option<Tool> {
        self.tool
    }

    pub fn entry(&self) -> NoteEntry {
        self.entry
    }

    pub fn measures(&self) -> Vec<Measure> {
        self.composition.measures()
    }

    pub fn schedule(&self) -> Vec<PlaybackEvent> {
        playback::schedule(&self.composition.tracks, self.composition.tempo)
    }

    /// Key membership under the configured strategy
    pub fn is_in_key(&self, note: &Note) -> bool {
        is_note_in_key_with(note, &self.composition.key_signature, self.config.membership_strategy)
    }

    // ----- history -----

    fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.composition.tracks.clone(), self.composition.markers.clone())
    }

    fn commit(&mut self) {
        let snapshot = self.snapshot();
        self.history.commit(snapshot);
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.composition.tracks = snapshot.tracks;
        self.composition.markers = snapshot.markers;
    }

    fn after_history_move(&mut self) {
        let index = self.history.index.unwrap_or(0);
        self.emit(EditorEvent::TracksChanged);
        self.emit(EditorEvent::MarkersChanged);
        self.emit(EditorEvent::HistoryMoved { index });
    }

    /// Restore the previous snapshot; false at the first entry
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        self.after_history_move();
        true
    }

    /// Restore the next snapshot; false at the newest entry
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.restore(snapshot);
        self.after_history_move();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ----- notes -----

    fn place(&mut self, part: VoicePart, note: Note) {
        let track = self
            .composition
            .tracks
            .get(part)
            .remove_note(note.position, note.sub_position)
            .add_note(note);
        *self.composition.tracks.get_mut(part) = track;
    }

    /// Commit `note` to `part`, replacing whatever occupies its slot.
    ///
    /// Key accidentals are applied first. A soprano note is harmonized into
    /// the other three parts when auto-harmonization is on; the whole edit
    /// is a single history entry.
    pub fn add_note(&mut self, part: VoicePart, note: Note) -> Result<Note> {
        validate_sub_position(note.sub_position)?;
        let note = self.composition.key_signature.apply_accidentals(&note);
        debug!("add_note: {} {} at {:?}", part, note.degree, note.slot());
        self.place(part, note.clone());

        let mut harmonized = None;
        if part == VoicePart::S && self.config.auto_harmonize {
            let result = self
                .harmonizer
                .harmonize(&note, self.progression.last(), &self.composition.key_signature);
            for (voice, derived) in result.notes {
                self.place(voice, derived);
            }
            self.progression.push(result.chord.clone());
            harmonized = Some(EditorEvent::Harmonized {
                chord: result.chord,
                substituted: result.substituted,
            });
        }

        self.commit();
        self.emit(EditorEvent::TracksChanged);
        if let Some(event) = harmonized {
            self.emit(event);
        }
        Ok(note)
    }

    /// Remove the note at a slot; false (and no history entry) when empty
    pub fn remove_note(&mut self, part: VoicePart, position: u32, sub_position: u8) -> bool {
        if self.track(part).find_note_at(position, sub_position).is_none() {
            return false;
        }
        let track = self.track(part).remove_note(position, sub_position);
        *self.composition.tracks.get_mut(part) = track;
        self.commit();
        self.emit(EditorEvent::TracksChanged);
        true
    }

    /// Rewrite the note at a slot in place
    fn edit_note_at(&mut self, part: VoicePart, position: u32, sub_position: u8, f: impl Fn(&Note) -> Note) -> bool {
        let Some(existing) = self.track(part).find_note_at(position, sub_position) else {
            return false;
        };
        let id = existing.id;
        let track = self.track(part).map(|n| if n.id == id { f(n) } else { n.clone() });
        *self.composition.tracks.get_mut(part) = track;
        self.commit();
        self.emit(EditorEvent::TracksChanged);
        true
    }

    pub fn clear_voice(&mut self, part: VoicePart) {
        *self.composition.tracks.get_mut(part) = Track::new();
        self.commit();
        self.emit(EditorEvent::TracksChanged);
    }

    /// Empty every track, marker, aux track and the chord progression
    pub fn clear_all(&mut self) {
        info!("clear_all: dropping {} notes", self.composition.tracks.total_notes());
        self.composition.tracks = VoiceTracks::new();
        self.composition.markers.clear();
        self.composition.aux = Default::default();
        self.progression.clear();
        self.commit();
        self.emit(EditorEvent::TracksChanged);
        self.emit(EditorEvent::MarkersChanged);
        self.emit(EditorEvent::AuxTracksChanged);
    }

    // ----- tools -----

    pub fn set_tool(&mut self, tool: Option<Tool>) {
        self.tool = tool;
    }

    pub fn set_entry(&mut self, entry: NoteEntry) {
        self.entry = entry;
    }

    /// Apply the selected tool at a slot; false when no tool is selected
    pub fn apply_selected_tool(&mut self, part: VoicePart, position: u32, sub_position: u8) -> Result<bool> {
        match self.tool {
            Some(tool) => self.apply_tool(tool, part, position, sub_position),
            None => Ok(false),
        }
    }

    /// Apply `tool` at a slot of `part`.
    ///
    /// Note tools enter a note; accidental and articulation tools edit the
    /// note already there. Segment tools (tempo, repeat/coda, chord) write
    /// to the auxiliary tracks at the slot's measure and beat.
    pub fn apply_tool(&mut self, tool: Tool, part: VoicePart, position: u32, sub_position: u8) -> Result<bool> {
        let ts = self.time_signature();
        let (measure, segment) = (ts.measure_of(position), ts.beat_of(position));
        match tool {
            Tool::Note(degree) => {
                let note = Note::new(degree, position, sub_position)
                    .with_duration(self.entry.duration)
                    .with_subdivision(self.entry.subdivision)
                    .with_octave(self.entry.octave);
                self.add_note(part, note)?;
                Ok(true)
            }
            Tool::Accidental(accidental) => Ok(self.edit_note_at(part, position, sub_position, |n| {
                n.clone().with_accidental(Some(accidental))
            })),
            Tool::Articulation(articulation) => Ok(self.edit_note_at(part, position, sub_position, |n| {
                n.clone().with_articulation(Some(articulation))
            })),
            Tool::Dynamic(dynamic) => {
                self.add_dynamic(position, dynamic, Some(part));
                Ok(true)
            }
            Tool::Tempo(marking) => {
                self.set_segment_marker(measure, segment, marking.label());
                Ok(true)
            }
            Tool::RepeatCoda(sign) => {
                self.set_segment_marker(measure, segment, sign.symbol());
                Ok(true)
            }
            Tool::ChordRoot(root) => {
                self.set_chord_symbol(measure, segment, root, self.chord_quality);
                Ok(true)
            }
            Tool::ChordType(quality) => {
                self.chord_quality = quality;
                if let Some(root) = self.composition.aux.chord_at(measure, segment).map(|c| c.root) {
                    self.set_chord_symbol(measure, segment, root, quality);
                }
                Ok(true)
            }
        }
    }

    // ----- markers and dynamics -----

    pub fn add_marker(&mut self, position: u32) -> String {
        let marker = Marker::new(position);
        let id = marker.id.clone();
        self.composition.markers.push(marker);
        self.commit();
        self.emit(EditorEvent::MarkersChanged);
        id
    }

    pub fn update_marker(&mut self, id: &str, text: &str) -> bool {
        let Some(marker) = self.composition.markers.iter_mut().find(|m| m.id == id) else {
            return false;
        };
        marker.text = text.to_string();
        self.commit();
        self.emit(EditorEvent::MarkersChanged);
        true
    }

    pub fn remove_marker(&mut self, id: &str) -> bool {
        let before = self.composition.markers.len();
        self.composition.markers.retain(|m| m.id != id);
        if self.composition.markers.len() == before {
            return false;
        }
        self.commit();
        self.emit(EditorEvent::MarkersChanged);
        true
    }

    /// Dynamics are not part of history snapshots
    pub fn add_dynamic(&mut self, position: u32, dynamic: Dynamic, voice_part: Option<VoicePart>) -> String {
        let marking = DynamicMarking::new(position, dynamic, voice_part);
        let id = marking.id.clone();
        self.composition.dynamics.push(marking);
        self.emit(EditorEvent::DynamicsChanged);
        id
    }

    pub fn remove_dynamic(&mut self, id: &str) -> bool {
        let before = self.composition.dynamics.len();
        self.composition.dynamics.retain(|d| d.id != id);
        let removed = self.composition.dynamics.len() != before;
        if removed {
            self.emit(EditorEvent::DynamicsChanged);
        }
        removed
    }

    // ----- auxiliary tracks -----

    pub fn set_chord_symbol(&mut self, measure: u32, segment: u32, root: ScaleDegree, quality: ChordQuality) {
        self.composition
            .aux
            .set_chord(measure, segment, ChordSymbol::new(root, quality));
        self.emit(EditorEvent::AuxTracksChanged);
    }

    pub fn set_lyric(&mut self, measure: u32, segment: u32, box_idx: u32, text: &str) {
        self.composition.aux.set_lyric(measure, segment, box_idx, text);
        self.emit(EditorEvent::AuxTracksChanged);
    }

    pub fn set_segment_marker(&mut self, measure: u32, segment: u32, text: &str) {
        self.composition.aux.set_marker(measure, segment, text);
        self.emit(EditorEvent::AuxTracksChanged);
    }

    pub fn remove_aux(&mut self, kind: AuxTrackKind, key: &str) -> bool {
        let removed = self.composition.aux.remove(kind, key);
        if removed {
            self.emit(EditorEvent::AuxTracksChanged);
        }
        removed
    }

    pub fn clear_aux(&mut self, kind: AuxTrackKind) {
        self.composition.aux.clear(kind);
        self.emit(EditorEvent::AuxTracksChanged);
    }

    // ----- composition metadata -----

    pub fn set_name(&mut self, name: &str) {
        self.composition.name = name.to_string();
        self.emit(EditorEvent::CompositionChanged);
    }

    pub fn set_key_signature(&mut self, key: KeySignature) {
        self.composition.key_signature = key;
        self.emit(EditorEvent::CompositionChanged);
    }

    pub fn set_key_signature_named(&mut self, name: &str) -> Result<()> {
        let key = KeySignature::named(name)?;
        self.set_key_signature(key);
        Ok(())
    }

    pub fn set_time_signature(&mut self, ts: TimeSignature) {
        self.composition.time_signature = ts;
        self.emit(EditorEvent::CompositionChanged);
    }

    pub fn set_tempo(&mut self, tempo: u32) -> Result<()> {
        if !(MIN_TEMPO..=MAX_TEMPO).contains(&tempo) {
            warn!("set_tempo: rejected {}", tempo);
            return Err(SolfaError::Config(format!(
                "tempo {} out of range ({}-{})",
                tempo, MIN_TEMPO, MAX_TEMPO
            )));
        }
        self.composition.tempo = tempo;
        self.emit(EditorEvent::CompositionChanged);
        Ok(())
    }

    pub fn add_measure(&mut self) -> u32 {
        self.composition.measure_count = self.composition.measure_count.saturating_add(1);
        self.emit(EditorEvent::CompositionChanged);
        self.composition.measure_count
    }

    /// Drop the last measure; never goes below one
    pub fn remove_measure(&mut self) -> bool {
        if self.composition.measure_count <= 1 {
            return false;
        }
        self.composition.measure_count -= 1;
        self.emit(EditorEvent::CompositionChanged);
        true
    }

    // ----- selection, clipboard and range edits -----

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
        self.emit(EditorEvent::SelectionChanged);
    }

    /// Select every measure of the composition
    pub fn select_all(&mut self) {
        self.selection = Selection::all(self.composition.measure_count, self.time_signature());
        self.emit(EditorEvent::SelectionChanged);
    }

    fn replace_tracks(&mut self, tracks: VoiceTracks) {
        self.composition.tracks = tracks;
        self.commit();
        self.emit(EditorEvent::TracksChanged);
    }

    pub fn copy(&mut self) {
        self.clipboard = Some(selection::copy_to_clipboard(
            &self.composition.tracks,
            &self.selection,
            self.time_signature(),
        ));
        self.emit(EditorEvent::ClipboardChanged);
    }

    /// Paste at the selection's first measure; false with an empty clipboard
    pub fn paste(&mut self) -> bool {
        let Some(clipboard) = &self.clipboard else {
            return false;
        };
        let tracks = selection::paste_from_clipboard(
            &self.composition.tracks,
            clipboard,
            self.selection.start_measure,
            self.time_signature(),
        );
        self.replace_tracks(tracks);
        true
    }

    pub fn delete_selection(&mut self) {
        let tracks = selection::delete_selection(&self.composition.tracks, &self.selection, self.time_signature());
        self.replace_tracks(tracks);
    }

    pub fn transpose_selection(&mut self, steps: i64) {
        let tracks = batch::transpose(&self.composition.tracks, &self.selection, steps, self.time_signature());
        self.replace_tracks(tracks);
    }

    pub fn change_selection_duration(&mut self, duration: NoteDuration) {
        let tracks = batch::change_duration(&self.composition.tracks, &self.selection, duration, self.time_signature());
        self.replace_tracks(tracks);
    }

    // ----- keyboard -----

    /// Run a shortcut and apply its effect.
    ///
    /// Paste, delete and transpose results are committed; undo and redo only
    /// move the history pointer.
    pub fn handle_shortcut(&mut self, action: ShortcutAction) -> ShortcutEffect {
        let effect = {
            let state = ShortcutState {
                tracks: &self.composition.tracks,
                selection: &self.selection,
                clipboard: self.clipboard.as_ref(),
                history: &self.history,
            };
            shortcuts::handle_shortcut(action, &state, self.time_signature())
        };
        if effect.is_empty() {
            return effect;
        }

        if let Some(clipboard) = &effect.clipboard {
            self.clipboard = Some(clipboard.clone());
            self.emit(EditorEvent::ClipboardChanged);
        }
        if let Some(markers) = &effect.markers {
            self.composition.markers = markers.clone();
        }
        if let Some(tracks) = &effect.tracks {
            self.composition.tracks = tracks.clone();
            if action.commits_history() {
                self.commit();
            }
        }
        match effect.history_index {
            Some(index) => {
                self.history.index = Some(index);
                self.after_history_move();
            }
            None if effect.tracks.is_some() => self.emit(EditorEvent::TracksChanged),
            None => {}
        }
        effect
    }

    /// Map a key press to its action and run it
    pub fn handle_key(&mut self, key: &str, ctrl: bool) -> Option<ShortcutAction> {
        let action = shortcut_for(key, ctrl)?;
        self.handle_shortcut(action);
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Accidental;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn plain_session() -> EditorSession {
        EditorSession::new(EditorConfig {
            auto_harmonize: false,
            ..EditorConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_new_session_from_default_config() {
        let session = EditorSession::default();
        assert_eq!(session.composition().measure_count, 16);
        assert_eq!(session.time_signature(), TimeSignature::FourFour);
        assert_eq!(session.history().len(), 1);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = EditorConfig { key_signature: "X major".into(), ..EditorConfig::default() };
        assert!(EditorSession::new(config).is_err());
    }

    #[test]
    fn test_add_note_applies_key_and_replaces_slot() {
        let mut session = plain_session();
        session.set_key_signature_named("G major").unwrap();
        let added = session.add_note(VoicePart::A, Note::new(ScaleDegree::Fa, 0, 0)).unwrap();
        assert_eq!(added.accidental, Some(Accidental::Sharp));

        session.add_note(VoicePart::A, Note::new(ScaleDegree::Sol, 0, 0)).unwrap();
        assert_eq!(session.track(VoicePart::A).len(), 1);
        assert_eq!(session.track(VoicePart::A).notes()[0].degree, ScaleDegree::Sol);
    }

    #[test]
    fn test_add_note_rejects_bad_sub_position() {
        let mut session = plain_session();
        assert!(session.add_note(VoicePart::S, Note::new(ScaleDegree::Do, 0, 4)).is_err());
        assert!(session.tracks().is_empty());
    }

    #[test]
    fn test_soprano_note_harmonizes_in_one_commit() {
        let mut session = EditorSession::default();
        session.add_note(VoicePart::S, Note::new(ScaleDegree::Do, 0, 0)).unwrap();
        assert_eq!(session.tracks().total_notes(), 4);
        assert_eq!(session.track(VoicePart::B).notes()[0].octave, Octave::DoubleLow);
        assert_eq!(session.progression().len(), 1);
        assert_eq!(session.history().len(), 2);

        assert!(session.undo());
        assert!(session.tracks().is_empty());
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut session = plain_session();
        session.add_note(VoicePart::T, Note::new(ScaleDegree::Mi, 0, 0)).unwrap();
        session.add_note(VoicePart::T, Note::new(ScaleDegree::Re, 1, 0)).unwrap();
        assert!(session.undo());
        assert_eq!(session.track(VoicePart::T).len(), 1);
        assert!(session.redo());
        assert_eq!(session.track(VoicePart::T).len(), 2);
        assert!(!session.redo());
    }

    #[test]
    fn test_remove_missing_note_does_not_commit() {
        let mut session = plain_session();
        assert!(!session.remove_note(VoicePart::S, 3, 0));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_markers_are_undoable() {
        let mut session = plain_session();
        let id = session.add_marker(4);
        assert!(session.update_marker(&id, "Verse"));
        assert_eq!(session.markers()[0].text, "Verse");
        assert!(session.undo());
        assert_eq!(session.markers()[0].text, "");
        assert!(session.remove_marker(&id));
        assert!(!session.remove_marker(&id));
    }

    #[test]
    fn test_measure_count_never_below_one() {
        let config = EditorConfig { measure_count: 2, auto_harmonize: false, ..EditorConfig::default() };
        let mut session = EditorSession::new(config).unwrap();
        assert!(session.remove_measure());
        assert!(!session.remove_measure());
        assert_eq!(session.composition().measure_count, 1);
        assert_eq!(session.add_measure(), 2);
    }

    #[test]
    fn test_tools() {
        let mut session = plain_session();
        session.set_entry(NoteEntry { duration: NoteDuration::Half, ..NoteEntry::default() });
        assert!(session.apply_tool(Tool::Note(ScaleDegree::La), VoicePart::S, 5, 0).unwrap());
        assert_eq!(session.track(VoicePart::S).notes()[0].duration, NoteDuration::Half);

        assert!(session.apply_tool(Tool::Accidental(Accidental::Flat), VoicePart::S, 5, 0).unwrap());
        assert_eq!(session.track(VoicePart::S).notes()[0].accidental, Some(Accidental::Flat));
        assert!(!session.apply_tool(Tool::Accidental(Accidental::Flat), VoicePart::A, 5, 0).unwrap());

        session.apply_tool(Tool::ChordRoot(ScaleDegree::Sol), VoicePart::S, 5, 0).unwrap();
        session.apply_tool(Tool::ChordType(ChordQuality::Dominant7), VoicePart::S, 5, 0).unwrap();
        assert_eq!(session.composition().aux.chord_at(1, 1).unwrap().symbol, "s7");

        assert!(!session.apply_selected_tool(VoicePart::S, 0, 0).unwrap());
        session.set_tool(Some(Tool::Dynamic(Dynamic::Ff)));
        assert!(session.apply_selected_tool(VoicePart::B, 0, 0).unwrap());
        assert_eq!(session.dynamics()[0].voice_part, Some(VoicePart::B));
    }

    #[test]
    fn test_clear_all() {
        let mut session = EditorSession::default();
        session.add_note(VoicePart::S, Note::new(ScaleDegree::Do, 0, 0)).unwrap();
        session.add_marker(0);
        session.set_lyric(0, 0, 0, "A");
        session.clear_all();
        assert!(session.tracks().is_empty());
        assert!(session.markers().is_empty());
        assert!(session.progression().is_empty());
        assert!(session.composition().aux.lyrics.is_empty());
        assert!(session.undo());
        assert_eq!(session.markers().len(), 1);
    }

    #[test]
    fn test_shortcut_paste_commits_and_undo_moves_pointer() {
        let mut session = plain_session();
        session.add_note(VoicePart::S, Note::new(ScaleDegree::Do, 1, 0)).unwrap();
        assert_eq!(session.handle_key("c", true), Some(ShortcutAction::Copy));
        session.set_selection(Selection::measures(2, 2, TimeSignature::FourFour));
        session.handle_key("v", true);
        assert_eq!(session.track(VoicePart::S).len(), 2);
        assert_eq!(session.history().len(), 3);

        session.handle_key("z", true);
        assert_eq!(session.track(VoicePart::S).len(), 1);
        assert_eq!(session.history().len(), 3);
        assert_eq!(session.history().index, Some(1));

        assert_eq!(session.handle_key("x", true), None);
    }

    #[test]
    fn test_listeners_see_committed_state() {
        let mut session = plain_session();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let id = session.subscribe(move |e| sink.borrow_mut().push(e.clone()));

        session.add_note(VoicePart::S, Note::new(ScaleDegree::Do, 0, 0)).unwrap();
        session.undo();
        assert_eq!(events.borrow()[0], EditorEvent::TracksChanged);
        assert!(events.borrow().contains(&EditorEvent::HistoryMoved { index: 0 }));

        assert!(session.unsubscribe(id));
        let seen = events.borrow().len();
        session.add_marker(0);
        assert_eq!(events.borrow().len(), seen);
    }

    #[test]
    fn test_membership_follows_config() {
        let session = plain_session();
        assert!(!session.is_in_key(&Note::new(ScaleDegree::Re, 0, 0)));
        let diatonic = EditorSession::new(EditorConfig {
            membership_strategy: crate::transposition::MembershipStrategy::DiatonicDegree,
            ..EditorConfig::default()
        })
        .unwrap();
        assert!(diatonic.is_in_key(&Note::new(ScaleDegree::Re, 0, 0)));
    }

    #[test]
    fn test_tempo_range() {
        let mut session = plain_session();
        assert!(session.set_tempo(MAX_TEMPO + 1).is_err());
        assert_eq!(session.composition().tempo, 120);
        session.set_tempo(72).unwrap();
        assert_eq!(session.composition().tempo, 72);
    }
}
