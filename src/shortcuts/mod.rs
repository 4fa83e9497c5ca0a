//! Keyboard shortcut table and dispatcher
//!
//! [`shortcut_for`] maps a raw key plus Ctrl flag to an action;
//! [`handle_shortcut`] computes that action's effect from a read-only view of
//! the session without applying it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::{Marker, TimeSignature, VoiceTracks};
use crate::selection::{batch, copy_to_clipboard, delete_selection, paste_from_clipboard, Clipboard, Selection};
use crate::undo::History;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShortcutAction {
    Copy,
    Paste,
    Undo,
    Redo,
    Delete,
    SelectAll,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    TransposeUp,
    TransposeDown,
}

impl ShortcutAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShortcutAction::Copy => "copy",
            ShortcutAction::Paste => "paste",
            ShortcutAction::Undo => "undo",
            ShortcutAction::Redo => "redo",
            ShortcutAction::Delete => "delete",
            ShortcutAction::SelectAll => "selectAll",
            ShortcutAction::MoveUp => "moveUp",
            ShortcutAction::MoveDown => "moveDown",
            ShortcutAction::MoveLeft => "moveLeft",
            ShortcutAction::MoveRight => "moveRight",
            ShortcutAction::TransposeUp => "transposeUp",
            ShortcutAction::TransposeDown => "transposeDown",
        }
    }

    /// Actions whose new tracks must be committed to history by the caller
    pub fn commits_history(&self) -> bool {
        matches!(
            self,
            ShortcutAction::Paste | ShortcutAction::Delete | ShortcutAction::TransposeUp | ShortcutAction::TransposeDown
        )
    }
}

impl fmt::Display for ShortcutAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ShortcutAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SHORTCUTS
            .iter()
            .map(|(_, _, action)| *action)
            .find(|action| action.as_str() == s)
            .ok_or_else(|| format!("Unknown shortcut action: {}", s))
    }
}

/// (key, ctrl, action)
pub const SHORTCUTS: [(&str, bool, ShortcutAction); 12] = [
    ("c", true, ShortcutAction::Copy),
    ("v", true, ShortcutAction::Paste),
    ("z", true, ShortcutAction::Undo),
    ("y", true, ShortcutAction::Redo),
    ("Delete", false, ShortcutAction::Delete),
    ("a", true, ShortcutAction::SelectAll),
    ("ArrowUp", false, ShortcutAction::MoveUp),
    ("ArrowDown", false, ShortcutAction::MoveDown),
    ("ArrowLeft", false, ShortcutAction::MoveLeft),
    ("ArrowRight", false, ShortcutAction::MoveRight),
    ("ArrowUp", true, ShortcutAction::TransposeUp),
    ("ArrowDown", true, ShortcutAction::TransposeDown),
];

/// Look up the action bound to `key` (letter keys are case-insensitive)
pub fn shortcut_for(key: &str, ctrl: bool) -> Option<ShortcutAction> {
    SHORTCUTS
        .iter()
        .find(|(k, c, _)| *c == ctrl && (*k == key || (k.len() == 1 && k.eq_ignore_ascii_case(key))))
        .map(|(_, _, action)| *action)
}

/// Read-only view of the session state a shortcut can act on
pub struct ShortcutState<'a> {
    pub tracks: &'a VoiceTracks,
    pub selection: &'a Selection,
    pub clipboard: Option<&'a Clipboard>,
    pub history: &'a History,
}

/// Fields a shortcut changes; `None` means unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShortcutEffect {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracks: Option<VoiceTracks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markers: Option<Vec<Marker>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clipboard: Option<Clipboard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_index: Option<usize>,
}

impl ShortcutEffect {
    pub fn is_empty(&self) -> bool {
        self.tracks.is_none() && self.markers.is_none() && self.clipboard.is_none() && self.history_index.is_none()
    }

    fn tracks(tracks: VoiceTracks) -> Self {
        Self {
            tracks: Some(tracks),
            ..Self::default()
        }
    }

    fn restore(history: &History, index: usize) -> Self {
        match history.entries.get(index) {
            Some(snapshot) => Self {
                tracks: Some(snapshot.tracks.clone()),
                markers: Some(snapshot.markers.clone()),
                history_index: Some(index),
                ..Self::default()
            },
            None => Self::default(),
        }
    }
}

pub fn handle_shortcut(action: ShortcutAction, state: &ShortcutState<'_>, ts: TimeSignature) -> ShortcutEffect {
    match action {
        ShortcutAction::Copy => ShortcutEffect {
            clipboard: Some(copy_to_clipboard(state.tracks, state.selection, ts)),
            ..ShortcutEffect::default()
        },
        ShortcutAction::Paste => match state.clipboard {
            Some(clipboard) => ShortcutEffect::tracks(paste_from_clipboard(
                state.tracks,
                clipboard,
                state.selection.start_measure,
                ts,
            )),
            None => ShortcutEffect::default(),
        },
        ShortcutAction::Undo => match state.history.index {
            Some(i) if state.history.can_undo() => ShortcutEffect::restore(state.history, i - 1),
            _ => ShortcutEffect::default(),
        },
        ShortcutAction::Redo => match state.history.index {
            Some(i) if state.history.can_redo() => ShortcutEffect::restore(state.history, i + 1),
            _ => ShortcutEffect::default(),
        },
        ShortcutAction::Delete => ShortcutEffect::tracks(delete_selection(state.tracks, state.selection, ts)),
        ShortcutAction::TransposeUp => ShortcutEffect::tracks(batch::transpose(state.tracks, state.selection, 1, ts)),
        ShortcutAction::TransposeDown => {
            ShortcutEffect::tracks(batch::transpose(state.tracks, state.selection, -1, ts))
        }
        ShortcutAction::SelectAll
        | ShortcutAction::MoveUp
        | ShortcutAction::MoveDown
        | ShortcutAction::MoveLeft
        | ShortcutAction::MoveRight => ShortcutEffect::default(),
    }
}
