//! Composition-level containers: markers, dynamics, lyrics, auxiliary tracks
//! and the measure view over voice tracks.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::degree::ScaleDegree;
use super::key_signature::KeySignature;
use super::note::{Dynamic, Note, VoicePart};
use super::time_signature::TimeSignature;
use super::track::VoiceTracks;
use crate::errors::SolfaError;
use crate::harmony::chords::ChordQuality;

/// Timeline marker (rehearsal letter, section name, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub id: String,
    pub position: u32,
    pub text: String,
}

impl Marker {
    pub fn new(position: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            position,
            text: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicMarking {
    pub id: String,
    pub position: u32,
    pub dynamic: Dynamic,
    /// `None` applies to all voices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_part: Option<VoicePart>,
}

impl DynamicMarking {
    pub fn new(position: u32, dynamic: Dynamic, voice_part: Option<VoicePart>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            position,
            dynamic,
            voice_part,
        }
    }

    pub fn applies_to(&self, part: VoicePart) -> bool {
        self.voice_part.map_or(true, |p| p == part)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricEntry {
    pub measure_idx: u32,
    pub seg_idx: u32,
    pub box_idx: u32,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syllable: Option<String>,
}

/// Chord symbol attached to a segment of the Chord pseudo-track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordSymbol {
    pub root: ScaleDegree,
    pub quality: ChordQuality,
    pub symbol: String,
}

impl ChordSymbol {
    pub fn new(root: ScaleDegree, quality: ChordQuality) -> Self {
        Self {
            root,
            quality,
            symbol: format!("{}{}", root.as_str(), quality.suffix()),
        }
    }
}

/// Composite key of a segment: `"{measure}-{segment}"`
pub fn segment_key(measure: u32, segment: u32) -> String {
    format!("{}-{}", measure, segment)
}

/// Composite key of a box within a segment: `"{measure}-{segment}-{box}"`
pub fn box_key(measure: u32, segment: u32, box_idx: u32) -> String {
    format!("{}-{}-{}", measure, segment, box_idx)
}

/// Split a composite key back into its integer parts
pub fn parse_track_key(key: &str) -> Result<Vec<u32>, SolfaError> {
    let parts: Result<Vec<u32>, _> = key.split('-').map(str::parse::<u32>).collect();
    match parts {
        Ok(parts) if parts.len() == 2 || parts.len() == 3 => Ok(parts),
        _ => Err(SolfaError::InvalidTrackKey(key.to_string())),
    }
}

/// Which auxiliary pseudo-track an edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuxTrackKind {
    Chord,
    Lyrics,
    Markers,
}

/// Chord, lyric and marker pseudo-tracks keyed by composite string keys
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuxTracks {
    /// Keyed by [`segment_key`]
    #[serde(default)]
    pub chords: BTreeMap<String, ChordSymbol>,
    /// Keyed by [`box_key`]
    #[serde(default)]
    pub lyrics: BTreeMap<String, String>,
    /// Keyed by [`segment_key`]
    #[serde(default)]
    pub markers: BTreeMap<String, String>,
}

impl AuxTracks {
    pub fn set_chord(&mut self, measure: u32, segment: u32, chord: ChordSymbol) {
        self.chords.insert(segment_key(measure, segment), chord);
    }

    pub fn chord_at(&self, measure: u32, segment: u32) -> Option<&ChordSymbol> {
        self.chords.get(&segment_key(measure, segment))
    }

    /// Set a lyric; empty text clears the box
    pub fn set_lyric(&mut self, measure: u32, segment: u32, box_idx: u32, text: &str) {
        let key = box_key(measure, segment, box_idx);
        if text.is_empty() {
            self.lyrics.remove(&key);
        } else {
            self.lyrics.insert(key, text.to_string());
        }
    }

    /// Set a segment marker; empty text clears it
    pub fn set_marker(&mut self, measure: u32, segment: u32, text: &str) {
        let key = segment_key(measure, segment);
        if text.is_empty() {
            self.markers.remove(&key);
        } else {
            self.markers.insert(key, text.to_string());
        }
    }

    pub fn remove(&mut self, kind: AuxTrackKind, key: &str) -> bool {
        match kind {
            AuxTrackKind::Chord => self.chords.remove(key).is_some(),
            AuxTrackKind::Lyrics => self.lyrics.remove(key).is_some(),
            AuxTrackKind::Markers => self.markers.remove(key).is_some(),
        }
    }

    pub fn clear(&mut self, kind: AuxTrackKind) {
        match kind {
            AuxTrackKind::Chord => self.chords.clear(),
            AuxTrackKind::Lyrics => self.lyrics.clear(),
            AuxTrackKind::Markers => self.markers.clear(),
        }
    }

    /// Lyrics as structured entries, ordered by key
    pub fn lyric_entries(&self) -> Vec<LyricEntry> {
        self.lyrics
            .iter()
            .filter_map(|(key, text)| match parse_track_key(key).ok()?.as_slice() {
                [m, s, b] => Some(LyricEntry {
                    measure_idx: *m,
                    seg_idx: *s,
                    box_idx: *b,
                    text: text.clone(),
                    syllable: None,
                }),
                _ => None,
            })
            .collect()
    }
}

/// One measure's slice of the composition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(default)]
    pub dynamics: Vec<DynamicMarking>,
    pub notes: BTreeMap<VoicePart, Vec<Note>>,
}

impl Measure {
    fn empty(index: u32) -> Self {
        Self {
            index,
            marker: None,
            dynamics: Vec::new(),
            notes: VoicePart::ALL.iter().map(|&part| (part, Vec::new())).collect(),
        }
    }
}

/// Whole-document view handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    pub id: String,
    pub name: String,
    pub time_signature: TimeSignature,
    pub key_signature: KeySignature,
    pub tempo: u32,
    pub measure_count: u32,
    pub tracks: VoiceTracks,
    pub markers: Vec<Marker>,
    pub dynamics: Vec<DynamicMarking>,
    pub aux: AuxTracks,
}

impl Composition {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            time_signature: TimeSignature::default(),
            key_signature: KeySignature::default(),
            tempo: 120,
            measure_count: 16,
            tracks: VoiceTracks::new(),
            markers: Vec::new(),
            dynamics: Vec::new(),
            aux: AuxTracks::default(),
        }
    }

    /// Split the voice tracks into per-measure groups.
    ///
    /// Every measure up to `measure_count` is present, plus each later
    /// measure that still holds notes. Empty measures past `measure_count`
    /// are skipped, so a stray far-off note costs one entry.
    pub fn measures(&self) -> Vec<Measure> {
        let ts = self.time_signature;
        let mut measures: BTreeMap<u32, Measure> =
            (0..self.measure_count).map(|index| (index, Measure::empty(index))).collect();

        for (part, track) in self.tracks.iter() {
            for note in track.iter() {
                let index = ts.measure_of(note.position);
                measures
                    .entry(index)
                    .or_insert_with(|| Measure::empty(index))
                    .notes
                    .entry(part)
                    .or_default()
                    .push(note.clone());
            }
        }
        for marker in &self.markers {
            if let Some(measure) = measures.get_mut(&ts.measure_of(marker.position)) {
                measure.marker.get_or_insert_with(|| marker.clone());
            }
        }
        for dynamic in &self.dynamics {
            if let Some(measure) = measures.get_mut(&ts.measure_of(dynamic.position)) {
                measure.dynamics.push(dynamic.clone());
            }
        }

        measures.into_values().collect()
    }
}
