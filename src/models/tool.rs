//! Palette tools
//!
//! The selected palette entry is a closed set of categories; consumers match
//! on [`Tool`] exhaustively instead of inspecting loosely typed values.

use serde::{Deserialize, Serialize};

use super::degree::ScaleDegree;
use super::note::{Accidental, Articulation, Dynamic};
use crate::harmony::chords::ChordQuality;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TempoMarking {
    Largo,
    Adagio,
    Andante,
    Moderato,
    Allegro,
    Presto,
}

impl TempoMarking {
    pub fn label(&self) -> &'static str {
        match self {
            TempoMarking::Largo => "Largo",
            TempoMarking::Adagio => "Adagio",
            TempoMarking::Andante => "Andante",
            TempoMarking::Moderato => "Moderato",
            TempoMarking::Allegro => "Allegro",
            TempoMarking::Presto => "Presto",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RepeatCoda {
    RepeatStart,
    RepeatEnd,
    Coda,
    Segno,
}

impl RepeatCoda {
    pub fn symbol(&self) -> &'static str {
        match self {
            RepeatCoda::RepeatStart => "||:",
            RepeatCoda::RepeatEnd => ":||",
            RepeatCoda::Coda => "𝄌",
            RepeatCoda::Segno => "𝄋",
        }
    }
}

/// A palette selection, serialized as `{ "kind": ..., "value": ... }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Tool {
    Note(ScaleDegree),
    Accidental(Accidental),
    Dynamic(Dynamic),
    Articulation(Articulation),
    Tempo(TempoMarking),
    RepeatCoda(RepeatCoda),
    ChordRoot(ScaleDegree),
    ChordType(ChordQuality),
}

impl Tool {
    /// Tools that act on a single note slot rather than a segment
    pub fn targets_note(&self) -> bool {
        match self {
            Tool::Note(_) | Tool::Accidental(_) | Tool::Articulation(_) => true,
            Tool::Dynamic(_)
            | Tool::Tempo(_)
            | Tool::RepeatCoda(_)
            | Tool::ChordRoot(_)
            | Tool::ChordType(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_json_is_tagged() {
        let tool = Tool::Accidental(Accidental::Flat);
        let value = serde_json::to_value(tool).unwrap();
        assert_eq!(value["kind"], "accidental");
        assert_eq!(value["value"], "flat");

        let parsed: Tool = serde_json::from_str(r#"{"kind":"repeatCoda","value":"segno"}"#).unwrap();
        assert_eq!(parsed, Tool::RepeatCoda(RepeatCoda::Segno));
    }

    #[test]
    fn test_targets_note() {
        assert!(Tool::Note(ScaleDegree::Do).targets_note());
        assert!(!Tool::ChordType(ChordQuality::Minor).targets_note());
        assert!(!Tool::Dynamic(Dynamic::Ff).targets_note());
    }
}
