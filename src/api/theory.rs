//! Stateless music-theory functions exposed to JavaScript
//!
//! Everything here is a pure function of its arguments; editing state lives
//! in [`super::session::SolfaEditor`].

use wasm_bindgen::prelude::*;

use super::helpers::{deserialize, deserialize_optional, parse_arg, serialize, solfa_error};
use crate::harmony::{self, ChordProgression, Harmonizer, Modulation, RuleSet, SuggestionContext};
use crate::models::{KeySignature, Note, ScaleDegree, KEY_SIGNATURE_NAMES};
use crate::playback;
use crate::transposition::{self, MembershipStrategy};

#[wasm_bindgen(js_name = keySignatureNames)]
pub fn key_signature_names() -> Result<JsValue, JsValue> {
    serialize(&KEY_SIGNATURE_NAMES, "keySignatureNames")
}

#[wasm_bindgen(js_name = keySignature)]
pub fn key_signature(name: &str) -> Result<JsValue, JsValue> {
    let key = KeySignature::named(name).map_err(solfa_error)?;
    serialize(&key, "keySignature")
}

#[wasm_bindgen(js_name = transposeDegree)]
pub fn transpose_degree(degree: &str, steps: i32) -> Result<String, JsValue> {
    let degree: ScaleDegree = parse_arg(degree)?;
    Ok(transposition::transpose_degree(degree, steps as i64).as_str().to_string())
}

#[wasm_bindgen(js_name = transposeNote)]
pub fn transpose_note(note: JsValue, steps: i32) -> Result<JsValue, JsValue> {
    let note: Note = deserialize(note, "transposeNote: invalid note")?;
    serialize(&transposition::transpose_note(&note, steps as i64), "transposeNote")
}

/// `strategy` is `"semitoneTable"` (default) or `"diatonicDegree"`
#[wasm_bindgen(js_name = isNoteInKey)]
pub fn is_note_in_key(note: JsValue, key_name: &str, strategy: JsValue) -> Result<bool, JsValue> {
    let note: Note = deserialize(note, "isNoteInKey: invalid note")?;
    let key = KeySignature::named(key_name).map_err(solfa_error)?;
    let strategy: MembershipStrategy =
        deserialize_optional(strategy, "isNoteInKey: invalid strategy")?.unwrap_or_default();
    Ok(transposition::is_note_in_key_with(&note, &key, strategy))
}

#[wasm_bindgen(js_name = applyKeyAccidentals)]
pub fn apply_key_accidentals(note: JsValue, key_name: &str) -> Result<JsValue, JsValue> {
    let note: Note = deserialize(note, "applyKeyAccidentals: invalid note")?;
    let key = KeySignature::named(key_name).map_err(solfa_error)?;
    serialize(&key.apply_accidentals(&note), "applyKeyAccidentals")
}

#[wasm_bindgen(js_name = chordNotes)]
pub fn chord_notes(chord: JsValue) -> Result<JsValue, JsValue> {
    let chord: ChordProgression = deserialize(chord, "chordNotes: invalid chord")?;
    serialize(&harmony::chord_notes(&chord), "chordNotes")
}

#[wasm_bindgen(js_name = diatonicTriads)]
pub fn diatonic_triads(tonic: &str) -> Result<JsValue, JsValue> {
    let tonic: ScaleDegree = parse_arg(tonic)?;
    serialize(&harmony::diatonic_triads(tonic), "diatonicTriads")
}

#[wasm_bindgen(js_name = commonProgressions)]
pub fn common_progressions() -> Result<JsValue, JsValue> {
    serialize(&harmony::common_progressions(), "commonProgressions")
}

#[wasm_bindgen(js_name = applyModulation)]
pub fn apply_modulation(progression: JsValue, modulation: JsValue) -> Result<JsValue, JsValue> {
    let progression: Vec<ChordProgression> = deserialize(progression, "applyModulation: invalid progression")?;
    let modulation: Modulation = deserialize(modulation, "applyModulation: invalid modulation")?;
    serialize(&harmony::apply_modulation(&progression, modulation), "applyModulation")
}

#[wasm_bindgen(js_name = checkVoiceLeading)]
pub fn check_voice_leading(prev: JsValue, next: JsValue, strict: Option<bool>) -> Result<JsValue, JsValue> {
    let prev: ChordProgression = deserialize(prev, "checkVoiceLeading: invalid previous chord")?;
    let next: ChordProgression = deserialize(next, "checkVoiceLeading: invalid next chord")?;
    let report = RuleSet::strict(strict.unwrap_or(true)).check(&prev, &next);
    serialize(&report, "checkVoiceLeading")
}

#[wasm_bindgen(js_name = suggestNextChord)]
pub fn suggest_next_chord(current: JsValue, context: JsValue) -> Result<JsValue, JsValue> {
    let current: ChordProgression = deserialize(current, "suggestNextChord: invalid chord")?;
    let context: SuggestionContext = deserialize(context, "suggestNextChord: invalid context")?;
    serialize(&harmony::suggest_next_chord(&current, &context), "suggestNextChord")
}

/// Harmonize one soprano note without touching any session
#[wasm_bindgen(js_name = harmonizeNote)]
pub fn harmonize_note(
    soprano: JsValue,
    previous: JsValue,
    key_name: &str,
    strict: Option<bool>,
) -> Result<JsValue, JsValue> {
    let soprano: Note = deserialize(soprano, "harmonizeNote: invalid note")?;
    let previous: Option<ChordProgression> = deserialize_optional(previous, "harmonizeNote: invalid chord")?;
    let key = KeySignature::named(key_name).map_err(solfa_error)?;
    let harmonizer = Harmonizer::from_strictness(strict.unwrap_or(true));
    let result = harmonizer.harmonize(&soprano, previous.as_ref(), &key);
    serialize(&result, "harmonizeNote")
}

#[wasm_bindgen(js_name = noteFrequency)]
pub fn note_frequency(note: JsValue) -> Result<f64, JsValue> {
    let note: Note = deserialize(note, "noteFrequency: invalid note")?;
    Ok(playback::note_frequency(&note))
}
