//! Playback timing: frequencies, note lengths and a timed event list
//!
//! No audio is produced here. Degrees sound at fixed-do pitch with register 0
//! as the octave starting at middle C (A4 = 440 Hz).

use serde::{Deserialize, Serialize};

use crate::models::{Accidental, Note, NoteDuration, NoteId, Octave, ScaleDegree, Subdivision, VoicePart, VoiceTracks};

/// Frequencies of d r m f s l t in register 0
pub const BASE_FREQUENCIES: [f64; 7] = [261.63, 293.66, 329.63, 349.23, 392.00, 440.00, 493.88];

pub fn frequency(degree: ScaleDegree, accidental: Option<Accidental>, octave: Octave) -> f64 {
    let semitones = accidental.map_or(0, |a| a.semitone_offset()) as f64;
    BASE_FREQUENCIES[degree.index()] * 2f64.powi(octave.register()) * 2f64.powf(semitones / 12.0)
}

pub fn note_frequency(note: &Note) -> f64 {
    frequency(note.degree, note.accidental, note.octave)
}

/// Length of one beat in milliseconds
pub fn beat_ms(tempo: u32) -> f64 {
    60_000.0 / tempo.max(1) as f64
}

/// Undotted length of `duration` in milliseconds
pub fn duration_ms(duration: NoteDuration, tempo: u32) -> f64 {
    let beat = beat_ms(tempo);
    match duration {
        NoteDuration::Beat | NoteDuration::Quarter => beat,
        NoteDuration::Half => beat * 2.0,
        NoteDuration::Eighth => beat / 2.0,
        NoteDuration::Sixteenth => beat / 4.0,
    }
}

/// Each dot adds half of the previous addition
pub fn dotted_ms(duration: NoteDuration, subdivision: Subdivision, tempo: u32) -> f64 {
    let base = duration_ms(duration, tempo);
    base * (2.0 - 0.5f64.powi(subdivision.dots() as i32))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackEvent {
    pub part: VoicePart,
    pub note_id: NoteId,
    pub start_ms: f64,
    pub duration_ms: f64,
    pub frequency: f64,
}

/// Timed events for every note, ordered by start time then part.
///
/// A note starts at its beat plus a quarter beat per sub-position.
pub fn schedule(tracks: &VoiceTracks, tempo: u32) -> Vec<PlaybackEvent> {
    let beat = beat_ms(tempo);
    let mut events: Vec<PlaybackEvent> = tracks
        .iter()
        .flat_map(|(part, track)| {
            track.iter().map(move |note| PlaybackEvent {
                part,
                note_id: note.id,
                start_ms: note.position as f64 * beat + note.sub_position as f64 * beat / 4.0,
                duration_ms: dotted_ms(note.duration, note.subdivision, tempo),
                frequency: note_frequency(note),
            })
        })
        .collect();
    events.sort_by(|a, b| a.start_ms.total_cmp(&b.start_ms).then(a.part.cmp(&b.part)));
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Track;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_reference_frequencies() {
        assert!(close(frequency(ScaleDegree::La, None, Octave::Normal), 440.0));
        assert!(close(frequency(ScaleDegree::La, None, Octave::High), 880.0));
        assert!(close(frequency(ScaleDegree::Do, None, Octave::Low), 130.815));
    }

    #[test]
    fn test_accidentals_shift_by_semitone() {
        let sharp = frequency(ScaleDegree::Fa, Some(Accidental::Sharp), Octave::Normal);
        assert!(close(sharp, 369.99));
        let natural = frequency(ScaleDegree::Fa, Some(Accidental::Natural), Octave::Normal);
        assert!(close(natural, 349.23));
    }

    #[test]
    fn test_durations_at_120() {
        assert!(close(duration_ms(NoteDuration::Beat, 120), 500.0));
        assert!(close(duration_ms(NoteDuration::Half, 120), 1000.0));
        assert!(close(duration_ms(NoteDuration::Sixteenth, 120), 125.0));
        assert!(close(dotted_ms(NoteDuration::Beat, Subdivision::Dot, 120), 750.0));
        assert!(close(dotted_ms(NoteDuration::Beat, Subdivision::DoubleDot, 120), 875.0));
        assert!(close(dotted_ms(NoteDuration::Beat, Subdivision::None, 120), 500.0));
    }

    #[test]
    fn test_schedule_orders_by_time_then_part() {
        let tracks = VoiceTracks::new()
            .with_track(VoicePart::B, Track::new().add_note(Note::new(ScaleDegree::Do, 0, 0)))
            .with_track(
                VoicePart::S,
                Track::new()
                    .add_note(Note::new(ScaleDegree::Mi, 0, 0))
                    .add_note(Note::new(ScaleDegree::Re, 1, 2)),
            );
        let events = schedule(&tracks, 60);
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].part, VoicePart::S);
        assert_eq!(events[1].part, VoicePart::B);
        assert!(close(events[2].start_ms, 1500.0));
    }
}
