//! Compute absolute playback timestamps for each note of the score. This is
//! the bridge between the symbolic note sequence and the audio collaborator:
//! it answers "when is each note's time slot over?" in wall-clock seconds.

use serde::Serialize;

use crate::model::Note;
use crate::tempo::TempoState;

/// One note with its playback timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScheduledNote {
    pub note: Note,
    /// Cumulative time in seconds from score start up to and including this
    /// note. This is the note's *end*; it is also the onset of the next
    /// note, so a playback driver that needs onsets tracks the previous
    /// entry's value (0.0 before the first).
    pub time: f64,
}

/// Walk the note sequence once, accumulating playback time per note.
///
/// Produces exactly one entry per input note, in input order, with
/// non-decreasing timestamps. The result is meant for strict FIFO
/// consumption by the playback driver; nothing here supports reordering.
pub fn schedule(notes: &[Note], tempo: &TempoState) -> Vec<ScheduledNote> {
    let mut scheduled = Vec::with_capacity(notes.len());
    let mut time = 0.0_f64;

    for &note in notes {
        let duration = tempo.secs_per_whole_note * note.duration_fraction();
        time += duration;
        scheduled.push(ScheduledNote { note, time });
    }

    scheduled
}

/// Total duration of the scheduled sequence in seconds.
pub fn total_duration(scheduled: &[ScheduledNote]) -> f64 {
    scheduled.last().map_or(0.0, |s| s.time)
}
