//! Tempo arithmetic and the beat clock.
//!
//! [`TempoState`] holds everything derived from a BPM value: seconds per
//! beat, seconds per whole note, and the scroll speed that keeps the staff's
//! motion locked to tempo. [`TempoClock`] owns the free-running beat timer
//! and the tick counter that gates the lead-in.

use serde::Serialize;

/// Number of metronome ticks that must elapse before the staff starts
/// scrolling. Gives the player a fixed 4-beat count-in at any tempo.
pub const LEAD_IN_TICKS: u32 = 4;

/// Beats in one whole note (the beat unit is a quarter note).
const BEATS_PER_WHOLE_NOTE: f64 = 4.0;

/// Timing values derived from a tempo, replaced wholesale whenever a new
/// score is set. Never mutate fields individually: `scroll_speed` and the
/// durations are only valid together.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TempoState {
    /// Tempo in beats per minute
    pub bpm: i32,
    /// Wall-clock seconds per beat: `60 / bpm`
    pub secs_per_beat: f64,
    /// Wall-clock seconds per whole note: `4 × 60 / bpm`
    pub secs_per_whole_note: f64,
    /// Horizontal staff speed in units per second: `bar_width / secs_per_whole_note`.
    /// One bar of music crosses the playhead in exactly one whole note of time.
    pub scroll_speed: f64,
}

impl TempoState {
    /// Derive the full tempo state for a BPM and bar width.
    ///
    /// `secs_per_whole_note` is computed as `4 × 60 / bpm`, a distinct
    /// expression from `secs_per_beat × 4`; the two agree only to within
    /// floating-point rounding, and tests compare them against an epsilon
    /// rather than assuming bit-identity.
    ///
    /// Caller contract: `bpm > 0`. Non-positive tempos are not validated
    /// here and produce meaningless (infinite or negative) durations.
    pub fn for_bpm(bpm: i32, bar_width: f64) -> Self {
        let secs_per_beat = 60.0 / f64::from(bpm);
        let secs_per_whole_note = BEATS_PER_WHOLE_NOTE * 60.0 / f64::from(bpm);
        let scroll_speed = bar_width / secs_per_whole_note;
        Self {
            bpm,
            secs_per_beat,
            secs_per_whole_note,
            scroll_speed,
        }
    }
}

/// Free-running beat timer.
///
/// Each [`TempoClock::advance`] call reconciles "has the next beat deadline
/// passed" against accumulated elapsed time; when it has, the deadline is
/// re-armed one beat ahead and a tick is reported. At most one tick is
/// reported per call.
#[derive(Debug, Clone)]
pub struct TempoClock {
    state: TempoState,
    /// Accumulated wall-clock time since the clock started
    elapsed: f64,
    /// Deadline for the next metronome tick. Starts at 0 so the very first
    /// `advance` fires tick #1 immediately.
    next_beat_time: f64,
    tick_count: u32,
}

impl TempoClock {
    pub fn new(state: TempoState) -> Self {
        Self {
            state,
            elapsed: 0.0,
            next_beat_time: 0.0,
            tick_count: 0,
        }
    }

    /// Advance the clock by `dt` seconds of real time.
    ///
    /// Returns `true` when a beat boundary was crossed; the caller forwards
    /// that as a fire-and-forget signal to the metronome audio collaborator.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.elapsed += dt;
        if self.elapsed >= self.next_beat_time {
            self.next_beat_time = self.elapsed + self.state.secs_per_beat;
            self.tick_count += 1;
            return true;
        }
        false
    }

    /// Whether the 4-beat count-in has elapsed and scrolling may begin.
    pub fn lead_in_complete(&self) -> bool {
        self.tick_count > LEAD_IN_TICKS
    }

    pub fn tick_count(&self) -> u32 {
        self.tick_count
    }

    pub fn state(&self) -> &TempoState {
        &self.state
    }
}
