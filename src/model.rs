//! Data model for a symbolic score.
//!
//! These structures capture the note sequence the engine consumes: pitch
//! letter, octave, and rhythm code. They are supplied by the caller (a score
//! loader or a game client over FFI) and never mutated by the engine.

use serde::{Deserialize, Serialize};

/// Diatonic pitch letter, plus a marker for silences (rests).
///
/// Only the 7 natural letters are representable; accidentals and key
/// signatures are outside this model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PitchClass {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
    /// A rest. Takes up time like any note but carries no pitch; the layout
    /// engine draws it centered on the staff.
    Silence,
}

impl PitchClass {
    /// Diatonic ordinal within the scale (C=0, D=1, … B=6).
    ///
    /// `Silence` has no position of its own and maps to 0; callers that
    /// care must check [`PitchClass::is_silence`] first (the layout engine
    /// substitutes its own staff step for silences).
    pub fn diatonic_ordinal(self) -> i32 {
        match self {
            PitchClass::C => 0,
            PitchClass::D => 1,
            PitchClass::E => 2,
            PitchClass::F => 3,
            PitchClass::G => 4,
            PitchClass::A => 5,
            PitchClass::B => 6,
            PitchClass::Silence => 0,
        }
    }

    pub fn is_silence(self) -> bool {
        self == PitchClass::Silence
    }
}

/// A single note of the score: what to play and for how long.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Pitch letter, or `Silence` for a rest
    pub pitch: PitchClass,
    /// Octave number (middle C = C4)
    pub octave: i32,
    /// Rhythm code `r`: duration is `1/2^r` of a whole note
    /// (0 = whole, 1 = half, 2 = quarter, …)
    pub rhythm: u8,
}

impl Note {
    pub fn new(pitch: PitchClass, octave: i32, rhythm: u8) -> Self {
        Self { pitch, octave, rhythm }
    }

    /// A rest of the given rhythm value. Octave is pinned to the reference
    /// octave so silences always land on the same staff position.
    pub fn silence(rhythm: u8) -> Self {
        Self {
            pitch: PitchClass::Silence,
            octave: 4,
            rhythm,
        }
    }

    /// Duration of this note as a fraction of a whole note.
    pub fn duration_fraction(&self) -> f64 {
        duration_fraction(self.rhythm)
    }
}

/// Convert a rhythm code to a fraction of a whole note: `1 / 2^rhythm`.
///
/// The code must be a small non-negative integer; dotted and tuplet rhythms
/// are not representable. Out-of-range codes are a caller contract
/// violation, not a recoverable error.
pub fn duration_fraction(rhythm: u8) -> f64 {
    1.0 / (1u64 << rhythm) as f64
}

/// An ordered sequence of notes, played and laid out front to back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub notes: Vec<Note>,
}

impl Score {
    /// Create a new empty score.
    pub fn new() -> Self {
        Self { notes: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Total length of the score in whole-note units.
    ///
    /// Since a bar holds exactly one whole-note unit, this is also an upper
    /// bound on the number of bars the layout engine will create.
    pub fn whole_notes(&self) -> f64 {
        self.notes.iter().map(Note::duration_fraction).sum()
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}
