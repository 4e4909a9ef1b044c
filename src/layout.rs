//! Staff layout engine — packs notes into fixed-width bars and computes
//! each note's position on the staff.
//!
//! The engine walks the note sequence once, carrying the current bar's fill
//! fraction, and emits an ordered stream of [`PlacementCommand`]s. The
//! renderer collaborator consumes the stream exactly once and owns the
//! actual visual objects; nothing here touches a display.
//!
//! All positions are staff-local: bar 0 sits at x = 0 and the scroll
//! controller moves the whole container, so layout never depends on the
//! staff's current scroll position.

use serde::{Deserialize, Serialize};

use crate::model::{Note, PitchClass};

/// Nominal capacity of a bar, in whole-note units. Independent of any time
/// signature: a bar is full when one whole note's worth of rhythm is in it.
pub const BAR_CAPACITY: f64 = 1.0;

/// Octave of the reference pitch C4.
const REFERENCE_OCTAVE: i32 = 4;

/// Staff steps per octave. The measured staff span covers one octave, so
/// this is also the divisor that turns the span into a line spacing.
const STEPS_PER_OCTAVE: i32 = 8;

/// Diatonic shift applied to silences: one full cycle up from C, which
/// centers the rest glyph on the staff instead of colliding with C4.
const SILENCE_STAFF_SHIFT: i32 = 7;

/// Measured positions of the staff marker objects, as reported by the
/// renderer at startup. Raw input for [`StaffGeometry::from_bounds`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StaffBounds {
    /// Lower-left corner of one bar's span
    pub staff_min_x: f64,
    pub staff_min_y: f64,
    /// Upper-right corner of one bar's span
    pub staff_max_x: f64,
    pub staff_max_y: f64,
    /// Left edge of the note-drawing region inside a bar
    pub notes_min_x: f64,
    /// Right edge of the note-drawing region inside a bar
    pub notes_max_x: f64,
    /// X position of the marker container the offsets are measured against
    pub anchor_x: f64,
}

/// Read-only staff geometry, measured once from the rendered staff and
/// validated up front. Every placement the engine emits is derived from
/// these five lengths plus the glyph count.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StaffGeometry {
    /// Horizontal span of one bar
    pub bar_width: f64,
    /// Vertical distance of one staff step (half a line gap)
    pub line_spacing: f64,
    /// Y position of the reference pitch C4
    pub reference_pitch_y: f64,
    /// Usable note-placement width inside a bar
    pub bar_interior_width: f64,
    /// Horizontal offset from a bar's origin back to its interior start
    pub bar_interior_start_offset: f64,
    /// Number of note glyphs the renderer can draw, indexed by rhythm code.
    /// Rhythm codes past the end degrade to the last glyph.
    pub glyph_count: usize,
}

impl StaffGeometry {
    /// Validate and build a geometry from explicit lengths.
    pub fn new(
        bar_width: f64,
        line_spacing: f64,
        reference_pitch_y: f64,
        bar_interior_width: f64,
        bar_interior_start_offset: f64,
        glyph_count: usize,
    ) -> Result<Self, String> {
        let geometry = Self {
            bar_width,
            line_spacing,
            reference_pitch_y,
            bar_interior_width,
            bar_interior_start_offset,
            glyph_count,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Check the geometry for degenerate spans.
    ///
    /// A zero or negative width would silently collapse every subsequent
    /// placement onto one point, so it is rejected up front. Also run on
    /// geometry arriving over FFI, where deserialization bypasses
    /// [`StaffGeometry::new`].
    pub fn validate(&self) -> Result<(), String> {
        if self.bar_width <= 0.0 {
            return Err(format!(
                "invalid staff geometry: bar_width must be positive, got {}",
                self.bar_width
            ));
        }
        if self.line_spacing <= 0.0 {
            return Err(format!(
                "invalid staff geometry: line_spacing must be positive, got {}",
                self.line_spacing
            ));
        }
        if self.bar_interior_width <= 0.0 {
            return Err(format!(
                "invalid staff geometry: bar_interior_width must be positive, got {}",
                self.bar_interior_width
            ));
        }
        if self.glyph_count == 0 {
            return Err("invalid staff geometry: glyph_count must be at least 1".to_string());
        }
        Ok(())
    }

    /// Derive a geometry from measured staff bounds.
    ///
    /// The vertical span between the staff bounds covers one octave of
    /// staff steps, and C4 anchors two steps below the lower bound.
    pub fn from_bounds(bounds: &StaffBounds, glyph_count: usize) -> Result<Self, String> {
        let bar_width = bounds.staff_max_x - bounds.staff_min_x;
        let line_spacing = (bounds.staff_max_y - bounds.staff_min_y) / f64::from(STEPS_PER_OCTAVE);
        let reference_pitch_y = bounds.staff_min_y - line_spacing * 2.0;
        let bar_interior_width = bounds.notes_max_x - bounds.notes_min_x;
        let bar_interior_start_offset = bounds.anchor_x - bounds.notes_min_x;
        Self::new(
            bar_width,
            line_spacing,
            reference_pitch_y,
            bar_interior_width,
            bar_interior_start_offset,
            glyph_count,
        )
    }
}

/// One entry in the ordered placement stream sent to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlacementCommand {
    /// Create bar `index` with its left edge at staff-local `x`.
    CreateBar { index: usize, x: f64 },
    /// Draw a note glyph inside bar `bar_index` at staff-local (`x`, `y`).
    PlaceNote {
        bar_index: usize,
        x: f64,
        y: f64,
        /// Index into the renderer's glyph set, selected by rhythm code
        glyph: usize,
        /// Whether an auxiliary ledger line is drawn at the same position
        ledger_line: bool,
    },
}

/// Vertical offset of a note relative to the reference pitch C4, in staff
/// units. Zero for C4 itself; negative below it.
pub fn vertical_offset(note: &Note, geometry: &StaffGeometry) -> f64 {
    let mut key_diff = note.pitch.diatonic_ordinal() - PitchClass::C.diatonic_ordinal();
    // rest glyphs sit one diatonic cycle up from C, centered on the staff
    if note.pitch.is_silence() {
        key_diff += SILENCE_STAFF_SHIFT;
    }
    let octave_diff = note.octave - REFERENCE_OCTAVE;
    geometry.line_spacing * f64::from(key_diff + octave_diff * STEPS_PER_OCTAVE)
}

/// Pack the note sequence into bars and emit the placement stream.
///
/// Bars are created on demand: the fill fraction starts saturated so the
/// very first note forces bar 0, and each time a bar reaches capacity the
/// next note opens a new one. A single note longer than the remaining
/// capacity is still placed whole in the current bar — capacity is checked
/// between notes, never mid-note.
pub fn layout(notes: &[Note], geometry: &StaffGeometry) -> Vec<PlacementCommand> {
    let mut commands = Vec::new();

    let mut bar_count: usize = 0;
    let mut bar_fill = BAR_CAPACITY;
    let mut bar_x = 0.0_f64;

    for note in notes {
        if bar_fill >= BAR_CAPACITY {
            bar_x = bar_count as f64 * geometry.bar_width;
            commands.push(PlacementCommand::CreateBar {
                index: bar_count,
                x: bar_x,
            });
            bar_count += 1;
            bar_fill = 0.0;
        }

        let v_offset = vertical_offset(note, geometry);
        let x = bar_x - geometry.bar_interior_start_offset
            + geometry.bar_interior_width * bar_fill;
        let y = geometry.reference_pitch_y + v_offset;

        // rhythm codes past the glyph set degrade to the coarsest glyph
        let glyph = (note.rhythm as usize).min(geometry.glyph_count - 1);

        commands.push(PlacementCommand::PlaceNote {
            bar_index: bar_count - 1,
            x,
            y,
            glyph,
            // notes at or below the staff's lower reference line carry an
            // auxiliary ledger line
            ledger_line: v_offset <= 0.0,
        });

        bar_fill += note.duration_fraction();
    }

    commands
}
