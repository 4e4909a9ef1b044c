//! stafflib — scheduling and layout engine for a tempo-locked scrolling
//! staff display.
//!
//! Converts a symbolic score (ordered notes with pitch, octave, and rhythm)
//! into a time-stamped playback schedule driving a metronome, and a 2D
//! layout of bars and noteheads for a horizontally scrolling staff whose
//! scroll speed is locked to tempo. Audio playback, visual object lifecycle,
//! and the frame loop belong to the host; this crate only computes.
//!
//! # Example
//! ```
//! use stafflib::{generate_staff_plan, Note, PitchClass, Score, StaffGeometry};
//!
//! let geometry = StaffGeometry::new(10.0, 0.5, 0.0, 8.0, 0.0, 4).unwrap();
//! let score = Score {
//!     notes: vec![
//!         Note::new(PitchClass::C, 4, 2),
//!         Note::new(PitchClass::E, 4, 2),
//!     ],
//! };
//! let plan = generate_staff_plan(&score, 60, &geometry);
//! assert_eq!(plan.schedule.len(), 2);
//! assert_eq!(plan.total_duration, 2.0);
//! ```

pub mod engine;
pub mod layout;
pub mod model;
pub mod plan;
pub mod schedule;
pub mod scroll;
pub mod tempo;

#[cfg(target_os = "android")]
pub mod android;

pub use engine::{FrameUpdate, StaffEngine};
pub use layout::{layout as layout_notes, PlacementCommand, StaffBounds, StaffGeometry};
pub use model::{duration_fraction, Note, PitchClass, Score};
pub use plan::{generate_staff_plan, staff_plan_to_json, StaffPlan};
pub use schedule::{schedule as schedule_notes, ScheduledNote};
pub use scroll::ScrollState;
pub use tempo::{TempoClock, TempoState, LEAD_IN_TICKS};

/// Parse a score from its JSON form.
/// Useful for receiving note sequences across FFI boundaries.
pub fn score_from_json(json: &str) -> Result<Score, String> {
    serde_json::from_str(json).map_err(|e| format!("invalid score JSON: {e}"))
}

/// Convert a score to a JSON string.
pub fn score_to_json(score: &Score) -> Result<String, String> {
    serde_json::to_string(score).map_err(|e| format!("JSON serialization error: {e}"))
}

/// Parse staff geometry from its JSON form and validate it.
/// Deserialization alone would accept degenerate spans, so this re-runs the
/// same checks as [`StaffGeometry::new`].
pub fn geometry_from_json(json: &str) -> Result<StaffGeometry, String> {
    let geometry: StaffGeometry =
        serde_json::from_str(json).map_err(|e| format!("invalid geometry JSON: {e}"))?;
    geometry.validate()?;
    Ok(geometry)
}

/// Plan a score arriving as JSON and return the plan as JSON.
/// Convenience function combining parsing, planning, and serialization —
/// the single entry point the FFI bindings wrap.
pub fn plan_json(score_json: &str, bpm: i32, geometry_json: &str) -> Result<String, String> {
    let score = score_from_json(score_json)?;
    let geometry = geometry_from_json(geometry_json)?;
    let plan = generate_staff_plan(&score, bpm, &geometry);
    Ok(staff_plan_to_json(&plan))
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI — for iOS (static library) and Android (JNI)
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};

/// Plan a score and return the staff plan as a JSON C string.
/// The caller must free the returned string with `stafflib_free_string`.
///
/// `score_json` holds the note sequence, `geometry_json` the measured staff
/// geometry; `bpm` must be positive.
///
/// # Safety
/// `score_json` and `geometry_json` must be valid null-terminated UTF-8
/// C strings.
#[no_mangle]
pub unsafe extern "C" fn stafflib_plan_score(
    score_json: *const c_char,
    bpm: c_int,
    geometry_json: *const c_char,
) -> *mut c_char {
    if score_json.is_null() || geometry_json.is_null() || bpm <= 0 {
        return std::ptr::null_mut();
    }
    let score_str = match unsafe { CStr::from_ptr(score_json) }.to_str() {
        Ok(s) => s,
        Err(_) => return std::ptr::null_mut(),
    };
    let geometry_str = match unsafe { CStr::from_ptr(geometry_json) }.to_str() {
        Ok(s) => s,
        Err(_) => return std::ptr::null_mut(),
    };

    match plan_json(score_str, bpm, geometry_str) {
        Ok(json) => CString::new(json).unwrap_or_default().into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Free a string previously returned by stafflib functions.
///
/// # Safety
/// `ptr` must be a string previously returned by a stafflib function, or
/// null.
#[no_mangle]
pub unsafe extern "C" fn stafflib_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}
