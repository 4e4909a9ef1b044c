//! Staff plan: the batch view of a loaded score, combining the playback
//! schedule with the placement stream. This is the bridge between the core
//! and FFI consumers — a host that cannot hold a [`crate::StaffEngine`]
//! across calls (e.g. a WebView or a game script layer) requests the whole
//! plan once and drives playback and rendering from the JSON.

use serde::Serialize;

use crate::layout::{layout, PlacementCommand, StaffGeometry};
use crate::model::Score;
use crate::schedule::{schedule, total_duration, ScheduledNote};
use crate::tempo::TempoState;

/// Everything derived from one `(score, bpm, geometry)` triple.
#[derive(Debug, Clone, Serialize)]
pub struct StaffPlan {
    /// Derived tempo values, including the scroll speed
    pub tempo: TempoState,
    /// Playback queue in score order (times are cumulative ends)
    pub schedule: Vec<ScheduledNote>,
    /// Bar-creation and note-placement commands in emission order
    pub placements: Vec<PlacementCommand>,
    /// Total score duration in seconds
    pub total_duration: f64,
}

/// Run scheduling and layout to completion for a score.
///
/// Both passes walk the same note sequence independently, so the plan's
/// schedule and placements pair up one-to-one in score order.
pub fn generate_staff_plan(score: &Score, bpm: i32, geometry: &StaffGeometry) -> StaffPlan {
    let tempo = TempoState::for_bpm(bpm, geometry.bar_width);
    let scheduled = schedule(&score.notes, &tempo);
    let placements = layout(&score.notes, geometry);
    let total = total_duration(&scheduled);

    StaffPlan {
        tempo,
        schedule: scheduled,
        placements,
        total_duration: total,
    }
}

/// Serialize a StaffPlan to JSON.
pub fn staff_plan_to_json(plan: &StaffPlan) -> String {
    serde_json::to_string(plan).unwrap_or_else(|_| "{}".to_string())
}
