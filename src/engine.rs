//! Frame-driven engine facade.
//!
//! [`StaffEngine`] owns all mutable state — tempo clock, scroll offset,
//! playback schedule, placement stream — and exposes the two inbound
//! operations the host calls: [`StaffEngine::load_score`] when a score is
//! (re)loaded and [`StaffEngine::advance`] once per frame. Everything is
//! single-threaded and synchronous; the host's frame loop is the only
//! driver.

use crate::layout::{layout, PlacementCommand, StaffGeometry};
use crate::model::Score;
use crate::schedule::{schedule, ScheduledNote};
use crate::scroll::ScrollState;
use crate::tempo::{TempoClock, TempoState};

/// Tempo used until the first score is loaded.
const DEFAULT_BPM: i32 = 60;

/// What happened during one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUpdate {
    /// A beat boundary was crossed; the host fires the metronome tick.
    /// No payload — the signal itself is the event.
    pub tick: bool,
    /// Horizontal displacement applied to the staff container this frame
    /// (0.0 during the count-in, negative afterwards).
    pub scroll_delta: f64,
}

/// The scrolling-staff engine.
pub struct StaffEngine {
    geometry: StaffGeometry,
    clock: TempoClock,
    scroll: ScrollState,
    scheduled: Vec<ScheduledNote>,
    placements: Vec<PlacementCommand>,
}

impl StaffEngine {
    /// Build an engine around validated staff geometry. Starts with an
    /// empty score at the default tempo.
    pub fn new(geometry: StaffGeometry) -> Self {
        let tempo = TempoState::for_bpm(DEFAULT_BPM, geometry.bar_width);
        Self {
            geometry,
            clock: TempoClock::new(tempo),
            scroll: ScrollState::new(),
            scheduled: Vec::new(),
            placements: Vec::new(),
        }
    }

    /// Load a score, replacing all prior derived state.
    ///
    /// Runs scheduling and layout to completion in one synchronous pass
    /// each; there is no incremental update. The clock and scroll position
    /// restart from zero, so the count-in plays again.
    pub fn load_score(&mut self, score: &Score, bpm: i32) {
        let tempo = TempoState::for_bpm(bpm, self.geometry.bar_width);
        self.clock = TempoClock::new(tempo);
        self.scroll = ScrollState::new();
        self.scheduled = schedule(&score.notes, &tempo);
        self.placements = layout(&score.notes, &self.geometry);
    }

    /// Advance the engine by one frame of `dt` seconds: reconcile the beat
    /// deadline, count the lead-in, and move the staff.
    pub fn advance(&mut self, dt: f64) -> FrameUpdate {
        let tick = self.clock.advance(dt);
        let scroll_delta = self.scroll.advance(&self.clock, dt);
        FrameUpdate { tick, scroll_delta }
    }

    /// The playback queue: one entry per note in score order, consumed FIFO
    /// by the playback driver.
    pub fn scheduled(&self) -> &[ScheduledNote] {
        &self.scheduled
    }

    /// The placement stream in emission order, for inspection.
    pub fn placements(&self) -> &[PlacementCommand] {
        &self.placements
    }

    /// Drain the placement stream. The renderer consumes each command
    /// exactly once; after this the engine holds no placements until the
    /// next `load_score`.
    pub fn take_placements(&mut self) -> Vec<PlacementCommand> {
        std::mem::take(&mut self.placements)
    }

    /// Current staff container offset (0.0 or negative).
    pub fn scroll_x(&self) -> f64 {
        self.scroll.offset_x()
    }

    pub fn tempo(&self) -> &TempoState {
        self.clock.state()
    }

    pub fn tick_count(&self) -> u32 {
        self.clock.tick_count()
    }

    pub fn geometry(&self) -> &StaffGeometry {
        &self.geometry
    }
}
