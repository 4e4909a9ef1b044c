//! Layout engine tests — bar packing, pitch-to-staff mapping, ledger
//! lines, and glyph selection.

use pretty_assertions::assert_eq;
use stafflib::layout::vertical_offset;
use stafflib::{layout_notes, Note, PitchClass, PlacementCommand, StaffGeometry};

/// Interior width of 8.0 with quarter notes at fill steps of 0.25 gives
/// four quarters per bar at x = 0, 2, 4, 6.
fn test_geometry() -> StaffGeometry {
    StaffGeometry::new(10.0, 0.5, 0.0, 8.0, 0.0, 4).expect("valid test geometry")
}

fn placed_notes(commands: &[PlacementCommand]) -> Vec<(usize, f64, f64, usize, bool)> {
    commands
        .iter()
        .filter_map(|c| match *c {
            PlacementCommand::PlaceNote {
                bar_index,
                x,
                y,
                glyph,
                ledger_line,
            } => Some((bar_index, x, y, glyph, ledger_line)),
            PlacementCommand::CreateBar { .. } => None,
        })
        .collect()
}

fn created_bars(commands: &[PlacementCommand]) -> Vec<(usize, f64)> {
    commands
        .iter()
        .filter_map(|c| match *c {
            PlacementCommand::CreateBar { index, x } => Some((index, x)),
            PlacementCommand::PlaceNote { .. } => None,
        })
        .collect()
}

#[test]
fn five_quarters_overflow_into_second_bar() {
    let geometry = test_geometry();
    let notes = vec![Note::new(PitchClass::C, 4, 2); 5];
    let commands = layout_notes(&notes, &geometry);

    let bars = created_bars(&commands);
    assert_eq!(bars, vec![(0, 0.0), (1, 10.0)], "bar 1 sits one bar_width right of bar 0");

    let placed = placed_notes(&commands);
    assert_eq!(placed.len(), 5, "every note placed exactly once");

    let bar_indices: Vec<usize> = placed.iter().map(|p| p.0).collect();
    assert_eq!(bar_indices, vec![0, 0, 0, 0, 1], "notes 1-4 in bar 0, note 5 in bar 1");

    // Fill fraction resets to zero before note 5 is placed: its horizontal
    // position is the interior start of bar 1, not a carried-over offset
    let xs: Vec<f64> = placed.iter().map(|p| p.1).collect();
    assert_eq!(xs, vec![0.0, 2.0, 4.0, 6.0, 10.0]);
}

#[test]
fn first_note_forces_bar_zero() {
    let geometry = test_geometry();
    let commands = layout_notes(&[Note::new(PitchClass::G, 4, 0)], &geometry);

    assert_eq!(
        commands[0],
        PlacementCommand::CreateBar { index: 0, x: 0.0 },
        "bar 0 must exist before the first placement"
    );
    assert_eq!(placed_notes(&commands).len(), 1);
}

#[test]
fn oversized_note_is_not_split_across_bars() {
    let geometry = test_geometry();
    // Half note leaves 0.5 capacity; the whole note exceeds it but is
    // still placed entirely in bar 0
    let notes = vec![
        Note::new(PitchClass::C, 4, 1),
        Note::new(PitchClass::D, 4, 0),
        Note::new(PitchClass::E, 4, 2),
    ];
    let commands = layout_notes(&notes, &geometry);

    let placed = placed_notes(&commands);
    assert_eq!(placed[1].0, 0, "oversized note stays in the current bar");
    assert_eq!(placed[1].1, 4.0, "placed at the half-note fill position");
    assert_eq!(placed[2].0, 1, "overflow is detected before the next note");
}

#[test]
fn pitch_mapping_is_anchored_on_c4() {
    let geometry = test_geometry();

    let c4 = Note::new(PitchClass::C, 4, 2);
    assert_eq!(vertical_offset(&c4, &geometry), 0.0);

    let c5 = Note::new(PitchClass::C, 5, 2);
    assert_eq!(vertical_offset(&c5, &geometry), 8.0 * geometry.line_spacing);

    let c3 = Note::new(PitchClass::C, 3, 2);
    assert_eq!(vertical_offset(&c3, &geometry), -8.0 * geometry.line_spacing);

    let g4 = Note::new(PitchClass::G, 4, 2);
    assert_eq!(vertical_offset(&g4, &geometry), 4.0 * geometry.line_spacing);
}

#[test]
fn silence_is_centered_on_the_staff() {
    let geometry = test_geometry();
    let rest = Note::silence(2);

    // Effective diatonic position is C plus one full cycle (7 steps)
    assert_eq!(vertical_offset(&rest, &geometry), 7.0 * geometry.line_spacing);

    let commands = layout_notes(&[rest], &geometry);
    let placed = placed_notes(&commands);
    assert!(!placed[0].4, "a centered rest needs no ledger line");
}

#[test]
fn ledger_line_iff_at_or_below_reference() {
    let geometry = test_geometry();
    let cases = [
        (Note::new(PitchClass::B, 3, 2), true),  // below C4
        (Note::new(PitchClass::C, 4, 2), true),  // exactly on the reference line
        (Note::new(PitchClass::D, 4, 2), false), // first step above
        (Note::new(PitchClass::C, 5, 2), false),
    ];

    for (note, expected) in cases {
        let commands = layout_notes(&[note], &geometry);
        let placed = placed_notes(&commands);
        assert_eq!(
            placed[0].4, expected,
            "ledger flag wrong for {:?}{}",
            note.pitch, note.octave
        );
    }
}

#[test]
fn note_y_combines_reference_and_offset() {
    let bounds_geometry =
        StaffGeometry::new(10.0, 0.5, 3.0, 8.0, 0.0, 4).expect("valid test geometry");
    let commands = layout_notes(&[Note::new(PitchClass::E, 4, 2)], &bounds_geometry);
    let placed = placed_notes(&commands);
    // E4 is two staff steps above C4
    assert_eq!(placed[0].2, 3.0 + 2.0 * 0.5);
}

#[test]
fn glyph_degrades_to_coarsest_available() {
    let geometry = test_geometry();
    let notes = vec![
        Note::new(PitchClass::C, 4, 2),
        Note::new(PitchClass::C, 4, 9), // beyond the 4-glyph set
    ];
    let commands = layout_notes(&notes, &geometry);
    let placed = placed_notes(&commands);

    assert_eq!(placed[0].3, 2, "in-range rhythm selects its own glyph");
    assert_eq!(placed[1].3, 3, "out-of-range rhythm clamps to the last glyph");
}

#[test]
fn interior_start_offset_shifts_note_x() {
    let geometry = StaffGeometry::new(10.0, 0.5, 0.0, 8.0, 1.5, 4).expect("valid test geometry");
    let commands = layout_notes(&[Note::new(PitchClass::C, 4, 2)], &geometry);
    let placed = placed_notes(&commands);
    assert_eq!(placed[0].1, -1.5, "bar origin minus interior start offset");
}

#[test]
fn degenerate_geometry_fails_fast() {
    assert!(StaffGeometry::new(0.0, 0.5, 0.0, 8.0, 0.0, 4).is_err());
    assert!(StaffGeometry::new(10.0, -0.5, 0.0, 8.0, 0.0, 4).is_err());
    assert!(StaffGeometry::new(10.0, 0.5, 0.0, 0.0, 0.0, 4).is_err());
    assert!(StaffGeometry::new(10.0, 0.5, 0.0, 8.0, 0.0, 0).is_err());
}

#[test]
fn layout_is_deterministic() {
    let geometry = test_geometry();
    let notes = vec![
        Note::new(PitchClass::A, 4, 1),
        Note::silence(2),
        Note::new(PitchClass::F, 5, 3),
        Note::new(PitchClass::B, 3, 0),
    ];

    let first = layout_notes(&notes, &geometry);
    let second = layout_notes(&notes, &geometry);
    assert_eq!(first, second, "same input must give identical placements");
}
