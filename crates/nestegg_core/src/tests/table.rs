//! Tests for the carry-forward table view and table edits

use crate::config::ScheduleBuilder;
use crate::schedule::{Schedule, ScheduleField};
use crate::segments::Segment;
use crate::table::{apply_table_edit, carry_forward};

#[test]
fn test_default_schedule_has_single_explicit_row() {
    let view = carry_forward(&Schedule::default());

    assert_eq!(view.len(), 1);
    let row = view.row(18).unwrap();
    assert_eq!(row.savings, Some(200.0));
    assert_eq!(row.rate, Some(7.0));
}

#[test]
fn test_changes_are_recorded_per_field() {
    let schedule = ScheduleBuilder::new()
        .savings(18, 24, 100.0)
        .savings(25, 60, 400.0)
        .interest(18, 39, 7.0)
        .interest(40, 65, 5.0)
        .build()
        .unwrap();
    let view = carry_forward(&schedule);

    assert_eq!(view.len(), 3);
    assert_eq!(view.explicit(ScheduleField::Savings, 25), Some(400.0));
    assert_eq!(view.explicit(ScheduleField::Rate, 25), None);
    assert_eq!(view.explicit(ScheduleField::Rate, 40), Some(5.0));
    assert_eq!(view.explicit(ScheduleField::Savings, 40), None);
    assert_eq!(view.next_explicit_after(ScheduleField::Savings, 18), Some(25));
    assert_eq!(view.next_explicit_after(ScheduleField::Savings, 25), None);
}

#[test]
fn test_equal_neighbouring_segments_are_not_explicit() {
    // Split leaves two segments with the same value; the table shows one entry
    let mut schedule = Schedule::default();
    schedule.field_mut(ScheduleField::Savings).split(0);
    assert_eq!(schedule.savings().segments().len(), 2);

    let view = carry_forward(&schedule);
    assert_eq!(view.len(), 1);
}

#[test]
fn test_rate_changes_after_60_are_not_table_rows() {
    let schedule = ScheduleBuilder::new()
        .interest(18, 62, 7.0)
        .interest(63, 65, 2.0)
        .build()
        .unwrap();
    let view = carry_forward(&schedule);
    assert!(view.rows().all(|row| row.age <= 60));
    assert_eq!(view.len(), 1);
}

#[test]
fn test_table_edit_propagates_to_end_of_range() {
    let mut schedule = Schedule::default();

    assert!(apply_table_edit(
        &mut schedule,
        ScheduleField::Savings,
        25,
        500.0
    ));
    assert_eq!(
        schedule.savings().segments(),
        &[Segment::new(18, 24, 200.0), Segment::new(25, 60, 500.0)]
    );

    assert!(apply_table_edit(
        &mut schedule,
        ScheduleField::Savings,
        40,
        300.0
    ));
    assert_eq!(
        schedule.savings().segments(),
        &[
            Segment::new(18, 24, 200.0),
            Segment::new(25, 39, 500.0),
            Segment::new(40, 60, 300.0),
        ]
    );
}

#[test]
fn test_table_edit_stops_before_next_explicit_entry() {
    let mut schedule = ScheduleBuilder::new()
        .savings(18, 29, 100.0)
        .savings(30, 60, 600.0)
        .build()
        .unwrap();

    assert!(apply_table_edit(
        &mut schedule,
        ScheduleField::Savings,
        22,
        250.0
    ));
    assert_eq!(
        schedule.savings().segments(),
        &[
            Segment::new(18, 21, 100.0),
            Segment::new(22, 29, 250.0),
            Segment::new(30, 60, 600.0),
        ]
    );
}

#[test]
fn test_table_edit_on_explicit_row_rewrites_its_run() {
    let mut schedule = ScheduleBuilder::new()
        .savings(18, 29, 100.0)
        .savings(30, 44, 600.0)
        .savings(45, 60, 50.0)
        .build()
        .unwrap();

    apply_table_edit(&mut schedule, ScheduleField::Savings, 30, 100.0);
    // 30..=44 now matches the row above and merges into it
    assert_eq!(
        schedule.savings().segments(),
        &[Segment::new(18, 44, 100.0), Segment::new(45, 60, 50.0)]
    );
}

#[test]
fn test_rate_edit_fills_through_65() {
    let mut schedule = Schedule::default();
    apply_table_edit(&mut schedule, ScheduleField::Rate, 50, 4.0);

    assert_eq!(
        schedule.interest().segments(),
        &[Segment::new(18, 49, 7.0), Segment::new(50, 65, 4.0)]
    );
    // Savings untouched
    assert_eq!(schedule.savings().segments(), &[Segment::new(18, 60, 200.0)]);
}

#[test]
fn test_table_edit_outside_rows_or_unchanged_is_noop() {
    let mut schedule = Schedule::default();
    let before = schedule.clone();

    assert!(!apply_table_edit(&mut schedule, ScheduleField::Rate, 62, 1.0));
    assert!(!apply_table_edit(&mut schedule, ScheduleField::Savings, 17, 1.0));
    assert!(!apply_table_edit(
        &mut schedule,
        ScheduleField::Savings,
        30,
        200.0
    ));
    assert_eq!(schedule, before);
}

#[test]
fn test_extreme_ages_do_not_overflow() {
    let mut schedule = Schedule::default();
    let table = carry_forward(&schedule);

    assert_eq!(table.next_explicit_after(ScheduleField::Savings, u32::MAX), None);
    assert!(!apply_table_edit(&mut schedule, ScheduleField::Rate, u32::MAX, 1.0));
    assert_eq!(schedule, Schedule::default());
}
