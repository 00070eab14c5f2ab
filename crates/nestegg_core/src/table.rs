//! Spreadsheet-style view of a schedule
//!
//! The editable table only shows a value where it changes from the row
//! above; every other cell inherits. [`carry_forward`] rebuilds that sparse
//! view from the dense segment sets and [`apply_table_edit`] writes a cell
//! back into them.

use std::collections::BTreeMap;
use std::ops::Bound;

use serde::Serialize;

use crate::config::SAVINGS_RANGE;
use crate::schedule::{Schedule, ScheduleField};
use crate::segments::{Age, SegmentSet};

/// Explicit cells of one table row; `None` means inherited from above
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TableRow {
    pub age: Age,
    pub savings: Option<f64>,
    pub rate: Option<f64>,
}

impl TableRow {
    pub fn get(&self, field: ScheduleField) -> Option<f64> {
        match field {
            ScheduleField::Savings => self.savings,
            ScheduleField::Rate => self.rate,
        }
    }
}

/// Sparse table: only rows holding at least one explicit cell are present
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CarryForward {
    rows: BTreeMap<Age, TableRow>,
}

impl CarryForward {
    pub fn rows(&self) -> impl Iterator<Item = &TableRow> {
        self.rows.values()
    }

    pub fn row(&self, age: Age) -> Option<&TableRow> {
        self.rows.get(&age)
    }

    pub fn explicit(&self, field: ScheduleField, age: Age) -> Option<f64> {
        self.rows.get(&age).and_then(|row| row.get(field))
    }

    /// First age strictly after `age` with an explicit `field` cell
    pub fn next_explicit_after(&self, field: ScheduleField, age: Age) -> Option<Age> {
        self.rows
            .range((Bound::Excluded(age), Bound::Unbounded))
            .find(|(_, row)| row.get(field).is_some())
            .map(|(&age, _)| age)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Rebuild the "what the user typed" view for table rows 18..=60.
pub fn carry_forward(schedule: &Schedule) -> CarryForward {
    let savings_by_age = crate::segments::expand(schedule.savings().segments(), SAVINGS_RANGE);
    let rate_by_age = crate::segments::expand(schedule.interest().segments(), SAVINGS_RANGE);

    let mut rows = BTreeMap::new();
    let mut last_savings: Option<f64> = None;
    let mut last_rate: Option<f64> = None;

    for age in SAVINGS_RANGE.ages() {
        let mut row = TableRow {
            age,
            ..TableRow::default()
        };

        let savings = savings_by_age.get(&age).copied().unwrap_or(0.0);
        if last_savings != Some(savings) {
            row.savings = Some(savings);
            last_savings = Some(savings);
        }

        let rate = rate_by_age.get(&age).copied().unwrap_or(0.0);
        if last_rate != Some(rate) {
            row.rate = Some(rate);
            last_rate = Some(rate);
        }

        if row.savings.is_some() || row.rate.is_some() {
            rows.insert(age, row);
        }
    }

    CarryForward { rows }
}

/// Write `value` into the `field` column at `age`.
///
/// The value fills forward from `age` up to (not including) the next row
/// with an explicit cell for the same field, or to the end of the field's
/// range if there is none. The field is then re-compressed into canonical
/// segments. Ages outside the table rows are ignored.
pub fn apply_table_edit(
    schedule: &mut Schedule,
    field: ScheduleField,
    age: Age,
    value: f64,
) -> bool {
    if !SAVINGS_RANGE.contains(age) {
        return false;
    }

    let range = field.range();
    let stop = carry_forward(schedule)
        .next_explicit_after(field, age)
        .map_or(range.to, |next| next - 1);

    let mut per_year = schedule.field(field).expand();
    for filled in age..=stop {
        per_year.insert(filled, value);
    }

    let updated = SegmentSet::from_per_year(range, &per_year);
    if updated == *schedule.field(field) {
        return false;
    }

    tracing::trace!(field = field.label(), age, stop, value, "applied table edit");
    *schedule.field_mut(field) = updated;
    true
}
