//! The running widget session.
//!
//! A [`Session`] owns the only mutable state in the application: the
//! savings and interest segment sets. Everything the rendering layer reads
//! (resolved entries, snapshots, carry-forward table, breakdown) is derived
//! from them in [`ProjectionView`] and rebuilt after every change.
//!
//! Persistence goes through the injected [`Storage`] port. Saving is
//! fire-and-forget: failures are logged and otherwise ignored, and a failed
//! load at startup yields the default schedule.

use nestegg_core::error::{ParseError, SegmentError};
use nestegg_core::input::parse_field;
use nestegg_core::projection::{AnnualSnapshot, BucketShare, project};
use nestegg_core::schedule::{ResolvedEntry, Schedule, ScheduleField, resolve};
use nestegg_core::segments::{Age, Segment};
use nestegg_core::table::{CarryForward, apply_table_edit, carry_forward};
use serde::Serialize;

use crate::data::PersistedSchedule;
use crate::platform::Storage;

/// Derived, read-only view handed to the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionView {
    pub savings_segments: Vec<Segment>,
    pub interest_segments: Vec<Segment>,
    pub resolved: Vec<ResolvedEntry>,
    pub snapshots: Vec<AnnualSnapshot>,
    pub final_total: f64,
    pub carry_forward: CarryForward,
    pub breakdown: Vec<BucketShare>,
}

impl ProjectionView {
    pub fn build(schedule: &Schedule) -> Self {
        let resolution = resolve(schedule);
        let projection = project(&resolution.entries, &resolution.interest_by_age);

        Self {
            savings_segments: schedule.savings().segments().to_vec(),
            interest_segments: schedule.interest().segments().to_vec(),
            final_total: projection.final_total(),
            breakdown: projection.breakdown(),
            carry_forward: carry_forward(schedule),
            snapshots: projection.snapshots,
            resolved: resolution.entries,
        }
    }
}

pub struct Session<S: Storage> {
    schedule: Schedule,
    storage: S,
    dirty: bool,
    cached_view: Option<ProjectionView>,
}

impl<S: Storage> Session<S> {
    /// Restore the schedule from `storage`, falling back to the default on
    /// missing, unreadable or invalid data.
    pub fn load(storage: S) -> Self {
        let schedule = match storage.load() {
            Ok(Some(persisted)) => match persisted.into_schedule() {
                Ok(schedule) => {
                    tracing::info!("Restored saved schedule");
                    schedule
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Saved schedule is invalid, using defaults");
                    Schedule::default()
                }
            },
            Ok(None) => {
                tracing::info!("No saved schedule, using defaults");
                Schedule::default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load from storage, using defaults");
                Schedule::default()
            }
        };

        Self::with_schedule(schedule, storage)
    }

    pub fn with_schedule(schedule: Schedule, storage: S) -> Self {
        Self {
            schedule,
            storage,
            dirty: false,
            cached_view: None,
        }
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Whether there are edits not yet flushed to storage
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Get or build the cached view
    pub fn view(&mut self) -> &ProjectionView {
        self.cached_view
            .get_or_insert_with(|| ProjectionView::build(&self.schedule))
    }

    /// Mark data as modified (invalidates the cached view)
    fn mark_modified(&mut self) {
        self.cached_view = None;
        self.dirty = true;
    }

    fn track(&mut self, changed: bool) -> bool {
        if changed {
            self.mark_modified();
        }
        changed
    }

    // ------------------------------------------------------------------
    // Wholesale replacement
    // ------------------------------------------------------------------

    pub fn set_savings_segments(&mut self, segments: Vec<Segment>) -> Result<(), SegmentError> {
        self.replace(ScheduleField::Savings, segments)
    }

    pub fn set_interest_segments(&mut self, segments: Vec<Segment>) -> Result<(), SegmentError> {
        self.replace(ScheduleField::Rate, segments)
    }

    /// Replace one field; an invalid list leaves the current one in place.
    pub fn replace(
        &mut self,
        field: ScheduleField,
        segments: Vec<Segment>,
    ) -> Result<(), SegmentError> {
        match self.schedule.replace(field, segments) {
            Ok(()) => {
                self.mark_modified();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(field = field.label(), error = %e, "Rejected segment list");
                Err(e)
            }
        }
    }

    /// Back to the built-in default schedule
    pub fn reset(&mut self) {
        self.schedule = Schedule::default();
        self.mark_modified();
    }

    // ------------------------------------------------------------------
    // Segment edits (already-validated arguments)
    // ------------------------------------------------------------------

    pub fn split(&mut self, field: ScheduleField, idx: usize) -> bool {
        let changed = self.schedule.field_mut(field).split(idx);
        self.track(changed)
    }

    pub fn move_divider(&mut self, field: ScheduleField, idx: usize, new_boundary: Age) -> bool {
        let changed = self
            .schedule
            .field_mut(field)
            .move_divider(idx, new_boundary);
        self.track(changed)
    }

    pub fn remove_divider(&mut self, field: ScheduleField, idx: usize) -> bool {
        let changed = self.schedule.field_mut(field).remove_divider(idx);
        self.track(changed)
    }

    pub fn set_value(&mut self, field: ScheduleField, idx: usize, value: f64) -> bool {
        let changed = self.schedule.field_mut(field).set_value(idx, value);
        self.track(changed)
    }

    // ------------------------------------------------------------------
    // Free-text edits
    // ------------------------------------------------------------------

    /// Parse `text` and write it into segment `idx`. Rejected input leaves
    /// the schedule untouched.
    pub fn set_value_text(
        &mut self,
        field: ScheduleField,
        idx: usize,
        text: &str,
    ) -> Result<bool, ParseError> {
        let value = self.parse(field, text)?;
        Ok(self.set_value(field, idx, value))
    }

    /// Parse `text` and write it into the table cell for `age`.
    pub fn edit_table_cell(
        &mut self,
        field: ScheduleField,
        age: Age,
        text: &str,
    ) -> Result<bool, ParseError> {
        let value = self.parse(field, text)?;
        let changed = apply_table_edit(&mut self.schedule, field, age, value);
        Ok(self.track(changed))
    }

    fn parse(&self, field: ScheduleField, text: &str) -> Result<f64, ParseError> {
        parse_field(field, text).inspect_err(|e| {
            tracing::debug!(field = field.label(), input = text, error = %e, "Rejected input");
        })
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Save if there are unsaved edits. Returns whether a save succeeded;
    /// failures are logged and the session stays dirty.
    pub fn flush(&mut self) -> bool {
        if !self.dirty {
            return false;
        }

        let persisted = PersistedSchedule::from(&self.schedule);
        match self.storage.save(&persisted) {
            Ok(()) => {
                self.dirty = false;
                tracing::debug!("Schedule saved");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save schedule");
                false
            }
        }
    }
}
