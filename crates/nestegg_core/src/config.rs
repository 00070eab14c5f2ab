//! Schedule configuration
//!
//! Fixed ages of the projection horizon, the built-in default schedule, and
//! the [`ScheduleBuilder`] fluent API.
//!
//! # Example
//!
//! ```ignore
//! use nestegg_core::config::ScheduleBuilder;
//!
//! let schedule = ScheduleBuilder::new()
//!     // Savings must tile 18..=60
//!     .savings(18, 24, 100.0)
//!     .savings(25, 60, 350.0)
//!     // Interest must tile 18..=65
//!     .interest(18, 39, 8.0)
//!     .interest(40, 65, 5.0)
//!     .build()?;
//! ```

use crate::error::SegmentError;
use crate::schedule::Schedule;
use crate::segments::{Age, AgeRange, Segment, SegmentSet};

/// First age of both schedules
pub const SCHEDULE_START_AGE: Age = 18;
/// Last age at which monthly contributions are made
pub const CONTRIBUTION_END_AGE: Age = 60;
/// Age of the final annual snapshot; compounding continues up to here
pub const PROJECTION_END_AGE: Age = 65;

pub const MONTHS_PER_YEAR: usize = 12;
/// Number of annual snapshots a projection emits
pub const PROJECTION_YEARS: usize = (PROJECTION_END_AGE - SCHEDULE_START_AGE) as usize;

pub const DEFAULT_MONTHLY_SAVINGS: f64 = 200.0;
pub const DEFAULT_ANNUAL_RATE: f64 = 7.0;

pub const SAVINGS_RANGE: AgeRange = AgeRange::new_const(SCHEDULE_START_AGE, CONTRIBUTION_END_AGE);
pub const INTEREST_RANGE: AgeRange = AgeRange::new_const(SCHEDULE_START_AGE, PROJECTION_END_AGE);

/// Builder for schedules expressed as explicit age spans
///
/// Spans are collected in call order and validated on [`build`](Self::build):
/// they must tile the field's native range exactly. A field with no spans
/// falls back to the default flat schedule.
#[derive(Debug, Clone, Default)]
pub struct ScheduleBuilder {
    savings: Vec<Segment>,
    interest: Vec<Segment>,
}

impl ScheduleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Monthly contribution for ages `from..=to`
    pub fn savings(mut self, from: Age, to: Age, monthly_amount: f64) -> Self {
        self.savings.push(Segment::new(from, to, monthly_amount));
        self
    }

    /// Flat monthly contribution across the whole contribution range
    pub fn flat_savings(self, monthly_amount: f64) -> Self {
        self.savings(SAVINGS_RANGE.from, SAVINGS_RANGE.to, monthly_amount)
    }

    /// Annual nominal rate (percent) for ages `from..=to`
    pub fn interest(mut self, from: Age, to: Age, annual_percent: f64) -> Self {
        self.interest.push(Segment::new(from, to, annual_percent));
        self
    }

    /// Flat annual rate across the whole projection range
    pub fn flat_interest(self, annual_percent: f64) -> Self {
        self.interest(INTEREST_RANGE.from, INTEREST_RANGE.to, annual_percent)
    }

    pub fn build(self) -> Result<Schedule, SegmentError> {
        let savings = if self.savings.is_empty() {
            SegmentSet::flat(SAVINGS_RANGE, DEFAULT_MONTHLY_SAVINGS)
        } else {
            SegmentSet::new(SAVINGS_RANGE, self.savings)?
        };

        let interest = if self.interest.is_empty() {
            SegmentSet::flat(INTEREST_RANGE, DEFAULT_ANNUAL_RATE)
        } else {
            SegmentSet::new(INTEREST_RANGE, self.interest)?
        };

        Ok(Schedule::new(savings, interest))
    }
}
