//! Savings projection library
//!
//! This crate provides the schedule model and compounding engine behind the
//! NestEgg savings widget. It supports:
//! - Piecewise-constant schedules over an age axis (savings and interest)
//! - Split / move / merge / set-value edits that keep a schedule exhaustive
//! - Monthly compounding into four decade-of-contribution buckets
//! - A sparse "carry-forward" table view for spreadsheet-style editing
//!
//! # Builder DSL
//!
//! ```ignore
//! use nestegg_core::config::ScheduleBuilder;
//! use nestegg_core::projection::project_schedule;
//!
//! let schedule = ScheduleBuilder::new()
//!     .savings(18, 29, 150.0)
//!     .savings(30, 60, 400.0)
//!     .interest(18, 65, 6.5)
//!     .build()?;
//!
//! let projection = project_schedule(&schedule);
//! println!("net worth at 65: {}", projection.final_total());
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod error;
pub mod input;
pub mod projection;
pub mod schedule;
pub mod segments;
pub mod table;

// ============================================================================
// Configuration
// ============================================================================

pub mod config;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::ScheduleBuilder;
pub use error::{ParseError, SegmentError};
pub use projection::{
    AnnualSnapshot, BucketShare, DecadeBucket, MonthlyProjection, Projection, project,
    project_schedule,
};
pub use schedule::{Resolution, ResolvedEntry, Schedule, ScheduleField, resolve};
pub use segments::{Age, AgeRange, PerYear, Segment, SegmentSet, compress, expand};
pub use table::{CarryForward, TableRow, apply_table_edit, carry_forward};
