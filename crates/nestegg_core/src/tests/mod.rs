//! Tests for the nestegg_core schedule model and projection engine
//!
//! Tests are organized by topic:
//! - `segments` - Expand/compress and the split/move/merge/set-value edits
//! - `schedule` - Resolution of the two segment sets into per-age entries
//! - `projection` - Compounding scenarios and snapshot rounding
//! - `table` - Carry-forward view and table edits
//! - `builder_dsl` - ScheduleBuilder validation
//! - `properties` - proptest invariants across random edit sequences

mod projection;
mod table;
