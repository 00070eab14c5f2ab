//! Savings and interest schedules and their per-age resolution

use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_ANNUAL_RATE, DEFAULT_MONTHLY_SAVINGS, INTEREST_RANGE, SAVINGS_RANGE,
};
use crate::error::SegmentError;
use crate::segments::{Age, AgeRange, PerYear, Segment, SegmentSet};

/// Which of the two segment sets an edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleField {
    /// Monthly contribution, currency units
    Savings,
    /// Annual nominal interest, percent
    Rate,
}

impl ScheduleField {
    pub const ALL: [ScheduleField; 2] = [ScheduleField::Savings, ScheduleField::Rate];

    /// The age range this field's segments must tile
    pub fn range(self) -> AgeRange {
        match self {
            ScheduleField::Savings => SAVINGS_RANGE,
            ScheduleField::Rate => INTEREST_RANGE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScheduleField::Savings => "savings",
            ScheduleField::Rate => "rate",
        }
    }
}

impl std::str::FromStr for ScheduleField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "savings" | "saving" | "s" => Ok(ScheduleField::Savings),
            "rate" | "interest" | "r" | "i" => Ok(ScheduleField::Rate),
            other => Err(format!("unknown field '{other}' (expected savings or rate)")),
        }
    }
}

/// The two segment sets that drive a projection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    savings: SegmentSet,
    interest: SegmentSet,
}

impl Default for Schedule {
    /// 200/month from 18 to 60, flat 7% from 18 to 65
    fn default() -> Self {
        Self {
            savings: SegmentSet::flat(SAVINGS_RANGE, DEFAULT_MONTHLY_SAVINGS),
            interest: SegmentSet::flat(INTEREST_RANGE, DEFAULT_ANNUAL_RATE),
        }
    }
}

impl Schedule {
    pub fn new(savings: SegmentSet, interest: SegmentSet) -> Self {
        Self { savings, interest }
    }

    /// Build from raw segment lists, validating each against its native range
    pub fn from_segments(
        savings: Vec<Segment>,
        interest: Vec<Segment>,
    ) -> Result<Self, SegmentError> {
        Ok(Self {
            savings: SegmentSet::new(SAVINGS_RANGE, savings)?,
            interest: SegmentSet::new(INTEREST_RANGE, interest)?,
        })
    }

    pub fn savings(&self) -> &SegmentSet {
        &self.savings
    }

    pub fn interest(&self) -> &SegmentSet {
        &self.interest
    }

    pub fn field(&self, field: ScheduleField) -> &SegmentSet {
        match field {
            ScheduleField::Savings => &self.savings,
            ScheduleField::Rate => &self.interest,
        }
    }

    pub fn field_mut(&mut self, field: ScheduleField) -> &mut SegmentSet {
        match field {
            ScheduleField::Savings => &mut self.savings,
            ScheduleField::Rate => &mut self.interest,
        }
    }

    /// Replace one field's segments wholesale.
    ///
    /// On error the current set is left untouched.
    pub fn replace(
        &mut self,
        field: ScheduleField,
        segments: Vec<Segment>,
    ) -> Result<(), SegmentError> {
        let set = SegmentSet::new(field.range(), segments)?;
        *self.field_mut(field) = set;
        Ok(())
    }
}

/// One age of the flattened schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedEntry {
    pub age: Age,
    /// Monthly contribution
    pub savings: f64,
    /// Annual rate in percent
    pub rate: f64,
}

/// Flattened schedule handed to the projection engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    /// One entry per contribution age (18..=60)
    pub entries: Vec<ResolvedEntry>,
    /// Interest for every projection age (18..=65), which outlives contributions
    pub interest_by_age: PerYear,
}

impl Resolution {
    pub fn entry(&self, age: Age) -> Option<&ResolvedEntry> {
        self.entries.iter().find(|entry| entry.age == age)
    }
}

pub fn resolve(schedule: &Schedule) -> Resolution {
    let savings_by_age = crate::segments::expand(schedule.savings.segments(), SAVINGS_RANGE);
    let interest_by_age = crate::segments::expand(schedule.interest.segments(), INTEREST_RANGE);

    let entries = SAVINGS_RANGE
        .ages()
        .map(|age| ResolvedEntry {
            age,
            savings: savings_by_age.get(&age).copied().unwrap_or(0.0),
            rate: interest_by_age.get(&age).copied().unwrap_or(0.0),
        })
        .collect();

    Resolution {
        entries,
        interest_by_age,
    }
}
