use nestegg_core::error::SegmentError;
use nestegg_core::schedule::Schedule;
use nestegg_core::segments::Segment;
use serde::{Deserialize, Serialize};

/// The single persisted object: both segment lists, as the widget stores them
///
/// ```json
/// { "savingsSegs": [{ "from": 18, "to": 60, "value": 200 }],
///   "interestSegs": [{ "from": 18, "to": 65, "value": 7 }] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSchedule {
    pub savings_segs: Vec<Segment>,
    pub interest_segs: Vec<Segment>,
}

impl PersistedSchedule {
    /// Validate both lists against their native ranges
    pub fn into_schedule(self) -> Result<Schedule, SegmentError> {
        Schedule::from_segments(self.savings_segs, self.interest_segs)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<&Schedule> for PersistedSchedule {
    fn from(schedule: &Schedule) -> Self {
        Self {
            savings_segs: schedule.savings().segments().to_vec(),
            interest_segs: schedule.interest().segments().to_vec(),
        }
    }
}
