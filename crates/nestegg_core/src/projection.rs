//! Monthly compounding projection
//!
//! Contributions accrue into four decade buckets keyed by the contributor's
//! age at the time of contribution. Every bucket compounds every month, so
//! closed decades keep earning after contributions move on. Contributions
//! stop after age 60; growth continues until the age-65 snapshot.

use serde::{Deserialize, Serialize};

use crate::config::{
    CONTRIBUTION_END_AGE, MONTHS_PER_YEAR, PROJECTION_YEARS, SCHEDULE_START_AGE,
};
use crate::schedule::{ResolvedEntry, Schedule, resolve};
use crate::segments::{Age, PerYear};

/// Age-at-contribution partition; not user configurable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecadeBucket {
    /// 18-29
    Twenties,
    /// 30-39
    Thirties,
    /// 40-49
    Forties,
    /// 50-60
    Fifties,
}

impl DecadeBucket {
    pub const ALL: [DecadeBucket; 4] = [
        DecadeBucket::Twenties,
        DecadeBucket::Thirties,
        DecadeBucket::Forties,
        DecadeBucket::Fifties,
    ];

    pub fn for_age(age: Age) -> Self {
        if age <= 29 {
            DecadeBucket::Twenties
        } else if age <= 39 {
            DecadeBucket::Thirties
        } else if age <= 49 {
            DecadeBucket::Forties
        } else {
            DecadeBucket::Fifties
        }
    }

    pub fn index(self) -> usize {
        match self {
            DecadeBucket::Twenties => 0,
            DecadeBucket::Thirties => 1,
            DecadeBucket::Forties => 2,
            DecadeBucket::Fifties => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DecadeBucket::Twenties => "18-29",
            DecadeBucket::Thirties => "30-39",
            DecadeBucket::Forties => "40-49",
            DecadeBucket::Fifties => "50-60",
        }
    }
}

/// End-of-year bucket balances, rounded to whole currency units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnualSnapshot {
    pub age: Age,
    pub d18: f64,
    pub d30: f64,
    pub d40: f64,
    pub d50: f64,
    /// Sum of the rounded buckets, not the rounded true sum
    pub total: f64,
}

impl AnnualSnapshot {
    fn from_balances(age: Age, balances: [f64; 4]) -> Self {
        let [d18, d30, d40, d50] = balances.map(f64::round);
        Self {
            age,
            d18,
            d30,
            d40,
            d50,
            total: d18 + d30 + d40 + d50,
        }
    }

    pub fn bucket(&self, bucket: DecadeBucket) -> f64 {
        match bucket {
            DecadeBucket::Twenties => self.d18,
            DecadeBucket::Thirties => self.d30,
            DecadeBucket::Forties => self.d40,
            DecadeBucket::Fifties => self.d50,
        }
    }

    pub fn buckets(&self) -> [f64; 4] {
        [self.d18, self.d30, self.d40, self.d50]
    }
}

/// State of the buckets after one simulated month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthStep {
    /// Absolute month index from the 18th birthday
    pub month: usize,
    pub age: Age,
    pub monthly_rate: f64,
    /// Contribution made this month and its bucket, if inside the horizon
    pub contribution: Option<(DecadeBucket, f64)>,
    /// Unrounded balances after growth and contribution
    pub balances: [f64; 4],
}

/// Month-by-month walk over the projection horizon
///
/// Each step grows all four balances by the month's rate, then adds the
/// month's contribution to the current age's bucket.
#[derive(Debug, Clone)]
pub struct MonthlyProjection<'a> {
    entries: &'a [ResolvedEntry],
    interest_by_age: &'a PerYear,
    rate_at_contribution_end: Option<f64>,
    month: usize,
    balances: [f64; 4],
}

impl<'a> MonthlyProjection<'a> {
    pub fn new(entries: &'a [ResolvedEntry], interest_by_age: &'a PerYear) -> Self {
        let rate_at_contribution_end = entries
            .iter()
            .find(|entry| entry.age == CONTRIBUTION_END_AGE)
            .map(|entry| entry.rate);

        Self {
            entries,
            interest_by_age,
            rate_at_contribution_end,
            month: 0,
            balances: [0.0; 4],
        }
    }

    /// Annual percentage in effect for an age past the contribution horizon
    fn fallback_rate(&self, age: Age) -> f64 {
        self.interest_by_age
            .get(&age)
            .copied()
            .or(self.rate_at_contribution_end)
            .unwrap_or(0.0)
    }
}

impl Iterator for MonthlyProjection<'_> {
    type Item = MonthStep;

    fn next(&mut self) -> Option<MonthStep> {
        if self.month >= PROJECTION_YEARS * MONTHS_PER_YEAR {
            return None;
        }

        let year = self.month / MONTHS_PER_YEAR;
        let age = SCHEDULE_START_AGE + year as Age;
        let entry = self.entries.get(year);

        let annual_percent = match entry {
            Some(entry) => entry.rate,
            None => self.fallback_rate(age),
        };
        let monthly_rate = annual_percent / 100.0 / MONTHS_PER_YEAR as f64;

        for balance in &mut self.balances {
            *balance *= 1.0 + monthly_rate;
        }

        let contribution = entry.map(|entry| {
            let bucket = DecadeBucket::for_age(age);
            self.balances[bucket.index()] += entry.savings;
            (bucket, entry.savings)
        });

        let step = MonthStep {
            month: self.month,
            age,
            monthly_rate,
            contribution,
            balances: self.balances,
        };
        self.month += 1;
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (PROJECTION_YEARS * MONTHS_PER_YEAR).saturating_sub(self.month);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MonthlyProjection<'_> {}

/// Share of the final balance contributed by one decade
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BucketShare {
    pub bucket: DecadeBucket,
    pub amount: f64,
    /// Fraction of the final total in `0.0..=1.0`; 0 when the total is 0
    pub share: f64,
}

/// Result of a full projection run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    /// One snapshot per age 19..=65
    pub snapshots: Vec<AnnualSnapshot>,
    /// Total deposited into each bucket, before growth
    pub contributed: [f64; 4],
}

impl Projection {
    pub fn final_snapshot(&self) -> Option<&AnnualSnapshot> {
        self.snapshots.last()
    }

    /// Net worth at the last projected age, 0 for an empty projection
    pub fn final_total(&self) -> f64 {
        self.final_snapshot().map_or(0.0, |snapshot| snapshot.total)
    }

    pub fn snapshot_at(&self, age: Age) -> Option<&AnnualSnapshot> {
        self.snapshots.iter().find(|snapshot| snapshot.age == age)
    }

    pub fn total_contributed(&self) -> f64 {
        self.contributed.iter().sum()
    }

    /// Final balance broken out by decade of contribution
    pub fn breakdown(&self) -> Vec<BucketShare> {
        let Some(last) = self.final_snapshot() else {
            return Vec::new();
        };

        DecadeBucket::ALL
            .iter()
            .map(|&bucket| {
                let amount = last.bucket(bucket);
                let share = if last.total != 0.0 {
                    amount / last.total
                } else {
                    0.0
                };
                BucketShare {
                    bucket,
                    amount,
                    share,
                }
            })
            .collect()
    }
}

/// Run the engine over resolved entries and the full interest mapping.
pub fn project(entries: &[ResolvedEntry], interest_by_age: &PerYear) -> Projection {
    let mut snapshots = Vec::with_capacity(PROJECTION_YEARS);
    let mut contributed = [0.0; 4];

    for step in MonthlyProjection::new(entries, interest_by_age) {
        if let Some((bucket, amount)) = step.contribution {
            contributed[bucket.index()] += amount;
        }

        if (step.month + 1) % MONTHS_PER_YEAR == 0 {
            snapshots.push(AnnualSnapshot::from_balances(step.age + 1, step.balances));
        }
    }

    let projection = Projection {
        snapshots,
        contributed,
    };
    tracing::debug!(
        years = projection.snapshots.len(),
        final_total = projection.final_total(),
        "projection complete"
    );
    projection
}

/// Resolve `schedule` and project it
pub fn project_schedule(schedule: &Schedule) -> Projection {
    let resolution = resolve(schedule);
    project(&resolution.entries, &resolution.interest_by_age)
}
