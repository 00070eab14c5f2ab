//! Tests for the compounding projection engine
//!
//! These tests verify that:
//! - One snapshot is produced per age 19..=65
//! - Flat defaults reproduce a replay of the monthly algorithm
//! - Zero interest sums contributions exactly
//! - Contributions land in the bucket of the contributor's current age
//! - Growth continues after contributions stop, with the fallback rate policy
//! - Snapshot totals use the rounded buckets

use crate::config::ScheduleBuilder;
use crate::projection::{DecadeBucket, MonthlyProjection, project, project_schedule};
use crate::schedule::{ResolvedEntry, Schedule, resolve};
use crate::segments::PerYear;

/// Replay of the monthly algorithm for a flat schedule, unrounded
fn replay_flat(savings: f64, annual_percent: f64, months: usize) -> f64 {
    let monthly_rate = annual_percent / 100.0 / 12.0;
    let mut balance = 0.0;
    for _ in 0..months {
        balance *= 1.0 + monthly_rate;
        balance += savings;
    }
    balance
}

#[test]
fn test_projection_covers_ages_19_to_65() {
    let projection = project_schedule(&Schedule::default());

    assert_eq!(projection.snapshots.len(), 47);
    assert_eq!(projection.snapshots.first().unwrap().age, 19);
    assert_eq!(projection.snapshots.last().unwrap().age, 65);
    for pair in projection.snapshots.windows(2) {
        assert_eq!(pair[1].age, pair[0].age + 1);
    }
}

#[test]
fn test_flat_defaults_first_year() {
    let projection = project_schedule(&Schedule::default());
    let first = projection.snapshot_at(19).unwrap();

    let expected = replay_flat(200.0, 7.0, 12).round();
    assert_eq!(first.d18, expected);
    assert_eq!(first.d18, 2479.0);
    assert_eq!((first.d30, first.d40, first.d50), (0.0, 0.0, 0.0));
    assert_eq!(first.total, 2479.0);
}

#[test]
fn test_flat_defaults_final_year() {
    let projection = project_schedule(&Schedule::default());
    let last = projection.final_snapshot().unwrap();

    assert_eq!(last.age, 65);
    assert_eq!(last.d18, 517_075.0);
    assert_eq!(last.d30, 198_197.0);
    assert_eq!(last.d40, 98_622.0);
    assert_eq!(last.d50, 52_351.0);
    assert_eq!(last.total, 866_245.0);
    assert_eq!(projection.final_total(), 866_245.0);
}

#[test]
fn test_zero_rate_sums_contributions_exactly() {
    let schedule = ScheduleBuilder::new()
        .flat_savings(200.0)
        .flat_interest(0.0)
        .build()
        .unwrap();
    let projection = project_schedule(&schedule);
    let last = projection.final_snapshot().unwrap();

    // Contributions run from the 18th birthday through age 60 inclusive:
    // 43 years, not the 42 a "ages 18 to 60" reading suggests
    assert_eq!(last.total, 200.0 * 12.0 * 43.0);
    assert_eq!(last.d18, 200.0 * 12.0 * 12.0);
    assert_eq!(last.d30, 200.0 * 12.0 * 10.0);
    assert_eq!(last.d40, 200.0 * 12.0 * 10.0);
    assert_eq!(last.d50, 200.0 * 12.0 * 11.0);
    assert_eq!(projection.total_contributed(), last.total);

    // Nothing moves after age 61
    assert_eq!(projection.snapshot_at(61).unwrap().total, last.total);
}

#[test]
fn test_contributions_only_in_current_decade() {
    let schedule = ScheduleBuilder::new()
        .savings(18, 29, 0.0)
        .savings(30, 39, 100.0)
        .savings(40, 60, 0.0)
        .flat_interest(5.0)
        .build()
        .unwrap();
    let projection = project_schedule(&schedule);

    let at_30 = projection.snapshot_at(30).unwrap();
    assert_eq!(at_30.total, 0.0);

    let last = projection.final_snapshot().unwrap();
    assert_eq!(last.d18, 0.0);
    assert!(last.d30 > 100.0 * 12.0 * 10.0, "closed decade keeps compounding");
    assert_eq!(last.d40, 0.0);
    assert_eq!(last.d50, 0.0);
    assert_eq!(projection.contributed, [0.0, 12_000.0, 0.0, 0.0]);
}

#[test]
fn test_contribution_is_added_after_growth() {
    let schedule = ScheduleBuilder::new()
        .flat_savings(1000.0)
        .flat_interest(12.0)
        .build()
        .unwrap();
    let resolution = resolve(&schedule);
    let mut months = MonthlyProjection::new(&resolution.entries, &resolution.interest_by_age);

    let first = months.next().unwrap();
    assert_eq!(first.balances[0], 1000.0, "first deposit does not earn that month");
    let second = months.next().unwrap();
    assert!((second.balances[0] - (1000.0 * 1.01 + 1000.0)).abs() < 1e-9);
    assert_eq!(second.contribution, Some((DecadeBucket::Twenties, 1000.0)));
}

#[test]
fn test_monthly_iterator_length_and_horizon() {
    let resolution = resolve(&Schedule::default());
    let steps: Vec<_> =
        MonthlyProjection::new(&resolution.entries, &resolution.interest_by_age).collect();

    assert_eq!(steps.len(), 47 * 12);
    let contributing = steps.iter().filter(|s| s.contribution.is_some()).count();
    assert_eq!(contributing, 43 * 12);
    assert_eq!(steps[43 * 12 - 1].age, 60);
    assert!(steps[43 * 12].contribution.is_none());
    assert_eq!(steps.last().unwrap().age, 64);
}

#[test]
fn test_post_horizon_rate_uses_interest_by_age() {
    let schedule = ScheduleBuilder::new()
        .flat_savings(100.0)
        .interest(18, 60, 0.0)
        .interest(61, 65, 12.0)
        .build()
        .unwrap();
    let resolution = resolve(&schedule);
    let steps: Vec<_> =
        MonthlyProjection::new(&resolution.entries, &resolution.interest_by_age).collect();

    assert_eq!(steps[43 * 12 - 1].monthly_rate, 0.0);
    assert!((steps[43 * 12].monthly_rate - 0.01).abs() < 1e-12);
}

#[test]
fn test_post_horizon_rate_falls_back_to_age_60() {
    let entries: Vec<ResolvedEntry> = (18..=60)
        .map(|age| ResolvedEntry {
            age,
            savings: 0.0,
            rate: if age == 60 { 6.0 } else { 0.0 },
        })
        .collect();
    // Interest mapping that stops at 60
    let interest_by_age: PerYear = (18..=60).map(|age| (age, 0.0)).collect();

    let steps: Vec<_> = MonthlyProjection::new(&entries, &interest_by_age).collect();
    assert!((steps[43 * 12].monthly_rate - 0.005).abs() < 1e-12);
}

#[test]
fn test_post_horizon_rate_defaults_to_zero() {
    let entries: Vec<ResolvedEntry> = (18..=40)
        .map(|age| ResolvedEntry {
            age,
            savings: 10.0,
            rate: 5.0,
        })
        .collect();
    let projection = project(&entries, &PerYear::new());

    // Contributions stop after age 40 and nothing compounds afterwards
    let at_41 = projection.snapshot_at(41).unwrap().total;
    assert_eq!(projection.final_total(), at_41);
}

#[test]
fn test_total_is_sum_of_rounded_buckets() {
    let schedule = ScheduleBuilder::new()
        .savings(18, 29, 133.33)
        .savings(30, 39, 77.77)
        .savings(40, 49, 55.55)
        .savings(50, 60, 11.11)
        .flat_interest(6.1)
        .build()
        .unwrap();
    let resolution = resolve(&schedule);
    let projection = project(&resolution.entries, &resolution.interest_by_age);

    let year_end_balances: Vec<[f64; 4]> =
        MonthlyProjection::new(&resolution.entries, &resolution.interest_by_age)
            .filter(|step| (step.month + 1) % 12 == 0)
            .map(|step| step.balances)
            .collect();

    for (snapshot, balances) in projection.snapshots.iter().zip(&year_end_balances) {
        let rounded: f64 = balances.iter().map(|b| b.round()).sum();
        let exact: f64 = balances.iter().sum();
        assert_eq!(snapshot.total, rounded);
        assert_eq!(
            snapshot.total,
            snapshot.d18 + snapshot.d30 + snapshot.d40 + snapshot.d50
        );
        assert!((snapshot.total - exact).abs() <= 3.0);
    }
}

#[test]
fn test_nan_poisons_subsequent_balances() {
    let mut entries: Vec<ResolvedEntry> = (18..=60)
        .map(|age| ResolvedEntry {
            age,
            savings: 100.0,
            rate: 5.0,
        })
        .collect();
    entries[5].rate = f64::NAN;
    let interest_by_age: PerYear = (18..=65).map(|age| (age, 5.0)).collect();

    let projection = project(&entries, &interest_by_age);
    assert!(!projection.snapshot_at(23).unwrap().total.is_nan());
    assert!(projection.snapshot_at(24).unwrap().d18.is_nan());
    assert!(projection.final_total().is_nan());
}

#[test]
fn test_breakdown_shares_sum_to_one() {
    let projection = project_schedule(&Schedule::default());
    let breakdown = projection.breakdown();

    assert_eq!(breakdown.len(), 4);
    assert_eq!(breakdown[0].bucket, DecadeBucket::Twenties);
    assert_eq!(breakdown[0].amount, 517_075.0);
    let total_share: f64 = breakdown.iter().map(|b| b.share).sum();
    assert!((total_share - 1.0).abs() < 1e-12);
}

#[test]
fn test_breakdown_of_zero_total() {
    let schedule = ScheduleBuilder::new().flat_savings(0.0).build().unwrap();
    let breakdown = project_schedule(&schedule).breakdown();
    assert!(breakdown.iter().all(|b| b.amount == 0.0 && b.share == 0.0));
}

#[test]
fn test_decade_bucket_boundaries() {
    assert_eq!(DecadeBucket::for_age(18), DecadeBucket::Twenties);
    assert_eq!(DecadeBucket::for_age(29), DecadeBucket::Twenties);
    assert_eq!(DecadeBucket::for_age(30), DecadeBucket::Thirties);
    assert_eq!(DecadeBucket::for_age(49), DecadeBucket::Forties);
    assert_eq!(DecadeBucket::for_age(50), DecadeBucket::Fifties);
    assert_eq!(DecadeBucket::for_age(60), DecadeBucket::Fifties);
    assert_eq!(DecadeBucket::Fifties.label(), "50-60");
}
