//! Piecewise-constant schedules over the age axis
//!
//! A [`SegmentSet`] tiles an inclusive [`AgeRange`] with contiguous
//! [`Segment`]s. Every edit operation keeps the tiling intact: degenerate
//! requests are clamped or ignored rather than rejected.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SegmentError;

pub type Age = u32;

/// Dense age -> value mapping produced by [`expand`]
pub type PerYear = BTreeMap<Age, f64>;

/// Inclusive range of ages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub from: Age,
    pub to: Age,
}

impl AgeRange {
    pub fn new(from: Age, to: Age) -> Result<Self, SegmentError> {
        if from > to {
            return Err(SegmentError::InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// Unchecked constructor for compile-time constants
    pub(crate) const fn new_const(from: Age, to: Age) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, age: Age) -> bool {
        self.from <= age && age <= self.to
    }

    pub fn ages(&self) -> std::ops::RangeInclusive<Age> {
        self.from..=self.to
    }

    /// Number of ages covered
    pub fn span(&self) -> u32 {
        self.to.saturating_sub(self.from).saturating_add(1)
    }
}

/// A run of consecutive ages sharing one value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Age,
    pub to: Age,
    pub value: f64,
}

impl Segment {
    pub fn new(from: Age, to: Age, value: f64) -> Self {
        Self { from, to, value }
    }

    pub fn contains(&self, age: Age) -> bool {
        self.from <= age && age <= self.to
    }

    /// Number of ages covered (`to - from + 1`)
    pub fn span(&self) -> u32 {
        self.to.saturating_sub(self.from).saturating_add(1)
    }
}

/// Map every age in `range` to the value of the segment containing it.
///
/// Ages no segment covers map to 0, so a range wider than the segments'
/// own coverage is tolerated.
pub fn expand(segments: &[Segment], range: AgeRange) -> PerYear {
    range
        .ages()
        .map(|age| {
            let value = segments
                .iter()
                .find(|segment| segment.contains(age))
                .map_or(0.0, |segment| segment.value);
            (age, value)
        })
        .collect()
}

/// Merge runs of equal values in `per_year` into the minimal segment list.
///
/// Ages missing from the mapping count as 0.
pub fn compress(per_year: &PerYear, range: AgeRange) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();

    for age in range.ages() {
        let value = per_year.get(&age).copied().unwrap_or(0.0);
        match segments.last_mut() {
            Some(last) if last.value == value => last.to = age,
            _ => segments.push(Segment::new(age, age, value)),
        }
    }

    segments
}

/// Ordered segments tiling an age range exactly once per age
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentSet {
    range: AgeRange,
    segments: Vec<Segment>,
}

impl SegmentSet {
    /// Validate that `segments` are contiguous and cover `range` exactly.
    pub fn new(range: AgeRange, segments: Vec<Segment>) -> Result<Self, SegmentError> {
        let (first, last) = match (segments.first(), segments.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(SegmentError::Empty),
        };

        if first.from != range.from {
            return Err(SegmentError::StartMismatch {
                expected: range.from,
                found: first.from,
            });
        }
        if last.to != range.to {
            return Err(SegmentError::EndMismatch {
                expected: range.to,
                found: last.to,
            });
        }

        for segment in &segments {
            if segment.from > segment.to {
                return Err(SegmentError::InvertedSegment {
                    from: segment.from,
                    to: segment.to,
                });
            }
        }

        for pair in segments.windows(2) {
            if pair[0].to.checked_add(1) != Some(pair[1].from) {
                return Err(SegmentError::Discontinuity {
                    previous_to: pair[0].to,
                    next_from: pair[1].from,
                });
            }
        }

        Ok(Self { range, segments })
    }

    /// A single segment spanning the whole range
    pub fn flat(range: AgeRange, value: f64) -> Self {
        Self {
            range,
            segments: vec![Segment::new(range.from, range.to, value)],
        }
    }

    /// Canonical set built from a per-year mapping; always valid.
    pub fn from_per_year(range: AgeRange, per_year: &PerYear) -> Self {
        Self {
            range,
            segments: compress(per_year, range),
        }
    }

    pub fn range(&self) -> AgeRange {
        self.range
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    pub fn value_at(&self, age: Age) -> Option<f64> {
        self.segments
            .iter()
            .find(|segment| segment.contains(age))
            .map(|segment| segment.value)
    }

    /// Expand over the set's own range
    pub fn expand(&self) -> PerYear {
        expand(&self.segments, self.range)
    }

    /// Split segment `idx` at its midpoint; the left half gets the smaller
    /// share of an odd span. Single-age segments are left alone.
    pub fn split(&mut self, idx: usize) -> bool {
        let Some(&target) = self.segments.get(idx) else {
            return false;
        };

        let span = target.span();
        if span < 2 {
            return false;
        }

        let mid = target.from + span / 2;
        self.segments[idx] = Segment::new(target.from, mid - 1, target.value);
        self.segments
            .insert(idx + 1, Segment::new(mid, target.to, target.value));

        tracing::trace!(idx, mid, "split segment");
        true
    }

    /// Move the divider between segments `idx` and `idx + 1` so the right
    /// segment starts at `new_boundary`, clamped to `[left.from + 1, right.to]`.
    pub fn move_divider(&mut self, idx: usize, new_boundary: Age) -> bool {
        let Some(&[left, right]) = self.pair(idx) else {
            return false;
        };
        let boundary = new_boundary.clamp(left.from + 1, right.to);

        if boundary == right.from {
            return false;
        }

        self.segments[idx].to = boundary - 1;
        self.segments[idx + 1].from = boundary;

        tracing::trace!(idx, requested = new_boundary, boundary, "moved divider");
        true
    }

    /// Merge segments `idx` and `idx + 1`, keeping the left value.
    pub fn remove_divider(&mut self, idx: usize) -> bool {
        if self.pair(idx).is_none() {
            return false;
        }

        let right = self.segments.remove(idx + 1);
        self.segments[idx].to = right.to;

        tracing::trace!(idx, "removed divider");
        true
    }

    /// Segments `idx` and `idx + 1`, if both exist
    fn pair(&self, idx: usize) -> Option<&[Segment; 2]> {
        let end = idx.checked_add(2)?;
        self.segments.get(idx..end)?.try_into().ok()
    }

    pub fn set_value(&mut self, idx: usize, value: f64) -> bool {
        match self.segments.get_mut(idx) {
            Some(segment) => {
                segment.value = value;
                tracing::trace!(idx, value, "set segment value");
                true
            }
            None => false,
        }
    }
}
