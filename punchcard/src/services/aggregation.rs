//! Bucket planning and aggregation.
//!
//! A build walks the calendar once to produce a [`BucketLayout`]: the ordered
//! list of half-open buckets between the dataset bounds, each pinned to a
//! `(column, row)` coordinate. Every identity is then aggregated against that
//! same layout, so all punchcards of a build line up column for column.

use chrono::NaiveDateTime;
use log::warn;

use crate::error::PunchcardResult;
use crate::models::{Bounds, Observation, Timeframe};
use crate::time::TimeframePolicy;

/// One cell's time interval `[start, end)` and its grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    pub column: usize,
    pub row: usize,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Bucket {
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// The bucket partition shared by every identity of one build.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketLayout {
    policy: TimeframePolicy,
    buffer_rows: usize,
    column_labels: Vec<String>,
    buckets: Vec<Bucket>,
}

impl BucketLayout {
    /// Walk from the bucket holding `bounds.earliest` to the bucket holding
    /// `bounds.latest`.
    ///
    /// Column 0 starts at the earliest instant's own row (the buffer offset),
    /// later columns start at row 0. A column stops early once the cursor has
    /// passed `bounds.latest`, leaving its remaining rows unpopulated.
    pub fn plan(bounds: &Bounds, policy: TimeframePolicy) -> PunchcardResult<Self> {
        let rows = policy.rows_per_column();
        let buffer_rows = policy.row_index(bounds.earliest);

        let mut cursor = policy.normalize(bounds.earliest);
        let mut row = buffer_rows;
        let mut column = 0;

        let mut column_labels = Vec::new();
        let mut buckets = Vec::new();

        while cursor <= bounds.latest {
            column_labels.push(policy.column_header_label(cursor));

            while row < rows && cursor <= bounds.latest {
                let end = policy.increment(cursor)?;
                buckets.push(Bucket {
                    column,
                    row,
                    start: cursor,
                    end,
                });
                // The next bucket starts exactly where this one ends.
                cursor = end;
                row += 1;
            }

            row = 0;
            column += 1;
        }

        Ok(Self {
            policy,
            buffer_rows,
            column_labels,
            buckets,
        })
    }

    pub fn policy(&self) -> TimeframePolicy {
        self.policy
    }

    pub fn timeframe(&self) -> Timeframe {
        self.policy.timeframe()
    }

    pub fn rows(&self) -> usize {
        self.policy.rows_per_column()
    }

    /// Row at which column 0 begins.
    pub fn buffer_rows(&self) -> usize {
        self.buffer_rows
    }

    pub fn column_count(&self) -> usize {
        self.column_labels.len()
    }

    /// Raw label of every column, before thinning.
    pub fn column_labels(&self) -> &[String] {
        &self.column_labels
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Start of the first bucket.
    pub fn start(&self) -> Option<NaiveDateTime> {
        self.buckets.first().map(|b| b.start)
    }

    /// End (exclusive) of the last bucket.
    pub fn end(&self) -> Option<NaiveDateTime> {
        self.buckets.last().map(|b| b.end)
    }

    /// The bucket whose interval holds `instant`, if any.
    pub fn locate(&self, instant: NaiveDateTime) -> Option<&Bucket> {
        let index = self.buckets.partition_point(|b| b.end <= instant);
        self.buckets.get(index).filter(|b| b.contains(instant))
    }
}

/// Dense `columns × rows` bucket totals for one identity.
///
/// `None` marks a position no bucket reached; `Some(0.0)` is a bucket that
/// collected nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericGrid {
    columns: Vec<Vec<Option<f64>>>,
    max_value: f64,
    total: f64,
}

impl NumericGrid {
    pub fn columns(&self) -> &[Vec<Option<f64>>] {
        &self.columns
    }

    pub fn get(&self, column: usize, row: usize) -> Option<f64> {
        self.columns.get(column)?.get(row).copied().flatten()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Largest bucket total in this grid.
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// Sum of every bucket total.
    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn populated_count(&self) -> usize {
        self.columns.iter().flatten().filter(|v| v.is_some()).count()
    }
}

/// Sum `observations` into the buckets of `layout`.
///
/// Observations are sorted once and swept alongside the buckets. Anything
/// outside the layout's span is left out and reported with a warning.
pub fn aggregate(observations: &[Observation], layout: &BucketLayout) -> NumericGrid {
    let mut columns = vec![vec![None; layout.rows()]; layout.column_count()];

    let mut sorted: Vec<&Observation> = observations.iter().collect();
    sorted.sort_by_key(|o| o.timestamp);
    let mut pending = sorted.into_iter().peekable();

    let mut outside = 0usize;
    if let Some(start) = layout.start() {
        while pending.next_if(|o| o.timestamp < start).is_some() {
            outside += 1;
        }
    }

    let mut max_value = 0.0_f64;
    let mut total = 0.0_f64;

    for bucket in layout.buckets() {
        let mut current = 0.0;
        while let Some(observation) = pending.next_if(|o| o.timestamp < bucket.end) {
            current += observation.value;
        }
        columns[bucket.column][bucket.row] = Some(current);
        max_value = max_value.max(current);
        total += current;
    }

    outside += pending.count();
    if outside > 0 {
        warn!(
            "{} observation(s) fall outside the {} layout and were not counted",
            outside,
            layout.timeframe()
        );
    }

    NumericGrid {
        columns,
        max_value,
        total,
    }
}
