use chrono::NaiveDateTime;

use crate::models::{Timeframe, MILLISECONDS_IN_DAY};

/// Preferred number of columns in a punchcard.
pub const PREFERRED_COLUMNS: f64 = 30.0;
/// Longest span (in days) shown with one cell per day: a week per column.
pub const MAX_DAYS_FOR_DAY: f64 = 7.0 * PREFERRED_COLUMNS;
/// Longest span shown with one cell per week: roughly a month per column.
pub const MAX_DAYS_FOR_WEEK: f64 = 30.0 * PREFERRED_COLUMNS;
/// Longest span shown with one cell per month: roughly a year per column.
pub const MAX_DAYS_FOR_MONTH: f64 = 365.0 * PREFERRED_COLUMNS;

/// Pick the coarsest-needed timeframe that keeps the column count near
/// [`PREFERRED_COLUMNS`].
///
/// Boundaries resolve to the finer timeframe. [`Timeframe::Hour`] is never
/// chosen here; callers ask for it explicitly.
pub fn select_timeframe(earliest: NaiveDateTime, latest: NaiveDateTime) -> Timeframe {
    let span_days = (latest - earliest).num_milliseconds() as f64 / MILLISECONDS_IN_DAY;
    timeframe_for_span(span_days)
}

/// Same as [`select_timeframe`] for a span already expressed in days.
pub fn timeframe_for_span(span_days: f64) -> Timeframe {
    if span_days <= MAX_DAYS_FOR_DAY {
        Timeframe::Day
    } else if span_days <= MAX_DAYS_FOR_WEEK {
        Timeframe::Week
    } else if span_days <= MAX_DAYS_FOR_MONTH {
        Timeframe::Month
    } else {
        Timeframe::Year
    }
}
