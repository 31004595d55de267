//! Per-timeframe bucketing rules.
//!
//! A [`TimeframePolicy`] answers every question the aggregator asks about a
//! granularity: how many rows a column holds, where a bucket starts, how wide
//! it is, which cyclic row an instant sits on, and how columns and rows are
//! labelled.

use chrono::{Datelike, Duration, NaiveDateTime, Timelike};

use super::calendar;
use crate::error::{PunchcardError, PunchcardResult};
use crate::models::Timeframe;

const HOUR_ROW_HEADERS: [&str; 24] = [
    "12am", "", "", "3am", "", "", "6am", "", "", "9am", "", "", "12pm", "", "", "3pm", "", "",
    "6pm", "", "", "9pm", "", "",
];
const DAY_ROW_HEADERS: [&str; 7] = ["Sun", "", "Tue", "", "Thu", "", "Sat"];
const WEEK_ROW_HEADERS: [&str; 4] = ["Wk 1", "", "Wk 3", ""];
const MONTH_ROW_HEADERS: [&str; 12] = [
    "Jan", "", "Mar", "", "May", "", "Jul", "", "Sep", "", "Nov", "",
];
const YEAR_ROW_HEADERS: [&str; 10] = ["'0", "", "'2", "", "'4", "", "'6", "", "'8", ""];

/// Stateless bucketing rules for one [`Timeframe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeframePolicy {
    timeframe: Timeframe,
}

impl TimeframePolicy {
    pub const fn new(timeframe: Timeframe) -> Self {
        Self { timeframe }
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// Rows in one column: the unit's cardinality within the next coarser
    /// unit, except weeks (4 per month) and years (a decade).
    pub fn rows_per_column(&self) -> usize {
        match self.timeframe {
            Timeframe::Hour => 24,
            Timeframe::Day => 7,
            Timeframe::Week => 4,
            Timeframe::Month => 12,
            Timeframe::Year => 10,
        }
    }

    /// Round `instant` down to the start of its bucket.
    pub fn normalize(&self, instant: NaiveDateTime) -> NaiveDateTime {
        match self.timeframe {
            Timeframe::Hour => calendar::start_of_hour(instant),
            Timeframe::Day => calendar::start_of_day(instant),
            Timeframe::Week => calendar::start_of_week(instant),
            Timeframe::Month => calendar::start_of_month(instant),
            Timeframe::Year => calendar::start_of_year(instant),
        }
    }

    /// Advance by exactly one bucket width.
    ///
    /// # Errors
    /// [`PunchcardError::DateOutOfRange`] when the result is not representable.
    pub fn increment(&self, instant: NaiveDateTime) -> PunchcardResult<NaiveDateTime> {
        let next = match self.timeframe {
            Timeframe::Hour => instant.checked_add_signed(Duration::hours(1)),
            Timeframe::Day => instant.checked_add_signed(Duration::days(1)),
            Timeframe::Week => instant.checked_add_signed(Duration::days(7)),
            Timeframe::Month => calendar::add_months(instant, 1),
            Timeframe::Year => calendar::add_months(instant, 12),
        };
        next.ok_or(PunchcardError::DateOutOfRange { instant })
    }

    /// Half-open interval `[start, end)` of the bucket containing `instant`.
    pub fn bucket(&self, instant: NaiveDateTime) -> PunchcardResult<(NaiveDateTime, NaiveDateTime)> {
        let start = self.normalize(instant);
        Ok((start, self.increment(start)?))
    }

    /// Position of `instant` on the cyclic row axis, always `< rows_per_column()`.
    pub fn row_index(&self, instant: NaiveDateTime) -> usize {
        let index = match self.timeframe {
            Timeframe::Hour => instant.hour(),
            Timeframe::Day => calendar::weekday_index(instant.date()),
            Timeframe::Week => {
                let sunday = calendar::start_of_week(instant).date();
                let first_sunday = calendar::first_sunday_of_month(sunday);
                // A fifth Sunday wraps to the top of the next column.
                ((sunday.day() - first_sunday.day()) / 7) % 4
            }
            Timeframe::Month => instant.month0(),
            Timeframe::Year => instant.year().rem_euclid(10) as u32,
        };
        index as usize
    }

    /// Raw (unthinned) label for the column starting at `instant`.
    pub fn column_header_label(&self, instant: NaiveDateTime) -> String {
        let format = match self.timeframe {
            Timeframe::Hour => "%b %-d",
            Timeframe::Day | Timeframe::Week => "%b",
            Timeframe::Month | Timeframe::Year => "%Y",
        };
        instant.format(format).to_string()
    }

    /// Whether column `column` should display its label.
    ///
    /// Days show a label whenever the month changes; hours, weeks and months
    /// show every third column; years every tenth.
    pub fn shows_column_header(&self, column: usize, label: &str, previous: Option<&str>) -> bool {
        match self.timeframe {
            Timeframe::Day => previous != Some(label),
            Timeframe::Hour | Timeframe::Week | Timeframe::Month => column % 3 == 0,
            Timeframe::Year => column % 10 == 0,
        }
    }

    /// Row labels, one per row; blank entries are intentionally unlabeled.
    pub fn row_headers(&self) -> &'static [&'static str] {
        match self.timeframe {
            Timeframe::Hour => &HOUR_ROW_HEADERS,
            Timeframe::Day => &DAY_ROW_HEADERS,
            Timeframe::Week => &WEEK_ROW_HEADERS,
            Timeframe::Month => &MONTH_ROW_HEADERS,
            Timeframe::Year => &YEAR_ROW_HEADERS,
        }
    }
}

impl From<Timeframe> for TimeframePolicy {
    fn from(timeframe: Timeframe) -> Self {
        TimeframePolicy::new(timeframe)
    }
}
