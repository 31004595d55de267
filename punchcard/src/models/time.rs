use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::observation::Dataset;
use crate::error::{PunchcardError, PunchcardResult};

/// Milliseconds in one day, used to express spans in fractional days.
pub const MILLISECONDS_IN_DAY: f64 = 86_400_000.0;

/// Width of one punchcard cell.
///
/// Variants are declared from finest to coarsest, so the derived ordering is
/// the coarseness order: `Hour < Day < Week < Month < Year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Timeframe {
    pub const ALL: [Timeframe; 5] = [
        Timeframe::Hour,
        Timeframe::Day,
        Timeframe::Week,
        Timeframe::Month,
        Timeframe::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Hour => "hour",
            Timeframe::Day => "day",
            Timeframe::Week => "week",
            Timeframe::Month => "month",
            Timeframe::Year => "year",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = PunchcardError;

    /// Accepts singular or plural names in any case ("day", "Days", "HOURS").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let singular = normalized.strip_suffix('s').unwrap_or(&normalized);
        match singular {
            "hour" => Ok(Timeframe::Hour),
            "day" => Ok(Timeframe::Day),
            "week" => Ok(Timeframe::Week),
            "month" => Ok(Timeframe::Month),
            "year" => Ok(Timeframe::Year),
            _ => Err(PunchcardError::ConfigurationError(format!(
                "Unsupported timeframe '{}'. Use hour, day, week, month, or year.",
                s
            ))),
        }
    }
}

/// Earliest and latest instants across every identity of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub earliest: NaiveDateTime,
    pub latest: NaiveDateTime,
}

impl Bounds {
    /// Derive bounds from the union of all observations.
    ///
    /// # Errors
    /// Returns [`PunchcardError::EmptyDataset`] when there is nothing to bound.
    pub fn from_dataset(dataset: &Dataset) -> PunchcardResult<Self> {
        let mut timestamps = dataset.observations().map(|o| o.timestamp);
        let first = timestamps.next().ok_or(PunchcardError::EmptyDataset)?;

        let (earliest, latest) = timestamps.fold((first, first), |(earliest, latest), ts| {
            (earliest.min(ts), latest.max(ts))
        });

        Ok(Self { earliest, latest })
    }

    /// Span between earliest and latest in fractional days.
    pub fn span_days(&self) -> f64 {
        (self.latest - self.earliest).num_milliseconds() as f64 / MILLISECONDS_IN_DAY
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.earliest <= instant && instant <= self.latest
    }
}
