//! Converters from raw record shapes into a [`Dataset`].
//!
//! The grid engine never looks at raw records. Any function or closure of the
//! shape `Fn(T) -> anyhow::Result<Dataset>` can act as a converter; the two
//! provided here cover the common "date per record" and "date and value per
//! record" layouts.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::{Dataset, Observation};

/// Turns caller-specific raw data into the canonical dataset.
pub trait DataConverter<T> {
    fn convert(&self, raw: T) -> Result<Dataset>;
}

impl<T, F> DataConverter<T> for F
where
    F: Fn(T) -> Result<Dataset>,
{
    fn convert(&self, raw: T) -> Result<Dataset> {
        self(raw)
    }
}

/// A record carrying an identity, a date, and a magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateAndValueRecord {
    #[serde(rename = "authorId", alias = "author_id")]
    pub author_id: String,
    pub date: String,
    pub value: f64,
}

/// A presence-only record: each one counts as a single occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRecord {
    #[serde(alias = "authorId", alias = "author_id")]
    pub id: String,
    #[serde(alias = "commit_date")]
    pub date: String,
}

/// Group date/value records by author.
pub fn convert_date_and_value_data(records: &[DateAndValueRecord]) -> Result<Dataset> {
    let mut dataset = Dataset::new();
    for (idx, record) in records.iter().enumerate() {
        let timestamp = parse_timestamp(&record.date).with_context(|| {
            format!("Record {} for '{}' has an invalid date", idx, record.author_id)
        })?;
        dataset.push(record.author_id.as_str(), Observation::new(timestamp, record.value));
    }
    Ok(dataset)
}

/// Group presence-only records by id, each with value 1.
pub fn convert_date_data(records: &[DateRecord]) -> Result<Dataset> {
    let mut dataset = Dataset::new();
    for (idx, record) in records.iter().enumerate() {
        let timestamp = parse_timestamp(&record.date)
            .with_context(|| format!("Record {} for '{}' has an invalid date", idx, record.id))?;
        dataset.push(record.id.as_str(), Observation::presence(timestamp));
    }
    Ok(dataset)
}

/// Parse a timestamp as a wall-clock instant.
///
/// Accepted forms:
/// - RFC 3339 (`2020-05-01T09:30:00+02:00`); the offset is dropped and the
///   local reading kept
/// - `2020-05-01T09:30:00` and `2020-05-01 09:30:00`, optional fraction
/// - `2020-05-01` (midnight)
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.naive_local());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(dt);
        }
    }

    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .with_context(|| format!("Unrecognized timestamp '{}'", input))?;
    Ok(date.and_time(NaiveTime::MIN))
}
