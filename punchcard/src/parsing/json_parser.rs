use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

use super::records::{
    convert_date_and_value_data, convert_date_data, DateAndValueRecord, DateRecord,
};
use crate::models::Dataset;

/// Parse a JSON array of records.
///
/// Errors name the JSON path of the offending field, e.g. `[3].date`.
pub fn parse_records_json_str<R: DeserializeOwned>(json_str: &str) -> Result<Vec<R>> {
    let deserializer = &mut serde_json::Deserializer::from_str(json_str);
    serde_path_to_error::deserialize(deserializer).map_err(|e| {
        anyhow::anyhow!(
            "JSON deserialization error at '{}': {}",
            e.path(),
            e.inner()
        )
    })
}

/// Read and parse a JSON array of records from a file.
pub fn parse_records_json<R: DeserializeOwned>(json_path: &Path) -> Result<Vec<R>> {
    let json_content = std::fs::read_to_string(json_path)
        .with_context(|| format!("Failed to read JSON file: {}", json_path.display()))?;

    parse_records_json_str(&json_content)
        .with_context(|| format!("Failed to parse records from {}", json_path.display()))
}

/// Parse `[{"id": ..., "date": ...}, ...]` straight into a dataset.
pub fn parse_date_data_json_str(json_str: &str) -> Result<Dataset> {
    let records: Vec<DateRecord> = parse_records_json_str(json_str)?;
    convert_date_data(&records)
}

/// Parse `[{"authorId": ..., "date": ..., "value": ...}, ...]` into a dataset.
pub fn parse_date_and_value_data_json_str(json_str: &str) -> Result<Dataset> {
    let records: Vec<DateAndValueRecord> = parse_records_json_str(json_str)?;
    convert_date_and_value_data(&records)
}
