//! Loading raw records into a [`Dataset`](crate::models::Dataset).
//!
//! # Parsers
//!
//! - [`records`]: record shapes, the [`DataConverter`] seam, and timestamp parsing
//! - [`json_parser`]: JSON arrays of records
//!
//! # Example
//!
//! ```
//! use punchcard::parsing::parse_date_data_json_str;
//!
//! let dataset = parse_date_data_json_str(r#"[{"id": "ann", "date": "2020-05-01"}]"#)
//!     .expect("valid records");
//! assert_eq!(dataset.observation_count(), 1);
//! ```

pub mod json_parser;
pub mod records;

#[cfg(test)]
mod json_parser_tests;

pub use json_parser::{
    parse_date_and_value_data_json_str, parse_date_data_json_str, parse_records_json,
    parse_records_json_str,
};
pub use records::{
    convert_date_and_value_data, convert_date_data, parse_timestamp, DataConverter,
    DateAndValueRecord, DateRecord,
};
