//! # Punchcard
//!
//! Calendar heat-map ("punchcard") grids from timestamped observations.
//!
//! Observations are grouped by identity (an author, a user, a sensor). For
//! each identity the crate builds a dense grid of time buckets where every
//! column is one calendar cycle and every row one bucket within that cycle,
//! then colors each cell by its share of the largest bucket total across all
//! identities.
//!
//! ## Features
//!
//! - **Timeframes**: hour, day, week, month and year buckets
//! - **Automatic selection**: the coarsest timeframe that keeps the grid readable
//! - **Shared color scale**: one maximum across every identity
//! - **Loading**: JSON records and pluggable converters
//!
//! ## Architecture
//!
//! - [`models`]: observations, datasets, timeframes, colors
//! - [`time`]: calendar arithmetic, [`TimeframePolicy`], timeframe selection
//! - [`services`]: bucket planning, aggregation, [`PunchcardSet`] builds
//! - [`api`]: renderer-facing grid types
//! - [`parsing`]: raw records to [`Dataset`]
//! - [`config`]: [`BuildOptions`] from code, TOML or the environment
//!
//! ## Example
//!
//! ```
//! use punchcard::{BuildOptions, Dataset, Observation, PunchcardSet, Timeframe};
//! use chrono::NaiveDate;
//!
//! let day = |d| NaiveDate::from_ymd_opt(2020, 5, d).unwrap().and_hms_opt(12, 0, 0).unwrap();
//!
//! let mut dataset = Dataset::new();
//! dataset.push("ann", Observation::new(day(1), 2.0));
//! dataset.push("ann", Observation::new(day(4), 4.0));
//!
//! let set = PunchcardSet::build(dataset, &BuildOptions::default()).unwrap();
//! assert_eq!(set.timeframe(), Timeframe::Day);
//!
//! let card = set.card("ann").unwrap();
//! assert_eq!(card.row_headers.len(), 7);
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod parsing;
pub mod services;
pub mod time;

pub use api::{Cell, GridColumn, Punchcard, TRANSPARENT};
pub use config::{BuildOptions, ResolvedOptions};
pub use error::{PunchcardError, PunchcardResult};
pub use models::{Bounds, ColorScale, Dataset, Observation, RgbColor, Timeframe};
pub use parsing::DataConverter;
pub use services::{aggregate, BucketLayout, NumericGrid, PunchcardSet};
pub use time::{select_timeframe, TimeframePolicy};
