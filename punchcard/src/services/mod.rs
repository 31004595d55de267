//! Service layer: bucket planning, aggregation, and full builds.
//!
//! [`aggregation`] holds the algorithmic core (partitioning time into
//! buckets and summing observations). [`punchcards`] orchestrates a build and
//! produces the renderer-facing [`Punchcard`](crate::api::Punchcard)s.

pub mod aggregation;
pub mod punchcards;


pub use aggregation::{aggregate, Bucket, BucketLayout, NumericGrid};
pub use punchcards::{color_grid, PunchcardSet};
