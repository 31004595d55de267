//! Domain types shared by every stage of a punchcard build.

pub mod color;
pub mod observation;
pub mod time;

pub use color::{ColorScale, RgbColor, DEFAULT_MAX_COLOR, DEFAULT_MIN_COLOR};
pub use observation::{Dataset, Observation};
pub use time::{Bounds, Timeframe, MILLISECONDS_IN_DAY};
