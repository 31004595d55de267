//! Calendar arithmetic, per-timeframe policies, and timeframe selection.

pub mod calendar;
pub mod policy;
pub mod selector;


pub use policy::TimeframePolicy;
pub use selector::{select_timeframe, timeframe_for_span, PREFERRED_COLUMNS};
