//! Build options and their sources.
//!
//! Options can be assembled in code, read from a TOML file, or taken from the
//! environment. Colors stay as strings until [`BuildOptions::resolve`], which
//! validates them before any grid work starts.
//!
//! ```toml
//! timeframe = "week"
//! min_color = "#EEEEEE"
//! max_color = "#990000"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use crate::error::{PunchcardError, PunchcardResult};
use crate::models::{ColorScale, RgbColor, Timeframe, DEFAULT_MAX_COLOR, DEFAULT_MIN_COLOR};

/// Environment variable overriding the timeframe.
pub const ENV_TIMEFRAME: &str = "PUNCHCARD_TIMEFRAME";
/// Environment variable for the minimum color.
pub const ENV_MIN_COLOR: &str = "PUNCHCARD_MIN_COLOR";
/// Environment variable for the maximum color.
pub const ENV_MAX_COLOR: &str = "PUNCHCARD_MAX_COLOR";

/// Options for building a set of punchcards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildOptions {
    /// Fixed timeframe; chosen from the data span when `None`.
    pub timeframe: Option<Timeframe>,
    /// Color for the smallest value, `#EEEEEE` when `None`.
    pub min_color: Option<String>,
    /// Color for the largest value, `#000000` when `None`.
    pub max_color: Option<String>,
}

/// Validated options ready for a build.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedOptions {
    pub timeframe: Option<Timeframe>,
    pub colors: ColorScale,
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeframe(mut self, timeframe: Timeframe) -> Self {
        self.timeframe = Some(timeframe);
        self
    }

    pub fn with_min_color(mut self, color: impl Into<String>) -> Self {
        self.min_color = Some(color.into());
        self
    }

    pub fn with_max_color(mut self, color: impl Into<String>) -> Self {
        self.max_color = Some(color.into());
        self
    }

    /// Parse options from TOML text.
    pub fn from_toml_str(content: &str) -> PunchcardResult<Self> {
        toml::from_str(content).map_err(|e| {
            PunchcardError::ConfigurationError(format!("Failed to parse options: {}", e))
        })
    }

    /// Load options from a TOML file.
    ///
    /// # Errors
    /// Returns [`PunchcardError::ConfigurationError`] if the file cannot be
    /// read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> PunchcardResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PunchcardError::ConfigurationError(format!(
                "Failed to read options file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Read options from environment variables.
    ///
    /// # Environment Variables
    /// - `PUNCHCARD_TIMEFRAME` (optional): `hour`, `day`, `week`, `month` or `year`
    ///   (plural and any case accepted)
    /// - `PUNCHCARD_MIN_COLOR` (optional): `#RRGGBB`
    /// - `PUNCHCARD_MAX_COLOR` (optional): `#RRGGBB`
    ///
    /// Empty values count as unset.
    pub fn from_env() -> PunchcardResult<Self> {
        let timeframe = non_empty_var(ENV_TIMEFRAME)
            .map(|value| value.parse::<Timeframe>())
            .transpose()?;

        Ok(Self {
            timeframe,
            min_color: non_empty_var(ENV_MIN_COLOR),
            max_color: non_empty_var(ENV_MAX_COLOR),
        })
    }

    /// Fill unset fields from `fallback`.
    pub fn or(self, fallback: BuildOptions) -> Self {
        Self {
            timeframe: self.timeframe.or(fallback.timeframe),
            min_color: self.min_color.or(fallback.min_color),
            max_color: self.max_color.or(fallback.max_color),
        }
    }

    /// Apply defaults and parse the color endpoints.
    ///
    /// # Errors
    /// Returns [`PunchcardError::MalformedColor`] for a color that is not six
    /// hex digits.
    pub fn resolve(&self) -> PunchcardResult<ResolvedOptions> {
        let min = RgbColor::from_hex(self.min_color.as_deref().unwrap_or(DEFAULT_MIN_COLOR))?;
        let max = RgbColor::from_hex(self.max_color.as_deref().unwrap_or(DEFAULT_MAX_COLOR))?;
        Ok(ResolvedOptions {
            timeframe: self.timeframe,
            colors: ColorScale::new(min, max),
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
