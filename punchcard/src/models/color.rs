//! RGB color endpoints and linear mixing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PunchcardError, PunchcardResult};

/// Color used for the smallest aggregated value.
pub const DEFAULT_MIN_COLOR: &str = "#EEEEEE";
/// Color used for the largest aggregated value.
pub const DEFAULT_MAX_COLOR: &str = "#000000";

/// An RGB color with each channel stored in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RgbColor {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl RgbColor {
    /// Parse `#RRGGBB` or `RRGGBB`.
    ///
    /// # Errors
    /// Returns [`PunchcardError::MalformedColor`] unless the string holds exactly
    /// six hexadecimal digits after the optional `#`.
    pub fn from_hex(input: &str) -> PunchcardResult<Self> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        if digits.len() != 6 {
            return Err(PunchcardError::malformed_color(
                input,
                format!("expected 6 hex digits, found {}", digits.len()),
            ));
        }

        let mut channels = [0u8; 3];
        hex::decode_to_slice(digits, &mut channels)
            .map_err(|e| PunchcardError::malformed_color(input, e.to_string()))?;

        Ok(Self::from_bytes(channels))
    }

    pub fn from_bytes([red, green, blue]: [u8; 3]) -> Self {
        Self {
            red: f64::from(red) / 255.0,
            green: f64::from(green) / 255.0,
            blue: f64::from(blue) / 255.0,
        }
    }

    /// Channels rounded to the nearest integer in `[0, 255]`.
    pub fn to_bytes(&self) -> [u8; 3] {
        [
            channel_to_byte(self.red),
            channel_to_byte(self.green),
            channel_to_byte(self.blue),
        ]
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{}", hex::encode(self.to_bytes()))
    }

    /// Linear interpolation towards `other`.
    ///
    /// `ratio` 0 yields `self`, 1 yields `other`. Ratios outside `[0, 1]` are
    /// clamped and NaN is treated as 0.
    pub fn mix(&self, other: &RgbColor, ratio: f64) -> RgbColor {
        let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
        let lerp = |base: f64, target: f64| base * (1.0 - ratio) + target * ratio;
        RgbColor {
            red: lerp(self.red, other.red),
            green: lerp(self.green, other.green),
            blue: lerp(self.blue, other.blue),
        }
    }

    /// [`mix`](Self::mix) rendered straight to `#rrggbb`.
    pub fn mix_hex(&self, other: &RgbColor, ratio: f64) -> String {
        self.mix(other, ratio).to_hex()
    }
}

fn channel_to_byte(channel: f64) -> u8 {
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}

impl FromStr for RgbColor {
    type Err = PunchcardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RgbColor::from_hex(s)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Maps aggregated values onto the `min`..`max` color ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub min: RgbColor,
    pub max: RgbColor,
}

impl ColorScale {
    pub fn new(min: RgbColor, max: RgbColor) -> Self {
        Self { min, max }
    }

    /// Color for `value` given the largest value of the build. A zero maximum
    /// maps everything to the minimum color.
    pub fn color_for(&self, value: f64, max_value: f64) -> String {
        let ratio = if max_value > 0.0 { value / max_value } else { 0.0 };
        self.min.mix_hex(&self.max, ratio)
    }
}
