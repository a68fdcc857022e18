//! Lux reading formatter.
//!
//! The number of digits shown depends on the gain level: low gain is
//! used in bright light where the last digits are noise, high gain in
//! dim light where fractions matter.
//!
//! | Level | Rule                                   | 123.456  |
//! |-------|----------------------------------------|----------|
//! | Low   | round half away from zero to tens      | `120`    |
//! | Med   | round half away from zero to ones      | `123`    |
//! | High  | integer part, 2 truncated fraction dgt | `123.45` |
//! | Max   | integer part, 4 truncated fraction dgt | `123.4560` |
//!
//! Low/Med round while High/Max truncate. Keep it that way: readings
//! must match what earlier units displayed.

use core::fmt::Write;

use heapless::String;
use num_traits::Float;

use crate::config::{LUX_FIELD_WIDTH, OVERFLOW_TEXT, READING_ERROR_TEXT};
use crate::error::Error;
use crate::gain::{GainLevel, Precision};

/// A formatted reading, at most [`LUX_FIELD_WIDTH`] characters.
pub type FormattedLux = String<LUX_FIELD_WIDTH>;

/// Room for any `i64` plus a 4-digit fraction.
const SCRATCH_LEN: usize = 32;

/// One value returned by the sensor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LuxReading {
    pub raw: f64,
}

impl LuxReading {
    pub const fn new(raw: f64) -> Self {
        Self { raw }
    }

    /// Readings of zero or below (and NaN) mean the sensor saturated or
    /// the gain does not suit the light level.
    pub fn is_valid(&self) -> bool {
        self.raw > 0.0
    }
}

/// Behaviour when a formatted reading is wider than the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OverflowPolicy {
    /// Keep the leading characters that fit.
    Truncate,
    /// Show `OVERFLOW_TEXT` instead of a partial number.
    Reject,
}

/// Turns readings into display text.
#[derive(Clone, Copy, Debug)]
pub struct LuxFormatter {
    policy: OverflowPolicy,
}

impl LuxFormatter {
    pub const fn new(policy: OverflowPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Format `reading` for display at `level`.
    ///
    /// Never fails: errors are rendered as their display text
    /// (`"Err, gain"` for an invalid reading).
    pub fn format(&self, reading: LuxReading, level: GainLevel) -> FormattedLux {
        match self.try_format(reading, level) {
            Ok(text) => text,
            Err(Error::FieldOverflow) => fixed_text(OVERFLOW_TEXT),
            Err(_) => fixed_text(READING_ERROR_TEXT),
        }
    }

    /// Like [`LuxFormatter::format`] but reports why no number is shown.
    pub fn try_format(&self, reading: LuxReading, level: GainLevel) -> Result<FormattedLux, Error> {
        if !reading.is_valid() {
            return Err(Error::InvalidReading);
        }

        let mut scratch: String<SCRATCH_LEN> = String::new();
        render(reading.raw, level.profile().precision, &mut scratch)
            .map_err(|_| Error::FieldOverflow)?;

        if scratch.len() > LUX_FIELD_WIDTH && self.policy == OverflowPolicy::Reject {
            return Err(Error::FieldOverflow);
        }
        Ok(fixed_text(&scratch))
    }
}

impl Default for LuxFormatter {
    fn default() -> Self {
        Self::new(crate::config::LUX_OVERFLOW_POLICY)
    }
}

fn render<const N: usize>(raw: f64, precision: Precision, out: &mut String<N>) -> core::fmt::Result {
    match precision {
        Precision::Tens => write!(out, "{}", (Float::round(raw / 10.0) * 10.0) as i64),
        Precision::Ones => write!(out, "{}", Float::round(raw) as i64),
        Precision::Hundredths => {
            write!(out, "{}.{:02}", raw as i64, (raw * 100.0) as i64 % 100)
        }
        Precision::TenThousandths => {
            write!(out, "{}.{:04}", raw as i64, (raw * 10_000.0) as i64 % 10_000)
        }
    }
}

/// Copy `text` into a field, dropping whatever does not fit.
fn fixed_text(text: &str) -> FormattedLux {
    let mut out = FormattedLux::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
