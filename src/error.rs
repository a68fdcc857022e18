//! Unified error type for luxmeter.
//!
//! We avoid `alloc` - all error variants are fieldless.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Sensor
    /// `begin()` failed. Fatal: the device halts until power-cycled.
    SensorInit,

    /// The sensor returned a non-positive lux value (saturated, or the
    /// gain does not suit the light level). Recoverable by changing gain.
    InvalidReading,

    // Formatting
    /// A formatted reading did not fit the display field.
    FieldOverflow,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::SensorInit => f.write_str("sensor init failed"),
            Error::InvalidReading => f.write_str("invalid reading"),
            Error::FieldOverflow => f.write_str("reading wider than display field"),
        }
    }
}
