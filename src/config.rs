//! Application-wide constants and compile-time configuration.
//!
//! All timing parameters, display layout, and fixed texts live here so
//! they can be tuned in one place.

use crate::gain::GainLevel;
use crate::lux::OverflowPolicy;

// Timing

/// Minimum time between two committed level changes of a button (ms).
pub const DEBOUNCE_WINDOW_MS: u32 = 100;

/// Period of the polling loop (ms).
pub const TICK_PERIOD_MS: u64 = 10;

/// How long the splash text stays up after the sensor is found (ms).
pub const SPLASH_DURATION_MS: u64 = 3000;

// Gain

/// Gain level applied at every power-up. Never persisted.
pub const DEFAULT_GAIN: GainLevel = GainLevel::Med;

// Display layout
//
// The SSD1306 128×64 panel is driven as a character grid using a 6×10
// font: 21 columns × 6 rows.

/// Character columns available on the display.
pub const DISPLAY_COLUMNS: u8 = 21;

/// Character rows available on the display.
pub const DISPLAY_ROWS: u8 = 6;

/// Row holding the current gain label.
pub const GAIN_ROW: u8 = 0;

/// Row holding the latest reading.
pub const LUX_ROW: u8 = 1;

/// Maximum visible characters of a formatted reading.
pub const LUX_FIELD_WIDTH: usize = 9;

/// What to do when a formatted reading does not fit `LUX_FIELD_WIDTH`.
pub const LUX_OVERFLOW_POLICY: OverflowPolicy = OverflowPolicy::Truncate;

// Fixed texts

pub const SPLASH_TEXT: &str = "Light Meter";
pub const SENSOR_ERROR_TEXT: &str = "Sensor Err";
pub const READING_ERROR_TEXT: &str = "Err, gain";
pub const OVERFLOW_TEXT: &str = "Overflow";
pub const LUX_PREFIX: &str = "Lux: ";

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; the concrete `embassy_nrf::peripherals::*`
// pins are picked in `main.rs`.  Adjust for your custom PCB.
//
//   Button GAIN    → P0.11  (active-low, internal pull-up)
//   Button SAMPLE  → P0.12  (active-low, internal pull-up)
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27

/// 7-bit I²C address of the TSL2591.
pub const TSL2591_ADDR: u8 = 0x29;
