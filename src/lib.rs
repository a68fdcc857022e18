//! Host-testable library for the luxmeter firmware.
//!
//! Everything that does not touch hardware lives here: button
//! debouncing, the gain cycle, lux formatting and the polling loop that
//! ties them together. The embedded binary (`main.rs`, `--features
//! embedded`) only adds board adapters for the TSL2591 sensor, the
//! SSD1306 display and the GPIO buttons.
//!
//! Usage: `cargo test --lib --tests`
//!
//! ```text
//!  GPIO ──► Debouncer ──► LightMeter ──► LightSensor (TSL2591)
//!                            │   ▲
//!                            │   └── GainController / LuxFormatter
//!                            ▼
//!                       CharDisplay (SSD1306)
//! ```

#![cfg_attr(not(test), no_std)]

// ═══════════════════════════════════════════════════════════════════════════
// Configuration & errors
// ═══════════════════════════════════════════════════════════════════════════

pub mod config;
pub mod error;

// ═══════════════════════════════════════════════════════════════════════════
// Control core
// ═══════════════════════════════════════════════════════════════════════════

pub mod gain;
pub mod lux;
pub mod meter;
pub mod sensor;
pub mod ui;

pub use error::Error;
pub use gain::{GainController, GainLevel, GainProfile};
pub use lux::{FormattedLux, LuxFormatter, LuxReading, OverflowPolicy};
pub use meter::{GainChange, LightMeter, SampleReport, TickOutcome};
pub use sensor::{IntegrationTime, LightSensor, SensorGain};
pub use ui::debounce::{Debouncer, Edge};
pub use ui::screen::CharDisplay;
pub use ui::{ButtonEvent, ButtonLevels};
