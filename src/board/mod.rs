//! nRF52840 board adapters.
//!
//! Each adapter implements one collaborator trait of the library so the
//! light meter itself never sees a peripheral type.
//!
//! - **buttons**: GAIN / SAMPLE GPIO inputs
//! - **display**: SSD1306 128×64 OLED as a character grid
//! - **tsl2591**: TSL2591 light sensor over I²C

pub mod buttons;
pub mod display;
pub mod tsl2591;
