//! User interface - character display + two physical buttons.
//!
//! ## Components
//!
//! - **Display**: any character grid implementing [`screen::CharDisplay`]
//! - **Buttons**: 2 tactile switches, active-low, debounced in software
//!   (SAMPLE, GAIN)

pub mod debounce;
pub mod screen;

/// Physical button events (after debouncing, falling edge only).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Take a reading and show it.
    Sample,
    /// Step to the next gain level.
    Gain,
}

/// Raw pin levels of both buttons for one tick.
///
/// `true` = high = released.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonLevels {
    pub sample: bool,
    pub gain: bool,
}

impl ButtonLevels {
    pub const RELEASED: Self = Self {
        sample: debounce::RELEASED,
        gain: debounce::RELEASED,
    };
}

impl Default for ButtonLevels {
    fn default() -> Self {
        Self::RELEASED
    }
}
