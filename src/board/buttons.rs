//! GPIO button input.
//!
//! Two physical buttons (active-low with internal pull-up):
//!   - SAMPLE - take a reading
//!   - GAIN   - step to the next gain level
//!
//! Pins are only sampled here; debouncing happens in the library, once
//! per polling tick.

use embassy_nrf::gpio::{AnyPin, Input, Pull};
use luxmeter::ButtonLevels;

pub struct Buttons<'d> {
    sample: Input<'d>,
    gain: Input<'d>,
}

impl<'d> Buttons<'d> {
    pub fn new(sample: AnyPin, gain: AnyPin) -> Self {
        Self {
            sample: Input::new(sample, Pull::Up),
            gain: Input::new(gain, Pull::Up),
        }
    }

    /// Raw levels right now (`true` = released).
    pub fn levels(&self) -> ButtonLevels {
        ButtonLevels {
            sample: self.sample.is_high(),
            gain: self.gain.is_high(),
        }
    }
}
