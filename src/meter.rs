//! The light meter: one polling tick ties buttons, gain, sensor and
//! display together.
//!
//! [`LightMeter`] is the single owner of the sensor and the display.
//! Drive it from one execution context only; do not share the handles.
//!
//! ## Latency
//!
//! A sample request calls [`LightSensor::lux`], which blocks for the
//! configured integration time: 100 ms at Low gain up to 600 ms at Max.
//! Buttons are not sampled during that time, so a press shorter than
//! the remaining integration time right after a sample can be missed.

use core::fmt;

use crate::error::Error;
use crate::gain::{GainController, GainLevel, GainProfile};
use crate::lux::{FormattedLux, LuxFormatter, LuxReading};
use crate::sensor::LightSensor;
use crate::ui::debounce::{Debouncer, Edge};
use crate::ui::screen::{self, CharDisplay, ReadingRow};
use crate::ui::{ButtonEvent, ButtonLevels};

/// Result of one sample request.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleReport {
    /// Value returned by the sensor.
    pub raw: f64,
    /// Gain level the reading was taken and formatted at.
    pub level: GainLevel,
    /// Text shown in the reading field.
    pub text: FormattedLux,
    /// Why no number is shown, if so.
    pub error: Option<Error>,
}

/// Diagnostic form: raw value to 6 decimals, then the formatted text.
impl fmt::Display for SampleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Lux: {:.6}", self.raw)?;
        write!(f, "Formatted Lux: {}", self.text)
    }
}

/// A completed gain step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GainChange {
    pub from: GainLevel,
    pub to: GainLevel,
}

/// What a tick acted upon.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickOutcome {
    pub sample: Option<SampleReport>,
    pub gain: Option<GainChange>,
}

impl TickOutcome {
    pub fn is_idle(&self) -> bool {
        self.sample.is_none() && self.gain.is_none()
    }
}

/// Loop orchestrator.
pub struct LightMeter<S, D> {
    sensor: S,
    display: D,
    gain: GainController,
    formatter: LuxFormatter,
    sample_button: Debouncer,
    gain_button: Debouncer,
    reading_row: ReadingRow,
}

impl<S, D> LightMeter<S, D>
where
    S: LightSensor,
    D: CharDisplay,
{
    /// Bring up the sensor and show the splash screen.
    ///
    /// On success the sensor is configured for the default gain level.
    /// If the sensor does not answer, the error screen is drawn and
    /// [`Error::SensorInit`] returned; the caller must halt.
    pub fn start(mut sensor: S, mut display: D, now_ms: u32) -> Result<Self, Error> {
        if !sensor.begin() {
            #[cfg(feature = "defmt")]
            defmt::error!("Light sensor not found");
            screen::draw_sensor_error(&mut display);
            return Err(Error::SensorInit);
        }

        #[cfg(feature = "defmt")]
        defmt::info!("Found TSL2591 sensor");
        screen::draw_splash(&mut display);

        let mut meter = Self {
            sensor,
            display,
            gain: GainController::default(),
            formatter: LuxFormatter::default(),
            sample_button: Debouncer::new(now_ms),
            gain_button: Debouncer::new(now_ms),
            reading_row: ReadingRow::new(),
        };
        let profile = meter.gain.profile();
        meter.configure_sensor(profile);
        Ok(meter)
    }

    /// Replace the reading formatter (overflow policy).
    pub fn with_formatter(mut self, formatter: LuxFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Leave the splash screen: clear and show the gain label.
    pub fn show_home(&mut self) {
        self.display.clear();
        self.reading_row.forget();
        screen::draw_gain(&mut self.display, self.gain.profile());
    }

    /// Run one polling step with the raw button levels sampled at `now_ms`.
    ///
    /// A sample request is served before a gain change in the same tick.
    pub fn tick(&mut self, levels: ButtonLevels, now_ms: u32) -> TickOutcome {
        let sample_requested =
            self.sample_button.update(levels.sample, now_ms) == Some(Edge::Falling);
        let gain_requested = self.gain_button.update(levels.gain, now_ms) == Some(Edge::Falling);

        let mut outcome = TickOutcome::default();

        if sample_requested {
            log_press(ButtonEvent::Sample);
            outcome.sample = Some(self.sample());
        }

        if gain_requested {
            log_press(ButtonEvent::Gain);
            outcome.gain = Some(self.change_gain());
        }

        outcome
    }

    /// Read the sensor and show the result. Blocks for the integration time.
    pub fn sample(&mut self) -> SampleReport {
        let reading = LuxReading::new(self.sensor.lux());
        let level = self.gain.level();

        let (text, error) = match self.formatter.try_format(reading, level) {
            Ok(text) => (text, None),
            Err(e) => (self.formatter.format(reading, level), Some(e)),
        };

        match error {
            Some(Error::InvalidReading) => self.reading_row.draw(&mut self.display, None),
            _ => self.reading_row.draw(&mut self.display, Some(text.as_str())),
        }

        let report = SampleReport {
            raw: reading.raw,
            level,
            text,
            error,
        };

        #[cfg(feature = "defmt")]
        defmt::info!("{}", defmt::Display2Format(&report));

        report
    }

    /// Step to the next gain level, reconfigure the sensor and relabel.
    ///
    /// The display is cleared first, so the last reading disappears
    /// together with the old label.
    pub fn change_gain(&mut self) -> GainChange {
        self.display.clear();
        self.reading_row.forget();

        let from = self.gain.level();
        let profile = self.gain.advance();
        self.configure_sensor(profile);
        screen::draw_gain(&mut self.display, profile);

        let change = GainChange {
            from,
            to: profile.level,
        };

        #[cfg(feature = "defmt")]
        defmt::info!("Gain: {} -> {}", change.from, change.to);

        change
    }

    fn configure_sensor(&mut self, profile: &GainProfile) {
        self.sensor.set_gain(profile.gain);
        self.sensor.set_timing(profile.integration);

        if !self.sensor_in_sync() {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "Sensor reports gain {}, expected {}",
                self.sensor.gain(),
                profile.gain
            );
        }
    }

    /// `true` if the sensor's gain matches the current level.
    pub fn sensor_in_sync(&self) -> bool {
        self.sensor.gain() == self.gain.profile().gain
    }

    pub fn gain_level(&self) -> GainLevel {
        self.gain.level()
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Give back the hardware handles.
    pub fn into_parts(self) -> (S, D) {
        (self.sensor, self.display)
    }
}

#[allow(unused_variables)]
fn log_press(event: ButtonEvent) {
    #[cfg(feature = "defmt")]
    defmt::info!("Button: {}", event);
}
