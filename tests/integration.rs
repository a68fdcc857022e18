//! Integration tests for the light meter loop, driven tick by tick
//! through in-memory sensor and display fakes.

use luxmeter::config::TICK_PERIOD_MS;
use luxmeter::{
    ButtonLevels, CharDisplay, Error, GainLevel, IntegrationTime, LightMeter, LightSensor,
    LuxFormatter, OverflowPolicy, SensorGain,
};

const PRESSED: bool = false;
const RELEASED: bool = true;
const TICK: u32 = TICK_PERIOD_MS as u32;

struct FakeSensor {
    present: bool,
    gain: SensorGain,
    timing: IntegrationTime,
    /// Readings handed out in order; the last one repeats.
    readings: Vec<f64>,
    reads: usize,
}

impl FakeSensor {
    fn new(lux: f64) -> Self {
        Self::with_readings(&[lux])
    }

    fn with_readings(readings: &[f64]) -> Self {
        Self {
            present: true,
            gain: SensorGain::Low,
            timing: IntegrationTime::Ms100,
            readings: readings.to_vec(),
            reads: 0,
        }
    }
}

impl LightSensor for FakeSensor {
    fn begin(&mut self) -> bool {
        self.present
    }
    fn set_gain(&mut self, gain: SensorGain) {
        self.gain = gain;
    }
    fn set_timing(&mut self, time: IntegrationTime) {
        self.timing = time;
    }
    fn gain(&self) -> SensorGain {
        self.gain
    }
    fn lux(&mut self) -> f64 {
        let index = self.reads.min(self.readings.len() - 1);
        self.reads += 1;
        self.readings[index]
    }
}

/// 21×6 character grid.
struct Grid {
    cells: [[char; 21]; 6],
    col: usize,
    row: usize,
}

impl Grid {
    fn new() -> Self {
        Self {
            cells: [[' '; 21]; 6],
            col: 0,
            row: 0,
        }
    }

    fn row(&self, row: usize) -> String {
        self.cells[row].iter().collect::<String>().trim_end().to_owned()
    }
}

impl CharDisplay for Grid {
    fn clear(&mut self) {
        *self = Self::new();
    }
    fn set_cursor(&mut self, col: u8, row: u8) {
        self.col = col as usize;
        self.row = row as usize;
    }
    fn print(&mut self, text: &str) {
        for c in text.chars() {
            if self.col < 21 {
                self.cells[self.row][self.col] = c;
                self.col += 1;
            }
        }
    }
}

fn started(lux: f64) -> LightMeter<FakeSensor, Grid> {
    started_with(FakeSensor::new(lux))
}

fn started_with(sensor: FakeSensor) -> LightMeter<FakeSensor, Grid> {
    let mut meter = LightMeter::start(sensor, Grid::new(), 0).expect("sensor present");
    meter.show_home();
    meter
}

/// Hold `levels` from `from` (inclusive) to `to` (exclusive), one tick
/// every 10 ms. Returns how many samples and gain steps were acted upon.
fn hold(
    meter: &mut LightMeter<FakeSensor, Grid>,
    levels: ButtonLevels,
    from: u32,
    to: u32,
) -> (usize, usize) {
    let mut samples = 0;
    let mut gains = 0;
    let mut t = from;
    while t < to {
        let outcome = meter.tick(levels, t);
        samples += usize::from(outcome.sample.is_some());
        gains += usize::from(outcome.gain.is_some());
        t += TICK;
    }
    (samples, gains)
}

fn sample_button(level: bool) -> ButtonLevels {
    ButtonLevels {
        sample: level,
        gain: RELEASED,
    }
}

fn gain_button(level: bool) -> ButtonLevels {
    ButtonLevels {
        sample: RELEASED,
        gain: level,
    }
}

#[test]
fn startup_shows_splash_then_default_gain() {
    let meter = LightMeter::start(FakeSensor::new(1.0), Grid::new(), 0).expect("sensor present");
    assert_eq!(meter.display().row(0), "Light Meter");

    let mut meter = meter;
    meter.show_home();
    assert_eq!(meter.display().row(0), "Gain: x25");
    assert_eq!(meter.sensor().gain, SensorGain::Med);
    assert_eq!(meter.sensor().timing, IntegrationTime::Ms200);
}

#[test]
fn missing_sensor_is_fatal() {
    let mut sensor = FakeSensor::new(1.0);
    sensor.present = false;
    let result = LightMeter::start(sensor, Grid::new(), 0);
    assert_eq!(result.err(), Some(Error::SensorInit));
}

#[test]
fn missing_sensor_shows_error_screen() {
    struct Shared<'a>(&'a mut Grid);
    impl CharDisplay for Shared<'_> {
        fn clear(&mut self) {
            self.0.clear();
        }
        fn set_cursor(&mut self, col: u8, row: u8) {
            self.0.set_cursor(col, row);
        }
        fn print(&mut self, text: &str) {
            self.0.print(text);
        }
    }

    let mut grid = Grid::new();
    let mut sensor = FakeSensor::new(1.0);
    sensor.present = false;
    assert!(LightMeter::start(sensor, Shared(&mut grid), 0).is_err());
    assert_eq!(grid.row(0), "Sensor Err");
}

#[test]
fn gain_button_cycles_through_every_level() {
    let mut meter = started(1.0);
    let expected = [
        (GainLevel::High, SensorGain::High, IntegrationTime::Ms400, "Gain: x428"),
        (GainLevel::Max, SensorGain::Max, IntegrationTime::Ms600, "Gain: x9876"),
        (GainLevel::Low, SensorGain::Low, IntegrationTime::Ms100, "Gain: x1"),
        (GainLevel::Med, SensorGain::Med, IntegrationTime::Ms200, "Gain: x25"),
    ];

    let mut t = 1000;
    for (level, gain, timing, label) in expected {
        // Press and hold 200 ms, release and wait 300 ms.
        let (_, steps) = hold(&mut meter, gain_button(PRESSED), t, t + 200);
        assert_eq!(steps, 1);
        assert_eq!(hold(&mut meter, gain_button(RELEASED), t + 200, t + 500), (0, 0));

        assert_eq!(meter.gain_level(), level);
        assert_eq!(meter.sensor().gain, gain);
        assert_eq!(meter.sensor().timing, timing);
        assert_eq!(meter.display().row(0), label);
        assert!(meter.sensor_in_sync());
        t += 500;
    }
}

#[test]
fn second_press_within_window_is_ignored() {
    let mut meter = started(42.0);

    // First press, bounce, a second press 40 ms later, release,
    // then a third press 150 ms after the first.
    assert_eq!(hold(&mut meter, sample_button(PRESSED), 1000, 1020), (1, 0));
    assert_eq!(hold(&mut meter, sample_button(RELEASED), 1020, 1040), (0, 0));
    assert_eq!(hold(&mut meter, sample_button(PRESSED), 1040, 1060), (0, 0));
    assert_eq!(hold(&mut meter, sample_button(RELEASED), 1060, 1150), (0, 0));
    assert_eq!(meter.sensor().reads, 1);

    // The release is committed at 1110, so the third press registers
    // once it has been held past the next window.
    assert_eq!(hold(&mut meter, sample_button(PRESSED), 1150, 1400), (1, 0));
    assert_eq!(meter.sensor().reads, 2);
    assert_eq!(meter.display().row(1), "Lux: 42");
}

#[test]
fn held_button_samples_once() {
    let mut meter = started(42.0);
    assert_eq!(hold(&mut meter, sample_button(PRESSED), 1000, 5000), (1, 0));
}

#[test]
fn readings_follow_gain_precision() {
    let mut meter = started(127.45699);

    hold(&mut meter, sample_button(PRESSED), 1000, 1200);
    hold(&mut meter, sample_button(RELEASED), 1200, 1400);
    assert_eq!(meter.display().row(1), "Lux: 127");

    // Med -> High
    hold(&mut meter, gain_button(PRESSED), 1400, 1600);
    hold(&mut meter, gain_button(RELEASED), 1600, 1800);
    assert_eq!(meter.display().row(1), "");

    hold(&mut meter, sample_button(PRESSED), 1800, 2000);
    hold(&mut meter, sample_button(RELEASED), 2000, 2200);
    assert_eq!(meter.display().row(1), "Lux: 127.45");

    // High -> Max
    hold(&mut meter, gain_button(PRESSED), 2200, 2400);
    hold(&mut meter, gain_button(RELEASED), 2400, 2600);
    hold(&mut meter, sample_button(PRESSED), 2600, 2800);
    assert_eq!(meter.display().row(1), "Lux: 127.4569");
}

#[test]
fn saturated_reading_shows_error_and_loop_continues() {
    let mut meter = started(-1.0);
    hold(&mut meter, sample_button(PRESSED), 1000, 1200);
    hold(&mut meter, sample_button(RELEASED), 1200, 1400);
    assert_eq!(meter.display().row(1), "Err, gain");

    // Still responsive: gain change clears the error.
    hold(&mut meter, gain_button(PRESSED), 1400, 1600);
    assert_eq!(meter.display().row(1), "");
    assert_eq!(meter.display().row(0), "Gain: x428");
}

#[test]
fn shorter_reading_erases_longer_one() {
    let mut meter = started_with(FakeSensor::with_readings(&[88_000.0, 7.0]));
    hold(&mut meter, sample_button(PRESSED), 1000, 1200);
    hold(&mut meter, sample_button(RELEASED), 1200, 1400);
    assert_eq!(meter.display().row(1), "Lux: 88000");

    hold(&mut meter, sample_button(PRESSED), 1400, 1600);
    assert_eq!(meter.display().row(1), "Lux: 7");

    let (sensor, _display) = meter.into_parts();
    assert_eq!(sensor.reads, 2);
}

#[test]
fn reject_policy_shows_overflow() {
    let mut meter = started(88_000.1234).with_formatter(LuxFormatter::new(OverflowPolicy::Reject));
    meter.change_gain(); // High
    meter.change_gain(); // Max
    let report = meter.sample();
    assert_eq!(report.error, Some(Error::FieldOverflow));
    assert_eq!(meter.display().row(1), "Lux: Overflow");
}
