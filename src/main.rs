//! luxmeter firmware - hand-held light meter on nRF52840.
//!
//! Hardware:
//!   - TSL2591 light sensor and SSD1306 OLED sharing one I²C bus (TWIM0)
//!   - SAMPLE and GAIN push-buttons to ground, internal pull-ups
//!
//! Runtime: a single Embassy task polls the buttons every
//! `TICK_PERIOD_MS` and hands them to the [`LightMeter`]. Sensor reads
//! block that task for the integration time; nothing else runs.

#![no_std]
#![no_main]

mod board;

use core::cell::RefCell;

use defmt::{error, info};
use embassy_executor::Spawner;
use embassy_nrf::gpio::Pin;
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::{Delay, Duration, Instant, Timer};
use embedded_hal_bus::i2c::RefCellDevice;
use luxmeter::config::{SPLASH_DURATION_MS, TICK_PERIOD_MS};
use luxmeter::LightMeter;
use {defmt_rtt as _, panic_probe as _};

use board::buttons::Buttons;
use board::tsl2591::Tsl2591;

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("luxmeter starting");

    let buttons = Buttons::new(p.P0_12.degrade(), p.P0_11.degrade());

    let mut i2c_config = twim::Config::default();
    i2c_config.frequency = twim::Frequency::K400;
    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, i2c_config);
    let bus = RefCell::new(i2c);

    let display = board::display::init(RefCellDevice::new(&bus));
    let sensor = Tsl2591::new(RefCellDevice::new(&bus), Delay);

    let mut meter = match LightMeter::start(sensor, display, now_ms()) {
        Ok(meter) => meter,
        Err(e) => {
            error!("Halting: {}", e);
            halt();
        }
    };

    Timer::after(Duration::from_millis(SPLASH_DURATION_MS)).await;
    meter.show_home();

    loop {
        meter.tick(buttons.levels(), now_ms());
        Timer::after(Duration::from_millis(TICK_PERIOD_MS)).await;
    }
}

/// Free-running millisecond clock. Truncation to `u32` wraps after
/// ~49.7 days; the debouncer handles that.
fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

/// Stop for good. Only a reset or power cycle gets out of here.
fn halt() -> ! {
    loop {
        cortex_m::asm::wfi();
    }
}
