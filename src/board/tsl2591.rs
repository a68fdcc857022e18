//! TSL2591 light sensor over I²C.
//!
//! Only what the light meter needs: probe, power on, gain/timing, and a
//! blocking lux read.
//!
//! Datasheet: https://cdn-shop.adafruit.com/datasheets/TSL25911_Datasheet_EN_v1.pdf

use defmt::{info, warn};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use luxmeter::config::TSL2591_ADDR;
use luxmeter::{IntegrationTime, LightSensor, SensorGain};

const COMMAND_BIT: u8 = 0xA0;

#[allow(unused)]
mod register {
    pub const ENABLE: u8 = 0x00;
    pub const CONFIG: u8 = 0x01;
    pub const ID: u8 = 0x12;
    pub const STATUS: u8 = 0x13;
    pub const C0DATAL: u8 = 0x14;
}

const DEVICE_ID: u8 = 0x50;

const ENABLE_POWERON: u8 = 0x01;
const ENABLE_AEN: u8 = 0x02;

/// Extra wait on top of the integration time before reading data.
const READ_MARGIN_MS: u32 = 20;

/// Counts-per-lux coefficients.
const LUX_DF: f64 = 408.0;
const LUX_COEFB: f64 = 1.64;
const LUX_COEFC: f64 = 0.59;
const LUX_COEFD: f64 = 0.86;

/// Returned by [`LightSensor::lux`] when no valid reading exists.
const INVALID_LUX: f64 = -1.0;

pub struct Tsl2591<I, D> {
    i2c: I,
    delay: D,
    gain: SensorGain,
    timing: IntegrationTime,
}

impl<I, D> Tsl2591<I, D>
where
    I: I2c,
    D: DelayNs,
{
    pub fn new(i2c: I, delay: D) -> Self {
        Self {
            i2c,
            delay,
            gain: SensorGain::Low,
            timing: IntegrationTime::Ms100,
        }
    }

    fn read8(&mut self, reg: u8) -> Result<u8, I::Error> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(TSL2591_ADDR, &[COMMAND_BIT | reg], &mut buf)?;
        Ok(buf[0])
    }

    fn write8(&mut self, reg: u8, value: u8) -> Result<(), I::Error> {
        self.i2c.write(TSL2591_ADDR, &[COMMAND_BIT | reg, value])
    }

    fn write_config(&mut self) {
        let config = self.gain.code() | self.timing.code();
        if self.write8(register::CONFIG, config).is_err() {
            warn!("TSL2591: CONFIG write failed");
        }
    }

    /// Full-spectrum and infrared channel counts.
    fn read_channels(&mut self) -> Result<(u16, u16), I::Error> {
        let mut buf = [0u8; 4];
        self.i2c
            .write_read(TSL2591_ADDR, &[COMMAND_BIT | register::C0DATAL], &mut buf)?;
        let ch0 = u16::from_le_bytes([buf[0], buf[1]]);
        let ch1 = u16::from_le_bytes([buf[2], buf[3]]);
        Ok((ch0, ch1))
    }

    fn calculate_lux(&self, ch0: u16, ch1: u16) -> f64 {
        if ch0 == u16::MAX || ch1 == u16::MAX {
            // Saturated: the gain is too high for this light.
            return INVALID_LUX;
        }

        let ch0 = f64::from(ch0);
        let ch1 = f64::from(ch1);
        let cpl = f64::from(self.timing.millis()) * f64::from(self.gain.multiplier()) / LUX_DF;

        f64::max(ch0 - LUX_COEFB * ch1, LUX_COEFC * ch0 - LUX_COEFD * ch1) / cpl
    }
}

impl<I, D> LightSensor for Tsl2591<I, D>
where
    I: I2c,
    D: DelayNs,
{
    fn begin(&mut self) -> bool {
        match self.read8(register::ID) {
            Ok(DEVICE_ID) => {}
            Ok(id) => {
                warn!("TSL2591: unexpected device id {=u8:#x}", id);
                return false;
            }
            Err(_) => {
                warn!("TSL2591: no answer on I2C");
                return false;
            }
        }

        self.write_config();
        if self
            .write8(register::ENABLE, ENABLE_POWERON | ENABLE_AEN)
            .is_err()
        {
            return false;
        }
        info!("TSL2591: powered on");
        true
    }

    fn set_gain(&mut self, gain: SensorGain) {
        self.gain = gain;
        self.write_config();
    }

    fn set_timing(&mut self, time: IntegrationTime) {
        self.timing = time;
        self.write_config();
    }

    fn gain(&self) -> SensorGain {
        self.gain
    }

    fn lux(&mut self) -> f64 {
        // One full integration cycle under the current configuration.
        self.delay.delay_ms(self.timing.millis() + READ_MARGIN_MS);

        match self.read_channels() {
            Ok((ch0, ch1)) => self.calculate_lux(ch0, ch1),
            Err(_) => {
                warn!("TSL2591: channel read failed");
                INVALID_LUX
            }
        }
    }
}
