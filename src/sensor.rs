//! Light-sensor collaborator contract.
//!
//! The orchestrator only ever talks to the photodiode through
//! [`LightSensor`]; the register protocol lives in the board adapter.
//!
//! Gain and integration-time codes are the TSL2591 CONFIG register
//! field values:
//! ```text
//! CONFIG[5:4] AGAIN   00 = 1x, 01 = 25x, 10 = 428x, 11 = 9876x
//! CONFIG[2:0] ATIME   000 = 100 ms ... 101 = 600 ms
//! ```

/// Analog gain setting of the sensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorGain {
    /// 1x
    Low,
    /// 25x
    Med,
    /// 428x
    High,
    /// 9876x
    Max,
}

impl SensorGain {
    /// CONFIG register AGAIN bits (already shifted into place).
    pub const fn code(self) -> u8 {
        match self {
            SensorGain::Low => 0x00,
            SensorGain::Med => 0x10,
            SensorGain::High => 0x20,
            SensorGain::Max => 0x30,
        }
    }

    /// Decode the AGAIN bits of a CONFIG register value.
    pub const fn from_code(config: u8) -> Self {
        match config & 0x30 {
            0x00 => SensorGain::Low,
            0x10 => SensorGain::Med,
            0x20 => SensorGain::High,
            _ => SensorGain::Max,
        }
    }

    /// Nominal amplification factor.
    pub const fn multiplier(self) -> u16 {
        match self {
            SensorGain::Low => 1,
            SensorGain::Med => 25,
            SensorGain::High => 428,
            SensorGain::Max => 9876,
        }
    }
}

/// ADC integration time of the sensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IntegrationTime {
    Ms100,
    Ms200,
    Ms300,
    Ms400,
    Ms500,
    Ms600,
}

impl IntegrationTime {
    /// CONFIG register ATIME bits.
    pub const fn code(self) -> u8 {
        match self {
            IntegrationTime::Ms100 => 0x00,
            IntegrationTime::Ms200 => 0x01,
            IntegrationTime::Ms300 => 0x02,
            IntegrationTime::Ms400 => 0x03,
            IntegrationTime::Ms500 => 0x04,
            IntegrationTime::Ms600 => 0x05,
        }
    }

    /// Decode the ATIME bits of a CONFIG register value.
    ///
    /// Reserved codes (6, 7) read back as the longest time.
    pub const fn from_code(config: u8) -> Self {
        match config & 0x07 {
            0x00 => IntegrationTime::Ms100,
            0x01 => IntegrationTime::Ms200,
            0x02 => IntegrationTime::Ms300,
            0x03 => IntegrationTime::Ms400,
            0x04 => IntegrationTime::Ms500,
            _ => IntegrationTime::Ms600,
        }
    }

    pub const fn millis(self) -> u32 {
        (self.code() as u32 + 1) * 100
    }
}

/// Photodiode light sensor as seen by the light meter.
///
/// All calls are synchronous. [`LightSensor::lux`] blocks for up to the
/// configured integration time (100-600 ms); buttons are not polled
/// meanwhile.
pub trait LightSensor {
    /// Probe and power up the sensor. `false` means the sensor is
    /// unusable and the device must halt.
    fn begin(&mut self) -> bool;

    /// Configure analog gain. Fire-and-forget.
    fn set_gain(&mut self, gain: SensorGain);

    /// Configure integration time. Fire-and-forget.
    fn set_timing(&mut self, time: IntegrationTime);

    /// Gain last written with [`LightSensor::set_gain`].
    fn gain(&self) -> SensorGain;

    /// Take one blocking reading in lux. A negative value signals a
    /// saturated or otherwise invalid reading under the current gain.
    fn lux(&mut self) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gain_codes_decode_back() {
        for gain in [
            SensorGain::Low,
            SensorGain::Med,
            SensorGain::High,
            SensorGain::Max,
        ] {
            assert_eq!(SensorGain::from_code(gain.code()), gain);
        }
    }

    #[test]
    fn gain_decode_ignores_timing_bits() {
        assert_eq!(SensorGain::from_code(0x25), SensorGain::High);
    }

    #[test]
    fn integration_time_millis() {
        assert_eq!(IntegrationTime::Ms100.millis(), 100);
        assert_eq!(IntegrationTime::Ms300.millis(), 300);
        assert_eq!(IntegrationTime::Ms600.millis(), 600);
    }

    #[test]
    fn integration_time_reserved_codes() {
        assert_eq!(IntegrationTime::from_code(0x06), IntegrationTime::Ms600);
        assert_eq!(IntegrationTime::from_code(0x07), IntegrationTime::Ms600);
        assert_eq!(IntegrationTime::from_code(0x13), IntegrationTime::Ms400);
    }
}
