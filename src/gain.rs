//! Gain state machine.
//!
//! The four gain levels form a fixed cycle `Low → Med → High → Max → Low`.
//! Everything that depends on the level (sensor gain, integration time,
//! display label, reading precision) comes from one table, [`PROFILES`],
//! so the sensor configuration and the label can never drift apart.

use crate::sensor::{IntegrationTime, SensorGain};

/// User-selectable gain level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GainLevel {
    /// Bright light.
    Low,
    Med,
    High,
    /// Dim light.
    Max,
}

impl GainLevel {
    /// All levels in cycle order.
    pub const ALL: [GainLevel; 4] = [
        GainLevel::Low,
        GainLevel::Med,
        GainLevel::High,
        GainLevel::Max,
    ];

    const fn index(self) -> usize {
        match self {
            GainLevel::Low => 0,
            GainLevel::Med => 1,
            GainLevel::High => 2,
            GainLevel::Max => 3,
        }
    }

    /// The level following `self` in the cycle.
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Table entry for this level.
    pub fn profile(self) -> &'static GainProfile {
        &PROFILES[self.index()]
    }

    /// Level whose profile uses `gain`.
    pub fn from_sensor_gain(gain: SensorGain) -> Self {
        match gain {
            SensorGain::Low => GainLevel::Low,
            SensorGain::Med => GainLevel::Med,
            SensorGain::High => GainLevel::High,
            SensorGain::Max => GainLevel::Max,
        }
    }
}

/// How a reading is rounded for display at a given gain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Precision {
    /// Round half away from zero to a multiple of 10.
    Tens,
    /// Round half away from zero to an integer.
    Ones,
    /// Truncate to 2 fractional digits.
    Hundredths,
    /// Truncate to 4 fractional digits.
    TenThousandths,
}

/// Everything tied to one gain level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GainProfile {
    pub level: GainLevel,
    pub gain: SensorGain,
    pub integration: IntegrationTime,
    pub label: &'static str,
    pub precision: Precision,
}

/// The gain table, indexed by [`GainLevel`] in cycle order.
///
/// Higher gain pairs with longer integration.
pub static PROFILES: [GainProfile; 4] = [
    GainProfile {
        level: GainLevel::Low,
        gain: SensorGain::Low,
        integration: IntegrationTime::Ms100,
        label: "Gain: x1",
        precision: Precision::Tens,
    },
    GainProfile {
        level: GainLevel::Med,
        gain: SensorGain::Med,
        integration: IntegrationTime::Ms200,
        label: "Gain: x25",
        precision: Precision::Ones,
    },
    GainProfile {
        level: GainLevel::High,
        gain: SensorGain::High,
        integration: IntegrationTime::Ms400,
        label: "Gain: x428",
        precision: Precision::Hundredths,
    },
    GainProfile {
        level: GainLevel::Max,
        gain: SensorGain::Max,
        integration: IntegrationTime::Ms600,
        label: "Gain: x9876",
        precision: Precision::TenThousandths,
    },
];

/// Holds the current gain level and steps it through the cycle.
#[derive(Debug)]
pub struct GainController {
    level: GainLevel,
}

impl GainController {
    /// Start at `level`.
    pub const fn new(level: GainLevel) -> Self {
        Self { level }
    }

    pub fn level(&self) -> GainLevel {
        self.level
    }

    pub fn profile(&self) -> &'static GainProfile {
        self.level.profile()
    }

    /// Move to the next level and return its profile.
    ///
    /// The caller must push `gain`/`integration` to the sensor and
    /// `label` to the display before doing anything else.
    pub fn advance(&mut self) -> &'static GainProfile {
        self.level = self.level.next();
        self.level.profile()
    }
}

impl Default for GainController {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_GAIN)
    }
}
