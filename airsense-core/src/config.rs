//! Manager configuration
//!
//! Everything has a working default, so `ManagerConfig::default()` drives a
//! stock Raspberry Pi build (DSM501A on BCM 23/24, DHT22) without edits.
//! There is no file loader; deserialize with whatever format the host uses.
//!
//! ```rust
//! use airsense_core::config::ManagerConfig;
//!
//! let config = ManagerConfig::default()
//!     .with_seed(7)
//!     .with_calibration(3, 500);
//!
//! assert_eq!(config.calibration_samples, 3);
//! assert_eq!(config.hardware.pm25_pin, 23);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::sensors::{
        CALIBRATION_SAMPLE_COUNT, CALIBRATION_SPACING_MS, CLIMATE_READ_ATTEMPTS,
        CLIMATE_RETRY_DELAY_MS, DUTY_POLL_INTERVAL_MS, DUTY_SAMPLE_WINDOW_MS, PM10_PIN, PM25_PIN,
    },
    reading::BaseValues,
};

/// Sensor wiring and timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HardwareConfig {
    /// Dust-sensor PM2.5 output pin
    pub pm25_pin: u8,
    /// Dust-sensor PM10 output pin
    pub pm10_pin: u8,
    /// Duty-cycle sampling window per channel (ms)
    pub sample_window_ms: u32,
    /// Pause between pin polls (ms)
    pub poll_interval_ms: u32,
    /// Climate sensor attempts before falling back
    pub climate_attempts: usize,
    /// Pause between climate attempts (ms)
    pub climate_retry_delay_ms: u32,
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            pm25_pin: PM25_PIN,
            pm10_pin: PM10_PIN,
            sample_window_ms: DUTY_SAMPLE_WINDOW_MS,
            poll_interval_ms: DUTY_POLL_INTERVAL_MS,
            climate_attempts: CLIMATE_READ_ATTEMPTS,
            climate_retry_delay_ms: CLIMATE_RETRY_DELAY_MS,
        }
    }
}

impl HardwareConfig {
    /// Set the dust-sensor pins
    pub fn with_pins(mut self, pm25_pin: u8, pm10_pin: u8) -> Self {
        self.pm25_pin = pm25_pin;
        self.pm10_pin = pm10_pin;
        self
    }

    /// Set the duty sampling window and poll interval
    pub fn with_sampling(mut self, window_ms: u32, poll_interval_ms: u32) -> Self {
        self.sample_window_ms = window_ms;
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Set the climate retry policy
    pub fn with_climate_retry(mut self, attempts: usize, delay_ms: u32) -> Self {
        self.climate_attempts = attempts;
        self.climate_retry_delay_ms = delay_ms;
        self
    }

    /// Pin polls per sampling window, at least one
    pub fn polls_per_window(&self) -> u32 {
        if self.poll_interval_ms == 0 {
            return self.sample_window_ms.max(1);
        }
        (self.sample_window_ms / self.poll_interval_ms).max(1)
    }
}

/// Configuration for [`SensorManager`](crate::manager::SensorManager)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ManagerConfig {
    /// Wiring and timing for hardware mode
    pub hardware: HardwareConfig,
    /// Typical values for empty history, climate fallback and simulation
    pub baseline: BaseValues,
    /// Raw samples per calibration run
    pub calibration_samples: usize,
    /// Pause between calibration samples (ms)
    pub calibration_spacing_ms: u32,
    /// Seed for every random generator; `None` uses OS entropy
    pub seed: Option<u64>,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            hardware: HardwareConfig::default(),
            baseline: BaseValues::default(),
            calibration_samples: CALIBRATION_SAMPLE_COUNT,
            calibration_spacing_ms: CALIBRATION_SPACING_MS,
            seed: None,
        }
    }
}

impl ManagerConfig {
    /// Replace the hardware section
    pub fn with_hardware(mut self, hardware: HardwareConfig) -> Self {
        self.hardware = hardware;
        self
    }

    /// Replace the baselines
    pub fn with_baseline(mut self, baseline: BaseValues) -> Self {
        self.baseline = baseline;
        self
    }

    /// Set calibration sample count and spacing
    pub fn with_calibration(mut self, samples: usize, spacing_ms: u32) -> Self {
        self.calibration_samples = samples;
        self.calibration_spacing_ms = spacing_ms;
        self
    }

    /// Seed random generators for a reproducible run
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_wiring() {
        let config = ManagerConfig::default();
        assert_eq!(config.hardware.pm25_pin, 23);
        assert_eq!(config.hardware.pm10_pin, 24);
        assert_eq!(config.hardware.sample_window_ms, 500);
        assert_eq!(config.hardware.climate_attempts, 3);
        assert_eq!(config.calibration_samples, 5);
        assert_eq!(config.calibration_spacing_ms, 1000);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn polls_per_window() {
        assert_eq!(HardwareConfig::default().polls_per_window(), 50);
        assert_eq!(HardwareConfig::default().with_sampling(5, 10).polls_per_window(), 1);
        assert_eq!(HardwareConfig::default().with_sampling(20, 0).polls_per_window(), 20);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_fills_defaults() {
        let config: ManagerConfig =
            serde_json::from_str(r#"{"seed": 42, "hardware": {"pm25_pin": 5}}"#).unwrap();

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.hardware.pm25_pin, 5);
        assert_eq!(config.hardware.pm10_pin, 24);
        assert_eq!(config.baseline, BaseValues::default());
    }
}
