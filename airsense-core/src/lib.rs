//! Sensor fusion and calibration engine for low-cost air-quality monitors
//!
//! Turns raw dust-sensor duty cycles and temperature/humidity readings into
//! calibrated, compensated, smoothed PM2.5/PM10 values with an AQI and a
//! confidence score. Without hardware it falls back to a synthetic generator
//! with the same output shape.
//!
//! Key constraints:
//! - The numeric core (compensation, smoothing, scoring, AQI, calibration
//!   arithmetic) is `no_std` and allocation-free
//! - `read()` always returns a reading with finite fields
//! - Hardware failures degrade, they never abort
//!
//! ```no_run
//! use airsense_core::{ManagerConfig, SensorManager};
//!
//! let manager: SensorManager = SensorManager::simulated(ManagerConfig::default());
//!
//! let reading = manager.read();
//! println!(
//!     "PM2.5 {:.1} µg/m³, PM10 {:.1} µg/m³, AQI {}",
//!     reading.pm25,
//!     reading.pm10,
//!     reading.aqi()
//! );
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod aqi;
pub mod buffer;
pub mod calibration;
pub mod compensation;
pub mod config;
pub mod constants;
pub mod errors;
pub mod metrics;
pub mod quality;
pub mod reading;
pub mod retry;
pub mod smoothing;
pub mod stats;
pub mod summary;
pub mod time;
pub mod traits;

#[cfg(feature = "std")]
pub mod hardware;
#[cfg(feature = "std")]
pub mod manager;
#[cfg(feature = "std")]
pub mod monitor;
#[cfg(feature = "std")]
pub mod simulation;

// Public API
pub use aqi::{calculate_aqi, AqiCalculator, AqiCategory};
pub use calibration::{CalibrationFactors, CalibrationOutcome, Calibrator};
pub use compensation::EnvironmentalCompensator;
pub use config::{HardwareConfig, ManagerConfig};
pub use errors::{SensorError, SensorResult};
pub use quality::QualityScorer;
pub use reading::{BaseValues, Climate, Quantity, RawPm, Reading};
pub use smoothing::SmoothingWindow;
pub use traits::{Acquisition, ClimateSensor, DustSampler, ReadingSource, SourceMode};

#[cfg(feature = "std")]
pub use hardware::{HardwareSource, StdDelay};
#[cfg(feature = "std")]
pub use manager::{SensorManager, SensorStatus};
#[cfg(feature = "std")]
pub use monitor::{AirQualitySnapshot, Monitor};
#[cfg(feature = "std")]
pub use simulation::{SimulatedSource, SimulationGenerator};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
