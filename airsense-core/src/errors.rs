//! Error Types for the Reading and Calibration Paths
//!
//! ## Design Philosophy
//!
//! The monitor is expected to keep producing readings no matter what the
//! hardware does, so most failures never reach the caller of `read()`. They are
//! logged and replaced by a best-effort value. The errors in this module are
//! the ones that *do* cross the public API:
//!
//! 1. **Small and Copy**: every variant carries plain numbers or a
//!    `&'static str`, so the type works without an allocator and can be
//!    stored in outcome structs.
//!
//! 2. **Actionable**: each variant says enough to decide what to do next
//!    (re-run calibration, fix a reference value, wait for more samples).
//!
//! ## Error Categories
//!
//! ### Hardware
//! - `HardwareUnavailable`: initialization failed, the manager runs simulated
//! - `PinReadFailed`: a dust-sensor pin could not be read
//! - `ClimateReadFailed`: the temperature/humidity sensor gave up after retries
//!
//! ### Calibration
//! - `CalibrationUnavailable`: requested while not in hardware mode
//! - `InvalidReference`: reference value is not a positive finite number
//! - `DegenerateMeasurement`: measured average is zero or not finite
//!
//! ### Data
//! - `InvalidValue`: NaN or infinity offered to the history
//! - `InsufficientData` / `LengthMismatch`: statistics over bad input
//!
//! ## Usage
//!
//! ```rust
//! use airsense_core::{SensorError, calibration::correction_factor};
//!
//! match correction_factor(100.0, 0.0) {
//!     Ok(factor) => println!("new factor {factor}"),
//!     Err(SensorError::DegenerateMeasurement { measured }) => {
//!         // Keep the old factor, the sensor read nothing
//!         let _ = measured;
//!     }
//!     Err(_) => {}
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for sensor operations
pub type SensorResult<T> = Result<T, SensorError>;

/// Errors surfaced by the reading and calibration engine
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SensorError {
    /// Hardware could not be initialized; the manager fell back to simulation
    #[error("Hardware unavailable: {reason}")]
    HardwareUnavailable {
        /// Short description of the init failure
        reason: &'static str,
    },

    /// A dust-sensor input pin returned an error
    #[error("Failed to read input pin {pin}")]
    PinReadFailed {
        /// Pin number as wired (BCM numbering on a Raspberry Pi)
        pin: u8,
    },

    /// Temperature/humidity sensor failed on every attempt
    #[error("Climate sensor read failed after {attempts} attempts")]
    ClimateReadFailed {
        /// Number of attempts made before giving up
        attempts: usize,
    },

    /// Calibration needs real hardware
    #[error("Calibration unavailable: not in hardware mode")]
    CalibrationUnavailable,

    /// Reference concentration cannot anchor a correction factor
    #[error("Invalid reference value {value}")]
    InvalidReference {
        /// The rejected reference concentration
        value: f64,
    },

    /// Measured average cannot be divided by
    #[error("Measured average {measured} cannot anchor a calibration factor")]
    DegenerateMeasurement {
        /// The rejected measured average
        measured: f64,
    },

    /// Value makes no physical sense (NaN, infinity)
    #[error("Invalid value: not a valid number")]
    InvalidValue,

    /// Not enough samples for the requested statistic
    #[error("Insufficient data: need {required}, have {available}")]
    InsufficientData {
        /// Minimum number of samples needed
        required: usize,
        /// Samples actually provided
        available: usize,
    },

    /// Paired series differ in length
    #[error("Series length mismatch: {left} vs {right}")]
    LengthMismatch {
        /// Length of the first series
        left: usize,
        /// Length of the second series
        right: usize,
    },

    /// Background worker thread could not be started
    #[error("Failed to spawn monitor thread")]
    SpawnFailed,
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::HardwareUnavailable { reason } =>
                defmt::write!(fmt, "Hardware unavailable: {}", reason),
            Self::PinReadFailed { pin } =>
                defmt::write!(fmt, "Pin {} read failed", pin),
            Self::ClimateReadFailed { attempts } =>
                defmt::write!(fmt, "Climate read failed after {} attempts", attempts),
            Self::CalibrationUnavailable =>
                defmt::write!(fmt, "Calibration unavailable"),
            Self::InvalidReference { value } =>
                defmt::write!(fmt, "Invalid reference {}", value),
            Self::DegenerateMeasurement { measured } =>
                defmt::write!(fmt, "Degenerate measurement {}", measured),
            Self::InvalidValue =>
                defmt::write!(fmt, "Invalid value"),
            Self::InsufficientData { required, available } =>
                defmt::write!(fmt, "Need {} samples, have {}", required, available),
            Self::LengthMismatch { left, right } =>
                defmt::write!(fmt, "Length mismatch {} vs {}", left, right),
            Self::SpawnFailed =>
                defmt::write!(fmt, "Monitor spawn failed"),
        }
    }
}
