//! Acquisition Seams
//!
//! The manager never branches on "is hardware present" per call. It owns one
//! [`ReadingSource`], picked at construction, and every `read()` goes through
//! it:
//!
//! ```text
//!                     ┌──────────────────┐
//!  SensorManager ───▶ │  ReadingSource   │
//!                     └────────┬─────────┘
//!                 ┌────────────┴────────────┐
//!                 ▼                         ▼
//!          HardwareSource            SimulatedSource
//!      (pins + ClimateSensor)      (SimulationGenerator)
//!                 │
//!                 ▼
//!            DustSampler  ◀── Calibrator
//! ```
//!
//! [`DustSampler`] is the narrow slice of a hardware source that calibration
//! needs: raw PM estimates and a way to wait between them. Only hardware
//! sources expose one, which is how calibration knows it is unavailable.

use crate::reading::{Climate, RawPm};
use crate::time::Timestamp;

/// Where readings come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SourceMode {
    /// Real dust and climate sensors
    Hardware,
    /// Synthetic generator
    Simulated,
}

impl SourceMode {
    /// True for [`SourceMode::Hardware`]
    pub fn is_hardware(&self) -> bool {
        matches!(self, SourceMode::Hardware)
    }
}

/// One round of raw data from a source
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Acquisition {
    /// Sampled from sensors. PM is uncalibrated and uncompensated.
    Measured {
        /// Raw PM estimates from the duty cycle
        pm: RawPm,
        /// Temperature and humidity, possibly a fallback estimate
        climate: Climate,
        /// False when `climate` is a baseline-plus-jitter substitute
        climate_measured: bool,
    },
    /// Produced by the generator, already shaped and clamped
    Synthetic {
        /// Synthetic PM values
        pm: RawPm,
        /// Synthetic temperature and humidity
        climate: Climate,
    },
}

/// Producer of raw readings for the manager
///
/// Implementations must always return something: failures inside a source
/// are logged and papered over, never propagated.
pub trait ReadingSource: Send {
    /// Which kind of source this is
    fn mode(&self) -> SourceMode;

    /// Take one round of raw data. Blocking for hardware sources.
    fn acquire(&mut self, now: Timestamp) -> Acquisition;

    /// Raw sampling access for calibration, if this source has sensors
    fn dust_sampler(&mut self) -> Option<&mut dyn DustSampler> {
        None
    }
}

/// Raw dust sampling used by calibration
pub trait DustSampler {
    /// One raw PM estimate, no calibration or compensation applied
    fn sample_raw_pm(&mut self) -> RawPm;

    /// Block for `ms` milliseconds between samples
    fn settle(&mut self, ms: u32);
}

/// Temperature/humidity sensor (DHT11, DHT22, SHT3x, ...)
///
/// A single attempt. Retrying belongs to the caller.
pub trait ClimateSensor {
    /// Driver error
    type Error: core::fmt::Debug;

    /// Read temperature (°C) and relative humidity (%RH)
    fn read(&mut self) -> Result<Climate, Self::Error>;
}
