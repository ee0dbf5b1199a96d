//! Constants for AirSense Core
//!
//! Every number the reading pipeline depends on lives here, with its unit in
//! the name. The calibration-sensitive values (compensation coefficients,
//! duty-to-concentration mapping) are first-order heuristics fitted to a
//! Sharp/Shinyei-style optical dust sensor, not physical laws.
//!
//! ## Organization
//!
//! - **Sensors**: wiring, sampling windows, raw concentration mapping, baselines
//! - **Quality**: outlier rejection and confidence scoring parameters
//! - **Simulation**: synthetic generator shape and clamps
//! - **Time**: unit conversions and polling cadence

/// Sensor wiring, sampling and conversion constants.
pub mod sensors;

/// Smoothing and confidence-score parameters.
pub mod quality;

/// Synthetic reading generator parameters.
pub mod simulation;

/// Time conversions and default intervals.
pub mod time;

pub use sensors::{
    PM25_PIN, PM10_PIN, DUTY_SAMPLE_WINDOW_MS, DUTY_POLL_INTERVAL_MS,
    DEFAULT_HISTORY_CAPACITY, CALIBRATION_SAMPLE_COUNT,
};

pub use quality::{QUALITY_NEUTRAL, SIMULATED_QUALITY};

pub use time::{MS_PER_SECOND, SECONDS_PER_DAY};
