//! Field Calibration Against a Reference Instrument
//!
//! ## Procedure
//!
//! The operator places the monitor next to a trusted instrument and enters
//! the reference concentrations it shows. The calibrator then:
//!
//! ```text
//! 1. take N raw PM samples      (no compensation, no smoothing)
//!    spaced by a fixed pause    (N − 1 pauses, default 5 × 1 s)
//! 2. average them               → measured
//! 3. factor = reference / measured, per pollutant with a reference
//! ```
//!
//! Factors multiply the raw estimate before environmental compensation on
//! every later read.
//!
//! ## Guarding the division
//!
//! A dead channel averages 0 and a typo can give a negative reference. Either
//! would poison every future reading with 0, infinity or NaN, so the update is
//! skipped, the old factor kept, and the skip reported in the
//! [`CalibrationOutcome`].
//!
//! ```rust
//! use airsense_core::calibration::{correction_factor, CalibrationFactors};
//! use airsense_core::reading::RawPm;
//!
//! assert_eq!(correction_factor(100.0, 50.0), Ok(2.0));
//! assert!(correction_factor(100.0, 0.0).is_err());
//!
//! let factors = CalibrationFactors { pm25_factor: 2.0, pm10_factor: 1.0 };
//! assert_eq!(factors.apply(RawPm::new(10.0, 30.0)), RawPm::new(20.0, 30.0));
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::sensors::{CALIBRATION_SAMPLE_COUNT, CALIBRATION_SPACING_MS},
    errors::{SensorError, SensorResult},
    reading::RawPm,
    traits::DustSampler,
};

/// Multiplicative corrections applied to raw PM estimates
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalibrationFactors {
    /// PM2.5 multiplier, always positive and finite
    pub pm25_factor: f64,
    /// PM10 multiplier, always positive and finite
    pub pm10_factor: f64,
}

impl Default for CalibrationFactors {
    fn default() -> Self {
        Self {
            pm25_factor: 1.0,
            pm10_factor: 1.0,
        }
    }
}

impl CalibrationFactors {
    /// Scale raw estimates by the factors
    pub fn apply(&self, raw: RawPm) -> RawPm {
        RawPm::new(raw.pm25 * self.pm25_factor, raw.pm10 * self.pm10_factor)
    }
}

/// `reference / measured`, if both can anchor a factor
pub fn correction_factor(reference: f64, measured: f64) -> SensorResult<f64> {
    if !reference.is_finite() || reference <= 0.0 {
        return Err(SensorError::InvalidReference { value: reference });
    }
    if !measured.is_finite() || measured <= 0.0 {
        return Err(SensorError::DegenerateMeasurement { measured });
    }

    let factor = reference / measured;
    if factor.is_finite() && factor > 0.0 {
        Ok(factor)
    } else {
        Err(SensorError::DegenerateMeasurement { measured })
    }
}

/// What happened to one factor during calibration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FactorUpdate {
    /// No reference supplied
    Unchanged,
    /// Factor replaced
    Updated {
        /// Factor before calibration
        previous: f64,
        /// Factor after calibration
        current: f64,
    },
    /// Reference supplied but unusable; factor kept
    Skipped(SensorError),
}

/// Result of one calibration run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationOutcome {
    /// Average raw PM2.5 over the run (µg/m³)
    pub pm25_average: f64,
    /// Average raw PM10 over the run (µg/m³)
    pub pm10_average: f64,
    /// PM2.5 factor change
    pub pm25: FactorUpdate,
    /// PM10 factor change
    pub pm10: FactorUpdate,
}

impl CalibrationOutcome {
    /// `(avg_pm25, avg_pm10)` measured during the run
    pub fn averages(&self) -> (f64, f64) {
        (self.pm25_average, self.pm10_average)
    }
}

/// Sample-and-divide calibration routine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibrator {
    samples: usize,
    spacing_ms: u32,
}

impl Default for Calibrator {
    fn default() -> Self {
        Self {
            samples: CALIBRATION_SAMPLE_COUNT,
            spacing_ms: CALIBRATION_SPACING_MS,
        }
    }
}

impl Calibrator {
    /// Calibrator taking `samples` readings `spacing_ms` apart
    ///
    /// At least one sample is always taken.
    pub fn new(samples: usize, spacing_ms: u32) -> Self {
        Self {
            samples: samples.max(1),
            spacing_ms,
        }
    }

    /// Samples per run
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Pause between samples (ms)
    pub fn spacing_ms(&self) -> u32 {
        self.spacing_ms
    }

    /// Average of the raw samples. Blocks for `(samples − 1) × spacing`.
    pub fn measure(&self, sampler: &mut dyn DustSampler) -> RawPm {
        let mut pm25 = 0.0;
        let mut pm10 = 0.0;

        for i in 0..self.samples {
            if i > 0 {
                sampler.settle(self.spacing_ms);
            }
            let raw = sampler.sample_raw_pm();
            pm25 += raw.pm25;
            pm10 += raw.pm10;
        }

        let n = self.samples as f64;
        RawPm::new(pm25 / n, pm10 / n)
    }

    /// Measure, then update `factors` for each supplied reference
    pub fn calibrate(
        &self,
        sampler: &mut dyn DustSampler,
        factors: &mut CalibrationFactors,
        reference_pm25: Option<f64>,
        reference_pm10: Option<f64>,
    ) -> CalibrationOutcome {
        let measured = self.measure(sampler);
        self.apply(measured, factors, reference_pm25, reference_pm10)
    }

    /// Update `factors` from an already measured average
    pub fn apply(
        &self,
        measured: RawPm,
        factors: &mut CalibrationFactors,
        reference_pm25: Option<f64>,
        reference_pm10: Option<f64>,
    ) -> CalibrationOutcome {
        let pm25 = update(&mut factors.pm25_factor, reference_pm25, measured.pm25, "PM2.5");
        let pm10 = update(&mut factors.pm10_factor, reference_pm10, measured.pm10, "PM10");

        CalibrationOutcome {
            pm25_average: measured.pm25,
            pm10_average: measured.pm10,
            pm25,
            pm10,
        }
    }
}

fn update(
    factor: &mut f64,
    reference: Option<f64>,
    measured: f64,
    _label: &str,
) -> FactorUpdate {
    let reference = match reference {
        Some(reference) => reference,
        None => return FactorUpdate::Unchanged,
    };

    match correction_factor(reference, measured) {
        Ok(current) => {
            let previous = *factor;
            *factor = current;
            log_info!("{} calibration factor {:.3} -> {:.3}", _label, previous, current);
            FactorUpdate::Updated { previous, current }
        }
        Err(e) => {
            log_warn!("{} calibration skipped: {}", _label, e);
            FactorUpdate::Skipped(e)
        }
    }
}
