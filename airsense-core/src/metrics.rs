//! Accuracy against a reference instrument
//!
//! After calibration the monitor is usually left beside the reference for a
//! while and both series compared:
//!
//! ```text
//! rmse  = √( Σ (m − r)² / n )
//! mae   =    Σ |m − r|  / n
//! bias  = (μ(m) − μ(r)) / μ(r) × 100          (0 when μ(r) = 0)
//! r²    = Pearson(m, r)²                      (0 when either is constant)
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    errors::{SensorError, SensorResult},
    stats,
};

/// Agreement between measured and reference series
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AccuracyMetrics {
    /// Root mean square error (same unit as the inputs)
    pub rmse: f64,
    /// Mean absolute error
    pub mae: f64,
    /// Systematic bias relative to the reference mean (%)
    pub bias_percent: f64,
    /// Coefficient of determination, 0.0..=1.0
    pub r_squared: f64,
    /// Number of paired samples
    pub samples: usize,
}

impl AccuracyMetrics {
    /// Compare paired measured/reference samples
    pub fn compare(measured: &[f64], reference: &[f64]) -> SensorResult<Self> {
        if measured.len() != reference.len() {
            return Err(SensorError::LengthMismatch {
                left: measured.len(),
                right: reference.len(),
            });
        }

        let (mean_m, mean_r) = match (stats::mean(measured), stats::mean(reference)) {
            (Some(m), Some(r)) => (m, r),
            _ => {
                return Err(SensorError::InsufficientData {
                    required: 1,
                    available: 0,
                })
            }
        };

        let n = measured.len() as f64;
        let mut squared = 0.0;
        let mut absolute = 0.0;
        let mut cov = 0.0;
        let mut var_m = 0.0;
        let mut var_r = 0.0;

        for (&m, &r) in measured.iter().zip(reference) {
            let err = m - r;
            squared += err * err;
            absolute += libm::fabs(err);

            let dm = m - mean_m;
            let dr = r - mean_r;
            cov += dm * dr;
            var_m += dm * dm;
            var_r += dr * dr;
        }

        let bias_percent = if mean_r == 0.0 {
            0.0
        } else {
            (mean_m - mean_r) / mean_r * 100.0
        };

        let r_squared = if var_m == 0.0 || var_r == 0.0 {
            0.0
        } else {
            (cov * cov / (var_m * var_r)).clamp(0.0, 1.0)
        };

        Ok(Self {
            rmse: libm::sqrt(squared / n),
            mae: absolute / n,
            bias_percent,
            r_squared,
            samples: measured.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_agreement() {
        let series = [10.0, 20.0, 30.0, 40.0];
        let m = AccuracyMetrics::compare(&series, &series).unwrap();

        assert_eq!(m.rmse, 0.0);
        assert_eq!(m.mae, 0.0);
        assert_eq!(m.bias_percent, 0.0);
        assert!((m.r_squared - 1.0).abs() < 1e-12);
        assert_eq!(m.samples, 4);
    }

    #[test]
    fn constant_offset() {
        let reference = [10.0, 20.0, 30.0, 40.0];
        let measured = [12.0, 22.0, 32.0, 42.0];
        let m = AccuracyMetrics::compare(&measured, &reference).unwrap();

        assert!((m.rmse - 2.0).abs() < 1e-12);
        assert!((m.mae - 2.0).abs() < 1e-12);
        // mean 27 vs 25
        assert!((m.bias_percent - 8.0).abs() < 1e-12);
        assert!((m.r_squared - 1.0).abs() < 1e-12);
    }

    #[test]
    fn mixed_errors() {
        let m = AccuracyMetrics::compare(&[1.0, 5.0], &[2.0, 2.0]).unwrap();

        // errors -1 and 3
        assert!((m.mae - 2.0).abs() < 1e-12);
        assert!((m.rmse - libm::sqrt(5.0)).abs() < 1e-12);
        // constant reference
        assert_eq!(m.r_squared, 0.0);
    }

    #[test]
    fn zero_reference_mean_has_no_bias() {
        let m = AccuracyMetrics::compare(&[1.0, -1.0], &[0.0, 0.0]).unwrap();
        assert_eq!(m.bias_percent, 0.0);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            AccuracyMetrics::compare(&[], &[]),
            Err(SensorError::InsufficientData { required: 1, available: 0 })
        );
        assert_eq!(
            AccuracyMetrics::compare(&[1.0, 2.0], &[1.0]),
            Err(SensorError::LengthMismatch { left: 2, right: 1 })
        );
    }
}
