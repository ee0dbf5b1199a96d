//! Data-Quality Confidence Score
//!
//! ## Overview
//!
//! A reading's `quality_score` says how much to trust its PM values. Two
//! signals from recent history feed it:
//!
//! 1. **Consistency**: PM2.5 should not jump around. A high coefficient of
//!    variation means noise, a loose connector, or a fan stalling.
//! 2. **Ratio validity**: ambient PM10 runs at roughly 1.5× PM2.5. A ratio far
//!    from that means one channel is misbehaving.
//!
//! ```text
//! cv              = σ(pm25) / μ(pm25)                      (0 if μ = 0)
//! consistency     = clamp(1 − 2·cv, 0.3, 1.0)
//! ratio           = μ(pm10) / μ(pm25)                      (0 if μ = 0)
//! ratio_validity  = clamp(1 − |ratio − 1.5| / 1.5, 0.5, 1.0)
//!                   (0.7 when PM10 history is empty)
//! score           = min(1, (consistency + ratio_validity) / 2 × 0.98)
//! ```
//!
//! Fewer than five PM2.5 samples give the neutral score 0.5.

use crate::{
    constants::quality::{
        CONSISTENCY_CV_WEIGHT, CONSISTENCY_FLOOR, EXPECTED_PM_RATIO, QUALITY_MIN_SAMPLES,
        QUALITY_NEUTRAL, QUALITY_SCALE, RATIO_VALIDITY_FLOOR, RATIO_VALIDITY_NEUTRAL,
    },
    reading::Quantity,
    smoothing::SmoothingWindow,
    stats,
};

/// Confidence scorer over PM history
#[derive(Debug, Clone, Copy, Default)]
pub struct QualityScorer;

impl QualityScorer {
    /// Stateless scorer; every threshold comes from `constants::quality`
    pub fn new() -> Self {
        Self
    }

    /// Score the PM histories held by a smoothing window
    pub fn score<const N: usize>(&self, window: &SmoothingWindow<N>) -> f64 {
        let pm25 = window.history(Quantity::Pm25).snapshot();
        let pm10 = window.history(Quantity::Pm10).snapshot();
        self.score_samples(&pm25, &pm10)
    }

    /// Score raw PM2.5/PM10 sample slices
    pub fn score_samples(&self, pm25: &[f64], pm10: &[f64]) -> f64 {
        if pm25.len() < QUALITY_MIN_SAMPLES {
            return QUALITY_NEUTRAL;
        }

        let consistency = Self::consistency(pm25);
        let ratio_validity = Self::ratio_validity(pm25, pm10);

        let score = ((consistency + ratio_validity) / 2.0 * QUALITY_SCALE).min(1.0);
        if score.is_finite() {
            score.max(0.0)
        } else {
            QUALITY_NEUTRAL
        }
    }

    fn consistency(pm25: &[f64]) -> f64 {
        let cv = stats::coefficient_of_variation(pm25);
        if !cv.is_finite() {
            return CONSISTENCY_FLOOR;
        }

        (1.0 - cv * CONSISTENCY_CV_WEIGHT).clamp(CONSISTENCY_FLOOR, 1.0)
    }

    fn ratio_validity(pm25: &[f64], pm10: &[f64]) -> f64 {
        let (mean25, mean10) = match (stats::mean(pm25), stats::mean(pm10)) {
            (Some(a), Some(b)) => (a, b),
            _ => return RATIO_VALIDITY_NEUTRAL,
        };

        let ratio = if mean25 == 0.0 { 0.0 } else { mean10 / mean25 };
        if !ratio.is_finite() {
            return RATIO_VALIDITY_FLOOR;
        }

        (1.0 - libm::fabs(ratio - EXPECTED_PM_RATIO) / EXPECTED_PM_RATIO)
            .clamp(RATIO_VALIDITY_FLOOR, 1.0)
    }
}
