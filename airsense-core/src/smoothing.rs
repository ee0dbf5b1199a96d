//! Rolling-Window Smoothing with Outlier Rejection
//!
//! ## Overview
//!
//! Each quantity keeps its own bounded history. The smoothed value is a mean
//! that tolerates the occasional glitch (a pulse miscount, a DHT bit error)
//! without sorting or a full order-statistics filter.
//!
//! ## Estimator
//!
//! ```text
//! n == 0   → baseline for the quantity
//! n <  4   → plain mean
//! n >= 4   → mean of samples with |x − μ| ≤ 1.5σ
//!            (plain mean if fewer than 2 survive)
//! ```
//!
//! Any mean of a subset of the history stays within `[min, max]` of the
//! history, so smoothing never invents values the sensor did not report.
//!
//! ## Usage
//!
//! ```rust
//! use airsense_core::smoothing::SmoothingWindow;
//! use airsense_core::reading::{BaseValues, Quantity};
//!
//! let mut window: SmoothingWindow<10> = SmoothingWindow::new(BaseValues::default());
//! for v in [20.0, 21.0, 19.5, 20.5, 95.0] {
//!     window.push(Quantity::Pm25, v).unwrap();
//! }
//!
//! // The 95.0 spike is rejected
//! let smoothed = window.average(Quantity::Pm25);
//! assert!((smoothed - 20.25).abs() < 1e-9);
//! ```

use heapless::Vec;

use crate::{
    buffer::CircularBuffer,
    constants::{
        quality::{OUTLIER_MIN_SAMPLES, OUTLIER_MIN_SURVIVORS, OUTLIER_SIGMA},
        sensors::DEFAULT_HISTORY_CAPACITY,
    },
    errors::{SensorError, SensorResult},
    reading::{BaseValues, Quantity},
    stats,
};

/// Bounded per-quantity history with a robust mean
#[derive(Debug, Clone)]
pub struct SmoothingWindow<const N: usize = DEFAULT_HISTORY_CAPACITY> {
    /// One history per [`Quantity`], indexed by `Quantity::index`
    histories: [CircularBuffer<f64, N>; 4],

    /// Returned for a quantity with no samples yet
    baseline: BaseValues,
}

impl<const N: usize> SmoothingWindow<N> {
    /// Create an empty window
    pub fn new(baseline: BaseValues) -> Self {
        Self {
            histories: [
                CircularBuffer::new(),
                CircularBuffer::new(),
                CircularBuffer::new(),
                CircularBuffer::new(),
            ],
            baseline,
        }
    }

    /// Append a sample, evicting the oldest one when full
    ///
    /// NaN and infinity are rejected and never stored.
    pub fn push(&mut self, quantity: Quantity, value: f64) -> SensorResult<()> {
        if !value.is_finite() {
            return Err(SensorError::InvalidValue);
        }

        self.histories[quantity.index()].push(value);
        Ok(())
    }

    /// Smoothed value for one quantity
    ///
    /// Always within `[min, max]` of the history, even where float
    /// summation would round a mean just past an extreme.
    pub fn average(&self, quantity: Quantity) -> f64 {
        let samples = self.histories[quantity.index()].snapshot();

        match stats::min_max(&samples) {
            Some((lo, hi)) => robust_mean(&samples).clamp(lo, hi),
            None => self.baseline.get(quantity),
        }
    }

    /// History for one quantity, oldest first
    pub fn history(&self, quantity: Quantity) -> &CircularBuffer<f64, N> {
        &self.histories[quantity.index()]
    }

    /// Number of samples held for one quantity
    pub fn len(&self, quantity: Quantity) -> usize {
        self.histories[quantity.index()].len()
    }

    /// True when no quantity holds a sample
    pub fn is_empty(&self) -> bool {
        self.histories.iter().all(CircularBuffer::is_empty)
    }

    /// Samples kept per quantity
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Baselines used for empty histories
    pub fn baseline(&self) -> &BaseValues {
        &self.baseline
    }

    /// Drop every sample
    pub fn clear(&mut self) {
        for history in self.histories.iter_mut() {
            history.clear();
        }
    }
}

/// Mean of the samples within `OUTLIER_SIGMA` deviations, or the plain mean
/// when the history is short or too few samples survive
fn robust_mean<const N: usize>(samples: &Vec<f64, N>) -> f64 {
    let mean = stats::mean(samples).unwrap_or(0.0);
    if samples.len() < OUTLIER_MIN_SAMPLES {
        return mean;
    }

    let limit = OUTLIER_SIGMA * stats::std_dev(samples, mean);
    let kept: Vec<f64, N> = samples
        .iter()
        .copied()
        .filter(|v| libm::fabs(v - mean) <= limit)
        .collect();

    if kept.len() < OUTLIER_MIN_SURVIVORS {
        return mean;
    }

    stats::mean(&kept).unwrap_or(mean)
}
