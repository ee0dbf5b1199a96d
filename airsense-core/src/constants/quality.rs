//! Smoothing and Confidence-Score Parameters
//!
//! The confidence score blends two signals from the PM history:
//! how steady PM2.5 is (coefficient of variation) and whether PM10/PM2.5
//! sits near the ratio expected for mixed urban dust.

// ===== OUTLIER REJECTION =====

/// History length from which the smoothed mean rejects outliers.
pub const OUTLIER_MIN_SAMPLES: usize = 4;

/// Samples further than this many standard deviations from the mean are dropped.
pub const OUTLIER_SIGMA: f64 = 1.5;

/// Minimum survivors for the filtered mean; fewer falls back to the plain mean.
pub const OUTLIER_MIN_SURVIVORS: usize = 2;

// ===== CONFIDENCE SCORE =====

/// PM2.5 samples needed before the score says anything.
pub const QUALITY_MIN_SAMPLES: usize = 5;

/// Score reported while there is not enough history.
pub const QUALITY_NEUTRAL: f64 = 0.5;

/// Weight of the coefficient of variation in the consistency term.
pub const CONSISTENCY_CV_WEIGHT: f64 = 2.0;

/// Lowest consistency term.
pub const CONSISTENCY_FLOOR: f64 = 0.3;

/// PM10/PM2.5 ratio expected for typical ambient dust.
pub const EXPECTED_PM_RATIO: f64 = 1.5;

/// Lowest ratio-validity term.
pub const RATIO_VALIDITY_FLOOR: f64 = 0.5;

/// Ratio-validity term when PM10 history is missing.
pub const RATIO_VALIDITY_NEUTRAL: f64 = 0.7;

/// Final scale applied to the blended score; a perfect run never claims 1.0.
pub const QUALITY_SCALE: f64 = 0.98;

/// Fixed score stamped on synthetic readings.
///
/// Lets consumers tell simulated data apart without a separate flag.
pub const SIMULATED_QUALITY: f64 = 0.85;
