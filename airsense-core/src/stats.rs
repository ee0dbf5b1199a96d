//! Descriptive statistics over sample slices
//!
//! Pure functions shared by the smoothing window, the confidence score and
//! the accuracy metrics. Empty input returns `None` (or `0.0` where a neutral
//! value is the documented answer) instead of dividing by zero.

/// Arithmetic mean, `None` for an empty slice
pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }

    let sum: f64 = samples.iter().sum();
    Some(sum / samples.len() as f64)
}

/// Population standard deviation around a known mean
///
/// Returns `0.0` for an empty slice.
pub fn std_dev(samples: &[f64], mean: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    let variance = samples
        .iter()
        .map(|v| {
            let d = v - mean;
            d * d
        })
        .sum::<f64>()
        / samples.len() as f64;

    libm::sqrt(variance)
}

/// Smallest and largest sample, `None` for an empty slice
pub fn min_max(samples: &[f64]) -> Option<(f64, f64)> {
    let first = *samples.first()?;
    Some(
        samples
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

/// Coefficient of variation (σ / μ); `0.0` when the mean is zero
pub fn coefficient_of_variation(samples: &[f64]) -> f64 {
    match mean(samples) {
        Some(m) if m != 0.0 => std_dev(samples, m) / m,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_samples() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[2.0, 4.0, 6.0]), Some(4.0));
    }

    #[test]
    fn population_std_dev() {
        // Classic textbook set: mean 5, population σ 2
        let samples = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let m = mean(&samples).unwrap();
        assert_eq!(m, 5.0);
        assert!((std_dev(&samples, m) - 2.0).abs() < 1e-12);

        assert_eq!(std_dev(&[], 0.0), 0.0);
    }

    #[test]
    fn extremes() {
        assert_eq!(min_max(&[]), None);
        assert_eq!(min_max(&[3.0, -1.0, 8.0]), Some((-1.0, 8.0)));
    }

    #[test]
    fn variation_guards_zero_mean() {
        assert_eq!(coefficient_of_variation(&[0.0, 0.0, 0.0]), 0.0);
        assert_eq!(coefficient_of_variation(&[]), 0.0);
        assert_eq!(coefficient_of_variation(&[10.0, 10.0]), 0.0);
    }
}
