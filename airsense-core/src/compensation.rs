//! Environmental Compensation for Optical Dust Sensors
//!
//! ## Background
//!
//! Low-cost dust sensors count particles by the light they scatter. Humid air
//! swells hygroscopic particles and warm air shifts the LED/photodiode
//! response, so the same dust reads differently across the day.
//!
//! ## Model
//!
//! A first-order linear correction around a reference climate:
//!
//! ```text
//! temp_factor     = 1 + (T  − 25 °C)  × 0.02
//! humidity_factor = 1 + (RH − 50 %RH) × 0.003
//! pm              = max(0, pm_raw × temp_factor × humidity_factor)
//! ```
//!
//! This is a heuristic fitted to bench observations, not a physical law.
//! When either climate value is unknown the raw values pass through
//! unchanged.
//!
//! ```rust
//! use airsense_core::compensation::EnvironmentalCompensator;
//!
//! let compensator = EnvironmentalCompensator::default();
//!
//! // Hot, humid afternoon
//! let (pm25, pm10) = compensator.compensate(20.0, 40.0, Some(35.0), Some(80.0));
//! assert!(pm25 > 20.0 && pm10 > 40.0);
//!
//! // No climate data: identity
//! assert_eq!(compensator.compensate(20.0, 40.0, None, Some(80.0)), (20.0, 40.0));
//! ```

use crate::constants::sensors::{
    COMPENSATION_HUMIDITY_COEFFICIENT, COMPENSATION_REFERENCE_HUMIDITY_PCT,
    COMPENSATION_REFERENCE_TEMP_C, COMPENSATION_TEMP_COEFFICIENT,
};

/// Linear temperature/humidity correction for PM estimates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentalCompensator {
    /// Temperature needing no correction (°C)
    reference_temp_c: f64,

    /// Fractional correction per °C
    temp_coefficient: f64,

    /// Humidity needing no correction (%RH)
    reference_humidity_pct: f64,

    /// Fractional correction per %RH
    humidity_coefficient: f64,
}

impl Default for EnvironmentalCompensator {
    fn default() -> Self {
        Self {
            reference_temp_c: COMPENSATION_REFERENCE_TEMP_C,
            temp_coefficient: COMPENSATION_TEMP_COEFFICIENT,
            reference_humidity_pct: COMPENSATION_REFERENCE_HUMIDITY_PCT,
            humidity_coefficient: COMPENSATION_HUMIDITY_COEFFICIENT,
        }
    }
}

impl EnvironmentalCompensator {
    /// Create a compensator with custom reference climate and coefficients
    pub fn new_with_coefficients(
        reference_temp_c: f64,
        temp_coefficient: f64,
        reference_humidity_pct: f64,
        humidity_coefficient: f64,
    ) -> Self {
        Self {
            reference_temp_c,
            temp_coefficient,
            reference_humidity_pct,
            humidity_coefficient,
        }
    }

    /// Combined multiplicative correction for a known climate
    pub fn factor(&self, temperature: f64, humidity: f64) -> f64 {
        let temp_factor = 1.0 + (temperature - self.reference_temp_c) * self.temp_coefficient;
        let humidity_factor =
            1.0 + (humidity - self.reference_humidity_pct) * self.humidity_coefficient;
        temp_factor * humidity_factor
    }

    /// Correct raw PM2.5/PM10 for ambient conditions
    ///
    /// Unknown (or non-finite) temperature or humidity returns the inputs
    /// untouched.
    pub fn compensate(
        &self,
        pm25_raw: f64,
        pm10_raw: f64,
        temperature: Option<f64>,
        humidity: Option<f64>,
    ) -> (f64, f64) {
        let (temperature, humidity) = match (temperature, humidity) {
            (Some(t), Some(h)) if t.is_finite() && h.is_finite() => (t, h),
            _ => return (pm25_raw, pm10_raw),
        };

        let factor = self.factor(temperature, humidity);
        (
            (pm25_raw * factor).max(0.0),
            (pm10_raw * factor).max(0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_climate_is_neutral() {
        let c = EnvironmentalCompensator::default();
        assert_eq!(c.factor(25.0, 50.0), 1.0);
        assert_eq!(c.compensate(12.0, 30.0, Some(25.0), Some(50.0)), (12.0, 30.0));
    }

    #[test]
    fn unknown_climate_is_identity() {
        let c = EnvironmentalCompensator::default();
        assert_eq!(c.compensate(12.0, 30.0, None, None), (12.0, 30.0));
        assert_eq!(c.compensate(12.0, 30.0, Some(30.0), None), (12.0, 30.0));
        assert_eq!(c.compensate(12.0, 30.0, None, Some(70.0)), (12.0, 30.0));
        assert_eq!(c.compensate(12.0, 30.0, Some(f64::NAN), Some(70.0)), (12.0, 30.0));
    }

    #[test]
    fn warm_humid_air_scales_up() {
        let c = EnvironmentalCompensator::default();

        // 35 °C → 1.2, 70 %RH → 1.06
        let (pm25, pm10) = c.compensate(10.0, 20.0, Some(35.0), Some(70.0));
        assert!((pm25 - 10.0 * 1.2 * 1.06).abs() < 1e-9);
        assert!((pm10 - 20.0 * 1.2 * 1.06).abs() < 1e-9);
    }

    #[test]
    fn never_negative() {
        let c = EnvironmentalCompensator::default();

        // -40 °C drives the temperature factor below zero
        let (pm25, pm10) = c.compensate(10.0, 20.0, Some(-40.0), Some(50.0));
        assert_eq!(pm25, 0.0);
        assert_eq!(pm10, 0.0);
    }

    #[test]
    fn custom_coefficients() {
        let c = EnvironmentalCompensator::new_with_coefficients(20.0, 0.01, 40.0, 0.0);
        assert!((c.factor(30.0, 90.0) - 1.1).abs() < 1e-12);
    }
}
