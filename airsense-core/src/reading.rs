//! Measurement data model
//!
//! Units throughout: particulate matter in µg/m³, temperature in °C,
//! relative humidity in %RH, timestamps in seconds since the Unix epoch.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::sensors::{
    BASE_HUMIDITY_PCT, BASE_PM10_UG_M3, BASE_PM25_UG_M3, BASE_TEMP_C,
};
use crate::time::Timestamp;

/// Smoothed, compensated snapshot returned by the sensor manager
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reading {
    /// Fine particulate matter (µg/m³)
    pub pm25: f64,
    /// Coarse particulate matter (µg/m³)
    pub pm10: f64,
    /// Air temperature (°C)
    pub temperature: f64,
    /// Relative humidity (%RH)
    pub humidity: f64,
    /// Seconds since the Unix epoch
    pub timestamp: Timestamp,
    /// Confidence in the PM values, 0.0..=1.0
    pub quality_score: f64,
}

impl Reading {
    /// True when no field is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.pm25.is_finite()
            && self.pm10.is_finite()
            && self.temperature.is_finite()
            && self.humidity.is_finite()
            && self.timestamp.is_finite()
            && self.quality_score.is_finite()
    }

    /// Air Quality Index of this reading's PM values
    pub fn aqi(&self) -> u32 {
        crate::aqi::calculate_aqi(self.pm25, self.pm10)
    }
}

/// Particulate estimates before smoothing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPm {
    /// PM2.5 (µg/m³)
    pub pm25: f64,
    /// PM10 (µg/m³)
    pub pm10: f64,
}

impl RawPm {
    /// Pair of PM2.5 and PM10 estimates, in µg/m³
    pub fn new(pm25: f64, pm10: f64) -> Self {
        Self { pm25, pm10 }
    }
}

/// Temperature and humidity pair from the climate sensor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Climate {
    /// Air temperature (°C)
    pub temperature: f64,
    /// Relative humidity (%RH)
    pub humidity: f64,
}

impl Climate {
    /// Temperature in °C and relative humidity in %
    pub fn new(temperature: f64, humidity: f64) -> Self {
        Self { temperature, humidity }
    }
}

/// Quantities tracked by the smoothing window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    /// Fine particulate matter
    Pm25,
    /// Coarse particulate matter
    Pm10,
    /// Air temperature
    Temperature,
    /// Relative humidity
    Humidity,
}

impl Quantity {
    /// All quantities, in storage order
    pub const ALL: [Quantity; 4] = [
        Quantity::Pm25,
        Quantity::Pm10,
        Quantity::Temperature,
        Quantity::Humidity,
    ];

    pub(crate) const fn index(self) -> usize {
        match self {
            Quantity::Pm25 => 0,
            Quantity::Pm10 => 1,
            Quantity::Temperature => 2,
            Quantity::Humidity => 3,
        }
    }
}

/// Typical values per quantity
///
/// Stand in for an empty history, fill a failed climate read, and anchor the
/// synthetic generator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BaseValues {
    /// Baseline PM2.5 (µg/m³)
    pub pm25: f64,
    /// Baseline PM10 (µg/m³)
    pub pm10: f64,
    /// Baseline temperature (°C)
    pub temperature: f64,
    /// Baseline humidity (%RH)
    pub humidity: f64,
}

impl BaseValues {
    /// Baseline for one quantity
    pub fn get(&self, quantity: Quantity) -> f64 {
        match quantity {
            Quantity::Pm25 => self.pm25,
            Quantity::Pm10 => self.pm10,
            Quantity::Temperature => self.temperature,
            Quantity::Humidity => self.humidity,
        }
    }
}

impl Default for BaseValues {
    fn default() -> Self {
        Self {
            pm25: BASE_PM25_UG_M3,
            pm10: BASE_PM10_UG_M3,
            temperature: BASE_TEMP_C,
            humidity: BASE_HUMIDITY_PCT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_indices_are_distinct() {
        assert_eq!(Quantity::ALL.map(Quantity::index), [0, 1, 2, 3]);
    }

    #[test]
    fn baseline_lookup() {
        let base = BaseValues::default();
        assert_eq!(base.get(Quantity::Pm25), 18.0);
        assert_eq!(base.get(Quantity::Pm10), 42.0);
        assert_eq!(base.get(Quantity::Temperature), 28.0);
        assert_eq!(base.get(Quantity::Humidity), 65.0);
    }

    #[test]
    fn finiteness_check() {
        let mut reading = Reading {
            pm25: 10.0,
            pm10: 20.0,
            temperature: 25.0,
            humidity: 50.0,
            timestamp: 1.0,
            quality_score: 0.5,
        };
        assert!(reading.is_finite());

        reading.pm10 = f64::INFINITY;
        assert!(!reading.is_finite());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn reading_serializes_with_field_names() {
        let reading = Reading {
            pm25: 12.5,
            pm10: 30.0,
            temperature: 27.0,
            humidity: 60.0,
            timestamp: 1_700_000_000.0,
            quality_score: 0.85,
        };

        let json = serde_json::to_string(&reading).unwrap();
        assert!(json.contains("\"pm25\":12.5"));
        assert!(json.contains("\"quality_score\":0.85"));

        let back: Reading = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reading);
    }
}
