//! Summary of a collection run
//!
//! A field survey takes a few dozen readings at one spot. The summary boils
//! them down to one row: averaged values, the AQI of the averaged PM, and the
//! time span covered.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    aqi::{AqiCalculator, AqiCategory},
    errors::{SensorError, SensorResult},
    reading::Reading,
    time::Timestamp,
};

/// Averages over a series of readings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CollectionSummary {
    /// Mean PM2.5 (µg/m³)
    pub pm25: f64,
    /// Mean PM10 (µg/m³)
    pub pm10: f64,
    /// Mean temperature (°C)
    pub temperature: f64,
    /// Mean relative humidity (%RH)
    pub humidity: f64,
    /// Mean confidence score
    pub quality_score: f64,
    /// AQI of the mean PM values
    pub aqi: u32,
    /// Category of `aqi`
    pub category: AqiCategory,
    /// Readings summarized
    pub count: usize,
    /// Timestamp of the first reading
    pub first_timestamp: Timestamp,
    /// Timestamp of the last reading
    pub last_timestamp: Timestamp,
}

impl CollectionSummary {
    /// Summarize readings in collection order
    pub fn from_readings(readings: &[Reading]) -> SensorResult<Self> {
        let (first, last) = match (readings.first(), readings.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(SensorError::InsufficientData {
                    required: 1,
                    available: 0,
                })
            }
        };

        let n = readings.len() as f64;
        let avg = |field: fn(&Reading) -> f64| readings.iter().map(field).sum::<f64>() / n;

        let pm25 = avg(|r| r.pm25);
        let pm10 = avg(|r| r.pm10);
        let (aqi, category) = AqiCalculator::new().assess(pm25, pm10);

        Ok(Self {
            pm25,
            pm10,
            temperature: avg(|r| r.temperature),
            humidity: avg(|r| r.humidity),
            quality_score: avg(|r| r.quality_score),
            aqi,
            category,
            count: readings.len(),
            first_timestamp: first.timestamp,
            last_timestamp: last.timestamp,
        })
    }

    /// Seconds between the first and last reading
    pub fn duration(&self) -> f64 {
        self.last_timestamp - self.first_timestamp
    }
}
