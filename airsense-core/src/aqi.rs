//! US EPA Air Quality Index from Particulate Concentrations
//!
//! ## Background
//!
//! The AQI maps a pollutant concentration onto a unitless 0–500 scale through
//! a breakpoint table. Inside a band the mapping is linear:
//!
//! ```text
//!          I_hi − I_lo
//! I = ─────────────────── × (C − C_lo) + I_lo
//!          C_hi − C_lo
//! ```
//!
//! The overall index is the worse of the PM2.5 and PM10 sub-indices.
//!
//! ## Tables
//!
//! ```text
//! PM2.5 (µg/m³)     AQI        PM10 (µg/m³)   AQI
//! 0.0  –  12.0      0 –  50    0 –  54        0 –  50
//! 12.0 –  35.4     51 – 100    54 – 154      51 – 100
//! 35.4 –  55.4    101 – 150    154 – 254    101 – 150
//! 55.4 – 150.4    151 – 200    254 – 354    151 – 200
//! 150.4 – 250.4   201 – 300    354 – 424    201 – 300
//! 250.4 – 500.0   301 – 500    424 – 604    301 – 500
//! ```
//!
//! ## Above the top band
//!
//! Concentrations past the last band continue along its slope, so the index
//! can exceed 500. The EPA standard caps at 500.
//!
//! ```rust
//! use airsense_core::aqi::{AqiCalculator, AqiCategory};
//!
//! let calc = AqiCalculator::new();
//! assert_eq!(calc.calculate(12.0, 0.0), 50);
//!
//! // PM2.5 sub-index 112, PM10 sub-index 54
//! let (aqi, category) = calc.assess(40.0, 60.0);
//! assert_eq!(aqi, 112);
//! assert_eq!(category, AqiCategory::UnhealthyForSensitiveGroups);
//! ```

/// One band of a breakpoint table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    /// Lower concentration of the band (µg/m³)
    pub concentration_low: f64,
    /// Upper concentration of the band (µg/m³)
    pub concentration_high: f64,
    /// Index at the lower concentration
    pub index_low: f64,
    /// Index at the upper concentration
    pub index_high: f64,
}

impl Breakpoint {
    const fn new(
        concentration_low: f64,
        concentration_high: f64,
        index_low: f64,
        index_high: f64,
    ) -> Self {
        Self {
            concentration_low,
            concentration_high,
            index_low,
            index_high,
        }
    }

    /// Linear interpolation inside (or along) this band
    fn interpolate(&self, concentration: f64) -> f64 {
        let slope = (self.index_high - self.index_low)
            / (self.concentration_high - self.concentration_low);
        self.index_low + slope * (concentration - self.concentration_low)
    }
}

/// Ordered set of breakpoint bands for one pollutant
#[derive(Debug, Clone, Copy)]
pub struct BreakpointTable {
    bands: &'static [Breakpoint],
}

impl BreakpointTable {
    /// Bands in ascending concentration order
    pub fn bands(&self) -> &'static [Breakpoint] {
        self.bands
    }

    /// Unrounded index for a concentration
    ///
    /// Negative or NaN concentrations give 0.
    pub fn index(&self, concentration: f64) -> f64 {
        if concentration.is_nan() || concentration <= 0.0 {
            return 0.0;
        }

        let band = self
            .bands
            .iter()
            .find(|band| concentration <= band.concentration_high)
            .or_else(|| self.bands.last());

        match band {
            Some(band) => band.interpolate(concentration),
            None => 0.0,
        }
    }
}

/// PM2.5 24-hour breakpoints
pub const PM25_BREAKPOINTS: BreakpointTable = BreakpointTable {
    bands: &[
        Breakpoint::new(0.0, 12.0, 0.0, 50.0),
        Breakpoint::new(12.0, 35.4, 51.0, 100.0),
        Breakpoint::new(35.4, 55.4, 101.0, 150.0),
        Breakpoint::new(55.4, 150.4, 151.0, 200.0),
        Breakpoint::new(150.4, 250.4, 201.0, 300.0),
        Breakpoint::new(250.4, 500.0, 301.0, 500.0),
    ],
};

/// PM10 24-hour breakpoints
pub const PM10_BREAKPOINTS: BreakpointTable = BreakpointTable {
    bands: &[
        Breakpoint::new(0.0, 54.0, 0.0, 50.0),
        Breakpoint::new(54.0, 154.0, 51.0, 100.0),
        Breakpoint::new(154.0, 254.0, 101.0, 150.0),
        Breakpoint::new(254.0, 354.0, 151.0, 200.0),
        Breakpoint::new(354.0, 424.0, 201.0, 300.0),
        Breakpoint::new(424.0, 604.0, 301.0, 500.0),
    ],
};

/// Health category of an AQI value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AqiCategory {
    /// 0–50
    Good,
    /// 51–100
    Moderate,
    /// 101–150
    UnhealthyForSensitiveGroups,
    /// 151–200
    Unhealthy,
    /// 201–300
    VeryUnhealthy,
    /// 301 and above
    Hazardous,
}

impl AqiCategory {
    /// Category for an index value
    pub fn from_index(aqi: u32) -> Self {
        match aqi {
            0..=50 => Self::Good,
            51..=100 => Self::Moderate,
            101..=150 => Self::UnhealthyForSensitiveGroups,
            151..=200 => Self::Unhealthy,
            201..=300 => Self::VeryUnhealthy,
            _ => Self::Hazardous,
        }
    }

    /// EPA display name
    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }
}

/// AQI from PM2.5 and PM10 concentrations
#[derive(Debug, Clone, Copy)]
pub struct AqiCalculator {
    pm25: BreakpointTable,
    pm10: BreakpointTable,
}

impl Default for AqiCalculator {
    fn default() -> Self {
        Self {
            pm25: PM25_BREAKPOINTS,
            pm10: PM10_BREAKPOINTS,
        }
    }
}

impl AqiCalculator {
    /// Calculator over the EPA breakpoint tables
    pub fn new() -> Self {
        Self::default()
    }

    /// PM2.5 sub-index
    pub fn pm25_index(&self, pm25: f64) -> u32 {
        to_index(self.pm25.index(pm25))
    }

    /// PM10 sub-index
    pub fn pm10_index(&self, pm10: f64) -> u32 {
        to_index(self.pm10.index(pm10))
    }

    /// Overall AQI: the worse of the two sub-indices
    pub fn calculate(&self, pm25: f64, pm10: f64) -> u32 {
        self.pm25_index(pm25).max(self.pm10_index(pm10))
    }

    /// Overall AQI with its health category
    pub fn assess(&self, pm25: f64, pm10: f64) -> (u32, AqiCategory) {
        let aqi = self.calculate(pm25, pm10);
        (aqi, AqiCategory::from_index(aqi))
    }
}

/// Overall AQI with the standard EPA tables
pub fn calculate_aqi(pm25: f64, pm10: f64) -> u32 {
    AqiCalculator::default().calculate(pm25, pm10)
}

/// Round half away from zero; `as` saturates out-of-range values
fn to_index(value: f64) -> u32 {
    libm::round(value) as u32
}
