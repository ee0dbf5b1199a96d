//! Sensor Wiring, Sampling and Conversion Constants
//!
//! Values for a Raspberry Pi build with two dust-sensor outputs on BCM pins
//! 23/24 and a DHT22 temperature/humidity sensor.

// ===== WIRING =====

/// BCM pin carrying the PM2.5 (P2) pulse output of the dust sensor.
pub const PM25_PIN: u8 = 23;

/// BCM pin carrying the PM10 (P1) pulse output of the dust sensor.
pub const PM10_PIN: u8 = 24;

// ===== DUTY-CYCLE SAMPLING =====

/// Observation window per dust channel (milliseconds).
///
/// Two channels per read make a full hardware read block for ~1 s.
pub const DUTY_SAMPLE_WINDOW_MS: u32 = 500;

/// Pause between two pin polls inside a window (milliseconds).
pub const DUTY_POLL_INTERVAL_MS: u32 = 10;

/// Lower bound of the random duty fraction used when a pin cannot be read.
pub const DUTY_FALLBACK_MIN: f64 = 0.1;

/// Upper bound of the random duty fraction used when a pin cannot be read.
pub const DUTY_FALLBACK_MAX: f64 = 0.3;

// ===== RAW CONCENTRATION MAPPING =====
//
// pm25 = max(PM25_FLOOR, duty% * PM25_GAIN + PM25_OFFSET)
// pm10 = max(pm25 * PM10_MIN_RATIO, duty% * PM10_GAIN + PM10_OFFSET)

/// Lowest raw PM2.5 estimate the dust sensor reports (µg/m³).
pub const PM25_FLOOR_UG_M3: f64 = 8.0;

/// PM2.5 concentration per duty percent (µg/m³ per %).
pub const PM25_GAIN_UG_M3_PER_PCT: f64 = 1.0;

/// PM2.5 concentration at zero duty (µg/m³).
pub const PM25_OFFSET_UG_M3: f64 = 15.0;

/// PM10 concentration per duty percent (µg/m³ per %).
pub const PM10_GAIN_UG_M3_PER_PCT: f64 = 1.2;

/// PM10 concentration at zero duty (µg/m³).
pub const PM10_OFFSET_UG_M3: f64 = 35.0;

/// PM10 is never reported below this multiple of PM2.5.
pub const PM10_MIN_RATIO: f64 = 1.5;

// ===== CLIMATE SENSOR =====

/// Attempts made on the temperature/humidity sensor per read.
pub const CLIMATE_READ_ATTEMPTS: usize = 3;

/// Pause between climate read attempts (milliseconds).
///
/// DHT22 needs a few hundred milliseconds between conversions.
pub const CLIMATE_RETRY_DELAY_MS: u32 = 300;

/// Jitter added to the baseline temperature when the sensor gives up (°C).
pub const TEMP_FALLBACK_JITTER_C: f64 = 1.0;

/// Jitter added to the baseline humidity when the sensor gives up (%RH).
pub const HUMIDITY_FALLBACK_JITTER_PCT: f64 = 3.0;

// ===== ENVIRONMENTAL COMPENSATION =====

/// Temperature at which the dust sensor needs no correction (°C).
pub const COMPENSATION_REFERENCE_TEMP_C: f64 = 25.0;

/// Fractional PM correction per °C away from the reference.
pub const COMPENSATION_TEMP_COEFFICIENT: f64 = 0.02;

/// Humidity at which the dust sensor needs no correction (%RH).
pub const COMPENSATION_REFERENCE_HUMIDITY_PCT: f64 = 50.0;

/// Fractional PM correction per %RH away from the reference.
pub const COMPENSATION_HUMIDITY_COEFFICIENT: f64 = 0.003;

// ===== BASELINES =====
//
// Typical coastal South-Indian readings. Used when a history is empty, for the
// climate fallback, and to anchor the synthetic generator.

/// Baseline PM2.5 (µg/m³).
pub const BASE_PM25_UG_M3: f64 = 18.0;

/// Baseline PM10 (µg/m³).
pub const BASE_PM10_UG_M3: f64 = 42.0;

/// Baseline air temperature (°C).
pub const BASE_TEMP_C: f64 = 28.0;

/// Baseline relative humidity (%RH).
pub const BASE_HUMIDITY_PCT: f64 = 65.0;

// ===== HISTORY & CALIBRATION =====

/// Samples kept per quantity for smoothing.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Raw readings averaged by one calibration run.
pub const CALIBRATION_SAMPLE_COUNT: usize = 5;

/// Pause between calibration samples (milliseconds).
pub const CALIBRATION_SPACING_MS: u32 = 1000;
