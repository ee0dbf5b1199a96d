//! Synthetic Reading Generator Parameters

/// Amplitude of the day/night multiplier around 1.0 (gives 0.7..=1.3).
pub const DIURNAL_AMPLITUDE: f64 = 0.3;

/// Lowest per-run location multiplier.
pub const LOCATION_FACTOR_MIN: f64 = 0.8;

/// Step between location multipliers.
pub const LOCATION_FACTOR_STEP: f64 = 0.06;

/// Number of distinct location multipliers (0.80, 0.86, ... 1.16).
pub const LOCATION_FACTOR_STEPS: u32 = 7;

/// Activity noise multiplier spread around 1.0.
pub const ACTIVITY_NOISE: f64 = 0.05;

/// PM2.5 jitter (± µg/m³).
pub const PM25_JITTER_UG_M3: f64 = 2.0;

/// PM10 jitter (± µg/m³).
pub const PM10_JITTER_UG_M3: f64 = 3.0;

/// Day/night temperature swing (°C).
pub const TEMP_DIURNAL_SWING_C: f64 = 4.0;

/// Temperature jitter (± °C).
pub const TEMP_JITTER_C: f64 = 0.8;

/// Day/night humidity swing (%RH), opposite in phase to temperature.
pub const HUMIDITY_DIURNAL_SWING_PCT: f64 = 8.0;

/// Humidity jitter (± %RH).
pub const HUMIDITY_JITTER_PCT: f64 = 4.0;

// ===== CLAMPS =====

/// Highest synthetic PM2.5 (µg/m³).
pub const PM25_MAX_UG_M3: f64 = 300.0;

/// Synthetic PM2.5 never exceeds this multiple of PM10.
pub const PM25_TO_PM10_CEILING: f64 = 1.2;

/// Highest synthetic PM10 (µg/m³).
pub const PM10_MAX_UG_M3: f64 = 400.0;

/// Synthetic temperature range (°C).
pub const TEMP_MIN_C: f64 = 10.0;
/// Synthetic temperature range (°C).
pub const TEMP_MAX_C: f64 = 45.0;

/// Synthetic humidity range (%RH).
pub const HUMIDITY_MIN_PCT: f64 = 20.0;
/// Synthetic humidity range (%RH).
pub const HUMIDITY_MAX_PCT: f64 = 95.0;
