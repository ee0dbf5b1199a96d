//! Time-Related Constants

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u32 = 1000;

/// Nanoseconds per millisecond.
pub const NS_PER_MS: u32 = 1_000_000;

/// Seconds per day, used for the diurnal cycle.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

// ===== POLLING =====

/// Default interval between background reads (milliseconds).
///
/// A full hardware read blocks for about a second (two 0.5 s duty windows),
/// so polling faster than this mostly measures the same air.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 10_000;
