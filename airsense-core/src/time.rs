//! Clocks
//!
//! Readings are stamped in seconds since the Unix epoch, and the synthetic
//! generator keys its day/night cycle off the same value. Both read the time
//! through [`TimeSource`] so tests and replays can pin it.

#[cfg(target_has_atomic = "64")]
use core::sync::atomic::{AtomicU64, Ordering};

use crate::constants::time::SECONDS_PER_DAY;

/// Seconds since the Unix epoch
pub type Timestamp = f64;

/// Something that can tell the time
pub trait TimeSource {
    /// Current time
    fn now(&self) -> Timestamp;
}

/// Host wall clock
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[cfg(feature = "std")]
impl TimeSource for SystemClock {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs_f64())
            .unwrap_or(0.0)
    }
}

/// Clock that only moves when told to
///
/// Interior mutability lets a test keep a handle (through `Arc`) and move
/// time forward while a manager owns the clock. Needs 64-bit atomics, so it
/// is absent on targets such as `thumbv6m` and `riscv32imc`.
#[cfg(target_has_atomic = "64")]
#[derive(Debug, Default)]
pub struct FixedClock {
    bits: AtomicU64,
}

#[cfg(target_has_atomic = "64")]
impl FixedClock {
    /// Clock stopped at `timestamp`
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            bits: AtomicU64::new(timestamp.to_bits()),
        }
    }

    /// Jump to `timestamp`
    pub fn set(&self, timestamp: Timestamp) {
        self.bits.store(timestamp.to_bits(), Ordering::Release);
    }

    /// Move forward by `seconds`
    pub fn advance(&self, seconds: f64) {
        // Closure always returns Some, so the update cannot fail
        let _ = self
            .bits
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                Some((f64::from_bits(bits) + seconds).to_bits())
            });
    }
}

#[cfg(target_has_atomic = "64")]
impl TimeSource for FixedClock {
    fn now(&self) -> Timestamp {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }
}

#[cfg(feature = "std")]
impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Seconds since the last UTC midnight, in `[0, 86400)`
///
/// Non-finite input gives 0.
pub fn seconds_of_day(timestamp: Timestamp) -> f64 {
    if !timestamp.is_finite() {
        return 0.0;
    }

    let seconds = timestamp % SECONDS_PER_DAY;
    if seconds < 0.0 {
        seconds + SECONDS_PER_DAY
    } else {
        seconds
    }
}
