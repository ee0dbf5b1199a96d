//! Bounded retry
//!
//! Flaky one-wire sensors fail a read now and then. Instead of an inline loop
//! with a silent fallback, callers run the operation through [`retry`] and
//! decide what to do with `None` themselves.
//!
//! ```rust
//! use airsense_core::retry::retry;
//!
//! let mut calls = 0;
//! let value = retry(3, |_| {
//!     calls += 1;
//!     if calls < 3 { Err("checksum") } else { Ok(42) }
//! }, || {});
//!
//! assert_eq!(value, Some(42));
//! ```

use core::fmt::Debug;

/// Run `op` up to `attempts` times, stopping at the first success
///
/// `op` receives the zero-based attempt number. `pause` runs between
/// attempts, never after the last one. Zero attempts never calls `op`.
pub fn retry<T, E, F, P>(attempts: usize, mut op: F, mut pause: P) -> Option<T>
where
    E: Debug,
    F: FnMut(usize) -> Result<T, E>,
    P: FnMut(),
{
    for attempt in 0..attempts {
        match op(attempt) {
            Ok(value) => return Some(value),
            Err(_e) => {
                log_debug!("attempt {}/{} failed: {:?}", attempt + 1, attempts, _e);
            }
        }

        if attempt + 1 < attempts {
            pause();
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_success_wins() {
        let mut pauses = 0;
        let value: Option<u8> = retry(3, |_| Ok::<_, ()>(7), || pauses += 1);
        assert_eq!(value, Some(7));
        assert_eq!(pauses, 0);
    }

    #[test]
    fn pauses_only_between_attempts() {
        let mut calls = 0;
        let mut pauses = 0;
        let value: Option<u8> = retry(
            3,
            |_| {
                calls += 1;
                Err("timeout")
            },
            || pauses += 1,
        );

        assert_eq!(value, None);
        assert_eq!(calls, 3);
        assert_eq!(pauses, 2);
    }

    #[test]
    fn attempt_numbers_are_zero_based() {
        let mut seen = [usize::MAX; 3];
        let _: Option<()> = retry(
            3,
            |attempt| {
                seen[attempt] = attempt;
                Err(())
            },
            || {},
        );
        assert_eq!(seen, [0, 1, 2]);
    }

    #[test]
    fn zero_attempts_never_calls() {
        let mut calls = 0;
        let value: Option<()> = retry(
            0,
            |_| {
                calls += 1;
                Ok::<_, ()>(())
            },
            || {},
        );
        assert_eq!(value, None);
        assert_eq!(calls, 0);
    }
}
