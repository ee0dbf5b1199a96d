//! Hardware Reading Source
//!
//! ## Sensors
//!
//! - **Dust** (DSM501A-class): two open-collector outputs that pull LOW while
//!   particles are in the beam. The fraction of time LOW ("duty") grows with
//!   particle density.
//! - **Climate** (DHT22-class): a one-wire temperature/humidity sensor that
//!   fails a read every so often on checksum or timing.
//!
//! ## Duty sampling
//!
//! ```text
//!   pin  ──┐   ┌──────┐ ┌──────────┐     ┌───
//!          └───┘      └─┘          └─────┘
//!   poll   ↑  ↑  ↑  ↑  ↑  ↑  ↑  ↑  ↑  ↑  ↑  ↑     every poll_interval_ms
//!          L  L  H  H  L  H  H  H  L  L  H  H     duty = lows / polls
//! ```
//!
//! Polling is blocking by nature (about 0.5 s per channel), so a hardware
//! `read()` takes about a second. Keep it off latency-sensitive threads; see
//! [`Monitor`](crate::monitor::Monitor).
//!
//! A pin that errors mid-window yields a random duty in `[0.1, 0.3]` rather
//! than an error, so one glitch does not stall the reading loop.
//!
//! ## Raw estimate
//!
//! ```text
//! pm25 = max(8,          p25 + 15)
//! pm10 = max(1.5 × pm25, 1.2 × p10 + 35)       p = duty percent
//! ```
//!
//! ## Pins and delays
//!
//! Pins are any `embedded_hal::digital::InputPin` and the delay any
//! `embedded_hal::delay::DelayNs`, so rppal, linux-embedded-hal and
//! esp-idf-hal all plug in. [`StdDelay`] covers hosted targets.

use embedded_hal::{delay::DelayNs, digital::InputPin};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    config::{HardwareConfig, ManagerConfig},
    constants::sensors::{
        DUTY_FALLBACK_MAX, DUTY_FALLBACK_MIN, HUMIDITY_FALLBACK_JITTER_PCT, PM10_GAIN_UG_M3_PER_PCT,
        PM10_MIN_RATIO, PM10_OFFSET_UG_M3, PM25_FLOOR_UG_M3, PM25_GAIN_UG_M3_PER_PCT,
        PM25_OFFSET_UG_M3, TEMP_FALLBACK_JITTER_C,
    },
    errors::{SensorError, SensorResult},
    reading::{BaseValues, Climate, RawPm},
    retry::retry,
    time::Timestamp,
    traits::{Acquisition, ClimateSensor, DustSampler, ReadingSource, SourceMode},
};

/// Fraction of a sampling window a dust pin spent LOW
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct DutyCycle(f64);

impl DutyCycle {
    /// Duty from a fraction, clamped to `[0, 1]`; NaN becomes 0
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction.is_nan() {
            return Self(0.0);
        }
        Self(fraction.clamp(0.0, 1.0))
    }

    /// Fraction in `[0, 1]`
    pub fn fraction(&self) -> f64 {
        self.0
    }

    /// Pulse ratio in `[0, 100]`
    pub fn percent(&self) -> f64 {
        self.0 * 100.0
    }
}

/// Measure the LOW fraction of `pin` over `polls` polls
///
/// Waits `poll_interval_ms` after each poll. The first read error aborts the
/// window with [`SensorError::PinReadFailed`].
pub fn try_sample_duty<P, D>(
    pin: &mut P,
    pin_number: u8,
    polls: u32,
    poll_interval_ms: u32,
    delay: &mut D,
) -> SensorResult<DutyCycle>
where
    P: InputPin,
    D: DelayNs,
{
    let polls = polls.max(1);
    let mut low = 0u32;

    for _ in 0..polls {
        if pin
            .is_low()
            .map_err(|_| SensorError::PinReadFailed { pin: pin_number })?
        {
            low += 1;
        }
        delay.delay_ms(poll_interval_ms);
    }

    Ok(DutyCycle::from_fraction(low as f64 / polls as f64))
}

/// [`try_sample_duty`], with a random duty in `[0.1, 0.3]` from `rng` when
/// the pin fails
pub fn sample_duty<P, D, R>(
    pin: &mut P,
    pin_number: u8,
    polls: u32,
    poll_interval_ms: u32,
    delay: &mut D,
    rng: &mut R,
) -> DutyCycle
where
    P: InputPin,
    D: DelayNs,
    R: Rng,
{
    try_sample_duty(pin, pin_number, polls, poll_interval_ms, delay).unwrap_or_else(|_e| {
        let fallback = rng.gen_range(DUTY_FALLBACK_MIN..=DUTY_FALLBACK_MAX);
        log_warn!("{}, using duty {:.3}", _e, fallback);
        DutyCycle::from_fraction(fallback)
    })
}

/// Raw PM estimate from the two channel duties
pub fn dust_to_concentration(pm25_duty: DutyCycle, pm10_duty: DutyCycle) -> RawPm {
    let pm25 = (PM25_GAIN_UG_M3_PER_PCT * pm25_duty.percent() + PM25_OFFSET_UG_M3)
        .max(PM25_FLOOR_UG_M3);
    let pm10 = (PM10_GAIN_UG_M3_PER_PCT * pm10_duty.percent() + PM10_OFFSET_UG_M3)
        .max(pm25 * PM10_MIN_RATIO);
    RawPm::new(pm25, pm10)
}

/// `DelayNs` backed by `std::thread::sleep`
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}

/// Readings from a dust sensor on two pins plus a climate sensor
pub struct HardwareSource<P25, P10, C, D> {
    pm25_pin: P25,
    pm10_pin: P10,
    climate: C,
    delay: D,
    config: HardwareConfig,
    baseline: BaseValues,
    rng: StdRng,
}

impl<P25, P10, C, D> HardwareSource<P25, P10, C, D>
where
    P25: InputPin,
    P10: InputPin,
    C: ClimateSensor,
    D: DelayNs,
{
    /// Wrap initialized peripherals
    pub fn new(pm25_pin: P25, pm10_pin: P10, climate: C, delay: D, config: &ManagerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            pm25_pin,
            pm10_pin,
            climate,
            delay,
            config: config.hardware,
            baseline: config.baseline,
            rng,
        }
    }

    /// Wiring and timing in use
    pub fn config(&self) -> &HardwareConfig {
        &self.config
    }

    /// Duty of both channels, PM2.5 first. Blocks for two windows.
    pub fn sample_duties(&mut self) -> (DutyCycle, DutyCycle) {
        let polls = self.config.polls_per_window();
        let poll_ms = self.config.poll_interval_ms;

        let pm25 = sample_duty(
            &mut self.pm25_pin,
            self.config.pm25_pin,
            polls,
            poll_ms,
            &mut self.delay,
            &mut self.rng,
        );
        let pm10 = sample_duty(
            &mut self.pm10_pin,
            self.config.pm10_pin,
            polls,
            poll_ms,
            &mut self.delay,
            &mut self.rng,
        );

        (pm25, pm10)
    }

    /// Climate with bounded retries
    ///
    /// Non-finite values count as a failed attempt. Exhausting every attempt
    /// gives [`SensorError::ClimateReadFailed`].
    pub fn try_read_climate(&mut self) -> SensorResult<Climate> {
        let sensor = &mut self.climate;
        let delay = &mut self.delay;
        let pause_ms = self.config.climate_retry_delay_ms;
        let attempts = self.config.climate_attempts;

        retry(
            attempts,
            |_| match sensor.read() {
                Ok(c) if c.temperature.is_finite() && c.humidity.is_finite() => Ok(c),
                Ok(_) => Err(ClimateFault::NotFinite),
                Err(e) => Err(ClimateFault::Driver(e)),
            },
            || delay.delay_ms(pause_ms),
        )
        .ok_or(SensorError::ClimateReadFailed { attempts })
    }

    /// [`try_read_climate`](Self::try_read_climate) without the reason
    pub fn read_climate(&mut self) -> Option<Climate> {
        self.try_read_climate().ok()
    }

    fn fallback_climate(&mut self) -> Climate {
        let t = TEMP_FALLBACK_JITTER_C;
        let h = HUMIDITY_FALLBACK_JITTER_PCT;
        Climate::new(
            self.baseline.temperature + self.rng.gen_range(-t..=t),
            self.baseline.humidity + self.rng.gen_range(-h..=h),
        )
    }
}

#[derive(Debug)]
enum ClimateFault<E> {
    Driver(E),
    NotFinite,
}

impl<P25, P10, C, D> ReadingSource for HardwareSource<P25, P10, C, D>
where
    P25: InputPin + Send,
    P10: InputPin + Send,
    C: ClimateSensor + Send,
    D: DelayNs + Send,
{
    fn mode(&self) -> SourceMode {
        SourceMode::Hardware
    }

    fn acquire(&mut self, _now: Timestamp) -> Acquisition {
        let pm = self.sample_raw_pm();

        let (climate, climate_measured) = match self.try_read_climate() {
            Ok(climate) => (climate, true),
            Err(_e) => {
                let estimate = self.fallback_climate();
                log_warn!(
                    "{}, substituting {:.1} C / {:.1} %RH",
                    _e,
                    estimate.temperature,
                    estimate.humidity
                );
                (estimate, false)
            }
        };

        Acquisition::Measured {
            pm,
            climate,
            climate_measured,
        }
    }

    fn dust_sampler(&mut self) -> Option<&mut dyn DustSampler> {
        Some(self)
    }
}

impl<P25, P10, C, D> DustSampler for HardwareSource<P25, P10, C, D>
where
    P25: InputPin,
    P10: InputPin,
    C: ClimateSensor,
    D: DelayNs,
{
    fn sample_raw_pm(&mut self) -> RawPm {
        let (pm25, pm10) = self.sample_duties();
        dust_to_concentration(pm25, pm10)
    }

    fn settle(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
