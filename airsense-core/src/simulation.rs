//! Synthetic Readings
//!
//! ## Purpose
//!
//! Development boards, CI and laptops have no dust sensor. The generator
//! produces readings with the rough shape of a tropical city street so the
//! rest of the pipeline (smoothing, AQI, display) sees realistic data.
//!
//! ## Shape
//!
//! ```text
//! wave      = sin(2π · seconds_of_day / 86400 − π/2)     −1 at midnight, +1 at noon
//! diurnal   = 1 + 0.3 · wave                              0.7 ..= 1.3
//! location  = 0.8 + 0.06 · k,  k ∈ 0..7                   drawn once per generator
//! activity  = U(0.95, 1.05)                               per reading
//!
//! pm25  = base.pm25 · diurnal · location · activity ± U(2)
//! pm10  = base.pm10 · diurnal · location · activity ± U(3)
//! temp  = base.temp + 4 · wave ± U(0.8)
//! rh    = base.rh   − 8 · wave ± U(4)
//! ```
//!
//! ## Clamps
//!
//! ```text
//! pm10 ∈ [0, 400]
//! pm25 ∈ [0, min(300, 1.2 · pm10)]     PM2.5 is a subset of PM10
//! temp ∈ [10, 45] °C
//! rh   ∈ [20, 95] %RH
//! ```

use core::f64::consts::{FRAC_PI_2, TAU};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    config::ManagerConfig,
    constants::{
        simulation::{
            ACTIVITY_NOISE, DIURNAL_AMPLITUDE, HUMIDITY_DIURNAL_SWING_PCT, HUMIDITY_JITTER_PCT,
            HUMIDITY_MAX_PCT, HUMIDITY_MIN_PCT, LOCATION_FACTOR_MIN, LOCATION_FACTOR_STEP,
            LOCATION_FACTOR_STEPS, PM10_JITTER_UG_M3, PM10_MAX_UG_M3, PM25_JITTER_UG_M3,
            PM25_MAX_UG_M3, PM25_TO_PM10_CEILING, TEMP_DIURNAL_SWING_C, TEMP_JITTER_C, TEMP_MAX_C,
            TEMP_MIN_C,
        },
        time::SECONDS_PER_DAY,
    },
    reading::{BaseValues, Climate, RawPm},
    time::{seconds_of_day, Timestamp},
    traits::{Acquisition, ReadingSource, SourceMode},
};

/// Day/night phase in `[-1, 1]`, lowest at midnight
pub fn diurnal_wave(timestamp: Timestamp) -> f64 {
    let phase = TAU * seconds_of_day(timestamp) / SECONDS_PER_DAY - FRAC_PI_2;
    libm::sin(phase)
}

/// Randomized generator anchored to baseline values
#[derive(Debug, Clone)]
pub struct SimulationGenerator {
    baseline: BaseValues,
    location_factor: f64,
    rng: StdRng,
}

impl SimulationGenerator {
    /// Generator seeded from OS entropy
    pub fn new(baseline: BaseValues) -> Self {
        Self::from_rng(baseline, StdRng::from_entropy())
    }

    /// Reproducible generator
    pub fn with_seed(baseline: BaseValues, seed: u64) -> Self {
        Self::from_rng(baseline, StdRng::seed_from_u64(seed))
    }

    fn from_rng(baseline: BaseValues, mut rng: StdRng) -> Self {
        let step = rng.gen_range(0..LOCATION_FACTOR_STEPS);
        Self {
            baseline,
            location_factor: LOCATION_FACTOR_MIN + LOCATION_FACTOR_STEP * f64::from(step),
            rng,
        }
    }

    /// Per-run location multiplier
    pub fn location_factor(&self) -> f64 {
        self.location_factor
    }

    /// Baselines the output is anchored to
    pub fn baseline(&self) -> &BaseValues {
        &self.baseline
    }

    /// One synthetic reading for the given time
    pub fn generate(&mut self, timestamp: Timestamp) -> (RawPm, Climate) {
        let wave = diurnal_wave(timestamp);
        let diurnal = 1.0 + DIURNAL_AMPLITUDE * wave;
        let activity = self
            .rng
            .gen_range(1.0 - ACTIVITY_NOISE..=1.0 + ACTIVITY_NOISE);
        let scale = diurnal * self.location_factor * activity;

        let pm25 = self.baseline.pm25 * scale + self.jitter(PM25_JITTER_UG_M3);
        let pm10 = self.baseline.pm10 * scale + self.jitter(PM10_JITTER_UG_M3);
        let temperature =
            self.baseline.temperature + TEMP_DIURNAL_SWING_C * wave + self.jitter(TEMP_JITTER_C);
        let humidity = self.baseline.humidity - HUMIDITY_DIURNAL_SWING_PCT * wave
            + self.jitter(HUMIDITY_JITTER_PCT);

        let pm10 = clamp_finite(pm10, 0.0, PM10_MAX_UG_M3);
        let pm25_ceiling = PM25_MAX_UG_M3.min(PM25_TO_PM10_CEILING * pm10);
        let pm25 = clamp_finite(pm25, 0.0, pm25_ceiling);

        (
            RawPm::new(pm25, pm10),
            Climate::new(
                clamp_finite(temperature, TEMP_MIN_C, TEMP_MAX_C),
                clamp_finite(humidity, HUMIDITY_MIN_PCT, HUMIDITY_MAX_PCT),
            ),
        )
    }

    fn jitter(&mut self, amplitude: f64) -> f64 {
        self.rng.gen_range(-amplitude..=amplitude)
    }
}

/// Clamp, mapping NaN to the lower bound
fn clamp_finite(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

/// Reading source backed by [`SimulationGenerator`]
#[derive(Debug, Clone)]
pub struct SimulatedSource {
    generator: SimulationGenerator,
}

impl SimulatedSource {
    /// Source built from the manager's baseline and seed
    pub fn new(config: &ManagerConfig) -> Self {
        let generator = match config.seed {
            Some(seed) => SimulationGenerator::with_seed(config.baseline, seed),
            None => SimulationGenerator::new(config.baseline),
        };
        Self { generator }
    }

    /// Wrap an existing generator
    pub fn from_generator(generator: SimulationGenerator) -> Self {
        Self { generator }
    }

    /// The underlying generator
    pub fn generator(&self) -> &SimulationGenerator {
        &self.generator
    }
}

impl ReadingSource for SimulatedSource {
    fn mode(&self) -> SourceMode {
        SourceMode::Simulated
    }

    fn acquire(&mut self, now: Timestamp) -> Acquisition {
        let (pm, climate) = self.generator.generate(now);
        Acquisition::Synthetic { pm, climate }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOON: f64 = 43_200.0;

    #[test]
    fn wave_follows_the_day() {
        assert!((diurnal_wave(0.0) + 1.0).abs() < 1e-12);
        assert!((diurnal_wave(NOON) - 1.0).abs() < 1e-12);
        assert!(diurnal_wave(21_600.0).abs() < 1e-12);
    }

    #[test]
    fn location_factor_is_on_the_grid() {
        for seed in 0..50 {
            let g = SimulationGenerator::with_seed(BaseValues::default(), seed);
            let k = (g.location_factor() - 0.8) / 0.06;
            assert!((k - libm::round(k)).abs() < 1e-9);
            assert!((0.0..=6.0 + 1e-9).contains(&k));
        }
    }

    #[test]
    fn same_seed_same_output() {
        let mut a = SimulationGenerator::with_seed(BaseValues::default(), 11);
        let mut b = SimulationGenerator::with_seed(BaseValues::default(), 11);
        for i in 0..10 {
            let t = 1_700_000_000.0 + f64::from(i) * 60.0;
            assert_eq!(a.generate(t), b.generate(t));
        }
    }

    #[test]
    fn output_within_clamps() {
        let mut g = SimulationGenerator::with_seed(BaseValues::default(), 3);
        for i in 0..500 {
            let (pm, climate) = g.generate(f64::from(i) * 173.0);
            assert!(pm.pm10 >= 0.0 && pm.pm10 <= 400.0);
            assert!(pm.pm25 >= 0.0 && pm.pm25 <= 300.0_f64.min(pm.pm10 * 1.2));
            assert!((10.0..=45.0).contains(&climate.temperature));
            assert!((20.0..=95.0).contains(&climate.humidity));
        }
    }

    #[test]
    fn extreme_baseline_is_clamped() {
        let baseline = BaseValues {
            pm25: 1_000.0,
            pm10: 10.0,
            temperature: 80.0,
            humidity: 0.0,
        };
        let mut g = SimulationGenerator::with_seed(baseline, 5);
        let (pm, climate) = g.generate(NOON);

        assert!(pm.pm25 <= pm.pm10 * 1.2);
        assert_eq!(climate.temperature, 45.0);
        assert_eq!(climate.humidity, 20.0);
    }

    #[test]
    fn afternoon_is_warmer_than_night() {
        let mut g = SimulationGenerator::with_seed(BaseValues::default(), 8);
        let (_, noon) = g.generate(NOON);
        let (_, midnight) = g.generate(0.0);

        // 8 °C diurnal swing dwarfs the ±0.8 °C jitter
        assert!(noon.temperature > midnight.temperature);
        assert!(noon.humidity < midnight.humidity);
    }

    #[test]
    fn source_is_simulated() {
        let mut source = SimulatedSource::new(&ManagerConfig::default().with_seed(1));
        assert_eq!(source.mode(), SourceMode::Simulated);
        assert!(source.dust_sampler().is_none());
        assert!(matches!(source.acquire(NOON), Acquisition::Synthetic { .. }));
    }
}
