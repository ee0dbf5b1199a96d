//! Sensor Manager
//!
//! ## Pipeline
//!
//! ```text
//!            ┌────────────── source lock ──────────────┐
//!  read() ──▶│ ReadingSource::acquire(now)             │
//!            └──────────────────┬──────────────────────┘
//!                               ▼
//!            ┌────────────── state lock ───────────────┐
//!            │ Measured:  × calibration factors        │
//!            │            → EnvironmentalCompensator   │
//!            │ Synthetic: as generated                 │
//!            │ → SmoothingWindow::push (4 quantities)  │
//!            │ → SmoothingWindow::average              │
//!            │ → QualityScorer (0.85 for synthetic)    │
//!            └──────────────────┬──────────────────────┘
//!                               ▼
//!                            Reading
//! ```
//!
//! ## Locking
//!
//! Two mutexes: the source (pins, RNG) and the shared state (history plus
//! calibration factors). Every path takes the source first, then the state,
//! so concurrent `read()` and `calibrate()` calls cannot deadlock. A poisoned
//! lock is recovered, since the guarded data is always left consistent.
//!
//! ## Mode
//!
//! Hardware or simulation is fixed at construction. A failed hardware init
//! downgrades to simulation for the rest of the process and is only logged;
//! the caller still gets a working manager.
//!
//! ```rust
//! use airsense_core::{config::ManagerConfig, manager::SensorManager};
//!
//! let manager: SensorManager = SensorManager::simulated(ManagerConfig::default().with_seed(1));
//! let reading = manager.read();
//!
//! assert_eq!(reading.quality_score, 0.85);
//! assert!(manager.calibrate(Some(30.0), None).is_err());
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{
    aqi::{calculate_aqi, AqiCalculator, AqiCategory},
    calibration::{CalibrationFactors, CalibrationOutcome, Calibrator},
    compensation::EnvironmentalCompensator,
    config::ManagerConfig,
    constants::{quality::SIMULATED_QUALITY, sensors::DEFAULT_HISTORY_CAPACITY},
    errors::{SensorError, SensorResult},
    quality::QualityScorer,
    reading::{Climate, Quantity, RawPm, Reading},
    simulation::SimulatedSource,
    smoothing::SmoothingWindow,
    time::{SystemClock, TimeSource},
    traits::{Acquisition, ReadingSource, SourceMode},
};

/// History and factors, guarded together
struct SharedState<const N: usize> {
    window: SmoothingWindow<N>,
    factors: CalibrationFactors,
}

/// Health and configuration snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorStatus {
    /// Hardware or simulation
    pub mode: SourceMode,
    /// Samples currently in the PM2.5 history
    pub history_len: usize,
    /// History capacity per quantity
    pub capacity: usize,
    /// Calibration factors in effect
    pub factors: CalibrationFactors,
}

/// Orchestrates acquisition, correction, smoothing and scoring
pub struct SensorManager<const N: usize = DEFAULT_HISTORY_CAPACITY> {
    state: Mutex<SharedState<N>>,
    source: Mutex<Box<dyn ReadingSource>>,
    mode: SourceMode,
    compensator: EnvironmentalCompensator,
    scorer: QualityScorer,
    calibrator: Calibrator,
    clock: Box<dyn TimeSource + Send + Sync>,
}

impl<const N: usize> SensorManager<N> {
    /// Manager on synthetic data
    pub fn simulated(config: ManagerConfig) -> Self {
        Self::with_source(Box::new(SimulatedSource::new(&config)), &config)
    }

    /// Manager on hardware, or on simulation if `init` fails
    ///
    /// `init` opens the pins and sensors. Its error is logged, never
    /// returned.
    pub fn from_hardware<S, F>(config: ManagerConfig, init: F) -> Self
    where
        S: ReadingSource + 'static,
        F: FnOnce(&ManagerConfig) -> SensorResult<S>,
    {
        match init(&config) {
            Ok(source) => Self::with_source(Box::new(source), &config),
            Err(_e) => {
                log_warn!("hardware init failed ({}), falling back to simulation", _e);
                Self::simulated(config)
            }
        }
    }

    /// Manager on any source
    pub fn with_source(source: Box<dyn ReadingSource>, config: &ManagerConfig) -> Self {
        let mode = source.mode();
        log_info!("sensor manager running in {:?} mode", mode);

        Self {
            state: Mutex::new(SharedState {
                window: SmoothingWindow::new(config.baseline),
                factors: CalibrationFactors::default(),
            }),
            source: Mutex::new(source),
            mode,
            compensator: EnvironmentalCompensator::default(),
            scorer: QualityScorer::new(),
            calibrator: Calibrator::new(config.calibration_samples, config.calibration_spacing_ms),
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the clock used for timestamps and the diurnal cycle
    pub fn with_clock<T>(mut self, clock: T) -> Self
    where
        T: TimeSource + Send + Sync + 'static,
    {
        self.clock = Box::new(clock);
        self
    }

    /// Replace the environmental compensator
    pub fn with_compensator(mut self, compensator: EnvironmentalCompensator) -> Self {
        self.compensator = compensator;
        self
    }

    /// Take, correct and smooth one reading
    ///
    /// Blocks for the sampling windows in hardware mode. Always returns a
    /// reading with finite fields.
    pub fn read(&self) -> Reading {
        let now = self.clock.now();

        let mut source = self.lock_source();
        let acquisition = source.acquire(now);

        let mut state = self.lock_state();
        let (pm, climate) = match acquisition {
            Acquisition::Measured {
                pm,
                climate,
                climate_measured,
            } => (self.correct(pm, climate, climate_measured, &state.factors), climate),
            Acquisition::Synthetic { pm, climate } => (pm, climate),
        };
        drop(source);

        let samples = [
            (Quantity::Pm25, pm.pm25),
            (Quantity::Pm10, pm.pm10),
            (Quantity::Temperature, climate.temperature),
            (Quantity::Humidity, climate.humidity),
        ];
        for (quantity, value) in samples {
            if let Err(_e) = state.window.push(quantity, value) {
                log_warn!("dropped {:?} sample {}: {}", quantity, value, _e);
            }
        }

        let quality_score = match self.mode {
            SourceMode::Simulated => SIMULATED_QUALITY,
            SourceMode::Hardware => self.scorer.score(&state.window),
        };

        Reading {
            pm25: state.window.average(Quantity::Pm25),
            pm10: state.window.average(Quantity::Pm10),
            temperature: state.window.average(Quantity::Temperature),
            humidity: state.window.average(Quantity::Humidity),
            timestamp: now,
            quality_score,
        }
    }

    /// Calibrated then climate-compensated PM
    fn correct(
        &self,
        raw: RawPm,
        climate: Climate,
        climate_measured: bool,
        factors: &CalibrationFactors,
    ) -> RawPm {
        let calibrated = factors.apply(raw);

        // Fallback climate is an estimate; do not compensate against it
        let (temperature, humidity) = if climate_measured {
            (Some(climate.temperature), Some(climate.humidity))
        } else {
            (None, None)
        };

        let (pm25, pm10) =
            self.compensator
                .compensate(calibrated.pm25, calibrated.pm10, temperature, humidity);
        RawPm::new(pm25, pm10)
    }

    /// AQI for two concentrations
    pub fn calculate_aqi(&self, pm25: f64, pm10: f64) -> u32 {
        calculate_aqi(pm25, pm10)
    }

    /// AQI and category for a reading
    pub fn assess(&self, reading: &Reading) -> (u32, AqiCategory) {
        AqiCalculator::new().assess(reading.pm25, reading.pm10)
    }

    /// Calibrate against reference concentrations
    ///
    /// Slow: takes the configured number of raw samples with a pause
    /// between each (about 5 s with defaults, plus sampling windows).
    /// Only available in hardware mode.
    pub fn calibrate(
        &self,
        reference_pm25: Option<f64>,
        reference_pm10: Option<f64>,
    ) -> SensorResult<CalibrationOutcome> {
        if !self.mode.is_hardware() {
            log_warn!("calibration requested in simulation mode");
            return Err(SensorError::CalibrationUnavailable);
        }

        let mut source = self.lock_source();
        let sampler = source
            .dust_sampler()
            .ok_or(SensorError::CalibrationUnavailable)?;
        let measured = self.calibrator.measure(sampler);

        let mut state = self.lock_state();
        Ok(self
            .calibrator
            .apply(measured, &mut state.factors, reference_pm25, reference_pm10))
    }

    /// Hardware or simulation, fixed at construction
    pub fn mode(&self) -> SourceMode {
        self.mode
    }

    /// Calibration factors in effect
    pub fn factors(&self) -> CalibrationFactors {
        self.lock_state().factors
    }

    /// Current status
    pub fn status(&self) -> SensorStatus {
        let state = self.lock_state();
        SensorStatus {
            mode: self.mode,
            history_len: state.window.len(Quantity::Pm25),
            capacity: state.window.capacity(),
            factors: state.factors,
        }
    }

    /// Drop all history, keeping calibration
    pub fn reset_history(&self) {
        self.lock_state().window.clear();
    }

    fn lock_source(&self) -> MutexGuard<'_, Box<dyn ReadingSource>> {
        self.source.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_state(&self) -> MutexGuard<'_, SharedState<N>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
