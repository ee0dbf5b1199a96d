//! Background polling
//!
//! A hardware `read()` blocks for about a second of pin sampling. Displays
//! and web handlers should not wait on that, so the monitor runs the reads on
//! its own thread and publishes the newest result:
//!
//! ```text
//!   "airsense-monitor" thread              callers
//!   ─────────────────────────              ───────
//!   loop {                                 monitor.latest()
//!     reading = manager.read()   ──────▶     → Option<AirQualitySnapshot>
//!     publish(reading, aqi)
//!     park until interval or stop          monitor.stop()
//!   }                                        → wakes and joins
//! ```

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, PoisonError,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use crate::{
    aqi::{AqiCalculator, AqiCategory},
    constants::time::DEFAULT_POLL_INTERVAL_MS,
    errors::{SensorError, SensorResult},
    manager::SensorManager,
    reading::Reading,
};

/// Reading with its AQI assessment
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AirQualitySnapshot {
    /// The smoothed reading
    pub reading: Reading,
    /// AQI of the reading's PM values
    pub aqi: u32,
    /// Category of `aqi`
    pub category: AqiCategory,
}

impl AirQualitySnapshot {
    /// Assess a reading
    pub fn from_reading(reading: Reading) -> Self {
        let (aqi, category) = AqiCalculator::new().assess(reading.pm25, reading.pm10);
        Self {
            reading,
            aqi,
            category,
        }
    }
}

type Latest = Arc<Mutex<Option<AirQualitySnapshot>>>;

/// Worker thread polling a [`SensorManager`]
pub struct Monitor {
    latest: Latest,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Monitor {
    /// Poll every 10 seconds
    pub fn spawn_default<const N: usize>(manager: Arc<SensorManager<N>>) -> SensorResult<Self> {
        Self::spawn(manager, Duration::from_millis(DEFAULT_POLL_INTERVAL_MS))
    }

    /// Start polling `manager` every `interval`
    ///
    /// The first read happens immediately.
    pub fn spawn<const N: usize>(
        manager: Arc<SensorManager<N>>,
        interval: Duration,
    ) -> SensorResult<Self> {
        let latest: Latest = Arc::new(Mutex::new(None));
        let stop = Arc::new(AtomicBool::new(false));

        let worker_latest = Arc::clone(&latest);
        let worker_stop = Arc::clone(&stop);

        log_info!("starting monitor, interval {:?}", interval);

        let handle = thread::Builder::new()
            .name("airsense-monitor".into())
            .spawn(move || run(&manager, interval, &worker_latest, &worker_stop))
            .map_err(|_e| {
                log_warn!("monitor thread spawn failed: {}", _e);
                SensorError::SpawnFailed
            })?;

        Ok(Self {
            latest,
            stop,
            handle: Some(handle),
        })
    }

    /// Most recent snapshot, `None` before the first read completes
    pub fn latest(&self) -> Option<AirQualitySnapshot> {
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// True until stopped or the worker exits
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Signal the worker, wake it and wait for it to finish
    ///
    /// A read in progress runs to completion first.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Release);

        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            if handle.join().is_err() {
                log_warn!("monitor thread panicked");
            }
            log_info!("monitor stopped");
        }
    }
}

impl Drop for Monitor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run<const N: usize>(
    manager: &SensorManager<N>,
    interval: Duration,
    latest: &Mutex<Option<AirQualitySnapshot>>,
    stop: &AtomicBool,
) {
    while !stop.load(Ordering::Acquire) {
        let snapshot = AirQualitySnapshot::from_reading(manager.read());
        *latest.lock().unwrap_or_else(PoisonError::into_inner) = Some(snapshot);

        // park_timeout can wake spuriously; sleep out the rest of the interval
        let deadline = Instant::now() + interval;
        loop {
            if stop.load(Ordering::Acquire) {
                return;
            }
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            thread::park_timeout(deadline - now);
        }
    }
}
