//! Integration tests for the reading pipeline
//!
//! Exercises the manager end to end: simulated and hardware sources, climate
//! fallback, calibration, mode downgrade and the background monitor.

#![cfg(feature = "std")]

mod common;

use std::{
    sync::Arc,
    thread,
    time::{Duration, Instant},
};

use airsense_core::{
    calibration::FactorUpdate,
    config::{HardwareConfig, ManagerConfig},
    hardware::HardwareSource,
    manager::SensorManager,
    monitor::Monitor,
    reading::Climate,
    summary::CollectionSummary,
    time::FixedClock,
    traits::SourceMode,
    AqiCategory, SensorError, SensorResult,
};

use common::{stuck_source, FailingPin, NoopDelay, ScriptedClimate, StuckPin, StuckSource};

fn fast_config() -> ManagerConfig {
    ManagerConfig::default()
        .with_seed(42)
        .with_hardware(HardwareConfig::default().with_sampling(50, 10))
        .with_calibration(5, 0)
}

fn stuck_manager(pm25: StuckPin, pm10: StuckPin) -> SensorManager {
    let config = fast_config();
    SensorManager::from_hardware(config, |config| -> SensorResult<_> {
        Ok(stuck_source(pm25, pm10, config))
    })
}

#[test]
fn simulated_reads_are_well_formed() {
    let manager: SensorManager = SensorManager::simulated(ManagerConfig::default());

    for _ in 0..20 {
        let reading = manager.read();
        assert_eq!(reading.quality_score, 0.85);
        assert!(reading.is_finite(), "non-finite reading {reading:?}");
        assert!(reading.pm25 >= 0.0 && reading.pm25 <= reading.pm10 * 1.2);
    }
}

#[test]
fn simulated_runs_are_reproducible_with_seed() {
    let a: SensorManager = SensorManager::simulated(ManagerConfig::default().with_seed(7))
        .with_clock(FixedClock::new(1_700_000_000.0));
    let b: SensorManager = SensorManager::simulated(ManagerConfig::default().with_seed(7))
        .with_clock(FixedClock::new(1_700_000_000.0));

    for _ in 0..5 {
        assert_eq!(a.read(), b.read());
    }
}

#[test]
fn fully_dusty_sensor_saturates_estimate() {
    let manager = stuck_manager(StuckPin::low(), StuckPin::low());
    assert_eq!(manager.mode(), SourceMode::Hardware);

    let reading = manager.read();
    // duty 100 %: pm25 = 100 + 15, pm10 = max(1.5 × 115, 120 + 35)
    assert_eq!(reading.pm25, 115.0);
    assert_eq!(reading.pm10, 172.5);
    assert_eq!(reading.temperature, 25.0);
    assert_eq!(reading.humidity, 50.0);
}

#[test]
fn clean_air_reads_floor_values() {
    let manager = stuck_manager(StuckPin::high(), StuckPin::high());

    let reading = manager.read();
    assert_eq!(reading.pm25, 15.0);
    assert_eq!(reading.pm10, 35.0);
    assert_eq!(reading.aqi(), 57);
}

#[test]
fn hardware_quality_scores_after_five_reads() {
    let manager = stuck_manager(StuckPin::high(), StuckPin::high());

    for _ in 0..4 {
        assert_eq!(manager.read().quality_score, 0.5);
    }

    // Steady 15/35: consistency 1.0, ratio 2.33 → validity 0.444 → floor 0.5
    let score = manager.read().quality_score;
    assert!((score - (1.0 + 0.5) / 2.0 * 0.98).abs() < 1e-12);
}

#[test]
fn failing_pins_fall_back_to_random_duty() {
    let config = fast_config();
    let manager: SensorManager = SensorManager::from_hardware(config, |config| -> SensorResult<_> {
        Ok(HardwareSource::new(
            FailingPin,
            FailingPin,
            ScriptedClimate::steady(25.0, 50.0),
            NoopDelay::default(),
            config,
        ))
    });

    for _ in 0..10 {
        let reading = manager.read();
        assert!(reading.is_finite());
        // duty in [10 %, 30 %] → pm25 in [25, 45]
        assert!(reading.pm25 >= 25.0 && reading.pm25 <= 45.0);
    }
}

#[test]
fn broken_climate_sensor_uses_baseline_without_compensation() {
    let config = fast_config();
    let manager: SensorManager = SensorManager::from_hardware(config, |config| -> SensorResult<_> {
        Ok(HardwareSource::new(
            StuckPin::low(),
            StuckPin::low(),
            ScriptedClimate::broken(),
            NoopDelay::default(),
            config,
        ))
    });

    let reading = manager.read();
    assert!((reading.temperature - 28.0).abs() <= 1.0);
    assert!((reading.humidity - 65.0).abs() <= 3.0);
    // Fallback climate is not used for compensation
    assert_eq!(reading.pm25, 115.0);
}

#[test]
fn climate_recovers_within_retry_budget() {
    let config = fast_config();
    let climate = ScriptedClimate::scripted([None, None, Some(Climate::new(35.0, 50.0))]);
    let manager: SensorManager = SensorManager::from_hardware(config, |config| -> SensorResult<_> {
        Ok(HardwareSource::new(
            StuckPin::high(),
            StuckPin::high(),
            climate,
            NoopDelay::default(),
            config,
        ))
    });

    let reading = manager.read();
    assert_eq!(reading.temperature, 35.0);
    // 35 °C compensates by ×1.2
    assert!((reading.pm25 - 18.0).abs() < 1e-9);
}

#[test]
fn calibration_scales_later_readings() {
    let manager = stuck_manager(StuckPin::high(), StuckPin::high());

    let outcome = manager.calibrate(Some(30.0), Some(70.0)).unwrap();
    assert_eq!(outcome.averages(), (15.0, 35.0));
    assert_eq!(outcome.pm25, FactorUpdate::Updated { previous: 1.0, current: 2.0 });
    assert_eq!(outcome.pm10, FactorUpdate::Updated { previous: 1.0, current: 2.0 });

    let reading = manager.read();
    assert_eq!(reading.pm25, 30.0);
    assert_eq!(reading.pm10, 70.0);
}

#[test]
fn calibration_rejects_unusable_reference() {
    let manager = stuck_manager(StuckPin::high(), StuckPin::high());

    let outcome = manager.calibrate(Some(-3.0), None).unwrap();
    assert_eq!(
        outcome.pm25,
        FactorUpdate::Skipped(SensorError::InvalidReference { value: -3.0 })
    );
    assert_eq!(outcome.pm10, FactorUpdate::Unchanged);
    assert_eq!(manager.factors().pm25_factor, 1.0);
}

#[test]
fn init_failure_downgrades_to_simulation() {
    let manager: SensorManager =
        SensorManager::from_hardware(fast_config(), |_| -> SensorResult<StuckSource> {
            Err(SensorError::HardwareUnavailable { reason: "gpio chip missing" })
        });

    assert_eq!(manager.mode(), SourceMode::Simulated);
    assert_eq!(manager.read().quality_score, 0.85);
    assert_eq!(
        manager.calibrate(Some(30.0), Some(70.0)),
        Err(SensorError::CalibrationUnavailable)
    );
}

#[test]
fn history_never_exceeds_capacity() {
    let manager: SensorManager<3> = SensorManager::simulated(ManagerConfig::default());
    for _ in 0..10 {
        manager.read();
    }

    let status = manager.status();
    assert_eq!(status.history_len, 3);
    assert_eq!(status.capacity, 3);
}

#[test]
fn concurrent_reads_share_history() {
    let manager: Arc<SensorManager> =
        Arc::new(SensorManager::simulated(ManagerConfig::default().with_seed(1)));

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || {
                for _ in 0..5 {
                    assert!(manager.read().is_finite());
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(manager.status().history_len, 10);
}

#[test]
fn summary_of_a_collection_run() {
    let manager = stuck_manager(StuckPin::high(), StuckPin::high());
    let readings: Vec<_> = (0..6).map(|_| manager.read()).collect();

    let summary = CollectionSummary::from_readings(&readings).unwrap();
    assert_eq!(summary.count, 6);
    assert_eq!(summary.pm25, 15.0);
    assert_eq!(summary.category, AqiCategory::Moderate);
}

#[test]
fn monitor_publishes_and_stops() {
    let manager: Arc<SensorManager> =
        Arc::new(SensorManager::simulated(ManagerConfig::default().with_seed(3)));
    let monitor = Monitor::spawn(Arc::clone(&manager), Duration::from_millis(5)).unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    let snapshot = loop {
        if let Some(snapshot) = monitor.latest() {
            break snapshot;
        }
        assert!(Instant::now() < deadline, "monitor never published");
        thread::sleep(Duration::from_millis(5));
    };

    assert_eq!(snapshot.reading.quality_score, 0.85);
    assert_eq!(snapshot.aqi, snapshot.reading.aqi());

    monitor.stop();
    assert_eq!(Arc::strong_count(&manager), 1);
}
