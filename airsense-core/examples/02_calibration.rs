//! Calibration Example
//!
//! Calibrates a monitor against a reference instrument, then checks the
//! agreement of later readings.
//!
//! No GPIO is needed: the dust pins are stand-ins that pull LOW a fixed
//! share of the time, the way a real DSM501A does in steady air. On a board,
//! swap them for your HAL's input pins and `StdDelay` stays as is.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_calibration
//! ```

use std::convert::Infallible;

use airsense_core::{
    calibration::FactorUpdate, metrics::AccuracyMetrics, reading::Climate, ClimateSensor,
    HardwareSource, ManagerConfig, SensorManager, SensorResult, StdDelay,
};
use embedded_hal::digital::{ErrorType, InputPin};

/// Pin LOW for `low` out of every `period` polls
struct PulsePin {
    low: u32,
    period: u32,
    tick: u32,
}

impl ErrorType for PulsePin {
    type Error = Infallible;
}

impl InputPin for PulsePin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.is_low().map(|low| !low)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        let low = self.tick % self.period < self.low;
        self.tick = self.tick.wrapping_add(1);
        Ok(low)
    }
}

/// Climate sensor at the compensation reference point
struct StillRoom;

impl ClimateSensor for StillRoom {
    type Error = Infallible;

    fn read(&mut self) -> Result<Climate, Self::Error> {
        Ok(Climate::new(25.0, 50.0))
    }
}

fn main() -> SensorResult<()> {
    println!("=== AirSense Calibration ===\n");

    let config = ManagerConfig::default().with_calibration(3, 200);

    let manager: SensorManager = SensorManager::from_hardware(config, |config| {
        Ok(HardwareSource::new(
            PulsePin { low: 1, period: 10, tick: 0 },
            PulsePin { low: 2, period: 10, tick: 0 },
            StillRoom,
            StdDelay,
            config,
        ))
    });

    // Reference instrument beside the monitor
    let (reference_pm25, reference_pm10) = (31.0, 66.0);

    println!("Calibrating (about 4 s)...");
    let outcome = manager.calibrate(Some(reference_pm25), Some(reference_pm10))?;
    let (avg25, avg10) = outcome.averages();
    println!("  measured PM2.5 {avg25:.1}, PM10 {avg10:.1}");

    for (name, update) in [("PM2.5", outcome.pm25), ("PM10", outcome.pm10)] {
        match update {
            FactorUpdate::Updated { previous, current } => {
                println!("  {name} factor {previous:.3} -> {current:.3}")
            }
            FactorUpdate::Skipped(e) => println!("  {name} factor kept: {e}"),
            FactorUpdate::Unchanged => println!("  {name} factor unchanged"),
        }
    }

    println!("\nValidating against reference...");
    let mut measured = Vec::new();
    for _ in 0..3 {
        let reading = manager.read();
        println!("  PM2.5 {:.1}  PM10 {:.1}", reading.pm25, reading.pm10);
        measured.push(reading.pm25);
    }

    let reference = vec![reference_pm25; measured.len()];
    let metrics = AccuracyMetrics::compare(&measured, &reference)?;
    println!(
        "\nPM2.5 RMSE {:.2} µg/m³, MAE {:.2} µg/m³, bias {:+.1}%",
        metrics.rmse, metrics.mae, metrics.bias_percent
    );

    Ok(())
}
