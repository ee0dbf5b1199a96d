//! Simulated Monitor Example
//!
//! Runs the full reading pipeline on synthetic data in a background thread
//! and prints the latest snapshot a few times, then summarizes the run.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_simulated_monitor
//! ```

use std::{sync::Arc, thread, time::Duration};

use airsense_core::{
    summary::CollectionSummary, ManagerConfig, Monitor, SensorManager, SensorResult,
};

fn main() -> SensorResult<()> {
    println!("=== AirSense Simulated Monitor ===\n");

    let manager: Arc<SensorManager> = Arc::new(SensorManager::simulated(ManagerConfig::default()));
    println!("Mode: {:?}\n", manager.mode());

    let monitor = Monitor::spawn(Arc::clone(&manager), Duration::from_millis(200))?;

    let mut readings = Vec::new();
    for _ in 0..5 {
        thread::sleep(Duration::from_millis(250));

        if let Some(snapshot) = monitor.latest() {
            let r = snapshot.reading;
            println!(
                "PM2.5 {:6.1}  PM10 {:6.1} µg/m³  {:4.1} °C  {:4.1} %RH  AQI {:3} ({})",
                r.pm25,
                r.pm10,
                r.temperature,
                r.humidity,
                snapshot.aqi,
                snapshot.category.label()
            );
            readings.push(r);
        }
    }

    monitor.stop();

    let summary = CollectionSummary::from_readings(&readings)?;
    println!("\nSummary over {} readings:", summary.count);
    println!("  PM2.5 {:.1} µg/m³, PM10 {:.1} µg/m³", summary.pm25, summary.pm10);
    println!("  AQI {} ({})", summary.aqi, summary.category.label());
    println!("  History: {:?}", manager.status());

    Ok(())
}
