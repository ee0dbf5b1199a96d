//! Shared fixtures for integration tests
//!
//! - Input pins stuck LOW/HIGH, or failing on every read
//! - A delay that returns immediately and counts what it was asked for
//! - A climate sensor playing back a script of results
//! - A dust sampler returning fixed raw values

#![allow(dead_code)]

use core::convert::Infallible;
use std::collections::VecDeque;

use airsense_core::{
    config::ManagerConfig, hardware::HardwareSource, reading::Climate, reading::RawPm,
    traits::{ClimateSensor, DustSampler},
};
use embedded_hal::{
    delay::DelayNs,
    digital::{Error, ErrorKind, ErrorType, InputPin},
};

/// Pin that always reads the same level
#[derive(Debug, Clone, Copy)]
pub struct StuckPin {
    pub low: bool,
}

impl StuckPin {
    pub fn low() -> Self {
        Self { low: true }
    }

    pub fn high() -> Self {
        Self { low: false }
    }
}

impl ErrorType for StuckPin {
    type Error = Infallible;
}

impl InputPin for StuckPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.low)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.low)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PinFault;

impl Error for PinFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Pin whose every read fails
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingPin;

impl ErrorType for FailingPin {
    type Error = PinFault;
}

impl InputPin for FailingPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Err(PinFault)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Err(PinFault)
    }
}

/// Delay that does not wait
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDelay {
    pub requested_ns: u64,
}

impl DelayNs for NoopDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.requested_ns += u64::from(ns);
    }
}

/// Climate sensor replaying scripted results, then failing
#[derive(Debug, Clone, Default)]
pub struct ScriptedClimate {
    script: VecDeque<Option<Climate>>,
    repeat_last: Option<Climate>,
}

impl ScriptedClimate {
    /// Always returns `climate`
    pub fn steady(temperature: f64, humidity: f64) -> Self {
        Self {
            script: VecDeque::new(),
            repeat_last: Some(Climate::new(temperature, humidity)),
        }
    }

    /// Never succeeds
    pub fn broken() -> Self {
        Self::default()
    }

    /// Plays `script` in order, then fails forever
    pub fn scripted(script: impl IntoIterator<Item = Option<Climate>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            repeat_last: None,
        }
    }
}

impl ClimateSensor for ScriptedClimate {
    type Error = &'static str;

    fn read(&mut self) -> Result<Climate, Self::Error> {
        match self.script.pop_front() {
            Some(Some(climate)) => Ok(climate),
            Some(None) => Err("checksum mismatch"),
            None => self.repeat_last.ok_or("no response"),
        }
    }
}

/// Dust sampler with constant output
#[derive(Debug, Clone, Copy)]
pub struct FixedSampler {
    pub raw: RawPm,
    pub samples: usize,
}

impl FixedSampler {
    pub fn new(pm25: f64, pm10: f64) -> Self {
        Self {
            raw: RawPm::new(pm25, pm10),
            samples: 0,
        }
    }
}

impl DustSampler for FixedSampler {
    fn sample_raw_pm(&mut self) -> RawPm {
        self.samples += 1;
        self.raw
    }

    fn settle(&mut self, _ms: u32) {}
}

pub type StuckSource = HardwareSource<StuckPin, StuckPin, ScriptedClimate, NoopDelay>;

/// Hardware source on stuck pins at the reference climate (25 °C, 50 %RH)
pub fn stuck_source(pm25: StuckPin, pm10: StuckPin, config: &ManagerConfig) -> StuckSource {
    HardwareSource::new(
        pm25,
        pm10,
        ScriptedClimate::steady(25.0, 50.0),
        NoopDelay::default(),
        config,
    )
}
