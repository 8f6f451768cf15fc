//! Synthetic crane telemetry.

use chrono::Utc;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::error::PublishError;

pub const TOTAL_DURATION: &str = "45:22:15";
pub const MIN_LOAD: f64 = 100.0;
pub const MAX_LOAD: f64 = 1000.0;

/// One reading. The seven counter fields always carry the same value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub hoist_up: u64,
    pub hoist_down: u64,
    pub ct_left: u64,
    pub ct_right: u64,
    pub lt_forward: u64,
    pub lt_reverse: u64,
    pub switch: u64,
    pub total_duration: String,
    pub current_load: f64,
    pub is_powered_on: u8,
    pub timestamp: String,
}

impl TelemetryRecord {
    pub fn counter(&self) -> u64 {
        self.switch
    }

    pub fn powered_on(&self) -> bool {
        self.is_powered_on == 1
    }

    pub fn to_payload(&self) -> Result<String, PublishError> {
        Ok(serde_json::to_string(self)?)
    }
}

pub struct TelemetryGenerator<R = StdRng> {
    counter: u64,
    rng: R,
}

impl TelemetryGenerator<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for TelemetryGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> TelemetryGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { counter: 1, rng }
    }

    pub fn starting_at(mut self, counter: u64) -> Self {
        self.counter = counter;
        self
    }

    /// Counter value the next record will carry.
    pub fn peek_counter(&self) -> u64 {
        self.counter
    }

    pub fn next_record(&mut self) -> TelemetryRecord {
        let counter = self.counter;
        self.counter += 1;

        let load: f64 = self.rng.gen_range(MIN_LOAD..=MAX_LOAD);
        // two decimals, clamped so rounding cannot leave the range
        let current_load = ((load * 100.0).round() / 100.0).clamp(MIN_LOAD, MAX_LOAD);

        TelemetryRecord {
            hoist_up: counter,
            hoist_down: counter,
            ct_left: counter,
            ct_right: counter,
            lt_forward: counter,
            lt_reverse: counter,
            switch: counter,
            total_duration: TOTAL_DURATION.to_string(),
            current_load,
            is_powered_on: self.rng.gen_range(0..=1),
            timestamp: iso_timestamp(),
        }
    }
}

fn iso_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}
