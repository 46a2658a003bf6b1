// StateBeacon — Simulated Sensors
//
// Deterministic stand-ins for the magnetometer and the housekeeping sensors
// so the binary can run on a desk.  The field source follows a shared
// "flipped" flag (the scenario task owns it) and adds a small wobble so the
// running average has something to smooth.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::*;
use crate::drivers::SensorReader;
use crate::events::Vector3;

pub struct FieldSource {
    flipped: Arc<AtomicBool>,
    tick: u32,
}

impl FieldSource {
    pub fn new(flipped: Arc<AtomicBool>) -> Self {
        Self { flipped, tick: 0 }
    }

    /// Next field sample: the base vector for the current position plus a
    /// few unit-scale wobble terms.
    pub fn next_sample(&mut self) -> Vector3 {
        self.tick = self.tick.wrapping_add(1);
        let base = Vector3::from(if self.flipped.load(Ordering::Relaxed) {
            SIM_FIELD_FLIPPED
        } else {
            SIM_FIELD_NORMAL
        });

        let t = self.tick as f32;
        Vector3::new(
            base.x + (t * 0.61).sin() * 6.0,
            base.y + (t * 0.47).cos() * 6.0,
            base.z + (t * 0.83).sin() * 8.0,
        )
    }
}

pub struct SimulatedSensors {
    battery: f32,
    tick: u32,
}

impl SimulatedSensors {
    pub fn new() -> Self {
        Self {
            battery: SIM_BATTERY_START_PERCENT,
            tick: 0,
        }
    }
}

impl Default for SimulatedSensors {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorReader for SimulatedSensors {
    fn battery_percent(&mut self) -> f32 {
        // Reads happen at broadcast cadence; drain a visible step per read.
        self.battery = (self.battery - 0.05).max(0.0);
        self.battery
    }

    fn temperature_c(&mut self) -> f32 {
        self.tick = self.tick.wrapping_add(1);
        SIM_TEMPERATURE_START_C + (self.tick as f32 * 0.35).sin() * 0.4
    }
}
