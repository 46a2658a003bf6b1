// StateBeacon — Crate Root
//
// Control logic for a battery-powered wearable state beacon: a magnetometer
// watches which way up the node sits, one button toggles a state bit and
// drives calibration, and everything the node knows is packed into a short
// ASCII payload broadcast over the radio seam.

pub mod calibration;
pub mod config;
pub mod controller;
pub mod drivers;
pub mod events;
pub mod input;
pub mod orientation;
pub mod tasks;
pub mod telemetry;
