// StateBeacon — Device & Protocol Configuration

// ---------------------------------------------------------------------------
// Button Timing (milliseconds)
// ---------------------------------------------------------------------------
pub const DEBOUNCE_MS: u64 = 20; // edges closer than this are contact bounce
pub const LONG_PRESS_MS: u64 = 2000; // hold duration that enters/exits calibration

// ---------------------------------------------------------------------------
// Broadcast & Indicator Timing (milliseconds)
// ---------------------------------------------------------------------------
pub const BROADCAST_INTERVAL_MS: u64 = 10_000; // unconditional beacon refresh
pub const BLINK_INTERVAL_MS: u64 = 1000; // calibration indicator square wave

// ---------------------------------------------------------------------------
// Orientation Detection
// ---------------------------------------------------------------------------
// Factory thresholds for the smoothed z-component test.  Replaced at runtime
// by a calibration session; never persisted.
pub const MAG_Z_BOUNDARY_DEFAULT: f32 = 300.0;
pub const MAG_Z_HYSTERESIS_DEFAULT: f32 = 100.0;

/// Field deviation (Euclidean norm, sensor units) above which the indicator
/// light is lit outside calibration.
pub const FIELD_DEVIATION_THRESHOLD: f32 = 50.0;

// ---------------------------------------------------------------------------
// Beacon Payload
// ---------------------------------------------------------------------------
pub const MANUFACTURER_ID: u16 = 0x0590;
pub const BATTERY_FIELD_WIDTH: usize = 3;
pub const TEMP_FIELD_MIN_WIDTH: usize = 4;

/// Added to every raw temperature read before smoothing.  Zero on the host;
/// a real enclosure would carry its measured self-heating offset here.
pub const TEMP_CALIBRATION_OFFSET_C: f32 = 0.0;

// ---------------------------------------------------------------------------
// Simulated Collaborators (host demo binary)
// ---------------------------------------------------------------------------
pub const SENSOR_SAMPLE_INTERVAL_MS: u64 = 100; // ~10 Hz magnetometer feed

// Magnetic field presets the simulator emits, chosen so the factory
// thresholds (300 ± 100) separate them cleanly.
pub const SIM_FIELD_NORMAL: [f32; 3] = [120.0, -80.0, 600.0];
pub const SIM_FIELD_FLIPPED: [f32; 3] = [-110.0, 90.0, -250.0];

pub const SIM_BATTERY_START_PERCENT: f32 = 87.0;
pub const SIM_TEMPERATURE_START_C: f32 = 21.5;

// ---------------------------------------------------------------------------
// Event Queue
// ---------------------------------------------------------------------------
pub const EVENT_QUEUE_DEPTH: usize = 64;
