// StateBeacon — Telemetry Encoder
//
// Packs the smoothed battery level, smoothed temperature and the two state
// bits into the fixed-format ASCII beacon payload:
//
//     BBB       battery %, integer, left zero-padded to width 3
//     T.TT…     temperature, 2 decimals, left zero-padded to min. width 4
//     S         one digit: toggle_bit | (upside_down << 1)
//
// The battery/temperature smoothing accumulators live here and are folded
// halfway toward each fresh instantaneous read before formatting.  They are
// independent of the orientation detector's field average.

use crate::config::{BATTERY_FIELD_WIDTH, TEMP_FIELD_MIN_WIDTH};

pub struct TelemetryEncoder {
    battery_avg: f32,
    temp_avg: f32,
}

impl TelemetryEncoder {
    /// Seed both accumulators from one instantaneous read taken at startup.
    pub fn new(initial_battery: f32, initial_temp: f32) -> Self {
        Self {
            battery_avg: initial_battery,
            temp_avg: initial_temp,
        }
    }

    /// Fold fresh instantaneous reads into the accumulators, then encode.
    ///
    /// Smoothing rule is the same ½ step everywhere: `avg = (avg + now) / 2`.
    pub fn update_and_encode(
        &mut self,
        battery_now: f32,
        temp_now: f32,
        toggle_bit: bool,
        upside_down: bool,
    ) -> String {
        self.battery_avg = (self.battery_avg + battery_now) / 2.0;
        self.temp_avg = (self.temp_avg + temp_now) / 2.0;

        let mut payload = format_battery(self.battery_avg);
        payload.push_str(&format_temperature(self.temp_avg));
        payload.push(state_digit(toggle_bit, upside_down));
        payload
    }

    pub fn battery_avg(&self) -> f32 {
        self.battery_avg
    }

    pub fn temp_avg(&self) -> f32 {
        self.temp_avg
    }
}

/// Battery field: rounded half away from zero, left zero-padded to width 3.
fn format_battery(percent: f32) -> String {
    zero_pad(&format!("{:.0}", percent.round()), BATTERY_FIELD_WIDTH)
}

/// Temperature field: 2 decimals, then left zero-padded to a minimum total
/// width of 4.  Wider values (two integer digits, negatives) pass through.
fn format_temperature(celsius: f32) -> String {
    zero_pad(&format!("{celsius:.2}"), TEMP_FIELD_MIN_WIDTH)
}

fn state_digit(toggle_bit: bool, upside_down: bool) -> char {
    let bits = u8::from(toggle_bit) | (u8::from(upside_down) << 1);
    char::from(b'0' + bits)
}

fn zero_pad(s: &str, width: usize) -> String {
    if s.len() >= width {
        return s.to_string();
    }
    let mut padded = "0".repeat(width - s.len());
    padded.push_str(s);
    padded
}

// ---------------------------------------------------------------------------
// Payload decoding (diagnostics & tests)
// ---------------------------------------------------------------------------

/// A beacon payload sliced back into readings, the way receivers do it:
/// battery is the first 3 characters, the state digit is the last one and
/// the temperature is everything in between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodedBeacon {
    pub battery_percent: u32,
    pub temperature_c: f32,
    pub toggle_on: bool,
    pub upside_down: bool,
}

/// Decode a payload string.  Returns `None` on anything a receiver would
/// reject: wrong length, non-numeric fields, state digit outside 0–3.
pub fn decode(payload: &str) -> Option<DecodedBeacon> {
    // 3 battery chars + at least 4 temperature chars + 1 state digit,
    // ASCII throughout (the fields are sliced by byte position).
    if !payload.is_ascii() || payload.len() < BATTERY_FIELD_WIDTH + TEMP_FIELD_MIN_WIDTH + 1 {
        log::warn!("beacon payload malformed: {:?}", payload);
        return None;
    }

    let battery_percent = payload[..BATTERY_FIELD_WIDTH].parse::<u32>().ok()?;
    let temperature_c = payload[BATTERY_FIELD_WIDTH..payload.len() - 1]
        .parse::<f32>()
        .ok()?;
    let state = payload[payload.len() - 1..].parse::<u8>().ok()?;
    if state > 3 {
        log::warn!("beacon state digit out of range: {state}");
        return None;
    }

    Some(DecodedBeacon {
        battery_percent,
        temperature_c,
        toggle_on: state & 0x1 != 0,
        upside_down: state & 0x2 != 0,
    })
}
