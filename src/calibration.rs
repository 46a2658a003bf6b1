// StateBeacon — Calibration Controller
//
// Guides the two-snapshot calibration flow: a long press enters calibration
// and captures the current field average as the normal-position sample, a
// short press captures the flipped-position sample, and the closing long
// press derives new flip thresholds from the two z values:
//
//     boundary   = (normal_z + flipped_z) / 2
//     hysteresis = (normal_z - boundary) / 3
//
// If anything about the captures is unusable the previous thresholds stay
// in force.

use crate::events::Vector3;

enum State {
    Idle,
    Calibrating {
        normal_sample: Vector3,
        flipped_sample: Option<Vector3>,
        indicator_lit: bool,
    },
}

pub struct CalibrationController {
    state: State,
}

impl CalibrationController {
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    pub fn is_calibrating(&self) -> bool {
        matches!(self.state, State::Calibrating { .. })
    }

    /// Enter calibration, capturing `avg` as the normal-position sample.
    /// Refused (returns false) when no field sample has arrived yet.
    pub fn enter(&mut self, avg: Option<Vector3>) -> bool {
        let Some(normal_sample) = avg else {
            log::warn!("calibration requested before any field sample, ignoring");
            return false;
        };

        log::info!(
            "calibration started, normal-position sample z={:.1}",
            normal_sample.z
        );
        self.state = State::Calibrating {
            normal_sample,
            flipped_sample: None,
            indicator_lit: false,
        };
        true
    }

    /// Capture (or overwrite) the flipped-position sample.
    pub fn capture_flipped(&mut self, avg: Vector3) {
        match &mut self.state {
            State::Idle => {
                log::debug!("flipped-position capture outside calibration, ignoring");
            }
            State::Calibrating { flipped_sample, .. } => {
                log::info!("flipped-position sample z={:.1}", avg.z);
                *flipped_sample = Some(avg);
            }
        }
    }

    /// Leave calibration.  Returns the new `(boundary, hysteresis)` pair, or
    /// `None` when the captures cannot produce usable thresholds.
    pub fn exit(&mut self) -> Option<(f32, f32)> {
        let state = std::mem::replace(&mut self.state, State::Idle);
        let State::Calibrating {
            normal_sample,
            flipped_sample,
            ..
        } = state
        else {
            return None;
        };

        let Some(flipped_sample) = flipped_sample else {
            log::warn!("calibration ended without a flipped-position sample, keeping previous thresholds");
            return None;
        };

        let boundary = (normal_sample.z + flipped_sample.z) / 2.0;
        let hysteresis = (normal_sample.z - boundary) / 3.0;
        if hysteresis < 0.0 {
            log::warn!(
                "derived hysteresis {hysteresis:.1} is negative, keeping previous thresholds"
            );
            return None;
        }

        log::info!("new boundary value: {boundary:.1}");
        log::info!("new hysteresis value: {hysteresis:.1}");
        Some((boundary, hysteresis))
    }

    /// Advance the 1 Hz calibration blink.  Returns the indicator's new
    /// on/off level, or `None` outside calibration.
    pub fn blink_tick(&mut self) -> Option<bool> {
        match &mut self.state {
            State::Idle => None,
            State::Calibrating { indicator_lit, .. } => {
                *indicator_lit = !*indicator_lit;
                Some(*indicator_lit)
            }
        }
    }
}

impl Default for CalibrationController {
    fn default() -> Self {
        Self::new()
    }
}
