// StateBeacon — Orientation Detector
//
// Keeps a running average of the 3-axis magnetic field and derives the
// wearer's orientation from the smoothed z component.  A hysteresis band
// around the boundary keeps the orientation from chattering when the field
// hovers near the threshold.

use crate::config::{MAG_Z_BOUNDARY_DEFAULT, MAG_Z_HYSTERESIS_DEFAULT};
use crate::events::Vector3;

/// What one field sample did to the detector state.
pub struct SampleReport {
    /// Magnitude of the sample's offset from the average it was folded into.
    pub deviation: f32,
    /// `Some(new_value)` when the smoothed z crossed a flip threshold.
    pub orientation_change: Option<bool>,
}

pub struct OrientationDetector {
    avg: Option<Vector3>,
    upside_down: bool,
    boundary: f32,
    hysteresis: f32,
}

impl OrientationDetector {
    pub fn new() -> Self {
        Self {
            avg: None,
            upside_down: false,
            boundary: MAG_Z_BOUNDARY_DEFAULT,
            hysteresis: MAG_Z_HYSTERESIS_DEFAULT,
        }
    }

    /// Fold one sample into the running average.  The first sample seeds the
    /// average directly; later ones move it halfway toward the sample.
    fn smooth(&mut self, sample: Vector3) -> Vector3 {
        let updated = match self.avg {
            None => sample,
            Some(avg) => Vector3::new(
                avg.x + (sample.x - avg.x) / 2.0,
                avg.y + (sample.y - avg.y) / 2.0,
                avg.z + (sample.z - avg.z) / 2.0,
            ),
        };
        self.avg = Some(updated);
        updated
    }

    /// Normal-mode sample handling: measure the sample's deviation from the
    /// average, fold it in, and run the flip decision against the smoothed z.
    pub fn on_sample(&mut self, sample: Vector3) -> SampleReport {
        let deviation = match self.avg {
            None => 0.0,
            Some(avg) => (sample - avg).norm(),
        };
        let avg = self.smooth(sample);

        let orientation_change = self.apply_flip_rule(avg.z);
        log::trace!(
            "field sample z={:.1} avg_z={:.1} deviation={:.1}",
            sample.z,
            avg.z,
            deviation
        );

        SampleReport {
            deviation,
            orientation_change,
        }
    }

    /// Calibration-mode sample handling: the average keeps tracking the
    /// field, but no flips and no deviation reporting.
    pub fn track(&mut self, sample: Vector3) {
        self.smooth(sample);
    }

    fn apply_flip_rule(&mut self, avg_z: f32) -> Option<bool> {
        if !self.upside_down && avg_z < self.boundary - self.hysteresis {
            self.upside_down = true;
            log::info!("smoothed z {avg_z:.1} dropped below flip threshold, now upside down");
            Some(true)
        } else if self.upside_down && avg_z >= self.boundary + self.hysteresis {
            self.upside_down = false;
            log::info!("smoothed z {avg_z:.1} back above flip threshold, now right side up");
            Some(false)
        } else {
            None
        }
    }

    pub fn average(&self) -> Option<Vector3> {
        self.avg
    }

    pub fn is_upside_down(&self) -> bool {
        self.upside_down
    }

    pub fn set_thresholds(&mut self, boundary: f32, hysteresis: f32) {
        self.boundary = boundary;
        self.hysteresis = hysteresis;
    }

    pub fn thresholds(&self) -> (f32, f32) {
        (self.boundary, self.hysteresis)
    }
}

impl Default for OrientationDetector {
    fn default() -> Self {
        Self::new()
    }
}
