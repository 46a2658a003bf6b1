// StateBeacon — Device Controller
//
// Single-threaded core of the node.  Every stimulus (button edge, field
// sample, timer tick) arrives as one event and runs to completion here, so
// the four state machines never see interleaved updates.  The only thing
// the controller asks of its caller is hold-timer bookkeeping: the returned
// command tells the dispatch loop to arm or cancel it.

use crate::calibration::CalibrationController;
use crate::config::*;
use crate::drivers::{Advertiser, IndicatorLight, SensorReader};
use crate::events::{Event, TimerCommand};
use crate::input::{ButtonInputManager, ButtonSignal};
use crate::orientation::OrientationDetector;
use crate::telemetry::TelemetryEncoder;

pub struct DeviceController<A, L, S> {
    advertiser: A,
    indicator: L,
    sensors: S,

    input: ButtonInputManager,
    orientation: OrientationDetector,
    calibration: CalibrationController,
    telemetry: TelemetryEncoder,
    toggle_bit: bool,
}

impl<A, L, S> DeviceController<A, L, S>
where
    A: Advertiser,
    L: IndicatorLight,
    S: SensorReader,
{
    /// Build the controller, seeding the telemetry accumulators from one
    /// instantaneous sensor read.
    pub fn new(advertiser: A, indicator: L, mut sensors: S) -> Self {
        let battery = sensors.battery_percent();
        let temp = sensors.temperature_c() + TEMP_CALIBRATION_OFFSET_C;

        Self {
            advertiser,
            indicator,
            sensors,
            input: ButtonInputManager::new(),
            orientation: OrientationDetector::new(),
            calibration: CalibrationController::new(),
            telemetry: TelemetryEncoder::new(battery, temp),
            toggle_bit: false,
        }
    }

    /// Run one event to completion.
    pub fn handle_event(&mut self, event: Event) -> Option<TimerCommand> {
        match event {
            Event::ButtonEdge { pressed, at_ms } => self
                .input
                .on_edge(pressed, at_ms)
                .and_then(|signal| self.apply_signal(signal)),

            Event::HoldTimerElapsed => self
                .input
                .on_hold_elapsed()
                .and_then(|signal| self.apply_signal(signal)),

            Event::MagSample(sample) => {
                if self.calibration.is_calibrating() {
                    // Average keeps tracking; flips and the deviation
                    // indicator stay suspended until calibration ends.
                    self.orientation.track(sample);
                } else {
                    let report = self.orientation.on_sample(sample);
                    self.indicator
                        .set_lit(report.deviation > FIELD_DEVIATION_THRESHOLD);
                    if report.orientation_change.is_some() {
                        self.broadcast();
                    }
                }
                None
            }

            Event::BroadcastTick => {
                self.broadcast();
                None
            }

            Event::BlinkTick => {
                if let Some(lit) = self.calibration.blink_tick() {
                    self.indicator.set_lit(lit);
                }
                None
            }
        }
    }

    fn apply_signal(&mut self, signal: ButtonSignal) -> Option<TimerCommand> {
        match signal {
            ButtonSignal::PressStarted => Some(TimerCommand::ArmHold),

            ButtonSignal::ShortPress => {
                if self.calibration.is_calibrating() {
                    if let Some(avg) = self.orientation.average() {
                        self.calibration.capture_flipped(avg);
                    }
                } else {
                    self.toggle_bit = !self.toggle_bit;
                    log::info!(
                        "toggle bit now {}",
                        if self.toggle_bit { "on" } else { "off" }
                    );
                    self.broadcast();
                }
                Some(TimerCommand::CancelHold)
            }

            ButtonSignal::LongPress => {
                if self.calibration.is_calibrating() {
                    if let Some((boundary, hysteresis)) = self.calibration.exit() {
                        self.orientation.set_thresholds(boundary, hysteresis);
                    }
                    self.indicator.set_lit(false);
                } else if self.calibration.enter(self.orientation.average()) {
                    self.indicator.set_lit(false);
                }
                None
            }
        }
    }

    /// Read the housekeeping sensors, refresh the payload and hand it to
    /// the radio.  A sink failure costs this update only.
    fn broadcast(&mut self) {
        let battery = self.sensors.battery_percent();
        let temp = self.sensors.temperature_c() + TEMP_CALIBRATION_OFFSET_C;
        let payload = self.telemetry.update_and_encode(
            battery,
            temp,
            self.toggle_bit,
            self.orientation.is_upside_down(),
        );

        log::debug!("beacon payload {payload:?}");
        if let Err(err) = self
            .advertiser
            .set_advertising(MANUFACTURER_ID, payload.as_bytes())
        {
            log::warn!("advertising update failed: {err:#}");
        }
    }

    pub fn is_calibrating(&self) -> bool {
        self.calibration.is_calibrating()
    }

    pub fn is_upside_down(&self) -> bool {
        self.orientation.is_upside_down()
    }

    pub fn flip_thresholds(&self) -> (f32, f32) {
        self.orientation.thresholds()
    }
}
