// StateBeacon — Device Dispatch Task
//
// Owns the event queue and every timer the controller depends on:
//
//   * the 10 s broadcast interval,
//   * the long-press hold timer (armed/cancelled on controller command),
//   * the 1 Hz calibration blink (runs only while calibrating).
//
// Timer expiries are fed back through the same queue-of-one-event model as
// external stimuli, so the controller stays strictly run-to-completion.

use tokio::sync::mpsc::Receiver;
use tokio::time::{interval, interval_at, sleep, Duration, Instant};

use crate::config::*;
use crate::controller::DeviceController;
use crate::drivers::{Advertiser, IndicatorLight, SensorReader};
use crate::events::{Event, TimerCommand};

pub async fn device_task<A, L, S>(
    mut controller: DeviceController<A, L, S>,
    mut events: Receiver<Event>,
) where
    A: Advertiser,
    L: IndicatorLight,
    S: SensorReader,
{
    log::info!("device task started");

    let broadcast_period = Duration::from_millis(BROADCAST_INTERVAL_MS);
    let mut broadcast = interval_at(Instant::now() + broadcast_period, broadcast_period);

    // The hold sleep exists for the whole loop; `hold_armed` gates whether
    // it is polled, and arming resets its deadline.
    let mut hold = Box::pin(sleep(Duration::from_millis(LONG_PRESS_MS)));
    let mut hold_armed = false;

    let mut blink = interval(Duration::from_millis(BLINK_INTERVAL_MS));
    let mut blink_active = false;

    loop {
        let event = tokio::select! {
            // Queued stimuli win ties against timer expiries.
            biased;

            maybe_event = events.recv() => match maybe_event {
                Some(event) => event,
                None => {
                    log::info!("event channel closed, device task exiting");
                    return;
                }
            },

            _ = hold.as_mut(), if hold_armed => {
                hold_armed = false;
                Event::HoldTimerElapsed
            }

            _ = blink.tick(), if blink_active => Event::BlinkTick,

            _ = broadcast.tick() => Event::BroadcastTick,
        };

        match controller.handle_event(event) {
            Some(TimerCommand::ArmHold) => {
                hold.as_mut()
                    .reset(Instant::now() + Duration::from_millis(LONG_PRESS_MS));
                hold_armed = true;
            }
            Some(TimerCommand::CancelHold) => hold_armed = false,
            None => {}
        }

        // Keep the blink interval in step with the calibration state; the
        // first toggle lands one period after entry.
        let calibrating = controller.is_calibrating();
        if calibrating && !blink_active {
            blink.reset();
            blink_active = true;
        } else if !calibrating && blink_active {
            blink_active = false;
        }
    }
}
