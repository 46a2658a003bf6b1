// StateBeacon — Dispatch Timing Tests
//
// Runs the device task on tokio's paused clock and steps time by hand, so
// the broadcast cadence, the long-press hold timer and the calibration
// blink can all be checked against exact instants.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::task::yield_now;
use tokio::time::{advance, Duration};

use statebeacon::config::*;
use statebeacon::controller::DeviceController;
use statebeacon::drivers::sim::FieldSource;
use statebeacon::drivers::{Advertiser, IndicatorLight, SensorReader};
use statebeacon::events::{Event, Vector3};
use statebeacon::tasks::device::device_task;
use statebeacon::tasks::sensor::field_task;

#[derive(Default)]
struct Recording {
    payloads: Vec<String>,
    indicator: Vec<bool>,
}

type Shared = Arc<Mutex<Recording>>;

struct HookAdvertiser(Shared);

impl Advertiser for HookAdvertiser {
    fn set_advertising(&mut self, _manufacturer_id: u16, payload: &[u8]) -> anyhow::Result<()> {
        self.0
            .lock()
            .unwrap()
            .payloads
            .push(String::from_utf8_lossy(payload).into_owned());
        Ok(())
    }
}

struct HookIndicator(Shared);

impl IndicatorLight for HookIndicator {
    fn set_lit(&mut self, lit: bool) {
        self.0.lock().unwrap().indicator.push(lit);
    }
}

struct FixedSensors;

impl SensorReader for FixedSensors {
    fn battery_percent(&mut self) -> f32 {
        87.0
    }

    fn temperature_c(&mut self) -> f32 {
        21.5
    }
}

fn spawn_device() -> (Shared, mpsc::Sender<Event>) {
    let rec = Shared::default();
    let controller = DeviceController::new(
        HookAdvertiser(Arc::clone(&rec)),
        HookIndicator(Arc::clone(&rec)),
        FixedSensors,
    );
    let (tx, rx) = mpsc::channel(32);
    tokio::spawn(device_task(controller, rx));
    (rec, tx)
}

/// Give the device task a chance to drain everything that is ready.
async fn settle() {
    for _ in 0..8 {
        yield_now().await;
    }
}

fn payload_count(rec: &Shared) -> usize {
    rec.lock().unwrap().payloads.len()
}

fn indicator(rec: &Shared) -> Vec<bool> {
    rec.lock().unwrap().indicator.clone()
}

fn seed_sample() -> Event {
    Event::MagSample(Vector3::new(0.0, 0.0, 600.0))
}

fn edge(pressed: bool, at_ms: u64) -> Event {
    Event::ButtonEdge { pressed, at_ms }
}

#[tokio::test(start_paused = true)]
async fn broadcasts_on_the_ten_second_cadence() {
    let (rec, _tx) = spawn_device();
    settle().await;

    // Nothing goes out before the first interval tick.
    assert_eq!(payload_count(&rec), 0);

    advance(Duration::from_millis(BROADCAST_INTERVAL_MS)).await;
    settle().await;
    assert_eq!(payload_count(&rec), 1);

    // Three more periods, three more beacons.
    advance(Duration::from_millis(3 * BROADCAST_INTERVAL_MS)).await;
    settle().await;
    assert_eq!(payload_count(&rec), 4);
}

#[tokio::test(start_paused = true)]
async fn hold_timer_fires_at_exactly_the_threshold() {
    let (rec, tx) = spawn_device();
    settle().await;
    tx.send(seed_sample()).await.unwrap();
    settle().await;
    assert_eq!(indicator(&rec), [false]); // deviation check on the seed

    tx.send(edge(true, 0)).await.unwrap();
    settle().await;

    // One millisecond short: still just a pending press.
    advance(Duration::from_millis(LONG_PRESS_MS - 1)).await;
    settle().await;
    assert_eq!(indicator(&rec).len(), 1);

    // The final millisecond turns it into a long press: calibration entry
    // clears the indicator.
    advance(Duration::from_millis(1)).await;
    settle().await;
    assert_eq!(indicator(&rec), [false, false]);

    // The late release is swallowed: no toggle, so no payload at all.
    tx.send(edge(false, LONG_PRESS_MS + 500)).await.unwrap();
    settle().await;
    assert_eq!(payload_count(&rec), 0);
}

#[tokio::test(start_paused = true)]
async fn release_before_the_threshold_cancels_the_hold_timer() {
    let (rec, tx) = spawn_device();
    settle().await;
    tx.send(seed_sample()).await.unwrap();
    settle().await;

    tx.send(edge(true, 0)).await.unwrap();
    settle().await;
    advance(Duration::from_millis(1500)).await;
    settle().await;

    tx.send(edge(false, 1500)).await.unwrap();
    settle().await;
    assert_eq!(payload_count(&rec), 1); // the toggle rebroadcast

    // Long after the cancelled deadline nothing more happens.
    advance(Duration::from_millis(5000)).await;
    settle().await;
    assert_eq!(indicator(&rec), [false]); // never entered calibration
    assert_eq!(payload_count(&rec), 1);
}

#[tokio::test(start_paused = true)]
async fn queued_release_wins_against_a_simultaneous_expiry() {
    let (rec, tx) = spawn_device();
    settle().await;
    tx.send(seed_sample()).await.unwrap();
    settle().await;

    tx.send(edge(true, 0)).await.unwrap();
    settle().await;
    advance(Duration::from_millis(LONG_PRESS_MS - 1)).await;
    settle().await;

    // The release is already queued when the deadline passes.
    tx.send(edge(false, LONG_PRESS_MS - 1)).await.unwrap();
    advance(Duration::from_millis(50)).await;
    settle().await;

    // Short press won: toggle broadcast happened, calibration did not start.
    assert_eq!(payload_count(&rec), 1);
    assert_eq!(indicator(&rec), [false]);
}

#[tokio::test(start_paused = true)]
async fn calibration_blink_toggles_at_one_hertz_until_exit() {
    let (rec, tx) = spawn_device();
    settle().await;
    tx.send(seed_sample()).await.unwrap();
    settle().await;

    // Enter calibration via a held press.
    tx.send(edge(true, 0)).await.unwrap();
    settle().await;
    advance(Duration::from_millis(LONG_PRESS_MS)).await;
    settle().await;
    tx.send(edge(false, LONG_PRESS_MS + 500)).await.unwrap();
    settle().await;

    // First toggle lands one full period after entry, then 1 Hz.
    assert_eq!(indicator(&rec), [false, false]);
    advance(Duration::from_millis(BLINK_INTERVAL_MS)).await;
    settle().await;
    assert_eq!(indicator(&rec), [false, false, true]);
    advance(Duration::from_millis(BLINK_INTERVAL_MS)).await;
    settle().await;
    assert_eq!(indicator(&rec), [false, false, true, false]);
    advance(Duration::from_millis(BLINK_INTERVAL_MS)).await;
    settle().await;
    assert_eq!(indicator(&rec), [false, false, true, false, true]);

    // Exit via a second held press, offset so the hold expiry does not
    // share an instant with a blink edge.
    advance(Duration::from_millis(500)).await;
    settle().await;
    tx.send(edge(true, LONG_PRESS_MS + 4000)).await.unwrap();
    settle().await;

    advance(Duration::from_millis(500)).await; // blink edge inside the hold
    settle().await;
    advance(Duration::from_millis(1000)).await; // and one more
    settle().await;
    advance(Duration::from_millis(500)).await; // hold expiry: calibration exits
    settle().await;
    assert_eq!(
        indicator(&rec),
        [false, false, true, false, true, false, true, false] // parked dark
    );

    // With calibration over the blink stays quiet.
    advance(Duration::from_millis(5 * BLINK_INTERVAL_MS)).await;
    settle().await;
    assert_eq!(indicator(&rec).len(), 8);
}

#[tokio::test(start_paused = true)]
async fn field_task_samples_on_its_own_cadence() {
    let flipped = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let (tx, mut rx) = mpsc::channel(32);
    tokio::spawn(field_task(
        FieldSource::new(flipped),
        tx,
        SENSOR_SAMPLE_INTERVAL_MS,
    ));
    settle().await;

    // First tick is immediate, then one sample per interval.
    advance(Duration::from_millis(10 * SENSOR_SAMPLE_INTERVAL_MS)).await;
    settle().await;

    let mut received = 0;
    while rx.try_recv().is_ok() {
        received += 1;
    }
    assert_eq!(received, 11);
}
