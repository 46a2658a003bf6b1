// StateBeacon — Field Sampling Task
//
// Polls the magnetometer stand-in at a steady cadence and pushes each
// sample into the event channel for the device task to consume.

use tokio::sync::mpsc::Sender;
use tokio::time::{interval, Duration};

use crate::drivers::sim::FieldSource;
use crate::events::Event;

pub async fn field_task(mut source: FieldSource, events: Sender<Event>, interval_ms: u64) {
    log::info!("field sampling task started ({interval_ms} ms cadence)");

    let mut ticker = interval(Duration::from_millis(interval_ms));

    loop {
        ticker.tick().await;

        let sample = source.next_sample();
        if events.send(Event::MagSample(sample)).await.is_err() {
            log::warn!("event channel closed, exiting field task");
            return;
        }
    }
}
