// StateBeacon — Demo Scenario Task
//
// Scripted walk through the whole feature set for desk runs: toggle the
// state bit, flip the node over and back, then run a full calibration
// cycle against the flipped field.  Button edges are injected into the
// event channel; orientation changes go through the shared flip flag the
// field source reads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc::error::SendError;
use tokio::sync::mpsc::Sender;
use tokio::time::{sleep, Duration, Instant};

use crate::config::*;
use crate::events::Event;

pub async fn scenario_task(events: Sender<Event>, flipped: Arc<AtomicBool>) {
    log::info!("demo scenario started");

    if run_script(&events, &flipped).await.is_err() {
        log::warn!("event channel closed, scenario cut short");
        return;
    }

    log::info!("demo scenario complete, idling");
}

async fn run_script(
    events: &Sender<Event>,
    flipped: &Arc<AtomicBool>,
) -> Result<(), SendError<Event>> {
    let start = Instant::now();

    // Let a few field samples seed the running average first.
    sleep(Duration::from_secs(3)).await;
    log::info!("scenario: short press (toggle on)");
    short_press(events, start).await?;

    sleep(Duration::from_secs(3)).await;
    log::info!("scenario: flipping the node over");
    flipped.store(true, Ordering::Relaxed);

    sleep(Duration::from_secs(3)).await;
    log::info!("scenario: back right side up");
    flipped.store(false, Ordering::Relaxed);

    sleep(Duration::from_secs(3)).await;
    log::info!("scenario: long press (enter calibration)");
    long_press(events, start).await?;

    sleep(Duration::from_millis(1500)).await;
    log::info!("scenario: holding the node flipped for capture");
    flipped.store(true, Ordering::Relaxed);

    sleep(Duration::from_secs(2)).await;
    log::info!("scenario: short press (capture flipped sample)");
    short_press(events, start).await?;

    sleep(Duration::from_millis(500)).await;
    flipped.store(false, Ordering::Relaxed);

    sleep(Duration::from_secs(2)).await;
    log::info!("scenario: long press (exit calibration)");
    long_press(events, start).await?;

    Ok(())
}

async fn short_press(events: &Sender<Event>, start: Instant) -> Result<(), SendError<Event>> {
    press_for(events, start, Duration::from_millis(120)).await
}

async fn long_press(events: &Sender<Event>, start: Instant) -> Result<(), SendError<Event>> {
    // Comfortably past the hold threshold.
    press_for(events, start, Duration::from_millis(LONG_PRESS_MS + 300)).await
}

async fn press_for(
    events: &Sender<Event>,
    start: Instant,
    duration: Duration,
) -> Result<(), SendError<Event>> {
    events
        .send(Event::ButtonEdge {
            pressed: true,
            at_ms: start.elapsed().as_millis() as u64,
        })
        .await?;
    sleep(duration).await;
    events
        .send(Event::ButtonEdge {
            pressed: false,
            at_ms: start.elapsed().as_millis() as u64,
        })
        .await?;
    Ok(())
}
