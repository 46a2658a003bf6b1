// StateBeacon — Desk Simulation Entry Point
//
// Runtime sequence:
//   1. Parse flags and initialise logging.
//   2. Assemble the controller on console drivers and simulated sensors.
//   3. Spawn the field sampling task (and the demo scenario, if selected).
//   4. Run the device dispatch task until Ctrl-C or the run limit.
//
// The demo scenario walks every feature once: toggle, flip and recover,
// then a full calibration cycle.  `--scenario steady` skips the script and
// just lets the node idle and broadcast.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use env_logger::Builder;
use log::LevelFilter;
use tokio::sync::mpsc;
use tokio::time::Duration;

use statebeacon::config::*;
use statebeacon::controller::DeviceController;
use statebeacon::drivers::console::{ConsoleAdvertiser, ConsoleIndicator};
use statebeacon::drivers::sim::{FieldSource, SimulatedSensors};
use statebeacon::tasks;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Scenario {
    /// Scripted walk through toggle, flip and calibration.
    Demo,
    /// No button activity, just sampling and periodic broadcasts.
    Steady,
}

#[derive(Parser, Debug)]
#[command(version, about = "Wearable state beacon node, simulated on the desk")]
struct Args {
    /// What the simulated wearer does.
    #[arg(long, value_enum, default_value_t = Scenario::Demo)]
    scenario: Scenario,

    /// Magnetometer sampling cadence in milliseconds.
    #[arg(long, default_value_t = SENSOR_SAMPLE_INTERVAL_MS)]
    sample_ms: u64,

    /// Stop after this many seconds (0 = run until Ctrl-C).
    #[arg(long, default_value_t = 0)]
    run_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    Builder::from_default_env()
        .filter_level(LevelFilter::Info)
        .format_timestamp_millis()
        .init();
    log::info!("statebeacon starting, scenario {:?}", args.scenario);

    // ---- Event plumbing ---------------------------------------------------
    let (event_tx, event_rx) = mpsc::channel(EVENT_QUEUE_DEPTH);
    let flipped = Arc::new(AtomicBool::new(false));

    // ---- Controller on console/simulated hardware -------------------------
    let controller = DeviceController::new(
        ConsoleAdvertiser,
        ConsoleIndicator::new(),
        SimulatedSensors::new(),
    );

    // ---- Tasks ------------------------------------------------------------
    tokio::spawn(tasks::sensor::field_task(
        FieldSource::new(Arc::clone(&flipped)),
        event_tx.clone(),
        args.sample_ms,
    ));

    if args.scenario == Scenario::Demo {
        tokio::spawn(tasks::scenario::scenario_task(
            event_tx.clone(),
            Arc::clone(&flipped),
        ));
    }
    drop(event_tx);

    let device = tokio::spawn(tasks::device::device_task(controller, event_rx));

    // ---- Run until something ends the session -----------------------------
    tokio::select! {
        _ = tokio::signal::ctrl_c() => log::info!("ctrl-c received, shutting down"),
        _ = run_limit(args.run_secs) => log::info!("run limit reached, shutting down"),
        _ = device => log::warn!("device task stopped"),
    }

    Ok(())
}

/// Resolves after `secs` seconds, or never when `secs` is 0.
async fn run_limit(secs: u64) {
    if secs == 0 {
        std::future::pending::<()>().await
    } else {
        tokio::time::sleep(Duration::from_secs(secs)).await
    }
}
