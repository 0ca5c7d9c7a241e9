//! SX1276 FSK Beacon
//!
//! Host entry point. Runs the beacon against the simulated SX1276; no
//! radio hardware is touched. The Raspberry Pi 4 pin table is only
//! validated. Beacons the test frame every five seconds until killed and
//! exits non-zero if the platform or radio cannot be brought up.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use fsk_beacon::config::pins::RASPBERRY_PI_4;
use fsk_beacon::config::CHANNEL_POLL_INTERVAL_MS;
use fsk_beacon::prelude::*;
use fsk_beacon::radio::sim::SimulatedPlatform;

/// Blocking delay on the OS scheduler
struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_us(&mut self, us: u32) {
        thread::sleep(Duration::from_micros(u64::from(us)));
    }

    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stdout).init();

    info!("SX1276 FSK beacon v{}", env!("CARGO_PKG_VERSION"));
    info!("Using simulated transceiver, no radio hardware attached");

    let platform = SimulatedPlatform::new(CHANNEL_POLL_INTERVAL_MS);
    match launch(
        platform,
        &RASPBERRY_PI_4,
        StdDelay,
        RadioConfig::APRS,
        BeaconSettings::DEFAULT,
    )? {}
}
