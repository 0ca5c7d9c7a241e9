//! Platform Bring-up
//!
//! Turns a board pin table into an owned radio driver, then configures
//! the radio and hands control to the beacon loop. Setup failures stop
//! the process before the radio is touched.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;

use crate::config::pins::PinMap;
use crate::config::{BeaconSettings, RadioConfig};
use crate::error::{LaunchError, PlatformSetupError};
use crate::radio::beacon::Beacon;
use crate::radio::driver::RadioDriver;
use crate::radio::packet::beacon_packet;

/// Board support: opens the bus and pins named in a [`PinMap`]
pub trait Platform {
    /// Driver session produced by a successful setup
    type Driver: RadioDriver;

    /// Open the SPI bus and GPIO lines and build a driver over them
    ///
    /// # Errors
    ///
    /// Returns [`PlatformSetupError`] if the table is incomplete or the
    /// bus or pins cannot be opened.
    fn setup(&mut self, pins: &PinMap) -> Result<Self::Driver, PlatformSetupError>;
}

/// Set up the platform and configure the radio
///
/// # Errors
///
/// - [`LaunchError::Setup`] if the platform could not be brought up;
///   no configuration was attempted
/// - [`LaunchError::Configure`] if the driver rejected the configuration
pub fn bring_up<P, T>(
    platform: &mut P,
    pins: &PinMap,
    delay: T,
    config: RadioConfig,
    settings: BeaconSettings,
) -> Result<Beacon<P::Driver, T>, LaunchError<<P::Driver as RadioDriver>::Error>>
where
    P: Platform,
    T: DelayNs,
{
    info!("Initializing SX1276 module on {}...", pins.board);

    let driver = platform.setup(pins).map_err(|err| {
        error!("Platform setup failed: {}", err);
        err
    })?;

    let mut beacon = Beacon::new(driver, delay, config, settings);
    beacon.configure().map_err(|err| {
        error!("Radio configuration rejected by driver");
        LaunchError::Configure(err)
    })?;

    Ok(beacon)
}

/// Bring the radio up and beacon the fixed packet forever
///
/// Only returns on a bring-up failure.
///
/// # Errors
///
/// See [`bring_up`].
pub fn launch<P, T>(
    mut platform: P,
    pins: &PinMap,
    delay: T,
    config: RadioConfig,
    settings: BeaconSettings,
) -> Result<Infallible, LaunchError<<P::Driver as RadioDriver>::Error>>
where
    P: Platform,
    T: DelayNs,
{
    let mut beacon = bring_up(&mut platform, pins, delay, config, settings)?;
    let packet = beacon_packet();
    beacon.run(packet.as_bytes())
}
