//! Beacon Loop
//!
//! Owns the radio driver and drives the transmit cadence: configure once,
//! then send one frame, sleep, repeat. Strictly sequential; at most one
//! frame is in flight and nothing is queued or retried.

use core::fmt;

use embedded_hal::delay::DelayNs;

use crate::config::{BeaconSettings, RadioConfig};
use crate::error::BeaconError;
use crate::radio::airtime;
use crate::radio::driver::RadioDriver;
use crate::radio::state::LinkState;
use crate::types::OpMode;

/// Transmission outcome counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TxStats {
    /// Frames that went out and completed
    pub sent: u32,
    /// Sends skipped because the payload was too long
    pub oversized: u32,
    /// Frames whose completion was never reported
    pub timeouts: u32,
    /// Cycles lost to a driver error
    pub driver_errors: u32,
    /// Sends refused because the link was not in standby
    pub not_ready: u32,
}

impl TxStats {
    /// Total send attempts
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.sent + self.failures()
    }

    /// Total failed send attempts
    #[must_use]
    pub const fn failures(&self) -> u32 {
        self.oversized + self.timeouts + self.driver_errors + self.not_ready
    }
}

impl fmt::Display for TxStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sent={} oversized={} timeouts={} driver_errors={} not_ready={}",
            self.sent, self.oversized, self.timeouts, self.driver_errors, self.not_ready
        )
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for TxStats {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "sent={} oversized={} timeouts={} driver_errors={} not_ready={}",
            self.sent,
            self.oversized,
            self.timeouts,
            self.driver_errors,
            self.not_ready
        );
    }
}

/// Periodic FSK beacon
pub struct Beacon<D, T> {
    driver: D,
    delay: T,
    config: RadioConfig,
    settings: BeaconSettings,
    state: LinkState,
    stats: TxStats,
}

impl<D, T> Beacon<D, T>
where
    D: RadioDriver,
    T: DelayNs,
{
    /// Take ownership of a driver session
    ///
    /// The link is assumed asleep until [`Beacon::configure`] runs.
    pub fn new(driver: D, delay: T, config: RadioConfig, settings: BeaconSettings) -> Self {
        Self {
            driver,
            delay,
            config,
            settings,
            state: LinkState::Sleep,
            stats: TxStats::default(),
        }
    }

    /// Program the radio for fixed-length FSK and leave it in standby
    ///
    /// Safe to call again; every knob is rewritten from the stored
    /// configuration. A radio left in transmit is first returned to
    /// standby.
    ///
    /// # Errors
    ///
    /// Returns the first driver error. The link state then reflects the
    /// last mode the driver accepted.
    pub fn configure(&mut self) -> Result<(), D::Error> {
        self.leave_transmit()?;
        self.set_mode(LinkState::Sleep)?;
        info!("SX1276 in sleep mode...");

        let config = self.config;
        self.driver.set_modem(config.modem)?;
        self.driver.set_frequency(config.frequency)?;
        self.driver.set_bitrate(config.bitrate)?;
        self.driver.set_deviation(config.deviation)?;
        self.driver.set_packet_format(config.packet_format())?;
        self.driver.set_crc(config.crc_enabled)?;

        self.set_mode(LinkState::Standby)?;
        info!(
            "SX1276 configured in {} mode at {}, {}, deviation {}",
            config.modem,
            config.frequency,
            config.bitrate,
            config.deviation
        );
        debug!(
            "Frame airtime {} us for {} byte payload",
            airtime::frame_airtime_us(&config),
            config.payload_length.bytes()
        );
        Ok(())
    }

    /// Transmit one frame and wait for it to leave the air
    ///
    /// An oversized frame is rejected before the driver is touched. Any
    /// other failure still returns the radio to standby; if that mode
    /// change itself fails, the next send retries it before transmitting.
    /// Outcomes are logged and counted here; frames are never retried.
    ///
    /// # Errors
    ///
    /// - [`BeaconError::OversizedPacket`] if `frame` exceeds the payload length
    /// - [`BeaconError::NotReady`] if the link is not in standby
    /// - [`BeaconError::ChannelTimeout`] if completion is never reported
    /// - [`BeaconError::Driver`] if a driver call fails
    pub fn send(&mut self, frame: &[u8]) -> Result<(), BeaconError<D::Error>> {
        let max = self.config.payload_length.bytes();
        if frame.len() > max {
            error!(
                "Error: Packet size {} exceeds payload length ({} bytes)",
                frame.len(),
                max
            );
            self.stats.oversized += 1;
            return Err(BeaconError::OversizedPacket { len: frame.len(), max });
        }

        if let Err(err) = self.leave_transmit() {
            error!("Radio stuck in transmit, frame dropped");
            self.stats.driver_errors += 1;
            return Err(BeaconError::Driver(err));
        }

        if !self.state.is_ready() {
            error!("Radio not ready to transmit (state {})", self.state);
            self.stats.not_ready += 1;
            return Err(BeaconError::NotReady(self.state));
        }

        let result = self.transmit(frame);

        let standby = self.set_mode(LinkState::Standby);
        let result = match (result, standby) {
            (Ok(waited_ms), Ok(())) => {
                info!("Packet sent! ({} ms on air)", waited_ms);
                self.stats.sent += 1;
                return Ok(());
            }
            (Err(err), _) => err,
            (Ok(_), Err(err)) => BeaconError::Driver(err),
        };

        match &result {
            BeaconError::ChannelTimeout { waited_ms } => {
                warn!("Channel still busy after {} ms, frame abandoned", *waited_ms);
                self.stats.timeouts += 1;
            }
            _ => {
                error!("Radio driver error, frame dropped");
                self.stats.driver_errors += 1;
            }
        }
        Err(result)
    }

    /// Send a frame, then sleep for the beacon interval
    ///
    /// A failed send does not shorten or skip the sleep.
    ///
    /// # Errors
    ///
    /// Passes through the outcome of [`Beacon::send`].
    pub fn cycle(&mut self, frame: &[u8]) -> Result<(), BeaconError<D::Error>> {
        let result = self.send(frame);
        trace!("Cycle done: {}", self.stats);
        self.delay.delay_ms(self.settings.interval_ms);
        result
    }

    /// Beacon `frame` forever
    pub fn run(&mut self, frame: &[u8]) -> ! {
        info!(
            "Beaconing {} byte frames every {} ms",
            frame.len(),
            self.settings.interval_ms
        );
        loop {
            let _ = self.cycle(frame);
        }
    }

    /// Current link state
    #[must_use]
    pub const fn state(&self) -> LinkState {
        self.state
    }

    /// Outcome counters
    #[must_use]
    pub const fn stats(&self) -> TxStats {
        self.stats
    }

    /// Radio configuration
    #[must_use]
    pub const fn config(&self) -> &RadioConfig {
        &self.config
    }

    /// Loop timing
    #[must_use]
    pub const fn settings(&self) -> &BeaconSettings {
        &self.settings
    }

    /// Borrow the driver
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// Release the driver and delay
    pub fn into_parts(self) -> (D, T) {
        (self.driver, self.delay)
    }

    /// Enter transmit mode, load the frame, poll for completion
    fn transmit(&mut self, frame: &[u8]) -> Result<u32, BeaconError<D::Error>> {
        self.set_mode(LinkState::Transmitting)?;
        info!("Transmitting packet...");
        self.driver.send(frame)?;
        self.wait_channel_free()
    }

    /// Poll until the driver reports the channel free, bounded by settings
    fn wait_channel_free(&mut self) -> Result<u32, BeaconError<D::Error>> {
        let poll_ms = self.settings.poll_interval_ms;
        let max_polls = self.settings.max_polls();
        let mut polls: u32 = 0;

        loop {
            let waited_ms = polls.saturating_mul(poll_ms);
            if self.driver.is_channel_free()? {
                return Ok(waited_ms);
            }
            if polls >= max_polls {
                return Err(BeaconError::ChannelTimeout { waited_ms });
            }
            self.delay.delay_ms(poll_ms);
            polls += 1;
        }
    }

    /// Return to standby if a failed mode change left the link in transmit
    fn leave_transmit(&mut self) -> Result<(), D::Error> {
        if self.state == LinkState::Transmitting {
            warn!("Radio still in TX after a failed mode change, retrying standby");
            self.set_mode(LinkState::Standby)?;
        }
        Ok(())
    }

    /// Request `next` from the driver; the mirror only moves once it succeeds
    fn set_mode(&mut self, next: LinkState) -> Result<(), D::Error> {
        if !self.state.can_enter(next) {
            warn!("Unexpected link transition {} -> {}", self.state, next);
        }
        let mode: OpMode = next.op_mode();
        self.driver.set_op_mode(mode)?;
        self.state = next;
        Ok(())
    }
}
