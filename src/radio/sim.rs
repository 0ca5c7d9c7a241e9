//! Simulated Transceiver
//!
//! A [`RadioDriver`] with no hardware behind it. It enforces the SX1276
//! mode rules (modem selection only in sleep, configuration only outside
//! transmit, frames only in transmit), remembers what it was programmed
//! with, and holds the channel busy for the airtime of each frame.

use core::fmt;

use heapless::Vec;

use crate::config::pins::PinMap;
use crate::error::PlatformSetupError;
use crate::platform::Platform;
use crate::radio::airtime;
use crate::radio::driver::RadioDriver;
use crate::types::{Bitrate, Deviation, Frequency, Modem, OpMode, PacketFormat};

/// Largest frame the simulated FIFO accepts
pub const MAX_FRAME_LEN: usize = 255;

/// Misuse detected by the simulated transceiver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimError {
    /// Operation not permitted in the current mode
    WrongMode {
        /// Rejected operation
        op: &'static str,
        /// Mode at the time
        mode: OpMode,
    },
    /// Frame handed over before frequency, bitrate and framing were set
    NotConfigured,
    /// Previous frame still on air
    Busy,
    /// Frame does not fit the programmed framing
    FrameTooLong {
        /// Frame length
        len: usize,
        /// Limit
        max: usize,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongMode { op, mode } => write!(f, "{op} not allowed in {mode} mode"),
            Self::NotConfigured => f.write_str("transmit before configuration"),
            Self::Busy => f.write_str("previous frame still on air"),
            Self::FrameTooLong { len, max } => write!(f, "frame of {len} bytes exceeds {max}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SimError {}

#[cfg(feature = "embedded")]
impl defmt::Format for SimError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::WrongMode { op, mode } => defmt::write!(f, "WrongMode({=str} in {})", op, mode),
            Self::NotConfigured => defmt::write!(f, "NotConfigured"),
            Self::Busy => defmt::write!(f, "Busy"),
            Self::FrameTooLong { len, max } => {
                defmt::write!(f, "FrameTooLong({=usize} > {=usize})", len, max);
            }
        }
    }
}

/// Simulated SX1276 in FSK mode
#[derive(Clone, Debug)]
pub struct SimulatedRadio {
    mode: OpMode,
    modem: Option<Modem>,
    frequency: Option<Frequency>,
    bitrate: Option<Bitrate>,
    deviation: Option<Deviation>,
    format: Option<PacketFormat>,
    crc: bool,
    poll_interval_ms: u32,
    busy_polls: u32,
    frames_sent: u32,
    last_frame: Vec<u8, MAX_FRAME_LEN>,
}

impl SimulatedRadio {
    /// Power-on state: asleep, unconfigured
    ///
    /// `poll_interval_ms` is the caller's channel-free poll period; each
    /// frame reports busy for as many polls as its airtime spans.
    #[must_use]
    pub const fn new(poll_interval_ms: u32) -> Self {
        Self {
            mode: OpMode::Sleep,
            modem: None,
            frequency: None,
            bitrate: None,
            deviation: None,
            format: None,
            crc: false,
            poll_interval_ms,
            busy_polls: 0,
            frames_sent: 0,
            last_frame: Vec::new(),
        }
    }

    /// Current operating mode
    #[must_use]
    pub const fn mode(&self) -> OpMode {
        self.mode
    }

    /// Programmed modem
    #[must_use]
    pub const fn modem(&self) -> Option<Modem> {
        self.modem
    }

    /// Programmed carrier frequency
    #[must_use]
    pub const fn frequency(&self) -> Option<Frequency> {
        self.frequency
    }

    /// Programmed bitrate
    #[must_use]
    pub const fn bitrate(&self) -> Option<Bitrate> {
        self.bitrate
    }

    /// Programmed deviation
    #[must_use]
    pub const fn deviation(&self) -> Option<Deviation> {
        self.deviation
    }

    /// Programmed framing
    #[must_use]
    pub const fn packet_format(&self) -> Option<PacketFormat> {
        self.format
    }

    /// Hardware CRC setting
    #[must_use]
    pub const fn crc_enabled(&self) -> bool {
        self.crc
    }

    /// Frames handed to the transmitter so far
    #[must_use]
    pub const fn frames_sent(&self) -> u32 {
        self.frames_sent
    }

    /// Most recent frame
    #[must_use]
    pub fn last_frame(&self) -> &[u8] {
        &self.last_frame
    }

    fn require_idle(&self, op: &'static str) -> Result<(), SimError> {
        match self.mode {
            OpMode::Sleep | OpMode::Standby => Ok(()),
            OpMode::Transmitter => Err(SimError::WrongMode { op, mode: self.mode }),
        }
    }

    fn busy_polls_for(&self, payload: usize, format: PacketFormat, bitrate: Bitrate) -> u32 {
        let payload = match format {
            PacketFormat::Fixed(len) => len.bytes(),
            PacketFormat::Variable => payload,
        };
        let bytes = airtime::frame_bytes(payload, format.is_fixed(), self.crc);
        let airtime_ms = airtime::airtime_us(bytes, bitrate).div_ceil(1000);
        if self.poll_interval_ms == 0 {
            airtime_ms
        } else {
            airtime_ms.div_ceil(self.poll_interval_ms)
        }
    }
}

impl Default for SimulatedRadio {
    fn default() -> Self {
        Self::new(crate::config::CHANNEL_POLL_INTERVAL_MS)
    }
}

impl RadioDriver for SimulatedRadio {
    type Error = SimError;

    fn set_op_mode(&mut self, mode: OpMode) -> Result<(), Self::Error> {
        if mode != OpMode::Transmitter {
            // Leaving transmit aborts whatever is still on air
            self.busy_polls = 0;
        }
        trace!("sim: {} -> {}", self.mode, mode);
        self.mode = mode;
        Ok(())
    }

    fn set_modem(&mut self, modem: Modem) -> Result<(), Self::Error> {
        if self.mode != OpMode::Sleep {
            return Err(SimError::WrongMode {
                op: "set_modem",
                mode: self.mode,
            });
        }
        self.modem = Some(modem);
        Ok(())
    }

    fn set_frequency(&mut self, frequency: Frequency) -> Result<(), Self::Error> {
        self.require_idle("set_frequency")?;
        self.frequency = Some(frequency);
        Ok(())
    }

    fn set_bitrate(&mut self, bitrate: Bitrate) -> Result<(), Self::Error> {
        self.require_idle("set_bitrate")?;
        self.bitrate = Some(bitrate);
        Ok(())
    }

    fn set_deviation(&mut self, deviation: Deviation) -> Result<(), Self::Error> {
        self.require_idle("set_deviation")?;
        self.deviation = Some(deviation);
        Ok(())
    }

    fn set_packet_format(&mut self, format: PacketFormat) -> Result<(), Self::Error> {
        self.require_idle("set_packet_format")?;
        self.format = Some(format);
        Ok(())
    }

    fn set_crc(&mut self, enabled: bool) -> Result<(), Self::Error> {
        self.require_idle("set_crc")?;
        self.crc = enabled;
        Ok(())
    }

    fn send(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        if self.mode != OpMode::Transmitter {
            return Err(SimError::WrongMode {
                op: "send",
                mode: self.mode,
            });
        }
        let (Some(_), Some(bitrate), Some(format)) = (self.frequency, self.bitrate, self.format)
        else {
            return Err(SimError::NotConfigured);
        };
        if self.busy_polls > 0 {
            return Err(SimError::Busy);
        }

        let max = match format {
            PacketFormat::Fixed(len) => len.bytes(),
            PacketFormat::Variable => MAX_FRAME_LEN,
        };
        if frame.len() > max {
            return Err(SimError::FrameTooLong {
                len: frame.len(),
                max,
            });
        }
        self.last_frame.clear();
        self.last_frame
            .extend_from_slice(frame)
            .map_err(|()| SimError::FrameTooLong {
                len: frame.len(),
                max: MAX_FRAME_LEN,
            })?;

        self.busy_polls = self.busy_polls_for(frame.len(), format, bitrate);
        self.frames_sent += 1;
        debug!(
            "sim: frame #{} queued, {} bytes, busy for {} polls",
            self.frames_sent,
            frame.len(),
            self.busy_polls
        );
        Ok(())
    }

    fn is_channel_free(&mut self) -> Result<bool, Self::Error> {
        if self.busy_polls == 0 {
            Ok(true)
        } else {
            self.busy_polls -= 1;
            Ok(false)
        }
    }
}

/// Platform that validates the pin table and hands out a [`SimulatedRadio`]
#[derive(Clone, Copy, Debug)]
pub struct SimulatedPlatform {
    poll_interval_ms: u32,
    bus_fault: Option<&'static str>,
}

impl SimulatedPlatform {
    /// Platform whose radios expect polls every `poll_interval_ms`
    #[must_use]
    pub const fn new(poll_interval_ms: u32) -> Self {
        Self {
            poll_interval_ms,
            bus_fault: None,
        }
    }

    /// Make every bus open fail with `reason`
    #[must_use]
    pub const fn with_bus_fault(self, reason: &'static str) -> Self {
        Self {
            bus_fault: Some(reason),
            ..self
        }
    }
}

impl Default for SimulatedPlatform {
    fn default() -> Self {
        Self::new(crate::config::CHANNEL_POLL_INTERVAL_MS)
    }
}

impl Platform for SimulatedPlatform {
    type Driver = SimulatedRadio;

    fn setup(&mut self, pins: &PinMap) -> Result<Self::Driver, PlatformSetupError> {
        pins.validate()?;
        if let Some(reason) = self.bus_fault {
            return Err(PlatformSetupError::Bus(reason));
        }
        info!(
            "sim: {} pin table ok ({} DIO lines), simulated SX1276 attached",
            pins.board,
            pins.interrupt_lines()
        );
        Ok(SimulatedRadio::new(self.poll_interval_ms))
    }
}
