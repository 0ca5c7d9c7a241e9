//! Shared types used across the beacon
//!
//! Domain newtypes that enforce the SX1276 FSK operating limits at
//! construction time, plus the small enums the driver interface speaks.

use core::fmt;

/// Carrier frequency in Hertz with validation
///
/// Covers the three SX1276 synthesizer bands end to end
/// (137 MHz to 1020 MHz).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frequency(u32);

impl Frequency {
    /// Lowest synthesizable frequency
    pub const MIN_HZ: u32 = 137_000_000;

    /// Highest synthesizable frequency
    pub const MAX_HZ: u32 = 1_020_000_000;

    /// Create a new Frequency from Hz, returns None if out of range
    #[must_use]
    pub const fn from_hz(hz: u32) -> Option<Self> {
        if hz >= Self::MIN_HZ && hz <= Self::MAX_HZ {
            Some(Self(hz))
        } else {
            None
        }
    }

    /// Create a new Frequency from kHz
    #[must_use]
    pub const fn from_khz(khz: u32) -> Option<Self> {
        match khz.checked_mul(1000) {
            Some(hz) => Self::from_hz(hz),
            None => None,
        }
    }

    /// Get the frequency in Hz
    #[must_use]
    pub const fn as_hz(self) -> u32 {
        self.0
    }

    /// Get the frequency in kHz (truncated)
    #[must_use]
    pub const fn as_khz(self) -> u32 {
        self.0 / 1000
    }

    /// Get the frequency in MHz as floating point
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_mhz_f32(self) -> f32 {
        self.0 as f32 / 1_000_000.0
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({} Hz)", self.0)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:03} MHz", self.0 / 1_000_000, (self.0 / 1000) % 1000)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Frequency {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} Hz", self.0);
    }
}

/// FSK bitrate in bits per second
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bitrate(u32);

impl Bitrate {
    /// Slowest FSK bitrate the modem supports
    pub const MIN_BPS: u32 = 1_200;

    /// Fastest FSK bitrate the modem supports
    pub const MAX_BPS: u32 = 300_000;

    /// Create a bitrate, returns None if out of range
    #[must_use]
    pub const fn from_bps(bps: u32) -> Option<Self> {
        if bps >= Self::MIN_BPS && bps <= Self::MAX_BPS {
            Some(Self(bps))
        } else {
            None
        }
    }

    /// Get the bitrate in bps
    #[must_use]
    pub const fn as_bps(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Bitrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bps", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Bitrate {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} bps", self.0);
    }
}

/// FSK frequency deviation in Hertz
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Deviation(u32);

impl Deviation {
    /// Smallest programmable deviation
    pub const MIN_HZ: u32 = 600;

    /// Largest programmable deviation
    pub const MAX_HZ: u32 = 200_000;

    /// Create a deviation, returns None if out of range
    #[must_use]
    pub const fn from_hz(hz: u32) -> Option<Self> {
        if hz >= Self::MIN_HZ && hz <= Self::MAX_HZ {
            Some(Self(hz))
        } else {
            None
        }
    }

    /// Get the deviation in Hz
    #[must_use]
    pub const fn as_hz(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Deviation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Deviation {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} Hz", self.0);
    }
}

/// Fixed payload length in bytes
///
/// The payload-length register is 8 bits wide and a zero-length fixed
/// frame is meaningless, so the valid range is 1 to 255.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PayloadLength(u8);

impl PayloadLength {
    /// Create a payload length, returns None for zero or anything above 255
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn new(bytes: usize) -> Option<Self> {
        if bytes >= 1 && bytes <= u8::MAX as usize {
            Some(Self(bytes as u8))
        } else {
            None
        }
    }

    /// Get the length in bytes
    #[must_use]
    pub const fn bytes(self) -> usize {
        self.0 as usize
    }

    /// Check whether a buffer of `len` bytes fits
    #[must_use]
    pub const fn fits(self, len: usize) -> bool {
        len <= self.0 as usize
    }
}

impl fmt::Display for PayloadLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bytes", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for PayloadLength {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} bytes", self.0);
    }
}

/// Modem family selected in the transceiver
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Modem {
    /// Frequency-shift keying
    #[default]
    Fsk,
}

impl fmt::Display for Modem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fsk => f.write_str("FSK"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Modem {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Fsk => defmt::write!(f, "FSK"),
        }
    }
}

/// Transceiver operating mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OpMode {
    /// Lowest power, registers retained, configuration allowed
    #[default]
    Sleep,
    /// Oscillator running, ready to transmit
    Standby,
    /// RF output active
    Transmitter,
}

impl fmt::Display for OpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sleep => f.write_str("SLEEP"),
            Self::Standby => f.write_str("STANDBY"),
            Self::Transmitter => f.write_str("TX"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for OpMode {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Sleep => defmt::write!(f, "SLEEP"),
            Self::Standby => defmt::write!(f, "STANDBY"),
            Self::Transmitter => defmt::write!(f, "TX"),
        }
    }
}

/// Packet framing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PacketFormat {
    /// Every frame carries exactly this many payload bytes, no length prefix
    Fixed(PayloadLength),
    /// First payload byte carries the frame length
    Variable,
}

impl PacketFormat {
    /// Check if fixed-length framing is selected
    #[must_use]
    pub const fn is_fixed(self) -> bool {
        matches!(self, Self::Fixed(_))
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for PacketFormat {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Fixed(len) => defmt::write!(f, "Fixed({})", len),
            Self::Variable => defmt::write!(f, "Variable"),
        }
    }
}
