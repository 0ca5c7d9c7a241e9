//! Error types
//!
//! Failures the beacon detects itself. Driver failures are carried
//! through unchanged as the driver's own error type.

use core::fmt;

use crate::config::pins::{PinId, PinRole};
use crate::radio::state::LinkState;

/// Failure of a single beacon transmission
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BeaconError<E> {
    /// Payload longer than the configured fixed length; nothing was sent
    OversizedPacket {
        /// Requested length
        len: usize,
        /// Configured payload length
        max: usize,
    },
    /// Link not in standby: unconfigured, or a frame is still on air
    NotReady(LinkState),
    /// Driver never reported the channel free within the configured bound
    ChannelTimeout {
        /// Time spent polling
        waited_ms: u32,
    },
    /// Driver call failed
    Driver(E),
}

impl<E> From<E> for BeaconError<E> {
    fn from(err: E) -> Self {
        Self::Driver(err)
    }
}

impl<E: fmt::Display> fmt::Display for BeaconError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OversizedPacket { len, max } => {
                write!(f, "packet size {len} exceeds payload length ({max} bytes)")
            }
            Self::NotReady(state) => write!(f, "radio not ready to transmit (state {state})"),
            Self::ChannelTimeout { waited_ms } => {
                write!(f, "channel not free after {waited_ms} ms")
            }
            Self::Driver(err) => write!(f, "radio driver error: {err}"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug + fmt::Display> std::error::Error for BeaconError<E> {}

#[cfg(feature = "embedded")]
impl<E: defmt::Format> defmt::Format for BeaconError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::OversizedPacket { len, max } => {
                defmt::write!(f, "OversizedPacket({=usize} > {=usize})", len, max);
            }
            Self::NotReady(state) => defmt::write!(f, "NotReady({})", state),
            Self::ChannelTimeout { waited_ms } => {
                defmt::write!(f, "ChannelTimeout({=u32} ms)", waited_ms);
            }
            Self::Driver(err) => defmt::write!(f, "Driver({})", err),
        }
    }
}

/// Pin or bus bring-up failure before the radio is configured
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlatformSetupError {
    /// A required signal has no pin in the table
    MissingPin(PinRole),
    /// A role is listed twice
    DuplicateRole(PinRole),
    /// Two roles share one pin
    PinConflict {
        /// Contested pin
        pin: PinId,
        /// Role listed first
        first: PinRole,
        /// Role listed second
        second: PinRole,
    },
    /// The platform could not open the bus or GPIO lines
    Bus(&'static str),
}

impl fmt::Display for PlatformSetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPin(role) => write!(f, "no pin assigned to {role}"),
            Self::DuplicateRole(role) => write!(f, "{role} assigned more than once"),
            Self::PinConflict { pin, first, second } => {
                write!(f, "pin {pin} claimed by both {first} and {second}")
            }
            Self::Bus(reason) => write!(f, "bus setup failed: {reason}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlatformSetupError {}

#[cfg(feature = "embedded")]
impl defmt::Format for PlatformSetupError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::MissingPin(role) => defmt::write!(f, "MissingPin({})", role),
            Self::DuplicateRole(role) => defmt::write!(f, "DuplicateRole({})", role),
            Self::PinConflict { pin, first, second } => {
                defmt::write!(f, "PinConflict({}: {} / {})", pin, first, second);
            }
            Self::Bus(reason) => defmt::write!(f, "Bus({=str})", reason),
        }
    }
}

/// Failure while bringing the beacon up
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LaunchError<E> {
    /// Pin or bus setup failed; the radio was never touched
    Setup(PlatformSetupError),
    /// The driver rejected the radio configuration
    Configure(E),
}

impl<E> From<PlatformSetupError> for LaunchError<E> {
    fn from(err: PlatformSetupError) -> Self {
        Self::Setup(err)
    }
}

impl<E: fmt::Display> fmt::Display for LaunchError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup(err) => write!(f, "platform setup failed: {err}"),
            Self::Configure(err) => write!(f, "radio configuration failed: {err}"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug + fmt::Display> std::error::Error for LaunchError<E> {}

#[cfg(feature = "embedded")]
impl<E: defmt::Format> defmt::Format for LaunchError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Setup(err) => defmt::write!(f, "Setup({})", err),
            Self::Configure(err) => defmt::write!(f, "Configure({})", err),
        }
    }
}
