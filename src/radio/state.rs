//! Link State
//!
//! Mirror of the transceiver operating mode as sequenced by the beacon.
//! It records the last mode the driver accepted; it does not guard the
//! driver. The beacon gates sends on [`LinkState::is_ready`] and reports
//! any move outside [`LinkState::can_enter`].

use core::fmt;

use crate::types::OpMode;

/// Operating state of the radio link
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LinkState {
    /// Powered down or not yet configured
    #[default]
    Sleep,
    /// Configured and ready to transmit
    Standby,
    /// A frame is on air
    Transmitting,
}

impl LinkState {
    /// Check if the beacon sequence ever moves from `self` to `next`
    ///
    /// Transmit is only entered from standby, and a frame on air only
    /// ends by returning to standby.
    #[must_use]
    pub const fn can_enter(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Sleep | Self::Standby, Self::Sleep | Self::Standby)
                | (Self::Transmitting, Self::Standby)
                | (Self::Standby, Self::Transmitting)
        )
    }

    /// Check if the link can accept a frame
    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Standby)
    }

    /// Driver operating mode that realizes this state
    #[must_use]
    pub const fn op_mode(self) -> OpMode {
        match self {
            Self::Sleep => OpMode::Sleep,
            Self::Standby => OpMode::Standby,
            Self::Transmitting => OpMode::Transmitter,
        }
    }
}

impl From<OpMode> for LinkState {
    fn from(mode: OpMode) -> Self {
        match mode {
            OpMode::Sleep => Self::Sleep,
            OpMode::Standby => Self::Standby,
            OpMode::Transmitter => Self::Transmitting,
        }
    }
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sleep => f.write_str("SLEEP"),
            Self::Standby => f.write_str("STANDBY"),
            Self::Transmitting => f.write_str("TX"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for LinkState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Sleep => defmt::write!(f, "SLEEP"),
            Self::Standby => defmt::write!(f, "STANDBY"),
            Self::Transmitting => defmt::write!(f, "TX"),
        }
    }
}
