//! SX1276 FSK Beacon Library
//!
//! Configures an SX1276 transceiver for fixed-rate FSK on the 2 m APRS
//! channel and transmits a fixed test frame at a fixed interval.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │  platform::launch  →  Beacon (configure, send, cycle, run)   │
//! ├─────────────────────────────────────────────────────────────┤
//! │                      RADIO LAYER                             │
//! │  LinkState  │  Packet  │  Airtime  │  TxStats                │
//! ├─────────────────────────────────────────────────────────────┤
//! │                 DRIVER / PLATFORM SEAM                       │
//! │  RadioDriver trait  │  Platform trait  │  PinMap tables       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Register access, SPI framing and DIO interrupts belong to whatever
//! implements [`radio::driver::RadioDriver`]. The crate ships a
//! [`radio::sim::SimulatedRadio`] for host runs and tests.
//!
//! # Design Principles
//!
//! - **Owned driver**: the beacon owns its driver session; no globals
//! - **Type-driven design**: RF parameters are validated newtypes
//! - **Bounded waits**: channel-free polling always has a limit
//! - **Explicit error handling**: all fallible operations return `Result`

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

#[macro_use]
mod fmt;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Error types
pub mod error;

/// Radio Control Logic
///
/// Beacon loop, driver interface and link state.
pub mod radio;

/// Platform bring-up
///
/// Pin table to driver, then configure and run.
pub mod platform;

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::pins::{PinMap, PinRole};
    pub use crate::config::{BeaconSettings, RadioConfig};
    pub use crate::error::{BeaconError, LaunchError, PlatformSetupError};
    pub use crate::platform::{bring_up, launch, Platform};
    pub use crate::radio::beacon::{Beacon, TxStats};
    pub use crate::radio::driver::RadioDriver;
    pub use crate::radio::packet::{beacon_packet, Packet};
    pub use crate::radio::state::LinkState;
    pub use crate::types::*;

    // Common traits
    pub use embedded_hal::delay::DelayNs;
}
