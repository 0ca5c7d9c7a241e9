//! Radio Control Logic
//!
//! The beacon loop and everything it sequences: the driver interface,
//! link state, frame payload and airtime, plus a simulated transceiver.

pub mod airtime;
pub mod beacon;
pub mod driver;
pub mod packet;
pub mod sim;
pub mod state;
