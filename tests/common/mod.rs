//! Shared test doubles: a recording radio driver and a recording delay.

#![allow(dead_code)]

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use fsk_beacon::config::pins::PinMap;
use fsk_beacon::error::PlatformSetupError;
use fsk_beacon::platform::Platform;
use fsk_beacon::radio::driver::RadioDriver;
use fsk_beacon::types::{Bitrate, Deviation, Frequency, Modem, OpMode, PacketFormat};
use embedded_hal::delay::DelayNs;

/// One driver call as seen by the fake
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    OpMode(OpMode),
    Modem(Modem),
    Frequency(u32),
    Bitrate(u32),
    Deviation(u32),
    PacketFormat(PacketFormat),
    Crc(bool),
    Send(Vec<u8>),
    Poll,
}

/// Injected driver failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FakeError(pub &'static str);

impl fmt::Display for FakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "injected failure in {}", self.0)
    }
}

impl std::error::Error for FakeError {}

/// Driver that records every call
#[derive(Clone, Debug, Default)]
pub struct FakeRadio {
    pub calls: Vec<Call>,
    /// Polls that report busy after each send
    pub busy_polls: u32,
    /// Never report the channel free
    pub stuck: bool,
    /// Operation name that fails
    pub fail_on: Option<&'static str>,
    /// Call that fails once, on its nth occurrence
    pub fail_nth: Option<(Call, u32)>,
    remaining_busy: u32,
}

impl FakeRadio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn busy_for(polls: u32) -> Self {
        Self {
            busy_polls: polls,
            ..Self::default()
        }
    }

    pub fn stuck() -> Self {
        Self {
            stuck: true,
            ..Self::default()
        }
    }

    pub fn failing(op: &'static str) -> Self {
        Self {
            fail_on: Some(op),
            ..Self::default()
        }
    }

    /// Fail only the `nth` (1-based) occurrence of `call`
    pub fn failing_nth(call: Call, nth: u32) -> Self {
        Self {
            fail_nth: Some((call, nth)),
            ..Self::default()
        }
    }

    /// Frames handed to the transmit primitive
    pub fn sent_frames(&self) -> Vec<Vec<u8>> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Send(frame) => Some(frame.clone()),
                _ => None,
            })
            .collect()
    }

    /// Operating modes requested, in order
    pub fn op_modes(&self) -> Vec<OpMode> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::OpMode(mode) => Some(*mode),
                _ => None,
            })
            .collect()
    }

    pub fn polls(&self) -> usize {
        self.calls.iter().filter(|c| **c == Call::Poll).count()
    }

    fn record(&mut self, op: &'static str, call: Call) -> Result<(), FakeError> {
        let fail_now = match self.fail_nth.as_mut() {
            Some((target, remaining)) if *target == call => {
                *remaining -= 1;
                *remaining == 0
            }
            _ => false,
        };
        if fail_now {
            self.fail_nth = None;
        }
        self.calls.push(call);
        if fail_now || self.fail_on == Some(op) {
            Err(FakeError(op))
        } else {
            Ok(())
        }
    }
}

impl RadioDriver for FakeRadio {
    type Error = FakeError;

    fn set_op_mode(&mut self, mode: OpMode) -> Result<(), Self::Error> {
        self.record("set_op_mode", Call::OpMode(mode))
    }

    fn set_modem(&mut self, modem: Modem) -> Result<(), Self::Error> {
        self.record("set_modem", Call::Modem(modem))
    }

    fn set_frequency(&mut self, frequency: Frequency) -> Result<(), Self::Error> {
        self.record("set_frequency", Call::Frequency(frequency.as_hz()))
    }

    fn set_bitrate(&mut self, bitrate: Bitrate) -> Result<(), Self::Error> {
        self.record("set_bitrate", Call::Bitrate(bitrate.as_bps()))
    }

    fn set_deviation(&mut self, deviation: Deviation) -> Result<(), Self::Error> {
        self.record("set_deviation", Call::Deviation(deviation.as_hz()))
    }

    fn set_packet_format(&mut self, format: PacketFormat) -> Result<(), Self::Error> {
        self.record("set_packet_format", Call::PacketFormat(format))
    }

    fn set_crc(&mut self, enabled: bool) -> Result<(), Self::Error> {
        self.record("set_crc", Call::Crc(enabled))
    }

    fn send(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        self.record("send", Call::Send(frame.to_vec()))?;
        self.remaining_busy = self.busy_polls;
        Ok(())
    }

    fn is_channel_free(&mut self) -> Result<bool, Self::Error> {
        self.record("is_channel_free", Call::Poll)?;
        if self.stuck {
            return Ok(false);
        }
        if self.remaining_busy > 0 {
            self.remaining_busy -= 1;
            Ok(false)
        } else {
            Ok(true)
        }
    }
}

/// Delay that records requested durations in milliseconds instead of sleeping
#[derive(Clone, Debug, Default)]
pub struct FakeDelay {
    log: Rc<RefCell<Vec<u32>>>,
}

impl FakeDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delays_ms(&self) -> Vec<u32> {
        self.log.borrow().clone()
    }

    pub fn total_ms(&self) -> u64 {
        self.log.borrow().iter().map(|&ms| u64::from(ms)).sum()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(ms);
    }
}

/// Platform handing out a prepared fake, or failing setup
#[derive(Debug, Default)]
pub struct FakePlatform {
    pub radio: Option<FakeRadio>,
    pub fail: Option<PlatformSetupError>,
    pub setups: u32,
}

impl FakePlatform {
    pub fn with_radio(radio: FakeRadio) -> Self {
        Self {
            radio: Some(radio),
            ..Self::default()
        }
    }

    pub fn failing(err: PlatformSetupError) -> Self {
        Self {
            fail: Some(err),
            ..Self::default()
        }
    }
}

impl Platform for FakePlatform {
    type Driver = FakeRadio;

    fn setup(&mut self, _pins: &PinMap) -> Result<Self::Driver, PlatformSetupError> {
        self.setups += 1;
        if let Some(err) = self.fail {
            return Err(err);
        }
        Ok(self.radio.take().unwrap_or_default())
    }
}
