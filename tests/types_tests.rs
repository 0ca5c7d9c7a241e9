//! Types Tests
//!
//! Validation of the RF parameter newtypes and the packet payload.
//! Run with: cargo test --features std --test types_tests

use fsk_beacon::config::PAYLOAD_LENGTH;
use fsk_beacon::radio::packet::{beacon_packet, Packet};
use fsk_beacon::types::*;

// =============================================================================
// Frequency Tests
// =============================================================================

#[test]
fn frequency_valid_aprs() {
    let freq = Frequency::from_hz(144_390_000).unwrap();
    assert_eq!(freq.as_hz(), 144_390_000);
    assert_eq!(freq.as_khz(), 144_390);
    assert!((freq.as_mhz_f32() - 144.39).abs() < 0.001);
}

#[test]
fn frequency_band_edges() {
    assert!(Frequency::from_hz(Frequency::MIN_HZ).is_some());
    assert!(Frequency::from_hz(Frequency::MAX_HZ).is_some());
    assert!(Frequency::from_hz(Frequency::MIN_HZ - 1).is_none());
    assert!(Frequency::from_hz(Frequency::MAX_HZ + 1).is_none());
}

#[test]
fn frequency_hf_rejected() {
    assert!(Frequency::from_hz(7_074_000).is_none());
}

#[test]
fn frequency_from_khz() {
    assert_eq!(Frequency::from_khz(433_920).unwrap().as_hz(), 433_920_000);
    assert!(Frequency::from_khz(u32::MAX).is_none());
}

#[test]
fn frequency_display() {
    let freq = Frequency::from_hz(144_390_000).unwrap();
    assert_eq!(freq.to_string(), "144.390 MHz");
    assert_eq!(format!("{freq:?}"), "Frequency(144390000 Hz)");
}

// =============================================================================
// Modulation Parameter Tests
// =============================================================================

#[test]
fn bitrate_range() {
    assert_eq!(Bitrate::from_bps(4_800).unwrap().as_bps(), 4_800);
    assert!(Bitrate::from_bps(1_199).is_none());
    assert!(Bitrate::from_bps(300_001).is_none());
    assert_eq!(Bitrate::from_bps(4_800).unwrap().to_string(), "4800 bps");
}

#[test]
fn deviation_range() {
    assert_eq!(Deviation::from_hz(5_000).unwrap().as_hz(), 5_000);
    assert!(Deviation::from_hz(599).is_none());
    assert!(Deviation::from_hz(200_001).is_none());
}

#[test]
fn payload_length_range() {
    assert!(PayloadLength::new(0).is_none());
    assert!(PayloadLength::new(256).is_none());
    assert_eq!(PayloadLength::new(255).unwrap().bytes(), 255);
}

#[test]
fn payload_length_fits() {
    let len = PayloadLength::new(64).unwrap();
    assert!(len.fits(0));
    assert!(len.fits(64));
    assert!(!len.fits(65));
}

#[test]
fn packet_format_fixed() {
    let len = PayloadLength::new(64).unwrap();
    assert!(PacketFormat::Fixed(len).is_fixed());
    assert!(!PacketFormat::Variable.is_fixed());
}

#[test]
fn op_mode_default_sleep() {
    assert_eq!(OpMode::default(), OpMode::Sleep);
    assert_eq!(OpMode::Transmitter.to_string(), "TX");
}

// =============================================================================
// Packet Tests
// =============================================================================

#[test]
fn packet_pads_message() {
    let packet = Packet::<8>::from_message(b"abc").unwrap();
    assert_eq!(packet.as_bytes(), b"abc\0\0\0\0\0");
    assert_eq!(packet.len(), 8);
    assert_eq!(packet.message(), b"abc");
}

#[test]
fn packet_exact_fit() {
    let packet = Packet::<3>::from_message(b"abc").unwrap();
    assert_eq!(packet.as_bytes(), b"abc");
}

#[test]
fn packet_message_too_long() {
    assert!(Packet::<2>::from_message(b"abc").is_none());
}

#[test]
fn packet_zeroed() {
    let packet = Packet::<64>::default();
    assert!(packet.as_bytes().iter().all(|&b| b == 0));
    assert!(packet.message().is_empty());
    assert!(!packet.is_empty());
}

#[test]
fn beacon_packet_contents() {
    let packet = beacon_packet();
    assert_eq!(packet.len(), PAYLOAD_LENGTH);
    assert_eq!(packet.message(), b"Hello APRS!");
    assert_eq!(packet.as_ref().len(), 64);
}
