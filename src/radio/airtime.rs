//! Frame Airtime
//!
//! On-air duration of an FSK frame as the SX1276 packet engine builds it:
//! preamble, sync word, optional length byte, payload, optional CRC.

use crate::config::RadioConfig;
use crate::types::Bitrate;

/// Preamble length programmed at reset (RegPreambleLsb)
pub const PREAMBLE_BYTES: usize = 3;

/// Sync word length programmed at reset (RegSyncConfig, size 3 + 1)
pub const SYNC_WORD_BYTES: usize = 4;

/// CRC-16 appended when the hardware CRC is on
pub const CRC_BYTES: usize = 2;

/// Total bytes clocked out for one frame
#[must_use]
pub const fn frame_bytes(payload: usize, fixed_length: bool, crc: bool) -> usize {
    let length_byte = if fixed_length { 0 } else { 1 };
    let crc_bytes = if crc { CRC_BYTES } else { 0 };
    PREAMBLE_BYTES + SYNC_WORD_BYTES + length_byte + payload + crc_bytes
}

/// Time to clock `bytes` out at `bitrate`, rounded up to the microsecond
#[must_use]
pub const fn airtime_us(bytes: usize, bitrate: Bitrate) -> u32 {
    let bits = bytes as u64 * 8;
    let us = (bits * 1_000_000).div_ceil(bitrate.as_bps() as u64);
    if us > u32::MAX as u64 {
        u32::MAX
    } else {
        #[allow(clippy::cast_possible_truncation)]
        let us = us as u32;
        us
    }
}

/// Airtime of one full frame with this configuration
#[must_use]
pub const fn frame_airtime_us(config: &RadioConfig) -> u32 {
    let bytes = frame_bytes(
        config.payload_length.bytes(),
        config.fixed_length,
        config.crc_enabled,
    );
    airtime_us(bytes, config.bitrate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aprs_frame_size() {
        // 3 preamble + 4 sync + 64 payload, no length byte, no CRC
        assert_eq!(frame_bytes(64, true, false), 71);
    }

    #[test]
    fn variable_frame_adds_length_and_crc() {
        assert_eq!(frame_bytes(64, false, true), 74);
    }

    #[test]
    fn aprs_frame_airtime() {
        // 568 bits at 4800 bps = 118333.3 us
        assert_eq!(frame_airtime_us(&RadioConfig::APRS), 118_334);
    }

    #[test]
    fn one_byte_at_fastest_rate() {
        let fast = Bitrate::from_bps(Bitrate::MAX_BPS).unwrap();
        // 8 bits at 300 kbps = 26.67 us
        assert_eq!(airtime_us(1, fast), 27);
    }
}
