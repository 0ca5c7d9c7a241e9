//! Beacon Packet
//!
//! Fixed-size frame payload: a short message zero-padded to the
//! configured payload length.

use crate::config::{BEACON_MESSAGE, PAYLOAD_LENGTH};

/// Fixed-size payload of exactly `N` bytes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Packet<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> Packet<N> {
    /// All-zero packet
    #[must_use]
    pub const fn zeroed() -> Self {
        Self { bytes: [0; N] }
    }

    /// Build a packet from a message, zero-padding the tail
    ///
    /// Returns None if the message is longer than `N`.
    #[must_use]
    pub fn from_message(message: &[u8]) -> Option<Self> {
        let mut bytes = [0; N];
        bytes.get_mut(..message.len())?.copy_from_slice(message);
        Some(Self { bytes })
    }

    /// Payload bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    /// Payload length
    #[must_use]
    pub const fn len(&self) -> usize {
        N
    }

    /// True only for a zero-capacity packet
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Message portion, without trailing zero padding
    #[must_use]
    pub fn message(&self) -> &[u8] {
        let end = self.bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        &self.bytes[..end]
    }
}

impl<const N: usize> Default for Packet<N> {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl<const N: usize> AsRef<[u8]> for Packet<N> {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// The beacon frame: [`BEACON_MESSAGE`] padded to [`PAYLOAD_LENGTH`]
#[must_use]
pub fn beacon_packet() -> Packet<PAYLOAD_LENGTH> {
    Packet::from_message(BEACON_MESSAGE).unwrap_or_default()
}

#[cfg(feature = "embedded")]
impl<const N: usize> defmt::Format for Packet<N> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Packet({=usize}, {=[u8]:a})", N, self.message());
    }
}
