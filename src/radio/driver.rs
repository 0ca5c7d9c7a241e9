//! Radio driver interface
//!
//! The normalized set of configuration knobs and transmit primitives the
//! beacon needs from an SX1276 driver. Register access, SPI framing and
//! DIO interrupt handling all live behind this trait.

use crate::types::{Bitrate, Deviation, Frequency, Modem, OpMode, PacketFormat};

/// Transceiver driver used by the beacon
///
/// Implementations own the bus and pins for one transceiver. Calls are
/// made from a single thread of control, one at a time.
pub trait RadioDriver {
    /// Driver-specific failure
    type Error;

    /// Switch operating mode
    ///
    /// # Errors
    ///
    /// Returns the driver error if the mode change could not be applied.
    fn set_op_mode(&mut self, mode: OpMode) -> Result<(), Self::Error>;

    /// Select the modem family
    ///
    /// # Errors
    ///
    /// Returns the driver error if the modem could not be selected.
    fn set_modem(&mut self, modem: Modem) -> Result<(), Self::Error>;

    /// Program the carrier frequency
    ///
    /// # Errors
    ///
    /// Returns the driver error if the synthesizer could not be programmed.
    fn set_frequency(&mut self, frequency: Frequency) -> Result<(), Self::Error>;

    /// Program the FSK bitrate
    ///
    /// # Errors
    ///
    /// Returns the driver error if the bitrate could not be programmed.
    fn set_bitrate(&mut self, bitrate: Bitrate) -> Result<(), Self::Error>;

    /// Program the FSK frequency deviation
    ///
    /// # Errors
    ///
    /// Returns the driver error if the deviation could not be programmed.
    fn set_deviation(&mut self, deviation: Deviation) -> Result<(), Self::Error>;

    /// Select fixed or variable framing
    ///
    /// # Errors
    ///
    /// Returns the driver error if the packet engine rejected the format.
    fn set_packet_format(&mut self, format: PacketFormat) -> Result<(), Self::Error>;

    /// Enable or disable the hardware CRC
    ///
    /// # Errors
    ///
    /// Returns the driver error if the packet engine rejected the setting.
    fn set_crc(&mut self, enabled: bool) -> Result<(), Self::Error>;

    /// Hand a frame to the transmitter
    ///
    /// Returns once the frame is queued; completion is observed through
    /// [`RadioDriver::is_channel_free`].
    ///
    /// # Errors
    ///
    /// Returns the driver error if the frame could not be loaded.
    fn send(&mut self, frame: &[u8]) -> Result<(), Self::Error>;

    /// Check whether the transmitter has finished with the last frame
    ///
    /// # Errors
    ///
    /// Returns the driver error if the status could not be read.
    fn is_channel_free(&mut self) -> Result<bool, Self::Error>;
}

impl<T: RadioDriver + ?Sized> RadioDriver for &mut T {
    type Error = T::Error;

    fn set_op_mode(&mut self, mode: OpMode) -> Result<(), Self::Error> {
        T::set_op_mode(self, mode)
    }

    fn set_modem(&mut self, modem: Modem) -> Result<(), Self::Error> {
        T::set_modem(self, modem)
    }

    fn set_frequency(&mut self, frequency: Frequency) -> Result<(), Self::Error> {
        T::set_frequency(self, frequency)
    }

    fn set_bitrate(&mut self, bitrate: Bitrate) -> Result<(), Self::Error> {
        T::set_bitrate(self, bitrate)
    }

    fn set_deviation(&mut self, deviation: Deviation) -> Result<(), Self::Error> {
        T::set_deviation(self, deviation)
    }

    fn set_packet_format(&mut self, format: PacketFormat) -> Result<(), Self::Error> {
        T::set_packet_format(self, format)
    }

    fn set_crc(&mut self, enabled: bool) -> Result<(), Self::Error> {
        T::set_crc(self, enabled)
    }

    fn send(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        T::send(self, frame)
    }

    fn is_channel_free(&mut self) -> Result<bool, Self::Error> {
        T::is_channel_free(self)
    }
}
