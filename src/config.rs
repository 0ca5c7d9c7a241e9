//! System configuration and radio constants
//!
//! Compile-time constants for the beacon: RF parameters, loop timing,
//! and the hardware pin tables for the supported boards.

use crate::types::{Bitrate, Deviation, Frequency, Modem, PacketFormat, PayloadLength};

/// Carrier frequency: 144.39 MHz, the North American APRS channel
pub const RF_FREQUENCY_HZ: u32 = 144_390_000;

/// FSK bitrate
pub const FSK_BITRATE_BPS: u32 = 4_800;

/// FSK frequency deviation
pub const FSK_DEVIATION_HZ: u32 = 5_000;

/// Fixed packet size
pub const PAYLOAD_LENGTH: usize = 64;

/// Delay between consecutive beacon transmissions
pub const BEACON_INTERVAL_MS: u32 = 5_000;

/// Delay between channel-free polls while a frame is on air
pub const CHANNEL_POLL_INTERVAL_MS: u32 = 10;

/// Upper bound on the channel-free wait before reporting a timeout
///
/// A full 64-byte frame at 4800 bps is on air for roughly 120 ms.
pub const CHANNEL_FREE_TIMEOUT_MS: u32 = 2_000;

/// Greeting carried by the beacon frame, zero-padded to [`PAYLOAD_LENGTH`]
pub const BEACON_MESSAGE: &[u8] = b"Hello APRS!";

/// Immutable radio configuration
///
/// Built once at startup and owned by the beacon for the life of the
/// process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RadioConfig {
    /// Modem family
    pub modem: Modem,
    /// Carrier frequency
    pub frequency: Frequency,
    /// Bitrate
    pub bitrate: Bitrate,
    /// Frequency deviation
    pub deviation: Deviation,
    /// Payload length of every frame
    pub payload_length: PayloadLength,
    /// Fixed-length framing (no length prefix)
    pub fixed_length: bool,
    /// Hardware CRC appended to each frame
    pub crc_enabled: bool,
}

impl RadioConfig {
    /// 144.39 MHz, 4800 bps, 5 kHz deviation, 64-byte fixed frames, CRC off
    pub const APRS: Self = Self {
        modem: Modem::Fsk,
        frequency: match Frequency::from_hz(RF_FREQUENCY_HZ) {
            Some(f) => f,
            None => panic!("RF_FREQUENCY_HZ out of range"),
        },
        bitrate: match Bitrate::from_bps(FSK_BITRATE_BPS) {
            Some(b) => b,
            None => panic!("FSK_BITRATE_BPS out of range"),
        },
        deviation: match Deviation::from_hz(FSK_DEVIATION_HZ) {
            Some(d) => d,
            None => panic!("FSK_DEVIATION_HZ out of range"),
        },
        payload_length: match PayloadLength::new(PAYLOAD_LENGTH) {
            Some(l) => l,
            None => panic!("PAYLOAD_LENGTH out of range"),
        },
        fixed_length: true,
        crc_enabled: false,
    };

    /// Packet framing the driver should be programmed with
    #[must_use]
    pub const fn packet_format(&self) -> PacketFormat {
        if self.fixed_length {
            PacketFormat::Fixed(self.payload_length)
        } else {
            PacketFormat::Variable
        }
    }
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self::APRS
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RadioConfig {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Radio({}, {}, {}, dev {}, {})",
            self.modem,
            self.frequency,
            self.bitrate,
            self.deviation,
            self.packet_format()
        );
    }
}

/// Beacon loop timing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BeaconSettings {
    /// Sleep between the end of one transmission and the start of the next
    pub interval_ms: u32,
    /// Delay between channel-free polls
    pub poll_interval_ms: u32,
    /// Give up waiting for channel-free after this long
    pub max_channel_wait_ms: u32,
}

impl BeaconSettings {
    /// Timing used by the beacon binary
    pub const DEFAULT: Self = Self {
        interval_ms: BEACON_INTERVAL_MS,
        poll_interval_ms: CHANNEL_POLL_INTERVAL_MS,
        max_channel_wait_ms: CHANNEL_FREE_TIMEOUT_MS,
    };

    /// Maximum number of channel-free polls before timing out
    #[must_use]
    pub const fn max_polls(&self) -> u32 {
        if self.poll_interval_ms == 0 {
            self.max_channel_wait_ms
        } else {
            self.max_channel_wait_ms.div_ceil(self.poll_interval_ms)
        }
    }
}

impl Default for BeaconSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Pin assignments for the supported boards
pub mod pins {
    //! Signal-role to pin tables
    //!
    //! The driver receives one of these tables at construction time. A
    //! table is plain data; [`PinMap::validate`] checks it is complete and
    //! free of conflicts before any bus is opened.

    use core::fmt;

    use crate::error::PlatformSetupError;

    /// Logical signal role of a transceiver pin
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum PinRole {
        /// SPI clock
        Sclk,
        /// SPI controller-out
        Mosi,
        /// SPI controller-in
        Miso,
        /// SPI chip select
        Cs,
        /// Transceiver reset
        Reset,
        /// Interrupt line DIO0
        Dio0,
        /// Interrupt line DIO1
        Dio1,
        /// Interrupt line DIO2
        Dio2,
        /// Interrupt line DIO3
        Dio3,
        /// Interrupt line DIO4
        Dio4,
        /// Interrupt line DIO5
        Dio5,
    }

    impl PinRole {
        /// Roles without which the transceiver cannot be driven
        pub const REQUIRED: [Self; 5] = [Self::Sclk, Self::Mosi, Self::Miso, Self::Cs, Self::Reset];

        /// Check if this is one of the DIO interrupt lines
        #[must_use]
        pub const fn is_interrupt(self) -> bool {
            matches!(
                self,
                Self::Dio0 | Self::Dio1 | Self::Dio2 | Self::Dio3 | Self::Dio4 | Self::Dio5
            )
        }

        /// Short signal name
        #[must_use]
        pub const fn name(self) -> &'static str {
            match self {
                Self::Sclk => "SCLK",
                Self::Mosi => "MOSI",
                Self::Miso => "MISO",
                Self::Cs => "CS",
                Self::Reset => "RESET",
                Self::Dio0 => "DIO0",
                Self::Dio1 => "DIO1",
                Self::Dio2 => "DIO2",
                Self::Dio3 => "DIO3",
                Self::Dio4 => "DIO4",
                Self::Dio5 => "DIO5",
            }
        }
    }

    impl fmt::Display for PinRole {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.name())
        }
    }

    #[cfg(feature = "embedded")]
    impl defmt::Format for PinRole {
        fn format(&self, f: defmt::Formatter) {
            defmt::write!(f, "{=str}", self.name());
        }
    }

    /// Physical pin identifier as printed on the board schematic
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PinId(pub &'static str);

    impl fmt::Display for PinId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.0)
        }
    }

    #[cfg(feature = "embedded")]
    impl defmt::Format for PinId {
        fn format(&self, f: defmt::Formatter) {
            defmt::write!(f, "{=str}", self.0);
        }
    }

    /// One `{role: pin}` entry
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct PinAssignment {
        /// Signal role
        pub role: PinRole,
        /// Pin carrying it
        pub pin: PinId,
    }

    impl PinAssignment {
        /// Create an assignment
        #[must_use]
        pub const fn new(role: PinRole, pin: &'static str) -> Self {
            Self { role, pin: PinId(pin) }
        }
    }

    /// Pin table for one board
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct PinMap {
        /// Board name, for logs
        pub board: &'static str,
        /// Assignments, in any order
        pub entries: &'static [PinAssignment],
    }

    impl PinMap {
        /// Look up the pin assigned to a role
        #[must_use]
        pub fn pin(&self, role: PinRole) -> Option<PinId> {
            self.entries.iter().find(|e| e.role == role).map(|e| e.pin)
        }

        /// Number of DIO interrupt lines wired
        #[must_use]
        pub fn interrupt_lines(&self) -> usize {
            self.entries.iter().filter(|e| e.role.is_interrupt()).count()
        }

        /// Check the table is complete and conflict free
        ///
        /// # Errors
        ///
        /// Returns the first problem found: a required role without a pin,
        /// a role listed twice, or one pin claimed by two roles.
        pub fn validate(&self) -> Result<(), PlatformSetupError> {
            for (i, entry) in self.entries.iter().enumerate() {
                for other in &self.entries[i + 1..] {
                    if other.role == entry.role {
                        return Err(PlatformSetupError::DuplicateRole(entry.role));
                    }
                    if other.pin == entry.pin {
                        return Err(PlatformSetupError::PinConflict {
                            pin: entry.pin,
                            first: entry.role,
                            second: other.role,
                        });
                    }
                }
            }

            match PinRole::REQUIRED.iter().find(|role| self.pin(**role).is_none()) {
                Some(missing) => Err(PlatformSetupError::MissingPin(*missing)),
                None => Ok(()),
            }
        }
    }

    /// STM32 Nucleo running the mbed SX1276 shield layout
    pub const NUCLEO_MBED: PinMap = PinMap {
        board: "nucleo-mbed",
        entries: &[
            PinAssignment::new(PinRole::Mosi, "PA_7"),
            PinAssignment::new(PinRole::Miso, "PA_6"),
            PinAssignment::new(PinRole::Sclk, "PA_5"),
            PinAssignment::new(PinRole::Cs, "PA_4"),
            PinAssignment::new(PinRole::Reset, "PB_0"),
            PinAssignment::new(PinRole::Dio0, "PA_3"),
            PinAssignment::new(PinRole::Dio1, "PA_2"),
            PinAssignment::new(PinRole::Dio2, "PA_1"),
            PinAssignment::new(PinRole::Dio3, "PA_0"),
            PinAssignment::new(PinRole::Dio4, "PB_1"),
            PinAssignment::new(PinRole::Dio5, "PB_2"),
        ],
    };

    /// Raspberry Pi 4 header, SPI0 with CE0 (BCM numbering)
    pub const RASPBERRY_PI_4: PinMap = PinMap {
        board: "raspberry-pi-4",
        entries: &[
            PinAssignment::new(PinRole::Mosi, "GPIO10"),
            PinAssignment::new(PinRole::Miso, "GPIO9"),
            PinAssignment::new(PinRole::Sclk, "GPIO11"),
            PinAssignment::new(PinRole::Cs, "GPIO8"),
            PinAssignment::new(PinRole::Reset, "GPIO18"),
            PinAssignment::new(PinRole::Dio0, "GPIO24"),
            PinAssignment::new(PinRole::Dio1, "GPIO25"),
        ],
    };
}
