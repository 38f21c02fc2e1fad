//! Packet header types and wire constants.

/// 16-bit pattern that marks the start of every packet.
pub const SYNC_WORD: u16 = 0x8833;

/// Fixed acknowledge byte sent after the checksum, valid packet or not.
pub const ACK_BYTE: u8 = 0x81;

/// Header size in bytes: command, compression, length low, length high.
pub const HEADER_LEN: usize = 4;

/// Largest payload a DATA packet may declare.
pub const MAX_DATA_LENGTH: usize = 0x280;

/// Packet commands understood by the printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Command {
    /// Clear the pending job and start a new transmission.
    Init = 0x01,
    /// Carry sheet/margin/palette/exposure parameters and start printing.
    Print = 0x02,
    /// Append tile data to the job buffer.
    Data = 0x04,
    /// Poll the printer status byte.
    Status = 0x0F,
}

impl Command {
    /// Decode a command byte. Any other value is a packet error.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(Command::Init),
            0x02 => Some(Command::Print),
            0x04 => Some(Command::Data),
            0x0F => Some(Command::Status),
            _ => None,
        }
    }

    /// Check the declared payload length against this command.
    pub fn length_valid(self, length: u16) -> bool {
        match self {
            Command::Print => length == 4,
            Command::Data => (length as usize) <= MAX_DATA_LENGTH,
            Command::Init | Command::Status => length == 0,
        }
    }
}

/// Header fields and checksums of the packet currently on the wire.
///
/// The command is kept as the raw byte: an unknown command is flagged as a
/// packet error but reception continues so the peer still gets its status
/// byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Packet {
    pub command: u8,
    pub compression: u8,
    pub length: u16,
    pub computed_checksum: u16,
    pub received_checksum: u16,
}

impl Packet {
    /// Fold one byte into the running checksum.
    pub fn add_to_checksum(&mut self, byte: u8) {
        self.computed_checksum = self.computed_checksum.wrapping_add(byte as u16);
    }
}
