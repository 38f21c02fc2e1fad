//! Printer status byte and the state shared with the print task.
//!
//! The status byte is an OR-combination of independent conditions. Nothing
//! clears a flag automatically; each condition has a specific resolving
//! event (INIT clears the data flags, the consumer clears the printing
//! flags, fetching the finished image clears the paper jam).

use portable_atomic::{AtomicBool, AtomicU8, Ordering};

/// Typed view of the printer status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusFlags(u8);

impl StatusFlags {
    /// Received checksum did not match the computed one.
    pub const CHECKSUM_ERROR: Self = Self(1 << 0);
    /// A job is being moved into the part store.
    pub const PRINTING: Self = Self(1 << 1);
    /// Job buffer reached capacity; further data is rejected.
    pub const DATA_FULL: Self = Self(1 << 2);
    /// Data arrived that no print cycle has consumed yet.
    pub const DATA_UNPROCESSED: Self = Self(1 << 3);
    /// Unknown command or invalid declared length.
    pub const PACKET_ERROR: Self = Self(1 << 4);
    /// A finished image is still waiting to be fetched.
    pub const PAPER_JAM: Self = Self(1 << 5);
    /// Unsupported feature requested (compression).
    pub const OTHER_ERROR: Self = Self(1 << 6);
    /// Present on real hardware, never raised by the emulator.
    pub const LOW_BATTERY: Self = Self(1 << 7);

    /// No conditions active.
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every flag in `other` is active.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

/// Status byte shared between the decoder (interrupt context) and the
/// print task.
///
/// Plain load/store/or/and operations keep every access lock-free; the
/// interrupt path never waits on the task side.
pub struct SharedStatus(AtomicU8);

impl SharedStatus {
    pub const fn new() -> Self {
        Self(AtomicU8::new(0))
    }

    pub fn get(&self) -> StatusFlags {
        StatusFlags(self.0.load(Ordering::Relaxed))
    }

    /// Raw status byte as transmitted to the peer.
    pub fn byte(&self) -> u8 {
        self.0.load(Ordering::Relaxed)
    }

    pub fn set(&self, flags: StatusFlags) {
        self.0.fetch_or(flags.bits(), Ordering::Relaxed);
    }

    pub fn clear(&self, flags: StatusFlags) {
        self.0.fetch_and(!flags.bits(), Ordering::Relaxed);
    }

    /// Drop every active condition (link reset).
    pub fn reset(&self) {
        self.0.store(0, Ordering::Relaxed);
    }
}

impl Default for SharedStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Decoder-visible state owned by the rest of the firmware.
pub struct LinkShared {
    /// Aggregated status byte.
    pub status: SharedStatus,
    /// True while a finished image sits unconsumed; raises PAPER_JAM on
    /// the next packet instead of silently discarding the image.
    pub artifact_pending: AtomicBool,
}

impl LinkShared {
    pub const fn new() -> Self {
        Self {
            status: SharedStatus::new(),
            artifact_pending: AtomicBool::new(false),
        }
    }
}

impl Default for LinkShared {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_insert_remove() {
        let mut flags = StatusFlags::empty();
        assert!(flags.is_empty());

        flags.insert(StatusFlags::DATA_FULL);
        flags.insert(StatusFlags::PAPER_JAM);
        assert!(flags.contains(StatusFlags::DATA_FULL));
        assert!(flags.contains(StatusFlags::PAPER_JAM));
        assert!(!flags.contains(StatusFlags::CHECKSUM_ERROR));

        flags.remove(StatusFlags::DATA_FULL);
        assert!(!flags.contains(StatusFlags::DATA_FULL));
        assert!(flags.contains(StatusFlags::PAPER_JAM));
    }

    #[test]
    fn test_flag_bit_positions() {
        // Bit layout is part of the wire protocol.
        assert_eq!(StatusFlags::CHECKSUM_ERROR.bits(), 0x01);
        assert_eq!(StatusFlags::PRINTING.bits(), 0x02);
        assert_eq!(StatusFlags::DATA_FULL.bits(), 0x04);
        assert_eq!(StatusFlags::DATA_UNPROCESSED.bits(), 0x08);
        assert_eq!(StatusFlags::PACKET_ERROR.bits(), 0x10);
        assert_eq!(StatusFlags::PAPER_JAM.bits(), 0x20);
        assert_eq!(StatusFlags::OTHER_ERROR.bits(), 0x40);
        assert_eq!(StatusFlags::LOW_BATTERY.bits(), 0x80);
    }

    #[test]
    fn test_shared_status_set_clear() {
        let shared = SharedStatus::new();
        shared.set(StatusFlags::CHECKSUM_ERROR);
        shared.set(StatusFlags::DATA_UNPROCESSED);
        assert_eq!(shared.byte(), 0x09);

        shared.clear(StatusFlags::CHECKSUM_ERROR);
        assert_eq!(shared.get(), StatusFlags::DATA_UNPROCESSED);

        shared.reset();
        assert!(shared.get().is_empty());
    }
}
