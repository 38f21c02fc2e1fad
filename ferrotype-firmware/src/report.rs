//! Finished-image hand-over point.
//!
//! The print task parks the encoded PNG here; whatever serves the host
//! side (currently the fetch button task) takes it out. While an image
//! sits unconsumed the decoder reports PAPER_JAM instead of letting a
//! new print cycle overwrite it.

use core::cell::RefCell;

use alloc::vec::Vec;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use portable_atomic::Ordering;

use ferrotype_protocol::StatusFlags;

use crate::channels::{LINK, LINK_CONNECTED, PART_COUNT};

static ARTIFACT: Mutex<CriticalSectionRawMutex, RefCell<Option<Vec<u8>>>> =
    Mutex::new(RefCell::new(None));

/// Park a finished PNG. The decoder starts raising PAPER_JAM on the
/// next packet until [`take`] consumes it.
pub fn publish(png: Vec<u8>) {
    ARTIFACT.lock(|cell| cell.replace(Some(png)));
    LINK.artifact_pending.store(true, Ordering::Relaxed);
}

/// True while a finished image waits to be fetched.
pub fn pending() -> bool {
    LINK.artifact_pending.load(Ordering::Relaxed)
}

/// Size of the parked image, zero when none.
pub fn len() -> usize {
    ARTIFACT.lock(|cell| cell.borrow().as_ref().map_or(0, Vec::len))
}

/// Consume the parked image, clearing the jam condition.
pub fn take() -> Option<Vec<u8>> {
    let png = ARTIFACT.lock(|cell| cell.take());
    if png.is_some() {
        LINK.artifact_pending.store(false, Ordering::Relaxed);
        LINK.status.clear(StatusFlags::PAPER_JAM);
    }
    png
}

/// Parts accumulated toward the image currently being received.
pub fn parts_accumulated() -> usize {
    PART_COUNT.load(Ordering::Relaxed)
}

/// Whether the detect pin currently sees a cable.
pub fn link_connected() -> bool {
    LINK_CONNECTED.load(Ordering::Relaxed)
}

/// Raw status byte as the peer would read it.
pub fn status_byte() -> u8 {
    LINK.status.byte()
}
