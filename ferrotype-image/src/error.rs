//! Errors raised by the image pipeline.
//!
//! These are local resource faults: they fail the current flush cycle
//! with a specific cause, and the caller clears the store and pending
//! job so the pipeline cannot wedge. They are never reported to the
//! console; the wire protocol has no vocabulary for them.

/// Errors that can occur while storing or assembling image parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImageError {
    /// Part store is at capacity; the job was rejected.
    StoreFull,
    /// Payload does not decode to a whole number of raster rows.
    PartialRow { bytes: usize },
    /// Part height is not a whole number of 8-pixel tile rows.
    UnalignedHeight { rows: u32 },
    /// Raster buffer does not match its declared dimensions.
    BadRaster,
}
