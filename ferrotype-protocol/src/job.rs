//! Print job payload accumulated across DATA packets.

use heapless::Vec;

/// Tile data capacity of a single job.
pub const JOB_CAPACITY: usize = 0x2000;

/// One print job: the parameters carried by a PRINT packet plus the tile
/// data accumulated by the DATA packets before it.
///
/// Only the decoder writes to a job. A completed job is *moved* to the
/// print task through the handoff channel, so the decoder always starts
/// the next job on an empty buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrintJob {
    /// Number of sheets to print (0x00 is a line feed only).
    pub sheets: u8,
    /// Margins nibbles: high = before, low = after.
    pub margins: u8,
    /// 2-bit-per-color palette assignment.
    pub palette: u8,
    /// 7-bit exposure, 0x40 neutral.
    pub exposure: u8,
    /// Raw 2bpp tile planes.
    pub data: Vec<u8, JOB_CAPACITY>,
}

impl PrintJob {
    pub fn clear(&mut self) {
        self.sheets = 0;
        self.margins = 0;
        self.palette = 0;
        self.exposure = 0;
        self.data.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
