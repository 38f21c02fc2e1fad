//! Bounded, ordered collection of completed jobs awaiting assembly.

use alloc::vec::Vec;

use ferrotype_protocol::PrintJob;

use crate::error::ImageError;

/// Most parts one flush cycle will stack.
pub const MAX_PARTS: usize = 32;

/// Completed jobs in arrival order.
///
/// The cap is enforced at the point of insertion: a push past
/// [`MAX_PARTS`] fails immediately instead of surfacing later as a
/// half-assembled raster.
#[derive(Debug, Default)]
pub struct PartStore {
    parts: Vec<PrintJob>,
}

impl PartStore {
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Append a completed job, preserving arrival order.
    pub fn push(&mut self, job: PrintJob) -> Result<(), ImageError> {
        if self.parts.len() >= MAX_PARTS {
            return Err(ImageError::StoreFull);
        }
        self.parts.push(job);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn parts(&self) -> &[PrintJob] {
        &self.parts
    }

    pub fn clear(&mut self) {
        self.parts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> PrintJob {
        let mut job = PrintJob::default();
        job.data.extend_from_slice(&[0u8; 16]).unwrap();
        job
    }

    #[test]
    fn test_preserves_arrival_order() {
        let mut store = PartStore::new();
        for sheets in 0..3 {
            let mut job = job();
            job.sheets = sheets;
            store.push(job).unwrap();
        }

        assert_eq!(store.len(), 3);
        let sheets: Vec<u8> = store.parts().iter().map(|j| j.sheets).collect();
        assert_eq!(sheets, [0, 1, 2]);
    }

    #[test]
    fn test_rejects_push_past_capacity() {
        let mut store = PartStore::new();
        for _ in 0..MAX_PARTS {
            store.push(job()).unwrap();
        }

        // The 33rd part is rejected at the push, before any assembly.
        assert_eq!(store.push(job()), Err(ImageError::StoreFull));
        assert_eq!(store.len(), MAX_PARTS);
    }

    #[test]
    fn test_clear_empties_store() {
        let mut store = PartStore::new();
        store.push(job()).unwrap();
        assert!(!store.is_empty());

        store.clear();
        assert!(store.is_empty());
        assert!(store.push(job()).is_ok());
    }
}
