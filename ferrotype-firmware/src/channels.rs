//! Inter-task communication channels
//!
//! Defines the static channels and shared state used for communication
//! between Embassy tasks. Uses embassy-sync primitives for safe async
//! communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use portable_atomic::{AtomicBool, AtomicU64, AtomicUsize};

use ferrotype_protocol::{LinkShared, PrintJob};

/// Channel capacity for completed print jobs
const JOB_CHANNEL_SIZE: usize = 2;

/// Channel capacity for link control messages
const CTRL_CHANNEL_SIZE: usize = 4;

/// Control messages for the link task, which owns the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkCtrl {
    /// Drop mid-packet session state after the link has gone quiet.
    ResetSession,
    /// Drop a pending job that never reached a PRINT command.
    DiscardJob,
}

/// Completed print jobs moving from the link task to the print task.
/// Jobs are owned values; sending one transfers the whole buffer.
pub static JOB_CHANNEL: Channel<CriticalSectionRawMutex, PrintJob, JOB_CHANNEL_SIZE> =
    Channel::new();

/// Control messages into the link task (from the idle supervisor and
/// the print task's flush cycle).
pub static CTRL_CHANNEL: Channel<CriticalSectionRawMutex, LinkCtrl, CTRL_CHANNEL_SIZE> =
    Channel::new();

/// Status byte and artifact flag shared with the decoder.
pub static LINK: LinkShared = LinkShared::new();

/// Tick timestamp of the most recent clock edge (updated by the link task)
pub static LAST_EDGE: AtomicU64 = AtomicU64::new(0);

/// Parts accumulated toward the current image (updated by the print task)
pub static PART_COUNT: AtomicUsize = AtomicUsize::new(0);

/// Level of the link detect pin (sampled by the idle supervisor)
pub static LINK_CONNECTED: AtomicBool = AtomicBool::new(false);
