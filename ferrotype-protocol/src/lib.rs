//! Game Boy Printer link-cable protocol
//!
//! This crate implements the receiving side of the printer's serial
//! protocol: a bit-clocked link where the console drives the clock and
//! the printer answers with an ack byte and a status byte per packet.
//!
//! # Protocol overview
//!
//! Every packet on the wire has the same shape:
//! ```text
//! ┌──────┬─────────┬─────────────┬────────┬─────────┬──────────┬─────┬────────┐
//! │ SYNC │ COMMAND │ COMPRESSION │ LENGTH │ PAYLOAD │ CHECKSUM │ ACK │ STATUS │
//! │ 2B   │ 1B      │ 1B          │ 2B LE  │ 0-640B  │ 2B LE    │ 1B  │ 1B     │
//! └──────┴─────────┴─────────────┴────────┴─────────┴──────────┴─────┴────────┘
//! ```
//!
//! Bits arrive MSB-first, one per rising clock edge. The checksum is a
//! 16-bit wrapping sum over the command, compression, length, and payload
//! bytes. The ack and status bytes flow the other way on the same clock.
//!
//! The decoder runs in interrupt context: one call per clock edge with
//! bounded work, no blocking, no allocation. Errors never abort reception;
//! the protocol has no abort primitive, so faults are reported to the peer
//! through status bits on its next status query.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod decoder;
pub mod job;
pub mod packet;
pub mod status;

pub use decoder::{EdgeOutput, LinkDecoder, LinkEvent};
pub use job::{PrintJob, JOB_CAPACITY};
pub use packet::{Command, Packet, ACK_BYTE, HEADER_LEN, MAX_DATA_LENGTH, SYNC_WORD};
pub use status::{LinkShared, SharedStatus, StatusFlags};
