//! Interrupt-driven link decoder.
//!
//! [`LinkDecoder::on_clock_edge`] is called once per rising clock edge. It
//! does a bounded amount of work, never blocks, and never allocates: the
//! console clocks the link at up to 8 kHz and the response bit has to be
//! on the line before the next edge.
//!
//! The decoder has two states: syncing (shifting bits into the 16-bit
//! register until the sync word appears) and reading a packet (assembling
//! bytes and dispatching them by index). Protocol faults never abort
//! reception; they become status bits the peer sees on its next poll.

use portable_atomic::Ordering;

use crate::job::PrintJob;
use crate::packet::{Command, Packet, ACK_BYTE, HEADER_LEN, SYNC_WORD};
use crate::status::{LinkShared, StatusFlags};

/// Notable moments in a packet cycle, surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    /// PRINT parameters complete; the pending job should be taken and
    /// handed to the print task.
    JobReady,
    /// Header, payload, checksum, and response exchange all done.
    PacketComplete,
}

/// Per-edge output of the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeOutput {
    /// Level to drive on the tx line before the next rising edge.
    pub tx_high: bool,
    pub event: Option<LinkEvent>,
}

/// Link session state machine.
///
/// The session registers (bit/byte counters, shift registers, reading
/// flag) are only ever reset together: on a sync match and on
/// [`reset_session`](Self::reset_session) when the idle supervisor decides
/// the link is gone.
#[derive(Debug, Default)]
pub struct LinkDecoder {
    /// Bit index within the current byte, 0-7.
    bit_counter: u8,
    /// Byte index within the current packet.
    byte_counter: usize,
    /// A sync word was seen and the packet has not completed yet.
    reading_packet: bool,
    /// 8-bit receive shift register.
    rx_byte: u8,
    /// 16-bit receive shift register, watched for the sync word.
    rx_word: u16,
    /// Transmit shift register, MSB goes out first.
    tx_byte: u8,
    packet: Packet,
    job: PrintJob,
}

impl LinkDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_reading(&self) -> bool {
        self.reading_packet
    }

    pub fn packet(&self) -> &Packet {
        &self.packet
    }

    pub fn job(&self) -> &PrintJob {
        &self.job
    }

    /// Move the completed job out, leaving an empty one for the next
    /// transmission. This is the ownership transfer behind the handoff
    /// channel: the decoder never aliases a job the print task holds.
    pub fn take_job(&mut self) -> PrintJob {
        core::mem::take(&mut self.job)
    }

    /// Drop a pending job that never made it to a PRINT (flush cycle).
    pub fn discard_job(&mut self) {
        self.job.clear();
    }

    /// Reset the session and packet state. The pending job survives; only
    /// INIT or a flush cycle discards it.
    ///
    /// The protocol has no disconnect message, so the idle supervisor
    /// calls this after 100 ms without a clock edge.
    pub fn reset_session(&mut self) {
        self.bit_counter = 0;
        self.byte_counter = 0;
        self.reading_packet = false;
        self.rx_byte = 0;
        self.rx_word = 0;
        self.tx_byte = 0;
        self.packet = Packet::default();
    }

    /// Process one rising clock edge.
    ///
    /// Shifts the sampled rx level into both receive registers, watches
    /// for the sync word while idle, assembles bytes while reading, and
    /// shifts the next response bit out.
    pub fn on_clock_edge(&mut self, rx_high: bool, shared: &LinkShared) -> EdgeOutput {
        let bit = rx_high as u8;
        self.rx_byte = (self.rx_byte << 1) | bit;
        self.rx_word = (self.rx_word << 1) | bit as u16;

        let mut event = None;
        if !self.reading_packet && self.rx_word == SYNC_WORD {
            self.bit_counter = 0;
            self.byte_counter = 0;
            self.reading_packet = true;
        } else if self.reading_packet {
            if self.bit_counter == 7 {
                event = self.process_byte(self.rx_byte, shared);
                self.bit_counter = 0;
            } else {
                self.bit_counter += 1;
            }
        }

        // The response level must be stable before the peer samples it on
        // the next edge.
        let tx_high = self.tx_byte & 0x80 != 0;
        self.tx_byte <<= 1;

        EdgeOutput { tx_high, event }
    }

    /// Dispatch a completed byte by its index within the packet.
    fn process_byte(&mut self, byte: u8, shared: &LinkShared) -> Option<LinkEvent> {
        // Stale until index 3; not read before index 4.
        let length = self.packet.length as usize;
        let mut event = None;

        match self.byte_counter {
            // Command.
            0 => {
                self.packet.command = byte;
                self.packet.computed_checksum = byte as u16;
                if Command::from_byte(byte).is_none() {
                    shared.status.set(StatusFlags::PACKET_ERROR);
                }
            }
            // Compression. Not supported; rejecting it here still lets the
            // packet run to completion so the peer gets its status byte.
            1 => {
                self.packet.compression = byte;
                self.packet.add_to_checksum(byte);
                if byte != 0 {
                    shared.status.set(StatusFlags::OTHER_ERROR);
                }
                if shared.artifact_pending.load(Ordering::Relaxed) {
                    shared.status.set(StatusFlags::PAPER_JAM);
                }
            }
            // Length low.
            2 => {
                self.packet.length = byte as u16;
                self.packet.add_to_checksum(byte);
            }
            // Length high; the header is complete after this byte.
            3 => {
                self.packet.length |= (byte as u16) << 8;
                self.packet.add_to_checksum(byte);
                self.header_complete(shared);
            }
            // Payload.
            i if i < HEADER_LEN + length => {
                self.packet.add_to_checksum(byte);
                event = self.payload_byte(byte, i - HEADER_LEN, shared);
            }
            // Checksum low. The checksum bytes themselves are never part
            // of the computed sum.
            i if i == HEADER_LEN + length => {
                self.packet.received_checksum = byte as u16;
            }
            // Checksum high; the ack byte always goes out next.
            i if i == HEADER_LEN + length + 1 => {
                self.packet.received_checksum |= (byte as u16) << 8;
                if self.packet.received_checksum != self.packet.computed_checksum {
                    shared.status.set(StatusFlags::CHECKSUM_ERROR);
                }
                self.tx_byte = ACK_BYTE;
            }
            // Ack is on the wire; queue the status byte behind it.
            i if i == HEADER_LEN + length + 2 => {
                self.tx_byte = shared.status.byte();
            }
            // Status byte is on the wire; the packet cycle is over.
            _ => {
                self.byte_counter = 0;
                self.reading_packet = false;
                return Some(LinkEvent::PacketComplete);
            }
        }

        self.byte_counter += 1;
        event
    }

    /// Validate the declared length and apply the effects of the
    /// zero-payload commands.
    fn header_complete(&mut self, shared: &LinkShared) {
        let command = Command::from_byte(self.packet.command);

        let length_valid = match command {
            Some(command) => command.length_valid(self.packet.length),
            // Unknown commands are already flagged; only a zero length
            // keeps the rest of the packet parseable.
            None => self.packet.length == 0,
        };
        if !length_valid {
            shared.status.set(StatusFlags::PACKET_ERROR);
        }

        match command {
            Some(Command::Init) => {
                self.job.clear();
                shared.status.clear(StatusFlags::DATA_FULL);
                shared.status.clear(StatusFlags::DATA_UNPROCESSED);
            }
            Some(Command::Status) => {
                // Raised on the poll rather than on arrival, so the flag
                // means "data waiting that no print cycle has consumed".
                if !self.job.is_empty() {
                    shared.status.set(StatusFlags::DATA_UNPROCESSED);
                }
            }
            _ => {}
        }
    }

    /// Apply one payload byte. `index` is relative to the payload start.
    fn payload_byte(&mut self, byte: u8, index: usize, shared: &LinkShared) -> Option<LinkEvent> {
        match Command::from_byte(self.packet.command) {
            Some(Command::Print) => match index {
                0 => self.job.sheets = byte,
                1 => self.job.margins = byte,
                2 => self.job.palette = byte,
                3 => {
                    self.job.exposure = byte;
                    // Handoff happens in task context; the decoder only
                    // signals that the job is complete.
                    return Some(LinkEvent::JobReady);
                }
                _ => {}
            },
            Some(Command::Data) => {
                // Capacity is checked before the write: a full buffer
                // rejects the byte instead of overflowing, and DATA_FULL
                // goes up on the append that reaches capacity.
                if self.job.data.push(byte).is_err() || self.job.data.is_full() {
                    shared.status.set(StatusFlags::DATA_FULL);
                }
            }
            _ => {}
        }
        None
    }
}
