//! Link reception task
//!
//! Owns the decoder and the three link pins. Every rising clock edge
//! samples the rx line, runs one decoder step, and drives the response
//! level back out before the peer's next edge. Control messages arrive
//! on the same select so the decoder is never touched from two places.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::{Input, Level, Output};
use embassy_time::Instant;
use portable_atomic::Ordering;

use ferrotype_protocol::{LinkDecoder, LinkEvent};

use crate::channels::{LinkCtrl, CTRL_CHANNEL, JOB_CHANNEL, LAST_EDGE, LINK};

/// Link reception task
#[embassy_executor::task]
pub async fn link_task(mut clock: Input<'static>, rx: Input<'static>, mut tx: Output<'static>) {
    info!("Link task started");

    let mut decoder = LinkDecoder::new();

    loop {
        match select(clock.wait_for_rising_edge(), CTRL_CHANNEL.receive()).await {
            Either::First(()) => {
                LAST_EDGE.store(Instant::now().as_ticks(), Ordering::Relaxed);

                let out = decoder.on_clock_edge(rx.is_high(), &LINK);
                tx.set_level(if out.tx_high { Level::High } else { Level::Low });

                match out.event {
                    Some(LinkEvent::JobReady) => {
                        let job = decoder.take_job();
                        debug!("job ready: {} data bytes", job.data.len());
                        if JOB_CHANNEL.try_send(job).is_err() {
                            // The channel depth covers the protocol's own
                            // pacing; overflow means the print task is wedged.
                            warn!("Job channel full, dropping print job");
                        }
                    }
                    Some(LinkEvent::PacketComplete) => {
                        trace!(
                            "packet done: cmd={:#x} len={}",
                            decoder.packet().command,
                            decoder.packet().length
                        );
                    }
                    None => {}
                }
            }
            Either::Second(ctrl) => match ctrl {
                LinkCtrl::ResetSession => {
                    debug!("Link session reset");
                    decoder.reset_session();
                    LINK.status.reset();
                }
                LinkCtrl::DiscardJob => {
                    decoder.discard_job();
                }
            },
        }
    }
}
