//! Print cycle task
//!
//! Consumes completed jobs from the link task, accumulates them as image
//! parts, and flushes the lot into a PNG once the link has been quiet
//! long enough. The quiet period is the only end-of-image signal the
//! protocol has.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Instant, Ticker};
use portable_atomic::Ordering;

use ferrotype_image::{assemble, encode_png, PartStore};
use ferrotype_protocol::StatusFlags;

use crate::channels::{LinkCtrl, CTRL_CHANNEL, JOB_CHANNEL, LAST_EDGE, LINK, PART_COUNT};
use crate::report;

/// Quiet time on the link before accumulated parts are flushed
const FLUSH_TIMEOUT: Duration = Duration::from_millis(500);

/// Print cycle task
#[embassy_executor::task]
pub async fn print_task() {
    info!("Print task started");

    let mut store = PartStore::new();
    let mut ticker = Ticker::every(Duration::from_millis(100));

    loop {
        match select(JOB_CHANNEL.receive(), ticker.next()).await {
            Either::First(job) => {
                LINK.status.set(StatusFlags::PRINTING);
                debug!(
                    "print job: {} bytes, sheets={} margins={:#x} palette={:#x} exposure={:#x}",
                    job.data.len(),
                    job.sheets,
                    job.margins,
                    job.palette,
                    job.exposure
                );

                if let Err(e) = store.push(job) {
                    error!("Part store rejected job: {}", e);
                }
                PART_COUNT.store(store.len(), Ordering::Relaxed);

                LINK.status.clear(StatusFlags::PRINTING);
                LINK.status.clear(StatusFlags::DATA_UNPROCESSED);
            }
            Either::Second(()) => {
                if store.is_empty() {
                    continue;
                }
                let idle = Instant::now()
                    .as_ticks()
                    .saturating_sub(LAST_EDGE.load(Ordering::Relaxed));
                if idle < FLUSH_TIMEOUT.as_ticks() {
                    continue;
                }
                if report::pending() {
                    // The previous image has not been fetched; hold the
                    // parts rather than overwrite it.
                    trace!("Flush deferred, image still pending");
                    continue;
                }
                flush(&mut store);
            }
        }
    }
}

/// Assemble and encode everything in the store, then start a new cycle.
fn flush(store: &mut PartStore) {
    info!("Flushing {} parts", store.len());

    match assemble(store.parts()) {
        Ok(raster) => {
            info!("Raster assembled: {}x{}", raster.width, raster.height);
            match encode_png(&raster) {
                Ok(png) => {
                    info!("Image ready: {} bytes", png.len());
                    report::publish(png);
                }
                Err(e) => error!("PNG encoding failed: {}", e),
            }
        }
        Err(e) => error!("Assembly failed: {}", e),
    }

    // The cycle ends either way: drop the parts and any half-received
    // job so a bad transmission cannot wedge the pipeline.
    store.clear();
    PART_COUNT.store(0, Ordering::Relaxed);
    if CTRL_CHANNEL.try_send(LinkCtrl::DiscardJob).is_err() {
        warn!("Control channel full, job discard not delivered");
    }
}
