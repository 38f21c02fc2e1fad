//! Link idle supervisor task
//!
//! The protocol has no disconnect message. This task watches the edge
//! timestamp the link task maintains and resets the session after the
//! link has been quiet long enough to mean the peer is gone. It also
//! samples the cable detect pin.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Instant, Ticker};
use portable_atomic::Ordering;

use crate::channels::{LinkCtrl, CTRL_CHANNEL, LAST_EDGE, LINK_CONNECTED};

/// Quiet time on the link before the session is considered dropped
const IDLE_TIMEOUT: Duration = Duration::from_millis(100);

/// Link idle supervisor task
#[embassy_executor::task]
pub async fn idle_supervisor_task(detect: Input<'static>) {
    info!("Idle supervisor task started");

    let mut ticker = Ticker::every(Duration::from_millis(20));
    let mut last_seen: u64 = 0;
    // Nothing to reset until the link shows some activity.
    let mut reset_done = true;

    loop {
        ticker.next().await;

        let connected = detect.is_high();
        if connected != LINK_CONNECTED.load(Ordering::Relaxed) {
            LINK_CONNECTED.store(connected, Ordering::Relaxed);
            if connected {
                info!("Link cable attached");
            } else {
                info!("Link cable detached");
            }
        }

        let last = LAST_EDGE.load(Ordering::Relaxed);
        if last != last_seen {
            // Fresh activity; arm the reset for the next quiet period.
            last_seen = last;
            reset_done = false;
            continue;
        }
        if reset_done {
            continue;
        }

        let idle = Instant::now().as_ticks().saturating_sub(last);
        if idle >= IDLE_TIMEOUT.as_ticks() {
            debug!("Link quiet for {} ms, resetting session", IDLE_TIMEOUT.as_millis());
            if CTRL_CHANNEL.try_send(LinkCtrl::ResetSession).is_ok() {
                reset_done = true;
            }
        }
    }
}
