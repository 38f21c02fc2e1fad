//! Image fetch task
//!
//! Drains the finished image when the fetch button is pressed, which
//! clears the paper jam condition and lets the next print cycle run.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Timer;

use crate::report;

/// Image fetch task. The button is active low.
#[embassy_executor::task]
pub async fn fetch_task(mut button: Input<'static>) {
    info!("Fetch task started");

    loop {
        button.wait_for_falling_edge().await;
        // Debounce
        Timer::after_millis(30).await;
        if button.is_high() {
            continue;
        }

        match report::take() {
            Some(png) => info!("Image fetched: {} bytes", png.len()),
            None => debug!("Fetch pressed with no image pending"),
        }

        button.wait_for_rising_edge().await;
    }
}
