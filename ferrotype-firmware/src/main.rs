//! Ferrotype - Handheld-console printer emulator firmware
//!
//! Main firmware binary for RP2040 boards wired to a console link port.
//! The board stands in for the thermal printer: it answers the console's
//! bit-clocked packets, reconstructs the transmitted image, and parks it
//! as a PNG until fetched.
//!
//! Named after the ferrotype, the tintype photograph: a picture
//! developed directly onto a metal plate.

#![no_std]
#![no_main]

extern crate alloc;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::Timer;
use embedded_alloc::LlffHeap as Heap;
use {defmt_rtt as _, panic_probe as _};

mod channels;
mod report;
mod tasks;

// Heap allocator for part accumulation, the raster, and the encoded PNG
#[global_allocator]
static HEAP: Heap = Heap::empty();

// Heap size: 128KB covers a typical multi-part image plus the raster
// and its encoded output
const HEAP_SIZE: usize = 128 * 1024;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Ferrotype firmware starting...");

    // Initialize heap allocator
    init_heap();

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Link port wiring. The console drives the clock; all three data
    // lines idle low through the level shifter.
    let clock = Input::new(p.PIN_2, Pull::Down);
    let rx = Input::new(p.PIN_3, Pull::Down);
    let tx = Output::new(p.PIN_4, Level::Low);
    let detect = Input::new(p.PIN_5, Pull::Down);

    // Fetch button, active low
    let fetch_button = Input::new(p.PIN_6, Pull::Up);

    info!("Link pins initialized");

    // Spawn tasks
    spawner.spawn(tasks::link_task(clock, rx, tx)).unwrap();
    spawner.spawn(tasks::print_task()).unwrap();
    spawner.spawn(tasks::idle_supervisor_task(detect)).unwrap();
    spawner.spawn(tasks::fetch_task(fetch_button)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        Timer::after_secs(60).await;
        trace!(
            "Heartbeat: status={:#x} parts={} connected={} pending={} bytes={}",
            report::status_byte(),
            report::parts_accumulated(),
            report::link_connected(),
            report::pending(),
            report::len()
        );
    }
}

/// Initialize the heap allocator
fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}
