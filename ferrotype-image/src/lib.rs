//! Image reconstruction for the printer emulator
//!
//! Turns the 2bpp tile payloads accumulated by the link decoder into a
//! standard image:
//!
//! - Palette/exposure lookup table (per job, pure function)
//! - Tile plane decoding into 8-bit grayscale rows
//! - Vertical stacking of sequential jobs into one tall raster
//! - PNG container encoding with deterministic output bytes
//!
//! Everything here runs in task context on the heap; nothing is called
//! from the interrupt path.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod assemble;
pub mod encoder;
pub mod error;
pub mod palette;
pub mod store;
pub mod tile;

pub use assemble::{assemble, Raster};
pub use encoder::encode_png;
pub use error::ImageError;
pub use palette::PaletteLut;
pub use store::{PartStore, MAX_PARTS};
pub use tile::{BYTES_PER_TILE, IMAGE_WIDTH_PX, TILES_PER_ROW, TILE_SIZE_PX};
