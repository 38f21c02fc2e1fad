//! Raster assembly.
//!
//! Stacks the tile payloads of sequential jobs vertically into one tall
//! 8-bit grayscale bitmap. The console prints long images as several
//! PRINT jobs back to back; the idle gap afterwards is the only "end of
//! transmission" the protocol has, so by the time this runs the store
//! holds everything that belongs to the picture.

use alloc::vec;
use alloc::vec::Vec;

use ferrotype_protocol::PrintJob;

use crate::error::ImageError;
use crate::palette::PaletteLut;
use crate::store::MAX_PARTS;
use crate::tile::{draw_tile, BYTES_PER_TILE, IMAGE_WIDTH_PX, TILES_PER_ROW, TILE_SIZE_PX};

/// Assembled grayscale bitmap, row-major, one byte per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Number of raster rows a part decodes to.
///
/// Each payload byte carries 4 pixels, the width is fixed, and a part
/// must cover whole tile rows: anything else is a malformed job and
/// fails the assembly with a size error.
fn part_rows(part: &PrintJob) -> Result<u32, ImageError> {
    let pixels = part.data.len() * 4;
    if pixels % IMAGE_WIDTH_PX as usize != 0 {
        return Err(ImageError::PartialRow {
            bytes: part.data.len(),
        });
    }

    let rows = (pixels / IMAGE_WIDTH_PX as usize) as u32;
    if rows % TILE_SIZE_PX != 0 {
        return Err(ImageError::UnalignedHeight { rows });
    }
    Ok(rows)
}

/// Stack all parts into one raster.
///
/// Every part is validated before any pixel is written: a bad part fails
/// the whole cycle and no partial raster is produced. Each part gets its
/// own lookup table, since palette and exposure travel per job.
pub fn assemble(parts: &[PrintJob]) -> Result<Raster, ImageError> {
    if parts.len() > MAX_PARTS {
        return Err(ImageError::StoreFull);
    }

    let mut height: u32 = 0;
    for part in parts {
        height += part_rows(part)?;
    }

    let mut pixels = vec![0u8; (IMAGE_WIDTH_PX * height) as usize];

    let mut y_offset: u32 = 0;
    for part in parts {
        let rows = part_rows(part)?;
        let lut = PaletteLut::from_print(part.palette, part.exposure);

        let tile_rows = rows / TILE_SIZE_PX;
        for ty in 0..tile_rows {
            for tx in 0..TILES_PER_ROW {
                let index = ((ty * TILES_PER_ROW + tx) as usize) * BYTES_PER_TILE;
                let tile = &part.data[index..index + BYTES_PER_TILE];
                draw_tile(
                    &mut pixels,
                    tile,
                    &lut,
                    tx * TILE_SIZE_PX,
                    y_offset + ty * TILE_SIZE_PX,
                );
            }
        }
        y_offset += rows;
    }

    Ok(Raster {
        width: IMAGE_WIDTH_PX,
        height,
        pixels,
    })
}
