//! 2bpp tile plane decoding.
//!
//! Tile data arrives in the console's native format: 8x8 pixel tiles,
//! 16 bytes each, 2 bytes per pixel row. The first byte of a row is the
//! low bitplane, the second the high bitplane; bits are read MSB-first,
//! and a pixel's 2-bit color index is `high << 1 | low`.

use crate::palette::PaletteLut;

/// Fixed raster width. The printer only ever renders console screens,
/// which are 160 pixels wide.
pub const IMAGE_WIDTH_PX: u32 = 160;

/// Tiles are 8x8 pixels.
pub const TILE_SIZE_PX: u32 = 8;

/// Tiles per raster row.
pub const TILES_PER_ROW: u32 = IMAGE_WIDTH_PX / TILE_SIZE_PX;

/// Two bitplane bytes per row, eight rows.
pub const BYTES_PER_TILE: usize = 16;

/// Decode one 16-byte tile into the raster at pixel position
/// (`x_px`, `y_px`), mapping color indices through the lookup table.
///
/// The raster is row-major, one grayscale byte per pixel, and
/// [`IMAGE_WIDTH_PX`] wide.
pub fn draw_tile(raster: &mut [u8], tile: &[u8], lut: &PaletteLut, x_px: u32, y_px: u32) {
    for row in 0..TILE_SIZE_PX as usize {
        let low = tile[row * 2];
        let high = tile[row * 2 + 1];
        let row_start = ((y_px as usize + row) * IMAGE_WIDTH_PX as usize) + x_px as usize;

        for bit in 0..8 {
            let shift = 7 - bit;
            let color = ((high >> shift) & 1) << 1 | ((low >> shift) & 1);
            raster[row_start + bit] = lut.shade(color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{PaletteLut, NEUTRAL_EXPOSURE};
    use std::vec;

    /// Identity palette with neutral exposure: shades are
    /// {0xFF, 0xBF, 0x40, 0x00} for codes {0, 1, 2, 3}.
    fn neutral_lut() -> PaletteLut {
        PaletteLut::from_print(0b11_10_01_00, NEUTRAL_EXPOSURE)
    }

    fn shade_to_color(shade: u8) -> u8 {
        match shade {
            0xFF => 0,
            0xBF => 1,
            0x40 => 2,
            0x00 => 3,
            other => panic!("not a base shade: {other:#04x}"),
        }
    }

    /// Pack an 8x8 color-index grid into the two-plane wire format.
    fn encode_tile(grid: &[[u8; 8]; 8]) -> [u8; BYTES_PER_TILE] {
        let mut tile = [0u8; BYTES_PER_TILE];
        for (row, pixels) in grid.iter().enumerate() {
            for (bit, &color) in pixels.iter().enumerate() {
                let shift = 7 - bit;
                tile[row * 2] |= (color & 1) << shift;
                tile[row * 2 + 1] |= ((color >> 1) & 1) << shift;
            }
        }
        tile
    }

    #[test]
    fn test_roundtrip_reproduces_color_grid() {
        let mut grid = [[0u8; 8]; 8];
        for (y, row) in grid.iter_mut().enumerate() {
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = ((x + 2 * y) % 4) as u8;
            }
        }

        let tile = encode_tile(&grid);
        let mut raster = vec![0u8; (IMAGE_WIDTH_PX * TILE_SIZE_PX) as usize];
        draw_tile(&mut raster, &tile, &neutral_lut(), 0, 0);

        for y in 0..8 {
            for x in 0..8 {
                let shade = raster[y * IMAGE_WIDTH_PX as usize + x];
                assert_eq!(shade_to_color(shade), grid[y][x], "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn test_uniform_tile_is_one_shade() {
        // Both planes all ones: every pixel is color index 3.
        let tile = [0xFF; BYTES_PER_TILE];
        let lut = neutral_lut();
        let mut raster = vec![0x55u8; (IMAGE_WIDTH_PX * TILE_SIZE_PX) as usize];
        draw_tile(&mut raster, &tile, &lut, 8, 0);

        for y in 0..8usize {
            for x in 8..16usize {
                assert_eq!(raster[y * IMAGE_WIDTH_PX as usize + x], lut.shade(3));
            }
        }
        // Pixels outside the tile are untouched.
        assert_eq!(raster[0], 0x55);
        assert_eq!(raster[16], 0x55);
    }

    #[test]
    fn test_planes_combine_msb_first() {
        // Row 0: low plane 0b10000001, high plane 0b00000001.
        // Leftmost pixel is color 1, rightmost is color 3.
        let mut tile = [0u8; BYTES_PER_TILE];
        tile[0] = 0x81;
        tile[1] = 0x01;

        let lut = neutral_lut();
        let mut raster = vec![0u8; (IMAGE_WIDTH_PX * TILE_SIZE_PX) as usize];
        draw_tile(&mut raster, &tile, &lut, 0, 0);

        assert_eq!(raster[0], lut.shade(1));
        assert_eq!(raster[7], lut.shade(3));
        for x in 1..7 {
            assert_eq!(raster[x], lut.shade(0));
        }
    }
}
