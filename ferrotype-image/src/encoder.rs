//! Minimal PNG writer for 8-bit grayscale rasters.
//!
//! Emits exactly one IHDR, one IDAT and one IEND chunk. The IDAT stream
//! is a stored (uncompressed) zlib stream, which keeps the encoder
//! allocation-bounded and byte-for-byte deterministic for a given
//! raster. Any PNG reader accepts the output.

use alloc::vec::Vec;

use crc32fast::Hasher;
use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::assemble::Raster;
use crate::error::ImageError;

/// Eight-byte PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

/// Grayscale, 8 bits per sample, no interlace.
const IHDR_TAIL: [u8; 5] = [8, 0, 0, 0, 0];

fn push_chunk(out: &mut Vec<u8>, tag: &[u8; 4], data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(tag);
    out.extend_from_slice(data);

    let mut hasher = Hasher::new();
    hasher.update(tag);
    hasher.update(data);
    out.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Encode an assembled raster as a grayscale PNG.
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>, ImageError> {
    let width = raster.width as usize;
    let height = raster.height as usize;
    if raster.pixels.len() != width * height {
        return Err(ImageError::BadRaster);
    }

    // Each scanline is prefixed with filter type 0 (None).
    let mut raw = Vec::with_capacity(height * (width + 1));
    for row in raster.pixels.chunks_exact(width) {
        raw.push(0);
        raw.extend_from_slice(row);
    }
    let idat = compress_to_vec_zlib(&raw, 0);

    let mut ihdr = [0u8; 13];
    ihdr[0..4].copy_from_slice(&raster.width.to_be_bytes());
    ihdr[4..8].copy_from_slice(&raster.height.to_be_bytes());
    ihdr[8..13].copy_from_slice(&IHDR_TAIL);

    let mut out = Vec::with_capacity(idat.len() + 64);
    out.extend_from_slice(&PNG_SIGNATURE);
    push_chunk(&mut out, b"IHDR", &ihdr);
    push_chunk(&mut out, b"IDAT", &idat);
    push_chunk(&mut out, b"IEND", &[]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use miniz_oxide::inflate::decompress_to_vec_zlib;

    fn raster(width: u32, height: u32) -> Raster {
        let pixels = (0..width * height).map(|i| (i % 251) as u8).collect();
        Raster {
            width,
            height,
            pixels,
        }
    }

    /// Split a PNG byte stream into (tag, data) chunks, verifying each
    /// chunk's CRC along the way.
    fn chunks(png: &[u8]) -> vec::Vec<([u8; 4], vec::Vec<u8>)> {
        assert_eq!(&png[..8], &PNG_SIGNATURE);
        let mut rest = &png[8..];
        let mut out = vec::Vec::new();
        while !rest.is_empty() {
            let len = u32::from_be_bytes(rest[0..4].try_into().unwrap()) as usize;
            let tag: [u8; 4] = rest[4..8].try_into().unwrap();
            let data = rest[8..8 + len].to_vec();
            let crc = u32::from_be_bytes(rest[8 + len..12 + len].try_into().unwrap());

            let mut hasher = Hasher::new();
            hasher.update(&tag);
            hasher.update(&data);
            assert_eq!(hasher.finalize(), crc, "bad CRC for {tag:?}");

            out.push((tag, data));
            rest = &rest[12 + len..];
        }
        out
    }

    #[test]
    fn test_ihdr_describes_grayscale_raster() {
        let png = encode_png(&raster(160, 144)).unwrap();
        let chunks = chunks(&png);

        let (tag, ihdr) = &chunks[0];
        assert_eq!(tag, b"IHDR");
        assert_eq!(ihdr.len(), 13);
        assert_eq!(u32::from_be_bytes(ihdr[0..4].try_into().unwrap()), 160);
        assert_eq!(u32::from_be_bytes(ihdr[4..8].try_into().unwrap()), 144);
        assert_eq!(ihdr[8], 8); // bit depth
        assert_eq!(ihdr[9], 0); // grayscale
        assert_eq!(&ihdr[10..13], &[0, 0, 0]);
    }

    #[test]
    fn test_idat_roundtrips_filtered_scanlines() {
        let src = raster(160, 16);
        let png = encode_png(&src).unwrap();
        let chunks = chunks(&png);

        let (tag, idat) = &chunks[1];
        assert_eq!(tag, b"IDAT");

        let raw = decompress_to_vec_zlib(idat).unwrap();
        assert_eq!(raw.len(), 16 * 161);
        for (y, line) in raw.chunks_exact(161).enumerate() {
            assert_eq!(line[0], 0, "filter byte, row {y}");
            assert_eq!(&line[1..], &src.pixels[y * 160..(y + 1) * 160]);
        }
    }

    #[test]
    fn test_stream_ends_with_empty_iend() {
        let png = encode_png(&raster(160, 8)).unwrap();
        let chunks = chunks(&png);

        assert_eq!(chunks.len(), 3);
        let (tag, data) = &chunks[2];
        assert_eq!(tag, b"IEND");
        assert!(data.is_empty());
    }

    #[test]
    fn test_output_is_deterministic() {
        let src = raster(160, 24);
        assert_eq!(encode_png(&src).unwrap(), encode_png(&src).unwrap());
    }

    #[test]
    fn test_mismatched_buffer_is_rejected() {
        let bad = Raster {
            width: 160,
            height: 8,
            pixels: vec![0; 100],
        };
        assert_eq!(encode_png(&bad), Err(ImageError::BadRaster));
    }
}
