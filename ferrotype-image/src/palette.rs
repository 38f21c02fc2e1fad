//! Palette/exposure lookup table.
//!
//! The console assigns each 2-bit color index a shade through the PRINT
//! packet's palette byte, and the exposure byte brightens or darkens the
//! whole print. Both travel with every job, so the table is rebuilt per
//! job as a pure function of those two bytes.

/// Exposure value with no brightness adjustment.
pub const NEUTRAL_EXPOSURE: u8 = 0x40;

/// Base grayscale shade for each 2-bit palette field value.
/// 0b00 is lightest, 0b11 darkest.
const BASE_SHADES: [u8; 4] = [0xFF, 0xBF, 0x40, 0x00];

/// 4-entry grayscale table indexed by source color index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PaletteLut([u8; 4]);

impl PaletteLut {
    /// Build the table for one job.
    ///
    /// Field `i` of the palette byte (bits 2i..=2i+1) picks the base
    /// shade printed for color index `i`. The exposure byte is 7 bits
    /// (the sign bit is ignored); `exposure - 0x40` shifts every shade,
    /// clamped to the 8-bit range.
    pub fn from_print(palette: u8, exposure: u8) -> Self {
        let offset = ((exposure & 0x7F) as i16) - (NEUTRAL_EXPOSURE as i16);

        let mut lut = [0u8; 4];
        for (i, entry) in lut.iter_mut().enumerate() {
            let field = (palette >> (i * 2)) & 0b11;
            let shade = (BASE_SHADES[field as usize] as i16) + offset;
            *entry = shade.clamp(0, u8::MAX as i16) as u8;
        }
        Self(lut)
    }

    /// Shade printed for a 2-bit color index.
    pub fn shade(&self, color: u8) -> u8 {
        self.0[(color & 0b11) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Identity palette: field i selects shade i.
    const IDENTITY_PALETTE: u8 = 0b11_10_01_00;

    #[test]
    fn test_neutral_exposure_gives_base_shades() {
        let lut = PaletteLut::from_print(IDENTITY_PALETTE, NEUTRAL_EXPOSURE);
        assert_eq!(lut.shade(0b00), 0xFF);
        assert_eq!(lut.shade(0b01), 0xBF);
        assert_eq!(lut.shade(0b10), 0x40);
        assert_eq!(lut.shade(0b11), 0x00);
    }

    #[test]
    fn test_palette_remaps_colors() {
        // All four fields select the darkest shade.
        let lut = PaletteLut::from_print(0b11_11_11_11, NEUTRAL_EXPOSURE);
        for color in 0..4 {
            assert_eq!(lut.shade(color), 0x00);
        }

        // Inverted palette swaps light and dark.
        let lut = PaletteLut::from_print(0b00_01_10_11, NEUTRAL_EXPOSURE);
        assert_eq!(lut.shade(0b00), 0x00);
        assert_eq!(lut.shade(0b11), 0xFF);
    }

    #[test]
    fn test_exposure_brightens_and_darkens() {
        // Max exposure: +63 on every shade, clamped at 255.
        let lut = PaletteLut::from_print(IDENTITY_PALETTE, 0x7F);
        assert_eq!(lut.shade(0b00), 0xFF); // 0xFF + 63 clamps
        assert_eq!(lut.shade(0b01), 0xBF + 63);
        assert_eq!(lut.shade(0b10), 0x40 + 63);
        assert_eq!(lut.shade(0b11), 63);

        // Min exposure: -64 on every shade, clamped at 0.
        let lut = PaletteLut::from_print(IDENTITY_PALETTE, 0x00);
        assert_eq!(lut.shade(0b00), 0xFF - 64);
        assert_eq!(lut.shade(0b01), 0xBF - 64);
        assert_eq!(lut.shade(0b10), 0x00); // 0x40 - 64 clamps
        assert_eq!(lut.shade(0b11), 0x00);
    }

    #[test]
    fn test_exposure_sign_bit_ignored() {
        let with_msb = PaletteLut::from_print(IDENTITY_PALETTE, 0x80 | 0x21);
        let without = PaletteLut::from_print(IDENTITY_PALETTE, 0x21);
        assert_eq!(with_msb, without);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn sign_bit_never_matters(palette in any::<u8>(), exposure in any::<u8>()) {
                prop_assert_eq!(
                    PaletteLut::from_print(palette, exposure),
                    PaletteLut::from_print(palette, exposure & 0x7F)
                );
            }

            #[test]
            fn neutral_exposure_yields_base_shades_only(palette in any::<u8>()) {
                let lut = PaletteLut::from_print(palette, NEUTRAL_EXPOSURE);
                for color in 0..4u8 {
                    prop_assert!(matches!(lut.shade(color), 0xFF | 0xBF | 0x40 | 0x00));
                }
            }
        }
    }
}
