#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

//===========================================================================//

/// The color depth of a BMP image stored in an ICO file.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum BmpDepth {
    /// 2-color palette.
    One,
    /// 16-color palette.
    Four,
    /// 256-color palette.
    Eight,
    /// True color, no alpha channel.
    TwentyFour,
    /// True color with an alpha channel.
    ThirtyTwo,
}

impl BmpDepth {
    pub(crate) fn from_bits_per_pixel(
        bits_per_pixel: u16,
    ) -> Option<BmpDepth> {
        match bits_per_pixel {
            1 => Some(BmpDepth::One),
            4 => Some(BmpDepth::Four),
            8 => Some(BmpDepth::Eight),
            24 => Some(BmpDepth::TwentyFour),
            32 => Some(BmpDepth::ThirtyTwo),
            _ => None,
        }
    }

    /// Returns the number of bits used for each pixel.
    pub fn bits_per_pixel(&self) -> u16 {
        match *self {
            BmpDepth::One => 1,
            BmpDepth::Four => 4,
            BmpDepth::Eight => 8,
            BmpDepth::TwentyFour => 24,
            BmpDepth::ThirtyTwo => 32,
        }
    }

    /// Returns the number of distinct colors this depth can represent.  The
    /// alpha channel of 32 bpp images doesn't count, so both true-color
    /// depths report 2^24 colors.
    pub fn color_count(&self) -> u32 {
        match *self {
            BmpDepth::ThirtyTwo => 1 << 24,
            depth => 1 << depth.bits_per_pixel(),
        }
    }

    /// Returns true if pixels are indices into a color table.
    pub fn is_indexed(&self) -> bool {
        matches!(*self, BmpDepth::One | BmpDepth::Four | BmpDepth::Eight)
    }

    /// Returns the number of entries in the color table that precedes the
    /// pixel data (zero for true-color images).
    pub(crate) fn num_palette_entries(&self) -> usize {
        if self.is_indexed() {
            self.color_count() as usize
        } else {
            0
        }
    }

    /// Returns the length in bytes of one color-data row, padded to a
    /// multiple of four bytes.  Zero for 32 bpp, whose rows need no padding.
    pub(crate) fn stride(&self, width: u32) -> u64 {
        match *self {
            BmpDepth::ThirtyTwo => 0,
            depth => {
                let bits = (depth.bits_per_pixel() as u64) * (width as u64);
                ((bits + 31) / 32) * 4
            }
        }
    }

    /// Returns the number of bytes actually occupied by one color-data row.
    pub(crate) fn row_size(&self, width: u32) -> u64 {
        match *self {
            BmpDepth::ThirtyTwo => 4 * (width as u64),
            depth => depth.stride(width),
        }
    }
}

/// Returns the length in bytes of one row of the 1 bpp AND mask, padded to a
/// multiple of four bytes.
pub(crate) fn mask_stride(width: u32) -> u64 {
    ((width as u64 + 31) / 32) * 4
}

//===========================================================================//


//===========================================================================//
