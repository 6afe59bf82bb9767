use crate::bmpdepth::BmpDepth;
use crate::error::Result;
use crate::reader::ByteReader;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

//===========================================================================//

// The size of a BITMAPINFOHEADER struct, in bytes.
pub(crate) const BMP_HEADER_LEN: u32 = 40;

// The only supported compression type (BI_RGB, i.e. uncompressed).
const BI_RGB: u32 = 0;

// Size limits for images in an ICO file:
const MIN_WIDTH: i32 = 1;
const MIN_HEIGHT: i32 = 1;

//===========================================================================//

/// The `BITMAPINFOHEADER` at the start of a BMP image in an ICO file, plus
/// the color count and row stride derived from it.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct BitmapInfoHeader {
    size: u32,
    width: u32,
    height: u32,
    planes: u16,
    depth: BmpDepth,
    compression: u32,
    image_size: u32,
    x_pels_per_meter: i32,
    y_pels_per_meter: i32,
    clr_used: u32,
    clr_important: u32,
}

impl BitmapInfoHeader {
    /// Parses the header that starts at `offset`.
    pub(crate) fn read(
        reader: &ByteReader,
        offset: usize,
    ) -> Result<BitmapInfoHeader> {
        let name = reader.name();
        // Fails early if the whole struct doesn't fit in the buffer, so the
        // offset arithmetic below can't overflow.
        reader.slice(offset, BMP_HEADER_LEN as usize)?;
        let size = reader.read_u32(offset)?;
        if size != BMP_HEADER_LEN {
            malformed!(
                name,
                "Invalid BMP header size (was {}, must be {})",
                size,
                BMP_HEADER_LEN
            );
        }
        let width = reader.read_i32(offset + 4)?;
        if width < MIN_WIDTH {
            malformed!(
                name,
                "Invalid BMP width (was {}, but must be at least {})",
                width,
                MIN_WIDTH
            );
        }
        // The height is stored doubled, counting the rows of both the color
        // data and the AND mask.
        let stored_height = reader.read_i32(offset + 8)?;
        let height = stored_height / 2;
        if stored_height < 0 || height < MIN_HEIGHT {
            malformed!(
                name,
                "Invalid BMP height (stored as {}, but must be at least {})",
                stored_height,
                2 * MIN_HEIGHT
            );
        }
        let planes = reader.read_u16(offset + 12)?;
        let bit_count = reader.read_u16(offset + 14)?;
        if bit_count == 0 {
            malformed!(name, "Incorrect data in BMP header (bitCount = 0)");
        }
        let depth = match BmpDepth::from_bits_per_pixel(bit_count) {
            Some(depth) => depth,
            None => {
                malformed!(
                    name,
                    "Unsupported bitCount value (bitCount = {})",
                    bit_count
                );
            }
        };
        let compression = reader.read_u32(offset + 16)?;
        if compression != BI_RGB {
            malformed!(
                name,
                "Unsupported BMP compression type ({}); only uncompressed \
                 bitmaps are supported",
                compression
            );
        }
        Ok(BitmapInfoHeader {
            size,
            width: width as u32,
            height: height as u32,
            planes,
            depth,
            compression,
            image_size: reader.read_u32(offset + 20)?,
            x_pels_per_meter: reader.read_i32(offset + 24)?,
            y_pels_per_meter: reader.read_i32(offset + 28)?,
            clr_used: reader.read_u32(offset + 32)?,
            clr_important: reader.read_u32(offset + 36)?,
        })
    }

    /// Returns the size field of the struct (always 40).
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.  This is half the value
    /// stored in the file, which counts the AND mask rows too.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the number of color planes (normally 1).
    pub fn planes(&self) -> u16 {
        self.planes
    }

    /// Returns the color depth of the image.
    pub fn depth(&self) -> BmpDepth {
        self.depth
    }

    /// Returns the bits-per-pixel of the image.
    pub fn bit_count(&self) -> u16 {
        self.depth.bits_per_pixel()
    }

    /// Returns the number of colors the image can use; 24 and 32 bpp images
    /// both count as true color (16777216 colors).
    pub fn color_count(&self) -> u32 {
        self.depth.color_count()
    }

    /// Returns the length of one color-data row in bytes, padded to a
    /// multiple of four.  Zero for 32 bpp images, whose rows are already
    /// aligned.
    pub fn stride(&self) -> u64 {
        self.depth.stride(self.width)
    }

    /// Returns the compression type (always 0, `BI_RGB`).
    pub fn compression(&self) -> u32 {
        self.compression
    }

    /// Returns the image size field, in bytes (may be zero).
    pub fn image_size(&self) -> u32 {
        self.image_size
    }

    /// Returns the horizontal resolution field, in pixels per meter.
    pub fn x_pels_per_meter(&self) -> i32 {
        self.x_pels_per_meter
    }

    /// Returns the vertical resolution field, in pixels per meter.
    pub fn y_pels_per_meter(&self) -> i32 {
        self.y_pels_per_meter
    }

    /// Returns the number of color table entries actually used.
    pub fn clr_used(&self) -> u32 {
        self.clr_used
    }

    /// Returns the number of color table entries required for display.
    pub fn clr_important(&self) -> u32 {
        self.clr_important
    }
}

impl fmt::Display for BitmapInfoHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "size          = {}", self.size)?;
        writeln!(f, "width         = {}", self.width)?;
        writeln!(f, "height        = {}", self.height)?;
        writeln!(f, "planes        = {}", self.planes)?;
        writeln!(f, "bitCount      = {}", self.bit_count())?;
        writeln!(f, "colorCount    = {}", self.color_count())?;
        writeln!(f, "compression   = {}", self.compression)?;
        writeln!(f, "imageSize     = {}", self.image_size)?;
        writeln!(f, "xPelsPerMeter = {}", self.x_pels_per_meter)?;
        writeln!(f, "yPelsPerMeter = {}", self.y_pels_per_meter)?;
        writeln!(f, "clrUsed       = {}", self.clr_used)?;
        writeln!(f, "clrImportant  = {}", self.clr_important)
    }
}

//===========================================================================//


//===========================================================================//
