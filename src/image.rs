use crate::bmpdepth::{mask_stride, BmpDepth};
use crate::decode::make_rgb;
use crate::error::Result;
use crate::header::{BitmapInfoHeader, BMP_HEADER_LEN};
use crate::reader::ByteReader;
use log::trace;
use std::fmt;

//===========================================================================//

/// The pixel format of a BMP image, with the color table for the indexed
/// formats.  Palette entries are `0x00RRGGBB`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DibFormat {
    /// 1 bpp, 2-entry palette.
    Indexed1(Vec<u32>),
    /// 4 bpp, 16-entry palette.
    Indexed4(Vec<u32>),
    /// 8 bpp, 256-entry palette.
    Indexed8(Vec<u32>),
    /// 24 bpp BGR triples.
    TrueColor24,
    /// 32 bpp BGRA quads; no AND mask is applied.
    TrueColorAlpha32,
}

impl DibFormat {
    /// Returns the color table, or `None` for true-color formats.
    pub fn palette(&self) -> Option<&[u32]> {
        match self {
            DibFormat::Indexed1(palette)
            | DibFormat::Indexed4(palette)
            | DibFormat::Indexed8(palette) => Some(palette),
            DibFormat::TrueColor24 | DibFormat::TrueColorAlpha32 => None,
        }
    }

    /// Returns the color depth of this format.
    pub fn depth(&self) -> BmpDepth {
        match self {
            DibFormat::Indexed1(_) => BmpDepth::One,
            DibFormat::Indexed4(_) => BmpDepth::Four,
            DibFormat::Indexed8(_) => BmpDepth::Eight,
            DibFormat::TrueColor24 => BmpDepth::TwentyFour,
            DibFormat::TrueColorAlpha32 => BmpDepth::ThirtyTwo,
        }
    }
}

//===========================================================================//

/// The layout of one BMP image inside an ICO buffer: its header, its color
/// table, and the offsets of its XOR (color) and AND (transparency) masks.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IconImage {
    header: BitmapInfoHeader,
    palette_offset: usize,
    xor_offset: usize,
    and_offset: Option<usize>,
    format: DibFormat,
}

impl IconImage {
    /// Parses the image whose `BITMAPINFOHEADER` starts at `offset`, and
    /// checks that all of its pixel data lies within the buffer.
    pub(crate) fn read(
        reader: &ByteReader,
        offset: usize,
    ) -> Result<IconImage> {
        let header = BitmapInfoHeader::read(reader, offset)?;
        let depth = header.depth();
        let width = header.width();
        let height = header.height() as u64;

        let palette_offset = offset + BMP_HEADER_LEN as usize;
        let palette_len = 4 * depth.num_palette_entries();
        let xor_offset = palette_offset + palette_len;
        let xor_len = depth.row_size(width) * height;
        let and_len = if depth == BmpDepth::ThirtyTwo {
            0
        } else {
            mask_stride(width) * height
        };
        let end = (xor_offset as u64) + xor_len + and_len;
        if end > reader.len() as u64 {
            malformed!(
                reader.name(),
                "Image data for {}x{} {}-bpp bitmap at offset {} needs {} \
                 bytes, but the buffer has only {}",
                width,
                height,
                depth.bits_per_pixel(),
                offset,
                end - offset as u64,
                reader.len().saturating_sub(offset)
            );
        }
        // Everything up to `end` fits in the buffer, so these can't overflow.
        let and_offset = if depth == BmpDepth::ThirtyTwo {
            None
        } else {
            Some(xor_offset + xor_len as usize)
        };

        let format = match depth {
            BmpDepth::One => DibFormat::Indexed1(read_palette(
                reader,
                palette_offset,
                depth,
            )?),
            BmpDepth::Four => DibFormat::Indexed4(read_palette(
                reader,
                palette_offset,
                depth,
            )?),
            BmpDepth::Eight => DibFormat::Indexed8(read_palette(
                reader,
                palette_offset,
                depth,
            )?),
            BmpDepth::TwentyFour => DibFormat::TrueColor24,
            BmpDepth::ThirtyTwo => DibFormat::TrueColorAlpha32,
        };
        trace!(
            "{}: {}x{} {}-bpp bitmap at {}: palette at {}, XOR mask at {}, \
             AND mask at {:?}",
            reader.name(),
            width,
            height,
            depth.bits_per_pixel(),
            offset,
            palette_offset,
            xor_offset,
            and_offset
        );
        Ok(IconImage { header, palette_offset, xor_offset, and_offset, format })
    }

    /// Returns the image's `BITMAPINFOHEADER`.
    pub fn header(&self) -> &BitmapInfoHeader {
        &self.header
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.header.width()
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.header.height()
    }

    /// Returns the pixel format (and color table, if any).
    pub fn format(&self) -> &DibFormat {
        &self.format
    }

    /// Returns the color table, or `None` for true-color images.
    pub fn palette(&self) -> Option<&[u32]> {
        self.format.palette()
    }

    /// Returns the buffer offset of the color table.  For true-color images,
    /// which have no color table, this is where the pixel data starts.
    pub fn palette_offset(&self) -> usize {
        self.palette_offset
    }

    /// Returns the buffer offset of the XOR (color) mask.
    pub fn xor_offset(&self) -> usize {
        self.xor_offset
    }

    /// Returns the buffer offset of the AND (transparency) mask, or `None`
    /// for 32 bpp images, which carry their own alpha channel.
    pub fn and_offset(&self) -> Option<usize> {
        self.and_offset
    }
}

impl fmt::Display for IconImage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        writeln!(f, "colorMapOffset = {}", self.palette_offset)?;
        writeln!(f, "xorMaskOffset  = {}", self.xor_offset)?;
        writeln!(f, "andMaskOffset  = {}", self.and_offset.unwrap_or(0))
    }
}

fn read_palette(
    reader: &ByteReader,
    offset: usize,
    depth: BmpDepth,
) -> Result<Vec<u32>> {
    let num_colors = depth.num_palette_entries();
    let data = reader.slice(offset, 4 * num_colors)?;
    let mut palette = Vec::<u32>::with_capacity(num_colors);
    for entry in data.chunks_exact(4) {
        let blue = entry[0];
        let green = entry[1];
        let red = entry[2];
        palette.push(make_rgb(red, green, blue));
    }
    Ok(palette)
}

//===========================================================================//


//===========================================================================//
