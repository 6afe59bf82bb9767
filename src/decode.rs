use crate::bmpdepth::mask_stride;
use crate::error::Result;
use crate::image::{DibFormat, IconImage};
use crate::reader::ByteReader;

//===========================================================================//

// Alpha bits of a fully opaque ARGB pixel.
const OPAQUE: u32 = 0xff00_0000;

//===========================================================================//

/// Packs color components into an ARGB pixel.
pub(crate) fn make_argb(alpha: u8, red: u8, green: u8, blue: u8) -> u32 {
    ((alpha as u32) << 24)
        | ((red as u32) << 16)
        | ((green as u32) << 8)
        | (blue as u32)
}

/// Packs color components into an ARGB pixel with zero alpha.
pub(crate) fn make_rgb(red: u8, green: u8, blue: u8) -> u32 {
    make_argb(0, red, green, blue)
}

//===========================================================================//

/// Decodes a BMP image into ARGB pixels, in row-major order from top to
/// bottom.  The color data is stored row by row, starting from the *bottom*
/// row, so source row `y` lands in output row `height - 1 - y`.
pub(crate) fn decode_dib(
    reader: &ByteReader,
    image: &IconImage,
) -> Result<Vec<u32>> {
    let width = image.width() as usize;
    let height = image.height() as usize;
    let num_pixels = match width.checked_mul(height) {
        Some(num) => num,
        None => malformed!(reader.name(), "Width * Height is too large"),
    };
    let row_size = image.format().depth().row_size(image.width()) as usize;

    // The XOR pass leaves alpha at zero for everything but 32 bpp; the AND
    // mask pass then decides which pixels become opaque.
    let mut pixels = vec![0u32; num_pixels];
    for row in 0..height {
        let src = reader.slice(image.xor_offset() + row * row_size, row_size)?;
        let start = (height - row - 1) * width;
        let dst = &mut pixels[start..(start + width)];
        match image.format() {
            DibFormat::Indexed1(palette) => {
                for (col, pixel) in dst.iter_mut().enumerate() {
                    let index = (src[col / 8] >> (7 - col % 8)) & 0x1;
                    *pixel = palette[index as usize];
                }
            }
            DibFormat::Indexed4(palette) => {
                for (col, pixel) in dst.iter_mut().enumerate() {
                    let byte = src[col / 2];
                    // High nibble first.
                    let index =
                        if col % 2 == 0 { byte >> 4 } else { byte & 0xf };
                    *pixel = palette[index as usize];
                }
            }
            DibFormat::Indexed8(palette) => {
                for (col, pixel) in dst.iter_mut().enumerate() {
                    *pixel = palette[src[col] as usize];
                }
            }
            DibFormat::TrueColor24 => {
                for (pixel, bgr) in dst.iter_mut().zip(src.chunks_exact(3)) {
                    *pixel = make_rgb(bgr[2], bgr[1], bgr[0]);
                }
            }
            DibFormat::TrueColorAlpha32 => {
                for (pixel, bgra) in dst.iter_mut().zip(src.chunks_exact(4)) {
                    *pixel = make_argb(bgra[3], bgra[2], bgra[1], bgra[0]);
                }
            }
        }
    }

    if let Some(and_offset) = image.and_offset() {
        apply_and_mask(reader, and_offset, image.width(), &mut pixels)?;
    }
    Ok(pixels)
}

/// Applies the 1 bpp AND mask, stored bottom-up like the color data with
/// each row padded to a multiple of four bytes.  A clear bit makes the pixel
/// opaque; a set bit leaves it transparent.
fn apply_and_mask(
    reader: &ByteReader,
    and_offset: usize,
    width: u32,
    pixels: &mut [u32],
) -> Result<()> {
    let stride = mask_stride(width) as usize;
    let row_mask_size = (width as usize + 7) / 8;
    let width = width as usize;
    let height = pixels.len() / width;
    for row in 0..height {
        let src = reader.slice(and_offset + row * stride, row_mask_size)?;
        let start = (height - row - 1) * width;
        let dst = &mut pixels[start..(start + width)];
        for (col, pixel) in dst.iter_mut().enumerate() {
            if (src[col / 8] >> (7 - col % 8)) & 0x1 == 0 {
                *pixel |= OPAQUE;
            }
        }
    }
    Ok(())
}

//===========================================================================//


//===========================================================================//
