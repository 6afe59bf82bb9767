use crate::decode::make_argb;
use crate::error::{Error, Result};
use crate::icon::DecodedImage;
use std::io::Write;

//===========================================================================//

/// Decodes an embedded PNG into its width, height and ARGB pixels (row-major
/// from top to bottom).
pub(crate) fn decode_png(
    name: &str,
    data: &[u8],
) -> Result<(u32, u32, Vec<u32>)> {
    let mut decoder = png::Decoder::new(data);
    // Palettes, low bit depths and tRNS chunks are expanded to plain 8-bit
    // channels, and 16-bit channels are stripped down to 8.
    decoder.set_transformations(
        png::Transformations::EXPAND | png::Transformations::STRIP_16,
    );
    let mut png_reader = match decoder.read_info() {
        Ok(png_reader) => png_reader,
        Err(error) => malformed!(name, "Malformed PNG data: {}", error),
    };
    let mut buffer = vec![0u8; png_reader.output_buffer_size()];
    let info = match png_reader.next_frame(&mut buffer) {
        Ok(info) => info,
        Err(error) => malformed!(name, "Malformed PNG data: {}", error),
    };
    buffer.truncate(info.buffer_size());
    if info.bit_depth != png::BitDepth::Eight {
        malformed!(name, "Unsupported PNG bit depth: {:?}", info.bit_depth);
    }
    let pixels: Vec<u32> = match info.color_type {
        png::ColorType::Rgba => buffer
            .chunks_exact(4)
            .map(|rgba| make_argb(rgba[3], rgba[0], rgba[1], rgba[2]))
            .collect(),
        png::ColorType::Rgb => buffer
            .chunks_exact(3)
            .map(|rgb| make_argb(u8::MAX, rgb[0], rgb[1], rgb[2]))
            .collect(),
        png::ColorType::GrayscaleAlpha => buffer
            .chunks_exact(2)
            .map(|ga| make_argb(ga[1], ga[0], ga[0], ga[0]))
            .collect(),
        png::ColorType::Grayscale => buffer
            .iter()
            .map(|&gray| make_argb(u8::MAX, gray, gray, gray))
            .collect(),
        png::ColorType::Indexed => {
            malformed!(
                name,
                "Unsupported PNG color type: {:?}",
                info.color_type
            );
        }
    };
    if pixels.len() as u64 != (info.width as u64) * (info.height as u64) {
        malformed!(
            name,
            "PNG decoded to {} pixels, but should be {}x{}",
            pixels.len(),
            info.width,
            info.height
        );
    }
    Ok((info.width, info.height, pixels))
}

//===========================================================================//

/// Encodes a decoded image as a PNG file.
pub(crate) fn encode_png<W: Write>(
    image: &DecodedImage,
    writer: W,
) -> Result<()> {
    encode_png_internal(image, writer).map_err(Error::PngEncoding)
}

fn encode_png_internal<W: Write>(
    image: &DecodedImage,
    writer: W,
) -> std::result::Result<(), png::EncodingError> {
    let has_alpha = image.has_alpha();
    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_depth(png::BitDepth::Eight);
    if has_alpha {
        encoder.set_color(png::ColorType::Rgba);
    } else {
        encoder.set_color(png::ColorType::Rgb);
    }
    let mut writer = encoder.write_header()?;
    if has_alpha {
        writer.write_image_data(&image.to_rgba_data())?;
    } else {
        let mut rgb_data = Vec::<u8>::with_capacity(image.pixels().len() * 3);
        for &pixel in image.pixels() {
            rgb_data.push((pixel >> 16) as u8);
            rgb_data.push((pixel >> 8) as u8);
            rgb_data.push(pixel as u8);
        }
        writer.write_image_data(&rgb_data)?;
    }
    Ok(())
}

//===========================================================================//


//===========================================================================//
