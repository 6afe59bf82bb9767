#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};

//===========================================================================//

/// Image data for one directory entry, plus the values to put in the entry.
pub struct Entry {
    pub width: u8,
    pub height: u8,
    pub num_colors: u8,
    pub bits_per_pixel: u16,
    pub data: Vec<u8>,
}

/// Assembles an ICO file from entries, laying out image data in order after
/// the directory.
pub fn ico_file(entries: &[Entry]) -> Vec<u8> {
    let mut file = Vec::<u8>::new();
    file.write_u16::<LittleEndian>(0).unwrap(); // reserved
    file.write_u16::<LittleEndian>(1).unwrap(); // icon
    file.write_u16::<LittleEndian>(entries.len() as u16).unwrap();
    let mut data_offset = 6 + 16 * entries.len() as u32;
    for entry in entries.iter() {
        file.write_u8(entry.width).unwrap();
        file.write_u8(entry.height).unwrap();
        file.write_u8(entry.num_colors).unwrap();
        file.write_u8(0).unwrap(); // reserved
        file.write_u16::<LittleEndian>(1).unwrap(); // planes
        file.write_u16::<LittleEndian>(entry.bits_per_pixel).unwrap();
        file.write_u32::<LittleEndian>(entry.data.len() as u32).unwrap();
        file.write_u32::<LittleEndian>(data_offset).unwrap();
        data_offset += entry.data.len() as u32;
    }
    for entry in entries.iter() {
        file.extend_from_slice(&entry.data);
    }
    file
}

/// Builds BMP image data: header, palette (`0xRRGGBB` entries), then the
/// already-packed XOR and AND rows.
pub fn bmp_data(
    width: u32,
    height: u32,
    bits_per_pixel: u16,
    palette: &[u32],
    xor: &[u8],
    and: &[u8],
) -> Vec<u8> {
    let mut data = Vec::<u8>::new();
    data.write_u32::<LittleEndian>(40).unwrap();
    data.write_i32::<LittleEndian>(width as i32).unwrap();
    data.write_i32::<LittleEndian>(2 * height as i32).unwrap();
    data.write_u16::<LittleEndian>(1).unwrap(); // planes
    data.write_u16::<LittleEndian>(bits_per_pixel).unwrap();
    data.write_u32::<LittleEndian>(0).unwrap(); // compression
    data.write_u32::<LittleEndian>(0).unwrap(); // image size
    data.write_i32::<LittleEndian>(0).unwrap(); // horz ppm
    data.write_i32::<LittleEndian>(0).unwrap(); // vert ppm
    data.write_u32::<LittleEndian>(0).unwrap(); // colors used
    data.write_u32::<LittleEndian>(0).unwrap(); // colors important
    for &color in palette.iter() {
        data.write_u8(color as u8).unwrap(); // blue
        data.write_u8((color >> 8) as u8).unwrap(); // green
        data.write_u8((color >> 16) as u8).unwrap(); // red
        data.write_u8(0).unwrap();
    }
    data.extend_from_slice(xor);
    data.extend_from_slice(and);
    data
}

/// Packs top-down palette indices into bottom-up rows of `bits_per_pixel`
/// (1, 4 or 8) bits each, padded to multiples of four bytes.  With one bit
/// per pixel this also packs AND masks.
pub fn pack_indexed(
    width: usize,
    height: usize,
    bits_per_pixel: usize,
    indices: &[u8],
) -> Vec<u8> {
    let stride = ((bits_per_pixel * width + 31) / 32) * 4;
    let mut data = vec![0u8; stride * height];
    for row in 0..height {
        let src = &indices[(height - row - 1) * width..][..width];
        let dst = &mut data[row * stride..][..stride];
        for (col, &index) in src.iter().enumerate() {
            let bit = col * bits_per_pixel;
            let shift = 8 - bits_per_pixel - bit % 8;
            dst[bit / 8] |= index << shift;
        }
    }
    data
}

/// Packs top-down `0xRRGGBB` colors into bottom-up BGR rows, padded to
/// multiples of four bytes.
pub fn pack_bgr(width: usize, height: usize, colors: &[u32]) -> Vec<u8> {
    let stride = ((24 * width + 31) / 32) * 4;
    let mut data = vec![0u8; stride * height];
    for row in 0..height {
        let src = &colors[(height - row - 1) * width..][..width];
        for (col, &color) in src.iter().enumerate() {
            let start = row * stride + 3 * col;
            data[start] = color as u8;
            data[start + 1] = (color >> 8) as u8;
            data[start + 2] = (color >> 16) as u8;
        }
    }
    data
}

/// Packs top-down ARGB pixels into bottom-up BGRA rows.
pub fn pack_bgra(width: usize, height: usize, pixels: &[u32]) -> Vec<u8> {
    let mut data = Vec::<u8>::with_capacity(4 * width * height);
    for row in (0..height).rev() {
        for &pixel in pixels[row * width..][..width].iter() {
            data.write_u32::<LittleEndian>(pixel).unwrap();
        }
    }
    data
}

/// Encodes RGBA data as a PNG file.
pub fn png_data(width: u32, height: u32, rgba: &[u8]) -> Vec<u8> {
    let mut data = Vec::<u8>::new();
    {
        let mut encoder = png::Encoder::new(&mut data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(rgba).unwrap();
    }
    data
}

//===========================================================================//
