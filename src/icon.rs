use crate::codec;
use crate::error::Result;
#[cfg(feature = "serde")]
use serde::Serialize;
use std::fmt;
use std::io::Write;

//===========================================================================//

/// A decoded image; one variant of the icon.
///
/// Images only come out of the decoder, so the pixel buffer always holds
/// exactly `width * height` pixels.  With the `serde` feature they can be
/// serialized, but not deserialized.
#[derive(Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DecodedImage {
    width: u32,
    height: u32,
    bit_count: u16,
    is_png: bool,
    pixels: Vec<u32>,
}

impl DecodedImage {
    pub(crate) fn new(
        width: u32,
        height: u32,
        bit_count: u16,
        is_png: bool,
        pixels: Vec<u32>,
    ) -> DecodedImage {
        debug_assert_eq!(
            pixels.len() as u64,
            (width as u64) * (height as u64)
        );
        DecodedImage { width, height, bit_count, is_png, pixels }
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the area of the image (`width * height`), in pixels.
    pub fn area(&self) -> u64 {
        (self.width as u64) * (self.height as u64)
    }

    /// Returns the bits-per-pixel of the image.  For PNG-compressed images
    /// this is the value declared in the ICO directory entry.
    pub fn bpp(&self) -> u16 {
        self.bit_count
    }

    /// Returns true if the image was stored as a PNG, or false if it was
    /// stored as an uncompressed BMP.
    pub fn is_png(&self) -> bool {
        self.is_png
    }

    /// Returns the ARGB pixels (`0xAARRGGBB`), in row-major order from top to
    /// bottom.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Returns the ARGB pixel at column `x` of row `y` (counting down from
    /// the top), or `None` if the coordinates are out of range.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        self.pixels.get(index).copied()
    }

    /// Returns true if any pixel is not fully opaque.
    pub fn has_alpha(&self) -> bool {
        self.pixels.iter().any(|&pixel| (pixel >> 24) != 0xff)
    }

    /// Returns the image as RGBA bytes, in row-major order from top to
    /// bottom.
    pub fn to_rgba_data(&self) -> Vec<u8> {
        let mut rgba = Vec::<u8>::with_capacity(self.pixels.len() * 4);
        for &pixel in self.pixels.iter() {
            rgba.push((pixel >> 16) as u8);
            rgba.push((pixel >> 8) as u8);
            rgba.push(pixel as u8);
            rgba.push((pixel >> 24) as u8);
        }
        rgba
    }

    /// Consumes the image, returning its ARGB pixels.
    pub fn into_pixels(self) -> Vec<u32> {
        self.pixels
    }

    /// Encodes the image as a PNG file.
    pub fn write_png<W: Write>(&self, writer: W) -> Result<()> {
        codec::encode_png(self, writer)
    }

    /// Encodes the image as PNG file data.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        self.write_png(&mut data)?;
        Ok(data)
    }
}

// Pixel buffers are too long to be useful in debug output.
impl fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bpp", &self.bit_count)
            .field("is_png", &self.is_png)
            .finish()
    }
}

impl fmt::Display for DecodedImage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = if self.is_png { "PNG" } else { "BMP" };
        write!(
            f,
            "{}x{} {}, {} bpp",
            self.width, self.height, kind, self.bit_count
        )
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::DecodedImage;

    #[cfg(feature = "serde")]
    #[test]
    fn serialize_only() {
        fn assert_serialize<T: serde::Serialize>() {}
        assert_serialize::<DecodedImage>();
    }

    #[test]
    fn pixel_lookup() {
        let image = DecodedImage::new(
            2,
            2,
            32,
            false,
            vec![0xff000001, 0xff000002, 0xff000003, 0x00000004],
        );
        assert_eq!(image.area(), 4);
        assert_eq!(image.pixel(1, 0), Some(0xff000002));
        assert_eq!(image.pixel(0, 1), Some(0xff000003));
        assert_eq!(image.pixel(2, 0), None);
        assert_eq!(image.pixel(0, 2), None);
        assert!(image.has_alpha());
        assert_eq!(image.to_string(), "2x2 BMP, 32 bpp");
    }

    #[test]
    fn rgba_conversion() {
        let image =
            DecodedImage::new(2, 1, 24, false, vec![0xff112233, 0x80445566]);
        assert_eq!(
            image.to_rgba_data(),
            vec![0x11, 0x22, 0x33, 0xff, 0x44, 0x55, 0x66, 0x80]
        );
    }

    #[test]
    fn png_round_trip_without_alpha() {
        let pixels = vec![0xff102030, 0xff405060, 0xff708090, 0xffa0b0c0];
        let image = DecodedImage::new(2, 2, 24, false, pixels.clone());
        assert!(!image.has_alpha());
        let data = image.to_png_bytes().unwrap();
        assert!(data.starts_with(b"\x89PNG\r\n\x1a\n"));
        let (width, height, decoded) =
            crate::codec::decode_png("test.png", &data).unwrap();
        assert_eq!((width, height), (2, 2));
        assert_eq!(decoded, pixels);
    }

    #[test]
    fn png_round_trip_with_alpha() {
        let pixels = vec![0x00102030, 0x7f405060, 0xff708090];
        let image = DecodedImage::new(3, 1, 32, false, pixels.clone());
        let data = image.to_png_bytes().unwrap();
        let (_, _, decoded) =
            crate::codec::decode_png("test.png", &data).unwrap();
        assert_eq!(decoded, pixels);
    }
}

//===========================================================================//
