use crate::codec;
use crate::decode;
use crate::error::Result;
use crate::header::BMP_HEADER_LEN;
use crate::icon::DecodedImage;
use crate::image::IconImage;
use crate::reader::ByteReader;
use log::{debug, warn};
use std::fmt;

//===========================================================================//

// Sizes of the ICONDIR and ICONDIRENTRY structs, in bytes.
const ICONDIR_LEN: usize = 6;
const ICONDIRENTRY_LEN: usize = 16;

// The resource type number for icons (cursors, type 2, aren't supported).
const ICON_RESOURCE_TYPE: u16 = 1;

// The smallest possible icon: ICONDIR (6) + one ICONDIRENTRY (16) +
// BITMAPINFOHEADER (40) + 2-color palette (8) + XOR row (4) + AND row (4).
const MIN_ICON_FILE_LEN: usize = 78;

// The signature that all PNG files start with, read as two little-endian
// words.
const PNG_SIGNATURE_HEAD: u32 = u32::from_le_bytes([0x89, b'P', b'N', b'G']);
const PNG_SIGNATURE_TAIL: u32 = u32::from_le_bytes([b'\r', b'\n', 0x1a, b'\n']);

//===========================================================================//

/// The directory of an ICO file: its header fields and one entry per image.
#[derive(Clone, Debug)]
pub struct IconDir {
    reserved: u16,
    restype: u16,
    entries: Vec<IconDirEntry>,
}

impl IconDir {
    /// Parses the ICONDIR header and every ICONDIRENTRY, along with the
    /// header of each image the entries point to.
    pub(crate) fn read(reader: &ByteReader) -> Result<IconDir> {
        let name = reader.name();
        if reader.len() < MIN_ICON_FILE_LEN {
            invalid_icon!(
                name,
                "File is too short (was {} bytes, but must be at least {})",
                reader.len(),
                MIN_ICON_FILE_LEN
            );
        }
        let reserved = reader.read_u16(0)?;
        if reserved != 0 {
            invalid_icon!(
                name,
                "Invalid reserved field value in ICONDIR \
                 (was {}, but must be 0)",
                reserved
            );
        }
        let restype = reader.read_u16(2)?;
        if restype != ICON_RESOURCE_TYPE {
            invalid_icon!(
                name,
                "Invalid resource type (was {}, but must be {})",
                restype,
                ICON_RESOURCE_TYPE
            );
        }
        let num_entries = reader.read_u16(4)? as usize;
        if num_entries == 0 {
            invalid_icon!(name, "ICONDIR contains no entries");
        }
        let table_len = ICONDIR_LEN + ICONDIRENTRY_LEN * num_entries;
        if table_len > reader.len() {
            invalid_icon!(
                name,
                "Directory of {} entries needs {} bytes, but the file has \
                 only {}",
                num_entries,
                table_len,
                reader.len()
            );
        }
        debug!("{}: reading {} icon directory entries", name, num_entries);
        let mut entries = Vec::<IconDirEntry>::with_capacity(num_entries);
        for index in 0..num_entries {
            let offset = ICONDIR_LEN + index * ICONDIRENTRY_LEN;
            entries.push(IconDirEntry::read(reader, offset)?);
        }
        Ok(IconDir { reserved, restype, entries })
    }

    /// Returns the reserved field (always 0).
    pub fn reserved(&self) -> u16 {
        self.reserved
    }

    /// Returns the resource type number (always 1, for icons).
    pub fn resource_type(&self) -> u16 {
        self.restype
    }

    /// Returns the entries in this directory, in file order.
    pub fn entries(&self) -> &[IconDirEntry] {
        &self.entries
    }
}

impl fmt::Display for IconDir {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "reserved = {}", self.reserved)?;
        writeln!(f, "type     = {}", self.restype)?;
        writeln!(f, "count    = {}", self.entries.len())?;
        writeln!(f)?;
        writeln!(f, "IconDirEntries:")?;
        writeln!(f, "--------------")?;
        for (index, entry) in self.entries.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            writeln!(f, "Icon {}:", index)?;
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}

//===========================================================================//

/// How the image data referenced by a directory entry is stored.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EntryImage {
    /// An uncompressed BMP, without its file header.
    Dib(IconImage),
    /// A complete PNG file.
    Png,
}

/// One entry in an ICO directory; describes a single image.
#[derive(Clone, Debug)]
pub struct IconDirEntry {
    width: u8,
    height: u8,
    num_colors: u8,
    reserved: u8,
    color_planes: u16,
    bits_per_pixel: u16,
    data_size: u32,
    data_offset: u32,
    image: EntryImage,
}

impl IconDirEntry {
    /// Parses the 16-byte entry at `offset` and sniffs the format of the
    /// image it points to.
    pub(crate) fn read(
        reader: &ByteReader,
        offset: usize,
    ) -> Result<IconDirEntry> {
        let name = reader.name();
        let width = reader.read_u8(offset)?;
        let height = reader.read_u8(offset + 1)?;
        let num_colors = reader.read_u8(offset + 2)?;
        let reserved = reader.read_u8(offset + 3)?;
        let color_planes = reader.read_u16(offset + 4)?;
        let bits_per_pixel = reader.read_u16(offset + 6)?;
        let data_size = reader.read_u32(offset + 8)?;
        let data_offset = reader.read_u32(offset + 12)?;

        let image_offset = data_offset as usize;
        let image = match reader.read_u32(image_offset)? {
            BMP_HEADER_LEN => {
                EntryImage::Dib(IconImage::read(reader, image_offset)?)
            }
            PNG_SIGNATURE_HEAD => {
                let tail = reader.read_u32(image_offset + 4)?;
                if tail != PNG_SIGNATURE_TAIL {
                    malformed!(
                        name,
                        "Invalid PNG signature at offset {} \
                         (second word was {:#010x}, but must be {:#010x})",
                        image_offset,
                        tail,
                        PNG_SIGNATURE_TAIL
                    );
                }
                // The PNG bytes are handed to the codec as-is, so the whole
                // declared span must exist.
                reader.slice(image_offset, data_size as usize)?;
                EntryImage::Png
            }
            header => {
                malformed!(
                    name,
                    "Invalid image header at offset {} (was {:#010x}); \
                     header must be PNG or BITMAPINFOHEADER",
                    image_offset,
                    header
                );
            }
        };
        debug!(
            "{}: entry at {}: {} image, {} bytes at offset {}",
            name,
            offset,
            if image == EntryImage::Png { "PNG" } else { "BMP" },
            data_size,
            data_offset
        );
        Ok(IconDirEntry {
            width,
            height,
            num_colors,
            reserved,
            color_planes,
            bits_per_pixel,
            data_size,
            data_offset,
            image,
        })
    }

    /// Returns the raw width byte of the entry (0 means 256 or more).
    pub fn width_byte(&self) -> u8 {
        self.width
    }

    /// Returns the raw height byte of the entry (0 means 256 or more).
    pub fn height_byte(&self) -> u8 {
        self.height
    }

    /// Returns the width the entry declares, in pixels.  A width byte of zero
    /// is reported as 256.
    pub fn width(&self) -> u32 {
        if self.width == 0 {
            256
        } else {
            self.width as u32
        }
    }

    /// Returns the height the entry declares, in pixels.  A height byte of
    /// zero is reported as 256.
    pub fn height(&self) -> u32 {
        if self.height == 0 {
            256
        } else {
            self.height as u32
        }
    }

    /// Returns the declared number of palette colors (0 for 8 bpp or more).
    pub fn num_colors(&self) -> u8 {
        self.num_colors
    }

    /// Returns the reserved byte of the entry.
    pub fn reserved(&self) -> u8 {
        self.reserved
    }

    /// Returns the declared number of color planes.
    pub fn color_planes(&self) -> u16 {
        self.color_planes
    }

    /// Returns the bits-per-pixel declared by the entry.  For BMP images the
    /// value in the image header is authoritative.
    pub fn bits_per_pixel(&self) -> u16 {
        self.bits_per_pixel
    }

    /// Returns the size of the image data, in bytes.
    pub fn data_size(&self) -> u32 {
        self.data_size
    }

    /// Returns the offset of the image data within the file.
    pub fn data_offset(&self) -> u32 {
        self.data_offset
    }

    /// Returns how the image data is stored.
    pub fn image(&self) -> &EntryImage {
        &self.image
    }

    /// Returns true if the image is encoded as a PNG, or false if it is
    /// encoded as a BMP.
    pub fn is_png(&self) -> bool {
        self.image == EntryImage::Png
    }

    /// Decodes this entry's image from the buffer it was parsed from.
    pub(crate) fn decode(&self, reader: &ByteReader) -> Result<DecodedImage> {
        let image = match self.image {
            EntryImage::Dib(ref dib) => {
                let pixels = decode::decode_dib(reader, dib)?;
                DecodedImage::new(
                    dib.width(),
                    dib.height(),
                    dib.header().bit_count(),
                    false,
                    pixels,
                )
            }
            EntryImage::Png => {
                let data = reader
                    .slice(self.data_offset as usize, self.data_size as usize)?;
                let (width, height, pixels) =
                    codec::decode_png(reader.name(), data)?;
                DecodedImage::new(
                    width,
                    height,
                    self.bits_per_pixel,
                    true,
                    pixels,
                )
            }
        };
        // Plenty of icon editors write sloppy directory entries, and the
        // image data is authoritative, so a mismatch isn't an error.
        if image.width() != self.width() || image.height() != self.height() {
            warn!(
                "{}: entry declares {}x{}, but image data is {}x{}",
                reader.name(),
                self.width(),
                self.height(),
                image.width(),
                image.height()
            );
        }
        Ok(image)
    }
}

impl fmt::Display for IconDirEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "width       = {}", self.width)?;
        writeln!(f, "height      = {}", self.height)?;
        writeln!(f, "colorCount  = {}", self.num_colors)?;
        writeln!(f, "reserved    = {}", self.reserved)?;
        writeln!(f, "planes      = {}", self.color_planes)?;
        writeln!(f, "bitCount    = {}", self.bits_per_pixel)?;
        writeln!(f, "bytesInRes  = {}", self.data_size)?;
        writeln!(f, "imageOffset = {}", self.data_offset)?;
        writeln!(f)?;
        writeln!(f, "- Image header -")?;
        match self.image {
            EntryImage::Dib(ref dib) => write!(f, "{}", dib),
            EntryImage::Png => writeln!(f, "(Image is a PNG)"),
        }
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{EntryImage, IconDir};
    use crate::reader::ByteReader;

    fn read(input: &[u8]) -> crate::Result<IconDir> {
        IconDir::read(&ByteReader::new("test.ico", input))
    }

    const ICO_1BPP: &[u8] = b"\
        \x00\x00\x01\x00\x01\x00\
        \
        \x02\x02\x02\x00\x01\x00\x01\x00\
        \x40\x00\x00\x00\x16\x00\x00\x00\
        \
        \x28\x00\x00\x00\x02\x00\x00\x00\x04\x00\x00\x00\
        \x01\x00\x01\x00\x00\x00\x00\x00\x00\x00\x00\x00\
        \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
        \x00\x00\x00\x00\
        \
        \x55\x00\x55\x00\xff\xff\xff\x00\
        \
        \xc0\x00\x00\x00\
        \x40\x00\x00\x00\
        \
        \x40\x00\x00\x00\
        \x00\x00\x00\x00";

    const ICO_PNG: &[u8] = b"\
        \x00\x00\x01\x00\x01\x00\
        \
        \x02\x02\x00\x00\x00\x00\x00\x00\
        \x47\x00\x00\x00\x16\x00\x00\x00\
        \
        \x89\x50\x4e\x47\x0d\x0a\x1a\x0a\x00\x00\x00\x0d\x49\x48\x44\x52\
        \x00\x00\x00\x02\x00\x00\x00\x02\x08\x00\x00\x00\x00\x57\xdd\x52\
        \xf8\x00\x00\x00\x0e\x49\x44\x41\x54\x78\x9c\x63\xb4\x77\x60\xdc\
        \xef\x00\x00\x04\x08\x01\x81\x86\x2e\xc9\x8d\x00\x00\x00\x00\x49\
        \x45\x4e\x44\xae\x42\x60\x82";

    #[test]
    fn read_bmp_1bpp_icon() {
        let icondir = read(ICO_1BPP).unwrap();
        assert_eq!(icondir.resource_type(), 1);
        assert_eq!(icondir.entries().len(), 1);
        let entry = &icondir.entries()[0];
        assert_eq!(entry.width(), 2);
        assert_eq!(entry.height(), 2);
        assert_eq!(entry.num_colors(), 2);
        assert_eq!(entry.bits_per_pixel(), 1);
        assert_eq!(entry.data_size(), 64);
        assert_eq!(entry.data_offset(), 22);
        assert!(!entry.is_png());
        match entry.image() {
            EntryImage::Dib(dib) => {
                assert_eq!(dib.palette(), Some(&[0x550055, 0xffffff][..]));
                assert_eq!(dib.xor_offset(), 70);
                assert_eq!(dib.and_offset(), Some(78));
            }
            EntryImage::Png => panic!("expected a BMP entry"),
        }
        let reader = ByteReader::new("test.ico", ICO_1BPP);
        let image = entry.decode(&reader).unwrap();
        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 2);
        assert_eq!(image.bpp(), 1);
        assert_eq!(
            image.pixels(),
            &[0xff550055, 0xffffffff, 0xffffffff, 0x00ffffff]
        );
    }

    #[test]
    fn read_bmp_4bpp_icon() {
        let input: &[u8] = b"\
            \x00\x00\x01\x00\x01\x00\
            \
            \x05\x03\x10\x00\x01\x00\x04\x00\
            \x80\x00\x00\x00\x16\x00\x00\x00\
            \
            \x28\x00\x00\x00\x05\x00\x00\x00\x06\x00\x00\x00\
            \x01\x00\x04\x00\x00\x00\x00\x00\x00\x00\x00\x00\
            \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
            \x00\x00\x00\x00\
            \
            \x00\x00\x00\x00\x00\x00\x00\x00\
            \x00\x00\x7f\x00\x00\x00\xff\x00\
            \x00\x7f\x00\x00\x00\xff\x00\x00\
            \x00\x7f\x7f\x00\x00\xff\xff\x00\
            \x7f\x00\x00\x00\xff\x00\x00\x00\
            \x7f\x00\x7f\x00\xff\x00\xff\x00\
            \x7f\x7f\x00\x00\xff\xff\x00\x00\
            \x7f\x7f\x7f\x00\xff\xff\xff\x00\
            \
            \x0f\x35\x00\x00\
            \xf3\x59\x10\x00\
            \x05\x91\x00\x00\
            \
            \x88\x00\x00\x00\
            \x00\x00\x00\x00\
            \x88\x00\x00\x00";
        let icondir = read(input).unwrap();
        let entry = &icondir.entries()[0];
        assert_eq!(entry.width(), 5);
        assert_eq!(entry.height(), 3);
        assert!(!entry.is_png());
        let image = entry.decode(&ByteReader::new("test.ico", input)).unwrap();
        assert_eq!(image.width(), 5);
        assert_eq!(image.height(), 3);
        let argb: &[u32] = &[
            0x00000000, 0xff00ff00, 0xff0000ff, 0xff000000, 0x00000000,
            0xffffffff, 0xffff0000, 0xff00ff00, 0xff0000ff, 0xff000000,
            0x00000000, 0xffffffff, 0xffff0000, 0xff00ff00, 0x00000000,
        ];
        assert_eq!(image.pixels(), argb);
    }

    #[test]
    fn read_png_grayscale_icon() {
        let icondir = read(ICO_PNG).unwrap();
        let entry = &icondir.entries()[0];
        assert_eq!(entry.width(), 2);
        assert_eq!(entry.height(), 2);
        assert!(entry.is_png());
        let image = entry.decode(&ByteReader::new("test.ico", ICO_PNG)).unwrap();
        assert!(image.is_png());
        assert_eq!((image.width(), image.height()), (2, 2));
        assert_eq!(
            image.pixels(),
            &[0xff3f3f3f, 0xff7f7f7f, 0xffbfbfbf, 0xffffffff]
        );
    }

    #[test]
    fn header_field_errors_are_structural() {
        let mut input = ICO_1BPP.to_vec();
        input[0] = 1;
        assert!(read(&input).unwrap_err().is_structural());
        let mut input = ICO_1BPP.to_vec();
        input[2] = 2; // cursor
        assert!(read(&input).unwrap_err().is_structural());
        let mut input = ICO_1BPP.to_vec();
        input[4] = 0;
        assert!(read(&input).unwrap_err().is_structural());
        assert!(read(&ICO_1BPP[..77]).unwrap_err().is_structural());
    }

    #[test]
    fn directory_past_end_is_structural() {
        let mut input = ICO_1BPP.to_vec();
        input[4] = 6; // 6 + 6 * 16 = 102 bytes of directory
        assert!(read(&input).unwrap_err().is_structural());
    }

    #[test]
    fn bad_png_signature_is_malformed() {
        let mut input = ICO_PNG.to_vec();
        input[22 + 6] = b'X';
        let error = read(&input).unwrap_err();
        assert!(error.is_malformed());
        assert!(error.to_string().contains("Invalid PNG signature"));
    }

    #[test]
    fn png_span_past_end_is_malformed() {
        let mut input = ICO_PNG.to_vec();
        input[14] = 0x48; // data size one byte too long
        assert!(read(&input).unwrap_err().is_malformed());
    }

    #[test]
    fn unknown_image_header_is_malformed() {
        let mut input = ICO_1BPP.to_vec();
        input[22] = 0x0c; // BITMAPCOREHEADER size
        let error = read(&input).unwrap_err();
        assert!(error.is_malformed());
        assert!(error.to_string().contains("Invalid image header"));
    }

    #[test]
    fn image_offset_past_end_is_malformed() {
        let mut input = ICO_1BPP.to_vec();
        input[18] = 0xff;
        assert!(read(&input).unwrap_err().is_malformed());
    }

    #[test]
    fn display_dumps_fields() {
        let icondir = read(ICO_1BPP).unwrap();
        let text = icondir.to_string();
        assert!(text.contains("count    = 1"));
        assert!(text.contains("imageOffset = 22"));
        assert!(text.contains("bitCount      = 1"));
        assert!(text.contains("andMaskOffset  = 78"));
    }
}

//===========================================================================//
