//! A library for decoding ICO image files.
//!
//! An ICO file bundles several variants (different resolutions and color
//! depths) of the same icon.  Each variant is stored either as an
//! uncompressed device-independent bitmap (1, 4, 8, 24 or 32 bits per pixel)
//! or as an embedded PNG.  [`IconSet`] decodes every variant into a
//! [`DecodedImage`] holding 32-bit ARGB pixels, in directory order.
//!
//! ```no_run
//! use tinyicon::{IconSet, IconSort};
//!
//! let mut icons = IconSet::open("favicon.ico")?;
//! icons.sort_icons(IconSort::ByResolutionDescending, IconSort::ByBppDescending);
//! if let Some(icon) = icons.find(|icon| icon.width() == 32) {
//!     println!("{}x{} at {} bpp", icon.width(), icon.height(), icon.bpp());
//! }
//! # Ok::<(), tinyicon::Error>(())
//! ```

#![warn(missing_docs)]

#[macro_use]
mod macros;

mod bmpdepth;
mod codec;
mod decode;
mod error;
mod header;
mod icon;
mod icondir;
mod iconset;
mod image;
mod reader;
mod sort;

pub use crate::bmpdepth::BmpDepth;
pub use crate::error::{Error, Result};
pub use crate::header::BitmapInfoHeader;
pub use crate::icon::DecodedImage;
pub use crate::icondir::{EntryImage, IconDir, IconDirEntry};
pub use crate::iconset::IconSet;
pub use crate::image::{DibFormat, IconImage};
pub use crate::sort::IconSort;

/// Returns the version of this library.
pub fn library_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
