use crate::icon::DecodedImage;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

//===========================================================================//

/// A key for sorting decoded images with [`IconSet::sort_icons`].
///
/// [`IconSet::sort_icons`]: crate::IconSet::sort_icons
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum IconSort {
    /// Applies no ordering.
    #[default]
    None,
    /// By image area, from smaller to bigger.
    ByResolutionAscending,
    /// By image area, from bigger to smaller.
    ByResolutionDescending,
    /// By bits-per-pixel, from smaller to bigger.
    ByBppAscending,
    /// By bits-per-pixel, from bigger to smaller.
    ByBppDescending,
    /// Uncompressed (BMP) images first, then compressed (PNG) ones.
    ByCompressionAscending,
    /// Compressed (PNG) images first, then uncompressed (BMP) ones.
    ByCompressionDescending,
}

impl IconSort {
    /// Compares two images by this key.  `IconSort::None` considers all
    /// images equal.
    pub fn compare(&self, a: &DecodedImage, b: &DecodedImage) -> Ordering {
        match *self {
            IconSort::None => Ordering::Equal,
            IconSort::ByResolutionAscending => a.area().cmp(&b.area()),
            IconSort::ByResolutionDescending => b.area().cmp(&a.area()),
            IconSort::ByBppAscending => a.bpp().cmp(&b.bpp()),
            IconSort::ByBppDescending => b.bpp().cmp(&a.bpp()),
            IconSort::ByCompressionAscending => a.is_png().cmp(&b.is_png()),
            IconSort::ByCompressionDescending => b.is_png().cmp(&a.is_png()),
        }
    }
}

/// Stably sorts `images` by `primary`, breaking ties with `secondary`.
pub(crate) fn sort_images(
    images: &mut [DecodedImage],
    primary: IconSort,
    secondary: IconSort,
) {
    if primary == IconSort::None && secondary == IconSort::None {
        return;
    }
    images.sort_by(|a, b| {
        primary.compare(a, b).then_with(|| secondary.compare(a, b))
    });
}

//===========================================================================//


//===========================================================================//
