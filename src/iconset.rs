use crate::error::{Error, Result};
use crate::icon::DecodedImage;
use crate::icondir::IconDir;
use crate::reader::ByteReader;
use crate::sort::{sort_images, IconSort};
use log::debug;
use std::fmt;
use std::fs;
use std::path::Path;

//===========================================================================//

/// All the images of a single ICO file, decoded.
///
/// Decoding is all-or-nothing: either every directory entry decodes, or the
/// whole file is rejected.  Images start out in directory order; use
/// [`IconSet::sort_icons`] to reorder them.
#[derive(Clone, Debug)]
pub struct IconSet {
    name: String,
    icondir: IconDir,
    icons: Vec<DecodedImage>,
}

impl IconSet {
    /// Reads and decodes the ICO file at `path`.  The file name is used as
    /// the display name in error messages.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<IconSet> {
        let path = path.as_ref();
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => path.display().to_string(),
        };
        let data =
            fs::read(path).map_err(|error| Error::io(&name, error))?;
        IconSet::from_bytes(&name, &data)
    }

    /// Decodes the ICO file contained in `data`.  `name` identifies the file
    /// in error messages.
    pub fn from_bytes(name: &str, data: &[u8]) -> Result<IconSet> {
        let reader = ByteReader::new(name, data);
        let icondir = IconDir::read(&reader)?;
        let mut icons = Vec::with_capacity(icondir.entries().len());
        for entry in icondir.entries().iter() {
            icons.push(entry.decode(&reader)?);
        }
        debug!("{}: decoded {} images", name, icons.len());
        Ok(IconSet { name: name.to_string(), icondir, icons })
    }

    /// Returns the display name of the file.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parsed directory of the file.
    pub fn icon_dir(&self) -> &IconDir {
        &self.icondir
    }

    /// Returns the number of images.
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    /// Returns true if there are no images.  A successfully decoded ICO file
    /// always has at least one.
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// Returns all the images, in their current order.
    pub fn icons(&self) -> &[DecodedImage] {
        &self.icons
    }

    /// Consumes the set, returning its images.
    pub fn into_icons(self) -> Vec<DecodedImage> {
        self.icons
    }

    /// Returns the image at `index`, or `None` if it is out of range.
    pub fn icon(&self, index: usize) -> Option<&DecodedImage> {
        self.icons.get(index)
    }

    /// Returns the last image.
    pub fn last_icon(&self) -> Option<&DecodedImage> {
        self.icons.last()
    }

    /// Returns the first image that satisfies `predicate`.
    pub fn find<F>(&self, mut predicate: F) -> Option<&DecodedImage>
    where
        F: FnMut(&DecodedImage) -> bool,
    {
        self.icons.iter().find(|icon| predicate(icon))
    }

    /// Returns every image that satisfies `predicate`, in their current
    /// order.
    pub fn extract<F>(&self, mut predicate: F) -> Vec<&DecodedImage>
    where
        F: FnMut(&DecodedImage) -> bool,
    {
        self.icons.iter().filter(|icon| predicate(icon)).collect()
    }

    /// Sorts the images by `primary`, then by `secondary` among images that
    /// compare equal.  The sort is stable, and only reorders this set in
    /// memory.
    pub fn sort_icons(&mut self, primary: IconSort, secondary: IconSort) {
        sort_images(&mut self.icons, primary, secondary);
    }

    /// Sorts the images by a single key.
    pub fn sort_icons_by(&mut self, key: IconSort) {
        self.sort_icons(key, IconSort::None);
    }

    /// Encodes the image at `index` as PNG file data.  Returns `Ok(None)` if
    /// `index` is out of range.
    pub fn image_as_png(&self, index: usize) -> Result<Option<Vec<u8>>> {
        match self.icons.get(index) {
            Some(icon) => Ok(Some(icon.to_png_bytes()?)),
            None => Ok(None),
        }
    }

    /// Encodes every image that satisfies `predicate` as PNG file data.
    pub fn extract_as_png<F>(&self, predicate: F) -> Result<Vec<Vec<u8>>>
    where
        F: FnMut(&DecodedImage) -> bool,
    {
        self.extract(predicate)
            .into_iter()
            .map(DecodedImage::to_png_bytes)
            .collect()
    }
}

impl fmt::Display for IconSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f)?;
        writeln!(f, "IconDir:")?;
        writeln!(f, "-------")?;
        write!(f, "{}", self.icondir)
    }
}

//===========================================================================//


//===========================================================================//
