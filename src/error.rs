use std::io;
use thiserror::Error;

//===========================================================================//

/// Errors that can occur while loading or decoding an ICO file.
#[derive(Debug, Error)]
pub enum Error {
    /// The data is not a well-formed ICO container (bad reserved or
    /// resource-type field, no entries, or too short to hold an icon).
    #[error("{name} -> Invalid icon file: {reason}")]
    StructuralInvalidity {
        /// Display name of the offending file.
        name: String,
        /// What was wrong with it.
        reason: String,
    },
    /// A directory entry or image header holds an unsupported or
    /// out-of-range value, or the embedded image data can't be decoded.
    #[error("{name} -> Invalid icon data: {reason}")]
    MalformedImageData {
        /// Display name of the offending file.
        name: String,
        /// What was wrong with it.
        reason: String,
    },
    /// Reading the file failed.
    #[error("{name} -> I/O error: {source}")]
    Io {
        /// Display name of the file being read.
        name: String,
        /// The underlying failure.
        #[source]
        source: io::Error,
    },
    /// Re-encoding a decoded image as PNG failed, including failures of the
    /// output writer.
    #[error("PNG encoding failed: {0}")]
    PngEncoding(#[from] png::EncodingError),
}

impl Error {
    pub(crate) fn structural<S: Into<String>>(name: &str, reason: S) -> Error {
        Error::StructuralInvalidity {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed<S: Into<String>>(name: &str, reason: S) -> Error {
        Error::MalformedImageData {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(name: &str, source: io::Error) -> Error {
        Error::Io { name: name.to_string(), source }
    }

    /// Returns true if this is a [`Error::StructuralInvalidity`] error.
    pub fn is_structural(&self) -> bool {
        matches!(self, Error::StructuralInvalidity { .. })
    }

    /// Returns true if this is a [`Error::MalformedImageData`] error.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::MalformedImageData { .. })
    }
}

/// A `Result` alias whose error type is [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

//===========================================================================//


//===========================================================================//
