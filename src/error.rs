//! Error types for asset loading.

use std::path::PathBuf;

/// Errors that can occur while loading an asset.
///
/// None of these abort a batch load: the public `load_*` entry points log
/// the error and return an empty asset, so one bad file never takes down
/// the callers loading many.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// The file could not be opened.
    #[error("could not open file \"{path}\": {source}")]
    FileNotFound {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A magic number or fixed structure did not match the expected format.
    #[error("malformed header in \"{path}\": {reason}")]
    MalformedHeader {
        /// File being parsed.
        path: PathBuf,
        /// What was expected and not found.
        reason: String,
    },

    /// The file ended before the declared data length.
    #[error("truncated data in \"{path}\": {reason}")]
    TruncatedData {
        /// File being parsed.
        path: PathBuf,
        /// Which read came up short.
        reason: String,
    },

    /// The file extension is not handled by any loader.
    #[error("file extension \".{extension}\" not supported")]
    UnsupportedExtension {
        /// The offending extension (lower-cased, without the dot).
        extension: String,
    },

    /// A delegated codec reported failure (bad image bytes, bad base64, …).
    #[error("decode failure: {0}")]
    DecodeFailure(String),

    /// An accessor declared a component type outside the recognized set.
    #[error("unsupported component type for {context}")]
    UnsupportedComponentType {
        /// Which attribute or stream declared the bad type.
        context: String,
    },
}

impl AssetError {
    /// Shorthand for [`AssetError::FileNotFound`].
    pub fn file_not_found(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileNotFound {
            path: path.into(),
            source,
        }
    }

    /// Shorthand for [`AssetError::MalformedHeader`].
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedHeader {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for [`AssetError::TruncatedData`].
    pub fn truncated(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::TruncatedData {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
