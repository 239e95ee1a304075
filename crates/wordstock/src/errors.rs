//! # Error Types

use std::path::PathBuf;

use crate::types::DType;

/// Errors from wordstock operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum WordstockError {
    /// An argument has an invalid value.
    ///
    /// Raised for unknown dataset names or dimensions, duplicate tokens,
    /// and shapes which cannot be reconciled.
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// An argument has the wrong element type.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// The required element type.
        expected: DType,

        /// The element type which was supplied.
        found: DType,
    },

    /// Out-of-vocabulary lookup on a vocab without a default index.
    #[error("token not found in vocab and no default index is set: {0:?}")]
    TokenNotFound(String),

    /// Index lookup past the end of a vocab.
    #[error("index {index} out of range for vocab of size {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,

        /// The vocab size.
        len: usize,
    },

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Parse error (floats, integers, headers).
    #[error("parse error: {0}")]
    Parse(String),

    /// Archive extraction error.
    #[error("archive error: {0}")]
    Archive(String),

    /// Download or cache error.
    #[error("download error: {0}")]
    Download(String),

    /// A file did not match its expected checksum.
    #[error("checksum mismatch for {path}: expected {expected}, found {found}")]
    ChecksumMismatch {
        /// The file which was checked.
        path: PathBuf,

        /// The expected sha256 digest.
        expected: String,

        /// The observed sha256 digest.
        found: String,
    },

    /// A named resource is unknown.
    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    /// A sentencepiece model is malformed.
    #[error("model error: {0}")]
    Model(String),
}

impl From<zip::result::ZipError> for WordstockError {
    fn from(err: zip::result::ZipError) -> Self {
        WordstockError::Archive(err.to_string())
    }
}

impl From<prost::DecodeError> for WordstockError {
    fn from(err: prost::DecodeError) -> Self {
        WordstockError::Model(err.to_string())
    }
}

/// Result type for wordstock operations.
pub type WSResult<T> = core::result::Result<T, WordstockError>;
