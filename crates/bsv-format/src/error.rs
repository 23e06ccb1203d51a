//! BSV error types

use std::path::PathBuf;
use std::str::Utf8Error;
use thiserror::Error;

/// Errors produced while decoding BSV bytes or moving them to and from disk
#[derive(Debug, Error)]
pub enum BsvError {
    /// A zero-length segment appeared somewhere other than between two row
    /// boundaries (or stream edges)
    #[error("malformed BSV stream: empty segment at byte offset {offset}")]
    MalformedStream {
        /// Offset of the empty segment within the stream
        offset: usize,
    },

    /// A text segment is not valid UTF-8
    #[error("invalid UTF-8 in BSV text segment at byte offset {offset}: {source}")]
    InvalidEncoding {
        /// Offset of the first byte of the segment within the stream
        offset: usize,
        /// Underlying UTF-8 validation error, relative to the segment start
        #[source]
        source: Utf8Error,
    },

    /// The file to load does not exist
    #[error("BSV file not found: {}", path.display())]
    NotFound {
        /// Path that was requested
        path: PathBuf,
    },

    /// Exclusive create on append found a file created by another writer
    #[error("BSV file already exists: {}", path.display())]
    AlreadyExists {
        /// Path that was requested
        path: PathBuf,
    },

    /// Any other I/O failure
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path the operation was working on
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Store configuration rejected by validation
    #[error("invalid store configuration: {0}")]
    InvalidConfig(String),
}

impl BsvError {
    /// Map an I/O error for `path`, promoting the kinds the store reports
    /// as their own variants
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::AlreadyExists => Self::AlreadyExists { path },
            _ => Self::Io { path, source },
        }
    }

    /// Whether this error reports corrupt stream contents rather than an
    /// I/O or configuration problem
    #[must_use]
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::MalformedStream { .. } | Self::InvalidEncoding { .. }
        )
    }
}

/// Result type for BSV operations
pub type Result<T> = std::result::Result<T, BsvError>;

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_from_io_promotes_not_found() {
        let err = BsvError::from_io("a.bsv", IoError::from(ErrorKind::NotFound));
        assert!(matches!(err, BsvError::NotFound { ref path } if path.as_os_str() == "a.bsv"));
    }

    #[test]
    fn test_from_io_promotes_already_exists() {
        let err = BsvError::from_io("a.bsv", IoError::from(ErrorKind::AlreadyExists));
        assert!(matches!(err, BsvError::AlreadyExists { .. }));
    }

    #[test]
    fn test_from_io_keeps_other_kinds() {
        let err = BsvError::from_io("a.bsv", IoError::from(ErrorKind::PermissionDenied));
        assert!(matches!(
            err,
            BsvError::Io { ref source, .. } if source.kind() == ErrorKind::PermissionDenied
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = BsvError::MalformedStream { offset: 3 };
        assert_eq!(
            err.to_string(),
            "malformed BSV stream: empty segment at byte offset 3"
        );
        assert!(err.is_corruption());

        let err = BsvError::NotFound {
            path: PathBuf::from("missing.bsv"),
        };
        assert_eq!(err.to_string(), "BSV file not found: missing.bsv");
        assert!(!err.is_corruption());
    }
}
