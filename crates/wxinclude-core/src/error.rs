//! Error types for the wxinclude-core library.
//!
//! Fatal errors abort a conversion before anything is written. Per-file
//! errors are reported as warnings by the converter and never reach the
//! caller as an `Err`; [`Error::is_recoverable`] tells the two apart.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for wxinclude operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all wxinclude operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Neither explicit files nor extension masks were supplied
    #[error("no input defined: pass input files or extension masks")]
    NoInput,

    /// Failed to create the output destination
    #[error("failed to create output file '{path}': {source}")]
    OutputCreate {
        /// Path of the destination
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write or finalize the output destination
    #[error("failed to write output file '{path}': {source}")]
    OutputWrite {
        /// Path of the destination
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to open an input file
    #[error("input file '{path}' failed to open: {source}")]
    InputOpen {
        /// Path to the input file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to read an input file after it was opened
    #[error("failed to read input file '{path}': {source}")]
    InputRead {
        /// Path to the input file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Creates a new output creation error
    pub fn output_create(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputCreate {
            path: path.into(),
            source,
        }
    }

    /// Creates a new output write error
    pub fn output_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates a new input open error
    pub fn input_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::InputOpen {
            path: path.into(),
            source,
        }
    }

    /// Creates a new input read error
    pub fn input_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::InputRead {
            path: path.into(),
            source,
        }
    }

    /// Returns true if this error only affects a single input file
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InputOpen { .. } | Self::InputRead { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let err = Error::input_open("missing.png", io::Error::from(io::ErrorKind::NotFound));
        assert!(err.to_string().contains("failed to open"));
        assert!(err.to_string().contains("missing.png"));

        assert!(Error::NoInput.to_string().contains("no input defined"));
    }

    #[test]
    fn test_is_recoverable() {
        let io_err = || io::Error::from(io::ErrorKind::PermissionDenied);
        assert!(Error::input_open("a.bin", io_err()).is_recoverable());
        assert!(Error::input_read("a.bin", io_err()).is_recoverable());
        assert!(!Error::output_create("out.h", io_err()).is_recoverable());
        assert!(!Error::NoInput.is_recoverable());
    }
}
