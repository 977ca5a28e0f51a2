//! Error types for the Radix graphics resource layer
//!
//! This module defines the error types used throughout the crate,
//! including file access, image decoding, graphics backend calls and
//! resource lookups.

use std::fmt;
use std::path::Path;

/// Result type for Radix graphics operations
pub type Result<T> = std::result::Result<T, Error>;

/// Radix graphics errors
#[derive(Debug, Clone)]
pub enum Error {
    /// A shader or image file could not be opened or read
    Io {
        /// Path that failed
        path: String,
        /// Underlying I/O message
        message: String,
    },

    /// The image decoder rejected the file contents
    ImageDecode {
        /// Path (or label) of the image
        path: String,
        /// Decoder message
        message: String,
    },

    /// Pixel layout not supported for upload (e.g. grayscale under the rejecting policy)
    UnsupportedFormat(String),

    /// Backend-specific error (OpenGL, mock device, etc.)
    BackendError(String),

    /// Invalid resource (unknown id, resource not loaded, released handle)
    InvalidResource(String),

    /// Initialization failed (load phase misuse, invalid configuration)
    InitializationFailed(String),
}

impl Error {
    /// Build an `Io` error from a path and an `std::io::Error`
    pub fn io(path: &Path, err: &std::io::Error) -> Self {
        Error::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io { path, message } => write!(f, "I/O error on '{}': {}", path, message),
            Error::ImageDecode { path, message } => {
                write!(f, "Image decode failed for '{}': {}", path, message)
            }
            Error::UnsupportedFormat(msg) => write!(f, "Unsupported format: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
