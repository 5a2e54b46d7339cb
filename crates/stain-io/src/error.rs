//! Error types for I/O operations.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Container format not recognised or not compiled in.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Decoding error.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Channel count the encoder cannot represent.
    #[error("unsupported channel layout: {0} channels")]
    UnsupportedLayout(u32),

    /// Buffer could not be assembled.
    #[error(transparent)]
    Buffer(#[from] stain_core::Error),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
