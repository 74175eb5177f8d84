// src/error.rs
//! Crate error type.
//!
//! Every failure here is fatal for the run; rows that fail shape checks never
//! become errors, they are skipped inside the extractor.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure or non-2xx status
    #[error("HTTP error: {0}")]
    Http(String),

    /// Audio probe/decode/resample failure
    #[error("Audio decode error: {0}")]
    Decode(String),

    /// WAV writing failure
    #[error("WAV write error: {0}")]
    Wav(#[from] hound::Error),

    /// Filesystem errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Bad option values, caught before any network activity
    #[error("Configuration error: {0}")]
    Config(String),
}

// reqwest's Display already names the URL
impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Http(e.to_string())
    }
}

/// Convenience Result type using the crate Error
pub type Result<T> = std::result::Result<T, Error>;
