use std::io;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressParseError {
    #[error("expected {expected} address bytes, found {found} in '{input}'")]
    Length {
        input: String,
        expected: usize,
        found: usize,
    },
    #[error("invalid hex byte '{0}'")]
    InvalidByte(String),
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to run scan command: {0}")]
    Io(#[from] io::Error),
    #[error("scan command exited with {status}: {stderr}")]
    CommandFailed { status: String, stderr: String },
}

pub type ScanResult<T> = Result<T, ScanError>;
