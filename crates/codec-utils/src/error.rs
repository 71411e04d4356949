use thiserror::Error;

/// Byte, hex and cursor errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BytesError {
    #[error("invalid hex format: {0}")]
    InvalidHexFormat(String),

    #[error("size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("size overflow: {actual} bytes do not fit in {max}")]
    SizeOverflow { max: usize, actual: usize },

    #[error("position {position} is out of bounds for {length}-byte buffer")]
    PositionOutOfBounds { position: usize, length: usize },

    #[error("read limit of {limit} exceeded at position {position}")]
    RecursiveReadLimitExceeded { limit: usize, position: usize },

    #[error("invalid utf-8: {0}")]
    InvalidUtf8(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),
}
