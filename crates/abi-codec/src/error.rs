use codec_utils::BytesError;
use thiserror::Error;

/// ABI encoding, decoding and parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    #[error("invalid type: {0}")]
    InvalidType(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("length mismatch: expected {expected} values, got {given}")]
    LengthMismatch { expected: usize, given: usize },

    #[error("array length mismatch: {kind} expects {expected} elements, got {given}")]
    ArrayLengthMismatch {
        expected: usize,
        given: usize,
        kind: String,
    },

    #[error("bytes size mismatch: expected {expected} bytes, got {given}")]
    BytesSizeMismatch { expected: usize, given: usize },

    #[error("integer overflow: {value} does not fit in {kind}")]
    IntegerOverflow { value: String, kind: String },

    #[error("invalid value: expected {expected}, got {given}")]
    InvalidValue { expected: String, given: String },

    #[error("cannot decode parameters from empty data")]
    ZeroData,

    #[error("data size too small: got {size} bytes, parameters need at least {expected}")]
    DataSizeTooSmall { size: usize, expected: usize },

    #[error("invalid boolean word: {0}")]
    InvalidBoolean(String),

    #[error("invalid utf-8: {0}")]
    InvalidUtf8(String),

    #[error("invalid offset: {0}")]
    InvalidOffset(String),

    #[error("selector mismatch: expected {expected}, got {given}")]
    SelectorMismatch { expected: String, given: String },

    #[error("json abi error: {0}")]
    Json(String),

    #[error(transparent)]
    Bytes(#[from] BytesError),
}

impl From<serde_json::Error> for AbiError {
    fn from(err: serde_json::Error) -> Self {
        AbiError::Json(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_length_mismatch() {
        let err = AbiError::LengthMismatch {
            expected: 3,
            given: 2,
        };
        assert_eq!(err.to_string(), "length mismatch: expected 3 values, got 2");
    }

    #[test]
    fn display_array_length_mismatch() {
        let err = AbiError::ArrayLengthMismatch {
            expected: 2,
            given: 3,
            kind: "uint256[2]".into(),
        };
        assert_eq!(
            err.to_string(),
            "array length mismatch: uint256[2] expects 2 elements, got 3"
        );
    }

    #[test]
    fn display_integer_overflow() {
        let err = AbiError::IntegerOverflow {
            value: "256".into(),
            kind: "uint8".into(),
        };
        assert_eq!(err.to_string(), "integer overflow: 256 does not fit in uint8");
    }

    #[test]
    fn display_zero_data() {
        assert_eq!(
            AbiError::ZeroData.to_string(),
            "cannot decode parameters from empty data"
        );
    }

    #[test]
    fn bytes_error_is_transparent() {
        let err: AbiError = BytesError::PositionOutOfBounds {
            position: 64,
            length: 32,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "position 64 is out of bounds for 32-byte buffer"
        );
    }

    #[test]
    fn json_error_converts() {
        let err: AbiError = serde_json::from_str::<u8>("nope").unwrap_err().into();
        assert!(matches!(err, AbiError::Json(_)));
    }
}
