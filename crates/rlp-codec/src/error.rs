use codec_utils::BytesError;
use thiserror::Error;

/// RLP decoding errors. Every variant is an invalid encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RlpError {
    #[error("invalid rlp encoding: empty input")]
    EmptyInput,

    #[error("invalid rlp encoding: declared length overruns the input")]
    InputTooShort,

    #[error("invalid rlp encoding: length has a leading zero byte")]
    LeadingZero,

    #[error("invalid rlp encoding: long form used for a length below 56")]
    NonCanonicalSize,

    #[error("invalid rlp encoding: single byte below 0x80 must encode as itself")]
    NonCanonicalSingleByte,

    #[error("invalid rlp encoding: length does not fit in usize")]
    LengthOverflow,

    #[error("invalid rlp encoding: {0} trailing bytes")]
    TrailingBytes(usize),

    #[error("invalid rlp encoding: nesting exceeds {0} levels")]
    TooDeep(usize),

    #[error("invalid rlp encoding: {0}")]
    Header(alloy_rlp::Error),

    #[error("invalid rlp encoding: {0}")]
    Bytes(#[from] BytesError),
}

impl From<alloy_rlp::Error> for RlpError {
    fn from(err: alloy_rlp::Error) -> Self {
        match err {
            alloy_rlp::Error::InputTooShort => RlpError::InputTooShort,
            alloy_rlp::Error::LeadingZero => RlpError::LeadingZero,
            alloy_rlp::Error::NonCanonicalSize => RlpError::NonCanonicalSize,
            alloy_rlp::Error::NonCanonicalSingleByte => RlpError::NonCanonicalSingleByte,
            // Header decoding reports a length wider than usize as a custom error.
            alloy_rlp::Error::Overflow | alloy_rlp::Error::Custom(_) => RlpError::LengthOverflow,
            other => RlpError::Header(other),
        }
    }
}
