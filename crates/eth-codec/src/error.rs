use abi_codec::AbiError;
use codec_utils::BytesError;
use ecdsa_signer::EcdsaError;
use rlp_codec::RlpError;
use thiserror::Error;

/// Any failure from the codec and signing crates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Bytes(#[from] BytesError),

    #[error(transparent)]
    Rlp(#[from] RlpError),

    #[error(transparent)]
    Abi(#[from] AbiError),

    #[error(transparent)]
    Ecdsa(#[from] EcdsaError),
}

/// Coarse classification of an [`Error`], for callers that dispatch on the
/// kind of failure rather than its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input text or bytes are not a valid encoding.
    Format,
    /// A byte string has the wrong size.
    SizeMismatch,
    /// A value list or array has the wrong number of elements.
    LengthMismatch,
    /// An integer does not fit its declared width.
    Overflow,
    /// Input ends before the encoding it claims to hold.
    TruncatedData,
    /// A key, signature or recovery bit is unusable.
    InvalidSignature,
    PointNotOnCurve,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Bytes(e) => bytes_kind(e),
            Error::Rlp(RlpError::Bytes(e)) => bytes_kind(e),
            Error::Rlp(_) => ErrorKind::Format,
            Error::Abi(e) => abi_kind(e),
            Error::Ecdsa(e) => ecdsa_kind(e),
        }
    }
}

fn bytes_kind(err: &BytesError) -> ErrorKind {
    match err {
        BytesError::InvalidHexFormat(_)
        | BytesError::InvalidUtf8(_)
        | BytesError::InvalidAddress(_) => ErrorKind::Format,
        BytesError::SizeMismatch { .. } | BytesError::SizeOverflow { .. } => {
            ErrorKind::SizeMismatch
        }
        BytesError::PositionOutOfBounds { .. } | BytesError::RecursiveReadLimitExceeded { .. } => {
            ErrorKind::TruncatedData
        }
    }
}

fn abi_kind(err: &AbiError) -> ErrorKind {
    match err {
        AbiError::InvalidType(_)
        | AbiError::InvalidSignature(_)
        | AbiError::InvalidBoolean(_)
        | AbiError::InvalidUtf8(_)
        | AbiError::InvalidValue { .. }
        | AbiError::InvalidOffset(_)
        | AbiError::SelectorMismatch { .. }
        | AbiError::Json(_) => ErrorKind::Format,
        AbiError::BytesSizeMismatch { .. } => ErrorKind::SizeMismatch,
        AbiError::LengthMismatch { .. } | AbiError::ArrayLengthMismatch { .. } => {
            ErrorKind::LengthMismatch
        }
        AbiError::IntegerOverflow { .. } => ErrorKind::Overflow,
        AbiError::ZeroData | AbiError::DataSizeTooSmall { .. } => ErrorKind::TruncatedData,
        AbiError::Bytes(e) => bytes_kind(e),
    }
}

fn ecdsa_kind(err: &EcdsaError) -> ErrorKind {
    match err {
        EcdsaError::InvalidSerializedSize(_) | EcdsaError::InvalidPayload(_) => {
            ErrorKind::SizeMismatch
        }
        EcdsaError::InvalidSignature(_)
        | EcdsaError::RecoveryFailed(_)
        | EcdsaError::InvalidYParity(_)
        | EcdsaError::InvalidV(_)
        | EcdsaError::InvalidPrivateKey(_)
        | EcdsaError::InvalidPublicKey(_)
        | EcdsaError::SigningFailed(_) => ErrorKind::InvalidSignature,
        EcdsaError::PointNotOnCurve(_) => ErrorKind::PointNotOnCurve,
        EcdsaError::Bytes(e) => bytes_kind(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_transparent() {
        let err = Error::from(AbiError::ZeroData);
        assert_eq!(err.to_string(), "cannot decode parameters from empty data");

        let err = Error::from(EcdsaError::InvalidV(30));
        assert_eq!(err.to_string(), "invalid v value: 30");
    }

    #[test]
    fn rlp_errors_are_format() {
        assert_eq!(Error::from(RlpError::EmptyInput).kind(), ErrorKind::Format);
        assert_eq!(Error::from(RlpError::TooDeep(1024)).kind(), ErrorKind::Format);
    }

    #[test]
    fn wrapped_bytes_errors_keep_their_kind() {
        let truncated = BytesError::PositionOutOfBounds {
            position: 64,
            length: 32,
        };
        assert_eq!(Error::from(truncated.clone()).kind(), ErrorKind::TruncatedData);
        assert_eq!(
            Error::from(AbiError::Bytes(truncated.clone())).kind(),
            ErrorKind::TruncatedData
        );
        assert_eq!(
            Error::from(RlpError::Bytes(truncated)).kind(),
            ErrorKind::TruncatedData
        );
        assert_eq!(
            Error::from(EcdsaError::Bytes(BytesError::InvalidHexFormat("x".into()))).kind(),
            ErrorKind::Format
        );
    }

    #[test]
    fn abi_kinds() {
        let overflow = AbiError::IntegerOverflow {
            value: "256".into(),
            kind: "uint8".into(),
        };
        assert_eq!(Error::from(overflow).kind(), ErrorKind::Overflow);
        assert_eq!(
            Error::from(AbiError::LengthMismatch {
                expected: 2,
                given: 1
            })
            .kind(),
            ErrorKind::LengthMismatch
        );
        assert_eq!(
            Error::from(AbiError::BytesSizeMismatch {
                expected: 4,
                given: 3
            })
            .kind(),
            ErrorKind::SizeMismatch
        );
    }

    #[test]
    fn ecdsa_kinds() {
        assert_eq!(
            Error::from(EcdsaError::PointNotOnCurve("P-256")).kind(),
            ErrorKind::PointNotOnCurve
        );
        assert_eq!(
            Error::from(EcdsaError::RecoveryFailed("x".into())).kind(),
            ErrorKind::InvalidSignature
        );
        assert_eq!(
            Error::from(EcdsaError::InvalidSerializedSize(10)).kind(),
            ErrorKind::SizeMismatch
        );
    }
}
