use codec_utils::BytesError;
use thiserror::Error;

/// Key, signature and curve errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EcdsaError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("public key recovery failed: {0}")]
    RecoveryFailed(String),

    #[error("invalid y parity: {0}")]
    InvalidYParity(u8),

    #[error("invalid v value: {0}")]
    InvalidV(u64),

    #[error("invalid serialized signature size: expected 64 or 65 bytes, got {0}")]
    InvalidSerializedSize(usize),

    #[error("signing failed: {0}")]
    SigningFailed(String),

    #[error("point is not on the {0} curve")]
    PointNotOnCurve(&'static str),

    #[error(transparent)]
    Bytes(#[from] BytesError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_private_key() {
        let err = EcdsaError::InvalidPrivateKey("scalar is zero".into());
        assert_eq!(err.to_string(), "invalid private key: scalar is zero");
    }

    #[test]
    fn display_recovery_failed() {
        let err = EcdsaError::RecoveryFailed("missing y parity".into());
        assert_eq!(err.to_string(), "public key recovery failed: missing y parity");
    }

    #[test]
    fn display_invalid_v() {
        assert_eq!(EcdsaError::InvalidV(29).to_string(), "invalid v value: 29");
    }

    #[test]
    fn display_invalid_serialized_size() {
        let err = EcdsaError::InvalidSerializedSize(63);
        assert_eq!(
            err.to_string(),
            "invalid serialized signature size: expected 64 or 65 bytes, got 63"
        );
    }

    #[test]
    fn display_point_not_on_curve() {
        let err = EcdsaError::PointNotOnCurve("secp256k1");
        assert_eq!(err.to_string(), "point is not on the secp256k1 curve");
    }

    #[test]
    fn bytes_error_is_transparent() {
        let err: EcdsaError = BytesError::InvalidHexFormat("odd length".into()).into();
        assert_eq!(err.to_string(), "invalid hex format: odd length");
    }
}
