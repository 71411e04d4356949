//! Curve abstraction shared by the secp256k1 and P-256 backends.
//!
//! Curves are stateless unit structs passed by reference into the generic
//! operations in [`crate::ecdsa`]. Only curves whose signatures carry a
//! recovery bit implement [`RecoverableCurve`].

use alloy_primitives::U256;
use ecdsa::elliptic_curve::generic_array::ArrayLength;
use ecdsa::elliptic_curve::ops::Invert;
use ecdsa::elliptic_curve::subtle::CtOption;
use ecdsa::elliptic_curve::{CurveArithmetic, Scalar};
use ecdsa::hazmat::{bits2field, DigestPrimitive, SignPrimitive};
use ecdsa::{PrimeCurve, SignatureSize};

use crate::error::EcdsaError;
use crate::signature::Signature;

/// Domain parameters of a short Weierstrass curve over a 256-bit prime
/// field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveParams {
    pub name: &'static str,
    /// Order `n` of the base point.
    pub order: U256,
    pub field_prime: U256,
    pub generator_x: U256,
    pub generator_y: U256,
}

impl CurveParams {
    /// `n / 2`, the largest `s` accepted as low-S.
    pub fn half_order(&self) -> U256 {
        self.order >> 1
    }

    /// Whether `value` lies in `[1, n - 1]`.
    pub fn is_valid_scalar(&self, value: U256) -> bool {
        !value.is_zero() && value < self.order
    }
}

/// Field and group operations over one curve, on big-endian encodings.
pub trait Curve: Send + Sync {
    /// Whether signatures on this curve carry a `y_parity` recovery bit.
    const RECOVERABLE: bool;

    fn params(&self) -> &'static CurveParams;

    /// Multiplies the generator by `private_key`, returning the SEC1
    /// uncompressed point.
    fn derive_public_key(&self, private_key: &[u8; 32]) -> Result<[u8; 65], EcdsaError>;

    /// Signs a 32-byte digest with an RFC 6979 nonce. `extra_entropy` is
    /// mixed into the nonce derivation when present.
    ///
    /// Backends may return either `s`; callers normalize. `y_parity`
    /// matches the returned `s`, or is `None` on non-recoverable curves.
    fn sign_prehash(
        &self,
        prehash: &[u8; 32],
        private_key: &[u8; 32],
        extra_entropy: Option<&[u8; 32]>,
    ) -> Result<Signature, EcdsaError>;

    /// Checks `(r, s)` over `prehash` against an uncompressed public key.
    /// Malformed keys and out-of-range scalars verify as `false`.
    fn verify_prehash(&self, prehash: &[u8; 32], public_key: &[u8; 65], signature: &Signature)
        -> bool;

    /// Recomputes y from a SEC1 compressed point.
    fn decompress(&self, compressed: &[u8; 33]) -> Result<[u8; 65], EcdsaError>;

    /// Whether an uncompressed SEC1 encoding names a point on the curve.
    fn is_on_curve(&self, uncompressed: &[u8; 65]) -> bool;
}

/// Curves that support public key recovery from a signature.
pub trait RecoverableCurve: Curve {
    /// Reconstructs the uncompressed public key that produced `signature`
    /// over `prehash`, using `y_parity` to pick between the two candidates.
    fn recover_prehash(&self, prehash: &[u8; 32], signature: &Signature)
        -> Result<[u8; 65], EcdsaError>;
}

/// Signs `prehash` with the backend's RFC 6979 signer, nonce hashed with
/// the curve's digest.
pub(crate) fn sign_prehash_rfc6979<C>(
    secret: &Scalar<C>,
    prehash: &[u8; 32],
    extra_entropy: Option<&[u8; 32]>,
) -> Result<Signature, EcdsaError>
where
    C: PrimeCurve + CurveArithmetic + DigestPrimitive,
    Scalar<C>: Invert<Output = CtOption<Scalar<C>>> + SignPrimitive<C>,
    SignatureSize<C>: ArrayLength<u8>,
{
    let z = bits2field::<C>(prehash).map_err(|e| EcdsaError::SigningFailed(e.to_string()))?;
    let entropy = extra_entropy.map_or(&[][..], |bytes| bytes.as_slice());
    let (signature, recovery_id) = secret
        .try_sign_prehashed_rfc6979::<C::Digest>(&z, entropy)
        .map_err(|e| EcdsaError::SigningFailed(e.to_string()))?;

    let (r, s) = signature.split_bytes();
    Ok(Signature {
        r: U256::from_be_slice(&r),
        s: U256::from_be_slice(&s),
        y_parity: recovery_id.map(|id| u8::from(id.is_y_odd())),
    })
}

/// Checks a SEC1 compressed prefix before handing the point to a backend.
pub(crate) fn check_compressed_prefix(compressed: &[u8; 33]) -> Result<(), EcdsaError> {
    match compressed[0] {
        0x02 | 0x03 => Ok(()),
        other => Err(EcdsaError::InvalidPublicKey(format!(
            "compressed prefix must be 0x02 or 0x03, got {other:#04x}"
        ))),
    }
}

/// Copies a SEC1 uncompressed encoding out of a backend's point type.
pub(crate) fn uncompressed_array(encoded: &[u8]) -> Result<[u8; 65], EcdsaError> {
    <[u8; 65]>::try_from(encoded).map_err(|_| {
        EcdsaError::InvalidPublicKey(format!(
            "expected 65-byte uncompressed point, got {} bytes",
            encoded.len()
        ))
    })
}
