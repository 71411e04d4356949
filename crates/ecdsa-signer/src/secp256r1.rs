//! NIST P-256 (secp256r1) backend, built on `p256` arithmetic.
//!
//! P-256 signatures carry no recovery bit, so this curve does not implement
//! [`RecoverableCurve`](crate::curve::RecoverableCurve).

use alloy_primitives::uint;
use p256::ecdsa::signature::hazmat::PrehashVerifier;
use p256::ecdsa::{Signature as P256Signature, VerifyingKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::{NistP256, PublicKey, SecretKey};

use crate::curve::{check_compressed_prefix, sign_prehash_rfc6979, uncompressed_array, Curve, CurveParams};
use crate::error::EcdsaError;
use crate::signature::Signature;

pub static P256_PARAMS: CurveParams = CurveParams {
    name: "P-256",
    order: uint!(0xFFFFFFFF00000000FFFFFFFFFFFFFFFFBCE6FAADA7179E84F3B9CAC2FC632551_U256),
    field_prime: uint!(0xFFFFFFFF00000001000000000000000000000000FFFFFFFFFFFFFFFFFFFFFFFF_U256),
    generator_x: uint!(0x6B17D1F2E12C4247F8BCE6E563A440F277037D812DEB33A0F4A13945D898C296_U256),
    generator_y: uint!(0x4FE342E2FE1A7F9B8EE7EB4A7C0F9E162BCE33576B315ECECBB6406837BF51F5_U256),
};

/// The curve used by WebAuthn and passkey credentials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct P256;

fn secret_key(private_key: &[u8; 32]) -> Result<SecretKey, EcdsaError> {
    SecretKey::from_bytes(private_key.into())
        .map_err(|_| EcdsaError::InvalidPrivateKey("scalar must be in [1, n - 1]".into()))
}

impl Curve for P256 {
    const RECOVERABLE: bool = false;

    fn params(&self) -> &'static CurveParams {
        &P256_PARAMS
    }

    fn derive_public_key(&self, private_key: &[u8; 32]) -> Result<[u8; 65], EcdsaError> {
        let public = secret_key(private_key)?.public_key();
        uncompressed_array(public.to_encoded_point(false).as_bytes())
    }

    fn sign_prehash(
        &self,
        prehash: &[u8; 32],
        private_key: &[u8; 32],
        extra_entropy: Option<&[u8; 32]>,
    ) -> Result<Signature, EcdsaError> {
        let secret = secret_key(private_key)?.to_nonzero_scalar();
        let signature = sign_prehash_rfc6979::<NistP256>(&secret, prehash, extra_entropy)?;
        Ok(Signature {
            y_parity: None,
            ..signature
        })
    }

    fn verify_prehash(&self, prehash: &[u8; 32], public_key: &[u8; 65], signature: &Signature) -> bool {
        let Ok(key) = VerifyingKey::from_sec1_bytes(public_key) else {
            return false;
        };
        let Ok(sig) = P256Signature::from_scalars(
            signature.r.to_be_bytes::<32>(),
            signature.s.to_be_bytes::<32>(),
        ) else {
            return false;
        };
        key.verify_prehash(prehash, &sig).is_ok()
    }

    fn decompress(&self, compressed: &[u8; 33]) -> Result<[u8; 65], EcdsaError> {
        check_compressed_prefix(compressed)?;
        let key = PublicKey::from_sec1_bytes(compressed)
            .map_err(|_| EcdsaError::PointNotOnCurve(P256_PARAMS.name))?;
        uncompressed_array(key.to_encoded_point(false).as_bytes())
    }

    fn is_on_curve(&self, uncompressed: &[u8; 65]) -> bool {
        uncompressed[0] == 0x04 && PublicKey::from_sec1_bytes(uncompressed).is_ok()
    }
}
