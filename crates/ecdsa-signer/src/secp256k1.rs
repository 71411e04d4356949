//! secp256k1 backend, built on `k256` arithmetic.

use alloy_primitives::uint;
use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{RecoveryId, Signature as K256Signature, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{PublicKey, SecretKey};

use crate::curve::{
    check_compressed_prefix, sign_prehash_rfc6979, uncompressed_array, Curve, CurveParams,
    RecoverableCurve,
};
use crate::error::EcdsaError;
use crate::signature::Signature;

pub static SECP256K1_PARAMS: CurveParams = CurveParams {
    name: "secp256k1",
    order: uint!(0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141_U256),
    field_prime: uint!(0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F_U256),
    generator_x: uint!(0x79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798_U256),
    generator_y: uint!(0x483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8_U256),
};

/// The curve used for Ethereum transaction signatures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Secp256k1;

fn secret_key(private_key: &[u8; 32]) -> Result<SecretKey, EcdsaError> {
    SecretKey::from_bytes(private_key.into())
        .map_err(|_| EcdsaError::InvalidPrivateKey("scalar must be in [1, n - 1]".into()))
}

fn k256_signature(signature: &Signature) -> Option<K256Signature> {
    K256Signature::from_scalars(
        signature.r.to_be_bytes::<32>(),
        signature.s.to_be_bytes::<32>(),
    )
    .ok()
}

impl Curve for Secp256k1 {
    const RECOVERABLE: bool = true;

    fn params(&self) -> &'static CurveParams {
        &SECP256K1_PARAMS
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
        sign_prehash_rfc6979::<k256::Secp256k1>(&secret, prehash, extra_entropy)
    }

    fn verify_prehash(&self, prehash: &[u8; 32], public_key: &[u8; 65], signature: &Signature) -> bool {
        let Ok(key) = VerifyingKey::from_sec1_bytes(public_key) else {
            return false;
        };
        let Some(sig) = k256_signature(signature) else {
            return false;
        };
        key.verify_prehash(prehash, &sig).is_ok()
    }

    fn decompress(&self, compressed: &[u8; 33]) -> Result<[u8; 65], EcdsaError> {
        check_compressed_prefix(compressed)?;
        let key = PublicKey::from_sec1_bytes(compressed)
            .map_err(|_| EcdsaError::PointNotOnCurve(SECP256K1_PARAMS.name))?;
        uncompressed_array(key.to_encoded_point(false).as_bytes())
    }

    fn is_on_curve(&self, uncompressed: &[u8; 65]) -> bool {
        uncompressed[0] == 0x04 && PublicKey::from_sec1_bytes(uncompressed).is_ok()
    }
}

impl RecoverableCurve for Secp256k1 {
    fn recover_prehash(&self, prehash: &[u8; 32], signature: &Signature) -> Result<[u8; 65], EcdsaError> {
        let parity = signature
            .y_parity
            .ok_or_else(|| EcdsaError::RecoveryFailed("signature has no y parity".into()))?;
        if parity > 1 {
            return Err(EcdsaError::InvalidYParity(parity));
        }

        let sig = k256_signature(signature)
            .ok_or_else(|| EcdsaError::RecoveryFailed("r or s out of range".into()))?;
        let recovery_id = RecoveryId::new(parity == 1, false);
        let key = VerifyingKey::recover_from_prehash(prehash, &sig, recovery_id)
            .map_err(|e| EcdsaError::RecoveryFailed(e.to_string()))?;

        uncompressed_array(key.to_encoded_point(false).as_bytes())
    }
}
