//! Curve-generic key generation, signing, verification and recovery.

use alloy_primitives::Address;
use codec_utils::address::address_from_public_key;
use rand::{CryptoRng, RngCore};
use rand_core::OsRng;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::curve::{Curve, RecoverableCurve};
use crate::error::EcdsaError;
use crate::keys::{PrivateKey, PublicKey};
use crate::random::{random_bytes_fixed, random_scalar_bytes};
use crate::secp256k1::Secp256k1;
use crate::signature::Signature;

/// How [`sign`] treats its payload and derives its nonce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignOptions {
    /// Hash the payload with SHA-256 first. Otherwise the payload must
    /// already be a 32-byte digest.
    pub hash_first: bool,
    /// Mixed into the RFC 6979 nonce derivation. `None` keeps signing
    /// fully deterministic.
    pub extra_entropy: Option<[u8; 32]>,
}

impl SignOptions {
    pub fn hashed() -> Self {
        Self {
            hash_first: true,
            ..Self::default()
        }
    }

    /// Fills `extra_entropy` from the OS CSPRNG.
    pub fn with_random_entropy(self) -> Self {
        self.with_entropy(random_bytes_fixed())
    }

    pub fn with_entropy(self, entropy: [u8; 32]) -> Self {
        Self {
            extra_entropy: Some(entropy),
            ..self
        }
    }
}

/// How [`verify`] and the recovery functions treat their payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerifyOptions {
    pub hash_first: bool,
}

impl VerifyOptions {
    pub fn hashed() -> Self {
        Self { hash_first: true }
    }
}

impl From<&SignOptions> for VerifyOptions {
    fn from(options: &SignOptions) -> Self {
        Self {
            hash_first: options.hash_first,
        }
    }
}

fn prehash(payload: &[u8], hash_first: bool) -> Result<[u8; 32], EcdsaError> {
    if hash_first {
        return Ok(Sha256::digest(payload).into());
    }
    <[u8; 32]>::try_from(payload).map_err(|_| {
        EcdsaError::InvalidPayload(format!(
            "expected a 32-byte digest, got {} bytes",
            payload.len()
        ))
    })
}

/// Generates a private key with the OS CSPRNG.
pub fn generate_private_key<C: Curve>(curve: &C) -> PrivateKey {
    generate_private_key_with(curve, &mut OsRng)
}

/// Generates a private key uniformly in `[1, n - 1]` from `rng`.
pub fn generate_private_key_with<C: Curve, R: RngCore + CryptoRng>(
    curve: &C,
    rng: &mut R,
) -> PrivateKey {
    PrivateKey::new(*random_scalar_bytes(rng, curve.params().order))
}

/// Computes `key * G`.
pub fn get_public_key<C: Curve>(curve: &C, key: &PrivateKey) -> Result<PublicKey, EcdsaError> {
    let uncompressed = curve.derive_public_key(key.as_bytes())?;
    Ok(PublicKey::from_uncompressed(&uncompressed))
}

/// Signs `payload` with a deterministic RFC 6979 nonce.
///
/// The result is always low-S: a high `s` is replaced with `n - s` and the
/// recovery bit flipped.
pub fn sign<C: Curve>(
    curve: &C,
    payload: &[u8],
    key: &PrivateKey,
    options: &SignOptions,
) -> Result<Signature, EcdsaError> {
    let digest = prehash(payload, options.hash_first)?;
    let signature = curve.sign_prehash(&digest, key.as_bytes(), options.extra_entropy.as_ref())?;
    Ok(signature.normalize_s(curve))
}

/// Checks `signature` over `payload` against `public_key`.
///
/// An invalid signature or key is `Ok(false)`. Only a payload of the wrong
/// size is an error.
pub fn verify<C: Curve>(
    curve: &C,
    payload: &[u8],
    public_key: &PublicKey,
    signature: &Signature,
    options: &VerifyOptions,
) -> Result<bool, EcdsaError> {
    let digest = prehash(payload, options.hash_first)?;

    if let Err(e) = signature.validate(curve) {
        debug!(curve = curve.params().name, error = %e, "rejecting malformed signature");
        return Ok(false);
    }

    let valid = curve.verify_prehash(&digest, &public_key.to_uncompressed(), signature);
    if !valid {
        debug!(curve = curve.params().name, "signature does not verify");
    }
    Ok(valid)
}

/// Reconstructs the signer's public key from a signature with a recovery
/// bit.
pub fn recover_public_key<C: RecoverableCurve>(
    curve: &C,
    payload: &[u8],
    signature: &Signature,
    options: &VerifyOptions,
) -> Result<PublicKey, EcdsaError> {
    let digest = prehash(payload, options.hash_first)?;
    let uncompressed = curve
        .recover_prehash(&digest, signature)
        .inspect_err(|e| debug!(curve = curve.params().name, error = %e, "recovery failed"))?;
    Ok(PublicKey::from_uncompressed(&uncompressed))
}

/// Recovers the Ethereum address of a secp256k1 signer.
pub fn recover_address(
    payload: &[u8],
    signature: &Signature,
    options: &VerifyOptions,
) -> Result<Address, EcdsaError> {
    let public_key = recover_public_key(&Secp256k1, payload, signature, options)?;
    Ok(address_from_public_key(&public_key.to_uncompressed())?)
}

/// Recomputes y for a SEC1 compressed point.
pub fn decompress<C: Curve>(curve: &C, compressed: &[u8; 33]) -> Result<PublicKey, EcdsaError> {
    Ok(PublicKey::from_uncompressed(&curve.decompress(compressed)?))
}
