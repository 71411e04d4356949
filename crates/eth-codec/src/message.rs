//! EIP-191 `personal_sign` messages.

use alloy_primitives::Address;
use ecdsa_signer::{recover_address, sign, PrivateKey, Secp256k1, SignOptions, Signature, VerifyOptions};
use sha3::{Digest, Keccak256};
use tracing::{debug, trace};

use crate::error::Error;

/// Keccak-256 of `data`.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Hash of `"\x19Ethereum Signed Message:\n" || len(message) || message`.
pub fn personal_message_hash(message: &[u8]) -> [u8; 32] {
    let prefix = format!("\x19Ethereum Signed Message:\n{}", message.len());
    let mut hasher = Keccak256::new();
    hasher.update(prefix.as_bytes());
    hasher.update(message);
    hasher.finalize().into()
}

/// Signs `message` the way wallets answer `personal_sign`.
pub fn sign_personal_message(message: &[u8], key: &PrivateKey) -> Result<Signature, Error> {
    let digest = personal_message_hash(message);
    Ok(sign(&Secp256k1, &digest, key, &SignOptions::default())?)
}

/// Recovers the address that signed `message` with `personal_sign`.
pub fn recover_personal_message_signer(
    message: &[u8],
    signature: &Signature,
) -> Result<Address, Error> {
    let digest = personal_message_hash(message);
    let signer = recover_address(&digest, signature, &VerifyOptions::default()).inspect_err(|e| {
        debug!(error = %e, len = message.len(), "personal message signer not recoverable");
    })?;
    trace!(%signer, "recovered personal message signer");
    Ok(signer)
}
