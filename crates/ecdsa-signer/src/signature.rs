use alloy_primitives::U256;
use codec_utils::hex::{bytes_from_hex, hex_from_bytes};

use crate::curve::Curve;
use crate::error::EcdsaError;

/// An ECDSA signature.
///
/// secp256k1 signatures carry `y_parity`, the parity of the nonce point's y
/// coordinate, which allows public key recovery. P-256 signatures leave it
/// `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    pub r: U256,
    pub s: U256,
    pub y_parity: Option<u8>,
}

impl Signature {
    pub fn new(r: U256, s: U256, y_parity: Option<u8>) -> Self {
        Self { r, s, y_parity }
    }

    /// Serializes as `r || s`, followed by `v = 27 + y_parity` when the
    /// parity is known.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(65);
        out.extend_from_slice(&self.r.to_be_bytes::<32>());
        out.extend_from_slice(&self.s.to_be_bytes::<32>());
        if let Some(parity) = self.y_parity {
            out.push(parity.saturating_add(27));
        }
        out
    }

    /// Parses a 64-byte `r || s` or a 65-byte `r || s || v` signature.
    ///
    /// `v` may be a raw parity (0/1), a legacy value (27/28) or an EIP-155
    /// value (35 and above).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EcdsaError> {
        let y_parity = match bytes.len() {
            64 => None,
            65 => Some(v_to_y_parity(u64::from(bytes[64]))?),
            other => return Err(EcdsaError::InvalidSerializedSize(other)),
        };

        Ok(Self {
            r: U256::from_be_slice(&bytes[..32]),
            s: U256::from_be_slice(&bytes[32..64]),
            y_parity,
        })
    }

    pub fn to_hex(&self) -> String {
        hex_from_bytes(&self.to_bytes())
    }

    pub fn from_hex(value: &str) -> Result<Self, EcdsaError> {
        Self::from_bytes(&bytes_from_hex(value, None)?)
    }

    /// Checks that `r` and `s` lie in `[1, n - 1]` and that any parity is a
    /// single bit.
    pub fn validate<C: Curve>(&self, curve: &C) -> Result<(), EcdsaError> {
        let params = curve.params();
        if !params.is_valid_scalar(self.r) {
            return Err(EcdsaError::InvalidSignature(format!(
                "r is out of range for {}",
                params.name
            )));
        }
        if !params.is_valid_scalar(self.s) {
            return Err(EcdsaError::InvalidSignature(format!(
                "s is out of range for {}",
                params.name
            )));
        }
        match self.y_parity {
            Some(parity) if parity > 1 => Err(EcdsaError::InvalidYParity(parity)),
            _ => Ok(()),
        }
    }

    /// Whether `s <= n / 2`.
    pub fn is_low_s<C: Curve>(&self, curve: &C) -> bool {
        self.s <= curve.params().half_order()
    }

    /// Replaces a high `s` with `n - s`, flipping the parity to match.
    pub fn normalize_s<C: Curve>(self, curve: &C) -> Self {
        if self.is_low_s(curve) {
            return self;
        }
        Self {
            r: self.r,
            s: curve.params().order - self.s,
            y_parity: self.y_parity.map(|parity| parity ^ 1),
        }
    }
}

/// Maps a transaction `v` to a y parity.
///
/// Accepts 0/1, the legacy 27/28, and EIP-155 values `chain_id * 2 + 35 +
/// parity`.
pub fn v_to_y_parity(v: u64) -> Result<u8, EcdsaError> {
    match v {
        0 | 27 => Ok(0),
        1 | 28 => Ok(1),
        v if v >= 35 => Ok(((v - 35) % 2) as u8),
        other => Err(EcdsaError::InvalidV(other)),
    }
}

/// Maps a y parity to the legacy `v` (27 or 28).
pub fn y_parity_to_v(y_parity: u8) -> Result<u64, EcdsaError> {
    match y_parity {
        0 | 1 => Ok(27 + u64::from(y_parity)),
        other => Err(EcdsaError::InvalidYParity(other)),
    }
}

/// Maps a y parity to an EIP-155 `v` for `chain_id`.
pub fn y_parity_to_eip155_v(y_parity: u8, chain_id: u64) -> Result<u64, EcdsaError> {
    match y_parity {
        0 | 1 => chain_id
            .checked_mul(2)
            .and_then(|v| v.checked_add(35 + u64::from(y_parity)))
            .ok_or(EcdsaError::InvalidV(chain_id)),
        other => Err(EcdsaError::InvalidYParity(other)),
    }
}
