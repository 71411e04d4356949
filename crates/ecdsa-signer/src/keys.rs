use std::fmt;

use alloy_primitives::U256;
use codec_utils::hex::{bytes_from_hex, hex_from_bytes};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::curve::Curve;
use crate::error::EcdsaError;

/// A 32-byte big-endian private scalar, zeroed when dropped.
///
/// The range `[1, n - 1]` depends on the curve and is checked when the key
/// is used.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, EcdsaError> {
        let bytes = <[u8; 32]>::try_from(bytes).map_err(|_| {
            EcdsaError::InvalidPrivateKey(format!("expected 32 bytes, got {}", bytes.len()))
        })?;
        Ok(Self(bytes))
    }

    pub fn from_hex(value: &str) -> Result<Self, EcdsaError> {
        let mut bytes = bytes_from_hex(value, None)?;
        let key = Self::from_slice(&bytes);
        bytes.zeroize();
        key
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex form of the secret scalar. Handle the returned string with care.
    pub fn to_hex(&self) -> String {
        hex_from_bytes(&self.0)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

/// An affine curve point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey {
    pub x: U256,
    pub y: U256,
}

impl PublicKey {
    /// SEC1 uncompressed form: `0x04 || x || y`.
    pub fn to_uncompressed(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[0] = 0x04;
        out[1..33].copy_from_slice(&self.x.to_be_bytes::<32>());
        out[33..].copy_from_slice(&self.y.to_be_bytes::<32>());
        out
    }

    /// SEC1 compressed form: `0x02` or `0x03` by y parity, then `x`.
    pub fn to_compressed(&self) -> [u8; 33] {
        let mut out = [0u8; 33];
        out[0] = if self.y.bit(0) { 0x03 } else { 0x02 };
        out[1..].copy_from_slice(&self.x.to_be_bytes::<32>());
        out
    }

    pub fn to_hex(&self) -> String {
        hex_from_bytes(&self.to_uncompressed())
    }

    /// Parses a 33-byte compressed or 65-byte uncompressed SEC1 point on
    /// `curve`.
    pub fn from_sec1_bytes<C: Curve>(curve: &C, bytes: &[u8]) -> Result<Self, EcdsaError> {
        let uncompressed = match bytes.len() {
            33 => {
                let mut compressed = [0u8; 33];
                compressed.copy_from_slice(bytes);
                curve.decompress(&compressed)?
            }
            65 => {
                let mut uncompressed = [0u8; 65];
                uncompressed.copy_from_slice(bytes);
                if uncompressed[0] != 0x04 {
                    return Err(EcdsaError::InvalidPublicKey(format!(
                        "uncompressed prefix must be 0x04, got {:#04x}",
                        uncompressed[0]
                    )));
                }
                if !curve.is_on_curve(&uncompressed) {
                    return Err(EcdsaError::PointNotOnCurve(curve.params().name));
                }
                uncompressed
            }
            other => {
                return Err(EcdsaError::InvalidPublicKey(format!(
                    "expected 33 or 65 bytes, got {other}"
                )))
            }
        };
        Ok(Self::from_uncompressed(&uncompressed))
    }

    pub fn from_hex<C: Curve>(curve: &C, value: &str) -> Result<Self, EcdsaError> {
        Self::from_sec1_bytes(curve, &bytes_from_hex(value, None)?)
    }

    /// Splits an uncompressed encoding without checking the curve equation.
    pub(crate) fn from_uncompressed(bytes: &[u8; 65]) -> Self {
        Self {
            x: U256::from_be_slice(&bytes[1..33]),
            y: U256::from_be_slice(&bytes[33..]),
        }
    }
}
