use alloy_primitives::Address;
use sha3::{Digest, Keccak256};

use crate::error::BytesError;

/// Derives the Ethereum address of an uncompressed public key (65 bytes,
/// starting with 0x04).
///
/// The address is the last 20 bytes of the Keccak-256 hash of the 64-byte
/// key body.
pub fn address_from_public_key(uncompressed: &[u8; 65]) -> Result<Address, BytesError> {
    if uncompressed[0] != 0x04 {
        return Err(BytesError::InvalidAddress(
            "uncompressed key must start with 0x04".into(),
        ));
    }

    let hash = Keccak256::digest(&uncompressed[1..]);
    Ok(Address::from_slice(&hash[12..]))
}

/// Parses a `0x`-prefixed, 40-digit hex address.
///
/// All-lowercase and all-uppercase input is accepted as is. Mixed-case input
/// must carry a valid EIP-55 checksum.
pub fn parse_address(value: &str) -> Result<Address, BytesError> {
    let hex_part = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .ok_or_else(|| BytesError::InvalidAddress("address must start with 0x".into()))?;

    if hex_part.len() != 40 {
        return Err(BytesError::InvalidAddress(format!(
            "expected 40 hex characters, got {}",
            hex_part.len()
        )));
    }

    let bytes = ::hex::decode(hex_part)
        .map_err(|e| BytesError::InvalidAddress(format!("invalid hex: {e}")))?;
    let address = Address::from_slice(&bytes);

    let is_all_lower = hex_part.chars().all(|c| !c.is_ascii_uppercase());
    let is_all_upper = hex_part.chars().all(|c| !c.is_ascii_lowercase());
    if is_all_lower || is_all_upper {
        return Ok(address);
    }

    // Mixed case: verify EIP-55 checksum.
    if checksum_address(&address)[2..] != *hex_part {
        return Err(BytesError::InvalidAddress(format!(
            "checksum mismatch for {value}"
        )));
    }

    Ok(address)
}

/// Returns `true` when `value` parses as an address.
pub fn is_valid_address(value: &str) -> bool {
    parse_address(value).is_ok()
}

/// Renders an address in EIP-55 mixed-case checksum form.
pub fn checksum_address(address: &Address) -> String {
    let hex_part = ::hex::encode(address.as_slice());

    // EIP-55: hash the lowercase hex address (without 0x).
    let hash = Keccak256::digest(hex_part.as_bytes());

    let mut checksummed = String::with_capacity(42);
    checksummed.push_str("0x");

    for (i, c) in hex_part.chars().enumerate() {
        // Nibble i of the hash decides the case of character i.
        let byte = hash[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            checksummed.push(c.to_ascii_uppercase());
        } else {
            checksummed.push(c);
        }
    }

    checksummed
}
