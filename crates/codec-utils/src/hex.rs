//! Strict conversion between `0x`-prefixed hex text and raw bytes.
//!
//! Input is accepted in either case; output is always lowercase. Every hex
//! string produced here satisfies `len(hex) == 2 * len(bytes) + 2`.

use alloy_primitives::{I256, U256};

use crate::error::BytesError;

/// Decodes a `0x`-prefixed hex string into bytes.
///
/// The string must match `^0x([0-9a-fA-F]{2})*$`. When `size` is given the
/// decoded length must equal it exactly.
pub fn bytes_from_hex(value: &str, size: Option<usize>) -> Result<Vec<u8>, BytesError> {
    let digits = strip_prefix(value)?;

    if digits.len() % 2 != 0 {
        return Err(BytesError::InvalidHexFormat(format!(
            "odd number of hex digits in {value:?}"
        )));
    }

    let bytes = ::hex::decode(digits)
        .map_err(|e| BytesError::InvalidHexFormat(format!("{value:?}: {e}")))?;

    if let Some(expected) = size {
        assert_size(&bytes, expected)?;
    }

    Ok(bytes)
}

/// Encodes bytes as a lowercase `0x`-prefixed hex string.
pub fn hex_from_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    out.push_str("0x");
    out.push_str(&::hex::encode(bytes));
    out
}

/// Returns the minimal big-endian bytes of `value`, or exactly `size` bytes
/// left-padded with zeros.
///
/// Zero is a single `0x00` byte when no size is requested.
pub fn bytes_from_number(value: U256, size: Option<usize>) -> Result<Vec<u8>, BytesError> {
    let full = value.to_be_bytes::<32>();
    let minimal = trim_left(&full);

    match size {
        Some(size) => pad_left(minimal, size),
        None if minimal.is_empty() => Ok(vec![0]),
        None => Ok(minimal.to_vec()),
    }
}

/// Encodes an unsigned integer as hex, see [`bytes_from_number`].
pub fn hex_from_number(value: U256, size: Option<usize>) -> Result<String, BytesError> {
    Ok(hex_from_bytes(&bytes_from_number(value, size)?))
}

/// Encodes a signed integer as two's complement hex in `size` bytes
/// (32 when not given).
pub fn hex_from_signed(value: I256, size: Option<usize>) -> Result<String, BytesError> {
    let size = size.unwrap_or(32);
    let raw = value.into_raw();
    let negative = value.is_negative();

    // Significant bits excluding the sign bit must fit below the top bit.
    // Zero needs no bytes at all, matching `hex_from_number`.
    let magnitude_bits = if negative { (!raw).bit_len() } else { raw.bit_len() };
    if size < 32 && !value.is_zero() && magnitude_bits >= size * 8 {
        return Err(BytesError::SizeOverflow {
            max: size,
            actual: magnitude_bits.div_ceil(8),
        });
    }

    let full = raw.to_be_bytes::<32>();
    let bytes = if size <= 32 {
        full[32 - size..].to_vec()
    } else {
        let fill = if negative { 0xff } else { 0x00 };
        let mut out = vec![fill; size - 32];
        out.extend_from_slice(&full);
        out
    };

    Ok(hex_from_bytes(&bytes))
}

/// Parses big-endian hex into a 256-bit unsigned integer. `0x` is zero.
pub fn hex_to_big_int(value: &str) -> Result<U256, BytesError> {
    let bytes = bytes_from_hex(value, None)?;
    let significant = trim_left(&bytes);

    if significant.len() > 32 {
        return Err(BytesError::SizeOverflow {
            max: 32,
            actual: significant.len(),
        });
    }

    Ok(U256::from_be_slice(significant))
}

/// Encodes UTF-8 text as hex.
pub fn hex_from_string(value: &str) -> String {
    hex_from_bytes(value.as_bytes())
}

/// Decodes hex into UTF-8 text.
pub fn hex_to_string(value: &str) -> Result<String, BytesError> {
    let bytes = bytes_from_hex(value, None)?;
    String::from_utf8(bytes).map_err(|e| BytesError::InvalidUtf8(e.to_string()))
}

/// Left-pads `bytes` with zeros to `size` bytes.
pub fn pad_left(bytes: &[u8], size: usize) -> Result<Vec<u8>, BytesError> {
    if bytes.len() > size {
        return Err(BytesError::SizeOverflow {
            max: size,
            actual: bytes.len(),
        });
    }
    let mut out = vec![0u8; size - bytes.len()];
    out.extend_from_slice(bytes);
    Ok(out)
}

/// Right-pads `bytes` with zeros to `size` bytes.
pub fn pad_right(bytes: &[u8], size: usize) -> Result<Vec<u8>, BytesError> {
    if bytes.len() > size {
        return Err(BytesError::SizeOverflow {
            max: size,
            actual: bytes.len(),
        });
    }
    let mut out = bytes.to_vec();
    out.resize(size, 0);
    Ok(out)
}

/// Fails with [`BytesError::SizeMismatch`] unless `bytes` is exactly `size`
/// bytes long.
pub fn assert_size(bytes: &[u8], size: usize) -> Result<(), BytesError> {
    if bytes.len() != size {
        return Err(BytesError::SizeMismatch {
            expected: size,
            actual: bytes.len(),
        });
    }
    Ok(())
}

/// Strips leading zero bytes.
pub fn trim_left(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

fn strip_prefix(value: &str) -> Result<&str, BytesError> {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .ok_or_else(|| BytesError::InvalidHexFormat(format!("missing 0x prefix in {value:?}")))
}
