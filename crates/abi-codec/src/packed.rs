//! Non-standard packed encoding (`abi.encodePacked`).
//!
//! Values are concatenated without padding, except that array elements
//! each take a full 32-byte word. Dynamic values carry no length prefix, so
//! the output is ambiguous and cannot be decoded.

use crate::encode::integer_word;
use crate::error::AbiError;
use crate::types::{AbiType, WORD};
use crate::value::AbiValue;

/// Packs `values` against `kinds`. Tuples are not supported.
pub fn encode_packed(kinds: &[AbiType], values: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
    if kinds.len() != values.len() {
        return Err(AbiError::LengthMismatch {
            expected: kinds.len(),
            given: values.len(),
        });
    }

    let mut out = Vec::new();
    for (kind, value) in kinds.iter().zip(values) {
        pack(kind, value, false, &mut out)?;
    }
    Ok(out)
}

fn pack(kind: &AbiType, value: &AbiValue, in_array: bool, out: &mut Vec<u8>) -> Result<(), AbiError> {
    match (kind, value) {
        (AbiType::Address, AbiValue::Address(address)) => {
            if in_array {
                out.extend_from_slice(&[0u8; 12]);
            }
            out.extend_from_slice(address.as_slice());
        }
        (AbiType::String, AbiValue::String(text)) => out.extend_from_slice(text.as_bytes()),
        (AbiType::Bytes, AbiValue::Bytes(data) | AbiValue::FixedBytes(data)) => {
            out.extend_from_slice(data)
        }
        (AbiType::Bool, AbiValue::Bool(flag)) => {
            if in_array {
                out.extend_from_slice(&[0u8; WORD - 1]);
            }
            out.push(u8::from(*flag));
        }
        (AbiType::Uint(bits) | AbiType::Int(bits), _) => {
            let word = integer_word(kind, value)?;
            let size = if in_array { WORD } else { bits / 8 };
            out.extend_from_slice(&word[WORD - size..]);
        }
        (AbiType::FixedBytes(size), AbiValue::FixedBytes(data) | AbiValue::Bytes(data)) => {
            if data.len() != *size {
                return Err(AbiError::BytesSizeMismatch {
                    expected: *size,
                    given: data.len(),
                });
            }
            out.extend_from_slice(data);
            if in_array {
                out.resize(out.len() + WORD - size, 0);
            }
        }
        (AbiType::FixedArray(inner, len), AbiValue::Array(elements)) => {
            if elements.len() != *len {
                return Err(AbiError::ArrayLengthMismatch {
                    expected: *len,
                    given: elements.len(),
                    kind: kind.to_string(),
                });
            }
            for element in elements {
                pack(inner, element, true, out)?;
            }
        }
        (AbiType::Array(inner), AbiValue::Array(elements)) => {
            for element in elements {
                pack(inner, element, true, out)?;
            }
        }
        (AbiType::Tuple(_), _) => {
            return Err(AbiError::InvalidType(format!(
                "{kind} cannot be packed"
            )));
        }
        _ => {
            return Err(AbiError::InvalidValue {
                expected: kind.to_string(),
                given: value.kind_name().to_string(),
            });
        }
    }
    Ok(())
}
