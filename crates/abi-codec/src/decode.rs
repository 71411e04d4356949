use alloy_primitives::{Address, I256, U256};
use codec_utils::hex::hex_from_bytes;
use codec_utils::Cursor;
use tracing::debug;

use crate::error::AbiError;
use crate::types::{AbiParameter, AbiType, WORD};
use crate::value::AbiValue;

/// Decodes ABI data into values for `parameters`.
pub fn decode(parameters: &[AbiParameter], data: &[u8]) -> Result<Vec<AbiValue>, AbiError> {
    let kinds: Vec<&AbiType> = parameters.iter().map(|p| &p.kind).collect();
    decode_types(&kinds, data)
}

/// Decodes ABI data into values for bare types.
pub fn decode_types(kinds: &[&AbiType], data: &[u8]) -> Result<Vec<AbiValue>, AbiError> {
    if kinds.is_empty() {
        return Ok(Vec::new());
    }
    if data.is_empty() {
        return Err(AbiError::ZeroData);
    }

    let head_size: usize = kinds.iter().map(|kind| kind.head_size()).sum();
    if data.len() < head_size {
        debug!(size = data.len(), expected = head_size, "abi data shorter than its head");
        return Err(AbiError::DataSizeTooSmall {
            size: data.len(),
            expected: head_size,
        });
    }

    let mut cursor = Cursor::new(data);
    let mut consumed = 0;
    let mut values = Vec::with_capacity(kinds.len());
    for kind in kinds {
        cursor.set_position(consumed)?;
        let (value, used) = decode_value(&mut cursor, kind, 0).inspect_err(|e| {
            debug!(error = %e, kind = %kind, "failed to decode abi parameter");
        })?;
        consumed += used;
        values.push(value);
    }
    Ok(values)
}

/// Decodes one value at the cursor.
///
/// `base` is where the enclosing head starts; offsets read for dynamic
/// values are relative to it. Returns the value and the number of head
/// bytes it occupied.
fn decode_value(
    cursor: &mut Cursor<'_>,
    kind: &AbiType,
    base: usize,
) -> Result<(AbiValue, usize), AbiError> {
    match kind {
        AbiType::Uint(_) => {
            let word = cursor.read_word()?;
            Ok((AbiValue::Uint(U256::from_be_bytes(word)), WORD))
        }
        AbiType::Int(_) => {
            let word = cursor.read_word()?;
            Ok((AbiValue::Int(I256::from_raw(U256::from_be_bytes(word))), WORD))
        }
        AbiType::Address => {
            let word = cursor.read_word()?;
            Ok((AbiValue::Address(Address::from_slice(&word[12..])), WORD))
        }
        AbiType::Bool => {
            let word = cursor.read_word()?;
            let flag = match (word[..WORD - 1].iter().all(|&b| b == 0), word[WORD - 1]) {
                (true, 0) => false,
                (true, 1) => true,
                _ => return Err(AbiError::InvalidBoolean(hex_from_bytes(&word))),
            };
            Ok((AbiValue::Bool(flag), WORD))
        }
        AbiType::FixedBytes(size) => {
            let data = cursor.read_bytes_padded(*size, WORD)?;
            Ok((AbiValue::FixedBytes(data.to_vec()), WORD))
        }
        AbiType::Bytes => {
            let data = read_dynamic_bytes(cursor, base)?;
            Ok((AbiValue::Bytes(data.to_vec()), WORD))
        }
        AbiType::String => {
            let data = read_dynamic_bytes(cursor, base)?;
            let text = String::from_utf8(data.to_vec())
                .map_err(|e| AbiError::InvalidUtf8(e.to_string()))?;
            Ok((AbiValue::String(text), WORD))
        }
        AbiType::Array(inner) => {
            let start = follow_offset(cursor, base)?;
            let len = read_usize(cursor)?;
            let data_start = start + WORD;

            // Zero-sized elements would let a short input claim any length.
            let element_size = inner.head_size();
            if element_size == 0 {
                return Err(AbiError::InvalidType(kind.to_string()));
            }
            let available = cursor.remaining();
            if len.checked_mul(element_size).is_none_or(|needed| needed > available) {
                return Err(AbiError::ArrayLengthMismatch {
                    expected: len,
                    given: available / element_size,
                    kind: kind.to_string(),
                });
            }

            let dynamic = inner.is_dynamic();
            let mut consumed = 0;
            let mut elements = Vec::with_capacity(len);
            for i in 0..len {
                let slot = if dynamic { i * WORD } else { consumed };
                cursor.set_position(data_start + slot)?;
                let (element, used) = decode_value(cursor, inner, data_start)?;
                consumed += used;
                elements.push(element);
            }
            Ok((AbiValue::Array(elements), WORD))
        }
        AbiType::FixedArray(inner, len) if inner.is_dynamic() => {
            let start = follow_offset(cursor, base)?;
            let mut elements = Vec::new();
            for i in 0..*len {
                cursor.set_position(start + i * WORD)?;
                let (element, _) = decode_value(cursor, inner, start)?;
                elements.push(element);
            }
            Ok((AbiValue::Array(elements), WORD))
        }
        AbiType::FixedArray(inner, len) => {
            let mut consumed = 0;
            let mut elements = Vec::new();
            for _ in 0..*len {
                let (element, used) = decode_value(cursor, inner, base + consumed)?;
                consumed += used;
                elements.push(element);
            }
            Ok((AbiValue::Array(elements), consumed))
        }
        AbiType::Tuple(components) if kind.is_dynamic() => {
            let start = follow_offset(cursor, base)?;
            let mut consumed = 0;
            let mut members = Vec::with_capacity(components.len());
            for param in components {
                cursor.set_position(start + consumed)?;
                let (member, used) = decode_value(cursor, &param.kind, start)?;
                consumed += used;
                members.push(member);
            }
            Ok((AbiValue::Tuple(members), WORD))
        }
        AbiType::Tuple(components) => {
            let mut consumed = 0;
            let mut members = Vec::with_capacity(components.len());
            for param in components {
                let (member, used) = decode_value(cursor, &param.kind, base)?;
                consumed += used;
                members.push(member);
            }
            Ok((AbiValue::Tuple(members), consumed))
        }
    }
}

/// Reads an offset word and moves the cursor to `base + offset`.
fn follow_offset(cursor: &mut Cursor<'_>, base: usize) -> Result<usize, AbiError> {
    let offset = read_usize(cursor)?;
    let start = base
        .checked_add(offset)
        .ok_or_else(|| AbiError::InvalidOffset(format!("{base} + {offset} overflows")))?;
    cursor.set_position(start)?;
    Ok(start)
}

/// Follows the offset of a `bytes`/`string` value and returns its content.
fn read_dynamic_bytes<'a>(cursor: &mut Cursor<'a>, base: usize) -> Result<&'a [u8], AbiError> {
    follow_offset(cursor, base)?;
    let len = read_usize(cursor)?;
    let available = cursor.remaining();
    if len > available {
        return Err(AbiError::BytesSizeMismatch {
            expected: len,
            given: available,
        });
    }
    Ok(cursor.read_bytes(len)?)
}

/// Reads a word holding an offset or length.
fn read_usize(cursor: &mut Cursor<'_>) -> Result<usize, AbiError> {
    let word = cursor.read_word()?;
    if word[..WORD - 8].iter().any(|&b| b != 0) {
        return Err(AbiError::InvalidOffset(hex_from_bytes(&word)));
    }

    let mut low = [0u8; 8];
    low.copy_from_slice(&word[WORD - 8..]);
    usize::try_from(u64::from_be_bytes(low)).map_err(|_| AbiError::InvalidOffset(hex_from_bytes(&word)))
}
