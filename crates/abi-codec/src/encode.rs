use alloy_primitives::U256;
use codec_utils::CursorMut;
use tracing::trace;

use crate::error::AbiError;
use crate::types::{AbiParameter, AbiType, WORD};
use crate::value::AbiValue;

/// One value encoded on its own, before it is placed in an enclosing
/// head/tail layout.
struct Prepared {
    dynamic: bool,
    encoded: Vec<u8>,
}

/// ABI-encodes `values` against `parameters`.
pub fn encode(parameters: &[AbiParameter], values: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
    let kinds: Vec<&AbiType> = parameters.iter().map(|p| &p.kind).collect();
    encode_types(&kinds, values)
}

/// ABI-encodes `values` against bare types.
pub fn encode_types(kinds: &[&AbiType], values: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
    if kinds.len() != values.len() {
        return Err(AbiError::LengthMismatch {
            expected: kinds.len(),
            given: values.len(),
        });
    }

    let prepared = kinds
        .iter()
        .zip(values)
        .map(|(kind, value)| prepare(kind, value))
        .collect::<Result<Vec<_>, _>>()?;
    let out = encode_sequence(&prepared)?;

    trace!(parameters = kinds.len(), bytes = out.len(), "encoded abi parameters");
    Ok(out)
}

fn prepare(kind: &AbiType, value: &AbiValue) -> Result<Prepared, AbiError> {
    let prepared = match (kind, value) {
        (AbiType::Uint(_) | AbiType::Int(_), _) => static_word(integer_word(kind, value)?),
        (AbiType::Address, AbiValue::Address(address)) => {
            let mut word = [0u8; WORD];
            word[12..].copy_from_slice(address.as_slice());
            static_word(word)
        }
        (AbiType::Bool, AbiValue::Bool(flag)) => {
            let mut word = [0u8; WORD];
            word[WORD - 1] = u8::from(*flag);
            static_word(word)
        }
        (AbiType::FixedBytes(size), AbiValue::FixedBytes(data) | AbiValue::Bytes(data)) => {
            if data.len() != *size {
                return Err(AbiError::BytesSizeMismatch {
                    expected: *size,
                    given: data.len(),
                });
            }
            let mut word = [0u8; WORD];
            word[..data.len()].copy_from_slice(data);
            static_word(word)
        }
        (AbiType::Bytes, AbiValue::Bytes(data) | AbiValue::FixedBytes(data)) => dynamic_bytes(data),
        (AbiType::String, AbiValue::String(text)) => dynamic_bytes(text.as_bytes()),
        (AbiType::FixedArray(inner, len), AbiValue::Array(elements)) => {
            if elements.len() != *len {
                return Err(AbiError::ArrayLengthMismatch {
                    expected: *len,
                    given: elements.len(),
                    kind: kind.to_string(),
                });
            }
            let prepared = prepare_all(inner, elements)?;
            Prepared {
                dynamic: inner.is_dynamic(),
                encoded: encode_sequence(&prepared)?,
            }
        }
        (AbiType::Array(inner), AbiValue::Array(elements)) => {
            let prepared = prepare_all(inner, elements)?;
            let mut encoded = usize_word(elements.len()).to_vec();
            encoded.extend(encode_sequence(&prepared)?);
            Prepared {
                dynamic: true,
                encoded,
            }
        }
        (AbiType::Tuple(components), AbiValue::Tuple(members)) => {
            if components.len() != members.len() {
                return Err(AbiError::LengthMismatch {
                    expected: components.len(),
                    given: members.len(),
                });
            }
            let prepared = components
                .iter()
                .zip(members)
                .map(|(param, member)| prepare(&param.kind, member))
                .collect::<Result<Vec<_>, _>>()?;
            Prepared {
                dynamic: prepared.iter().any(|p| p.dynamic),
                encoded: encode_sequence(&prepared)?,
            }
        }
        _ => {
            return Err(AbiError::InvalidValue {
                expected: kind.to_string(),
                given: value.kind_name().to_string(),
            })
        }
    };
    Ok(prepared)
}

fn prepare_all(kind: &AbiType, values: &[AbiValue]) -> Result<Vec<Prepared>, AbiError> {
    values.iter().map(|value| prepare(kind, value)).collect()
}

/// Lays out prepared values as head then tail.
///
/// Static values go into the head inline. Each dynamic value reserves one
/// head word, its encoding is appended to the tail, and the reserved word is
/// then backfilled with the tail offset relative to the start of the head.
fn encode_sequence(parts: &[Prepared]) -> Result<Vec<u8>, AbiError> {
    let head_size: usize = parts
        .iter()
        .map(|p| if p.dynamic { WORD } else { p.encoded.len() })
        .sum();
    let tail_size: usize = parts
        .iter()
        .filter(|p| p.dynamic)
        .map(|p| p.encoded.len())
        .sum();

    let mut out = vec![0u8; head_size + tail_size];
    let mut cursor = CursorMut::new(&mut out);

    let mut reserved = Vec::new();
    for part in parts {
        if part.dynamic {
            reserved.push((cursor.position(), part));
            cursor.set_position(cursor.position() + WORD)?;
        } else {
            cursor.write_bytes(&part.encoded)?;
        }
    }

    let mut offsets = Vec::with_capacity(reserved.len());
    for (slot, part) in &reserved {
        offsets.push((*slot, cursor.position()));
        cursor.write_bytes(&part.encoded)?;
    }

    for (slot, offset) in offsets {
        cursor.set_position(slot)?;
        cursor.write_bytes(&usize_word(offset))?;
    }

    Ok(out)
}

/// Range-checks an integer value against `uintN`/`intN` and returns its
/// 32-byte two's complement word.
///
/// A `Uint` may fill an `int` slot and a non-negative `Int` a `uint` slot as
/// long as the value is in range.
pub(crate) fn integer_word(kind: &AbiType, value: &AbiValue) -> Result<[u8; WORD], AbiError> {
    let (raw, negative) = match value {
        AbiValue::Uint(v) => (*v, false),
        AbiValue::Int(v) => (v.into_raw(), v.is_negative()),
        _ => {
            return Err(AbiError::InvalidValue {
                expected: kind.to_string(),
                given: value.kind_name().to_string(),
            })
        }
    };

    let fits = match kind {
        AbiType::Uint(bits) => !negative && raw.bit_len() <= *bits,
        // Magnitude bits must stay below the sign bit.
        AbiType::Int(bits) => {
            let magnitude = if negative { !raw } else { raw };
            magnitude.bit_len() < *bits
        }
        _ => false,
    };
    if !fits {
        let text = match value {
            AbiValue::Int(v) => v.to_string(),
            _ => raw.to_string(),
        };
        return Err(AbiError::IntegerOverflow {
            value: text,
            kind: kind.to_string(),
        });
    }

    Ok(raw.to_be_bytes::<WORD>())
}

fn static_word(word: [u8; WORD]) -> Prepared {
    Prepared {
        dynamic: false,
        encoded: word.to_vec(),
    }
}

/// Length word followed by the content right-padded to a word multiple.
fn dynamic_bytes(data: &[u8]) -> Prepared {
    let padded_len = data.len().div_ceil(WORD) * WORD;
    let mut encoded = Vec::with_capacity(WORD + padded_len);
    encoded.extend_from_slice(&usize_word(data.len()));
    encoded.extend_from_slice(data);
    encoded.resize(WORD + padded_len, 0);
    Prepared {
        dynamic: true,
        encoded,
    }
}

fn usize_word(value: usize) -> [u8; WORD] {
    U256::from(value).to_be_bytes::<WORD>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::human_readable::parse_parameters;
    use alloy_primitives::{address, I256};
    use codec_utils::hex::hex_from_bytes;

    /// Joins 32-byte words given as unpadded hex.
    fn words(parts: &[&str]) -> String {
        let mut out = String::from("0x");
        for part in parts {
            out.push_str(&format!("{part:0>64}"));
        }
        out
    }

    fn encode_hex(signature: &str, values: &[AbiValue]) -> Result<String, AbiError> {
        let params = parse_parameters(signature).unwrap();
        encode(&params, values).map(|bytes| hex_from_bytes(&bytes))
    }

    #[test]
    fn wagmi_vector() {
        let hex = encode_hex(
            "string, uint256, bool",
            &["wagmi".into(), 420u64.into(), true.into()],
        )
        .unwrap();

        let expected = words(&["60", "1a4", "1", "5"])
            + "7761676d69000000000000000000000000000000000000000000000000000000";
        assert_eq!(hex, expected);
    }

    #[test]
    fn static_values() {
        let owner = address!("000000000000000000000000000000000000dead");
        let hex = encode_hex(
            "address, bool, bytes4, int8",
            &[
                owner.into(),
                false.into(),
                AbiValue::FixedBytes(vec![0xde, 0xad, 0xbe, 0xef]),
                I256::MINUS_ONE.into(),
            ],
        )
        .unwrap();

        let expected = words(&["dead", "0"])
            + "deadbeef00000000000000000000000000000000000000000000000000000000"
            + &"f".repeat(64);
        assert_eq!(hex, expected);
    }

    #[test]
    fn dynamic_array_of_static_elements() {
        let hex = encode_hex(
            "uint256[]",
            &[AbiValue::Array(vec![1u64.into(), 2u64.into()])],
        )
        .unwrap();
        assert_eq!(hex, words(&["20", "2", "1", "2"]));
    }

    #[test]
    fn fixed_array_of_strings_is_dynamic() {
        let hex = encode_hex(
            "string[2]",
            &[AbiValue::Array(vec!["a".into(), "b".into()])],
        )
        .unwrap();

        let a = format!("{:0<64}", "61");
        let b = format!("{:0<64}", "62");
        let expected = words(&["20", "40", "80", "1"]) + &a + &words(&["1"])[2..] + &b;
        assert_eq!(hex, expected);
    }

    #[test]
    fn static_tuple_is_inline() {
        let hex = encode_hex(
            "(uint8,bool), uint256",
            &[
                AbiValue::Tuple(vec![7u64.into(), true.into()]),
                3u64.into(),
            ],
        )
        .unwrap();
        assert_eq!(hex, words(&["7", "1", "3"]));
    }

    #[test]
    fn dynamic_tuple_goes_to_tail() {
        let hex = encode_hex(
            "uint256, (string,uint256)",
            &[
                1u64.into(),
                AbiValue::Tuple(vec!["x".into(), 2u64.into()]),
            ],
        )
        .unwrap();

        let x = format!("{:0<64}", "78");
        let expected = words(&["1", "40", "40", "2", "1"]) + &x;
        assert_eq!(hex, expected);
    }

    #[test]
    fn empty_bytes_and_string() {
        let hex = encode_hex("bytes, string", &[AbiValue::Bytes(vec![]), "".into()]).unwrap();
        assert_eq!(hex, words(&["40", "60", "0", "0"]));
    }

    #[test]
    fn length_mismatch() {
        assert_eq!(
            encode_hex("uint256, bool", &[1u64.into()]).unwrap_err(),
            AbiError::LengthMismatch {
                expected: 2,
                given: 1
            }
        );
    }

    #[test]
    fn integer_ranges() {
        assert!(encode_hex("uint8", &[255u64.into()]).is_ok());
        assert!(matches!(
            encode_hex("uint8", &[256u64.into()]),
            Err(AbiError::IntegerOverflow { .. })
        ));

        let min = I256::try_from(-128i64).unwrap();
        assert!(encode_hex("int8", &[min.into()]).is_ok());
        let below = I256::try_from(-129i64).unwrap();
        assert!(matches!(
            encode_hex("int8", &[below.into()]),
            Err(AbiError::IntegerOverflow { .. })
        ));
        assert!(encode_hex("int8", &[127u64.into()]).is_ok());
        assert!(encode_hex("int8", &[128u64.into()]).is_err());

        assert!(matches!(
            encode_hex("uint256", &[I256::MINUS_ONE.into()]),
            Err(AbiError::IntegerOverflow { .. })
        ));
        assert!(encode_hex("uint256", &[U256::MAX.into()]).is_ok());
    }

    #[test]
    fn fixed_bytes_size_mismatch() {
        assert_eq!(
            encode_hex("bytes4", &[AbiValue::FixedBytes(vec![1, 2])]).unwrap_err(),
            AbiError::BytesSizeMismatch {
                expected: 4,
                given: 2
            }
        );
    }

    #[test]
    fn fixed_array_length_mismatch() {
        let err = encode_hex("uint256[2]", &[AbiValue::Array(vec![1u64.into()])]).unwrap_err();
        assert_eq!(
            err,
            AbiError::ArrayLengthMismatch {
                expected: 2,
                given: 1,
                kind: "uint256[2]".into()
            }
        );
    }

    #[test]
    fn wrong_shape() {
        assert_eq!(
            encode_hex("bool", &["true".into()]).unwrap_err(),
            AbiError::InvalidValue {
                expected: "bool".into(),
                given: "string".into()
            }
        );
        assert!(matches!(
            encode_hex("(uint256,bool)", &[AbiValue::Tuple(vec![1u64.into()])]),
            Err(AbiError::LengthMismatch { .. })
        ));
    }
}
