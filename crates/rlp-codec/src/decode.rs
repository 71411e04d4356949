use alloy_rlp::Header;
use codec_utils::hex::bytes_from_hex;
use tracing::{debug, trace};

use crate::error::RlpError;
use crate::item::RlpItem;

/// Maximum list nesting accepted by the decoder.
pub const MAX_DEPTH: usize = 1024;

/// Decodes exactly one RLP item. Bytes left over after it are an error.
pub fn decode(bytes: &[u8]) -> Result<RlpItem, RlpError> {
    let (item, rest) = decode_prefix(bytes)?;
    if !rest.is_empty() {
        debug!(trailing = rest.len(), "rlp input has trailing bytes");
        return Err(RlpError::TrailingBytes(rest.len()));
    }
    Ok(item)
}

/// Decodes one RLP item from hex.
pub fn decode_hex(value: &str) -> Result<RlpItem, RlpError> {
    let bytes = bytes_from_hex(value, None)?;
    decode(&bytes)
}

/// Decodes the first RLP item in `bytes` and returns it with the unconsumed
/// remainder.
pub fn decode_prefix(bytes: &[u8]) -> Result<(RlpItem, &[u8]), RlpError> {
    if bytes.is_empty() {
        return Err(RlpError::EmptyInput);
    }

    let mut buf = bytes;
    let item = decode_item(&mut buf, 0).inspect_err(|e| {
        debug!(error = %e, "rejected rlp input");
    })?;
    Ok((item, buf))
}

fn decode_item(buf: &mut &[u8], depth: usize) -> Result<RlpItem, RlpError> {
    // A single byte below 0x80 is left in place and reported as a one
    // byte payload, so it is read back out below like any other string.
    let header = Header::decode(buf)?;
    if header.list && depth >= MAX_DEPTH {
        return Err(RlpError::TooDeep(MAX_DEPTH));
    }

    let (payload, rest) = buf
        .split_at_checked(header.payload_length)
        .ok_or(RlpError::InputTooShort)?;
    *buf = rest;

    if !header.list {
        return Ok(RlpItem::Bytes(payload.to_vec()));
    }

    // Children are decoded from the payload alone so none can run past it.
    let mut inner = payload;
    let mut items = Vec::new();
    while !inner.is_empty() {
        items.push(decode_item(&mut inner, depth + 1)?);
    }

    trace!(depth, children = items.len(), "decoded rlp list");
    Ok(RlpItem::List(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{encode, encode_hex};
    use hex_literal::hex;

    #[test]
    fn hello_world_vector() {
        let item = decode_hex("0x8b68656c6c6f20776f726c64").unwrap();
        assert_eq!(item, RlpItem::Bytes(b"hello world".to_vec()));
        assert_eq!(encode_hex(&item), "0x8b68656c6c6f20776f726c64");
    }

    #[test]
    fn single_bytes_and_empties() {
        assert_eq!(decode(&[0x05]).unwrap(), RlpItem::Bytes(vec![0x05]));
        assert_eq!(decode(&[0x80]).unwrap(), RlpItem::empty());
        assert_eq!(decode(&[0xc0]).unwrap(), RlpItem::List(vec![]));
        assert_eq!(decode(&[0x81, 0x80]).unwrap(), RlpItem::Bytes(vec![0x80]));
    }

    #[test]
    fn nested_list() {
        let item = decode(&hex!("c7c0c1c0c3c0c1c0")).unwrap();
        let zero = RlpItem::List(vec![]);
        let one = RlpItem::List(vec![zero.clone()]);
        let two = RlpItem::List(vec![zero.clone(), one.clone()]);
        assert_eq!(item, RlpItem::List(vec![zero, one, two]));
    }

    #[test]
    fn long_string() {
        let mut bytes = vec![0xb8, 56];
        bytes.extend_from_slice(&[0x11; 56]);
        assert_eq!(decode(&bytes).unwrap(), RlpItem::Bytes(vec![0x11; 56]));
    }

    #[test]
    fn roundtrip_mixed_structure() {
        let item = RlpItem::List(vec![
            RlpItem::from_u64(9),
            RlpItem::from_u64(20_000_000_000),
            RlpItem::Bytes(vec![0x35; 20]),
            RlpItem::Bytes(vec![0xab; 300]),
            RlpItem::List(vec![RlpItem::empty(), RlpItem::List(vec![])]),
        ]);
        assert_eq!(decode(&encode(&item)).unwrap(), item);
    }

    #[test]
    fn payload_matches_alloy_header() {
        let encoded = encode(&RlpItem::Bytes(vec![0xab; 300]));
        let mut buf = encoded.as_slice();
        let payload = Header::decode_bytes(&mut buf, false).unwrap();
        assert_eq!(decode(&encoded).unwrap(), RlpItem::Bytes(payload.to_vec()));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(decode(&[]).unwrap_err(), RlpError::EmptyInput);
        assert_eq!(decode_hex("0x").unwrap_err(), RlpError::EmptyInput);
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        assert_eq!(decode(&[0x80, 0x01]).unwrap_err(), RlpError::TrailingBytes(1));
    }

    #[test]
    fn decode_prefix_returns_rest() {
        let (item, rest) = decode_prefix(&[0x82, 0x01, 0x02, 0xc0]).unwrap();
        assert_eq!(item, RlpItem::Bytes(vec![0x01, 0x02]));
        assert_eq!(rest, &[0xc0]);
    }

    #[test]
    fn overrun_is_rejected() {
        assert_eq!(decode(&[0x83, 0x01]).unwrap_err(), RlpError::InputTooShort);
        assert_eq!(decode(&[0xc3, 0x80]).unwrap_err(), RlpError::InputTooShort);
        // Long-form length bytes cut off.
        assert_eq!(decode(&[0xb9, 0x01]).unwrap_err(), RlpError::InputTooShort);
    }

    #[test]
    fn child_cannot_escape_its_list() {
        // The list claims one byte of payload, but its child wants two.
        assert_eq!(
            decode(&[0xc1, 0x81, 0x90]).unwrap_err(),
            RlpError::InputTooShort
        );
    }

    #[test]
    fn non_canonical_single_byte_is_rejected() {
        assert_eq!(
            decode(&[0x81, 0x7f]).unwrap_err(),
            RlpError::NonCanonicalSingleByte
        );
    }

    #[test]
    fn long_form_for_short_length_is_rejected() {
        let mut bytes = vec![0xb8, 0x05];
        bytes.extend_from_slice(&[0x11; 5]);
        assert_eq!(decode(&bytes).unwrap_err(), RlpError::NonCanonicalSize);

        let mut bytes = vec![0xf8, 0x01];
        bytes.push(0x80);
        assert_eq!(decode(&bytes).unwrap_err(), RlpError::NonCanonicalSize);
    }

    #[test]
    fn length_with_leading_zero_is_rejected() {
        let mut bytes = vec![0xb9, 0x00, 0x40];
        bytes.extend_from_slice(&[0x11; 64]);
        assert_eq!(decode(&bytes).unwrap_err(), RlpError::LeadingZero);
    }

    #[test]
    fn oversized_length_is_rejected() {
        let mut bytes = vec![0xbf];
        bytes.extend_from_slice(&[0xff; 8]);
        // The declared length is far larger than the input.
        assert_eq!(decode(&bytes).unwrap_err(), RlpError::InputTooShort);
    }

    #[test]
    fn nesting_limit() {
        // Debug builds need more stack than the test harness default for
        // a thousand levels of recursion.
        let handle = std::thread::Builder::new()
            .stack_size(32 * 1024 * 1024)
            .spawn(|| {
                let mut item = RlpItem::List(vec![]);
                for _ in 0..MAX_DEPTH - 1 {
                    item = RlpItem::List(vec![item]);
                }
                let at_limit = encode(&item);
                assert!(decode(&at_limit).is_ok());

                let too_deep = encode(&RlpItem::List(vec![item]));
                assert_eq!(decode(&too_deep).unwrap_err(), RlpError::TooDeep(MAX_DEPTH));
            })
            .unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn invalid_hex_is_reported() {
        assert!(matches!(
            decode_hex("0x8").unwrap_err(),
            RlpError::Bytes(_)
        ));
    }
}
