use alloy_rlp::{BufMut, Encodable, Header};
use codec_utils::hex::hex_from_bytes;

use crate::item::RlpItem;

impl Encodable for RlpItem {
    fn encode(&self, out: &mut dyn BufMut) {
        match self {
            RlpItem::Bytes(data) => data.as_slice().encode(out),
            RlpItem::List(items) => {
                let header = Header {
                    list: true,
                    payload_length: list_payload_length(items),
                };
                header.encode(out);
                for item in items {
                    item.encode(out);
                }
            }
        }
    }

    fn length(&self) -> usize {
        match self {
            RlpItem::Bytes(data) => data.as_slice().length(),
            RlpItem::List(items) => {
                let payload_length = list_payload_length(items);
                alloy_rlp::length_of_length(payload_length) + payload_length
            }
        }
    }
}

/// Sum of the encoded lengths of a list's children.
fn list_payload_length(items: &[RlpItem]) -> usize {
    items.iter().map(Encodable::length).sum()
}

/// Encodes an item to RLP bytes.
pub fn encode(item: &RlpItem) -> Vec<u8> {
    let mut out = Vec::with_capacity(item.length());
    item.encode(&mut out);
    out
}

/// Encodes an item to `0x`-prefixed RLP hex.
pub fn encode_hex(item: &RlpItem) -> String {
    hex_from_bytes(&encode(item))
}
