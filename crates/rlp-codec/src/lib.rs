//! Recursive-Length-Prefix codec.
//!
//! Encoding rules:
//! - Single byte [0x00, 0x7f]: itself
//! - String [0x80, 0xb7]: 0x80 + len, then data
//! - String [0xb8, 0xbf]: 0xb7 + len_of_len, then len, then data
//! - List [0xc0, 0xf7]: 0xc0 + len, then items
//! - List [0xf8, 0xff]: 0xf7 + len_of_len, then len, then items
//!
//! The decoder rejects every non-canonical form, so `encode(decode(b)) == b`
//! for any accepted input `b`.

pub mod decode;
pub mod encode;
pub mod error;
pub mod item;

pub use decode::{decode, decode_hex, decode_prefix, MAX_DEPTH};
pub use encode::{encode, encode_hex};
pub use error::RlpError;
pub use item::RlpItem;
