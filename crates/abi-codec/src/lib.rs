//! # abi-codec
//!
//! Solidity contract ABI codec: parameter encoding and decoding with the
//! standard head/tail layout, packed encoding, type and signature parsing,
//! JSON ABI descriptors, selectors and revert decoding.
//!
//! ```
//! use abi_codec::{decode, encode, parse_parameters, AbiValue};
//!
//! let params = parse_parameters("string, uint256, bool").unwrap();
//! let values = vec![AbiValue::from("wagmi"), AbiValue::from(420u64), AbiValue::from(true)];
//! let data = encode(&params, &values).unwrap();
//! assert_eq!(decode(&params, &data).unwrap(), values);
//! ```

pub mod decode;
pub mod encode;
pub mod error;
pub mod human_readable;
pub mod item;
pub mod json;
pub mod packed;
pub mod types;
pub mod value;

pub use decode::{decode, decode_types};
pub use encode::{encode, encode_types};
pub use error::AbiError;
pub use human_readable::{parse_parameter, parse_parameters};
pub use item::{
    decode_revert, decode_revert_with, error_selector, event_topic, function_selector,
    panic_reason, AbiItem, ItemKind, Revert, StateMutability,
};
pub use json::{parse_json_abi, to_json_abi};
pub use packed::encode_packed;
pub use types::{parse_type, AbiParameter, AbiType};
pub use value::AbiValue;
