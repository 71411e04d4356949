use alloy_primitives::U256;
use codec_utils::hex::hex_from_bytes;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use tracing::debug;

use crate::decode::decode;
use crate::encode::encode;
use crate::error::AbiError;
use crate::human_readable::parse_item;
use crate::json::RawItem;
use crate::types::{AbiParameter, AbiType};
use crate::value::AbiValue;

/// Selector of the built-in `Error(string)` revert.
pub const ERROR_STRING_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];

/// Selector of the built-in `Panic(uint256)` revert.
pub const PANIC_SELECTOR: [u8; 4] = [0x4e, 0x48, 0x7b, 0x71];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Function,
    Event,
    Error,
    Constructor,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Function => "function",
            ItemKind::Event => "event",
            ItemKind::Error => "error",
            ItemKind::Constructor => "constructor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    Pure,
    View,
    NonPayable,
    Payable,
}

/// A function, event, error or constructor from a contract ABI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawItem", into = "RawItem")]
pub struct AbiItem {
    pub kind: ItemKind,
    /// Empty for constructors.
    pub name: String,
    pub inputs: Vec<AbiParameter>,
    pub outputs: Vec<AbiParameter>,
    pub state_mutability: Option<StateMutability>,
    /// Anonymous events have no topic 0.
    pub anonymous: bool,
}

impl AbiItem {
    /// Parses a human-readable signature such as
    /// `function transfer(address to, uint256 amount) returns (bool)`.
    pub fn parse(signature: &str) -> Result<Self, AbiError> {
        parse_item(signature)
    }

    /// Canonical signature: the name followed by the input types, without
    /// spaces or parameter names.
    pub fn signature(&self) -> String {
        let tuple = AbiType::Tuple(self.inputs.clone());
        format!("{}{tuple}", self.name)
    }

    /// First four bytes of the Keccak-256 hash of [`signature`](Self::signature).
    pub fn selector(&self) -> [u8; 4] {
        let hash = self.event_topic();
        [hash[0], hash[1], hash[2], hash[3]]
    }

    /// Full Keccak-256 hash of the signature, used as topic 0 of an event.
    pub fn event_topic(&self) -> [u8; 32] {
        Keccak256::digest(self.signature().as_bytes()).into()
    }

    /// Call data (or revert data, for an error): the selector followed by
    /// the encoded inputs. Constructors have no selector.
    pub fn encode_input(&self, values: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
        let encoded = encode(&self.inputs, values)?;
        match self.kind {
            ItemKind::Constructor => Ok(encoded),
            ItemKind::Function | ItemKind::Error => {
                let mut out = self.selector().to_vec();
                out.extend(encoded);
                Ok(out)
            }
            ItemKind::Event => Err(AbiError::InvalidSignature(format!(
                "event {} has no call data",
                self.name
            ))),
        }
    }

    /// Decodes data produced by [`encode_input`](Self::encode_input),
    /// checking the selector first.
    pub fn decode_input(&self, data: &[u8]) -> Result<Vec<AbiValue>, AbiError> {
        match self.kind {
            ItemKind::Constructor => decode(&self.inputs, data),
            ItemKind::Function | ItemKind::Error => {
                let body = self.strip_selector(data)?;
                decode(&self.inputs, body)
            }
            ItemKind::Event => Err(AbiError::InvalidSignature(format!(
                "event {} has no call data",
                self.name
            ))),
        }
    }

    pub fn encode_output(&self, values: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
        encode(&self.outputs, values)
    }

    pub fn decode_output(&self, data: &[u8]) -> Result<Vec<AbiValue>, AbiError> {
        decode(&self.outputs, data)
    }

    fn strip_selector<'a>(&self, data: &'a [u8]) -> Result<&'a [u8], AbiError> {
        if data.len() < 4 {
            return Err(AbiError::DataSizeTooSmall {
                size: data.len(),
                expected: 4,
            });
        }
        let selector = self.selector();
        if data[..4] != selector {
            debug!(item = %self.name, "selector mismatch");
            return Err(AbiError::SelectorMismatch {
                expected: hex_from_bytes(&selector),
                given: hex_from_bytes(&data[..4]),
            });
        }
        Ok(&data[4..])
    }
}

/// Selector of a function signature, e.g. `transfer(address,uint256)`.
pub fn function_selector(signature: &str) -> Result<[u8; 4], AbiError> {
    Ok(AbiItem::parse(signature)?.selector())
}

/// Selector of a custom error signature, e.g. `error BadSignatureV(uint8 v)`.
pub fn error_selector(signature: &str) -> Result<[u8; 4], AbiError> {
    Ok(AbiItem::parse(signature)?.selector())
}

/// Topic 0 of an event signature.
pub fn event_topic(signature: &str) -> Result<[u8; 32], AbiError> {
    Ok(AbiItem::parse(signature)?.event_topic())
}

/// Decoded contract revert data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revert {
    /// The call reverted without data.
    Empty,
    /// `Error(string)`, the output of `require(cond, "message")`.
    Error(String),
    /// `Panic(uint256)`, raised by the compiler for failed checks.
    Panic {
        code: U256,
        reason: Option<&'static str>,
    },
    /// A custom error that was found in the supplied ABI.
    Known { error: AbiItem, values: Vec<AbiValue> },
    /// A custom error with an unknown selector.
    Custom { selector: [u8; 4], data: Vec<u8> },
}

/// Decodes revert data, recognising `Error(string)` and `Panic(uint256)`.
pub fn decode_revert(data: &[u8]) -> Result<Revert, AbiError> {
    decode_revert_with(data, &[])
}

/// Like [`decode_revert`], but also matches custom errors declared in `abi`.
pub fn decode_revert_with(data: &[u8], abi: &[AbiItem]) -> Result<Revert, AbiError> {
    if data.is_empty() {
        return Ok(Revert::Empty);
    }
    if data.len() < 4 {
        return Err(AbiError::DataSizeTooSmall {
            size: data.len(),
            expected: 4,
        });
    }

    let mut selector = [0u8; 4];
    selector.copy_from_slice(&data[..4]);
    let body = &data[4..];

    if selector == ERROR_STRING_SELECTOR {
        let values = decode(&[AbiParameter::new(AbiType::String)], body)?;
        return match values.into_iter().next() {
            Some(AbiValue::String(message)) => Ok(Revert::Error(message)),
            _ => Err(AbiError::InvalidValue {
                expected: "string".into(),
                given: "nothing".into(),
            }),
        };
    }

    if selector == PANIC_SELECTOR {
        let values = decode(&[AbiParameter::new(AbiType::Uint(256))], body)?;
        return match values.into_iter().next() {
            Some(AbiValue::Uint(code)) => Ok(Revert::Panic {
                code,
                reason: panic_reason(code),
            }),
            _ => Err(AbiError::InvalidValue {
                expected: "uint256".into(),
                given: "nothing".into(),
            }),
        };
    }

    let known = abi
        .iter()
        .find(|item| item.kind == ItemKind::Error && item.selector() == selector);
    match known {
        Some(error) => Ok(Revert::Known {
            error: error.clone(),
            values: decode(&error.inputs, body)?,
        }),
        None => Ok(Revert::Custom {
            selector,
            data: body.to_vec(),
        }),
    }
}

/// Human-readable meaning of a Solidity panic code.
pub fn panic_reason(code: U256) -> Option<&'static str> {
    let code: u64 = code.try_into().ok()?;
    let reason = match code {
        0x01 => "an assert condition failed",
        0x11 => "arithmetic operation resulted in underflow or overflow",
        0x12 => "division or modulo by zero",
        0x21 => "attempted to convert to an invalid enum value",
        0x22 => "attempted to access an incorrectly encoded storage byte array",
        0x31 => "performed pop() on an empty array",
        0x32 => "array index is out of bounds",
        0x41 => "allocated too much memory or created an array which is too large",
        0x51 => "attempted to call a zero-initialized variable of internal function type",
        _ => return None,
    };
    Some(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use hex_literal::hex;

    #[test]
    fn erc20_selectors() {
        assert_eq!(
            function_selector("transfer(address,uint256)").unwrap(),
            hex!("a9059cbb")
        );
        assert_eq!(
            function_selector("function balanceOf(address owner) view returns (uint256)").unwrap(),
            hex!("70a08231")
        );
        assert_eq!(
            function_selector("function approve(address spender, uint256 amount)").unwrap(),
            hex!("095ea7b3")
        );
    }

    #[test]
    fn custom_error_selector() {
        assert_eq!(
            error_selector("error BadSignatureV(uint8 v)").unwrap(),
            hex!("6352211e")
        );
    }

    #[test]
    fn builtin_revert_selectors() {
        assert_eq!(error_selector("Error(string)").unwrap(), ERROR_STRING_SELECTOR);
        assert_eq!(error_selector("Panic(uint256)").unwrap(), PANIC_SELECTOR);
    }

    #[test]
    fn transfer_event_topic() {
        let topic = event_topic(
            "event Transfer(address indexed from, address indexed to, uint256 value)",
        )
        .unwrap();
        assert_eq!(
            topic,
            hex!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef")
        );
    }

    #[test]
    fn signature_is_canonical() {
        let item = AbiItem::parse("function foo(uint a, (bool x, string y)[] memory z)").unwrap();
        assert_eq!(item.signature(), "foo(uint256,(bool,string)[])");
    }

    #[test]
    fn encode_and_decode_input() {
        let transfer = AbiItem::parse("function transfer(address to, uint256 amount)").unwrap();
        let to = address!("000000000000000000000000000000000000dead");
        let values = vec![AbiValue::from(to), AbiValue::from(100u64)];

        let data = transfer.encode_input(&values).unwrap();
        assert_eq!(data.len(), 4 + 64);
        assert_eq!(&data[..4], &hex!("a9059cbb"));
        assert_eq!(transfer.decode_input(&data).unwrap(), values);
    }

    #[test]
    fn decode_input_checks_selector() {
        let transfer = AbiItem::parse("function transfer(address to, uint256 amount)").unwrap();
        let approve = AbiItem::parse("function approve(address spender, uint256 amount)").unwrap();
        let data = approve
            .encode_input(&[AbiValue::from(address!("000000000000000000000000000000000000dead")), 1u64.into()])
            .unwrap();

        assert_eq!(
            transfer.decode_input(&data).unwrap_err(),
            AbiError::SelectorMismatch {
                expected: "0xa9059cbb".into(),
                given: "0x095ea7b3".into()
            }
        );
        assert!(matches!(
            transfer.decode_input(&[0xa9]),
            Err(AbiError::DataSizeTooSmall { .. })
        ));
    }

    #[test]
    fn decode_output() {
        let item = AbiItem::parse("function balanceOf(address) returns (uint256)").unwrap();
        let data = item.encode_output(&[AbiValue::from(42u64)]).unwrap();
        assert_eq!(item.decode_output(&data).unwrap(), vec![AbiValue::from(42u64)]);
    }

    #[test]
    fn constructor_has_no_selector() {
        let ctor = AbiItem::parse("constructor(uint256 supply)").unwrap();
        let data = ctor.encode_input(&[AbiValue::from(7u64)]).unwrap();
        assert_eq!(data.len(), 32);
        assert_eq!(ctor.decode_input(&data).unwrap(), vec![AbiValue::from(7u64)]);
    }

    #[test]
    fn events_have_no_call_data() {
        let event = AbiItem::parse("event Ping()").unwrap();
        assert!(matches!(
            event.encode_input(&[]),
            Err(AbiError::InvalidSignature(_))
        ));
    }

    #[test]
    fn revert_with_error_string() {
        let error = AbiItem::parse("error Error(string)").unwrap();
        let data = error.encode_input(&["insufficient balance".into()]).unwrap();
        assert_eq!(
            decode_revert(&data).unwrap(),
            Revert::Error("insufficient balance".into())
        );
    }

    #[test]
    fn revert_with_panic() {
        let panic = AbiItem::parse("error Panic(uint256)").unwrap();
        let data = panic.encode_input(&[0x11u64.into()]).unwrap();
        assert_eq!(
            decode_revert(&data).unwrap(),
            Revert::Panic {
                code: U256::from(0x11u64),
                reason: Some("arithmetic operation resulted in underflow or overflow"),
            }
        );
        assert_eq!(panic_reason(U256::from(0x99u64)), None);
    }

    #[test]
    fn revert_with_custom_error() {
        let bad_v = AbiItem::parse("error BadSignatureV(uint8 v)").unwrap();
        let data = bad_v.encode_input(&[29u64.into()]).unwrap();

        match decode_revert(&data).unwrap() {
            Revert::Custom { selector, data } => {
                assert_eq!(selector, hex!("6352211e"));
                assert_eq!(data.len(), 32);
            }
            other => panic!("unexpected revert {other:?}"),
        }

        match decode_revert_with(&data, &[bad_v.clone()]).unwrap() {
            Revert::Known { error, values } => {
                assert_eq!(error, bad_v);
                assert_eq!(values, vec![AbiValue::from(29u64)]);
            }
            other => panic!("unexpected revert {other:?}"),
        }
    }

    #[test]
    fn empty_and_short_revert_data() {
        assert_eq!(decode_revert(&[]).unwrap(), Revert::Empty);
        assert!(matches!(
            decode_revert(&[0x08, 0xc3]),
            Err(AbiError::DataSizeTooSmall { .. })
        ));
    }
}
