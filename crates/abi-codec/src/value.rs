use alloy_primitives::{Address, I256, U256};

use crate::error::AbiError;

/// A runtime value matching some [`AbiType`](crate::AbiType).
///
/// Fixed and dynamic arrays both use [`AbiValue::Array`]; the type decides
/// how it is laid out.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AbiValue {
    Uint(U256),
    Int(I256),
    Address(Address),
    Bool(bool),
    FixedBytes(Vec<u8>),
    Bytes(Vec<u8>),
    String(String),
    Array(Vec<AbiValue>),
    Tuple(Vec<AbiValue>),
}

impl AbiValue {
    /// Parses an unsigned integer from decimal or `0x` hex text.
    ///
    /// Text that is well formed but exceeds 256 bits fails with
    /// [`AbiError::IntegerOverflow`].
    pub fn parse_uint(text: &str) -> Result<Self, AbiError> {
        let digits_ok = match text.strip_prefix("0x") {
            Some(hex) => !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()),
            None => !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()),
        };
        if !digits_ok {
            return Err(AbiError::InvalidValue {
                expected: "unsigned integer".into(),
                given: format!("{text:?}"),
            });
        }

        text.parse::<U256>()
            .map(AbiValue::Uint)
            .map_err(|_| AbiError::IntegerOverflow {
                value: text.to_string(),
                kind: "uint256".into(),
            })
    }

    /// Parses a signed decimal integer, e.g. `-42`.
    pub fn parse_int(text: &str) -> Result<Self, AbiError> {
        let digits = text.strip_prefix('-').unwrap_or(text);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AbiError::InvalidValue {
                expected: "signed integer".into(),
                given: format!("{text:?}"),
            });
        }

        I256::from_dec_str(text)
            .map(AbiValue::Int)
            .map_err(|_| AbiError::IntegerOverflow {
                value: text.to_string(),
                kind: "int256".into(),
            })
    }

    /// Short name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            AbiValue::Uint(_) => "uint",
            AbiValue::Int(_) => "int",
            AbiValue::Address(_) => "address",
            AbiValue::Bool(_) => "bool",
            AbiValue::FixedBytes(_) => "fixed bytes",
            AbiValue::Bytes(_) => "bytes",
            AbiValue::String(_) => "string",
            AbiValue::Array(_) => "array",
            AbiValue::Tuple(_) => "tuple",
        }
    }

    pub fn as_uint(&self) -> Option<U256> {
        match self {
            AbiValue::Uint(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<I256> {
        match self {
            AbiValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            AbiValue::Address(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AbiValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Content of either bytes variant.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            AbiValue::FixedBytes(value) | AbiValue::Bytes(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AbiValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// Elements of an array or members of a tuple.
    pub fn as_slice(&self) -> Option<&[AbiValue]> {
        match self {
            AbiValue::Array(values) | AbiValue::Tuple(values) => Some(values),
            _ => None,
        }
    }
}

impl From<U256> for AbiValue {
    fn from(value: U256) -> Self {
        AbiValue::Uint(value)
    }
}

impl From<u64> for AbiValue {
    fn from(value: u64) -> Self {
        AbiValue::Uint(U256::from(value))
    }
}

impl From<I256> for AbiValue {
    fn from(value: I256) -> Self {
        AbiValue::Int(value)
    }
}

impl From<Address> for AbiValue {
    fn from(value: Address) -> Self {
        AbiValue::Address(value)
    }
}

impl From<bool> for AbiValue {
    fn from(value: bool) -> Self {
        AbiValue::Bool(value)
    }
}

impl From<&str> for AbiValue {
    fn from(value: &str) -> Self {
        AbiValue::String(value.to_string())
    }
}

impl From<String> for AbiValue {
    fn from(value: String) -> Self {
        AbiValue::String(value)
    }
}
