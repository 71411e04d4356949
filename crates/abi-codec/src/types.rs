use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AbiError;
use crate::human_readable::parse_parameters;
use crate::json::RawParameter;

/// Size of one ABI word.
pub const WORD: usize = 32;

/// A Solidity ABI type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AbiType {
    /// `uintN`, `N` in 8..=256 and a multiple of 8.
    Uint(usize),
    /// `intN`, `N` in 8..=256 and a multiple of 8.
    Int(usize),
    Address,
    Bool,
    /// `bytesN`, `N` in 1..=32.
    FixedBytes(usize),
    Bytes,
    String,
    /// `T[k]`
    FixedArray(Box<AbiType>, usize),
    /// `T[]`
    Array(Box<AbiType>),
    Tuple(Vec<AbiParameter>),
}

/// A typed, optionally named slot in a parameter list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawParameter", into = "RawParameter")]
pub struct AbiParameter {
    pub name: Option<String>,
    pub kind: AbiType,
    /// Only meaningful for event inputs.
    pub indexed: bool,
}

impl AbiParameter {
    /// An unnamed, non-indexed parameter.
    pub fn new(kind: AbiType) -> Self {
        Self {
            name: None,
            kind,
            indexed: false,
        }
    }

    pub fn named(name: impl Into<String>, kind: AbiType) -> Self {
        Self {
            name: Some(name.into()),
            kind,
            indexed: false,
        }
    }
}

impl AbiType {
    /// Whether the encoding of this type lives in the tail rather than
    /// inline in the head.
    pub fn is_dynamic(&self) -> bool {
        match self {
            AbiType::Bytes | AbiType::String | AbiType::Array(_) => true,
            AbiType::FixedArray(inner, _) => inner.is_dynamic(),
            AbiType::Tuple(components) => components.iter().any(|p| p.kind.is_dynamic()),
            _ => false,
        }
    }

    /// Bytes this type occupies in the head of an enclosing encoding: one
    /// word for dynamic types, the full inline encoding for static ones.
    pub fn head_size(&self) -> usize {
        if self.is_dynamic() {
            return WORD;
        }
        match self {
            AbiType::FixedArray(inner, len) => inner.head_size().saturating_mul(*len),
            AbiType::Tuple(components) => components
                .iter()
                .fold(0usize, |acc, p| acc.saturating_add(p.kind.head_size())),
            _ => WORD,
        }
    }

    /// Type string as used in JSON ABI descriptors, where every tuple is
    /// spelled `tuple` and its members go in `components`.
    pub(crate) fn json_type(&self) -> String {
        match self {
            AbiType::Tuple(_) => "tuple".to_string(),
            AbiType::FixedArray(inner, len) => format!("{}[{len}]", inner.json_type()),
            AbiType::Array(inner) => format!("{}[]", inner.json_type()),
            other => other.to_string(),
        }
    }

    /// Members of the innermost tuple, looking through array suffixes.
    pub(crate) fn tuple_components(&self) -> Option<&[AbiParameter]> {
        match self {
            AbiType::Tuple(components) => Some(components),
            AbiType::FixedArray(inner, _) | AbiType::Array(inner) => inner.tuple_components(),
            _ => None,
        }
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiType::Uint(bits) => write!(f, "uint{bits}"),
            AbiType::Int(bits) => write!(f, "int{bits}"),
            AbiType::Address => f.write_str("address"),
            AbiType::Bool => f.write_str("bool"),
            AbiType::FixedBytes(size) => write!(f, "bytes{size}"),
            AbiType::Bytes => f.write_str("bytes"),
            AbiType::String => f.write_str("string"),
            AbiType::FixedArray(inner, len) => write!(f, "{inner}[{len}]"),
            AbiType::Array(inner) => write!(f, "{inner}[]"),
            AbiType::Tuple(components) => {
                f.write_str("(")?;
                for (i, param) in components.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", param.kind)?;
                }
                f.write_str(")")
            }
        }
    }
}

impl FromStr for AbiType {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_type(s)
    }
}

/// Parses a type string such as `uint256`, `bytes32[]` or
/// `(address,uint256)[2]`.
///
/// `uint` and `int` are aliases for their 256-bit forms, and tuples may be
/// written `(..)` or `tuple(..)` with named members.
pub fn parse_type(s: &str) -> Result<AbiType, AbiError> {
    let s = s.trim();

    if let Some(body) = s.strip_suffix(']') {
        let open = body
            .rfind('[')
            .ok_or_else(|| AbiError::InvalidType(s.to_string()))?;
        let inner = parse_type(&body[..open])?;
        let size = &body[open + 1..];
        if size.is_empty() {
            return Ok(AbiType::Array(Box::new(inner)));
        }
        let len = size
            .parse::<usize>()
            .ok()
            .filter(|&len| len > 0)
            .ok_or_else(|| AbiError::InvalidType(s.to_string()))?;
        return Ok(AbiType::FixedArray(Box::new(inner), len));
    }

    let tuple_body = s
        .strip_prefix("tuple")
        .unwrap_or(s)
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'));
    if let Some(body) = tuple_body {
        let components = parse_parameters(body)
            .map_err(|_| AbiError::InvalidType(s.to_string()))?;
        // Solidity has no empty structs.
        if components.is_empty() {
            return Err(AbiError::InvalidType(s.to_string()));
        }
        return Ok(AbiType::Tuple(components));
    }

    match s {
        "address" => return Ok(AbiType::Address),
        "bool" => return Ok(AbiType::Bool),
        "string" => return Ok(AbiType::String),
        "bytes" => return Ok(AbiType::Bytes),
        "uint" => return Ok(AbiType::Uint(256)),
        "int" => return Ok(AbiType::Int(256)),
        _ => {}
    }

    if let Some(size) = s.strip_prefix("bytes") {
        return match parse_width(size) {
            Some(n) if (1..=32).contains(&n) => Ok(AbiType::FixedBytes(n)),
            _ => Err(AbiError::InvalidType(s.to_string())),
        };
    }
    if let Some(bits) = s.strip_prefix("uint") {
        return integer_bits(bits)
            .map(AbiType::Uint)
            .ok_or_else(|| AbiError::InvalidType(s.to_string()));
    }
    if let Some(bits) = s.strip_prefix("int") {
        return integer_bits(bits)
            .map(AbiType::Int)
            .ok_or_else(|| AbiError::InvalidType(s.to_string()));
    }

    Err(AbiError::InvalidType(s.to_string()))
}

/// Parses decimal digits without a sign or leading zero.
fn parse_width(digits: &str) -> Option<usize> {
    if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn integer_bits(digits: &str) -> Option<usize> {
    parse_width(digits).filter(|&bits| bits % 8 == 0 && (8..=256).contains(&bits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_elementary_types() {
        assert_eq!(parse_type("uint256").unwrap(), AbiType::Uint(256));
        assert_eq!(parse_type("uint").unwrap(), AbiType::Uint(256));
        assert_eq!(parse_type("int8").unwrap(), AbiType::Int(8));
        assert_eq!(parse_type("int").unwrap(), AbiType::Int(256));
        assert_eq!(parse_type("address").unwrap(), AbiType::Address);
        assert_eq!(parse_type("bool").unwrap(), AbiType::Bool);
        assert_eq!(parse_type("bytes").unwrap(), AbiType::Bytes);
        assert_eq!(parse_type("bytes32").unwrap(), AbiType::FixedBytes(32));
        assert_eq!(parse_type("string").unwrap(), AbiType::String);
    }

    #[test]
    fn rejects_bad_widths() {
        for ty in ["uint7", "uint264", "uint0", "uint08", "bytes0", "bytes33", "int-8", "foo"] {
            assert!(
                matches!(parse_type(ty), Err(AbiError::InvalidType(_))),
                "{ty} should be rejected"
            );
        }
    }

    #[test]
    fn parses_array_suffixes() {
        assert_eq!(
            parse_type("uint8[]").unwrap(),
            AbiType::Array(Box::new(AbiType::Uint(8)))
        );
        assert_eq!(
            parse_type("bool[2][]").unwrap(),
            AbiType::Array(Box::new(AbiType::FixedArray(Box::new(AbiType::Bool), 2)))
        );
        assert!(parse_type("bool[0]").is_err());
        assert!(parse_type("bool[x]").is_err());
        assert!(parse_type("bool]").is_err());
    }

    #[test]
    fn parses_tuples() {
        let ty = parse_type("(address,uint256)[]").unwrap();
        assert_eq!(ty.to_string(), "(address,uint256)[]");

        let named = parse_type("tuple(address to, uint amount)").unwrap();
        let components = named.tuple_components().unwrap();
        assert_eq!(components[0].name.as_deref(), Some("to"));
        assert_eq!(components[1].kind, AbiType::Uint(256));
        assert_eq!(named.to_string(), "(address,uint256)");

        assert!(parse_type("(uint256,)").is_err());
    }

    #[test]
    fn rejects_empty_tuples() {
        for ty in ["()", "tuple()", "()[]", "()[][]", "(uint256,())"] {
            assert!(
                matches!(parse_type(ty), Err(AbiError::InvalidType(_))),
                "{ty} should be rejected"
            );
        }
    }

    #[test]
    fn from_str_matches_parse_type() {
        let ty: AbiType = "string[3]".parse().unwrap();
        assert_eq!(ty, AbiType::FixedArray(Box::new(AbiType::String), 3));
    }

    #[test]
    fn dynamic_classification() {
        assert!(!parse_type("uint256[3]").unwrap().is_dynamic());
        assert!(parse_type("string[3]").unwrap().is_dynamic());
        assert!(parse_type("uint256[]").unwrap().is_dynamic());
        assert!(!parse_type("(address,bool)").unwrap().is_dynamic());
        assert!(parse_type("(address,bytes)").unwrap().is_dynamic());
    }

    #[test]
    fn head_sizes() {
        assert_eq!(parse_type("uint256").unwrap().head_size(), 32);
        assert_eq!(parse_type("uint256[3]").unwrap().head_size(), 96);
        assert_eq!(parse_type("(bool,uint8[2])").unwrap().head_size(), 96);
        assert_eq!(parse_type("string[3]").unwrap().head_size(), 32);
    }

    #[test]
    fn json_type_spells_tuples() {
        let ty = parse_type("(uint256,bool)[2][]").unwrap();
        assert_eq!(ty.json_type(), "tuple[2][]");
        assert_eq!(ty.tuple_components().unwrap().len(), 2);
    }
}
