//! JSON ABI descriptors, as emitted by `solc --abi`.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::AbiError;
use crate::item::{AbiItem, ItemKind, StateMutability};
use crate::types::{parse_type, AbiParameter, AbiType};

/// Wire form of a parameter. Tuples are spelled `tuple` (plus any array
/// suffix) with their members in `components`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RawParameter {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    components: Vec<RawParameter>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    indexed: bool,
}

impl TryFrom<RawParameter> for AbiParameter {
    type Error = AbiError;

    fn try_from(raw: RawParameter) -> Result<Self, Self::Error> {
        let kind = match raw.kind.strip_prefix("tuple") {
            Some(suffix) => {
                let components = raw
                    .components
                    .into_iter()
                    .map(AbiParameter::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                if components.is_empty() {
                    return Err(AbiError::InvalidType(raw.kind));
                }
                apply_array_suffix(AbiType::Tuple(components), suffix, &raw.kind)?
            }
            None => parse_type(&raw.kind)?,
        };

        Ok(AbiParameter {
            name: (!raw.name.is_empty()).then_some(raw.name),
            kind,
            indexed: raw.indexed,
        })
    }
}

impl From<AbiParameter> for RawParameter {
    fn from(param: AbiParameter) -> Self {
        let components = param
            .kind
            .tuple_components()
            .map(|members| members.iter().cloned().map(RawParameter::from).collect())
            .unwrap_or_default();

        RawParameter {
            kind: param.kind.json_type(),
            name: param.name.unwrap_or_default(),
            components,
            indexed: param.indexed,
        }
    }
}

/// Wraps `base` in the array dimensions spelled by `suffix`, e.g. `[2][]`.
fn apply_array_suffix(base: AbiType, suffix: &str, full: &str) -> Result<AbiType, AbiError> {
    let invalid = || AbiError::InvalidType(full.to_string());

    let mut kind = base;
    let mut rest = suffix;
    while !rest.is_empty() {
        let body = rest.strip_prefix('[').ok_or_else(invalid)?;
        let close = body.find(']').ok_or_else(invalid)?;
        let size = &body[..close];
        kind = if size.is_empty() {
            AbiType::Array(Box::new(kind))
        } else {
            let len = size
                .parse::<usize>()
                .ok()
                .filter(|&len| len > 0)
                .ok_or_else(invalid)?;
            AbiType::FixedArray(Box::new(kind), len)
        };
        rest = &body[close + 1..];
    }
    Ok(kind)
}

fn default_item_type() -> String {
    "function".to_string()
}

/// Wire form of an ABI item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawItem {
    #[serde(rename = "type", default = "default_item_type")]
    kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    name: String,
    #[serde(default)]
    inputs: Vec<AbiParameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    outputs: Vec<AbiParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    state_mutability: Option<StateMutability>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    anonymous: bool,
}

impl TryFrom<RawItem> for AbiItem {
    type Error = AbiError;

    fn try_from(raw: RawItem) -> Result<Self, Self::Error> {
        let kind = match raw.kind.as_str() {
            "function" => ItemKind::Function,
            "event" => ItemKind::Event,
            "error" => ItemKind::Error,
            "constructor" => ItemKind::Constructor,
            other => return Err(AbiError::Json(format!("unsupported item type {other:?}"))),
        };

        Ok(AbiItem {
            kind,
            name: raw.name,
            inputs: raw.inputs,
            outputs: raw.outputs,
            state_mutability: raw.state_mutability,
            anonymous: raw.anonymous,
        })
    }
}

impl From<AbiItem> for RawItem {
    fn from(item: AbiItem) -> Self {
        RawItem {
            kind: item.kind.as_str().to_string(),
            name: item.name,
            inputs: item.inputs,
            outputs: item.outputs,
            state_mutability: item.state_mutability,
            anonymous: item.anonymous,
        }
    }
}

/// Parses a JSON ABI array.
///
/// `fallback` and `receive` entries are skipped: they take no parameters
/// and have no selector.
pub fn parse_json_abi(json: &str) -> Result<Vec<AbiItem>, AbiError> {
    let raw: Vec<RawItem> = serde_json::from_str(json)?;
    raw.into_iter()
        .filter(|item| {
            let skip = matches!(item.kind.as_str(), "fallback" | "receive");
            if skip {
                trace!(kind = %item.kind, "skipping abi entry");
            }
            !skip
        })
        .map(AbiItem::try_from)
        .collect()
}

/// Serializes items back to a JSON ABI array.
pub fn to_json_abi(items: &[AbiItem]) -> Result<String, AbiError> {
    Ok(serde_json::to_string(items)?)
}
