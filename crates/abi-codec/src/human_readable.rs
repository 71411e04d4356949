//! Parser for human-readable Solidity signatures, e.g.
//! `function transfer(address to, uint256 amount) returns (bool)`.

use crate::error::AbiError;
use crate::item::{AbiItem, ItemKind, StateMutability};
use crate::types::{parse_type, AbiParameter};

/// Data-location and address modifiers that carry no ABI meaning.
const IGNORED_MODIFIERS: [&str; 4] = ["memory", "calldata", "storage", "payable"];

/// Parses a comma-separated parameter list such as
/// `string, uint256 amount, (address,bool)[] pairs`.
pub fn parse_parameters(s: &str) -> Result<Vec<AbiParameter>, AbiError> {
    split_top_level(s)?
        .into_iter()
        .map(parse_parameter)
        .collect()
}

/// Parses one parameter: a type, then optional modifiers and a name.
pub fn parse_parameter(s: &str) -> Result<AbiParameter, AbiError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(AbiError::InvalidSignature("empty parameter".into()));
    }

    // The type ends at the first whitespace outside parentheses.
    let mut depth = 0usize;
    let mut end = s.len();
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                end = i;
                break;
            }
            _ => {}
        }
    }

    let mut param = AbiParameter::new(parse_type(&s[..end])?);
    for token in s[end..].split_whitespace() {
        if token == "indexed" {
            param.indexed = true;
        } else if IGNORED_MODIFIERS.contains(&token) {
            continue;
        } else if param.name.is_none() && is_identifier(token) {
            param.name = Some(token.to_string());
        } else {
            return Err(AbiError::InvalidSignature(format!(
                "unexpected {token:?} in parameter {s:?}"
            )));
        }
    }

    Ok(param)
}

/// Parses a full item signature. Without a leading keyword the item is
/// taken to be a function.
pub(crate) fn parse_item(signature: &str) -> Result<AbiItem, AbiError> {
    let signature = signature.trim();
    let (kind, rest) = split_keyword(signature);

    let open = rest
        .find('(')
        .ok_or_else(|| invalid(signature, "missing parameter list"))?;
    let name = rest[..open].trim();
    match kind {
        ItemKind::Constructor if !name.is_empty() => {
            return Err(invalid(signature, "constructors have no name"));
        }
        ItemKind::Constructor => {}
        _ if !is_identifier(name) => return Err(invalid(signature, "invalid name")),
        _ => {}
    }

    let close = matching_paren(rest, open).ok_or_else(|| invalid(signature, "unbalanced parentheses"))?;
    let mut item = AbiItem {
        kind,
        name: name.to_string(),
        inputs: parse_parameters(&rest[open + 1..close])?,
        outputs: Vec::new(),
        state_mutability: None,
        anonymous: false,
    };

    let mut tail = &rest[close + 1..];
    loop {
        tail = tail.trim_start();
        if tail.is_empty() {
            break;
        }

        if let Some(after) = tail.strip_prefix("returns") {
            let after = after.trim_start();
            if kind != ItemKind::Function || !after.starts_with('(') {
                return Err(invalid(signature, "misplaced returns clause"));
            }
            let close = matching_paren(after, 0).ok_or_else(|| invalid(signature, "unbalanced parentheses"))?;
            item.outputs = parse_parameters(&after[1..close])?;
            tail = &after[close + 1..];
            continue;
        }

        let word_end = tail.find(char::is_whitespace).unwrap_or(tail.len());
        let word = &tail[..word_end];
        match word {
            "pure" => item.state_mutability = Some(StateMutability::Pure),
            "view" => item.state_mutability = Some(StateMutability::View),
            "payable" => item.state_mutability = Some(StateMutability::Payable),
            "nonpayable" => item.state_mutability = Some(StateMutability::NonPayable),
            "anonymous" if kind == ItemKind::Event => item.anonymous = true,
            "external" | "public" | "internal" | "private" | "virtual" | "override" => {}
            _ => return Err(invalid(signature, &format!("unexpected {word:?}"))),
        }
        tail = &tail[word_end..];
    }

    Ok(item)
}

fn split_keyword(signature: &str) -> (ItemKind, &str) {
    let keywords = [
        ("function", ItemKind::Function),
        ("event", ItemKind::Event),
        ("error", ItemKind::Error),
        ("constructor", ItemKind::Constructor),
    ];
    for (keyword, kind) in keywords {
        if let Some(rest) = signature.strip_prefix(keyword) {
            // `constructor(` needs no separating space; the others do.
            let opens_list = kind == ItemKind::Constructor && rest.starts_with('(');
            if opens_list || rest.starts_with(char::is_whitespace) {
                return (kind, rest.trim_start());
            }
        }
    }
    (ItemKind::Function, signature)
}

/// Splits on commas that are not nested inside parentheses.
fn split_top_level(s: &str) -> Result<Vec<&str>, AbiError> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| invalid(s, "unbalanced parentheses"))?;
            }
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(invalid(s, "unbalanced parentheses"));
    }
    parts.push(&s[start..]);

    if parts.iter().any(|part| part.trim().is_empty()) {
        return Err(invalid(s, "empty parameter"));
    }
    Ok(parts)
}

/// Index of the `)` closing the `(` at `open`.
fn matching_paren(s: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn invalid(signature: &str, reason: &str) -> AbiError {
    AbiError::InvalidSignature(format!("{reason} in {signature:?}"))
}
