use alloy_primitives::U256;

/// A decoded or to-be-encoded RLP item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RlpItem {
    /// A byte string (may be empty).
    Bytes(Vec<u8>),
    /// An ordered list of items.
    List(Vec<RlpItem>),
}

impl RlpItem {
    /// The empty byte string, which is also how RLP encodes integer zero.
    pub fn empty() -> Self {
        Self::Bytes(Vec::new())
    }

    /// Encodes an integer as its minimal big-endian bytes.
    pub fn from_u64(value: u64) -> Self {
        Self::from_be_bytes(&value.to_be_bytes())
    }

    /// Encodes a 256-bit integer as its minimal big-endian bytes.
    pub fn from_u256(value: U256) -> Self {
        Self::from_be_bytes(&value.to_be_bytes::<32>())
    }

    fn from_be_bytes(bytes: &[u8]) -> Self {
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        Self::Bytes(bytes[start..].to_vec())
    }

    #[inline]
    pub fn is_bytes(&self) -> bool {
        matches!(self, RlpItem::Bytes(_))
    }

    #[inline]
    pub fn is_list(&self) -> bool {
        matches!(self, RlpItem::List(_))
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            RlpItem::Bytes(data) => Some(data),
            RlpItem::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[RlpItem]> {
        match self {
            RlpItem::List(items) => Some(items),
            RlpItem::Bytes(_) => None,
        }
    }

    /// Interprets a byte string as a canonical big-endian `u64`.
    ///
    /// Returns `None` for lists, values wider than 8 bytes and encodings
    /// with leading zeros.
    pub fn as_u64(&self) -> Option<u64> {
        let data = self.canonical_integer_bytes(8)?;
        Some(data.iter().fold(0u64, |acc, &b| acc << 8 | b as u64))
    }

    /// Interprets a byte string as a canonical big-endian 256-bit integer.
    pub fn as_u256(&self) -> Option<U256> {
        let data = self.canonical_integer_bytes(32)?;
        Some(U256::from_be_slice(data))
    }

    fn canonical_integer_bytes(&self, max_len: usize) -> Option<&[u8]> {
        let data = self.as_bytes()?;
        if data.len() > max_len || data.first() == Some(&0) {
            return None;
        }
        Some(data)
    }
}

impl From<Vec<u8>> for RlpItem {
    fn from(data: Vec<u8>) -> Self {
        Self::Bytes(data)
    }
}

impl From<&[u8]> for RlpItem {
    fn from(data: &[u8]) -> Self {
        Self::Bytes(data.to_vec())
    }
}

impl From<Vec<RlpItem>> for RlpItem {
    fn from(items: Vec<RlpItem>) -> Self {
        Self::List(items)
    }
}
