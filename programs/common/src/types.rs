//! Account identifiers

pub use pinocchio::pubkey::Pubkey;

/// The null identifier
pub const ZERO_KEY: Pubkey = [0u8; 32];

/// True for the null identifier
pub fn is_zero(key: &Pubkey) -> bool {
    key == &ZERO_KEY
}

/// Deterministic identifier from a short label (truncated to 32 bytes)
///
/// Used by the local host and tests to name contracts and users.
pub fn label_key(label: &str) -> Pubkey {
    let mut key = ZERO_KEY;
    for (dst, src) in key.iter_mut().zip(label.as_bytes()) {
        *dst = *src;
    }
    key
}

/// Base58 rendering for logs
pub fn fmt_key(key: &Pubkey) -> String {
    bs58::encode(key).into_string()
}

/// Parse a base58 identifier, None unless it decodes to exactly 32 bytes
pub fn parse_key(text: &str) -> Option<Pubkey> {
    let bytes = bs58::decode(text).into_vec().ok()?;
    <Pubkey>::try_from(bytes.as_slice()).ok()
}

/// Serde adapter rendering identifiers as base58 strings
pub mod serde_key {
    use super::*;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(key: &Pubkey, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&fmt_key(key))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Pubkey, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_key(&text).ok_or_else(|| D::Error::custom(format!("invalid base58 key: {}", text)))
    }
}
