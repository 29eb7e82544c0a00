//! Settings fingerprint
//!
//! Each quote records a SHA-256 hash of the admin settings it was priced
//! with, so a stored quote can be matched to the settings revision behind
//! it.

use super::engine::QuoteError;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Hex SHA-256 of the canonical JSON form of `value`
///
/// Object keys are sorted at every depth before hashing, so the digest does
/// not depend on field order or on serde_json's map implementation.
pub fn settings_fingerprint<T: Serialize>(value: &T) -> Result<String, QuoteError> {
    let value = serde_json::to_value(value)
        .map_err(|e| QuoteError::Serialization(format!("Settings serialization failed: {}", e)))?;

    let json = serde_json::to_string(&canonicalize(value))
        .map_err(|e| QuoteError::Serialization(format!("Settings serialization failed: {}", e)))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    let result = hasher.finalize();

    Ok(format!("{:x}", result))
}

/// Rebuild every object with sorted keys
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> =
                map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
            Value::Object(sorted.into_iter().collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}
