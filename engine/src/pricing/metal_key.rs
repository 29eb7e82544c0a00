//! Metal key resolution
//!
//! Normalizes a free-text (metal type, karat) pair into a [`MetalKey`] and
//! renders the candidate serializations that variant lookup tries, in
//! order. Resolution is best-effort: unknown metals pass through as typed,
//! and nothing here ever errors.

use crate::models::metal::{MetalKey, MetalType};
use serde::{Deserialize, Serialize};

/// Serialization strategy for a metal key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyFormat {
    /// `"Yellow Gold 14K"`
    SpaceForm,
    /// `"yellow_gold_14k"`
    UnderscoreForm,
}

/// Key formats in the order variant lookup tries them
pub const KEY_FORMATS: [KeyFormat; 2] = [KeyFormat::SpaceForm, KeyFormat::UnderscoreForm];

impl KeyFormat {
    /// Render a key in this format
    pub fn render(&self, key: &MetalKey) -> String {
        match self {
            KeyFormat::SpaceForm => key.space_form(),
            KeyFormat::UnderscoreForm => key.underscore_form(),
        }
    }
}

/// Resolve a (metal type, karat) pair into a canonical key
///
/// Returns `None` when either input is empty, which callers treat as
/// "use the universal price".
///
/// # Example
/// ```
/// use repair_pricing_core_rs::pricing::metal_key::resolve;
///
/// let key = resolve("yellow-gold", "14k").unwrap();
/// assert_eq!(key.space_form(), "Yellow Gold 14K");
/// assert_eq!(key.underscore_form(), "yellow_gold_14k");
///
/// assert!(resolve("", "14k").is_none());
/// ```
pub fn resolve(metal_type: &str, karat: &str) -> Option<MetalKey> {
    let metal_type = metal_type.trim();
    if metal_type.is_empty() || karat.trim().is_empty() {
        return None;
    }

    let karat = normalize_karat(karat);
    if karat.is_empty() {
        return None;
    }

    let key = match MetalType::from_alias(metal_type) {
        Some(canonical) => MetalKey::new(canonical.display_name(), karat, Some(canonical)),
        None => MetalKey::new(metal_type, karat, None),
    };
    Some(key)
}

/// Keep only digits and the letter K, upper-cased
///
/// `"14k"` -> `"14K"`, `"925 sterling"` -> `"925"`, `"18-K"` -> `"18K"`
pub fn normalize_karat(karat: &str) -> String {
    karat
        .chars()
        .filter(|c| c.is_ascii_digit() || c.eq_ignore_ascii_case(&'k'))
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Candidate serializations of a key, in lookup order
pub fn candidates(key: &MetalKey) -> Vec<(KeyFormat, String)> {
    KEY_FORMATS
        .iter()
        .map(|format| (*format, format.render(key)))
        .collect()
}
