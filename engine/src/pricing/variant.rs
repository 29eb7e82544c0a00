//! Variant price lookup
//!
//! Extracts an item's base price for a metal key. First match wins:
//!
//! 1. `universal_price`, if set
//! 2. variant entry under the space-form key
//! 3. variant entry under the underscore-form key
//! 4. zero (unresolved; no fabricated fallback)
//!
//! Within a variant entry `retail_base` is preferred over `base_cost`. An
//! entry carrying neither field does not match and the next key is tried.

use super::metal_key::{candidates, KeyFormat};
use crate::core::money::non_negative;
use crate::models::breakdown::PriceSource;
use crate::models::item::PricedItem;
use crate::models::metal::MetalKey;
use rust_decimal::Decimal;

/// Raw lookup result, before any clamping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantResolution {
    pub price: Decimal,
    pub source: PriceSource,
}

impl VariantResolution {
    fn unresolved() -> Self {
        Self {
            price: Decimal::ZERO,
            source: PriceSource::Unresolved,
        }
    }
}

/// Resolve an item's base price and report where it came from
///
/// The returned price is the stored value as-is; callers that must reject
/// bad catalog data (the aggregator) check the sign themselves.
pub fn resolve_variant(item: &PricedItem, metal_key: Option<&MetalKey>) -> VariantResolution {
    if let Some(price) = item.universal_price {
        return VariantResolution {
            price,
            source: PriceSource::Universal,
        };
    }

    let Some(key) = metal_key else {
        return VariantResolution::unresolved();
    };

    for (format, rendered) in candidates(key) {
        let Some(price) = item.variant_prices.get(&rendered).and_then(|v| v.value()) else {
            continue;
        };
        let source = match format {
            KeyFormat::SpaceForm => PriceSource::SpaceFormVariant,
            KeyFormat::UnderscoreForm => PriceSource::UnderscoreFormVariant,
        };
        return VariantResolution { price, source };
    }

    VariantResolution::unresolved()
}

/// Base price of an item for a metal key, never negative
///
/// # Example
/// ```
/// use repair_pricing_core_rs::{lookup_base_price, resolve, ItemKind, PricedItem, VariantPrice};
/// use rust_decimal_macros::dec;
///
/// let task = PricedItem::new("t1", "Prong retip", ItemKind::Task)
///     .with_variant_price("Sterling Silver 925", VariantPrice::retail(dec!(24.55)));
///
/// let key = resolve("silver", "925");
/// assert_eq!(lookup_base_price(&task, key.as_ref()), dec!(24.55));
///
/// let key = resolve("platinum", "950");
/// assert_eq!(lookup_base_price(&task, key.as_ref()), dec!(0));
/// ```
pub fn lookup_base_price(item: &PricedItem, metal_key: Option<&MetalKey>) -> Decimal {
    let resolution = resolve_variant(item, metal_key);
    if resolution.price < Decimal::ZERO {
        tracing::warn!(
            item_id = %item.id,
            price = %resolution.price,
            "negative catalog price treated as unresolved"
        );
    }
    non_negative(resolution.price)
}
