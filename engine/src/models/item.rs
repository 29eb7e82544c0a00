//! Priced item model
//!
//! A line entry on a repair ticket: a task, process, material, or custom
//! line. Each item carries either a flat universal price or a map of
//! per-variant prices keyed by metal key (space or underscore form).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Kind of priced item
///
/// Materials take the material markup before the business multiplier;
/// everything else goes straight through the business multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Task,
    Process,
    Material,
    Custom,
}

/// Price of an item at one metal variant
///
/// Legacy records name the fields differently; `retailPrice`/`totalCost`
/// and `cost` are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantPrice {
    /// Raw cost at this variant
    #[serde(default, alias = "cost")]
    pub base_cost: Option<Decimal>,

    /// Total cost at this variant, preferred over `base_cost`
    #[serde(default, alias = "retailPrice", alias = "totalCost")]
    pub retail_base: Option<Decimal>,
}

impl VariantPrice {
    /// Variant carrying only a retail base
    pub fn retail(amount: Decimal) -> Self {
        Self {
            base_cost: None,
            retail_base: Some(amount),
        }
    }

    /// Variant carrying only a base cost
    pub fn cost(amount: Decimal) -> Self {
        Self {
            base_cost: Some(amount),
            retail_base: None,
        }
    }

    /// The "total cost at this variant": `retail_base`, else `base_cost`
    pub fn value(&self) -> Option<Decimal> {
        self.retail_base.or(self.base_cost)
    }
}

/// Errors for inputs that would otherwise produce a silently wrong price
#[derive(Debug, Error, PartialEq)]
pub enum InvalidInputError {
    #[error("Item {item_id}: quantity must be positive, got {quantity}")]
    NonPositiveQuantity { item_id: String, quantity: i64 },

    #[error("Item {item_id}: price must not be negative, got {price}")]
    NegativePrice { item_id: String, price: Decimal },

    #[error("{field} must not be negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    #[error("Item {item_id}: line amount exceeds the representable range")]
    AmountOverflow { item_id: String },

    #[error("{component} exceeds the representable range")]
    TotalOverflow { component: &'static str },
}

/// A task, process, material, or custom line entry
///
/// # Example
/// ```
/// use repair_pricing_core_rs::{ItemKind, PricedItem, VariantPrice};
/// use rust_decimal_macros::dec;
///
/// let item = PricedItem::new("task-1", "Ring sizing", ItemKind::Task)
///     .with_variant_price("Yellow Gold 14K", VariantPrice::retail(dec!(45)))
///     .with_quantity(2);
/// assert_eq!(item.quantity, 2);
/// assert!(item.universal_price.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedItem {
    /// Catalog identifier
    pub id: String,

    /// Human-readable name
    #[serde(default)]
    pub name: String,

    pub kind: ItemKind,

    /// Flat, metal-independent price
    #[serde(default)]
    pub universal_price: Option<Decimal>,

    /// Per-variant prices keyed by space- or underscore-form metal key
    #[serde(default, alias = "universalPricing", alias = "pricing")]
    pub variant_prices: HashMap<String, VariantPrice>,

    /// Line quantity (must be positive)
    #[serde(default = "default_quantity")]
    pub quantity: i64,

    /// Estimated labor hours, priced at the admin wage when no variant
    /// price resolves
    #[serde(default)]
    pub labor_hours: Option<Decimal>,
}

fn default_quantity() -> i64 {
    1
}

impl PricedItem {
    /// Create an item with quantity 1 and no prices
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            universal_price: None,
            variant_prices: HashMap::new(),
            quantity: 1,
            labor_hours: None,
        }
    }

    /// Set the flat universal price
    pub fn with_universal_price(mut self, price: Decimal) -> Self {
        self.universal_price = Some(price);
        self
    }

    /// Add a variant price under the given key
    pub fn with_variant_price(mut self, key: impl Into<String>, price: VariantPrice) -> Self {
        self.variant_prices.insert(key.into(), price);
        self
    }

    /// Set the line quantity
    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set the labor estimate
    pub fn with_labor_hours(mut self, hours: Decimal) -> Self {
        self.labor_hours = Some(hours);
        self
    }

    /// Check the fields that do not depend on the metal variant
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if self.quantity <= 0 {
            return Err(InvalidInputError::NonPositiveQuantity {
                item_id: self.id.clone(),
                quantity: self.quantity,
            });
        }
        if let Some(price) = self.universal_price {
            if price < Decimal::ZERO {
                return Err(InvalidInputError::NegativePrice {
                    item_id: self.id.clone(),
                    price,
                });
            }
        }
        if let Some(hours) = self.labor_hours {
            if hours < Decimal::ZERO {
                return Err(InvalidInputError::NegativeAmount {
                    field: "laborHours",
                    value: hours,
                });
            }
        }
        Ok(())
    }
}
