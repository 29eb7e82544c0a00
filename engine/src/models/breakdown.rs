//! Pricing output types
//!
//! `RepairPriceBreakdown` is what the engine hands to the persistence and
//! notification layers. It keeps the per-line detail so a caller can flag
//! unresolved lines for manual review instead of failing the quote.

use super::item::ItemKind;
use crate::core::money::round2;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where a line's base price came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    /// Flat, metal-independent price
    Universal,
    /// Variant map entry under the space-form key
    SpaceFormVariant,
    /// Variant map entry under the underscore-form key
    UnderscoreFormVariant,
    /// `labor_hours * wage`
    LaborFallback,
    /// Nothing matched; the line contributes zero
    Unresolved,
}

/// Resolved price of one line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemPrice {
    pub item_id: String,
    pub kind: ItemKind,
    pub quantity: i64,
    pub source: PriceSource,
    /// Resolved base price before any markup
    pub base_price: Decimal,
    /// Price per unit after material markup and business multiplier
    pub unit_price: Decimal,
    /// `unit_price * quantity`
    pub line_total: Decimal,
}

impl LineItemPrice {
    /// True when no price resolved for this line
    pub fn is_unresolved(&self) -> bool {
        self.source == PriceSource::Unresolved
    }
}

/// Final price composition for a repair or custom order
///
/// `total_cost == round2(subtotal + rush_fee + delivery_fee + tax_amount)`
/// always holds; components keep full precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairPriceBreakdown {
    /// Sum of line totals, after the wholesale discount when applicable
    pub subtotal: Decimal,
    pub rush_fee: Decimal,
    pub delivery_fee: Decimal,
    pub tax_amount: Decimal,
    pub total_cost: Decimal,

    /// Amount taken off the retail subtotal for wholesale accounts
    pub wholesale_discount: Decimal,

    /// Per-line detail, in input order
    pub lines: Vec<LineItemPrice>,

    /// Ids of lines that resolved to zero
    pub unresolved_items: Vec<String>,
}

impl RepairPriceBreakdown {
    /// Compose a breakdown from its components, rounding the total once
    pub fn compose(
        subtotal: Decimal,
        rush_fee: Decimal,
        delivery_fee: Decimal,
        tax_amount: Decimal,
        wholesale_discount: Decimal,
        lines: Vec<LineItemPrice>,
    ) -> Self {
        let unresolved_items = lines
            .iter()
            .filter(|line| line.is_unresolved())
            .map(|line| line.item_id.clone())
            .collect();
        Self {
            subtotal,
            rush_fee,
            delivery_fee,
            tax_amount,
            total_cost: round2(subtotal + rush_fee + delivery_fee + tax_amount),
            wholesale_discount,
            lines,
            unresolved_items,
        }
    }

    /// True when every line resolved to a price
    pub fn is_fully_resolved(&self) -> bool {
        self.unresolved_items.is_empty()
    }
}
