//! Cost aggregation
//!
//! Folds priced line items into a [`RepairPriceBreakdown`]:
//!
//! ```text
//! per line:  base price -> markup stages -> unit price x quantity
//! subtotal:  sum of lines (halved for wholesale accounts)
//! rush fee:  subtotal x rush rate            (is_rush only)
//! delivery:  caller-supplied flat fee        (include_delivery only)
//! tax:       (subtotal + rush + delivery) x tax rate   (include_tax only)
//! total:     round2(subtotal + rush + delivery + tax)
//! ```
//!
//! Wholesale pricing is taken from the already-marked-up retail subtotal,
//! so wholesale accounts still cover marked-up cost.
//!
//! Configuration errors propagate unchanged; nothing here recovers from
//! them with a default.

use super::multiplier::{apply_markup, MarkupError};
use super::rush::RushCapacityGate;
use super::variant::resolve_variant;
use crate::models::breakdown::{LineItemPrice, PriceSource, RepairPriceBreakdown};
use crate::models::item::{InvalidInputError, ItemKind, PricedItem};
use crate::models::metal::MetalKey;
use crate::models::settings::{AdminSettings, ConfigurationError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

/// Fraction of the retail subtotal taken off for wholesale accounts
pub const WHOLESALE_DISCOUNT_RATE: Decimal = dec!(0.5);

/// Errors that abort a pricing request
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),
}

/// Flags and caller-supplied amounts for one quote
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteOptions {
    pub is_wholesale: bool,
    pub include_delivery: bool,
    pub include_tax: bool,
    pub is_rush: bool,

    /// Flat delivery fee, used when `include_delivery`
    pub delivery_fee: Decimal,

    /// Fractional tax rate, used when `include_tax`
    pub tax_rate: Decimal,
}

impl QuoteOptions {
    fn validate(&self) -> Result<(), InvalidInputError> {
        if self.delivery_fee < Decimal::ZERO {
            return Err(InvalidInputError::NegativeAmount {
                field: "deliveryFee",
                value: self.delivery_fee,
            });
        }
        if self.tax_rate < Decimal::ZERO {
            return Err(InvalidInputError::NegativeAmount {
                field: "taxRate",
                value: self.tax_rate,
            });
        }
        Ok(())
    }
}

/// Price one line item
///
/// A task or process with no resolvable variant price but a labor estimate
/// is priced at `labor_hours * wage`. Without a wage the line stays
/// unresolved and contributes zero.
pub fn price_line(
    item: &PricedItem,
    metal_key: Option<&MetalKey>,
    settings: Option<&AdminSettings>,
) -> Result<LineItemPrice, PricingError> {
    item.validate()?;

    let resolution = resolve_variant(item, metal_key);
    if resolution.price < Decimal::ZERO {
        return Err(InvalidInputError::NegativePrice {
            item_id: item.id.clone(),
            price: resolution.price,
        }
        .into());
    }

    let overflow = || InvalidInputError::AmountOverflow {
        item_id: item.id.clone(),
    };

    let (base_price, source) = match resolution.source {
        PriceSource::Unresolved => match labor_fallback(item, settings) {
            Some(price) => (price.ok_or_else(overflow)?, PriceSource::LaborFallback),
            None => (Decimal::ZERO, PriceSource::Unresolved),
        },
        source => (resolution.price, source),
    };

    let unit_price = apply_markup(item.kind, base_price, settings).map_err(|e| match e {
        MarkupError::Configuration(e) => PricingError::Configuration(e),
        MarkupError::Overflow { .. } => overflow().into(),
    })?;
    let line_total = unit_price
        .checked_mul(Decimal::from(item.quantity))
        .ok_or_else(overflow)?;

    Ok(LineItemPrice {
        item_id: item.id.clone(),
        kind: item.kind,
        quantity: item.quantity,
        source,
        base_price,
        unit_price,
        line_total,
    })
}

/// `Some(None)` when the fallback applies but `hours * wage` overflows
fn labor_fallback(
    item: &PricedItem,
    settings: Option<&AdminSettings>,
) -> Option<Option<Decimal>> {
    if !matches!(item.kind, ItemKind::Task | ItemKind::Process) {
        return None;
    }
    let hours = item.labor_hours.filter(|h| *h > Decimal::ZERO)?;
    let wage = settings?.pricing.as_ref()?.wage?;
    Some(hours.checked_mul(wage))
}

fn total_overflow(component: &'static str) -> InvalidInputError {
    InvalidInputError::TotalOverflow { component }
}

/// Compute the full breakdown for a list of items
///
/// # Errors
/// - `InvalidInput` for a non-positive quantity, a negative price, a
///   negative delivery fee or tax rate, or amounts beyond `Decimal` range
/// - `Configuration` when settings are out of range, cannot support a
///   non-zero line, or `is_rush` is set without rush settings
///
/// # Example
/// ```
/// use repair_pricing_core_rs::{
///     compute_breakdown, resolve, AdminSettings, ItemKind, PricedItem, PricingSettings,
///     QuoteOptions, VariantPrice,
/// };
/// use rust_decimal_macros::dec;
///
/// let settings = AdminSettings {
///     pricing: Some(PricingSettings {
///         administrative_fee: Some(dec!(0.10)),
///         business_fee: Some(dec!(0.15)),
///         consumables_fee: Some(dec!(0.05)),
///         ..Default::default()
///     }),
///     rush: None,
/// };
/// let task = PricedItem::new("t1", "Prong retip", ItemKind::Task)
///     .with_variant_price("Sterling Silver 925", VariantPrice::retail(dec!(24.55)));
/// let key = resolve("silver", "925");
///
/// let breakdown =
///     compute_breakdown(&[task], key.as_ref(), Some(&settings), &QuoteOptions::default())
///         .unwrap();
/// assert_eq!(breakdown.subtotal, dec!(31.915));
/// assert_eq!(breakdown.total_cost, dec!(31.92));
/// ```
#[instrument(skip_all, fields(items = items.len()))]
pub fn compute_breakdown(
    items: &[PricedItem],
    metal_key: Option<&MetalKey>,
    settings: Option<&AdminSettings>,
    options: &QuoteOptions,
) -> Result<RepairPriceBreakdown, PricingError> {
    options.validate()?;
    if let Some(settings) = settings {
        settings.validate()?;
    }

    let lines = items
        .iter()
        .map(|item| price_line(item, metal_key, settings))
        .collect::<Result<Vec<_>, _>>()?;

    for line in lines.iter().filter(|line| line.is_unresolved()) {
        tracing::warn!(item_id = %line.item_id, "no price for variant; line contributes zero");
    }

    let retail_subtotal = lines
        .iter()
        .try_fold(Decimal::ZERO, |sum, line| sum.checked_add(line.line_total))
        .ok_or_else(|| total_overflow("subtotal"))?;
    let wholesale_discount = if options.is_wholesale {
        retail_subtotal * WHOLESALE_DISCOUNT_RATE
    } else {
        Decimal::ZERO
    };
    let subtotal = retail_subtotal - wholesale_discount;

    let rush_fee = if options.is_rush {
        RushCapacityGate::pricing_only(settings)?
            .checked_rush_pricing(subtotal)
            .ok_or_else(|| total_overflow("rushFee"))?
            .rush_fee
    } else {
        Decimal::ZERO
    };

    let delivery_fee = if options.include_delivery {
        options.delivery_fee
    } else {
        Decimal::ZERO
    };

    let taxable = subtotal
        .checked_add(rush_fee)
        .and_then(|sum| sum.checked_add(delivery_fee))
        .ok_or_else(|| total_overflow("totalCost"))?;
    let tax_amount = if options.include_tax {
        taxable
            .checked_mul(options.tax_rate)
            .ok_or_else(|| total_overflow("taxAmount"))?
    } else {
        Decimal::ZERO
    };
    taxable
        .checked_add(tax_amount)
        .ok_or_else(|| total_overflow("totalCost"))?;

    let breakdown = RepairPriceBreakdown::compose(
        subtotal,
        rush_fee,
        delivery_fee,
        tax_amount,
        wholesale_discount,
        lines,
    );

    tracing::debug!(
        subtotal = %breakdown.subtotal,
        rush_fee = %breakdown.rush_fee,
        delivery_fee = %breakdown.delivery_fee,
        tax_amount = %breakdown.tax_amount,
        total_cost = %breakdown.total_cost,
        "breakdown computed"
    );

    Ok(breakdown)
}
