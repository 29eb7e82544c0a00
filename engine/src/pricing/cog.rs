//! Metal cost of goods
//!
//! Converts a wax model volume into cast-metal weight and dollar cost:
//!
//! ```text
//! wax weight (g)    = volume (mm3) x 0.001
//! metal weight (g)  = wax weight x specific gravity
//! adjusted price/g  = gold:   price(24K) x karats / 24
//!                     silver: price(.999) x purity
//!                     other:  price
//! metal cost        = metal weight x adjusted price x 1.3
//! total COG         = metal cost + labor charge
//! ```
//!
//! The 1.3 casting markup is a fixed business rule. COG previews may be
//! rendered before a model or price exists, so zero or negative inputs
//! yield 0 rather than an error.

use crate::models::metal::{MetalFamily, MetalSpec};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Grams of wax per cubic millimetre
pub const WAX_DENSITY_G_PER_MM3: Decimal = dec!(0.001);

/// Casting-house labor markup on metal cost
pub const CASTING_MARKUP: Decimal = dec!(1.3);

/// Flat casting labor charge used when the caller supplies none
pub const DEFAULT_LABOR_CHARGE: Decimal = dec!(15);

/// Cast-metal weight in grams for a wax volume
pub fn metal_weight_grams(wax_volume_mm3: Decimal, spec: &MetalSpec) -> Decimal {
    wax_volume_mm3 * WAX_DENSITY_G_PER_MM3 * spec.specific_gravity
}

/// Per-gram price adjusted for karat or purity
pub fn adjusted_price_per_gram(price_per_gram: Decimal, spec: &MetalSpec) -> Decimal {
    match (spec.family, spec.karats, spec.purity) {
        (MetalFamily::Gold, Some(karats), _) => {
            price_per_gram * Decimal::from(karats) / dec!(24)
        }
        (MetalFamily::Silver, _, Some(purity)) => price_per_gram * purity,
        _ => price_per_gram,
    }
}

/// Total cost of goods for a cast part
///
/// `labor_charge` falls back to [`DEFAULT_LABOR_CHARGE`].
///
/// # Example
/// ```
/// use repair_pricing_core_rs::{compute_metal_cost, round2, MetalFamily, MetalSpec};
/// use rust_decimal_macros::dec;
///
/// let spec = MetalSpec {
///     family: MetalFamily::Gold,
///     specific_gravity: dec!(13.07),
///     karats: Some(14),
///     purity: None,
/// };
/// let cog = compute_metal_cost(dec!(1000), &spec, dec!(65.0), Some(dec!(15)));
/// assert_eq!(round2(cog), dec!(659.24));
/// ```
pub fn compute_metal_cost(
    wax_volume_mm3: Decimal,
    spec: &MetalSpec,
    price_per_gram: Decimal,
    labor_charge: Option<Decimal>,
) -> Decimal {
    if wax_volume_mm3 <= Decimal::ZERO || price_per_gram <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    if spec.specific_gravity <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let weight = metal_weight_grams(wax_volume_mm3, spec);
    let metal_cost = weight * adjusted_price_per_gram(price_per_gram, spec) * CASTING_MARKUP;
    let labor = labor_charge
        .filter(|charge| *charge >= Decimal::ZERO)
        .unwrap_or(DEFAULT_LABOR_CHARGE);

    metal_cost + labor
}
