//! Pricing Property Tests
//!
//! Tests cover:
//! - Key resolution is idempotent over its own output
//! - Space-form and underscore-form catalog entries price identically
//! - Business multiplier is exactly `base * (1 + fees)`
//! - Zero base prices to zero under any settings
//! - Missing fee fields are always rejected for non-zero bases
//! - Total is the rounded sum of its parts

use proptest::prelude::*;
use repair_pricing_core_rs::{
    apply_multiplier, compute_breakdown, lookup_base_price, resolve, round2, AdminSettings,
    ConfigurationError, ItemKind, MetalType, PricedItem, PricingSettings, QuoteOptions,
    RushSettings, VariantPrice,
};
use rust_decimal::Decimal;

// ============================================================================
// Strategies
// ============================================================================

/// Non-negative money amount with cent precision
fn amount(max_cents: i64) -> impl Strategy<Value = Decimal> {
    (0..=max_cents).prop_map(|cents| Decimal::new(cents, 2))
}

/// Fee rate between 0.00 and 1.00
fn rate() -> impl Strategy<Value = Decimal> {
    (0i64..=100).prop_map(|pct| Decimal::new(pct, 2))
}

fn metal_type() -> impl Strategy<Value = MetalType> {
    prop::sample::select(MetalType::ALL.to_vec())
}

fn karat() -> impl Strategy<Value = String> {
    prop_oneof![
        (1u32..=24).prop_map(|k| format!("{}k", k)),
        prop::sample::select(vec!["925".to_string(), "950".to_string(), "999".to_string()]),
    ]
}

fn settings(admin: Decimal, business: Decimal, consumables: Decimal) -> AdminSettings {
    AdminSettings {
        pricing: Some(PricingSettings {
            administrative_fee: Some(admin),
            business_fee: Some(business),
            consumables_fee: Some(consumables),
            material_markup: Some(Decimal::TWO),
            wage: Some(Decimal::from(60)),
        }),
        rush: Some(RushSettings {
            max_concurrent_rush_jobs: 5,
            rush_rate: Decimal::new(5, 1),
        }),
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_resolve_is_idempotent(metal in metal_type(), karat in karat()) {
        let key = resolve(metal.display_name(), &karat).unwrap();
        let again = resolve(key.metal(), key.karat()).unwrap();
        prop_assert_eq!(again, key);
    }

    #[test]
    fn prop_key_forms_price_identically(
        metal in metal_type(),
        karat in karat(),
        price in amount(100_000),
    ) {
        let key = resolve(metal.display_name(), &karat).unwrap();
        let spaced = PricedItem::new("a", "a", ItemKind::Task)
            .with_variant_price(key.space_form(), VariantPrice::retail(price));
        let underscored = PricedItem::new("b", "b", ItemKind::Task)
            .with_variant_price(key.underscore_form(), VariantPrice::retail(price));

        prop_assert_eq!(
            lookup_base_price(&spaced, Some(&key)),
            lookup_base_price(&underscored, Some(&key))
        );
    }

    #[test]
    fn prop_multiplier_formula(
        base in amount(1_000_000),
        a in rate(),
        b in rate(),
        c in rate(),
    ) {
        let result = apply_multiplier(base, Some(&settings(a, b, c))).unwrap();
        prop_assert_eq!(result, base * (Decimal::ONE + a + b + c));
        prop_assert!(result >= base);
    }

    #[test]
    fn prop_zero_base_is_zero(a in rate(), b in rate(), c in rate(), present in any::<bool>()) {
        let settings = settings(a, b, c);
        let settings = if present { Some(&settings) } else { None };
        prop_assert_eq!(apply_multiplier(Decimal::ZERO, settings), Ok(Decimal::ZERO));
    }

    #[test]
    fn prop_missing_fee_rejected(base in amount(100_000), missing in 0usize..3) {
        prop_assume!(base > Decimal::ZERO);
        let mut settings = settings(Decimal::new(10, 2), Decimal::new(15, 2), Decimal::new(5, 2));
        let pricing = settings.pricing.as_mut().unwrap();
        match missing {
            0 => pricing.administrative_fee = None,
            1 => pricing.business_fee = None,
            _ => pricing.consumables_fee = None,
        }

        let result = apply_multiplier(base, Some(&settings));
        let is_missing_fields = matches!(result, Err(ConfigurationError::MissingFields { .. }));
        prop_assert!(is_missing_fields);
    }

    #[test]
    fn prop_total_is_rounded_sum(
        prices in prop::collection::vec(amount(50_000), 1..6),
        is_wholesale in any::<bool>(),
        is_rush in any::<bool>(),
        delivery in amount(5_000),
        tax_rate in rate(),
    ) {
        let items: Vec<PricedItem> = prices
            .iter()
            .enumerate()
            .map(|(i, price)| {
                PricedItem::new(format!("item-{}", i), "item", ItemKind::Process)
                    .with_universal_price(*price)
            })
            .collect();
        let options = QuoteOptions {
            is_wholesale,
            include_delivery: true,
            include_tax: true,
            is_rush,
            delivery_fee: delivery,
            tax_rate,
        };
        let settings = settings(Decimal::new(10, 2), Decimal::new(15, 2), Decimal::new(5, 2));

        let breakdown = compute_breakdown(&items, None, Some(&settings), &options).unwrap();

        prop_assert_eq!(
            breakdown.total_cost,
            round2(
                breakdown.subtotal
                    + breakdown.rush_fee
                    + breakdown.delivery_fee
                    + breakdown.tax_amount
            )
        );
        prop_assert!(breakdown.total_cost >= Decimal::ZERO);
        prop_assert!(breakdown.is_fully_resolved());
    }
}
