//! Metal Cost-of-Goods Tests
//!
//! Tests cover:
//! - Wax volume to metal weight conversion
//! - Karat (gold) and purity (silver) price adjustment
//! - Fixed 1.3x casting markup
//! - Zero/negative inputs yield 0

use repair_pricing_core_rs::pricing::cog::{
    adjusted_price_per_gram, metal_weight_grams, CASTING_MARKUP, DEFAULT_LABOR_CHARGE,
};
use repair_pricing_core_rs::{compute_metal_cost, round2, MetalFamily, MetalSpec, MetalType};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn gold(specific_gravity: Decimal, karats: u32) -> MetalSpec {
    MetalSpec {
        family: MetalFamily::Gold,
        specific_gravity,
        karats: Some(karats),
        purity: None,
    }
}

#[test]
fn test_reference_conversion_14k() {
    // 1000 mm3 -> 1.0 g wax -> 13.07 g metal
    // 65.0 * 14 / 24 = 37.9167 per gram
    // 13.07 * 37.9167 * 1.3 = 644.24, + 15 labor
    let spec = gold(dec!(13.07), 14);
    let cog = compute_metal_cost(dec!(1000), &spec, dec!(65.0), Some(dec!(15)));

    assert!((cog - dec!(659.3)).abs() <= dec!(0.1), "cog = {cog}");
    assert_eq!(round2(cog), dec!(659.24));
}

#[test]
fn test_weight_scales_linearly_with_volume() {
    let spec = gold(dec!(13.07), 14);
    assert_eq!(metal_weight_grams(dec!(2500), &spec), dec!(32.675));
}

#[test]
fn test_24k_uses_full_price() {
    let spec = gold(dec!(19.32), 24);
    assert_eq!(adjusted_price_per_gram(dec!(70), &spec), dec!(70));
}

#[test]
fn test_sterling_silver_cost() {
    let spec = MetalSpec::standard(MetalType::SterlingSilver, "925").unwrap();
    // 1000 mm3 -> 10.36 g; 1.00 * 0.925 per gram; * 1.3; + 0 labor
    let cog = compute_metal_cost(dec!(1000), &spec, dec!(1.00), Some(dec!(0)));
    assert_eq!(cog, dec!(10.36) * dec!(0.925) * CASTING_MARKUP);
}

#[test]
fn test_palladium_unadjusted() {
    let spec = MetalSpec::standard(MetalType::Palladium, "950").unwrap();
    assert_eq!(adjusted_price_per_gram(dec!(33), &spec), dec!(33));
}

#[test]
fn test_default_labor_applied_when_missing() {
    let spec = gold(dec!(13.07), 14);
    let without = compute_metal_cost(dec!(1000), &spec, dec!(65), None);
    let with_zero = compute_metal_cost(dec!(1000), &spec, dec!(65), Some(Decimal::ZERO));
    assert_eq!(without - with_zero, DEFAULT_LABOR_CHARGE);
}

#[test]
fn test_not_yet_computable_returns_zero() {
    let spec = gold(dec!(13.07), 14);
    let labor = Some(dec!(15));
    assert_eq!(compute_metal_cost(Decimal::ZERO, &spec, dec!(65), labor), Decimal::ZERO);
    assert_eq!(compute_metal_cost(dec!(1000), &spec, Decimal::ZERO, labor), Decimal::ZERO);
    assert_eq!(compute_metal_cost(dec!(-1), &spec, dec!(65), None), Decimal::ZERO);
    assert_eq!(compute_metal_cost(dec!(1000), &spec, dec!(-65), None), Decimal::ZERO);
}
