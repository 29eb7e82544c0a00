//! Metal Key Resolution Tests
//!
//! Tests cover:
//! - Alias table mapping for every canonical metal
//! - Karat normalization (digits and K only)
//! - Space-form and underscore-form serializations
//! - Empty and unknown input handling (never errors)

use repair_pricing_core_rs::pricing::metal_key::{candidates, normalize_karat, KeyFormat};
use repair_pricing_core_rs::{resolve, MetalFamily, MetalType};

#[test]
fn test_every_alias_resolves_to_canonical_display_name() {
    let cases = [
        ("yellow-gold", "Yellow Gold"),
        ("Yellow Gold", "Yellow Gold"),
        ("gold", "Yellow Gold"),
        ("white_gold", "White Gold"),
        ("rose-gold", "Rose Gold"),
        ("silver", "Sterling Silver"),
        ("sterling-silver", "Sterling Silver"),
        ("PLATINUM", "Platinum"),
        ("palladium", "Palladium"),
    ];

    for (alias, expected) in cases {
        let key = resolve(alias, "14k").unwrap();
        assert_eq!(key.metal(), expected, "alias {alias}");
        assert!(key.metal_type().is_some());
    }
}

#[test]
fn test_both_serializations() {
    let key = resolve("yellow-gold", "14k").unwrap();
    assert_eq!(key.space_form(), "Yellow Gold 14K");
    assert_eq!(key.underscore_form(), "yellow_gold_14k");
    assert_eq!(key.to_string(), "Yellow Gold 14K");
}

#[test]
fn test_silver_purity_key() {
    let key = resolve("silver", "925").unwrap();
    assert_eq!(key.space_form(), "Sterling Silver 925");
    assert_eq!(key.underscore_form(), "sterling_silver_925");
    assert_eq!(key.family(), Some(MetalFamily::Silver));
    assert_eq!(key.metal_type(), Some(MetalType::SterlingSilver));
}

#[test]
fn test_karat_noise_is_stripped() {
    assert_eq!(normalize_karat("14 kt"), "14K");
    assert_eq!(normalize_karat("18k."), "18K");
    assert_eq!(normalize_karat("(925)"), "925");

    let noisy = resolve("gold", " 14-k ").unwrap();
    let clean = resolve("gold", "14K").unwrap();
    assert_eq!(noisy, clean);
}

#[test]
fn test_empty_inputs_return_none() {
    assert!(resolve("", "").is_none());
    assert!(resolve("gold", "").is_none());
    assert!(resolve("", "14K").is_none());
    assert!(resolve("  ", "  ").is_none());
}

#[test]
fn test_unknown_metal_passes_through() {
    let key = resolve("Cobalt Chrome", "10k").unwrap();
    assert_eq!(key.metal(), "Cobalt Chrome");
    assert_eq!(key.metal_type(), None);
    assert_eq!(key.family(), None);
    assert_eq!(key.space_form(), "Cobalt Chrome 10K");
    assert_eq!(key.underscore_form(), "cobalt_chrome_10k");
}

#[test]
fn test_candidates_space_form_first() {
    let key = resolve("platinum", "950").unwrap();
    let rendered = candidates(&key);
    assert_eq!(rendered.len(), 2);
    assert_eq!(rendered[0], (KeyFormat::SpaceForm, "Platinum 950".to_string()));
    assert_eq!(rendered[1], (KeyFormat::UnderscoreForm, "platinum_950".to_string()));
}

#[test]
fn test_resolve_is_idempotent() {
    let first = resolve("rose gold", "18k");
    let second = resolve("rose gold", "18k");
    assert_eq!(first, second);
}
