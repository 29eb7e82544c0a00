//! Pricing Module
//!
//! Pure calculators that turn catalog items and admin settings into prices.
//!
//! # Data Flow
//!
//! ```text
//! (metal type, karat) -> metal_key::resolve -> MetalKey
//! item + MetalKey     -> variant::resolve_variant -> base price
//! base price          -> multiplier::apply_markup -> unit price
//! lines               -> aggregator::compute_breakdown -> RepairPriceBreakdown
//! ```
//!
//! `cog` and `rush` are independent calculators feeding the same
//! aggregation step.
//!
//! # Error Policy
//!
//! `metal_key`, `variant` and `cog` never error; ambiguous input yields
//! `None` or zero. Only `multiplier` and `aggregator` return errors, and
//! only for configuration or input defects that would otherwise produce a
//! silently wrong price.

pub mod aggregator;
pub mod cog;
pub mod metal_key;
pub mod multiplier;
pub mod rush;
pub mod variant;

// Re-export public API
pub use aggregator::{compute_breakdown, price_line, PricingError, QuoteOptions};
pub use cog::compute_metal_cost;
pub use metal_key::{resolve, KeyFormat};
pub use multiplier::{
    apply_markup, apply_multiplier, preview_multiplier, MarkupError, MarkupStage,
};
pub use rush::{RushAdmission, RushCapacityGate, RushPricing};
pub use variant::{lookup_base_price, resolve_variant, VariantResolution};
