//! Repair Pricing Core - Rust Engine
//!
//! Metal-variant cost and pricing computation for jewelry repair and
//! custom-order line items.
//!
//! # Architecture
//!
//! - **core**: Money helpers (currency rounding)
//! - **models**: Domain types (PricedItem, MetalKey, AdminSettings, breakdowns)
//! - **pricing**: Calculators (key resolution, variant lookup, business
//!   multiplier, cost aggregation, metal COG, rush capacity)
//! - **providers**: Narrow interfaces to external collaborators
//! - **orchestrator**: `PricingEngine` facade tying providers to calculators
//!
//! # Critical Invariants
//!
//! 1. All money values are `Decimal`; totals round half-up to 2 places once
//! 2. Incomplete admin settings are an error, never a default multiplier
//! 3. Calculators are pure; the engine never mutates external state

// Module declarations
pub mod config;
pub mod core;
pub mod logging;
pub mod models;
pub mod orchestrator;
pub mod pricing;
pub mod providers;

// Re-exports for convenience
pub use config::EngineConfig;
pub use crate::core::money::round2;
pub use models::{
    breakdown::{LineItemPrice, PriceSource, RepairPriceBreakdown},
    item::{InvalidInputError, ItemKind, PricedItem, VariantPrice},
    metal::{MetalFamily, MetalKey, MetalPrices, MetalSpec, MetalType},
    settings::{AdminSettings, ConfigurationError, PricingSettings, RushSettings},
};
pub use orchestrator::{
    CastCost, CastRequest, ItemRef, PriceQuote, PricingEngine, QuoteError, QuoteRequest,
};
pub use pricing::{
    aggregator::{compute_breakdown, PricingError, QuoteOptions},
    cog::compute_metal_cost,
    metal_key::resolve,
    multiplier::{apply_multiplier, preview_multiplier},
    rush::{RushAdmission, RushCapacityGate, RushPricing},
    variant::lookup_base_price,
};
pub use providers::{
    ItemCatalog, MetalPriceProvider, ProviderError, RushCounterProvider, SettingsProvider,
};
