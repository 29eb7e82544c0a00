//! Domain models for the pricing engine

pub mod breakdown;
pub mod item;
pub mod metal;
pub mod settings;

// Re-exports
pub use breakdown::{LineItemPrice, PriceSource, RepairPriceBreakdown};
pub use item::{InvalidInputError, ItemKind, PricedItem, VariantPrice};
pub use metal::{MetalFamily, MetalKey, MetalPrices, MetalSpec, MetalType};
pub use settings::{AdminSettings, ConfigurationError, PricingSettings, RushSettings};
