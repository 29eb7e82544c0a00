//! Orchestrator Module
//!
//! Request-level entry point: fetches inputs through the provider traits,
//! runs the pricing calculators, and assembles the quote handed to the
//! persistence layer.

pub mod engine;
pub mod fingerprint;

// Re-exports
pub use engine::{
    CastCost, CastRequest, ItemRef, PriceQuote, PricingEngine, QuoteError, QuoteRequest,
};
pub use fingerprint::settings_fingerprint;
