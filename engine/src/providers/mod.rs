//! External collaborator interfaces
//!
//! The engine reads everything it needs through these narrow, read-only
//! traits. Persistence, caching and refresh policy live behind them; the
//! engine never writes back.
//!
//! # Implementing a provider
//!
//! ```rust
//! use repair_pricing_core_rs::{AdminSettings, ProviderError, SettingsProvider};
//!
//! struct FixedSettings(AdminSettings);
//!
//! impl SettingsProvider for FixedSettings {
//!     fn admin_settings(&self) -> Result<Option<AdminSettings>, ProviderError> {
//!         Ok(Some(self.0.clone()))
//!     }
//! }
//! ```

pub mod memory;

use crate::models::item::PricedItem;
use crate::models::metal::MetalPrices;
use crate::models::settings::AdminSettings;
use thiserror::Error;

/// Errors reported by providers
#[derive(Debug, Error, PartialEq)]
pub enum ProviderError {
    #[error("Priced item not found: {0}")]
    ItemNotFound(String),

    #[error("Provider unavailable: {0}")]
    Unavailable(String),
}

/// Source of admin pricing settings
pub trait SettingsProvider {
    /// Current settings; `None` when an administrator has never saved any
    fn admin_settings(&self) -> Result<Option<AdminSettings>, ProviderError>;
}

/// Catalog of tasks, processes and materials
pub trait ItemCatalog {
    fn priced_item(&self, id: &str) -> Result<PricedItem, ProviderError>;
}

/// Snapshot of the shared rush job counter
pub trait RushCounterProvider {
    fn current_rush_job_count(&self) -> Result<u32, ProviderError>;

    fn max_rush_capacity(&self) -> Result<u32, ProviderError>;
}

/// Current per-gram metal prices
pub trait MetalPriceProvider {
    fn current_metal_prices(&self) -> Result<MetalPrices, ProviderError>;
}

// Re-exports
pub use memory::InMemoryProviders;
