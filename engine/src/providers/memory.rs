//! In-memory providers
//!
//! A single value implementing every provider trait, for embedding callers
//! that already hold their data and for tests.

use super::{
    ItemCatalog, MetalPriceProvider, ProviderError, RushCounterProvider, SettingsProvider,
};
use crate::models::item::PricedItem;
use crate::models::metal::MetalPrices;
use crate::models::settings::AdminSettings;
use std::collections::HashMap;

/// Provider backed by plain values
///
/// # Example
/// ```
/// use repair_pricing_core_rs::providers::InMemoryProviders;
/// use repair_pricing_core_rs::{ItemCatalog, ItemKind, PricedItem};
/// use rust_decimal_macros::dec;
///
/// let providers = InMemoryProviders::new()
///     .with_item(PricedItem::new("m1", "Solder", ItemKind::Material).with_universal_price(dec!(2)));
/// assert!(providers.priced_item("m1").is_ok());
/// assert!(providers.priced_item("missing").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryProviders {
    settings: Option<AdminSettings>,
    items: HashMap<String, PricedItem>,
    rush_job_count: u32,
    metal_prices: Option<MetalPrices>,
}

impl InMemoryProviders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(mut self, settings: AdminSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn with_item(mut self, item: PricedItem) -> Self {
        self.items.insert(item.id.clone(), item);
        self
    }

    pub fn with_rush_job_count(mut self, count: u32) -> Self {
        self.rush_job_count = count;
        self
    }

    pub fn with_metal_prices(mut self, prices: MetalPrices) -> Self {
        self.metal_prices = Some(prices);
        self
    }
}

impl SettingsProvider for InMemoryProviders {
    fn admin_settings(&self) -> Result<Option<AdminSettings>, ProviderError> {
        Ok(self.settings.clone())
    }
}

impl ItemCatalog for InMemoryProviders {
    fn priced_item(&self, id: &str) -> Result<PricedItem, ProviderError> {
        self.items
            .get(id)
            .cloned()
            .ok_or_else(|| ProviderError::ItemNotFound(id.to_string()))
    }
}

impl RushCounterProvider for InMemoryProviders {
    fn current_rush_job_count(&self) -> Result<u32, ProviderError> {
        Ok(self.rush_job_count)
    }

    /// Capacity from the admin rush settings; zero when none are saved
    fn max_rush_capacity(&self) -> Result<u32, ProviderError> {
        Ok(self
            .settings
            .as_ref()
            .and_then(|s| s.rush.as_ref())
            .map(|rush| rush.max_concurrent_rush_jobs)
            .unwrap_or(0))
    }
}

impl MetalPriceProvider for InMemoryProviders {
    fn current_metal_prices(&self) -> Result<MetalPrices, ProviderError> {
        self.metal_prices
            .clone()
            .ok_or_else(|| ProviderError::Unavailable("metal prices not loaded".to_string()))
    }
}
