//! Pricing engine facade
//!
//! `PricingEngine` ties the provider traits to the pure calculators. Per
//! request it:
//!
//! 1. Fetches admin settings once and validates them
//! 2. Resolves the requested metal/karat into a `MetalKey`
//! 3. Fetches catalog items (applying quantity overrides) and appends
//!    custom lines
//! 4. Computes the breakdown
//! 5. Attaches a rush admission snapshot for rush quotes
//!
//! Settings are never cached across requests; the provider owns caching.

use super::fingerprint::settings_fingerprint;
use crate::config::EngineConfig;
use crate::models::breakdown::RepairPriceBreakdown;
use crate::models::item::PricedItem;
use crate::models::metal::{MetalKey, MetalSpec};
use crate::models::settings::{AdminSettings, ConfigurationError};
use crate::pricing::aggregator::{compute_breakdown, price_line, PricingError, QuoteOptions};
use crate::pricing::cog::{compute_metal_cost, metal_weight_grams};
use crate::pricing::metal_key::resolve;
use crate::pricing::rush::{RushAdmission, RushCapacityGate};
use crate::providers::{
    ItemCatalog, MetalPriceProvider, ProviderError, RushCounterProvider, SettingsProvider,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

/// Errors returned by the engine facade
#[derive(Debug, Error, PartialEq)]
pub enum QuoteError {
    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<ConfigurationError> for QuoteError {
    fn from(err: ConfigurationError) -> Self {
        QuoteError::Pricing(PricingError::Configuration(err))
    }
}

impl QuoteError {
    /// True for admin-settings problems, which callers render as blocking
    pub fn is_configuration(&self) -> bool {
        matches!(self, QuoteError::Pricing(PricingError::Configuration(_)))
    }
}

/// Reference to a catalog item with an optional quantity override
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRef {
    pub id: String,
    #[serde(default)]
    pub quantity: Option<i64>,
}

impl ItemRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            quantity: None,
        }
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }
}

/// One pricing request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteRequest {
    /// Catalog tasks, processes and materials
    pub items: Vec<ItemRef>,

    /// Lines entered directly on the ticket
    pub custom_items: Vec<PricedItem>,

    pub metal_type: String,
    pub karat: String,
    pub options: QuoteOptions,
}

/// Priced quote handed to the persistence layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub quote_id: String,

    /// SHA-256 of the settings used
    pub settings_fingerprint: String,

    /// `None` when metal or karat was not given
    pub metal_key: Option<MetalKey>,

    pub breakdown: RepairPriceBreakdown,

    /// Capacity snapshot, present for rush quotes only
    pub rush_admission: Option<RushAdmission>,
}

/// Cast-metal cost request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastRequest {
    pub wax_volume_mm3: Decimal,
    pub metal_type: String,
    pub karat: String,
    #[serde(default)]
    pub labor_charge: Option<Decimal>,
}

/// Cast-metal cost result
///
/// `spec` is `None` when the metal/karat has no reference data; the cost is
/// then zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastCost {
    pub metal_key: Option<MetalKey>,
    pub spec: Option<MetalSpec>,
    pub metal_weight_grams: Decimal,
    pub price_per_gram: Decimal,
    pub total_cog: Decimal,
}

/// Facade over the providers and calculators
///
/// # Example
/// ```
/// use repair_pricing_core_rs::providers::InMemoryProviders;
/// use repair_pricing_core_rs::{
///     AdminSettings, ItemKind, ItemRef, PricedItem, PricingEngine, PricingSettings,
///     QuoteRequest, VariantPrice,
/// };
/// use rust_decimal_macros::dec;
///
/// let providers = InMemoryProviders::new()
///     .with_settings(AdminSettings {
///         pricing: Some(PricingSettings {
///             administrative_fee: Some(dec!(0.10)),
///             business_fee: Some(dec!(0.15)),
///             consumables_fee: Some(dec!(0.05)),
///             ..Default::default()
///         }),
///         rush: None,
///     })
///     .with_item(
///         PricedItem::new("t1", "Prong retip", ItemKind::Task)
///             .with_variant_price("Sterling Silver 925", VariantPrice::retail(dec!(24.55))),
///     );
///
/// let engine = PricingEngine::from_providers(&providers);
/// let quote = engine
///     .quote(&QuoteRequest {
///         items: vec![ItemRef::new("t1")],
///         metal_type: "silver".to_string(),
///         karat: "925".to_string(),
///         ..Default::default()
///     })
///     .unwrap();
/// assert_eq!(quote.breakdown.total_cost, dec!(31.92));
/// ```
pub struct PricingEngine<'a> {
    settings: &'a dyn SettingsProvider,
    catalog: &'a dyn ItemCatalog,
    rush_counter: &'a dyn RushCounterProvider,
    metal_prices: &'a dyn MetalPriceProvider,
    config: EngineConfig,
}

impl<'a> PricingEngine<'a> {
    /// Create an engine over separate providers
    pub fn new(
        settings: &'a dyn SettingsProvider,
        catalog: &'a dyn ItemCatalog,
        rush_counter: &'a dyn RushCounterProvider,
        metal_prices: &'a dyn MetalPriceProvider,
    ) -> Self {
        Self {
            settings,
            catalog,
            rush_counter,
            metal_prices,
            config: EngineConfig::default(),
        }
    }

    /// Create an engine over one value implementing every provider
    pub fn from_providers<P>(providers: &'a P) -> Self
    where
        P: SettingsProvider + ItemCatalog + RushCounterProvider + MetalPriceProvider,
    {
        Self::new(providers, providers, providers, providers)
    }

    /// Replace the engine configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Fetch and validate settings for one request
    fn load_settings(&self) -> Result<Option<AdminSettings>, QuoteError> {
        let settings = self.settings.admin_settings()?;
        if let Some(settings) = &settings {
            settings.validate()?;
        }
        Ok(settings)
    }

    /// Price one request
    ///
    /// # Errors
    /// - `Provider` when settings or an item cannot be fetched
    /// - `Pricing` for configuration or input defects
    #[instrument(
        skip_all,
        fields(items = request.items.len(), custom = request.custom_items.len())
    )]
    pub fn quote(&self, request: &QuoteRequest) -> Result<PriceQuote, QuoteError> {
        let settings = self.load_settings()?;
        let metal_key = resolve(&request.metal_type, &request.karat);

        let mut items = Vec::with_capacity(request.items.len() + request.custom_items.len());
        for item_ref in &request.items {
            let mut item = self.catalog.priced_item(&item_ref.id)?;
            if let Some(quantity) = item_ref.quantity {
                item.quantity = quantity;
            }
            items.push(item);
        }
        items.extend(request.custom_items.iter().cloned());

        let breakdown = compute_breakdown(
            &items,
            metal_key.as_ref(),
            settings.as_ref(),
            &request.options,
        )
        .inspect_err(|e| tracing::error!(error = %e, "pricing failed"))?;

        let rush_admission = if request.options.is_rush {
            Some(self.rush_gate_for(settings.as_ref())?.can_create())
        } else {
            None
        };

        let quote = PriceQuote {
            quote_id: uuid::Uuid::new_v4().to_string(),
            settings_fingerprint: settings_fingerprint(&settings)?,
            metal_key,
            breakdown,
            rush_admission,
        };

        tracing::info!(
            quote_id = %quote.quote_id,
            total_cost = %quote.breakdown.total_cost,
            unresolved = quote.breakdown.unresolved_items.len(),
            "quote priced"
        );

        Ok(quote)
    }

    /// Price many requests independently
    ///
    /// A failing request yields its own error and never aborts its
    /// siblings.
    pub fn quote_batch(&self, requests: &[QuoteRequest]) -> Vec<Result<PriceQuote, QuoteError>> {
        requests
            .iter()
            .enumerate()
            .map(|(index, request)| {
                self.quote(request).inspect_err(|e| {
                    tracing::warn!(index, error = %e, "batch request failed");
                })
            })
            .collect()
    }

    /// Rush gate over the current counter snapshot
    pub fn rush_gate(&self) -> Result<RushCapacityGate, QuoteError> {
        let settings = self.load_settings()?;
        self.rush_gate_for(settings.as_ref())
    }

    fn rush_gate_for(
        &self,
        settings: Option<&AdminSettings>,
    ) -> Result<RushCapacityGate, QuoteError> {
        let rush = settings.ok_or(ConfigurationError::MissingSettings)?.rush()?;
        Ok(RushCapacityGate::new(
            self.rush_counter.current_rush_job_count()?,
            self.rush_counter.max_rush_capacity()?,
            rush.rush_rate,
        ))
    }

    /// Unit price of a catalog item, or `None` when settings are incomplete
    ///
    /// For screens that must render before admin settings are complete.
    /// Prices the item exactly as [`quote`](Self::quote) does; provider
    /// failures and input defects are still errors.
    pub fn preview_unit_price(
        &self,
        item_id: &str,
        metal_type: &str,
        karat: &str,
    ) -> Result<Option<Decimal>, QuoteError> {
        let settings = self.settings.admin_settings()?;
        let item = self.catalog.priced_item(item_id)?;
        if settings.as_ref().is_some_and(|s| s.validate().is_err()) {
            return Ok(None);
        }

        let metal_key = resolve(metal_type, karat);
        match price_line(&item, metal_key.as_ref(), settings.as_ref()) {
            Ok(line) => Ok(Some(line.unit_price)),
            Err(PricingError::Configuration(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Cast-metal cost of goods at current metal prices
    pub fn cast_cost(&self, request: &CastRequest) -> Result<CastCost, QuoteError> {
        let metal_key = resolve(&request.metal_type, &request.karat);
        let spec = metal_key
            .as_ref()
            .and_then(|key| MetalSpec::standard(key.metal_type()?, key.karat()));

        let Some(spec) = spec else {
            tracing::debug!(
                metal_type = %request.metal_type,
                karat = %request.karat,
                "no reference spec; cast cost not computable"
            );
            return Ok(CastCost {
                metal_key,
                spec: None,
                metal_weight_grams: Decimal::ZERO,
                price_per_gram: Decimal::ZERO,
                total_cog: Decimal::ZERO,
            });
        };

        let price_per_gram = self
            .metal_prices
            .current_metal_prices()?
            .price_for(spec.family);
        let labor = request
            .labor_charge
            .unwrap_or(self.config.default_labor_charge);
        let volume = request.wax_volume_mm3.max(Decimal::ZERO);

        Ok(CastCost {
            metal_weight_grams: metal_weight_grams(volume, &spec),
            total_cog: compute_metal_cost(volume, &spec, price_per_gram, Some(labor)),
            price_per_gram,
            metal_key,
            spec: Some(spec),
        })
    }
}
