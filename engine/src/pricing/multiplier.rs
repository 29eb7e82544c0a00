//! Business multiplier and markup pipeline
//!
//! Retail price = base price x business multiplier, where
//! `business multiplier = administrativeFee + businessFee + consumablesFee + 1`.
//!
//! Materials pass through a separate material markup stage first. The two
//! stages stay distinct: folding them into one factor changes historical
//! price levels.
//!
//! # Critical Invariant
//!
//! Missing or incomplete settings are a [`ConfigurationError`]. There is no
//! default multiplier. Callers that need a price preview without complete
//! settings use [`preview_multiplier`], which returns `None` instead of a
//! number.

use crate::models::item::ItemKind;
use crate::models::settings::{AdminSettings, ConfigurationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a markup stage
#[derive(Debug, Error, PartialEq)]
pub enum MarkupError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("{price} x {factor} exceeds the representable range")]
    Overflow { price: Decimal, factor: Decimal },
}

fn checked_product(price: Decimal, factor: Decimal) -> Result<Decimal, MarkupError> {
    price
        .checked_mul(factor)
        .ok_or(MarkupError::Overflow { price, factor })
}

/// Apply the business multiplier to a base price
///
/// A zero base returns zero without consulting the settings.
///
/// # Errors
/// - `MissingSettings` / `MissingPricingSection` when settings are absent
/// - `MissingFields` naming every absent fee
/// - `InvalidValue` for a negative fee, or a base so large the product
///   overflows
///
/// # Example
/// ```
/// use repair_pricing_core_rs::{apply_multiplier, AdminSettings, PricingSettings};
/// use rust_decimal_macros::dec;
///
/// let settings = AdminSettings {
///     pricing: Some(PricingSettings {
///         administrative_fee: Some(dec!(0.10)),
///         business_fee: Some(dec!(0.15)),
///         consumables_fee: Some(dec!(0.05)),
///         ..Default::default()
///     }),
///     rush: None,
/// };
/// assert_eq!(apply_multiplier(dec!(24.55), Some(&settings)).unwrap(), dec!(31.915));
/// assert_eq!(apply_multiplier(dec!(0), None).unwrap(), dec!(0));
/// assert!(apply_multiplier(dec!(10), None).is_err());
/// ```
pub fn apply_multiplier(
    base_price: Decimal,
    settings: Option<&AdminSettings>,
) -> Result<Decimal, ConfigurationError> {
    if base_price.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let multiplier = business_multiplier(settings)?;
    base_price
        .checked_mul(multiplier)
        .ok_or_else(|| ConfigurationError::InvalidValue {
            field: "businessMultiplier",
            reason: format!("{} x {} overflows", base_price, multiplier),
        })
}

/// Business multiplier from settings, or the configuration error
pub fn business_multiplier(
    settings: Option<&AdminSettings>,
) -> Result<Decimal, ConfigurationError> {
    let settings = settings.ok_or(ConfigurationError::MissingSettings)?;
    settings.pricing()?.business_multiplier()
}

/// Dry-run variant of [`apply_multiplier`]
///
/// Returns `None` when the settings cannot support a price. Meant for
/// screens that render "not yet priceable" (such as the settings editor);
/// it never substitutes a numeric fallback.
pub fn preview_multiplier(
    base_price: Decimal,
    settings: Option<&AdminSettings>,
) -> Option<Decimal> {
    apply_multiplier(base_price, settings).ok()
}

/// A named stage in the markup pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkupStage {
    /// `cost * materialMarkup`
    MaterialMarkup,
    /// `price * business multiplier`
    BusinessMultiplier,
}

const MATERIAL_STAGES: &[MarkupStage] = &[
    MarkupStage::MaterialMarkup,
    MarkupStage::BusinessMultiplier,
];
const LABOR_STAGES: &[MarkupStage] = &[MarkupStage::BusinessMultiplier];

/// Markup stages for an item kind, in application order
pub fn stages_for(kind: ItemKind) -> &'static [MarkupStage] {
    match kind {
        ItemKind::Material => MATERIAL_STAGES,
        ItemKind::Task | ItemKind::Process | ItemKind::Custom => LABOR_STAGES,
    }
}

impl MarkupStage {
    /// Apply this stage to a price
    pub fn apply(
        &self,
        price: Decimal,
        settings: Option<&AdminSettings>,
    ) -> Result<Decimal, MarkupError> {
        if price.is_zero() {
            return Ok(Decimal::ZERO);
        }
        let settings = settings.ok_or(ConfigurationError::MissingSettings)?;
        let factor = match self {
            MarkupStage::MaterialMarkup => settings.pricing()?.required_material_markup()?,
            MarkupStage::BusinessMultiplier => business_multiplier(Some(settings))?,
        };
        checked_product(price, factor)
    }
}

/// Run a base price through every stage for its item kind
pub fn apply_markup(
    kind: ItemKind,
    base_price: Decimal,
    settings: Option<&AdminSettings>,
) -> Result<Decimal, MarkupError> {
    stages_for(kind)
        .iter()
        .try_fold(base_price, |price, stage| stage.apply(price, settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::PricingSettings;
    use rust_decimal_macros::dec;

    fn settings() -> AdminSettings {
        AdminSettings {
            pricing: Some(PricingSettings {
                administrative_fee: Some(dec!(0.10)),
                business_fee: Some(dec!(0.15)),
                consumables_fee: Some(dec!(0.05)),
                material_markup: Some(dec!(2)),
                wage: Some(dec!(45)),
            }),
            rush: None,
        }
    }

    #[test]
    fn test_zero_base_ignores_missing_settings() {
        assert_eq!(apply_multiplier(Decimal::ZERO, None), Ok(Decimal::ZERO));
        let empty = AdminSettings::default();
        assert_eq!(apply_multiplier(Decimal::ZERO, Some(&empty)), Ok(Decimal::ZERO));
    }

    #[test]
    fn test_missing_settings_errors() {
        assert_eq!(
            apply_multiplier(dec!(10), None),
            Err(ConfigurationError::MissingSettings)
        );
        assert_eq!(
            apply_multiplier(dec!(10), Some(&AdminSettings::default())),
            Err(ConfigurationError::MissingPricingSection)
        );
    }

    #[test]
    fn test_preview_returns_none_instead_of_fallback() {
        assert_eq!(preview_multiplier(dec!(10), None), None);
        assert_eq!(preview_multiplier(dec!(10), Some(&settings())), Some(dec!(13)));
    }

    #[test]
    fn test_material_goes_through_both_stages() {
        // 10 * 2 (material markup) * 1.30 (business multiplier)
        let price = apply_markup(ItemKind::Material, dec!(10), Some(&settings())).unwrap();
        assert_eq!(price, dec!(26));
    }

    #[test]
    fn test_labor_kinds_skip_material_markup() {
        for kind in [ItemKind::Task, ItemKind::Process, ItemKind::Custom] {
            let price = apply_markup(kind, dec!(10), Some(&settings())).unwrap();
            assert_eq!(price, dec!(13));
        }
    }

    #[test]
    fn test_material_requires_markup() {
        let mut settings = settings();
        settings.pricing.as_mut().unwrap().material_markup = None;
        assert_eq!(
            apply_markup(ItemKind::Material, dec!(10), Some(&settings)),
            Err(MarkupError::Configuration(ConfigurationError::MissingFields {
                fields: vec!["materialMarkup"]
            }))
        );
    }

    #[test]
    fn test_negative_fee_rejected_without_validate() {
        let mut settings = settings();
        settings.pricing.as_mut().unwrap().administrative_fee = Some(dec!(-2));
        assert!(matches!(
            apply_multiplier(dec!(100), Some(&settings)),
            Err(ConfigurationError::InvalidValue { field: "administrativeFee", .. })
        ));
    }

    #[test]
    fn test_markup_overflow_is_an_error() {
        assert!(matches!(
            apply_markup(ItemKind::Material, Decimal::MAX, Some(&settings())),
            Err(MarkupError::Overflow { .. })
        ));
        assert!(matches!(
            apply_multiplier(Decimal::MAX, Some(&settings())),
            Err(ConfigurationError::InvalidValue { field: "businessMultiplier", .. })
        ));
    }
}
