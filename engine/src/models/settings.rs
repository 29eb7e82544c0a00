//! Admin pricing settings
//!
//! Process-wide configuration supplied by the settings provider and
//! threaded explicitly through every calculation. Fields are optional on
//! purpose: an absent fee means the settings are **incomplete**, and the
//! engine refuses to price rather than substitute a default.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when admin settings cannot support a price
#[derive(Debug, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("Admin settings are not configured; cannot price this item until admin settings are complete")]
    MissingSettings,

    #[error("Admin pricing settings are not configured; cannot price this item until admin settings are complete")]
    MissingPricingSection,

    #[error("Admin pricing settings are incomplete; missing: {}", .fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },

    #[error("Rush settings are not configured")]
    MissingRushSettings,

    #[error("Invalid admin setting {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Failed to parse admin settings: {0}")]
    Parse(String),
}

/// Fee rates and markups used to turn cost into retail price
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSettings {
    /// Fractional administrative fee rate (e.g. 0.10)
    #[serde(default)]
    pub administrative_fee: Option<Decimal>,

    /// Fractional business fee rate
    #[serde(default)]
    pub business_fee: Option<Decimal>,

    /// Fractional consumables fee rate
    #[serde(default)]
    pub consumables_fee: Option<Decimal>,

    /// Multiplier (>= 1) applied to raw material cost before the business
    /// multiplier
    #[serde(default)]
    pub material_markup: Option<Decimal>,

    /// Hourly labor rate
    #[serde(default)]
    pub wage: Option<Decimal>,
}

impl PricingSettings {
    /// Fee fields that are absent, in canonical order
    pub fn missing_fee_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.administrative_fee.is_none() {
            missing.push("administrativeFee");
        }
        if self.business_fee.is_none() {
            missing.push("businessFee");
        }
        if self.consumables_fee.is_none() {
            missing.push("consumablesFee");
        }
        missing
    }

    /// `administrativeFee + businessFee + consumablesFee + 1`
    ///
    /// Every fee must be present and non-negative.
    pub fn business_multiplier(&self) -> Result<Decimal, ConfigurationError> {
        match (self.administrative_fee, self.business_fee, self.consumables_fee) {
            (Some(admin), Some(business), Some(consumables)) => {
                at_least("administrativeFee", admin, Decimal::ZERO)?;
                at_least("businessFee", business, Decimal::ZERO)?;
                at_least("consumablesFee", consumables, Decimal::ZERO)?;
                [admin, business, consumables]
                    .into_iter()
                    .try_fold(Decimal::ONE, |sum, fee| sum.checked_add(fee))
                    .ok_or_else(|| ConfigurationError::InvalidValue {
                        field: "businessMultiplier",
                        reason: "fee sum overflows".to_string(),
                    })
            }
            _ => Err(ConfigurationError::MissingFields {
                fields: self.missing_fee_fields(),
            }),
        }
    }

    /// Material markup, required for material lines and never below 1
    pub fn required_material_markup(&self) -> Result<Decimal, ConfigurationError> {
        let markup = self
            .material_markup
            .ok_or(ConfigurationError::MissingFields {
                fields: vec!["materialMarkup"],
            })?;
        at_least("materialMarkup", markup, Decimal::ONE)
    }

    /// Check value ranges of every field that is present
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let fees = [
            ("administrativeFee", self.administrative_fee),
            ("businessFee", self.business_fee),
            ("consumablesFee", self.consumables_fee),
            ("wage", self.wage),
        ];
        for (field, value) in fees {
            if let Some(value) = value {
                at_least(field, value, Decimal::ZERO)?;
            }
        }
        if let Some(markup) = self.material_markup {
            at_least("materialMarkup", markup, Decimal::ONE)?;
        }
        Ok(())
    }
}

fn at_least(
    field: &'static str,
    value: Decimal,
    min: Decimal,
) -> Result<Decimal, ConfigurationError> {
    if value < min {
        return Err(ConfigurationError::InvalidValue {
            field,
            reason: format!("must be >= {}, got {}", min, value),
        });
    }
    Ok(value)
}

/// Rush job capacity and surcharge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RushSettings {
    /// Maximum number of rush jobs open at once
    pub max_concurrent_rush_jobs: u32,

    /// Fractional surcharge on the subtotal (e.g. 0.5 = 50%)
    pub rush_rate: Decimal,
}

/// Complete admin settings document
///
/// # Example
/// ```
/// use repair_pricing_core_rs::AdminSettings;
/// use rust_decimal_macros::dec;
///
/// let settings = AdminSettings::from_json(r#"{
///     "pricing": {
///         "administrativeFee": 0.10,
///         "businessFee": 0.15,
///         "consumablesFee": 0.05,
///         "materialMarkup": 2.0
///     }
/// }"#).unwrap();
/// let multiplier = settings.pricing.unwrap().business_multiplier().unwrap();
/// assert_eq!(multiplier, dec!(1.30));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSettings {
    #[serde(default)]
    pub pricing: Option<PricingSettings>,

    #[serde(default, alias = "rushJobs")]
    pub rush: Option<RushSettings>,
}

impl AdminSettings {
    /// Parse and validate a JSON settings document
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let settings: AdminSettings =
            serde_json::from_str(json).map_err(|e| ConfigurationError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Pricing section, or an error if it is absent
    pub fn pricing(&self) -> Result<&PricingSettings, ConfigurationError> {
        self.pricing
            .as_ref()
            .ok_or(ConfigurationError::MissingPricingSection)
    }

    /// Rush section, or an error if it is absent
    pub fn rush(&self) -> Result<&RushSettings, ConfigurationError> {
        self.rush.as_ref().ok_or(ConfigurationError::MissingRushSettings)
    }

    /// Check value ranges of every field that is present
    ///
    /// Absent fields are not an error here; they fail at the point of use.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if let Some(pricing) = &self.pricing {
            pricing.validate()?;
        }
        if let Some(rush) = &self.rush {
            at_least("rushRate", rush.rush_rate, Decimal::ZERO)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_missing_fee_fields_lists_all() {
        let pricing = PricingSettings {
            business_fee: Some(dec!(0.15)),
            ..Default::default()
        };
        assert_eq!(
            pricing.missing_fee_fields(),
            vec!["administrativeFee", "consumablesFee"]
        );
        assert_eq!(
            pricing.business_multiplier(),
            Err(ConfigurationError::MissingFields {
                fields: vec!["administrativeFee", "consumablesFee"]
            })
        );
    }

    #[test]
    fn test_missing_fields_message_names_fields() {
        let err = ConfigurationError::MissingFields {
            fields: vec!["administrativeFee", "businessFee"],
        };
        assert_eq!(
            err.to_string(),
            "Admin pricing settings are incomplete; missing: administrativeFee, businessFee"
        );
    }

    #[test]
    fn test_validate_rejects_markup_below_one() {
        let settings = AdminSettings {
            pricing: Some(PricingSettings {
                material_markup: Some(dec!(0.8)),
                ..Default::default()
            }),
            rush: None,
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigurationError::InvalidValue { field: "materialMarkup", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_negative_fee() {
        let json = r#"{ "pricing": { "businessFee": -0.1 } }"#;
        assert!(matches!(
            AdminSettings::from_json(json),
            Err(ConfigurationError::InvalidValue { field: "businessFee", .. })
        ));
    }

    #[test]
    fn test_multiplier_checks_fee_ranges() {
        let pricing = PricingSettings {
            administrative_fee: Some(dec!(-2)),
            business_fee: Some(dec!(0.15)),
            consumables_fee: Some(dec!(0.05)),
            ..Default::default()
        };
        assert!(matches!(
            pricing.business_multiplier(),
            Err(ConfigurationError::InvalidValue { field: "administrativeFee", .. })
        ));

        let pricing = PricingSettings {
            material_markup: Some(dec!(0.5)),
            ..Default::default()
        };
        assert!(matches!(
            pricing.required_material_markup(),
            Err(ConfigurationError::InvalidValue { field: "materialMarkup", .. })
        ));
    }

    #[test]
    fn test_from_json_accepts_legacy_rush_section() {
        let json = r#"{ "rushJobs": { "maxConcurrentRushJobs": 3, "rushRate": 0.5 } }"#;
        let settings = AdminSettings::from_json(json).unwrap();
        assert_eq!(settings.rush().unwrap().max_concurrent_rush_jobs, 3);
        assert_eq!(settings.pricing(), Err(ConfigurationError::MissingPricingSection));
    }

    #[test]
    fn test_from_json_reports_parse_errors() {
        assert!(matches!(
            AdminSettings::from_json("{ not json"),
            Err(ConfigurationError::Parse(_))
        ));
    }
}
