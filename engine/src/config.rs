//! Engine configuration
//!
//! Settings owned by the embedding service rather than by administrators.
//! Admin pricing settings are a separate document, see
//! [`crate::models::settings::AdminSettings`].

use crate::models::settings::ConfigurationError;
use crate::pricing::cog::DEFAULT_LABOR_CHARGE;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Engine-level configuration
///
/// # Example
/// ```
/// use repair_pricing_core_rs::EngineConfig;
/// use rust_decimal_macros::dec;
///
/// let config = EngineConfig::from_json(r#"{ "defaultLaborCharge": 20 }"#).unwrap();
/// assert_eq!(config.default_labor_charge, dec!(20));
///
/// let config = EngineConfig::from_json("{}").unwrap();
/// assert_eq!(config, EngineConfig::default());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Casting labor charge for COG requests that do not supply one
    pub default_labor_charge: Decimal,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_labor_charge: DEFAULT_LABOR_CHARGE,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config document
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| ConfigurationError::Parse(e.to_string()))?;
        if config.default_labor_charge < Decimal::ZERO {
            return Err(ConfigurationError::InvalidValue {
                field: "defaultLaborCharge",
                reason: format!("must be >= 0, got {}", config.default_labor_charge),
            });
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_negative_labor_charge() {
        assert!(matches!(
            EngineConfig::from_json(r#"{ "defaultLaborCharge": -1 }"#),
            Err(ConfigurationError::InvalidValue { field: "defaultLaborCharge", .. })
        ));
    }
}
