//! Rush capacity gate
//!
//! Admission check over a snapshot of the shared rush job counter, plus
//! the rush surcharge.
//!
//! The gate never changes the counter. Capacity is consumed when the
//! ticket storage layer persists a rush job; that layer owns atomic
//! increment and decrement. Pricing a rush quote and checking capacity are
//! independent operations.

use crate::core::money::non_negative;
use crate::models::settings::{AdminSettings, ConfigurationError, RushSettings};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Result of a capacity check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RushAdmission {
    pub allowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Rush surcharge for a subtotal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RushPricing {
    pub rush_fee: Decimal,
    pub rush_rate: Decimal,
}

/// Snapshot of rush capacity and the configured surcharge rate
///
/// # Example
/// ```
/// use repair_pricing_core_rs::RushCapacityGate;
/// use rust_decimal_macros::dec;
///
/// let gate = RushCapacityGate::new(4, 5, dec!(0.5));
/// assert!(gate.can_create().allowed);
///
/// let full = RushCapacityGate::new(5, 5, dec!(0.5));
/// assert!(!full.can_create().allowed);
///
/// assert_eq!(gate.calculate_rush_pricing(dec!(100)).rush_fee, dec!(50));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RushCapacityGate {
    current_rush_job_count: u32,
    max_concurrent_rush_jobs: u32,
    rush_rate: Decimal,
}

impl RushCapacityGate {
    /// Create a gate from a counter snapshot
    pub fn new(
        current_rush_job_count: u32,
        max_concurrent_rush_jobs: u32,
        rush_rate: Decimal,
    ) -> Self {
        Self {
            current_rush_job_count,
            max_concurrent_rush_jobs,
            rush_rate,
        }
    }

    /// Create a gate from a counter snapshot and the admin rush settings
    pub fn from_settings(current_rush_job_count: u32, rush: &RushSettings) -> Self {
        Self::new(
            current_rush_job_count,
            rush.max_concurrent_rush_jobs,
            rush.rush_rate,
        )
    }

    /// Gate used for pricing only, when no counter snapshot is at hand
    ///
    /// Capacity reads as empty; use it for `calculate_rush_pricing`.
    pub fn pricing_only(settings: Option<&AdminSettings>) -> Result<Self, ConfigurationError> {
        let settings = settings.ok_or(ConfigurationError::MissingSettings)?;
        Ok(Self::from_settings(0, settings.rush()?))
    }

    pub fn current_rush_job_count(&self) -> u32 {
        self.current_rush_job_count
    }

    pub fn max_concurrent_rush_jobs(&self) -> u32 {
        self.max_concurrent_rush_jobs
    }

    /// Rush slots still open
    pub fn remaining_capacity(&self) -> u32 {
        self.max_concurrent_rush_jobs
            .saturating_sub(self.current_rush_job_count)
    }

    /// Whether another rush job may be created
    pub fn can_create(&self) -> RushAdmission {
        if self.current_rush_job_count < self.max_concurrent_rush_jobs {
            RushAdmission {
                allowed: true,
                reason: None,
            }
        } else {
            tracing::debug!(
                current = self.current_rush_job_count,
                max = self.max_concurrent_rush_jobs,
                "rush capacity reached"
            );
            RushAdmission {
                allowed: false,
                reason: Some(format!(
                    "Maximum concurrent rush jobs ({}) reached; {} rush jobs are open",
                    self.max_concurrent_rush_jobs, self.current_rush_job_count
                )),
            }
        }
    }

    /// Rush surcharge: `subtotal * rush_rate`
    ///
    /// Saturates at `Decimal::MAX`; aggregation uses
    /// [`checked_rush_pricing`](Self::checked_rush_pricing) instead.
    pub fn calculate_rush_pricing(&self, subtotal: Decimal) -> RushPricing {
        RushPricing {
            rush_fee: non_negative(subtotal).saturating_mul(self.rush_rate),
            rush_rate: self.rush_rate,
        }
    }

    /// Rush surcharge, or `None` when the product overflows
    pub fn checked_rush_pricing(&self, subtotal: Decimal) -> Option<RushPricing> {
        Some(RushPricing {
            rush_fee: non_negative(subtotal).checked_mul(self.rush_rate)?,
            rush_rate: self.rush_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_capacity_boundary() {
        assert!(RushCapacityGate::new(2, 3, dec!(0.5)).can_create().allowed);

        let denied = RushCapacityGate::new(3, 3, dec!(0.5)).can_create();
        assert!(!denied.allowed);
        assert!(denied.reason.unwrap().contains("(3)"));
    }

    #[test]
    fn test_zero_capacity_denies() {
        let gate = RushCapacityGate::new(0, 0, dec!(0.5));
        assert!(!gate.can_create().allowed);
        assert_eq!(gate.remaining_capacity(), 0);
    }

    #[test]
    fn test_over_capacity_snapshot() {
        let gate = RushCapacityGate::new(7, 5, dec!(0.5));
        assert!(!gate.can_create().allowed);
        assert_eq!(gate.remaining_capacity(), 0);
    }

    #[test]
    fn test_pricing_is_independent_of_capacity() {
        let full = RushCapacityGate::new(5, 5, dec!(0.25));
        let pricing = full.calculate_rush_pricing(dec!(80));
        assert_eq!(pricing.rush_fee, dec!(20));
        assert_eq!(pricing.rush_rate, dec!(0.25));
        assert_eq!(full.current_rush_job_count(), 5);
    }

    #[test]
    fn test_rush_pricing_overflow() {
        let gate = RushCapacityGate::new(0, 5, dec!(2));
        assert!(gate.checked_rush_pricing(Decimal::MAX).is_none());
        assert_eq!(gate.calculate_rush_pricing(Decimal::MAX).rush_fee, Decimal::MAX);
        assert_eq!(
            gate.checked_rush_pricing(dec!(10)).map(|p| p.rush_fee),
            Some(dec!(20))
        );
    }

    #[test]
    fn test_pricing_only_requires_rush_settings() {
        assert_eq!(
            RushCapacityGate::pricing_only(Some(&AdminSettings::default())),
            Err(ConfigurationError::MissingRushSettings)
        );
        assert_eq!(
            RushCapacityGate::pricing_only(None),
            Err(ConfigurationError::MissingSettings)
        );
    }
}
