//! Tariff configuration and the billing cost model.

mod cost;

pub use cost::{breakdown, cost, CostBreakdown};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Billing parameters for one supply contract.
///
/// Read-only input to the cost model for the duration of a computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffConfig {
    /// Price per kWh-equivalent
    #[serde(default = "default_unit_price")]
    pub unit_price: f64,
    /// Fixed charge per day of supply
    #[serde(default = "default_daily_fixed_charge")]
    pub daily_fixed_charge: f64,
    /// m³ to kWh-equivalent
    #[serde(default = "default_conversion_factor")]
    pub conversion_factor: f64,
    /// Consumption levy per kWh-equivalent
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
    /// VAT applied on the subtotal
    #[serde(default = "default_vat_rate")]
    pub vat_rate: f64,
}

fn default_unit_price() -> f64 {
    0.04293925
}
fn default_daily_fixed_charge() -> f64 {
    0.26663
}
fn default_conversion_factor() -> f64 {
    10.9130
}
fn default_tax_rate() -> f64 {
    0.00234
}
fn default_vat_rate() -> f64 {
    0.21
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            unit_price: default_unit_price(),
            daily_fixed_charge: default_daily_fixed_charge(),
            conversion_factor: default_conversion_factor(),
            tax_rate: default_tax_rate(),
            vat_rate: default_vat_rate(),
        }
    }
}

impl TariffConfig {
    /// Check every rate is finite and non-negative.
    ///
    /// # Errors
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("unit_price", self.unit_price),
            ("daily_fixed_charge", self.daily_fixed_charge),
            ("conversion_factor", self.conversion_factor),
            ("tax_rate", self.tax_rate),
            ("vat_rate", self.vat_rate),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::invalid(
                    name,
                    format!("expected a finite non-negative number, got {value}"),
                ));
            }
        }
        Ok(())
    }

    /// Cost of `usage_m3` over `elapsed_days` under this tariff.
    pub fn cost(&self, usage_m3: f64, elapsed_days: f64) -> f64 {
        cost(usage_m3, elapsed_days, self)
    }

    /// Itemised cost of `usage_m3` over `elapsed_days` under this tariff.
    pub fn breakdown(&self, usage_m3: f64, elapsed_days: f64) -> CostBreakdown {
        breakdown(usage_m3, elapsed_days, self)
    }
}
