//! Billing cost model.
//!
//! `energy = m³ × conversion`, then a variable part, a per-day fixed part and
//! a consumption levy make up the subtotal, and VAT is charged on top.

use serde::{Deserialize, Serialize};

use super::TariffConfig;

/// Itemised cost for a consumption delta.
///
/// `tax` is the consumption levy and `vat` is charged on the subtotal. They
/// are reported separately; use [`CostBreakdown::total_tax`] for the combined
/// figure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// kWh-equivalent
    pub energy: f64,
    pub variable: f64,
    pub fixed: f64,
    pub tax: f64,
    pub vat: f64,
    pub total: f64,
}

impl CostBreakdown {
    /// Variable + fixed + levy, before VAT.
    pub fn subtotal(&self) -> f64 {
        self.variable + self.fixed + self.tax
    }

    /// Levy and VAT together.
    pub fn total_tax(&self) -> f64 {
        self.tax + self.vat
    }
}

/// Cost of `usage_m3` consumed over `elapsed_days`.
///
/// Negative usage is a meter anomaly, not a credit, and costs nothing.
pub fn cost(usage_m3: f64, elapsed_days: f64, tariff: &TariffConfig) -> f64 {
    if usage_m3 < 0.0 {
        return 0.0;
    }
    let energy = usage_m3 * tariff.conversion_factor;
    let variable = energy * tariff.unit_price;
    let fixed = elapsed_days * tariff.daily_fixed_charge;
    let tax = energy * tariff.tax_rate;
    (variable + fixed + tax) * (1.0 + tariff.vat_rate)
}

/// Same as [`cost`] but itemised.
pub fn breakdown(usage_m3: f64, elapsed_days: f64, tariff: &TariffConfig) -> CostBreakdown {
    if usage_m3 < 0.0 {
        return CostBreakdown::default();
    }
    let energy = usage_m3 * tariff.conversion_factor;
    let variable = energy * tariff.unit_price;
    let fixed = elapsed_days * tariff.daily_fixed_charge;
    let tax = energy * tariff.tax_rate;
    let subtotal = variable + fixed + tax;
    let vat = subtotal * tariff.vat_rate;

    CostBreakdown {
        energy,
        variable,
        fixed,
        tax,
        vat,
        total: subtotal + vat,
    }
}
