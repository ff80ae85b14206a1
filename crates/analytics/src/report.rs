use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The six headline KPIs for a window of daily records.
///
/// This struct is the output of the `MetricsEngine` and is rendered by the
/// dashboard as one card per field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    /// Sum of daily revenue over the window.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    /// Percent change from the first to the last day's revenue, 2 decimals.
    #[serde(with = "rust_decimal::serde::float")]
    pub yoy_growth_pct: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub digital_share_pct: Decimal, // placeholder, not derived from the records
    #[serde(with = "rust_decimal::serde::float")]
    pub clv: Decimal, // placeholder, not derived from the records
    /// NPS of the last day, 1 decimal.
    #[serde(with = "rust_decimal::serde::float")]
    pub nps_latest: Decimal,
    /// Mean inventory turnover, 2 decimals.
    #[serde(with = "rust_decimal::serde::float")]
    pub inventory_turnover_avg: Decimal,
}
