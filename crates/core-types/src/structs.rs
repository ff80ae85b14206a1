use crate::enums::Region;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One simulated trading day of retail KPIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    /// Whole-unit revenue for the day.
    pub revenue: f64,
    pub sessions: i64,
    /// Fraction of sessions that converted. Noise is not clamped, so this may dip below zero.
    pub conversion_rate: f64,
    pub orders: i64,
    /// Average order value.
    pub aov: f64,
    pub inventory_turnover: f64,
    pub stockout_rate: f64,
    pub nps: f64,
    /// Lagged revenue used as a naive model forecast.
    pub forecast: f64,
    /// Rolling mean absolute percentage error of `forecast` against `revenue`.
    pub mape: f64,
}

/// The share of a single day's revenue attributed to one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub date: NaiveDate,
    pub region: Region,
    pub revenue: f64,
}
