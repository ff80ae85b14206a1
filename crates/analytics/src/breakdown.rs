use crate::engine::to_decimal;
use crate::error::AnalyticsError;
use core_types::{DailyRecord, Region, RegionRecord};
use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Revenue attributed to one region over a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionTotal {
    pub region: Region,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    /// Share of the window's regional revenue, in percent.
    #[serde(with = "rust_decimal::serde::float")]
    pub share_pct: Decimal,
}

/// Sums regional revenue per region, in `Region::ALL` order.
///
/// Regions without rows are reported with zero revenue. Revenue is rounded to
/// cents and shares to 2 decimals after the totals are taken.
pub fn region_totals(rows: &[RegionRecord]) -> Result<Vec<RegionTotal>, AnalyticsError> {
    let mut sums = [Decimal::ZERO; 3];
    for row in rows {
        let slot = match row.region {
            Region::Americas => 0,
            Region::Emea => 1,
            Region::Apac => 2,
        };
        sums[slot] = sums[slot]
            .checked_add(to_decimal(row.revenue, "region revenue")?)
            .ok_or_else(|| AnalyticsError::Overflow("region revenue".to_string()))?;
    }

    let grand_total = sums.iter().try_fold(Decimal::ZERO, |acc, sum| {
        acc.checked_add(*sum)
            .ok_or_else(|| AnalyticsError::Overflow("region revenue".to_string()))
    })?;

    Region::ALL
        .iter()
        .zip(sums)
        .map(|(&region, revenue)| {
            let share_pct = if grand_total.is_zero() {
                Decimal::ZERO
            } else {
                revenue
                    .checked_div(grand_total)
                    .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                    .ok_or_else(|| AnalyticsError::Overflow("region share".to_string()))?
                    .round_dp(2)
            };
            Ok(RegionTotal {
                region,
                revenue: revenue.round_dp(2),
                share_pct,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub label: String,
    pub value: i64,
    /// Percent of the first stage, 1 decimal.
    #[serde(with = "rust_decimal::serde::float")]
    pub pct_of_initial: Decimal,
}

/// Sessions → orders → completed orders for the last day of a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Funnel {
    pub stages: Vec<FunnelStage>,
}

/// Builds the conversion funnel from the most recent record.
///
/// Completed orders are `orders × completed_ratio`, truncated toward zero.
/// Returns `None` when there are no records.
pub fn conversion_funnel(daily: &[DailyRecord], completed_ratio: Decimal) -> Option<Funnel> {
    let latest = daily.last()?;
    let completed = (Decimal::from(latest.orders) * completed_ratio)
        .trunc()
        .to_i64()
        .unwrap_or_default();

    let initial = Decimal::from(latest.sessions);
    let stages = [
        ("Sessions", latest.sessions),
        ("Orders", latest.orders),
        ("Completed Orders", completed),
    ]
    .into_iter()
    .map(|(label, value)| FunnelStage {
        label: label.to_string(),
        value,
        pct_of_initial: if initial.is_zero() {
            Decimal::ZERO
        } else {
            (Decimal::from(value) / initial * Decimal::ONE_HUNDRED).round_dp(1)
        },
    })
    .collect();

    Some(Funnel { stages })
}
