use crate::error::AnalyticsError;
use crate::report::KpiSummary;
use configuration::Placeholders;
use core_types::DailyRecord;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// A stateless calculator for the dashboard's headline KPIs.
#[derive(Debug, Clone, Default)]
pub struct MetricsEngine {
    placeholders: Placeholders,
}

impl MetricsEngine {
    pub fn new(placeholders: Placeholders) -> Self {
        Self { placeholders }
    }

    /// Summarizes a window of daily records.
    ///
    /// # Arguments
    ///
    /// * `daily` - Daily records in ascending date order. The first and last
    ///   entries are treated as the start and end of the window.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `KpiSummary`, or `AnalyticsError::InsufficientData`
    /// when `daily` is empty.
    pub fn summarize(&self, daily: &[DailyRecord]) -> Result<KpiSummary, AnalyticsError> {
        let (first, last) = match (daily.first(), daily.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(AnalyticsError::InsufficientData),
        };

        let total_revenue = checked_sum(daily.iter().map(|r| r.revenue), "revenue")?;

        let summary = KpiSummary {
            total_revenue,
            yoy_growth_pct: self.growth_pct(first, last)?,
            digital_share_pct: self.placeholders.digital_share_pct,
            clv: self.placeholders.clv,
            nps_latest: to_decimal(last.nps, "nps")?.round_dp(1),
            inventory_turnover_avg: self.mean_turnover(daily)?,
        };

        tracing::debug!(
            records = daily.len(),
            total_revenue = %summary.total_revenue,
            yoy_growth_pct = %summary.yoy_growth_pct,
            "Computed KPI summary."
        );

        Ok(summary)
    }

    /// Growth from the first to the last day. The denominator is floored at 1
    /// so a zero or negative opening day cannot divide by zero.
    fn growth_pct(
        &self,
        first: &DailyRecord,
        last: &DailyRecord,
    ) -> Result<Decimal, AnalyticsError> {
        let opening = to_decimal(first.revenue, "revenue")?;
        let closing = to_decimal(last.revenue, "revenue")?;
        let growth = closing
            .checked_sub(opening)
            .and_then(|delta| delta.checked_div(opening.max(Decimal::ONE)))
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or_else(|| AnalyticsError::Overflow("yoy_growth_pct".to_string()))?;
        Ok(growth.round_dp(2))
    }

    fn mean_turnover(&self, daily: &[DailyRecord]) -> Result<Decimal, AnalyticsError> {
        let sum = checked_sum(
            daily.iter().map(|r| r.inventory_turnover),
            "inventory_turnover",
        )?;
        Ok((sum / Decimal::from(daily.len())).round_dp(2))
    }
}

pub(crate) fn to_decimal(value: f64, field: &str) -> Result<Decimal, AnalyticsError> {
    Decimal::from_f64(value).ok_or_else(|| AnalyticsError::Unrepresentable {
        field: field.to_string(),
        value,
    })
}

/// Sums `values` as decimals, failing instead of panicking when the total
/// leaves the decimal range.
pub(crate) fn checked_sum(
    values: impl IntoIterator<Item = f64>,
    field: &str,
) -> Result<Decimal, AnalyticsError> {
    values.into_iter().try_fold(Decimal::ZERO, |acc, value| {
        acc.checked_add(to_decimal(value, field)?)
            .ok_or_else(|| AnalyticsError::Overflow(field.to_string()))
    })
}
