use crate::error::GeneratorError;
use crate::noise::NoiseStream;
use crate::util::{lag_backfill, linspace, rolling_mean_or_zero, round_half_even};
use crate::window::DateWindow;
use chrono::{Days, Local, NaiveDate};
use configuration::{GeneratorSettings, SeriesProfile};
use core_types::{DailyRecord, Region, RegionRecord};
use serde::{Deserialize, Serialize};

// Phase spans for the seasonal shapes: half, one and three cycles over the window.
const HALF_CYCLE: f64 = 3.14;
const FULL_CYCLE: f64 = 6.28;
const TRIPLE_CYCLE: f64 = 6.28 * 3.0;

/// The daily table and its regional revenue breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// One row per day, ascending.
    pub daily: Vec<DailyRecord>,
    /// Three rows per day, grouped by region in `Region::ALL` order.
    pub regions: Vec<RegionRecord>,
}

impl Dataset {
    pub fn is_empty(&self) -> bool {
        self.daily.is_empty()
    }
}

/// Builds the synthetic retail series.
///
/// The generator is immutable; every call re-seeds its own random source and
/// rebuilds the full trailing window before filtering, so different windows
/// always slice the same underlying series.
#[derive(Debug, Clone)]
pub struct SeriesGenerator {
    days: usize,
    seed: u64,
    profile: SeriesProfile,
}

impl Default for SeriesGenerator {
    fn default() -> Self {
        let settings = GeneratorSettings::default();
        Self {
            days: settings.days,
            seed: settings.seed,
            profile: settings.profile,
        }
    }
}

impl SeriesGenerator {
    pub fn new(settings: &GeneratorSettings) -> Result<Self, GeneratorError> {
        let profile = &settings.profile;
        if settings.days <= profile.forecast_lag {
            return Err(GeneratorError::InvalidProfile(format!(
                "{} days leave no lagged revenue for a {}-day forecast lag",
                settings.days, profile.forecast_lag
            )));
        }
        if profile.mape_window == 0 {
            return Err(GeneratorError::InvalidProfile(
                "MAPE window must be at least one day".to_string(),
            ));
        }
        if let Some((name, scale)) = profile
            .noise_scales()
            .into_iter()
            .find(|(_, scale)| scale.is_nan() || *scale < 0.0)
        {
            return Err(GeneratorError::InvalidProfile(format!(
                "{} must be a non-negative number, got {}",
                name, scale
            )));
        }
        if profile.session_jitter < 0 {
            return Err(GeneratorError::InvalidProfile(format!(
                "session jitter must not be negative, got {}",
                profile.session_jitter
            )));
        }

        Ok(Self {
            days: settings.days,
            seed: settings.seed,
            profile: profile.clone(),
        })
    }

    pub fn days(&self) -> usize {
        self.days
    }

    /// Generates the window ending on today's local date and filters it to the
    /// given inclusive bounds.
    pub fn generate(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Dataset, GeneratorError> {
        let today = Local::now().date_naive();
        self.generate_as_of(today, DateWindow::new(start_date, end_date))
    }

    /// Generates the window ending on `today` and filters it to `window`.
    pub fn generate_as_of(
        &self,
        today: NaiveDate,
        window: DateWindow,
    ) -> Result<Dataset, GeneratorError> {
        let full = self.build(today)?;

        let dataset = Dataset {
            daily: window.apply(full.daily),
            regions: window.apply(full.regions),
        };

        tracing::debug!(
            days = self.days,
            seed = self.seed,
            %today,
            start = ?window.start,
            end = ?window.end,
            daily_rows = dataset.daily.len(),
            region_rows = dataset.regions.len(),
            "Generated synthetic series."
        );

        Ok(dataset)
    }

    fn build(&self, today: NaiveDate) -> Result<Dataset, GeneratorError> {
        let n = self.days;
        let p = &self.profile;
        let dates = trailing_dates(today, n)?;

        // Draw order is fixed; see `NoiseStream`.
        let mut noise = NoiseStream::seeded(self.seed);
        let revenue_noise = noise.gaussian(p.revenue_noise, n)?;
        let session_jitter = if p.session_jitter == 0 {
            vec![0; n]
        } else {
            noise.uniform_int(-p.session_jitter, p.session_jitter, n)?
        };
        let conversion_noise = noise.gaussian(p.conversion_noise, n)?;
        let aov_noise = noise.gaussian(p.aov_noise, n)?;
        let region_noise = Region::ALL
            .iter()
            .map(|_| noise.gaussian(p.region_noise, n))
            .collect::<Result<Vec<_>, _>>()?;
        let turnover_noise = noise.gaussian(p.turnover_noise, n)?;
        let stockout_noise = noise.gaussian(p.stockout_noise, n)?;
        let nps_noise = noise.gaussian(p.nps_noise, n)?;
        let forecast_noise = noise.gaussian(p.forecast_noise, n)?;

        let half = linspace(0.0, HALF_CYCLE, n);
        let full = linspace(0.0, FULL_CYCLE, n);
        let triple = linspace(0.0, TRIPLE_CYCLE, n);

        let revenue: Vec<f64> = (0..n)
            .map(|i| {
                let seasonality = 1.0 + p.revenue_seasonality * triple[i].sin();
                round_half_even(p.base_revenue * seasonality * (1.0 + revenue_noise[i]), 0)
            })
            .collect();

        let forecast: Vec<f64> = lag_backfill(&revenue, p.forecast_lag)
            .into_iter()
            .zip(&forecast_noise)
            .map(|(lagged, draw)| lagged * (1.0 + draw))
            .collect();

        let abs_pct_error: Vec<f64> = revenue
            .iter()
            .zip(&forecast)
            .map(|(actual, predicted)| (actual - predicted).abs() / actual)
            .collect();
        let mape = rolling_mean_or_zero(&abs_pct_error, p.mape_window)?;

        let daily = (0..n)
            .map(|i| {
                let sessions = (p.session_baseline * (1.0 + p.session_amplitude * half[i].sin())
                    + session_jitter[i] as f64) as i64;
                let conversion_rate = p.conversion_base
                    + p.conversion_amplitude * full[i].cos()
                    + conversion_noise[i];

                DailyRecord {
                    date: dates[i],
                    revenue: revenue[i],
                    sessions,
                    conversion_rate,
                    orders: expected_orders(sessions, conversion_rate),
                    aov: round_half_even(
                        p.aov_base + p.aov_amplitude * half[i].cos() + aov_noise[i],
                        2,
                    ),
                    inventory_turnover: p.turnover_base
                        + p.turnover_amplitude * full[i].sin()
                        + turnover_noise[i],
                    stockout_rate: p.stockout_base
                        + p.stockout_amplitude * full[i].cos()
                        + stockout_noise[i],
                    nps: p.nps_base + p.nps_amplitude * half[i].sin() + nps_noise[i],
                    forecast: forecast[i],
                    mape: mape[i],
                }
            })
            .collect();

        let regions = Region::ALL
            .iter()
            .zip(&region_noise)
            .flat_map(|(&region, draws)| {
                let share = p.region_shares.share(region);
                dates
                    .iter()
                    .zip(&revenue)
                    .zip(draws)
                    .map(move |((&date, &day_revenue), draw)| RegionRecord {
                        date,
                        region,
                        revenue: day_revenue * share * (1.0 + draw),
                    })
            })
            .collect();

        Ok(Dataset { daily, regions })
    }
}

/// Orders implied by a day's traffic and conversion, rounding halves to even.
pub fn expected_orders(sessions: i64, conversion_rate: f64) -> i64 {
    (sessions as f64 * conversion_rate).round_ties_even() as i64
}

fn trailing_dates(end: NaiveDate, days: usize) -> Result<Vec<NaiveDate>, GeneratorError> {
    let out_of_range = || GeneratorError::DateOutOfRange { end, days };
    let span = days.checked_sub(1).ok_or_else(out_of_range)? as u64;
    let first = end
        .checked_sub_days(Days::new(span))
        .ok_or_else(out_of_range)?;
    Ok(first.iter_days().take(days).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    fn full_dataset() -> Dataset {
        SeriesGenerator::default()
            .generate_as_of(today(), DateWindow::unbounded())
            .unwrap()
    }

    #[test]
    fn test_dates_are_contiguous_and_end_today() {
        let data = full_dataset();
        assert_eq!(data.daily.len(), 180);
        assert_eq!(data.daily.last().unwrap().date, today());
        assert_eq!(
            data.daily.first().unwrap().date,
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
        );
        for pair in data.daily.windows(2) {
            assert_eq!(pair[0].date.succ_opt().unwrap(), pair[1].date);
        }
    }

    #[test]
    fn test_three_region_rows_per_day() {
        let data = full_dataset();
        assert_eq!(data.regions.len(), data.daily.len() * 3);

        let mut per_date: HashMap<NaiveDate, Vec<Region>> = HashMap::new();
        for row in &data.regions {
            per_date.entry(row.date).or_default().push(row.region);
        }
        assert_eq!(per_date.len(), data.daily.len());
        for regions in per_date.values() {
            let mut regions = regions.clone();
            regions.sort();
            assert_eq!(regions, Region::ALL.to_vec());
        }
    }

    #[test]
    fn test_region_rows_are_grouped_by_region() {
        let data = full_dataset();
        let n = data.daily.len();
        for (block, region) in Region::ALL.iter().enumerate() {
            let rows = &data.regions[block * n..(block + 1) * n];
            assert!(rows.iter().all(|r| r.region == *region));
            assert_eq!(rows[0].date, data.daily[0].date);
        }
    }

    #[test]
    fn test_orders_follow_sessions_and_conversion() {
        for row in full_dataset().daily {
            assert_eq!(
                row.orders,
                (row.sessions as f64 * row.conversion_rate).round_ties_even() as i64
            );
        }
    }

    #[test]
    fn test_mape_warm_up_rows_are_zero() {
        let data = full_dataset();
        assert!(data.daily[..13].iter().all(|row| row.mape == 0.0));
        assert!(data.daily[13..].iter().all(|row| row.mape > 0.0));
    }

    #[test]
    fn test_mape_matches_trailing_window() {
        let data = full_dataset();
        let ape: Vec<f64> = data
            .daily
            .iter()
            .map(|r| (r.revenue - r.forecast).abs() / r.revenue)
            .collect();
        let expected = ape[6..20].iter().sum::<f64>() / 14.0;
        assert!((data.daily[19].mape - expected).abs() < 1e-12);
    }

    #[test]
    fn test_forecast_uses_revenue_from_a_week_earlier() {
        let data = full_dataset();
        // The forecast noise is 3%, so each forecast stays well within 20% of its source.
        for (i, row) in data.daily.iter().enumerate() {
            let source = data.daily[i.saturating_sub(7)].revenue;
            assert!((row.forecast / source - 1.0).abs() < 0.2);
        }
    }

    #[test]
    fn test_revenue_is_whole_and_positive() {
        for row in full_dataset().daily {
            assert!(row.revenue > 0.0);
            assert_eq!(row.revenue, row.revenue.round());
            assert_eq!(row.aov, (row.aov * 100.0).round() / 100.0);
            assert!(row.sessions >= 0);
        }
    }

    #[test]
    fn test_unbounded_generation_is_reproducible() {
        let first = full_dataset();
        let second = full_dataset();
        for (a, b) in first.daily.iter().zip(&second.daily) {
            assert_eq!(a.revenue.to_bits(), b.revenue.to_bits());
            assert_eq!(a.sessions, b.sessions);
            assert_eq!(a.conversion_rate.to_bits(), b.conversion_rate.to_bits());
        }
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seed_changes_series() {
        let settings = GeneratorSettings {
            seed: 7,
            ..GeneratorSettings::default()
        };
        let other = SeriesGenerator::new(&settings)
            .unwrap()
            .generate_as_of(today(), DateWindow::unbounded())
            .unwrap();
        assert_ne!(other.daily, full_dataset().daily);
    }

    #[test]
    fn test_windows_slice_the_same_series() {
        let full = full_dataset();
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
        let sliced = SeriesGenerator::default()
            .generate_as_of(today(), DateWindow::new(Some(start), Some(end)))
            .unwrap();

        assert_eq!(sliced.daily.len(), 31);
        assert_eq!(sliced.regions.len(), 93);
        assert!(sliced.daily.iter().all(|r| r.date >= start && r.date <= end));
        assert!(sliced.regions.iter().all(|r| r.date >= start && r.date <= end));

        let expected: Vec<&DailyRecord> = full
            .daily
            .iter()
            .filter(|r| r.date >= start && r.date <= end)
            .collect();
        assert_eq!(sliced.daily.iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_window_outside_span_is_empty() {
        let start = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        let data = SeriesGenerator::default()
            .generate_as_of(today(), DateWindow::new(Some(start), None))
            .unwrap();
        assert!(data.is_empty());
        assert!(data.regions.is_empty());
    }

    #[test]
    fn test_profile_too_short_for_forecast_lag() {
        let settings = GeneratorSettings {
            days: 7,
            ..GeneratorSettings::default()
        };
        assert!(matches!(
            SeriesGenerator::new(&settings),
            Err(GeneratorError::InvalidProfile(_))
        ));
    }

    #[test]
    fn test_negative_noise_is_rejected_at_construction() {
        let mut settings = GeneratorSettings::default();
        settings.profile.nps_noise = -1.0;
        assert!(matches!(
            SeriesGenerator::new(&settings),
            Err(GeneratorError::InvalidProfile(ref msg)) if msg.contains("nps_noise")
        ));

        let mut settings = GeneratorSettings::default();
        settings.profile.session_jitter = -1;
        assert!(SeriesGenerator::new(&settings).is_err());
    }

    #[test]
    fn test_wall_clock_generation_ends_today() {
        let data = SeriesGenerator::default().generate(None, None).unwrap();
        let last = data.daily.last().unwrap().date;
        let today = Local::now().date_naive();
        // Tolerate a midnight rollover between the two clock reads.
        assert!(last == today || last.succ_opt() == Some(today));
    }

    #[test]
    fn test_wall_clock_generation_applies_both_bounds() {
        let today = Local::now().date_naive();
        let start = today.checked_sub_days(Days::new(10)).unwrap();
        let end = today.checked_sub_days(Days::new(3)).unwrap();

        let data = SeriesGenerator::default()
            .generate(Some(start), Some(end))
            .unwrap();

        assert_eq!(data.daily.len(), 8);
        assert_eq!(data.regions.len(), 24);
        assert_eq!(data.daily.first().unwrap().date, start);
        assert_eq!(data.daily.last().unwrap().date, end);
        assert!(data.regions.iter().all(|r| r.date >= start && r.date <= end));
    }
}
