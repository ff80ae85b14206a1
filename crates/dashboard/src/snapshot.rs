use crate::cards::{KpiCard, kpi_cards};
use crate::error::DashboardError;
use analytics::{
    AnalyticsError, Funnel, KpiSummary, MetricsEngine, RegionTotal, conversion_funnel,
    region_totals,
};
use chrono::{Days, Local, NaiveDate};
use configuration::{Config, DashboardSettings};
use core_types::{Channel, DailyRecord, RegionRecord};
use generator::{Dataset, DateWindow, SeriesGenerator};
use serde::{Deserialize, Serialize};

/// The filters a dashboard request can carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub channel: Channel,
}

/// Everything the dashboard renders for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    /// The date the underlying series ends on.
    pub as_of: NaiveDate,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub channel: Channel,
    pub daily: Vec<DailyRecord>,
    pub regions: Vec<RegionRecord>,
    /// `None` when the window holds no days.
    pub kpis: Option<KpiSummary>,
    pub cards: Vec<KpiCard>,
    pub funnel: Option<Funnel>,
    pub region_totals: Vec<RegionTotal>,
}

/// Ties the generator and the metrics engine together for request handling.
#[derive(Debug, Clone)]
pub struct Dashboard {
    generator: SeriesGenerator,
    metrics: MetricsEngine,
    settings: DashboardSettings,
}

impl Dashboard {
    pub fn new(config: &Config) -> Result<Self, DashboardError> {
        Ok(Self {
            generator: SeriesGenerator::new(&config.generator)?,
            metrics: MetricsEngine::new(config.placeholders.clone()),
            settings: config.dashboard.clone(),
        })
    }

    /// The window a query selects: missing starts fall back to the default
    /// lookback, missing ends to `today`.
    pub fn resolve_window(&self, today: NaiveDate, query: &DashboardQuery) -> DateWindow {
        let start = query.start_date.or_else(|| {
            today.checked_sub_days(Days::new(u64::from(self.settings.default_window_days)))
        });
        let end = query.end_date.or(Some(today));
        DateWindow::new(start, end)
    }

    pub fn snapshot(&self, query: &DashboardQuery) -> Result<DashboardSnapshot, DashboardError> {
        self.snapshot_as_of(Local::now().date_naive(), query)
    }

    pub fn snapshot_as_of(
        &self,
        today: NaiveDate,
        query: &DashboardQuery,
    ) -> Result<DashboardSnapshot, DashboardError> {
        let window = self.resolve_window(today, query);
        let Dataset { daily, regions } = self.dataset(today, window, query.channel)?;

        let kpis = match self.metrics.summarize(&daily) {
            Ok(summary) => Some(summary),
            Err(AnalyticsError::InsufficientData) => None,
            Err(e) => return Err(e.into()),
        };
        let cards = kpis.as_ref().map(kpi_cards).unwrap_or_default();
        let funnel = conversion_funnel(&daily, self.settings.completed_order_ratio);
        let region_totals = region_totals(&regions)?;

        Ok(DashboardSnapshot {
            as_of: today,
            start_date: window.start,
            end_date: window.end,
            channel: query.channel,
            daily,
            regions,
            kpis,
            cards,
            funnel,
            region_totals,
        })
    }

    /// The headline KPIs alone. Fails with `InsufficientData` on an empty window.
    pub fn kpis(&self, query: &DashboardQuery) -> Result<KpiSummary, DashboardError> {
        self.kpis_as_of(Local::now().date_naive(), query)
    }

    pub fn kpis_as_of(
        &self,
        today: NaiveDate,
        query: &DashboardQuery,
    ) -> Result<KpiSummary, DashboardError> {
        let window = self.resolve_window(today, query);
        let dataset = self.dataset(today, window, query.channel)?;
        Ok(self.metrics.summarize(&dataset.daily)?)
    }

    pub fn region_totals(&self, query: &DashboardQuery) -> Result<Vec<RegionTotal>, DashboardError> {
        self.region_totals_as_of(Local::now().date_naive(), query)
    }

    pub fn region_totals_as_of(
        &self,
        today: NaiveDate,
        query: &DashboardQuery,
    ) -> Result<Vec<RegionTotal>, DashboardError> {
        let window = self.resolve_window(today, query);
        let dataset = self.dataset(today, window, query.channel)?;
        Ok(region_totals(&dataset.regions)?)
    }

    fn dataset(
        &self,
        today: NaiveDate,
        window: DateWindow,
        channel: Channel,
    ) -> Result<Dataset, DashboardError> {
        if channel != Channel::All {
            // The synthetic series has no channel dimension.
            tracing::debug!(%channel, "Channel filter does not split the synthetic series.");
        }
        Ok(self.generator.generate_as_of(today, window)?)
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        let config = Config::default();
        Self {
            generator: SeriesGenerator::default(),
            metrics: MetricsEngine::new(config.placeholders),
            settings: config.dashboard,
        }
    }
}
