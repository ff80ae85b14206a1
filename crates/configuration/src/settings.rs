use crate::error::ConfigError;
use core_types::Region;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::net::SocketAddr;

/// The root configuration structure for the entire application.
///
/// Every section falls back to its defaults, so an absent `config.toml`
/// yields the stock 180-day demo series.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generator: GeneratorSettings,
    pub placeholders: Placeholders,
    pub dashboard: DashboardSettings,
    pub server: ServerSettings,
    pub logging: LoggingSettings,
}

/// Contains parameters for the synthetic series generator.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Number of trailing calendar days to synthesize, ending today.
    pub days: usize,
    /// Seed for the per-call random source.
    pub seed: u64,
    pub profile: SeriesProfile,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            days: 180,
            seed: 42,
            profile: SeriesProfile::default(),
        }
    }
}

/// The baselines, amplitudes and noise scales that shape each synthetic column.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SeriesProfile {
    pub base_revenue: f64,
    /// Relative amplitude of the revenue seasonality (0.15 means ±15%).
    pub revenue_seasonality: f64,
    /// Standard deviation of the multiplicative revenue noise.
    pub revenue_noise: f64,

    pub session_baseline: f64,
    pub session_amplitude: f64,
    /// Sessions receive a uniform integer jitter in `[-jitter, jitter)`.
    pub session_jitter: i64,

    pub conversion_base: f64,
    pub conversion_amplitude: f64,
    pub conversion_noise: f64,

    pub aov_base: f64,
    pub aov_amplitude: f64,
    pub aov_noise: f64,

    pub region_shares: RegionShares,
    pub region_noise: f64,

    pub turnover_base: f64,
    pub turnover_amplitude: f64,
    pub turnover_noise: f64,

    pub stockout_base: f64,
    pub stockout_amplitude: f64,
    pub stockout_noise: f64,

    pub nps_base: f64,
    pub nps_amplitude: f64,
    pub nps_noise: f64,

    /// How many days revenue is shifted back to form the forecast.
    pub forecast_lag: usize,
    pub forecast_noise: f64,
    /// Width of the rolling MAPE window, in days.
    pub mape_window: usize,
}

impl Default for SeriesProfile {
    fn default() -> Self {
        Self {
            base_revenue: 6_000_000.0,
            revenue_seasonality: 0.15,
            revenue_noise: 0.04,
            session_baseline: 200_000.0,
            session_amplitude: 0.6,
            session_jitter: 15_000,
            conversion_base: 0.015,
            conversion_amplitude: 0.005,
            conversion_noise: 0.0015,
            aov_base: 90.0,
            aov_amplitude: 20.0,
            aov_noise: 3.0,
            region_shares: RegionShares::default(),
            region_noise: 0.05,
            turnover_base: 6.0,
            turnover_amplitude: 1.0,
            turnover_noise: 0.2,
            stockout_base: 0.02,
            stockout_amplitude: 0.01,
            stockout_noise: 0.002,
            nps_base: 45.0,
            nps_amplitude: 10.0,
            nps_noise: 3.0,
            forecast_lag: 7,
            forecast_noise: 0.03,
            mape_window: 14,
        }
    }
}

impl SeriesProfile {
    /// Every Gaussian noise scale, keyed by its setting name.
    pub fn noise_scales(&self) -> [(&'static str, f64); 8] {
        [
            ("revenue_noise", self.revenue_noise),
            ("conversion_noise", self.conversion_noise),
            ("aov_noise", self.aov_noise),
            ("region_noise", self.region_noise),
            ("turnover_noise", self.turnover_noise),
            ("stockout_noise", self.stockout_noise),
            ("nps_noise", self.nps_noise),
            ("forecast_noise", self.forecast_noise),
        ]
    }
}

/// Fixed fraction of daily revenue attributed to each region before noise.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RegionShares {
    pub americas: f64,
    pub emea: f64,
    pub apac: f64,
}

impl RegionShares {
    pub fn share(&self, region: Region) -> f64 {
        match region {
            Region::Americas => self.americas,
            Region::Emea => self.emea,
            Region::Apac => self.apac,
        }
    }

    pub fn total(&self) -> f64 {
        self.americas + self.emea + self.apac
    }
}

impl Default for RegionShares {
    fn default() -> Self {
        Self {
            americas: 0.55,
            emea: 0.30,
            apac: 0.15,
        }
    }
}

/// KPI values that are not yet backed by a real data source.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Placeholders {
    pub digital_share_pct: Decimal,
    /// Customer lifetime value.
    pub clv: Decimal,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            digital_share_pct: dec!(62.0),
            clv: dec!(180.0),
        }
    }
}

/// Settings for assembling dashboard snapshots.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Lookback applied when a request carries no start date.
    pub default_window_days: u32,
    /// Fraction of orders counted as completed in the conversion funnel.
    pub completed_order_ratio: Decimal,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            default_window_days: 90,
            completed_order_ratio: dec!(0.95),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                ConfigError::ValidationError(format!(
                    "invalid server address '{}:{}': {}",
                    self.host, self.port, e
                ))
            })
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8050,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: String,
    /// When set, logs go to a daily-rolling file in this directory instead of stdout.
    pub directory: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl Config {
    /// Rejects settings the generator or dashboard cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let profile = &self.generator.profile;

        if self.generator.days <= profile.forecast_lag {
            return Err(ConfigError::ValidationError(format!(
                "generator.days ({}) must exceed profile.forecast_lag ({})",
                self.generator.days, profile.forecast_lag
            )));
        }

        if profile.mape_window == 0 {
            return Err(ConfigError::ValidationError(
                "profile.mape_window must be at least 1".to_string(),
            ));
        }

        for (name, scale) in profile.noise_scales() {
            if scale.is_nan() || scale < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "profile.{} must be a non-negative number, got {}",
                    name, scale
                )));
            }
        }

        if profile.session_jitter < 0 {
            return Err(ConfigError::ValidationError(format!(
                "profile.session_jitter must not be negative, got {}",
                profile.session_jitter
            )));
        }

        let share_total = profile.region_shares.total();
        if (share_total - 1.0).abs() > 1e-9 {
            return Err(ConfigError::ValidationError(format!(
                "profile.region_shares must sum to 1.0, got {}",
                share_total
            )));
        }

        let ratio = self.dashboard.completed_order_ratio;
        if ratio < Decimal::ZERO || ratio > Decimal::ONE {
            return Err(ConfigError::ValidationError(format!(
                "dashboard.completed_order_ratio must be within [0, 1], got {}",
                ratio
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.generator.days, 180);
        assert_eq!(config.generator.seed, 42);
        assert_eq!(config.placeholders.digital_share_pct, dec!(62.0));
        assert_eq!(config.placeholders.clv, dec!(180.0));
    }

    #[test]
    fn test_default_shares_sum_to_one() {
        let shares = RegionShares::default();
        assert!((shares.total() - 1.0).abs() < 1e-12);
        assert_eq!(shares.share(Region::Emea), 0.30);
    }

    #[test]
    fn test_days_must_exceed_forecast_lag() {
        let mut config = Config::default();
        config.generator.days = 7;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_unbalanced_shares_are_rejected() {
        let mut config = Config::default();
        config.generator.profile.region_shares.apac = 0.25;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_negative_noise_is_rejected() {
        let mut config = Config::default();
        config.generator.profile.nps_noise = -1.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("nps_noise"));

        let mut config = Config::default();
        config.generator.profile.revenue_noise = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.generator.profile.session_jitter = -5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_noise_is_allowed() {
        let mut config = Config::default();
        config.generator.profile.forecast_noise = 0.0;
        config.generator.profile.session_jitter = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_completed_ratio_bounds() {
        let mut config = Config::default();
        config.dashboard.completed_order_ratio = dec!(1.2);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_socket_addr() {
        let server = ServerSettings::default();
        assert_eq!(server.socket_addr().unwrap().port(), 8050);

        let bad = ServerSettings {
            host: "not a host".to_string(),
            port: 80,
        };
        assert!(bad.socket_addr().is_err());
    }
}
