//! # Pulse Series Generator
//!
//! Synthesizes the demo retail dataset behind the dashboard: a trailing window
//! of daily KPIs shaped by sine/cosine seasonality and seeded noise, plus the
//! per-region revenue breakdown derived from it.
//!
//! ## Public API
//!
//! - `SeriesGenerator`: builds a `Dataset`, optionally filtered by a `DateWindow`.
//! - `Dataset`: the daily table and the regional table.
//! - `DateWindow`: inclusive, independently optional date bounds.
//! - `GeneratorError`: the errors a generation can return.

pub mod error;
pub mod noise;
pub mod series;
pub mod util;
pub mod window;

pub use error::GeneratorError;
pub use series::{Dataset, SeriesGenerator, expected_orders};
pub use window::{DateWindow, Dated};
