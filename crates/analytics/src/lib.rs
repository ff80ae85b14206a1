//! # Pulse Analytics
//!
//! Reduces a generated daily dataset to the figures the dashboard displays.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** This crate has no knowledge of how the data was produced.
//!   It depends only on `core-types` and the placeholder settings.
//! - **Stateless Calculation:** The `MetricsEngine` takes records as input and
//!   produces a `KpiSummary` as output. Breakdown helpers are free functions.
//!
//! ## Public API
//!
//! - `MetricsEngine`: computes the six headline KPIs.
//! - `KpiSummary`: the standardized struct that holds them.
//! - `region_totals` / `conversion_funnel`: per-region and funnel breakdowns.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod breakdown;
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use breakdown::{Funnel, FunnelStage, RegionTotal, conversion_funnel, region_totals};
pub use engine::MetricsEngine;
pub use error::AnalyticsError;
pub use report::KpiSummary;
