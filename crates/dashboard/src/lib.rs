//! Assembles everything the KPI dashboard renders for one request: the
//! filtered dataset, the headline KPIs and their display cards, the
//! conversion funnel and the regional revenue split.

pub mod cards;
pub mod error;
pub mod snapshot;

pub use cards::{KpiCard, kpi_cards};
pub use error::DashboardError;
pub use snapshot::{Dashboard, DashboardQuery, DashboardSnapshot};
