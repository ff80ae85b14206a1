use crate::{AppState, error::AppError};
use analytics::{KpiSummary, RegionTotal};
use axum::{
    Json,
    extract::{Query, State},
};
use dashboard::{DashboardQuery, DashboardSnapshot};
use std::sync::Arc;

/// # GET /api/health
pub async fn health() -> &'static str {
    "OK"
}

/// # GET /api/dashboard
/// Builds the full snapshot: tables, KPIs, cards, funnel and region totals.
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardSnapshot>, AppError> {
    let snapshot = state.dashboard.snapshot(&query)?;
    Ok(Json(snapshot))
}

/// # GET /api/kpis
/// The six headline KPIs. Responds 422 when the window holds no days.
pub async fn get_kpis(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<KpiSummary>, AppError> {
    let kpis = state.dashboard.kpis(&query)?;
    Ok(Json(kpis))
}

/// # GET /api/regions
pub async fn get_region_totals(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<Vec<RegionTotal>>, AppError> {
    let totals = state.dashboard.region_totals(&query)?;
    Ok(Json(totals))
}
