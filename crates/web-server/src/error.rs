use analytics::AnalyticsError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dashboard::DashboardError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Dashboard error: {0}")]
    Dashboard(#[from] DashboardError),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Dashboard(DashboardError::Analytics(AnalyticsError::InsufficientData)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "The selected date range contains no data".to_string(),
            ),
            AppError::Dashboard(dashboard_err) => {
                tracing::error!(error = ?dashboard_err, "Dashboard error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred while building the dashboard".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
