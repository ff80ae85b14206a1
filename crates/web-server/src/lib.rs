use axum::{Router, routing::get};
use dashboard::Dashboard;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Dashboard,
}

/// Builds the API router around an already configured dashboard.
pub fn router(dashboard: Dashboard) -> Router {
    let app_state = Arc::new(AppState { dashboard });
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/kpis", get(handlers::get_kpis))
        .route("/api/regions", get(handlers::get_region_totals))
        .with_state(app_state)
        .layer(cors)
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// Binds `addr` and serves the dashboard API until the process exits.
///
/// Tracing is initialized by the calling binary.
pub async fn run_server(addr: SocketAddr, dashboard: Dashboard) -> anyhow::Result<()> {
    let app = router(dashboard);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use chrono::{Days, Local};
    use tower::ServiceExt;

    async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
        let app = router(Dashboard::default());
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_health() {
        let app = router(Dashboard::default());
        let req = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_dashboard_default_window() {
        let (status, body) = get("/api/dashboard").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cards"].as_array().unwrap().len(), 6);
        assert_eq!(body["channel"], "all");

        let days = body["daily"].as_array().unwrap().len();
        // The default window spans 91 days, one fewer if midnight passed mid-request.
        assert!(days == 91 || days == 90);
        assert_eq!(body["regions"].as_array().unwrap().len(), days * 3);
        assert!(body["kpis"]["total_revenue"].as_f64().unwrap() > 0.0);
    }

    #[tokio::test]
    async fn test_dashboard_with_filters() {
        let end = Local::now().date_naive();
        let start = end.checked_sub_days(Days::new(6)).unwrap();
        let uri = format!(
            "/api/dashboard?start_date={}&end_date={}&channel=organic",
            start, end
        );
        let (status, body) = get(&uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["channel"], "organic");
        assert!(body["daily"].as_array().unwrap().len() <= 7);
    }

    #[tokio::test]
    async fn test_inverted_range_is_empty_not_an_error() {
        let (status, body) =
            get("/api/dashboard?start_date=2024-06-20&end_date=2024-06-10").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["daily"].as_array().unwrap().is_empty());
        assert!(body["kpis"].is_null());
    }

    #[tokio::test]
    async fn test_kpis_on_empty_window_is_unprocessable() {
        let (status, body) = get("/api/kpis?start_date=1999-01-01&end_date=1999-01-31").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_region_totals() {
        let (status, body) = get("/api/regions").await;
        assert_eq!(status, StatusCode::OK);
        let regions: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["region"].as_str().unwrap())
            .collect();
        assert_eq!(regions, vec!["Americas", "EMEA", "APAC"]);
    }

    #[tokio::test]
    async fn test_malformed_date_is_rejected() {
        let (status, _) = get("/api/dashboard?start_date=not-a-date").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
