use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Series generation failed: {0}")]
    Generator(#[from] generator::GeneratorError),

    #[error("Analytics error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),
}
