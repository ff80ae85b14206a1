use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Not enough data to perform calculation: at least one daily record is required")]
    InsufficientData,

    #[error("Value {value} of '{field}' cannot be represented as a decimal")]
    Unrepresentable { field: String, value: f64 },

    #[error("Aggregating '{0}' overflowed the decimal range")]
    Overflow(String),
}
