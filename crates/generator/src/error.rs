use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Invalid series profile: {0}")]
    InvalidProfile(String),

    #[error("Cannot build a {days}-day window ending {end}: date out of range")]
    DateOutOfRange { end: NaiveDate, days: usize },
}
