use chrono::NaiveDate;
use core_types::{DailyRecord, RegionRecord};
use serde::{Deserialize, Serialize};

/// Rows that sit on a calendar date and can be filtered by a `DateWindow`.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for DailyRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for RegionRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Inclusive, independently optional date bounds.
///
/// Bound ordering is not validated: a start after the end simply matches
/// nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }

    /// Keeps the rows inside the window, preserving their order.
    pub fn apply<T: Dated>(&self, mut rows: Vec<T>) -> Vec<T> {
        rows.retain(|row| self.contains(row.date()));
        rows
    }
}
