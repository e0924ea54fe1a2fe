//! Calendar-date helpers for the CLI surface.

use chrono::NaiveDate;

use crate::errors::{AppError, AppResult};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Strict `YYYY-MM-DD` parse for the `--on` reference date.
pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(s.to_string()))
}
