//! Request parameters for a market data page.

use chrono::{DateTime, Local, NaiveDate, TimeDelta};

use crate::ElbasError;

/// Page id of the hourly Elbas product table.
pub const HOURLY: u32 = 194;

/// Columns requested by default for the hourly table.
pub const HOURLY_COLUMNS: &[&str] = &["Product", "High", "Low", "Last", "Avg", "Volume"];

/// Area key used for results when no area was requested.
pub const DEFAULT_AREA: &str = "ALL";

/// Parameters of a single page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuery {
    /// Market data page id, e.g. [`HOURLY`].
    pub data_type: u32,
    /// Requested areas. Only the first one is populated in the result.
    pub areas: Vec<String>,
    /// Requested columns; empty means every column.
    pub columns: Vec<String>,
    /// Last delivery date of the requested data.
    pub end_date: NaiveDate,
}

impl PriceQuery {
    /// Creates a query for a page with all columns, no area and the default end date.
    #[must_use]
    pub fn new(data_type: u32) -> Self {
        Self {
            data_type,
            areas: Vec::new(),
            columns: Vec::new(),
            end_date: default_end_date(),
        }
    }

    /// Creates a query for the hourly table with its default columns.
    #[must_use]
    pub fn hourly() -> Self {
        Self::new(HOURLY).with_columns(HOURLY_COLUMNS.iter().copied())
    }

    /// Sets the requested areas.
    #[must_use]
    pub fn with_areas<I, S>(mut self, areas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.areas = areas.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the requested columns. An empty list selects every column.
    #[must_use]
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the end date.
    #[must_use]
    pub const fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = end_date;
        self
    }

    /// Returns the `entityName` request value: areas concatenated without separator.
    ///
    /// Returns `None` when no area was requested.
    #[must_use]
    pub fn entity_name(&self) -> Option<String> {
        if self.areas.is_empty() {
            None
        } else {
            Some(self.areas.concat())
        }
    }

    /// Returns the area key the result is stored under.
    #[must_use]
    pub fn primary_area(&self) -> &str {
        self.areas.first().map_or(DEFAULT_AREA, String::as_str)
    }

    /// Returns true if the given column should be kept.
    #[must_use]
    pub fn wants_column(&self, column: &str) -> bool {
        self.columns.is_empty() || self.columns.iter().any(|c| c == column)
    }

    /// Returns the end date formatted for the API (`DD-MM-YYYY`).
    #[must_use]
    pub fn end_date_param(&self) -> String {
        self.end_date.format("%d-%m-%Y").to_string()
    }
}

/// Returns yesterday's local date.
#[must_use]
pub fn default_end_date() -> NaiveDate {
    Local::now().date_naive() - TimeDelta::days(1)
}

/// Parses a user supplied date.
///
/// Accepts `YYYY-MM-DD`, `DD-MM-YYYY`, `YYYYMMDD`, `DD.MM.YYYY` and RFC 3339
/// timestamps (the date part is used).
///
/// # Errors
///
/// Returns [`ElbasError::InvalidDate`] if no format matches.
pub fn parse_date(s: &str) -> Result<NaiveDate, ElbasError> {
    const FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%Y%m%d", "%d.%m.%Y"];
    let s = s.trim();

    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .ok_or_else(|| ElbasError::InvalidDate(s.to_string()))
}
