//! Price point and fetch result representation.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-area series: column name mapped to points in row order.
pub type AreaSeries = BTreeMap<String, Vec<PricePoint>>;

/// The value carried by a price point.
///
/// The `Product` column keeps its raw string; every other column is numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointValue {
    /// Numeric column value (price or volume).
    Number(f64),
    /// Raw product identifier.
    Text(String),
}

impl PointValue {
    /// Returns the numeric value, if this is a number.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Returns the string value, if this is text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(s) => Some(s.as_str()),
        }
    }
}

impl std::fmt::Display for PointValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A single hourly value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Delivery start (UTC).
    pub start: DateTime<Utc>,
    /// Delivery end (UTC), always one hour after `start`.
    pub end: DateTime<Utc>,
    /// Column value.
    pub value: PointValue,
}

impl PricePoint {
    /// Creates a point covering the hour starting at `start`.
    #[must_use]
    pub fn hourly(start: DateTime<Utc>, value: PointValue) -> Self {
        Self {
            start,
            end: start + TimeDelta::hours(1),
            value,
        }
    }
}

/// Result of a single page fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchResult {
    /// When the data was last updated by the exchange (UTC).
    pub updated: DateTime<Utc>,
    /// Currency the prices are expressed in.
    pub currency: String,
    /// Series keyed by area code.
    pub areas: BTreeMap<String, AreaSeries>,
}

impl FetchResult {
    /// Creates a result with a single, empty area.
    #[must_use]
    pub fn new(
        updated: DateTime<Utc>,
        currency: impl Into<String>,
        area: impl Into<String>,
    ) -> Self {
        let mut areas = BTreeMap::new();
        areas.insert(area.into(), AreaSeries::new());
        Self {
            updated,
            currency: currency.into(),
            areas,
        }
    }

    /// Returns the series for an area.
    #[must_use]
    pub fn area(&self, area: &str) -> Option<&AreaSeries> {
        self.areas.get(area)
    }

    /// Returns the points of one column in one area.
    #[must_use]
    pub fn column(&self, area: &str, column: &str) -> Option<&[PricePoint]> {
        self.area(area)?.get(column).map(Vec::as_slice)
    }

    /// Returns the total number of points across all areas and columns.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.areas
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }

    /// Iterates over every point as `(area, column, point)`.
    pub fn points(&self) -> impl Iterator<Item = (&str, &str, &PricePoint)> + '_ {
        self.areas.iter().flat_map(|(area, series)| {
            series.iter().flat_map(move |(column, points)| {
                points
                    .iter()
                    .map(move |point| (area.as_str(), column.as_str(), point))
            })
        })
    }
}
