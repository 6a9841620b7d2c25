//! Core types for the elbas Nord Pool price client.
//!
//! This crate provides the data structures used throughout elbas:
//!
//! - [`PricePoint`] - A single hourly value with start and end timestamps
//! - [`PointValue`] - Either a numeric value or a raw product string
//! - [`AreaSeries`] - Column name to ordered price points
//! - [`FetchResult`] - Update time, currency and per-area series
//! - [`PriceQuery`] - Page id, areas, columns and end date of a request

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/elbas/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod price;
mod query;

pub use error::{ElbasError, Result};
pub use price::{AreaSeries, FetchResult, PointValue, PricePoint};
pub use query::{DEFAULT_AREA, HOURLY, HOURLY_COLUMNS, PriceQuery, default_end_date, parse_date};
