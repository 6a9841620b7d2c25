//! Output formatters for the elbas Nord Pool price client.
//!
//! This crate provides formatters for writing fetch results:
//!
//! - [`CsvFormatter`] - CSV format, one line per price point
//! - [`JsonFormatter`] - JSON document or NDJSON point records

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/elbas/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(feature = "csv")]
mod csv;
mod formatter;
#[cfg(feature = "json")]
mod json;

#[cfg(feature = "csv")]
pub use crate::csv::CsvFormatter;
pub use formatter::{FormatError, Formatter, OutputFormat};
#[cfg(feature = "json")]
pub use json::{JsonFormatter, JsonStyle};
