//! HTTP client and response parsing for the elbas Nord Pool price client.
//!
//! This crate provides the fetch pipeline:
//!
//! - [`url::page_url`] - Constructs market data page URLs
//! - [`ElbasClient`] - HTTP client holding the immutable [`ClientConfig`]
//! - [`raw`] - Wire types of the page JSON document
//! - [`parse_response`] - Currency check and row/column transform
//! - [`parse_dt`] / [`conv_to_float`] - Timestamp and number conversion

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/elbas/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod convert;
mod parse;
pub mod raw;
pub mod url;

pub use client::{ClientConfig, ElbasClient, FetchError};
pub use convert::{conv_to_float, parse_dt};
pub use parse::{PRODUCT_COLUMN, parse_body, parse_response, product_start};
