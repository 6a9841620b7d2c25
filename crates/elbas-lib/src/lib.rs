//! Rust client for Nord Pool Elbas intraday market prices.
//!
//! This is a facade crate that re-exports functionality from the elbas
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use elbas_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ElbasClient::with_defaults()?;
//!     let result = client.hourly(None, Some(&["FI"][..]), None).await?;
//!
//!     for point in result.column("FI", "Avg").unwrap_or_default() {
//!         println!("{} {}", point.start, point.value);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/elbas/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use elbas_types::*;

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use elbas_fetch::{
    ClientConfig, ElbasClient, FetchError, conv_to_float, parse_body, parse_dt, parse_response,
    product_start, url,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use elbas_format::{CsvFormatter, FormatError, Formatter, JsonFormatter, OutputFormat};

/// Prelude module for convenient imports.
///
/// ```
/// use elbas_lib::prelude::*;
/// ```
pub mod prelude {
    pub use elbas_types::{
        AreaSeries, ElbasError, FetchResult, HOURLY, HOURLY_COLUMNS, PointValue, PriceQuery,
        PricePoint, Result, parse_date,
    };

    #[cfg(feature = "fetch")]
    pub use elbas_fetch::{ClientConfig, ElbasClient};

    #[cfg(feature = "format")]
    pub use elbas_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};
}
