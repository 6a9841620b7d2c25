//! Wire types of a market data page document.
//!
//! Only the fields used by the transform are modelled; unknown fields are
//! ignored.

use serde::Deserialize;

/// Top-level page document.
#[derive(Debug, Clone, Deserialize)]
pub struct RawResponse {
    /// Currency the page is priced in.
    pub currency: String,
    /// Table payload.
    pub data: RawData,
}

/// Page document with the table left undecoded.
///
/// Lets the currency be checked before the table is validated.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEnvelope {
    /// Currency the page is priced in.
    pub currency: String,
    /// Undecoded table payload.
    pub data: serde_json::Value,
}

/// Table payload of a page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawData {
    /// Last update time as sent by the exchange.
    pub date_updated: String,
    /// Table rows in display order.
    #[serde(default)]
    pub rows: Vec<RawRow>,
}

/// A single table row.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawRow {
    /// Product name, e.g. `PH-20231015-03`. Null for header and summary rows.
    #[serde(default)]
    pub name: Option<String>,
    /// Set on supplementary rows such as statistics.
    #[serde(default)]
    pub is_extra_row: bool,
    /// Cells of the row.
    #[serde(default)]
    pub columns: Vec<RawColumn>,
}

/// A single table cell.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawColumn {
    /// Column name, e.g. `Avg`.
    pub name: String,
    /// Cell value as displayed, e.g. `10,5`. Null on some summary cells.
    #[serde(default)]
    pub value: Option<String>,
}
