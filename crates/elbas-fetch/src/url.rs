//! Market data page URL construction.

use elbas_types::PriceQuery;

/// Base URL of the Nord Pool market data pages.
pub const API_BASE: &str = "https://www.nordpoolgroup.com/api/marketdata/page";

/// Builds the URL of a market data page.
///
/// URL format: `{base}/{data_type}`
///
/// # Example
///
/// ```
/// use elbas_fetch::url::{API_BASE, page_url};
///
/// let url = page_url(API_BASE, 194);
/// assert_eq!(url, "https://www.nordpoolgroup.com/api/marketdata/page/194");
/// ```
#[must_use]
pub fn page_url(base: &str, data_type: u32) -> String {
    format!("{}/{}", base.trim_end_matches('/'), data_type)
}

/// Builds the query parameters of a page request.
///
/// `entityName` is omitted when the query names no area.
#[must_use]
pub fn query_params(currency: &str, query: &PriceQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("currency", currency.to_string()),
        ("endDate", query.end_date_param()),
    ];
    if let Some(entity) = query.entity_name() {
        params.push(("entityName", entity));
    }
    params
}
