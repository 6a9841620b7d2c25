//! Row/column transform of a page document.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use elbas_types::{ElbasError, FetchResult, PointValue, PriceQuery, PricePoint};
use tracing::{debug, warn};

use crate::convert::{conv_to_float, localize, parse_dt};
use crate::raw::{RawData, RawEnvelope, RawResponse};

/// Column whose value is kept as the raw product string.
pub const PRODUCT_COLUMN: &str = "Product";

/// Token identifying hourly products in a row name.
const HOURLY_PRODUCT: &str = "PH";

/// Deserializes a page document and transforms it.
///
/// The currency is checked before the table is decoded, so a page priced in
/// another currency always fails with [`ElbasError::CurrencyMismatch`].
///
/// # Errors
///
/// Returns [`ElbasError::Json`] for a malformed document, otherwise see
/// [`parse_response`].
pub fn parse_body(
    body: &str,
    currency: &str,
    query: &PriceQuery,
    tz: Tz,
) -> Result<FetchResult, ElbasError> {
    let envelope: RawEnvelope = serde_json::from_str(body)?;
    check_currency(&envelope.currency, currency)?;
    let data: RawData = serde_json::from_value(envelope.data)?;
    let response = RawResponse {
        currency: envelope.currency,
        data,
    };
    parse_response(response, currency, query, tz)
}

fn check_currency(found: &str, expected: &str) -> Result<(), ElbasError> {
    if found == expected {
        return Ok(());
    }
    Err(ElbasError::CurrencyMismatch {
        expected: expected.to_string(),
        found: found.to_string(),
    })
}

/// Validates the currency and reshapes the rows into per-column points.
///
/// Only hourly (`PH`) rows are kept. Every point is stored under
/// [`PriceQuery::primary_area`], so a query naming several areas still
/// yields a single area key. Requested columns present in the document get
/// a (possibly empty) list even when every row carrying them is an extra
/// row.
///
/// # Errors
///
/// - [`ElbasError::CurrencyMismatch`] if the document is priced in another
///   currency than `currency`
/// - [`ElbasError::InvalidTimestamp`] if `DateUpdated` cannot be parsed
/// - [`ElbasError::InvalidNumber`] if an emitted non-product value is null,
///   not numeric or not finite
pub fn parse_response(
    response: RawResponse,
    currency: &str,
    query: &PriceQuery,
    tz: Tz,
) -> Result<FetchResult, ElbasError> {
    check_currency(&response.currency, currency)?;

    let updated = parse_dt(&response.data.date_updated, tz)?;
    let area = query.primary_area().to_string();
    let mut result = FetchResult::new(updated, response.currency, area.clone());
    let series = result.areas.entry(area).or_default();

    for row in response.data.rows {
        let Some(name) = row.name.as_deref() else {
            continue;
        };
        let Some(hour) = product_hour(name) else {
            debug!(name, "skipping non-hourly row");
            continue;
        };
        let Some(start) = localize(hour, tz) else {
            warn!(name, %hour, "skipping row with nonexistent local delivery hour");
            continue;
        };

        for column in row.columns {
            if !query.wants_column(&column.name) {
                continue;
            }
            let points = series.entry(column.name.clone()).or_default();
            if row.is_extra_row {
                continue;
            }

            let value = if column.name == PRODUCT_COLUMN {
                PointValue::Text(column.value.unwrap_or_default())
            } else {
                PointValue::Number(number_value(&column.name, column.value.as_deref())?)
            };
            points.push(PricePoint::hourly(start, value));
        }
    }

    Ok(result)
}

/// Converts a cell to a finite number.
fn number_value(column: &str, value: Option<&str>) -> Result<f64, ElbasError> {
    let invalid = || ElbasError::InvalidNumber {
        column: column.to_string(),
        value: value.unwrap_or("null").to_string(),
    };
    match value.map(conv_to_float) {
        Some(Ok(number)) if number.is_finite() => Ok(number),
        _ => Err(invalid()),
    }
}

/// Returns the delivery start of an hourly product row name.
///
/// Names are split on `-` and whitespace. The first token must be `PH`; it is
/// followed by the delivery date (either `YYYYMMDD` or `YYYY`, `MM`, `DD`
/// tokens) and the 1-based delivery hour. The hour is wall-clock time in `tz`.
///
/// Returns `None` for any other product, a malformed name, or an hour that
/// does not exist in `tz` (spring DST gap).
///
/// # Example
///
/// ```
/// use elbas_fetch::product_start;
/// use chrono::{TimeZone, Utc};
///
/// let tz = chrono_tz::Europe::Stockholm;
/// let start = product_start("PH-20231015-03", tz).unwrap();
/// assert_eq!(start, Utc.with_ymd_and_hms(2023, 10, 15, 0, 0, 0).unwrap());
/// assert!(product_start("QH-20231015-03", tz).is_none());
/// ```
#[must_use]
pub fn product_start(name: &str, tz: Tz) -> Option<DateTime<Utc>> {
    localize(product_hour(name)?, tz)
}

/// Returns the local delivery start of an hourly product row name.
pub(crate) fn product_hour(name: &str) -> Option<NaiveDateTime> {
    let tokens: Vec<&str> = name
        .split(|c: char| c == '-' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();

    let (product, rest) = tokens.split_first()?;
    if *product != HOURLY_PRODUCT {
        return None;
    }

    let (date, hour) = match rest {
        [date, hour, ..] if is_compact_date(date) => (compact_date(date)?, *hour),
        [year, month, day, hour, ..] => (
            NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)?,
            *hour,
        ),
        _ => return None,
    };

    let hour = hour.parse::<u32>().ok()?.checked_sub(1)?;
    date.and_hms_opt(hour, 0, 0)
}

fn is_compact_date(token: &str) -> bool {
    token.len() == 8 && token.bytes().all(|b| b.is_ascii_digit())
}

/// Parses an 8-digit `YYYYMMDD` token.
fn compact_date(token: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(
        token[0..4].parse().ok()?,
        token[4..6].parse().ok()?,
        token[6..8].parse().ok()?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{TimeDelta, TimeZone};
    use chrono_tz::Europe::Stockholm;
    use serde_json::json;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn row(name: Option<&str>, extra: bool, columns: &[(&str, &str)]) -> serde_json::Value {
        json!({
            "Name": name,
            "IsExtraRow": extra,
            "Columns": columns
                .iter()
                .map(|(n, v)| json!({"Name": n, "Value": v}))
                .collect::<Vec<_>>(),
        })
    }

    fn page(currency: &str, rows: Vec<serde_json::Value>) -> RawResponse {
        serde_json::from_value(json!({
            "currency": currency,
            "data": {"DateUpdated": "2023-10-16T11:45:00", "Rows": rows},
        }))
        .unwrap()
    }

    fn fi_query() -> PriceQuery {
        PriceQuery::new(194).with_areas(["FI"])
    }

    #[test]
    fn test_product_start_compact_date() {
        // 03 is the third hour, 02:00 CEST
        let start = product_start("PH-20231015-03", Stockholm).unwrap();
        assert_eq!(start, utc(2023, 10, 15, 0));
    }

    #[test]
    fn test_product_start_dashed_date() {
        let start = product_start("PH-2023-10-15-3", Stockholm).unwrap();
        assert_eq!(start, utc(2023, 10, 15, 0));
    }

    #[test]
    fn test_product_start_first_and_last_hour() {
        // Winter time, UTC+1
        assert_eq!(
            product_start("PH-20231201-01", Stockholm).unwrap(),
            utc(2023, 11, 30, 23)
        );
        assert_eq!(
            product_start("PH-20231201-24", Stockholm).unwrap(),
            utc(2023, 12, 1, 22)
        );
    }

    #[test]
    fn test_product_start_rejects() {
        assert!(product_start("", Stockholm).is_none());
        assert!(product_start("PH", Stockholm).is_none());
        assert!(product_start("QH-20231015-03", Stockholm).is_none());
        assert!(product_start("Block 1-4", Stockholm).is_none());
        assert!(product_start("PH-20231015-00", Stockholm).is_none());
        assert!(product_start("PH-20231015-25", Stockholm).is_none());
        assert!(product_start("PH-20231315-03", Stockholm).is_none());
        assert!(product_start("PH-20231015-xx", Stockholm).is_none());
    }

    #[test]
    fn test_currency_mismatch() {
        let response = page("SEK", vec![row(Some("PH-20231015-01"), false, &[("Avg", "1")])]);
        let err = parse_response(response, "EUR", &fi_query(), Stockholm).unwrap_err();
        match err {
            ElbasError::CurrencyMismatch { expected, found } => {
                assert_eq!(expected, "EUR");
                assert_eq!(found, "SEK");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_updated_and_currency() {
        let result = parse_response(page("EUR", vec![]), "EUR", &fi_query(), Stockholm).unwrap();
        assert_eq!(result.currency, "EUR");
        assert_eq!(result.updated, Utc.with_ymd_and_hms(2023, 10, 16, 9, 45, 0).unwrap());
        assert!(result.area("FI").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_updated_timestamp() {
        let response: RawResponse = serde_json::from_value(json!({
            "currency": "EUR",
            "data": {"DateUpdated": "soon", "Rows": []},
        }))
        .unwrap();
        assert!(matches!(
            parse_response(response, "EUR", &fi_query(), Stockholm),
            Err(ElbasError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_skips_unnamed_and_non_hourly_rows() {
        let response = page(
            "EUR",
            vec![
                row(None, false, &[("Avg", "1")]),
                row(Some("QH-20231015-01"), false, &[("Avg", "2")]),
                row(Some("Block 1-4"), false, &[("Avg", "3")]),
                row(Some("PH-20231015-01"), false, &[("Avg", "4")]),
            ],
        );
        let result = parse_response(response, "EUR", &fi_query(), Stockholm).unwrap();
        let avg = result.column("FI", "Avg").unwrap();
        assert_eq!(avg.len(), 1);
        assert_relative_eq!(avg[0].value.as_f64().unwrap(), 4.0);
    }

    #[test]
    fn test_comma_decimals_in_row_order() {
        let response = page(
            "EUR",
            vec![
                row(Some("PH-20231015-01"), false, &[("Avg", "10,5")]),
                row(Some("PH-20231015-02"), false, &[("Avg", "20,5")]),
            ],
        );
        let result = parse_response(response, "EUR", &fi_query(), Stockholm).unwrap();
        let avg = result.column("FI", "Avg").unwrap();
        assert_eq!(avg.len(), 2);
        assert_relative_eq!(avg[0].value.as_f64().unwrap(), 10.5);
        assert_relative_eq!(avg[1].value.as_f64().unwrap(), 20.5);
        assert!(avg[0].start < avg[1].start);
    }

    #[test]
    fn test_points_span_one_hour() {
        let response = page(
            "EUR",
            vec![
                row(Some("PH-20231015-01"), false, &[("High", "1"), ("Low", "0,5")]),
                row(Some("PH-20231015-24"), false, &[("High", "2"), ("Low", "1,5")]),
            ],
        );
        let result = parse_response(response, "EUR", &fi_query(), Stockholm).unwrap();
        assert_eq!(result.point_count(), 4);
        for (_, _, point) in result.points() {
            assert_eq!(point.end - point.start, TimeDelta::hours(1));
        }
    }

    #[test]
    fn test_product_column_kept_as_text() {
        let response = page(
            "EUR",
            vec![row(
                Some("PH-20231015-03"),
                false,
                &[("Product", "PH-20231015-03"), ("Volume", "1 250,0")],
            )],
        );
        let result = parse_response(response, "EUR", &fi_query(), Stockholm).unwrap();
        let product = result.column("FI", "Product").unwrap();
        assert_eq!(product[0].value.as_str(), Some("PH-20231015-03"));
        assert_eq!(product[0].start, utc(2023, 10, 15, 0));
        let volume = result.column("FI", "Volume").unwrap();
        assert_relative_eq!(volume[0].value.as_f64().unwrap(), 1250.0);
    }

    #[test]
    fn test_extra_row_creates_empty_lists_only() {
        let response = page(
            "EUR",
            vec![row(
                Some("PH-20231015-03"),
                true,
                &[("Avg", "not a number"), ("High", "1")],
            )],
        );
        let result = parse_response(response, "EUR", &fi_query(), Stockholm).unwrap();
        let series = result.area("FI").unwrap();
        assert_eq!(series.len(), 2);
        assert!(series["Avg"].is_empty());
        assert!(series["High"].is_empty());
        assert_eq!(result.point_count(), 0);
    }

    #[test]
    fn test_all_columns_when_unfiltered() {
        let response = page(
            "EUR",
            vec![row(
                Some("PH-20231015-03"),
                false,
                &[("High", "2"), ("Low", "1"), ("Custom", "3")],
            )],
        );
        let result = parse_response(response, "EUR", &fi_query(), Stockholm).unwrap();
        let keys: Vec<_> = result.area("FI").unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["Custom", "High", "Low"]);
    }

    #[test]
    fn test_column_filter() {
        let response = page(
            "EUR",
            vec![row(
                Some("PH-20231015-03"),
                false,
                &[("High", "2"), ("Low", "not checked")],
            )],
        );
        let query = fi_query().with_columns(["High"]);
        let result = parse_response(response, "EUR", &query, Stockholm).unwrap();
        let keys: Vec<_> = result.area("FI").unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["High"]);
    }

    #[test]
    fn test_invalid_number_propagates() {
        let response = page(
            "EUR",
            vec![row(Some("PH-20231015-03"), false, &[("Avg", "-")])],
        );
        let err = parse_response(response, "EUR", &fi_query(), Stockholm).unwrap_err();
        assert!(matches!(
            err,
            ElbasError::InvalidNumber { ref column, ref value } if column == "Avg" && value == "-"
        ));
    }

    #[test]
    fn test_only_first_area_is_populated() {
        let response = page(
            "EUR",
            vec![row(Some("PH-20231015-03"), false, &[("Avg", "1")])],
        );
        let query = PriceQuery::new(194).with_areas(["FI", "SE"]);
        let result = parse_response(response, "EUR", &query, Stockholm).unwrap();
        assert_eq!(result.areas.keys().collect::<Vec<_>>(), vec!["FI"]);
        assert_eq!(result.column("FI", "Avg").unwrap().len(), 1);
    }

    #[test]
    fn test_no_area_uses_default_key() {
        let response = page(
            "EUR",
            vec![row(Some("PH-20231015-03"), false, &[("Avg", "1")])],
        );
        let result = parse_response(response, "EUR", &PriceQuery::new(194), Stockholm).unwrap();
        assert_eq!(result.column("ALL", "Avg").unwrap().len(), 1);
    }

    #[test]
    fn test_parse_body_invalid_json() {
        assert!(matches!(
            parse_body("<html>", "EUR", &fi_query(), Stockholm),
            Err(ElbasError::Json(_))
        ));
    }
    fn body(currency: &str, rows: serde_json::Value) -> String {
        json!({
            "currency": currency,
            "data": {"DateUpdated": "2023-10-16T11:45:00", "Rows": rows},
        })
        .to_string()
    }

    #[test]
    fn test_parse_body_checks_currency_before_table() {
        let rows = json!([
            {"Name": "PH-20231015-01", "IsExtraRow": true, "Columns": [{"Name": "Avg", "Value": null}]},
            {"Name": "PH-20231015-01", "Columns": [{"Name": "Avg", "Value": 12}]},
        ]);
        let err = parse_body(&body("SEK", rows), "EUR", &fi_query(), Stockholm).unwrap_err();
        assert!(matches!(
            err,
            ElbasError::CurrencyMismatch { ref expected, ref found } if expected == "EUR" && found == "SEK"
        ));
    }

    #[test]
    fn test_null_values_in_unread_cells() {
        let rows = json!([
            {"Name": null, "Columns": [{"Name": "Avg", "Value": null}]},
            {"Name": "PH-20231015-01", "IsExtraRow": true, "Columns": [{"Name": "Avg", "Value": null}]},
            {
                "Name": "PH-20231015-01",
                "IsExtraRow": false,
                "Columns": [{"Name": "Avg", "Value": "10,5"}, {"Name": "Low", "Value": null}],
            },
        ]);
        let query = fi_query().with_columns(["Avg"]);
        let result = parse_body(&body("EUR", rows), "EUR", &query, Stockholm).unwrap();
        assert_eq!(result.point_count(), 1);
        assert_relative_eq!(result.column("FI", "Avg").unwrap()[0].value.as_f64().unwrap(), 10.5);
    }

    #[test]
    fn test_null_value_in_emitted_cell() {
        let rows = json!([
            {"Name": "PH-20231015-01", "Columns": [{"Name": "Avg", "Value": null}]},
        ]);
        let err = parse_body(&body("EUR", rows), "EUR", &fi_query(), Stockholm).unwrap_err();
        assert!(matches!(
            err,
            ElbasError::InvalidNumber { ref column, ref value } if column == "Avg" && value == "null"
        ));

        let rows = json!([
            {"Name": "PH-20231015-01", "Columns": [{"Name": "Product", "Value": null}]},
        ]);
        let result = parse_body(&body("EUR", rows), "EUR", &fi_query(), Stockholm).unwrap();
        assert_eq!(result.column("FI", "Product").unwrap()[0].value.as_str(), Some(""));
    }

    #[test]
    fn test_non_finite_values_rejected() {
        for raw in ["NaN", "inf", "-infinity"] {
            let response = page(
                "EUR",
                vec![row(Some("PH-20231015-03"), false, &[("Avg", raw)])],
            );
            let err = parse_response(response, "EUR", &fi_query(), Stockholm).unwrap_err();
            assert!(matches!(
                err,
                ElbasError::InvalidNumber { ref value, .. } if value == raw
            ));
        }
    }

    #[test]
    fn test_dst_gap_hour_is_skipped() {
        // 02:00 on 2023-03-26 does not exist in Stockholm
        let hour = product_hour("PH-20230326-03").unwrap();
        assert_eq!(hour, NaiveDate::from_ymd_opt(2023, 3, 26).unwrap().and_hms_opt(2, 0, 0).unwrap());
        assert!(product_start("PH-20230326-03", Stockholm).is_none());
        assert!(product_hour("QH-20230326-03").is_none());

        let response = page(
            "EUR",
            vec![
                row(Some("PH-20230326-02"), false, &[("Avg", "1")]),
                row(Some("PH-20230326-03"), false, &[("Avg", "2")]),
                row(Some("PH-20230326-04"), false, &[("Avg", "3")]),
            ],
        );
        let result = parse_response(response, "EUR", &fi_query(), Stockholm).unwrap();
        let avg = result.column("FI", "Avg").unwrap();
        assert_eq!(avg.len(), 2);
        assert_eq!(avg[0].start, utc(2023, 3, 26, 0));
        assert_eq!(avg[1].start, utc(2023, 3, 26, 1));
    }
}
