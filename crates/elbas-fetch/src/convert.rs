//! Timestamp and number conversion for Nord Pool values.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use elbas_types::ElbasError;
use std::num::ParseFloatError;

/// Zone-less timestamp layouts seen in page documents.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a timestamp into UTC.
///
/// Strings carrying an offset (RFC 3339) keep it. Zone-less strings are
/// interpreted as wall-clock time in `tz`; on an ambiguous local time the
/// earlier instant is used.
///
/// # Errors
///
/// Returns [`ElbasError::InvalidTimestamp`] if the string matches no known
/// layout or names a local time skipped by a DST transition.
///
/// # Example
///
/// ```
/// use elbas_fetch::parse_dt;
/// use chrono::{TimeZone, Utc};
///
/// let dt = parse_dt("2023-10-16T11:45:00", chrono_tz::Europe::Stockholm).unwrap();
/// assert_eq!(dt, Utc.with_ymd_and_hms(2023, 10, 16, 9, 45, 0).unwrap());
/// ```
pub fn parse_dt(s: &str, tz: Tz) -> Result<DateTime<Utc>, ElbasError> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.to_utc());
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| ElbasError::InvalidTimestamp(s.to_string()))?;

    localize(naive, tz).ok_or_else(|| ElbasError::InvalidTimestamp(s.to_string()))
}

/// Converts a wall-clock time in `tz` to UTC.
pub(crate) fn localize(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Converts a column value to a float.
///
/// Both `,` and `.` are accepted as decimal separator and whitespace
/// (including non-breaking spaces used for digit grouping) is ignored.
///
/// # Errors
///
/// Returns the underlying parse error for non-numeric input.
pub fn conv_to_float(s: &str) -> Result<f64, ParseFloatError> {
    let normalized: String = s
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    normalized.parse()
}
