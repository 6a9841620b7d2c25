//! JSON output format.

use chrono::{DateTime, Utc};
use elbas_types::{FetchResult, PointValue};
use serde::Serialize;
use std::io::Write;

use crate::{FormatError, Formatter};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// The whole result as one JSON document.
    #[default]
    Document,
    /// Newline-delimited JSON (NDJSON/JSONL), one record per point.
    Ndjson,
}

/// A flattened price point.
#[derive(Serialize)]
struct PointRecord<'a> {
    area: &'a str,
    column: &'a str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    value: &'a PointValue,
}

/// JSON formatter.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Output style.
    style: JsonStyle,
    /// Whether to pretty-print (document style only).
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default settings (document style).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Document,
            pretty: false,
        }
    }

    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
            pretty: false,
        }
    }

    /// Sets whether to pretty-print output (document style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Formatter for JsonFormatter {
    fn write_result<W: Write + Send>(
        &self,
        result: &FetchResult,
        mut writer: W,
    ) -> Result<(), FormatError> {
        match self.style {
            JsonStyle::Document => {
                if self.pretty {
                    serde_json::to_writer_pretty(&mut writer, result)?;
                } else {
                    serde_json::to_writer(&mut writer, result)?;
                }
                writeln!(writer)?;
            }
            JsonStyle::Ndjson => {
                for (area, column, point) in result.points() {
                    let record = PointRecord {
                        area,
                        column,
                        start: point.start,
                        end: point.end,
                        value: &point.value,
                    };
                    serde_json::to_writer(&mut writer, &record)?;
                    writeln!(writer)?;
                }
            }
        }
        Ok(())
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Document => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}
