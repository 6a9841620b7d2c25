//! CSV output format.

use elbas_types::FetchResult;
use std::borrow::Cow;
use std::io::Write;

use crate::{FormatError, Formatter};

/// CSV formatter.
#[derive(Debug, Clone, Default)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Quotes a field if it contains the delimiter, a quote or a newline.
    fn escape<'a>(&self, field: &'a str) -> Cow<'a, str> {
        if field.contains([self.delimiter, '"', '\n', '\r']) {
            Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
        } else {
            Cow::Borrowed(field)
        }
    }
}

impl Formatter for CsvFormatter {
    fn write_result<W: Write + Send>(
        &self,
        result: &FetchResult,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(writer, "area{d}column{d}start{d}end{d}value")?;
        }

        for (area, column, point) in result.points() {
            let value = point.value.to_string();
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}",
                self.escape(area),
                self.escape(column),
                point.start.format("%Y-%m-%dT%H:%M:%SZ"),
                point.end.format("%Y-%m-%dT%H:%M:%SZ"),
                self.escape(&value),
            )?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}
