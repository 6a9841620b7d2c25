//! Output formatting for the elbas CLI.

use anyhow::{Context, Result};
use elbas_lib::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a fetch result to a file, or stdout when no path is given.
pub(crate) fn write_result(
    result: &FetchResult,
    output: Option<&Path>,
    format: OutputFormat,
    pretty: bool,
) -> Result<()> {
    let sink: Box<dyn Write + Send> = match output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout()),
    };
    let mut writer = BufWriter::new(sink);

    match format {
        OutputFormat::Json => {
            let formatter = JsonFormatter::new().with_pretty(pretty);
            formatter.write_result(result, &mut writer)?;
        }
        OutputFormat::Ndjson => {
            let formatter = JsonFormatter::ndjson();
            formatter.write_result(result, &mut writer)?;
        }
        OutputFormat::Csv => {
            let formatter = CsvFormatter::new();
            formatter.write_result(result, &mut writer)?;
        }
    }

    writer.flush()?;
    Ok(())
}
