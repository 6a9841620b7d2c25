//! Fetch command implementation.
//!
//! This module handles requesting market data pages and writing the result
//! in the selected output format.

use crate::display::write_result;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use elbas_lib::prelude::*;
use elbas_lib::url::API_BASE;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Options shared by the fetching commands.
#[derive(Args)]
pub(crate) struct FetchArgs {
    /// End date (YYYY-MM-DD or DD-MM-YYYY). Defaults to yesterday.
    #[arg(short, long)]
    end: Option<String>,

    /// Area code, e.g. FI (repeatable; only the first area receives data)
    #[arg(short, long = "area")]
    areas: Vec<String>,

    /// Output format (json, ndjson/jsonl, csv)
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Output file path. Defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Currency to request
    #[arg(long, env = "ELBAS_CURRENCY", default_value = "EUR")]
    currency: String,

    /// Request timeout in seconds
    #[arg(long, env = "ELBAS_TIMEOUT", default_value = "30")]
    timeout: u64,

    /// Base URL of the market data pages
    #[arg(long, env = "ELBAS_BASE_URL", default_value = API_BASE)]
    base_url: String,
}

impl FetchArgs {
    fn client(&self) -> Result<ElbasClient> {
        let config = ClientConfig {
            currency: self.currency.clone(),
            timeout: Duration::from_secs(self.timeout),
            base_url: self.base_url.clone(),
            ..Default::default()
        };
        ElbasClient::new(config).context("Failed to create HTTP client")
    }

    fn end_date(&self) -> Result<Option<NaiveDate>> {
        self.end
            .as_deref()
            .map(|s| parse_date(s).with_context(|| format!("Invalid end date: {s}")))
            .transpose()
    }

    fn areas(&self) -> Option<Vec<&str>> {
        if self.areas.is_empty() {
            None
        } else {
            Some(self.areas.iter().map(String::as_str).collect())
        }
    }
}

/// Fetch the hourly product table.
pub(crate) async fn hourly(columns: &[String], args: &FetchArgs, quiet: bool) -> Result<()> {
    let client = args.client()?;
    let end_date = args.end_date()?;
    let areas = args.areas();
    let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
    let columns = (!columns.is_empty()).then_some(columns.as_slice());
    debug!(?end_date, ?areas, ?columns, "fetching hourly table");

    let progress = spinner(quiet, format!("Fetching page {HOURLY}"));
    let result = client
        .hourly(end_date, areas.as_deref(), columns)
        .await
        .context("Failed to fetch hourly prices");
    progress.finish_and_clear();

    finish(&result?, args, quiet)
}

/// Fetch an arbitrary market data page.
pub(crate) async fn fetch(
    page: u32,
    columns: &[String],
    args: &FetchArgs,
    quiet: bool,
) -> Result<()> {
    let client = args.client()?;
    let end_date = args.end_date()?;
    let areas = args.areas();
    let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
    debug!(page, ?end_date, ?areas, ?columns, "fetching page");

    let progress = spinner(quiet, format!("Fetching page {page}"));
    let result = client
        .fetch(page, &columns, end_date, areas.as_deref())
        .await
        .with_context(|| format!("Failed to fetch page {page}"));
    progress.finish_and_clear();

    finish(&result?, args, quiet)
}

/// Spinner shown while the request is in flight.
fn spinner(quiet: bool, message: String) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .expect("Invalid spinner template"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Write the result and print a summary.
fn finish(result: &FetchResult, args: &FetchArgs, quiet: bool) -> Result<()> {
    write_result(result, args.output.as_deref(), args.format, args.pretty)?;

    if !quiet {
        eprintln!(
            "Fetched {} points in {} (updated {})",
            result.point_count(),
            result.currency,
            result.updated.format("%Y-%m-%d %H:%M UTC")
        );
        if let Some(output) = &args.output {
            eprintln!("Output written to: {}", output.display());
        }
    }

    Ok(())
}
