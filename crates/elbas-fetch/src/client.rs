//! HTTP client for market data pages.

use chrono::NaiveDate;
use chrono_tz::Tz;
use elbas_types::{ElbasError, FetchResult, HOURLY, HOURLY_COLUMNS, PriceQuery};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::parse_body;
use crate::url::{API_BASE, page_url, query_params};

/// Configuration for the price client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Currency to request; responses in any other currency are rejected.
    pub currency: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Timezone of zone-less timestamps in responses.
    pub timezone: Tz,
    /// Base URL of the market data pages.
    pub base_url: String,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            currency: "EUR".to_string(),
            timeout: Duration::from_secs(30),
            timezone: chrono_tz::Europe::Stockholm,
            base_url: API_BASE.to_string(),
            user_agent: format!("elbas/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Errors that can occur while transferring a page.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error status.
    #[error("Server error: {status}")]
    ServerError {
        /// HTTP status code.
        status: u16,
    },
}

impl From<FetchError> for ElbasError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::ServerError { status } => Self::ServerError { status },
            FetchError::Http(e) if e.is_timeout() => Self::Timeout(e.to_string()),
            FetchError::Http(e) => Self::Http(e.to_string()),
        }
    }
}

/// Nord Pool Elbas price client.
#[derive(Debug, Clone)]
pub struct ElbasClient {
    client: Client,
    config: ClientConfig,
}

impl ElbasClient {
    /// Page id of the hourly product table.
    pub const HOURLY: u32 = HOURLY;

    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches a market data page.
    ///
    /// # Arguments
    ///
    /// * `data_type` - Page id, e.g. [`Self::HOURLY`]
    /// * `columns` - Columns to keep; empty keeps every column
    /// * `end_date` - Last delivery date, defaults to yesterday
    /// * `areas` - Area codes such as `["FI"]`; `None` uses the API's default scope
    ///
    /// Only the first area receives data in the result.
    ///
    /// # Errors
    ///
    /// Returns [`ElbasError::CurrencyMismatch`] if the page is priced in another
    /// currency. A non-success status yields [`ElbasError::ServerError`] and an
    /// elapsed timeout [`ElbasError::Timeout`]; other transport, JSON or value
    /// conversion failures map to their own variants.
    pub async fn fetch(
        &self,
        data_type: u32,
        columns: &[&str],
        end_date: Option<NaiveDate>,
        areas: Option<&[&str]>,
    ) -> Result<FetchResult, ElbasError> {
        let mut query = PriceQuery::new(data_type).with_columns(columns.iter().copied());
        if let Some(end_date) = end_date {
            query = query.with_end_date(end_date);
        }
        if let Some(areas) = areas {
            query = query.with_areas(areas.iter().copied());
        }
        self.fetch_query(&query).await
    }

    /// Fetches the hourly product table.
    ///
    /// `columns` defaults to [`HOURLY_COLUMNS`]. See [`Self::fetch`].
    ///
    /// # Errors
    ///
    /// See [`Self::fetch`].
    pub async fn hourly(
        &self,
        end_date: Option<NaiveDate>,
        areas: Option<&[&str]>,
        columns: Option<&[&str]>,
    ) -> Result<FetchResult, ElbasError> {
        let columns = columns.unwrap_or(HOURLY_COLUMNS);
        self.fetch(Self::HOURLY, columns, end_date, areas).await
    }

    /// Fetches and transforms the page described by `query`.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch`].
    pub async fn fetch_query(&self, query: &PriceQuery) -> Result<FetchResult, ElbasError> {
        let body = self.fetch_body(query).await?;
        let result = parse_body(&body, &self.config.currency, query, self.config.timezone)?;
        info!(
            page = query.data_type,
            area = query.primary_area(),
            end_date = %query.end_date,
            points = result.point_count(),
            "fetched market data"
        );
        Ok(result)
    }

    /// Performs the page request and returns the raw body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server answers with a
    /// non-success status.
    pub async fn fetch_body(&self, query: &PriceQuery) -> Result<String, FetchError> {
        let url = page_url(&self.config.base_url, query.data_type);
        let params = query_params(&self.config.currency, query);
        debug!(%url, ?params, "requesting market data page");

        let response = self.client.get(&url).query(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::ServerError {
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}
