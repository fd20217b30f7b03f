//! Provider abstraction for market data sources.
//!
//! This module defines the [`PriceProvider`] trait, the single seam through which
//! the analyzer obtains the price history of an instrument. Each concrete vendor
//! (Alpaca's REST API, a local JSON file) implements it and handles its own
//! validation and wire format.
//!
//! The trait is designed for async usage and supports dynamic dispatch
//! (`dyn PriceProvider`) for runtime selection of providers.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use price_feed::models::{price_series::PriceSeries, request_params::HistoryRequest};
//! use price_feed::providers::{PriceProvider, ProviderError};
//!
//! struct MyProvider;
//!
//! #[async_trait]
//! impl PriceProvider for MyProvider {
//!     async fn fetch_history(
//!         &self,
//!         request: &HistoryRequest,
//!     ) -> Result<PriceSeries, ProviderError> {
//!         Ok(PriceSeries::empty(request.symbol.clone(), request.timeframe))
//!     }
//! }
//! ```

pub mod alpaca_rest;
pub mod json_file;

use std::path::PathBuf;

use async_trait::async_trait;
use shared_utils::env::MissingEnvVarError;
use snafu::{Backtrace, Snafu};

use crate::models::{price_series::PriceSeries, request_params::HistoryRequest};

/// Trait for fetching the price history of one instrument from a market data provider.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetches the observations described by `request`.
    ///
    /// # Returns
    ///
    /// * `Ok(PriceSeries)` - The observations in ascending time order. An unknown
    ///   identifier yields an empty series rather than an error.
    /// * `Err(ProviderError)` - Transport, API or decoding failures.
    async fn fetch_history(&self, request: &HistoryRequest) -> Result<PriceSeries, ProviderError>;

    /// Looks up a human-readable name for `symbol`, if the provider knows one.
    async fn display_name(&self, _symbol: &str) -> Result<Option<String>, ProviderError> {
        Ok(None)
    }
}

/// Errors that can occur during the creation of a provider instance
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// missed environment variable.
    #[snafu(display("Missing environment variable: {source}"))]
    MissingEnvVar {
        source: MissingEnvVarError,
        backtrace: Backtrace,
    },

    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// API key contains invalid characters.
    #[snafu(display("Invalid API key format: {source}"))]
    InvalidApiKey {
        source: reqwest::header::InvalidHeaderValue,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `PriceProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The provider's API answered with a non-success status.
    #[snafu(display("API error ({status}): {message}"))]
    Api {
        status: u16,
        message: String,
        backtrace: Backtrace,
    },

    /// The request parameters were invalid for this specific provider.
    #[snafu(display("Invalid parameters for provider: {message}"))]
    Validation {
        message: String,
        backtrace: Backtrace,
    },

    /// A local data file could not be read.
    #[snafu(display("Failed to read {}: {source}", path.display()))]
    Io {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// A local data file is not valid JSON for the expected shape.
    #[snafu(display("Malformed price data in {}: {source}", path.display()))]
    Json {
        path: PathBuf,
        source: serde_json::Error,
        backtrace: Backtrace,
    },

    /// An error during provider configuration or initialization.
    #[snafu(display("Provider initialization error: {source}"), context(false))]
    Init {
        #[snafu(backtrace)]
        source: ProviderInitError,
    },
}
