//! TOML configuration for the analyzer.
//!
//! Every key is optional; an absent file is the same as an empty one.
//!
//! ```toml
//! [analysis]
//! may_oct_anchor_month = 10
//! nov_apr_anchor_month = 4
//! value_mode = "prices"         # or "returns"; defaults per provider kind
//!
//! [provider]
//! kind = "alpaca"               # or "json_file"
//! path = "data/spy.json"        # json_file only
//! adjustment = "all"
//! feed = "iex"
//! limit = 1000                  # bars per page
//!
//! [provider.alpaca]
//! requests_per_minute = 200
//! timeout_secs = 30
//! ```
//!
//! Command-line flags override these values.

use std::path::{Path, PathBuf};

use price_feed::{
    models::request_params::ProviderParams,
    providers::alpaca_rest::{
        params::{Adjustment, AlpacaBarsParams, Feed},
        provider::AlpacaSettings,
    },
};
use serde::{Deserialize, Serialize};
use shared_utils::config::{ConfigFileError, load_toml};
use thiserror::Error;

use crate::{
    errors::AnalysisError,
    semester::{AnchorMonths, Semester},
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    File(#[from] ConfigFileError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] AnalysisError),

    #[error("Invalid configuration: {0}")]
    Missing(String),
}

/// How the `close` values delivered by the provider are to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum ValueMode {
    /// Values already are fractional period returns.
    #[default]
    Returns,
    /// Values are price levels; returns are derived period over period.
    Prices,
}

/// Where price history comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[default]
    Alpaca,
    #[cfg_attr(feature = "cli", value(alias = "json"))]
    JsonFile,
}

impl ProviderKind {
    /// What the provider's values are when the config does not say.
    ///
    /// Alpaca bars carry closing prices. Price files are taken to hold returns.
    pub fn default_value_mode(self) -> ValueMode {
        match self {
            ProviderKind::Alpaca => ValueMode::Prices,
            ProviderKind::JsonFile => ValueMode::Returns,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub analysis: AnalysisSettings,
    pub provider: ProviderSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisSettings {
    pub may_oct_anchor_month: u32,
    pub nov_apr_anchor_month: u32,
    /// `None` defers to [`ProviderKind::default_value_mode`].
    pub value_mode: Option<ValueMode>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            may_oct_anchor_month: Semester::MayOct.default_anchor_month(),
            nov_apr_anchor_month: Semester::NovApr.default_anchor_month(),
            value_mode: None,
        }
    }
}

impl AnalysisSettings {
    pub fn anchors(&self) -> Result<AnchorMonths, AnalysisError> {
        AnchorMonths::new(self.may_oct_anchor_month, self.nov_apr_anchor_month)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    /// Price file for [`ProviderKind::JsonFile`].
    pub path: Option<PathBuf>,
    pub adjustment: Option<Adjustment>,
    pub feed: Option<Feed>,
    /// Alpaca page size.
    pub limit: Option<u32>,
    pub alpaca: AlpacaSettings,
}

impl ProviderSettings {
    /// Provider-specific request parameters implied by these settings.
    pub fn request_params(&self) -> ProviderParams {
        match self.kind {
            ProviderKind::Alpaca => ProviderParams::Alpaca(AlpacaBarsParams {
                adjustment: self.adjustment,
                feed: self.feed,
                limit: self.limit,
            }),
            ProviderKind::JsonFile => ProviderParams::None,
        }
    }

    /// The price file, required when reading from JSON.
    pub fn json_path(&self) -> Result<&Path, ConfigError> {
        self.path
            .as_deref()
            .ok_or_else(|| ConfigError::Missing("provider.path is required for json_file".into()))
    }
}

impl AppConfig {
    /// The configured value mode, or the provider kind's default.
    pub fn value_mode(&self) -> ValueMode {
        self.analysis
            .value_mode
            .unwrap_or_else(|| self.provider.kind.default_value_mode())
    }

    /// Loads and validates a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: AppConfig = load_toml(path)?;
        config.analysis.anchors()?;
        Ok(config)
    }

    /// Loads `path` if given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
