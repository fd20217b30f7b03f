use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::{
    config::{AppConfig, ConfigError, ProviderKind, ValueMode},
    runner::AnalysisRequest,
};

#[derive(Parser, Debug)]
#[command(
    name = "seasonal-returns",
    author,
    version,
    about = "Compare May-October against November-April half-year returns"
)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the seasonal comparison for one instrument
    Analyze(AnalyzeArgs),
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Instrument identifier (e.g. "SPY")
    #[arg(short, long)]
    pub symbol: String,

    /// Where to read the price history from
    #[arg(long, value_enum)]
    pub source: Option<ProviderKind>,

    /// Price file for the json source; implies `--source json` when given alone
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Whether provider values are period returns or price levels (prices for alpaca, returns for json when unset)
    #[arg(long, value_enum)]
    pub value_mode: Option<ValueMode>,

    /// Calendar month whose observation closes the May-Oct semester
    #[arg(long, value_name = "MONTH", value_parser = clap::value_parser!(u32).range(1..=12))]
    pub may_oct_month: Option<u32>,

    /// Calendar month whose observation closes the Nov-Apr semester
    #[arg(long, value_name = "MONTH", value_parser = clap::value_parser!(u32).range(1..=12))]
    pub nov_apr_month: Option<u32>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also write the JSON report to this file
    #[arg(long, value_name = "FILE")]
    pub plot_json: Option<PathBuf>,
}

impl AnalyzeArgs {
    /// Overlays the flags that were given onto `config`.
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(path) = &self.input {
            config.provider.path = Some(path.clone());
            if self.source.is_none() {
                config.provider.kind = ProviderKind::JsonFile;
            }
        }
        if let Some(kind) = self.source {
            config.provider.kind = kind;
        }
        if let Some(mode) = self.value_mode {
            config.analysis.value_mode = Some(mode);
        }
        if let Some(month) = self.may_oct_month {
            config.analysis.may_oct_anchor_month = month;
        }
        if let Some(month) = self.nov_apr_month {
            config.analysis.nov_apr_anchor_month = month;
        }
        config
    }

    /// Builds the run request from the merged configuration.
    pub fn request(&self, config: &AppConfig) -> Result<AnalysisRequest, ConfigError> {
        Ok(AnalysisRequest::new(self.symbol.as_str())
            .with_anchors(config.analysis.anchors()?)
            .with_value_mode(config.value_mode())
            .with_provider_params(config.provider.request_params()))
    }
}
