use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{models::timeframe::TimeFrame, providers::alpaca_rest::params::AlpacaBarsParams};

/// Universal parameters for requesting the price history of one instrument.
///
/// Vendor-agnostic; the standard input for all
/// [`PriceProvider`](crate::providers::PriceProvider) implementations.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryRequest {
    /// The instrument identifier (e.g., `"AAPL"`).
    pub symbol: String,

    /// The sampling interval. **Validation of allowed values is performed by each
    /// provider implementation, according to its own API rules.**
    pub timeframe: TimeFrame,

    /// Start of the requested time range (inclusive, UTC).
    pub start: DateTime<Utc>,

    /// End of the requested time range (exclusive, UTC). `None` means "up to now".
    pub end: Option<DateTime<Utc>>,

    /// Optional, provider-specific parameters.
    #[serde(default)]
    pub provider_specific: ProviderParams,
}

impl HistoryRequest {
    /// Everything the provider has for `symbol`, sampled every six months.
    pub fn full_history(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe: TimeFrame::semester(),
            start: DateTime::<Utc>::UNIX_EPOCH,
            end: None,
            provider_specific: ProviderParams::None,
        }
    }

    pub fn with_provider_params(mut self, params: ProviderParams) -> Self {
        self.provider_specific = params;
        self
    }
}

/// Holds provider-specific request parameters.
///
/// Lets callers pass per-request options to a particular provider without
/// cluttering the universal [`HistoryRequest`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub enum ProviderParams {
    #[default]
    None,
    Alpaca(AlpacaBarsParams),
}
