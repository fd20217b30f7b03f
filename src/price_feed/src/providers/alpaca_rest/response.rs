use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct AlpacaBar {
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "c")]
    pub close: f64,
}

#[derive(Deserialize, Debug)]
pub struct AlpacaResponse {
    /// Alpaca sends `null` instead of `{}` when nothing matched.
    #[serde(default)]
    pub bars: Option<IndexMap<String, Vec<AlpacaBar>>>,
    pub next_page_token: Option<String>,
}

/// The subset of `GET /v2/assets/{symbol}` the analyzer uses.
#[derive(Deserialize, Debug)]
pub struct AlpacaAsset {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
}
