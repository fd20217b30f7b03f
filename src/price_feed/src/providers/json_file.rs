//! Reads a price history from a local JSON file.
//!
//! Two layouts are accepted. A document:
//!
//! ```json
//! { "symbol": "SPY", "name": "SPDR S&P 500 ETF", "timeframe": "6M", "stamp": "close",
//!   "points": [{ "timestamp": "2020-04-01T00:00:00Z", "close": 0.031 }] }
//! ```
//!
//! or a bare array of points, which is served for whatever symbol is requested.
//! Timestamps mark the end of each period unless `stamp` is `"open"`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use snafu::ResultExt;
use tracing::debug;

use crate::{
    models::{
        price_point::PricePoint,
        price_series::{BarStamp, PriceSeries},
        request_params::HistoryRequest,
        timeframe::TimeFrame,
    },
    providers::{IoSnafu, JsonSnafu, PriceProvider, ProviderError},
};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PriceFile {
    Document {
        #[serde(default)]
        symbol: Option<String>,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        timeframe: Option<TimeFrame>,
        #[serde(default)]
        stamp: BarStamp,
        points: Vec<PricePoint>,
    },
    Points(Vec<PricePoint>),
}

pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    async fn load(&self) -> Result<PriceFile, ProviderError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .context(IoSnafu { path: &self.path })?;
        serde_json::from_str(&text).context(JsonSnafu { path: &self.path })
    }
}

fn same_symbol(file_symbol: Option<&str>, requested: &str) -> bool {
    file_symbol.is_none_or(|s| s.trim().eq_ignore_ascii_case(requested.trim()))
}

#[async_trait]
impl PriceProvider for JsonFileProvider {
    async fn fetch_history(&self, request: &HistoryRequest) -> Result<PriceSeries, ProviderError> {
        let (file_symbol, timeframe, stamp, points) = match self.load().await? {
            PriceFile::Document {
                symbol,
                timeframe,
                stamp,
                points,
                ..
            } => (symbol, timeframe, stamp, points),
            PriceFile::Points(points) => (None, None, BarStamp::Close, points),
        };

        let symbol = request.symbol.trim().to_uppercase();
        let timeframe = timeframe.unwrap_or(request.timeframe);

        if !same_symbol(file_symbol.as_deref(), &symbol) {
            debug!(path = %self.path.display(), requested = %symbol, "file holds another symbol");
            return Ok(PriceSeries::empty(symbol, timeframe).with_stamp(stamp));
        }

        let total = points.len();
        let in_range: Vec<PricePoint> = points
            .into_iter()
            .filter(|p| p.timestamp >= request.start)
            .filter(|p| request.end.is_none_or(|end| p.timestamp < end))
            .collect();
        debug!(
            path = %self.path.display(),
            total,
            kept = in_range.len(),
            "loaded price file"
        );

        let mut series = PriceSeries::new(symbol, timeframe, in_range).with_stamp(stamp);
        series.sort_by_time();
        Ok(series)
    }

    async fn display_name(&self, symbol: &str) -> Result<Option<String>, ProviderError> {
        match self.load().await? {
            PriceFile::Document {
                symbol: file_symbol,
                name,
                ..
            } if same_symbol(file_symbol.as_deref(), symbol) => {
                Ok(name.filter(|n| !n.trim().is_empty()))
            }
            _ => Ok(None),
        }
    }
}
