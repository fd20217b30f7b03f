use std::{num::NonZeroU32, time::Duration};

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::{Client, StatusCode, header};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use shared_utils::env::get_env_var;
use snafu::ResultExt;
use tracing::{debug, info};

use crate::{
    models::{
        price_point::PricePoint,
        price_series::{BarStamp, PriceSeries},
        request_params::HistoryRequest,
    },
    providers::{
        ApiSnafu, ClientBuildSnafu, InvalidApiKeySnafu, MissingEnvVarSnafu, PriceProvider,
        ProviderError, ProviderInitError, ReqwestSnafu,
        alpaca_rest::{
            params::{construct_params, validate_timeframe},
            response::{AlpacaAsset, AlpacaBar, AlpacaResponse},
        },
    },
};

const BARS_URL: &str = "https://data.alpaca.markets/v2/stocks/bars";
const ASSETS_URL: &str = "https://api.alpaca.markets/v2/assets";

/// Free-tier Alpaca allows 200 requests per minute.
const DEFAULT_REQUESTS_PER_MINUTE: u32 = 200;

/// Tunables for [`AlpacaProvider`]; deserializable from the `[provider]` config table.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AlpacaSettings {
    /// Upper bound on requests sent per minute.
    pub requests_per_minute: u32,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for AlpacaSettings {
    fn default() -> Self {
        Self {
            requests_per_minute: DEFAULT_REQUESTS_PER_MINUTE,
            timeout_secs: 30,
        }
    }
}

pub struct AlpacaProvider {
    client: Client,
    limiter: DefaultDirectRateLimiter,
    _api_key: SecretString,
    _secret_key: SecretString,
}

impl AlpacaProvider {
    /// Creates a new Alpaca provider with default settings.
    ///
    /// Reads API keys from the `APCA_API_KEY_ID` and `APCA_API_SECRET_KEY`
    /// environment variables.
    pub fn new() -> Result<Self, ProviderInitError> {
        Self::with_settings(&AlpacaSettings::default())
    }

    pub fn with_settings(settings: &AlpacaSettings) -> Result<Self, ProviderInitError> {
        let api_key =
            SecretString::new(get_env_var("APCA_API_KEY_ID").context(MissingEnvVarSnafu)?.into());
        let secret_key = SecretString::new(
            get_env_var("APCA_API_SECRET_KEY")
                .context(MissingEnvVarSnafu)?
                .into(),
        );

        let mut headers = header::HeaderMap::new();
        headers.insert(
            "APCA-API-KEY-ID",
            header::HeaderValue::from_str(api_key.expose_secret()).context(InvalidApiKeySnafu)?,
        );
        headers.insert(
            "APCA-API-SECRET-KEY",
            header::HeaderValue::from_str(secret_key.expose_secret())
                .context(InvalidApiKeySnafu)?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context(ClientBuildSnafu)?;

        let per_minute =
            NonZeroU32::new(settings.requests_per_minute).unwrap_or(nonzero!(200u32));

        Ok(Self {
            client,
            limiter: RateLimiter::direct(Quota::per_minute(per_minute)),
            _api_key: api_key,
            _secret_key: secret_key,
        })
    }

    async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<reqwest::Response, ProviderError> {
        self.limiter.until_ready().await;
        self.client
            .get(url)
            .query(query)
            .send()
            .await
            .context(ReqwestSnafu)
    }
}

async fn api_error(response: reqwest::Response) -> ProviderError {
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown API error".to_string());
    ApiSnafu { status, message }.build()
}

#[async_trait]
impl PriceProvider for AlpacaProvider {
    async fn fetch_history(&self, request: &HistoryRequest) -> Result<PriceSeries, ProviderError> {
        // Validate the timeframe before proceeding.
        validate_timeframe(&request.timeframe)?;

        let symbol = request.symbol.trim().to_uppercase();
        let mut all_bars: Vec<AlpacaBar> = Vec::new();
        let mut next_page_token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let mut query_params = construct_params(request);
            if let Some(token) = &next_page_token {
                query_params.push(("page_token".to_string(), token.clone()));
            }

            let response = self.get(BARS_URL, &query_params).await?;
            if !response.status().is_success() {
                return Err(api_error(response).await);
            }

            let page = response.json::<AlpacaResponse>().await.context(ReqwestSnafu)?;
            pages += 1;

            // Keys come back upper-cased; anything else is not ours.
            for (key, bars) in page.bars.unwrap_or_default() {
                if key.eq_ignore_ascii_case(&symbol) {
                    all_bars.extend(bars);
                }
            }

            match page.next_page_token {
                Some(token) => next_page_token = Some(token),
                None => break,
            }
        }

        info!(symbol = %symbol, bars = all_bars.len(), pages, "fetched Alpaca bars");

        let points = all_bars
            .into_iter()
            .map(|bar| PricePoint::new(bar.timestamp, bar.close))
            .collect();
        // Alpaca's `t` is the bar's opening instant.
        let mut series =
            PriceSeries::new(symbol, request.timeframe, points).with_stamp(BarStamp::Open);
        series.sort_by_time();
        Ok(series)
    }

    async fn display_name(&self, symbol: &str) -> Result<Option<String>, ProviderError> {
        let url = format!("{ASSETS_URL}/{}", symbol.trim().to_uppercase());
        let response = self.get(&url, &[]).await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(symbol, "asset lookup found nothing");
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let asset = response.json::<AlpacaAsset>().await.context(ReqwestSnafu)?;
        Ok(asset.name.filter(|name| !name.trim().is_empty()))
    }
}
