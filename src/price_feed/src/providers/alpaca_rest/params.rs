use serde::{Deserialize, Serialize};

use crate::{
    models::{
        request_params::{HistoryRequest, ProviderParams},
        timeframe::TimeFrame,
    },
    providers::{ProviderError, ValidationSnafu},
};

/// Specifies the corporate action adjustment for stock data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    #[default]
    Raw,
    Split,
    Dividend,
    All,
}

impl Adjustment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Adjustment::Raw => "raw",
            Adjustment::Split => "split",
            Adjustment::Dividend => "dividend",
            Adjustment::All => "all",
        }
    }
}

/// Specifies the source feed for stock data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Feed {
    #[default]
    Sip,
    Iex,
    Otc,
}

impl Feed {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feed::Sip => "sip",
            Feed::Iex => "iex",
            Feed::Otc => "otc",
        }
    }
}

/// Alpaca-specific parameters for a bars request.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct AlpacaBarsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustment: Option<Adjustment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed: Option<Feed>,
    /// Bars per page; Alpaca caps this at 10000.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Alpaca accepts 1Day, 1Week and 1/2/3/6/12Month among the units modelled here.
pub fn validate_timeframe(timeframe: &TimeFrame) -> Result<(), ProviderError> {
    TimeFrame::validate(timeframe.amount, timeframe.unit).map_err(|e| {
        ValidationSnafu {
            message: format!("unsupported Alpaca timeframe {timeframe}: {e}"),
        }
        .build()
    })
}

/// Builds the query string for `GET /v2/stocks/bars`, without the page token.
pub fn construct_params(request: &HistoryRequest) -> Vec<(String, String)> {
    let mut query = vec![
        ("symbols".to_string(), request.symbol.trim().to_uppercase()),
        (
            "timeframe".to_string(),
            format!("{}{}", request.timeframe.amount, request.timeframe.alpaca_unit()),
        ),
        ("start".to_string(), request.start.to_rfc3339()),
    ];
    if let Some(end) = request.end {
        query.push(("end".to_string(), end.to_rfc3339()));
    }

    if let ProviderParams::Alpaca(alpaca) = &request.provider_specific {
        if let Some(adjustment) = alpaca.adjustment {
            query.push(("adjustment".to_string(), adjustment.as_str().to_string()));
        }
        if let Some(feed) = alpaca.feed {
            query.push(("feed".to_string(), feed.as_str().to_string()));
        }
        if let Some(limit) = alpaca.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
    }

    query
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::models::timeframe::TimeFrameUnit;

    fn value<'a>(query: &'a [(String, String)], key: &str) -> Option<&'a str> {
        query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn full_history_query() {
        let query = construct_params(&HistoryRequest::full_history(" aapl "));
        assert_eq!(value(&query, "symbols"), Some("AAPL"));
        assert_eq!(value(&query, "timeframe"), Some("6Month"));
        assert_eq!(value(&query, "start"), Some("1970-01-01T00:00:00+00:00"));
        assert_eq!(value(&query, "end"), None);
        assert_eq!(value(&query, "feed"), None);
    }

    #[test]
    fn alpaca_specific_options_are_forwarded() {
        let mut request = HistoryRequest::full_history("SPY").with_provider_params(
            ProviderParams::Alpaca(AlpacaBarsParams {
                adjustment: Some(Adjustment::All),
                feed: Some(Feed::Iex),
                limit: Some(1000),
            }),
        );
        request.end = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());

        let query = construct_params(&request);
        assert_eq!(value(&query, "adjustment"), Some("all"));
        assert_eq!(value(&query, "feed"), Some("iex"));
        assert_eq!(value(&query, "limit"), Some("1000"));
        assert_eq!(value(&query, "sort"), None);
        assert_eq!(value(&query, "end"), Some("2024-01-01T00:00:00+00:00"));
    }

    #[test]
    fn rejects_timeframes_alpaca_does_not_serve() {
        assert!(validate_timeframe(&TimeFrame::semester()).is_ok());

        let bogus = TimeFrame {
            amount: 5,
            unit: TimeFrameUnit::Month,
        };
        let err = validate_timeframe(&bogus).unwrap_err();
        assert!(matches!(err, ProviderError::Validation { .. }));
        assert!(err.to_string().contains("5M"));
    }

    #[test]
    fn params_deserialize_from_snake_case() {
        let params: AlpacaBarsParams =
            serde_json::from_str(r#"{"adjustment":"split","feed":"iex"}"#).unwrap();
        assert_eq!(params.adjustment, Some(Adjustment::Split));
        assert_eq!(params.feed, Some(Feed::Iex));
        assert_eq!(params.limit, None);
    }
}
