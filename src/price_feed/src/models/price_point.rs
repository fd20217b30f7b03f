//! A single periodic observation of an instrument.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// One `(timestamp, close)` observation.
///
/// Whether `close` is a price level or a fractional period return depends on the
/// feed; see [`PriceSeries::to_period_returns`](super::price_series::PriceSeries::to_period_returns).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// The timestamp for this observation (UTC).
    pub timestamp: DateTime<Utc>,

    /// Closing value for the period.
    pub close: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, close: f64) -> Self {
        Self { timestamp, close }
    }

    /// Calendar year of the observation.
    pub fn year(&self) -> i32 {
        self.timestamp.year()
    }

    /// Calendar month of the observation, 1-based.
    pub fn month(&self) -> u32 {
        self.timestamp.month()
    }
}
