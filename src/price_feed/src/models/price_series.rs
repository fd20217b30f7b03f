//! A collection of periodic observations for a single symbol and timeframe.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{price_point::PricePoint, timeframe::TimeFrame};

/// Which end of its period an observation's timestamp marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarStamp {
    /// The period's opening instant, as Alpaca stamps its bars.
    Open,
    /// The instant the value was observed, at the end of its period.
    #[default]
    Close,
}

/// Represents the full observation history of a single symbol.
///
/// Groups a vector of [`PricePoint`]s with their symbol and [`TimeFrame`],
/// making the data set self-describing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// The symbol this data represents (e.g., "AAPL", "SPY").
    pub symbol: String,
    /// The sampling interval of the series.
    pub timeframe: TimeFrame,
    /// Observations, normally in ascending timestamp order.
    pub points: Vec<PricePoint>,
    #[serde(default)]
    pub stamp: BarStamp,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, timeframe: TimeFrame, points: Vec<PricePoint>) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe,
            points,
            stamp: BarStamp::Close,
        }
    }

    pub fn with_stamp(mut self, stamp: BarStamp) -> Self {
        self.stamp = stamp;
        self
    }

    /// An empty series, which is what providers return for unknown identifiers.
    pub fn empty(symbol: impl Into<String>, timeframe: TimeFrame) -> Self {
        Self::new(symbol, timeframe, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Removes observations whose close is NaN or infinite and returns how many were dropped.
    pub fn drop_non_finite(&mut self) -> usize {
        let before = self.points.len();
        self.points.retain(|p| p.close.is_finite());
        before - self.points.len()
    }

    /// Sorts observations by timestamp, ascending. Stable for equal timestamps.
    pub fn sort_by_time(&mut self) {
        self.points.sort_by_key(|p| p.timestamp);
    }

    /// Restamps open-stamped observations at the end of their period.
    ///
    /// A 6-month bar opening in April closes in October, so its value is moved to
    /// October. Close-stamped series are returned unchanged.
    pub fn to_close_stamped(&self) -> PriceSeries {
        let points = match self.stamp {
            BarStamp::Close => self.points.clone(),
            BarStamp::Open => self
                .points
                .iter()
                .filter_map(|p| {
                    let end = self.timeframe.period_end(p.timestamp);
                    if end.is_none() {
                        debug!(timestamp = %p.timestamp, "period end out of range");
                    }
                    end.map(|t| PricePoint::new(t, p.close))
                })
                .collect(),
        };
        PriceSeries::new(self.symbol.clone(), self.timeframe, points)
    }

    /// Converts absolute closes into fractional period-over-period returns.
    ///
    /// Each output point holds `close / previous_close - 1` and is stamped where
    /// the period of that return ends: the later observation's timestamp for
    /// close-stamped series, one period after it for open-stamped bars. The first
    /// observation has no predecessor and is dropped, as is any period whose
    /// predecessor closed at zero.
    pub fn to_period_returns(&self) -> PriceSeries {
        let closed = self.to_close_stamped();
        let points = closed
            .points
            .windows(2)
            .filter(|pair| pair[0].close != 0.0)
            .map(|pair| PricePoint::new(pair[1].timestamp, pair[1].close / pair[0].close - 1.0))
            .collect();

        PriceSeries::new(self.symbol.clone(), self.timeframe, points)
    }
}
