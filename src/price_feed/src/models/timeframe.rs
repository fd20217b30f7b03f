//! Sampling interval of a price series.
//!
//! A [`TimeFrame`] pairs an amount with a [`TimeFrameUnit`]. Construction goes
//! through [`TimeFrame::new`], which enforces the amounts market-data vendors
//! accept for daily and coarser bars (single days and weeks, and 1/2/3/6/12
//! months). The textual form (`"1D"`, `"1W"`, `"6M"`) is used in price files.
//!
//! ```
//! use price_feed::models::timeframe::{TimeFrame, TimeFrameUnit};
//!
//! let tf: TimeFrame = "6M".parse().unwrap();
//! assert_eq!(tf, TimeFrame::semester());
//! assert_eq!(tf.unit, TimeFrameUnit::Month);
//! assert_eq!(tf.to_string(), "6M");
//! ```

use std::{fmt, str::FromStr};

use chrono::{DateTime, Days, Months, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimeFrameError {
    #[error("Invalid amount for {:?}: {}", unit, message)]
    InvalidAmount {
        unit: TimeFrameUnit,
        message: String,
    },

    #[error("Invalid input: {}", message)]
    InvalidInput { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFrameUnit {
    Day,
    Week,
    Month,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeFrame {
    pub amount: u32,
    pub unit: TimeFrameUnit,
}

impl TimeFrame {
    pub fn new(amount: u32, unit: TimeFrameUnit) -> Result<Self, TimeFrameError> {
        Self::validate(amount, unit)?;
        Ok(Self { amount, unit })
    }

    /// Six calendar months, the sampling interval of the seasonal analysis.
    pub const fn semester() -> Self {
        Self {
            amount: 6,
            unit: TimeFrameUnit::Month,
        }
    }

    /// Checks an amount/unit combination without constructing a value.
    pub fn validate(amount: u32, unit: TimeFrameUnit) -> Result<(), TimeFrameError> {
        match unit {
            TimeFrameUnit::Day | TimeFrameUnit::Week if amount != 1 => {
                Err(TimeFrameError::InvalidAmount {
                    unit,
                    message: "Day and Week units can only be used with amount 1".into(),
                })
            }
            TimeFrameUnit::Month if ![1, 2, 3, 6, 12].contains(&amount) => {
                Err(TimeFrameError::InvalidAmount {
                    unit,
                    message: "Month units can only be used with amount 1, 2, 3, 6 and 12".into(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Where a bar that opens at `start` closes, one period later.
    pub fn period_end(&self, start: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.unit {
            TimeFrameUnit::Day => start.checked_add_days(Days::new(u64::from(self.amount))),
            TimeFrameUnit::Week => start.checked_add_days(Days::new(7 * u64::from(self.amount))),
            TimeFrameUnit::Month => start.checked_add_months(Months::new(self.amount)),
        }
    }

    /// The unit spelled the way Alpaca expects it in the `timeframe` query parameter.
    pub fn alpaca_unit(&self) -> &'static str {
        match self.unit {
            TimeFrameUnit::Day => "Day",
            TimeFrameUnit::Week => "Week",
            TimeFrameUnit::Month => "Month",
        }
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let u = match self.unit {
            TimeFrameUnit::Day => "D",
            TimeFrameUnit::Week => "W",
            TimeFrameUnit::Month => "M",
        };
        write!(f, "{}{u}", self.amount)
    }
}

impl FromStr for TimeFrame {
    type Err = TimeFrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some(unit_start) = s.find(|c: char| !c.is_ascii_digit()) else {
            return Err(TimeFrameError::InvalidInput {
                message: format!("Missing timeframe unit in {s:?}"),
            });
        };
        let (digits, unit) = s.split_at(unit_start);
        let amount: u32 = digits.parse().map_err(|_| TimeFrameError::InvalidInput {
            message: format!("Invalid timeframe amount in {s:?}"),
        })?;
        // Months are "M"; a lone "m" is rejected so it is never read as minutes.
        let unit = match unit {
            "d" | "D" | "day" | "Day" => TimeFrameUnit::Day,
            "w" | "W" | "week" | "Week" => TimeFrameUnit::Week,
            "M" | "mo" | "month" | "Month" => TimeFrameUnit::Month,
            other => {
                return Err(TimeFrameError::InvalidInput {
                    message: format!("Invalid timeframe unit: {other}"),
                });
            }
        };
        TimeFrame::new(amount, unit)
    }
}

impl TryFrom<String> for TimeFrame {
    type Error = TimeFrameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeFrame> for String {
    fn from(value: TimeFrame) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod timeframe_creation_tests {
        use super::*;

        #[test]
        fn test_valid_day_and_week_timeframes() {
            let tf = TimeFrame::new(1, TimeFrameUnit::Day).unwrap();
            assert_eq!(tf.amount, 1);
            assert!(matches!(tf.unit, TimeFrameUnit::Day));
            assert!(TimeFrame::new(1, TimeFrameUnit::Week).is_ok());
        }

        #[test]
        fn test_valid_month_timeframes() {
            for amount in [1, 2, 3, 6, 12] {
                let tf = TimeFrame::new(amount, TimeFrameUnit::Month);
                assert!(tf.is_ok(), "Month with amount {} should be valid", amount);
            }
        }

        #[test]
        fn test_invalid_day_and_week_timeframes() {
            assert!(TimeFrame::new(0, TimeFrameUnit::Day).is_err());
            assert!(TimeFrame::new(2, TimeFrameUnit::Day).is_err());
            assert!(TimeFrame::new(2, TimeFrameUnit::Week).is_err());
        }

        #[test]
        fn test_invalid_month_timeframe() {
            for amount in [0, 4, 5, 7, 8, 9, 10, 11, 13] {
                assert!(
                    TimeFrame::new(amount, TimeFrameUnit::Month).is_err(),
                    "Month with amount {} should be invalid",
                    amount
                );
            }
        }

        #[test]
        fn test_error_messages() {
            match TimeFrame::new(4, TimeFrameUnit::Month) {
                Err(TimeFrameError::InvalidAmount { unit, message }) => {
                    assert!(matches!(unit, TimeFrameUnit::Month));
                    assert!(message.contains("Month units"));
                }
                _ => panic!("Expected InvalidAmount error"),
            }
        }

        #[test]
        fn semester_is_six_months() {
            let tf = TimeFrame::semester();
            assert_eq!(tf.amount, 6);
            assert_eq!(tf.unit, TimeFrameUnit::Month);
            assert!(TimeFrame::validate(tf.amount, tf.unit).is_ok());
        }
    }

    mod period_end_tests {
        use chrono::TimeZone;

        use super::*;

        #[test]
        fn semester_bar_opening_in_april_closes_in_october() {
            let start = Utc.with_ymd_and_hms(2020, 4, 1, 4, 0, 0).unwrap();
            assert_eq!(
                TimeFrame::semester().period_end(start),
                Some(Utc.with_ymd_and_hms(2020, 10, 1, 4, 0, 0).unwrap())
            );
        }

        #[test]
        fn october_bar_closes_next_april() {
            let start = Utc.with_ymd_and_hms(2020, 10, 1, 0, 0, 0).unwrap();
            assert_eq!(
                TimeFrame::semester().period_end(start),
                Some(Utc.with_ymd_and_hms(2021, 4, 1, 0, 0, 0).unwrap())
            );
        }

        #[test]
        fn day_and_week_bars() {
            let start = Utc.with_ymd_and_hms(2020, 2, 28, 0, 0, 0).unwrap();
            let day = TimeFrame::new(1, TimeFrameUnit::Day).unwrap();
            let week = TimeFrame::new(1, TimeFrameUnit::Week).unwrap();
            assert_eq!(day.period_end(start), Some(Utc.with_ymd_and_hms(2020, 2, 29, 0, 0, 0).unwrap()));
            assert_eq!(week.period_end(start), Some(Utc.with_ymd_and_hms(2020, 3, 6, 0, 0, 0).unwrap()));
        }
    }

    mod parsing_tests {
        use super::*;

        #[test]
        fn parses_short_forms() {
            assert_eq!(
                "1D".parse::<TimeFrame>().unwrap(),
                TimeFrame::new(1, TimeFrameUnit::Day).unwrap()
            );
            assert_eq!(
                "1week".parse::<TimeFrame>().unwrap(),
                TimeFrame::new(1, TimeFrameUnit::Week).unwrap()
            );
            assert_eq!("6M".parse::<TimeFrame>().unwrap(), TimeFrame::semester());
            assert_eq!(" 6month ".parse::<TimeFrame>().unwrap(), TimeFrame::semester());
        }

        #[test]
        fn rejects_bad_input() {
            assert!("".parse::<TimeFrame>().is_err());
            assert!("M".parse::<TimeFrame>().is_err());
            assert!("6".parse::<TimeFrame>().is_err());
            assert!("6x".parse::<TimeFrame>().is_err());
            assert!("5M".parse::<TimeFrame>().is_err());
            assert!("15m".parse::<TimeFrame>().is_err());
            assert!("1h".parse::<TimeFrame>().is_err());
        }

        #[test]
        fn display_round_trips() {
            for tf in [
                TimeFrame::semester(),
                TimeFrame::new(1, TimeFrameUnit::Day).unwrap(),
                TimeFrame::new(1, TimeFrameUnit::Week).unwrap(),
            ] {
                assert_eq!(tf.to_string().parse::<TimeFrame>().unwrap(), tf);
            }
        }

        #[test]
        fn serde_uses_text_form() {
            let json = serde_json::to_string(&TimeFrame::semester()).unwrap();
            assert_eq!(json, "\"6M\"");
            let back: TimeFrame = serde_json::from_str(&json).unwrap();
            assert_eq!(back, TimeFrame::semester());
            assert!(serde_json::from_str::<TimeFrame>("\"7M\"").is_err());
        }
    }
}
