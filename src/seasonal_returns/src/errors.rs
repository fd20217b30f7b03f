use price_feed::providers::ProviderError;
use thiserror::Error;

use crate::semester::Semester;

/// The unified error type for the `seasonal_returns` crate.
///
/// Degenerate-but-valid results (no overlapping years, a single year) are not
/// errors; they surface as empty tables and NaN statistics.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The instrument identifier was blank.
    #[error("No symbol given")]
    EmptySymbol,

    /// The provider returned no observations for the symbol.
    #[error("No price data for {symbol}. Check that the symbol is correct.")]
    NoData { symbol: String },

    /// Two anchor-month observations fell in the same year for one semester.
    #[error("Duplicate {semester} observation for {year}")]
    DuplicateYear { semester: Semester, year: i32 },

    /// Anchor months outside 1-12, or both semesters anchored on the same month.
    #[error("Invalid anchor months: {message}")]
    InvalidAnchors { message: String },

    /// An error originating from the market data provider.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}
