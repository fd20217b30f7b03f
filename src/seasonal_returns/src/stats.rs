//! Per-semester summary statistics.

use serde::Serialize;
use statrs::statistics::Statistics;

use crate::{extractor::PairedYear, semester::Semester};

/// Summary of one semester's fractional returns, reported in percent.
///
/// `mean_pct` is NaN when there are no values and `std_dev_pct` is NaN with fewer
/// than two; both serialize to `null` in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryStats {
    pub mean_pct: f64,
    /// Sample standard deviation (n - 1 divisor).
    pub std_dev_pct: f64,
    pub win_count: usize,
    pub loss_count: usize,
    pub total_count: usize,
    /// `win_count / total_count`, or 0 when there are no values.
    pub win_rate: f64,
}

impl CategoryStats {
    pub fn from_values(values: &[f64]) -> Self {
        let total_count = values.len();
        let win_count = values.iter().filter(|v| **v > 0.0).count();
        let loss_count = values.iter().filter(|v| **v < 0.0).count();
        let win_rate = if total_count > 0 {
            win_count as f64 / total_count as f64
        } else {
            0.0
        };

        Self {
            mean_pct: values.mean() * 100.0,
            std_dev_pct: values.std_dev() * 100.0,
            win_count,
            loss_count,
            total_count,
            win_rate,
        }
    }

    /// Values that are exactly zero count as neither a win nor a loss.
    pub fn flat_count(&self) -> usize {
        self.total_count - self.win_count - self.loss_count
    }
}

/// Statistics for one semester over the joined years.
pub fn semester_stats(paired: &[PairedYear], semester: Semester) -> CategoryStats {
    let values: Vec<f64> = paired.iter().map(|p| p.value(semester)).collect();
    CategoryStats::from_values(&values)
}
