//! Long-form ("melted") table for grouped bar charts.

use serde::Serialize;

use crate::{extractor::PairedYear, semester::Semester};

/// One bar: a semester's return for one year, in percent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotRow {
    pub year: i32,
    pub category: Semester,
    pub label: &'static str,
    /// Unrounded; round only when rendering.
    pub return_pct: f64,
}

impl PlotRow {
    /// On-chart text for the bar, two decimals.
    pub fn value_label(&self) -> String {
        format!("{:.2}", self.return_pct)
    }
}

/// Melts the paired table: every May-Oct row by year, then every Nov-Apr row by year.
pub fn melt(paired: &[PairedYear]) -> Vec<PlotRow> {
    Semester::ALL
        .iter()
        .flat_map(|&semester| {
            paired.iter().map(move |p| PlotRow {
                year: p.year,
                category: semester,
                label: semester.label(),
                return_pct: p.value(semester) * 100.0,
            })
        })
        .collect()
}
