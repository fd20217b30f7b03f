//! What the presentation layer receives, and its terminal rendering.

use std::fmt;

use serde::Serialize;

use crate::{
    analysis::SeasonalAnalysis,
    config::ValueMode,
    semester::{AnchorMonths, Semester},
    stats::CategoryStats,
};

/// Shown when the provider has no name for the instrument.
pub const NAME_PLACEHOLDER: &str = "Company name not found";

/// Result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub display_name: String,
    pub anchors: AnchorMonths,
    pub value_mode: ValueMode,
    pub analysis: SeasonalAnalysis,
}

impl AnalysisReport {
    pub fn title(&self) -> String {
        format!(
            "{} {} vs {} half-year return comparison",
            self.display_name,
            Semester::MayOct.label(),
            Semester::NovApr.label()
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// `12.34%`, or `n/a` for undefined values.
pub fn format_pct(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{value:.2}%")
    }
}

/// A 0-1 ratio as a percentage with two decimals.
pub fn format_rate(rate: f64) -> String {
    format_pct(rate * 100.0)
}

fn write_stats(f: &mut fmt::Formatter<'_>, semester: Semester, stats: &CategoryStats) -> fmt::Result {
    writeln!(f, "{semester} statistics:")?;
    writeln!(f, "  Mean return:          {}", format_pct(stats.mean_pct))?;
    writeln!(f, "  Standard deviation:   {}", format_pct(stats.std_dev_pct))?;
    writeln!(f, "  Winning periods:      {}", stats.win_count)?;
    writeln!(f, "  Losing periods:       {}", stats.loss_count)?;
    writeln!(f, "  Win rate:             {}", format_rate(stats.win_rate))
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title())?;
        writeln!(f)?;

        if !self.analysis.has_overlap() {
            return writeln!(f, "No comparable years for {}.", self.symbol);
        }

        for semester in Semester::ALL {
            write_stats(f, semester, self.analysis.stats(semester))?;
            writeln!(f)?;
        }

        writeln!(
            f,
            "{:<6} {:>10} {:>10}",
            "Year",
            Semester::MayOct.label(),
            Semester::NovApr.label()
        )?;
        let rows = self
            .analysis
            .rows(Semester::MayOct)
            .zip(self.analysis.rows(Semester::NovApr));
        for (may_oct, nov_apr) in rows {
            writeln!(
                f,
                "{:<6} {:>10} {:>10}",
                may_oct.year,
                may_oct.value_label(),
                nov_apr.value_label()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{analysis::analyze, extractor::PairedYear};

    fn report(paired: &[PairedYear]) -> AnalysisReport {
        AnalysisReport {
            symbol: "SPY".into(),
            display_name: "SPDR S&P 500".into(),
            anchors: AnchorMonths::default(),
            value_mode: ValueMode::Returns,
            analysis: analyze(paired),
        }
    }

    #[test]
    fn percentages_and_nan() {
        assert_eq!(format_pct(2.4), "2.40%");
        assert_eq!(format_pct(-0.005), "-0.01%");
        assert_eq!(format_pct(f64::NAN), "n/a");
        assert_eq!(format_rate(0.4), "40.00%");
        assert_eq!(format_rate(0.0), "0.00%");
    }

    #[test]
    fn renders_stat_blocks_then_table() {
        let text = report(&[PairedYear {
            year: 2021,
            may_oct: 0.05,
            nov_apr: -0.0123,
        }])
        .to_string();

        assert!(text.starts_with("SPDR S&P 500 May-Oct vs Nov-Apr half-year return comparison"));
        assert!(text.contains("2021"));
        assert!(text.contains("5.00"));
        assert!(text.contains("-1.23"));
        assert!(text.contains("May-Oct statistics:"));
        assert!(text.contains("Nov-Apr statistics:"));
        // One year: spread is undefined.
        assert!(text.contains("Standard deviation:   n/a"));
        assert!(text.contains("Win rate:             100.00%"));
        assert!(text.find("Nov-Apr statistics:") < text.find("Year"));
        assert!(text.contains(&format!("{:<6} {:>10} {:>10}", 2021, "5.00", "-1.23")));
    }

    #[test]
    fn renders_no_comparable_years() {
        let text = report(&[]).to_string();
        assert!(text.contains("No comparable years for SPY."));
        assert!(!text.contains("statistics:"));
    }

    #[test]
    fn json_export_has_labels_and_nulls() {
        let json: serde_json::Value = serde_json::from_str(
            &report(&[PairedYear {
                year: 2020,
                may_oct: 0.1,
                nov_apr: 0.2,
            }])
            .to_json()
            .unwrap(),
        )
        .unwrap();

        assert_eq!(json["symbol"], "SPY");
        assert_eq!(json["value_mode"], "returns");
        assert_eq!(json["analysis"]["plot_rows"][0]["label"], "May-Oct");
        assert_eq!(json["analysis"]["plot_rows"][1]["category"], "nov_apr");
        assert!(json["analysis"]["may_oct"]["std_dev_pct"].is_null());
        assert_eq!(json["anchors"]["may_oct"], 10);
    }
}
