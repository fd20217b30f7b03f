//! Statistics and reshape over the joined semesters.

use serde::Serialize;

use crate::{
    extractor::PairedYear,
    reshape::{PlotRow, melt},
    semester::Semester,
    stats::{CategoryStats, semester_stats},
};

/// Everything the presentation layer needs about one instrument's seasons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalAnalysis {
    pub paired_years: Vec<PairedYear>,
    pub may_oct: CategoryStats,
    pub nov_apr: CategoryStats,
    pub plot_rows: Vec<PlotRow>,
}

impl SeasonalAnalysis {
    pub fn stats(&self, semester: Semester) -> &CategoryStats {
        match semester {
            Semester::MayOct => &self.may_oct,
            Semester::NovApr => &self.nov_apr,
        }
    }

    /// The plot rows of one semester, in year order.
    pub fn rows(&self, semester: Semester) -> impl Iterator<Item = &PlotRow> {
        self.plot_rows.iter().filter(move |r| r.category == semester)
    }

    /// `false` when no year had both semesters, i.e. nothing comparable.
    pub fn has_overlap(&self) -> bool {
        !self.paired_years.is_empty()
    }
}

/// Computes statistics and the plot table. Never fails; degenerate input yields
/// empty rows and zero/NaN statistics.
pub fn analyze(paired: &[PairedYear]) -> SeasonalAnalysis {
    SeasonalAnalysis {
        paired_years: paired.to_vec(),
        may_oct: semester_stats(paired, Semester::MayOct),
        nov_apr: semester_stats(paired, Semester::NovApr),
        plot_rows: melt(paired),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_overlap_is_degenerate_not_an_error() {
        let analysis = analyze(&[]);
        assert!(!analysis.has_overlap());
        assert!(analysis.plot_rows.is_empty());
        assert_eq!(analysis.may_oct.total_count, 0);
        assert_eq!(analysis.nov_apr.win_rate, 0.0);
    }

    #[test]
    fn rows_are_split_by_semester() {
        let analysis = analyze(&[
            PairedYear {
                year: 2020,
                may_oct: 0.1,
                nov_apr: -0.1,
            },
            PairedYear {
                year: 2021,
                may_oct: 0.2,
                nov_apr: -0.2,
            },
        ]);
        let years: Vec<i32> = analysis.rows(Semester::NovApr).map(|r| r.year).collect();
        assert_eq!(years, vec![2020, 2021]);
        assert!(analysis.rows(Semester::MayOct).all(|r| r.category == Semester::MayOct));
    }

    #[test]
    fn stats_accessor_matches_fields() {
        let analysis = analyze(&[PairedYear {
            year: 2020,
            may_oct: 0.1,
            nov_apr: -0.1,
        }]);
        assert!(analysis.has_overlap());
        assert_eq!(analysis.stats(Semester::MayOct).win_count, 1);
        assert_eq!(analysis.stats(Semester::NovApr).loss_count, 1);
        assert_eq!(analysis.plot_rows.len(), 2);
    }
}
