//! Seasonal extraction: one observation per year per semester, joined on year.

use std::collections::BTreeMap;

use price_feed::models::price_point::PricePoint;
use serde::Serialize;
use tracing::debug;

use crate::{
    errors::AnalysisError,
    semester::{AnchorMonths, Semester},
};

/// `year -> value` for a single semester, ascending by year.
pub type SeasonalSeries = BTreeMap<i32, f64>;

/// The two semester values of one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairedYear {
    pub year: i32,
    pub may_oct: f64,
    pub nov_apr: f64,
}

impl PairedYear {
    pub fn value(&self, semester: Semester) -> f64 {
        match semester {
            Semester::MayOct => self.may_oct,
            Semester::NovApr => self.nov_apr,
        }
    }
}

/// Keeps the finite observations stamped in `month` and keys them by year.
///
/// Fails with [`AnalysisError::DuplicateYear`] if two of them share a year.
pub fn extract_semester(
    points: &[PricePoint],
    semester: Semester,
    month: u32,
) -> Result<SeasonalSeries, AnalysisError> {
    let mut series = SeasonalSeries::new();
    for point in points
        .iter()
        .filter(|p| p.close.is_finite() && p.month() == month)
    {
        if series.insert(point.year(), point.close).is_some() {
            return Err(AnalysisError::DuplicateYear {
                semester,
                year: point.year(),
            });
        }
    }
    debug!(%semester, month, years = series.len(), "extracted semester");
    Ok(series)
}

/// Inner join on year. Years missing from either side are dropped.
pub fn join_by_year(may_oct: &SeasonalSeries, nov_apr: &SeasonalSeries) -> Vec<PairedYear> {
    may_oct
        .iter()
        .filter_map(|(&year, &may_oct)| {
            nov_apr.get(&year).map(|&nov_apr| PairedYear {
                year,
                may_oct,
                nov_apr,
            })
        })
        .collect()
}

/// Runs the whole extractor: drop non-finite values, split by anchor month, join.
pub fn pair_semesters(
    points: &[PricePoint],
    anchors: &AnchorMonths,
) -> Result<Vec<PairedYear>, AnalysisError> {
    let non_finite = points.iter().filter(|p| !p.close.is_finite()).count();
    if non_finite > 0 {
        debug!(non_finite, "dropping non-finite observations");
    }

    let may_oct = extract_semester(points, Semester::MayOct, anchors.month(Semester::MayOct))?;
    let nov_apr = extract_semester(points, Semester::NovApr, anchors.month(Semester::NovApr))?;
    let joined = join_by_year(&may_oct, &nov_apr);

    debug!(
        may_oct = may_oct.len(),
        nov_apr = nov_apr.len(),
        joined = joined.len(),
        "joined semesters on year"
    );
    Ok(joined)
}
