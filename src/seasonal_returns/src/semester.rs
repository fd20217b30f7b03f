//! The two half-year windows being compared and the months that close them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::AnalysisError;

/// A six-month window of the calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Semester {
    /// May through October.
    MayOct,
    /// November through April.
    NovApr,
}

impl Semester {
    /// Both semesters, in reporting order.
    pub const ALL: [Semester; 2] = [Semester::MayOct, Semester::NovApr];

    /// Display label used in reports and on charts.
    pub const fn label(self) -> &'static str {
        match self {
            Semester::MayOct => "May-Oct",
            Semester::NovApr => "Nov-Apr",
        }
    }

    /// The month whose observation closes the window (October, April).
    pub const fn default_anchor_month(self) -> u32 {
        match self {
            Semester::MayOct => 10,
            Semester::NovApr => 4,
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The anchor month in effect for each semester during one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnchorMonths {
    may_oct: u32,
    nov_apr: u32,
}

impl AnchorMonths {
    pub fn new(may_oct: u32, nov_apr: u32) -> Result<Self, AnalysisError> {
        for (semester, month) in [(Semester::MayOct, may_oct), (Semester::NovApr, nov_apr)] {
            if !(1..=12).contains(&month) {
                return Err(AnalysisError::InvalidAnchors {
                    message: format!("{semester} anchor month {month} is not in 1-12"),
                });
            }
        }
        if may_oct == nov_apr {
            return Err(AnalysisError::InvalidAnchors {
                message: format!("both semesters anchored on month {may_oct}"),
            });
        }
        Ok(Self { may_oct, nov_apr })
    }

    pub fn month(&self, semester: Semester) -> u32 {
        match semester {
            Semester::MayOct => self.may_oct,
            Semester::NovApr => self.nov_apr,
        }
    }
}

impl Default for AnchorMonths {
    fn default() -> Self {
        Self {
            may_oct: Semester::MayOct.default_anchor_month(),
            nov_apr: Semester::NovApr.default_anchor_month(),
        }
    }
}
