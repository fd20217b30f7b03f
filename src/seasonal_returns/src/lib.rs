//! Seasonal half-year return analysis.
//!
//! Compares the May-October half of the year against the November-April half for
//! a single instrument, across every year for which both halves have data.
//!
//! The pipeline is one-way and request scoped:
//!
//! 1. [`extractor`] picks the anchor-month observation of each semester per year and
//!    inner-joins the two semesters on year.
//! 2. [`analysis`] computes per-semester [`stats`] and the long-form [`reshape`] table.
//! 3. [`report`] formats the result for a terminal or serializes it for a chart renderer.
//!
//! [`runner::run_analysis`] ties these to a [`price_feed::providers::PriceProvider`].

pub mod analysis;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
pub mod extractor;
pub mod report;
pub mod reshape;
pub mod runner;
pub mod semester;
pub mod stats;

pub use analysis::{SeasonalAnalysis, analyze};
pub use errors::AnalysisError;
pub use runner::{AnalysisRequest, run_analysis};
