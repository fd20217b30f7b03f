//! Market-data collaborator for the seasonal return analyzer.
//!
//! Provides the canonical [`PriceSeries`](models::price_series::PriceSeries) model and
//! the [`PriceProvider`](providers::PriceProvider) trait, plus two concrete providers:
//! Alpaca's REST market-data API and a local JSON file.

pub mod models;
pub mod providers;
