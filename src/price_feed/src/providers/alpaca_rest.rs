//! Alpaca market-data REST API (`/v2/stocks/bars`) and asset lookup (`/v2/assets`).

pub mod params;
pub mod provider;
pub mod response;
