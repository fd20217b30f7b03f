pub mod price_point;
pub mod price_series;
pub mod request_params;
pub mod timeframe;
