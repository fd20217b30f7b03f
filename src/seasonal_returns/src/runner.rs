//! One analysis request from symbol to report.

use price_feed::{
    models::request_params::{HistoryRequest, ProviderParams},
    providers::PriceProvider,
};
use tracing::{debug, info, warn};

use crate::{
    analysis::analyze,
    config::ValueMode,
    errors::AnalysisError,
    extractor::pair_semesters,
    report::{AnalysisReport, NAME_PLACEHOLDER},
    semester::AnchorMonths,
};

/// Inputs of a single run.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub symbol: String,
    pub anchors: AnchorMonths,
    pub value_mode: ValueMode,
    pub provider_params: ProviderParams,
}

impl AnalysisRequest {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            anchors: AnchorMonths::default(),
            value_mode: ValueMode::default(),
            provider_params: ProviderParams::None,
        }
    }

    pub fn with_anchors(mut self, anchors: AnchorMonths) -> Self {
        self.anchors = anchors;
        self
    }

    pub fn with_value_mode(mut self, value_mode: ValueMode) -> Self {
        self.value_mode = value_mode;
        self
    }

    pub fn with_provider_params(mut self, params: ProviderParams) -> Self {
        self.provider_params = params;
        self
    }
}

/// Fetches the full semester history of `request.symbol` and analyzes it.
///
/// An empty history is [`AnalysisError::NoData`]. A failed or empty name lookup is
/// not an error; the report then carries [`NAME_PLACEHOLDER`].
pub async fn run_analysis(
    provider: &dyn PriceProvider,
    request: &AnalysisRequest,
) -> Result<AnalysisReport, AnalysisError> {
    let symbol = request.symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(AnalysisError::EmptySymbol);
    }

    let history = HistoryRequest::full_history(&symbol)
        .with_provider_params(request.provider_params.clone());
    let mut series = provider.fetch_history(&history).await?;
    if series.is_empty() {
        warn!(symbol = %symbol, "provider returned no observations");
        return Err(AnalysisError::NoData { symbol });
    }
    let dropped = series.drop_non_finite();
    if dropped > 0 {
        debug!(symbol = %symbol, dropped, "dropped non-finite observations");
    }
    series.sort_by_time();

    let series = match request.value_mode {
        ValueMode::Returns => series.to_close_stamped(),
        ValueMode::Prices => series.to_period_returns(),
    };

    let paired = pair_semesters(&series.points, &request.anchors)?;
    let analysis = analyze(&paired);
    info!(
        symbol = %symbol,
        observations = series.len(),
        years = analysis.paired_years.len(),
        "analysis complete"
    );
    if !analysis.has_overlap() {
        warn!(symbol = %symbol, "no year has both semesters");
    }

    let display_name = resolve_display_name(provider, &symbol).await;

    Ok(AnalysisReport {
        symbol,
        display_name,
        anchors: request.anchors,
        value_mode: request.value_mode,
        analysis,
    })
}

async fn resolve_display_name(provider: &dyn PriceProvider, symbol: &str) -> String {
    match provider.display_name(symbol).await {
        Ok(Some(name)) if !name.trim().is_empty() => name.trim().to_string(),
        Ok(_) => {
            debug!(symbol, "no display name available");
            NAME_PLACEHOLDER.to_string()
        }
        Err(e) => {
            warn!(symbol, error = %e, "display name lookup failed");
            NAME_PLACEHOLDER.to_string()
        }
    }
}
