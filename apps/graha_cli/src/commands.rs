use anyhow::Context;
use graha::{
    ChartProvider, DashaProvider, EngineConfig, LinearEphemeris, NatalChart, RectificationEngine,
    RectificationRequest, ShadbalaEngine, ShadbalaRequest, TransitEngine, TransitRequest,
    VimshottariDashaProvider,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Rectification request plus the chart the linear ephemeris is anchored on.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RectifyInput {
    #[serde(flatten)]
    pub request: RectificationRequest,
    pub reference_chart: NatalChart,
}

pub(crate) fn to_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}

pub(crate) fn run_shadbala(config: &EngineConfig, input: &str, pretty: bool) -> anyhow::Result<String> {
    let request: ShadbalaRequest =
        serde_json::from_str(input).context("Failed to parse shadbala request")?;
    let engine = ShadbalaEngine::from_config(config)?;
    let report = engine.compute_request(&request).context("Shadbala computation failed")?;
    log::info!(
        "Strongest {}, weakest {}, average {:.1}% of required",
        report.strongest,
        report.weakest,
        report.average_percent
    );
    to_json(&report, pretty)
}

pub(crate) fn run_transit(config: &EngineConfig, input: &str, pretty: bool) -> anyhow::Result<String> {
    let request: TransitRequest =
        serde_json::from_str(input).context("Failed to parse transit request")?;
    let engine = TransitEngine::from_config(config)?;
    let report = engine.compute_request(&request).context("Transit computation failed")?;
    log::info!(
        "{} aspects, {} sign changes within {} days",
        report.significant_aspects.len(),
        report.upcoming_sign_changes.len(),
        report.horizon_days
    );
    to_json(&report, pretty)
}

pub(crate) async fn run_rectify(config: &EngineConfig, input: &str, pretty: bool) -> anyhow::Result<String> {
    let RectifyInput {
        request,
        reference_chart,
    } = serde_json::from_str(input).context("Failed to parse rectification request")?;
    reference_chart
        .validate(&[])
        .context("Invalid reference_chart")?;

    let engine = RectificationEngine::from_config(config)?;
    let charts: Arc<dyn ChartProvider> = Arc::new(LinearEphemeris::from_chart(&reference_chart));
    let dashas: Arc<dyn DashaProvider> = Arc::new(VimshottariDashaProvider::new());
    let result = engine
        .rectify(&request, charts, dashas)
        .await
        .context("Rectification failed")?;
    to_json(&result, pretty)
}
