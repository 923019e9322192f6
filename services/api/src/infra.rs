use chrono::NaiveDate;
use loan_approval::config::CompletionConfig;
use loan_approval::error::AppError;
use loan_approval::workflows::loan::{
    ExplanationGenerator, ExplanationSettings, LoanApplicationProcessor, OpenAiCompletionClient,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Wire the OpenAI-compatible client into an explanation generator.
pub(crate) fn build_generator(config: &CompletionConfig) -> Result<ExplanationGenerator, AppError> {
    let client = OpenAiCompletionClient::new(config)?;
    Ok(ExplanationGenerator::new(
        Arc::new(client),
        ExplanationSettings::from(config),
    ))
}

pub(crate) fn build_processor(
    config: &CompletionConfig,
) -> Result<LoanApplicationProcessor, AppError> {
    Ok(LoanApplicationProcessor::new(build_generator(config)?))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
