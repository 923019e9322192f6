use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{ApplicationId, LoanApplication};
use super::evaluation::{decide, evaluate_criteria, DataError, Decision};
use super::explanation::ExplanationGenerator;

/// Outcome returned to callers for one processed application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedResult {
    pub application_id: ApplicationId,
    #[serde(rename = "result")]
    pub decision: Decision,
    pub explanation: String,
}

/// Runs evaluation, aggregation, and explanation for a single application.
#[derive(Clone)]
pub struct LoanApplicationProcessor {
    explainer: ExplanationGenerator,
}

impl LoanApplicationProcessor {
    pub fn new(explainer: ExplanationGenerator) -> Self {
        Self { explainer }
    }

    /// Process against the local calendar date.
    pub async fn process(
        &self,
        application: &LoanApplication,
    ) -> Result<ProcessedResult, DataError> {
        self.process_on(application, Local::now().date_naive()).await
    }

    /// Process with an explicit "today", which only influences the age criterion.
    pub async fn process_on(
        &self,
        application: &LoanApplication,
        today: NaiveDate,
    ) -> Result<ProcessedResult, DataError> {
        let evaluation =
            evaluate_criteria(application, application.supporting_document(), today)?;
        let (decision, met) = decide(&evaluation);

        info!(
            application_id = %application.id,
            decision = decision.label(),
            criteria_met = met,
            criteria_total = evaluation.len(),
            "application evaluated"
        );

        let explanation = self
            .explainer
            .generate(application, decision, &evaluation)
            .await;

        Ok(ProcessedResult {
            application_id: application.id.clone(),
            decision,
            explanation,
        })
    }
}
