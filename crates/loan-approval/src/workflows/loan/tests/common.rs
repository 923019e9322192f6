use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::loan::domain::{ApplicationId, LoanApplication, SupportingDocument};
use crate::workflows::loan::explanation::{
    CompletionError, CompletionRequest, ExplanationGenerator, ExplanationSettings,
    TextCompletion,
};
use crate::workflows::loan::service::LoanApplicationProcessor;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
}

/// DTI 0.3, credit 700, IT, two loans, 40% of annual income requested, three years at the job,
/// no bankruptcy, 35 years old, citizen.
pub(super) fn qualified_application() -> LoanApplication {
    LoanApplication {
        id: ApplicationId("app-001".to_string()),
        total_monthly_debt_obligations: 1500.0,
        sector_of_employment: "IT".to_string(),
        number_of_existing_loans: 2,
        desired_loan_amount: 24000.0,
        duration_at_current_job: 3.0,
        history_of_bankruptcy: "No".to_string(),
        date_of_birth: "15/08/1990".to_string(),
        residency_status: "Citizen".to_string(),
        document: SupportingDocument {
            monthly_gross_income: 5000.0,
            credit_score: 700,
        },
    }
}

pub(super) fn settings() -> ExplanationSettings {
    ExplanationSettings {
        model: "gpt-3.5-turbo-instruct".to_string(),
        max_tokens: 150,
        timeout: Duration::from_secs(5),
    }
}

/// Deterministic provider that records every request it receives.
pub(super) struct RecordingCompletion {
    reply: String,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl RecordingCompletion {
    pub(super) fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().expect("request log poisoned").clone()
    }
}

#[async_trait]
impl TextCompletion for RecordingCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        self.requests
            .lock()
            .expect("request log poisoned")
            .push(request.clone());
        Ok(self.reply.clone())
    }
}

pub(super) struct FailingCompletion;

#[async_trait]
impl TextCompletion for FailingCompletion {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, CompletionError> {
        Err(CompletionError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: "upstream overloaded".to_string(),
        })
    }
}

pub(super) struct StalledCompletion;

#[async_trait]
impl TextCompletion for StalledCompletion {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, CompletionError> {
        tokio::time::sleep(Duration::from_secs(600)).await;
        Ok("Too late.".to_string())
    }
}

pub(super) fn generator(completion: Arc<dyn TextCompletion>) -> ExplanationGenerator {
    ExplanationGenerator::new(completion, settings())
}

pub(super) fn processor(completion: Arc<dyn TextCompletion>) -> LoanApplicationProcessor {
    LoanApplicationProcessor::new(generator(completion))
}

pub(super) async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let value = serde_json::from_slice(&bytes).expect("body is json");
    (status, value)
}
