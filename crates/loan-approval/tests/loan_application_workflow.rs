//! End-to-end scenarios for loan screening through the public processor and router, with the
//! completion provider played by a local mock server.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use loan_approval::config::{parse_endpoint, CompletionConfig};
use loan_approval::workflows::loan::{
    application_router, Decision, ExplanationGenerator, ExplanationSettings, LoanApplication,
    LoanApplicationProcessor, OpenAiCompletionClient, EXPLANATION_FALLBACK,
};

fn completion_config(server: &MockServer) -> CompletionConfig {
    CompletionConfig {
        api_key: "sk-integration".to_string(),
        model: "gpt-3.5-turbo-instruct".to_string(),
        endpoint: parse_endpoint(&format!("{}/v1/completions", server.uri()))
            .expect("mock endpoint parses"),
        max_tokens: 150,
        timeout: Duration::from_secs(5),
    }
}

fn processor_for(server: &MockServer) -> LoanApplicationProcessor {
    let config = completion_config(server);
    let client = OpenAiCompletionClient::new(&config).expect("client builds");
    let generator = ExplanationGenerator::new(Arc::new(client), ExplanationSettings::from(&config));
    LoanApplicationProcessor::new(generator)
}

fn application(credit_score: u32, sector: &str) -> LoanApplication {
    serde_json::from_value(json!({
        "_id": 1007,
        "Total Monthly Debt Obligations": 1500,
        "Sector of Employment": sector,
        "Number of Existing Loans": 2,
        "Desired Loan Amount": 24000,
        "Duration at Current Job": 3,
        "History of Bankruptcy": "No",
        "Date of Birth": "15/08/1990",
        "Residency Status": "Citizen",
        "Monthly Gross Income": 5000,
        "Credit Score": credit_score
    }))
    .expect("application deserializes")
}

fn evaluation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
}

async fn mount_completion(server: &MockServer, text: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cmpl-1",
            "choices": [{ "text": text, "index": 0, "finish_reason": "stop" }]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn strong_applicant_is_approved_with_condensed_rationale() {
    let server = MockServer::start().await;
    mount_completion(
        &server,
        "\n\nThe applicant satisfies all nine criteria. Their debt load is low. Their credit score is solid. They have been employed for three years.",
    )
    .await;

    let result = processor_for(&server)
        .process_on(&application(700, "IT"), evaluation_date())
        .await
        .expect("application processes");

    assert_eq!(result.application_id.0, "1007");
    assert_eq!(result.decision, Decision::Approved);
    assert_eq!(
        result.explanation,
        "The applicant satisfies all nine criteria. Their debt load is low. Their credit score is solid."
    );
}

#[tokio::test]
async fn two_failed_criteria_decline_the_application() {
    let server = MockServer::start().await;
    mount_completion(&server, "Credit and sector fell short").await;

    let result = processor_for(&server)
        .process_on(&application(600, "Retail"), evaluation_date())
        .await
        .expect("application processes");

    assert_eq!(result.decision, Decision::Declined);
    assert_eq!(result.explanation, "Credit and sector fell short.");
}

#[tokio::test]
async fn provider_outage_falls_back_without_failing_the_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/completions"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = processor_for(&server)
        .process_on(&application(700, "IT"), evaluation_date())
        .await
        .expect("application processes");

    assert_eq!(result.decision, Decision::Approved);
    assert_eq!(result.explanation, EXPLANATION_FALLBACK);
}

#[tokio::test]
async fn router_wraps_results_and_errors() {
    let server = MockServer::start().await;
    mount_completion(&server, "Approved.").await;
    let router = application_router(processor_for(&server));

    let payload = json!({ "response": serde_json::to_value(application(700, "IT")).expect("serializes") });
    let response = router
        .clone()
        .oneshot(
            Request::post("/process-entry")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&payload).expect("serializes")))
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let body: Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(body["result"]["result"], "Approved");
    assert_eq!(body["result"]["explanation"], "Approved.");

    let mut broken = application(700, "IT");
    broken.document.monthly_gross_income = 0.0;
    let payload = json!({ "response": serde_json::to_value(broken).expect("serializes") });
    let response = router
        .oneshot(
            Request::post("/process-entry")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&payload).expect("serializes")))
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
