use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tracing::{error, info};

use crate::error::AppError;

use super::domain::ProcessEntryRequest;
use super::service::{LoanApplicationProcessor, ProcessedResult};

pub const WELCOME_BANNER: &str = "Welcome to my Loan Approval Bot!";

/// Router exposing the intake endpoint.
pub fn application_router(processor: LoanApplicationProcessor) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/process-entry", post(process_entry_handler))
        .with_state(processor)
}

pub(crate) async fn home_handler() -> &'static str {
    WELCOME_BANNER
}

/// The body is decoded here rather than through the `Json` extractor so malformed payloads get
/// the same 500 `{"error": ...}` shape as every other failure.
pub(crate) async fn process_entry_handler(
    State(processor): State<LoanApplicationProcessor>,
    body: Bytes,
) -> Response {
    match process_entry(&processor, &body).await {
        Ok(result) => (StatusCode::OK, axum::Json(json!({ "result": result }))).into_response(),
        Err(err) => {
            error!(error = %err, "error in processing entry");
            err.into_response()
        }
    }
}

async fn process_entry(
    processor: &LoanApplicationProcessor,
    body: &[u8],
) -> Result<ProcessedResult, AppError> {
    let request: ProcessEntryRequest = serde_json::from_slice(body)?;
    info!(application = ?request.response, "received application");

    let result = processor.process(&request.response).await?;
    Ok(result)
}
