//! Loan application screening workflow.
//!
//! An application is measured against nine fixed criteria, approved when at least eight hold,
//! and given a short rationale phrased by a text-completion provider.

pub mod domain;
pub mod evaluation;
pub mod explanation;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{ApplicationId, LoanApplication, ProcessEntryRequest, SupportingDocument};
pub use evaluation::{
    criteria, decide, evaluate_criteria, CriteriaEvaluation, Criterion, CriterionOutcome,
    DataError, Decision, APPROVAL_THRESHOLD, CRITERIA_COUNT,
};
pub use explanation::{
    CompletionError, CompletionRequest, ExplanationGenerator, ExplanationSettings,
    OpenAiCompletionClient, TextCompletion, EXPLANATION_FALLBACK,
};
pub use router::application_router;
pub use service::{LoanApplicationProcessor, ProcessedResult};
