use super::super::domain::LoanApplication;
use super::super::evaluation::{CriteriaEvaluation, Decision};

const SENTENCE_DELIMITER: &str = ". ";
const MAX_SENTENCES: usize = 3;

/// One `- <label>: Met|Not Met` line per criterion, in evaluation order.
pub fn criteria_summary(evaluation: &CriteriaEvaluation) -> String {
    evaluation
        .iter()
        .map(|outcome| {
            let status = if outcome.met { "Met" } else { "Not Met" };
            format!("- {}: {}", outcome.criterion, status)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_prompt(
    application: &LoanApplication,
    decision: Decision,
    evaluation: &CriteriaEvaluation,
) -> String {
    let details = serde_json::to_string(application)
        .unwrap_or_else(|_| format!("application {}", application.id));

    format!(
        "Based on the following criteria evaluation, provide a concise, three-sentence explanation \
         for why this specific loan application was {lowered}.\n\
         Decision: {label}.\n\
         Application details: {details}\n\
         Criteria evaluation:\n\
         {summary}\n",
        lowered = decision.label().to_lowercase(),
        label = decision.label(),
        summary = criteria_summary(evaluation),
    )
}

/// Keep at most the first three `". "`-delimited fragments and make sure the text ends in a
/// period. Abbreviations and other punctuation are not handled.
pub fn condense(text: &str) -> String {
    let mut condensed = text
        .trim()
        .split(SENTENCE_DELIMITER)
        .take(MAX_SENTENCES)
        .collect::<Vec<_>>()
        .join(SENTENCE_DELIMITER);

    if !condensed.ends_with('.') {
        condensed.push('.');
    }
    condensed
}
