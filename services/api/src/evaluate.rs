use crate::infra::{build_generator, parse_date};
use chrono::{Local, NaiveDate};
use clap::Args;
use loan_approval::config::AppConfig;
use loan_approval::error::AppError;
use loan_approval::telemetry;
use loan_approval::workflows::loan::{
    decide, evaluate_criteria, CriteriaEvaluation, Decision, ExplanationGenerator,
    LoanApplication, ProcessEntryRequest,
};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Application JSON, either a bare record or wrapped as {"response": {...}}
    #[arg(long)]
    pub(crate) file: PathBuf,
    /// Evaluation date for the age criterion (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Also request a generated explanation (requires OPENAI_API_KEY)
    #[arg(long)]
    pub(crate) explain: bool,
}

pub(crate) async fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        file,
        today,
        explain,
    } = args;

    let raw = std::fs::read(&file)?;
    let application = parse_application(&raw)?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let evaluation = evaluate_criteria(&application, application.supporting_document(), today)?;
    let (decision, met) = decide(&evaluation);
    print!("{}", render_breakdown(&application, &evaluation, decision, met));

    if explain {
        let config = AppConfig::load()?;
        telemetry::init(&config.telemetry)?;
        let generator = build_generator(&config.completion)?;
        let explanation = explain_decision(&generator, &application, decision, &evaluation).await;
        println!("\nExplanation: {explanation}");
    }

    Ok(())
}

/// Phrase a rationale for an evaluation that has already been decided.
async fn explain_decision(
    generator: &ExplanationGenerator,
    application: &LoanApplication,
    decision: Decision,
    evaluation: &CriteriaEvaluation,
) -> String {
    generator.generate(application, decision, evaluation).await
}

fn parse_application(raw: &[u8]) -> Result<LoanApplication, AppError> {
    let value: Value = serde_json::from_slice(raw)?;
    if value.get("response").is_some() {
        let request: ProcessEntryRequest = serde_json::from_value(value)?;
        Ok(request.response)
    } else {
        Ok(serde_json::from_value(value)?)
    }
}

fn render_breakdown(
    application: &LoanApplication,
    evaluation: &CriteriaEvaluation,
    decision: Decision,
    met: usize,
) -> String {
    let mut output = format!("Application {}\n", application.id);
    for outcome in evaluation.iter() {
        let mark = if outcome.met { "met" } else { "not met" };
        output.push_str(&format!("  [{mark:>7}] {}\n", outcome.criterion));
    }
    output.push_str(&format!(
        "Decision: {} ({met}/{} criteria met)\n",
        decision.label(),
        evaluation.len()
    ));
    output
}
