use chrono::{Datelike, NaiveDate};

use super::super::domain::{LoanApplication, SupportingDocument};
use super::policy::CRITERIA_COUNT;
use super::{CriteriaEvaluation, CriterionOutcome, DataError};

const MAX_DEBT_TO_INCOME: f64 = 0.43;
const MIN_CREDIT_SCORE: u32 = 670;
const PREFERRED_SECTORS: [&str; 4] = ["Government Jobs", "Healthcare", "IT", "Finance"];
const MAX_EXISTING_LOANS: u32 = 5;
const MAX_LOAN_TO_ANNUAL_INCOME: f64 = 0.6;
const MIN_YEARS_AT_CURRENT_JOB: f64 = 2.0;
const MIN_AGE: i32 = 18;
const MAX_AGE: i32 = 70;
const ACCEPTED_RESIDENCY: [&str; 2] = ["Permanent Resident", "Citizen"];
const DATE_OF_BIRTH_FORMAT: &str = "%d/%m/%Y";

/// Derived figures shared by the criterion predicates.
pub(crate) struct ApplicantSignals<'a> {
    application: &'a LoanApplication,
    document: SupportingDocument,
    debt_to_income: f64,
    age: i32,
}

impl<'a> ApplicantSignals<'a> {
    pub(crate) fn derive(
        application: &'a LoanApplication,
        document: SupportingDocument,
        today: NaiveDate,
    ) -> Result<Self, DataError> {
        if document.monthly_gross_income == 0.0 {
            return Err(DataError::MissingIncome);
        }
        let debt_to_income =
            application.total_monthly_debt_obligations / document.monthly_gross_income;

        let birth_date =
            NaiveDate::parse_from_str(application.date_of_birth.trim(), DATE_OF_BIRTH_FORMAT)
                .map_err(|source| DataError::InvalidDateOfBirth {
                    value: application.date_of_birth.clone(),
                    source,
                })?;
        // Calendar-year difference; birthdays later in the year are not accounted for.
        let age = today.year() - birth_date.year();

        Ok(Self {
            application,
            document,
            debt_to_income,
            age,
        })
    }

    fn annual_gross_income(&self) -> f64 {
        12.0 * self.document.monthly_gross_income
    }
}

/// A named eligibility check.
#[derive(Clone, Copy)]
pub struct Criterion {
    pub label: &'static str,
    predicate: fn(&ApplicantSignals<'_>) -> bool,
}

impl std::fmt::Debug for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Criterion").field("label", &self.label).finish()
    }
}

static CRITERIA: [Criterion; CRITERIA_COUNT] = [
    Criterion {
        label: "Debt-to-Income Ratio <= 0.43",
        predicate: debt_to_income_within_limit,
    },
    Criterion {
        label: "Credit Score >= 670",
        predicate: credit_score_sufficient,
    },
    Criterion {
        label: "Sector of Employment in Preferred List",
        predicate: sector_preferred,
    },
    Criterion {
        label: "Number of Existing Loans < 5",
        predicate: existing_loans_below_limit,
    },
    Criterion {
        label: "Loan Amount <= 60% of Annual Income",
        predicate: loan_amount_within_income,
    },
    Criterion {
        label: "Duration at Current Job >= 2 Years",
        predicate: employment_tenure_sufficient,
    },
    Criterion {
        label: "No History of Bankruptcy",
        predicate: no_bankruptcy,
    },
    Criterion {
        label: "Age Between 18 and 70",
        predicate: age_within_range,
    },
    Criterion {
        label: "Residency Status as Permanent Resident or Citizen",
        predicate: residency_accepted,
    },
];

/// The fixed criteria in evaluation order.
pub fn criteria() -> &'static [Criterion] {
    &CRITERIA
}

/// Evaluate every criterion against an application and its supporting document.
///
/// `today` only feeds the age calculation. Fails when income is zero (the debt-to-income ratio
/// would be undefined) or the date of birth cannot be parsed; unrecognized sectors or residency
/// statuses simply fail their criterion.
pub fn evaluate_criteria(
    application: &LoanApplication,
    document: SupportingDocument,
    today: NaiveDate,
) -> Result<CriteriaEvaluation, DataError> {
    let signals = ApplicantSignals::derive(application, document, today)?;

    let outcomes = CRITERIA
        .iter()
        .map(|criterion| CriterionOutcome {
            criterion: criterion.label,
            met: (criterion.predicate)(&signals),
        })
        .collect();

    Ok(CriteriaEvaluation::from_outcomes(outcomes))
}

fn debt_to_income_within_limit(signals: &ApplicantSignals<'_>) -> bool {
    signals.debt_to_income <= MAX_DEBT_TO_INCOME
}

fn credit_score_sufficient(signals: &ApplicantSignals<'_>) -> bool {
    signals.document.credit_score >= MIN_CREDIT_SCORE
}

fn sector_preferred(signals: &ApplicantSignals<'_>) -> bool {
    PREFERRED_SECTORS.contains(&signals.application.sector_of_employment.as_str())
}

fn existing_loans_below_limit(signals: &ApplicantSignals<'_>) -> bool {
    signals.application.number_of_existing_loans < MAX_EXISTING_LOANS
}

fn loan_amount_within_income(signals: &ApplicantSignals<'_>) -> bool {
    signals.application.desired_loan_amount
        <= MAX_LOAN_TO_ANNUAL_INCOME * signals.annual_gross_income()
}

fn employment_tenure_sufficient(signals: &ApplicantSignals<'_>) -> bool {
    signals.application.duration_at_current_job >= MIN_YEARS_AT_CURRENT_JOB
}

fn no_bankruptcy(signals: &ApplicantSignals<'_>) -> bool {
    signals.application.history_of_bankruptcy == "No"
}

fn age_within_range(signals: &ApplicantSignals<'_>) -> bool {
    (MIN_AGE..=MAX_AGE).contains(&signals.age)
}

fn residency_accepted(signals: &ApplicantSignals<'_>) -> bool {
    ACCEPTED_RESIDENCY.contains(&signals.application.residency_status.as_str())
}
