mod policy;
mod rules;

pub use policy::{decide, Decision, APPROVAL_THRESHOLD, CRITERIA_COUNT};
pub use rules::{criteria, evaluate_criteria, Criterion};

use serde::Serialize;

/// Problems with applicant data that make the criteria impossible to evaluate.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("monthly gross income is missing or zero; debt-to-income ratio is undefined")]
    MissingIncome,
    #[error("date of birth '{value}' is not a valid day/month/year date")]
    InvalidDateOfBirth {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Outcome of a single named criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CriterionOutcome {
    pub criterion: &'static str,
    pub met: bool,
}

/// Ordered criterion outcomes. Order only matters when rendering; the decision counts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct CriteriaEvaluation {
    outcomes: Vec<CriterionOutcome>,
}

impl CriteriaEvaluation {
    pub fn from_outcomes(outcomes: Vec<CriterionOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CriterionOutcome> {
        self.outcomes.iter()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn met_count(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.met).count()
    }

    /// `None` when no criterion carries `label`.
    pub fn is_met(&self, label: &str) -> Option<bool> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.criterion == label)
            .map(|outcome| outcome.met)
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.outcomes.iter().map(|outcome| outcome.criterion)
    }
}
