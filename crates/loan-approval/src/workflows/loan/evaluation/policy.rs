use serde::{Deserialize, Serialize};

use super::CriteriaEvaluation;

/// Number of criteria every application is measured against.
pub const CRITERIA_COUNT: usize = 9;

/// Minimum number of met criteria for an approval (inclusive).
pub const APPROVAL_THRESHOLD: usize = 8;

/// Binary verdict for a screened application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    Approved,
    Declined,
}

impl Decision {
    pub const fn from_met_count(met: usize) -> Self {
        if met >= APPROVAL_THRESHOLD {
            Self::Approved
        } else {
            Self::Declined
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::Declined => "Declined",
        }
    }
}

/// Count met criteria and apply the approval threshold. Every criterion weighs the same.
pub fn decide(evaluation: &CriteriaEvaluation) -> (Decision, usize) {
    let met = evaluation.met_count();
    (Decision::from_met_count(met), met)
}
