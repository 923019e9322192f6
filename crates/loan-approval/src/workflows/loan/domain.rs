use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier wrapper for submitted applications.
///
/// Upstream document stores emit either string or numeric ids, so both are accepted and kept in
/// their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ApplicationId(pub String);

impl<'de> Deserialize<'de> for ApplicationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(value) => ApplicationId(value),
            RawId::Signed(value) => ApplicationId(value.to_string()),
            RawId::Unsigned(value) => ApplicationId(value.to_string()),
        })
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Applicant-declared record as delivered by the intake form.
///
/// In this version the supporting-document fields travel inside the same record; see
/// [`LoanApplication::supporting_document`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    #[serde(rename = "_id")]
    pub id: ApplicationId,
    #[serde(rename = "Total Monthly Debt Obligations")]
    pub total_monthly_debt_obligations: f64,
    #[serde(rename = "Sector of Employment")]
    pub sector_of_employment: String,
    #[serde(
        rename = "Number of Existing Loans",
        deserialize_with = "deserialize_whole_number"
    )]
    pub number_of_existing_loans: u32,
    #[serde(rename = "Desired Loan Amount")]
    pub desired_loan_amount: f64,
    /// Years at the current employer.
    #[serde(rename = "Duration at Current Job")]
    pub duration_at_current_job: f64,
    /// `"Yes"` or `"No"`; anything else is treated as not clearing the bankruptcy check.
    #[serde(rename = "History of Bankruptcy")]
    pub history_of_bankruptcy: String,
    /// `day/month/year`, parsed during evaluation.
    #[serde(rename = "Date of Birth")]
    pub date_of_birth: String,
    #[serde(rename = "Residency Status")]
    pub residency_status: String,
    #[serde(flatten)]
    pub document: SupportingDocument,
}

impl LoanApplication {
    pub fn supporting_document(&self) -> SupportingDocument {
        self.document
    }
}

/// Figures extracted from uploaded income and credit paperwork. Absent values read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportingDocument {
    #[serde(rename = "Monthly Gross Income", default)]
    pub monthly_gross_income: f64,
    #[serde(
        rename = "Credit Score",
        default,
        deserialize_with = "deserialize_whole_number"
    )]
    pub credit_score: u32,
}

/// Accept integers and whole-valued floats (`700` or `700.0`); reject fractions and negatives.
fn deserialize_whole_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    struct WholeNumber;

    impl<'de> Visitor<'de> for WholeNumber {
        type Value = u32;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative whole number")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<u32, E> {
            u32::try_from(value)
                .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(value), &self))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<u32, E> {
            u32::try_from(value)
                .map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<u32, E> {
            if value.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&value) {
                Ok(value as u32)
            } else {
                Err(E::invalid_value(de::Unexpected::Float(value), &self))
            }
        }
    }

    deserializer.deserialize_any(WholeNumber)
}

/// Request envelope accepted by the intake endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessEntryRequest {
    pub response: LoanApplication,
}
