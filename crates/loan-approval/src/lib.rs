//! Loan application screening: fixed eligibility criteria, an approval threshold, and a short
//! generated rationale for every decision.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
