//! Gatekeeper error types

use crate::RejectionReason;
use thiserror::Error;

/// Errors that can occur during gatekeeper operations
#[derive(Error, Debug)]
pub enum GatekeeperError {
    /// The record failed one or more checks
    #[error("Record rejected: {}", summarize(.0))]
    Rejected(Vec<RejectionReason>),
}

fn summarize(reasons: &[RejectionReason]) -> String {
    reasons
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
