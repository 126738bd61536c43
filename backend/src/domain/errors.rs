//! Error taxonomy of the approval workflow.
//!
//! Callers branch on these variants: validation problems are correctable
//! input, authorization and state problems reject the operation without
//! mutating anything, and storage problems propagate unchanged.

use thiserror::Error;

use crate::domain::models::actor::Role;
use crate::domain::models::allowance::ReviewStage;

/// A field-level problem with a submission or bulk-import row.
///
/// Never persisted; always surfaced with enough context to correct the
/// input. Bulk ingestion collects these per row instead of aborting.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("row has neither a student_id nor a chl_number")]
    MissingIdentifier,
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("year '{0}' must be a positive integer")]
    InvalidYear(String),
    #[error("unrecognized program category '{0}'")]
    InvalidCategory(String),
    #[error("'{0}' is not a calendar month")]
    InvalidMonth(String),
    #[error("invalid amount for '{field}': {reason}")]
    InvalidAmount { field: &'static str, reason: String },
}

/// Failure of a workflow operation.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The actor's role does not match the reviewer role the request's
    /// current stage requires, or the stage admits no decision at all.
    #[error("role '{role}' is not authorized to act on a request in stage '{stage}'")]
    Unauthorized { stage: ReviewStage, role: Role },
    /// Every decision must be justified.
    #[error("a decision requires a justification comment")]
    MissingComment,
    #[error("operation requires stage '{expected}' but the request is in stage '{actual}'")]
    InvalidState {
        expected: ReviewStage,
        actual: ReviewStage,
    },
    /// The stored stage moved between read and commit. Callers re-fetch and
    /// retry at their discretion; the workflow never retries internally.
    #[error("the request changed while the operation was in flight; re-fetch and retry")]
    Conflict,
    #[error("allowance request '{id}' not found")]
    NotFound { id: String },
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages_name_the_field() {
        let error = ValidationError::MissingField("year");
        assert_eq!(error.to_string(), "missing required field 'year'");

        let error = ValidationError::InvalidAmount {
            field: "stipend",
            reason: "'abc' is not a number".to_string(),
        };
        assert!(error.to_string().contains("stipend"));
        assert!(error.to_string().contains("abc"));
    }

    #[test]
    fn test_unauthorized_names_stage_and_role() {
        let error = WorkflowError::Unauthorized {
            stage: ReviewStage::PendingDpm,
            role: Role::User,
        };
        let message = error.to_string();
        assert!(message.contains("pending_dpm"));
        assert!(message.contains("user"));
    }
}
