//! Audit trail records.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::models::actor::Actor;

/// Stage label recorded on the submission audit entry.
pub const SUBMISSION_STAGE_LABEL: &str = "submission";

/// Stage label recorded on the payment audit entry.
pub const PAYMENT_STAGE_LABEL: &str = "payment";

/// Action recorded by an audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Submitted,
    Approved,
    Denied,
    Paid,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Submitted => "submitted",
            AuditAction::Approved => "approved",
            AuditAction::Denied => "denied",
            AuditAction::Paid => "paid",
        }
    }
}

/// One immutable record of an action taken on an allowance request.
///
/// Entries are append-only: created exactly once per state-changing
/// operation, never mutated or deleted. The flat string fields keep the
/// record readable even if the request itself is later corrupted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: String,
    pub allowance_id: String,
    pub actor_id: String,
    pub actor_name: String,
    pub actor_role: String,
    pub action: AuditAction,
    /// Which step produced this entry: submission, a review label, or payment
    pub stage: String,
    pub comment: String,
    pub timestamp: String, // RFC 3339
}

impl AuditEntry {
    /// Generate an audit entry ID from the allowance it belongs to
    pub fn generate_id(allowance_id: &str, epoch_millis: u64) -> String {
        format!("audit::{}::{}", allowance_id, epoch_millis)
    }

    /// Build an entry for an action happening now.
    pub fn new(
        allowance_id: &str,
        actor: &Actor,
        action: AuditAction,
        stage: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Self::generate_id(allowance_id, now.timestamp_millis() as u64),
            allowance_id: allowance_id.to_string(),
            actor_id: actor.id.clone(),
            actor_name: actor.name.clone(),
            actor_role: actor.role.as_str().to_string(),
            action,
            stage: stage.into(),
            comment: comment.into(),
            timestamp: now.to_rfc3339(),
        }
    }
}
