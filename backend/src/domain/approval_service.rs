//! # Approval Service
//!
//! Owns the authoritative stage transitions for allowance requests: the
//! fixed review sequence, the role authorization table, the derived total,
//! and the audit entry each operation leaves behind.
//!
//! Stages form a closed enumeration with an explicit transition function
//! (`ReviewStep::next_stage`), so there is no call site comparing stage
//! strings. Authorization comes from one table (`ReviewStep::required_roles`)
//! consulted by both [`ApprovalService::decide`] and
//! [`ApprovalService::can_decide`].

use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::audit_service::AuditService;
use crate::domain::commands::allowance::{
    AllowanceListQuery, DecideAllowanceCommand, DecideAllowanceResult, MarkPaidCommand,
    MarkPaidResult, ReviewDecision, SubmitAllowanceCommand, SubmitAllowanceResult,
};
use crate::domain::errors::{ValidationError, WorkflowError};
use crate::domain::models::actor::{Actor, Role};
use crate::domain::models::allowance::{
    normalize_month, AllowanceRequest, RejectionDetails, ReviewStage, StageReview, StageStatus,
};
use crate::domain::models::audit::{AuditAction, PAYMENT_STAGE_LABEL, SUBMISSION_STAGE_LABEL};
use crate::domain::money_rules::{compute_total, AllowanceComponents};
use crate::domain::validation;
use crate::storage::traits::{AllowanceStorage, UpdateOutcome};

/// Service for the allowance approval workflow.
#[derive(Clone)]
pub struct ApprovalService {
    allowance_store: Arc<dyn AllowanceStorage>,
    audit_service: AuditService,
}

impl ApprovalService {
    pub fn new(allowance_store: Arc<dyn AllowanceStorage>, audit_service: AuditService) -> Self {
        Self {
            allowance_store,
            audit_service,
        }
    }

    /// Submit a new allowance request into the review pipeline.
    ///
    /// Validates the command, computes the derived total, stamps the
    /// submitter, persists the record and appends the submission audit
    /// entry. Nothing is persisted when validation fails.
    pub async fn submit(
        &self,
        command: SubmitAllowanceCommand,
        actor: &Actor,
    ) -> Result<SubmitAllowanceResult, WorkflowError> {
        info!(
            "Submitting allowance request for '{}' ({} {})",
            command.student_name, command.month, command.year
        );

        validation::validate_submission(&command)?;
        let month = normalize_month(&command.month)
            .ok_or_else(|| ValidationError::InvalidMonth(command.month.clone()))?;

        let (components, total) = compute_total(
            command.category,
            AllowanceComponents {
                stipend: command.stipend,
                medical: command.medical,
                transportation: command.transportation,
                school_supplies: command.school_supplies,
                accommodation: command.accommodation,
            },
        );

        let now = Utc::now().to_rfc3339();
        let request = AllowanceRequest {
            id: String::new(), // assigned by the repository
            student_id: command.student_id,
            chl_number: command.chl_number,
            student_name: command.student_name,
            month,
            year: command.year,
            category: command.category,
            stipend: components.stipend,
            medical: components.medical,
            transportation: components.transportation,
            school_supplies: components.school_supplies,
            accommodation: components.accommodation,
            total,
            stage: ReviewStage::PendingDpm,
            dpm_review: None,
            flmi_review: None,
            pm_review: None,
            rejection: None,
            submitted_by: actor.id.clone(),
            submitted_by_name: actor.name.clone(),
            submitted_at: now.clone(),
            updated_at: now,
        };

        let stored = self.allowance_store.create_allowance(request).await?;
        self.audit_service
            .record(&stored.id, actor, AuditAction::Submitted, SUBMISSION_STAGE_LABEL, "")
            .await?;

        info!(
            "Allowance request {} for '{}' submitted (total {:.2}) in stage {}",
            stored.id, stored.student_name, stored.total, stored.stage
        );

        Ok(SubmitAllowanceResult {
            success_message: format!(
                "Allowance request for {} submitted for review",
                stored.student_name
            ),
            request: stored,
        })
    }

    /// Fetch one request by id.
    pub async fn get(&self, allowance_id: &str) -> Result<AllowanceRequest, WorkflowError> {
        self.allowance_store
            .get_allowance(allowance_id)
            .await?
            .ok_or_else(|| WorkflowError::NotFound {
                id: allowance_id.to_string(),
            })
    }

    /// List requests matching the query, most recently submitted first.
    pub async fn list(
        &self,
        query: AllowanceListQuery,
    ) -> Result<Vec<AllowanceRequest>, WorkflowError> {
        Ok(self.allowance_store.list_allowances(&query).await?)
    }

    /// Whether `actor` may decide the stage `request` is currently waiting
    /// in. Pure predicate over the same authorization table [`decide`]
    /// enforces, for callers deciding whether to offer the operation.
    ///
    /// [`decide`]: ApprovalService::decide
    pub fn can_decide(request: &AllowanceRequest, actor: &Actor) -> bool {
        request
            .stage
            .review_step()
            .map_or(false, |step| step.required_roles().contains(&actor.role))
    }

    /// Record a reviewer's decision on the stage a request is waiting in.
    ///
    /// Approval advances the request along the fixed sequence; denial moves
    /// it to the absorbing rejected stage and records the rejection
    /// metadata. Either way exactly one audit entry is appended. The total
    /// is frozen at submission and never recomputed here.
    pub async fn decide(
        &self,
        command: DecideAllowanceCommand,
        actor: &Actor,
    ) -> Result<DecideAllowanceResult, WorkflowError> {
        let mut request = self.get(&command.allowance_id).await?;

        let comment = command.comment.trim().to_string();
        if comment.is_empty() {
            return Err(WorkflowError::MissingComment);
        }

        // A terminal or already-approved request has no review step; that is
        // an authorization failure, not a distinct state error.
        let step = match request.stage.review_step() {
            Some(step) => step,
            None => {
                warn!(
                    "Decision attempted on request {} in non-review stage {}",
                    request.id, request.stage
                );
                return Err(WorkflowError::Unauthorized {
                    stage: request.stage,
                    role: actor.role,
                });
            }
        };
        if !step.required_roles().contains(&actor.role) {
            return Err(WorkflowError::Unauthorized {
                stage: request.stage,
                role: actor.role,
            });
        }

        let observed_stage = request.stage;
        let now = Utc::now().to_rfc3339();
        let (status, action) = match command.decision {
            ReviewDecision::Approve => (StageStatus::Approved, AuditAction::Approved),
            ReviewDecision::Deny => (StageStatus::Denied, AuditAction::Denied),
        };

        *request.review_slot_mut(step) = Some(StageReview {
            status,
            comment: comment.clone(),
            reviewer_id: actor.id.clone(),
            reviewer_name: actor.name.clone(),
            decided_at: now.clone(),
        });
        match command.decision {
            ReviewDecision::Approve => {
                request.stage = step.next_stage();
            }
            ReviewDecision::Deny => {
                request.stage = ReviewStage::Rejected;
                request.rejection = Some(RejectionDetails {
                    stage: step,
                    rejected_by: actor.id.clone(),
                    rejected_by_name: actor.name.clone(),
                    reason: comment.clone(),
                    rejected_at: now.clone(),
                });
            }
        }
        request.updated_at = now;

        self.commit(&request, observed_stage).await?;
        self.audit_service
            .record(&request.id, actor, action, step.label(), &comment)
            .await?;

        let success_message = match command.decision {
            ReviewDecision::Approve => format!(
                "Request for {} approved at {}; now in stage {}",
                request.student_name,
                step.label(),
                request.stage
            ),
            ReviewDecision::Deny => {
                format!("Request for {} denied at {}", request.student_name, step.label())
            }
        };
        info!("{}", success_message);

        Ok(DecideAllowanceResult {
            request,
            success_message,
        })
    }

    /// Mark an approved request as paid. One-way, one-time: repeating the
    /// call fails with `InvalidState` rather than silently succeeding.
    ///
    /// The admin-only gate lives here, inside the state machine boundary,
    /// so no caller can reach `paid` around it.
    pub async fn mark_paid(
        &self,
        command: MarkPaidCommand,
        actor: &Actor,
    ) -> Result<MarkPaidResult, WorkflowError> {
        let mut request = self.get(&command.allowance_id).await?;

        if actor.role != Role::Admin {
            return Err(WorkflowError::Unauthorized {
                stage: request.stage,
                role: actor.role,
            });
        }
        if request.stage != ReviewStage::Approved {
            return Err(WorkflowError::InvalidState {
                expected: ReviewStage::Approved,
                actual: request.stage,
            });
        }

        request.stage = ReviewStage::Paid;
        request.updated_at = Utc::now().to_rfc3339();

        self.commit(&request, ReviewStage::Approved).await?;
        self.audit_service
            .record(&request.id, actor, AuditAction::Paid, PAYMENT_STAGE_LABEL, "")
            .await?;

        info!("Allowance request {} marked as paid", request.id);

        Ok(MarkPaidResult {
            success_message: format!(
                "Disbursement to {} recorded as paid",
                request.student_name
            ),
            request,
        })
    }

    /// Commit an updated record, translating the repository's guarded
    /// update outcome. The repository re-reads the stored stage immediately
    /// before writing; a mismatch means a concurrent operation won.
    async fn commit(
        &self,
        request: &AllowanceRequest,
        expected_stage: ReviewStage,
    ) -> Result<(), WorkflowError> {
        match self
            .allowance_store
            .update_allowance(request, expected_stage)
            .await?
        {
            UpdateOutcome::Updated => Ok(()),
            UpdateOutcome::StageConflict => Err(WorkflowError::Conflict),
            UpdateOutcome::NotFound => Err(WorkflowError::NotFound {
                id: request.id.clone(),
            }),
        }
    }
}
