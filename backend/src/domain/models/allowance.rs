//! Domain models for allowance disbursement requests.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::models::actor::Role;

/// Program category a student is enrolled in. Closed set; the category
/// decides which allowance components apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramCategory {
    University,
    College,
    LaunchYear,
}

impl ProgramCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramCategory::University => "university",
            ProgramCategory::College => "college",
            ProgramCategory::LaunchYear => "launch_year",
        }
    }

    /// Parse a category value, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "university" => Some(ProgramCategory::University),
            "college" => Some(ProgramCategory::College),
            "launch_year" | "launch year" => Some(ProgramCategory::LaunchYear),
            _ => None,
        }
    }
}

impl fmt::Display for ProgramCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Workflow stage of an allowance request.
///
/// A request enters at `PendingDpm` and advances through the fixed review
/// sequence; `Rejected` is reachable from any pending stage. `Paid` and
/// `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStage {
    PendingDpm,
    PendingFlmi,
    PendingPm,
    Approved,
    Rejected,
    Paid,
}

impl ReviewStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStage::PendingDpm => "pending_dpm",
            ReviewStage::PendingFlmi => "pending_flmi",
            ReviewStage::PendingPm => "pending_pm",
            ReviewStage::Approved => "approved",
            ReviewStage::Rejected => "rejected",
            ReviewStage::Paid => "paid",
        }
    }

    /// Parse a stage value, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "pending_dpm" => Some(ReviewStage::PendingDpm),
            "pending_flmi" => Some(ReviewStage::PendingFlmi),
            "pending_pm" => Some(ReviewStage::PendingPm),
            "approved" => Some(ReviewStage::Approved),
            "rejected" => Some(ReviewStage::Rejected),
            "paid" => Some(ReviewStage::Paid),
            _ => None,
        }
    }

    /// Terminal stages admit no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReviewStage::Paid | ReviewStage::Rejected)
    }

    /// Total-order label over stages, used for filtering and sorting only,
    /// never for transition decisions. Approved and rejected share a rank.
    pub fn order_index(&self) -> u8 {
        match self {
            ReviewStage::PendingDpm => 0,
            ReviewStage::PendingFlmi => 1,
            ReviewStage::PendingPm => 2,
            ReviewStage::Approved | ReviewStage::Rejected => 3,
            ReviewStage::Paid => 4,
        }
    }

    /// The review step that decides at this stage, if the stage is awaiting
    /// review at all.
    pub fn review_step(&self) -> Option<ReviewStep> {
        match self {
            ReviewStage::PendingDpm => Some(ReviewStep::Dpm),
            ReviewStage::PendingFlmi => Some(ReviewStep::Flmi),
            ReviewStage::PendingPm => Some(ReviewStep::Pm),
            _ => None,
        }
    }
}

impl fmt::Display for ReviewStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One of the three review steps a request passes through.
///
/// Serialized as its stage label so stored rejection details and audit
/// entries read as `dpm_review` etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewStep {
    #[serde(rename = "dpm_review")]
    Dpm,
    #[serde(rename = "flmi_review")]
    Flmi,
    #[serde(rename = "pm_review")]
    Pm,
}

impl ReviewStep {
    /// Stage label recorded on audit entries and rejection details.
    pub fn label(&self) -> &'static str {
        match self {
            ReviewStep::Dpm => "dpm_review",
            ReviewStep::Flmi => "flmi_review",
            ReviewStep::Pm => "pm_review",
        }
    }

    /// The single authorization table: roles allowed to decide this step.
    /// Both `ApprovalService::decide` and `ApprovalService::can_decide`
    /// consult it, so the enforcement path and the display predicate cannot
    /// drift apart.
    pub fn required_roles(&self) -> &'static [Role] {
        match self {
            ReviewStep::Dpm => &[Role::DeputyManager],
            ReviewStep::Flmi | ReviewStep::Pm => &[Role::Admin, Role::ProgramOfficer],
        }
    }

    /// Stage the request advances to when this step approves.
    pub fn next_stage(&self) -> ReviewStage {
        match self {
            ReviewStep::Dpm => ReviewStage::PendingFlmi,
            ReviewStep::Flmi => ReviewStage::PendingPm,
            ReviewStep::Pm => ReviewStage::Approved,
        }
    }
}

impl fmt::Display for ReviewStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Recorded verdict of one review step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Approved,
    Denied,
}

impl StageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageStatus::Approved => "approved",
            StageStatus::Denied => "denied",
        }
    }
}

/// A reviewer's verdict on one stage, with its mandatory justification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageReview {
    pub status: StageStatus,
    pub comment: String,
    pub reviewer_id: String,
    pub reviewer_name: String,
    pub decided_at: String, // RFC 3339 timestamp
}

/// Details recorded when a request is denied at any review stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectionDetails {
    /// The review step at which the request was denied
    pub stage: ReviewStep,
    pub rejected_by: String,
    pub rejected_by_name: String,
    pub reason: String,
    pub rejected_at: String, // RFC 3339 timestamp
}

/// One disbursement request for one student for one (month, year).
///
/// Student identity, period, category and amounts are fixed at submission;
/// only the workflow fields change afterwards, and only through the
/// approval service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowanceRequest {
    /// Assigned by the repository on creation
    pub id: String,
    pub student_id: Option<String>,
    pub chl_number: Option<String>,
    pub student_name: String,
    /// Calendar month name, title case
    pub month: String,
    pub year: i32,
    pub category: ProgramCategory,
    pub stipend: f64,
    pub medical: f64,
    pub transportation: f64,
    pub school_supplies: f64,
    pub accommodation: f64,
    /// Derived sum of the five components; recomputed whenever they change
    pub total: f64,
    pub stage: ReviewStage,
    pub dpm_review: Option<StageReview>,
    pub flmi_review: Option<StageReview>,
    pub pm_review: Option<StageReview>,
    pub rejection: Option<RejectionDetails>,
    pub submitted_by: String,
    pub submitted_by_name: String,
    pub submitted_at: String, // RFC 3339 timestamp
    pub updated_at: String,   // RFC 3339 timestamp
}

impl AllowanceRequest {
    /// The review slot belonging to a step.
    pub fn review_slot(&self, step: ReviewStep) -> Option<&StageReview> {
        match step {
            ReviewStep::Dpm => self.dpm_review.as_ref(),
            ReviewStep::Flmi => self.flmi_review.as_ref(),
            ReviewStep::Pm => self.pm_review.as_ref(),
        }
    }

    /// Mutable access to the review slot belonging to a step.
    pub fn review_slot_mut(&mut self, step: ReviewStep) -> &mut Option<StageReview> {
        match step {
            ReviewStep::Dpm => &mut self.dpm_review,
            ReviewStep::Flmi => &mut self.flmi_review,
            ReviewStep::Pm => &mut self.pm_review,
        }
    }
}

/// The twelve English calendar month names, title case.
pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Normalize a month name to title case; `None` if the input is not one of
/// the twelve calendar months.
pub fn normalize_month(input: &str) -> Option<String> {
    let trimmed = input.trim();
    let mut chars = trimmed.chars();
    let first = chars.next()?;
    let candidate = format!("{}{}", first.to_uppercase(), chars.as_str().to_lowercase());
    MONTHS
        .iter()
        .find(|month| **month == candidate)
        .map(|month| month.to_string())
}
