use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One allowance disbursement request as exposed to the admin client.
///
/// Stage, category and decision values are carried as plain strings at the
/// wire edge; the backend parses them at its mapper boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowanceRequest {
    pub id: String,
    /// Internal student record id, if known
    pub student_id: Option<String>,
    /// External "CHL" student identifier, if known
    pub chl_number: Option<String>,
    pub student_name: String,
    /// Calendar month name, title case
    pub month: String,
    pub year: i32,
    /// Program category: university | college | launch_year
    pub program_level: String,
    pub stipend: f64,
    pub medical: f64,
    pub transportation: f64,
    pub school_supplies: f64,
    pub accommodation: f64,
    /// Derived sum of the five components, never edited directly
    pub total: f64,
    /// Current workflow stage: pending_dpm | pending_flmi | pending_pm | approved | rejected | paid
    pub stage: String,
    pub dpm_review: Option<StageReview>,
    pub flmi_review: Option<StageReview>,
    pub pm_review: Option<StageReview>,
    pub rejection: Option<RejectionDetails>,
    pub submitted_by: String,
    pub submitted_by_name: String,
    /// RFC 3339 timestamp
    pub submitted_at: String,
    /// RFC 3339 timestamp
    pub updated_at: String,
}

/// A reviewer's recorded verdict at one review stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageReview {
    /// approved | denied
    pub status: String,
    pub comment: String,
    pub reviewer_id: String,
    pub reviewer_name: String,
    /// RFC 3339 timestamp
    pub decided_at: String,
}

/// Details recorded when a request is denied at any review stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectionDetails {
    /// Review step label: dpm_review | flmi_review | pm_review
    pub stage: String,
    pub rejected_by: String,
    pub rejected_by_name: String,
    pub reason: String,
    /// RFC 3339 timestamp
    pub rejected_at: String,
}

/// Request payload for submitting a single allowance request interactively.
///
/// Unlike bulk import rows, interactive submissions must name their program
/// level explicitly; there is no default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitAllowanceRequest {
    pub student_id: Option<String>,
    pub chl_number: Option<String>,
    pub student_name: String,
    pub month: String,
    pub year: i32,
    pub program_level: String,
    pub stipend: f64,
    pub medical: Option<f64>,
    pub transportation: Option<f64>,
    pub school_supplies: Option<f64>,
    pub accommodation: Option<f64>,
}

/// Response after submitting an allowance request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitAllowanceResponse {
    pub allowance: AllowanceRequest,
    pub success_message: String,
}

/// Request payload for deciding the review stage a request is waiting in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecideAllowanceRequest {
    /// approve | deny
    pub decision: String,
    /// Justification; required for every decision
    pub comment: String,
}

/// Response after a review decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecideAllowanceResponse {
    pub allowance: AllowanceRequest,
    pub success_message: String,
}

/// Response after marking an approved request as paid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkPaidResponse {
    pub allowance: AllowanceRequest,
    pub success_message: String,
}

/// Query parameters for listing allowance requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllowanceListRequest {
    pub stage: Option<String>,
    pub program_level: Option<String>,
    pub year: Option<i32>,
    pub month: Option<String>,
}

/// Response containing matching allowance requests, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowanceListResponse {
    pub allowances: Vec<AllowanceRequest>,
}

/// Response containing one request together with its full audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowanceDetailResponse {
    pub allowance: AllowanceRequest,
    pub audit_trail: Vec<AuditEntry>,
}

/// One immutable audit record of an action taken on a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: String,
    pub allowance_id: String,
    pub actor_id: String,
    pub actor_name: String,
    pub actor_role: String,
    /// submitted | approved | denied | paid
    pub action: String,
    /// Stage label: submission | dpm_review | flmi_review | pm_review | payment
    pub stage: String,
    pub comment: String,
    /// RFC 3339 timestamp
    pub timestamp: String,
}

/// Aggregate outcome of a bulk import run.
///
/// Bulk runs always complete; individual row failures are reported here
/// rather than aborting the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkImportResponse {
    pub success_count: usize,
    pub failure_count: usize,
    pub errors: Vec<BulkRowError>,
}

/// One failed bulk row, tagged with its position in the source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkRowError {
    /// 1-indexed file position; row 1 is the header, so data rows start at 2
    pub row_number: usize,
    pub message: String,
    /// The original row as parsed, for correction by the operator
    pub row: HashMap<String, String>,
}
