//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types.

pub mod allowance {
    use crate::domain::models::allowance::{AllowanceRequest, ProgramCategory, ReviewStage};

    /// Input for submitting a new allowance request.
    ///
    /// The category is concrete here: the bulk path resolves its default
    /// before building a command, and the interactive mapper refuses to
    /// build one without an explicit category.
    #[derive(Debug, Clone, PartialEq)]
    pub struct SubmitAllowanceCommand {
        pub student_id: Option<String>,
        pub chl_number: Option<String>,
        pub student_name: String,
        pub month: String,
        pub year: i32,
        pub category: ProgramCategory,
        pub stipend: f64,
        pub medical: f64,
        pub transportation: f64,
        pub school_supplies: f64,
        pub accommodation: f64,
    }

    /// Result of submitting an allowance request.
    #[derive(Debug, Clone)]
    pub struct SubmitAllowanceResult {
        pub request: AllowanceRequest,
        pub success_message: String,
    }

    /// The verdict a reviewer hands down on the stage awaiting review.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ReviewDecision {
        Approve,
        Deny,
    }

    /// Input for deciding the review stage a request is waiting in.
    #[derive(Debug, Clone)]
    pub struct DecideAllowanceCommand {
        pub allowance_id: String,
        pub decision: ReviewDecision,
        pub comment: String,
    }

    /// Result of a review decision.
    #[derive(Debug, Clone)]
    pub struct DecideAllowanceResult {
        pub request: AllowanceRequest,
        pub success_message: String,
    }

    /// Input for marking an approved request as paid.
    #[derive(Debug, Clone)]
    pub struct MarkPaidCommand {
        pub allowance_id: String,
    }

    /// Result of marking a request as paid.
    #[derive(Debug, Clone)]
    pub struct MarkPaidResult {
        pub request: AllowanceRequest,
        pub success_message: String,
    }

    /// Query parameters for listing allowance requests.
    #[derive(Debug, Clone, Default)]
    pub struct AllowanceListQuery {
        pub stage: Option<ReviewStage>,
        pub category: Option<ProgramCategory>,
        pub year: Option<i32>,
        pub month: Option<String>,
    }
}

pub mod bulk {
    use std::collections::HashMap;

    /// One data row from the tabular adapter: lowercased, trimmed column
    /// name to raw string value.
    pub type RawRow = HashMap<String, String>;

    /// One failed row, tagged with its position in the source file.
    #[derive(Debug, Clone)]
    pub struct RowFailure {
        /// 1-indexed file position; row 1 is the header, so data rows start at 2
        pub row_number: usize,
        pub message: String,
        pub row: RawRow,
    }

    /// Aggregate outcome of a bulk ingestion run. The run always completes;
    /// failures are collected here per row.
    #[derive(Debug, Clone, Default)]
    pub struct BulkImportResult {
        pub success_count: usize,
        pub failure_count: usize,
        pub errors: Vec<RowFailure>,
    }
}
