//! Bulk ingestion of allowance requests.
//!
//! Takes the rows a tabular adapter produced from an uploaded file,
//! validates each one independently, and submits the valid ones through the
//! approval service. No row's failure blocks another's processing: the run
//! always completes and reports a per-row breakdown. Rows are submitted
//! strictly in input order so the audit trail matches the file.

use log::{info, warn};

use crate::domain::approval_service::ApprovalService;
use crate::domain::commands::bulk::{BulkImportResult, RawRow, RowFailure};
use crate::domain::models::actor::Actor;
use crate::domain::validation;

/// Message prefix distinguishing a downstream submission failure from a
/// validation failure in per-row error reports.
const SUBMISSION_FAILURE_PREFIX: &str = "submission failed";

/// Service ingesting many candidate requests at once.
#[derive(Clone)]
pub struct BulkImportService {
    approval_service: ApprovalService,
}

impl BulkImportService {
    pub fn new(approval_service: ApprovalService) -> Self {
        Self { approval_service }
    }

    /// Ingest parsed rows on behalf of `actor`.
    ///
    /// Row numbering starts at 2: row 1 of the source file is the header the
    /// tabular adapter consumed. Every row is attempted; validation failures
    /// and submission failures are both collected, the latter tagged with a
    /// distinguishing prefix.
    pub async fn ingest(&self, rows: Vec<RawRow>, actor: &Actor) -> BulkImportResult {
        info!("Bulk ingesting {} rows on behalf of '{}'", rows.len(), actor.name);

        let mut success_count = 0;
        let mut errors = Vec::new();

        for (index, row) in rows.into_iter().enumerate() {
            let row_number = index + 2;

            let command = match validation::validate_row(&row) {
                Ok(command) => command,
                Err(error) => {
                    errors.push(RowFailure {
                        row_number,
                        message: error.to_string(),
                        row,
                    });
                    continue;
                }
            };

            match self.approval_service.submit(command, actor).await {
                Ok(_) => success_count += 1,
                Err(error) => {
                    errors.push(RowFailure {
                        row_number,
                        message: format!("{}: {}", SUBMISSION_FAILURE_PREFIX, error),
                        row,
                    });
                }
            }
        }

        if errors.is_empty() {
            info!("Bulk ingestion finished: {} rows submitted", success_count);
        } else {
            warn!(
                "Bulk ingestion finished: {} rows submitted, {} rows failed",
                success_count,
                errors.len()
            );
        }

        BulkImportResult {
            success_count,
            failure_count: errors.len(),
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit_service::AuditService;
    use crate::domain::commands::allowance::AllowanceListQuery;
    use crate::domain::models::actor::Role;
    use crate::domain::models::allowance::{AllowanceRequest, ProgramCategory, ReviewStage};
    use crate::storage::csv::{AllowanceRepository, AuditRepository, CsvConnection};
    use crate::storage::traits::{AllowanceStorage, UpdateOutcome};
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn setup_test() -> (BulkImportService, ApprovalService, AuditService, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let connection = CsvConnection::new(temp_dir.path()).expect("Failed to create connection");
        let audit_service = AuditService::new(Arc::new(AuditRepository::new(connection.clone())));
        let approval_service = ApprovalService::new(
            Arc::new(AllowanceRepository::new(connection)),
            audit_service.clone(),
        );
        let bulk = BulkImportService::new(approval_service.clone());
        (bulk, approval_service, audit_service, temp_dir)
    }

    fn actor() -> Actor {
        Actor::new("staff-0", "Field Officer", Role::User)
    }

    fn row(name: &str, entries: &[(&str, &str)]) -> RawRow {
        let mut row = RawRow::new();
        row.insert("student_id".to_string(), format!("STU-{}", name.len()));
        row.insert("student_name".to_string(), name.to_string());
        row.insert("month".to_string(), "January".to_string());
        row.insert("year".to_string(), "2025".to_string());
        row.insert("stipend".to_string(), "1000".to_string());
        for (key, value) in entries {
            if value.is_empty() {
                row.remove(*key);
            } else {
                row.insert(key.to_string(), value.to_string());
            }
        }
        row
    }

    #[tokio::test]
    async fn test_partial_failure_reporting() {
        let (bulk, approval_service, audit_service, _temp_dir) = setup_test();

        let rows = vec![
            row("Amina Yusuf", &[]),
            row("Daniel Okello", &[("year", "")]), // missing year, fails validation
            row("Susan Njeri", &[]),
        ];

        let result = bulk.ingest(rows, &actor()).await;

        assert_eq!(result.success_count, 2);
        assert_eq!(result.failure_count, 1);
        assert_eq!(result.errors.len(), 1);
        // Failing row is the second data row: 1-indexed position + 1
        assert_eq!(result.errors[0].row_number, 3);
        assert!(result.errors[0].message.contains("year"));
        assert_eq!(
            result.errors[0].row.get("student_name").map(String::as_str),
            Some("Daniel Okello")
        );

        // Each successful row produced exactly one submitted audit entry
        let stored = approval_service
            .list(AllowanceListQuery::default())
            .await
            .unwrap();
        assert_eq!(stored.len(), 2);
        for request in &stored {
            let trail = audit_service.list_for(&request.id).await.unwrap();
            assert_eq!(trail.len(), 1);
            assert_eq!(trail[0].stage, "submission");
        }
    }

    #[tokio::test]
    async fn test_all_rows_attempted_despite_early_failure() {
        let (bulk, _approval, _audit, _temp_dir) = setup_test();

        let rows = vec![
            row("Bad Row", &[("stipend", "lots")]),
            row("Good Row", &[]),
        ];

        let result = bulk.ingest(rows, &actor()).await;
        assert_eq!(result.success_count, 1);
        assert_eq!(result.failure_count, 1);
        assert_eq!(result.errors[0].row_number, 2);
    }

    #[tokio::test]
    async fn test_default_category_applied_to_rows() {
        let (bulk, approval_service, _audit, _temp_dir) = setup_test();

        let result = bulk.ingest(vec![row("Amina Yusuf", &[])], &actor()).await;
        assert_eq!(result.success_count, 1);

        let stored = approval_service
            .list(AllowanceListQuery::default())
            .await
            .unwrap();
        assert_eq!(stored[0].category, ProgramCategory::University);
        assert_eq!(stored[0].stage, ReviewStage::PendingDpm);
    }

    #[tokio::test]
    async fn test_empty_input_yields_empty_result() {
        let (bulk, _approval, _audit, _temp_dir) = setup_test();
        let result = bulk.ingest(Vec::new(), &actor()).await;
        assert_eq!(result.success_count, 0);
        assert_eq!(result.failure_count, 0);
        assert!(result.errors.is_empty());
    }

    /// Store whose writes always fail, for exercising the submission
    /// failure path.
    struct FailingAllowanceStore;

    #[async_trait]
    impl AllowanceStorage for FailingAllowanceStore {
        async fn create_allowance(
            &self,
            _request: AllowanceRequest,
        ) -> anyhow::Result<AllowanceRequest> {
            Err(anyhow!("disk full"))
        }

        async fn get_allowance(&self, _allowance_id: &str) -> anyhow::Result<Option<AllowanceRequest>> {
            Ok(None)
        }

        async fn update_allowance(
            &self,
            _request: &AllowanceRequest,
            _expected_stage: ReviewStage,
        ) -> anyhow::Result<UpdateOutcome> {
            Err(anyhow!("disk full"))
        }

        async fn list_allowances(
            &self,
            _query: &AllowanceListQuery,
        ) -> anyhow::Result<Vec<AllowanceRequest>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_submission_failures_are_tagged_distinctly() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        let audit_service = AuditService::new(Arc::new(AuditRepository::new(connection)));
        let approval_service =
            ApprovalService::new(Arc::new(FailingAllowanceStore), audit_service);
        let bulk = BulkImportService::new(approval_service);

        let result = bulk.ingest(vec![row("Amina Yusuf", &[])], &actor()).await;

        assert_eq!(result.success_count, 0);
        assert_eq!(result.failure_count, 1);
        assert!(result.errors[0].message.starts_with("submission failed:"));
        assert!(result.errors[0].message.contains("disk full"));
    }
}
