//! Append-only audit log over allowance requests.
//!
//! Decisions on disbursements are operationally sensitive: every transition
//! must be independently reconstructable from the log, even if the request
//! record itself is later corrupted. The service therefore only appends and
//! reads; nothing here mutates or deletes an entry.

use anyhow::Result;
use log::debug;
use std::sync::Arc;

use crate::domain::models::actor::Actor;
use crate::domain::models::audit::{AuditAction, AuditEntry};
use crate::storage::traits::AuditStorage;

/// Service recording and reading the audit trail.
#[derive(Clone)]
pub struct AuditService {
    store: Arc<dyn AuditStorage>,
}

impl AuditService {
    pub fn new(store: Arc<dyn AuditStorage>) -> Self {
        Self { store }
    }

    /// Append exactly one entry for an action happening now. Fails only if
    /// the store write fails; never rejects on business grounds.
    pub async fn record(
        &self,
        allowance_id: &str,
        actor: &Actor,
        action: AuditAction,
        stage: &str,
        comment: &str,
    ) -> Result<AuditEntry> {
        let entry = AuditEntry::new(allowance_id, actor, action, stage, comment);
        self.store.append_entry(&entry).await?;
        debug!(
            "Recorded audit entry {} ({} at {})",
            entry.id,
            entry.action.as_str(),
            entry.stage
        );
        Ok(entry)
    }

    /// The full trail for one request, oldest first. The sequence is finite
    /// and re-fetchable, not a live stream.
    pub async fn list_for(&self, allowance_id: &str) -> Result<Vec<AuditEntry>> {
        let mut entries = self.store.list_entries_for(allowance_id).await?;
        entries.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::actor::Role;
    use crate::storage::csv::{AuditRepository, CsvConnection};
    use tempfile::TempDir;

    fn setup_test() -> (AuditService, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let connection = CsvConnection::new(temp_dir.path()).expect("Failed to create connection");
        let service = AuditService::new(Arc::new(AuditRepository::new(connection)));
        (service, temp_dir)
    }

    #[tokio::test]
    async fn test_record_and_list_for() {
        let (service, _temp_dir) = setup_test();
        let submitter = Actor::new("staff-1", "Grace Achieng", Role::User);
        let reviewer = Actor::new("staff-2", "Peter Otieno", Role::DeputyManager);

        service
            .record("alw-1", &submitter, AuditAction::Submitted, "submission", "")
            .await
            .unwrap();
        service
            .record("alw-1", &reviewer, AuditAction::Approved, "dpm_review", "documents verified")
            .await
            .unwrap();
        service
            .record("alw-2", &submitter, AuditAction::Submitted, "submission", "")
            .await
            .unwrap();

        let trail = service.list_for("alw-1").await.unwrap();
        assert_eq!(trail.len(), 2);
        assert_eq!(trail[0].action, AuditAction::Submitted);
        assert_eq!(trail[1].action, AuditAction::Approved);
        assert_eq!(trail[1].comment, "documents verified");
        assert!(trail[0].timestamp <= trail[1].timestamp);
    }

    #[tokio::test]
    async fn test_list_for_unknown_request_is_empty() {
        let (service, _temp_dir) = setup_test();
        let trail = service.list_for("alw-none").await.unwrap();
        assert!(trail.is_empty());
    }
}
