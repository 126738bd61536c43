//! # Audit Log Repository
//!
//! Append-only CSV storage for audit entries: one line per entry in
//! `{data_directory}/audit_log.csv`, header written once when the file is
//! first created. Entries are never rewritten; the file only grows, which
//! keeps the trail reconstructable even if request records are damaged.

use anyhow::Result;
use async_trait::async_trait;
use csv::{ReaderBuilder, WriterBuilder};
use log::debug;
use std::fs::OpenOptions;

use super::connection::CsvConnection;
use crate::domain::models::audit::AuditEntry;
use crate::storage::traits::AuditStorage;

/// CSV-based audit log repository
#[derive(Clone)]
pub struct AuditRepository {
    connection: CsvConnection,
}

impl AuditRepository {
    /// Create a new audit log repository
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl AuditStorage for AuditRepository {
    async fn append_entry(&self, entry: &AuditEntry) -> Result<()> {
        let path = self.connection.audit_log_path();
        let write_header = !path.exists();

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer.serialize(entry)?;
        writer.flush()?;

        debug!("Appended audit entry {} to {:?}", entry.id, path);
        Ok(())
    }

    async fn list_entries_for(&self, allowance_id: &str) -> Result<Vec<AuditEntry>> {
        let path = self.connection.audit_log_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = ReaderBuilder::new().from_path(&path)?;
        let mut entries = Vec::new();
        for record in reader.deserialize() {
            let entry: AuditEntry = record?;
            if entry.allowance_id == allowance_id {
                entries.push(entry);
            }
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::actor::{Actor, Role};
    use crate::domain::models::audit::AuditAction;
    use tempfile::TempDir;

    fn setup_test_repo() -> (AuditRepository, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let connection = CsvConnection::new(temp_dir.path()).expect("Failed to create connection");
        (AuditRepository::new(connection), temp_dir)
    }

    fn reviewer() -> Actor {
        Actor::new("staff-1", "Grace Achieng", Role::DeputyManager)
    }

    #[tokio::test]
    async fn test_append_and_list_round_trip() {
        let (repo, _temp_dir) = setup_test_repo();

        let first = AuditEntry::new("alw-1", &reviewer(), AuditAction::Submitted, "submission", "");
        let second = AuditEntry::new(
            "alw-1",
            &reviewer(),
            AuditAction::Denied,
            "dpm_review",
            "incomplete paperwork",
        );
        let other = AuditEntry::new("alw-2", &reviewer(), AuditAction::Submitted, "submission", "");

        repo.append_entry(&first).await.unwrap();
        repo.append_entry(&second).await.unwrap();
        repo.append_entry(&other).await.unwrap();

        let entries = repo.list_entries_for("alw-1").await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], first);
        assert_eq!(entries[1], second);
        assert_eq!(entries[1].comment, "incomplete paperwork");
    }

    #[tokio::test]
    async fn test_header_written_once() {
        let (repo, temp_dir) = setup_test_repo();

        let entry = AuditEntry::new("alw-1", &reviewer(), AuditAction::Submitted, "submission", "");
        repo.append_entry(&entry).await.unwrap();
        repo.append_entry(&entry).await.unwrap();

        let content =
            std::fs::read_to_string(temp_dir.path().join("audit_log.csv")).unwrap();
        let header_lines = content
            .lines()
            .filter(|line| line.starts_with("id,allowance_id"))
            .count();
        assert_eq!(header_lines, 1);
        assert_eq!(content.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_list_for_missing_file_is_empty() {
        let (repo, _temp_dir) = setup_test_repo();
        assert!(repo.list_entries_for("alw-1").await.unwrap().is_empty());
    }
}
