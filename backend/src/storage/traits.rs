//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.
//!
//! The workflow never holds the only copy of truth: every state-changing
//! operation reads and writes through these interfaces, and the guarded
//! update exists so two concurrent decisions cannot both commit from the
//! same stale stage read.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::commands::allowance::AllowanceListQuery;
use crate::domain::models::allowance::{AllowanceRequest, ReviewStage};
use crate::domain::models::audit::AuditEntry;

/// Outcome of a guarded allowance update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The record was committed.
    Updated,
    /// The stored stage no longer matches the stage the caller read; the
    /// write was refused.
    StageConflict,
    /// No record with that id exists.
    NotFound,
}

/// Trait defining the interface for allowance request storage operations
///
/// This trait abstracts away the specific storage implementation details,
/// allowing the domain layer to work with different storage backends
/// without modification.
#[async_trait]
pub trait AllowanceStorage: Send + Sync {
    /// Persist a new allowance request, assigning and returning its id
    async fn create_allowance(&self, request: AllowanceRequest) -> Result<AllowanceRequest>;

    /// Retrieve a specific request by id
    async fn get_allowance(&self, allowance_id: &str) -> Result<Option<AllowanceRequest>>;

    /// Commit an updated request. The implementation must re-read the
    /// stored stage immediately before writing and refuse to commit over a
    /// stage change.
    async fn update_allowance(
        &self,
        request: &AllowanceRequest,
        expected_stage: ReviewStage,
    ) -> Result<UpdateOutcome>;

    /// List requests matching the query, most recently submitted first
    async fn list_allowances(&self, query: &AllowanceListQuery) -> Result<Vec<AllowanceRequest>>;
}

/// Trait defining the interface for audit log storage operations
#[async_trait]
pub trait AuditStorage: Send + Sync {
    /// Append one immutable entry. Fails only on a write failure, never on
    /// business grounds.
    async fn append_entry(&self, entry: &AuditEntry) -> Result<()>;

    /// All entries for one request, in stored order
    async fn list_entries_for(&self, allowance_id: &str) -> Result<Vec<AuditEntry>>;
}
