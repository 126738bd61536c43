//! # Allowance Request Repository
//!
//! File-based allowance request storage: one YAML document per request under
//! `{data_directory}/allowances/{id}.yaml`.
//!
//! ## File Structure
//!
//! ```text
//! data/
//! ├── audit_log.csv
//! └── allowances/
//!     ├── 3f8a….yaml    ← This module manages these files
//!     └── 91c2….yaml
//! ```
//!
//! Writes are atomic (temp file, then rename). Updates are guarded: the
//! stored stage is re-read immediately before the rename and a mismatch
//! refuses the commit, which is what lets the approval service surface a
//! `Conflict` instead of silently losing a concurrent decision.

use anyhow::Result;
use async_trait::async_trait;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::connection::CsvConnection;
use crate::domain::commands::allowance::AllowanceListQuery;
use crate::domain::models::allowance::{AllowanceRequest, ReviewStage};
use crate::storage::traits::{AllowanceStorage, UpdateOutcome};

/// File-backed allowance request repository
#[derive(Clone)]
pub struct AllowanceRepository {
    connection: CsvConnection,
}

impl AllowanceRepository {
    /// Create a new allowance request repository
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn request_path(&self, allowance_id: &str) -> PathBuf {
        self.connection
            .allowances_directory()
            .join(format!("{}.yaml", allowance_id))
    }

    /// Write a request document atomically: temp file, then rename.
    fn write_request(&self, request: &AllowanceRequest) -> Result<()> {
        let directory = self.connection.allowances_directory();
        if !directory.exists() {
            fs::create_dir_all(&directory)?;
        }

        let path = self.request_path(&request.id);
        let yaml_content = serde_yaml::to_string(request)?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    fn read_request(&self, path: &Path) -> Result<AllowanceRequest> {
        let yaml_content = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&yaml_content)?)
    }

    fn matches(request: &AllowanceRequest, query: &AllowanceListQuery) -> bool {
        query.stage.map_or(true, |stage| request.stage == stage)
            && query.category.map_or(true, |category| request.category == category)
            && query.year.map_or(true, |year| request.year == year)
            && query
                .month
                .as_deref()
                .map_or(true, |month| request.month.eq_ignore_ascii_case(month))
    }
}

#[async_trait]
impl AllowanceStorage for AllowanceRepository {
    async fn create_allowance(&self, mut request: AllowanceRequest) -> Result<AllowanceRequest> {
        request.id = Uuid::new_v4().to_string();
        self.write_request(&request)?;
        info!("Created allowance request {} for '{}'", request.id, request.student_name);
        Ok(request)
    }

    async fn get_allowance(&self, allowance_id: &str) -> Result<Option<AllowanceRequest>> {
        let path = self.request_path(allowance_id);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(self.read_request(&path)?))
    }

    async fn update_allowance(
        &self,
        request: &AllowanceRequest,
        expected_stage: ReviewStage,
    ) -> Result<UpdateOutcome> {
        let path = self.request_path(&request.id);
        if !path.exists() {
            return Ok(UpdateOutcome::NotFound);
        }

        // Re-read immediately before committing: a stage that moved since
        // the caller's read means a concurrent operation already won.
        let stored = self.read_request(&path)?;
        if stored.stage != expected_stage {
            warn!(
                "Refusing update of {}: stored stage {} no longer matches expected {}",
                request.id, stored.stage, expected_stage
            );
            return Ok(UpdateOutcome::StageConflict);
        }

        self.write_request(request)?;
        Ok(UpdateOutcome::Updated)
    }

    async fn list_allowances(&self, query: &AllowanceListQuery) -> Result<Vec<AllowanceRequest>> {
        let directory = self.connection.allowances_directory();
        if !directory.exists() {
            return Ok(Vec::new());
        }

        let mut requests = Vec::new();
        for entry in fs::read_dir(&directory)? {
            let path = entry?.path();
            if path.extension().and_then(|extension| extension.to_str()) != Some("yaml") {
                continue;
            }
            match self.read_request(&path) {
                Ok(request) => {
                    if Self::matches(&request, query) {
                        requests.push(request);
                    }
                }
                Err(error) => {
                    warn!("Skipping unreadable allowance file {:?}: {}", path, error);
                }
            }
        }

        // Newest first; id as tie-breaker for a stable order
        requests.sort_by(|a, b| {
            b.submitted_at
                .cmp(&a.submitted_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(requests)
    }
}
