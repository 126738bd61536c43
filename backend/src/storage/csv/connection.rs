//! File-system connection for the CSV/YAML storage backend.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// CsvConnection manages the base data directory the file-backed
/// repositories read and write under.
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new connection rooted at `base_directory`, creating the
    /// directory if it does not exist.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Directory holding one YAML document per allowance request.
    pub fn allowances_directory(&self) -> PathBuf {
        self.base_directory.join("allowances")
    }

    /// The append-only audit log file.
    pub fn audit_log_path(&self) -> PathBuf {
        self.base_directory.join("audit_log.csv")
    }
}
