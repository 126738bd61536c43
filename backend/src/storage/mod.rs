//! # Storage Module
//!
//! Handles all data persistence for the approval workflow.
//!
//! The domain layer depends only on the abstractions in [`traits`]; the
//! file-based implementation in [`csv`] is the reference backend and can be
//! swapped for any store that honors the same contracts, most importantly
//! the guarded stage update.

pub mod csv;
pub mod traits;

// Re-export the main types that other modules need
pub use self::csv::{AllowanceRepository, AuditRepository, CsvConnection};
pub use traits::{AllowanceStorage, AuditStorage, UpdateOutcome};
