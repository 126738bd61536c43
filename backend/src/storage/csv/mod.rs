//! File-based storage backend: YAML documents for allowance requests and an
//! append-only CSV file for the audit log, all under one data directory.

pub mod allowance_repository;
pub mod audit_repository;
pub mod connection;

pub use allowance_repository::AllowanceRepository;
pub use audit_repository::AuditRepository;
pub use connection::CsvConnection;
