//! # Domain Module
//!
//! Contains all business logic for the allowance approval workflow.
//!
//! This module encapsulates the core business rules, entities, and services
//! that define how allowance disbursement requests are modeled, reviewed,
//! and paid. It operates independently of any specific transport or storage
//! mechanism.
//!
//! ## Module Organization
//!
//! - **money_rules**: Pure per-category total computation
//! - **validation**: Row- and request-level validation of candidate requests
//! - **approval_service**: The stage state machine, authorization, and the
//!   operations that move a request through review
//! - **audit_service**: The append-only log of every workflow action
//! - **bulk_import_service**: Bulk ingestion with per-row partial-failure
//!   reporting
//!
//! ## Core Concepts
//!
//! - **Allowance request**: One disbursement request for one student for
//!   one (month, year)
//! - **Stage**: The request's position in the fixed review sequence
//! - **Review step**: One of the three role-gated review slots
//! - **Audit entry**: An immutable record of one action taken on a request
//!
//! ## Business Rules
//!
//! - Every submission enters at the deputy program manager review stage
//! - Each review stage accepts decisions only from its designated roles
//! - Every decision carries a justification comment
//! - A denial at any review stage is final
//! - Payment marking is admin-only, one-way, and one-time
//! - Totals are derived from components at submission and frozen afterwards

pub mod approval_service;
pub mod audit_service;
pub mod bulk_import_service;
pub mod commands;
pub mod errors;
pub mod models;
pub mod money_rules;
pub mod validation;

pub use approval_service::*;
pub use audit_service::*;
pub use bulk_import_service::*;
pub use commands::*;
pub use errors::*;
