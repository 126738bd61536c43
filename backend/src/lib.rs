//! # Allowance Approval Backend
//!
//! Contains all non-UI logic for the scholarship allowance approval
//! workflow: the multi-stage review state machine, money rules, validation,
//! the audit trail, and bulk ingestion of allowance requests.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! Admin web client (external)
//!     ↓
//! IO Layer (REST API, tabular adapter, mappers)
//!     ↓
//! Domain Layer (approval state machine, validation, audit, bulk ingest)
//!     ↓
//! Storage Layer (file-backed repositories behind async traits)
//! ```
//!
//! Authentication, file/photo storage and notification delivery live in
//! external collaborators; the workflow consumes an already-authenticated
//! actor and a durable record store.

pub mod domain;
pub mod io;
pub mod storage;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::http::{HeaderValue, Method};
use axum::Router;
use log::info;
use tower_http::cors::{Any, CorsLayer};

use crate::domain::{ApprovalService, AuditService, BulkImportService};
use crate::storage::csv::{AllowanceRepository, AuditRepository, CsvConnection};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub approval_service: ApprovalService,
    pub audit_service: AuditService,
    pub bulk_import_service: BulkImportService,
}

/// Initialize the backend with all required services
pub fn initialize_backend(data_directory: impl Into<PathBuf>) -> Result<AppState> {
    info!("Setting up file storage");
    let connection = CsvConnection::new(data_directory.into())?;
    let allowance_store = Arc::new(AllowanceRepository::new(connection.clone()));
    let audit_store = Arc::new(AuditRepository::new(connection));

    info!("Setting up domain services");
    let audit_service = AuditService::new(audit_store);
    let approval_service = ApprovalService::new(allowance_store, audit_service.clone());
    let bulk_import_service = BulkImportService::new(approval_service.clone());

    Ok(AppState {
        approval_service,
        audit_service,
        bulk_import_service,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow the admin frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let api_routes = Router::new()
        .nest("/allowances", io::rest::allowance_apis::router())
        .nest("/allowances/bulk", io::rest::bulk_apis::router());

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
