//! # REST API Interface Layer
//!
//! Provides HTTP REST endpoints for the approval workflow. This layer
//! handles:
//! - HTTP request/response serialization and deserialization
//! - Error translation from domain errors to HTTP status codes
//! - Resolving the authenticated actor the auth collaborator supplies
//!
//! ## Design Principles
//!
//! - **Domain Separation**: Pure translation layer without business logic
//! - **Error Transparency**: Status codes come from the typed error
//!   taxonomy, not from string matching on messages
//! - **No Authentication**: The auth subsystem in front of this service
//!   identifies the caller and forwards identity headers; this layer only
//!   reads them

pub mod allowance_apis;
pub mod bulk_apis;
pub mod mappers;

use axum::http::{HeaderMap, StatusCode};

use crate::domain::errors::WorkflowError;
use crate::domain::models::actor::{Actor, Role};

/// Resolve the authenticated actor from the identity headers the auth
/// collaborator attached to the request.
pub fn actor_from_headers(headers: &HeaderMap) -> Result<Actor, (StatusCode, String)> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let id = header("x-actor-id")
        .ok_or((StatusCode::UNAUTHORIZED, "missing x-actor-id header".to_string()))?;
    let name = header("x-actor-name")
        .ok_or((StatusCode::UNAUTHORIZED, "missing x-actor-name header".to_string()))?;
    let role_raw = header("x-actor-role")
        .ok_or((StatusCode::UNAUTHORIZED, "missing x-actor-role header".to_string()))?;
    let role = Role::parse(&role_raw).ok_or((
        StatusCode::UNAUTHORIZED,
        format!("unrecognized role '{}'", role_raw),
    ))?;

    Ok(Actor { id, name, role })
}

/// Map a workflow error onto the HTTP status the admin client expects.
pub fn workflow_error_status(error: &WorkflowError) -> StatusCode {
    match error {
        WorkflowError::Validation(_) | WorkflowError::MissingComment => StatusCode::BAD_REQUEST,
        WorkflowError::Unauthorized { .. } => StatusCode::FORBIDDEN,
        WorkflowError::NotFound { .. } => StatusCode::NOT_FOUND,
        WorkflowError::InvalidState { .. } | WorkflowError::Conflict => StatusCode::CONFLICT,
        WorkflowError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
