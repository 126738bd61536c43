//! # REST API for Allowance Requests
//!
//! Endpoints for submitting, listing, reviewing and paying allowance
//! requests.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::{error, info};

use crate::domain::commands::allowance::{DecideAllowanceCommand, MarkPaidCommand};
use crate::io::rest::mappers::allowance_mapper::AllowanceMapper;
use crate::io::rest::mappers::audit_mapper::AuditMapper;
use crate::io::rest::{actor_from_headers, workflow_error_status};
use crate::AppState;

/// Create a router for allowance request APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_allowances).post(submit_allowance))
        .route("/:id", get(get_allowance))
        .route("/:id/decision", post(decide_allowance))
        .route("/:id/payment", post(mark_paid))
}

/// Submit a new allowance request
pub async fn submit_allowance(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<shared::SubmitAllowanceRequest>,
) -> impl IntoResponse {
    info!("POST /api/allowances - student: {}", request.student_name);

    let actor = match actor_from_headers(&headers) {
        Ok(actor) => actor,
        Err(rejection) => return rejection.into_response(),
    };
    let command = match AllowanceMapper::submit_to_command(request) {
        Ok(command) => command,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    match state.approval_service.submit(command, &actor).await {
        Ok(result) => {
            let response = shared::SubmitAllowanceResponse {
                allowance: AllowanceMapper::to_dto(result.request),
                success_message: result.success_message,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to submit allowance request: {}", e);
            (workflow_error_status(&e), e.to_string()).into_response()
        }
    }
}

/// List allowance requests, optionally filtered
pub async fn list_allowances(
    State(state): State<AppState>,
    Query(request): Query<shared::AllowanceListRequest>,
) -> impl IntoResponse {
    info!("GET /api/allowances - filters: {:?}", request);

    let query = match AllowanceMapper::list_to_query(request) {
        Ok(query) => query,
        Err(message) => return (StatusCode::BAD_REQUEST, message).into_response(),
    };

    match state.approval_service.list(query).await {
        Ok(requests) => {
            let response = shared::AllowanceListResponse {
                allowances: requests.into_iter().map(AllowanceMapper::to_dto).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to list allowance requests: {}", e);
            (workflow_error_status(&e), e.to_string()).into_response()
        }
    }
}

/// Get one allowance request together with its audit trail
pub async fn get_allowance(
    State(state): State<AppState>,
    Path(allowance_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/allowances/{}", allowance_id);

    let request = match state.approval_service.get(&allowance_id).await {
        Ok(request) => request,
        Err(e) => return (workflow_error_status(&e), e.to_string()).into_response(),
    };
    let trail = match state.audit_service.list_for(&allowance_id).await {
        Ok(trail) => trail,
        Err(e) => {
            error!("Failed to read audit trail for {}: {}", allowance_id, e);
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };

    let response = shared::AllowanceDetailResponse {
        allowance: AllowanceMapper::to_dto(request),
        audit_trail: trail.into_iter().map(AuditMapper::to_dto).collect(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Decide the review stage a request is waiting in
pub async fn decide_allowance(
    State(state): State<AppState>,
    Path(allowance_id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<shared::DecideAllowanceRequest>,
) -> impl IntoResponse {
    info!("POST /api/allowances/{}/decision - {}", allowance_id, request.decision);

    let actor = match actor_from_headers(&headers) {
        Ok(actor) => actor,
        Err(rejection) => return rejection.into_response(),
    };
    let decision = match AllowanceMapper::parse_decision(&request.decision) {
        Some(decision) => decision,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                format!("unrecognized decision '{}'", request.decision),
            )
                .into_response()
        }
    };

    let command = DecideAllowanceCommand {
        allowance_id,
        decision,
        comment: request.comment,
    };
    match state.approval_service.decide(command, &actor).await {
        Ok(result) => {
            let response = shared::DecideAllowanceResponse {
                allowance: AllowanceMapper::to_dto(result.request),
                success_message: result.success_message,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to record decision: {}", e);
            (workflow_error_status(&e), e.to_string()).into_response()
        }
    }
}

/// Mark an approved request as paid
pub async fn mark_paid(
    State(state): State<AppState>,
    Path(allowance_id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    info!("POST /api/allowances/{}/payment", allowance_id);

    let actor = match actor_from_headers(&headers) {
        Ok(actor) => actor,
        Err(rejection) => return rejection.into_response(),
    };

    let command = MarkPaidCommand { allowance_id };
    match state.approval_service.mark_paid(command, &actor).await {
        Ok(result) => {
            let response = shared::MarkPaidResponse {
                allowance: AllowanceMapper::to_dto(result.request),
                success_message: result.success_message,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to mark request as paid: {}", e);
            (workflow_error_status(&e), e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initialize_backend;
    use axum::http::HeaderValue;
    use tempfile::TempDir;

    fn create_test_app_state() -> (AppState, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let state = initialize_backend(temp_dir.path()).expect("Failed to initialize backend");
        (state, temp_dir)
    }

    fn identity_headers(role: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-actor-id", HeaderValue::from_static("staff-1"));
        headers.insert("x-actor-name", HeaderValue::from_static("Grace Achieng"));
        headers.insert("x-actor-role", HeaderValue::from_static(role));
        headers
    }

    fn submit_dto() -> shared::SubmitAllowanceRequest {
        shared::SubmitAllowanceRequest {
            student_id: Some("STU-1001".to_string()),
            chl_number: None,
            student_name: "Amina Yusuf".to_string(),
            month: "January".to_string(),
            year: 2025,
            program_level: "university".to_string(),
            stipend: 1500.0,
            medical: Some(200.0),
            transportation: Some(300.0),
            school_supplies: Some(500.0),
            accommodation: Some(1200.0),
        }
    }

    #[tokio::test]
    async fn test_submit_handler_creates_request() {
        let (state, _temp_dir) = create_test_app_state();

        let response = submit_allowance(
            State(state.clone()),
            identity_headers("user"),
            Json(submit_dto()),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::CREATED);

        let stored = state
            .approval_service
            .list(Default::default())
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].total, 3700.0);
    }

    #[tokio::test]
    async fn test_submit_handler_requires_identity_headers() {
        let (state, _temp_dir) = create_test_app_state();

        let response = submit_allowance(State(state), HeaderMap::new(), Json(submit_dto()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_submit_handler_rejects_unknown_category() {
        let (state, _temp_dir) = create_test_app_state();

        let mut dto = submit_dto();
        dto.program_level = "secondary".to_string();
        let response = submit_allowance(State(state), identity_headers("user"), Json(dto))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_decision_handler_enforces_roles() {
        let (state, _temp_dir) = create_test_app_state();

        submit_allowance(
            State(state.clone()),
            identity_headers("user"),
            Json(submit_dto()),
        )
        .await
        .into_response();
        let stored = state
            .approval_service
            .list(Default::default())
            .await
            .unwrap();
        let id = stored[0].id.clone();

        // A program officer cannot decide the dpm stage
        let response = decide_allowance(
            State(state.clone()),
            Path(id.clone()),
            identity_headers("program_officer"),
            Json(shared::DecideAllowanceRequest {
                decision: "approve".to_string(),
                comment: "looks fine".to_string(),
            }),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        // The deputy manager can
        let response = decide_allowance(
            State(state.clone()),
            Path(id.clone()),
            identity_headers("deputy_manager"),
            Json(shared::DecideAllowanceRequest {
                decision: "approve".to_string(),
                comment: "documents verified".to_string(),
            }),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        // Paying before approval completes is a state conflict
        let response = mark_paid(State(state), Path(id), identity_headers("admin"))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
