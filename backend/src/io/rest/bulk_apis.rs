//! # REST API for Bulk Allowance Import
//!
//! Accepts a CSV document of candidate requests, runs it through the bulk
//! ingestion pipeline, and serves the reference import template.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::{error, info};

use crate::io::rest::mappers::bulk_mapper::BulkMapper;
use crate::io::rest::actor_from_headers;
use crate::io::tabular;
use crate::AppState;

/// Create a router for bulk import APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/import", post(import_allowances))
        .route("/import/template", get(download_template))
}

/// Ingest a CSV document of candidate allowance requests.
///
/// Always answers 200 with a per-row breakdown when the document itself is
/// readable; only an unreadable document is rejected outright.
pub async fn import_allowances(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    info!("POST /api/allowances/bulk/import ({} bytes)", body.len());

    let actor = match actor_from_headers(&headers) {
        Ok(actor) => actor,
        Err(rejection) => return rejection.into_response(),
    };

    let rows = match tabular::read_rows(body.as_bytes()) {
        Ok(rows) => rows,
        Err(e) => {
            error!("Rejecting unreadable bulk file: {:#}", e);
            return (StatusCode::BAD_REQUEST, format!("unreadable bulk file: {:#}", e))
                .into_response();
        }
    };

    let result = state.bulk_import_service.ingest(rows, &actor).await;
    (StatusCode::OK, Json(BulkMapper::to_dto(result))).into_response()
}

/// Download the reference bulk import template
pub async fn download_template() -> impl IntoResponse {
    info!("GET /api/allowances/bulk/import/template");

    match tabular::template_csv() {
        Ok(document) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv")],
            document,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to produce bulk template: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
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

    fn identity_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-actor-id", HeaderValue::from_static("staff-1"));
        headers.insert("x-actor-name", HeaderValue::from_static("Grace Achieng"));
        headers.insert("x-actor-role", HeaderValue::from_static("user"));
        headers
    }

    #[tokio::test]
    async fn test_import_handler_reports_per_row_outcome() {
        let (state, _temp_dir) = create_test_app_state();

        let body = "\
student_id,student_name,month,year,stipend\n\
STU-1,Amina Yusuf,January,2025,1500\n\
STU-2,Daniel Okello,January,,1000\n"
            .to_string();

        let response = import_allowances(State(state.clone()), identity_headers(), body)
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let stored = state
            .approval_service
            .list(Default::default())
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].student_name, "Amina Yusuf");
    }

    #[tokio::test]
    async fn test_import_handler_rejects_unreadable_document() {
        let (state, _temp_dir) = create_test_app_state();

        let body = "student_id,year\nSTU-1,2025,extra\n".to_string();
        let response = import_allowances(State(state), identity_headers(), body)
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_template_handler_serves_csv() {
        let response = download_template().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/csv"
        );
    }
}
