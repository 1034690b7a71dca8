use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{ApplicationId, CardApplicationStatus, CreditCardApplication};
use super::repository::{ApplicationRepository, DecisionNotifier, RepositoryError};
use super::service::{CardApplicationService, CardServiceError};
use super::validator::FrequentFlyerValidator;

/// Router builder exposing HTTP endpoints for intake and screening.
pub fn screening_router<R, N, V>(service: Arc<CardApplicationService<R, N, V>>) -> Router
where
    R: ApplicationRepository + 'static,
    N: DecisionNotifier + 'static,
    V: FrequentFlyerValidator + 'static,
{
    Router::new()
        .route("/api/v1/cards/applications", post(submit_handler::<R, N, V>))
        .route(
            "/api/v1/cards/applications/:application_id",
            get(status_handler::<R, N, V>),
        )
        .route(
            "/api/v1/cards/applications/:application_id/evaluation",
            post(evaluate_handler::<R, N, V>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R, N, V>(
    State(service): State<Arc<CardApplicationService<R, N, V>>>,
    axum::Json(application): axum::Json<CreditCardApplication>,
) -> Response
where
    R: ApplicationRepository + 'static,
    N: DecisionNotifier + 'static,
    V: FrequentFlyerValidator + 'static,
{
    match service.submit(application) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(CardServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "application already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn evaluate_handler<R, N, V>(
    State(service): State<Arc<CardApplicationService<R, N, V>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
    N: DecisionNotifier + 'static,
    V: FrequentFlyerValidator + 'static,
{
    let id = ApplicationId(application_id);
    match service.evaluate(&id) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(CardServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "application not found",
                "application_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn status_handler<R, N, V>(
    State(service): State<Arc<CardApplicationService<R, N, V>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
    N: DecisionNotifier + 'static,
    V: FrequentFlyerValidator + 'static,
{
    let id = ApplicationId(application_id);
    match service.get(&id) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(CardServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "application_id": id.0,
                "status": CardApplicationStatus::Submitted.label(),
                "decision_rationale": "pending screening",
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
