use std::io::Cursor;
use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use cardflow::error::AppError;
use cardflow::workflows::intake::ApplicationCsvImporter;
use cardflow::workflows::screening::{
    screening_router, ApplicationRepository, CardApplicationDecision, CardApplicationService,
    DecisionNotifier, FrequentFlyerValidator, ScreeningEngine,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::infra::{AppState, EnvLicenseValidator};

#[derive(Debug, Deserialize)]
pub(crate) struct BatchScreeningRequest {
    /// CSV export with `Age`, `Gross Annual Income`, `Frequent Flyer Number` columns.
    pub(crate) csv: String,
    /// Obtain validity through the validator's out-parameter channel.
    #[serde(default)]
    pub(crate) use_out_channel: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchScreeningResponse {
    pub(crate) total: usize,
    pub(crate) auto_accepted: usize,
    pub(crate) auto_declined: usize,
    pub(crate) referred_to_human: usize,
    pub(crate) decisions: Vec<BatchDecisionEntry>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchDecisionEntry {
    pub(crate) row: usize,
    pub(crate) decision: &'static str,
}

pub(crate) fn with_screening_routes<R, N, V>(
    service: Arc<CardApplicationService<R, N, V>>,
) -> axum::Router
where
    R: ApplicationRepository + 'static,
    N: DecisionNotifier + 'static,
    V: FrequentFlyerValidator + 'static,
{
    screening_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/cards/screenings",
            axum::routing::post(batch_screening_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Screen a whole CSV export in one request without persisting records.
pub(crate) async fn batch_screening_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<BatchScreeningRequest>,
) -> Result<Json<BatchScreeningResponse>, AppError> {
    let applications =
        ApplicationCsvImporter::from_reader(Cursor::new(payload.csv.into_bytes()))?;

    let validator = Arc::new(EnvLicenseValidator::from_env());
    let engine = ScreeningEngine::new(validator, state.screening.clone());

    let mut auto_accepted = 0;
    let mut auto_declined = 0;
    let mut referred_to_human = 0;
    let mut decisions = Vec::with_capacity(applications.len());

    for (index, application) in applications.iter().enumerate() {
        let decision = if payload.use_out_channel {
            engine.evaluate_using_out(application)
        } else {
            engine.evaluate(application)
        };

        match decision {
            CardApplicationDecision::AutoAccepted => auto_accepted += 1,
            CardApplicationDecision::AutoDeclined => auto_declined += 1,
            CardApplicationDecision::ReferredToHuman => referred_to_human += 1,
        }

        decisions.push(BatchDecisionEntry {
            row: index + 1,
            decision: decision.label(),
        });
    }

    Ok(Json(BatchScreeningResponse {
        total: decisions.len(),
        auto_accepted,
        auto_declined,
        referred_to_human,
        decisions,
    }))
}
