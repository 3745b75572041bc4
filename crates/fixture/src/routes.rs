//! HTTP routes mirroring the production expert-system API.

use crate::Fixture;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use pex_core::constants::{
    BACKWARD_ENDPOINT, DIAGNOSE_ENDPOINT, DISEASES_ENDPOINT, SYMPTOMS_ENDPOINT,
};
use pex_core::wire::{
    BackwardRequest, DiagnoseRequest, DiagnosisPayload, DiseasesPayload, Envelope,
    SymptomsPayload,
};
use pex_core::BackwardResult;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::sync::Arc;

type ApiResponse<T> = (StatusCode, Json<Envelope<T>>);

#[derive(Deserialize)]
struct SearchParams {
    search: Option<String>,
}

/// Build the fixture router. Paths match the production endpoints, rooted at `/`.
pub fn router(fixture: Arc<Fixture>) -> Router {
    Router::new()
        .route(&format!("/{SYMPTOMS_ENDPOINT}"), get(symptoms))
        .route(&format!("/{DISEASES_ENDPOINT}"), get(diseases))
        .route(&format!("/{DIAGNOSE_ENDPOINT}"), post(diagnose))
        .route(&format!("/{BACKWARD_ENDPOINT}"), post(backward))
        .with_state(fixture)
}

fn ok<T>(payload: T) -> ApiResponse<T> {
    (StatusCode::OK, Json(Envelope::ok(payload)))
}

fn failure<T>(status: StatusCode, message: impl Into<String>) -> ApiResponse<T> {
    (status, Json(Envelope::failure(message)))
}

async fn symptoms(
    State(fixture): State<Arc<Fixture>>,
    Query(params): Query<SearchParams>,
) -> ApiResponse<SymptomsPayload> {
    let query = params.search.unwrap_or_default();
    let symptoms: Vec<_> = fixture
        .symptoms()
        .filter(query.trim())
        .into_iter()
        .cloned()
        .collect();
    tracing::debug!("serving {} symptoms for query '{}'", symptoms.len(), query);
    ok(SymptomsPayload { symptoms })
}

async fn diseases(State(fixture): State<Arc<Fixture>>) -> ApiResponse<DiseasesPayload> {
    ok(DiseasesPayload {
        diseases: fixture.diseases().entries().to_vec(),
    })
}

async fn diagnose(
    State(fixture): State<Arc<Fixture>>,
    payload: Result<Json<DiagnoseRequest>, JsonRejection>,
) -> ApiResponse<DiagnosisPayload> {
    let Json(req) = match payload {
        Ok(req) => req,
        Err(rejection) => {
            tracing::warn!("rejected diagnose body: {}", rejection.body_text());
            return failure(rejection.status(), rejection.body_text());
        }
    };
    if req.symptoms.is_empty() {
        return failure(StatusCode::BAD_REQUEST, "Tidak ada gejala yang dipilih");
    }

    let set: BTreeSet<_> = req.symptoms.into_iter().collect();
    let results = fixture.diagnose(&set);
    tracing::info!("diagnose {} symptoms -> {} results", set.len(), results.len());
    ok(DiagnosisPayload { results })
}

async fn backward(
    State(fixture): State<Arc<Fixture>>,
    payload: Result<Json<BackwardRequest>, JsonRejection>,
) -> ApiResponse<BackwardResult> {
    let Json(req) = match payload {
        Ok(req) => req,
        Err(rejection) => {
            tracing::warn!("rejected backward body: {}", rejection.body_text());
            return failure(rejection.status(), rejection.body_text());
        }
    };

    match fixture.backward(req.disease_code.as_str()) {
        Some(result) => ok(result.clone()),
        None => failure(
            StatusCode::NOT_FOUND,
            format!("Hama dengan kode {} tidak ditemukan", req.disease_code),
        ),
    }
}
