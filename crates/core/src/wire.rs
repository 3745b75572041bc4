//! JSON envelopes of the expert-system API.
//!
//! Every response is an object carrying a `success` flag, an optional `error` message and the
//! payload keys of the endpoint. Decoding is a pure function of the HTTP status and the body
//! text so that transports stay thin and the rules below are testable without a network:
//!
//! - a body that is not a JSON object is malformed,
//! - a non-2xx status is a refusal, carrying the body's `error` if present,
//! - a missing or false `success` flag is a refusal,
//! - a payload that does not match the schema is malformed, naming the failing field path.

use crate::model::{BackwardResult, DiagnosisResult, Disease, Symptom};
use crate::{ExpertError, ExpertResult};
use pex_types::Code;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Body of `POST diagnose`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiagnoseRequest {
    pub symptoms: Vec<Code>,
}

/// Body of `POST backward`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackwardRequest {
    pub disease_code: Code,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SymptomsPayload {
    pub symptoms: Vec<Symptom>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiseasesPayload {
    pub diseases: Vec<Disease>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisPayload {
    pub results: Vec<DiagnosisResult>,
}

/// Response envelope as written by a server.
#[derive(Clone, Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(flatten)]
    pub payload: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(payload: T) -> Self {
        Self {
            success: true,
            payload: Some(payload),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            payload: None,
            error: Some(message.into()),
        }
    }
}

pub fn decode_symptoms(status: u16, body: &str) -> ExpertResult<Vec<Symptom>> {
    decode::<SymptomsPayload>(status, body).map(|p| p.symptoms)
}

pub fn decode_diseases(status: u16, body: &str) -> ExpertResult<Vec<Disease>> {
    decode::<DiseasesPayload>(status, body).map(|p| p.diseases)
}

pub fn decode_diagnosis(status: u16, body: &str) -> ExpertResult<Vec<DiagnosisResult>> {
    decode::<DiagnosisPayload>(status, body).map(|p| p.results)
}

pub fn decode_backward(status: u16, body: &str) -> ExpertResult<BackwardResult> {
    decode::<BackwardResult>(status, body)
}

/// Decode an envelope, returning its payload when the call succeeded.
pub fn decode<T: DeserializeOwned>(status: u16, body: &str) -> ExpertResult<T> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| ExpertError::Malformed(format!("HTTP {status}: {e}")))?;

    let object = value
        .as_object()
        .ok_or_else(|| ExpertError::Malformed("expected a JSON object".into()))?;

    let message = object
        .get("error")
        .and_then(|e| e.as_str())
        .map(str::to_string);

    if !(200..300).contains(&status) {
        return Err(ExpertError::Status { status, message });
    }

    let success = object
        .get("success")
        .and_then(|s| s.as_bool())
        .unwrap_or(false);
    if !success {
        return Err(ExpertError::Rejected { message });
    }

    serde_path_to_error::deserialize::<_, T>(value).map_err(|err| {
        let path = err.path().to_string();
        let source = err.into_inner();
        let path = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        ExpertError::Malformed(format!("schema mismatch at {path}: {source}"))
    })
}
