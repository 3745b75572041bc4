//! # PEX HTTP
//!
//! `ExpertApi` over HTTP with reqwest.
//!
//! This crate only moves bytes: it builds requests, reads the status and body text, and hands
//! both to `pex_core::wire` which decides success, refusal or malformation.

use async_trait::async_trait;
use pex_core::constants::{
    BACKWARD_ENDPOINT, DIAGNOSE_ENDPOINT, DISEASES_ENDPOINT, SEARCH_PARAM, SYMPTOMS_ENDPOINT,
};
use pex_core::wire::{self, BackwardRequest, DiagnoseRequest};
use pex_core::{
    BackwardResult, ClientConfig, Code, DiagnosisResult, Disease, ExpertApi, ExpertError,
    ExpertResult, Symptom,
};
use reqwest::{Client, RequestBuilder, Url};

/// Expert-system API client for a backend rooted at a base URL.
#[derive(Clone, Debug)]
pub struct HttpExpertApi {
    client: Client,
    base_url: Url,
}

impl HttpExpertApi {
    pub fn new(cfg: &ClientConfig) -> ExpertResult<Self> {
        let base_url = Url::parse(cfg.base_url())
            .map_err(|e| ExpertError::InvalidInput(format!("invalid api url: {e}")))?;
        let client = Client::builder()
            .timeout(cfg.timeout())
            .build()
            .map_err(|e| ExpertError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> ExpertResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ExpertError::InvalidInput(format!("invalid endpoint {path}: {e}")))
    }

    /// Send a request and return the status code and body text.
    async fn exchange(&self, request: RequestBuilder) -> ExpertResult<(u16, String)> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ExpertError::Transport(e.to_string()))?;

        let status = response.status();
        let url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|e| ExpertError::Transport(e.to_string()))?;

        if status.is_success() {
            tracing::debug!("{} -> {}", url, status);
        } else {
            tracing::warn!("{} -> {}", url, status);
        }
        Ok((status.as_u16(), body))
    }
}

#[async_trait]
impl ExpertApi for HttpExpertApi {
    async fn symptoms(&self, search: Option<&str>) -> ExpertResult<Vec<Symptom>> {
        let mut request = self.client.get(self.endpoint(SYMPTOMS_ENDPOINT)?);
        if let Some(keyword) = search {
            request = request.query(&[(SEARCH_PARAM, keyword)]);
        }
        let (status, body) = self.exchange(request).await?;
        wire::decode_symptoms(status, &body)
    }

    async fn diseases(&self) -> ExpertResult<Vec<Disease>> {
        let request = self.client.get(self.endpoint(DISEASES_ENDPOINT)?);
        let (status, body) = self.exchange(request).await?;
        wire::decode_diseases(status, &body)
    }

    async fn diagnose(&self, symptoms: &[Code]) -> ExpertResult<Vec<DiagnosisResult>> {
        let body = DiagnoseRequest {
            symptoms: symptoms.to_vec(),
        };
        let request = self.client.post(self.endpoint(DIAGNOSE_ENDPOINT)?).json(&body);
        let (status, body) = self.exchange(request).await?;
        wire::decode_diagnosis(status, &body)
    }

    async fn backward(&self, disease: &Code) -> ExpertResult<BackwardResult> {
        let body = BackwardRequest {
            disease_code: disease.clone(),
        };
        let request = self.client.post(self.endpoint(BACKWARD_ENDPOINT)?).json(&body);
        let (status, body) = self.exchange(request).await?;
        wire::decode_backward(status, &body)
    }
}
