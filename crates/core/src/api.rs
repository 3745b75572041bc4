//! Boundary to the expert-system API.
//!
//! The session depends only on this trait. `pex-http` implements it over HTTP; tests implement
//! it in memory.

use crate::model::{BackwardResult, DiagnosisResult, Disease, Symptom};
use crate::ExpertResult;
use async_trait::async_trait;
use pex_types::Code;

#[async_trait]
pub trait ExpertApi: Send + Sync {
    /// Fetch the symptom catalog, optionally narrowed server-side by `search`.
    async fn symptoms(&self, search: Option<&str>) -> ExpertResult<Vec<Symptom>>;

    async fn diseases(&self) -> ExpertResult<Vec<Disease>>;

    /// Forward diagnosis. Results come back ranked by the server.
    async fn diagnose(&self, symptoms: &[Code]) -> ExpertResult<Vec<DiagnosisResult>>;

    /// Backward chaining for a single disease.
    async fn backward(&self, disease: &Code) -> ExpertResult<BackwardResult>;
}
