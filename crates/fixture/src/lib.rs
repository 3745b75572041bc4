//! # PEX Fixture
//!
//! A stand-in for the expert-system API, serving catalogs and canned answers from a YAML file.
//!
//! It answers the same four endpoints as the production backend so the client can be run and
//! tested without it. It performs no inference: diagnoses are replayed for an exact symptom set
//! and backward results are looked up by disease code.

mod fixture;
mod routes;

pub use fixture::Fixture;
pub use routes::router;

/// Errors raised while loading a fixture file.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("failed to read fixture {path}: {source}", path = path.display())]
    Read {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("{0}")]
    Schema(String),

    #[error("fixture refers to unknown {kind} code '{code}'")]
    UnknownCode { kind: &'static str, code: String },
}
