//! # PEX Core
//!
//! Client-side logic of the plant expert system.
//!
//! This crate contains everything that does not depend on a transport or a display:
//! - Domain records and the JSON envelope rules of the expert-system API
//! - Symptom/disease catalogs, the symptom selection and catalog filtering
//! - Confidence-tier classification and the structured views built from results
//! - `ExpertSession`, the explicit application state driven by user actions
//!
//! **No transport or display concerns**: HTTP lives in `pex-http`, terminal output in `pex-cli`.
//! The inference engine itself runs on the server and is not modelled here.

pub mod api;
pub mod catalog;
pub mod confidence;
pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod render;
pub mod selection;
pub mod session;
pub mod view;
pub mod wire;

pub use api::ExpertApi;
pub use config::{client_config_from_env_values, ClientConfig};
pub use confidence::ConfidenceTier;
pub use error::{ExpertError, ExpertResult, Operation};
pub use model::{BackwardResult, DiagnosisResult, Disease, Solution, Symptom};
pub use pex_types::Code;
pub use selection::{Selection, Toggled};
pub use session::ExpertSession;
pub use view::{Notice, Notifier, Severity, View};
