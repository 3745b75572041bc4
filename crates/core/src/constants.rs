//! Constants used throughout the PEX core crate.
//!
//! Endpoint paths, configuration defaults and the fixed user-facing text shown by every front
//! end. The text matches what the deployed backend's users already see.

/// Default base URL of the expert-system API when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost/plant_expert_system/";

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Symptom catalog endpoint, relative to the base URL.
pub const SYMPTOMS_ENDPOINT: &str = "api/symptoms.php";

/// Disease catalog endpoint, relative to the base URL.
pub const DISEASES_ENDPOINT: &str = "api/diseases.php";

/// Forward diagnosis endpoint, relative to the base URL.
pub const DIAGNOSE_ENDPOINT: &str = "api/diagnose.php";

/// Backward chaining endpoint, relative to the base URL.
pub const BACKWARD_ENDPOINT: &str = "api/backward.php";

/// Query parameter carrying a remote symptom search keyword.
pub const SEARCH_PARAM: &str = "search";

pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 80.0;
pub const MEDIUM_CONFIDENCE_THRESHOLD: f64 = 60.0;

/// Suffix appended to the rounded confidence percentage.
pub const CONFIDENCE_SUFFIX: &str = "% Yakin";

pub const UNKNOWN_TEXT: &str = "Tidak diketahui";
pub const NO_DESCRIPTION_TEXT: &str = "Tidak ada deskripsi";

pub const DISEASE_PLACEHOLDER: &str = "-- Pilih Hama --";

pub const NO_DIAGNOSIS_TITLE: &str = "Tidak Ada Diagnosa Ditemukan";
pub const NO_DIAGNOSIS_MESSAGE: &str = "Kombinasi gejala yang dipilih tidak cocok dengan penyakit yang ada dalam database. Silakan periksa kembali gejala atau konsultasi dengan ahli.";
pub const NO_SOLUTIONS_MESSAGE: &str = "Tidak ada solusi tersedia untuk penyakit ini.";
pub const NO_REQUIRED_SYMPTOMS_MESSAGE: &str = "Tidak ada gejala spesifik yang diperlukan.";

pub const NO_LOOKUP_MATCH_MESSAGE: &str = "Tidak ada gejala ditemukan!";
