//! Domain records exchanged with the expert-system API.
//!
//! Field names follow the backend's wire keys (`kd_gejala`, `nama_penyakit`, ...) through serde
//! renames; the Rust names describe what the field holds.

use pex_types::Code;
use serde::{Deserialize, Deserializer, Serialize};

/// An observable plant condition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Symptom {
    #[serde(rename = "kd_gejala")]
    pub code: Code,
    #[serde(rename = "gejala")]
    pub description: String,
}

/// A diagnosable condition with its descriptive metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Disease {
    #[serde(rename = "kode")]
    pub code: Code,
    #[serde(rename = "nama_penyakit")]
    pub name: String,
    #[serde(rename = "nama_latin", default, skip_serializing_if = "Option::is_none")]
    pub latin_name: Option<String>,
    #[serde(rename = "deskripsi", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "tingkat_bahaya", default, skip_serializing_if = "Option::is_none")]
    pub danger_level: Option<String>,
}

/// A remedy and how to apply it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    #[serde(rename = "nama_obat")]
    pub remedy: String,
    #[serde(rename = "solusi")]
    pub instructions: String,
}

/// One ranked candidate from a forward diagnosis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub disease: Disease,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub confidence: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub matched_symptoms: Vec<Code>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub solutions: Vec<Solution>,
}

/// What a disease requires and how to control it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackwardResult {
    #[serde(rename = "pest")]
    pub disease: Disease,
    #[serde(default, deserialize_with = "null_as_default")]
    pub required_symptoms: Vec<Symptom>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub control_methods: Vec<Solution>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// PHP backends commonly emit computed numbers as strings.
fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse::<f64>().map_err(|_| {
            serde::de::Error::custom(format!("confidence is not a number: '{s}'"))
        }),
    }
}
