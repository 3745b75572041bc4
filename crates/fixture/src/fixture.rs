//! Fixture files: the catalogs and canned answers a fixture server replays.
//!
//! ```yaml
//! symptoms:
//!   - { kd_gejala: G01, gejala: Daun menguning }
//! diseases:
//!   - { kode: P01, nama_penyakit: Wereng Coklat }
//! diagnoses:
//!   - symptoms: [G01]
//!     results:
//!       - disease: { kode: P01, nama_penyakit: Wereng Coklat }
//!         confidence: 85
//!         matched_symptoms: [G01]
//! backward:
//!   - disease: P01
//!     required_symptoms: [G01]
//!     control_methods:
//!       - { nama_obat: Imidakloprid, solusi: Semprot pangkal batang }
//! ```

use crate::FixtureError;
use pex_core::catalog::{DiseaseCatalog, SymptomCatalog};
use pex_core::{BackwardResult, Code, DiagnosisResult, Disease, Solution, Symptom};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct FixtureFile {
    symptoms: Vec<Symptom>,
    diseases: Vec<Disease>,
    #[serde(default)]
    diagnoses: Vec<CannedDiagnosisFile>,
    #[serde(default)]
    backward: Vec<CannedBackwardFile>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CannedDiagnosisFile {
    symptoms: BTreeSet<Code>,
    results: Vec<DiagnosisResult>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CannedBackwardFile {
    disease: Code,
    #[serde(default)]
    required_symptoms: Vec<Code>,
    #[serde(default)]
    control_methods: Vec<Solution>,
}

/// A validated fixture, ready to serve.
#[derive(Debug)]
pub struct Fixture {
    symptoms: SymptomCatalog,
    diseases: DiseaseCatalog,
    diagnoses: Vec<(BTreeSet<Code>, Vec<DiagnosisResult>)>,
    backward: HashMap<Code, BackwardResult>,
}

impl Fixture {
    /// Read and validate a fixture file.
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let text = std::fs::read_to_string(path).map_err(|source| FixtureError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Parse and validate fixture YAML.
    ///
    /// Every code a canned answer refers to must exist in the fixture's own catalogs.
    pub fn from_yaml_str(yaml_text: &str) -> Result<Self, FixtureError> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);
        let file: FixtureFile = serde_path_to_error::deserialize(deserializer).map_err(|err| {
            let path = err.path().to_string();
            let source = err.into_inner();
            FixtureError::Schema(format!("fixture schema mismatch at {path}: {source}"))
        })?;

        let symptoms = SymptomCatalog::new(file.symptoms);
        let diseases = DiseaseCatalog::new(file.diseases);

        let mut diagnoses = Vec::with_capacity(file.diagnoses.len());
        for canned in file.diagnoses {
            for code in &canned.symptoms {
                require(symptoms.find(code.as_str()), "symptom", code)?;
            }
            for result in &canned.results {
                require(diseases.find(result.disease.code.as_str()), "disease", &result.disease.code)?;
            }
            diagnoses.push((canned.symptoms, canned.results));
        }

        let mut backward = HashMap::with_capacity(file.backward.len());
        for canned in file.backward {
            let disease = require(diseases.find(canned.disease.as_str()), "disease", &canned.disease)?;
            let required_symptoms = canned
                .required_symptoms
                .iter()
                .map(|code| require(symptoms.find(code.as_str()), "symptom", code).cloned())
                .collect::<Result<Vec<_>, _>>()?;
            let result = BackwardResult {
                disease: disease.clone(),
                required_symptoms,
                control_methods: canned.control_methods,
            };
            backward.insert(canned.disease, result);
        }

        Ok(Self {
            symptoms,
            diseases,
            diagnoses,
            backward,
        })
    }

    pub fn symptoms(&self) -> &SymptomCatalog {
        &self.symptoms
    }

    pub fn diseases(&self) -> &DiseaseCatalog {
        &self.diseases
    }

    /// The canned results for exactly this symptom set; no entry means no match.
    pub fn diagnose(&self, symptoms: &BTreeSet<Code>) -> Vec<DiagnosisResult> {
        self.diagnoses
            .iter()
            .find(|(set, _)| set == symptoms)
            .map(|(_, results)| results.clone())
            .unwrap_or_default()
    }

    pub fn backward(&self, disease: &str) -> Option<&BackwardResult> {
        self.backward.get(disease)
    }
}

fn require<'a, T>(entry: Option<&'a T>, kind: &'static str, code: &Code) -> Result<&'a T, FixtureError> {
    entry.ok_or_else(|| FixtureError::UnknownCode {
        kind,
        code: code.to_string(),
    })
}
