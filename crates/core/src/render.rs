//! Structured views built from catalogs, the selection and API results.
//!
//! Everything here is a pure function producing plain data. Front ends decide how a view looks;
//! they never re-derive tiers, fallbacks or empty states themselves.

use crate::catalog::{DiseaseCatalog, SymptomCatalog};
use crate::confidence::{confidence_text, rounded_percent, ConfidenceTier};
use crate::constants::{
    DISEASE_PLACEHOLDER, NO_DESCRIPTION_TEXT, NO_DIAGNOSIS_MESSAGE, NO_DIAGNOSIS_TITLE,
    NO_REQUIRED_SYMPTOMS_MESSAGE, NO_SOLUTIONS_MESSAGE, UNKNOWN_TEXT,
};
use crate::model::{BackwardResult, DiagnosisResult, Disease, Solution, Symptom};
use crate::selection::Selection;

/// One cell of the symptom grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymptomCard {
    pub code: String,
    pub description: String,
    pub selected: bool,
}

/// The selected-symptoms panel and the state of the diagnose action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionSummary {
    pub count: usize,
    /// Selected codes that resolve against the symptom catalog.
    pub codes: Vec<String>,
    pub diagnose_enabled: bool,
}

/// An entry of the disease selection control. The placeholder has an empty `value`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiseaseOption {
    pub value: String,
    pub label: String,
}

/// Disease metadata with fallbacks already applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiseaseInfo {
    pub code: String,
    pub name: String,
    pub latin_name: String,
    pub description: String,
    pub danger_level: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolutionItem {
    pub remedy: String,
    pub instructions: String,
}

/// A list of remedies, or the explicit message shown when there are none.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolutionsView {
    Listed(Vec<SolutionItem>),
    Empty(&'static str),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultCard {
    pub disease: DiseaseInfo,
    pub tier: ConfidenceTier,
    pub percent: i64,
    /// e.g. `85% Yakin`
    pub confidence_text: String,
    /// Matched symptoms as display text, in server order.
    pub matched_symptoms: Vec<String>,
    pub solutions: SolutionsView,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiagnosisView {
    /// Cards in the order the server ranked them.
    Matches(Vec<ResultCard>),
    NoMatch {
        title: &'static str,
        message: &'static str,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequiredSymptom {
    pub code: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequiredSymptomsView {
    Listed(Vec<RequiredSymptom>),
    Empty(&'static str),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackwardView {
    pub disease: DiseaseInfo,
    pub required_symptoms: RequiredSymptomsView,
    pub control_methods: SolutionsView,
}

pub fn symptom_grid<'a>(
    symptoms: impl IntoIterator<Item = &'a Symptom>,
    selection: &Selection,
) -> Vec<SymptomCard> {
    symptoms
        .into_iter()
        .map(|s| SymptomCard {
            code: s.code.to_string(),
            description: s.description.clone(),
            selected: selection.contains(s.code.as_str()),
        })
        .collect()
}

pub fn selection_summary(selection: &Selection, catalog: &SymptomCatalog) -> SelectionSummary {
    SelectionSummary {
        count: selection.len(),
        codes: selection
            .iter()
            .filter(|code| catalog.find(code.as_str()).is_some())
            .map(|code| code.to_string())
            .collect(),
        diagnose_enabled: !selection.is_empty(),
    }
}

pub fn disease_options(catalog: &DiseaseCatalog) -> Vec<DiseaseOption> {
    std::iter::once(DiseaseOption {
        value: String::new(),
        label: DISEASE_PLACEHOLDER.to_string(),
    })
    .chain(catalog.entries().iter().map(|d| DiseaseOption {
        value: d.code.to_string(),
        label: format!("{} - {}", d.code, d.name),
    }))
    .collect()
}

pub fn disease_info(disease: &Disease) -> DiseaseInfo {
    fn or_fallback(value: &Option<String>, fallback: &str) -> String {
        value
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }

    DiseaseInfo {
        code: disease.code.to_string(),
        name: disease.name.clone(),
        latin_name: or_fallback(&disease.latin_name, UNKNOWN_TEXT),
        description: or_fallback(&disease.description, NO_DESCRIPTION_TEXT),
        danger_level: or_fallback(&disease.danger_level, UNKNOWN_TEXT),
    }
}

pub fn solutions(solutions: &[Solution]) -> SolutionsView {
    if solutions.is_empty() {
        return SolutionsView::Empty(NO_SOLUTIONS_MESSAGE);
    }
    SolutionsView::Listed(
        solutions
            .iter()
            .map(|s| SolutionItem {
                remedy: s.remedy.clone(),
                instructions: s.instructions.clone(),
            })
            .collect(),
    )
}

pub fn result_card(result: &DiagnosisResult, catalog: &SymptomCatalog) -> ResultCard {
    ResultCard {
        disease: disease_info(&result.disease),
        tier: ConfidenceTier::classify(result.confidence),
        percent: rounded_percent(result.confidence),
        confidence_text: confidence_text(result.confidence),
        matched_symptoms: result
            .matched_symptoms
            .iter()
            .map(|code| catalog.describe(code).to_string())
            .collect(),
        solutions: solutions(&result.solutions),
    }
}

pub fn diagnosis(results: &[DiagnosisResult], catalog: &SymptomCatalog) -> DiagnosisView {
    if results.is_empty() {
        return DiagnosisView::NoMatch {
            title: NO_DIAGNOSIS_TITLE,
            message: NO_DIAGNOSIS_MESSAGE,
        };
    }
    DiagnosisView::Matches(results.iter().map(|r| result_card(r, catalog)).collect())
}

pub fn backward(result: &BackwardResult) -> BackwardView {
    let required_symptoms = if result.required_symptoms.is_empty() {
        RequiredSymptomsView::Empty(NO_REQUIRED_SYMPTOMS_MESSAGE)
    } else {
        RequiredSymptomsView::Listed(
            result
                .required_symptoms
                .iter()
                .map(|s| RequiredSymptom {
                    code: s.code.to_string(),
                    description: s.description.clone(),
                })
                .collect(),
        )
    };

    BackwardView {
        disease: disease_info(&result.disease),
        required_symptoms,
        control_methods: solutions(&result.control_methods),
    }
}
