//! Interfaces a front end implements to display session state.
//!
//! The session calls these after every state change. Implementations only present what they
//! are given; a terminal, a web page or a test recorder are all valid views.

use crate::render::{
    BackwardView, DiagnosisView, DiseaseOption, SelectionSummary, SymptomCard,
};

pub trait View {
    fn show_symptom_grid(&mut self, cards: &[SymptomCard]);

    fn show_selection_summary(&mut self, summary: &SelectionSummary);

    fn show_disease_options(&mut self, options: &[DiseaseOption]);

    fn show_diagnosis(&mut self, diagnosis: &DiagnosisView);

    fn show_backward(&mut self, backward: &BackwardView);

    fn hide_backward(&mut self);

    /// Toggle the loading indicator that accompanies an in-flight request.
    fn set_loading(&mut self, loading: bool);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A message for the user. How it is shown (modal, toast, stderr line) is up to the notifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}
