//! Terminal implementations of the session's view and notifier.
//!
//! The view keeps the latest text of each visible panel and prints them on `flush`, so a command
//! that redraws the grid several times prints it once.

use pex_core::render::{
    BackwardView, DiagnosisView, DiseaseOption, RequiredSymptomsView, SelectionSummary,
    SolutionsView, SymptomCard,
};
use pex_core::{Notice, Notifier, Severity, View};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::io::Write;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Panel {
    Grid,
    Summary,
    Options,
    Diagnosis,
    Backward,
}

impl Panel {
    pub const ALL: [Panel; 5] = [
        Panel::Grid,
        Panel::Summary,
        Panel::Options,
        Panel::Diagnosis,
        Panel::Backward,
    ];
}

pub struct TerminalView<W: Write> {
    out: W,
    visible: BTreeSet<Panel>,
    pending: BTreeMap<Panel, String>,
    show_progress: bool,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, visible: impl IntoIterator<Item = Panel>) -> Self {
        Self {
            out,
            visible: visible.into_iter().collect(),
            pending: BTreeMap::new(),
            show_progress: false,
        }
    }

    /// Print a progress line whenever a request starts.
    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }

    /// Write every panel that changed since the last flush.
    pub fn flush(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        for text in pending.into_values() {
            self.emit(&text);
        }
        if let Err(e) = self.out.flush() {
            tracing::warn!("failed to flush terminal output: {}", e);
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn stage(&mut self, panel: Panel, text: String) {
        if self.visible.contains(&panel) {
            self.pending.insert(panel, text);
        }
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            tracing::warn!("failed to write terminal output: {}", e);
        }
    }
}

impl<W: Write> View for TerminalView<W> {
    fn show_symptom_grid(&mut self, cards: &[SymptomCard]) {
        self.stage(Panel::Grid, format_grid(cards));
    }

    fn show_selection_summary(&mut self, summary: &SelectionSummary) {
        self.stage(Panel::Summary, format_summary(summary));
    }

    fn show_disease_options(&mut self, options: &[DiseaseOption]) {
        self.stage(Panel::Options, format_options(options));
    }

    fn show_diagnosis(&mut self, diagnosis: &DiagnosisView) {
        self.stage(Panel::Diagnosis, format_diagnosis(diagnosis));
    }

    fn show_backward(&mut self, backward: &BackwardView) {
        self.stage(Panel::Backward, format_backward(backward));
    }

    fn hide_backward(&mut self) {
        self.pending.remove(&Panel::Backward);
    }

    fn set_loading(&mut self, loading: bool) {
        if loading && self.show_progress {
            self.emit("Memproses...");
        }
    }
}

/// Writes notices to stderr, one line each.
#[derive(Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&mut self, notice: Notice) {
        eprintln!("{}", format_notice(&notice));
    }
}

pub fn format_notice(notice: &Notice) -> String {
    let tag = match notice.severity {
        Severity::Info => "info",
        Severity::Warning => "peringatan",
        Severity::Error => "galat",
    };
    format!("[{tag}] {}", notice.message)
}

pub fn format_grid(cards: &[SymptomCard]) -> String {
    if cards.is_empty() {
        return "(tidak ada gejala)".to_string();
    }
    let mut text = String::new();
    for (i, card) in cards.iter().enumerate() {
        if i > 0 {
            text.push('\n');
        }
        let mark = if card.selected { 'x' } else { ' ' };
        let _ = write!(text, "[{mark}] {:<5} {}", card.code, card.description);
    }
    text
}

pub fn format_summary(summary: &SelectionSummary) -> String {
    let codes = if summary.codes.is_empty() {
        "-".to_string()
    } else {
        summary.codes.join(", ")
    };
    let action = if summary.diagnose_enabled {
        "siap"
    } else {
        "nonaktif"
    };
    format!(
        "Gejala terpilih ({}): {}\nDiagnosa: {}",
        summary.count, codes, action
    )
}

pub fn format_options(options: &[DiseaseOption]) -> String {
    options
        .iter()
        .map(|o| o.label.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_solutions(text: &mut String, solutions: &SolutionsView) {
    match solutions {
        SolutionsView::Listed(items) => {
            for item in items {
                let _ = write!(text, "\n    - {}: {}", item.remedy, item.instructions);
            }
        }
        SolutionsView::Empty(message) => {
            let _ = write!(text, "\n    {message}");
        }
    }
}

pub fn format_diagnosis(diagnosis: &DiagnosisView) -> String {
    let cards = match diagnosis {
        DiagnosisView::NoMatch { title, message } => return format!("{title}\n{message}"),
        DiagnosisView::Matches(cards) => cards,
    };

    let mut text = String::new();
    for (i, card) in cards.iter().enumerate() {
        if i > 0 {
            text.push_str("\n\n");
        }
        let _ = write!(
            text,
            "== {} [{} | {}]\n  Penyebab: {}\n  Nama Latin: {}\n  Tingkat Bahaya: {}\n  Gejala yang Cocok: {}\n  Solusi Pengobatan:",
            card.disease.name,
            card.confidence_text,
            card.tier,
            card.disease.description,
            card.disease.latin_name,
            card.disease.danger_level,
            card.matched_symptoms.join(", "),
        );
        format_solutions(&mut text, &card.solutions);
    }
    text
}

pub fn format_backward(backward: &BackwardView) -> String {
    let disease = &backward.disease;
    let mut text = format!(
        "== {} ({})\n  Nama Latin: {}\n  Deskripsi: {}\n  Tingkat Bahaya: {}\n  Gejala yang Diperlukan:",
        disease.name, disease.code, disease.latin_name, disease.description, disease.danger_level
    );
    match &backward.required_symptoms {
        RequiredSymptomsView::Listed(symptoms) => {
            for s in symptoms {
                let _ = write!(text, "\n    {:<5} {}", s.code, s.description);
            }
        }
        RequiredSymptomsView::Empty(message) => {
            let _ = write!(text, "\n    {message}");
        }
    }
    text.push_str("\n  Metode Pengendalian:");
    format_solutions(&mut text, &backward.control_methods);
    text
}
