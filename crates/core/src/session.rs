//! The application session: catalogs, selection and the user actions that change them.
//!
//! One `ExpertSession` is constructed per front end and passed around explicitly. Every action
//! updates the view it owns and reports failures through its notifier; the returned `Result`
//! lets callers (for example a CLI deciding its exit status) react as well.

use crate::api::ExpertApi;
use crate::catalog::{DiseaseCatalog, SymptomCatalog};
use crate::constants::NO_LOOKUP_MATCH_MESSAGE;
use crate::error::Operation;
use crate::model::Symptom;
use crate::render::{self, BackwardView, DiagnosisView, SelectionSummary};
use crate::selection::{Selection, Toggled};
use crate::view::{Notice, Notifier, View};
use crate::{ExpertError, ExpertResult};
use pex_types::Code;

pub struct ExpertSession<A, V, N> {
    api: A,
    view: V,
    notifier: N,
    symptoms: SymptomCatalog,
    diseases: DiseaseCatalog,
    selection: Selection,
    filter: String,
    busy: bool,
}

impl<A, V, N> ExpertSession<A, V, N>
where
    A: ExpertApi,
    V: View,
    N: Notifier,
{
    pub fn new(api: A, view: V, notifier: N) -> Self {
        Self {
            api,
            view,
            notifier,
            symptoms: SymptomCatalog::default(),
            diseases: DiseaseCatalog::default(),
            selection: Selection::new(),
            filter: String::new(),
            busy: false,
        }
    }

    /// Load both catalogs and draw the initial grid and summary.
    ///
    /// Both loads are attempted even if the first fails; the first error is returned.
    pub async fn init(&mut self) -> ExpertResult<()> {
        let symptoms = self.load_symptoms().await;
        let diseases = self.load_diseases().await;
        self.render_grid();
        self.render_summary();
        symptoms.and(diseases)
    }

    /// Replace the symptom catalog. On failure the previous catalog is kept.
    pub async fn load_symptoms(&mut self) -> ExpertResult<()> {
        match self.api.symptoms(None).await {
            Ok(symptoms) => {
                tracing::info!("loaded {} symptoms", symptoms.len());
                self.symptoms.replace(symptoms);
                self.render_grid();
                Ok(())
            }
            Err(e) => Err(self.fail(Operation::LoadSymptoms, e)),
        }
    }

    /// Replace the disease catalog and repopulate the disease options.
    pub async fn load_diseases(&mut self) -> ExpertResult<()> {
        match self.api.diseases().await {
            Ok(diseases) => {
                tracing::info!("loaded {} diseases", diseases.len());
                self.diseases.replace(diseases);
                let options = render::disease_options(&self.diseases);
                self.view.show_disease_options(&options);
                Ok(())
            }
            Err(e) => Err(self.fail(Operation::LoadDiseases, e)),
        }
    }

    /// Narrow the symptom grid to entries matching `query`. The catalog itself is untouched.
    pub fn filter_symptoms(&mut self, query: &str) {
        self.filter = query.to_string();
        self.render_grid();
    }

    pub fn toggle_symptom(&mut self, code: Code) -> Toggled {
        let toggled = self.selection.toggle(code);
        self.render_summary();
        self.render_grid();
        toggled
    }

    /// Submit the current selection for forward diagnosis.
    ///
    /// An empty selection performs no request.
    pub async fn diagnose(&mut self) -> ExpertResult<DiagnosisView> {
        if self.selection.is_empty() {
            return Err(ExpertError::EmptySelection);
        }

        let codes = self.selection.current();
        tracing::debug!("diagnosing {} symptoms", codes.len());

        let summary = self.idle_summary();
        let outcome = {
            let _in_flight = InFlight::start(&mut self.busy, &mut self.view, summary);
            self.api.diagnose(&codes).await
        };

        match outcome {
            Ok(results) => {
                let diagnosis = render::diagnosis(&results, &self.symptoms);
                self.view.show_diagnosis(&diagnosis);
                Ok(diagnosis)
            }
            Err(e) => Err(self.fail(Operation::Diagnose, e)),
        }
    }

    /// React to a change of the disease selection control.
    ///
    /// An empty value hides the backward panel and returns `Ok(None)` without a request.
    pub async fn select_disease(&mut self, value: &str) -> ExpertResult<Option<BackwardView>> {
        if value.trim().is_empty() {
            self.view.hide_backward();
            return Ok(None);
        }
        let code = Code::new(value).map_err(|e| ExpertError::InvalidInput(e.to_string()))?;
        tracing::debug!("backward chaining for {}", code);

        let summary = self.idle_summary();
        let outcome = {
            let _in_flight = InFlight::start(&mut self.busy, &mut self.view, summary);
            self.api.backward(&code).await
        };

        match outcome {
            Ok(result) => {
                let backward = render::backward(&result);
                self.view.show_backward(&backward);
                Ok(Some(backward))
            }
            Err(e) => Err(self.fail(Operation::Backward, e)),
        }
    }

    /// Ask the server which symptoms match `keyword` and report how many were found.
    ///
    /// The session catalog is not changed. A blank keyword does nothing.
    pub async fn lookup_symptoms(&mut self, keyword: &str) -> ExpertResult<Vec<Symptom>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(Vec::new());
        }

        match self.api.symptoms(Some(keyword)).await {
            Ok(found) => {
                self.notifier.notify(Notice::info(format!(
                    "Ditemukan {} gejala yang cocok dengan \"{}\"",
                    found.len(),
                    keyword
                )));
                Ok(found)
            }
            Err(e) => {
                tracing::warn!("symptom lookup for '{}' failed: {}", keyword, e);
                self.notifier.notify(Notice::warning(NO_LOOKUP_MATCH_MESSAGE));
                Err(e)
            }
        }
    }

    pub fn symptoms(&self) -> &SymptomCatalog {
        &self.symptoms
    }

    pub fn diseases(&self) -> &DiseaseCatalog {
        &self.diseases
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    fn render_grid(&mut self) {
        let cards = render::symptom_grid(self.symptoms.filter(&self.filter), &self.selection);
        self.view.show_symptom_grid(&cards);
    }

    fn render_summary(&mut self) {
        let mut summary = self.idle_summary();
        summary.diagnose_enabled &= !self.busy;
        self.view.show_selection_summary(&summary);
    }

    fn idle_summary(&self) -> SelectionSummary {
        render::selection_summary(&self.selection, &self.symptoms)
    }

    fn fail(&mut self, op: Operation, err: ExpertError) -> ExpertError {
        tracing::warn!("{:?} failed: {}", op, err);
        self.notifier.notify(Notice::error(err.user_message(op)));
        err
    }
}

/// Busy marker for one request.
///
/// Dropping it clears the marker, hides the loading indicator and restores the summary, so a
/// request future abandoned mid-flight does not leave diagnose disabled. The selection cannot
/// change while the session is borrowed, so the summary taken at the start is still current.
struct InFlight<'a, V: View> {
    busy: &'a mut bool,
    view: &'a mut V,
    summary: SelectionSummary,
}

impl<'a, V: View> InFlight<'a, V> {
    fn start(busy: &'a mut bool, view: &'a mut V, summary: SelectionSummary) -> Self {
        *busy = true;
        view.set_loading(true);
        view.show_selection_summary(&SelectionSummary {
            diagnose_enabled: false,
            ..summary.clone()
        });
        Self {
            busy,
            view,
            summary,
        }
    }
}

impl<V: View> Drop for InFlight<'_, V> {
    fn drop(&mut self) {
        *self.busy = false;
        self.view.set_loading(false);
        self.view.show_selection_summary(&self.summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confidence::ConfidenceTier;
    use crate::constants::{NO_DIAGNOSIS_MESSAGE, NO_REQUIRED_SYMPTOMS_MESSAGE};
    use crate::model::{BackwardResult, DiagnosisResult, Disease};
    use crate::render::{DiseaseOption, RequiredSymptomsView, SymptomCard};
    use crate::view::Severity;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn code(s: &str) -> Code {
        Code::new(s).expect("valid code")
    }

    fn symptom(c: &str, description: &str) -> Symptom {
        Symptom {
            code: code(c),
            description: description.into(),
        }
    }

    fn disease(c: &str, name: &str) -> Disease {
        Disease {
            code: code(c),
            name: name.into(),
            latin_name: Some("Nilaparvata lugens".into()),
            description: None,
            danger_level: Some("Tinggi".into()),
        }
    }

    #[derive(Default)]
    struct FakeApi {
        symptoms: Vec<Symptom>,
        diseases: Vec<Disease>,
        results: Vec<DiagnosisResult>,
        backward: Option<BackwardResult>,
        failure: Option<fn() -> ExpertError>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeApi {
        fn record(&self, call: String) -> ExpertResult<()> {
            self.calls.lock().expect("lock").push(call);
            match self.failure {
                Some(make) => Err(make()),
                None => Ok(()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("lock").clone()
        }

        fn failing(make: fn() -> ExpertError) -> Self {
            Self {
                failure: Some(make),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl ExpertApi for FakeApi {
        async fn symptoms(&self, search: Option<&str>) -> ExpertResult<Vec<Symptom>> {
            self.record(format!("symptoms:{}", search.unwrap_or("")))?;
            Ok(self.symptoms.clone())
        }

        async fn diseases(&self) -> ExpertResult<Vec<Disease>> {
            self.record("diseases".into())?;
            Ok(self.diseases.clone())
        }

        async fn diagnose(&self, symptoms: &[Code]) -> ExpertResult<Vec<DiagnosisResult>> {
            let codes: Vec<_> = symptoms.iter().map(Code::as_str).collect();
            self.record(format!("diagnose:{}", codes.join(",")))?;
            Ok(self.results.clone())
        }

        async fn backward(&self, disease: &Code) -> ExpertResult<BackwardResult> {
            self.record(format!("backward:{disease}"))?;
            self.backward
                .clone()
                .ok_or(ExpertError::Rejected { message: None })
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Grid(Vec<SymptomCard>),
        Summary(SelectionSummary),
        Options(Vec<DiseaseOption>),
        Diagnosis(DiagnosisView),
        Backward(BackwardView),
        HideBackward,
        Loading(bool),
    }

    #[derive(Default)]
    struct RecordingView {
        events: Vec<Event>,
    }

    impl RecordingView {
        fn last_grid(&self) -> Option<&Vec<SymptomCard>> {
            self.events.iter().rev().find_map(|e| match e {
                Event::Grid(cards) => Some(cards),
                _ => None,
            })
        }

        fn last_summary(&self) -> Option<&SelectionSummary> {
            self.events.iter().rev().find_map(|e| match e {
                Event::Summary(s) => Some(s),
                _ => None,
            })
        }
    }

    impl View for RecordingView {
        fn show_symptom_grid(&mut self, cards: &[SymptomCard]) {
            self.events.push(Event::Grid(cards.to_vec()));
        }

        fn show_selection_summary(&mut self, summary: &SelectionSummary) {
            self.events.push(Event::Summary(summary.clone()));
        }

        fn show_disease_options(&mut self, options: &[DiseaseOption]) {
            self.events.push(Event::Options(options.to_vec()));
        }

        fn show_diagnosis(&mut self, diagnosis: &DiagnosisView) {
            self.events.push(Event::Diagnosis(diagnosis.clone()));
        }

        fn show_backward(&mut self, backward: &BackwardView) {
            self.events.push(Event::Backward(backward.clone()));
        }

        fn hide_backward(&mut self) {
            self.events.push(Event::HideBackward);
        }

        fn set_loading(&mut self, loading: bool) {
            self.events.push(Event::Loading(loading));
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        notices: Vec<Notice>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&mut self, notice: Notice) {
            self.notices.push(notice);
        }
    }

    type TestSession = ExpertSession<FakeApi, RecordingView, RecordingNotifier>;

    fn session(api: FakeApi) -> TestSession {
        ExpertSession::new(api, RecordingView::default(), RecordingNotifier::default())
    }

    fn catalog_api() -> FakeApi {
        FakeApi {
            symptoms: vec![
                symptom("S1", "Daun menguning"),
                symptom("S2", "Batang berlubang"),
                symptom("S3", "Bulir hampa"),
            ],
            diseases: vec![disease("P01", "Wereng Coklat")],
            ..FakeApi::default()
        }
    }

    #[tokio::test]
    async fn diagnosis_renders_high_tier_card() {
        let mut api = catalog_api();
        api.results = vec![DiagnosisResult {
            disease: disease("P01", "Wereng Coklat"),
            confidence: 85.0,
            matched_symptoms: vec![code("S1"), code("S2")],
            solutions: vec![],
        }];
        let mut session = session(api);
        session.init().await.expect("catalogs load");
        session.toggle_symptom(code("S2"));
        session.toggle_symptom(code("S1"));

        let diagnosis = session.diagnose().await.expect("diagnosis succeeds");

        let DiagnosisView::Matches(cards) = &diagnosis else {
            panic!("expected matches, got {diagnosis:?}");
        };
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].tier, ConfidenceTier::High);
        assert_eq!(cards[0].tier.label(), "high");
        assert_eq!(cards[0].confidence_text, "85% Yakin");
        assert_eq!(cards[0].matched_symptoms, ["Daun menguning", "Batang berlubang"]);
        assert!(session
            .view()
            .events
            .contains(&Event::Diagnosis(diagnosis.clone())));
        assert!(session.api.calls().contains(&"diagnose:S1,S2".to_string()));
    }

    #[tokio::test]
    async fn diagnosis_shows_loading_and_disables_submit_while_in_flight() {
        let mut session = session(catalog_api());
        session.init().await.expect("catalogs load");
        session.toggle_symptom(code("S1"));
        let start = session.view().events.len();

        session.diagnose().await.expect("diagnosis succeeds");

        let events = &session.view().events[start..];
        assert_eq!(events[0], Event::Loading(true));
        assert!(matches!(&events[1], Event::Summary(s) if !s.diagnose_enabled));
        assert_eq!(events[2], Event::Loading(false));
        assert!(matches!(&events[3], Event::Summary(s) if s.diagnose_enabled));
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn empty_results_render_empty_state() {
        let mut session = session(catalog_api());
        session.init().await.expect("catalogs load");
        session.toggle_symptom(code("S3"));

        let diagnosis = session.diagnose().await.expect("diagnosis succeeds");

        assert!(matches!(
            diagnosis,
            DiagnosisView::NoMatch { message, .. } if message == NO_DIAGNOSIS_MESSAGE
        ));
        assert!(session.notifier().notices.is_empty());
    }

    #[tokio::test]
    async fn empty_selection_sends_nothing() {
        let mut session = session(catalog_api());
        let err = session.diagnose().await.expect_err("should refuse");
        assert!(matches!(err, ExpertError::EmptySelection));
        assert!(session.api.calls().is_empty());
    }

    #[tokio::test]
    async fn diagnosis_failure_reports_server_message() {
        let mut session = session(FakeApi::failing(|| ExpertError::Rejected {
            message: Some("Gejala tidak valid".into()),
        }));
        session.toggle_symptom(code("S1"));

        let err = session.diagnose().await.expect_err("should fail");

        assert!(matches!(err, ExpertError::Rejected { .. }));
        assert_eq!(
            session.notifier().notices,
            vec![Notice::error("Gejala tidak valid")]
        );
        assert_eq!(session.view().events.last(), Some(&Event::Summary(SelectionSummary {
            count: 1,
            codes: vec![],
            diagnose_enabled: true,
        })));
    }

    #[tokio::test]
    async fn transport_failure_uses_generic_message() {
        let mut session = session(FakeApi::failing(|| {
            ExpertError::Transport("connection refused".into())
        }));
        session.toggle_symptom(code("S1"));

        session.diagnose().await.expect_err("should fail");

        let notice = &session.notifier().notices[0];
        assert_eq!(notice.severity, Severity::Error);
        assert_eq!(notice.message, "Gagal melakukan diagnosa");
    }

    #[tokio::test]
    async fn failed_reload_keeps_previous_catalog() {
        let mut session = session(catalog_api());
        session.load_symptoms().await.expect("first load");
        let truncated: fn() -> ExpertError = || ExpertError::Malformed("truncated".into());
        session.api.failure = Some(truncated);

        let err = session.load_symptoms().await.expect_err("second load fails");

        assert!(matches!(err, ExpertError::Malformed(_)));
        assert_eq!(session.symptoms().len(), 3);
        assert_eq!(
            session.notifier().notices,
            vec![Notice::error("Gagal memuat data gejala")]
        );
    }

    #[tokio::test]
    async fn failed_disease_reload_keeps_previous_catalog() {
        let mut session = session(catalog_api());
        session.load_diseases().await.expect("first load");
        let options_shown = session.view().events.len();
        let refused: fn() -> ExpertError = || ExpertError::Status {
            status: 500,
            message: None,
        };
        session.api.failure = Some(refused);

        let err = session.load_diseases().await.expect_err("second load fails");

        assert!(matches!(err, ExpertError::Status { status: 500, .. }));
        assert_eq!(session.diseases().len(), 1);
        assert_eq!(session.diseases().entries()[0].name, "Wereng Coklat");
        assert_eq!(session.view().events.len(), options_shown);
        assert_eq!(
            session.notifier().notices,
            vec![Notice::error("Gagal memuat data penyakit")]
        );
    }

    /// Never answers, so a request can be abandoned while in flight.
    struct StalledApi;

    #[async_trait]
    impl ExpertApi for StalledApi {
        async fn symptoms(&self, _search: Option<&str>) -> ExpertResult<Vec<Symptom>> {
            std::future::pending().await
        }

        async fn diseases(&self) -> ExpertResult<Vec<Disease>> {
            std::future::pending().await
        }

        async fn diagnose(&self, _symptoms: &[Code]) -> ExpertResult<Vec<DiagnosisResult>> {
            std::future::pending().await
        }

        async fn backward(&self, _disease: &Code) -> ExpertResult<BackwardResult> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn abandoned_request_clears_busy_state() {
        let mut session = ExpertSession::new(
            StalledApi,
            RecordingView::default(),
            RecordingNotifier::default(),
        );
        session.toggle_symptom(code("S1"));

        tokio::select! {
            biased;
            _ = session.diagnose() => panic!("stalled request completed"),
            _ = std::future::ready(()) => {}
        }

        assert!(!session.is_busy());
        let events = &session.view().events;
        assert!(events.contains(&Event::Loading(true)));
        assert_eq!(events[events.len() - 2], Event::Loading(false));
        assert!(session.view().last_summary().expect("summary").diagnose_enabled);

        session.toggle_symptom(code("S2"));
        let summary = session.view().last_summary().expect("summary");
        assert_eq!(summary.count, 2);
        assert!(summary.diagnose_enabled);
    }

    #[tokio::test]
    async fn toggle_rerenders_grid_and_summary() {
        let mut session = session(catalog_api());
        session.init().await.expect("catalogs load");

        session.toggle_symptom(code("S2"));
        let grid = session.view().last_grid().expect("grid rendered");
        assert!(grid.iter().any(|c| c.code == "S2" && c.selected));
        let summary = session.view().last_summary().expect("summary rendered");
        assert_eq!(summary.count, 1);
        assert!(summary.diagnose_enabled);

        session.toggle_symptom(code("S2"));
        let summary = session.view().last_summary().expect("summary rendered");
        assert_eq!(summary.count, 0);
        assert!(!summary.diagnose_enabled);
        assert!(session.selection().is_empty());
    }

    #[tokio::test]
    async fn filter_narrows_grid_without_touching_catalog() {
        let mut session = session(catalog_api());
        session.init().await.expect("catalogs load");

        session.filter_symptoms("HAMPA");
        let grid = session.view().last_grid().expect("grid rendered");
        assert_eq!(grid.len(), 1);
        assert_eq!(grid[0].code, "S3");
        assert_eq!(session.symptoms().len(), 3);

        session.toggle_symptom(code("S3"));
        let grid = session.view().last_grid().expect("grid rendered");
        assert_eq!(grid.len(), 1);
        assert!(grid[0].selected);
    }

    #[tokio::test]
    async fn backward_without_required_symptoms_renders_message() {
        let mut api = catalog_api();
        api.backward = Some(BackwardResult {
            disease: disease("P01", "Wereng Coklat"),
            required_symptoms: vec![],
            control_methods: vec![],
        });
        let mut session = session(api);

        let view = session
            .select_disease("P01")
            .await
            .expect("backward succeeds")
            .expect("panel shown");

        assert_eq!(
            view.required_symptoms,
            RequiredSymptomsView::Empty(NO_REQUIRED_SYMPTOMS_MESSAGE)
        );
        assert_eq!(view.disease.latin_name, "Nilaparvata lugens");
        assert_eq!(session.api.calls(), ["backward:P01"]);
    }

    #[tokio::test]
    async fn empty_disease_value_hides_backward_panel() {
        let mut session = session(catalog_api());

        let shown = session.select_disease("  ").await.expect("no request");

        assert!(shown.is_none());
        assert_eq!(session.view().events, vec![Event::HideBackward]);
        assert!(session.api.calls().is_empty());
    }

    #[tokio::test]
    async fn backward_refusal_uses_analysis_fallback() {
        let mut session = session(catalog_api());

        session.select_disease("P99").await.expect_err("should fail");

        assert_eq!(
            session.notifier().notices,
            vec![Notice::error("Terjadi kesalahan saat analisis")]
        );
    }

    #[tokio::test]
    async fn disease_load_populates_options() {
        let mut session = session(catalog_api());
        session.load_diseases().await.expect("diseases load");

        let options = session.view().events.iter().find_map(|e| match e {
            Event::Options(o) => Some(o.clone()),
            _ => None,
        });
        let options = options.expect("options rendered");
        assert_eq!(options.len(), 2);
        assert_eq!(options[1].value, "P01");
    }

    #[tokio::test]
    async fn lookup_reports_count_without_changing_catalog() {
        let mut session = session(catalog_api());

        let found = session.lookup_symptoms("  daun ").await.expect("lookup succeeds");

        assert_eq!(found.len(), 3);
        assert!(session.symptoms().is_empty());
        assert_eq!(session.api.calls(), ["symptoms:daun"]);
        assert_eq!(
            session.notifier().notices,
            vec![Notice::info("Ditemukan 3 gejala yang cocok dengan \"daun\"")]
        );
    }

    #[tokio::test]
    async fn blank_lookup_does_nothing() {
        let mut session = session(catalog_api());
        let found = session.lookup_symptoms("   ").await.expect("no request");
        assert!(found.is_empty());
        assert!(session.api.calls().is_empty());
        assert!(session.notifier().notices.is_empty());
    }
}
