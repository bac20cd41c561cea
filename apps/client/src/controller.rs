//! The analysis controller: collects a resume file and JD text, submits them
//! to the backend, and renders the outcome onto the injected surface.
//!
//! Single-writer model: every mutation of UI state flows through these
//! methods. Re-entrancy during an in-flight request is prevented by the busy
//! flag (the submit control is disabled for the duration).

use std::time::Duration;

use tracing::debug;

use crate::backend::AnalyzeBackend;
use crate::error::SubmitError;
use crate::models::{AnalysisResult, ScoreBand};
use crate::surface::UiSurface;

/// Arc length of the circular score indicator (2π · r for the r=54 ring in
/// the page markup). The gauge offset is the unfilled fraction of this.
pub const GAUGE_CIRCUMFERENCE: f32 = 339.292;

/// Pause between revealing the results section and moving the gauge offset,
/// so the arc's transition visibly animates from empty.
pub const SCORE_ANIMATE_DELAY: Duration = Duration::from_millis(100);

/// Alert shown when submit is pressed without both inputs present.
pub const VALIDATION_MESSAGE: &str =
    "Please select a resume file and provide a job description.";

/// The currently chosen resume: filename plus raw bytes. Replaced wholesale
/// on each new selection.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Explicit controller state (instead of implicit shared page state).
#[derive(Debug, Default)]
pub struct ControllerState {
    pub selected_file: Option<SelectedFile>,
    pub busy: bool,
    pub last_result: Option<AnalysisResult>,
}

pub struct AnalysisController<S: UiSurface, B: AnalyzeBackend> {
    surface: S,
    backend: B,
    state: ControllerState,
    animate_delay: Duration,
}

impl<S: UiSurface, B: AnalyzeBackend> AnalysisController<S, B> {
    /// Wires the controller to its collaborators. No I/O happens here.
    pub fn new(surface: S, backend: B) -> Self {
        Self {
            surface,
            backend,
            state: ControllerState::default(),
            animate_delay: SCORE_ANIMATE_DELAY,
        }
    }

    /// Overrides the gauge animation delay. Tests pass `Duration::ZERO`.
    pub fn with_animate_delay(mut self, delay: Duration) -> Self {
        self.animate_delay = delay;
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// A drag entered the drop target.
    pub fn drag_enter(&mut self) {
        self.surface.set_drop_target_active(true);
    }

    /// The drag left without dropping.
    pub fn drag_leave(&mut self) {
        self.surface.set_drop_target_active(false);
    }

    /// Files were dropped on the target. Only the first is meaningful; the
    /// pipeline processes a single resume.
    pub fn drop_files(&mut self, mut files: Vec<SelectedFile>) {
        self.surface.set_drop_target_active(false);
        if !files.is_empty() {
            self.select_file(files.remove(0));
        }
    }

    /// A file was chosen through the browse dialog.
    pub fn pick_file(&mut self, file: SelectedFile) {
        self.select_file(file);
    }

    fn select_file(&mut self, file: SelectedFile) {
        debug!("Selected resume file: {}", file.name);
        self.surface.set_filename_label(&file.name);
        self.state.selected_file = Some(file);
    }

    /// Submits the selected file and JD text for analysis.
    ///
    /// Returns `true` when results were rendered. Validation failures alert
    /// and return without any backend call. Whatever the outcome, the submit
    /// control is re-enabled and the loading indicator hidden before this
    /// returns.
    pub async fn submit(&mut self, jd_text: &str) -> bool {
        if self.state.busy {
            // Trigger is disabled while a request is in flight.
            return false;
        }

        let jd_text = jd_text.trim().to_string();
        if self.state.selected_file.is_none() || jd_text.is_empty() {
            self.surface.alert(VALIDATION_MESSAGE);
            return false;
        }

        self.state.busy = true;
        self.surface.set_submit_enabled(false);
        self.surface.set_loading_visible(true);
        self.surface.set_results_visible(false);

        let outcome = self.run_attempt(&jd_text).await;

        // Finalize: runs on every exit path so the controls never stay stuck.
        self.state.busy = false;
        self.surface.set_submit_enabled(true);
        self.surface.set_loading_visible(false);

        match outcome {
            Ok(result) => {
                self.state.last_result = Some(result);
                true
            }
            Err(err) => {
                debug!("Analysis attempt failed: {err}");
                self.surface.alert(&err.user_message());
                false
            }
        }
    }

    async fn run_attempt(&mut self, jd_text: &str) -> Result<AnalysisResult, SubmitError> {
        let envelope = {
            let file = self
                .state
                .selected_file
                .as_ref()
                .ok_or_else(|| SubmitError::Validation(VALIDATION_MESSAGE.to_string()))?;
            self.backend.analyze(file, jd_text).await?
        };

        let result = envelope.into_result()?;
        self.render_success(&result).await;
        Ok(result)
    }

    async fn render_success(&mut self, result: &AnalysisResult) {
        self.surface.clear_results();
        self.surface.set_results_visible(true);

        // Let the gauge transition engage before moving the offset.
        if !self.animate_delay.is_zero() {
            tokio::time::sleep(self.animate_delay).await;
        }
        let offset = GAUGE_CIRCUMFERENCE * (1.0 - result.match_score as f32 / 100.0);
        let band = ScoreBand::for_score(result.match_score);
        self.surface
            .render_score(&format!("{}%", result.match_score), band, offset);

        if result.missing_skills.is_empty() {
            self.surface.render_no_gaps_placeholder();
        } else {
            for skill in &result.missing_skills {
                self.surface.push_missing_skill_tag(skill);
            }
        }
        // Matched skills may legitimately render empty; no placeholder.
        for skill in &result.matched_skills {
            self.surface.push_matched_skill_tag(skill);
        }

        let mut rendered_any_group = false;
        for (skill, courses) in &result.course_recommendations {
            if courses.is_empty() {
                continue;
            }
            rendered_any_group = true;
            self.surface.begin_course_group(skill);
            for course in courses {
                self.surface.push_course_link(&course.title, &course.link);
            }
        }
        if !rendered_any_group {
            self.surface.render_no_recommendations_placeholder();
        }

        self.surface.set_report_link(&result.report_url);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, VecDeque};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::models::{AnalysisData, ApiEnvelope, Course, MatchDetails};

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        FilenameLabel(String),
        DropActive(bool),
        Alert(String),
        SubmitEnabled(bool),
        LoadingVisible(bool),
        ResultsVisible(bool),
        ClearResults,
        RenderScore {
            label: String,
            band: ScoreBand,
            offset: f32,
        },
        MissingTag(String),
        MatchedTag(String),
        NoGapsPlaceholder,
        CourseGroup(String),
        CourseLink {
            title: String,
            link: String,
        },
        NoRecommendationsPlaceholder,
        ReportLink(String),
    }

    #[derive(Default)]
    struct RecordingSurface {
        events: Vec<Event>,
    }

    impl RecordingSurface {
        fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
            self.events.iter().filter(|e| pred(e)).count()
        }

        fn last_submit_enabled(&self) -> Option<bool> {
            self.events.iter().rev().find_map(|e| match e {
                Event::SubmitEnabled(v) => Some(*v),
                _ => None,
            })
        }

        fn last_loading_visible(&self) -> Option<bool> {
            self.events.iter().rev().find_map(|e| match e {
                Event::LoadingVisible(v) => Some(*v),
                _ => None,
            })
        }

        fn alerts(&self) -> Vec<&str> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Event::Alert(m) => Some(m.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl UiSurface for RecordingSurface {
        fn set_filename_label(&mut self, name: &str) {
            self.events.push(Event::FilenameLabel(name.to_string()));
        }
        fn set_drop_target_active(&mut self, active: bool) {
            self.events.push(Event::DropActive(active));
        }
        fn alert(&mut self, message: &str) {
            self.events.push(Event::Alert(message.to_string()));
        }
        fn set_submit_enabled(&mut self, enabled: bool) {
            self.events.push(Event::SubmitEnabled(enabled));
        }
        fn set_loading_visible(&mut self, visible: bool) {
            self.events.push(Event::LoadingVisible(visible));
        }
        fn set_results_visible(&mut self, visible: bool) {
            self.events.push(Event::ResultsVisible(visible));
        }
        fn clear_results(&mut self) {
            self.events.push(Event::ClearResults);
        }
        fn render_score(&mut self, label: &str, band: ScoreBand, gauge_offset: f32) {
            self.events.push(Event::RenderScore {
                label: label.to_string(),
                band,
                offset: gauge_offset,
            });
        }
        fn push_missing_skill_tag(&mut self, skill: &str) {
            self.events.push(Event::MissingTag(skill.to_string()));
        }
        fn push_matched_skill_tag(&mut self, skill: &str) {
            self.events.push(Event::MatchedTag(skill.to_string()));
        }
        fn render_no_gaps_placeholder(&mut self) {
            self.events.push(Event::NoGapsPlaceholder);
        }
        fn begin_course_group(&mut self, skill: &str) {
            self.events.push(Event::CourseGroup(skill.to_string()));
        }
        fn push_course_link(&mut self, title: &str, link: &str) {
            self.events.push(Event::CourseLink {
                title: title.to_string(),
                link: link.to_string(),
            });
        }
        fn render_no_recommendations_placeholder(&mut self) {
            self.events.push(Event::NoRecommendationsPlaceholder);
        }
        fn set_report_link(&mut self, url: &str) {
            self.events.push(Event::ReportLink(url.to_string()));
        }
    }

    #[derive(Default)]
    struct ScriptedBackend {
        responses: Mutex<VecDeque<Result<ApiEnvelope, SubmitError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedBackend {
        fn with_responses(
            responses: Vec<Result<ApiEnvelope, SubmitError>>,
        ) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AnalyzeBackend for ScriptedBackend {
        async fn analyze(
            &self,
            _file: &SelectedFile,
            _jd_text: &str,
        ) -> Result<ApiEnvelope, SubmitError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(SubmitError::Transport("unscripted call".to_string())))
        }
    }

    fn resume_file() -> SelectedFile {
        SelectedFile {
            name: "resume.pdf".to_string(),
            bytes: b"%PDF-1.4 fake".to_vec(),
        }
    }

    fn envelope(
        score: u32,
        matched: &[&str],
        missing: &[&str],
        courses: HashMap<String, Vec<Course>>,
    ) -> ApiEnvelope {
        ApiEnvelope {
            success: true,
            error: None,
            data: Some(AnalysisData {
                match_score: score,
                match_details: MatchDetails {
                    matched_skills: matched.iter().map(|s| s.to_string()).collect(),
                    missing_skills: missing.iter().map(|s| s.to_string()).collect(),
                },
                course_recommendations: courses,
            }),
            report_url: Some("/api/download/analysis_report_ab12cd34.pdf".to_string()),
        }
    }

    fn controller_with(
        responses: Vec<Result<ApiEnvelope, SubmitError>>,
    ) -> AnalysisController<RecordingSurface, ScriptedBackend> {
        AnalysisController::new(
            RecordingSurface::default(),
            ScriptedBackend::with_responses(responses),
        )
        .with_animate_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_submit_without_file_alerts_and_skips_network() {
        let mut controller = controller_with(vec![]);
        let ok = controller.submit("a perfectly good job description").await;

        assert!(!ok);
        assert_eq!(controller.backend().call_count(), 0);
        assert_eq!(controller.surface().alerts(), vec![VALIDATION_MESSAGE]);
    }

    #[tokio::test]
    async fn test_submit_with_blank_jd_alerts_and_skips_network() {
        let mut controller = controller_with(vec![]);
        controller.pick_file(resume_file());
        let ok = controller.submit("   \n  ").await;

        assert!(!ok);
        assert_eq!(controller.backend().call_count(), 0);
        assert_eq!(controller.surface().alerts(), vec![VALIDATION_MESSAGE]);
    }

    #[tokio::test]
    async fn test_score_42_renders_low_band_and_percent_label() {
        let mut controller =
            controller_with(vec![Ok(envelope(42, &["Python"], &["SQL"], HashMap::new()))]);
        controller.pick_file(resume_file());
        assert!(controller.submit("jd").await);

        let expected_offset = GAUGE_CIRCUMFERENCE * (1.0 - 0.42);
        let render = controller
            .surface()
            .events
            .iter()
            .find_map(|e| match e {
                Event::RenderScore {
                    label,
                    band,
                    offset,
                } => Some((label.clone(), *band, *offset)),
                _ => None,
            })
            .expect("score was rendered");
        assert_eq!(render.0, "42%");
        assert_eq!(render.1, ScoreBand::Low);
        assert!((render.2 - expected_offset).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_band_boundaries() {
        for (score, band) in [
            (49, ScoreBand::Low),
            (50, ScoreBand::Medium),
            (79, ScoreBand::Medium),
            (80, ScoreBand::High),
        ] {
            let mut controller =
                controller_with(vec![Ok(envelope(score, &[], &["X"], HashMap::new()))]);
            controller.pick_file(resume_file());
            assert!(controller.submit("jd").await);

            let rendered = controller.surface().events.iter().find_map(|e| match e {
                Event::RenderScore { band, .. } => Some(*band),
                _ => None,
            });
            assert_eq!(rendered, Some(band), "score {score}");
        }
    }

    #[tokio::test]
    async fn test_empty_missing_skills_renders_placeholder_only() {
        let mut controller = controller_with(vec![Ok(envelope(
            100,
            &["Python", "SQL"],
            &[],
            HashMap::new(),
        ))]);
        controller.pick_file(resume_file());
        assert!(controller.submit("jd").await);

        let surface = controller.surface();
        assert_eq!(surface.count(|e| *e == Event::NoGapsPlaceholder), 1);
        assert_eq!(surface.count(|e| matches!(e, Event::MissingTag(_))), 0);
        assert_eq!(surface.count(|e| matches!(e, Event::MatchedTag(_))), 2);
    }

    #[tokio::test]
    async fn test_courses_skip_empty_skills() {
        let mut courses = HashMap::new();
        courses.insert("SQL".to_string(), vec![]);
        courses.insert(
            "Python".to_string(),
            vec![Course {
                title: "Intro".to_string(),
                link: "https://x".to_string(),
            }],
        );
        let mut controller =
            controller_with(vec![Ok(envelope(30, &[], &["SQL", "Python"], courses))]);
        controller.pick_file(resume_file());
        assert!(controller.submit("jd").await);

        let surface = controller.surface();
        assert_eq!(
            surface.count(|e| matches!(e, Event::CourseGroup(_))),
            1,
            "only Python should produce a group"
        );
        assert_eq!(
            surface.count(|e| *e == Event::CourseGroup("Python".to_string())),
            1
        );
        assert_eq!(
            surface.count(|e| matches!(e, Event::CourseLink { .. })),
            1
        );
        assert_eq!(
            surface.count(|e| *e == Event::NoRecommendationsPlaceholder),
            0
        );
    }

    #[tokio::test]
    async fn test_all_empty_course_lists_render_placeholder() {
        let mut courses = HashMap::new();
        courses.insert("SQL".to_string(), vec![]);
        courses.insert("Kafka".to_string(), vec![]);
        let mut controller =
            controller_with(vec![Ok(envelope(30, &[], &["SQL", "Kafka"], courses))]);
        controller.pick_file(resume_file());
        assert!(controller.submit("jd").await);

        let surface = controller.surface();
        assert_eq!(surface.count(|e| matches!(e, Event::CourseGroup(_))), 0);
        assert_eq!(
            surface.count(|e| *e == Event::NoRecommendationsPlaceholder),
            1
        );
    }

    #[tokio::test]
    async fn test_application_error_alerts_and_restores_controls() {
        let mut controller = controller_with(vec![Ok(ApiEnvelope {
            success: false,
            error: Some("boom".to_string()),
            ..Default::default()
        })]);
        controller.pick_file(resume_file());
        assert!(!controller.submit("jd").await);

        let surface = controller.surface();
        assert!(surface.alerts().iter().any(|m| m.contains("boom")));
        assert_eq!(surface.last_submit_enabled(), Some(true));
        assert_eq!(surface.last_loading_visible(), Some(false));
        assert!(!controller.state().busy);
    }

    #[tokio::test]
    async fn test_transport_error_alerts_and_restores_controls() {
        let mut controller = controller_with(vec![Err(SubmitError::Transport(
            "connection refused".to_string(),
        ))]);
        controller.pick_file(resume_file());
        assert!(!controller.submit("jd").await);

        let surface = controller.surface();
        assert_eq!(surface.alerts().len(), 1);
        assert_eq!(surface.last_submit_enabled(), Some(true));
        assert_eq!(surface.last_loading_visible(), Some(false));
    }

    #[tokio::test]
    async fn test_malformed_response_alerts_with_fallback() {
        // success without data
        let mut controller = controller_with(vec![Ok(ApiEnvelope {
            success: true,
            report_url: Some("/r.pdf".to_string()),
            ..Default::default()
        })]);
        controller.pick_file(resume_file());
        assert!(!controller.submit("jd").await);

        let surface = controller.surface();
        assert_eq!(surface.alerts().len(), 1);
        assert_eq!(surface.last_submit_enabled(), Some(true));
        // Nothing was rendered from the bad payload
        assert_eq!(surface.count(|e| matches!(e, Event::RenderScore { .. })), 0);
    }

    #[tokio::test]
    async fn test_resubmit_after_failure_renders_fresh_results() {
        let mut controller = controller_with(vec![
            Err(SubmitError::Transport("down".to_string())),
            Ok(envelope(90, &["Rust"], &[], HashMap::new())),
        ]);
        controller.pick_file(resume_file());

        assert!(!controller.submit("jd").await);
        assert!(controller.submit("jd").await);

        assert_eq!(controller.backend().call_count(), 2);
        let surface = controller.surface();
        // Containers cleared before the successful render
        assert_eq!(surface.count(|e| *e == Event::ClearResults), 1);
        assert_eq!(
            surface.count(|e| matches!(e, Event::RenderScore { .. })),
            1
        );
        assert_eq!(controller.state().last_result.as_ref().unwrap().match_score, 90);
    }

    #[tokio::test]
    async fn test_second_success_clears_previous_render() {
        let mut controller = controller_with(vec![
            Ok(envelope(40, &[], &["SQL"], HashMap::new())),
            Ok(envelope(85, &["SQL"], &[], HashMap::new())),
        ]);
        controller.pick_file(resume_file());

        assert!(controller.submit("jd one").await);
        assert!(controller.submit("jd two").await);

        let surface = controller.surface();
        assert_eq!(surface.count(|e| *e == Event::ClearResults), 2);
        let last_score = surface
            .events
            .iter()
            .rev()
            .find_map(|e| match e {
                Event::RenderScore { label, .. } => Some(label.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(last_score, "85%");
        assert_eq!(
            controller.state().last_result.as_ref().unwrap().match_score,
            85
        );
    }

    #[tokio::test]
    async fn test_report_link_points_at_report_url() {
        let mut controller = controller_with(vec![Ok(envelope(60, &[], &["X"], HashMap::new()))]);
        controller.pick_file(resume_file());
        assert!(controller.submit("jd").await);

        assert_eq!(
            controller.surface().count(|e| *e
                == Event::ReportLink("/api/download/analysis_report_ab12cd34.pdf".to_string())),
            1
        );
    }

    #[tokio::test]
    async fn test_drop_takes_first_file_only() {
        let mut controller = controller_with(vec![]);
        controller.drag_enter();
        controller.drop_files(vec![
            SelectedFile {
                name: "first.pdf".to_string(),
                bytes: vec![1],
            },
            SelectedFile {
                name: "second.pdf".to_string(),
                bytes: vec![2],
            },
        ]);

        assert_eq!(
            controller.state().selected_file.as_ref().unwrap().name,
            "first.pdf"
        );
        let surface = controller.surface();
        assert_eq!(
            surface.events,
            vec![
                Event::DropActive(true),
                Event::DropActive(false),
                Event::FilenameLabel("first.pdf".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_drag_leave_clears_active_style() {
        let mut controller = controller_with(vec![]);
        controller.drag_enter();
        controller.drag_leave();
        assert_eq!(
            controller.surface().events,
            vec![Event::DropActive(true), Event::DropActive(false)]
        );
    }

    #[tokio::test]
    async fn test_new_selection_replaces_previous_file() {
        let mut controller = controller_with(vec![]);
        controller.pick_file(resume_file());
        controller.pick_file(SelectedFile {
            name: "newer.pdf".to_string(),
            bytes: vec![9],
        });
        assert_eq!(
            controller.state().selected_file.as_ref().unwrap().name,
            "newer.pdf"
        );
    }

    #[tokio::test]
    async fn test_loading_shown_then_hidden_around_request() {
        let mut controller = controller_with(vec![Ok(envelope(10, &[], &["X"], HashMap::new()))]);
        controller.pick_file(resume_file());
        assert!(controller.submit("jd").await);

        let events = &controller.surface().events;
        let shown = events
            .iter()
            .position(|e| *e == Event::LoadingVisible(true))
            .unwrap();
        let hidden = events
            .iter()
            .position(|e| *e == Event::LoadingVisible(false))
            .unwrap();
        let disabled = events
            .iter()
            .position(|e| *e == Event::SubmitEnabled(false))
            .unwrap();
        assert!(disabled < shown || disabled < hidden);
        assert!(shown < hidden);
    }
}
