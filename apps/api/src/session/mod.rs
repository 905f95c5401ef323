//! Session State Machine: one user's screens and data, mutated only through
//! the named transitions below.
//!
//! Transitions that reach the gateway take `&mut self` for the whole call, so
//! a session never has two model calls in flight. Failures never escape a
//! transition; they become a pending [`Notice`] shown on the next render.

pub mod store;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::gateway::ResumeGateway;
use crate::models::{
    JobSearchResult, ProfileEdit, ResumeAnalysis, ResumeFile, TemplateKind, WorkMode,
};
use crate::normalizer::sanitize_query;

pub use store::{SessionHandle, SessionStore, SESSION_COOKIE};

// ────────────────────────────────────────────────────────────────────────────
// Views
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum View {
    #[default]
    Home,
    Analysis,
    Templates,
    Jobs,
}

impl View {
    pub const ALL: [View; 4] = [View::Home, View::Analysis, View::Templates, View::Jobs];

    pub fn as_str(self) -> &'static str {
        match self {
            View::Home => "home",
            View::Analysis => "analysis",
            View::Templates => "templates",
            View::Jobs => "jobs",
        }
    }

    /// Views that cannot be shown without an analysis.
    pub fn requires_analysis(self) -> bool {
        matches!(self, View::Templates | View::Jobs)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownView(pub String);

impl FromStr for View {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownView(s.to_string()))
    }
}

/// What the renderer actually draws. Differs from the current view only when
/// the guard applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Analysis,
    Templates,
    Jobs,
    /// The user asked for `View` but there is no analysis yet.
    NeedsAnalysis(View),
}

// ────────────────────────────────────────────────────────────────────────────
// Notices
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// One-shot message for the next render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

pub const ANALYSIS_FAILED: &str = "Analysis failed. Please try again.";
pub const PROFILE_SAVED: &str = "Changes saved successfully!";
pub const IMPROVEMENTS_FAILED: &str = "Could not generate improvements. Please try again.";
pub const NOTHING_TO_IMPROVE: &str = "There are no weaknesses to improve yet.";
pub const UPLOAD_FIRST: &str = "Please analyze a resume first.";
pub const EMPTY_QUERY: &str = "Enter a job title to search.";

/// The last search the user submitted, kept to refill the form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobQuery {
    pub query: String,
    pub location: String,
    pub mode: WorkMode,
}

// ────────────────────────────────────────────────────────────────────────────
// State
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    current_view: View,
    resume_analysis: Option<ResumeAnalysis>,
    improvements: Vec<String>,
    job_results: Option<JobSearchResult>,
    selected_template: Option<TemplateKind>,
    last_search: Option<JobQuery>,
    #[serde(skip)]
    notice: Option<Notice>,
    started_at: DateTime<Utc>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Fresh session: Home, nothing held.
    pub fn new() -> Self {
        Self {
            current_view: View::Home,
            resume_analysis: None,
            improvements: Vec::new(),
            job_results: None,
            selected_template: None,
            last_search: None,
            notice: None,
            started_at: Utc::now(),
        }
    }

    pub fn current_view(&self) -> View {
        self.current_view
    }

    pub fn resume_analysis(&self) -> Option<&ResumeAnalysis> {
        self.resume_analysis.as_ref()
    }

    pub fn improvements(&self) -> &[String] {
        &self.improvements
    }

    pub fn job_results(&self) -> Option<&JobSearchResult> {
        self.job_results.as_ref()
    }

    pub fn selected_template(&self) -> Option<TemplateKind> {
        self.selected_template
    }

    pub fn last_search(&self) -> Option<&JobQuery> {
        self.last_search.as_ref()
    }

    /// The screen to draw for the current view, applying the analysis guard.
    pub fn screen(&self) -> Screen {
        match self.current_view {
            view if view.requires_analysis() && self.resume_analysis.is_none() => {
                Screen::NeedsAnalysis(view)
            }
            View::Home => Screen::Home,
            View::Analysis => Screen::Analysis,
            View::Templates => Screen::Templates,
            View::Jobs => Screen::Jobs,
        }
    }

    /// "Generate Improvements" is offered only while there are weaknesses and
    /// no tips yet.
    pub fn can_generate_improvements(&self) -> bool {
        self.resume_analysis
            .as_ref()
            .is_some_and(|a| !a.weaknesses.is_empty())
            && self.improvements.is_empty()
    }

    /// Removes the pending notice so it is shown exactly once.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn post_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    // ── Transitions ─────────────────────────────────────────────────────────

    pub fn navigate(&mut self, view: View) {
        self.current_view = view;
    }

    /// Runs extraction on `file`. On success the analysis replaces any previous
    /// one and improvements are reset; on failure nothing but the notice changes.
    pub async fn analyze(&mut self, gateway: &ResumeGateway, file: ResumeFile) {
        self.current_view = View::Analysis;
        match gateway.extract_analysis(&file).await {
            Ok(analysis) => {
                info!(
                    role = %analysis.suggested_role,
                    score = analysis.score,
                    "Resume analyzed"
                );
                self.replace_analysis(Some(analysis));
            }
            Err(e) => {
                warn!("Resume analysis failed: {e}");
                self.notice = Some(Notice::error(ANALYSIS_FAILED));
            }
        }
    }

    /// "Upload New Resume".
    pub fn reset_resume(&mut self) {
        self.current_view = View::Analysis;
        self.replace_analysis(None);
    }

    /// Overwrites name, role and summary of the held analysis. A changed role
    /// becomes the query of the next search form.
    pub fn edit_profile(&mut self, edit: ProfileEdit) {
        self.current_view = View::Analysis;
        match self.resume_analysis.as_mut() {
            Some(analysis) => {
                if analysis.suggested_role != edit.suggested_role {
                    if let Some(last) = self.last_search.as_mut() {
                        last.query = edit.suggested_role.clone();
                    }
                }
                analysis.apply_edit(edit);
                self.notice = Some(Notice::success(PROFILE_SAVED));
            }
            None => self.notice = Some(Notice::warning(UPLOAD_FIRST)),
        }
    }

    /// Asks the gateway for one tip per weakness. A no-op unless
    /// [`can_generate_improvements`](Self::can_generate_improvements).
    pub async fn generate_improvements(&mut self, gateway: &ResumeGateway) {
        self.current_view = View::Analysis;
        if !self.can_generate_improvements() {
            if self.improvements.is_empty() {
                self.notice = Some(Notice::info(NOTHING_TO_IMPROVE));
            }
            return;
        }
        let Some(analysis) = self.resume_analysis.as_ref() else {
            return;
        };
        let improvements = gateway.generate_improvements(&analysis.weaknesses).await;
        if improvements.is_empty() {
            self.notice = Some(Notice::warning(IMPROVEMENTS_FAILED));
        }
        self.improvements = improvements;
    }

    pub fn select_template(&mut self, kind: TemplateKind) {
        self.current_view = View::Templates;
        if self.resume_analysis.is_some() {
            self.selected_template = Some(kind);
        }
    }

    /// Sanitizes the query and replaces the held results with a fresh search.
    pub async fn search_jobs(
        &mut self,
        gateway: &ResumeGateway,
        query: &str,
        location: &str,
        mode: WorkMode,
    ) {
        self.current_view = View::Jobs;
        if self.resume_analysis.is_none() {
            return;
        }
        let query = sanitize_query(query);
        let location = location.trim().to_string();
        if query.is_empty() {
            self.notice = Some(Notice::warning(EMPTY_QUERY));
            return;
        }
        self.job_results = Some(gateway.search_jobs(&query, &location, mode).await);
        self.last_search = Some(JobQuery { query, location, mode });
    }

    /// "Edit Target Role": back to the edit form, data untouched.
    pub fn edit_target_role(&mut self) {
        self.current_view = View::Analysis;
    }

    /// "Re-analyze": drops the analysis so a new upload can be made.
    pub fn reanalyze(&mut self) {
        self.current_view = View::Analysis;
        self.replace_analysis(None);
    }

    fn replace_analysis(&mut self, analysis: Option<ResumeAnalysis>) {
        self.resume_analysis = analysis;
        self.improvements.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedModel;
    use crate::models::ResumeMime;
    use serde_json::json;
    use std::sync::Arc;

    fn gateway(model: ScriptedModel) -> (ResumeGateway, Arc<ScriptedModel>) {
        let model = Arc::new(model);
        (ResumeGateway::new(model.clone()), model)
    }

    fn upload() -> ResumeFile {
        ResumeFile {
            bytes: bytes::Bytes::from_static(b"%PDF-1.4"),
            mime: ResumeMime::Pdf,
            file_name: Some("resume.pdf".to_string()),
        }
    }

    fn jane() -> serde_json::Value {
        json!({
            "name": "Jane Doe",
            "score": 82,
            "summary": "Growth product manager.",
            "strengths": ["Experimentation"],
            "weaknesses": ["Lacks metrics"],
            "suggestedRole": "Product Manager, Growth",
            "skillsFound": ["SQL"]
        })
    }

    async fn analyzed() -> SessionState {
        let (gateway, _) = gateway(ScriptedModel::new().reply_json(jane()));
        let mut state = SessionState::new();
        state.analyze(&gateway, upload()).await;
        state
    }

    #[test]
    fn test_fresh_session() {
        let state = SessionState::new();
        assert_eq!(state.current_view(), View::Home);
        assert_eq!(state.screen(), Screen::Home);
        assert!(state.resume_analysis().is_none());
        assert!(state.improvements().is_empty());
        assert!(state.job_results().is_none());
        assert!(state.selected_template().is_none());
    }

    #[test]
    fn test_guard_redirects_templates_and_jobs() {
        let mut state = SessionState::new();
        state.navigate(View::Templates);
        assert_eq!(state.screen(), Screen::NeedsAnalysis(View::Templates));
        state.navigate(View::Jobs);
        assert_eq!(state.screen(), Screen::NeedsAnalysis(View::Jobs));
        state.navigate(View::Analysis);
        assert_eq!(state.screen(), Screen::Analysis);
    }

    #[test]
    fn test_view_from_str() {
        assert_eq!("templates".parse::<View>(), Ok(View::Templates));
        assert_eq!("JOBS".parse::<View>(), Ok(View::Jobs));
        assert!("settings".parse::<View>().is_err());
    }

    #[tokio::test]
    async fn test_end_to_end_analysis_and_improvements() {
        let (gateway, model) = gateway(
            ScriptedModel::new()
                .reply_json(jane())
                .reply_json(json!({
                    "improvements": ["Quantify growth impact with % or $ metrics"]
                })),
        );
        let mut state = SessionState::new();
        state.navigate(View::Analysis);
        state.analyze(&gateway, upload()).await;

        let analysis = state.resume_analysis().unwrap();
        assert_eq!(analysis.suggested_role, "Product Manager");
        assert!(state.can_generate_improvements());

        state.generate_improvements(&gateway).await;
        assert_eq!(
            state.improvements(),
            ["Quantify growth impact with % or $ metrics".to_string()]
        );
        assert_eq!(
            state.improvements().len(),
            state.resume_analysis().unwrap().weaknesses.len()
        );
        assert!(!state.can_generate_improvements());

        // A second click does not call the model again.
        state.generate_improvements(&gateway).await;
        assert_eq!(model.requests().len(), 2);

        state.navigate(View::Templates);
        assert_eq!(state.screen(), Screen::Templates);
    }

    #[tokio::test]
    async fn test_analysis_failure_leaves_state_unchanged() {
        let mut state = analyzed().await;
        let before = state.resume_analysis().cloned();

        let (failing, _) = gateway(ScriptedModel::new().fail(500));
        state.analyze(&failing, upload()).await;

        assert_eq!(state.resume_analysis().cloned(), before);
        let notice = state.take_notice().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.text, ANALYSIS_FAILED);
        assert!(state.take_notice().is_none());
    }

    #[tokio::test]
    async fn test_new_analysis_resets_improvements() {
        let (gateway, _) = gateway(
            ScriptedModel::new()
                .reply_json(jane())
                .reply_json(json!({"improvements": ["tip"]}))
                .reply_json(jane()),
        );
        let mut state = SessionState::new();
        state.analyze(&gateway, upload()).await;
        state.generate_improvements(&gateway).await;
        assert_eq!(state.improvements().len(), 1);

        state.analyze(&gateway, upload()).await;
        assert!(state.improvements().is_empty());
    }

    #[tokio::test]
    async fn test_failed_improvements_keep_list_empty() {
        let mut state = analyzed().await;
        let (failing, _) = gateway(ScriptedModel::new().fail(502));
        state.generate_improvements(&failing).await;

        assert!(state.improvements().is_empty());
        assert!(state.can_generate_improvements());
        assert_eq!(state.take_notice().unwrap().text, IMPROVEMENTS_FAILED);
    }

    #[tokio::test]
    async fn test_edit_name_only_keeps_other_fields() {
        let mut state = analyzed().await;
        let before = state.resume_analysis().cloned().unwrap();

        state.edit_profile(ProfileEdit {
            name: "Jane Q. Doe".to_string(),
            suggested_role: before.suggested_role.clone(),
            summary: before.summary.clone(),
        });

        let after = state.resume_analysis().unwrap();
        assert_eq!(after.name, "Jane Q. Doe");
        assert_eq!(after.suggested_role, before.suggested_role);
        assert_eq!(after.summary, before.summary);
        assert_eq!(after.skills_found, before.skills_found);
        assert_eq!(state.take_notice().unwrap().text, PROFILE_SAVED);
    }

    #[test]
    fn test_edit_without_analysis_warns() {
        let mut state = SessionState::new();
        state.edit_profile(ProfileEdit {
            name: "X".to_string(),
            suggested_role: "Y".to_string(),
            summary: "Z".to_string(),
        });
        assert!(state.resume_analysis().is_none());
        assert_eq!(state.take_notice().unwrap().level, NoticeLevel::Warning);
    }

    #[tokio::test]
    async fn test_reset_and_reanalyze_clear_analysis() {
        let mut state = analyzed().await;
        state.reset_resume();
        assert!(state.resume_analysis().is_none());
        assert_eq!(state.current_view(), View::Analysis);

        let mut state = analyzed().await;
        state.navigate(View::Jobs);
        state.reanalyze();
        assert!(state.resume_analysis().is_none());
        assert!(state.improvements().is_empty());
        assert_eq!(state.screen(), Screen::Analysis);
    }

    #[tokio::test]
    async fn test_select_template() {
        let mut state = SessionState::new();
        state.select_template(TemplateKind::Creative);
        assert!(state.selected_template().is_none());

        let mut state = analyzed().await;
        state.select_template(TemplateKind::Executive);
        assert_eq!(state.selected_template(), Some(TemplateKind::Executive));
        assert_eq!(state.screen(), Screen::Templates);
    }

    #[tokio::test]
    async fn test_search_sanitizes_query_and_replaces_results() {
        let (gateway, model) = gateway(
            ScriptedModel::new()
                .reply_text("First market.")
                .reply_text("Second market."),
        );
        let mut state = analyzed().await;

        state
            .search_jobs(
                &gateway,
                "Data Analyst with SQL focus, Senior",
                " Berlin ",
                WorkMode::Remote,
            )
            .await;
        assert_eq!(state.job_results().unwrap().text, "First market.");
        let last = state.last_search().unwrap();
        assert_eq!(last.query, "Data Analyst");
        assert_eq!(last.location, "Berlin");
        assert!(model.requests()[0]
            .prompt_text()
            .starts_with("Find active job listings for \"Data Analyst\" in \"Berlin\"."));

        state.search_jobs(&gateway, "Nurse", "", WorkMode::Any).await;
        assert_eq!(state.job_results().unwrap().text, "Second market.");
        assert_eq!(state.current_view(), View::Jobs);
    }

    #[tokio::test]
    async fn test_search_with_blank_query_skips_call() {
        let (gateway, model) = gateway(ScriptedModel::new());
        let mut state = analyzed().await;
        state.search_jobs(&gateway, " , with", "", WorkMode::Any).await;

        assert!(model.requests().is_empty());
        assert!(state.job_results().is_none());
        assert_eq!(state.take_notice().unwrap().text, EMPTY_QUERY);
    }

    #[tokio::test]
    async fn test_improvements_without_weaknesses_skip_call() {
        let (gateway, model) = gateway(ScriptedModel::new());
        let mut state = SessionState::new();
        state.generate_improvements(&gateway).await;

        assert!(model.requests().is_empty());
        let notice = state.take_notice().unwrap();
        assert_eq!(notice.level, NoticeLevel::Info);
        assert_eq!(notice.text, NOTHING_TO_IMPROVE);
    }

    #[tokio::test]
    async fn test_edit_target_role_keeps_data() {
        let mut state = analyzed().await;
        state.navigate(View::Jobs);
        state.edit_target_role();
        assert_eq!(state.current_view(), View::Analysis);
        assert!(state.resume_analysis().is_some());
    }

    #[tokio::test]
    async fn test_edited_role_replaces_previous_query() {
        let (gateway, _) = gateway(ScriptedModel::new().reply_text("Market."));
        let mut state = analyzed().await;
        state
            .search_jobs(&gateway, "Product Manager", "Berlin", WorkMode::Hybrid)
            .await;

        state.edit_target_role();
        let before = state.resume_analysis().cloned().unwrap();
        state.edit_profile(ProfileEdit {
            name: before.name.clone(),
            suggested_role: "Data Scientist".to_string(),
            summary: before.summary.clone(),
        });

        let last = state.last_search().unwrap();
        assert_eq!(last.query, "Data Scientist");
        assert_eq!(last.location, "Berlin");
        assert_eq!(last.mode, WorkMode::Hybrid);
        assert_eq!(state.job_results().unwrap().text, "Market.");
    }

    #[tokio::test]
    async fn test_unchanged_role_keeps_previous_query() {
        let (gateway, _) = gateway(ScriptedModel::new().reply_text("Market."));
        let mut state = analyzed().await;
        state.search_jobs(&gateway, "Growth Lead", "", WorkMode::Any).await;

        let before = state.resume_analysis().cloned().unwrap();
        state.edit_profile(ProfileEdit {
            name: "Jane Q. Doe".to_string(),
            suggested_role: before.suggested_role.clone(),
            summary: before.summary.clone(),
        });
        assert_eq!(state.last_search().unwrap().query, "Growth Lead");
    }
}
