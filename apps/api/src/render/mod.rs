//! View Renderer: turns session state into HTML.
//!
//! Every screen and every résumé layout is a handlebars template compiled into
//! the binary. Values are HTML-escaped by the registry; only the rendered
//! screen body is inserted raw into the page shell.

pub mod view_model;

use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;

use crate::models::{ResumeAnalysis, TemplateKind};
use crate::session::{Notice, Screen, SessionState};
use crate::render::view_model::{
    AnalysisView, JobsView, LayoutView, NeedsAnalysisView, PageView, TemplatesView,
};

/// Body of the preview for an unknown layout key.
pub const TEMPLATE_NOT_FOUND: &str = "<div>Template not found</div>";

const TEMPLATES: &[(&str, &str)] = &[
    ("page", include_str!("../../templates/page.hbs")),
    ("home", include_str!("../../templates/home.hbs")),
    ("analysis", include_str!("../../templates/analysis.hbs")),
    ("templates", include_str!("../../templates/templates.hbs")),
    ("jobs", include_str!("../../templates/jobs.hbs")),
    ("needs_analysis", include_str!("../../templates/needs_analysis.hbs")),
    ("layout_modern", include_str!("../../templates/layouts/modern.hbs")),
    ("layout_executive", include_str!("../../templates/layouts/executive.hbs")),
    ("layout_creative", include_str!("../../templates/layouts/creative.hbs")),
];

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template failed to compile: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("template failed to render: {0}")]
    Render(#[from] handlebars::RenderError),
}

/// Compiled template registry. Build once at startup and share.
pub struct Renderer {
    registry: Handlebars<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        for (name, source) in TEMPLATES {
            registry.register_template_string(name, source)?;
        }
        Ok(Self { registry })
    }

    /// Full page for the session's current screen.
    pub fn render_page(
        &self,
        state: &SessionState,
        notice: Option<&Notice>,
    ) -> Result<String, RenderError> {
        let body = match state.screen() {
            Screen::Home => self.render("home", &())?,
            Screen::Analysis => self.render("analysis", &AnalysisView::from_state(state))?,
            Screen::Templates => {
                self.render("templates", &TemplatesView::new(state.selected_template()))?
            }
            Screen::Jobs => match state.resume_analysis() {
                Some(analysis) => self.render(
                    "jobs",
                    &JobsView::new(analysis, state.last_search(), state.job_results()),
                )?,
                None => self.render(
                    "needs_analysis",
                    &NeedsAnalysisView::for_view(state.current_view()),
                )?,
            },
            Screen::NeedsAnalysis(view) => {
                self.render("needs_analysis", &NeedsAnalysisView::for_view(view))?
            }
        };
        self.render("page", &PageView::new(state.current_view(), notice, body))
    }

    /// Standalone document for one résumé layout.
    pub fn render_layout(
        &self,
        kind: TemplateKind,
        analysis: Option<&ResumeAnalysis>,
    ) -> Result<String, RenderError> {
        let name = match kind {
            TemplateKind::Modern => "layout_modern",
            TemplateKind::Executive => "layout_executive",
            TemplateKind::Creative => "layout_creative",
        };
        self.render(name, &LayoutView::new(analysis))
    }

    /// Layout by key; unknown keys render the not-found placeholder.
    pub fn render_layout_key(
        &self,
        key: &str,
        analysis: Option<&ResumeAnalysis>,
    ) -> Result<String, RenderError> {
        match TemplateKind::from_key(key) {
            Some(kind) => self.render_layout(kind, analysis),
            None => Ok(TEMPLATE_NOT_FOUND.to_string()),
        }
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, RenderError> {
        Ok(self.registry.render(name, data)?)
    }
}
