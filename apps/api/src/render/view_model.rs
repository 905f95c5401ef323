// Serializable view models fed to the handlebars templates. Built from
// session state; no markup is produced here.

use serde::Serialize;

use crate::models::{JobListing, JobSearchResult, ResumeAnalysis, TemplateKind, WorkMode};
use crate::session::{JobQuery, Notice, SessionState, View};

pub const FALLBACK_NAME: &str = "Candidate Name";
pub const FALLBACK_ROLE: &str = "Professional Role";
/// Executive layout shows at most this many competencies.
pub const EXECUTIVE_COMPETENCIES: usize = 8;
const SEARCH_OPTION_SKILLS: usize = 5;

#[derive(Debug, Serialize)]
pub struct NavItem {
    pub key: &'static str,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct PageView<'a> {
    pub title: &'static str,
    pub nav: Vec<NavItem>,
    pub notice: Option<&'a Notice>,
    pub body: String,
}

impl<'a> PageView<'a> {
    pub fn new(current: View, notice: Option<&'a Notice>, body: String) -> Self {
        let nav = View::ALL
            .into_iter()
            .map(|view| NavItem {
                key: view.as_str(),
                label: view_label(view),
                active: view == current,
            })
            .collect();
        Self {
            title: view_label(current),
            nav,
            notice,
            body,
        }
    }
}

fn view_label(view: View) -> &'static str {
    match view {
        View::Home => "Home",
        View::Analysis => "Analysis",
        View::Templates => "Templates",
        View::Jobs => "Jobs",
    }
}

/// Traffic-light class for an ATS score.
pub fn score_class(score: f64) -> &'static str {
    if score > 70.0 {
        "good"
    } else if score > 40.0 {
        "fair"
    } else {
        "poor"
    }
}

// ── Analysis ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalysisCard<'a> {
    pub name: &'a str,
    pub suggested_role: &'a str,
    pub summary: &'a str,
    pub score: u32,
    pub score_class: &'static str,
    pub strengths: &'a [String],
    pub weaknesses: &'a [String],
    pub skills: &'a [String],
}

impl<'a> From<&'a ResumeAnalysis> for AnalysisCard<'a> {
    fn from(a: &'a ResumeAnalysis) -> Self {
        Self {
            name: &a.name,
            suggested_role: &a.suggested_role,
            summary: &a.summary,
            score: a.display_score(),
            score_class: score_class(a.score),
            strengths: &a.strengths,
            weaknesses: &a.weaknesses,
            skills: &a.skills_found,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Improvement<'a> {
    pub weakness: &'a str,
    pub tip: &'a str,
}

#[derive(Debug, Serialize)]
pub struct AnalysisView<'a> {
    pub analysis: Option<AnalysisCard<'a>>,
    pub can_generate_improvements: bool,
    pub improvements: Vec<Improvement<'a>>,
}

impl<'a> AnalysisView<'a> {
    pub fn from_state(state: &'a SessionState) -> Self {
        let analysis = state.resume_analysis();
        let improvements: Vec<Improvement<'a>> = analysis
            .map(|a| {
                a.weaknesses
                    .iter()
                    .zip(state.improvements())
                    .map(|(weakness, tip)| Improvement { weakness, tip })
                    .collect()
            })
            .unwrap_or_default();
        Self {
            analysis: analysis.map(AnalysisCard::from),
            can_generate_improvements: state.can_generate_improvements(),
            improvements,
        }
    }
}

// ── Templates ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct TemplateCard {
    pub key: &'static str,
    pub title: &'static str,
    pub caption: &'static str,
    pub label: &'static str,
    pub thumbnail: &'static str,
    pub selected: bool,
}

#[derive(Debug, Serialize)]
pub struct SelectedTemplate {
    pub title: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TemplatesView {
    pub cards: Vec<TemplateCard>,
    pub selected: Option<SelectedTemplate>,
}

impl TemplatesView {
    pub fn new(selected: Option<TemplateKind>) -> Self {
        let cards = TemplateKind::ALL
            .into_iter()
            .map(|kind| TemplateCard {
                key: kind.key(),
                title: kind.title(),
                caption: kind.caption(),
                label: kind.label(),
                thumbnail: kind.thumbnail_url(),
                selected: Some(kind) == selected,
            })
            .collect();
        Self {
            cards,
            selected: selected.map(|kind| SelectedTemplate {
                title: kind.title(),
                label: kind.label(),
            }),
        }
    }
}

// ── Jobs ────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ProfileSummary<'a> {
    pub role: &'a str,
    pub skill_count: usize,
    pub score: u32,
    pub score_class: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ModeOption {
    pub value: &'static str,
    pub selected: bool,
}

#[derive(Debug, Serialize)]
pub struct SearchForm<'a> {
    pub query: &'a str,
    pub location: &'a str,
    pub modes: Vec<ModeOption>,
}

#[derive(Debug, Serialize)]
pub struct SearchOptions {
    pub skills: String,
    pub variations: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ListingCard<'a> {
    pub title: &'a str,
    pub company: &'a str,
    pub snippet: &'a str,
    /// Only set for http(s) links.
    pub url: Option<&'a str>,
}

impl<'a> From<&'a JobListing> for ListingCard<'a> {
    fn from(l: &'a JobListing) -> Self {
        Self {
            title: &l.title,
            company: &l.company,
            snippet: &l.snippet,
            url: web_link(&l.url),
        }
    }
}

fn web_link(url: &str) -> Option<&str> {
    let url = url.trim();
    let scheme = url.split_once(':')?.0;
    (scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")).then_some(url)
}

#[derive(Debug, Serialize)]
pub struct SearchResults<'a> {
    pub text: &'a str,
    pub count: usize,
    pub listings: Vec<ListingCard<'a>>,
}

impl<'a> From<&'a JobSearchResult> for SearchResults<'a> {
    fn from(r: &'a JobSearchResult) -> Self {
        Self {
            text: &r.text,
            count: r.sources.len(),
            listings: r.sources.iter().map(ListingCard::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JobsView<'a> {
    pub profile: ProfileSummary<'a>,
    pub form: SearchForm<'a>,
    pub options: SearchOptions,
    pub results: Option<SearchResults<'a>>,
}

impl<'a> JobsView<'a> {
    pub fn new(
        analysis: &'a ResumeAnalysis,
        last_search: Option<&'a JobQuery>,
        results: Option<&'a JobSearchResult>,
    ) -> Self {
        let role = analysis.suggested_role.as_str();
        let (query, location, mode) = match last_search {
            Some(q) => (q.query.as_str(), q.location.as_str(), q.mode),
            None => (role, "", WorkMode::Any),
        };
        Self {
            profile: ProfileSummary {
                role: if role.is_empty() { "Not specified" } else { role },
                skill_count: analysis.skills_found.len(),
                score: analysis.display_score(),
                score_class: score_class(analysis.score),
            },
            form: SearchForm {
                query,
                location,
                modes: WorkMode::ALL
                    .into_iter()
                    .map(|m| ModeOption {
                        value: m.label(),
                        selected: m == mode,
                    })
                    .collect(),
            },
            options: search_options(analysis, location),
            results: results.map(SearchResults::from),
        }
    }
}

/// Suggested query variations shown under the search form.
pub fn search_options(analysis: &ResumeAnalysis, location: &str) -> SearchOptions {
    let skills = &analysis.skills_found;
    let role = analysis.suggested_role.as_str();
    let mut variations = Vec::new();
    if !role.is_empty() {
        let place = if location.is_empty() { "Remote" } else { location };
        variations.push(role.to_string());
        variations.push(format!("{role} {place}"));
        if let Some(first) = skills.first() {
            variations.push(format!("{first} Developer"));
        }
    }
    SearchOptions {
        skills: skills
            .iter()
            .take(SEARCH_OPTION_SKILLS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        variations,
    }
}

// ── Guard prompt ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct NeedsAnalysisView {
    pub heading: &'static str,
    pub message: &'static str,
}

impl NeedsAnalysisView {
    pub fn for_view(view: View) -> Self {
        match view {
            View::Jobs => Self {
                heading: "Smart Job Matching",
                message: "Please analyze your resume first to get personalized job matches!",
            },
            _ => Self {
                heading: "Choose a Template Style",
                message: "Please analyze a resume first to use templates.",
            },
        }
    }
}

// ── Résumé layouts ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct LayoutView<'a> {
    pub name: &'a str,
    pub role: &'a str,
    pub summary: &'a str,
    pub strengths: &'a [String],
    pub skills: &'a [String],
    pub competencies: &'a [String],
}

impl<'a> LayoutView<'a> {
    /// Blank name or role fall back to placeholders. No analysis renders the
    /// placeholders alone.
    pub fn new(analysis: Option<&'a ResumeAnalysis>) -> Self {
        let Some(a) = analysis else {
            return Self {
                name: FALLBACK_NAME,
                role: FALLBACK_ROLE,
                summary: "",
                strengths: &[],
                skills: &[],
                competencies: &[],
            };
        };
        let skills = a.skills_found.as_slice();
        Self {
            name: non_blank(&a.name, FALLBACK_NAME),
            role: non_blank(&a.suggested_role, FALLBACK_ROLE),
            summary: &a.summary,
            strengths: &a.strengths,
            skills,
            competencies: &skills[..skills.len().min(EXECUTIVE_COMPETENCIES)],
        }
    }
}

fn non_blank<'a>(value: &'a str, fallback: &'static str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}
