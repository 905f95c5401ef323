//! AI Gateway: the three résumé operations, each a single exchange with the
//! hosted model through `llm_client`.
//!
//! `extract_analysis` reports failure as a tagged `GatewayError`.
//! `generate_improvements` and `search_jobs` are best-effort: a failed call
//! degrades to an empty list or an error narrative and never propagates.

pub mod prompts;
pub mod schema;

use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::gateway::prompts::{
    ANALYZE_RESUME_PROMPT, IMPROVEMENTS_PROMPT_TEMPLATE, JOB_SEARCH_FAILED_TEXT, JOB_SEARCH_SUFFIX,
};
use crate::gateway::schema::{improvements_schema, resume_analysis_schema};
use crate::llm_client::{GenerateContentRequest, GenerativeModel, LlmError, Part};
use crate::models::{JobSearchResult, ResumeAnalysis, ResumeFile, WorkMode};
use crate::normalizer::{align_improvements, extract_listings, normalize_analysis};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("model call failed: {0}")]
    Transport(LlmError),

    #[error("model returned no content")]
    Empty,

    #[error("reply did not match the expected schema: {0}")]
    Schema(serde_json::Error),
}

impl From<LlmError> for GatewayError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Parse(e) => GatewayError::Schema(e),
            LlmError::EmptyContent => GatewayError::Empty,
            other => GatewayError::Transport(other),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ImprovementsReply {
    #[serde(default)]
    improvements: Vec<String>,
}

/// Thin client for the résumé operations. Cheap to clone.
#[derive(Clone)]
pub struct ResumeGateway {
    model: Arc<dyn GenerativeModel>,
}

impl ResumeGateway {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Extracts a structured analysis from an uploaded résumé.
    /// The suggested role is cleaned to a single job title before returning.
    pub async fn extract_analysis(&self, file: &ResumeFile) -> Result<ResumeAnalysis, GatewayError> {
        info!(
            file = file.file_name.as_deref().unwrap_or("upload"),
            mime = file.mime.as_str(),
            size = file.bytes.len(),
            "Requesting resume analysis"
        );
        let request = GenerateContentRequest::user(vec![
            Part::inline(file.mime.as_str(), &file.bytes),
            Part::text(ANALYZE_RESUME_PROMPT),
        ])
        .with_json_schema(resume_analysis_schema());

        let response = self.model.generate(&request).await?;
        let analysis: ResumeAnalysis = response.json()?;
        Ok(normalize_analysis(analysis))
    }

    /// One tip per weakness, index-aligned. Empty when the call fails or the
    /// reply does not line up with the input.
    pub async fn generate_improvements(&self, weaknesses: &[String]) -> Vec<String> {
        if weaknesses.is_empty() {
            return Vec::new();
        }
        match self.request_improvements(weaknesses).await {
            Ok(improvements) => {
                let returned = improvements.len();
                align_improvements(weaknesses, improvements).unwrap_or_else(|| {
                    warn!(
                        "Discarding {} improvements for {} weaknesses",
                        returned,
                        weaknesses.len()
                    );
                    Vec::new()
                })
            }
            Err(e) => {
                warn!("Improvement generation failed: {e}");
                Vec::new()
            }
        }
    }

    async fn request_improvements(&self, weaknesses: &[String]) -> Result<Vec<String>, LlmError> {
        let weaknesses_json = serde_json::to_string(weaknesses)?;
        let prompt = IMPROVEMENTS_PROMPT_TEMPLATE.replace("{weaknesses_json}", &weaknesses_json);
        let request = GenerateContentRequest::user(vec![Part::text(prompt)])
            .with_json_schema(improvements_schema());
        let reply: ImprovementsReply = self.model.generate(&request).await?.json()?;
        Ok(reply.improvements)
    }

    /// Web-grounded job search. Listings come from the grounding citations.
    pub async fn search_jobs(&self, query: &str, location: &str, mode: WorkMode) -> JobSearchResult {
        info!(query, location, %mode, "Searching jobs");
        let request =
            GenerateContentRequest::user(vec![Part::text(job_search_prompt(query, location, mode))])
                .with_google_search();
        debug!(prompt = %request.prompt_text(), "Job search prompt");

        match self.model.generate(&request).await {
            Ok(response) => JobSearchResult {
                text: response.text().unwrap_or_default(),
                sources: extract_listings(response.grounding_chunks()),
            },
            Err(e) => {
                warn!("Job search failed: {e}");
                JobSearchResult {
                    text: JOB_SEARCH_FAILED_TEXT.to_string(),
                    sources: Vec::new(),
                }
            }
        }
    }
}

/// Natural-language search instruction. A blank location leaves the place open.
pub fn job_search_prompt(query: &str, location: &str, mode: WorkMode) -> String {
    let location = location.trim();
    let mut prompt = if location.is_empty() {
        format!("Find active job listings for \"{query}\".")
    } else {
        format!("Find active job listings for \"{query}\" in \"{location}\".")
    };
    if mode != WorkMode::Any {
        prompt.push_str(&format!(" The job type must be {mode}."));
    }
    prompt.push_str(JOB_SEARCH_SUFFIX);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedModel;
    use crate::models::ResumeMime;
    use crate::normalizer::EXTERNAL_SITE;
    use serde_json::json;

    fn gateway(model: ScriptedModel) -> (ResumeGateway, Arc<ScriptedModel>) {
        let model = Arc::new(model);
        (ResumeGateway::new(model.clone()), model)
    }

    fn pdf() -> ResumeFile {
        ResumeFile {
            bytes: bytes::Bytes::from_static(b"%PDF-1.7 fake"),
            mime: ResumeMime::Pdf,
            file_name: Some("jane.pdf".to_string()),
        }
    }

    fn jane_json() -> serde_json::Value {
        json!({
            "name": "Jane Doe",
            "score": 82,
            "summary": "Growth-minded product manager.",
            "strengths": ["Experimentation", "Stakeholder alignment"],
            "weaknesses": ["Lacks metrics"],
            "suggestedRole": "Product Manager, Growth",
            "skillsFound": ["SQL", "Amplitude"]
        })
    }

    #[tokio::test]
    async fn test_extract_analysis_cleans_role() {
        let (gateway, model) = gateway(ScriptedModel::new().reply_json(jane_json()));
        let analysis = gateway.extract_analysis(&pdf()).await.unwrap();

        assert_eq!(analysis.name, "Jane Doe");
        assert_eq!(analysis.score, 82.0);
        assert_eq!(analysis.suggested_role, "Product Manager");
        assert_eq!(analysis.weaknesses, vec!["Lacks metrics".to_string()]);

        let requests = model.requests();
        assert_eq!(requests.len(), 1);
        let parts = &requests[0].contents[0].parts;
        assert_eq!(parts[0].inline_data.as_ref().unwrap().mime_type, "application/pdf");
        assert!(parts[1].text.as_ref().unwrap().contains("HR Resume Screener"));
        let config = requests[0].generation_config.as_ref().unwrap();
        assert_eq!(config.response_mime_type, "application/json");
        assert!(requests[0].tools.is_empty());
    }

    #[tokio::test]
    async fn test_extract_analysis_transport_failure_is_tagged() {
        let (gateway, _) = gateway(ScriptedModel::new().fail(503));
        let err = gateway.extract_analysis(&pdf()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Transport(LlmError::Api { status: 503, .. })));
    }

    #[tokio::test]
    async fn test_extract_analysis_schema_mismatch() {
        let (gateway, _) = gateway(ScriptedModel::new().reply_json(json!({"name": "Only a name"})));
        let err = gateway.extract_analysis(&pdf()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Schema(_)));
    }

    #[tokio::test]
    async fn test_extract_analysis_empty_reply() {
        let (gateway, _) = gateway(ScriptedModel::new().reply(json!({"candidates": []})));
        let err = gateway.extract_analysis(&pdf()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Empty));
    }

    #[tokio::test]
    async fn test_generate_improvements_aligned() {
        let (gateway, model) = gateway(ScriptedModel::new().reply_json(json!({
            "improvements": ["Quantify growth impact with % or $ metrics", "Trim to one page"]
        })));
        let weaknesses = vec!["Lacks metrics".to_string(), "Too long".to_string()];
        let improvements = gateway.generate_improvements(&weaknesses).await;

        assert_eq!(improvements.len(), weaknesses.len());
        assert_eq!(improvements[0], "Quantify growth impact with % or $ metrics");
        let prompt = model.requests()[0].prompt_text();
        assert!(prompt.contains(r#"["Lacks metrics","Too long"]"#));
    }

    #[tokio::test]
    async fn test_generate_improvements_length_mismatch_is_empty() {
        let (gateway, _) = gateway(ScriptedModel::new().reply_json(json!({
            "improvements": ["only one"]
        })));
        let weaknesses = vec!["a".to_string(), "b".to_string()];
        assert!(gateway.generate_improvements(&weaknesses).await.is_empty());
    }

    #[tokio::test]
    async fn test_generate_improvements_failure_is_empty() {
        let (gateway, _) = gateway(ScriptedModel::new().fail(500));
        assert!(gateway
            .generate_improvements(&["a".to_string()])
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn test_generate_improvements_invalid_json_is_empty() {
        let (gateway, _) = gateway(ScriptedModel::new().reply_text("Sure! Here are some tips"));
        assert!(gateway
            .generate_improvements(&["a".to_string()])
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn test_generate_improvements_skips_call_without_weaknesses() {
        let (gateway, model) = gateway(ScriptedModel::new());
        assert!(gateway.generate_improvements(&[]).await.is_empty());
        assert!(model.requests().is_empty());
    }

    #[tokio::test]
    async fn test_search_jobs_maps_web_citations() {
        let (gateway, model) = gateway(ScriptedModel::new().reply(json!({
            "candidates": [{
                "content": {"parts": [{"text": "Demand for product managers is steady."}]},
                "groundingMetadata": {"groundingChunks": [
                    {"web": {"uri": "https://a.example/1", "title": "a.example"}},
                    {"web": {"uri": "https://b.example/2", "title": "b.example"}},
                    {},
                    {"web": {"uri": "https://c.example/3", "title": "c.example"}}
                ]}
            }]
        })));
        let result = gateway
            .search_jobs("Product Manager", "Berlin", WorkMode::Hybrid)
            .await;

        assert_eq!(result.text, "Demand for product managers is steady.");
        assert_eq!(result.sources.len(), 3);
        assert_eq!(result.sources[2].url, "https://c.example/3");
        assert_eq!(result.sources[0].company, EXTERNAL_SITE);

        let request = &model.requests()[0];
        assert_eq!(request.tools.len(), 1);
        assert!(request.generation_config.is_none());
        assert!(request.prompt_text().contains("The job type must be Hybrid."));
    }

    #[tokio::test]
    async fn test_search_jobs_without_citations_keeps_narrative() {
        let (gateway, _) = gateway(ScriptedModel::new().reply_text("No fresh listings found."));
        let result = gateway.search_jobs("Welder", "", WorkMode::Any).await;
        assert_eq!(result.text, "No fresh listings found.");
        assert!(result.sources.is_empty());
    }

    #[tokio::test]
    async fn test_search_jobs_failure_degrades() {
        let (gateway, _) = gateway(ScriptedModel::new().fail(429));
        let result = gateway.search_jobs("Welder", "Ohio", WorkMode::OnSite).await;
        assert_eq!(result.text, JOB_SEARCH_FAILED_TEXT);
        assert!(result.sources.is_empty());
    }

    #[test]
    fn test_job_search_prompt_any_mode_and_location() {
        let prompt = job_search_prompt("Data Analyst", "New York", WorkMode::Any);
        assert_eq!(
            prompt,
            "Find active job listings for \"Data Analyst\" in \"New York\". \
             List 5 specific job openings with company names. \
             Focus on jobs posted in the last 30 days."
        );
    }

    #[test]
    fn test_job_search_prompt_blank_location_and_mode() {
        let prompt = job_search_prompt("Nurse", "  ", WorkMode::OnSite);
        assert!(prompt.starts_with("Find active job listings for \"Nurse\". The job type must be On-site."));
    }
}
