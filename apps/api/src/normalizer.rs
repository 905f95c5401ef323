//! Response Normalizer: cleans and validates model output before it reaches
//! the session.
//!
//! Job titles coming back from the model, and titles a user pastes into the
//! search box, go through the same `clean_role` routine.

use crate::llm_client::GroundingChunk;
use crate::models::{JobListing, ResumeAnalysis};

/// Publisher shown for grounded listings; citations carry no reliable company name.
pub const EXTERNAL_SITE: &str = "External Site";
/// Snippet shown for grounded listings.
pub const SNIPPET_PLACEHOLDER: &str = "Click to view details";

/// Separators after which a job title turns into description. Applied in order,
/// each keeping only the text before its first occurrence.
const ROLE_DELIMITERS: &[&str] = &[",", " with ", " - ", " – ", " — "];

/// Reduces a verbose job title to its first clause.
///
/// `"Backend Engineer, Senior"` → `"Backend Engineer"`,
/// `"Data Analyst with SQL focus"` → `"Data Analyst"`.
/// Idempotent: the result contains none of the delimiters.
pub fn clean_role(raw: &str) -> String {
    let mut role = raw;
    for delimiter in ROLE_DELIMITERS {
        if let Some((head, _)) = role.split_once(delimiter) {
            role = head;
        }
    }
    role.trim().to_string()
}

/// Sanitizes a user-entered search query before it is sent to the model.
pub fn sanitize_query(raw: &str) -> String {
    clean_role(raw)
}

/// Normalizes a freshly extracted analysis: one clean job title and a score in range.
pub fn normalize_analysis(mut analysis: ResumeAnalysis) -> ResumeAnalysis {
    analysis.suggested_role = clean_role(&analysis.suggested_role);
    analysis.score = analysis.score.clamp(0.0, 100.0);
    analysis
}

/// Maps grounding citations to listings. Chunks without a web reference are skipped.
pub fn extract_listings(chunks: &[GroundingChunk]) -> Vec<JobListing> {
    chunks
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .map(|web| JobListing {
            title: web.title.clone(),
            company: EXTERNAL_SITE.to_string(),
            url: web.uri.clone(),
            snippet: SNIPPET_PLACEHOLDER.to_string(),
        })
        .collect()
}

/// Keeps improvements only when they line up one-to-one with the weaknesses.
pub fn align_improvements(
    weaknesses: &[String],
    improvements: Vec<String>,
) -> Option<Vec<String>> {
    (improvements.len() == weaknesses.len()).then_some(improvements)
}
