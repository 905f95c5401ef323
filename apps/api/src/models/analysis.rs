use serde::{Deserialize, Serialize};

/// Structured result of résumé extraction. Field names match the model's
/// JSON response schema exactly (`suggestedRole`, `skillsFound`).
///
/// Scalars are required; a reply missing one is a schema failure. The
/// sequences default to empty when the model leaves them out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    pub name: String,
    /// ATS compatibility score, 0 – 100.
    pub score: f64,
    pub summary: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    pub suggested_role: String,
    #[serde(default)]
    pub skills_found: Vec<String>,
}

/// The three user-editable fields of an analysis.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProfileEdit {
    pub name: String,
    pub suggested_role: String,
    pub summary: String,
}

impl ResumeAnalysis {
    /// Overwrites name, role and summary in place. Everything else is untouched.
    pub fn apply_edit(&mut self, edit: ProfileEdit) {
        self.name = edit.name;
        self.suggested_role = edit.suggested_role;
        self.summary = edit.summary;
    }

    /// Score rounded for display.
    pub fn display_score(&self) -> u32 {
        self.score.round().clamp(0.0, 100.0) as u32
    }
}
