use std::fmt;

use serde::{Deserialize, Serialize};

/// A job opening as shown on the Jobs screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    pub title: String,
    pub company: String,
    pub url: String,
    pub snippet: String,
}

/// Outcome of one job search. Replaced, never merged, by the next search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSearchResult {
    /// Market-insight narrative written by the model.
    pub text: String,
    pub sources: Vec<JobListing>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkMode {
    #[default]
    Any,
    Remote,
    Hybrid,
    #[serde(rename = "On-site")]
    OnSite,
}

impl WorkMode {
    pub const ALL: [WorkMode; 4] = [
        WorkMode::Any,
        WorkMode::Remote,
        WorkMode::Hybrid,
        WorkMode::OnSite,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WorkMode::Any => "Any",
            WorkMode::Remote => "Remote",
            WorkMode::Hybrid => "Hybrid",
            WorkMode::OnSite => "On-site",
        }
    }

    /// Inverse of [`label`](Self::label), ignoring case. Blank means `Any`.
    pub fn from_label(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Some(WorkMode::Any);
        }
        Self::ALL
            .into_iter()
            .find(|mode| mode.label().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for WorkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
