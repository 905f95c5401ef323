//! Response schemas sent with structured-output requests. The field names are
//! part of the wire contract and must stay in sync with `ResumeAnalysis`.

use serde_json::{json, Value};

pub fn resume_analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": {"type": "STRING"},
            "score": {"type": "NUMBER"},
            "summary": {"type": "STRING"},
            "strengths": {"type": "ARRAY", "items": {"type": "STRING"}},
            "weaknesses": {"type": "ARRAY", "items": {"type": "STRING"}},
            "suggestedRole": {"type": "STRING"},
            "skillsFound": {"type": "ARRAY", "items": {"type": "STRING"}}
        },
        "required": ["name", "score", "summary", "suggestedRole"]
    })
}

pub fn improvements_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "improvements": {
                "type": "ARRAY",
                "items": {"type": "STRING"}
            }
        },
        "required": ["improvements"]
    })
}
