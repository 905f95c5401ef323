use serde::{Deserialize, Serialize};

/// The three fixed résumé layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Modern,
    Executive,
    Creative,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 3] = [
        TemplateKind::Modern,
        TemplateKind::Executive,
        TemplateKind::Creative,
    ];

    /// Key used in URLs and in the session snapshot.
    pub fn key(self) -> &'static str {
        match self {
            TemplateKind::Modern => "modern",
            TemplateKind::Executive => "executive",
            TemplateKind::Creative => "creative",
        }
    }

    /// Case-insensitive lookup by key. `None` for anything else.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(key.trim()))
    }

    /// Gallery card heading.
    pub fn title(self) -> &'static str {
        match self {
            TemplateKind::Modern => "Modern Tech",
            TemplateKind::Executive => "Executive Pro",
            TemplateKind::Creative => "Creative",
        }
    }

    pub fn caption(self) -> &'static str {
        match self {
            TemplateKind::Modern => "Clean & Professional",
            TemplateKind::Executive => "Elegant & Corporate",
            TemplateKind::Creative => "Modern & Creative",
        }
    }

    /// Short name used on the select button and in the confirmation.
    pub fn label(self) -> &'static str {
        match self {
            TemplateKind::Modern => "Modern",
            TemplateKind::Executive => "Executive",
            TemplateKind::Creative => "Creative",
        }
    }

    pub fn thumbnail_url(self) -> &'static str {
        match self {
            TemplateKind::Modern => "https://images.unsplash.com/photo-1586281380349-632531db7ed4?auto=format&fit=crop&q=80&w=400&h=300",
            TemplateKind::Executive => "https://images.unsplash.com/photo-1586282391129-76a6df840fd0?auto=format&fit=crop&q=80&w=400&h=300",
            TemplateKind::Creative => "https://images.unsplash.com/photo-1606326608606-aa0b62935f2b?auto=format&fit=crop&q=80&w=400&h=300",
        }
    }
}
