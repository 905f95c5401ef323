use bytes::Bytes;

/// Résumé formats the model accepts as inline data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeMime {
    Pdf,
    Png,
    Jpeg,
}

impl ResumeMime {
    pub fn as_str(self) -> &'static str {
        match self {
            ResumeMime::Pdf => "application/pdf",
            ResumeMime::Png => "image/png",
            ResumeMime::Jpeg => "image/jpeg",
        }
    }

    /// Resolves the declared content type, falling back to the file extension
    /// when the browser sent nothing useful.
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>) -> Option<Self> {
        let declared = content_type
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_lowercase())
            .filter(|ct| !ct.is_empty() && ct != "application/octet-stream");

        match declared.as_deref() {
            Some("application/pdf") => Some(ResumeMime::Pdf),
            Some("image/png") => Some(ResumeMime::Png),
            Some("image/jpeg") | Some("image/jpg") | Some("image/pjpeg") => Some(ResumeMime::Jpeg),
            Some(_) => None,
            None => Self::from_extension(file_name?),
        }
    }

    fn from_extension(file_name: &str) -> Option<Self> {
        let ext = std::path::Path::new(file_name)
            .extension()?
            .to_str()?
            .to_lowercase();
        match ext.as_str() {
            "pdf" => Some(ResumeMime::Pdf),
            "png" => Some(ResumeMime::Png),
            "jpg" | "jpeg" => Some(ResumeMime::Jpeg),
            _ => None,
        }
    }
}

/// An uploaded résumé, held only for the duration of one analyze call.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub bytes: Bytes,
    pub mime: ResumeMime,
    pub file_name: Option<String>,
}
