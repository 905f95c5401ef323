pub mod analysis;
pub mod jobs;
pub mod template;
pub mod upload;

pub use analysis::{ProfileEdit, ResumeAnalysis};
pub use jobs::{JobListing, JobSearchResult, WorkMode};
pub use template::TemplateKind;
pub use upload::{ResumeFile, ResumeMime};
