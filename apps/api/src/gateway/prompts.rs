// All LLM prompt constants for the AI gateway.

/// Résumé extraction prompt. Sent after the résumé file as inline data.
pub const ANALYZE_RESUME_PROMPT: &str = r#"You are an expert HR Resume Screener. Analyze the attached resume.
Provide a structured JSON response with:
1. The candidate's full name (Extract carefully from the header).
2. A score from 0-100 based on professional standards.
3. A brief professional summary of the candidate (Write in implied first-person "Resume Voice", e.g., "Ambitious Software Engineer...", do NOT use "He is" or "The candidate is").
4. Top 3 strengths.
5. Top 3 weaknesses or areas for improvement.
6. The most suitable job role for this profile - provide ONLY ONE CLEAR JOB TITLE like "Frontend Developer", "Data Analyst", "Marketing Manager" etc. Keep it short and industry standard.
7. A list of technical and soft skills found.

IMPORTANT: For job role, return only one concise job title that best matches the candidate's experience. Do not add descriptions or multiple roles."#;

/// Improvement prompt template. Replace `{weaknesses_json}` before sending.
pub const IMPROVEMENTS_PROMPT_TEMPLATE: &str = r#"You are a career coach. For each of the following resume weaknesses, provide one specific, actionable tip on how to fix it or phrase it better.
Weaknesses: {weaknesses_json}

Return a JSON object with a property "improvements" which is an array of strings. The order must match the input."#;

/// Appended to every job search instruction.
pub const JOB_SEARCH_SUFFIX: &str =
    " List 5 specific job openings with company names. Focus on jobs posted in the last 30 days.";

/// Narrative stored when the search call fails.
pub const JOB_SEARCH_FAILED_TEXT: &str = "Error fetching jobs.";
