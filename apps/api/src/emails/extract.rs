//! Job extraction — turns cleaned careers-page text into structured listings.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::emails::prompts::JOB_EXTRACTION_TEMPLATE;
use crate::errors::AppError;
use crate::llm_client::{strip_json_fences, Completion};

/// One job posting extracted from a careers page.
///
/// Every field defaults to empty when the model omits the key — the model is
/// a best-effort text generator and partial objects are still usable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobListing {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl JobListing {
    /// A listing with every field blank carries nothing to write about.
    pub fn is_empty(&self) -> bool {
        self.role.trim().is_empty()
            && self.experience.trim().is_empty()
            && self.skills.iter().all(|s| s.trim().is_empty())
            && self.description.trim().is_empty()
    }
}

/// Extracts job listings from cleaned page text via the LLM.
///
/// The model is instructed to answer with a JSON array; a single JSON object
/// is accepted and wrapped. Any other shape fails with `Parse` — a reported
/// error, not a crash, since well-formed output cannot be guaranteed. An
/// empty array is a valid "no jobs found" result.
pub async fn extract_jobs(
    llm: &dyn Completion,
    cleaned_text: &str,
) -> Result<Vec<JobListing>, AppError> {
    if cleaned_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Cleaned text cannot be empty".to_string(),
        ));
    }

    info!("Extracting jobs from text");

    let prompt = JOB_EXTRACTION_TEMPLATE.replace("{page_data}", cleaned_text);
    let response = llm
        .complete(&prompt)
        .await
        .map_err(|e| AppError::Parse(format!("Extraction LLM call failed: {e}")))?;

    let jobs = parse_job_response(&response)?;
    info!("Extracted {} job(s)", jobs.len());
    Ok(jobs)
}

/// Parses the raw model reply as a JSON array of listings, accepting a bare
/// object as a one-element array.
fn parse_job_response(response: &str) -> Result<Vec<JobListing>, AppError> {
    let text = strip_json_fences(response);

    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| AppError::Parse(format!("Model output is not valid JSON: {e}")))?;

    let wrapped = match value {
        serde_json::Value::Array(_) => value,
        serde_json::Value::Object(_) => serde_json::Value::Array(vec![value]),
        other => {
            return Err(AppError::Parse(format!(
                "Expected a JSON array or object of job listings, got: {other}"
            )))
        }
    };

    serde_json::from_value(wrapped)
        .map_err(|e| AppError::Parse(format!("Job listings have unexpected shape: {e}")))
}
