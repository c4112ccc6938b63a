//! Cold-email writing — one LLM call per extracted job.

use tracing::info;

use crate::emails::extract::JobListing;
use crate::emails::prompts::EMAIL_TEMPLATE;
use crate::errors::AppError;
use crate::llm_client::Completion;
use crate::vector_store::LinkMeta;

/// Drafts a cold email for one job, citing the given portfolio links.
///
/// The job and links are rendered as JSON into the fixed template. The reply
/// is returned trimmed; any non-empty string is accepted — email content is
/// not structurally validated.
pub async fn write_mail(
    llm: &dyn Completion,
    job: &JobListing,
    links: &[LinkMeta],
) -> Result<String, AppError> {
    if job.is_empty() {
        return Err(AppError::Validation("Job cannot be empty".to_string()));
    }

    info!("Generating email for job: {}", display_role(job));

    let prompt = build_email_prompt(job, links)?;
    let email = llm
        .complete(&prompt)
        .await
        .map_err(|e| AppError::Generation(format!("Email LLM call failed: {e}")))?;

    info!("Email generated successfully");
    Ok(email.trim().to_string())
}

fn display_role(job: &JobListing) -> &str {
    if job.role.trim().is_empty() {
        "Unknown"
    } else {
        &job.role
    }
}

fn build_email_prompt(job: &JobListing, links: &[LinkMeta]) -> Result<String, AppError> {
    let job_description = serde_json::to_string(job)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize job: {e}")))?;
    let link_list = serde_json::to_string(links)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize links: {e}")))?;

    Ok(EMAIL_TEMPLATE
        .replace("{job_description}", &job_description)
        .replace("{link_list}", &link_list))
}
