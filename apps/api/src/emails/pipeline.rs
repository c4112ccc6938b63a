//! Email pipeline — orchestrates the full workflow.
//!
//! Flow: fetch → clean → extract jobs → per job: query portfolio links →
//!       write email.
//!
//! Fetch, extraction, and the zero-jobs check abort the whole request; a
//! failed email write only marks its own slot. The caller always receives
//! exactly one string per extracted job.

use std::sync::Arc;

use tracing::{error, info};

use crate::emails::extract::extract_jobs;
use crate::emails::writer::write_mail;
use crate::errors::AppError;
use crate::fetch::ContentFetcher;
use crate::llm_client::Completion;
use crate::portfolio::Portfolio;

/// One pipeline instance per process; stateless across calls apart from the
/// portfolio's load-once gate. All collaborators are injected — tests run
/// the whole pipeline against in-memory fakes.
pub struct EmailPipeline {
    fetcher: ContentFetcher,
    llm: Arc<dyn Completion>,
    portfolio: Arc<Portfolio>,
}

impl EmailPipeline {
    pub fn new(fetcher: ContentFetcher, llm: Arc<dyn Completion>, portfolio: Arc<Portfolio>) -> Self {
        Self {
            fetcher,
            llm,
            portfolio,
        }
    }

    /// Processes one careers-page URL into one cold email per detected job.
    ///
    /// Steps:
    /// 1. fetch + clean the page (Validation/Fetch abort)
    /// 2. extract jobs (Parse aborts); zero jobs → NoJobsFound
    /// 3. ensure the portfolio index is loaded (no-op after the first call)
    /// 4. per job in order: query links, write email — a failed write is
    ///    replaced by a placeholder string, never dropped
    pub async fn process_url(&self, url: &str) -> Result<Vec<String>, AppError> {
        let content = self.fetcher.fetch(url).await?;

        let jobs = extract_jobs(self.llm.as_ref(), &content).await?;
        if jobs.is_empty() {
            return Err(AppError::NoJobsFound);
        }

        self.portfolio.load().await?;

        info!("Generating emails for {} job(s)", jobs.len());

        let mut emails = Vec::with_capacity(jobs.len());
        for (idx, job) in jobs.iter().enumerate() {
            let links = self.portfolio.query(&job.skills).await;
            match write_mail(self.llm.as_ref(), job, &links).await {
                Ok(email) => {
                    info!("Generated email {}", idx + 1);
                    emails.push(email);
                }
                Err(e) => {
                    error!("Failed to generate email for job {}: {e}", idx + 1);
                    emails.push(format!("Error generating email: {e}"));
                }
            }
        }

        Ok(emails)
    }
}
