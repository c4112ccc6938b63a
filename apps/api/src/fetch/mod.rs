//! Webpage fetching — turns a careers-page URL into cleaned text.
//!
//! The actual document retrieval is delegated to the [`PageLoader`]
//! collaborator; [`ContentFetcher`] owns validation and cleanup on top of it.
//! No JavaScript rendering — static HTML only.

pub mod clean;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::info;
use url::Url;

use crate::errors::AppError;
use crate::fetch::clean::clean_text;

/// One retrieved web document.
#[derive(Debug, Clone)]
pub struct Document {
    pub page_content: String,
}

/// Web-document loader collaborator. A successful load returns at least one
/// document; zero documents is treated as a failed fetch by the caller.
#[async_trait]
pub trait PageLoader: Send + Sync {
    async fn load(&self, urls: &[String]) -> Result<Vec<Document>>;
}

/// Production loader: one HTTP GET per URL, visible text extracted from the
/// response HTML.
pub struct HttpPageLoader {
    client: reqwest::Client,
}

impl HttpPageLoader {
    pub fn new() -> Result<Self> {
        // Browser-like User-Agent — careers pages often reject default clients
        let user_agent = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    async fn fetch_html(&self, url: &str) -> Result<String> {
        let parsed = Url::parse(url).with_context(|| format!("Invalid URL: {url}"))?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .context("HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("HTTP {} for {}", status, url);
        }

        response
            .text()
            .await
            .context("Failed to read response body")
    }
}

#[async_trait]
impl PageLoader for HttpPageLoader {
    async fn load(&self, urls: &[String]) -> Result<Vec<Document>> {
        let mut documents = Vec::with_capacity(urls.len());
        for url in urls {
            let html = self.fetch_html(url).await?;
            documents.push(Document {
                page_content: page_text(&html),
            });
        }
        Ok(documents)
    }
}

/// Extracts the visible text of an HTML document, dropping elements that
/// never carry job content.
fn page_text(html: &str) -> String {
    let stripped = remove_boilerplate(html);
    let document = Html::parse_document(&stripped);
    document
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Removes script/style and common chrome elements from an HTML string.
fn remove_boilerplate(html: &str) -> String {
    let document = Html::parse_document(html);
    let unwanted = ["script", "style", "noscript", "iframe", "nav", "header", "footer"];

    let mut result = html.to_string();
    for selector_str in unwanted {
        if let Ok(selector) = Selector::parse(selector_str) {
            for element in document.select(&selector) {
                let element_html = element.html();
                result = result.replace(&element_html, "");
            }
        }
    }

    result
}

/// Fetches one careers page and returns its cleaned text.
///
/// Exactly one network call per invocation — no retry, no caching.
pub struct ContentFetcher {
    loader: Arc<dyn PageLoader>,
}

impl ContentFetcher {
    pub fn new(loader: Arc<dyn PageLoader>) -> Self {
        Self { loader }
    }

    /// Retrieves the page at `url` and returns its cleaned text.
    ///
    /// Fails with `Validation` for a blank URL and `Fetch` when the loader
    /// errors, returns zero documents, or the page contains no usable text.
    pub async fn fetch(&self, url: &str) -> Result<String, AppError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(AppError::Validation("URL cannot be empty".to_string()));
        }

        info!("Loading content from URL: {url}");

        let documents = self
            .loader
            .load(&[url.to_string()])
            .await
            .map_err(|e| AppError::Fetch(format!("Unable to fetch content from URL: {e}")))?;

        let first = documents.first().ok_or_else(|| {
            AppError::Fetch("No content could be loaded from the URL".to_string())
        })?;

        let content = clean_text(&first.page_content);
        if content.is_empty() {
            return Err(AppError::Fetch(
                "Page contained no usable text after cleaning".to_string(),
            ));
        }

        info!("Successfully loaded {} characters", content.len());
        Ok(content)
    }
}
