//! Vector similarity index — wraps the Chroma HTTP API.
//!
//! ARCHITECTURAL RULE: no other module talks to Chroma directly. The
//! [`VectorStore`] trait is the seam; `portfolio` consumes it and tests
//! substitute an in-memory fake. The index itself (embeddings, ANN search,
//! persistence) is entirely the collaborator's concern.

use std::sync::RwLock;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

/// Metadata stored alongside each indexed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkMeta {
    pub links: String,
}

/// Vector similarity index collaborator.
///
/// `query` returns one row of metadata matches per query text, nearest
/// first — ordering and exact cardinality are the index's own contract.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Inserts documents with their metadata under unique ids.
    async fn add(
        &self,
        documents: Vec<String>,
        metadatas: Vec<LinkMeta>,
        ids: Vec<String>,
    ) -> Result<()>;

    /// Number of records currently in the index.
    async fn count(&self) -> Result<usize>;

    /// Similarity query: up to `n_results` nearest matches per query text.
    async fn query(&self, query_texts: &[String], n_results: usize) -> Result<Vec<Vec<LinkMeta>>>;

    /// Deletes and recreates the backing collection.
    async fn reset(&self) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct Collection {
    id: String,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    metadatas: Option<Vec<Vec<LinkMeta>>>,
}

/// Chroma-backed [`VectorStore`]. The collection name keys the durable
/// state; the server owns the on-disk index.
pub struct ChromaStore {
    client: Client,
    base_url: String,
    collection_name: String,
    // Recreating the collection changes its id, so the handle is interior-mutable.
    collection_id: RwLock<String>,
}

impl ChromaStore {
    /// Connects to Chroma and gets or creates the named collection.
    pub async fn connect(base_url: &str, collection_name: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = base_url.trim_end_matches('/').to_string();
        let id = get_or_create_collection(&client, &base_url, collection_name).await?;
        info!("Connected to Chroma collection '{collection_name}' ({id})");

        Ok(Self {
            client,
            base_url,
            collection_name: collection_name.to_string(),
            collection_id: RwLock::new(id),
        })
    }

    fn collection_id(&self) -> String {
        self.collection_id
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn collection_url(&self, suffix: &str) -> String {
        format!(
            "{}/api/v1/collections/{}/{suffix}",
            self.base_url,
            self.collection_id()
        )
    }

    async fn check(&self, response: reqwest::Response, operation: &str) -> Result<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Chroma {operation} failed (status {status}): {body}");
        }
        Ok(response)
    }
}

async fn get_or_create_collection(
    client: &Client,
    base_url: &str,
    collection_name: &str,
) -> Result<String> {
    let response = client
        .post(format!("{base_url}/api/v1/collections"))
        .json(&json!({ "name": collection_name, "get_or_create": true }))
        .send()
        .await
        .context("Chroma is unreachable")?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!("Chroma collection setup failed (status {status}): {body}");
    }

    let collection: Collection = response
        .json()
        .await
        .context("Unexpected Chroma collection response")?;
    Ok(collection.id)
}

#[async_trait]
impl VectorStore for ChromaStore {
    async fn add(
        &self,
        documents: Vec<String>,
        metadatas: Vec<LinkMeta>,
        ids: Vec<String>,
    ) -> Result<()> {
        let response = self
            .client
            .post(self.collection_url("add"))
            .json(&json!({
                "documents": documents,
                "metadatas": metadatas,
                "ids": ids,
            }))
            .send()
            .await
            .context("Chroma is unreachable")?;

        self.check(response, "add").await?;
        debug!("Indexed {} documents", ids.len());
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        let response = self
            .client
            .get(self.collection_url("count"))
            .send()
            .await
            .context("Chroma is unreachable")?;

        let response = self.check(response, "count").await?;
        response
            .json::<usize>()
            .await
            .context("Unexpected Chroma count response")
    }

    async fn query(&self, query_texts: &[String], n_results: usize) -> Result<Vec<Vec<LinkMeta>>> {
        let response = self
            .client
            .post(self.collection_url("query"))
            .json(&json!({
                "query_texts": query_texts,
                "n_results": n_results,
                "include": ["metadatas"],
            }))
            .send()
            .await
            .context("Chroma is unreachable")?;

        let response = self.check(response, "query").await?;
        let result: QueryResponse = response
            .json()
            .await
            .context("Unexpected Chroma query response")?;
        Ok(result.metadatas.unwrap_or_default())
    }

    async fn reset(&self) -> Result<()> {
        let response = self
            .client
            .delete(format!(
                "{}/api/v1/collections/{}",
                self.base_url, self.collection_name
            ))
            .send()
            .await
            .context("Chroma is unreachable")?;

        self.check(response, "delete").await?;

        let id = get_or_create_collection(&self.client, &self.base_url, &self.collection_name)
            .await?;
        *self
            .collection_id
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = id;

        info!("Recreated Chroma collection '{}'", self.collection_name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_meta_round_trips_through_json() {
        let meta = LinkMeta {
            links: "https://example.com/ml-portfolio".to_string(),
        };
        let json = serde_json::to_string(&meta).unwrap();
        assert_eq!(json, r#"{"links":"https://example.com/ml-portfolio"}"#);
        let recovered: LinkMeta = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered, meta);
    }

    #[test]
    fn test_query_response_parses_nested_metadatas() {
        let json = r#"{
            "ids": [["a", "b"]],
            "metadatas": [[{"links": "https://example.com/1"}, {"links": "https://example.com/2"}]]
        }"#;
        let parsed: QueryResponse = serde_json::from_str(json).unwrap();
        let rows = parsed.metadatas.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][1].links, "https://example.com/2");
    }

    #[test]
    fn test_query_response_tolerates_missing_metadatas() {
        let parsed: QueryResponse = serde_json::from_str(r#"{"ids": [[]]}"#).unwrap();
        assert!(parsed.metadatas.is_none());
    }
}
