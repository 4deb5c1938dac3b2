//! Qdrant REST vector store.
//!
//! Uses three endpoints of the Qdrant HTTP API:
//!
//! - `GET /collections` to check whether the collection exists
//! - `PUT /collections/{name}` to create it
//! - `PUT /collections/{name}/points?wait=true` to insert points

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

use super::{CollectionSpec, Distance, Point, VectorStore};
use crate::core::config::StorageConfig;
use crate::core::error::{RepovecError, Result};

/// Vector store backed by a Qdrant server
#[derive(Clone)]
pub struct QdrantStore {
    client: Client,
    base_url: String,
}

impl QdrantStore {
    /// Builds a new Qdrant client.
    ///
    /// # Arguments
    /// * `url` - Server URL, e.g. `http://localhost:6333`
    /// * `api_key` - Optional value for the `api-key` header
    pub fn new(url: &str, api_key: Option<&str>, timeout: Duration) -> Result<Self> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(RepovecError::ConfigError(format!(
                "Qdrant URL must be an http(s) URL: {url}"
            )));
        }

        let mut headers = HeaderMap::new();
        if let Some(key) = api_key.map(str::trim).filter(|k| !k.is_empty()) {
            headers.insert(
                "api-key",
                HeaderValue::from_str(key)
                    .map_err(|_| RepovecError::ConfigError("invalid Qdrant API key".to_string()))?,
            );
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: url.trim_end_matches('/').to_string(),
        })
    }

    /// Builds a client from configuration.
    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        Self::new(
            &config.url,
            config.api_key.as_deref(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn collections_url(&self) -> String {
        format!("{}/collections", self.base_url)
    }

    fn collection_url(&self, name: &str) -> String {
        format!("{}/collections/{}", self.base_url, name)
    }

    fn points_url(&self, name: &str) -> String {
        format!("{}/collections/{}/points?wait=true", self.base_url, name)
    }

    async fn collection_exists(&self, name: &str) -> Result<bool> {
        let resp = self.client.get(self.collections_url()).send().await?;
        let resp = check_status(resp, "list collections").await?;
        let listing: ApiResponse<CollectionsResult> = resp.json().await?;

        Ok(listing.result.collections.iter().any(|c| c.name == name))
    }
}

#[async_trait]
impl VectorStore for QdrantStore {
    async fn ensure_collection(&self, spec: &CollectionSpec) -> Result<bool> {
        if self.collection_exists(&spec.name).await? {
            tracing::debug!("Collection {} already exists", spec.name);
            return Ok(false);
        }

        let body = CreateCollection::from(spec);
        let resp = self
            .client
            .put(self.collection_url(&spec.name))
            .json(&body)
            .send()
            .await?;
        check_status(resp, "create collection").await?;

        Ok(true)
    }

    async fn insert_point(&self, collection: &str, point: Point) -> Result<()> {
        let body = UpsertPoints {
            points: std::slice::from_ref(&point),
        };
        let resp = self
            .client
            .put(self.points_url(collection))
            .json(&body)
            .send()
            .await?;
        check_status(resp, "insert point").await?;

        Ok(())
    }
}

/// Turn a non-2xx response into a storage error
async fn check_status(resp: Response, action: &str) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp
        .text()
        .await
        .unwrap_or_else(|_| "<body unavailable>".to_string());
    Err(RepovecError::StorageError(format!(
        "Qdrant {action} failed ({status}): {body}"
    )))
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    result: T,
}

#[derive(Debug, Deserialize)]
struct CollectionsResult {
    collections: Vec<CollectionDescription>,
}

#[derive(Debug, Deserialize)]
struct CollectionDescription {
    name: String,
}

#[derive(Debug, Serialize)]
struct CreateCollection {
    vectors: VectorParams,
}

#[derive(Debug, Serialize)]
struct VectorParams {
    size: usize,
    distance: Distance,
}

impl From<&CollectionSpec> for CreateCollection {
    fn from(spec: &CollectionSpec) -> Self {
        Self {
            vectors: VectorParams {
                size: spec.vector_size,
                distance: spec.distance,
            },
        }
    }
}

#[derive(Serialize)]
struct UpsertPoints<'a> {
    points: &'a [Point],
}
