//! Pinecone serverless vector store over its REST API.
//!
//! The control plane (`/indexes`) manages index resources; each index is then
//! reached on its own data-plane host for upserts and queries. Index creation
//! and deletion are asynchronous on the service side, so both calls poll until
//! the change is visible or `ready_timeout` elapses.

pub mod data;
pub mod wire;

use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::{IndexHandle, VectorStore};
use crate::domain::values::index_spec::IndexSpec;
use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

pub use data::PineconeIndex;
use wire::{CreateIndexRequest, IndexList, IndexModel, IndexPlacement};

pub const DEFAULT_CONTROLLER_HOST: &str = "https://api.pinecone.io";
pub const API_VERSION: &str = "2025-01";

#[derive(Debug, Clone)]
pub struct PineconeConfig {
    pub api_key: String,
    pub controller_host: String,
    pub ready_timeout: Duration,
    pub poll_interval: Duration,
}

impl PineconeConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            controller_host: DEFAULT_CONTROLLER_HOST.to_string(),
            ready_timeout: Duration::from_secs(300),
            poll_interval: Duration::from_secs(1),
        }
    }
}

pub struct PineconeStore {
    client: Client,
    config: PineconeConfig,
}

impl PineconeStore {
    pub fn new(mut config: PineconeConfig) -> Self {
        config.controller_host = config.controller_host.trim_end_matches('/').to_string();
        Self {
            client: Client::builder()
                .user_agent("index-sync/0.1")
                .build()
                .unwrap_or_default(),
            config,
        }
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}{path}", self.config.controller_host))
            .header("Api-Key", &self.config.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
    }

    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<Response, DomainError> {
        let resp = builder
            .send()
            .await
            .map_err(|e| DomainError::VectorStore(format!("Pinecone API error: {e}")))?;
        check_status(resp, what).await
    }

    pub async fn describe_index(&self, name: &str) -> Result<IndexModel, DomainError> {
        let request = self.request(Method::GET, &format!("/indexes/{name}"));
        let resp = self.send(request, &format!("Index '{name}'")).await?;
        resp.json()
            .await
            .map_err(|e| DomainError::Parse(e.to_string()))
    }

    async fn wait_until_ready(&self, name: &str) -> Result<IndexModel, DomainError> {
        let started = Instant::now();
        loop {
            let model = self.describe_index(name).await?;
            if model.status.ready {
                return Ok(model);
            }
            debug!(index = name, state = %model.status.state, "Waiting for index to become ready");
            if started.elapsed() >= self.config.ready_timeout {
                return Err(DomainError::Timeout(format!(
                    "Index '{name}' not ready after {:?} (state: {})",
                    self.config.ready_timeout, model.status.state
                )));
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    async fn wait_until_deleted(&self, name: &str) -> Result<(), DomainError> {
        let started = Instant::now();
        while self.has_index(name).await? {
            debug!(index = name, "Waiting for index deletion");
            if started.elapsed() >= self.config.ready_timeout {
                return Err(DomainError::Timeout(format!(
                    "Index '{name}' still present after {:?}",
                    self.config.ready_timeout
                )));
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
        Ok(())
    }
}

/// Maps non-2xx responses: 404 to `NotFound`, everything else to `VectorStore`
/// with the status and body preserved.
pub(crate) async fn check_status(resp: Response, what: &str) -> Result<Response, DomainError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    if status == StatusCode::NOT_FOUND {
        return Err(DomainError::NotFound(what.to_string()));
    }
    Err(DomainError::VectorStore(format!("Pinecone API {status}: {body}")))
}

#[async_trait]
impl VectorStore for PineconeStore {
    async fn list_indexes(&self) -> Result<Vec<String>, DomainError> {
        let resp = self.send(self.request(Method::GET, "/indexes"), "indexes").await?;
        let list: IndexList = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(e.to_string()))?;
        Ok(list.indexes.into_iter().map(|i| i.name).collect())
    }

    async fn create_index(&self, spec: &IndexSpec) -> Result<(), DomainError> {
        let body = CreateIndexRequest {
            name: &spec.name,
            dimension: spec.dimension,
            metric: spec.metric,
            vector_type: spec.vector_type,
            spec: IndexPlacement {
                serverless: &spec.serverless,
            },
        };
        let request = self.request(Method::POST, "/indexes").json(&body);
        self.send(request, &format!("Index '{}'", spec.name)).await?;
        self.wait_until_ready(&spec.name).await?;
        Ok(())
    }

    async fn delete_index(&self, name: &str) -> Result<(), DomainError> {
        let request = self.request(Method::DELETE, &format!("/indexes/{name}"));
        self.send(request, &format!("Index '{name}'")).await?;
        self.wait_until_deleted(name).await
    }

    async fn index(&self, name: &str) -> Result<Arc<dyn IndexHandle>, DomainError> {
        let model = self.describe_index(name).await?;
        if model.host.is_empty() {
            return Err(DomainError::VectorStore(format!("Index '{name}' has no host yet")));
        }
        Ok(Arc::new(PineconeIndex::new(
            self.client.clone(),
            self.config.api_key.clone(),
            &model.host,
        )))
    }
}
