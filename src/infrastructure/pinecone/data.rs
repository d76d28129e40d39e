use super::wire::{QueryRequest, QueryResponse, UpsertRequest, UpsertResponse};
use super::{check_status, API_VERSION};
use crate::domain::entities::vector_record::{ScoredMatch, VectorRecord};
use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::IndexHandle;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Data-plane handle bound to one index host.
pub struct PineconeIndex {
    client: Client,
    api_key: String,
    host: String,
}

impl PineconeIndex {
    pub fn new(client: Client, api_key: String, host: &str) -> Self {
        Self {
            client,
            api_key,
            host: normalize_host(host),
        }
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .post(format!("{}{path}", self.host))
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
    }
}

/// Index hosts come back without a scheme; local test servers carry one.
fn normalize_host(host: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{host}")
    }
}

#[async_trait]
impl IndexHandle for PineconeIndex {
    async fn upsert(
        &self,
        records: &[VectorRecord],
        namespace: &str,
    ) -> Result<usize, DomainError> {
        debug!(host = %self.host, count = records.len(), "Upserting vectors");
        let resp = self
            .post("/vectors/upsert")
            .json(&UpsertRequest {
                vectors: records,
                namespace,
            })
            .send()
            .await
            .map_err(|e| DomainError::VectorStore(format!("Pinecone upsert failed: {e}")))?;
        let resp = check_status(resp, "index").await?;

        let result: UpsertResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(e.to_string()))?;
        Ok(result.upserted_count)
    }

    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        namespace: &str,
        include_metadata: bool,
    ) -> Result<Vec<ScoredMatch>, DomainError> {
        let resp = self
            .post("/query")
            .json(&QueryRequest {
                vector,
                top_k,
                namespace,
                include_metadata,
                include_values: false,
            })
            .send()
            .await
            .map_err(|e| DomainError::VectorStore(format!("Pinecone query failed: {e}")))?;
        let resp = check_status(resp, "index").await?;

        let result: QueryResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(e.to_string()))?;
        Ok(result.matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_host() {
        assert_eq!(
            normalize_host("docs-abc.svc.pinecone.io"),
            "https://docs-abc.svc.pinecone.io"
        );
        assert_eq!(normalize_host("http://127.0.0.1:9000/"), "http://127.0.0.1:9000");
    }
}
