use crate::domain::entities::vector_record::{ScoredMatch, VectorRecord};
use crate::domain::error::DomainError;
use crate::domain::values::index_spec::IndexSpec;
use async_trait::async_trait;
use std::sync::Arc;

/// Control plane of a vector database: manages index resources.
#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn list_indexes(&self) -> Result<Vec<String>, DomainError>;

    async fn create_index(&self, spec: &IndexSpec) -> Result<(), DomainError>;

    async fn delete_index(&self, name: &str) -> Result<(), DomainError>;

    /// Handle to an existing index. Fails with `NotFound` when the index is absent.
    async fn index(&self, name: &str) -> Result<Arc<dyn IndexHandle>, DomainError>;

    async fn has_index(&self, name: &str) -> Result<bool, DomainError> {
        Ok(self.list_indexes().await?.iter().any(|n| n == name))
    }
}

/// Data plane of a single index.
#[async_trait]
pub trait IndexHandle: Send + Sync {
    /// Insert or overwrite records by id. Returns the number upserted.
    async fn upsert(&self, records: &[VectorRecord], namespace: &str) -> Result<usize, DomainError>;

    /// Nearest neighbours, most similar first.
    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        namespace: &str,
        include_metadata: bool,
    ) -> Result<Vec<ScoredMatch>, DomainError>;
}
