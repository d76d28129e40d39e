use crate::application::embed::embed_one;
use crate::domain::entities::chunk::Chunk;
use crate::domain::entities::vector_record::VectorRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::vector_store::VectorStore;
use crate::domain::values::index_spec::IndexSpec;
use crate::domain::values::serverless::ServerlessSpec;
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of a completed upload cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadReport {
    pub index_name: String,
    pub namespace: String,
    pub upserted_count: usize,
}

pub struct UploadUseCase {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    serverless: ServerlessSpec,
    embed_concurrency: usize,
}

impl UploadUseCase {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
        serverless: ServerlessSpec,
        embed_concurrency: usize,
    ) -> Self {
        Self {
            embedder,
            store,
            serverless,
            embed_concurrency: embed_concurrency.max(1),
        }
    }

    /// Recreates `index_name` from scratch and fills it with one vector per chunk.
    pub async fn execute(
        &self,
        texts: &[String],
        index_name: &str,
        namespace: &str,
    ) -> Result<UploadReport, DomainError> {
        if index_name.trim().is_empty() {
            return Err(DomainError::InvalidInput("Index name must not be empty".into()));
        }
        self.embedder.ensure_configured()?;

        if self.store.has_index(index_name).await? {
            info!(index = index_name, "Index already exists, deleting");
            self.store.delete_index(index_name).await?;
        }

        let spec = IndexSpec::dense_cosine(index_name, self.serverless.clone());
        info!(
            index = index_name,
            dimension = spec.dimension,
            metric = %spec.metric,
            vector_type = %spec.vector_type,
            cloud = %spec.serverless.cloud,
            region = %spec.serverless.region,
            "Creating index"
        );
        self.store.create_index(&spec).await?;
        let handle = self.store.index(index_name).await?;

        let chunks = Chunk::from_texts(texts);
        if chunks.is_empty() {
            warn!(index = index_name, "No chunks to upload, index left empty");
            return Ok(UploadReport {
                index_name: index_name.to_string(),
                namespace: namespace.to_string(),
                upserted_count: 0,
            });
        }

        info!(count = chunks.len(), "Embedding chunks");
        let records = self.embed_chunks(&chunks, spec.dimension).await?;

        info!(count = records.len(), "Uploading vectors");
        let upserted_count = handle.upsert(&records, namespace).await?;
        info!(
            index = index_name,
            namespace = namespace,
            upserted_count,
            "Upload complete"
        );

        Ok(UploadReport {
            index_name: index_name.to_string(),
            namespace: namespace.to_string(),
            upserted_count,
        })
    }

    /// `buffered` yields results in input order, so ids stay positional
    /// regardless of which embedding call finishes first.
    async fn embed_chunks(
        &self,
        chunks: &[Chunk],
        dimension: usize,
    ) -> Result<Vec<VectorRecord>, DomainError> {
        stream::iter(chunks)
            .map(|chunk| async move {
                let values = embed_one(self.embedder.as_ref(), &chunk.text, dimension).await?;
                debug!(id = %chunk.id, "Embedded chunk");
                Ok::<_, DomainError>(VectorRecord::from_chunk(chunk, values))
            })
            .buffered(self.embed_concurrency)
            .try_collect()
            .await
    }
}
