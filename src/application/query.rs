use crate::application::embed::embed_one;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::vector_store::VectorStore;
use crate::domain::values::index_spec::EMBEDDING_DIMENSION;
use std::sync::Arc;
use tracing::{info, warn};

pub const DEFAULT_TOP_K: usize = 3;

pub struct QueryUseCase {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
}

impl QueryUseCase {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, store }
    }

    /// Returns the `chunk_text` of the `top_k` closest vectors, most similar first.
    pub async fn execute(
        &self,
        query_text: &str,
        index_name: &str,
        top_k: usize,
        namespace: &str,
    ) -> Result<Vec<String>, DomainError> {
        if top_k == 0 {
            return Err(DomainError::InvalidInput("top_k must be at least 1".into()));
        }

        self.embedder.ensure_configured()?;
        let handle = self.store.index(index_name).await?;

        info!("Embedding query");
        let vector = embed_one(self.embedder.as_ref(), query_text, EMBEDDING_DIMENSION).await?;

        info!(index = index_name, namespace = namespace, top_k, "Querying index");
        let matches = handle.query(&vector, top_k, namespace, true).await?;

        let chunks = matches
            .iter()
            .take(top_k)
            .filter_map(|m| match m.chunk_text() {
                Some(text) => Some(text.to_string()),
                None => {
                    warn!(id = %m.id, "Match has no chunk_text metadata, skipping");
                    None
                }
            })
            .collect();
        Ok(chunks)
    }
}
