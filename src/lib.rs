pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::manage_index::ManageIndexUseCase;
use crate::application::query::QueryUseCase;
use crate::application::upload::{UploadReport, UploadUseCase};
use crate::config::{EmbeddingKind, Settings, StoreKind, DEFAULT_EMBED_CONCURRENCY};
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::vector_store::VectorStore;
use crate::domain::values::index_spec::EMBEDDING_DIMENSION;
use crate::domain::values::serverless::ServerlessSpec;
use crate::infrastructure::embeddings::hashing::HashingProvider;
use crate::infrastructure::embeddings::openai::OpenAiProvider;
use crate::infrastructure::memory::vector_store::MemoryStore;
use crate::infrastructure::pinecone::{PineconeConfig, PineconeStore};
use std::sync::Arc;
use tracing::{info, warn};

pub use crate::application::query::DEFAULT_TOP_K;

/// Embeds chunks, keeps a remote index in sync with them, and answers
/// similarity queries against it.
pub struct IndexSync {
    upload_uc: UploadUseCase,
    query_uc: QueryUseCase,
    manage_uc: ManageIndexUseCase,
}

impl IndexSync {
    pub fn new() -> Result<Self, DomainError> {
        Self::from_settings(&Settings::from_env()?)
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, DomainError> {
        info!(
            store = %settings.store,
            embedding = %settings.embedding,
            cloud = %settings.serverless.cloud,
            region = %settings.serverless.region,
            "Initializing index sync client"
        );
        let embedder: Arc<dyn EmbeddingProvider> = match settings.embedding {
            // A missing key only matters to upload and query; delete and list never embed.
            EmbeddingKind::OpenAi => Arc::new(OpenAiProvider::with_optional_key(
                settings.openai_api_key.clone(),
                settings.openai_model.clone(),
                settings.openai_base_url.clone(),
            )),
            EmbeddingKind::Hashing => Arc::new(HashingProvider::default()),
        };

        let store: Arc<dyn VectorStore> = match settings.store {
            StoreKind::Pinecone => {
                let api_key = settings
                    .pinecone_api_key
                    .clone()
                    .ok_or_else(|| DomainError::Config("PINECONE_API_KEY is not set".into()))?;
                let mut config = PineconeConfig::new(api_key);
                config.controller_host = settings.controller_host.clone();
                config.ready_timeout = settings.ready_timeout;
                Arc::new(PineconeStore::new(config))
            }
            StoreKind::Memory => Arc::new(MemoryStore::new()),
        };

        Ok(Self::with_options(
            embedder,
            store,
            settings.serverless.clone(),
            settings.embed_concurrency,
        ))
    }

    pub fn with_providers(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
    ) -> Self {
        Self::with_options(
            embedder,
            store,
            ServerlessSpec::default(),
            DEFAULT_EMBED_CONCURRENCY,
        )
    }

    pub fn with_options(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
        serverless: ServerlessSpec,
        embed_concurrency: usize,
    ) -> Self {
        let provider_dim = embedder.dimension();
        if provider_dim != EMBEDDING_DIMENSION {
            warn!(
                provider_dim,
                index_dim = EMBEDDING_DIMENSION,
                "Embedding provider dimension differs from index dimension"
            );
        }

        Self {
            upload_uc: UploadUseCase::new(
                embedder.clone(),
                store.clone(),
                serverless,
                embed_concurrency,
            ),
            query_uc: QueryUseCase::new(embedder, store.clone()),
            manage_uc: ManageIndexUseCase::new(store),
        }
    }

    // Delegating methods
    pub async fn upload(
        &self,
        chunks: &[String],
        index_name: &str,
        namespace: &str,
    ) -> Result<UploadReport, DomainError> {
        self.upload_uc.execute(chunks, index_name, namespace).await
    }

    pub async fn query(
        &self,
        query_text: &str,
        index_name: &str,
        top_k: usize,
        namespace: &str,
    ) -> Result<Vec<String>, DomainError> {
        self.query_uc.execute(query_text, index_name, top_k, namespace).await
    }

    pub async fn delete(&self, index_name: &str) -> Result<bool, DomainError> {
        self.manage_uc.delete(index_name).await
    }

    pub async fn list_indexes(&self) -> Result<Vec<String>, DomainError> {
        self.manage_uc.list().await
    }
}
