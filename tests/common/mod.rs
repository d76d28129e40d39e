//! Shared test helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use index_sync::domain::error::DomainError;
use index_sync::domain::ports::embedding_port::EmbeddingProvider;
use index_sync::infrastructure::embeddings::hashing::HashingProvider;
use index_sync::infrastructure::memory::vector_store::MemoryStore;
use index_sync::IndexSync;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub fn setup() -> (IndexSync, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let embedder = Arc::new(HashingProvider::default());
    let client = IndexSync::with_providers(embedder, store.clone());
    (client, store)
}

pub fn chunks(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|t| t.to_string()).collect()
}

/// Hashing embeddings, but earlier inputs take longer so concurrent calls
/// complete out of order.
pub struct SlowFirstProvider {
    inner: HashingProvider,
    pub calls: AtomicUsize,
    total: usize,
}

impl SlowFirstProvider {
    pub fn new(total: usize) -> Self {
        Self {
            inner: HashingProvider::default(),
            calls: AtomicUsize::new(0),
            total,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for SlowFirstProvider {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.total.saturating_sub(n) as u64 * 5;
        tokio::time::sleep(Duration::from_millis(delay)).await;
        self.inner.embed(texts).await
    }

    fn dimension(&self) -> usize {
        self.inner.dimension()
    }
}

/// Fails once `fail_after` calls have succeeded.
pub struct FailingProvider {
    inner: HashingProvider,
    calls: AtomicUsize,
    fail_after: usize,
}

impl FailingProvider {
    pub fn new(fail_after: usize) -> Self {
        Self {
            inner: HashingProvider::default(),
            calls: AtomicUsize::new(0),
            fail_after,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for FailingProvider {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) >= self.fail_after {
            return Err(DomainError::Embedding("rate limited".into()));
        }
        self.inner.embed(texts).await
    }

    fn dimension(&self) -> usize {
        self.inner.dimension()
    }
}
