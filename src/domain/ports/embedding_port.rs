use crate::domain::error::DomainError;

#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError>;

    fn dimension(&self) -> usize;

    /// Fails when the provider cannot embed at all (e.g. a missing credential),
    /// so callers can stop before touching remote state.
    fn ensure_configured(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
